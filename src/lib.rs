//! Pointer-tracking loading intro for the browser.
//!
//! This crate is compiled to WebAssembly and drives a page's loading
//! sequence: a focal graphic tracks the cursor with damped motion inside a
//! circular travel bound derived from live layout, a monitor folds real
//! resource loading and a wall-clock fallback into one monotonic progress
//! signal, and a choreographed reveal runs exactly once on completion. All
//! engine logic is browser-free and tested natively; only the `host` module
//! touches the DOM.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level controller [`engine::IntroCore`] and its frame output |
//! | [`geom`] | Points, rectangles, and travel-bound computation |
//! | [`motion`] | Radial pointer clamp and per-frame exponential smoothing |
//! | [`attractor`] | Fill-color scan producing debug-overlay points of interest |
//! | [`progress`] | Load monitor: image/font completion, gentle floor, dual-path race |
//! | [`reveal`] | Reveal state machine, stage plans, and the animation drivers |
//! | [`consts`] | Shared tuning constants (smoothing, caps, deadlines) |
//! | `host` | DOM glue: anchors, listeners, frame loop, timers (wasm32 only) |

pub mod attractor;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod motion;
pub mod progress;
pub mod reveal;

#[cfg(target_arch = "wasm32")]
pub mod host;
