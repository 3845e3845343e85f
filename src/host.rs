//! Browser host layer: wires DOM events into [`IntroCore`] and applies its
//! outputs back to the page.
//!
//! This module is the only place that touches `web_sys`. It owns the anchor
//! elements, the animation-frame loop (with an explicit stop token — the
//! loop is cancellable even though it normally runs for the page session),
//! the load/error listeners on tracked images, the progress tick, and the
//! race between the two completion paths. Every anchor lookup is optional:
//! a missing element degrades that one output and nothing else.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{self, Either};
use gloo_timers::callback::{Interval, Timeout};
use gloo_timers::future::TimeoutFuture;
use js_sys::{Date, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement, KeyboardEvent,
    MouseEvent, Window,
};

use crate::attractor::Candidate;
use crate::engine::{DebugScene, FrameUpdate, IntroCore};
use crate::geom::{Point, Rect};
use crate::progress::{CompletionPath, MonitorConfig};
use crate::reveal::{
    AnimationDriver, FallbackDriver, Keyframe, StageOp, TimelineDriver, ZOOM_ORIGIN, ZOOM_SCALE,
    overlay_opacity, plan_duration_ms,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Easing used by the pupil/iris shrink stages.
const SHRINK_EASE: &str = "cubic-bezier(0.76, 0, 0.24, 1)";

/// Easing used by the zoom stage.
const ZOOM_EASE: &str = "cubic-bezier(0.22, 0.9, 0.28, 1)";

/// Frame pacing for the overlay ramp task, in milliseconds.
const RAMP_STEP_MS: u32 = 16;

/// Delay between writing an entrance's initial state and its target state,
/// so the transition actually plays.
const ENTRANCE_KICK_MS: u32 = 20;

// --- Selectors & anchors ---

/// CSS selectors for every page element the engine touches.
#[derive(Debug, Clone, Copy)]
pub struct Selectors {
    pub loader: &'static str,
    pub bar: &'static str,
    pub bar_fill: &'static str,
    pub content: &'static str,
    pub eye: &'static str,
    pub outer: &'static str,
    pub group: &'static str,
    pub pupil: &'static str,
    pub iris: &'static str,
    pub shimmer: &'static str,
    pub nav: &'static str,
    pub sections: &'static str,
    pub attractor_candidates: &'static str,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            loader: "#loader",
            bar: ".loader-bar",
            bar_fill: ".loader-bar-fill",
            content: "#content",
            eye: ".intro-eye",
            outer: "#eye-outer",
            group: "#eye-iris-group",
            pupil: "#eye-pupil",
            iris: "#eye-iris",
            shimmer: ".eye-lids",
            nav: ".site-nav",
            sections: "[data-reveal]",
            attractor_candidates: "path",
        }
    }
}

/// Resolved anchor elements. Any of them may be absent.
struct Anchors {
    window: Window,
    document: Document,
    selectors: Selectors,
    loader: Option<Element>,
    bar: Option<Element>,
    bar_fill: Option<Element>,
    content: Option<Element>,
    eye: Option<Element>,
    outer: Option<Element>,
    group: Option<Element>,
    pupil: Option<Element>,
    iris: Option<Element>,
    shimmer: Option<Element>,
    nav: Option<Element>,
}

impl Anchors {
    fn find(window: Window, document: Document, selectors: Selectors) -> Self {
        let query = |sel: &str| -> Option<Element> {
            let found = document.query_selector(sel).unwrap_or(None);
            if found.is_none() {
                log::debug!("anchor not found: {sel}");
            }
            found
        };
        let loader = query(selectors.loader);
        let bar = query(selectors.bar);
        let bar_fill = query(selectors.bar_fill);
        let content = query(selectors.content);
        let eye = query(selectors.eye);
        let outer = query(selectors.outer);
        let group = query(selectors.group);
        let pupil = query(selectors.pupil);
        let iris = query(selectors.iris);
        let shimmer = query(selectors.shimmer);
        let nav = query(selectors.nav);
        Self {
            window,
            document,
            selectors,
            loader,
            bar,
            bar_fill,
            content,
            eye,
            outer,
            group,
            pupil,
            iris,
            shimmer,
            nav,
        }
    }

    /// Bounding box of an optional anchor, `None` when absent.
    fn rect(el: Option<&Element>) -> Option<Rect> {
        el.map(|el| {
            let r = el.get_bounding_client_rect();
            Rect::new(r.left(), r.top(), r.width(), r.height())
        })
    }
}

// --- Small DOM helpers ---

fn set_attr(el: &Element, name: &str, value: &str) {
    if el.set_attribute(name, value).is_err() {
        log::warn!("failed to set attribute {name}");
    }
}

/// Write one CSS property. SVG elements take the style-attribute path since
/// they are not `HtmlElement`s; appended declarations win by CSS order.
fn set_style(el: &Element, name: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        if html.style().set_property(name, value).is_err() {
            log::warn!("failed to set style {name}");
        }
        return;
    }
    let mut style = el.get_attribute("style").unwrap_or_default();
    if !style.is_empty() && !style.ends_with(';') {
        style.push(';');
    }
    style.push_str(name);
    style.push(':');
    style.push_str(value);
    style.push(';');
    set_attr(el, "style", &style);
}

fn set_style_opt(el: Option<&Element>, name: &str, value: &str) {
    if let Some(el) = el {
        set_style(el, name, value);
    }
}

// --- Shared handles ---

/// Handles shared between the app, its listeners, and its async tasks.
#[derive(Clone)]
struct Shared {
    core: Rc<RefCell<IntroCore>>,
    anchors: Rc<Anchors>,
    driver: Rc<dyn AnimationDriver>,
    running: Rc<Cell<bool>>,
    raf_handle: Rc<Cell<i32>>,
    /// Pending stage timeouts; clearing the vec cancels them.
    pending: Rc<RefCell<Vec<Timeout>>>,
    tick: Rc<RefCell<Option<Interval>>>,
    images_done_tx: Rc<RefCell<Option<oneshot::Sender<()>>>>,
    overlay: Rc<RefCell<Option<Element>>>,
}

impl Shared {
    /// Write the current displayed percentage to the progress bar.
    fn paint_progress(&self) {
        let pct = self.core.borrow_mut().displayed_progress(Date::now());
        set_style_opt(self.anchors.bar_fill.as_ref(), "width", &format!("{}%", pct.round()));
    }

    /// Record one image settling; resolves the resource path on the edge.
    fn image_settled(&self) {
        let all_done = self.core.borrow_mut().resource_settled();
        self.paint_progress();
        if all_done {
            if let Some(tx) = self.images_done_tx.borrow_mut().take() {
                if tx.send(()).is_err() {
                    log::debug!("resource path already dropped");
                }
            }
        }
    }

    fn schedule(&self, at_ms: u32, f: impl FnOnce() + 'static) {
        self.pending.borrow_mut().push(Timeout::new(at_ms, f));
    }
}

// --- Listener bookkeeping ---

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(f);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), kind, callback })
    }

    fn detach(&self) {
        if self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("failed to detach {} listener", self.kind);
        }
    }
}

/// Load/error hooks on one tracked image.
struct ImageHook {
    image: HtmlImageElement,
    on_load: Closure<dyn FnMut(Event)>,
    on_error: Closure<dyn FnMut(Event)>,
}

impl ImageHook {
    fn detach(&self) {
        for (kind, cb) in [("load", &self.on_load), ("error", &self.on_error)] {
            if self
                .image
                .remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
                .is_err()
            {
                log::warn!("failed to detach image {kind} listener");
            }
        }
    }
}

// --- App ---

/// The mounted intro: owns the engine, its listeners, and its timers.
pub struct IntroApp {
    shared: Shared,
    listeners: Vec<Listener>,
    image_hooks: Vec<ImageHook>,
}

impl IntroApp {
    /// Build the engine from the live document and start everything: the
    /// frame loop, the load monitor, and the intro focus sequence.
    ///
    /// # Errors
    ///
    /// Returns `Err` only when the page has no window/document or a listener
    /// cannot be attached; missing anchors merely degrade.
    pub fn mount() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let anchors = Rc::new(Anchors::find(window, document, Selectors::default()));
        let driver = select_driver(&anchors.document);

        let images = collect_images(&anchors);
        let mut core = IntroCore::new(images.len(), Date::now(), MonitorConfig::default());
        core.on_resize(
            Anchors::rect(anchors.outer.as_ref()),
            Anchors::rect(anchors.group.as_ref()),
        );
        core.set_candidates(scan_candidates(&anchors));

        let shared = Shared {
            core: Rc::new(RefCell::new(core)),
            anchors,
            driver,
            running: Rc::new(Cell::new(true)),
            raf_handle: Rc::new(Cell::new(0)),
            pending: Rc::new(RefCell::new(Vec::new())),
            tick: Rc::new(RefCell::new(None)),
            images_done_tx: Rc::new(RefCell::new(None)),
            overlay: Rc::new(RefCell::new(None)),
        };

        create_debug_layer(&shared);

        let mut app = Self { shared, listeners: Vec::new(), image_hooks: Vec::new() };
        app.watch_images(images);
        app.attach_listeners()?;
        app.shared.paint_progress();
        start_monitor(&app.shared);
        start_intro(&app.shared);
        start_frame_loop(&app.shared);

        log::info!(
            "intro mounted: {} images tracked, {} driver",
            app.image_hooks.len(),
            app.shared.driver.name()
        );
        Ok(app)
    }

    /// Tear everything down: the frame loop, all listeners, and every pending
    /// timer. Safe to call more than once.
    pub fn stop(&mut self) {
        self.shared.running.set(false);
        if let Some(window) = web_sys::window() {
            if window.cancel_animation_frame(self.shared.raf_handle.get()).is_err() {
                log::warn!("failed to cancel animation frame");
            }
        }
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        for hook in self.image_hooks.drain(..) {
            hook.detach();
        }
        self.shared.pending.borrow_mut().clear();
        *self.shared.tick.borrow_mut() = None;
        // Dropping the sender guarantees the resource path can never resolve.
        *self.shared.images_done_tx.borrow_mut() = None;
        log::info!("intro stopped");
    }

    /// Hook load/error on every image not already settled.
    fn watch_images(&mut self, images: Vec<HtmlImageElement>) {
        for image in images {
            if image.complete() && image.natural_width() != 0 {
                self.shared.image_settled();
                continue;
            }
            let hook = {
                let on_load = {
                    let shared = self.shared.clone();
                    Closure::<dyn FnMut(Event)>::new(move |_: Event| shared.image_settled())
                };
                let on_error = {
                    let shared = self.shared.clone();
                    Closure::<dyn FnMut(Event)>::new(move |_: Event| shared.image_settled())
                };
                ImageHook { image, on_load, on_error }
            };
            for (kind, cb) in [("load", &hook.on_load), ("error", &hook.on_error)] {
                if hook
                    .image
                    .add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
                    .is_err()
                {
                    log::warn!("failed to attach image {kind} listener");
                }
            }
            self.image_hooks.push(hook);
        }
    }

    fn attach_listeners(&mut self) -> Result<(), JsValue> {
        let window_target = EventTarget::from(self.shared.anchors.window.clone());

        let pointer = {
            let shared = self.shared.clone();
            Listener::attach(&window_target, "mousemove", move |event: Event| {
                if let Some(e) = event.dyn_ref::<MouseEvent>() {
                    let pointer = Point::new(f64::from(e.client_x()), f64::from(e.client_y()));
                    shared.core.borrow_mut().on_pointer_move(pointer);
                }
            })?
        };

        let resize = {
            let shared = self.shared.clone();
            Listener::attach(&window_target, "resize", move |_: Event| {
                let anchors = &shared.anchors;
                let mut core = shared.core.borrow_mut();
                core.on_resize(
                    Anchors::rect(anchors.outer.as_ref()),
                    Anchors::rect(anchors.group.as_ref()),
                );
                core.set_candidates(scan_candidates(anchors));
            })?
        };

        let scroll = {
            let shared = self.shared.clone();
            Listener::attach(&window_target, "scroll", move |_: Event| {
                let candidates = scan_candidates(&shared.anchors);
                shared.core.borrow_mut().set_candidates(candidates);
            })?
        };

        let keydown = {
            let shared = self.shared.clone();
            Listener::attach(&window_target, "keydown", move |event: Event| {
                let Some(e) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let toggled = shared.core.borrow_mut().on_key(&e.key());
                if let Some(enabled) = toggled {
                    if let Some(layer) = shared.overlay.borrow().as_ref() {
                        set_style(layer, "display", if enabled { "block" } else { "none" });
                    }
                    log::debug!("debug overlay {}", if enabled { "on" } else { "off" });
                }
            })?
        };

        self.listeners.extend([pointer, resize, scroll, keydown]);
        Ok(())
    }
}

// --- Startup pieces ---

/// Pick the timeline driver when the Web Animations API is available,
/// otherwise fall back to sequential delayed state changes.
fn select_driver(document: &Document) -> Rc<dyn AnimationDriver> {
    let has_timeline = document.body().is_some_and(|body| {
        Reflect::has(body.as_ref(), &JsValue::from_str("animate")).unwrap_or(false)
    });
    if has_timeline {
        Rc::new(TimelineDriver)
    } else {
        log::warn!("animation timeline unavailable; using fallback choreography");
        Rc::new(FallbackDriver)
    }
}

/// Images inside the content container, else every image in the document.
fn collect_images(anchors: &Anchors) -> Vec<HtmlImageElement> {
    let mut out = Vec::new();
    if let Some(content) = &anchors.content {
        if let Ok(list) = content.query_selector_all("img") {
            for i in 0..list.length() {
                if let Some(img) =
                    list.item(i).and_then(|n| n.dyn_ref::<HtmlImageElement>().cloned())
                {
                    out.push(img);
                }
            }
        }
    }
    if out.is_empty() {
        let all = anchors.document.images();
        for i in 0..all.length() {
            if let Some(img) = all.item(i).and_then(|el| el.dyn_ref::<HtmlImageElement>().cloned())
            {
                out.push(img);
            }
        }
    }
    out
}

/// Scan the document for attractor candidates.
fn scan_candidates(anchors: &Anchors) -> Vec<Candidate> {
    let Ok(list) = anchors.document.query_selector_all(anchors.selectors.attractor_candidates)
    else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        let Some(el) = list.item(i).and_then(|n| n.dyn_ref::<Element>().cloned()) else {
            continue;
        };
        // A failed computed-style read excludes only the approximate match.
        let computed_fill = match anchors.window.get_computed_style(&el) {
            Ok(Some(style)) => match style.get_property_value("fill") {
                Ok(fill) => Some(fill),
                Err(_) => None,
            },
            _ => None,
        };
        let r = el.get_bounding_client_rect();
        let rect = (r.width() > 0.0 || r.height() > 0.0)
            .then(|| Rect::new(r.left(), r.top(), r.width(), r.height()));
        out.push(Candidate {
            style_attr: el.get_attribute("style").unwrap_or_default(),
            fill_attr: el.get_attribute("fill").unwrap_or_default(),
            computed_fill,
            rect,
        });
    }
    out
}

/// Full-screen SVG layer for the debug overlay, hidden until toggled.
fn create_debug_layer(shared: &Shared) {
    let document = &shared.anchors.document;
    let Ok(layer) = document.create_element_ns(Some(SVG_NS), "svg") else {
        log::warn!("failed to create debug layer");
        return;
    };
    set_attr(&layer, "class", "debug-layer");
    set_attr(
        &layer,
        "style",
        "position:fixed;left:0;top:0;right:0;bottom:0;pointer-events:none;z-index:10000;display:none;",
    );
    if let Some(body) = document.body() {
        if body.append_child(&layer).is_err() {
            log::warn!("failed to attach debug layer");
            return;
        }
    }
    *shared.overlay.borrow_mut() = Some(layer);
}

// --- Frame loop ---

fn start_frame_loop(shared: &Shared) {
    // The closure holds its own slot, so the loop keeps itself alive until
    // the stop token ends rescheduling.
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let slot_inner = Rc::clone(&slot);
    let shared_loop = shared.clone();

    *slot.borrow_mut() = Some(Closure::new(move || {
        if !shared_loop.running.get() {
            return;
        }
        let update = shared_loop.core.borrow_mut().on_frame();
        apply_frame(&shared_loop, &update);
        if let Some(callback) = slot_inner.borrow().as_ref() {
            request_frame(&shared_loop, callback);
        }
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        request_frame(shared, callback);
    }
}

fn request_frame(shared: &Shared, callback: &Closure<dyn FnMut()>) {
    match shared.anchors.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(handle) => shared.raf_handle.set(handle),
        Err(_) => log::warn!("failed to schedule animation frame"),
    }
}

fn apply_frame(shared: &Shared, update: &FrameUpdate) {
    if let Some(group) = &shared.anchors.group {
        set_attr(
            group,
            "transform",
            &format!("translate({},{})", update.translate.x, update.translate.y),
        );
    }
    if let Some(scene) = &update.debug {
        if let Some(layer) = shared.overlay.borrow().as_ref() {
            draw_debug_scene(&shared.anchors.document, layer, scene);
        }
    }
}

/// Redraw the overlay from scratch: attractor markers, the focal position,
/// and the travel boundary circle.
fn draw_debug_scene(document: &Document, layer: &Element, scene: &DebugScene) {
    while let Some(child) = layer.first_child() {
        if layer.remove_child(&child).is_err() {
            break;
        }
    }
    for a in &scene.attractors {
        append_circle(document, layer, a.x, a.y, 8.0, "rgba(0,120,255,0.6)", None);
    }
    append_circle(document, layer, scene.focus.x, scene.focus.y, 6.0, "rgba(255,50,50,0.85)", None);
    append_circle(
        document,
        layer,
        scene.center.x,
        scene.center.y,
        scene.radius,
        "none",
        Some("rgba(0,255,0,0.3)"),
    );
}

fn append_circle(
    document: &Document,
    layer: &Element,
    cx: f64,
    cy: f64,
    r: f64,
    fill: &str,
    stroke: Option<&str>,
) {
    let Ok(circle) = document.create_element_ns(Some(SVG_NS), "circle") else {
        return;
    };
    set_attr(&circle, "cx", &cx.to_string());
    set_attr(&circle, "cy", &cy.to_string());
    set_attr(&circle, "r", &r.to_string());
    set_attr(&circle, "fill", fill);
    if let Some(stroke) = stroke {
        set_attr(&circle, "stroke", stroke);
    }
    if layer.append_child(&circle).is_err() {
        log::warn!("failed to append debug marker");
    }
}

// --- Intro focus sequence ---

/// Pre-reveal focus movements and the shimmer, per the selected driver.
fn start_intro(shared: &Shared) {
    let moves = shared.driver.intro();
    if moves.is_empty() {
        return;
    }
    for mv in moves {
        let core = Rc::clone(&shared.core);
        shared.schedule(mv.at_ms, move || {
            core.borrow_mut().damper.nudge(mv.offset);
        });
    }
    if let Some(shimmer) = &shared.anchors.shimmer {
        set_style(shimmer, "opacity", "0.6");
        set_style(shimmer, "transition", "opacity 0.6s ease, filter 0.6s ease");
        let shimmer = shimmer.clone();
        shared.schedule(600, move || {
            set_style(&shimmer, "opacity", "1");
            set_style(&shimmer, "filter", "brightness(1.25)");
        });
    }
}

// --- Load monitor ---

/// Start the progress tick and race the two completion paths.
///
/// Each path is a single future; `select` implements first-settled-wins and
/// dropping the loser cancels it. The engine's completion flag is a second
/// guard behind the combinator.
fn start_monitor(shared: &Shared) {
    let config = shared.core.borrow().monitor.config();

    let (tx, rx) = oneshot::channel::<()>();
    if shared.core.borrow().monitor.images_done() {
        if tx.send(()).is_err() {
            log::debug!("resource path dropped before start");
        }
    } else {
        *shared.images_done_tx.borrow_mut() = Some(tx);
    }

    let tick = {
        let shared = shared.clone();
        Interval::new(config.tick_ms, move || shared.paint_progress())
    };
    *shared.tick.borrow_mut() = Some(tick);

    let shared = shared.clone();
    spawn_local(async move {
        let fonts = fonts_ready_promise(&shared.anchors.document);
        let resources = async move {
            if rx.await.is_err() {
                // Sender dropped on teardown; this path must never resolve.
                future::pending::<()>().await;
            }
            if JsFuture::from(fonts).await.is_err() {
                log::debug!("font readiness rejected; continuing");
            }
            CompletionPath::Resources
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let deadline_ms = config.fallback_deadline_ms as u32;
        let fallback = async move {
            TimeoutFuture::new(deadline_ms).await;
            CompletionPath::Fallback
        };

        let winner = match future::select(Box::pin(resources), Box::pin(fallback)).await {
            Either::Left((path, _)) | Either::Right((path, _)) => path,
        };
        if !shared.running.get() {
            return;
        }

        let plan = {
            let mut core = shared.core.borrow_mut();
            core.complete(winner, shared.driver.as_ref())
        };
        let Some(plan) = plan else {
            return;
        };
        if winner == CompletionPath::Fallback {
            log::warn!("fallback deadline reached with resources outstanding");
        }

        // The loser is dropped by `select`; the tick stops with it.
        *shared.tick.borrow_mut() = None;
        shared.paint_progress();

        // No core borrow may be held across an await; the frame loop borrows
        // every frame.
        let settle_ms = shared.core.borrow().monitor.settle_delay_ms(winner);
        TimeoutFuture::new(settle_ms).await;
        if shared.running.get() {
            log::info!("load complete via {winner:?}; starting reveal");
            execute_plan(&shared, &plan);
        }
    });
}

/// `document.fonts.ready` when the API exists, an already-resolved promise
/// otherwise. Read dynamically so an absent API is just another degrade.
fn fonts_ready_promise(document: &Document) -> Promise {
    let fonts = match Reflect::get(document.as_ref(), &JsValue::from_str("fonts")) {
        Ok(v) if !v.is_undefined() && !v.is_null() => v,
        _ => return Promise::resolve(&JsValue::UNDEFINED),
    };
    match Reflect::get(&fonts, &JsValue::from_str("ready")) {
        Ok(v) => v
            .dyn_into::<Promise>()
            .unwrap_or_else(|_| Promise::resolve(&JsValue::UNDEFINED)),
        Err(_) => Promise::resolve(&JsValue::UNDEFINED),
    }
}

// --- Reveal execution ---

/// Schedule every keyframe of the reveal plan, plus the final state flip.
fn execute_plan(shared: &Shared, plan: &[Keyframe]) {
    for keyframe in plan {
        let shared_op = shared.clone();
        let op = keyframe.op;
        shared.schedule(keyframe.at_ms, move || apply_op(&shared_op, op));
    }

    let section_count = count_sections(&shared.anchors);
    let total = plan_duration_ms(plan, section_count);
    let core = Rc::clone(&shared.core);
    shared.schedule(total, move || {
        core.borrow_mut().sequencer.finish();
        log::info!("reveal complete");
    });
}

fn count_sections(anchors: &Anchors) -> u32 {
    anchors
        .document
        .query_selector_all(anchors.selectors.sections)
        .map(|list| list.length())
        .unwrap_or(0)
}

fn apply_op(shared: &Shared, op: StageOp) {
    let anchors = &shared.anchors;
    match op {
        StageOp::FadeBar { duration_ms } => {
            set_style_opt(anchors.bar.as_ref(), "transition", &format!("opacity {duration_ms}ms ease"));
            set_style_opt(anchors.bar.as_ref(), "opacity", "0");
        }
        StageOp::ShrinkPupil { duration_ms } => {
            shrink_to_zero(anchors.pupil.as_ref(), duration_ms);
        }
        StageOp::ShrinkIris { duration_ms } => {
            shrink_to_zero(anchors.iris.as_ref(), duration_ms);
        }
        StageOp::ZoomEye { duration_ms } => {
            if let Some(eye) = &anchors.eye {
                set_style(eye, "transition", &format!("transform {duration_ms}ms {ZOOM_EASE}"));
                set_style(eye, "transform-origin", ZOOM_ORIGIN);
                set_style(eye, "transform", &format!("scale({ZOOM_SCALE})"));
            }
            run_overlay_ramp(shared, duration_ms);
        }
        StageOp::SwapContainers => {
            // The two hidden-state markers flip together, always opposite.
            if let Some(loader) = &anchors.loader {
                set_style(loader, "display", "none");
                set_attr(loader, "aria-hidden", "true");
            }
            if let Some(content) = &anchors.content {
                set_attr(content, "aria-hidden", "false");
                set_style(content, "display", "block");
                set_style(content, "opacity", "1");
            }
        }
        StageOp::RevealNav { duration_ms } => {
            if let Some(nav) = &anchors.nav {
                entrance(shared, nav.clone(), duration_ms, 0);
            }
        }
        StageOp::RevealSections { duration_ms, base_delay_ms, stagger_ms } => {
            let Ok(list) = anchors.document.query_selector_all(anchors.selectors.sections) else {
                return;
            };
            for i in 0..list.length() {
                if let Some(el) = list.item(i).and_then(|n| n.dyn_ref::<Element>().cloned()) {
                    entrance(shared, el, duration_ms, base_delay_ms + stagger_ms * i);
                }
            }
        }
    }
}

fn shrink_to_zero(el: Option<&Element>, duration_ms: u32) {
    if let Some(el) = el {
        set_style(el, "transition", &format!("transform {duration_ms}ms {SHRINK_EASE}"));
        set_style(el, "transform-origin", "center center");
        set_style(el, "transform", "scale(0)");
    }
}

/// Uniform translate+scale+fade entrance after `delay_ms`.
fn entrance(shared: &Shared, el: Element, duration_ms: u32, delay_ms: u32) {
    set_style(&el, "opacity", "0");
    set_style(&el, "transform", "translateY(16px) scale(0.985)");
    set_style(
        &el,
        "transition",
        &format!("opacity {duration_ms}ms ease, transform {duration_ms}ms ease"),
    );
    shared.schedule(delay_ms + ENTRANCE_KICK_MS, move || {
        set_style(&el, "opacity", "1");
        set_style(&el, "transform", "translateY(0) scale(1)");
    });
}

/// Drive the loader's white masking overlay through the back of the zoom.
fn run_overlay_ramp(shared: &Shared, duration_ms: u32) {
    let Some(loader) = shared.anchors.loader.clone() else {
        return;
    };
    let running = Rc::clone(&shared.running);
    spawn_local(async move {
        let started = Date::now();
        loop {
            TimeoutFuture::new(RAMP_STEP_MS).await;
            if !running.get() {
                return;
            }
            let progress = ((Date::now() - started) / f64::from(duration_ms)).min(1.0);
            let opacity = overlay_opacity(progress);
            if opacity > 0.0 {
                set_style(&loader, "background", &format!("rgba(255,255,255,{opacity})"));
            }
            if progress >= 1.0 {
                return;
            }
        }
    });
}

// --- Exported entry points ---

thread_local! {
    static APP: RefCell<Option<IntroApp>> = const { RefCell::new(None) };
}

/// Module init: panic hook and console logger.
#[wasm_bindgen(start)]
fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        // A logger was already installed by the embedding page.
    }
}

/// Mount the intro onto the current document.
///
/// # Errors
///
/// Fails when there is no window/document or a listener cannot be attached.
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    APP.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            log::warn!("intro already mounted");
            return Ok(());
        }
        *slot = Some(IntroApp::mount()?);
        Ok(())
    })
}

/// Stop the intro and release every listener and timer.
#[wasm_bindgen]
pub fn unmount() {
    APP.with(|slot| {
        if let Some(mut app) = slot.borrow_mut().take() {
            app.stop();
        } else {
            log::debug!("unmount with nothing mounted");
        }
    });
}
