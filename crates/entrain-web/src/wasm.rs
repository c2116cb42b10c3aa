#![forbid(unsafe_code)]

//! `wasm-bindgen` surface wiring the effects to the page.
//!
//! The JS host constructs one [`SiteDecor`] (optionally with a JSON options
//! string) and calls `mount()` once the DOM is ready:
//!
//! ```js
//! const decor = new SiteDecor();
//! decor.mount();
//! ```
//!
//! Missing page pieces degrade silently: no nav element means no shadow, no
//! canvas means no hero animation. Only malformed options are an error.

use core::time::Duration;
use std::cell::RefCell;
use std::rc::Rc;

use entrain_core::{HeroPlayer, MotionPreference, RevealLedger, ScrollShadow, SurfaceGeometry};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Document, Element, HtmlCanvasElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};
use web_time::Instant;

use crate::options::{DecorOptions, EffectSet};
use crate::painter;
use crate::recorder::{FrameRecorder, FrameSample};

/// Class set on the nav element while the page is scrolled.
const SCROLLED_CLASS: &str = "scrolled";
/// Class set on a reveal target on first viewport entry.
const VISIBLE_CLASS: &str = "visible";
/// Attribute carrying a reveal target's ledger slot.
const REVEAL_INDEX_ATTR: &str = "data-entrain-index";

/// Intersection ratio required before a reveal fires.
const REVEAL_THRESHOLD: f64 = 0.1;
/// Shrinks the observation box so reveals fire slightly before full entry.
const REVEAL_ROOT_MARGIN: &str = "0px 0px -40px 0px";

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
const FADE_TRANSITION: &str = "opacity 600ms ease";

/// Per-mount hero animation state shared between the frame loop and the
/// resize listener.
struct HeroState {
    player: HeroPlayer,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    recorder: Option<FrameRecorder>,
    faded_in: bool,
    last_frame: Option<Instant>,
    running: bool,
}

struct ScrollHandle {
    closure: Closure<dyn FnMut()>,
}

struct RevealHandle {
    observer: IntersectionObserver,
    ledger: Rc<RefCell<RevealLedger>>,
    _closure: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

/// Page decoration controller.
#[wasm_bindgen]
pub struct SiteDecor {
    options: DecorOptions,
    effects: EffectSet,
    scroll: Option<ScrollHandle>,
    resize: Option<Closure<dyn FnMut()>>,
    reveal: Option<RevealHandle>,
    hero: Option<Rc<RefCell<HeroState>>>,
    raf: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    raf_id: Rc<RefCell<Option<i32>>>,
    mounted: bool,
}

#[wasm_bindgen]
impl SiteDecor {
    /// Build a controller from an optional JSON options string.
    ///
    /// Rejects malformed options eagerly; everything else waits for `mount`.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: Option<String>) -> Result<SiteDecor, JsValue> {
        let options = DecorOptions::parse(options_json.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let effects = options
            .effect_set()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            options,
            effects,
            scroll: None,
            resize: None,
            reveal: None,
            hero: None,
            raf: Rc::new(RefCell::new(None)),
            raf_id: Rc::new(RefCell::new(None)),
            mounted: false,
        })
    }

    /// Wire the configured effects to the current document. Idempotent.
    pub fn mount(&mut self) -> Result<(), JsValue> {
        if self.mounted {
            return Ok(());
        }
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if self.effects.contains(EffectSet::NAV_SHADOW) {
            self.mount_nav_shadow(&window, &document)?;
        }
        if self.effects.contains(EffectSet::REVEAL) {
            self.mount_reveal(&document)?;
        }
        if self.effects.contains(EffectSet::HERO) {
            self.mount_hero(&window, &document)?;
        }
        self.mounted = true;
        Ok(())
    }

    /// Detach all listeners and stop the frame loop.
    pub fn unmount(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(handle) = self.scroll.take() {
            let _ = window.remove_event_listener_with_callback(
                "scroll",
                handle.closure.as_ref().unchecked_ref(),
            );
        }
        if let Some(closure) = self.resize.take() {
            let _ = window
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        if let Some(handle) = self.reveal.take() {
            handle.observer.disconnect();
        }
        if let Some(state) = self.hero.take() {
            state.borrow_mut().running = false;
        }
        if let Some(id) = self.raf_id.borrow_mut().take() {
            let _ = window.cancel_animation_frame(id);
        }
        self.raf.borrow_mut().take();
        self.mounted = false;
    }

    /// Whether `mount` has run.
    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// How many reveal targets have fired so far.
    #[wasm_bindgen(js_name = revealedCount)]
    pub fn revealed_count(&self) -> u32 {
        self.reveal
            .as_ref()
            .map_or(0, |h| h.ledger.borrow().revealed_count() as u32)
    }

    /// Frame diagnostics as JSONL, when mounted with `recordFrames: true`.
    #[wasm_bindgen(js_name = frameReport)]
    pub fn frame_report(&self) -> Option<String> {
        self.hero
            .as_ref()
            .and_then(|s| s.borrow().recorder.as_ref().map(FrameRecorder::to_jsonl))
    }
}

impl SiteDecor {
    fn mount_nav_shadow(&mut self, window: &Window, document: &Document) -> Result<(), JsValue> {
        let Some(nav) = document.query_selector(&self.options.nav_selector)? else {
            return Ok(());
        };
        let mut shadow = ScrollShadow::new();
        let win = window.clone();
        let mut apply = move || {
            let offset = win.scroll_y().unwrap_or(0.0) as f32;
            if let Some(engaged) = shadow.observe(offset) {
                let _ = nav.class_list().toggle_with_force(SCROLLED_CLASS, engaged);
            }
        };
        // Pages restored mid-scroll need the shadow before the first event.
        apply();

        let closure = Closure::<dyn FnMut()>::new(apply);
        let opts = AddEventListenerOptions::new();
        opts.set_passive(true);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            closure.as_ref().unchecked_ref(),
            &opts,
        )?;
        self.scroll = Some(ScrollHandle { closure });
        Ok(())
    }

    fn mount_reveal(&mut self, document: &Document) -> Result<(), JsValue> {
        let nodes = document.query_selector_all(&self.options.reveal_selector)?;
        let count = nodes.length();
        if count == 0 {
            return Ok(());
        }
        let ledger = Rc::new(RefCell::new(RevealLedger::new(count as usize)));

        let callback = {
            let ledger = Rc::clone(&ledger);
            Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let target = entry.target();
                        let slot = target
                            .get_attribute(REVEAL_INDEX_ATTR)
                            .and_then(|v| v.parse::<usize>().ok());
                        if let Some(slot) = slot
                            && ledger.borrow_mut().mark(slot)
                        {
                            let _ = target.class_list().add_1(VISIBLE_CLASS);
                        }
                        // Revealed is one-way; nothing left to watch.
                        observer.unobserve(&target);
                    }
                },
            )
        };

        let init = IntersectionObserverInit::new();
        init.set_root_margin(REVEAL_ROOT_MARGIN);
        init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        for i in 0..count {
            let Some(node) = nodes.get(i) else {
                continue;
            };
            let Ok(el) = node.dyn_into::<Element>() else {
                continue;
            };
            el.set_attribute(REVEAL_INDEX_ATTR, &i.to_string())?;
            observer.observe(&el);
        }

        self.reveal = Some(RevealHandle {
            observer,
            ledger,
            _closure: callback,
        });
        Ok(())
    }

    fn mount_hero(&mut self, window: &Window, document: &Document) -> Result<(), JsValue> {
        // Absent canvas disables the effect, silently.
        let Some(element) = document.get_element_by_id(&self.options.canvas_id) else {
            return Ok(());
        };
        let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
            return Ok(());
        };
        let Some(ctx) = canvas
            .get_context("2d")?
            .and_then(|o| o.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            return Ok(());
        };

        let geometry = measure(window, &canvas);
        apply_backing_store(&canvas, geometry);

        let motion = match self.options.reduce_motion {
            Some(true) => MotionPreference::Reduced,
            Some(false) => MotionPreference::Full,
            None => query_motion_preference(window),
        };
        let recorder = self.options.record_frames.then(|| FrameRecorder::new("hero"));

        let state = Rc::new(RefCell::new(HeroState {
            player: HeroPlayer::new(geometry, motion),
            canvas,
            ctx,
            recorder,
            faded_in: false,
            last_frame: None,
            running: true,
        }));

        let resize_closure = {
            let state = Rc::clone(&state);
            let win = window.clone();
            Closure::<dyn FnMut()>::new(move || {
                let mut s = state.borrow_mut();
                let geometry = measure(&win, &s.canvas);
                apply_backing_store(&s.canvas, geometry);
                s.player.set_geometry(geometry);
                if s.player.motion() == MotionPreference::Reduced {
                    // No frame loop in reduced mode; repaint the still here.
                    let outcome = s.player.step(Duration::ZERO);
                    if let Some(scene) = outcome.scene {
                        painter::paint(&s.ctx, geometry, &scene);
                    }
                }
            })
        };
        window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
        self.resize = Some(resize_closure);

        match motion {
            MotionPreference::Reduced => {
                // One still, painted synchronously; no frames are scheduled.
                let mut s = state.borrow_mut();
                let outcome = s.player.step(Duration::ZERO);
                if let Some(scene) = outcome.scene {
                    painter::paint(&s.ctx, geometry, &scene);
                    fade_in(&s.canvas);
                    s.faded_in = true;
                }
            }
            MotionPreference::Full => {
                self.spawn_frame_loop(window, Rc::clone(&state))?;
            }
        }

        self.hero = Some(state);
        Ok(())
    }

    /// Start the self-rescheduling frame loop: each painted frame requests the
    /// next one until the player stops asking or the controller unmounts.
    fn spawn_frame_loop(
        &mut self,
        window: &Window,
        state: Rc<RefCell<HeroState>>,
    ) -> Result<(), JsValue> {
        let raf = Rc::clone(&self.raf);
        let raf_id = Rc::clone(&self.raf_id);
        let win = window.clone();

        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut s = state.borrow_mut();
            if !s.running {
                return;
            }
            let now = Instant::now();
            let dt = s
                .last_frame
                .map_or(Duration::ZERO, |prev| now.duration_since(prev));
            s.last_frame = Some(now);

            let outcome = s.player.step(dt);
            let geometry = s.player.geometry();
            if let Some(scene) = &outcome.scene {
                painter::paint(&s.ctx, geometry, scene);
                if !s.faded_in {
                    fade_in(&s.canvas);
                    s.faded_in = true;
                }
                if let Some(recorder) = s.recorder.as_mut() {
                    recorder.record(FrameSample {
                        frame_idx: outcome.frame_idx,
                        delta_us: dt.as_micros() as u64,
                        trace_count: scene.traces.len() as u32,
                        point_count: scene.point_count() as u32,
                    });
                }
            }

            if outcome.schedule_next
                && let Some(cb) = raf.borrow().as_ref()
                && let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref())
            {
                *raf_id.borrow_mut() = Some(id);
            }
        });

        *self.raf.borrow_mut() = Some(closure);
        if let Some(cb) = self.raf.borrow().as_ref() {
            let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            *self.raf_id.borrow_mut() = Some(id);
        }
        Ok(())
    }
}

/// Container CSS size × device pixel ratio, measured fresh.
fn measure(window: &Window, canvas: &HtmlCanvasElement) -> SurfaceGeometry {
    let rect = canvas
        .parent_element()
        .map_or_else(|| canvas.get_bounding_client_rect(), |p| p.get_bounding_client_rect());
    SurfaceGeometry::new(
        rect.width() as f32,
        rect.height() as f32,
        window.device_pixel_ratio() as f32,
    )
}

/// Match the canvas backing store to the measured geometry.
fn apply_backing_store(canvas: &HtmlCanvasElement, geometry: SurfaceGeometry) {
    canvas.set_width(geometry.device_width());
    canvas.set_height(geometry.device_height());
}

fn query_motion_preference(window: &Window) -> MotionPreference {
    match window.match_media(REDUCED_MOTION_QUERY) {
        Ok(Some(mql)) if mql.matches() => MotionPreference::Reduced,
        _ => MotionPreference::Full,
    }
}

/// One-shot fade-in once the first frame is on screen.
fn fade_in(canvas: &HtmlCanvasElement) {
    let style = canvas.style();
    let _ = style.set_property("transition", FADE_TRANSITION);
    let _ = style.set_property("opacity", "1");
}
