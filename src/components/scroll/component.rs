//! Browser wiring for the scroll choreographer: hooks that publish progress
//! signals and the intro gate component.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use web_sys::{
	Event, HtmlCanvasElement, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollToOptions, TouchEvent,
	WheelEvent,
};

use super::ProgressSource;
use super::intercept::{InputOutcome, ScrollInterceptor};
use super::lock::ScrollLock;
use super::passive::{PortalScroll, PortalState};
use super::peek::{self, PeekLayout};
use super::stage::IntroStage;
use crate::motion::clock::{FrameClock, PointerState};
use crate::motion::error::MotionError;
use crate::motion::frame_loop::{
	Listeners, RafLoop, SurfaceMount, context_2d, fit_canvas, hold_until_cleanup, now_ms, publish,
	viewport_size, window,
};
use crate::motion::theme::PeekStyle;

fn scroll_y() -> f64 {
	web_sys::window()
		.and_then(|w| w.scroll_y().ok())
		.unwrap_or(0.0)
}

fn first_touch_y(ev: &TouchEvent) -> Option<f64> {
	ev.touches().get(0).map(|t| t.client_y() as f64)
}

/// Signals published by [`use_intro_stage`].
#[derive(Clone, Copy)]
pub struct IntroSignals {
	/// Raw form progress for the particle text.
	pub form: Signal<f64>,
	/// Ambient field visibility.
	pub visibility: Signal<f64>,
	pub pointer: Signal<PointerState>,
	/// Opacity of the "scroll" hint.
	pub hint: Signal<f64>,
}

fn mount_intro_stage(
	form: RwSignal<f64>,
	visibility: RwSignal<f64>,
	pointer: RwSignal<PointerState>,
	hint: RwSignal<f64>,
) -> Result<SurfaceMount, MotionError> {
	let window = window()?;
	let document = window.document().ok_or(MotionError::NoDocument)?;
	let root = document.document_element().ok_or(MotionError::NoDocument)?;
	let (w, h) = viewport_size()?;
	let stage = Rc::new(RefCell::new(IntroStage::new(w, h)));

	let mut listeners = Listeners::new();
	let on_scroll = stage.clone();
	listeners.listen(&window, "scroll", true, move |_: Event| {
		on_scroll.borrow_mut().set_scroll(scroll_y());
	})?;
	let on_resize = stage.clone();
	listeners.listen(&window, "resize", true, move |_: Event| {
		if let Ok((w, h)) = viewport_size() {
			on_resize.borrow_mut().set_viewport(w, h);
		}
	})?;
	let on_move = stage.clone();
	listeners.listen(&window, "mousemove", true, move |ev: MouseEvent| {
		on_move
			.borrow_mut()
			.set_pointer(PointerState::new(ev.client_x() as f64, ev.client_y() as f64, true));
	})?;
	let on_leave = stage.clone();
	listeners.listen(&root, "mouseleave", true, move |_: MouseEvent| {
		on_leave.borrow_mut().release_pointer();
	})?;

	let mut clock = FrameClock::new(now_ms());
	let frame_loop = RafLoop::start(move |now| {
		let dt = clock.tick(now);
		let mut stage = stage.borrow_mut();
		let was_playing = !stage.autoplay_done();
		stage.advance(dt);
		if was_playing && stage.autoplay_done() {
			debug!("intro stage: autoplay finished");
		}
		publish(form, stage.form_progress());
		publish(visibility, stage.visibility());
		publish(pointer, stage.pointer());
		publish(hint, stage.hint_opacity());
	})?;

	Ok(SurfaceMount::new(Some(frame_loop), listeners))
}

/// Drive the home page intro from the page scroll and pointer.
///
/// Must be called inside a component; the loop stops when it unmounts.
pub fn use_intro_stage() -> IntroSignals {
	let form = RwSignal::new(0.0);
	let visibility = RwSignal::new(1.0);
	let pointer = RwSignal::new(PointerState::default());
	let hint = RwSignal::new(1.0);
	match mount_intro_stage(form, visibility, pointer, hint) {
		Ok(m) => hold_until_cleanup(m),
		Err(e) => warn!("intro stage: {e}"),
	}
	IntroSignals {
		form: form.into(),
		visibility: visibility.into(),
		pointer: pointer.into(),
		hint: hint.into(),
	}
}

fn mount_portal(state: RwSignal<PortalState>) -> Result<SurfaceMount, MotionError> {
	let window = window()?;
	let latest_y = Rc::new(Cell::new(scroll_y()));

	let mut listeners = Listeners::new();
	let on_scroll = latest_y.clone();
	listeners.listen(&window, "scroll", true, move |_: Event| {
		on_scroll.set(scroll_y());
	})?;

	let mut portal = PortalScroll::new();
	let mut clock = FrameClock::new(now_ms());
	let frame_loop = RafLoop::start(move |now| {
		let dt = clock.tick(now);
		let Some(window) = web_sys::window() else {
			return;
		};
		let scroll_height = window
			.document()
			.and_then(|d| d.document_element())
			.map(|e| e.scroll_height() as f64)
			.unwrap_or(0.0);
		let inner_height = window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(0.0);
		portal.set_scroll(latest_y.get(), scroll_height, inner_height);
		portal.advance(dt);
		publish(state, portal.state());
	})?;

	Ok(SurfaceMount::new(Some(frame_loop), listeners))
}

/// Smoothed document scroll and the portal transition it drives.
pub fn use_portal_scroll() -> Signal<PortalState> {
	let state = RwSignal::new(PortalState::default());
	match mount_portal(state) {
		Ok(m) => hold_until_cleanup(m),
		Err(e) => warn!("portal scroll: {e}"),
	}
	state.into()
}

fn mount_scroll_lock() -> Result<SurfaceMount, MotionError> {
	let window = window()?;
	let (_, h) = viewport_size()?;
	let lock = Rc::new(RefCell::new(ScrollLock::new(h)));

	let mut listeners = Listeners::new();
	let on_resize = lock.clone();
	listeners.listen(&window, "resize", true, move |_: Event| {
		if let Ok((_, h)) = viewport_size() {
			on_resize.borrow_mut().set_threshold(h);
		}
	})?;
	let on_scroll = lock.clone();
	listeners.listen(&window, "scroll", true, move |_: Event| {
		let was_locked = on_scroll.borrow().is_locked();
		let correction = on_scroll.borrow_mut().on_scroll(scroll_y());
		if !was_locked && on_scroll.borrow().is_locked() {
			info!("scroll lock: engaged");
		}
		if let (Some(top), Some(window)) = (correction, web_sys::window()) {
			let options = ScrollToOptions::new();
			options.set_top(top);
			options.set_behavior(ScrollBehavior::Instant);
			window.scroll_to_with_scroll_to_options(&options);
		}
	})?;
	let on_wheel = lock.clone();
	listeners.listen(&window, "wheel", false, move |ev: WheelEvent| {
		if on_wheel.borrow().suppress_wheel(ev.delta_y(), scroll_y()) {
			ev.prevent_default();
		}
	})?;
	let on_key = lock.clone();
	listeners.listen(&window, "keydown", false, move |ev: KeyboardEvent| {
		if on_key.borrow().suppress_key(&ev.key(), scroll_y()) {
			ev.prevent_default();
		}
	})?;
	let on_touch_start = lock.clone();
	listeners.listen(&window, "touchstart", true, move |ev: TouchEvent| {
		if let Some(y) = first_touch_y(&ev) {
			on_touch_start.borrow_mut().touch_start(y);
		}
	})?;
	listeners.listen(&window, "touchmove", false, move |ev: TouchEvent| {
		let Some(y) = first_touch_y(&ev) else {
			return;
		};
		if lock.borrow().suppress_touch_move(y, scroll_y()) {
			ev.prevent_default();
		}
	})?;

	Ok(SurfaceMount::new(None, listeners))
}

/// Keep the page from scrolling back above the first viewport once the
/// reader has left it.
pub fn use_scroll_lock() {
	match mount_scroll_lock() {
		Ok(m) => hold_until_cleanup(m),
		Err(e) => warn!("scroll lock: {e}"),
	}
}

fn mount_intro_gate(
	canvas: HtmlCanvasElement,
	style: PeekStyle,
	done: RwSignal<bool>,
	on_complete: Option<Callback<()>>,
) -> Result<SurfaceMount, MotionError> {
	let window = window()?;
	let (w, h) = viewport_size()?;
	fit_canvas(&canvas, w, h);
	let mut ctx = context_2d(&canvas)?;
	let viewport = Rc::new(Cell::new((w, h)));
	let gate = Rc::new(RefCell::new(ScrollInterceptor::new()));

	let finish = move |out: InputOutcome| {
		if out.completed {
			info!("intro gate: complete");
			done.try_set(true);
			if let Some(cb) = on_complete {
				cb.run(());
			}
		}
	};

	let mut listeners = Listeners::new();
	let on_resize = viewport.clone();
	listeners.listen(&window, "resize", true, move |_: Event| {
		if let Ok((w, h)) = viewport_size() {
			fit_canvas(&canvas, w, h);
			on_resize.set((w, h));
		}
	})?;
	let on_wheel = gate.clone();
	listeners.listen(&window, "wheel", false, move |ev: WheelEvent| {
		let out = on_wheel.borrow_mut().wheel(ev.delta_y());
		if out.consumed {
			ev.prevent_default();
			ev.stop_propagation();
		}
		finish(out);
	})?;
	let on_touch_start = gate.clone();
	listeners.listen(&window, "touchstart", true, move |ev: TouchEvent| {
		if let Some(y) = first_touch_y(&ev) {
			on_touch_start.borrow_mut().touch_start(y);
		}
	})?;
	let on_touch_move = gate.clone();
	listeners.listen(&window, "touchmove", false, move |ev: TouchEvent| {
		let Some(y) = first_touch_y(&ev) else {
			return;
		};
		let out = on_touch_move.borrow_mut().touch_move(y);
		if out.consumed {
			ev.prevent_default();
		}
		finish(out);
	})?;
	let on_key = gate.clone();
	listeners.listen(&window, "keydown", false, move |ev: KeyboardEvent| {
		let out = on_key.borrow_mut().key(&ev.key());
		if out.consumed {
			ev.prevent_default();
		}
		finish(out);
	})?;

	let mut clock = FrameClock::new(now_ms());
	let frame_loop = RafLoop::start(move |now| {
		let dt = clock.tick(now);
		let progress = {
			let mut gate = gate.borrow_mut();
			gate.advance(dt);
			gate.progress()
		};
		let (vw, vh) = viewport.get();
		let layout = PeekLayout::compute(progress, vw, vh, style.letter_widths);
		peek::render(&layout, &style, vw, vh, &mut ctx);
	})?;

	Ok(SurfaceMount::new(Some(frame_loop), listeners))
}

/// Full-screen intro that takes over wheel, touch and keys until the reader
/// has "scrolled" the letters together, then fades out.
#[component]
pub fn IntroGate(
	#[prop(optional, into)] on_complete: Option<Callback<()>>,
	#[prop(optional)] style: Option<PeekStyle>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let done = RwSignal::new(false);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let style = style.clone().unwrap_or_default();
		match mount_intro_gate(canvas.into(), style, done, on_complete) {
			Ok(m) => hold_until_cleanup(m),
			Err(e) => warn!("intro gate: {e}"),
		}
	});

	let canvas_style = move || {
		if done.get() {
			"position: fixed; inset: 0; width: 100vw; height: 100vh; display: block; z-index: 100; pointer-events: none; opacity: 0; transition: opacity 0.3s ease-out;"
		} else {
			"position: fixed; inset: 0; width: 100vw; height: 100vh; display: block; z-index: 100; pointer-events: all; opacity: 1;"
		}
	};

	view! { <canvas node_ref=canvas_ref class="intro-gate" style=canvas_style /> }
}
