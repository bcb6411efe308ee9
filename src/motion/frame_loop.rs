//! Browser plumbing shared by every animated surface: a cancellable
//! `requestAnimationFrame` loop, a listener registry that unregisters on
//! teardown, and a few window/canvas helpers.
//!
//! Teardown order matters: the frame loop is cancelled before listeners are
//! removed, and both happen before the simulation state they capture is
//! released. [`SurfaceMount`] encodes that order in its `Drop`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
	AddEventListenerOptions, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement,
	ResizeObserver, Window,
};

use super::error::MotionError;

/// A step function invoked once per display refresh until cancelled.
pub struct RafLoop {
	handle: Rc<Cell<Option<i32>>>,
	closure: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl RafLoop {
	/// Schedule `step` on the next frame. It receives the frame timestamp in
	/// milliseconds and is rescheduled after every invocation.
	pub fn start(mut step: impl FnMut(f64) + 'static) -> Result<Self, MotionError> {
		let window = window()?;
		let handle = Rc::new(Cell::new(None));
		let closure: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
		let (handle_inner, slot) = (handle.clone(), Rc::downgrade(&closure));

		*closure.borrow_mut() = Some(Closure::new(move |now: f64| {
			step(now);
			// A dropped slot means the loop was cancelled mid-frame
			let Some(slot) = slot.upgrade() else {
				return;
			};
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(cb) = slot.borrow().as_ref() {
				handle_inner.set(
					window
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));

		if let Some(cb) = closure.borrow().as_ref() {
			handle.set(Some(
				window.request_animation_frame(cb.as_ref().unchecked_ref())?,
			));
		}

		Ok(Self { handle, closure })
	}

	/// Stop future invocations. Idempotent.
	pub fn cancel(&self) {
		if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		self.closure.borrow_mut().take();
	}
}

impl Drop for RafLoop {
	fn drop(&mut self) {
		self.cancel();
	}
}

/// Event listeners registered on behalf of one surface.
#[derive(Default)]
pub struct Listeners {
	entries: Vec<(EventTarget, &'static str, Closure<dyn FnMut(Event)>)>,
}

impl Listeners {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `handler` for `name` on `target`. Events that do not downcast
	/// to `E` are ignored. Non-passive listeners may call `prevent_default`.
	pub fn listen<E>(
		&mut self,
		target: &EventTarget,
		name: &'static str,
		passive: bool,
		mut handler: impl FnMut(E) + 'static,
	) -> Result<(), MotionError>
	where
		E: JsCast + 'static,
	{
		let closure = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
			if let Ok(ev) = ev.dyn_into::<E>() {
				handler(ev);
			}
		});
		let options = AddEventListenerOptions::new();
		options.set_passive(passive);
		target.add_event_listener_with_callback_and_add_event_listener_options(
			name,
			closure.as_ref().unchecked_ref(),
			&options,
		)?;
		self.entries.push((target.clone(), name, closure));
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Unregister everything.
	pub fn clear(&mut self) {
		for (target, name, closure) in self.entries.drain(..) {
			let _ = target.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
		}
	}
}

impl Drop for Listeners {
	fn drop(&mut self) {
		self.clear();
	}
}

/// Everything a mounted surface keeps alive in the browser.
pub struct SurfaceMount {
	pub frame_loop: Option<RafLoop>,
	pub listeners: Listeners,
	pub observer: Option<(ResizeObserver, Closure<dyn FnMut()>)>,
}

impl SurfaceMount {
	pub fn new(frame_loop: Option<RafLoop>, listeners: Listeners) -> Self {
		Self {
			frame_loop,
			listeners,
			observer: None,
		}
	}

	pub fn teardown(&mut self) {
		if let Some(frame_loop) = self.frame_loop.take() {
			frame_loop.cancel();
		}
		self.listeners.clear();
		if let Some((observer, _callback)) = self.observer.take() {
			observer.disconnect();
		}
	}
}

impl Drop for SurfaceMount {
	fn drop(&mut self) {
		self.teardown();
	}
}

/// Keep `mount` alive until the current reactive owner is cleaned up, then
/// tear it down.
pub fn hold_until_cleanup(mount: SurfaceMount) {
	let slot = StoredValue::new_local(Some(mount));
	on_cleanup(move || {
		if let Some(Some(mut mount)) = slot.try_update_value(|m| m.take()) {
			mount.teardown();
		}
	});
}

pub fn window() -> Result<Window, MotionError> {
	web_sys::window().ok_or(MotionError::NoWindow)
}

/// Current viewport size in CSS pixels.
pub fn viewport_size() -> Result<(f64, f64), MotionError> {
	let window = window()?;
	let w = window.inner_width()?.as_f64().unwrap_or(0.0);
	let h = window.inner_height()?.as_f64().unwrap_or(0.0);
	Ok((w, h))
}

/// Current high-resolution time, or zero when unavailable.
pub fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or(0.0)
}

/// Fetch the canvas' 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, MotionError> {
	canvas
		.get_context("2d")?
		.ok_or(MotionError::NoContext)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| MotionError::NoContext)
}

/// Size the canvas backing store to the given CSS size.
pub fn fit_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
	canvas.set_width(width.max(0.0) as u32);
	canvas.set_height(height.max(0.0) as u32);
}

/// Write `value` into `signal` if it differs from what is there. Disposed
/// signals are left alone.
pub fn publish<T>(signal: RwSignal<T>, value: T)
where
	T: Clone + PartialEq + Send + Sync + 'static,
{
	if signal.try_get_untracked().is_some_and(|current| current != value) {
		signal.try_set(value);
	}
}
