//! Leptos component hosting the ambient field on a fixed full-viewport canvas.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use web_sys::{Event, HtmlCanvasElement};

use super::field::AmbientField;
use super::render;
use crate::motion::clock::{FrameClock, PointerState};
use crate::motion::error::MotionError;
use crate::motion::frame_loop::{
	Listeners, RafLoop, SurfaceMount, context_2d, fit_canvas, hold_until_cleanup, now_ms,
	viewport_size, window,
};
use crate::motion::theme::AmbientStyle;

fn mount(
	canvas: HtmlCanvasElement,
	style: AmbientStyle,
	visibility: Signal<f64>,
	pointer: Signal<PointerState>,
) -> Result<SurfaceMount, MotionError> {
	let window = window()?;
	let (w, h) = viewport_size()?;
	fit_canvas(&canvas, w, h);
	let mut ctx = context_2d(&canvas)?;

	let field = Rc::new(RefCell::new(AmbientField::new(style, w, h, StdRng::from_entropy())));
	info!("ambient field: mounted {} particles at {w}x{h}", field.borrow().particles().len());

	let mut listeners = Listeners::new();
	let field_resize = field.clone();
	listeners.listen(&window, "resize", true, move |_: Event| {
		let Ok((w, h)) = viewport_size() else {
			return;
		};
		fit_canvas(&canvas, w, h);
		field_resize.borrow_mut().resize(w, h);
		debug!("ambient field: rebuilt for {w}x{h}");
	})?;

	let mut clock = FrameClock::new(now_ms());
	let frame_loop = RafLoop::start(move |now| {
		let dt = clock.tick(now);
		let vis = visibility.try_get_untracked().unwrap_or(0.0);
		let pointer = pointer.try_get_untracked().unwrap_or_default();
		let mut field = field.borrow_mut();
		field.step(dt, clock.time, vis, pointer);
		render::render(&field, vis, &mut ctx);
	})?;

	Ok(SurfaceMount::new(Some(frame_loop), listeners))
}

/// Slow drifting particles behind the page content.
///
/// `visibility` fades the whole field; `pointer` is the raw viewport
/// pointer, smoothed internally.
#[component]
pub fn AmbientCanvas(
	#[prop(into)] visibility: Signal<f64>,
	#[prop(into)] pointer: Signal<PointerState>,
	#[prop(optional)] style: Option<AmbientStyle>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let style = style.clone().unwrap_or_default();
		match mount(canvas.into(), style, visibility, pointer) {
			Ok(m) => hold_until_cleanup(m),
			Err(e) => warn!("ambient field: {e}"),
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="ambient-canvas"
			style="position: fixed; inset: 0; width: 100%; height: 100%; display: block; z-index: 1; pointer-events: none;"
		/>
	}
}
