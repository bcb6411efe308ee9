//! Leptos component hosting the swarm on a fixed full-viewport canvas.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use web_sys::{Event, HtmlCanvasElement};

use super::glyph::{CanvasRasterizer, GlyphSpec};
use super::render;
use super::swarm::NebulaSwarm;
use crate::motion::clock::{FrameClock, PointerState};
use crate::motion::error::MotionError;
use crate::motion::frame_loop::{
	Listeners, RafLoop, SurfaceMount, context_2d, fit_canvas, hold_until_cleanup, now_ms,
	viewport_size, window,
};
use crate::motion::theme::NebulaStyle;

fn mount(
	canvas: HtmlCanvasElement,
	style: NebulaStyle,
	glyph: GlyphSpec,
	progress: Signal<f64>,
	pointer: Signal<PointerState>,
) -> Result<SurfaceMount, MotionError> {
	let window = window()?;
	let (w, h) = viewport_size()?;
	fit_canvas(&canvas, w, h);
	let mut ctx = context_2d(&canvas)?;

	let swarm = NebulaSwarm::build(style, w, h, &glyph, &CanvasRasterizer, StdRng::from_entropy());
	info!("particle text: mounted {:?} with {} particles", glyph.text, swarm.particles().len());
	let swarm = Rc::new(RefCell::new(swarm));

	let mut listeners = Listeners::new();
	let swarm_resize = swarm.clone();
	listeners.listen(&window, "resize", true, move |_: Event| {
		let Ok((w, h)) = viewport_size() else {
			return;
		};
		fit_canvas(&canvas, w, h);
		swarm_resize.borrow_mut().rebuild(w, h, &glyph, &CanvasRasterizer);
		debug!("particle text: rebuilt for {w}x{h}");
	})?;

	let mut clock = FrameClock::new(now_ms());
	let frame_loop = RafLoop::start(move |now| {
		let dt = clock.tick(now);
		let form = progress.try_get_untracked().unwrap_or(0.0);
		let pointer = pointer.try_get_untracked().unwrap_or_default();
		let mut swarm = swarm.borrow_mut();
		swarm.step(dt, clock.time, form, pointer);
		render::render(&swarm, &mut ctx);
	})?;

	Ok(SurfaceMount::new(Some(frame_loop), listeners))
}

/// Particles that spiral in and settle into the shape of `glyph`'s text as
/// `progress` goes from 0 to 1.
#[component]
pub fn ParticleTextCanvas(
	#[prop(into)] progress: Signal<f64>,
	#[prop(into)] pointer: Signal<PointerState>,
	#[prop(optional)] glyph: Option<GlyphSpec>,
	#[prop(optional)] style: Option<NebulaStyle>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let glyph = glyph.clone().unwrap_or_default();
		let style = style.clone().unwrap_or_default();
		match mount(canvas.into(), style, glyph, progress, pointer) {
			Ok(m) => hold_until_cleanup(m),
			Err(e) => warn!("particle text: {e}"),
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-text-canvas"
			style="position: fixed; inset: 0; width: 100%; height: 100%; display: block; z-index: 2; pointer-events: none;"
		/>
	}
}
