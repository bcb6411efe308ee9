//! Home page choreography: one smoothed scroll position drives the swarm's
//! formation and the ambient field's visibility.

use super::ProgressSource;
use crate::motion::clock::{PointerState, SmoothedPointer};
use crate::motion::easing::{clamp, frame_rate, lerp, segment_remap};

/// Time the swarm takes to form on first load, ms.
pub const AUTOPLAY_MS: f64 = 900.0;

/// Scroll span, in viewport heights, over which the intro plays out.
const SPAN_VIEWPORTS: f64 = 2.2;

/// Scroll distance over which the "scroll" hint fades, px.
const HINT_FADE_PX: f64 = 100.0;

#[derive(Clone, Debug)]
pub struct IntroStage {
	raw_scroll: f64,
	smooth_scroll: f64,
	viewport_h: f64,
	form: f64,
	autoplay_done: bool,
	raw_pointer: PointerState,
	pointer: SmoothedPointer,
}

impl IntroStage {
	pub fn new(viewport_w: f64, viewport_h: f64) -> Self {
		Self {
			raw_scroll: 0.0,
			smooth_scroll: 0.0,
			viewport_h,
			form: 0.0,
			autoplay_done: false,
			raw_pointer: PointerState::default(),
			pointer: SmoothedPointer::new(viewport_w / 2.0, viewport_h / 2.0),
		}
	}

	pub fn set_scroll(&mut self, scroll_y: f64) {
		self.raw_scroll = scroll_y.max(0.0);
	}

	pub fn set_viewport(&mut self, _width: f64, height: f64) {
		self.viewport_h = height;
	}

	pub fn set_pointer(&mut self, pointer: PointerState) {
		self.raw_pointer = pointer;
	}

	/// Pointer leaves the window: hold the last position, stop attracting.
	pub fn release_pointer(&mut self) {
		self.raw_pointer.active = false;
	}

	fn span(&self) -> f64 {
		self.viewport_h * SPAN_VIEWPORTS
	}

	/// Ambient field visibility: fades out late in the intro span.
	pub fn visibility(&self) -> f64 {
		let ap = self.span();
		1.0 - segment_remap(self.smooth_scroll, ap * 0.72, ap * 0.90)
	}

	/// How far the swarm has been scrolled apart.
	pub fn dissolve(&self) -> f64 {
		let ap = self.span();
		segment_remap(self.smooth_scroll, ap * 0.15, ap * 0.48)
	}

	pub fn form_progress(&self) -> f64 {
		self.form
	}

	pub fn autoplay_done(&self) -> bool {
		self.autoplay_done
	}

	pub fn pointer(&self) -> PointerState {
		self.pointer.state()
	}

	/// Opacity of the "scroll" hint, from the unsmoothed scroll position.
	pub fn hint_opacity(&self) -> f64 {
		clamp(1.0 - self.raw_scroll / HINT_FADE_PX, 0.0, 1.0)
	}
}

impl ProgressSource for IntroStage {
	fn advance(&mut self, dt_ms: f64) {
		self.smooth_scroll = lerp(self.smooth_scroll, self.raw_scroll, frame_rate(0.04, dt_ms, 0.12));

		if !self.autoplay_done {
			self.form = (self.form + dt_ms / AUTOPLAY_MS).min(1.0);
			self.autoplay_done = self.form >= 1.0;
		} else {
			let target = (1.0 - self.dissolve()).max(0.0);
			// Dissolve quickly, reform gently
			let rate = if target < self.form {
				frame_rate(0.14, dt_ms, 0.40)
			} else {
				frame_rate(0.06, dt_ms, 0.20)
			};
			self.form = clamp(lerp(self.form, target, rate), 0.0, 1.0);
		}

		self.pointer.update(self.raw_pointer, dt_ms);
	}

	fn progress(&self) -> f64 {
		self.form
	}
}
