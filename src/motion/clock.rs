//! Frame timing and pointer smoothing.

use super::easing::{frame_rate, lerp};

/// Largest step a single frame may advance, in milliseconds.
///
/// Frames after a backgrounded tab can report seconds of elapsed time;
/// integrating that in one step would fling particles across the screen.
pub const MAX_FRAME_MS: f64 = 33.0;

/// Converts display-refresh timestamps into capped per-frame deltas.
#[derive(Clone, Debug)]
pub struct FrameClock {
	last: f64,
	/// Accumulated (capped) time since the clock started, in milliseconds.
	pub time: f64,
}

impl FrameClock {
	pub fn new(start_ms: f64) -> Self {
		Self {
			last: start_ms,
			time: 0.0,
		}
	}

	/// Advance to `now_ms` and return the capped elapsed time.
	/// Timestamps that go backwards yield a zero step.
	pub fn tick(&mut self, now_ms: f64) -> f64 {
		let dt = (now_ms - self.last).clamp(0.0, MAX_FRAME_MS);
		self.last = now_ms;
		self.time += dt;
		dt
	}
}

/// Latest pointer reading, as published to the particle surfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	pub x: f64,
	pub y: f64,
	pub active: bool,
}

impl PointerState {
	pub const fn new(x: f64, y: f64, active: bool) -> Self {
		Self { x, y, active }
	}
}

/// Follows a raw pointer with frame-normalized lag.
///
/// While the pointer is inactive the smoothed position holds still rather
/// than drifting back to some origin.
#[derive(Clone, Debug)]
pub struct SmoothedPointer {
	pub x: f64,
	pub y: f64,
	pub active: bool,
	rate: f64,
	cap: f64,
}

impl SmoothedPointer {
	pub fn new(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			active: false,
			rate: 0.18,
			cap: 0.6,
		}
	}

	pub fn update(&mut self, raw: PointerState, dt_ms: f64) {
		let t = frame_rate(self.rate, dt_ms, self.cap);
		if raw.active {
			self.x = lerp(self.x, raw.x, t);
			self.y = lerp(self.y, raw.y, t);
		}
		self.active = raw.active;
	}

	pub fn state(&self) -> PointerState {
		PointerState::new(self.x, self.y, self.active)
	}
}
