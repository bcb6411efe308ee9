//! Scroll-linked reveal of the nav bar.
//!
//! A damped spring follows the page scroll fraction. The bar slides down and
//! fades in over the first [`REVEAL_END`] of the smoothed fraction, and is
//! considered "scrolled" as soon as the raw fraction passes the same mark.

use crate::components::scroll::ProgressSource;
use crate::motion::easing::{clamp, lerp};

/// Scroll fraction by which the bar is fully shown.
pub const REVEAL_END: f64 = 0.07;
/// Vertical offset of the hidden bar, px.
pub const HIDDEN_OFFSET: f64 = -64.0;

/// Integration step ceiling, ms.
const MAX_SUBSTEP_MS: f64 = 4.0;
/// Speed below which a spring inside its rest delta snaps to the target.
const REST_SPEED: f64 = 0.01;

/// Unit-mass damped spring integrated with semi-implicit Euler.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
	pub stiffness: f64,
	pub damping: f64,
	pub rest_delta: f64,
	value: f64,
	velocity: f64,
	target: f64,
}

impl Spring {
	pub fn new(stiffness: f64, damping: f64, rest_delta: f64) -> Self {
		Self {
			stiffness,
			damping,
			rest_delta,
			value: 0.0,
			velocity: 0.0,
			target: 0.0,
		}
	}

	pub fn value(&self) -> f64 {
		self.value
	}

	pub fn velocity(&self) -> f64 {
		self.velocity
	}

	pub fn target(&self) -> f64 {
		self.target
	}

	pub fn set_target(&mut self, target: f64) {
		self.target = target;
	}

	/// Jump straight to `value` with no motion.
	pub fn snap(&mut self, value: f64) {
		self.value = value;
		self.target = value;
		self.velocity = 0.0;
	}

	pub fn is_resting(&self) -> bool {
		self.value == self.target && self.velocity == 0.0
	}

	pub fn step(&mut self, dt_ms: f64) {
		if self.is_resting() {
			return;
		}
		let mut remaining = dt_ms.max(0.0);
		while remaining > 0.0 {
			let h = remaining.min(MAX_SUBSTEP_MS);
			remaining -= h;
			let s = h / 1000.0;
			let force = -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
			self.velocity += force * s;
			self.value += self.velocity * s;
		}
		if (self.value - self.target).abs() < self.rest_delta && self.velocity.abs() < REST_SPEED {
			self.snap(self.target);
		}
	}
}

/// What the nav bar needs from the reveal each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealState {
	pub offset_y: f64,
	pub opacity: f64,
	pub scrolled: bool,
}

impl Default for RevealState {
	fn default() -> Self {
		Self {
			offset_y: HIDDEN_OFFSET,
			opacity: 0.0,
			scrolled: false,
		}
	}
}

#[derive(Clone, Debug)]
pub struct NavReveal {
	spring: Spring,
	raw: f64,
}

impl Default for NavReveal {
	fn default() -> Self {
		Self::new()
	}
}

impl NavReveal {
	pub fn new() -> Self {
		Self {
			spring: Spring::new(80.0, 25.0, 0.001),
			raw: 0.0,
		}
	}

	/// Feed the page scroll fraction in [0, 1].
	pub fn set_scroll_fraction(&mut self, fraction: f64) {
		self.raw = clamp(fraction, 0.0, 1.0);
		self.spring.set_target(self.raw);
	}

	pub fn scrolled(&self) -> bool {
		self.raw > REVEAL_END
	}

	fn shown(&self) -> f64 {
		clamp(self.progress() / REVEAL_END, 0.0, 1.0)
	}

	pub fn state(&self) -> RevealState {
		let shown = self.shown();
		RevealState {
			offset_y: lerp(HIDDEN_OFFSET, 0.0, shown),
			opacity: shown,
			scrolled: self.scrolled(),
		}
	}
}

impl ProgressSource for NavReveal {
	fn advance(&mut self, dt_ms: f64) {
		self.spring.step(dt_ms);
	}

	/// Smoothed scroll fraction.
	fn progress(&self) -> f64 {
		clamp(self.spring.value(), 0.0, 1.0)
	}
}
