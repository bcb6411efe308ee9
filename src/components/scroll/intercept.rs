//! Active interception: wheel, touch and keys drive a progress value in
//! place of the page scroll until it completes.

use super::ProgressSource;
use crate::motion::easing::{clamp, ease_in_out, frame_rate, lerp};

/// Progress per pixel of wheel delta.
pub const WHEEL_SENSITIVITY: f64 = 0.0008;
/// Progress per pixel of touch travel.
pub const TOUCH_SENSITIVITY: f64 = WHEEL_SENSITIVITY * 2.0;
/// Progress per key press.
pub const KEY_STEP: f64 = 0.12;

/// What the caller should do with the input event that produced this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputOutcome {
	/// Suppress the browser's default scroll.
	pub consumed: bool,
	/// This input completed the interceptor. Reported exactly once.
	pub completed: bool,
}

impl InputOutcome {
	const IGNORED: Self = Self {
		consumed: false,
		completed: false,
	};
}

#[derive(Clone, Debug, Default)]
pub struct ScrollInterceptor {
	raw: f64,
	smooth: f64,
	done: bool,
	touch_y: f64,
}

impl ScrollInterceptor {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_done(&self) -> bool {
		self.done
	}

	/// Unsmoothed accumulated progress.
	pub fn raw(&self) -> f64 {
		self.raw
	}

	fn push(&mut self, delta: f64) -> InputOutcome {
		self.raw = clamp(self.raw + delta, 0.0, 1.0);
		let completed = self.raw >= 1.0;
		if completed {
			self.done = true;
		}
		InputOutcome {
			consumed: true,
			completed,
		}
	}

	pub fn wheel(&mut self, delta_y: f64) -> InputOutcome {
		if self.done {
			return InputOutcome::IGNORED;
		}
		self.push(delta_y * WHEEL_SENSITIVITY)
	}

	pub fn touch_start(&mut self, client_y: f64) {
		self.touch_y = client_y;
	}

	/// Swiping up (finger moving toward the top) advances progress.
	pub fn touch_move(&mut self, client_y: f64) -> InputOutcome {
		if self.done {
			return InputOutcome::IGNORED;
		}
		let delta = self.touch_y - client_y;
		self.touch_y = client_y;
		self.push(delta * TOUCH_SENSITIVITY)
	}

	/// `key` is a `KeyboardEvent.key` value.
	pub fn key(&mut self, key: &str) -> InputOutcome {
		if self.done {
			return InputOutcome::IGNORED;
		}
		match key {
			"ArrowDown" | "PageDown" | "Space" | " " => self.push(KEY_STEP),
			"ArrowUp" | "PageUp" => self.push(-KEY_STEP),
			_ => InputOutcome::IGNORED,
		}
	}
}

impl ProgressSource for ScrollInterceptor {
	fn advance(&mut self, dt_ms: f64) {
		self.smooth = clamp(lerp(self.smooth, self.raw, frame_rate(0.1, dt_ms, 0.25)), 0.0, 1.0);
	}

	/// Eased display progress.
	fn progress(&self) -> f64 {
		ease_in_out(self.smooth)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn completion_fires_exactly_once() {
		let mut gate = ScrollInterceptor::new();
		let mut completions = 0;
		for _ in 0..20 {
			let out = gate.wheel(100.0);
			if out.completed {
				completions += 1;
			}
		}
		assert_eq!(completions, 1);
		assert!(gate.is_done());
		// later input passes through untouched
		assert_eq!(gate.wheel(100.0), InputOutcome::default());
		assert_eq!(gate.key("ArrowDown"), InputOutcome::default());
		assert_eq!(gate.touch_move(0.0), InputOutcome::default());
	}

	#[test]
	fn keys_step_in_both_directions() {
		let mut gate = ScrollInterceptor::new();
		assert!(gate.key("ArrowDown").consumed);
		assert!(gate.key(" ").consumed);
		assert!((gate.raw() - 0.24).abs() < 1e-12);
		assert!(gate.key("PageUp").consumed);
		assert!((gate.raw() - 0.12).abs() < 1e-12);
		assert!(!gate.key("Tab").consumed);
		assert!(gate.key("ArrowUp").consumed);
		assert!(gate.key("ArrowUp").consumed);
		assert_eq!(gate.raw(), 0.0);
	}

	#[test]
	fn touch_tracks_incremental_travel() {
		let mut gate = ScrollInterceptor::new();
		gate.touch_start(500.0);
		gate.touch_move(400.0);
		gate.touch_move(350.0);
		assert!((gate.raw() - 150.0 * TOUCH_SENSITIVITY).abs() < 1e-12);
		// swiping back down reduces progress
		gate.touch_move(400.0);
		assert!((gate.raw() - 100.0 * TOUCH_SENSITIVITY).abs() < 1e-12);
	}

	#[test]
	fn display_progress_eases_toward_raw() {
		let mut gate = ScrollInterceptor::new();
		gate.wheel(625.0);
		assert!((gate.raw() - 0.5).abs() < 1e-12);
		let mut prev = gate.progress();
		for _ in 0..200 {
			gate.advance(16.67);
			assert!(gate.progress() >= prev);
			prev = gate.progress();
		}
		assert!((gate.progress() - 0.5).abs() < 0.005);
	}

	#[test]
	fn wheel_up_at_zero_stays_at_zero() {
		let mut gate = ScrollInterceptor::new();
		let out = gate.wheel(-300.0);
		assert!(out.consumed && !out.completed);
		assert_eq!(gate.raw(), 0.0);
	}
}
