//! Passive scroll mapping for the portal transition.

use super::ProgressSource;
use crate::motion::easing::{FRAME_MS, clamp, lerp, segment_remap};

/// Snapshot published to the page each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PortalState {
	pub portal_progress: f64,
	pub is_open: bool,
	/// Smoothed document scroll fraction.
	pub scroll_progress: f64,
}

/// Portal openness for a smoothed scroll fraction: closed, opening, held
/// open, then closing again toward the end of the document.
pub fn portal_curve(s: f64) -> f64 {
	if s < 0.30 {
		0.0
	} else if s < 0.60 {
		segment_remap(s, 0.30, 0.60)
	} else if s < 0.75 {
		1.0
	} else {
		1.0 - segment_remap(s, 0.75, 1.0)
	}
}

/// Raw scroll fraction of the document, zero when nothing scrolls.
pub fn scroll_fraction(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
	let total = scroll_height - viewport_height;
	if total > 0.0 {
		clamp(scroll_y / total, 0.0, 1.0)
	} else {
		0.0
	}
}

#[derive(Clone, Debug, Default)]
pub struct PortalScroll {
	raw: f64,
	smooth: f64,
}

impl PortalScroll {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_scroll(&mut self, scroll_y: f64, scroll_height: f64, viewport_height: f64) {
		self.raw = scroll_fraction(scroll_y, scroll_height, viewport_height);
	}

	pub fn state(&self) -> PortalState {
		let portal_progress = portal_curve(self.smooth);
		PortalState {
			portal_progress,
			is_open: portal_progress > 0.01,
			scroll_progress: self.smooth,
		}
	}
}

impl ProgressSource for PortalScroll {
	/// Catch up faster the further behind the smoothed value is.
	fn advance(&mut self, dt_ms: f64) {
		let gap = (self.raw - self.smooth).abs();
		let speed = 0.06 + gap * 0.25;
		let rate = (speed * dt_ms / FRAME_MS).min(0.3);
		self.smooth = clamp(lerp(self.smooth, self.raw, rate), 0.0, 1.0);
	}

	fn progress(&self) -> f64 {
		portal_curve(self.smooth)
	}
}
