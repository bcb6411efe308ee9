//! The block that slides behind the active nav label.

use crate::motion::easing::{EASE_OUT_QUAD, clamp, lerp};
use crate::motion::theme::HighlightStyle;

/// `(x, y, width, height)` in surface coordinates.
pub type Rect = (f64, f64, f64, f64);

/// Highlight geometry for one frame, already scaled about its centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightFrame {
	pub rect: Rect,
	pub opacity: f64,
}

#[derive(Clone, Debug)]
pub struct HighlightBox {
	style: HighlightStyle,
	rect: Option<Rect>,
	appear_at: f64,
}

impl HighlightBox {
	pub fn new(style: HighlightStyle) -> Self {
		Self {
			style,
			rect: None,
			appear_at: 0.0,
		}
	}

	pub fn style(&self) -> &HighlightStyle {
		&self.style
	}

	pub fn rect(&self) -> Option<Rect> {
		self.rect
	}

	pub fn center(&self) -> Option<(f64, f64)> {
		self.rect.map(|(x, y, w, h)| (x + w / 2.0, y + h / 2.0))
	}

	/// Move onto `rect`. The appear animation restarts when `replay` is set
	/// and on the very first placement; otherwise the box just follows.
	pub fn place(&mut self, rect: Rect, now: f64, replay: bool) {
		if replay || self.rect.is_none() {
			self.appear_at = now;
		}
		self.rect = Some(rect);
	}

	/// Linear appear progress in [0, 1].
	pub fn progress(&self, now: f64) -> f64 {
		if self.style.appear_ms <= 0.0 {
			return 1.0;
		}
		clamp((now - self.appear_at) / self.style.appear_ms, 0.0, 1.0)
	}

	pub fn is_settled(&self, now: f64) -> bool {
		self.progress(now) >= 1.0
	}

	pub fn frame(&self, now: f64) -> Option<HighlightFrame> {
		let (x, y, w, h) = self.rect?;
		let e = EASE_OUT_QUAD.apply(self.progress(now));
		let (from_x, from_y) = self.style.appear_from;
		let (sw, sh) = (w * lerp(from_x, 1.0, e), h * lerp(from_y, 1.0, e));
		Some(HighlightFrame {
			rect: (x + (w - sw) / 2.0, y + (h - sh) / 2.0, sw, sh),
			opacity: e,
		})
	}
}
