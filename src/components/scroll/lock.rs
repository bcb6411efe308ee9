//! One-way scroll lock: once the reader scrolls past the intro, the page
//! never scrolls back above it.

/// Slack above the threshold within which upward input is suppressed, px.
const EDGE_SLACK: f64 = 10.0;

#[derive(Clone, Debug)]
pub struct ScrollLock {
	threshold: f64,
	locked: bool,
	touch_y: f64,
}

impl ScrollLock {
	pub fn new(threshold: f64) -> Self {
		Self {
			threshold,
			locked: false,
			touch_y: 0.0,
		}
	}

	pub fn threshold(&self) -> f64 {
		self.threshold
	}

	pub fn set_threshold(&mut self, threshold: f64) {
		self.threshold = threshold;
	}

	pub fn is_locked(&self) -> bool {
		self.locked
	}

	/// Observe a scroll position. Returns the position to force the page
	/// back to, if any.
	pub fn on_scroll(&mut self, scroll_y: f64) -> Option<f64> {
		if !self.locked && scroll_y >= self.threshold {
			self.locked = true;
		}
		(self.locked && scroll_y < self.threshold).then_some(self.threshold)
	}

	fn at_edge(&self, scroll_y: f64) -> bool {
		self.locked && scroll_y <= self.threshold + EDGE_SLACK
	}

	pub fn suppress_wheel(&self, delta_y: f64, scroll_y: f64) -> bool {
		delta_y < 0.0 && self.at_edge(scroll_y)
	}

	pub fn suppress_key(&self, key: &str, scroll_y: f64) -> bool {
		matches!(key, "ArrowUp" | "PageUp" | "Home") && self.at_edge(scroll_y)
	}

	pub fn touch_start(&mut self, client_y: f64) {
		self.touch_y = client_y;
	}

	/// A finger moving down the screen scrolls the page up.
	pub fn suppress_touch_move(&self, client_y: f64, scroll_y: f64) -> bool {
		client_y > self.touch_y && self.at_edge(scroll_y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn engages_at_threshold_and_corrects_idempotently() {
		let mut lock = ScrollLock::new(800.0);
		assert_eq!(lock.on_scroll(400.0), None);
		assert!(!lock.is_locked());
		assert_eq!(lock.on_scroll(800.0), None);
		assert!(lock.is_locked());
		assert_eq!(lock.on_scroll(780.0), Some(800.0));
		assert_eq!(lock.on_scroll(800.0), None);
		assert_eq!(lock.on_scroll(0.0), Some(800.0));
		assert_eq!(lock.on_scroll(1500.0), None);
	}

	#[test]
	fn upward_input_is_suppressed_only_near_the_edge() {
		let mut lock = ScrollLock::new(800.0);
		assert!(!lock.suppress_wheel(-50.0, 805.0));
		lock.on_scroll(900.0);
		assert!(lock.suppress_wheel(-50.0, 805.0));
		assert!(!lock.suppress_wheel(50.0, 805.0));
		assert!(!lock.suppress_wheel(-50.0, 811.0));

		assert!(lock.suppress_key("Home", 810.0));
		assert!(lock.suppress_key("PageUp", 800.0));
		assert!(!lock.suppress_key("ArrowDown", 800.0));

		lock.touch_start(300.0);
		assert!(lock.suppress_touch_move(340.0, 800.0));
		assert!(!lock.suppress_touch_move(260.0, 800.0));
	}

	#[test]
	fn threshold_follows_resize() {
		let mut lock = ScrollLock::new(800.0);
		lock.on_scroll(800.0);
		lock.set_threshold(600.0);
		assert_eq!(lock.on_scroll(700.0), None);
		assert_eq!(lock.on_scroll(590.0), Some(600.0));
	}
}
