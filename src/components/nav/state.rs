//! Everything the nav canvas animates, owned by its frame loop.

use log::debug;
use rand::rngs::StdRng;

use super::burst::BurstEngine;
use super::highlight::{HighlightBox, Rect};
use crate::motion::theme::{BurstStyle, HighlightStyle};

pub struct NavState {
	pub highlight: HighlightBox,
	pub burst: BurstEngine,
	active: Option<usize>,
	selections: u32,
}

impl NavState {
	pub fn new(highlight: HighlightStyle, burst: BurstStyle, rng: StdRng) -> Self {
		Self {
			highlight: HighlightBox::new(highlight),
			burst: BurstEngine::new(burst, rng),
			active: None,
			selections: 0,
		}
	}

	pub fn active(&self) -> Option<usize> {
		self.active
	}

	/// Whether the highlight has to be re-measured for this input.
	/// `selections` counts reader picks; scroll tracking leaves it alone.
	pub fn needs_layout(&self, index: usize, selections: u32) -> bool {
		self.active != Some(index) || self.selections != selections
	}

	/// Put the highlight on item `index`, whose box is `rect`. A new reader
	/// pick replays the appear animation and fires a burst from the box
	/// centre; anything else (scroll tracking, resizes) just moves it.
	pub fn apply(&mut self, index: usize, selections: u32, rect: Rect, now: f64) {
		let picked = selections != self.selections;
		self.highlight.place(rect, now, picked);
		if picked {
			if let Some(origin) = self.highlight.center() {
				let n = self.burst.burst(origin, now);
				debug!("nav: burst of {n} for item {index}");
			}
		}
		self.active = Some(index);
		self.selections = selections;
	}

	/// Drop expired burst particles.
	pub fn step(&mut self, now: f64) -> usize {
		self.burst.drain(now)
	}

	pub fn is_animating(&self, now: f64) -> bool {
		!self.burst.is_idle() || !self.highlight.is_settled(now)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;

	fn state() -> NavState {
		NavState::new(
			HighlightStyle::default(),
			BurstStyle::default(),
			StdRng::seed_from_u64(5),
		)
	}

	#[test]
	fn first_layout_appears_without_a_burst() {
		let mut nav = state();
		assert!(nav.needs_layout(0, 0));
		nav.apply(0, 0, (10.0, 10.0, 80.0, 30.0), 0.0);
		assert_eq!(nav.active(), Some(0));
		assert!(!nav.needs_layout(0, 0));
		assert!(nav.burst.is_idle());
		assert!(nav.is_animating(100.0));
		assert!(!nav.is_animating(300.0));
	}

	#[test]
	fn picks_burst_from_the_item_centre() {
		let mut nav = state();
		nav.apply(0, 0, (10.0, 10.0, 80.0, 30.0), 0.0);
		assert!(nav.needs_layout(2, 1));
		nav.apply(2, 1, (200.0, 10.0, 60.0, 30.0), 1000.0);
		assert_eq!(nav.burst.particles().len(), 13);
		assert!(nav.burst.particles().iter().all(|p| p.origin == (230.0, 25.0)));
		assert!(!nav.highlight.is_settled(1000.0));
	}

	#[test]
	fn tracking_and_resizes_only_move_the_box() {
		let mut nav = state();
		nav.apply(0, 0, (10.0, 10.0, 80.0, 30.0), 0.0);
		nav.apply(1, 0, (120.0, 10.0, 80.0, 30.0), 1000.0);
		nav.apply(1, 0, (140.0, 10.0, 80.0, 30.0), 1100.0);
		assert!(nav.burst.is_idle());
		assert!(nav.highlight.is_settled(1000.0));
		assert_eq!(nav.highlight.rect(), Some((140.0, 10.0, 80.0, 30.0)));
	}

	#[test]
	fn step_drains_the_burst() {
		let mut nav = state();
		nav.apply(0, 0, (0.0, 0.0, 10.0, 10.0), 0.0);
		nav.apply(1, 1, (20.0, 0.0, 10.0, 10.0), 0.0);
		assert_eq!(nav.step(10_000.0), 13);
		assert!(!nav.is_animating(10_000.0));
	}
}
