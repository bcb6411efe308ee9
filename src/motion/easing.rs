//! Interpolation and easing primitives shared by every animated surface.
//!
//! Everything here is pure and stateless. Frame-rate dependent smoothing is
//! expressed through [`frame_rate`], which normalizes a per-frame rate to a
//! 60fps timestep and caps it so long frames cannot overshoot.

/// Duration of one frame at 60fps, in milliseconds.
pub const FRAME_MS: f64 = 16.67;

/// Linear interpolation. `t` is not clamped.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}

/// Clamp `v` into `[lo, hi]`. NaN collapses to `lo`.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
	if v.is_nan() {
		return lo;
	}
	v.max(lo).min(hi)
}

/// Cubic ease-out: fast start, gentle landing.
pub fn ease_out(t: f64) -> f64 {
	let t = clamp(t, 0.0, 1.0);
	1.0 - (1.0 - t).powi(3)
}

/// Cubic ease-in-out, symmetric around `t = 0.5`.
pub fn ease_in_out(t: f64) -> f64 {
	let t = clamp(t, 0.0, 1.0);
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// Zero below `a`, one above `b`, eased in between.
///
/// Chaining several of these builds piecewise scroll-to-progress curves.
/// A degenerate segment (`a == b`) behaves as a step at `a`.
pub fn segment_remap(s: f64, a: f64, b: f64) -> f64 {
	let span = b - a;
	if span.abs() < f64::EPSILON {
		return if s >= a { 1.0 } else { 0.0 };
	}
	ease_in_out(clamp((s - a) / span, 0.0, 1.0))
}

/// Per-frame interpolation factor normalized to 60fps and capped.
pub fn frame_rate(rate: f64, dt_ms: f64, cap: f64) -> f64 {
	clamp(rate * (dt_ms / FRAME_MS), 0.0, cap)
}

/// A CSS-style cubic bezier timing curve anchored at (0,0) and (1,1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

impl CubicBezier {
	pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
		Self { x1, y1, x2, y2 }
	}

	fn sample(a1: f64, a2: f64, t: f64) -> f64 {
		let u = 1.0 - t;
		3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
	}

	fn slope(a1: f64, a2: f64, t: f64) -> f64 {
		let u = 1.0 - t;
		3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
	}

	/// Evaluate the curve's y for a given x in [0, 1].
	pub fn apply(&self, x: f64) -> f64 {
		let x = clamp(x, 0.0, 1.0);
		if x == 0.0 || x == 1.0 {
			return x;
		}

		// Newton first, bisection if the slope flattens out
		let mut t = x;
		for _ in 0..8 {
			let err = Self::sample(self.x1, self.x2, t) - x;
			if err.abs() < 1e-7 {
				return Self::sample(self.y1, self.y2, t);
			}
			let d = Self::slope(self.x1, self.x2, t);
			if d.abs() < 1e-6 {
				break;
			}
			t -= err / d;
		}

		let (mut lo, mut hi) = (0.0, 1.0);
		t = x;
		for _ in 0..40 {
			let v = Self::sample(self.x1, self.x2, t);
			if (v - x).abs() < 1e-7 {
				break;
			}
			if v < x {
				lo = t;
			} else {
				hi = t;
			}
			t = (lo + hi) / 2.0;
		}
		Self::sample(self.y1, self.y2, t)
	}
}

/// The CSS `ease` keyword.
pub const EASE: CubicBezier = CubicBezier::new(0.25, 0.1, 0.25, 1.0);
/// Accelerating curve the burst keyframes open with.
pub const EASE_IN_BACK: CubicBezier = CubicBezier::new(0.55, 0.0, 1.0, 0.45);
/// Quad-out curve used by the highlight appear animation.
pub const EASE_OUT_QUAD: CubicBezier = CubicBezier::new(0.25, 0.46, 0.45, 0.94);

/// One stop of a [`Keyframes`] track. `easing` shapes the segment that
/// starts at this stop.
#[derive(Clone, Copy, Debug)]
pub struct Stop {
	pub offset: f64,
	pub value: f64,
	pub easing: CubicBezier,
}

impl Stop {
	pub const fn new(offset: f64, value: f64, easing: CubicBezier) -> Self {
		Self {
			offset,
			value,
			easing,
		}
	}
}

/// A piecewise-eased value track, sampled by normalized progress.
#[derive(Clone, Debug)]
pub struct Keyframes {
	stops: Vec<Stop>,
}

impl Keyframes {
	/// Stops must be sorted by offset; an empty track samples as zero.
	pub fn new(stops: Vec<Stop>) -> Self {
		Self { stops }
	}

	/// Index of the segment containing `progress` and the eased position
	/// within it. Tracks with fewer than two stops have no segments.
	///
	/// Tracks whose values are vectors share one scalar track's timing by
	/// interpolating their own values with the returned weight.
	pub fn locate(&self, progress: f64) -> Option<(usize, f64)> {
		let first = self.stops.first()?;
		if self.stops.len() < 2 {
			return None;
		}
		if progress <= first.offset {
			return Some((0, 0.0));
		}
		for (i, pair) in self.stops.windows(2).enumerate() {
			let (a, b) = (pair[0], pair[1]);
			if progress <= b.offset {
				let span = b.offset - a.offset;
				let local = if span > 0.0 {
					(progress - a.offset) / span
				} else {
					1.0
				};
				return Some((i, a.easing.apply(local)));
			}
		}
		Some((self.stops.len() - 2, 1.0))
	}

	pub fn sample(&self, progress: f64) -> f64 {
		match self.locate(progress) {
			Some((i, t)) => lerp(self.stops[i].value, self.stops[i + 1].value, t),
			None => self.stops.first().map_or(0.0, |s| s.value),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ease_in_out_fixed_points() {
		assert_eq!(ease_in_out(0.0), 0.0);
		assert_eq!(ease_in_out(1.0), 1.0);
		assert!((ease_in_out(0.5) - 0.5).abs() < 1e-12);
	}

	#[test]
	fn ease_in_out_is_monotonic_and_bounded() {
		let mut prev = ease_in_out(-3.0);
		assert_eq!(prev, 0.0);
		for i in 0..=1000 {
			let t = -0.5 + i as f64 * 0.002;
			let v = ease_in_out(t);
			assert!((0.0..=1.0).contains(&v));
			assert!(v >= prev, "not monotonic at t={t}");
			prev = v;
		}
		assert_eq!(ease_in_out(7.0), 1.0);
	}

	#[test]
	fn ease_out_endpoints() {
		assert_eq!(ease_out(0.0), 0.0);
		assert_eq!(ease_out(1.0), 1.0);
		assert_eq!(ease_out(-1.0), 0.0);
		assert!(ease_out(0.5) > 0.5);
	}

	#[test]
	fn segment_remap_flat_outside_and_rising_inside() {
		for s in [-10.0, 0.0, 0.2] {
			assert_eq!(segment_remap(s, 0.2, 0.6), 0.0);
		}
		for s in [0.6, 0.7, 10.0] {
			assert_eq!(segment_remap(s, 0.2, 0.6), 1.0);
		}
		let mut prev = 0.0;
		for i in 1..100 {
			let s = 0.2 + 0.4 * i as f64 / 100.0;
			let v = segment_remap(s, 0.2, 0.6);
			assert!(v > prev);
			prev = v;
		}
	}

	#[test]
	fn segment_remap_degenerate_is_a_step() {
		assert_eq!(segment_remap(0.49, 0.5, 0.5), 0.0);
		assert_eq!(segment_remap(0.5, 0.5, 0.5), 1.0);
	}

	#[test]
	fn frame_rate_scales_and_caps() {
		assert!((frame_rate(0.1, FRAME_MS, 1.0) - 0.1).abs() < 1e-12);
		assert_eq!(frame_rate(0.5, 100.0, 0.4), 0.4);
		assert_eq!(frame_rate(0.5, -5.0, 0.4), 0.0);
	}

	#[test]
	fn bezier_matches_endpoints_and_linear() {
		let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
		for i in 0..=10 {
			let x = i as f64 / 10.0;
			assert!((linear.apply(x) - x).abs() < 1e-5);
		}
		assert_eq!(EASE.apply(0.0), 0.0);
		assert_eq!(EASE.apply(1.0), 1.0);
		// `ease` is well ahead of linear at the midpoint
		assert!(EASE.apply(0.5) > 0.75);
		assert!(EASE_IN_BACK.apply(0.5) < 0.5);
	}

	#[test]
	fn keyframes_interpolate_between_stops() {
		let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
		let track = Keyframes::new(vec![
			Stop::new(0.0, 0.0, linear),
			Stop::new(0.5, 10.0, linear),
			Stop::new(1.0, 0.0, linear),
		]);
		assert_eq!(track.sample(-1.0), 0.0);
		assert!((track.sample(0.25) - 5.0).abs() < 1e-4);
		assert!((track.sample(0.5) - 10.0).abs() < 1e-9);
		assert!((track.sample(0.75) - 5.0).abs() < 1e-4);
		assert_eq!(track.sample(2.0), 0.0);
		assert_eq!(Keyframes::new(Vec::new()).sample(0.5), 0.0);
	}

	#[test]
	fn locate_reports_segment_and_weight() {
		let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
		let track = Keyframes::new(vec![
			Stop::new(0.0, 0.0, linear),
			Stop::new(0.7, 1.0, linear),
			Stop::new(1.0, 2.0, linear),
		]);
		assert_eq!(track.locate(-0.5), Some((0, 0.0)));
		let (i, t) = track.locate(0.85).unwrap();
		assert_eq!(i, 1);
		assert!((t - 0.5).abs() < 1e-4);
		assert_eq!(track.locate(3.0), Some((1, 1.0)));
		assert_eq!(Keyframes::new(vec![Stop::new(0.0, 4.0, linear)]).locate(0.5), None);
		assert_eq!(Keyframes::new(vec![Stop::new(0.0, 4.0, linear)]).sample(0.5), 4.0);
	}
}
