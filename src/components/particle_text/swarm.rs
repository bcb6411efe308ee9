//! Simulation state for the text-forming swarm.
//!
//! Particles start on a spiral around the viewport centre and migrate to
//! points sampled from the rasterised text as form progress rises. Form
//! progress is eased before use; everything below refers to the eased value.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use log::warn;
use rand::Rng;
use rand::rngs::StdRng;

use super::glyph::{GlyphRasterizer, GlyphSpec, sample_points};
use crate::motion::clock::{PointerState, SmoothedPointer};
use crate::motion::easing::{FRAME_MS, clamp, ease_in_out, frame_rate, lerp};
use crate::motion::theme::NebulaStyle;

/// One particle of the swarm.
#[derive(Clone, Debug)]
pub struct NebulaParticle {
	/// Spiral start position.
	pub start: (f64, f64),
	/// Glyph target position.
	pub home: (f64, f64),
	pub radius: f64,
	pub opacity: f64,
	pub hue: f64,
	pub saturation: f64,
	pub lightness: f64,
	pub twinkle_phase: f64,
	/// Radians per 60fps frame.
	pub twinkle_speed: f64,
	pub breath_offset: f64,
	/// Radians per millisecond.
	pub breath_freq: f64,
	pub pull: (f64, f64),
	pub rendered: (f64, f64),
	pub trail: VecDeque<(f64, f64)>,
}

impl NebulaParticle {
	pub fn pull_magnitude(&self) -> f64 {
		self.pull.0.hypot(self.pull.1)
	}
}

/// Spiral start for particle `i` of `n` around the centre of `w × h`.
pub fn spiral_point(style: &NebulaStyle, i: usize, n: usize, w: f64, h: f64) -> (f64, f64) {
	let k = i as f64 / n.max(1) as f64;
	let angle = k * style.spiral_sweep;
	let radius = w.min(h) * style.spiral_scale * (1.0 - k).sqrt() + style.spiral_offset;
	(w / 2.0 + angle.cos() * radius, h / 2.0 + angle.sin() * radius)
}

/// Font size the text is rasterised at for a viewport width.
pub fn font_size(style: &NebulaStyle, width: f64) -> f64 {
	(width * style.font_scale).min(style.font_max)
}

fn build_particles(
	style: &NebulaStyle,
	w: f64,
	h: f64,
	targets: &[(f64, f64)],
	rng: &mut StdRng,
) -> Vec<NebulaParticle> {
	let n = style.count;
	(0..n)
		.map(|i| {
			let k = i as f64 / n as f64;
			let start = spiral_point(style, i, n, w, h);
			NebulaParticle {
				start,
				// No glyph coverage: stay on the spiral
				home: targets.get(i).copied().unwrap_or(start),
				radius: rng.gen_range(0.35..1.95),
				opacity: rng.gen_range(0.45..0.67),
				hue: 22.0 + k * 26.0 + rng.gen_range(0.0..8.0),
				saturation: rng.gen_range(78.0..96.0),
				lightness: rng.gen_range(48.0..70.0),
				twinkle_phase: rng.gen_range(0.0..TAU),
				twinkle_speed: rng.gen_range(0.003..0.010),
				breath_offset: rng.gen_range(0.0..TAU),
				breath_freq: rng.gen_range(0.0006..0.0012),
				pull: (0.0, 0.0),
				rendered: start,
				trail: VecDeque::with_capacity(style.trail_len + 1),
			}
		})
		.collect()
}

/// The text-forming particle swarm.
pub struct NebulaSwarm {
	pub style: NebulaStyle,
	width: f64,
	height: f64,
	particles: Vec<NebulaParticle>,
	pointer: SmoothedPointer,
	/// Eased form progress of the previous frame.
	prev_form: f64,
	form: f64,
	spark: Option<usize>,
	rng: StdRng,
}

impl NebulaSwarm {
	/// Build a swarm whose glyph targets are `targets`. Missing targets fall
	/// back to the spiral start.
	pub fn new(style: NebulaStyle, width: f64, height: f64, targets: &[(f64, f64)], mut rng: StdRng) -> Self {
		let particles = build_particles(&style, width, height, targets, &mut rng);
		Self {
			style,
			width,
			height,
			particles,
			pointer: SmoothedPointer::new(width / 2.0, height / 2.0),
			prev_form: 0.0,
			form: 0.0,
			spark: None,
			rng,
		}
	}

	/// Rasterise `glyph`, sample it and build the swarm around the samples.
	pub fn build(
		style: NebulaStyle,
		width: f64,
		height: f64,
		glyph: &GlyphSpec,
		rasterizer: &impl GlyphRasterizer,
		mut rng: StdRng,
	) -> Self {
		let targets = Self::sample(&style, width, height, glyph, rasterizer, &mut rng);
		Self::new(style, width, height, &targets, rng)
	}

	fn sample(
		style: &NebulaStyle,
		width: f64,
		height: f64,
		glyph: &GlyphSpec,
		rasterizer: &impl GlyphRasterizer,
		rng: &mut StdRng,
	) -> Vec<(f64, f64)> {
		let font = glyph.font(font_size(style, width));
		let mask = match rasterizer.rasterize(&glyph.text, &font, width as usize, height as usize) {
			Ok(mask) => mask,
			Err(e) => {
				warn!("particle text: rasterising {:?} failed: {e}", glyph.text);
				return Vec::new();
			}
		};
		let points = sample_points(&mask, style.sample_stride, style.alpha_threshold, style.count, rng);
		if points.is_empty() {
			warn!("particle text: {:?} has no opaque cells, keeping the spiral", glyph.text);
		}
		points
	}

	/// Rebuild every particle for a new viewport.
	pub fn rebuild(&mut self, width: f64, height: f64, glyph: &GlyphSpec, rasterizer: &impl GlyphRasterizer) {
		let targets = Self::sample(&self.style, width, height, glyph, rasterizer, &mut self.rng);
		self.width = width;
		self.height = height;
		self.particles = build_particles(&self.style, width, height, &targets, &mut self.rng);
		self.spark = None;
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn particles(&self) -> &[NebulaParticle] {
		&self.particles
	}

	/// Eased form progress of the last frame.
	pub fn form(&self) -> f64 {
		self.form
	}

	/// Particle to spark this frame, if any.
	pub fn spark(&self) -> Option<usize> {
		self.spark
	}

	/// Advance one frame at raw form progress `progress`.
	pub fn step(&mut self, dt: f64, time_ms: f64, progress: f64, pointer: PointerState) {
		let nft = ease_in_out(progress);
		if nft < self.prev_form - 0.01 || nft < 0.08 {
			for p in &mut self.particles {
				p.trail.clear();
			}
		}
		self.prev_form = nft;
		self.form = nft;
		self.pointer.update(pointer, dt);
		self.spark = None;
		if nft < 0.008 {
			return;
		}

		let style = &self.style;
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let smoothed = self.pointer.state();
		let attract = smoothed.active && nft > style.pull_start;
		let att = clamp((nft - style.pull_start) / (1.0 - style.pull_start), 0.0, 1.0);

		for p in &mut self.particles {
			p.twinkle_phase += p.twinkle_speed * dt / FRAME_MS;
			let breath = (time_ms * p.breath_freq + p.breath_offset).sin() * 0.007 * nft;
			let hx = p.home.0 + (p.home.0 - cx) * breath;
			let hy = p.home.1 + (p.home.1 - cy) * breath;
			let (gx, gy) = (lerp(p.start.0, hx, nft), lerp(p.start.1, hy, nft));

			let mut target = (0.0, 0.0);
			if attract {
				let (dx, dy) = (smoothed.x - gx, smoothed.y - gy);
				let d = dx.hypot(dy);
				if d > 0.5 && d < style.pull_radius {
					let s = (1.0 - d / style.pull_radius).powf(style.pull_power) * style.pull_strength * att;
					target = (dx / d * s, dy / d * s);
				}
			}
			let rate = if target == (0.0, 0.0) {
				frame_rate(0.10, dt, 0.4)
			} else {
				frame_rate(0.22, dt, 0.5)
			};
			p.pull = (lerp(p.pull.0, target.0, rate), lerp(p.pull.1, target.1, rate));
			p.rendered = (gx + p.pull.0, gy + p.pull.1);

			p.trail.push_back(p.rendered);
			while p.trail.len() > style.trail_len {
				p.trail.pop_front();
			}
		}

		if nft > 0.82 && !self.particles.is_empty() && self.rng.gen_bool(style.spark_chance.clamp(0.0, 1.0)) {
			self.spark = Some(self.rng.gen_range(0..self.particles.len()));
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;

	fn swarm(targets: &[(f64, f64)]) -> NebulaSwarm {
		NebulaSwarm::new(NebulaStyle::default(), 1280.0, 800.0, targets, StdRng::seed_from_u64(11))
	}

	#[test]
	fn spiral_starts_wind_inward() {
		let style = NebulaStyle::default();
		let first = spiral_point(&style, 0, 480, 1280.0, 800.0);
		assert!((first.0 - (640.0 + 800.0 * 0.85 + 30.0)).abs() < 1e-9);
		assert!((first.1 - 400.0).abs() < 1e-9);
		let last = spiral_point(&style, 479, 480, 1280.0, 800.0);
		let r_last = (last.0 - 640.0).hypot(last.1 - 400.0);
		assert!(r_last < 100.0);
	}

	#[test]
	fn font_size_is_capped() {
		let style = NebulaStyle::default();
		assert_eq!(font_size(&style, 300.0), 120.0);
		assert_eq!(font_size(&style, 1280.0), 200.0);
	}

	#[test]
	fn attributes_fall_in_their_ranges() {
		let s = swarm(&[]);
		assert_eq!(s.particles().len(), 480);
		for (i, p) in s.particles().iter().enumerate() {
			let base = 22.0 + i as f64 / 480.0 * 26.0;
			assert!(p.hue >= base && p.hue < base + 8.0);
			assert!((78.0..96.0).contains(&p.saturation));
			assert!((48.0..70.0).contains(&p.lightness));
			assert!((0.35..1.95).contains(&p.radius));
			assert!((0.45..0.67).contains(&p.opacity));
			assert!((0.003..0.010).contains(&p.twinkle_speed));
			assert!((0.0006..0.0012).contains(&p.breath_freq));
		}
	}

	#[test]
	fn missing_targets_keep_the_spiral() {
		let s = swarm(&[]);
		assert!(s.particles().iter().all(|p| p.home == p.start));
	}

	#[test]
	fn trails_are_capped_and_cleared_on_reversal() {
		let mut s = swarm(&vec![(640.0, 400.0); 480]);
		let pointer = PointerState::default();
		let mut t = 0.0;
		for _ in 0..40 {
			t += 16.0;
			s.step(16.0, t, 0.9, pointer);
		}
		assert!(s.particles().iter().all(|p| p.trail.len() == 16));

		s.step(16.0, t + 16.0, 0.7, pointer);
		// cleared, then this frame's position pushed
		assert!(s.particles().iter().all(|p| p.trail.len() == 1));
	}

	#[test]
	fn near_spiral_frames_do_nothing() {
		let mut s = swarm(&vec![(640.0, 400.0); 480]);
		s.step(16.0, 16.0, 0.05, PointerState::new(640.0, 400.0, true));
		assert!(s.form() < 0.008);
		assert!(s.particles().iter().all(|p| p.trail.is_empty() && p.pull == (0.0, 0.0)));
	}

	#[test]
	fn pointer_only_attracts_once_formed() {
		let mut s = swarm(&vec![(700.0, 400.0); 480]);
		let pointer = PointerState::new(640.0, 400.0, true);
		s.step(16.0, 16.0, 0.4, pointer);
		// eased 0.4 is below the attraction threshold
		assert!(s.particles().iter().all(|p| p.pull == (0.0, 0.0)));
		for i in 0..30 {
			s.step(16.0, 32.0 + i as f64 * 16.0, 1.0, pointer);
		}
		assert!(s.particles().iter().any(|p| p.pull_magnitude() > 1.0));
	}
}
