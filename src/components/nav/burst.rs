//! Radial particle bursts fired when the reader picks a nav item.
//!
//! Each burst queues `count` particles that appear shortly after the
//! selection, fly inward along jittered spokes while spinning, and expire
//! after their own randomized lifetime. The engine keeps them in a retained
//! list; the nav frame loop samples and drains it.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::motion::easing::{EASE, EASE_IN_BACK, Keyframes, Stop, clamp, lerp};
use crate::motion::theme::{BurstStyle, Color};

/// Symmetric jitter: `n / 2 - U(0, n)`, so a value in `(-n/2, n/2]`.
pub fn noise<R: Rng>(rng: &mut R, n: f64) -> f64 {
	if n <= 0.0 {
		return 0.0;
	}
	n / 2.0 - rng.gen_range(0.0..n)
}

/// Point `distance` out along spoke `k` of `total`, with the spoke spacing
/// jittered by a few degrees.
fn spoke<R: Rng>(rng: &mut R, distance: f64, k: usize, total: usize) -> (f64, f64) {
	let degrees = (360.0 + noise(rng, 8.0)) / total as f64 * k as f64;
	let (sin, cos) = degrees.to_radians().sin_cos();
	(distance * cos, distance * sin)
}

#[derive(Clone, Debug, PartialEq)]
pub struct BurstParticle {
	/// Burst centre in surface coordinates.
	pub origin: (f64, f64),
	pub start: (f64, f64),
	pub end: (f64, f64),
	/// Keyframe duration in ms, and how long the particle lives once spawned.
	pub lifetime: f64,
	pub scale: f64,
	pub color: Color,
	/// Rotation at the end of the keyframes, degrees.
	pub rotate: f64,
	/// Clock time at which the particle appears, ms.
	pub spawn_at: f64,
}

impl BurstParticle {
	pub fn expires_at(&self) -> f64 {
		self.spawn_at + self.lifetime
	}
}

/// What to draw for one particle on one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstFrame {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub opacity: f64,
	pub color: Color,
}

/// Keyframe timing shared by every particle.
#[derive(Clone, Debug)]
struct BurstTracks {
	/// Drives translation and rotation. Values are rotation multipliers;
	/// the translation path reuses the same segments.
	motion: Keyframes,
	/// Point scale as a multiple of the particle's own scale.
	scale: Keyframes,
	opacity: Keyframes,
}

impl Default for BurstTracks {
	fn default() -> Self {
		Self {
			motion: Keyframes::new(vec![
				Stop::new(0.0, 0.0, EASE_IN_BACK),
				Stop::new(0.7, 0.5, EASE),
				Stop::new(0.85, 0.66, EASE),
				Stop::new(1.0, 1.2, EASE),
			]),
			scale: Keyframes::new(vec![
				Stop::new(0.0, 0.0, EASE_IN_BACK),
				Stop::new(0.25, 0.25, EASE),
				Stop::new(0.65, 1.0, EASE),
				Stop::new(0.85, 1.0, EASE),
				Stop::new(1.0, 0.0, EASE),
			]),
			opacity: Keyframes::new(vec![
				Stop::new(0.0, 0.0, EASE_IN_BACK),
				Stop::new(0.38, 1.0, EASE),
				Stop::new(0.65, 1.0, EASE),
				Stop::new(0.85, 1.0, EASE),
				Stop::new(1.0, 0.0, EASE),
			]),
		}
	}
}

pub struct BurstEngine {
	style: BurstStyle,
	tracks: BurstTracks,
	rng: StdRng,
	particles: Vec<BurstParticle>,
}

impl BurstEngine {
	pub fn new(style: BurstStyle, rng: StdRng) -> Self {
		Self {
			style,
			tracks: BurstTracks::default(),
			rng,
			particles: Vec::new(),
		}
	}

	pub fn style(&self) -> &BurstStyle {
		&self.style
	}

	pub fn particles(&self) -> &[BurstParticle] {
		&self.particles
	}

	pub fn is_idle(&self) -> bool {
		self.particles.is_empty()
	}

	fn particle(&mut self, i: usize, origin: (f64, f64), now: f64) -> BurstParticle {
		let BurstStyle {
			count,
			distances: (near, far),
			rotation_range: r,
			animation_ms,
			variance_ms,
			spawn_delay_ms,
			..
		} = self.style;
		let rng = &mut self.rng;
		let k = count - i;

		let lifetime = animation_ms * 2.0 + noise(rng, variance_ms * 2.0);
		let spin = noise(rng, r / 10.0);
		// push the spin away from zero so every particle visibly turns
		let rotate = if spin > 0.0 {
			(spin + r / 20.0) * 10.0
		} else {
			(spin - r / 20.0) * 10.0
		};
		let start = spoke(rng, near, k, count);
		let end_distance = far + noise(rng, 7.0);
		let end = spoke(rng, end_distance, k, count);
		let scale = 1.0 + noise(rng, 0.2);
		let color_index = self.style.colors.choose(rng).copied().unwrap_or(1);

		BurstParticle {
			origin,
			start,
			end,
			lifetime,
			scale,
			color: self.style.palette_color(color_index),
			rotate,
			spawn_at: now + spawn_delay_ms,
		}
	}

	/// Queue a burst centred on `origin`, triggered at clock time `now`.
	/// Returns the number of particles queued.
	pub fn burst(&mut self, origin: (f64, f64), now: f64) -> usize {
		let count = self.style.count;
		for i in 0..count {
			let particle = self.particle(i, origin, now);
			self.particles.push(particle);
		}
		count
	}

	/// Remove particles whose lifetime has elapsed. Returns how many went.
	pub fn drain(&mut self, now: f64) -> usize {
		let before = self.particles.len();
		self.particles.retain(|p| now < p.expires_at());
		before - self.particles.len()
	}

	/// Sample `particle` at clock time `now`. `None` before it spawns and
	/// once its keyframes have finished.
	pub fn frame(&self, particle: &BurstParticle, now: f64) -> Option<BurstFrame> {
		let age = now - particle.spawn_at;
		if age < 0.0 || particle.lifetime <= 0.0 {
			return None;
		}
		let p = (age + self.style.lead_in_ms) / particle.lifetime;
		if p >= 1.0 {
			return None;
		}

		let (i, w) = self.tracks.motion.locate(p)?;
		let (ex, ey) = particle.end;
		let path = [particle.start, (ex * 1.2, ey * 1.2), particle.end, (ex * 0.5, ey * 0.5)];
		let (a, b) = (path[i], path[i + 1]);
		let (tx, ty) = (lerp(a.0, b.0, w), lerp(a.1, b.1, w));

		// rotate, then translate in the rotated frame
		let angle = (self.tracks.motion.sample(p) * particle.rotate).to_radians();
		let (sin, cos) = angle.sin_cos();
		let x = particle.origin.0 + tx * cos - ty * sin;
		let y = particle.origin.1 + tx * sin + ty * cos;

		Some(BurstFrame {
			x,
			y,
			radius: self.style.dot_size / 2.0 * self.tracks.scale.sample(p) * particle.scale,
			opacity: clamp(self.tracks.opacity.sample(p), 0.0, 1.0),
			color: particle.color,
		})
	}

	/// Every visible particle at clock time `now`.
	pub fn frames(&self, now: f64) -> impl Iterator<Item = BurstFrame> + '_ {
		self.particles.iter().filter_map(move |p| self.frame(p, now))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;

	fn engine(seed: u64) -> BurstEngine {
		BurstEngine::new(BurstStyle::default(), StdRng::seed_from_u64(seed))
	}

	fn still(lifetime: f64, rotate: f64) -> BurstParticle {
		BurstParticle {
			origin: (0.0, 0.0),
			start: (90.0, 0.0),
			end: (10.0, 0.0),
			lifetime,
			scale: 1.0,
			color: Color::rgb(255, 69, 0),
			rotate,
			spawn_at: 0.0,
		}
	}

	#[test]
	fn noise_stays_within_half_range() {
		let mut rng = StdRng::seed_from_u64(1);
		for _ in 0..1000 {
			let v = noise(&mut rng, 8.0);
			assert!(v > -4.0 && v <= 4.0);
		}
		assert_eq!(noise(&mut rng, 0.0), 0.0);
	}

	#[test]
	fn burst_parameters_follow_the_style() {
		let mut burst = engine(7);
		assert_eq!(burst.burst((100.0, 20.0), 1000.0), 13);
		let palette = &burst.style().palette;
		for p in burst.particles() {
			assert_eq!(p.origin, (100.0, 20.0));
			assert_eq!(p.spawn_at, 1030.0);
			let start = p.start.0.hypot(p.start.1);
			assert!((start - 90.0).abs() < 1e-9);
			let end = p.end.0.hypot(p.end.1);
			assert!((6.5..=13.5).contains(&end));
			assert!(p.lifetime > 200.0 && p.lifetime <= 2200.0);
			assert!(p.scale > 0.9 && p.scale <= 1.1);
			assert!((500.0..=1000.0).contains(&p.rotate.abs()));
			assert!(palette.contains(&p.color));
		}
	}

	#[test]
	fn particles_wait_for_the_spawn_delay() {
		let mut burst = engine(3);
		burst.burst((0.0, 0.0), 0.0);
		assert_eq!(burst.frames(10.0).count(), 0);
		assert!(burst.frames(31.0).count() > 0);
	}

	#[test]
	fn every_particle_expires() {
		let mut burst = engine(11);
		burst.burst((0.0, 0.0), 0.0);
		burst.burst((50.0, 0.0), 100.0);
		assert_eq!(burst.particles().len(), 26);
		// the shortest possible life ends at 30 + 200 ms
		assert_eq!(burst.drain(100.0), 0);
		let last = burst
			.particles()
			.iter()
			.map(BurstParticle::expires_at)
			.fold(0.0, f64::max);
		assert_eq!(burst.drain(last), 26);
		assert!(burst.is_idle());
		assert_eq!(burst.frames(last + 1.0).count(), 0);
	}

	#[test]
	fn lands_on_the_end_point_at_85_percent() {
		let burst = engine(1);
		// age 500 plus the 350ms lead-in is 85% of 1000
		let f = burst.frame(&still(1000.0, 0.0), 500.0).unwrap();
		assert!((f.x - 10.0).abs() < 1e-6);
		assert!(f.y.abs() < 1e-6);
		assert!((f.radius - 10.0).abs() < 1e-6);
		assert_eq!(f.opacity, 1.0);
	}

	#[test]
	fn rotation_keeps_the_distance_from_the_origin() {
		let burst = engine(1);
		let f = burst.frame(&still(1000.0, 180.0), 500.0).unwrap();
		assert!((f.x.hypot(f.y) - 10.0).abs() < 1e-6);
		assert!(f.y.abs() > 1.0);
	}

	#[test]
	fn invisible_outside_the_keyframes() {
		let burst = engine(1);
		assert!(burst.frame(&still(1000.0, 0.0), -1.0).is_none());
		assert!(burst.frame(&still(1000.0, 0.0), 650.0).is_none());
		// a lifetime shorter than the lead-in never shows
		assert!(burst.frame(&still(300.0, 0.0), 0.0).is_none());
		let fading = burst.frame(&still(1000.0, 0.0), 640.0).unwrap();
		assert!(fading.opacity < 0.2 && fading.radius < 2.0);
	}
}
