//! Simulation state for the ambient background field.

use rand::Rng;
use rand::rngs::StdRng;

use crate::motion::clock::{PointerState, SmoothedPointer};
use crate::motion::easing::{FRAME_MS, clamp, ease_in_out, ease_out, frame_rate, lerp};
use crate::motion::theme::AmbientStyle;

/// Occasional small impulse that nudges a particle off its drift path.
#[derive(Clone, Debug)]
struct Jitter {
	/// Countdown to the next impulse, ms.
	timer: f64,
	duration: f64,
	/// Impulse progress in (0, 1]; zero while idle.
	phase: f64,
	dir: (f64, f64),
	strength: f64,
}

impl Jitter {
	fn idle(timer: f64) -> Self {
		Self {
			timer,
			duration: 1.0,
			phase: 0.0,
			dir: (0.0, 0.0),
			strength: 0.0,
		}
	}

	fn envelope(&self) -> f64 {
		let p = self.phase;
		if p <= 0.0 {
			0.0
		} else if p < 0.4 {
			ease_out(p / 0.4)
		} else {
			1.0 - ease_in_out((p - 0.4) / 0.6)
		}
	}

	fn offset(&self) -> (f64, f64) {
		let e = self.envelope() * self.strength;
		(self.dir.0 * e, self.dir.1 * e)
	}

	fn advance(&mut self, dt: f64, style: &AmbientStyle, rng: &mut StdRng) {
		self.timer -= dt;
		if self.timer <= 0.0 && self.phase == 0.0 {
			self.phase = 0.001;
			self.dir = (rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
			self.strength = range(rng, style.jitter_strength);
			self.duration = range(rng, style.jitter_duration).max(1.0);
		}
		if self.phase > 0.0 {
			self.phase += dt / self.duration;
			if self.phase >= 1.0 {
				self.phase = 0.0;
				self.timer = range(rng, style.jitter_delay);
			}
		}
	}
}

fn range(rng: &mut StdRng, (lo, hi): (f64, f64)) -> f64 {
	if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// One drifting point of the ambient field.
#[derive(Clone, Debug)]
pub struct AmbientParticle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub base_opacity: f64,
	/// Smoothed pointer attraction offset.
	pub pull: (f64, f64),
	/// Where the particle was drawn on the last simulated frame.
	pub rendered: (f64, f64),
	jitter: Jitter,
}

impl AmbientParticle {
	/// A particle that neither drifts nor jitters.
	pub fn fixed(x: f64, y: f64, radius: f64, base_opacity: f64) -> Self {
		Self {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius,
			base_opacity,
			pull: (0.0, 0.0),
			rendered: (x, y),
			jitter: Jitter::idle(f64::INFINITY),
		}
	}

	fn random(style: &AmbientStyle, width: f64, height: f64, rng: &mut StdRng) -> Self {
		let half = style.speed / 2.0;
		let (x, y) = (rng.gen_range(0.0..=width.max(0.0)), rng.gen_range(0.0..=height.max(0.0)));
		Self {
			x,
			y,
			vx: rng.gen_range(-half..=half),
			vy: rng.gen_range(-half..=half),
			radius: range(rng, (style.radius_min, style.radius_max)),
			base_opacity: range(rng, (style.opacity_min, style.opacity_max)),
			pull: (0.0, 0.0),
			rendered: (x, y),
			jitter: Jitter::idle(rng.gen_range(0.0..=style.jitter_first)),
		}
	}

	pub fn pull_magnitude(&self) -> f64 {
		self.pull.0.hypot(self.pull.1)
	}

	/// Drift by velocity and bounce off the edges of `[0,w]×[0,h]`.
	fn drift(&mut self, dt: f64, w: f64, h: f64) {
		let k = dt / FRAME_MS;
		self.x += self.vx * k;
		self.y += self.vy * k;
		if self.x < 0.0 {
			self.vx = self.vx.abs();
			self.x = 0.0;
		}
		if self.x > w {
			self.vx = -self.vx.abs();
			self.x = w;
		}
		if self.y < 0.0 {
			self.vy = self.vy.abs();
			self.y = 0.0;
		}
		if self.y > h {
			self.vy = -self.vy.abs();
			self.y = h;
		}
	}
}

/// Attraction toward the pointer from `(bx, by)`, before smoothing.
fn pull_target(style: &AmbientStyle, pointer: PointerState, bx: f64, by: f64) -> (f64, f64) {
	if !pointer.active {
		return (0.0, 0.0);
	}
	let (dx, dy) = (pointer.x - bx, pointer.y - by);
	let dist = dx.hypot(dy);
	if dist <= 0.5 || dist >= style.pull_radius {
		return (0.0, 0.0);
	}
	let strength = (1.0 - dist / style.pull_radius).powi(2) * style.pull_strength;
	(dx / dist * strength, dy / dist * strength)
}

/// Drifting, breathing, pointer-attracted particle field.
pub struct AmbientField {
	pub style: AmbientStyle,
	width: f64,
	height: f64,
	particles: Vec<AmbientParticle>,
	pointer: SmoothedPointer,
	rng: StdRng,
}

impl AmbientField {
	pub fn new(style: AmbientStyle, width: f64, height: f64, mut rng: StdRng) -> Self {
		let particles = (0..style.count)
			.map(|_| AmbientParticle::random(&style, width, height, &mut rng))
			.collect();
		Self::from_particles(style, width, height, particles, rng)
	}

	/// Build a field around a prepared particle set.
	pub fn from_particles(
		style: AmbientStyle,
		width: f64,
		height: f64,
		particles: Vec<AmbientParticle>,
		rng: StdRng,
	) -> Self {
		Self {
			style,
			width,
			height,
			particles,
			pointer: SmoothedPointer::new(width / 2.0, height / 2.0),
			rng,
		}
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn particles(&self) -> &[AmbientParticle] {
		&self.particles
	}

	pub fn pointer(&self) -> PointerState {
		self.pointer.state()
	}

	/// Replace the whole batch for a new viewport.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		let style = &self.style;
		let rng = &mut self.rng;
		self.particles = (0..style.count)
			.map(|_| AmbientParticle::random(style, width, height, rng))
			.collect();
	}

	/// Advance one frame. Returns `false` when the field is too faint to
	/// simulate or draw; the pointer is still tracked in that case.
	pub fn step(&mut self, dt: f64, time_ms: f64, visibility: f64, pointer: PointerState) -> bool {
		self.pointer.update(pointer, dt);
		if visibility < self.style.hidden_below {
			return false;
		}

		let (w, h) = (self.width, self.height);
		let (cx, cy) = (w / 2.0, h / 2.0);
		let breath = (time_ms * self.style.breath_speed).sin() * self.style.breath_amplitude;
		let smoothed = self.pointer.state();
		let style = &self.style;

		for p in &mut self.particles {
			p.drift(dt, w, h);
			p.jitter.advance(dt, style, &mut self.rng);

			let (jx, jy) = p.jitter.offset();
			let bx = cx + (p.x - cx) * (1.0 + breath) + jx;
			let by = cy + (p.y - cy) * (1.0 + breath) + jy;

			let target = pull_target(style, smoothed, bx, by);
			let rate = if target == (0.0, 0.0) {
				frame_rate(0.10, dt, 0.4)
			} else {
				frame_rate(0.22, dt, 0.5)
			};
			p.pull = (lerp(p.pull.0, target.0, rate), lerp(p.pull.1, target.1, rate));
			p.rendered = (clamp(bx + p.pull.0, 0.0, w), clamp(by + p.pull.1, 0.0, h));
		}
		true
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;

	fn calm_style() -> AmbientStyle {
		AmbientStyle {
			breath_amplitude: 0.0,
			..AmbientStyle::default()
		}
	}

	#[test]
	fn builds_a_full_batch_inside_the_viewport() {
		let field = AmbientField::new(AmbientStyle::default(), 800.0, 600.0, StdRng::seed_from_u64(1));
		assert_eq!(field.particles().len(), 60);
		for p in field.particles() {
			assert!((0.0..=800.0).contains(&p.x) && (0.0..=600.0).contains(&p.y));
			assert!((0.8..=2.4).contains(&p.radius));
			assert!((0.3..=0.7).contains(&p.base_opacity));
			assert!(p.vx.abs() <= 0.3 && p.vy.abs() <= 0.3);
		}
	}

	#[test]
	fn velocity_flips_only_on_edge_crossing() {
		let mut p = AmbientParticle::fixed(0.8, 50.0, 1.0, 0.5);
		p.vx = -0.5;
		p.drift(FRAME_MS, 100.0, 100.0);
		assert!((p.x - 0.3).abs() < 1e-9);
		assert_eq!(p.vx, -0.5);
		p.drift(FRAME_MS, 100.0, 100.0);
		assert_eq!(p.x, 0.0);
		assert_eq!(p.vx, 0.5);

		let mut q = AmbientParticle::fixed(50.0, 99.8, 1.0, 0.5);
		q.vy = 0.5;
		q.drift(FRAME_MS, 100.0, 100.0);
		assert_eq!(q.y, 100.0);
		assert_eq!(q.vy, -0.5);
	}

	#[test]
	fn rendered_positions_stay_in_bounds() {
		let mut field = AmbientField::new(AmbientStyle::default(), 640.0, 480.0, StdRng::seed_from_u64(7));
		let mut t = 0.0;
		for i in 0..600 {
			t += 16.0;
			let pointer = PointerState::new((i % 640) as f64, 10.0, i % 3 != 0);
			assert!(field.step(16.0, t, 1.0, pointer));
			for p in field.particles() {
				assert!((0.0..=640.0).contains(&p.rendered.0));
				assert!((0.0..=480.0).contains(&p.rendered.1));
			}
		}
	}

	#[test]
	fn faint_frames_skip_simulation() {
		let particles = vec![AmbientParticle::fixed(100.0, 100.0, 1.0, 0.5)];
		let mut field =
			AmbientField::from_particles(calm_style(), 400.0, 400.0, particles, StdRng::seed_from_u64(2));
		assert!(!field.step(16.0, 16.0, 0.004, PointerState::new(120.0, 100.0, true)));
		assert_eq!(field.particles()[0].pull, (0.0, 0.0));
		assert!(field.step(16.0, 32.0, 0.5, PointerState::new(120.0, 100.0, true)));
	}

	#[test]
	fn jitter_envelope_rises_then_falls_back_to_rest() {
		let mut j = Jitter::idle(0.0);
		assert_eq!(j.envelope(), 0.0);
		j.phase = 0.4;
		assert!((j.envelope() - 1.0).abs() < 1e-12);
		j.phase = 0.999_999;
		assert!(j.envelope() < 1e-6);
	}

	#[test]
	fn jitter_fires_and_rearms() {
		let style = AmbientStyle::default();
		let mut rng = StdRng::seed_from_u64(3);
		let mut j = Jitter::idle(10.0);
		j.advance(16.0, &style, &mut rng);
		assert!(j.phase > 0.0);
		assert!((15.0..40.0).contains(&j.strength));
		for _ in 0..80 {
			j.advance(16.0, &style, &mut rng);
		}
		assert_eq!(j.phase, 0.0);
		assert!(j.timer > 0.0);
	}

	#[test]
	fn pull_target_respects_radius() {
		let style = AmbientStyle::default();
		let on = |x| PointerState::new(x, 0.0, true);
		assert_eq!(pull_target(&style, on(0.3), 0.0, 0.0), (0.0, 0.0));
		assert_eq!(pull_target(&style, on(300.0), 0.0, 0.0), (0.0, 0.0));
		assert_eq!(pull_target(&style, PointerState::new(50.0, 0.0, false), 0.0, 0.0), (0.0, 0.0));
		let (tx, ty) = pull_target(&style, on(150.0), 0.0, 0.0);
		assert!((tx - 0.25 * 110.0).abs() < 1e-9);
		assert_eq!(ty, 0.0);
	}
}
