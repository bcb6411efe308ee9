//! End-to-end runs of the simulation state machines, driven frame by frame
//! the way the browser loops drive them.

use folio_motion::components::ambient_field::{AmbientField, AmbientParticle};
use folio_motion::components::nav::{BurstEngine, HighlightBox, NavState};
use folio_motion::components::particle_text::{AlphaMask, GlyphRasterizer, GlyphSpec, NebulaSwarm};
use folio_motion::components::scroll::{IntroStage, ProgressSource, ScrollInterceptor, ScrollLock};
use folio_motion::motion::easing::FRAME_MS;
use folio_motion::motion::theme::{AmbientStyle, BurstStyle, HighlightStyle, NebulaStyle};
use folio_motion::{MotionError, PointerState};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Rasterizer that paints an opaque rectangle instead of text.
struct BlockRasterizer {
	block: (usize, usize, usize, usize),
}

impl GlyphRasterizer for BlockRasterizer {
	fn rasterize(&self, _text: &str, _font: &str, width: usize, height: usize) -> Result<AlphaMask, MotionError> {
		let (x0, y0, x1, y1) = self.block;
		let mut alpha = vec![0u8; width * height];
		for y in y0..y1.min(height) {
			for x in x0..x1.min(width) {
				alpha[y * width + x] = 255;
			}
		}
		Ok(AlphaMask::new(width, height, alpha))
	}
}

struct BrokenRasterizer;

impl GlyphRasterizer for BrokenRasterizer {
	fn rasterize(&self, _text: &str, _font: &str, _w: usize, _h: usize) -> Result<AlphaMask, MotionError> {
		Err(MotionError::NoContext)
	}
}

fn swarm_over(block: (usize, usize, usize, usize)) -> NebulaSwarm {
	NebulaSwarm::build(
		NebulaStyle::default(),
		1280.0,
		800.0,
		&GlyphSpec::default(),
		&BlockRasterizer { block },
		StdRng::seed_from_u64(42),
	)
}

#[test]
fn nebula_forms_the_word_over_the_intro() {
	let mut swarm = swarm_over((540, 360, 740, 440));
	assert_eq!(swarm.particles().len(), 480);
	for p in swarm.particles() {
		assert!((540.0..740.0).contains(&p.home.0) && (360.0..440.0).contains(&p.home.1));
	}

	let pointer = PointerState::default();
	let mut trace = Vec::new();
	for frame in 0..=54 {
		let t = frame as f64 * FRAME_MS;
		let progress = (t / 900.0).min(1.0);
		swarm.step(FRAME_MS, t, progress, pointer);
		if frame == 0 {
			assert!(swarm.particles().iter().all(|p| p.trail.is_empty()));
		}
		trace.push(swarm.form());
	}
	assert!(trace.windows(2).all(|w| w[1] >= w[0]));
	assert_eq!(trace.last().copied(), Some(1.0));

	// hold at full form for another second
	let mut t = 54.0 * FRAME_MS;
	for _ in 0..60 {
		t += FRAME_MS;
		swarm.step(FRAME_MS, t, 1.0, pointer);
	}
	for p in swarm.particles() {
		let (dx, dy) = (p.rendered.0 - p.home.0, p.rendered.1 - p.home.1);
		assert!(dx.hypot(dy) < 3.0, "particle {:?} strayed from {:?}", p.rendered, p.home);
		assert_eq!(p.pull, (0.0, 0.0));
	}
}

#[test]
fn glyph_samples_are_padded_or_fall_back_to_the_spiral() {
	// a 6x6 block holds only four stride-3 cells
	let small = swarm_over((600, 399, 606, 405));
	assert_eq!(small.particles().len(), 480);
	assert!(small.particles().iter().all(|p| (600.0..606.0).contains(&p.home.0)));

	let empty = swarm_over((0, 0, 0, 0));
	assert!(empty.particles().iter().all(|p| p.home == p.start));

	let broken = NebulaSwarm::build(
		NebulaStyle::default(),
		1280.0,
		800.0,
		&GlyphSpec::default(),
		&BrokenRasterizer,
		StdRng::seed_from_u64(1),
	);
	assert!(broken.particles().iter().all(|p| p.home == p.start));
}

#[test]
fn ambient_pull_converges_then_relaxes() {
	let style = AmbientStyle {
		breath_amplitude: 0.0,
		..AmbientStyle::default()
	};
	let particles = vec![AmbientParticle::fixed(690.0, 400.0, 1.5, 0.5)];
	let mut field = AmbientField::from_particles(style, 1280.0, 800.0, particles, StdRng::seed_from_u64(3));

	let expected = (1.0 - 50.0_f64 / 300.0).powi(2) * 110.0;
	let mut t = 0.0;
	for _ in 0..120 {
		t += FRAME_MS;
		field.step(FRAME_MS, t, 1.0, PointerState::new(640.0, 400.0, true));
	}
	let pulled = field.particles()[0].pull_magnitude();
	assert!((pulled - expected).abs() < expected * 0.01, "pull {pulled} vs {expected}");
	// pulled toward the pointer, which is to the left
	assert!(field.particles()[0].pull.0 < 0.0);

	let mut prev = pulled;
	for _ in 0..120 {
		t += FRAME_MS;
		field.step(FRAME_MS, t, 1.0, PointerState::new(640.0, 400.0, false));
		let now = field.particles()[0].pull_magnitude();
		assert!(now <= prev);
		prev = now;
	}
	assert!(prev < 0.5);
}

#[test]
fn intro_autoplays_then_follows_the_scroll() {
	let mut stage = IntroStage::new(1280.0, 800.0);
	for _ in 0..60 {
		stage.advance(FRAME_MS);
	}
	assert!(stage.autoplay_done());
	assert_eq!(stage.form_progress(), 1.0);
	assert_eq!(stage.visibility(), 1.0);

	stage.set_scroll(1280.0 * 10.0);
	for _ in 0..600 {
		stage.advance(FRAME_MS);
	}
	assert!(stage.form_progress() < 0.01);
	assert!(stage.visibility() < 0.01);
}

#[test]
fn interceptor_completes_exactly_once() {
	let mut gate = ScrollInterceptor::new();
	let completions = (0..50).filter(|_| gate.wheel(120.0).completed).count();
	assert_eq!(completions, 1);
	assert!(gate.is_done());
	assert!(!gate.key("ArrowDown").consumed);
	for _ in 0..300 {
		gate.advance(FRAME_MS);
	}
	assert!(gate.progress() > 0.99);
}

#[test]
fn scroll_lock_holds_the_threshold() {
	let mut lock = ScrollLock::new(800.0);
	assert_eq!(lock.on_scroll(300.0), None);
	assert_eq!(lock.on_scroll(1200.0), None);
	for y in [790.0, 500.0, 0.0] {
		assert_eq!(lock.on_scroll(y), Some(800.0));
		assert_eq!(lock.on_scroll(800.0), None);
	}
}

#[test]
fn nav_pick_bursts_and_everything_expires() {
	let mut nav = NavState::new(
		HighlightStyle::default(),
		BurstStyle::default(),
		StdRng::seed_from_u64(8),
	);
	nav.apply(0, 0, (120.0, 130.0, 90.0, 32.0), 0.0);
	nav.apply(2, 1, (330.0, 130.0, 110.0, 32.0), 500.0);
	assert_eq!(nav.burst.particles().len(), 13);

	let mut now = 500.0;
	let mut seen = 0;
	while nav.is_animating(now) {
		now += FRAME_MS;
		seen = seen.max(nav.burst.frames(now).count());
		nav.step(now);
		assert!(now < 5000.0, "nav never settled");
	}
	assert!(seen > 0);
	assert!(nav.burst.is_idle());
	let settled = nav.highlight.frame(now).unwrap();
	assert_eq!(settled.rect, (330.0, 130.0, 110.0, 32.0));
	assert_eq!(settled.opacity, 1.0);
}

#[test]
fn standalone_burst_and_highlight() {
	let mut burst = BurstEngine::new(BurstStyle::default(), StdRng::seed_from_u64(4));
	burst.burst((0.0, 0.0), 0.0);
	assert_eq!(burst.drain(2231.0), 13);

	let mut highlight = HighlightBox::new(HighlightStyle::default());
	highlight.place((0.0, 0.0, 100.0, 40.0), 0.0, true);
	assert!(highlight.is_settled(280.0));
}
