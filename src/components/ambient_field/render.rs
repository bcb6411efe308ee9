//! Draws the ambient field: links, then glows, then dots.

use super::field::AmbientField;
use crate::motion::easing::clamp;
use crate::motion::surface::{Segment, Surface};

/// Draw one frame of `field` at the given visibility.
pub fn render(field: &AmbientField, visibility: f64, surface: &mut impl Surface) {
	surface.clear(field.width(), field.height());
	let style = &field.style;
	if visibility < style.hidden_below {
		return;
	}
	let particles = field.particles();

	// Links, batched by distance band so each band is one stroke
	let line_alpha = style.link_alpha * visibility;
	let bands = style.link_bands.max(1);
	if line_alpha > 0.004 {
		let max_sq = style.link_distance * style.link_distance;
		let mut batches: Vec<Vec<Segment>> = vec![Vec::new(); bands];
		for (i, a) in particles.iter().enumerate() {
			for b in &particles[i + 1..] {
				let (dx, dy) = (a.rendered.0 - b.rendered.0, a.rendered.1 - b.rendered.1);
				let d_sq = dx * dx + dy * dy;
				if d_sq >= max_sq {
					continue;
				}
				let t = 1.0 - d_sq.sqrt() / style.link_distance;
				let band = ((t * bands as f64).floor() as usize).min(bands - 1);
				batches[band].push((a.rendered.0, a.rendered.1, b.rendered.0, b.rendered.1));
			}
		}
		for (band, segments) in batches.iter().enumerate() {
			let alpha = line_alpha * (band + 1) as f64 / bands as f64;
			surface.stroke_segments(segments, style.link_width, &style.accent.with_alpha(alpha).to_css());
		}
	}

	if visibility > 0.04 {
		let glow = style.accent.with_alpha(style.glow_alpha * visibility).to_css();
		for p in particles {
			surface.fill_circle(p.rendered.0, p.rendered.1, p.radius * style.glow_scale, &glow);
		}
	}

	for p in particles {
		let pt = clamp(p.pull_magnitude() / style.pull_strength, 0.0, 1.0);
		let opacity = clamp((p.base_opacity + pt * 0.3) * visibility, 0.0, 1.0);
		let radius = p.radius * 1.3 * (1.0 + pt * 0.7);
		surface.fill_circle(
			p.rendered.0,
			p.rendered.1,
			radius,
			&style.accent.with_alpha(opacity).to_css(),
		);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::ambient_field::field::AmbientParticle;
	use crate::motion::surface::recording::{DrawOp, Recorder};
	use crate::motion::theme::AmbientStyle;

	fn pair(gap: f64) -> AmbientField {
		let particles = vec![
			AmbientParticle::fixed(100.0, 100.0, 1.0, 0.5),
			AmbientParticle::fixed(100.0 + gap, 100.0, 1.0, 0.5),
		];
		AmbientField::from_particles(AmbientStyle::default(), 400.0, 400.0, particles, StdRng::seed_from_u64(0))
	}

	#[test]
	fn close_pairs_are_linked_in_the_nearest_band() {
		let mut surface = Recorder::default();
		render(&pair(10.0), 1.0, &mut surface);
		let batches: Vec<_> = surface
			.ops
			.iter()
			.filter_map(|op| match op {
				DrawOp::Segments { count, stroke } => Some((*count, stroke.clone())),
				_ => None,
			})
			.collect();
		assert_eq!(batches.len(), 4);
		assert_eq!(batches[3], (1, "rgba(255,120,0,0.200)".to_string()));
		assert!(batches[..3].iter().all(|(n, _)| *n == 0));
	}

	#[test]
	fn distant_pairs_are_not_linked() {
		let mut surface = Recorder::default();
		render(&pair(200.0), 1.0, &mut surface);
		assert!(surface.ops.iter().all(|op| !matches!(op, DrawOp::Segments { count, .. } if *count > 0)));
	}

	#[test]
	fn faint_visibility_drops_glow_and_links() {
		let mut surface = Recorder::default();
		render(&pair(10.0), 0.015, &mut surface);
		assert_eq!(surface.segment_batches(), 0);
		// dots only
		assert_eq!(surface.circles(), 2);
	}

	#[test]
	fn hidden_frame_only_clears() {
		let mut surface = Recorder::default();
		render(&pair(10.0), 0.001, &mut surface);
		assert_eq!(surface.ops, vec![DrawOp::Clear]);
	}

	#[test]
	fn full_frame_draws_glow_and_dot_per_particle() {
		let mut surface = Recorder::default();
		render(&pair(10.0), 1.0, &mut surface);
		assert_eq!(surface.ops[0], DrawOp::Clear);
		assert_eq!(surface.circles(), 4);
	}
}
