//! Layered drawing of the swarm: bloom, trails, mesh, halos, dots, spark.

use super::swarm::NebulaSwarm;
use crate::motion::easing::clamp;
use crate::motion::surface::{ColorStop, Segment, Surface};
use crate::motion::theme::Hsla;

const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Draw the swarm's last simulated frame.
pub fn render(swarm: &NebulaSwarm, surface: &mut impl Surface) {
	let (w, h) = (swarm.width(), swarm.height());
	surface.clear(w, h);
	let nft = swarm.form();
	if nft < 0.008 {
		return;
	}
	let style = &swarm.style;
	let particles = swarm.particles();

	if nft > 0.22 {
		let alpha = (nft - 0.22) / 0.78 * 0.042;
		let stops: [ColorStop; 3] = [
			(0.0, style.bloom_inner.with_alpha(alpha).to_css()),
			(0.5, style.bloom_outer.with_alpha(alpha * 0.4).to_css()),
			(1.0, TRANSPARENT.into()),
		];
		surface.fill_radial_rect((0.0, 0.0, w, h), w / 2.0, h / 2.0, w.min(h) * 0.58, &stops);
	}

	if nft > 0.32 {
		let trail_alpha = (nft - 0.32) / 0.68;
		for p in particles {
			let last = p.trail.len().saturating_sub(1);
			if last == 0 {
				continue;
			}
			// Newest sample sits under the dot and is not drawn
			for (k, &(x, y)) in p.trail.iter().take(last).enumerate() {
				let t = k as f64 / last as f64;
				let color = Hsla::new(p.hue + 5.0, p.saturation, 65.0, t * t * trail_alpha * 0.25);
				surface.fill_circle(x, y, 0.4 + t * 0.35, &color.to_css());
			}
		}
	}

	if nft > 0.28 {
		let mesh_alpha = (nft - 0.28) / 0.72;
		let mut segments: Vec<Segment> = Vec::new();
		for (i, a) in particles.iter().enumerate() {
			for b in &particles[i + 1..] {
				let (dx, dy) = (a.rendered.0 - b.rendered.0, a.rendered.1 - b.rendered.1);
				if dx * dx + dy * dy < style.link_distance_sq {
					segments.push((a.rendered.0, a.rendered.1, b.rendered.0, b.rendered.1));
				}
			}
		}
		surface.stroke_segments(&segments, 0.22, &style.mesh.with_alpha(mesh_alpha * 0.07).to_css());
	}

	if nft > 0.36 {
		let glow = (nft - 0.36) / 0.64;
		for p in particles.iter().filter(|p| p.radius >= 0.7) {
			let twinkle = 0.74 + p.twinkle_phase.sin() * 0.26;
			let alpha = glow * twinkle * 0.052;
			let stops: [ColorStop; 3] = [
				(0.0, Hsla::new(p.hue, p.saturation, p.lightness + 20.0, alpha).to_css()),
				(
					0.5,
					Hsla::new(p.hue - 6.0, p.saturation - 10.0, p.lightness, alpha * 0.26).to_css(),
				),
				(1.0, TRANSPARENT.into()),
			];
			surface.fill_radial_disc(p.rendered.0, p.rendered.1, p.radius * 8.0, &stops);
		}
	}

	for p in particles {
		let twinkle = 0.78 + p.twinkle_phase.sin() * 0.22;
		let pt = clamp(p.pull_magnitude() / 42.0, 0.0, 1.0);
		let opacity = clamp(p.opacity * twinkle * (0.03 + nft * 0.97) + pt * 0.15, 0.0, 0.86);
		let radius = p.radius * (1.0 + nft * 0.35) * (1.0 + pt * 0.45) * (0.65 + twinkle * 0.35);
		let light = (p.lightness + twinkle * 14.0 + pt * 18.0).min(88.0);
		let color = Hsla::new(p.hue, p.saturation, light, opacity);
		surface.fill_circle(p.rendered.0, p.rendered.1, radius, &color.to_css());
	}

	if let Some(p) = swarm.spark().and_then(|i| particles.get(i)) {
		let color = Hsla::new(p.hue + 10.0, 100.0, 92.0, 0.65);
		surface.fill_circle(p.rendered.0, p.rendered.1, 1.3, &color.to_css());
	}
}
