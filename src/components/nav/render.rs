use super::state::NavState;
use crate::motion::surface::{ColorStop, Surface};

/// Glow around each burst dot.
const DOT_GLOW: f64 = 8.0;

pub fn render(state: &NavState, now: f64, width: f64, height: f64, surface: &mut impl Surface) {
	surface.clear(width, height);

	if let Some(frame) = state.highlight.frame(now) {
		let gradient = &state.highlight.style().gradient;
		let last = (gradient.len().max(2) - 1) as f64;
		let stops: Vec<ColorStop> = gradient
			.iter()
			.enumerate()
			.map(|(i, c)| (i as f64 / last, c.with_alpha(frame.opacity).to_css()))
			.collect();
		surface.fill_rect_linear(frame.rect, &stops);
	}

	let mut glowing = false;
	for dot in state.burst.frames(now) {
		if dot.radius <= 0.0 || dot.opacity <= 0.0 {
			continue;
		}
		let color = dot.color.with_alpha(dot.opacity).to_css();
		surface.set_glow(DOT_GLOW, &color);
		surface.fill_circle(dot.x, dot.y, dot.radius, &color);
		glowing = true;
	}
	if glowing {
		surface.set_glow(0.0, "");
	}
}
