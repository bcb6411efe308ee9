//! Intro gate visual: three letters peeking in from the viewport edges
//! converge into a framed word as interceptor progress goes from 0 to 1.

use std::f64::consts::SQRT_2;

use crate::motion::easing::{clamp, lerp};
use crate::motion::surface::{ColorStop, Segment, Surface};
use crate::motion::theme::PeekStyle;

/// Space between the word and the frame, px.
const PAD: f64 = 48.0;
/// Inset of the side letters from the viewport edge while peeking, px.
const EDGE_INSET: f64 = 72.0;
/// How far the middle letter sits below the centre while peeking, px.
const BOTTOM_INSET: f64 = 52.0;
const DIAMOND_SIZE: f64 = 16.0;
const AMBIENT_RADIUS: f64 = 250.0;

/// Geometry and opacities for one progress value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeekLayout {
	pub progress: f64,
	pub font_size: f64,
	pub word_width: f64,
	pub frame_w: f64,
	pub frame_h: f64,
	pub grid_cell: f64,
	pub border_alpha: f64,
	pub grid_alpha: f64,
	/// Horizontal offset of the first letter from the centre.
	pub first_x: f64,
	/// Vertical offset of the middle letter from the centre.
	pub middle_y: f64,
	/// Horizontal offset of the last letter from the centre.
	pub last_x: f64,
	pub glow_blur: f64,
	pub glow_alpha_outer: f64,
	pub glow_alpha_middle: f64,
	pub ambient_alpha: f64,
	pub diamond_opacity: f64,
	pub hint_opacity: f64,
}

impl PeekLayout {
	pub fn compute(progress: f64, vw: f64, vh: f64, widths: [f64; 3]) -> Self {
		let p = clamp(progress, 0.0, 1.0);
		let peek_size = (vw * 0.44).min(540.0);
		let joined_size = (vw * 0.22).min(240.0);
		let fs = lerp(peek_size, joined_size, p);

		let [w_first, w_middle, w_last] = widths.map(|w| w * fs);
		let word_width = w_first + w_middle + w_last;

		let first_off = -(vw / 2.0) + EDGE_INSET - w_first / 2.0;
		let first_on = -(word_width / 2.0) + w_first / 2.0;
		let last_off = (vw / 2.0) - EDGE_INSET + w_last / 2.0;
		let last_on = (word_width / 2.0) - w_last / 2.0;
		let middle_off = (vh / 2.0) - BOTTOM_INSET + fs / 2.0;

		Self {
			progress: p,
			font_size: fs,
			word_width,
			frame_w: lerp(vw, word_width + PAD * 2.0, p),
			frame_h: lerp(vh, fs * 1.1 + PAD * 2.0, p),
			grid_cell: lerp(32.0, 18.0, p),
			border_alpha: lerp(0.06, 0.28, p),
			grid_alpha: lerp(0.02, 0.055, p),
			first_x: lerp(first_off, first_on, p),
			middle_y: lerp(middle_off, 0.0, p),
			last_x: lerp(last_off, last_on, p),
			glow_blur: lerp(110.0, 28.0, p),
			glow_alpha_outer: lerp(0.50, 0.20, p),
			glow_alpha_middle: lerp(0.60, 0.28, p),
			ambient_alpha: lerp(0.0, 0.22, p),
			diamond_opacity: if p > 0.12 {
				clamp((p - 0.12) / 0.1, 0.0, 1.0)
			} else {
				0.0
			},
			hint_opacity: clamp(1.0 - p * 6.0, 0.0, 1.0),
		}
	}
}

/// Grid lines of a `cell`-spaced lattice anchored at the rect's top-left.
fn grid(rect: (f64, f64, f64, f64), cell: f64) -> Vec<Segment> {
	let (x, y, w, h) = rect;
	let mut lines = Vec::new();
	if cell <= 0.0 {
		return lines;
	}
	let mut gx = x;
	while gx < x + w {
		lines.push((gx, y, gx, y + h));
		gx += cell;
	}
	let mut gy = y;
	while gy < y + h {
		lines.push((x, gy, x + w, gy));
		gy += cell;
	}
	lines
}

pub fn render(layout: &PeekLayout, style: &PeekStyle, vw: f64, vh: f64, surface: &mut impl Surface) {
	let (cx, cy) = (vw / 2.0, vh / 2.0);
	surface.clear(vw, vh);
	surface.fill_rect((0.0, 0.0, vw, vh), &style.background.to_css());

	let frame = (
		cx - layout.frame_w / 2.0,
		cy - layout.frame_h / 2.0,
		layout.frame_w,
		layout.frame_h,
	);
	surface.fill_rect(frame, &style.frame_fill.to_css());
	surface.stroke_segments(&grid(frame, layout.grid_cell), 1.0, &style.line.with_alpha(layout.grid_alpha).to_css());
	surface.stroke_rect(frame, 1.0, &style.line.with_alpha(layout.border_alpha).to_css());

	if layout.diamond_opacity > 0.0 {
		let (dx, dy) = (cx, frame.1 - 9.0 + DIAMOND_SIZE / 2.0);
		let r = DIAMOND_SIZE / 2.0 * SQRT_2;
		let border = style
			.line
			.with_alpha((layout.border_alpha * 1.5).min(0.45) * layout.diamond_opacity)
			.to_css();
		surface.fill_polygon(
			&[(dx, dy - r), (dx + r, dy), (dx, dy + r), (dx - r, dy)],
			&style.frame_fill.with_alpha(layout.diamond_opacity).to_css(),
			Some((border.as_str(), 1.0)),
		);
	}

	if layout.ambient_alpha > 0.0 {
		let stops: [ColorStop; 2] = [
			(0.0, style.letter_accent.with_alpha(layout.ambient_alpha).to_css()),
			(0.65, style.letter_accent.with_alpha(0.0).to_css()),
		];
		surface.fill_radial_disc(cx, cy, AMBIENT_RADIUS, &stops);
	}

	let font = format!("{}px {}", layout.font_size, style.letter_font);
	// Glyph boxes sit 2% above centre
	let lift = layout.font_size * 0.02;
	let letters = [
		(style.letters[0], cx + layout.first_x, cy - lift, style.letter_light, layout.glow_alpha_outer),
		(style.letters[1], cx, cy + layout.middle_y - lift, style.letter_accent, layout.glow_alpha_middle),
		(style.letters[2], cx + layout.last_x, cy - lift, style.letter_light, layout.glow_alpha_outer),
	];
	for (letter, x, y, color, glow) in letters {
		surface.set_glow(layout.glow_blur, &color.with_alpha(glow).to_css());
		surface.fill_text(&letter.to_string(), x, y, &font, &color.to_css());
	}
	surface.set_glow(0.0, "");

	if layout.hint_opacity > 0.0 {
		let hint_y = vh - 36.0 - 36.0 - 10.0;
		surface.fill_text(
			&style.hint,
			cx,
			hint_y,
			&style.hint_font,
			&style.line.with_alpha(0.5 * layout.hint_opacity).to_css(),
		);
		surface.stroke_segments(
			&[(cx, hint_y + 10.0, cx, hint_y + 46.0)],
			1.0,
			&style.line.with_alpha(0.4 * layout.hint_opacity).to_css(),
		);
	}
}
