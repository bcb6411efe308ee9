//! Glyph rasterisation and point sampling.
//!
//! The swarm only needs an alpha mask of the rendered text; how that mask
//! is produced is behind [`GlyphRasterizer`] so sampling can be exercised
//! without a browser.

use rand::Rng;
use rand::seq::SliceRandom;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::motion::error::MotionError;
use crate::motion::frame_loop::{context_2d, fit_canvas, window};
use crate::motion::surface::Surface;

/// Per-pixel coverage of rasterised text, row major.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaMask {
	pub width: usize,
	pub height: usize,
	alpha: Vec<u8>,
}

impl AlphaMask {
	pub fn new(width: usize, height: usize, alpha: Vec<u8>) -> Self {
		Self { width, height, alpha }
	}

	/// Keep the alpha channel of RGBA pixel data.
	pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Self {
		let alpha = rgba.chunks_exact(4).map(|px| px[3]).collect();
		Self::new(width, height, alpha)
	}

	/// Alpha at `(x, y)`; zero outside the mask.
	pub fn alpha_at(&self, x: usize, y: usize) -> u8 {
		if x >= self.width {
			return 0;
		}
		self.alpha.get(y * self.width + x).copied().unwrap_or(0)
	}
}

/// Text and font the swarm forms.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphSpec {
	pub text: String,
	/// CSS font-family list.
	pub font_family: String,
}

impl Default for GlyphSpec {
	fn default() -> Self {
		Self {
			text: "Rae".into(),
			font_family: r#""Cormorant Garamond",Garamond,"Times New Roman",serif"#.into(),
		}
	}
}

impl GlyphSpec {
	/// Bold CSS font shorthand at `size` px.
	pub fn font(&self, size: f64) -> String {
		format!("bold {size}px {}", self.font_family)
	}
}

/// Renders text centred on a `width × height` raster.
pub trait GlyphRasterizer {
	fn rasterize(
		&self,
		text: &str,
		font: &str,
		width: usize,
		height: usize,
	) -> Result<AlphaMask, MotionError>;
}

/// Rasterises through an offscreen canvas.
pub struct CanvasRasterizer;

impl GlyphRasterizer for CanvasRasterizer {
	fn rasterize(
		&self,
		text: &str,
		font: &str,
		width: usize,
		height: usize,
	) -> Result<AlphaMask, MotionError> {
		let document = window()?.document().ok_or(MotionError::NoDocument)?;
		let canvas: HtmlCanvasElement = document
			.create_element("canvas")?
			.dyn_into()
			.map_err(|_| MotionError::NoContext)?;
		let (w, h) = (width as f64, height as f64);
		fit_canvas(&canvas, w, h);
		let mut ctx = context_2d(&canvas)?;
		Surface::fill_text(&mut ctx, text, w / 2.0, h / 2.0, font, "#fff");
		let image = ctx.get_image_data(0.0, 0.0, w, h)?;
		Ok(AlphaMask::from_rgba(width, height, &image.data().0))
	}
}

/// Scan `mask` every `stride` cells for alpha above `threshold`, shuffle,
/// then truncate or pad by random duplication to exactly `count` points.
///
/// A mask with no opaque cells yields an empty list.
pub fn sample_points<R: Rng>(
	mask: &AlphaMask,
	stride: usize,
	threshold: u8,
	count: usize,
	rng: &mut R,
) -> Vec<(f64, f64)> {
	let stride = stride.max(1);
	let mut points: Vec<(f64, f64)> = (0..mask.height)
		.step_by(stride)
		.flat_map(|y| (0..mask.width).step_by(stride).map(move |x| (x, y)))
		.filter(|&(x, y)| mask.alpha_at(x, y) > threshold)
		.map(|(x, y)| (x as f64, y as f64))
		.collect();
	if points.is_empty() {
		return points;
	}
	points.shuffle(rng);
	points.truncate(count);
	while points.len() < count {
		let pick = points[rng.gen_range(0..points.len())];
		points.push(pick);
	}
	points
}
