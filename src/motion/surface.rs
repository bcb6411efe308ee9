//! The drawing capability every renderer targets.
//!
//! Renderers never touch the browser directly; they draw through [`Surface`],
//! which is implemented for the 2D canvas context. Tests substitute a
//! recorder to assert what a frame drew.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

/// A line segment `(x1, y1, x2, y2)`.
pub type Segment = (f64, f64, f64, f64);

/// A gradient stop: offset in [0, 1] and a CSS color.
pub type ColorStop = (f64, String);

/// Immediate-mode 2D drawing target.
pub trait Surface {
	fn clear(&mut self, width: f64, height: f64);
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: &str);
	/// Stroke every segment as one path.
	fn stroke_segments(&mut self, segments: &[Segment], width: f64, stroke: &str);
	/// Fill a disc with a radial gradient centred on it.
	fn fill_radial_disc(&mut self, x: f64, y: f64, radius: f64, stops: &[ColorStop]);
	/// Fill a rectangle with a radial gradient centred at `(cx, cy)`.
	fn fill_radial_rect(
		&mut self,
		rect: (f64, f64, f64, f64),
		cx: f64,
		cy: f64,
		radius: f64,
		stops: &[ColorStop],
	);
	fn fill_rect(&mut self, rect: (f64, f64, f64, f64), fill: &str);
	/// Fill a rectangle with a left-to-right linear gradient.
	fn fill_rect_linear(&mut self, rect: (f64, f64, f64, f64), stops: &[ColorStop]);
	fn stroke_rect(&mut self, rect: (f64, f64, f64, f64), width: f64, stroke: &str);
	fn fill_polygon(&mut self, points: &[(f64, f64)], fill: &str, stroke: Option<(&str, f64)>);
	/// Centered text.
	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, fill: &str);
	/// Soft glow applied to subsequent fills; `blur == 0` disables it.
	fn set_glow(&mut self, blur: f64, color: &str);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: &str) {
		if radius <= 0.0 {
			return;
		}
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, TAU);
		self.set_fill_style_str(fill);
		self.fill();
	}

	fn stroke_segments(&mut self, segments: &[Segment], width: f64, stroke: &str) {
		if segments.is_empty() {
			return;
		}
		let _ = self.set_line_dash(&js_sys::Array::new());
		self.begin_path();
		for &(x1, y1, x2, y2) in segments {
			self.move_to(x1, y1);
			self.line_to(x2, y2);
		}
		self.set_line_width(width);
		self.set_stroke_style_str(stroke);
		self.stroke();
	}

	fn fill_radial_disc(&mut self, x: f64, y: f64, radius: f64, stops: &[ColorStop]) {
		if radius <= 0.0 {
			return;
		}
		let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			return;
		};
		for (offset, color) in stops {
			let _ = gradient.add_color_stop(*offset as f32, color);
		}
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, TAU);
		self.fill();
	}

	fn fill_radial_rect(
		&mut self,
		rect: (f64, f64, f64, f64),
		cx: f64,
		cy: f64,
		radius: f64,
		stops: &[ColorStop],
	) {
		let Ok(gradient) = self.create_radial_gradient(cx, cy, 0.0, cx, cy, radius.max(1.0)) else {
			return;
		};
		for (offset, color) in stops {
			let _ = gradient.add_color_stop(*offset as f32, color);
		}
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		CanvasRenderingContext2d::fill_rect(self, rect.0, rect.1, rect.2, rect.3);
	}

	fn fill_rect(&mut self, rect: (f64, f64, f64, f64), fill: &str) {
		self.set_fill_style_str(fill);
		CanvasRenderingContext2d::fill_rect(self, rect.0, rect.1, rect.2, rect.3);
	}

	fn fill_rect_linear(&mut self, rect: (f64, f64, f64, f64), stops: &[ColorStop]) {
		let (x, y, w, h) = rect;
		let gradient = self.create_linear_gradient(x, y, x + w, y);
		for (offset, color) in stops {
			let _ = gradient.add_color_stop(*offset as f32, color);
		}
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
	}

	fn stroke_rect(&mut self, rect: (f64, f64, f64, f64), width: f64, stroke: &str) {
		let _ = self.set_line_dash(&js_sys::Array::new());
		self.set_line_width(width);
		self.set_stroke_style_str(stroke);
		CanvasRenderingContext2d::stroke_rect(self, rect.0, rect.1, rect.2, rect.3);
	}

	fn fill_polygon(&mut self, points: &[(f64, f64)], fill: &str, stroke: Option<(&str, f64)>) {
		let Some((&(x0, y0), rest)) = points.split_first() else {
			return;
		};
		self.begin_path();
		self.move_to(x0, y0);
		for &(x, y) in rest {
			self.line_to(x, y);
		}
		self.close_path();
		self.set_fill_style_str(fill);
		self.fill();
		if let Some((color, width)) = stroke {
			self.set_line_width(width);
			self.set_stroke_style_str(color);
			self.stroke();
		}
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, fill: &str) {
		self.set_font(font);
		self.set_text_align("center");
		self.set_text_baseline("middle");
		self.set_fill_style_str(fill);
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}

	fn set_glow(&mut self, blur: f64, color: &str) {
		self.set_shadow_blur(blur.max(0.0));
		self.set_shadow_color(if blur > 0.0 { color } else { "rgba(0,0,0,0)" });
	}
}

#[cfg(test)]
pub(crate) mod recording {
	//! In-memory surface for renderer tests.

	use super::{ColorStop, Segment, Surface};

	#[derive(Clone, Debug, PartialEq)]
	pub enum DrawOp {
		Clear,
		Circle { x: f64, y: f64, radius: f64, fill: String },
		Segments { count: usize, stroke: String },
		RadialDisc { x: f64, y: f64, radius: f64 },
		RadialRect,
		Rect { fill: String },
		LinearRect { rect: (f64, f64, f64, f64) },
		StrokeRect,
		Polygon,
		Text { text: String, x: f64, y: f64 },
		Glow { blur: f64 },
	}

	#[derive(Default)]
	pub struct Recorder {
		pub ops: Vec<DrawOp>,
	}

	impl Recorder {
		pub fn circles(&self) -> usize {
			self.ops
				.iter()
				.filter(|op| matches!(op, DrawOp::Circle { .. }))
				.count()
		}

		pub fn segment_batches(&self) -> usize {
			self.ops
				.iter()
				.filter(|op| matches!(op, DrawOp::Segments { .. }))
				.count()
		}
	}

	impl Surface for Recorder {
		fn clear(&mut self, _width: f64, _height: f64) {
			self.ops.push(DrawOp::Clear);
		}

		fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: &str) {
			self.ops.push(DrawOp::Circle {
				x,
				y,
				radius,
				fill: fill.to_string(),
			});
		}

		fn stroke_segments(&mut self, segments: &[Segment], _width: f64, stroke: &str) {
			self.ops.push(DrawOp::Segments {
				count: segments.len(),
				stroke: stroke.to_string(),
			});
		}

		fn fill_radial_disc(&mut self, x: f64, y: f64, radius: f64, _stops: &[ColorStop]) {
			self.ops.push(DrawOp::RadialDisc { x, y, radius });
		}

		fn fill_radial_rect(
			&mut self,
			_rect: (f64, f64, f64, f64),
			_cx: f64,
			_cy: f64,
			_radius: f64,
			_stops: &[ColorStop],
		) {
			self.ops.push(DrawOp::RadialRect);
		}

		fn fill_rect(&mut self, _rect: (f64, f64, f64, f64), fill: &str) {
			self.ops.push(DrawOp::Rect {
				fill: fill.to_string(),
			});
		}

		fn fill_rect_linear(&mut self, rect: (f64, f64, f64, f64), _stops: &[ColorStop]) {
			self.ops.push(DrawOp::LinearRect { rect });
		}

		fn stroke_rect(&mut self, _rect: (f64, f64, f64, f64), _width: f64, _stroke: &str) {
			self.ops.push(DrawOp::StrokeRect);
		}

		fn fill_polygon(&mut self, _points: &[(f64, f64)], _fill: &str, _stroke: Option<(&str, f64)>) {
			self.ops.push(DrawOp::Polygon);
		}

		fn fill_text(&mut self, text: &str, x: f64, y: f64, _font: &str, _fill: &str) {
			self.ops.push(DrawOp::Text {
				text: text.to_string(),
				x,
				y,
			});
		}

		fn set_glow(&mut self, blur: f64, _color: &str) {
			self.ops.push(DrawOp::Glow { blur });
		}
	}
}
