//! Colors and per-effect style configuration.
//!
//! Every tunable constant of the effects lives in one of the style structs
//! below. `Theme::default()` reproduces the site's amber-on-black look.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Parse `#RRGGBB`. Anything else yields `None`.
	pub fn from_hex(hex: &str) -> Option<Self> {
		let digits = hex.strip_prefix('#')?;
		if digits.len() != 6 {
			return None;
		}
		let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
		Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
	}

	/// CSS `rgba()` with alpha rounded to three decimals.
	pub fn to_css(self) -> String {
		format!(
			"rgba({},{},{},{:.3})",
			self.r,
			self.g,
			self.b,
			self.a.clamp(0.0, 1.0)
		)
	}
}

/// HSLA color, the natural space for the nebula's per-particle hue drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
	pub h: f64,
	/// Saturation in percent.
	pub s: f64,
	/// Lightness in percent.
	pub l: f64,
	pub a: f64,
}

impl Hsla {
	pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
		Self { h, s, l, a }
	}

	pub fn to_css(self) -> String {
		format!(
			"hsla({:.1},{:.1}%,{:.1}%,{:.3})",
			self.h,
			self.s.clamp(0.0, 100.0),
			self.l.clamp(0.0, 100.0),
			self.a.clamp(0.0, 1.0)
		)
	}
}

/// Ambient background field configuration.
#[derive(Clone, Debug)]
pub struct AmbientStyle {
	/// Number of particles per batch.
	pub count: usize,
	/// Shared accent color for lines, glows and dots.
	pub accent: Color,
	/// Velocity components are drawn from `±speed / 2` px per 60fps frame.
	pub speed: f64,
	pub radius_min: f64,
	pub radius_max: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Pairs closer than this are linked.
	pub link_distance: f64,
	pub link_alpha: f64,
	/// Number of distance bands the links are grouped into.
	pub link_bands: usize,
	pub link_width: f64,
	pub glow_alpha: f64,
	/// Glow disc radius as a multiple of the particle radius.
	pub glow_scale: f64,
	/// Peak fractional displacement of the global breath.
	pub breath_amplitude: f64,
	/// Breath angular speed, radians per millisecond.
	pub breath_speed: f64,
	pub pull_radius: f64,
	pub pull_strength: f64,
	/// Mini-jitter displacement range, px.
	pub jitter_strength: (f64, f64),
	/// Mini-jitter impulse duration range, ms.
	pub jitter_duration: (f64, f64),
	/// Delay between impulses, ms.
	pub jitter_delay: (f64, f64),
	/// Spread of the first impulse after a rebuild, ms.
	pub jitter_first: f64,
	/// Visibility below which a frame is skipped entirely.
	pub hidden_below: f64,
}

impl Default for AmbientStyle {
	fn default() -> Self {
		Self {
			count: 60,
			accent: Color::rgb(255, 120, 0),
			speed: 0.6,
			radius_min: 0.8,
			radius_max: 2.4,
			opacity_min: 0.3,
			opacity_max: 0.7,
			link_distance: 130.0,
			link_alpha: 0.20,
			link_bands: 4,
			link_width: 0.5,
			glow_alpha: 0.07,
			glow_scale: 4.0,
			breath_amplitude: 0.012,
			breath_speed: 0.0035,
			pull_radius: 300.0,
			pull_strength: 110.0,
			jitter_strength: (15.0, 40.0),
			jitter_duration: (600.0, 1000.0),
			jitter_delay: (1000.0, 5000.0),
			jitter_first: 3000.0,
			hidden_below: 0.005,
		}
	}
}

/// Text-forming swarm configuration.
#[derive(Clone, Debug)]
pub struct NebulaStyle {
	pub count: usize,
	/// Font size as a fraction of viewport width.
	pub font_scale: f64,
	pub font_max: f64,
	/// Raster stride when scanning the glyph mask.
	pub sample_stride: usize,
	/// Alpha above which a raster cell counts as inside the glyph.
	pub alpha_threshold: u8,
	/// Total spiral sweep in radians.
	pub spiral_sweep: f64,
	/// Outer spiral radius as a fraction of the viewport's short side.
	pub spiral_scale: f64,
	pub spiral_offset: f64,
	pub trail_len: usize,
	pub pull_radius: f64,
	pub pull_strength: f64,
	pub pull_power: f64,
	/// Eased progress after which the pointer starts to attract.
	pub pull_start: f64,
	/// Squared distance under which two particles are meshed.
	pub link_distance_sq: f64,
	/// Per-frame chance of a bright spark once fully formed.
	pub spark_chance: f64,
	pub bloom_inner: Color,
	pub bloom_outer: Color,
	pub mesh: Color,
}

impl Default for NebulaStyle {
	fn default() -> Self {
		Self {
			count: 480,
			font_scale: 0.40,
			font_max: 200.0,
			sample_stride: 3,
			alpha_threshold: 128,
			spiral_sweep: std::f64::consts::PI * 10.0,
			spiral_scale: 0.85,
			spiral_offset: 30.0,
			trail_len: 16,
			pull_radius: 260.0,
			pull_strength: 58.0,
			pull_power: 2.2,
			pull_start: 0.35,
			link_distance_sq: 820.0,
			spark_chance: 0.007,
			bloom_inner: Color::rgb(90, 45, 8),
			bloom_outer: Color::rgb(50, 20, 4),
			mesh: Color::rgb(200, 110, 30),
		}
	}
}

/// Navigation burst configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BurstStyle {
	pub count: usize,
	/// Start and end radius of each trajectory, px.
	pub distances: (f64, f64),
	/// Rotation spread; larger values spin the particles harder.
	pub rotation_range: f64,
	pub animation_ms: f64,
	pub variance_ms: f64,
	/// 1-based indices into `palette`, picked uniformly per particle.
	pub colors: Vec<usize>,
	#[serde(skip)]
	pub palette: Vec<Color>,
	/// Delay between the selection change and the particles appearing.
	pub spawn_delay_ms: f64,
	/// How far into its keyframes each particle starts.
	pub lead_in_ms: f64,
	/// Diameter of a particle at scale 1.
	pub dot_size: f64,
}

impl Default for BurstStyle {
	fn default() -> Self {
		Self {
			count: 13,
			distances: (90.0, 10.0),
			rotation_range: 1000.0,
			animation_ms: 600.0,
			variance_ms: 1000.0,
			colors: vec![1, 2, 3, 1, 2, 3, 1, 4],
			palette: vec![
				Color::rgb(0xFF, 0x45, 0x00),
				Color::rgb(0xFF, 0x80, 0x00),
				Color::rgb(0xFF, 0xAA, 0x33),
				Color::rgb(0xFF, 0x66, 0x00),
			],
			spawn_delay_ms: 30.0,
			lead_in_ms: 350.0,
			dot_size: 20.0,
		}
	}
}

impl BurstStyle {
	/// Resolve a 1-based palette index, falling back to the first entry.
	pub fn palette_color(&self, index: usize) -> Color {
		index
			.checked_sub(1)
			.and_then(|i| self.palette.get(i))
			.or_else(|| self.palette.first())
			.copied()
			.unwrap_or(Color::rgb(0xFF, 0x45, 0x00))
	}
}

/// Sliding highlight behind the active nav label.
#[derive(Clone, Debug)]
pub struct HighlightStyle {
	pub gradient: [Color; 3],
	pub appear_ms: f64,
	/// Scale the highlight grows from when it (re)appears.
	pub appear_from: (f64, f64),
}

impl Default for HighlightStyle {
	fn default() -> Self {
		Self {
			gradient: [
				Color::rgb(0x7A, 0x22, 0x00),
				Color::rgb(0xFF, 0x45, 0x00),
				Color::rgb(0xFF, 0x80, 0x00),
			],
			appear_ms: 280.0,
			appear_from: (0.6, 0.8),
		}
	}
}

/// Intro gate look.
#[derive(Clone, Debug)]
pub struct PeekStyle {
	pub background: Color,
	pub frame_fill: Color,
	pub line: Color,
	pub letter_light: Color,
	pub letter_accent: Color,
	/// The three letters that converge; the middle one rises from below.
	pub letters: [char; 3],
	/// Advance width of each letter as a fraction of the font size.
	pub letter_widths: [f64; 3],
	pub letter_font: String,
	pub hint: String,
	pub hint_font: String,
}

impl Default for PeekStyle {
	fn default() -> Self {
		Self {
			background: Color::rgb(0x0e, 0x0b, 0x07),
			frame_fill: Color::rgb(0x11, 0x0d, 0x08),
			line: Color::rgb(201, 169, 110),
			letter_light: Color::rgb(0xf0, 0xe4, 0xcc),
			letter_accent: Color::rgb(0xd4, 0x78, 0x3a),
			letters: ['R', 'A', 'E'],
			letter_widths: [0.68, 0.74, 0.65],
			letter_font: r#""Uncial Antiqua",serif"#.into(),
			hint: "\u{2726} Scroll to unite \u{2726}".into(),
			hint_font: r#"9px "Cinzel",serif"#.into(),
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug, Default)]
pub struct Theme {
	pub ambient: AmbientStyle,
	pub nebula: NebulaStyle,
	pub burst: BurstStyle,
	pub highlight: HighlightStyle,
	pub peek: PeekStyle,
}
