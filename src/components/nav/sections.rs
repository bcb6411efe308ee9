//! Which page section the nav marks active as the reader scrolls.

/// Band of the viewport, as fractions of its height, a section has to
/// overlap to count as being read.
pub const READING_BAND: (f64, f64) = (0.2, 0.6);

/// Section id an in-page `href` points at.
pub fn section_id(href: &str) -> Option<&str> {
	href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Index of the section that overlaps the reading band the most, if any.
///
/// `bounds` holds each section's `(top, bottom)` in viewport coordinates,
/// `None` for sections that are not on the page. Ties go to the earlier
/// section.
pub fn active_section(bounds: &[Option<(f64, f64)>], viewport_h: f64) -> Option<usize> {
	let (lo, hi) = (READING_BAND.0 * viewport_h, READING_BAND.1 * viewport_h);
	let mut best: Option<(usize, f64)> = None;
	for (i, &(top, bottom)) in bounds
		.iter()
		.enumerate()
		.filter_map(|(i, b)| b.as_ref().map(|b| (i, b)))
	{
		let overlap = bottom.min(hi) - top.max(lo);
		if overlap > 0.0 && best.is_none_or(|(_, o)| overlap > o) {
			best = Some((i, overlap));
		}
	}
	best.map(|(i, _)| i)
}
