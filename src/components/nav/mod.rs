//! Navigation micro-interactions.
//!
//! Picking an item slides a gradient block behind it and fires a radial
//! burst of particles from its centre. The bar itself slides in once the
//! page starts scrolling, and the active item follows the section being
//! read.

pub mod burst;
mod component;
pub mod highlight;
mod render;
pub mod reveal;
pub mod sections;
pub mod state;

use serde::Deserialize;

pub use burst::{BurstEngine, BurstFrame, BurstParticle};
pub use component::{NavBar, default_items};
pub use highlight::{HighlightBox, HighlightFrame};
pub use render::render;
pub use reveal::{NavReveal, RevealState, Spring};
pub use state::NavState;

/// One entry of the nav list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NavItem {
	pub label: String,
	/// Usually a `#section` link; other links are not tracked on scroll.
	pub href: String,
}

impl NavItem {
	pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			href: href.into(),
		}
	}
}
