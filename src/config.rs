//! Site configuration embedded in the page as JSON.
//!
//! The host page may carry
//! `<script id="site-config" type="application/json">{...}</script>`.
//! Every field is optional; anything missing keeps its default.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::nav::{NavItem, default_items};
use crate::components::particle_text::GlyphSpec;
use crate::motion::theme::BurstStyle;

/// Id of the script element holding the JSON config.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
	pub title: String,
	/// Word the particle swarm forms.
	pub hero_text: String,
	/// CSS font-family list the word is rasterized with.
	pub font_family: String,
	/// Name shown at the left of the nav bar once scrolled.
	pub brand: Option<String>,
	pub nav: Vec<NavItem>,
	pub burst: BurstStyle,
	/// Hold the page behind the letter-joining intro until the reader
	/// scrolls through it.
	pub intro_gate: bool,
	/// Darken the page as the reader scrolls through the portal transition.
	pub portal_veil: bool,
}

impl Default for SiteConfig {
	fn default() -> Self {
		let glyph = GlyphSpec::default();
		Self {
			title: "Portfolio".into(),
			hero_text: glyph.text,
			font_family: glyph.font_family,
			brand: None,
			nav: default_items(),
			burst: BurstStyle::default(),
			intro_gate: false,
			portal_veil: false,
		}
	}
}

impl SiteConfig {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	pub fn glyph(&self) -> GlyphSpec {
		GlyphSpec {
			text: self.hero_text.clone(),
			font_family: self.font_family.clone(),
		}
	}
}

fn config_text() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Read the page's config, falling back to defaults when it is absent or
/// malformed.
pub fn load_site_config() -> SiteConfig {
	let Some(json) = config_text() else {
		info!("folio-motion: no #{CONFIG_ELEMENT_ID}, using defaults");
		return SiteConfig::default();
	};
	match SiteConfig::from_json(&json) {
		Ok(config) => {
			info!(
				"folio-motion: loaded config with {} nav items",
				config.nav.len()
			);
			config
		}
		Err(e) => {
			warn!("folio-motion: failed to parse site config: {}", e);
			SiteConfig::default()
		}
	}
}
