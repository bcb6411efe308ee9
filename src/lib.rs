//! folio-motion: scroll-choreographed particle animations for a portfolio
//! site.
//!
//! The crate mounts as a client-side Leptos app. A drifting ambient field
//! and a swarm of particles that forms the owner's name sit behind the page;
//! scrolling dissolves the name, fades the field and reveals a nav bar whose
//! items answer picks with a particle burst.

use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod config;
pub mod motion;

pub use components::ambient_field::AmbientCanvas;
pub use components::nav::{NavBar, NavItem};
pub use components::particle_text::{GlyphSpec, ParticleTextCanvas};
pub use components::scroll::{IntroGate, use_intro_stage, use_portal_scroll, use_scroll_lock};
pub use config::{SiteConfig, load_site_config};
pub use motion::{MotionError, PointerState, Theme};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("folio-motion: logging initialized");
}

const HINT_LINE: &str = "width: 1px; height: 2rem; background: linear-gradient(to bottom, rgba(200,120,30,0.35), transparent);";
const HINT_TEXT: &str = "font-family: 'Cormorant Garamond', serif; font-size: 10px; font-style: italic; letter-spacing: 5px; text-transform: uppercase; color: rgba(200,120,30,0.3);";

/// Home page: intro surfaces, nav and one section per nav entry.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_site_config();
	let intro = use_intro_stage();
	use_scroll_lock();

	let hint_style = move || {
		format!(
			"position: fixed; bottom: 3rem; left: 50%; transform: translateX(-50%); z-index: 40; display: flex; flex-direction: column; align-items: center; gap: 0.625rem; pointer-events: none; opacity: {:.3};",
			intro.hint.get()
		)
	};

	let veil = config.portal_veil.then(|| {
		let portal = use_portal_scroll();
		let style = move || {
			format!(
				"position: fixed; inset: 0; z-index: 15; pointer-events: none; background: #080604; opacity: {:.3};",
				portal.get().portal_progress
			)
		};
		view! { <div class="portal-veil" style=style /> }
	});

	let gate = config.intro_gate.then(|| {
		view! { <IntroGate on_complete=move |_| info!("folio-motion: intro finished") /> }
	});

	let sections = config
		.nav
		.iter()
		.enumerate()
		.filter_map(|(i, item)| {
			let id = components::nav::sections::section_id(&item.href)?.to_string();
			let number = format!("{:02}", i + 1);
			let title = item.label.clone();
			Some(view! {
				<section id=id class="content-section" style="min-height: 60vh; scroll-margin-top: 6rem;">
					<header class="section-header">
						<span class="section-number">{number}</span>
						<h2 class="section-title">{title}</h2>
					</header>
				</section>
			})
		})
		.collect_view();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text=config.title.clone() />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="folio" style="background: #000000; color: white; overflow-x: hidden;">
			{gate}
			<AmbientCanvas visibility=intro.visibility pointer=intro.pointer />
			<ParticleTextCanvas progress=intro.form pointer=intro.pointer glyph=config.glyph() />

			<div class="scroll-hint" style=hint_style>
				<div style=HINT_LINE />
				<span style=HINT_TEXT>"scroll"</span>
			</div>

			<section class="intro-spacer" style="min-height: 100vh;" aria-hidden="true" />

			<NavBar items=config.nav.clone() brand=config.brand.clone().unwrap_or_default() burst=config.burst.clone() />
			{veil}

			<div class="content" style="position: relative; z-index: 20; background: #080604;">
				<main style="max-width: 80rem; margin: 0 auto; padding: 6rem 1.5rem;">
					{sections}
				</main>
			</div>
		</div>
	}
}
