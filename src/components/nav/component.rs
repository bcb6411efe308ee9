//! Leptos nav bar: item list, the highlight/burst canvas behind it, and the
//! scroll-linked reveal.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlCanvasElement, HtmlElement, KeyboardEvent, ResizeObserver};

use super::NavItem;
use super::highlight::Rect;
use super::render;
use super::reveal::{NavReveal, RevealState};
use super::sections::{active_section, section_id};
use super::state::NavState;
use crate::components::scroll::ProgressSource;
use crate::components::scroll::passive::scroll_fraction;
use crate::motion::clock::FrameClock;
use crate::motion::error::MotionError;
use crate::motion::frame_loop::{
	Listeners, RafLoop, SurfaceMount, context_2d, fit_canvas, hold_until_cleanup, now_ms, publish,
	viewport_size, window,
};
use crate::motion::theme::{BurstStyle, HighlightStyle};

/// Room around the item list for burst particles to fly into, px.
const BLEED: f64 = 120.0;

const CANVAS_STYLE: &str = "position: absolute; left: -120px; top: -120px; width: calc(100% + 240px); height: calc(100% + 240px); pointer-events: none; z-index: 1;";
const EASE_CSS: &str = "cubic-bezier(0.25, 0.46, 0.45, 0.94)";

/// Box of list item `index` relative to the canvas.
fn item_rect(container: &HtmlElement, index: usize) -> Option<Rect> {
	let item = container
		.query_selector_all("li")
		.ok()?
		.item(index as u32)?
		.dyn_into::<Element>()
		.ok()?;
	let (outer, inner) = (container.get_bounding_client_rect(), item.get_bounding_client_rect());
	Some((
		inner.x() - outer.x() + BLEED,
		inner.y() - outer.y() + BLEED,
		inner.width(),
		inner.height(),
	))
}

fn page_scroll_fraction(window: &web_sys::Window) -> f64 {
	let scroll_y = window.scroll_y().unwrap_or(0.0);
	let scroll_height = window
		.document()
		.and_then(|d| d.document_element())
		.map(|e| e.scroll_height() as f64)
		.unwrap_or(0.0);
	let inner_height = window
		.inner_height()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(0.0);
	scroll_fraction(scroll_y, scroll_height, inner_height)
}

/// Item whose section is currently being read.
fn tracked_section(document: &Document, sections: &[Option<String>]) -> Option<usize> {
	let (_, viewport_h) = viewport_size().ok()?;
	let bounds: Vec<Option<(f64, f64)>> = sections
		.iter()
		.map(|id| {
			let el = document.get_element_by_id(id.as_deref()?)?;
			let r = el.get_bounding_client_rect();
			Some((r.y(), r.y() + r.height()))
		})
		.collect();
	active_section(&bounds, viewport_h)
}

/// Signals the nav shares between its DOM handlers and its frame loop.
#[derive(Clone, Copy)]
struct NavSignals {
	active: RwSignal<usize>,
	/// Bumped on every reader pick; scroll tracking leaves it alone.
	selections: RwSignal<u32>,
	reveal: RwSignal<RevealState>,
}

fn mount(
	container: HtmlElement,
	canvas: HtmlCanvasElement,
	sections: Vec<Option<String>>,
	burst: BurstStyle,
	highlight: HighlightStyle,
	signals: NavSignals,
) -> Result<SurfaceMount, MotionError> {
	let window = window()?;
	let document = window.document().ok_or(MotionError::NoDocument)?;
	let mut ctx = context_2d(&canvas)?;

	let size = Rc::new(Cell::new((0.0, 0.0)));
	let dirty = Rc::new(Cell::new(true));
	let fit = {
		let (canvas, container, size, dirty) = (canvas.clone(), container.clone(), size.clone(), dirty.clone());
		move || {
			let w = container.client_width() as f64 + BLEED * 2.0;
			let h = container.client_height() as f64 + BLEED * 2.0;
			fit_canvas(&canvas, w, h);
			size.set((w, h));
			dirty.set(true);
		}
	};
	fit();
	let on_resize = Closure::<dyn FnMut()>::new(fit);
	let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
	observer.observe(&container);

	let reveal = Rc::new(RefCell::new(NavReveal::new()));
	reveal.borrow_mut().set_scroll_fraction(page_scroll_fraction(&window));

	let mut listeners = Listeners::new();
	let on_scroll = reveal.clone();
	listeners.listen(&window, "scroll", true, move |_: Event| {
		if let Some(window) = web_sys::window() {
			on_scroll
				.borrow_mut()
				.set_scroll_fraction(page_scroll_fraction(&window));
		}
		if let Some(index) = tracked_section(&document, &sections) {
			publish(signals.active, index);
		}
	})?;

	let mut state = NavState::new(highlight, burst, StdRng::from_entropy());
	let mut clock = FrameClock::new(now_ms());
	let frame_loop = RafLoop::start(move |now| {
		let dt = clock.tick(now);
		let now = clock.time;
		let index = signals.active.try_get_untracked().unwrap_or(0);
		let selections = signals.selections.try_get_untracked().unwrap_or(0);
		if dirty.get() || state.needs_layout(index, selections) {
			if let Some(rect) = item_rect(&container, index) {
				state.apply(index, selections, rect, now);
				dirty.set(false);
			}
		}
		let drained = state.step(now);
		if drained > 0 && state.burst.is_idle() {
			debug!("nav: burst finished");
		}
		let (w, h) = size.get();
		render::render(&state, now, w, h, &mut ctx);

		let mut reveal = reveal.borrow_mut();
		reveal.advance(dt);
		publish(signals.reveal, reveal.state());
	})?;

	info!("nav: mounted");
	let mut mount = SurfaceMount::new(Some(frame_loop), listeners);
	mount.observer = Some((observer, on_resize));
	Ok(mount)
}

/// Default nav entries for the portfolio's sections.
pub fn default_items() -> Vec<NavItem> {
	[
		("ABOUT", "#about"),
		("SKILLS", "#skills"),
		("PROJECTS", "#projects"),
		("CONTACT", "#contact"),
	]
	.into_iter()
	.map(|(label, href)| NavItem::new(label, href))
	.collect()
}

/// Fixed top bar that slides in once the page scrolls, with a gradient
/// block behind the active item and a particle burst on every pick.
#[component]
pub fn NavBar(
	#[prop(optional)] items: Option<Vec<NavItem>>,
	#[prop(optional, into)] brand: Option<String>,
	#[prop(optional)] burst: Option<BurstStyle>,
	#[prop(optional)] highlight: Option<HighlightStyle>,
) -> impl IntoView {
	let items = items.unwrap_or_else(default_items);
	let brand = brand.filter(|b| !b.is_empty());
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let signals = NavSignals {
		active: RwSignal::new(0),
		selections: RwSignal::new(0),
		reveal: RwSignal::new(RevealState::default()),
	};
	let sections: Vec<Option<String>> = items
		.iter()
		.map(|item| section_id(&item.href).map(str::to_string))
		.collect();

	Effect::new(move |_| {
		let (Some(container), Some(canvas)) = (container_ref.get(), canvas_ref.get()) else {
			return;
		};
		let burst = burst.clone().unwrap_or_default();
		let highlight = highlight.clone().unwrap_or_default();
		match mount(container.into(), canvas.into(), sections.clone(), burst, highlight, signals) {
			Ok(m) => hold_until_cleanup(m),
			Err(e) => warn!("nav: {e}"),
		}
	});

	let select = move |index: usize| {
		if signals.active.get_untracked() == index {
			return;
		}
		signals.active.set(index);
		signals.selections.update(|n| *n = n.wrapping_add(1));
	};

	let entries = items
		.into_iter()
		.enumerate()
		.map(|(index, item)| {
			let on_key = move |ev: KeyboardEvent| {
				if matches!(ev.key().as_str(), "Enter" | " ") {
					ev.prevent_default();
					select(index);
				}
			};
			view! {
				<li class:active=move || signals.active.get() == index style="position: relative; cursor: pointer;">
					<a
						href=item.href
						on:click=move |_| select(index)
						on:keydown=on_key
						style="outline: none; display: inline-block; padding: 0.4em 0.8em; color: inherit; text-decoration: none;"
					>
						{item.label}
					</a>
				</li>
			}
		})
		.collect_view();

	let bar_style = move || {
		let r = signals.reveal.get();
		format!(
			"position: fixed; top: 0; left: 0; width: 100%; z-index: 50; transform: translateY({:.2}px); opacity: {:.3};",
			r.offset_y, r.opacity
		)
	};
	let brand_style = move || {
		let (opacity, x) = if signals.reveal.get().scrolled { (1, 0) } else { (0, -20) };
		format!(
			"opacity: {opacity}; transform: translateX({x}px); transition: opacity 0.5s {EASE_CSS}, transform 0.5s {EASE_CSS}; white-space: nowrap;"
		)
	};
	let menu_style = move || {
		let (left, shift) = if signals.reveal.get().scrolled { ("50%", "-50%") } else { ("1.5rem", "0%") };
		format!(
			"position: absolute; top: 50%; left: {left}; transform: translate({shift}, -50%); transition: left 0.6s {EASE_CSS}, transform 0.6s {EASE_CSS}; display: flex; align-items: center;"
		)
	};

	view! {
		<nav class="nav-bar" style=bar_style>
			<div
				class="nav-inner"
				style="position: relative; max-width: 80rem; height: 4rem; margin: 0 auto; padding: 0 1.5rem; display: flex; align-items: center; justify-content: space-between;"
			>
				{brand.map(|brand| view! { <span class="nav-brand" style=brand_style>{brand}</span> })}
				<div class="nav-menu" style=menu_style>
					<div node_ref=container_ref class="nav-items" style="position: relative; isolation: isolate;">
						<canvas node_ref=canvas_ref class="nav-fx" style=CANVAS_STYLE />
						<ul style="display: flex; gap: 2rem; list-style: none; margin: 0; padding: 0 1rem; position: relative; z-index: 3;">
							{entries}
						</ul>
					</div>
				</div>
			</div>
		</nav>
	}
}
