//! Scroll choreography.
//!
//! Three independent ways of turning reader input into progress:
//!
//! - [`PortalScroll`] and [`IntroStage`] observe the page scroll passively
//!   and remap it through piecewise eased curves.
//! - [`ScrollInterceptor`] takes over wheel, touch and keys and accumulates
//!   its own progress until it completes.
//! - [`ScrollLock`] stops the page scrolling back above the intro.
//!
//! The state machines are plain structs; `component` wires them to the
//! browser and publishes their output through signals.

mod component;
pub mod intercept;
pub mod lock;
pub mod passive;
pub mod peek;
pub mod stage;

pub use component::{IntroGate, IntroSignals, use_intro_stage, use_portal_scroll, use_scroll_lock};
pub use intercept::{InputOutcome, ScrollInterceptor};
pub use lock::ScrollLock;
pub use passive::{PortalScroll, PortalState, portal_curve};
pub use peek::PeekLayout;
pub use stage::IntroStage;

/// Something that turns input into a progress value once per frame.
pub trait ProgressSource {
	/// Advance smoothing by one frame of `dt_ms` milliseconds.
	fn advance(&mut self, dt_ms: f64);
	/// Current progress in [0, 1].
	fn progress(&self) -> f64;
}
