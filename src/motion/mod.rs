//! Shared motion primitives: easing, timing, colors, the drawing surface and
//! the browser frame loop.
//!
//! Everything except [`frame_loop`] and the canvas side of [`surface`] is
//! platform independent and runs natively in tests.

pub mod clock;
pub mod easing;
pub mod error;
pub mod frame_loop;
pub mod surface;
pub mod theme;

pub use clock::{FrameClock, PointerState, SmoothedPointer};
pub use error::MotionError;
pub use surface::Surface;
pub use theme::Theme;
