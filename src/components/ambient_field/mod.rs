//! Ambient background particle field.
//!
//! A sparse set of particles drifts and bounces inside the viewport, jumps
//! occasionally, breathes about the centre and leans toward the pointer.
//! Nearby particles are linked by faint lines.
//!
//! # Example
//!
//! ```ignore
//! view! { <AmbientCanvas visibility=visibility pointer=pointer /> }
//! ```

mod component;
pub mod field;
mod render;

pub use component::AmbientCanvas;
pub use field::{AmbientField, AmbientParticle};
pub use render::render;
