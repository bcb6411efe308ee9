//! Text-forming particle swarm.
//!
//! Several hundred particles wind in from a spiral and settle into the shape
//! of a word. Once formed they twinkle, leave short trails, mesh with their
//! neighbours and lean toward the pointer.

mod component;
pub mod glyph;
mod render;
pub mod swarm;

pub use component::ParticleTextCanvas;
pub use glyph::{AlphaMask, CanvasRasterizer, GlyphRasterizer, GlyphSpec, sample_points};
pub use render::render;
pub use swarm::{NebulaParticle, NebulaSwarm};
