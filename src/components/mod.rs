//! Animated page surfaces and the scroll choreography that drives them.

pub mod ambient_field;
pub mod nav;
pub mod particle_text;
pub mod scroll;
