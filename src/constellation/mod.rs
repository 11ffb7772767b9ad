//! Constellation background
//!
//! Drifting, twinkling points joined by fading links, with separate
//! day and night looks.

mod data;
mod renderer;

pub use data::{
    node_count, FieldState, Particle, ParticleField, BOUNCE_MARGIN, NODE_COUNT_DARK,
    NODE_COUNT_LIGHT,
};
pub use renderer::{connection_opacity, palette, Rgba, Surface, MAX_CONNECTION_DISTANCE};
