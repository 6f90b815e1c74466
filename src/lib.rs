//! Animated particle field with proximity lines.
//!
//! Particles drift across a surface, bounce off its edges, and are joined by
//! lines whenever two of them (or a particle and the pointer) come within a
//! proximity radius. Lines fade out over the last 20 units of that radius.

pub mod app;
pub mod color;
pub mod config;
pub mod connection;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod particle;
pub mod scene;
pub mod simulation;
pub mod ticker;

pub use color::Rgba;
pub use config::Options;
pub use error::ConfigError;
pub use particle::{Endpoint, Particle, ParticleId, ParticleSeed, PeerKey};
pub use scene::{Scene, ShapeStore};
pub use simulation::{DriverState, Simulation, Surface};
