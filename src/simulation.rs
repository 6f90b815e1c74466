//! The per-frame driver.
//!
//! A [`Simulation`] owns the particles in a fixed order, the cursor, and the
//! scene every shape lives in. Each [`Simulation::tick`] makes one pass over
//! the particles in that order: move, bounce, reposition the circle, then
//! update connections. The order decides which particle of a pair owns the
//! line when both become eligible in the same tick.

use crate::color::Rgba;
use crate::config::Options;
use crate::cursor::Cursor;
use crate::error::ConfigError;
use crate::particle::{Particle, ParticleId, ParticleSeed};
use crate::scene::Scene;
use nannou::prelude::*;
use rand::Rng;
use tracing::{debug, info};

/// Dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ConfigError::EmptySurface { width, height });
        }
        Ok(Self { width, height })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Built, but no tick has run yet.
    Inactive,
    Running,
}

pub struct Simulation<S: Scene> {
    state: DriverState,
    surface: Surface,
    particles: Vec<Particle>,
    cursor: Cursor,
    scene: S,
    ticks: u64,
}

impl<S: Scene> Simulation<S> {
    /// Spawns `options.particles.count` random particles on a surface of the
    /// configured size.
    pub fn new<R: Rng + ?Sized>(options: &Options, scene: S, rng: &mut R) -> Result<Self, ConfigError> {
        options.validate()?;
        let surface = Surface::new(options.surface.width, options.surface.height)?;
        let seeds = (0..options.particles.count)
            .map(|_| ParticleSeed::random(&options.particles, surface, rng))
            .collect();
        let simulation = Self::from_seeds(surface, seeds, options.cursor_color(), scene)?;
        info!(
            particles = simulation.particles.len(),
            width = surface.width,
            height = surface.height,
            "simulation ready"
        );
        Ok(simulation)
    }

    /// Builds a simulation from explicit seeds, kept in the given order.
    pub fn from_seeds(
        surface: Surface,
        seeds: Vec<ParticleSeed>,
        cursor_color: Rgba,
        mut scene: S,
    ) -> Result<Self, ConfigError> {
        for seed in &seeds {
            if !(seed.proximity.is_finite() && seed.proximity > 0.0) {
                return Err(ConfigError::NotPositive {
                    name: "particles.proximity",
                    value: seed.proximity,
                });
            }
            if seed.max_connections == Some(0) {
                return Err(ConfigError::ZeroMaxConnections);
            }
        }
        let particles = seeds
            .into_iter()
            .enumerate()
            .map(|(index, seed)| Particle::new(ParticleId(index), seed, &mut scene))
            .collect();
        Ok(Self {
            state: DriverState::Inactive,
            surface,
            particles,
            cursor: Cursor::new(cursor_color),
            scene,
            ticks: 0,
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Total connections across all particles.
    pub fn connection_count(&self) -> usize {
        self.particles.iter().map(Particle::connection_count).sum()
    }

    pub fn tick(&mut self) {
        if self.state == DriverState::Inactive {
            debug!("simulation running");
            self.state = DriverState::Running;
        }
        for index in 0..self.particles.len() {
            let (before, rest) = self.particles.split_at_mut(index);
            let Some((particle, after)) = rest.split_first_mut() else {
                continue;
            };
            particle.advance();
            particle.reflect_at_bounds(self.surface);
            particle.place(&mut self.scene);
            particle.update_connections(
                before.iter().chain(after.iter()),
                &self.cursor,
                &mut self.scene,
            );
        }
        self.ticks += 1;
    }

    pub fn pointer_entered(&mut self) {
        debug!("pointer entered");
        self.cursor.enter();
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.cursor.move_to(position);
    }

    /// Hides the cursor and drops every line reaching it right away rather
    /// than on the next tick.
    pub fn pointer_left(&mut self) {
        debug!("pointer left");
        self.cursor.leave();
        for particle in &mut self.particles {
            particle.disconnect_cursor(&mut self.scene);
        }
    }

    /// Adopts new surface dimensions. Particles stay where they are.
    pub fn resize(&mut self, surface: Surface) {
        if surface != self.surface {
            info!(width = surface.width, height = surface.height, "surface resized");
            self.surface = surface;
        }
    }

    /// Releases every line and circle and hands back the emptied scene.
    pub fn stop(self) -> S {
        let Self {
            particles,
            mut scene,
            ticks,
            ..
        } = self;
        for particle in particles {
            particle.release(&mut scene);
        }
        info!(ticks, "simulation stopped");
        scene
    }
}
