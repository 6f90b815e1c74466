use crate::color::Rgba;
use crate::config::ParticleOptions;
use crate::connection::Connection;
use crate::cursor::Cursor;
use crate::geometry;
use crate::scene::{Scene, ShapeId};
use crate::simulation::Surface;
use nannou::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::trace;

/// Distance from an edge at which a particle bounces.
pub const EDGE_MARGIN: f32 = 5.0;
/// How far inside the far edge an escaped particle is put back.
pub const ESCAPE_RESET: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub usize);

/// Key a connection is stored under in its owner's map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeerKey {
    Particle(ParticleId),
    Cursor,
}

/// Anything a connection line can be attached to.
pub trait Endpoint {
    fn position(&self) -> Vec2;
    fn color(&self) -> Rgba;
}

/// Copy of an endpoint's position and colour at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub position: Vec2,
    pub color: Rgba,
}

impl Endpoint for Anchor {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn color(&self) -> Rgba {
        self.color
    }
}

/// Initial state of a particle.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSeed {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Rgba,
    pub radius: f32,
    pub proximity: f32,
    pub max_connections: Option<usize>,
}

impl ParticleSeed {
    /// Stationary seed with default styling.
    pub fn at(x: f32, y: f32, proximity: f32) -> Self {
        Self {
            position: vec2(x, y),
            velocity: Vec2::ZERO,
            color: Rgba::BLACK,
            radius: 1.0,
            proximity,
            max_connections: None,
        }
    }

    pub fn with_velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = vec2(x, y);
        self
    }

    pub fn with_max_connections(mut self, max: usize) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Random seed on `surface` drawn from the configured ranges.
    pub fn random<R: Rng + ?Sized>(options: &ParticleOptions, surface: Surface, rng: &mut R) -> Self {
        let color = options
            .color
            .colors()
            .choose(rng)
            .copied()
            .unwrap_or(Rgba::BLACK);
        Self {
            position: vec2(
                random_position(surface.width, rng),
                random_position(surface.height, rng),
            ),
            velocity: vec2(
                random_speed(options.speed.min, options.speed.max, rng),
                random_speed(options.speed.min, options.speed.max, rng),
            ),
            color,
            radius: random_size(options.size.min, options.size.max, rng),
            proximity: options.proximity,
            max_connections: options.max_connections,
        }
    }
}

fn random_position<R: Rng + ?Sized>(extent: f32, rng: &mut R) -> f32 {
    (rng.gen::<f32>() * extent).floor()
}

/// `(random * max - min)` with a random sign.
fn random_speed<R: Rng + ?Sized>(min: f32, max: f32, rng: &mut R) -> f32 {
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    (rng.gen::<f32>() * max - min) * sign
}

/// Uniform in `(min, max]`.
fn random_size<R: Rng + ?Sized>(min: f32, max: f32, rng: &mut R) -> f32 {
    rng.gen::<f32>() * (min - max) + max
}

#[derive(Debug)]
pub struct Particle {
    id: ParticleId,
    position: Vec2,
    velocity: Vec2,
    color: Rgba,
    radius: f32,
    proximity: f32,
    max_connections: Option<usize>,
    circle: ShapeId,
    connections: BTreeMap<PeerKey, Connection>,
}

impl Particle {
    pub fn new<S: Scene>(id: ParticleId, seed: ParticleSeed, scene: &mut S) -> Self {
        let circle = scene.add_circle(seed.position, seed.radius, seed.color);
        Self {
            id,
            position: seed.position,
            velocity: seed.velocity,
            color: seed.color,
            radius: seed.radius,
            proximity: seed.proximity,
            max_connections: seed.max_connections,
            circle,
            connections: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn proximity(&self) -> f32 {
        self.proximity
    }

    pub fn max_connections(&self) -> Option<usize> {
        self.max_connections
    }

    pub fn circle(&self) -> ShapeId {
        self.circle
    }

    pub fn anchor(&self) -> Anchor {
        Anchor {
            position: self.position,
            color: self.color,
        }
    }

    pub fn connection(&self, peer: PeerKey) -> Option<&Connection> {
        self.connections.get(&peer)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn owns(&self, peer: PeerKey) -> bool {
        self.connections.contains_key(&peer)
    }

    fn at_capacity(&self) -> bool {
        self.max_connections
            .map_or(false, |max| self.connections.len() >= max)
    }

    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Bounces off the edge bands and pulls back particles that left the
    /// surface on the far side.
    pub fn reflect_at_bounds(&mut self, surface: Surface) {
        if self.position.x > surface.width {
            self.position.x = surface.width - ESCAPE_RESET;
        }
        if self.position.y > surface.height {
            self.position.y = surface.height - ESCAPE_RESET;
        }
        self.velocity.x = reflect(self.position.x, self.velocity.x, surface.width);
        self.velocity.y = reflect(self.position.y, self.velocity.y, surface.height);
    }

    /// Moves the particle's circle to its current position.
    pub fn place<S: Scene>(&self, scene: &mut S) {
        scene.set_center(self.circle, self.position);
    }

    /// Creates, refreshes or destroys this particle's connections against
    /// every peer and the cursor.
    ///
    /// Peers that already own a connection to this particle are skipped: the
    /// pair is maintained from the owner's side only.
    pub fn update_connections<'a, S, I>(&mut self, peers: I, cursor: &Cursor, scene: &mut S)
    where
        S: Scene,
        I: IntoIterator<Item = &'a Particle>,
    {
        let me = self.anchor();
        for peer in peers {
            if peer.id == self.id || peer.owns(PeerKey::Particle(self.id)) {
                continue;
            }
            let key = PeerKey::Particle(peer.id);
            let distance = geometry::distance(me.position, peer.position);
            if geometry::within(self.proximity, distance) {
                self.link(key, &me, peer, scene);
            } else {
                self.unlink(key, scene);
            }
        }

        if cursor.is_visible()
            && geometry::within(self.proximity, geometry::distance(me.position, cursor.position()))
        {
            self.link(PeerKey::Cursor, &me, cursor, scene);
        } else {
            self.unlink(PeerKey::Cursor, scene);
        }
    }

    fn link<S: Scene>(&mut self, key: PeerKey, me: &Anchor, peer: &impl Endpoint, scene: &mut S) {
        if let Some(connection) = self.connections.get_mut(&key) {
            connection.refresh(scene, me, peer, self.proximity);
            return;
        }
        // the cursor is always allowed through
        if key != PeerKey::Cursor && self.at_capacity() {
            return;
        }
        trace!(from = ?self.id, to = ?key, "connect");
        let connection = Connection::create(scene, key, me, peer, self.proximity);
        self.connections.insert(key, connection);
    }

    fn unlink<S: Scene>(&mut self, key: PeerKey, scene: &mut S) {
        if let Some(connection) = self.connections.remove(&key) {
            trace!(from = ?self.id, to = ?key, "disconnect");
            connection.destroy(scene);
        }
    }

    pub fn disconnect_cursor<S: Scene>(&mut self, scene: &mut S) {
        self.unlink(PeerKey::Cursor, scene);
    }

    /// Removes every shape this particle owns from the scene.
    pub fn release<S: Scene>(self, scene: &mut S) {
        for (_, connection) in self.connections {
            connection.destroy(scene);
        }
        scene.remove(self.circle);
    }
}

impl Endpoint for Particle {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn color(&self) -> Rgba {
        self.color
    }
}

/// Points the velocity component away from whichever edge band the position
/// is in.
fn reflect(position: f32, velocity: f32, extent: f32) -> f32 {
    if position < EDGE_MARGIN {
        velocity.abs()
    } else if extent - position < EDGE_MARGIN {
        -velocity.abs()
    } else {
        velocity
    }
}
