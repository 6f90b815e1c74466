use crate::geometry;
use crate::particle::{Endpoint, PeerKey};
use crate::scene::{Scene, ShapeId};
use nannou::prelude::*;

pub const STROKE_WEIGHT: f32 = 0.5;

/// A rendered line between the particle that owns it and one peer.
///
/// The owner keeps the connection in its map under the peer's key; the line
/// shape lives exactly as long as this value and is released by
/// [`Connection::destroy`].
#[derive(Debug)]
pub struct Connection {
    peer: PeerKey,
    line: ShapeId,
    start: Vec2,
    end: Vec2,
    opacity: f32,
}

impl Connection {
    pub fn create<S: Scene>(
        scene: &mut S,
        peer: PeerKey,
        from: &impl Endpoint,
        to: &impl Endpoint,
        proximity: f32,
    ) -> Self {
        let start = from.position();
        let end = to.position();
        let opacity = geometry::opacity(proximity, geometry::distance(start, end));
        let line = scene.add_line(start, end);
        scene.set_stroke(line, STROKE_WEIGHT, from.color());
        scene.set_opacity(line, opacity);
        Self {
            peer,
            line,
            start,
            end,
            opacity,
        }
    }

    /// Re-reads both endpoints and restyles the existing line.
    pub fn refresh<S: Scene>(
        &mut self,
        scene: &mut S,
        from: &impl Endpoint,
        to: &impl Endpoint,
        proximity: f32,
    ) {
        self.start = from.position();
        self.end = to.position();
        self.opacity = geometry::opacity(proximity, geometry::distance(self.start, self.end));
        scene.set_endpoints(self.line, self.start, self.end);
        scene.set_stroke(self.line, STROKE_WEIGHT, from.color());
        scene.set_opacity(self.line, self.opacity);
    }

    pub fn destroy<S: Scene>(self, scene: &mut S) {
        scene.remove(self.line);
    }

    pub fn peer(&self) -> PeerKey {
        self.peer
    }

    pub fn line(&self) -> ShapeId {
        self.line
    }

    pub fn endpoints(&self) -> (Vec2, Vec2) {
        (self.start, self.end)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::particle::{Anchor, ParticleId};
    use crate::scene::{Shape, ShapeStore};

    fn anchor(x: f32, y: f32) -> Anchor {
        Anchor {
            position: vec2(x, y),
            color: Rgba::new(0.0, 0.0, 1.0, 1.0),
        }
    }

    #[test]
    fn create_styles_line_from_owner() {
        let mut scene = ShapeStore::new();
        let from = anchor(0.0, 0.0);
        let to = anchor(90.0, 0.0);
        let conn = Connection::create(&mut scene, PeerKey::Particle(ParticleId(1)), &from, &to, 100.0);

        assert!((conn.opacity() - 0.5).abs() < 1e-6);
        match scene.get(conn.line()) {
            Some(Shape::Line {
                start,
                end,
                weight,
                color,
                opacity,
            }) => {
                assert_eq!((*start, *end), (vec2(0.0, 0.0), vec2(90.0, 0.0)));
                assert_eq!(*weight, STROKE_WEIGHT);
                assert_eq!(*color, from.color);
                assert!((*opacity - 0.5).abs() < 1e-6);
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn refresh_reuses_line_and_is_idempotent() {
        let mut scene = ShapeStore::new();
        let from = anchor(0.0, 0.0);
        let mut to = anchor(50.0, 0.0);
        let mut conn = Connection::create(&mut scene, PeerKey::Cursor, &from, &to, 60.0);
        let allocated = scene.allocated();

        to.position = vec2(45.0, 0.0);
        conn.refresh(&mut scene, &from, &to, 60.0);
        let first = (conn.endpoints(), conn.opacity());
        conn.refresh(&mut scene, &from, &to, 60.0);

        assert_eq!((conn.endpoints(), conn.opacity()), first);
        assert!((conn.opacity() - 0.75).abs() < 1e-6);
        assert_eq!(scene.allocated(), allocated);
        assert_eq!(scene.lines(), 1);
    }

    #[test]
    fn destroy_removes_line() {
        let mut scene = ShapeStore::new();
        let conn = Connection::create(&mut scene, PeerKey::Cursor, &anchor(0.0, 0.0), &anchor(1.0, 1.0), 10.0);
        let line = conn.line();
        conn.destroy(&mut scene);
        assert!(scene.get(line).is_none());
        assert!(scene.is_empty());
    }
}
