//! The rendering capability the simulation draws through.
//!
//! The simulation only ever creates, moves, restyles and removes shapes via
//! [`Scene`]. [`ShapeStore`] is the only implementation: the two render
//! backends do not implement [`Scene`] themselves but share this one retained
//! store. [`draw`] paints it with nannou every frame and [`svg`] serializes
//! it as an SVG document.

pub mod draw;
pub mod svg;

use crate::color::Rgba;
use nannou::prelude::*;
use std::collections::BTreeMap;
use tracing::warn;

/// Handle to a shape owned by a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(u64);

pub trait Scene {
    fn add_circle(&mut self, center: Vec2, radius: f32, fill: Rgba) -> ShapeId;
    fn add_line(&mut self, start: Vec2, end: Vec2) -> ShapeId;
    fn set_center(&mut self, id: ShapeId, center: Vec2);
    fn set_endpoints(&mut self, id: ShapeId, start: Vec2, end: Vec2);
    fn set_stroke(&mut self, id: ShapeId, weight: f32, color: Rgba);
    fn set_opacity(&mut self, id: ShapeId, opacity: f32);
    /// Removes a shape, returning whether it was present.
    fn remove(&mut self, id: ShapeId) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        center: Vec2,
        radius: f32,
        fill: Rgba,
    },
    Line {
        start: Vec2,
        end: Vec2,
        weight: f32,
        color: Rgba,
        opacity: f32,
    },
}

/// In-memory scene graph, iterated in creation order.
#[derive(Debug, Default)]
pub struct ShapeStore {
    shapes: BTreeMap<ShapeId, Shape>,
    next_id: u64,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter().map(|(id, shape)| (*id, shape))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn circles(&self) -> usize {
        self.shapes
            .values()
            .filter(|s| matches!(s, Shape::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.shapes
            .values()
            .filter(|s| matches!(s, Shape::Line { .. }))
            .count()
    }

    /// Number of shapes ever allocated, removed ones included.
    pub fn allocated(&self) -> u64 {
        self.next_id
    }

    fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.insert(id, shape);
        id
    }

    fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        let shape = self.shapes.get_mut(&id);
        if shape.is_none() {
            warn!(?id, "update for unknown shape");
        }
        shape
    }
}

impl Scene for ShapeStore {
    fn add_circle(&mut self, center: Vec2, radius: f32, fill: Rgba) -> ShapeId {
        self.insert(Shape::Circle {
            center,
            radius,
            fill,
        })
    }

    fn add_line(&mut self, start: Vec2, end: Vec2) -> ShapeId {
        self.insert(Shape::Line {
            start,
            end,
            weight: 1.0,
            color: Rgba::BLACK,
            opacity: 1.0,
        })
    }

    fn set_center(&mut self, id: ShapeId, position: Vec2) {
        if let Some(Shape::Circle { center, .. }) = self.shape_mut(id) {
            *center = position;
        }
    }

    fn set_endpoints(&mut self, id: ShapeId, from: Vec2, to: Vec2) {
        if let Some(Shape::Line { start, end, .. }) = self.shape_mut(id) {
            *start = from;
            *end = to;
        }
    }

    fn set_stroke(&mut self, id: ShapeId, stroke_weight: f32, stroke_color: Rgba) {
        if let Some(Shape::Line { weight, color, .. }) = self.shape_mut(id) {
            *weight = stroke_weight;
            *color = stroke_color;
        }
    }

    fn set_opacity(&mut self, id: ShapeId, value: f32) {
        if let Some(Shape::Line { opacity, .. }) = self.shape_mut(id) {
            *opacity = value;
        }
    }

    fn remove(&mut self, id: ShapeId) -> bool {
        self.shapes.remove(&id).is_some()
    }
}
