use super::{Shape, ShapeStore};
use crate::simulation::Surface;
use nannou::prelude::*;

/// Surface coordinates grow right and down from the top-left corner; nannou's
/// window coordinates grow right and up from the centre.
pub fn to_window(point: Vec2, surface: Surface) -> Point2 {
    pt2(
        point.x - surface.width * 0.5,
        surface.height * 0.5 - point.y,
    )
}

pub fn to_surface(point: Point2, surface: Surface) -> Vec2 {
    vec2(
        point.x + surface.width * 0.5,
        surface.height * 0.5 - point.y,
    )
}

/// Paints every shape in the store, in creation order.
pub fn draw_scene(draw: &Draw, store: &ShapeStore, surface: Surface) {
    for (_, shape) in store.iter() {
        match *shape {
            Shape::Circle {
                center,
                radius,
                fill,
            } => {
                draw.ellipse()
                    .xy(to_window(center, surface))
                    .radius(radius)
                    .color(fill.to_srgba());
            }
            Shape::Line {
                start,
                end,
                weight,
                color,
                opacity,
            } => {
                // fully faded lines still exist but have nothing to paint
                if opacity <= 0.0 {
                    continue;
                }
                draw.line()
                    .start(to_window(start, surface))
                    .end(to_window(end, surface))
                    .weight(weight)
                    .caps_round()
                    .color(color.faded(opacity).to_srgba());
            }
        }
    }
}
