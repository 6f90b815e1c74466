use super::{Shape, ShapeStore};
use crate::color::Rgba;
use crate::simulation::Surface;
use std::fmt::Write;

/// Renders the store as a standalone SVG document.
///
/// Coordinates are written as-is since SVG shares the surface's top-left
/// origin.
pub fn render(
    store: &ShapeStore,
    surface: Surface,
    background: Rgba,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_document(&mut out, store, surface, background)?;
    Ok(out)
}

fn write_document(
    out: &mut String,
    store: &ShapeStore,
    surface: Surface,
    background: Rgba,
) -> std::fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = surface.width,
        h = surface.height
    )?;
    writeln!(
        out,
        r#"  <rect width="100%" height="100%" fill="{background}"/>"#
    )?;
    for (_, shape) in store.iter() {
        match shape {
            Shape::Circle {
                center,
                radius,
                fill,
            } => writeln!(
                out,
                r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                center.x, center.y, radius, fill
            )?,
            Shape::Line {
                start,
                end,
                weight,
                color,
                opacity,
            } => writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="round" opacity="{}"/>"#,
                start.x, start.y, end.x, end.y, color, weight, opacity
            )?,
        }
    }
    writeln!(out, "</svg>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use nannou::prelude::vec2;

    #[test]
    fn renders_circles_and_lines() {
        let mut store = ShapeStore::new();
        store.add_circle(vec2(10.0, 20.0), 1.5, Rgba::BLACK);
        let line = store.add_line(vec2(10.0, 20.0), vec2(30.0, 40.0));
        store.set_stroke(line, 0.5, Rgba::new(1.0, 0.0, 0.0, 1.0));
        store.set_opacity(line, 0.5);

        let svg = render(
            &store,
            Surface {
                width: 200.0,
                height: 100.0,
            },
            Rgba::WHITE,
        )
        .unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 200 100""#));
        assert!(svg.contains(r#"<circle cx="10" cy="20" r="1.5" fill="rgba(0, 0, 0, 1)"/>"#));
        assert!(svg.contains(r#"x1="10" y1="20" x2="30" y2="40" stroke="rgba(255, 0, 0, 1)""#));
        assert!(svg.contains(r#"opacity="0.5""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn removed_shapes_are_not_rendered() {
        let mut store = ShapeStore::new();
        let line = store.add_line(vec2(0.0, 0.0), vec2(1.0, 1.0));
        store.remove(line);
        let svg = render(
            &store,
            Surface {
                width: 10.0,
                height: 10.0,
            },
            Rgba::WHITE,
        )
        .unwrap();
        assert!(!svg.contains("<line"));
    }

    #[test]
    fn renders_the_store_the_simulation_draws_into() {
        use crate::particle::ParticleSeed;
        use crate::simulation::Simulation;

        let mut sim = Simulation::from_seeds(
            Surface::new(100.0, 100.0).unwrap(),
            vec![
                ParticleSeed::at(10.0, 10.0, 50.0),
                ParticleSeed::at(20.0, 10.0, 50.0),
            ],
            Rgba::BLACK,
            ShapeStore::new(),
        )
        .unwrap();
        sim.tick();

        let svg = render(sim.scene(), sim.surface(), Rgba::WHITE).unwrap();
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("<line").count(), 1);
    }
}
