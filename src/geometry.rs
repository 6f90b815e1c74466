use nannou::prelude::*;

/// Width of the band inside the proximity radius over which a line fades in.
pub const FADE_BAND: f32 = 20.0;

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Line opacity for two endpoints `distance` apart.
///
/// Zero at or beyond `proximity`, ramping linearly to full opacity once the
/// endpoints are [`FADE_BAND`] units inside it.
pub fn opacity(proximity: f32, distance: f32) -> f32 {
    ((proximity - distance) / FADE_BAND).clamp(0.0, 1.0)
}

pub fn within(proximity: f32, distance: f32) -> bool {
    distance <= proximity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_of_diagonal() {
        let d = distance(vec2(10.0, 10.0), vec2(50.0, 50.0));
        assert!((d - 56.568_542).abs() < 1e-4);
    }

    #[test]
    fn opacity_is_zero_at_radius() {
        assert_eq!(opacity(100.0, 100.0), 0.0);
        assert_eq!(opacity(100.0, 130.0), 0.0);
    }

    #[test]
    fn opacity_saturates_inside_band() {
        assert_eq!(opacity(100.0, 80.0), 1.0);
        assert_eq!(opacity(100.0, 0.0), 1.0);
        assert!((opacity(100.0, 90.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn boundary_distance_is_within() {
        assert!(within(40.0, 40.0));
        assert!(!within(40.0, 40.001));
    }
}
