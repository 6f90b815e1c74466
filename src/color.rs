use nannou::color::{srgba, Srgba};
use serde::Deserialize;
use std::fmt;

/// An sRGB colour with every channel in `0.0..=1.0`.
///
/// Deserializes from a `[r, g, b, a]` array.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f32; 4]")]
pub struct Rgba {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn channels(&self) -> [f32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    pub fn is_valid(&self) -> bool {
        self.channels()
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// Same colour with its alpha scaled by `opacity`.
    pub fn faded(self, opacity: f32) -> Self {
        Self {
            alpha: self.alpha * opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_srgba(self) -> Srgba {
        srgba(self.red, self.green, self.blue, self.alpha)
    }
}

impl From<[f32; 4]> for Rgba {
    fn from([red, green, blue, alpha]: [f32; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

/// CSS `rgba()` notation, as used by the SVG backend.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "rgba({}, {}, {}, {})",
            byte(self.red),
            byte(self.green),
            byte(self.blue),
            self.alpha
        )
    }
}
