//! Recognized options and their defaults.
//!
//! Every field may be omitted from a JSON config; missing values fall back to
//! the defaults below. [`Options::validate`] rejects anything that would
//! leave the simulation in an undefined visual state.

use crate::color::Rgba;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Highest accepted `surface.target_fps`.
pub const MAX_TARGET_FPS: u32 = 1000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    pub particles: ParticleOptions,
    pub surface: SurfaceOptions,
    pub cursor: CursorOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleOptions {
    pub count: usize,
    pub color: ColorChoice,
    /// Cap on simultaneous connections held by one particle.
    pub max_connections: Option<usize>,
    pub proximity: f32,
    /// Circle radius range.
    pub size: Span,
    pub speed: Span,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            count: 50,
            color: ColorChoice::Single(Rgba::BLACK),
            max_connections: None,
            proximity: 100.0,
            size: Span::new(0.5, 1.5),
            speed: Span::new(0.5, 1.5),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceOptions {
    pub width: f32,
    pub height: f32,
    pub target_fps: u32,
    /// Track the window size instead of keeping a fixed surface.
    pub fit_to_window: bool,
    pub background: Rgba,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            target_fps: 60,
            fit_to_window: true,
            background: Rgba::WHITE,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CursorOptions {
    pub color: Option<Rgba>,
}

/// Inclusive `{min, max}` range. Either bound may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0.5, 1.5)
    }
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(ConfigError::InvertedRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// A single particle colour, or a palette each particle samples from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorChoice {
    Single(Rgba),
    Palette(Vec<Rgba>),
}

impl ColorChoice {
    /// Colour used where a single representative is needed.
    pub fn primary(&self) -> Option<Rgba> {
        match self {
            ColorChoice::Single(color) => Some(*color),
            ColorChoice::Palette(colors) => colors.first().copied(),
        }
    }

    pub fn colors(&self) -> &[Rgba] {
        match self {
            ColorChoice::Single(color) => std::slice::from_ref(color),
            ColorChoice::Palette(colors) => colors,
        }
    }
}

impl Options {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let options: Options = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let surface = &self.surface;
        if !(surface.width > 0.0 && surface.height > 0.0) {
            return Err(ConfigError::EmptySurface {
                width: surface.width,
                height: surface.height,
            });
        }
        if surface.target_fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if surface.target_fps > MAX_TARGET_FPS {
            return Err(ConfigError::FrameRateTooHigh {
                value: surface.target_fps,
                max: MAX_TARGET_FPS,
            });
        }
        if !surface.background.is_valid() {
            return Err(ConfigError::InvalidColor {
                name: "surface.background",
            });
        }

        let particles = &self.particles;
        if !(particles.proximity.is_finite() && particles.proximity > 0.0) {
            return Err(ConfigError::NotPositive {
                name: "particles.proximity",
                value: particles.proximity,
            });
        }
        particles.size.check("particles.size")?;
        if particles.size.min <= 0.0 {
            return Err(ConfigError::NotPositive {
                name: "particles.size.min",
                value: particles.size.min,
            });
        }
        particles.speed.check("particles.speed")?;
        if particles.max_connections == Some(0) {
            return Err(ConfigError::ZeroMaxConnections);
        }
        let colors = particles.color.colors();
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if !colors.iter().all(Rgba::is_valid) {
            return Err(ConfigError::InvalidColor {
                name: "particles.color",
            });
        }

        if let Some(color) = self.cursor.color {
            if !color.is_valid() {
                return Err(ConfigError::InvalidColor {
                    name: "cursor.color",
                });
            }
        }
        Ok(())
    }

    /// Cursor colour, falling back to the particle colour.
    pub fn cursor_color(&self) -> Rgba {
        self.cursor
            .color
            .or_else(|| self.particles.color.primary())
            .unwrap_or(Rgba::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let options = Options::from_json("{}").unwrap();
        assert_eq!(options.particles.count, 50);
        assert_eq!(options.particles.proximity, 100.0);
        assert_eq!(options.particles.size, Span::new(0.5, 1.5));
        assert_eq!(options.particles.speed, Span::new(0.5, 1.5));
        assert_eq!(options.particles.max_connections, None);
        assert_eq!(options.surface.target_fps, 60);
        assert_eq!(options.cursor_color(), Rgba::BLACK);
    }

    #[test]
    fn palette_and_partial_sections() {
        let options = Options::from_json(
            r#"{
                "particles": {
                    "count": 12,
                    "color": [[1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]],
                    "max_connections": 3,
                    "speed": { "min": 1.0, "max": 2.0 }
                },
                "surface": { "fit_to_window": false }
            }"#,
        )
        .unwrap();
        assert_eq!(options.particles.count, 12);
        assert_eq!(options.particles.color.colors().len(), 2);
        assert_eq!(options.particles.max_connections, Some(3));
        assert_eq!(options.particles.size, Span::new(0.5, 1.5));
        assert!(!options.surface.fit_to_window);
        assert_eq!(options.particles.speed, Span::new(1.0, 2.0));
        assert_eq!(options.cursor_color(), Rgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn span_bounds_default_individually() {
        let options = Options::from_json(r#"{ "particles": { "size": { "max": 3 } } }"#).unwrap();
        assert_eq!(options.particles.size, Span::new(0.5, 3.0));
    }

    #[test]
    fn negative_count_is_a_parse_error() {
        let err = Options::from_json(r#"{ "particles": { "count": -4 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = Options::from_json(r#"{ "particles": { "colour": [0, 0, 0, 1] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_surface_is_rejected() {
        let err = Options::from_json(r#"{ "surface": { "width": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptySurface { .. }));
    }

    #[test]
    fn inverted_speed_is_rejected() {
        let err =
            Options::from_json(r#"{ "particles": { "speed": { "min": 3, "max": 1 } } }"#)
                .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvertedRange {
                name: "particles.speed",
                ..
            }
        ));
    }

    #[test]
    fn empty_palette_is_rejected() {
        let err = Options::from_json(r#"{ "particles": { "color": [] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPalette));
    }

    #[test]
    fn zero_cap_and_frame_rate_are_rejected() {
        let err = Options::from_json(r#"{ "particles": { "max_connections": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroMaxConnections));
        let err = Options::from_json(r#"{ "surface": { "target_fps": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroFrameRate));
    }

    #[test]
    fn frame_rate_above_ceiling_is_rejected() {
        let err = Options::from_json(r#"{ "surface": { "target_fps": 2000000000 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::FrameRateTooHigh {
                value: 2_000_000_000,
                max: MAX_TARGET_FPS,
            }
        ));
        let options = Options::from_json(r#"{ "surface": { "target_fps": 1000 } }"#).unwrap();
        assert_eq!(options.surface.target_fps, MAX_TARGET_FPS);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Options::load("/nonexistent/tsubu.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tsubu.json"));
    }
}
