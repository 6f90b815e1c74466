use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("surface must have a positive size, got {width}x{height}")]
    EmptySurface { width: f32, height: f32 },
    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("particle palette is empty")]
    EmptyPalette,
    #[error("{name} has a channel outside 0..=1")]
    InvalidColor { name: &'static str },
    #[error("max_connections must be at least 1 when set")]
    ZeroMaxConnections,
    #[error("target_fps must be at least 1")]
    ZeroFrameRate,
    #[error("target_fps must be at most {max}, got {value}")]
    FrameRateTooHigh { value: u32, max: u32 },
}
