//! Error types for scene construction and configuration
//!
//! The per-frame update never fails; everything here surfaces at startup.

use thiserror::Error;

/// Errors raised while building a scene or loading settings
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid screen size: {width}x{height}")]
    InvalidScreenSize { width: f32, height: f32 },

    #[error("No obstacle textures registered")]
    NoObstacleTextures,

    #[error("Font map has no blank glyph for {0:?}")]
    MissingBlankGlyph(char),

    #[error("Unknown render group: {0}")]
    UnknownRenderGroup(String),
}

/// Result type alias for scene construction
pub type Result<T> = std::result::Result<T, SceneError>;
