//! Static texture metadata supplied by the host at construction
//!
//! Only sizes and index maps live here; pixel data stays with the renderer.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};

/// Blank glyph used to clear unused text slots
pub const BLANK: char = ' ';

const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
const WHITESPACE: &str = " \t\n\r\x0b\x0c";

/// Monospace font atlas: one texture layer per character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontAtlas {
    /// Pixel size of a single glyph
    pub glyph_size: Vec2,
    /// Character to texture layer
    pub idx_map: HashMap<char, u32>,
}

impl FontAtlas {
    /// Atlas laid out in printable-ASCII order:
    /// digits, lowercase, uppercase, punctuation, whitespace
    pub fn printable(glyph_size: Vec2) -> Self {
        let chars = ('0'..='9')
            .chain('a'..='z')
            .chain('A'..='Z')
            .chain(PUNCTUATION.chars())
            .chain(WHITESPACE.chars());
        let idx_map = chars.enumerate().map(|(i, c)| (c, i as u32)).collect();
        Self {
            glyph_size,
            idx_map,
        }
    }

    pub fn index(&self, c: char) -> Option<u32> {
        self.idx_map.get(&c).copied()
    }

    /// Texture layer of the blank glyph
    pub fn blank(&self) -> Option<u32> {
        self.index(BLANK)
    }
}

/// One obstacle variant: its draw group and pixel size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleTexture {
    pub group: String,
    pub size: Vec2,
}

/// Everything the scene needs to know about loaded textures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureInfo {
    /// Player sprite image size before scaling
    pub player_img_size: Vec2,
    /// Pre-rendered intro panel size
    pub intro_panel_size: Vec2,
    pub font: FontAtlas,
    pub obstacles: Vec<ObstacleTexture>,
}

impl TextureInfo {
    /// Metadata matching the stock asset set, for headless runs and tests
    pub fn placeholder() -> Self {
        let obstacle_sizes = [
            (96.0, 96.0),
            (80.0, 112.0),
            (128.0, 96.0),
            (104.0, 104.0),
            (72.0, 88.0),
            (120.0, 120.0),
            (90.0, 70.0),
        ];
        Self {
            player_img_size: Vec2::new(500.0, 600.0),
            intro_panel_size: Vec2::new(1400.0, 600.0),
            font: FontAtlas::printable(Vec2::new(20.0, 38.0)),
            obstacles: obstacle_sizes
                .iter()
                .enumerate()
                .map(|(i, &(w, h))| ObstacleTexture {
                    group: format!("obstacle_texture_{i}"),
                    size: Vec2::new(w, h),
                })
                .collect(),
        }
    }

    /// Check the metadata can drive a scene
    pub fn validate(&self) -> Result<()> {
        if self.obstacles.is_empty() {
            return Err(SceneError::NoObstacleTextures);
        }
        if self.font.blank().is_none() {
            return Err(SceneError::MissingBlankGlyph(BLANK));
        }
        Ok(())
    }
}
