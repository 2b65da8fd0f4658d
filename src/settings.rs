//! Game settings
//!
//! Supplied by the host as JSON text; the core never touches the filesystem.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SceneError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    /// Screen width in pixels
    pub screen_width: f32,
    /// Screen height in pixels
    pub screen_height: f32,

    // === Simulation ===
    /// Seed for obstacle spawning
    pub seed: u64,
    /// Seconds between level increments
    pub level_increase_interval: f32,
    /// Money at the start of a run
    pub starting_money: f32,
    /// Player movement speed at the start of a run (pixels/sec)
    pub player_speed: f32,
    /// Move-speed upgrades stop at this speed
    pub max_move_speed: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            seed: 0x00da_7a57,
            level_increase_interval: LEVEL_INCREASE_INTERVAL,
            starting_money: 0.0,
            player_speed: PLAYER_SPEED,
            max_move_speed: MAX_MOVE_SPEED,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings ({}x{}, seed {})",
            settings.screen_width,
            settings.screen_height,
            settings.seed
        );
        Ok(settings)
    }

    /// Serialize settings to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(SceneError::InvalidScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if !(self.level_increase_interval > 0.0) {
            return Err(SceneError::InvalidSettings(format!(
                "level_increase_interval must be positive, got {}",
                self.level_increase_interval
            )));
        }
        if self.player_speed < 0.0 || self.max_move_speed < 0.0 {
            return Err(SceneError::InvalidSettings(
                "speeds must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Volume applied to sound effects (0.0 - 1.0)
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Volume applied to music (0.0 - 1.0)
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }
}
