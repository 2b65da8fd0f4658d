//! Static per-level difficulty table

use serde::{Deserialize, Serialize};

/// Difficulty parameters for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    /// Datastream lane scroll speed (pixels/sec)
    pub datastream_speed: f32,
    /// Seconds between obstacle spawns
    pub obstacles_freq: f32,
    /// Inclusive obstacle speed range (pixels/sec)
    pub obstacles_speed_range: (u32, u32),
}

pub const LEVELS: [LevelData; 6] = [
    LevelData {
        datastream_speed: 250.0,
        obstacles_freq: 2.0,
        obstacles_speed_range: (150, 300),
    },
    LevelData {
        datastream_speed: 350.0,
        obstacles_freq: 1.5,
        obstacles_speed_range: (200, 350),
    },
    LevelData {
        datastream_speed: 450.0,
        obstacles_freq: 1.0,
        obstacles_speed_range: (250, 400),
    },
    LevelData {
        datastream_speed: 550.0,
        obstacles_freq: 0.8,
        obstacles_speed_range: (300, 450),
    },
    LevelData {
        datastream_speed: 650.0,
        obstacles_freq: 0.6,
        obstacles_speed_range: (350, 500),
    },
    LevelData {
        datastream_speed: 750.0,
        obstacles_freq: 0.4,
        obstacles_speed_range: (400, 550),
    },
];

/// Highest level number (levels are 1-based)
pub const MAX_LEVEL: u32 = LEVELS.len() as u32;

/// Table entry for a 1-based level, clamped into range
pub fn level_data(level: u32) -> &'static LevelData {
    let idx = level.clamp(1, MAX_LEVEL) as usize - 1;
    &LEVELS[idx]
}
