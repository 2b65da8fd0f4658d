//! Datastream Defender - a scrolling-lane arcade shooter
//!
//! Core modules:
//! - `sim`: Per-frame game simulation (entities, timers, projectiles, scene)
//! - `renderer`: Draw groups, texture metadata and instance packing
//! - `platform`: Window/input collaborator interface
//! - `audio`: Audio collaborator interface
//! - `settings`: Host-supplied configuration

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Result, SceneError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 1600.0;
    pub const SCREEN_HEIGHT: f32 = 900.0;

    /// Seconds between level increments
    pub const LEVEL_INCREASE_INTERVAL: f32 = 30.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 500.0;
    pub const MAX_MOVE_SPEED: f32 = 1000.0;
    /// Player sprite scale relative to its source image
    pub const PLAYER_SCALE: f32 = 0.15;
    pub const FULL_HEALTH: i32 = 100;

    /// Projectile defaults
    pub const PROJECTILE_COOLDOWN: f32 = 0.5;
    pub const PROJECTILE_SPEED: f32 = 300.0;
    pub const PROJECTILE_DAMAGE: i32 = 10;
    pub const PROJECTILE_SIZE: Vec2 = Vec2::new(10.0, 30.0);
    /// Cooldown applied when play resumes from the intro or the shop
    pub const COOLDOWN_GRACE: f32 = 0.5;
    /// Money spent per shot
    pub const SHOT_COST: f32 = 1.0;

    /// Obstacles
    pub const OBSTACLE_HEALTH: i32 = 20;
    /// Maximum wobble tilt (degrees)
    pub const OBSTACLE_MAX_TILT: f32 = 10.0;
    /// Score and money granted per destroyed obstacle
    pub const KILL_REWARD: u32 = 10;
    /// Player damage on contact with an obstacle
    pub const COLLISION_DAMAGE: i32 = 10;
    /// Player damage when an obstacle breaches the lane
    pub const BREACH_DAMAGE: i32 = 5;

    /// Economy
    pub const LEVEL_UP_BONUS: f32 = 100.0;
    pub const MOVE_SPEED_UPGRADE_COST: i32 = 50;
    pub const RELOAD_UPGRADE_COST: i32 = 50;
    pub const HEALTH_UPGRADE_COST: i32 = 100;
    pub const MOVE_SPEED_UPGRADE_FACTOR: f32 = 1.1;
    pub const RELOAD_UPGRADE_FACTOR: f32 = 0.9;
}
