//! Per-frame game simulation
//!
//! All gameplay logic lives here. This module has no rendering, windowing or
//! audio dependencies beyond the collaborator traits:
//! - One `Scene::update` per frame, consuming the frame delta and input
//! - Seeded RNG only
//! - Entities live in a single arena owned by the scene

pub mod entity;
pub mod hud;
pub mod level;
pub mod projectiles;
pub mod scene;
pub mod text;
pub mod tick;
pub mod timer;

pub use entity::{Entity, EntityId, Rect, World};
pub use hud::Hud;
pub use level::{LEVELS, LevelData, MAX_LEVEL, level_data};
pub use projectiles::Projectiles;
pub use scene::{Backgrounds, GamePhase, Scene, TimerAction};
pub use text::{HudView, TextLine, TextSource};
pub use timer::{Timer, Timers};
