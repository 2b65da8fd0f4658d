//! Render collaborator interface
//!
//! The core never talks to the GPU. It keeps named draw groups of entity
//! handles, reads static texture metadata supplied by the host, and packs
//! each group into [`SpriteInstance`]s the host uploads as instance data.

pub mod group;
pub mod instance;
pub mod textures;

pub use group::{GroupId, RenderGroups, group_names};
pub use instance::SpriteInstance;
pub use textures::{FontAtlas, ObstacleTexture, TextureInfo};
