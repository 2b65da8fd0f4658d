//! Named draw groups
//!
//! Each group shares a pipeline/texture on the host side and draws its members
//! in list order. Membership is a plain list of entity handles.

use crate::error::{Result, SceneError};
use crate::renderer::textures::TextureInfo;
use crate::sim::EntityId;

/// Group names the scene resolves at construction
pub mod group_names {
    pub const DEFAULT: &str = "default";
    pub const PLAYER: &str = "player";
    pub const DATASTREAM: &str = "datastream";
    pub const CIRCUIT_BOARD: &str = "circuit_board";
    pub const UI_PANEL: &str = "ui_panel";
    pub const FONT: &str = "font";
    pub const INTRO_PANEL: &str = "intro_panel";

    pub const FIXED: [&str; 7] = [
        DEFAULT,
        PLAYER,
        DATASTREAM,
        CIRCUIT_BOARD,
        UI_PANEL,
        FONT,
        INTRO_PANEL,
    ];
}

/// Index of a registered group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub u16);

#[derive(Debug, Clone)]
struct Group {
    name: String,
    members: Vec<EntityId>,
}

/// Registry of draw groups, in registration order
#[derive(Debug, Clone, Default)]
pub struct RenderGroups {
    groups: Vec<Group>,
}

impl RenderGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// All fixed groups plus one group per obstacle variant
    pub fn standard(textures: &TextureInfo) -> Self {
        let mut groups = Self::new();
        for name in group_names::FIXED {
            groups.register(name);
        }
        for obstacle in &textures.obstacles {
            groups.register(&obstacle.group);
        }
        groups
    }

    /// Register a group, returning the existing id if the name is taken
    pub fn register(&mut self, name: &str) -> GroupId {
        if let Some(id) = self.find(name) {
            return id;
        }
        self.groups.push(Group {
            name: name.to_string(),
            members: Vec::new(),
        });
        GroupId(self.groups.len() as u16 - 1)
    }

    pub fn find(&self, name: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .position(|g| g.name == name)
            .map(|i| GroupId(i as u16))
    }

    /// Resolve a group that must exist
    pub fn id(&self, name: &str) -> Result<GroupId> {
        self.find(name)
            .ok_or_else(|| SceneError::UnknownRenderGroup(name.to_string()))
    }

    pub fn name(&self, group: GroupId) -> &str {
        self.groups
            .get(group.0 as usize)
            .map(|g| g.name.as_str())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = GroupId> + '_ {
        (0..self.groups.len()).map(|i| GroupId(i as u16))
    }

    /// Current draw list of a group
    pub fn members(&self, group: GroupId) -> &[EntityId] {
        self.groups
            .get(group.0 as usize)
            .map(|g| g.members.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn add(&mut self, group: GroupId, entity: EntityId) {
        if let Some(g) = self.groups.get_mut(group.0 as usize) {
            g.members.push(entity);
        }
    }

    /// Remove an entity from a draw list; false if it was not a member
    pub(crate) fn remove(&mut self, group: GroupId, entity: EntityId) -> bool {
        let Some(g) = self.groups.get_mut(group.0 as usize) else {
            return false;
        };
        match g.members.iter().position(|e| *e == entity) {
            Some(i) => {
                g.members.remove(i);
                true
            }
            None => false,
        }
    }

    /// Empty every draw list, keeping the groups themselves
    pub(crate) fn clear_members(&mut self) {
        for g in &mut self.groups {
            g.members.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut groups = RenderGroups::new();
        let a = groups.register("player");
        let b = groups.register("font");
        assert_ne!(a, b);
        assert_eq!(groups.register("player"), a);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.name(b), "font");
    }

    #[test]
    fn test_unknown_group_is_an_error() {
        let groups = RenderGroups::new();
        assert!(matches!(
            groups.id("nope"),
            Err(SceneError::UnknownRenderGroup(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_standard_includes_obstacle_groups() {
        let textures = TextureInfo::placeholder();
        let groups = RenderGroups::standard(&textures);
        for name in group_names::FIXED {
            assert!(groups.find(name).is_some(), "missing {name}");
        }
        for obstacle in &textures.obstacles {
            assert!(groups.find(&obstacle.group).is_some());
        }
        assert_eq!(
            groups.len(),
            group_names::FIXED.len() + textures.obstacles.len()
        );
    }
}
