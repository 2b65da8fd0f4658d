//! Entities and the arena that owns them
//!
//! An [`Entity`] is plain data: a textured rectangle with optional gameplay
//! attributes. It only becomes drawable once handed to [`World::spawn`], which
//! stores it and appends its handle to its group's draw list. [`World::despawn`]
//! undoes both and is safe to call on a handle that is already gone.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::{GroupId, RenderGroups, SpriteInstance};

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn has_area(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }

    /// Strict overlap test; touching edges and empty rects never collide
    pub fn colliderect(&self, other: &Rect) -> bool {
        self.has_area()
            && other.has_area()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A positioned, sized, textured rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pos: Vec2,
    size: Vec2,
    group: GroupId,
    /// Rotation in degrees
    pub rot: f32,
    /// Texture layer within the group's texture array
    pub tex_idx: u32,
    /// Draw-order hint (higher draws on top)
    pub depth: f32,
    /// Pixels per second
    pub speed: f32,
    /// May go negative before the owner removes the entity
    pub health: i32,
    pub damage: i32,
    /// Price for shop items
    pub cost: i32,
    /// Tag for identification, e.g. "move_speed"
    pub name: String,
}

impl Entity {
    pub fn new(group: GroupId, pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            group,
            rot: 0.0,
            tex_idx: 0,
            depth: 1.0,
            speed: 0.0,
            health: 100,
            damage: 10,
            cost: 0,
            name: "default".to_string(),
        }
    }

    pub fn with_tex(mut self, tex_idx: u32) -> Self {
        self.tex_idx = tex_idx;
        self
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn group(&self) -> GroupId {
        self.group
    }

    /// Bounding rectangle, always derived from the current position and size
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Move along a direction at `speed`; diagonals are normalized so they
    /// are no faster than a single axis
    pub fn move_by(&mut self, dx: f32, dy: f32, dt: f32) {
        let dir = Vec2::new(dx, dy).normalize_or_zero();
        self.pos += dir * self.speed * dt;
    }
}

/// Generational handle into a [`World`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Arena owning every live entity plus the draw lists that reference them
#[derive(Debug, Clone)]
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    groups: RenderGroups,
    live: usize,
}

impl World {
    pub fn new(groups: RenderGroups) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            groups,
            live: 0,
        }
    }

    /// Store an entity and append it to its group's draw list
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let group = entity.group;
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entity = Some(entity);
                EntityId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entity: Some(entity),
                });
                EntityId {
                    index: self.slots.len() as u32 - 1,
                    generation: 0,
                }
            }
        };
        self.groups.add(group, id);
        self.live += 1;
        id
    }

    /// Remove an entity from its draw list and the arena.
    /// Returns false if the handle was already dead.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index as usize) else {
            return false;
        };
        if slot.generation != id.generation {
            return false;
        }
        let Some(entity) = slot.entity.take() else {
            return false;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.groups.remove(entity.group, id);
        self.live -= 1;
        true
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entity.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entity.as_mut())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Drop every entity and empty every draw list
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.entity.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.groups.clear_members();
        self.live = 0;
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn groups(&self) -> &RenderGroups {
        &self.groups
    }

    /// Pack a group's draw list into instance data, in draw-list order
    pub fn instances(&self, group: GroupId) -> Vec<SpriteInstance> {
        self.groups
            .members(group)
            .iter()
            .filter_map(|id| self.get(*id))
            .map(SpriteInstance::from_entity)
            .collect()
    }
}
