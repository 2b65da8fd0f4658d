//! Cooldown-gated firing and in-flight projectile motion
//!
//! This subsystem only spawns and moves. Culling off-field projectiles and
//! resolving hits is up to the scene, which also owns the economy and audio
//! side effects of a shot.

use glam::Vec2;

use crate::consts::*;
use crate::renderer::GroupId;
use crate::sim::entity::{Entity, EntityId, World};

#[derive(Debug, Clone)]
pub struct Projectiles {
    /// Seconds between shots
    pub cd_duration: f32,
    /// Seconds until the next shot; may go negative
    pub cd_timer: f32,
    /// Travel speed along +y (pixels/sec)
    pub speed: f32,
    pub damage: i32,
    pub size: Vec2,
    /// Firing intent for this frame
    pub is_shooting: bool,
    /// Live projectiles, oldest first
    pub active: Vec<EntityId>,
    group: GroupId,
}

impl Projectiles {
    pub fn new(group: GroupId) -> Self {
        Self {
            cd_duration: PROJECTILE_COOLDOWN,
            cd_timer: 0.0,
            speed: PROJECTILE_SPEED,
            damage: PROJECTILE_DAMAGE,
            size: PROJECTILE_SIZE,
            is_shooting: false,
            active: Vec::new(),
            group,
        }
    }

    /// Tick the cooldown, fire if allowed, then advance every live projectile.
    ///
    /// Returns the new projectile when a shot was fired this frame.
    pub fn update(&mut self, world: &mut World, player: EntityId, dt: f32) -> Option<EntityId> {
        self.cd_timer -= dt;

        let mut fired = None;
        if self.is_shooting && self.cd_timer <= 0.0 {
            if let Some(player) = world.get(player) {
                let (pos, size) = (player.pos(), player.size());
                fired = Some(self.shoot(world, pos, size));
                self.cd_timer = self.cd_duration;
            }
        }

        for id in &self.active {
            if let Some(proj) = world.get_mut(*id) {
                let pos = proj.pos() + Vec2::new(0.0, proj.speed * dt);
                proj.set_pos(pos);
            }
        }

        fired
    }

    /// Spawn a projectile centred horizontally on the player
    fn shoot(&mut self, world: &mut World, player_pos: Vec2, player_size: Vec2) -> EntityId {
        let pos = Vec2::new(
            player_pos.x + player_size.x / 2.0 - self.size.x / 2.0,
            player_pos.y + player_size.y / 2.0,
        );
        let id = world.spawn(
            Entity::new(self.group, pos, self.size)
                .with_depth(8.0)
                .with_speed(self.speed)
                .with_damage(self.damage),
        );
        self.active.push(id);
        log::trace!("projectile fired at ({:.0}, {:.0})", pos.x, pos.y);
        id
    }

    /// Short cooldown applied when play resumes, so the resume key does not fire
    pub fn grant_grace(&mut self) {
        self.cd_timer = COOLDOWN_GRACE;
    }

    /// Destroy one projectile; unknown handles are ignored
    pub fn remove(&mut self, world: &mut World, id: EntityId) -> bool {
        let Some(idx) = self.active.iter().position(|p| *p == id) else {
            return false;
        };
        self.active.remove(idx);
        world.despawn(id);
        true
    }

    /// Back to a fresh run: defaults restored, no live projectiles
    pub fn reset(&mut self, world: &mut World) {
        for id in self.active.drain(..) {
            world.despawn(id);
        }
        *self = Self::new(self.group);
    }
}
