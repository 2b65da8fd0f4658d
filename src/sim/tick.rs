//! Per-frame scene update
//!
//! Order within a frame:
//! controls → intro/game-over gating → economy → timers → backgrounds →
//! obstacles → player → player collisions → projectiles → HUD.
//! Obstacles killed by a projectile are collected on the following frame.

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::consts::*;
use crate::platform::{InputSymbol, Window};
use crate::sim::entity::EntityId;
use crate::sim::hud::ShopView;
use crate::sim::scene::{GamePhase, Scene, TimerAction};

/// Allowed drift between paired background strips
const BG_TOLERANCE: f32 = 1.0;

impl Scene {
    /// Advance the game by one frame
    pub fn update(&mut self, window: &dyn Window) {
        let dt = window.frame_time();
        self.wall_time = window.time();
        self.update_controls(window);

        if self.phase != GamePhase::Intro {
            if !self.music_started {
                self.audio.play_music(self.sfx.music());
                self.music_started = true;
            }
            self.check_game_over();
        }

        if self.phase == GamePhase::Playing {
            self.time += dt;
            self.money += dt;
            self.update_timers(dt);
            self.update_backgrounds(dt);
            self.update_obstacles(dt);
            self.update_player(window, dt);
            self.update_player_collisions();
            self.update_projectiles(dt);
            self.check_game_over();
        }

        self.refresh_hud();
    }

    fn update_controls(&mut self, window: &dyn Window) {
        let start = window.key_pressed(InputSymbol::Space);
        match self.phase {
            GamePhase::Intro => {
                if start {
                    self.phase = GamePhase::Playing;
                    self.projectiles.grant_grace();
                    log::info!("Game started");
                }
            }
            GamePhase::GameOver => {
                if start {
                    self.restart();
                }
            }
            GamePhase::Playing => {
                if window.key_pressed(InputSymbol::KeyP) {
                    self.phase = GamePhase::Paused;
                    log::info!("Paused");
                } else if window.key_pressed(InputSymbol::KeyF) {
                    self.phase = GamePhase::ShoppingPaused;
                    log::debug!("Shop opened");
                }
            }
            GamePhase::Paused => {
                if window.key_pressed(InputSymbol::KeyP) {
                    self.phase = GamePhase::Playing;
                    log::info!("Resumed");
                }
            }
            GamePhase::ShoppingPaused => {
                self.update_shop(window);
                if start || window.key_pressed(InputSymbol::KeyF) {
                    self.phase = GamePhase::Playing;
                    self.projectiles.grant_grace();
                    log::debug!("Shop closed");
                }
            }
        }

        self.projectiles.is_shooting = self.phase == GamePhase::Playing
            && window.key_down(InputSymbol::Space)
            && self.money >= SHOT_COST;
    }

    /// Purchases; each silently does nothing when unaffordable
    fn update_shop(&mut self, window: &dyn Window) {
        let max_move_speed = self.settings.max_move_speed;

        if window.key_pressed(InputSymbol::Digit1)
            && self.money >= MOVE_SPEED_UPGRADE_COST as f32
            && self.player().is_some_and(|p| p.speed < max_move_speed)
        {
            if let Some(player) = self.world.get_mut(self.player) {
                player.speed *= MOVE_SPEED_UPGRADE_FACTOR;
                log::debug!("Move speed upgraded to {:.0}", player.speed);
            }
            self.money -= MOVE_SPEED_UPGRADE_COST as f32;
            self.play(SoundEffect::PowerUp);
        }

        if window.key_pressed(InputSymbol::Digit2) && self.money >= RELOAD_UPGRADE_COST as f32 {
            self.projectiles.cd_duration *= RELOAD_UPGRADE_FACTOR;
            self.money -= RELOAD_UPGRADE_COST as f32;
            self.play(SoundEffect::PowerUp);
            log::debug!("Reload cooldown now {:.3}s", self.projectiles.cd_duration);
        }

        if window.key_pressed(InputSymbol::Digit3) && self.money >= HEALTH_UPGRADE_COST as f32 {
            if let Some(player) = self.world.get_mut(self.player) {
                player.health = FULL_HEALTH;
            }
            self.money -= HEALTH_UPGRADE_COST as f32;
            self.play(SoundEffect::PowerUp);
            log::debug!("Health restored");
        }
    }

    fn check_game_over(&mut self) {
        if self.phase != GamePhase::GameOver && self.player_health() <= 0 {
            self.enter_game_over();
        }
    }

    fn update_timers(&mut self, dt: f32) {
        for action in self.timers.update(dt) {
            match action {
                TimerAction::AddObstacle => {
                    self.add_obstacle();
                }
                TimerAction::IncrementLevel => self.increment_level(),
            }
        }
    }

    fn update_backgrounds(&mut self, dt: f32) {
        let bg = self.backgrounds;
        self.scroll_pair(bg.datastream, self.datastream_speed * dt);
        self.scroll_pair(bg.left_circuit_board, self.circuit_board_speed * dt);
        self.scroll_pair(bg.right_circuit_board, self.circuit_board_speed * dt);
    }

    /// Scroll two stacked strips, wrapping each below the other once it
    /// leaves the screen and re-snapping their spacing if it drifts
    fn scroll_pair(&mut self, pair: [EntityId; 2], delta: f32) {
        let height = self.screen.y;
        let (Some(a), Some(b)) = (self.world.get(pair[0]), self.world.get(pair[1])) else {
            return;
        };
        let (mut pa, mut pb) = (a.pos(), b.pos());

        pa.y -= delta;
        pb.y -= delta;
        if pa.y < -height {
            pa.y += 2.0 * height;
        }
        if pb.y < -height {
            pb.y += 2.0 * height;
        }
        if ((pa.y - pb.y).abs() - height).abs() > BG_TOLERANCE {
            if pa.y < pb.y {
                pb.y = pa.y + height;
            } else {
                pa.y = pb.y + height;
            }
        }

        if let Some(a) = self.world.get_mut(pair[0]) {
            a.set_pos(pa);
        }
        if let Some(b) = self.world.get_mut(pair[1]) {
            b.set_pos(pb);
        }
    }

    fn update_obstacles(&mut self, dt: f32) {
        let tilt = OBSTACLE_MAX_TILT * (self.time * 10.0).sin();
        let mut killed = Vec::new();
        let mut breached = Vec::new();

        for id in &self.obstacles {
            let Some(obstacle) = self.world.get_mut(*id) else {
                continue;
            };
            obstacle.rot = if obstacle.rot < OBSTACLE_MAX_TILT {
                tilt
            } else {
                OBSTACLE_MAX_TILT
            };

            if obstacle.health <= 0 {
                killed.push(*id);
                continue;
            }

            let pos = obstacle.pos() - Vec2::new(0.0, obstacle.speed * dt);
            obstacle.set_pos(pos);
            if pos.y < -obstacle.size().y {
                breached.push(*id);
            }
        }

        for id in killed {
            self.remove_obstacle(id);
            self.enemies_killed += 1;
            self.score += KILL_REWARD;
            self.money += KILL_REWARD as f32;
        }

        for id in breached {
            self.remove_obstacle(id);
            self.network_breaches += 1;
            if let Some(player) = self.world.get_mut(self.player) {
                player.health -= BREACH_DAMAGE;
            }
            self.play(SoundEffect::Hurt);
            log::debug!("Network breached ({} total)", self.network_breaches);
        }
    }

    fn update_player(&mut self, window: &dyn Window, dt: f32) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if window.key_down(InputSymbol::ArrowUp) {
            dy = -1.0;
        }
        if window.key_down(InputSymbol::ArrowDown) {
            dy = 1.0;
        }
        if window.key_down(InputSymbol::ArrowLeft) {
            dx = -1.0;
        }
        if window.key_down(InputSymbol::ArrowRight) {
            dx = 1.0;
        }

        let min = Vec2::new(self.circuit_board_width, self.ui_panel_height);
        let screen = self.screen;
        let cbw = self.circuit_board_width;
        let Some(player) = self.world.get_mut(self.player) else {
            return;
        };
        player.move_by(dx, dy, dt);

        let max = Vec2::new(
            screen.x - cbw - player.size().x,
            screen.y - player.size().y,
        );
        let mut pos = player.pos();
        if pos.x < min.x {
            pos.x = min.x;
        } else if pos.x > max.x {
            pos.x = max.x;
        }
        if pos.y < min.y {
            pos.y = min.y;
        } else if pos.y > max.y {
            pos.y = max.y;
        }
        player.set_pos(pos);
    }

    /// Each obstacle hurts the player once per contact episode
    fn update_player_collisions(&mut self) {
        let Some(player_rect) = self.player().map(|p| p.rect()) else {
            return;
        };
        let hits: Vec<EntityId> = self
            .obstacles
            .iter()
            .filter(|id| !self.collided_obstacles.contains(id))
            .filter(|id| {
                self.world
                    .get(**id)
                    .is_some_and(|o| player_rect.colliderect(&o.rect()))
            })
            .copied()
            .collect();

        for id in hits {
            self.collided_obstacles.push(id);
            if let Some(player) = self.world.get_mut(self.player) {
                player.health -= COLLISION_DAMAGE;
            }
            self.play(SoundEffect::Hurt);
        }
    }

    fn update_projectiles(&mut self, dt: f32) {
        if self
            .projectiles
            .update(&mut self.world, self.player, dt)
            .is_some()
        {
            self.play(SoundEffect::Shoot);
            self.money -= SHOT_COST;
        }

        let mut spent = Vec::new();
        let mut hits = 0;
        for proj_id in &self.projectiles.active {
            let Some(proj) = self.world.get(*proj_id) else {
                spent.push(*proj_id);
                continue;
            };
            if proj.pos().y > self.screen.y {
                spent.push(*proj_id);
                continue;
            }
            let (rect, damage) = (proj.rect(), proj.damage);

            // A projectile is consumed by the first obstacle it touches
            let target = self.obstacles.iter().copied().find(|id| {
                self.world
                    .get(*id)
                    .is_some_and(|o| rect.colliderect(&o.rect()))
            });
            if let Some(target) = target {
                if let Some(obstacle) = self.world.get_mut(target) {
                    obstacle.health -= damage;
                }
                spent.push(*proj_id);
                hits += 1;
            }
        }

        for _ in 0..hits {
            self.play(SoundEffect::Explosion);
        }
        for proj_id in spent {
            self.projectiles.remove(&mut self.world, proj_id);
        }
    }

    fn refresh_hud(&mut self) {
        let view = self.view();
        let shop = ShopView {
            money: self.money,
            player_speed: view.player_speed,
            max_move_speed: self.settings.max_move_speed,
        };
        self.hud
            .refresh(&mut self.world, &self.textures.font, self.phase, &view, &shop);
    }
}
