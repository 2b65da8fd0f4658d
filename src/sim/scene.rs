//! Scene state and construction
//!
//! The scene exclusively owns every entity, timer and counter. Hosts hand it
//! draw groups, texture metadata and an audio backend once, then call
//! `Scene::update` (see `tick.rs`) every frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::audio::{Audio, SfxBank, SoundEffect};
use crate::consts::*;
use crate::platform::Window;
use crate::error::{Result, SceneError};
use crate::renderer::{GroupId, RenderGroups, TextureInfo, group_names};
use crate::settings::Settings;
use crate::sim::entity::{Entity, EntityId, World};
use crate::sim::hud::Hud;
use crate::sim::level::{MAX_LEVEL, level_data};
use crate::sim::projectiles::Projectiles;
use crate::sim::text::HudView;
use crate::sim::timer::Timers;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Intro panel shown, simulation halted
    Intro,
    /// Active gameplay
    Playing,
    /// Manually paused
    Paused,
    /// Power-up shop open, simulation halted
    ShoppingPaused,
    /// Player health ran out; waits for restart
    GameOver,
}

/// What a scene timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    AddObstacle,
    IncrementLevel,
}

pub const ADD_OBSTACLE_TIMER: &str = "add_obstacle";
pub const INCREMENT_LEVEL_TIMER: &str = "increment_level";

/// Draw groups resolved once at construction
#[derive(Debug, Clone)]
pub(crate) struct SceneGroups {
    pub default: GroupId,
    pub player: GroupId,
    pub datastream: GroupId,
    pub circuit_board: GroupId,
    pub ui_panel: GroupId,
    pub font: GroupId,
    pub intro_panel: GroupId,
    /// One group and pixel size per obstacle variant
    pub obstacles: Vec<(GroupId, Vec2)>,
}

impl SceneGroups {
    fn resolve(groups: &RenderGroups, textures: &TextureInfo) -> Result<Self> {
        let obstacles = textures
            .obstacles
            .iter()
            .map(|o| Ok((groups.id(&o.group)?, o.size)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            default: groups.id(group_names::DEFAULT)?,
            player: groups.id(group_names::PLAYER)?,
            datastream: groups.id(group_names::DATASTREAM)?,
            circuit_board: groups.id(group_names::CIRCUIT_BOARD)?,
            ui_panel: groups.id(group_names::UI_PANEL)?,
            font: groups.id(group_names::FONT)?,
            intro_panel: groups.id(group_names::INTRO_PANEL)?,
            obstacles,
        })
    }
}

/// Paired scrolling strips; each pair is kept one screen-height apart
#[derive(Debug, Clone, Copy)]
pub struct Backgrounds {
    pub datastream: [EntityId; 2],
    pub left_circuit_board: [EntityId; 2],
    pub right_circuit_board: [EntityId; 2],
}

pub struct Scene {
    pub(crate) settings: Settings,
    pub(crate) textures: TextureInfo,
    pub(crate) groups: SceneGroups,
    pub(crate) audio: Box<dyn Audio>,
    pub(crate) sfx: SfxBank,
    pub(crate) rng: Pcg32,

    /// Every live entity and the draw lists that reference them
    pub world: World,
    pub phase: GamePhase,
    pub music_started: bool,
    /// Host wall-clock seconds at the last update; the renderer's time uniform
    pub wall_time: f64,

    // === Economy ===
    /// Seconds survived in this run
    pub time: f32,
    /// Accrues continuously at one unit per second of play
    pub money: f32,
    pub score: u32,
    pub enemies_killed: u32,
    pub network_breaches: u32,
    pub bonus_score: f32,
    pub final_score: f32,

    // === Difficulty ===
    pub current_level: u32,
    pub datastream_speed: f32,
    pub obstacles_freq: f32,
    pub obstacles_speed_range: (u32, u32),
    pub circuit_board_speed: f32,

    // === Layout ===
    pub screen: Vec2,
    pub ui_panel_height: f32,
    pub circuit_board_width: f32,

    // === Entities ===
    pub player: EntityId,
    pub backgrounds: Backgrounds,
    pub obstacles: Vec<EntityId>,
    /// Obstacles that already damaged the player on their current contact
    pub collided_obstacles: Vec<EntityId>,
    pub projectiles: Projectiles,
    pub hud: Hud,
    pub timers: Timers<TimerAction>,
}

impl Scene {
    /// Build a scene sized to `window`; `settings.screen_*` is only the size a
    /// host should request when it opens its window
    pub fn new(
        settings: Settings,
        textures: TextureInfo,
        render_groups: RenderGroups,
        mut audio: Box<dyn Audio>,
        window: &dyn Window,
    ) -> Result<Self> {
        settings.validate()?;
        let screen = window.size();
        if !(screen.x > 0.0 && screen.y > 0.0) {
            return Err(SceneError::InvalidScreenSize {
                width: screen.x,
                height: screen.y,
            });
        }
        textures.validate()?;
        let groups = SceneGroups::resolve(&render_groups, &textures)?;

        let sfx = SfxBank::load(audio.as_mut());
        audio.set_volumes(
            settings.effective_sfx_volume(),
            settings.effective_music_volume(),
        );

        let ui_panel_height = screen.y / 8.0;
        let circuit_board_width = (screen.x / 8.0).floor();
        let level = level_data(1);

        let mut world = World::new(render_groups);
        let player = spawn_player(&mut world, &groups, &textures, &settings, screen, ui_panel_height);
        let backgrounds = spawn_backgrounds(&mut world, &groups, screen, circuit_board_width);
        let hud = Hud::build(&mut world, &groups, &textures, screen, ui_panel_height);

        let mut scene = Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            projectiles: Projectiles::new(groups.default),
            settings,
            textures,
            groups,
            audio,
            sfx,
            world,
            phase: GamePhase::Intro,
            music_started: false,
            wall_time: window.time(),
            time: 0.0,
            money: 0.0,
            score: 0,
            enemies_killed: 0,
            network_breaches: 0,
            bonus_score: 0.0,
            final_score: 0.0,
            current_level: 1,
            datastream_speed: level.datastream_speed,
            obstacles_freq: level.obstacles_freq,
            obstacles_speed_range: level.obstacles_speed_range,
            circuit_board_speed: level.datastream_speed / 8.0,
            screen,
            ui_panel_height,
            circuit_board_width,
            player,
            backgrounds,
            obstacles: Vec::new(),
            collided_obstacles: Vec::new(),
            hud,
            timers: Timers::new(),
        };
        scene.money = scene.settings.starting_money;
        scene.add_recurring_timers();

        log::info!(
            "Scene ready: {}x{}, {} obstacle variants, seed {}",
            screen.x,
            screen.y,
            scene.groups.obstacles.len(),
            scene.settings.seed
        );
        Ok(scene)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn textures(&self) -> &TextureInfo {
        &self.textures
    }

    /// The player entity; always live between restarts
    pub fn player(&self) -> Option<&Entity> {
        self.world.get(self.player)
    }

    pub fn player_health(&self) -> i32 {
        self.player().map(|p| p.health).unwrap_or(0)
    }

    pub fn is_paused(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    pub fn intro_panel_active(&self) -> bool {
        self.phase == GamePhase::Intro
    }

    pub fn power_ups_panel_active(&self) -> bool {
        self.phase == GamePhase::ShoppingPaused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Read-only snapshot for text lines
    pub fn view(&self) -> HudView {
        let player = self.player();
        HudView {
            current_level: self.current_level,
            score: self.score,
            money: self.money,
            health: player.map(|p| p.health).unwrap_or(0),
            cd_duration: self.projectiles.cd_duration,
            player_speed: player.map(|p| p.speed).unwrap_or(0.0),
            enemies_killed: self.enemies_killed,
            network_breaches: self.network_breaches,
            time: self.time,
            bonus_score: self.bonus_score,
            final_score: self.final_score,
        }
    }

    pub(crate) fn play(&mut self, effect: SoundEffect) {
        let handle = self.sfx.handle(effect);
        self.audio.play_sound(handle);
    }

    fn add_recurring_timers(&mut self) {
        self.timers.add(
            ADD_OBSTACLE_TIMER,
            self.obstacles_freq,
            0,
            TimerAction::AddObstacle,
        );
        self.timers.add(
            INCREMENT_LEVEL_TIMER,
            self.settings.level_increase_interval,
            0,
            TimerAction::IncrementLevel,
        );
    }

    fn apply_level(&mut self) {
        let level = level_data(self.current_level);
        self.datastream_speed = level.datastream_speed;
        self.obstacles_speed_range = level.obstacles_speed_range;
        self.obstacles_freq = level.obstacles_freq;
    }

    /// Spawn a random obstacle variant at the far edge of the lane
    pub fn add_obstacle(&mut self) -> EntityId {
        let variant = self.rng.random_range(0..self.groups.obstacles.len());
        let (group, size) = self.groups.obstacles[variant];

        let lo = self.circuit_board_width as i32;
        let hi = ((self.screen.x - self.circuit_board_width - size.x) as i32).max(lo);
        let x = self.rng.random_range(lo..=hi) as f32;
        let (min_speed, max_speed) = self.obstacles_speed_range;
        let speed = self.rng.random_range(min_speed..=max_speed) as f32;

        let id = self.world.spawn(
            Entity::new(group, Vec2::new(x, self.screen.y), size)
                .with_depth(4.0)
                .with_speed(speed)
                .with_health(OBSTACLE_HEALTH),
        );
        self.obstacles.push(id);
        log::debug!("obstacle spawned: variant {variant}, x {x}, speed {speed}");
        id
    }

    /// Advance the level (capped at the last table entry) and restart the spawner
    pub fn increment_level(&mut self) {
        if self.current_level < MAX_LEVEL {
            self.current_level += 1;
        }
        self.apply_level();
        self.timers.stop(ADD_OBSTACLE_TIMER);
        self.timers.add(
            ADD_OBSTACLE_TIMER,
            self.obstacles_freq,
            0,
            TimerAction::AddObstacle,
        );
        self.money += LEVEL_UP_BONUS;
        log::info!(
            "Level {} (datastream {}, spawn every {}s)",
            self.current_level,
            self.datastream_speed,
            self.obstacles_freq
        );
    }

    /// Remove an obstacle from every collection that tracks it
    pub(crate) fn remove_obstacle(&mut self, id: EntityId) {
        self.obstacles.retain(|o| *o != id);
        self.collided_obstacles.retain(|o| *o != id);
        self.world.despawn(id);
    }

    /// Clamp health, freeze the run and tally the final score
    pub(crate) fn enter_game_over(&mut self) {
        if let Some(player) = self.world.get_mut(self.player) {
            player.health = player.health.max(0);
        }
        self.phase = GamePhase::GameOver;
        self.projectiles.is_shooting = false;
        self.bonus_score = self.money + self.time;
        self.final_score = self.score as f32 + self.bonus_score;
        log::info!(
            "Game over: score {}, bonus {:.0}, final {:.0}",
            self.score,
            self.bonus_score,
            self.final_score
        );
    }

    /// Tear down the run and rebuild it from scratch, back at the intro
    pub fn restart(&mut self) {
        self.obstacles.clear();
        self.collided_obstacles.clear();
        self.timers.clear();
        self.projectiles.reset(&mut self.world);
        self.world.clear();

        self.time = 0.0;
        self.money = self.settings.starting_money;
        self.score = 0;
        self.enemies_killed = 0;
        self.network_breaches = 0;
        self.bonus_score = 0.0;
        self.final_score = 0.0;
        self.current_level = 1;
        self.apply_level();

        self.player = spawn_player(
            &mut self.world,
            &self.groups,
            &self.textures,
            &self.settings,
            self.screen,
            self.ui_panel_height,
        );
        self.backgrounds = spawn_backgrounds(
            &mut self.world,
            &self.groups,
            self.screen,
            self.circuit_board_width,
        );
        self.hud = Hud::build(
            &mut self.world,
            &self.groups,
            &self.textures,
            self.screen,
            self.ui_panel_height,
        );
        self.add_recurring_timers();
        self.phase = GamePhase::Intro;
        log::info!("Game restarted");
    }
}

fn spawn_player(
    world: &mut World,
    groups: &SceneGroups,
    textures: &TextureInfo,
    settings: &Settings,
    screen: Vec2,
    ui_panel_height: f32,
) -> EntityId {
    let size = textures.player_img_size * PLAYER_SCALE;
    let pos = Vec2::new(
        (screen.x / 2.0).floor() - (size.x / 2.0).floor(),
        ui_panel_height + size.y,
    );
    world.spawn(
        Entity::new(groups.player, pos, size)
            .with_depth(3.0)
            .with_speed(settings.player_speed),
    )
}

fn spawn_backgrounds(
    world: &mut World,
    groups: &SceneGroups,
    screen: Vec2,
    circuit_board_width: f32,
) -> Backgrounds {
    let strip = Vec2::new(circuit_board_width, screen.y);
    let right_x = screen.x - circuit_board_width;

    let mut pair = |group: GroupId, x: f32, size: Vec2, tex: [u32; 2], depth: f32| {
        [
            world.spawn(
                Entity::new(group, Vec2::new(x, 0.0), size)
                    .with_tex(tex[0])
                    .with_depth(depth),
            ),
            world.spawn(
                Entity::new(group, Vec2::new(x, screen.y), size)
                    .with_tex(tex[1])
                    .with_depth(depth),
            ),
        ]
    };

    Backgrounds {
        datastream: pair(groups.datastream, 0.0, screen, [0, 0], 1.0),
        left_circuit_board: pair(groups.circuit_board, 0.0, strip, [0, 2], 2.0),
        right_circuit_board: pair(groups.circuit_board, right_x, strip, [1, 3], 2.0),
    }
}
