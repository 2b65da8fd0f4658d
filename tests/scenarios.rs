//! End-to-end runs of a full scene with scripted input and recorded audio

use std::cell::RefCell;
use std::rc::Rc;

use datastream_defender::audio::{Audio, MUSIC_PATH, SoundEffect, SoundHandle};
use datastream_defender::consts::*;
use datastream_defender::platform::{HeadlessWindow, InputSymbol};
use datastream_defender::renderer::{RenderGroups, TextureInfo};
use datastream_defender::sim::{GamePhase, Scene, level_data};
use datastream_defender::{SceneError, Settings};
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

/// Audio backend that records every playback request by path
#[derive(Default)]
struct RecordingAudio {
    paths: Vec<String>,
    played: Rc<RefCell<Vec<String>>>,
}

impl RecordingAudio {
    fn load(&mut self, path: &str) -> SoundHandle {
        self.paths.push(path.to_string());
        SoundHandle(self.paths.len() as u32 - 1)
    }

    fn record(&mut self, handle: SoundHandle) {
        let path = self.paths[handle.0 as usize].clone();
        self.played.borrow_mut().push(path);
    }
}

impl Audio for RecordingAudio {
    fn load_sound(&mut self, path: &str) -> SoundHandle {
        self.load(path)
    }

    fn load_music(&mut self, path: &str) -> SoundHandle {
        self.load(path)
    }

    fn play_sound(&mut self, sound: SoundHandle) {
        self.record(sound);
    }

    fn play_music(&mut self, music: SoundHandle) {
        self.record(music);
    }
}

struct Harness {
    scene: Scene,
    window: HeadlessWindow,
    played: Rc<RefCell<Vec<String>>>,
}

impl Harness {
    fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    fn with_settings(settings: Settings) -> Self {
        let audio = RecordingAudio::default();
        let played = audio.played.clone();
        let textures = TextureInfo::placeholder();
        let groups = RenderGroups::standard(&textures);
        let window = HeadlessWindow::new(settings.screen_size(), DT);
        let scene = Scene::new(settings, textures, groups, Box::new(audio), &window).unwrap();
        Self {
            scene,
            window,
            played,
        }
    }

    /// Leave the intro and land in active play
    fn started() -> Self {
        let mut h = Self::new();
        h.tap(InputSymbol::Space);
        assert_eq!(h.scene.phase, GamePhase::Playing);
        h
    }

    fn frame(&mut self) {
        self.scene.update(&self.window);
        self.window.end_frame();
    }

    fn tap(&mut self, key: InputSymbol) {
        self.window.input.press(key);
        self.frame();
        self.window.input.release(key);
    }

    fn count(&self, effect: SoundEffect) -> usize {
        self.count_path(effect.path())
    }

    fn count_path(&self, path: &str) -> usize {
        self.played.borrow().iter().filter(|p| *p == path).count()
    }

    /// Fire one shot and park it, with its obstacle target, clear of the player
    fn fire_at(&mut self, target: datastream_defender::sim::EntityId) {
        self.scene.money = self.scene.money.max(10.0);
        self.scene.projectiles.cd_timer = 0.0;
        self.window.input.press(InputSymbol::Space);
        self.frame();
        self.window.input.release(InputSymbol::Space);

        let proj = *self.scene.projectiles.active.last().unwrap();
        self.scene
            .world
            .get_mut(proj)
            .unwrap()
            .set_pos(Vec2::new(600.0, 600.0));
        let obstacle = self.scene.world.get_mut(target).unwrap();
        obstacle.set_pos(Vec2::new(580.0, 620.0));
        obstacle.speed = 0.0;
    }
}

#[test]
fn test_two_hits_destroy_an_obstacle() {
    let mut h = Harness::started();
    let target = h.scene.add_obstacle();

    h.fire_at(target);
    h.frame();
    assert_eq!(h.scene.world.get(target).unwrap().health, 10);
    assert!(h.scene.projectiles.active.is_empty());
    assert_eq!(h.count(SoundEffect::Explosion), 1);

    h.fire_at(target);
    h.frame();
    assert_eq!(h.scene.world.get(target).unwrap().health, 0);
    assert_eq!(h.scene.enemies_killed, 0);

    // Collected on the following frame
    let money = h.scene.money;
    h.frame();
    assert!(!h.scene.world.contains(target));
    assert!(h.scene.obstacles.is_empty());
    assert_eq!(h.scene.score, KILL_REWARD);
    assert_eq!(h.scene.enemies_killed, 1);
    assert!((h.scene.money - (money + DT + KILL_REWARD as f32)).abs() < 1e-3);
    assert_eq!(h.count(SoundEffect::Explosion), 2);
    assert_eq!(h.count(SoundEffect::Shoot), 2);
}

#[test]
fn test_one_projectile_one_explosion() {
    let mut h = Harness::started();
    let first = h.scene.add_obstacle();
    let second = h.scene.add_obstacle();
    h.fire_at(first);
    let obstacle = h.scene.world.get_mut(second).unwrap();
    obstacle.set_pos(Vec2::new(590.0, 625.0));
    obstacle.speed = 0.0;

    h.frame();
    assert_eq!(h.scene.world.get(first).unwrap().health, OBSTACLE_HEALTH - PROJECTILE_DAMAGE);
    assert_eq!(h.scene.world.get(second).unwrap().health, OBSTACLE_HEALTH);
    assert_eq!(h.count(SoundEffect::Explosion), 1);
}

#[test]
fn test_breach_costs_health() {
    let mut h = Harness::started();
    let id = h.scene.add_obstacle();
    let obstacle = h.scene.world.get_mut(id).unwrap();
    let height = obstacle.size().y;
    obstacle.set_pos(Vec2::new(obstacle.pos().x, -height + 1.0));
    obstacle.speed = 120.0;

    h.frame();
    assert!(!h.scene.world.contains(id));
    assert!(h.scene.obstacles.is_empty());
    assert_eq!(h.scene.network_breaches, 1);
    assert_eq!(h.scene.player_health(), FULL_HEALTH - BREACH_DAMAGE);
    assert_eq!(h.count(SoundEffect::Hurt), 1);
}

#[test]
fn test_zero_health_ends_the_run() {
    let mut h = Harness::started();
    h.scene.money = 40.0;
    h.scene.time = 20.0;
    h.scene.score = 30;
    h.scene.world.get_mut(h.scene.player).unwrap().health = -5;

    h.frame();
    assert_eq!(h.scene.phase, GamePhase::GameOver);
    assert!(h.scene.is_game_over());
    assert_eq!(h.scene.player_health(), 0);
    assert_eq!(h.scene.bonus_score, 60.0);
    assert_eq!(h.scene.final_score, 90.0);

    // Frozen until restarted
    h.frame();
    assert_eq!(h.scene.time, 20.0);
    assert!(h.scene.hud.game_over_texts.iter().all(|t| t.visible));

    h.tap(InputSymbol::Space);
    assert_eq!(h.scene.phase, GamePhase::Intro);
    assert_eq!(h.scene.score, 0);
    assert_eq!(h.scene.player_health(), FULL_HEALTH);
    assert!(h.scene.hud.game_over_texts.iter().all(|t| !t.visible));
}

#[test]
fn test_level_up_after_interval() {
    let mut h = Harness::started();
    let player = h.scene.player;
    let mut frames = 0;
    while h.scene.current_level == 1 {
        h.scene.world.get_mut(player).unwrap().health = FULL_HEALTH;
        h.frame();
        frames += 1;
        assert!(frames < 2000, "level never advanced");
    }

    assert_eq!(h.scene.current_level, 2);
    assert!(h.scene.time >= LEVEL_INCREASE_INTERVAL - 1e-3);
    assert!(h.scene.time < LEVEL_INCREASE_INTERVAL + 2.0 * DT);
    assert!((h.scene.money - (h.scene.time + LEVEL_UP_BONUS)).abs() < 1e-2);

    let level = level_data(2);
    assert_eq!(h.scene.datastream_speed, level.datastream_speed);
    assert_eq!(h.scene.obstacles_freq, level.obstacles_freq);
    let spawner = h.scene.timers.get("add_obstacle").unwrap();
    assert_eq!(spawner.duration, level.obstacles_freq);
    assert!(!spawner.done);
    assert_eq!(spawner.elapsed, 0.0);
}

#[test]
fn test_pause_and_shop_halt_the_clock() {
    let mut h = Harness::started();
    let time = h.scene.time;

    h.tap(InputSymbol::KeyP);
    assert!(h.scene.is_paused());
    h.tap(InputSymbol::KeyF);
    assert_eq!(h.scene.phase, GamePhase::Paused);
    h.tap(InputSymbol::KeyP);
    assert_eq!(h.scene.phase, GamePhase::Playing);

    h.tap(InputSymbol::KeyF);
    assert!(h.scene.power_ups_panel_active());
    h.tap(InputSymbol::KeyP);
    assert_eq!(h.scene.phase, GamePhase::ShoppingPaused);
    h.tap(InputSymbol::KeyF);
    assert_eq!(h.scene.phase, GamePhase::Playing);

    // Only the two resume frames simulated
    assert!((h.scene.time - time - 2.0 * DT).abs() < 1e-5);
}

#[test]
fn test_shop_purchases_play_power_up() {
    let mut h = Harness::started();
    h.tap(InputSymbol::KeyF);
    h.scene.money = 60.0;

    h.tap(InputSymbol::Digit2);
    assert_eq!(h.count(SoundEffect::PowerUp), 1);
    assert!((h.scene.money - 10.0).abs() < 1e-4);

    // Unaffordable: no sound, no change
    h.tap(InputSymbol::Digit3);
    h.tap(InputSymbol::Digit1);
    assert_eq!(h.count(SoundEffect::PowerUp), 1);
    assert!((h.scene.money - 10.0).abs() < 1e-4);
}

#[test]
fn test_music_starts_once_per_process() {
    let mut h = Harness::new();
    h.frame();
    assert_eq!(h.count_path(MUSIC_PATH), 0);

    h.tap(InputSymbol::Space);
    h.frame();
    assert_eq!(h.count_path(MUSIC_PATH), 1);

    h.scene.world.get_mut(h.scene.player).unwrap().health = 0;
    h.frame();
    h.tap(InputSymbol::Space);
    h.tap(InputSymbol::Space);
    assert_eq!(h.scene.phase, GamePhase::Playing);
    assert_eq!(h.count_path(MUSIC_PATH), 1);
}

#[test]
fn test_same_seed_same_run() {
    let run = || {
        let mut h = Harness::started();
        h.window.input.press(InputSymbol::ArrowLeft);
        for _ in 0..600 {
            h.scene.world.get_mut(h.scene.player).unwrap().health = FULL_HEALTH;
            h.frame();
        }
        h.scene
            .obstacles
            .iter()
            .map(|id| {
                let o = h.scene.world.get(*id).unwrap();
                (o.pos(), o.speed, o.group())
            })
            .collect::<Vec<_>>()
    };
    let a = run();
    assert!(!a.is_empty());
    assert_eq!(a, run());
}

#[test]
fn test_instances_follow_draw_lists() {
    let mut h = Harness::started();
    let id = h.scene.add_obstacle();
    let group = h.scene.world.get(id).unwrap().group();
    let instances = h.scene.world.instances(group);
    assert_eq!(instances.len(), 1);
    let obstacle = h.scene.world.get(id).unwrap();
    assert_eq!(instances[0].rect[0], obstacle.pos().x);
    assert_eq!(instances[0].rect[3], obstacle.size().y);
}

#[test]
fn test_settings_json_drives_the_scene() {
    let settings = Settings::from_json(r#"{ "starting_money": 75.0, "seed": 7 }"#).unwrap();
    let mut h = Harness::with_settings(settings);
    h.frame();
    assert_eq!(h.scene.money, 75.0);
    assert_eq!(h.scene.settings().seed, 7);
    assert!(h.scene.hud.upgrade_hint.visible);

    let bad = Settings {
        screen_width: 0.0,
        ..Settings::default()
    };
    let textures = TextureInfo::placeholder();
    let groups = RenderGroups::standard(&textures);
    let err = Scene::new(
        bad,
        textures,
        groups,
        Box::new(RecordingAudio::default()),
        &h.window,
    )
    .err()
    .unwrap();
    assert!(matches!(err, SceneError::InvalidScreenSize { .. }));
}
