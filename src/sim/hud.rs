//! UI panels and text lines
//!
//! Panels are ordinary entities collapsed to zero size while hidden. Text lines
//! are blanked while hidden; their glyph rows stay registered.

use glam::Vec2;

use crate::consts::*;
use crate::renderer::{FontAtlas, TextureInfo};
use crate::sim::entity::{Entity, EntityId, World};
use crate::sim::scene::{GamePhase, SceneGroups};
use crate::sim::text::{HudView, TextLine, TextSource};

/// Name tag of the move-speed shop button
pub const MOVE_SPEED_BUTTON: &str = "move_speed";

const BUTTON_SIZE: Vec2 = Vec2::new(150.0, 150.0);
const BUTTON_GAP: f32 = 50.0;
const TEXT_DEPTH: f32 = 11.0;

/// Button textures
const TEX_UNAFFORDABLE: u32 = 0;
const TEX_AFFORDABLE: u32 = 1;
const TEX_MAXED: u32 = 2;

/// Label rows under each shop button: (text, x offset), y offsets shared
const BUTTON_LABEL_Y: [f32; 5] = [-50.0, 10.0, 50.0, 90.0, 160.0];
const MOVE_SPEED_LABELS: [(&str, f32); 5] = [
    ("-$50", 35.0),
    ("+10%", 35.0),
    ("Move", 35.0),
    ("Speed", 25.0),
    ("Press[1]", -2.0),
];
const RELOAD_LABELS: [(&str, f32); 5] = [
    ("-$50", 35.0),
    ("+10%", 35.0),
    ("Reload", 15.0),
    ("Speed", 25.0),
    ("Press[2]", -2.0),
];
const HEALTH_LABELS: [(&str, f32); 5] = [
    ("-$100", 15.0),
    ("Full", 35.0),
    ("Health", 15.0),
    ("Regen", 25.0),
    ("Press[3]", -2.0),
];

/// Shop-relevant state the panel reflects
#[derive(Debug, Clone, Copy)]
pub struct ShopView {
    pub money: f32,
    pub player_speed: f32,
    pub max_move_speed: f32,
}

#[derive(Debug, Clone)]
pub struct Hud {
    pub ui_panel: EntityId,
    pub intro_panel: EntityId,
    pub power_ups_panel: EntityId,
    pub game_over_panel: EntityId,
    /// Move speed, reload speed, full health (left to right)
    pub power_up_buttons: [EntityId; 3],
    pub status_texts: Vec<TextLine>,
    pub upgrade_hint: TextLine,
    pub power_up_texts: Vec<TextLine>,
    pub game_over_texts: Vec<TextLine>,
    intro_panel_size: Vec2,
    popup_size: Vec2,
}

fn centered(screen: Vec2, size: Vec2) -> Vec2 {
    (screen / 2.0).floor() - (size / 2.0).floor()
}

impl Hud {
    /// Spawn every panel and button and lay out the text lines.
    /// Glyphs are created lazily on the first refresh.
    pub(crate) fn build(
        world: &mut World,
        groups: &SceneGroups,
        textures: &TextureInfo,
        screen: Vec2,
        ui_panel_height: f32,
    ) -> Self {
        let text = |source: TextSource, x: f32, y: f32| {
            TextLine::new(source, groups.font, Vec2::new(x, y), TEXT_DEPTH)
        };

        let ui_panel = world.spawn(
            Entity::new(groups.ui_panel, Vec2::ZERO, Vec2::new(screen.x, ui_panel_height))
                .with_depth(9.0),
        );

        let status_texts = vec![
            text(TextSource::Level, 10.0, 10.0),
            text(TextSource::Score, 10.0, 48.0),
            text(TextSource::Money, 250.0, 48.0),
            text(TextSource::Health, 250.0, 10.0),
            text(TextSource::ReloadSpeed, screen.x - 450.0, 10.0),
            text(TextSource::MoveSpeed, screen.x - 450.0, 48.0),
        ];
        let upgrade_hint = text(
            TextSource::UpgradeHint,
            (screen.x / 2.0).floor() - 250.0,
            10.0,
        );

        // Shop panel and its three buttons
        let popup_size = (screen / 2.0).floor();
        let popup_pos = centered(screen, popup_size);
        let power_ups_panel = world.spawn(
            Entity::new(groups.default, popup_pos, popup_size)
                .with_tex(2)
                .with_depth(9.0),
        );
        let center = popup_pos + popup_size / 2.0 - BUTTON_SIZE / 2.0;
        let center = center.floor();
        let step = Vec2::new(BUTTON_SIZE.x + BUTTON_GAP, 0.0);
        let button_pos = [center - step, center, center + step];
        let button = |world: &mut World, pos: Vec2, cost: i32, name: &str| {
            world.spawn(
                Entity::new(groups.default, pos, Vec2::ZERO)
                    .with_depth(10.0)
                    .with_cost(cost)
                    .with_name(name),
            )
        };
        let power_up_buttons = [
            button(world, button_pos[0], MOVE_SPEED_UPGRADE_COST, MOVE_SPEED_BUTTON),
            button(world, button_pos[1], RELOAD_UPGRADE_COST, "reload_speed"),
            button(world, button_pos[2], HEALTH_UPGRADE_COST, "full_health"),
        ];

        let mut power_up_texts = Vec::with_capacity(15);
        for (pos, labels) in button_pos
            .iter()
            .zip([MOVE_SPEED_LABELS, RELOAD_LABELS, HEALTH_LABELS])
        {
            for ((label, dx), dy) in labels.iter().zip(BUTTON_LABEL_Y) {
                let mut line = text(TextSource::fixed(label), pos.x + dx, pos.y + dy);
                line.visible = false;
                power_up_texts.push(line);
            }
        }

        let intro_panel_size = textures.intro_panel_size;
        let intro_panel = world.spawn(
            Entity::new(
                groups.intro_panel,
                centered(screen, intro_panel_size),
                intro_panel_size,
            )
            .with_tex(4)
            .with_depth(12.0),
        );

        let game_over_panel = world.spawn(
            Entity::new(groups.ui_panel, popup_pos, Vec2::ZERO).with_depth(9.0),
        );
        let game_over_rows = [
            (TextSource::fixed("GAME OVER!"), 10.0),
            (TextSource::EnemiesKilled, 86.0),
            (TextSource::NetworkBreaches, 124.0),
            (TextSource::TimeSurvived, 162.0),
            (TextSource::MoneyRemaining, 200.0),
            (TextSource::Score, 238.0),
            (TextSource::BonusScore, 276.0),
            (TextSource::FinalScore, 314.0),
            (TextSource::fixed("Press SPACE to restart"), 390.0),
        ];
        let game_over_texts = game_over_rows
            .into_iter()
            .map(|(source, dy)| {
                let mut line = text(source, popup_pos.x + 10.0, popup_pos.y + dy);
                line.visible = false;
                line
            })
            .collect();

        Self {
            ui_panel,
            intro_panel,
            power_ups_panel,
            game_over_panel,
            power_up_buttons,
            status_texts,
            upgrade_hint,
            power_up_texts,
            game_over_texts,
            intro_panel_size,
            popup_size,
        }
    }

    /// Show the panels that belong to `phase`, hide the rest, and refresh text
    pub fn refresh(
        &mut self,
        world: &mut World,
        font: &FontAtlas,
        phase: GamePhase,
        view: &HudView,
        shop: &ShopView,
    ) {
        let resize = |world: &mut World, id: EntityId, size: Vec2| {
            if let Some(e) = world.get_mut(id) {
                e.set_size(size);
            }
        };

        let intro = phase == GamePhase::Intro;
        resize(world, self.intro_panel, if intro { self.intro_panel_size } else { Vec2::ZERO });

        let game_over = phase == GamePhase::GameOver;
        resize(world, self.game_over_panel, if game_over { self.popup_size } else { Vec2::ZERO });
        for line in &mut self.game_over_texts {
            line.visible = game_over;
            line.update(world, font, view);
        }

        let shopping = phase == GamePhase::ShoppingPaused;
        resize(world, self.power_ups_panel, if shopping { self.popup_size } else { Vec2::ZERO });
        for id in self.power_up_buttons {
            let Some(button) = world.get_mut(id) else {
                continue;
            };
            if !shopping {
                button.set_size(Vec2::ZERO);
                continue;
            }
            button.set_size(BUTTON_SIZE);
            button.tex_idx = if button.name == MOVE_SPEED_BUTTON
                && shop.player_speed >= shop.max_move_speed
            {
                TEX_MAXED
            } else if shop.money >= button.cost as f32 {
                TEX_AFFORDABLE
            } else {
                TEX_UNAFFORDABLE
            };
        }
        for line in &mut self.power_up_texts {
            line.visible = shopping;
            line.update(world, font, view);
        }

        for line in &mut self.status_texts {
            line.update(world, font, view);
        }
        self.upgrade_hint.visible = view.money >= MOVE_SPEED_UPGRADE_COST as f32;
        self.upgrade_hint.update(world, font, view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scene::tests::scene;

    fn shop(money: f32, player_speed: f32) -> ShopView {
        ShopView {
            money,
            player_speed,
            max_move_speed: MAX_MOVE_SPEED,
        }
    }

    fn size_of(world: &World, id: EntityId) -> Vec2 {
        world.get(id).unwrap().size()
    }

    #[test]
    fn test_intro_shows_only_intro_panel() {
        let mut scene = scene();
        let font = scene.textures().font.clone();
        let view = scene.view();
        scene
            .hud
            .refresh(&mut scene.world, &font, GamePhase::Intro, &view, &shop(0.0, 500.0));
        let hud = &scene.hud;
        assert_ne!(size_of(&scene.world, hud.intro_panel), Vec2::ZERO);
        assert_eq!(size_of(&scene.world, hud.power_ups_panel), Vec2::ZERO);
        assert_eq!(size_of(&scene.world, hud.game_over_panel), Vec2::ZERO);
    }

    #[test]
    fn test_shop_button_textures() {
        let mut scene = scene();
        let font = scene.textures().font.clone();
        let view = scene.view();
        scene.hud.refresh(
            &mut scene.world,
            &font,
            GamePhase::ShoppingPaused,
            &view,
            &shop(60.0, MAX_MOVE_SPEED),
        );
        let [move_speed, reload, health] = scene.hud.power_up_buttons;
        let tex = |id| scene.world.get(id).unwrap().tex_idx;
        assert_eq!(tex(move_speed), TEX_MAXED);
        assert_eq!(tex(reload), TEX_AFFORDABLE);
        assert_eq!(tex(health), TEX_UNAFFORDABLE);
        assert_eq!(size_of(&scene.world, reload), BUTTON_SIZE);
        assert!(scene.hud.power_up_texts.iter().all(|t| t.visible));
        assert_eq!(scene.hud.power_up_texts.len(), 15);
    }

    #[test]
    fn test_leaving_shop_collapses_buttons() {
        let mut scene = scene();
        let font = scene.textures().font.clone();
        let view = scene.view();
        let shop = shop(0.0, 500.0);
        scene
            .hud
            .refresh(&mut scene.world, &font, GamePhase::ShoppingPaused, &view, &shop);
        scene
            .hud
            .refresh(&mut scene.world, &font, GamePhase::Playing, &view, &shop);
        for id in scene.hud.power_up_buttons {
            assert_eq!(size_of(&scene.world, id), Vec2::ZERO);
        }
        assert!(scene.hud.power_up_texts.iter().all(|t| !t.visible));
    }

    #[test]
    fn test_upgrade_hint_follows_money() {
        let mut scene = scene();
        let font = scene.textures().font.clone();
        let mut view = scene.view();
        view.money = 49.0;
        let s = shop(view.money, 500.0);
        scene
            .hud
            .refresh(&mut scene.world, &font, GamePhase::Playing, &view, &s);
        assert!(!scene.hud.upgrade_hint.visible);
        view.money = 50.0;
        scene
            .hud
            .refresh(&mut scene.world, &font, GamePhase::Playing, &view, &s);
        assert!(scene.hud.upgrade_hint.visible);
    }
}
