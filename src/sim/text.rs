//! Text lines rendered as rows of glyph entities
//!
//! A line's content comes from a [`TextSource`] evaluated against a read-only
//! [`HudView`] of the scene counters. The glyph row only ever grows: slots past
//! the end of the current string are blanked rather than despawned.

use glam::Vec2;

use crate::renderer::{FontAtlas, GroupId};
use crate::sim::entity::{Entity, EntityId, World};
use crate::sim::level::MAX_LEVEL;

/// Snapshot of the counters text lines may display
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HudView {
    pub current_level: u32,
    pub score: u32,
    pub money: f32,
    pub health: i32,
    /// Projectile cooldown in seconds
    pub cd_duration: f32,
    pub player_speed: f32,
    pub enemies_killed: u32,
    pub network_breaches: u32,
    /// Seconds survived
    pub time: f32,
    pub bonus_score: f32,
    pub final_score: f32,
}

/// What a text line shows
#[derive(Debug, Clone, PartialEq)]
pub enum TextSource {
    Static(String),
    Level,
    Score,
    Money,
    Health,
    UpgradeHint,
    ReloadSpeed,
    MoveSpeed,
    EnemiesKilled,
    NetworkBreaches,
    TimeSurvived,
    MoneyRemaining,
    BonusScore,
    FinalScore,
}

impl TextSource {
    pub fn fixed(text: &str) -> Self {
        TextSource::Static(text.to_string())
    }

    pub fn render(&self, view: &HudView) -> String {
        match self {
            TextSource::Static(text) => text.clone(),
            TextSource::Level => {
                if view.current_level < MAX_LEVEL {
                    format!("Level: {}", view.current_level)
                } else {
                    "Level: MAX".to_string()
                }
            }
            TextSource::Score => format!("Score: {}", view.score),
            TextSource::Money => format!("Money: ${:.0}", view.money),
            TextSource::Health => format!("Health: {}", view.health),
            TextSource::UpgradeHint => "Get Upgrade! (Press F)".to_string(),
            TextSource::ReloadSpeed => {
                let rate = if view.cd_duration > 0.0 {
                    1.0 / view.cd_duration
                } else {
                    0.0
                };
                format!("Reload Speed: {rate:.2}")
            }
            TextSource::MoveSpeed => format!("Move Speed: {:.2}", view.player_speed / 100.0),
            TextSource::EnemiesKilled => format!("Enemies Killed: {}", view.enemies_killed),
            TextSource::NetworkBreaches => format!("Network Breaches: {}", view.network_breaches),
            TextSource::TimeSurvived => format!("Time Survived: {:.0} seconds", view.time),
            TextSource::MoneyRemaining => format!("Money Remaining: {:.0}", view.money),
            TextSource::BonusScore => {
                format!("Bonus Score (money + time): {:.0}", view.bonus_score)
            }
            TextSource::FinalScore => format!("Final Score: {:.0}", view.final_score),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextLine {
    pub source: TextSource,
    /// Top-left of the first glyph
    pub pos: Vec2,
    pub depth: f32,
    /// Hidden lines render as an empty string
    pub visible: bool,
    glyphs: Vec<EntityId>,
    group: GroupId,
}

impl TextLine {
    pub fn new(source: TextSource, group: GroupId, pos: Vec2, depth: f32) -> Self {
        Self {
            source,
            pos,
            depth,
            visible: true,
            glyphs: Vec::new(),
            group,
        }
    }

    pub fn glyphs(&self) -> &[EntityId] {
        &self.glyphs
    }

    /// Replace the glyph row with `count` fresh glyphs
    fn create_glyphs(&mut self, world: &mut World, font: &FontAtlas, count: usize) {
        for glyph in self.glyphs.drain(..) {
            world.despawn(glyph);
        }
        self.glyphs = (0..count)
            .map(|i| {
                let pos = Vec2::new(self.pos.x + i as f32 * font.glyph_size.x, self.pos.y);
                world.spawn(Entity::new(self.group, pos, font.glyph_size).with_depth(self.depth))
            })
            .collect();
    }

    /// Re-evaluate the source and retexture the glyph row
    pub fn update(&mut self, world: &mut World, font: &FontAtlas, view: &HudView) {
        let text = if self.visible {
            self.source.render(view)
        } else {
            String::new()
        };
        let len = text.chars().count();
        if len > self.glyphs.len() {
            self.create_glyphs(world, font, len);
        }

        let blank = font.blank().unwrap_or(0);
        let mut chars = text.chars();
        for glyph in &self.glyphs {
            let tex_idx = match chars.next() {
                Some(c) => font.index(c).unwrap_or_else(|| {
                    log::warn!("no glyph for {c:?}, drawing blank");
                    blank
                }),
                None => blank,
            };
            if let Some(entity) = world.get_mut(*glyph) {
                entity.tex_idx = tex_idx;
            }
        }
    }
}
