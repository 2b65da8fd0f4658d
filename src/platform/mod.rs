//! Platform abstraction layer
//!
//! The scene polls a [`Window`] once per frame for:
//! - Screen size
//! - Frame delta and wall time
//! - Held / just-pressed input queries
//!
//! Hosts implement [`Window`] over their windowing backend. [`InputState`]
//! is a ready-made key tracker they can feed from raw key events.

pub mod input;

pub use input::{InputState, InputSymbol};

use glam::Vec2;

/// Window/input collaborator polled by the scene
pub trait Window {
    /// Screen size in pixels
    fn size(&self) -> Vec2;
    /// Seconds elapsed since the previous frame
    fn frame_time(&self) -> f32;
    /// Wall-clock seconds since the host started
    fn time(&self) -> f64;
    /// True every frame the symbol is held down
    fn key_down(&self, key: InputSymbol) -> bool;
    /// True only on the frame the symbol went down
    fn key_pressed(&self, key: InputSymbol) -> bool;
}

/// A headless window driven entirely by the caller
///
/// Used by the native driver and by tests: set `dt`, press/release keys,
/// hand it to `Scene::update`, then call [`HeadlessWindow::end_frame`].
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    pub size: Vec2,
    pub dt: f32,
    pub elapsed: f64,
    pub input: InputState,
}

impl HeadlessWindow {
    pub fn new(size: Vec2, dt: f32) -> Self {
        Self {
            size,
            dt,
            elapsed: 0.0,
            input: InputState::new(),
        }
    }

    /// Advance wall time and clear edge-triggered input
    pub fn end_frame(&mut self) {
        self.elapsed += self.dt as f64;
        self.input.end_frame();
    }
}

impl Window for HeadlessWindow {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn frame_time(&self) -> f32 {
        self.dt
    }

    fn time(&self) -> f64 {
        self.elapsed
    }

    fn key_down(&self, key: InputSymbol) -> bool {
        self.input.is_held(key)
    }

    fn key_pressed(&self, key: InputSymbol) -> bool {
        self.input.is_just_pressed(key)
    }
}
