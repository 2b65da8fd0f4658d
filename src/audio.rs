//! Audio collaborator interface
//!
//! The scene loads its sounds by path once at construction and afterwards only
//! fires playback requests. Playback never reports failure back to the core.

/// Opaque handle returned by the audio backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Projectile hits an obstacle
    Explosion,
    /// Projectile fired
    Shoot,
    /// Shop upgrade bought
    PowerUp,
    /// Player collides with an obstacle or the lane is breached
    Hurt,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Explosion,
        SoundEffect::Shoot,
        SoundEffect::PowerUp,
        SoundEffect::Hurt,
    ];

    /// Asset path handed to the backend
    pub fn path(&self) -> &'static str {
        match self {
            SoundEffect::Explosion => "assets/sfx/explosion.ogg",
            SoundEffect::Shoot => "assets/sfx/laserShoot.ogg",
            SoundEffect::PowerUp => "assets/sfx/pickupCoin.ogg",
            SoundEffect::Hurt => "assets/sfx/hitHurt.ogg",
        }
    }
}

/// Background music track
pub const MUSIC_PATH: &str = "assets/sfx/Galactic Lights.ogg";

/// Audio backend implemented by the host
pub trait Audio {
    fn load_sound(&mut self, path: &str) -> SoundHandle;
    fn load_music(&mut self, path: &str) -> SoundHandle;
    /// Fire-and-forget
    fn play_sound(&mut self, sound: SoundHandle);
    /// Loops until the process ends
    fn play_music(&mut self, music: SoundHandle);
    /// Apply volumes (0.0 - 1.0); backends without mixing may ignore this
    fn set_volumes(&mut self, _sfx: f32, _music: f32) {}
}

/// Handles for every sound the scene plays
#[derive(Debug, Clone)]
pub struct SfxBank {
    explosion: SoundHandle,
    shoot: SoundHandle,
    power_up: SoundHandle,
    hurt: SoundHandle,
    music: SoundHandle,
}

impl SfxBank {
    pub fn load(audio: &mut dyn Audio) -> Self {
        let bank = Self {
            explosion: audio.load_sound(SoundEffect::Explosion.path()),
            shoot: audio.load_sound(SoundEffect::Shoot.path()),
            power_up: audio.load_sound(SoundEffect::PowerUp.path()),
            hurt: audio.load_sound(SoundEffect::Hurt.path()),
            music: audio.load_music(MUSIC_PATH),
        };
        log::debug!("Loaded {} sound effects and music", SoundEffect::ALL.len());
        bank
    }

    pub fn handle(&self, effect: SoundEffect) -> SoundHandle {
        match effect {
            SoundEffect::Explosion => self.explosion,
            SoundEffect::Shoot => self.shoot,
            SoundEffect::PowerUp => self.power_up,
            SoundEffect::Hurt => self.hurt,
        }
    }

    pub fn music(&self) -> SoundHandle {
        self.music
    }
}

/// Audio backend that plays nothing and logs requests
#[derive(Debug, Default)]
pub struct SilentAudio {
    loaded: Vec<String>,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }

    fn load(&mut self, path: &str) -> SoundHandle {
        self.loaded.push(path.to_string());
        SoundHandle(self.loaded.len() as u32 - 1)
    }

    fn name(&self, handle: SoundHandle) -> &str {
        self.loaded
            .get(handle.0 as usize)
            .map(String::as_str)
            .unwrap_or("<unknown>")
    }
}

impl Audio for SilentAudio {
    fn load_sound(&mut self, path: &str) -> SoundHandle {
        self.load(path)
    }

    fn load_music(&mut self, path: &str) -> SoundHandle {
        self.load(path)
    }

    fn play_sound(&mut self, sound: SoundHandle) {
        log::trace!("play sound {}", self.name(sound));
    }

    fn play_music(&mut self, music: SoundHandle) {
        log::debug!("play music {}", self.name(music));
    }
}
