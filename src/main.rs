//! Datastream Defender headless driver
//!
//! Builds a scene with placeholder texture metadata and a silent audio backend,
//! then plays a scripted run and logs the outcome. Rendering and real input are
//! supplied by a host; this binary exists to exercise the simulation natively.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::{Path, PathBuf};

    use clap::Parser;

    use datastream_defender::audio::SilentAudio;
    use datastream_defender::platform::{HeadlessWindow, InputSymbol};
    use datastream_defender::renderer::{RenderGroups, TextureInfo};
    use datastream_defender::sim::{GamePhase, Scene};
    use datastream_defender::{Result, Settings};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const DEFAULT_FRAMES: u32 = 60 * 120;
    /// Frames spent sweeping in one direction before turning around
    const SWEEP_FRAMES: u32 = 90;

    #[derive(Parser)]
    #[command(name = "datastream-defender")]
    #[command(about = "Play a scripted headless run of Datastream Defender", long_about = None)]
    #[command(version)]
    struct Args {
        /// Settings JSON file (defaults apply to missing fields)
        settings: Option<PathBuf>,

        /// Maximum frames to simulate at 60 fps
        #[arg(default_value_t = DEFAULT_FRAMES)]
        frames: u32,
    }

    pub fn main() {
        let args = Args::parse();
        env_logger::init();
        log::info!("Datastream Defender (headless) starting...");

        let settings = match &args.settings {
            Some(path) => match load_settings(path) {
                Ok(settings) => settings,
                Err(e) => {
                    log::error!("Failed to load settings from {}: {e}", path.display());
                    std::process::exit(1);
                }
            },
            None => Settings::default(),
        };

        if let Err(e) = run(settings, args.frames) {
            log::error!("{e}");
            std::process::exit(1);
        }
    }

    fn load_settings(path: &Path) -> Result<Settings> {
        let json = std::fs::read_to_string(path)?;
        Settings::from_json(&json)
    }

    /// Autopilot: start the game, sweep side to side while firing, visit the shop
    /// whenever an upgrade is affordable, and stop at game over
    fn run(settings: Settings, frames: u32) -> Result<()> {
        let textures = TextureInfo::placeholder();
        let groups = RenderGroups::standard(&textures);
        let mut window = HeadlessWindow::new(settings.screen_size(), FRAME_DT);
        let mut scene = Scene::new(
            settings,
            textures,
            groups,
            Box::new(SilentAudio::new()),
            &window,
        )?;

        window.input.press(InputSymbol::Space);
        for frame in 0..frames {
            let sweep = if (frame / SWEEP_FRAMES) % 2 == 0 {
                (InputSymbol::ArrowLeft, InputSymbol::ArrowRight)
            } else {
                (InputSymbol::ArrowRight, InputSymbol::ArrowLeft)
            };
            window.input.release(sweep.0);
            window.input.press(sweep.1);

            match scene.phase {
                GamePhase::Playing if scene.money >= 150.0 => window.input.press(InputSymbol::KeyF),
                GamePhase::ShoppingPaused if scene.money >= 50.0 => {
                    window.input.press(InputSymbol::Digit2)
                }
                GamePhase::ShoppingPaused => window.input.press(InputSymbol::KeyF),
                _ => {}
            }

            scene.update(&window);
            window.end_frame();
            window.input.release(InputSymbol::KeyF);
            window.input.release(InputSymbol::Digit2);

            if frame % 600 == 0 {
                log::info!(
                    "frame {frame}: level {}, score {}, money {:.0}, health {}, obstacles {}",
                    scene.current_level,
                    scene.score,
                    scene.money,
                    scene.player_health(),
                    scene.obstacles.len()
                );
            }
            if scene.is_game_over() {
                break;
            }
        }

        log::info!(
            "Run ended after {:.1}s: {} kills, {} breaches, final score {:.0}",
            scene.time,
            scene.enemies_killed,
            scene.network_breaches,
            if scene.is_game_over() {
                scene.final_score
            } else {
                scene.score as f32
            }
        );
        for group in scene.world.groups().ids() {
            log::debug!(
                "group {}: {} sprites",
                scene.world.groups().name(group),
                scene.world.instances(group).len()
            );
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
