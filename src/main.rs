/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::GameConfig;
use domain::hero::{Hero, MAX_HEALTH};
use sim::level::{self, LevelData};
use sim::step::{self, FrameInput};
use sim::world::{Phase, World};
use ui::gamepad::GamepadState;
use ui::input::{self as keys, InputState};
use ui::renderer::{Renderer, Session};
use ui::sound::{self, SoundEngine};

const FRAME_SLEEP: Duration = Duration::from_millis(5);

/// Ticks a death or level-complete banner stays up before moving on.
const BANNER_TICKS: u32 = 20;

fn main() {
    init_tracing();
    let config = GameConfig::load();
    let levels = level::load_levels(&config);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();
    let result = game_loop(&levels, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    match result {
        Ok(score) => {
            println!();
            println!("Thanks for playing Nukum!");
            println!("Final Score: {score}");
        }
        Err(e) => eprintln!("Game error: {e}"),
    }
}

/// Log to `nukum.log`; the terminal belongs to the renderer.
fn init_tracing() {
    let file = match File::create("nukum.log") {
        Ok(f) => f,
        Err(_) => return,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
}

/// Level progression state.
struct Campaign<'a> {
    levels: &'a [LevelData],
    index: usize,
    /// Hero as it entered the current level; restored after a death.
    entry_hero: Hero,
    banner_ticks: u32,
}

impl<'a> Campaign<'a> {
    fn new(levels: &'a [LevelData]) -> Self {
        Campaign { levels, index: 0, entry_hero: Hero::new(), banner_ticks: 0 }
    }

    /// Build the current level, skipping any that fail to load.
    fn enter(&mut self, hero: Hero) -> Result<World, Box<dyn std::error::Error>> {
        while let Some(data) = self.levels.get(self.index) {
            match level::build(data, hero.clone()) {
                Ok(world) => {
                    self.entry_hero = world.hero.clone();
                    self.banner_ticks = 0;
                    return Ok(world);
                }
                Err(e) => {
                    warn!(level = %data.name, error = %e, "skipping level");
                    self.index += 1;
                }
            }
        }
        Err("no playable level".into())
    }

    fn session(&self) -> Session<'_> {
        Session {
            level_no: self.index,
            level_count: self.levels.len(),
            level_name: self.levels.get(self.index).map_or("", |l| l.name.as_str()),
        }
    }
}

/// Runs until the player quits or the last level is done; returns the score.
fn game_loop(
    levels: &[LevelData],
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<u64, Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    let tick_rate = Duration::from_millis(config.speed.tick_rate_ms);
    let mut last_tick = Instant::now();

    let mut campaign = Campaign::new(levels);
    let mut world = campaign.enter(Hero::new())?;

    // Edge-triggered presses seen between ticks.
    let mut pending_jump = false;
    let mut pending_fire = false;

    loop {
        kb.drain_events();
        gp.update();

        if kb.ctrl_c_pressed() || kb.any_pressed(keys::KEYS_QUIT) || gp.quit_pressed() {
            break;
        }
        if kb.any_pressed(keys::KEYS_PAUSE) || gp.pause_pressed() {
            world.paused = !world.paused;
            info!(paused = world.paused, "pause toggled");
        }

        pending_jump |= kb.any_pressed(keys::KEYS_JUMP) || gp.jump_pressed();
        pending_fire |= kb.any_pressed(keys::KEYS_FIRE) || gp.fire_pressed();

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            match world.phase {
                Phase::Playing => {
                    let input = FrameInput {
                        walk: kb.walk().or_else(|| gp.walk()),
                        jump: std::mem::take(&mut pending_jump),
                        fire: std::mem::take(&mut pending_fire),
                        interact: kb.any_active(keys::KEYS_INTERACT) || gp.interact_held(),
                    };
                    let events = step::step(&mut world, input);
                    sound::play_events(sound, &events);
                }
                Phase::HeroDead => {
                    campaign.banner_ticks += 1;
                    if campaign.banner_ticks >= BANNER_TICKS {
                        let mut hero = campaign.entry_hero.clone();
                        hero.set_health(MAX_HEALTH, &mut vec![]);
                        info!(level = campaign.index, "restarting level");
                        world = campaign.enter(hero)?;
                    }
                }
                Phase::Finished => {
                    campaign.banner_ticks += 1;
                    if campaign.banner_ticks >= BANNER_TICKS {
                        campaign.index += 1;
                        if campaign.index >= levels.len() {
                            info!(score = world.hero.score(), "all levels complete");
                            return Ok(world.hero.score());
                        }
                        let hero = world.hero.clone();
                        world = campaign.enter(hero)?;
                    }
                }
            }
        }

        renderer.render(&mut world, &campaign.session())?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(world.hero.score())
}
