/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
///
/// ```toml
/// [speed]
/// tick_rate_ms = 100
///
/// [gamepad]
/// jump = ["A"]
/// fire = ["B", "X"]
///
/// [general]
/// level_file = "levels.txt"
/// ```

use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub gamepad: GamepadConfig,
    /// Text level file replacing the built-in levels.
    pub level_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeedConfig {
    pub tick_rate_ms: u64,
}

/// Gamepad button names per action (gilrs button names, see `ui::gamepad`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GamepadConfig {
    pub jump: Vec<String>,
    pub fire: Vec<String>,
    pub interact: Vec<String>,
    pub pause: Vec<String>,
    pub quit: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_jump")]
    jump: Vec<String>,
    #[serde(default = "default_fire")]
    fire: Vec<String>,
    #[serde(default = "default_interact")]
    interact: Vec<String>,
    #[serde(default = "default_pause")]
    pause: Vec<String>,
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    level_file: Option<String>,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 100 }

fn default_jump() -> Vec<String> { vec!["A".into()] }
fn default_fire() -> Vec<String> { vec!["B".into(), "X".into()] }
fn default_interact() -> Vec<String> { vec!["Y".into(), "DPadUp".into()] }
fn default_pause() -> Vec<String> { vec!["Start".into()] }
fn default_quit() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { tick_rate_ms: default_tick_rate() }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            jump: default_jump(),
            fire: default_fire(),
            interact: default_interact(),
            pause: default_pause(),
            quit: default_quit(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default(), &[])
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        GameConfig::from_toml(toml_cfg, &search_dirs)
    }

    /// Parse config text; a malformed file yields the defaults.
    pub fn parse(text: &str) -> Self {
        let toml_cfg = toml::from_str::<TomlConfig>(text).unwrap_or_else(|e| {
            warn!(error = %e, "config.toml parse error, using default settings");
            TomlConfig::default()
        });
        GameConfig::from_toml(toml_cfg, &[])
    }

    fn from_toml(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        // A relative level file is looked up next to the config first.
        let level_file = toml_cfg.general.level_file.map(|name| {
            let path = PathBuf::from(&name);
            if path.is_absolute() { return path; }
            search_dirs.iter()
                .map(|d| d.join(&name))
                .find(|p| p.is_file())
                .unwrap_or(path)
        });

        GameConfig {
            speed: SpeedConfig {
                tick_rate_ms: toml_cfg.speed.tick_rate_ms.max(1),
            },
            gamepad: GamepadConfig {
                jump: toml_cfg.gamepad.jump,
                fire: toml_cfg.gamepad.fire,
                interact: toml_cfg.gamepad.interact,
                pause: toml_cfg.gamepad.pause,
                quit: toml_cfg.gamepad.quit,
            },
            level_file,
        }
    }
}

/// Candidate directories to search: exe dir + CWD + XDG data (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/nukum");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() { continue; }
        match std::fs::read_to_string(&path) {
            Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                Ok(cfg) => {
                    info!(path = %path.display(), "config loaded");
                    return cfg;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "config.toml parse error, using default settings");
                    return TomlConfig::default();
                }
            },
            Err(e) => warn!(path = %path.display(), error = %e, "could not read config"),
        }
    }
    TomlConfig::default()
}
