/// Level loader.
///
/// ## Sources (priority order):
///   1. `[general] level_file` from the config, when set and readable
///   2. Built-in embedded levels
///
/// ## Text format:
///   ```
///   # Level Name
///   <map rows>
///   ---
///   # Next Level
///   <map rows>
///   ```
///
/// Levels are separated by a line containing only `---`. The first line of a
/// section is the name when it starts with `#` and contains a letter (a
/// border row of `#` never does). Rows shorter than the first are padded with
/// empty cells; a longer row is an error.
///
/// ## Legend
///
/// One glyph per 16×16 cell. Actors are anchored at the top-left cell of
/// their footprint; a two-tile actor covers the cell below or to the right
/// of its glyph as well.
///
///   Tiles      ' ' empty   '.' backdrop   '#' wall   '=' girder
///              '<' '>' conveyor (left/right)   '~' unstable floor
///   Hero       '@' (feet cell; the hero stands in this cell and the one above)
///   Bots       'r' robot   'n' flame gnome   'f' foot bot   'w' fire wheel
///              't' tankbot   '(' ')' wallcrawler left/right
///              'o' 'O' red ball jumping/lying   's' camera
///   Hazards    '^' 'v' spikes up/down   '!' spike   'z' electric arc
///              '}' '{' fire right/left   'A' acme   'm' mill   'b' bomb
///   Mechanisms 'L' lift   'R' 'B' 'P' 'G' doors   '1'-'4' keyholes
///              'a' access card door   'S' access card slot   'g' glove slot
///              'x' expanding floor   'X' exit door   'T' 'Y' teleporters
///              'F' 'j' fan left/right   'Q' rocket
///   Items      '5'-'8' keys   'c' access card   'l' glove   'q' boot
///              'p' clamp   'u' gun   '+' full life   'i' soda   'd' chicken
///              '%' football   '&' flag   '*' radio   'J' joystick   'I' disk
///              'Z' balloon   'N' notebook   'D' 'U' 'K' 'E' 'M' letters
///   Boxes      '0' grey empty   '9' grey gun   'W' grey boot
///              'V' grey full life   'H' grey bomb   'k' grey access card
///              'e' red soda   'C' red chicken   '$' blue disk   '?' blue balloon
///   Decor      ':' stone   '|' screen   ',' fence

use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::domain::actor::ActorType;
use crate::domain::hero::{Hero, HERO_HEIGHT};
use crate::domain::tile::{Tile, TileGrid, TILE_HEIGHT, TILE_WIDTH};
use crate::sim::world::{World, MESSAGE_TICKS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level text contains no level")]
    Empty,
    #[error("line {line}: row is {width} cells wide, expected at most {expected}")]
    Ragged { line: usize, width: usize, expected: usize },
    #[error("line {line}, column {column}: unknown glyph {glyph:?}")]
    UnknownGlyph { line: usize, column: usize, glyph: char },
    #[error("level `{0}` has no hero start `@`")]
    MissingHero(String),
}

/// A parsed but not yet built level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelData {
    pub name: String,
    pub rows: Vec<String>,
    /// 1-based line of the first map row in the source text.
    pub first_line: usize,
}

/// What one map glyph puts into the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Glyph {
    Tile(Tile),
    Actor(ActorType),
    /// A floor tile driven by an actor placed on the first cell of each run.
    Floor(Tile, ActorType),
    Hero,
}

fn glyph(ch: char) -> Option<Glyph> {
    use ActorType::*;
    let g = match ch {
        ' ' => Glyph::Tile(Tile::Empty),
        '.' => Glyph::Tile(Tile::Backdrop),
        '#' => Glyph::Tile(Tile::Wall),
        '=' => Glyph::Tile(Tile::Girder),
        '<' => Glyph::Floor(Tile::Conveyor, ConveyorLeft),
        '>' => Glyph::Floor(Tile::Conveyor, ConveyorRight),
        '~' => Glyph::Floor(Tile::Crumbly, UnstableFloor),
        '@' => Glyph::Hero,
        _ => Glyph::Actor(actor_glyph(ch)?),
    };
    Some(g)
}

fn actor_glyph(ch: char) -> Option<ActorType> {
    use ActorType::*;
    let kind = match ch {
        // ── Bots ──
        'r' => Robot,
        'n' => FlameGnomeBot,
        'f' => FootBot,
        'w' => FireWheelBot,
        't' => TankBot,
        '(' => WallCrawlerBotLeft,
        ')' => WallCrawlerBotRight,
        'o' => RedBallJumping,
        'O' => RedBallLying,
        's' => Camera,
        // ── Hazards ──
        '^' => SpikesUp,
        'v' => SpikesDown,
        '!' => Spike,
        'z' => ElectricArc,
        '}' => FireRight,
        '{' => FireLeft,
        'A' => Acme,
        'm' => Mill,
        'b' => Bomb,
        // ── Mechanisms ──
        'L' => Lift,
        'R' => DoorRed,
        'B' => DoorBlue,
        'P' => DoorPink,
        'G' => DoorGreen,
        '1' => KeyholeRed,
        '2' => KeyholeBlue,
        '3' => KeyholePink,
        '4' => KeyholeGreen,
        'a' => AccessCardDoor,
        'S' => AccessCardSlot,
        'g' => GloveSlot,
        'x' => ExpandingFloor,
        'X' => ExitDoor,
        'T' => Teleporter1,
        'Y' => Teleporter2,
        'F' => FanLeft,
        'j' => FanRight,
        'Q' => Rocket,
        // ── Items ──
        '5' => KeyRed,
        '6' => KeyBlue,
        '7' => KeyPink,
        '8' => KeyGreen,
        'c' => AccessCard,
        'l' => Glove,
        'q' => Boot,
        'p' => Clamp,
        'u' => Gun,
        '+' => FullLife,
        'i' => Soda,
        'd' => ChickenSingle,
        '%' => Football,
        '&' => Flag,
        '*' => Radio,
        'J' => Joystick,
        'I' => Disk,
        'Z' => Balloon,
        'N' => Notebook,
        'D' => LetterD,
        'U' => LetterU,
        'K' => LetterK,
        'E' => LetterE,
        'M' => LetterM,
        // ── Boxes ──
        '0' => BoxGreyEmpty,
        '9' => BoxGreyGun,
        'W' => BoxGreyBoot,
        'V' => BoxGreyFullLife,
        'H' => BoxGreyBomb,
        'k' => BoxGreyAccessCard,
        'e' => BoxRedSoda,
        'C' => BoxRedChicken,
        '$' => BoxBlueDisk,
        '?' => BoxBlueBalloon,
        // ── Decorations ──
        ':' => StoneBg,
        '|' => Screen,
        ',' => FenceBg,
        _ => return None,
    };
    Some(kind)
}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// The levels of this session: the configured file, or the built-in set.
pub fn load_levels(config: &GameConfig) -> Vec<LevelData> {
    if let Some(path) = &config.level_file {
        match load_file(path) {
            Ok(levels) => return levels,
            Err(e) => warn!(path = %path.display(), error = %e, "level file unusable, using built-in levels"),
        }
    }
    embedded_levels()
}

fn load_file(path: &Path) -> Result<Vec<LevelData>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let levels = parse_levels(&text)?;
    info!(path = %path.display(), count = levels.len(), "level file loaded");
    Ok(levels)
}

/// Split level text into levels and check every glyph.
pub fn parse_levels(text: &str) -> Result<Vec<LevelData>, LevelError> {
    let mut levels = vec![];
    let mut section: Vec<(usize, &str)> = vec![];

    for (i, line) in text.lines().enumerate() {
        if line.trim() == "---" {
            if let Some(level) = parse_section(&section, levels.len())? {
                levels.push(level);
            }
            section.clear();
            continue;
        }
        section.push((i + 1, line));
    }
    if let Some(level) = parse_section(&section, levels.len())? {
        levels.push(level);
    }

    if levels.is_empty() {
        return Err(LevelError::Empty);
    }
    Ok(levels)
}

fn parse_section(lines: &[(usize, &str)], index: usize) -> Result<Option<LevelData>, LevelError> {
    let mut lines = lines;
    while let Some((&(_, first), rest)) = lines.split_first() {
        if !first.trim().is_empty() { break; }
        lines = rest;
    }
    while let Some((&(_, last), rest)) = lines.split_last() {
        if !last.trim().is_empty() { break; }
        lines = rest;
    }

    let mut name = format!("Level {}", index + 1);
    if let Some((&(_, first), rest)) = lines.split_first() {
        if is_name_line(first) {
            name = first[1..].trim().to_string();
            lines = rest;
        }
    }
    let Some(&(first_line, first_row)) = lines.first() else { return Ok(None) };

    let width = first_row.chars().count();
    let mut rows = Vec::with_capacity(lines.len());
    for &(line, row) in lines {
        let len = row.chars().count();
        if len > width {
            return Err(LevelError::Ragged { line, width: len, expected: width });
        }
        for (column, ch) in row.chars().enumerate() {
            if glyph(ch).is_none() {
                return Err(LevelError::UnknownGlyph { line, column: column + 1, glyph: ch });
            }
        }
        let mut row = row.to_string();
        row.extend(std::iter::repeat(' ').take(width - len));
        rows.push(row);
    }

    Ok(Some(LevelData { name, rows, first_line }))
}

/// `# Level Name` versus a border row such as `##########`.
fn is_name_line(line: &str) -> bool {
    line.starts_with('#') && line[1..].chars().any(|c| c.is_alphabetic())
}

// ══════════════════════════════════════════════════════════════
// Building
// ══════════════════════════════════════════════════════════════

/// Build a running world from parsed level data. The hero carries over from
/// the previous level; `enter_level` drops its level-scoped items.
pub fn build(data: &LevelData, mut hero: Hero) -> Result<World, LevelError> {
    let height = data.rows.len();
    let width = data.rows.first().map_or(0, |r| r.chars().count());
    let mut tiles = TileGrid::new(width, height);
    let mut spawns: Vec<(ActorType, i32, i32)> = vec![];
    let mut start = None;

    for (cy, row) in data.rows.iter().enumerate() {
        let mut prev = None;
        for (cx, ch) in row.chars().enumerate() {
            let (cx, cy) = (cx as i32, cy as i32);
            let Some(g) = glyph(ch) else {
                return Err(LevelError::UnknownGlyph {
                    line: data.first_line + cy as usize,
                    column: cx as usize + 1,
                    glyph: ch,
                });
            };
            match g {
                Glyph::Tile(tile) => tiles.set_tile(cx, cy, tile),
                Glyph::Actor(kind) => spawns.push((kind, cx * TILE_WIDTH, cy * TILE_HEIGHT)),
                Glyph::Floor(tile, kind) => {
                    tiles.set_tile(cx, cy, tile);
                    if prev != Some(ch) {
                        spawns.push((kind, cx * TILE_WIDTH, cy * TILE_HEIGHT));
                    }
                }
                Glyph::Hero => start = Some((cx * TILE_WIDTH, (cy + 1) * TILE_HEIGHT - HERO_HEIGHT)),
            }
            prev = Some(ch);
        }
    }

    let Some((x, y)) = start else { return Err(LevelError::MissingHero(data.name.clone())) };
    let mut events = vec![];
    hero.enter_level(x, y, &mut events);

    let mut world = World::new(data.name.clone(), tiles, hero);
    for e in events {
        world.push_event(e);
    }
    for (kind, x, y) in spawns {
        world.add_actor(kind, x, y);
    }
    world.set_message(&data.name, MESSAGE_TICKS);
    world.center_camera();

    info!(level = %data.name, width, height, actors = world.actors.len(), "level loaded");
    Ok(world)
}

// ══════════════════════════════════════════════════════════════
// Embedded levels
// ══════════════════════════════════════════════════════════════

pub fn embedded_levels() -> Vec<LevelData> {
    vec![
        make_embedded("Episode 1 - Reactor Gate", &[
            "########################################",
            "#..........................#...........#",
            "#                          #           #",
            "#           ::         Z   #           #",
            "#                     ==== #           #",
            "#                          #  K E M    #",
            "#                          #           #",
            "#   D Ui                   #      J    #",
            "#  ======                  #     ~~~   #",
            "#                          #           #",
            "#                       1  R         X #",
            "# @       5   r  9  ^^     R           #",
            "#############################>>>>#######",
            "########################################",
        ]),
        make_embedded("Episode 2 - Glove Works", &[
            "################################################",
            "#                 A #       #                  #",
            "#                   #       #                  #",
            "#  |                #       #                  #",
            "#                   #       #                  #",
            "#                   #       #                  #",
            "#                   #       #       u          #",
            "#       c  t        #       #     ======       #",
            "#      ========     #       #                  #",
            "#                   #       #                  #",
            "#  ,,,              #       #              X  F#",
            "#                   #       #                  #",
            "#         Q     T   # Y fS  a  g x        ######",
            "# @ e L       $     #     l a     ^^^^^^^^######",
            "################################################",
            "################################################",
        ]),
    ]
}

fn make_embedded(name: &str, map: &[&str]) -> LevelData {
    LevelData {
        name: name.to_string(),
        rows: map.iter().map(|s| s.to_string()).collect(),
        first_line: 1,
    }
}
