/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. The world draws itself through `Canvas` into the `front` buffer
///   2. Compare each cell with the `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// One 16×16 level tile is two terminal columns by one terminal row. Sprite
/// positions are snapped to the tile they start in; multi-tile actors fill
/// their whole footprint with the same glyph.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::actor::{ActorType, Family};
use crate::domain::hero::{Hero, Inventory, MAX_HEALTH};
use crate::domain::sprite::{Canvas, Sheet, Sprite};
use crate::domain::tile::{Tile, TILE_HEIGHT, TILE_WIDTH};
use crate::sim::world::{Phase, World};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit background for every empty cell, also used for `Clear`, so
    /// row gaps on VTE terminals match the cells.
    const BASE_BG: Color = Color::Rgb { r: 16, g: 16, b: 28 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Differs from any real cell; filling `back` with it forces a repaint.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        let bg = if bg == Color::Reset { Cell::BASE_BG } else { bg };
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            *self = FrameBuffer::new(w, h);
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', Color::White, bg));
        }
    }

    #[cfg(test)]
    fn row_text(&self, y: usize) -> String {
        (0..self.width).map(|x| self.get(x, y).ch).collect()
    }
}

// ── Layout ──

/// Terminal columns per level tile.
const CELL_W: usize = 2;

const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;
/// HUD + gap above the map, message + gap + help below.
const RESERVED_ROWS: usize = MAP_ROW + 3;

const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };

// ══════════════════════════════════════════════════════════════
// Glyphs
// ══════════════════════════════════════════════════════════════

/// Two terminal characters, a colour and a footprint in tiles.
struct Glyph {
    text: [char; 2],
    fg: Color,
    bg: Color,
    cols: i32,
    rows: i32,
}

fn g(text: &str, fg: Color) -> Glyph {
    let mut chars = text.chars();
    let a = chars.next().unwrap_or(' ');
    let b = chars.next().unwrap_or(' ');
    Glyph { text: [a, b], fg, bg: Color::Reset, cols: 1, rows: 1 }
}

impl Glyph {
    fn size(mut self, cols: i32, rows: i32) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    fn on(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }
}

fn tile_glyph(tile: Tile) -> Glyph {
    match tile {
        Tile::Empty => g("  ", Color::Reset),
        Tile::Backdrop => g("··", Color::DarkGrey),
        Tile::Wall => g("▓▓", Color::Grey),
        Tile::Girder => g("╤╤", Color::DarkYellow),
        Tile::Conveyor => g("══", Color::Grey),
        Tile::Crumbly => g("░░", Color::DarkYellow),
        Tile::Bridge => g("▬▬", Color::Cyan),
    }
}

fn key_color(kind: ActorType) -> Color {
    use ActorType::*;
    match kind {
        KeyRed | DoorRed | KeyholeRed => Color::Red,
        KeyBlue | DoorBlue | KeyholeBlue => Color::Blue,
        KeyPink | DoorPink | KeyholePink => Color::Magenta,
        KeyGreen | DoorGreen | KeyholeGreen => Color::Green,
        _ => Color::Cyan,
    }
}

fn actor_glyph(kind: ActorType, frame: u16) -> Glyph {
    use ActorType::*;
    let blink = frame % 2 == 1;
    match kind.family() {
        Family::Placeholder => g("  ", Color::Reset),
        Family::Walker => match kind {
            Robot => g("ōō", Color::Red),
            FlameGnomeBot => g("ʌʌ", Color::DarkRed),
            FootBot => g("ØØ", Color::Magenta).size(1, 2),
            FireWheelBot => g("◎◎", Color::Yellow).size(2, 2),
            _ => g("▄▄", Color::Green).size(2, 1),
        },
        Family::WallCrawler => g("╪╪", Color::Yellow),
        Family::RedBall => g("()", Color::Red),
        Family::Camera => g("◘◘", Color::Grey),
        Family::Spikes => match kind {
            SpikesDown => g("▼▼", Color::Grey),
            ElectricArc => g(if blink { "ϟ " } else { " ϟ" }, Color::Cyan),
            _ => g("▲▲", Color::Grey),
        },
        Family::Fire => match frame {
            0 => g("  ", Color::Reset).size(2, 1),
            1 => g("..", Color::DarkRed).size(2, 1),
            _ => g("≈≈", Color::Red).size(2, 1),
        },
        Family::Acme => g("▀▀", Color::DarkGrey).size(2, 1),
        Family::Mill => g(if blink { "╳╳" } else { "++" }, Color::Grey).size(1, 2),
        Family::Bomb => g("●•", if blink { Color::Red } else { Color::DarkGrey }),
        Family::BombFire => g("^^", Color::Red),
        Family::HostileShot => g("<>", Color::Red),
        Family::Door => g("▐▌", key_color(kind)).on(Color::DarkGrey),
        Family::Keyhole => g(if frame == 2 { "[]" } else { "[o" }, key_color(kind)),
        Family::GloveSlot => g(if frame == 2 { "[]" } else { "[w" }, Color::Yellow),
        Family::ExpandingFloor => g("  ", Color::Reset),
        Family::Lift => g(if frame == 0 { "▀▀" } else { "║║" }, Color::Grey),
        Family::ExitDoor => g("▒▒", if frame == 0 { Color::Green } else { Color::DarkGreen }).size(2, 2),
        Family::Teleporter => g("||", if blink { Color::Cyan } else { Color::Blue }).size(1, 2),
        Family::Conveyor => match kind {
            ConveyorLeft => g(if blink { "<<" } else { "‹‹" }, Color::Grey),
            _ => g(if blink { ">>" } else { "››" }, Color::Grey),
        },
        Family::UnstableFloor => g("▒▒", Color::DarkYellow),
        Family::Fan => g(if blink { "%%" } else { "##" }, Color::Grey).size(1, 2),
        Family::Rocket => g("/\\", Color::White).size(1, 2),
        Family::Item => item_glyph(kind),
        Family::SodaFlying => g("ii", Color::Red),
        Family::Box => match kind {
            BoxRedSoda | BoxRedChicken => g("[]", Color::Red),
            BoxBlueFootball | BoxBlueJoystick | BoxBlueDisk | BoxBlueBalloon | BoxBlueFlag
            | BoxBlueRadio => g("[]", Color::Blue),
            _ => g("[]", Color::Grey),
        },
        Family::Animation => match kind {
            Screen | SurveillanceScreen => g("▣▣", if blink { Color::Green } else { Color::DarkGreen }),
            FenceBg => g("##", Color::DarkGrey),
            _ => g("░░", Color::DarkGrey),
        },
        Family::SingleAnimation => match kind {
            Explosion => g("**", Color::Yellow),
            Steam => g("~~", Color::Grey),
            _ => g("::", Color::DarkGrey),
        },
        Family::Particle => g("·", Color::Grey),
        Family::ScorePopup => match kind.score_value() {
            10000 => g("$$", Color::Yellow),
            v if v >= 1000 => g("$ ", Color::Yellow),
            _ => g("+ ", Color::Yellow),
        },
    }
}

fn item_glyph(kind: ActorType) -> Glyph {
    use ActorType::*;
    if let Some(letter) = kind.letter() {
        return Glyph { text: [letter.as_char(), ' '], fg: Color::Yellow, bg: Color::Reset, cols: 1, rows: 1 };
    }
    match kind {
        KeyRed | KeyBlue | KeyPink | KeyGreen => g("o┐", key_color(kind)),
        AccessCard => g("▭ ", Color::Cyan),
        Glove => g("ʍ ", Color::Yellow),
        Boot => g("ʟ ", Color::DarkYellow),
        Clamp => g("ɔ ", Color::Grey),
        Gun => g("╒═", Color::Grey),
        FullLife => g("♥♥", Color::Red),
        Soda => g("i ", Color::Red),
        ChickenSingle => g("ɣ ", Color::DarkYellow),
        ChickenDouble => g("ɣɣ", Color::DarkYellow),
        Balloon => g("Ọ ", Color::Red),
        _ => g("¤ ", Color::Cyan),
    }
}

fn hero_glyphs(frame: u16) -> (Glyph, Glyph) {
    let right = frame >= 8;
    let pose = frame % 8;
    let head = if right { "☻>" } else { "<☻" };
    let body = match pose {
        4 => "/\\",
        5 => "\\/",
        6 => if right { "▌═" } else { "═▐" },
        p if p % 2 == 1 => "/|",
        _ => "||",
    };
    (g(head, Color::White), g(body, Color::Green))
}

// ══════════════════════════════════════════════════════════════
// Canvas over the frame buffer
// ══════════════════════════════════════════════════════════════

/// Maps level pixels to terminal cells through the camera.
struct TermCanvas<'a> {
    buf: &'a mut FrameBuffer,
    cam_x: i32,
    cam_y: i32,
    /// Visible map size in tiles.
    view_cols: i32,
    view_rows: i32,
}

impl TermCanvas<'_> {
    fn put(&mut self, glyph: &Glyph, x: i32, y: i32) {
        let col0 = (x - self.cam_x).div_euclid(TILE_WIDTH);
        let row0 = (y - self.cam_y).div_euclid(TILE_HEIGHT);
        for dy in 0..glyph.rows {
            for dx in 0..glyph.cols {
                let (col, row) = (col0 + dx, row0 + dy);
                if col < 0 || row < 0 || col >= self.view_cols || row >= self.view_rows { continue; }
                let tx = col as usize * CELL_W;
                let ty = MAP_ROW + row as usize;
                for (i, &ch) in glyph.text.iter().enumerate() {
                    let bg = if glyph.bg == Color::Reset { self.buf.get(tx + i, ty).bg } else { glyph.bg };
                    if ch == ' ' && glyph.bg == Color::Reset { continue; }
                    self.buf.set(tx + i, ty, Cell::new(ch, glyph.fg, bg));
                }
            }
        }
    }
}

impl Canvas for TermCanvas<'_> {
    fn draw(&mut self, sprite: Sprite, x: i32, y: i32) {
        match sprite.sheet {
            Sheet::Tile(tile) => self.put(&tile_glyph(tile), x, y),
            Sheet::Actor(kind) => self.put(&actor_glyph(kind, sprite.frame), x, y),
            Sheet::Shot => {
                let glyph = g(if sprite.frame % 2 == 0 { "──" } else { "━━" }, Color::Yellow);
                self.put(&glyph, x, y);
            }
            Sheet::Hero => {
                let (head, body) = hero_glyphs(sprite.frame);
                self.put(&head, x, y);
                self.put(&body, x, y + TILE_HEIGHT);
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Renderer
// ══════════════════════════════════════════════════════════════

/// What the HUD shows beyond the world itself.
pub struct Session<'a> {
    pub level_no: usize,
    pub level_count: usize,
    pub level_name: &'a str,
}

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.resize(tw as usize, th as usize);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.term_w = w;
        self.term_h = h;
        self.front.resize(w, h);
        self.back.resize(w, h);
        self.back.cells.fill(Cell::INVALID);
    }

    pub fn render(&mut self, world: &mut World, session: &Session) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.resize(tw as usize, th as usize);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        if self.last_phase != Some(world.phase) {
            self.back.cells.fill(Cell::INVALID);
            self.last_phase = Some(world.phase);
        }

        self.compose(world, session);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    /// Size the camera to the terminal and build the next frame.
    fn compose(&mut self, world: &mut World, session: &Session) {
        self.fit_camera(world);
        self.front.clear();
        self.compose_hud(&world.hero, session);
        self.compose_map(world);
        self.compose_footer(world);
        match world.phase {
            Phase::Playing if world.paused => self.compose_banner(world, "PAUSED", "P/F1 resume   Esc quit"),
            Phase::HeroDead => self.compose_banner(world, "YOU DIED", "restarting level"),
            Phase::Finished => self.compose_banner(world, "LEVEL COMPLETE", session.level_name),
            Phase::Playing => {}
        }
    }

    fn fit_camera(&self, world: &mut World) {
        let cols = (self.term_w / CELL_W) as i32;
        let rows = self.term_h.saturating_sub(RESERVED_ROWS).max(1) as i32;
        let (view_w, view_h) = (cols * TILE_WIDTH, rows * TILE_HEIGHT);
        let camera = &mut world.camera;
        if camera.view_w == view_w && camera.view_h == view_h { return; }
        let first = camera.view_w == 0;
        camera.view_w = view_w;
        camera.view_h = view_h;
        if first {
            world.center_camera();
        } else {
            let hero = world.hero.rect();
            world.camera.follow(&hero, world.tiles.pixel_width(), world.tiles.pixel_height());
        }
    }

    fn view_tiles(&self, world: &World) -> (i32, i32) {
        (world.camera.view_w / TILE_WIDTH, world.camera.view_h / TILE_HEIGHT)
    }

    // ── Compose: build front buffer content ──

    fn compose_hud(&mut self, hero: &Hero, session: &Session) {
        let health: String = (0..MAX_HEALTH).map(|i| if i < hero.health() { '█' } else { '░' }).collect();
        let gun: String = (0..hero.firepower()).map(|_| '▸').collect();
        let hud = format!(
            " {}/{} {:<18} Score:{:<8} Health:{} Fire:{:<4} {}",
            session.level_no + 1,
            session.level_count,
            session.level_name,
            hero.score(),
            health,
            gun,
            inventory_text(hero.inventory()),
        );
        self.front.fill_row(HUD_ROW, HUD_BG);
        self.front.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);
    }

    fn compose_map(&mut self, world: &mut World) {
        let (view_cols, view_rows) = self.view_tiles(world);
        let mut canvas = TermCanvas {
            buf: &mut self.front,
            cam_x: world.camera.x,
            cam_y: world.camera.y,
            view_cols,
            view_rows,
        };
        world.render(&mut canvas);
    }

    fn compose_footer(&mut self, world: &World) {
        let (_, view_rows) = self.view_tiles(world);
        let msg_row = MAP_ROW + view_rows as usize;
        if !world.message.is_empty() {
            self.front.fill_row(msg_row, MSG_BG);
            self.front.put_str(1, msg_row, &world.message, Color::Black, MSG_BG);
        }
        let help = " ←/→ walk  Space jump  X fire  ↑/E use  P pause  Esc quit";
        self.front.put_str(0, msg_row + 2, help, Color::DarkGrey, Color::Reset);
    }

    fn compose_banner(&mut self, world: &World, title: &str, detail: &str) {
        let (view_cols, view_rows) = self.view_tiles(world);
        let width = (title.chars().count().max(detail.chars().count()) + 6).min(self.front.width);
        let x = (view_cols as usize * CELL_W).saturating_sub(width) / 2;
        let y = MAP_ROW + (view_rows as usize).saturating_sub(4) / 2;
        let bg = Color::Rgb { r: 40, g: 40, b: 40 };
        for row in y..y + 4 {
            for col in x..x + width {
                self.front.set(col, row, Cell::new(' ', Color::White, bg));
            }
        }
        let center = |s: &str| x + (width - s.chars().count().min(width)) / 2;
        self.front.put_str(center(title), y + 1, title, Color::Yellow, bg);
        self.front.put_str(center(detail), y + 2, detail, Color::Grey, bg);
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) { continue; }

                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }
}

fn inventory_text(inv: Inventory) -> String {
    let slots = [
        (Inventory::KEY_RED, 'R'),
        (Inventory::KEY_BLUE, 'B'),
        (Inventory::KEY_PINK, 'P'),
        (Inventory::KEY_GREEN, 'G'),
        (Inventory::ACCESS_CARD, 'A'),
        (Inventory::GLOVE, 'W'),
        (Inventory::BOOT, 'J'),
        (Inventory::CLAMP, 'C'),
    ];
    slots.iter().map(|&(item, c)| if inv.contains(item) { c } else { '·' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Rect;
    use crate::domain::hero::{HERO_HEIGHT, HERO_WIDTH};
    use crate::domain::tile::grid_from;

    fn renderer(w: usize, h: usize) -> Renderer {
        let mut r = Renderer::new();
        r.term_w = w;
        r.term_h = h;
        r.front.resize(w, h);
        r.back.resize(w, h);
        r
    }

    fn world() -> World {
        let tiles = grid_from(&[
            "######",
            "#    #",
            "#    #",
            "######",
        ]);
        let mut hero = Hero::new();
        hero.rect = Rect::new(16, 16, HERO_WIDTH, HERO_HEIGHT);
        World::new("Box", tiles, hero)
    }

    const SESSION: Session<'static> = Session { level_no: 0, level_count: 2, level_name: "Box" };

    #[test]
    fn camera_is_sized_from_the_terminal() {
        let mut r = renderer(40, 20);
        let mut w = world();
        r.compose(&mut w, &SESSION);
        assert_eq!(w.camera.view_w, 20 * TILE_WIDTH);
        assert_eq!(w.camera.view_h, 15 * TILE_HEIGHT);
        // level narrower than the view: centred
        assert_eq!(w.camera.x, -(20 - 6) * TILE_WIDTH / 2);
    }

    #[test]
    fn tiles_and_hero_land_in_their_cells() {
        let mut r = renderer(12, 10);
        let mut w = world();
        r.compose(&mut w, &SESSION);
        assert_eq!(w.camera.x, 0);
        assert_eq!(r.front.row_text(MAP_ROW), "▓▓▓▓▓▓▓▓▓▓▓▓");
        assert_eq!(r.front.row_text(MAP_ROW + 1), "▓▓☻>      ▓▓");
        assert_eq!(r.front.row_text(MAP_ROW + 2), "▓▓||      ▓▓");
    }

    #[test]
    fn hud_shows_health_and_inventory() {
        let mut r = renderer(120, 10);
        let mut w = world();
        w.hero.set_health(3, &mut vec![]);
        w.hero.give(Inventory::KEY_BLUE | Inventory::BOOT, &mut vec![]);
        r.compose(&mut w, &SESSION);
        let hud = r.front.row_text(HUD_ROW);
        assert!(hud.contains("███░░░░░"), "{hud}");
        assert!(hud.contains("·B····J·"), "{hud}");
        assert!(hud.contains("1/2 Box"), "{hud}");
    }

    #[test]
    fn multi_tile_actor_fills_its_footprint() {
        let mut r = renderer(12, 10);
        let mut w = world();
        w.add_actor(ActorType::ExitDoor, 48, 16);
        r.compose(&mut w, &SESSION);
        assert_eq!(&r.front.row_text(MAP_ROW + 1)[..], "▓▓☻>  ▒▒▒▒▓▓");
    }

    #[test]
    fn sprites_outside_the_view_are_clipped() {
        let mut buf = FrameBuffer::new(4, 6);
        let mut canvas = TermCanvas { buf: &mut buf, cam_x: 0, cam_y: 0, view_cols: 2, view_rows: 2 };
        canvas.draw(Sprite::actor(ActorType::KeyRed, 0), 64, 0);
        canvas.draw(Sprite::actor(ActorType::KeyRed, 0), -16, 0);
        canvas.draw(Sprite::actor(ActorType::KeyRed, 0), 16, 16);
        assert_eq!(buf.row_text(MAP_ROW), "    ");
        assert_eq!(buf.row_text(MAP_ROW + 1), "  o┐");
    }

    #[test]
    fn banner_marks_finished_level() {
        let mut r = renderer(40, 20);
        let mut w = world();
        w.phase = Phase::Finished;
        r.compose(&mut w, &SESSION);
        let all: String = (0..r.front.height).map(|y| r.front.row_text(y)).collect();
        assert!(all.contains("LEVEL COMPLETE"));
    }
}
