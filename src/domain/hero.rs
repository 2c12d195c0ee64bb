/// The hero: player-controlled state machine.
///
/// ## Vertical motion
///
/// `jump()` starts a jump by setting `flying` and loading `counter` with the
/// jump length (one more with the boot). While `counter > 0` the hero climbs
/// `JUMP_PROFILE[counter]` half-tiles per tick and the counter counts down;
/// hitting a ceiling zeroes the counter at once ("bumped head"). With the
/// counter at 0 and no floor below, the hero falls: `vertical_speed` grows by
/// one per tick up to `MAX_FALL_SPEED` and the hero drops `vertical_speed / 2`
/// half-tiles, stopping at the first solid cell.
///
/// Landing is polled every tick: a solid cell directly under the footprint
/// with the counter at 0 ends the flight.
///
/// ## Damage
///
/// Hazards register themselves in `hurting` while they overlap the hero and
/// remove themselves when they stop. Each tick:
///   - immunity > 0 → immunity counts down, no damage
///   - otherwise, any registered hazard → health −1, immunity = IMMUNITY_TICKS
///
/// so a hero standing in a hazard loses one health every IMMUNITY_TICKS + 1
/// ticks. `tick()` returns the health left; the level ends the run at 0.
///
/// ## Notifications
///
/// Health, firepower, inventory and score only change through their setters,
/// which emit a `GameEvent` when the stored value actually changes.

use std::ops::{BitOr, BitOrAssign};

use super::actor::ActorId;
use super::geometry::{Facing, Rect};
use super::tile::{TileGrid, HALFTILE_HEIGHT, HALFTILE_WIDTH, TILE_HEIGHT, TILE_WIDTH};
use crate::sim::event::GameEvent;

pub const HERO_WIDTH: i32 = TILE_WIDTH;
pub const HERO_HEIGHT: i32 = 2 * TILE_HEIGHT;
pub const MAX_HEALTH: u8 = 8;
pub const MIN_FIREPOWER: u8 = 1;
pub const MAX_FIREPOWER: u8 = 4;
pub const IMMUNITY_TICKS: u8 = 16;
pub const MAX_FALL_SPEED: u8 = 6;

const JUMP_COUNTER: u8 = 6;
const JUMP_COUNTER_BOOT: u8 = 7;
/// Half-tiles climbed per tick, indexed by the jump counter.
const JUMP_PROFILE: [u8; 8] = [0, 0, 1, 1, 1, 2, 2, 2];

// ══════════════════════════════════════════════════════════════
// Inventory
// ══════════════════════════════════════════════════════════════

/// Bit set of carried items.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Inventory(u16);

impl Inventory {
    pub const EMPTY: Inventory = Inventory(0);
    pub const KEY_RED: Inventory = Inventory(1 << 0);
    pub const KEY_BLUE: Inventory = Inventory(1 << 1);
    pub const KEY_PINK: Inventory = Inventory(1 << 2);
    pub const KEY_GREEN: Inventory = Inventory(1 << 3);
    pub const ACCESS_CARD: Inventory = Inventory(1 << 4);
    pub const GLOVE: Inventory = Inventory(1 << 5);
    pub const BOOT: Inventory = Inventory(1 << 6);
    pub const CLAMP: Inventory = Inventory(1 << 7);

    /// Items that only make sense inside the level they were found in.
    pub const LEVEL_SCOPED: Inventory = Inventory(0b0011_1111);

    pub fn contains(self, other: Inventory) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn without(self, other: Inventory) -> Inventory {
        Inventory(self.0 & !other.0)
    }

    pub fn bits(self) -> u16 {
        self.0
    }
}

impl BitOr for Inventory {
    type Output = Inventory;
    fn bitor(self, rhs: Inventory) -> Inventory {
        Inventory(self.0 | rhs.0)
    }
}

impl BitOrAssign for Inventory {
    fn bitor_assign(&mut self, rhs: Inventory) {
        self.0 |= rhs.0;
    }
}

/// Bonus letters, collected in order to spell the bonus word.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Letter {
    D,
    U,
    K,
    E,
    M,
}

impl Letter {
    pub const ALL: [Letter; 5] = [Letter::D, Letter::U, Letter::K, Letter::E, Letter::M];

    fn next(self) -> Option<Letter> {
        match self {
            Letter::D => Some(Letter::U),
            Letter::U => Some(Letter::K),
            Letter::K => Some(Letter::E),
            Letter::E => Some(Letter::M),
            Letter::M => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::D => 'D',
            Letter::U => 'U',
            Letter::K => 'K',
            Letter::E => 'E',
            Letter::M => 'M',
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Hero
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Motion {
    Idle,
    Walking,
}

#[derive(Clone, Debug)]
pub struct Hero {
    pub rect: Rect,
    pub direction: Facing,
    pub motion: Motion,
    pub flying: bool,
    pub shooting: bool,
    pub hidden: bool,
    /// Jump counter; > 0 while ascending.
    pub counter: u8,
    pub vertical_speed: u8,
    /// Direction changed; the next walking tick turns instead of stepping.
    pub turned_around: bool,
    pub moving_horizontally: bool,
    pub walk_frame: u8,
    /// Last letter of the bonus word collected in order.
    pub fetched_letter: Option<Letter>,
    health: u8,
    firepower: u8,
    inventory: Inventory,
    score: u64,
    immunity: u8,
    /// Hazards currently hurting the hero. A multiset: one entry per registration.
    hurting: Vec<ActorId>,
}

impl Default for Hero {
    fn default() -> Self {
        Hero::new()
    }
}

impl Hero {
    pub fn new() -> Self {
        Hero {
            rect: Rect::new(0, 0, HERO_WIDTH, HERO_HEIGHT),
            direction: Facing::Right,
            motion: Motion::Idle,
            flying: false,
            shooting: false,
            hidden: false,
            counter: 0,
            vertical_speed: 0,
            turned_around: false,
            moving_horizontally: false,
            walk_frame: 0,
            fetched_letter: None,
            health: MAX_HEALTH,
            firepower: MIN_FIREPOWER,
            inventory: Inventory::EMPTY,
            score: 0,
            immunity: 0,
            hurting: Vec::new(),
        }
    }

    /// Place the hero at a level start. Keeps health, firepower, score and
    /// permanent items; drops level-scoped items and all transient motion.
    pub fn enter_level(&mut self, x: i32, y: i32, events: &mut Vec<GameEvent>) {
        self.rect = Rect::new(x, y, HERO_WIDTH, HERO_HEIGHT);
        self.direction = Facing::Right;
        self.motion = Motion::Idle;
        self.flying = false;
        self.shooting = false;
        self.hidden = false;
        self.counter = 0;
        self.vertical_speed = 0;
        self.turned_around = false;
        self.moving_horizontally = false;
        self.fetched_letter = None;
        self.immunity = 0;
        self.hurting.clear();
        let kept = self.inventory.without(Inventory::LEVEL_SCOPED);
        self.set_inventory(kept, events);
    }

    // ── Accessors ──

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn x(&self) -> i32 {
        self.rect.x
    }

    pub fn y(&self) -> i32 {
        self.rect.y
    }

    pub fn set_x(&mut self, x: i32) {
        self.rect.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.rect.y = y;
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn firepower(&self) -> u8 {
        self.firepower
    }

    pub fn inventory(&self) -> Inventory {
        self.inventory
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn immunity(&self) -> u8 {
        self.immunity
    }

    pub fn hurting_count(&self) -> usize {
        self.hurting.len()
    }

    // ── Notifying setters ──

    pub fn set_health(&mut self, health: u8, events: &mut Vec<GameEvent>) {
        let health = health.min(MAX_HEALTH);
        if health != self.health {
            self.health = health;
            events.push(GameEvent::HealthChanged { health });
        }
    }

    pub fn add_health(&mut self, amount: u8, events: &mut Vec<GameEvent>) {
        self.set_health(self.health.saturating_add(amount), events);
    }

    pub fn set_firepower(&mut self, firepower: u8, events: &mut Vec<GameEvent>) {
        let firepower = firepower.clamp(MIN_FIREPOWER, MAX_FIREPOWER);
        if firepower != self.firepower {
            self.firepower = firepower;
            events.push(GameEvent::FirepowerChanged { firepower });
        }
    }

    pub fn set_inventory(&mut self, inventory: Inventory, events: &mut Vec<GameEvent>) {
        if inventory != self.inventory {
            self.inventory = inventory;
            events.push(GameEvent::InventoryChanged { inventory });
        }
    }

    pub fn give(&mut self, item: Inventory, events: &mut Vec<GameEvent>) {
        self.set_inventory(self.inventory | item, events);
    }

    /// Remove `item` if carried. Returns whether it was.
    pub fn take(&mut self, item: Inventory, events: &mut Vec<GameEvent>) -> bool {
        if !self.inventory.contains(item) { return false; }
        self.set_inventory(self.inventory.without(item), events);
        true
    }

    pub fn add_score(&mut self, points: u64, events: &mut Vec<GameEvent>) {
        if points == 0 { return; }
        self.score += points;
        events.push(GameEvent::ScoreChanged { score: self.score });
    }

    /// Record a bonus letter. Returns true when this letter completes the
    /// word in order. An out-of-order letter spoils the sequence.
    pub fn fetch_letter(&mut self, letter: Letter) -> bool {
        let expected = match self.fetched_letter {
            None => Some(Letter::D),
            Some(last) => last.next(),
        };
        if expected != Some(letter) {
            self.fetched_letter = None;
            return false;
        }
        if letter == Letter::M {
            self.fetched_letter = None;
            return true;
        }
        self.fetched_letter = Some(letter);
        false
    }

    // ── Hurting registry ──

    pub fn add_hurting_actor(&mut self, id: ActorId) {
        self.hurting.push(id);
    }

    /// Removes one registration of `id`, if any.
    pub fn remove_hurting_actor(&mut self, id: ActorId) {
        if let Some(pos) = self.hurting.iter().position(|&h| h == id) {
            self.hurting.swap_remove(pos);
        }
    }

    // ── Commands ──

    pub fn jump(&mut self, events: &mut Vec<GameEvent>) {
        if self.flying { return; }
        self.flying = true;
        self.counter = if self.inventory.contains(Inventory::BOOT) {
            JUMP_COUNTER_BOOT
        } else {
            JUMP_COUNTER
        };
        events.push(GameEvent::HeroJumped);
    }

    pub fn set_direction(&mut self, direction: Facing) {
        if direction != self.direction {
            self.direction = direction;
            self.turned_around = true;
        }
    }

    pub fn set_motion(&mut self, motion: Motion) {
        self.motion = motion;
    }

    // ── Collision ──

    /// Would the hero's rectangle at (x, y) overlap a solid cell?
    /// Only the 3×3 cells anchored at the candidate position are examined,
    /// which covers the whole 1×2-tile footprint at any alignment.
    pub fn would_collide(&self, tiles: &TileGrid, x: i32, y: i32) -> bool {
        let candidate = Rect::new(x, y, self.rect.w, self.rect.h);
        let cx0 = x.div_euclid(TILE_WIDTH);
        let cy0 = y.div_euclid(TILE_HEIGHT);
        for cy in cy0..cy0 + 3 {
            for cx in cx0..cx0 + 3 {
                if tiles.is_solid(cx, cy) && TileGrid::cell_rect(cx, cy).overlaps(&candidate) {
                    return true;
                }
            }
        }
        false
    }

    /// Shift horizontally by up to `offset` pixels, backing off one pixel at
    /// a time until the position is free. Returns the offset applied.
    pub fn push_horizontally(&mut self, tiles: &TileGrid, offset: i32) -> i32 {
        let mut applied = offset;
        while applied != 0 && self.would_collide(tiles, self.rect.x + applied, self.rect.y) {
            applied -= applied.signum();
        }
        self.rect.x += applied;
        applied
    }

    /// Vertical counterpart of `push_horizontally`.
    pub fn push_vertically(&mut self, tiles: &TileGrid, offset: i32) -> i32 {
        let mut applied = offset;
        while applied != 0 && self.would_collide(tiles, self.rect.x, self.rect.y + applied) {
            applied -= applied.signum();
        }
        self.rect.y += applied;
        applied
    }

    /// Is a solid cell directly under the footprint?
    pub fn is_standing(&self, tiles: &TileGrid) -> bool {
        let bottom = self.rect.bottom();
        if bottom.rem_euclid(TILE_HEIGHT) != 0 { return false; }
        let cy = bottom.div_euclid(TILE_HEIGHT);
        let cx0 = self.rect.x.div_euclid(TILE_WIDTH);
        let cx1 = (self.rect.right() - 1).div_euclid(TILE_WIDTH);
        (cx0..=cx1).any(|cx| tiles.is_solid(cx, cy))
    }

    // ══════════════════════════════════════════════════════════════
    // Tick
    // ══════════════════════════════════════════════════════════════

    /// Advance one tick. Returns the remaining health.
    pub fn tick(&mut self, tiles: &TileGrid, events: &mut Vec<GameEvent>) -> u8 {
        self.walk(tiles);
        self.fly(tiles, events);
        self.poll_landing(tiles, events);
        self.clamp_to(tiles);
        self.apply_damage(events);
        if self.moving_horizontally {
            self.walk_frame = (self.walk_frame + 1) % 4;
        }
        self.health
    }

    fn walk(&mut self, tiles: &TileGrid) {
        if self.motion != Motion::Walking {
            self.turned_around = false;
            self.moving_horizontally = false;
            return;
        }
        if self.turned_around {
            self.turned_around = false;
            self.moving_horizontally = false;
            return;
        }
        let dx = self.direction.sign() * HALFTILE_WIDTH;
        if self.would_collide(tiles, self.rect.x + dx, self.rect.y) {
            self.moving_horizontally = false;
        } else {
            self.rect.x += dx;
            self.moving_horizontally = true;
        }
    }

    fn fly(&mut self, tiles: &TileGrid, events: &mut Vec<GameEvent>) {
        if !self.flying { return; }

        if self.counter > 0 {
            let speed = JUMP_PROFILE[self.counter as usize];
            self.vertical_speed = speed;
            for _ in 0..speed {
                if self.would_collide(tiles, self.rect.x, self.rect.y - HALFTILE_HEIGHT) {
                    self.counter = 1;
                    events.push(GameEvent::HeroBumpedHead);
                    break;
                }
                self.rect.y -= HALFTILE_HEIGHT;
            }
            self.counter -= 1;
            if self.counter == 0 {
                self.vertical_speed = 0;
            }
            return;
        }

        self.vertical_speed = (self.vertical_speed + 1).min(MAX_FALL_SPEED);
        for _ in 0..self.vertical_speed / 2 {
            if self.would_collide(tiles, self.rect.x, self.rect.y + HALFTILE_HEIGHT) {
                break;
            }
            self.rect.y += HALFTILE_HEIGHT;
        }
    }

    fn poll_landing(&mut self, tiles: &TileGrid, events: &mut Vec<GameEvent>) {
        if self.is_standing(tiles) {
            if self.flying && self.counter == 0 {
                self.flying = false;
                events.push(GameEvent::HeroLanded);
            }
            if !self.flying {
                self.counter = 0;
                self.vertical_speed = 0;
            }
        } else if !self.flying {
            // walked off an edge
            self.flying = true;
            self.counter = 0;
            self.vertical_speed = 0;
        }
    }

    fn clamp_to(&mut self, tiles: &TileGrid) {
        let max_x = (tiles.pixel_width() - self.rect.w).max(0);
        let max_y = (tiles.pixel_height() - self.rect.h).max(0);
        self.rect.x = self.rect.x.clamp(0, max_x);
        self.rect.y = self.rect.y.clamp(0, max_y);
    }

    fn apply_damage(&mut self, events: &mut Vec<GameEvent>) {
        if self.immunity > 0 {
            self.immunity -= 1;
            return;
        }
        if self.hurting.is_empty() { return; }
        self.set_health(self.health.saturating_sub(1), events);
        self.immunity = IMMUNITY_TICKS;
        events.push(GameEvent::HeroHurt);
    }

    /// Frame index into the hero sheet.
    /// 0..4 walk, 4 ascend, 5 fall, 6 shoot; +8 when facing right.
    pub fn frame(&self) -> u16 {
        let base = match self.direction {
            Facing::Left => 0,
            Facing::Right => 8,
        };
        let pose = if self.flying {
            if self.counter > 0 { 4 } else { 5 }
        } else if self.shooting {
            6
        } else {
            self.walk_frame as u16
        };
        base + pose
    }

    /// Blink while immune.
    pub fn is_drawn(&self) -> bool {
        !self.hidden && self.immunity % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tile::grid_from;

    /// 6 wide, floor on row 5: hero standing with feet on row 5 sits at y = 48.
    fn room() -> TileGrid {
        grid_from(&[
            "      ",
            "      ",
            "      ",
            "      ",
            "      ",
            "######",
        ])
    }

    fn hero_at(x: i32, y: i32) -> Hero {
        let mut hero = Hero::new();
        hero.rect = Rect::new(x, y, HERO_WIDTH, HERO_HEIGHT);
        hero
    }

    #[test]
    fn standing_hero_stays_put() {
        let tiles = room();
        let mut hero = hero_at(16, 48);
        let mut ev = vec![];
        hero.tick(&tiles, &mut ev);
        assert_eq!(hero.y(), 48);
        assert!(!hero.flying);
        assert!(ev.is_empty());
    }

    #[test]
    fn jump_trace_is_deterministic_and_lands_back() {
        let tiles = grid_from(&[
            "      ",
            "      ",
            "      ",
            "      ",
            "      ",
            "      ",
            "      ",
            "      ",
            "######",
        ]);
        let run = || {
            let mut hero = hero_at(16, 96);
            let mut ev = vec![];
            hero.jump(&mut ev);
            let mut trace = vec![];
            for _ in 0..20 {
                hero.tick(&tiles, &mut ev);
                trace.push((hero.y(), hero.flying));
            }
            trace
        };
        let a = run();
        assert_eq!(a, run());
        let apex = a.iter().map(|&(y, _)| y).min().unwrap();
        assert_eq!(apex, 96 - 7 * HALFTILE_HEIGHT);
        assert_eq!(a.last().unwrap(), &(96, false));
        // ascent profile: 2, 2, 1, 1, 1, 0 half-tiles
        let ys: Vec<i32> = a.iter().take(6).map(|&(y, _)| y).collect();
        assert_eq!(ys, vec![80, 64, 56, 48, 40, 40]);
    }

    #[test]
    fn boot_jumps_higher() {
        let tiles = grid_from(&[
            "      ", "      ", "      ", "      ", "      ",
            "      ", "      ", "      ", "      ", "######",
        ]);
        let mut hero = hero_at(16, 112);
        let mut ev = vec![];
        hero.give(Inventory::BOOT, &mut ev);
        hero.jump(&mut ev);
        let mut apex = hero.y();
        for _ in 0..8 {
            hero.tick(&tiles, &mut ev);
            apex = apex.min(hero.y());
        }
        assert_eq!(apex, 112 - 9 * HALFTILE_HEIGHT);
    }

    #[test]
    fn jump_while_flying_is_ignored() {
        let mut hero = hero_at(16, 48);
        let mut ev = vec![];
        hero.jump(&mut ev);
        hero.counter = 3;
        hero.jump(&mut ev);
        assert_eq!(hero.counter, 3);
        assert_eq!(ev.iter().filter(|e| **e == GameEvent::HeroJumped).count(), 1);
    }

    #[test]
    fn bumping_ceiling_ends_ascent() {
        let tiles = grid_from(&[
            "######",
            "      ",
            "      ",
            "      ",
            "######",
        ]);
        // head at y=24, ceiling bottom at 16
        let mut hero = hero_at(16, 24);
        let mut ev = vec![];
        hero.jump(&mut ev);
        hero.tick(&tiles, &mut ev);
        assert_eq!(hero.y(), 16);
        assert_eq!(hero.counter, 0);
        assert!(ev.contains(&GameEvent::HeroBumpedHead));
    }

    #[test]
    fn walking_off_edge_starts_falling() {
        let tiles = grid_from(&[
            "      ",
            "      ",
            "      ",
            "      ",
            "      ",
            "##    ",
        ]);
        let mut hero = hero_at(16, 48);
        hero.set_motion(Motion::Walking);
        let mut ev = vec![];
        for _ in 0..3 {
            hero.tick(&tiles, &mut ev);
        }
        assert!(hero.flying);
    }

    #[test]
    fn falling_stops_on_floor() {
        let tiles = room();
        let mut hero = hero_at(16, 0);
        let mut ev = vec![];
        for _ in 0..20 {
            hero.tick(&tiles, &mut ev);
        }
        assert_eq!(hero.y(), 48);
        assert!(!hero.flying);
        assert_eq!(hero.vertical_speed, 0);
    }

    #[test]
    fn turning_consumes_one_tick() {
        let tiles = room();
        let mut hero = hero_at(32, 48);
        hero.set_motion(Motion::Walking);
        hero.set_direction(Facing::Left);
        let mut ev = vec![];
        hero.tick(&tiles, &mut ev);
        assert_eq!(hero.x(), 32);
        hero.tick(&tiles, &mut ev);
        assert_eq!(hero.x(), 24);
    }

    #[test]
    fn wall_blocks_walking() {
        let tiles = grid_from(&[
            "      ",
            "      ",
            "      ",
            "  #   ",
            "  #   ",
            "######",
        ]);
        let mut hero = hero_at(16, 48);
        hero.set_motion(Motion::Walking);
        let mut ev = vec![];
        hero.tick(&tiles, &mut ev);
        assert_eq!(hero.x(), 16);
        assert!(!hero.moving_horizontally);
    }

    #[test]
    fn push_backs_off_to_free_position() {
        let tiles = grid_from(&[
            "      ",
            "      ",
            "      ",
            "   #  ",
            "   #  ",
            "######",
        ]);
        let mut hero = hero_at(24, 48);
        let applied = hero.push_horizontally(&tiles, 16);
        assert_eq!(applied, 8);
        assert_eq!(hero.x(), 32);
        assert_eq!(hero.push_vertically(&tiles, 8), 0);
    }

    #[test]
    fn damage_cadence_is_one_per_seventeen_ticks() {
        let tiles = room();
        let mut hero = hero_at(16, 48);
        hero.add_hurting_actor(ActorId(7));
        let mut ev = vec![];
        hero.tick(&tiles, &mut ev);
        assert_eq!(hero.health(), 7);
        for _ in 0..16 {
            hero.tick(&tiles, &mut ev);
        }
        assert_eq!(hero.health(), 7);
        hero.tick(&tiles, &mut ev);
        assert_eq!(hero.health(), 6);
        for _ in 0..17 {
            hero.tick(&tiles, &mut ev);
        }
        assert_eq!(hero.health(), 5);
    }

    #[test]
    fn several_hazards_do_not_stack_damage() {
        let tiles = room();
        let mut hero = hero_at(16, 48);
        hero.add_hurting_actor(ActorId(1));
        hero.add_hurting_actor(ActorId(2));
        let mut ev = vec![];
        hero.tick(&tiles, &mut ev);
        assert_eq!(hero.health(), 7);
    }

    #[test]
    fn hurting_is_a_multiset() {
        let mut hero = Hero::new();
        hero.add_hurting_actor(ActorId(3));
        hero.add_hurting_actor(ActorId(3));
        hero.add_hurting_actor(ActorId(4));
        hero.remove_hurting_actor(ActorId(3));
        assert_eq!(hero.hurting_count(), 2);
        hero.remove_hurting_actor(ActorId(9));
        assert_eq!(hero.hurting_count(), 2);
    }

    #[test]
    fn no_damage_once_hazard_leaves() {
        let tiles = room();
        let mut hero = hero_at(16, 48);
        hero.add_hurting_actor(ActorId(1));
        let mut ev = vec![];
        hero.tick(&tiles, &mut ev);
        hero.remove_hurting_actor(ActorId(1));
        for _ in 0..40 {
            hero.tick(&tiles, &mut ev);
        }
        assert_eq!(hero.health(), 7);
    }

    #[test]
    fn setters_clamp_and_notify_on_change() {
        let mut hero = Hero::new();
        let mut ev = vec![];
        hero.set_health(12, &mut ev);
        assert_eq!(hero.health(), MAX_HEALTH);
        assert!(ev.is_empty());
        hero.set_firepower(9, &mut ev);
        assert_eq!(hero.firepower(), MAX_FIREPOWER);
        hero.add_score(100, &mut ev);
        assert_eq!(
            ev,
            vec![
                GameEvent::FirepowerChanged { firepower: 4 },
                GameEvent::ScoreChanged { score: 100 },
            ]
        );
    }

    #[test]
    fn entering_level_drops_level_scoped_items() {
        let mut hero = Hero::new();
        let mut ev = vec![];
        hero.give(Inventory::KEY_RED | Inventory::GLOVE | Inventory::BOOT, &mut ev);
        hero.add_hurting_actor(ActorId(1));
        hero.enter_level(32, 16, &mut ev);
        assert_eq!(hero.inventory(), Inventory::BOOT);
        assert_eq!(hero.hurting_count(), 0);
        assert_eq!((hero.x(), hero.y()), (32, 16));
    }

    #[test]
    fn letters_complete_word_only_in_order() {
        let mut hero = Hero::new();
        let letters = Letter::ALL;
        let (last, init) = letters.split_last().unwrap();
        for &l in init {
            assert!(!hero.fetch_letter(l));
        }
        assert!(hero.fetch_letter(*last));

        assert!(!hero.fetch_letter(Letter::D));
        assert!(!hero.fetch_letter(Letter::K));
        assert_eq!(hero.fetched_letter, None);
    }

    #[test]
    fn clamped_inside_level() {
        let tiles = TileGrid::new(4, 4);
        let mut hero = hero_at(-5, 100);
        let mut ev = vec![];
        hero.clamp_to(&tiles);
        assert_eq!((hero.x(), hero.y()), (0, 32));
        hero.tick(&tiles, &mut ev);
        assert!(hero.x() >= 0);
    }
}
