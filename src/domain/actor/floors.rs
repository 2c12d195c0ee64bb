/// Floors that do something: conveyors, crumbling floors, expanding
/// bridges and fans.
///
/// Conveyors and unstable floors are placed on the first cell of a run of
/// their tile kind and start with zero width; the first ACT measures the run.

use tracing::debug;

use super::behavior::{Behavior, Signal};
use super::kind::ActorType;
use super::{cell_of, Actor, ActorData, ActorError, Ctx};
use crate::domain::geometry::{Facing, Rect};
use crate::domain::sprite::{Canvas, Sprite};
use crate::domain::tile::{Tile, TILE_HEIGHT, TILE_WIDTH};
use crate::sim::event::GameEvent;

const CONVEYOR_PUSH: i32 = 4;
const CRUMBLE_TICKS: u8 = 3;
const BRIDGE_MAX_LENGTH: i32 = 16;
const FAN_PUSH: i32 = 8;
const FAN_REACH: i32 = 6 * TILE_WIDTH;
const FAN_POINTS: u64 = 1000;

/// Measure a zero-width floor actor along its tile run. Returns the run in cells.
fn measure(actor: &mut Actor, ctx: &Ctx) -> i32 {
    let (cx, cy) = cell_of(&actor.rect);
    let cells = ctx.tiles.run_length(cx, cy).max(1);
    if actor.rect.w == 0 {
        actor.rect.w = cells * TILE_WIDTH;
    }
    cells
}

fn draw_cells(actor: &Actor, frame: u16, canvas: &mut dyn Canvas) {
    let mut x = actor.rect.x;
    while x < actor.rect.right() {
        canvas.draw(Sprite::actor(actor.kind, frame), x, actor.rect.y);
        x += TILE_WIDTH;
    }
}

// ── Conveyor ──

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ConveyorState {
    pub frame: u16,
}

pub struct Conveyor;

impl Conveyor {
    fn direction(kind: ActorType) -> Option<Facing> {
        match kind {
            ActorType::ConveyorLeft => Some(Facing::Left),
            ActorType::ConveyorRight => Some(Facing::Right),
            _ => None,
        }
    }
}

impl Behavior for Conveyor {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        if Conveyor::direction(actor.kind).is_none() {
            return Err(ActorError::InvalidType { handler: "conveyor", kind: actor.kind });
        }
        actor.rect.w = 0;
        actor.acts_while_invisible = true;
        actor.data = ActorData::Conveyor(ConveyorState::default());
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let Some(direction) = Conveyor::direction(actor.kind) else {
            return Err(ActorError::InvalidType { handler: "conveyor", kind: actor.kind });
        };
        if actor.rect.w == 0 {
            measure(actor, ctx);
        }
        let belt = state!(actor, Conveyor);
        belt.frame = (belt.frame + 1) % 4;
        if !ctx.hero.hidden && ctx.hero.rect().stands_on(&actor.rect) {
            ctx.hero.push_horizontally(ctx.tiles, direction.sign() * CONVEYOR_PUSH);
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let belt = state_ref!(actor, Conveyor);
        draw_cells(actor, belt.frame, canvas);
        Ok(())
    }
}

// ── Unstable floor ──

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct UnstableFloorState {
    /// Consecutive ticks the hero has stood on it.
    pub loaded: u8,
}

pub struct UnstableFloor;

impl Behavior for UnstableFloor {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.rect.w = 0;
        actor.acts_while_invisible = true;
        actor.data = ActorData::UnstableFloor(UnstableFloorState::default());
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let cells = measure(actor, ctx);
        let rect = actor.rect;
        let floor = state!(actor, UnstableFloor);
        if !ctx.hero.rect().stands_on(&rect) {
            floor.loaded = 0;
            return Ok(());
        }
        floor.loaded += 1;
        if floor.loaded < CRUMBLE_TICKS { return Ok(()); }

        let (cx, cy) = cell_of(&rect);
        for i in 0..cells {
            ctx.tiles.set_tile(cx + i, cy, Tile::Empty);
            ctx.spawn(ActorType::DustCloud, rect.x + i * TILE_WIDTH, rect.y);
        }
        debug!(actor = actor.id.0, cells, "floor crumbled");
        ctx.events.push(GameEvent::FloorCrumbled { x: rect.x, y: rect.y });
        actor.is_alive = false;
        Ok(())
    }
}

// ── Expanding floor ──

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ExpandingFloorState {
    pub extending: bool,
    /// Cells laid so far, the base cell included.
    pub length: i32,
}

/// A bridge head that lays one bridge cell per tick to the right once the
/// glove slot is used, until it meets a solid cell.
pub struct ExpandingFloor;

impl Behavior for ExpandingFloor {
    fn create(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let (cx, cy) = cell_of(&actor.rect);
        ctx.tiles.set_tile(cx, cy, Tile::Bridge);
        actor.acts_while_invisible = true;
        actor.data = ActorData::ExpandingFloor(ExpandingFloorState { extending: false, length: 1 });
        Ok(())
    }

    fn signal(&self, actor: &mut Actor, signal: Signal, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let floor = state!(actor, ExpandingFloor);
        if signal == Signal::ExtendFloors {
            floor.extending = true;
        }
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let (cx, cy) = cell_of(&actor.rect);
        let id = actor.id;
        let floor = state!(actor, ExpandingFloor);
        if !floor.extending { return Ok(()); }

        let next = cx + floor.length;
        if floor.length >= BRIDGE_MAX_LENGTH || ctx.tiles.is_solid(next, cy) {
            floor.extending = false;
            debug!(actor = id.0, length = floor.length, "bridge complete");
            return Ok(());
        }
        ctx.tiles.set_tile(next, cy, Tile::Bridge);
        floor.length += 1;
        actor.rect.w = floor.length * TILE_WIDTH;
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        state_ref!(actor, ExpandingFloor);
        draw_cells(actor, 0, canvas);
        Ok(())
    }
}

// ── Fan ──

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct FanState {
    pub on: bool,
    pub frame: u16,
}

/// Blows the hero away along its rows while running; a shot stops it.
pub struct Fan;

impl Fan {
    fn blowing(kind: ActorType) -> Option<Facing> {
        match kind {
            ActorType::FanLeft => Some(Facing::Left),
            ActorType::FanRight => Some(Facing::Right),
            _ => None,
        }
    }

    fn zone(rect: &Rect, direction: Facing) -> Rect {
        match direction {
            Facing::Left => Rect::new(rect.x - FAN_REACH, rect.y, FAN_REACH, rect.h),
            Facing::Right => Rect::new(rect.right(), rect.y, FAN_REACH, rect.h),
        }
    }
}

impl Behavior for Fan {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        if Fan::blowing(actor.kind).is_none() {
            return Err(ActorError::InvalidType { handler: "fan", kind: actor.kind });
        }
        actor.rect.h = 2 * TILE_HEIGHT;
        actor.data = ActorData::Fan(FanState { on: true, frame: 0 });
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let Some(direction) = Fan::blowing(actor.kind) else {
            return Err(ActorError::InvalidType { handler: "fan", kind: actor.kind });
        };
        let zone = Fan::zone(&actor.rect, direction);
        let fan = state!(actor, Fan);
        if !fan.on { return Ok(()); }
        fan.frame = (fan.frame + 1) % 3;
        if !ctx.hero.hidden && zone.overlaps(&ctx.hero.rect()) {
            ctx.hero.push_horizontally(ctx.tiles, direction.sign() * FAN_PUSH);
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let fan = state_ref!(actor, Fan);
        canvas.draw(Sprite::actor(actor.kind, fan.frame), actor.rect.x, actor.rect.y);
        Ok(())
    }

    fn shot(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<bool, ActorError> {
        let (x, y) = (actor.rect.x, actor.rect.y);
        let fan = state!(actor, Fan);
        if !fan.on { return Ok(false); }
        fan.on = false;
        ctx.award(FAN_POINTS, x, y);
        Ok(true)
    }

    fn can_be_shot(&self, actor: &Actor) -> bool {
        matches!(actor.data, ActorData::Fan(FanState { on: true, .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::super::{can_be_shot, notify_shot, signal};
    use super::*;
    use crate::domain::tile::{grid_from, TileGrid};

    fn with_run(tile: Tile) -> TileGrid {
        let mut grid = grid_from(&[
            "        ",
            "        ",
            "        ",
            "########",
        ]);
        for cx in 2..5 {
            grid.set_tile(cx, 3, tile);
        }
        grid
    }

    #[test]
    fn conveyor_measures_run_and_pushes_standing_hero() {
        let mut bench = Bench::new(with_run(Tile::Conveyor));
        let mut belt = bench.spawn(ActorType::ConveyorRight, 32, 48);
        assert_eq!(belt.rect.w, 0);
        bench.hero.rect.x = 48;
        bench.hero.rect.y = 16;

        bench.tick(&mut belt);
        assert_eq!(belt.rect.w, 3 * TILE_WIDTH);
        assert_eq!(bench.hero.x(), 48 + CONVEYOR_PUSH);

        bench.hero.rect.y = 0;
        bench.tick(&mut belt);
        assert_eq!(bench.hero.x(), 48 + CONVEYOR_PUSH);
    }

    #[test]
    fn unstable_floor_crumbles_under_hero() {
        let mut bench = Bench::new(with_run(Tile::Crumbly));
        let mut floor = bench.spawn(ActorType::UnstableFloor, 32, 48);
        bench.hero.rect.x = 32;
        bench.hero.rect.y = 16;

        assert!(bench.tick(&mut floor));
        assert!(bench.tick(&mut floor));
        assert!(!bench.tick(&mut floor));

        for cx in 2..5 {
            assert!(!bench.tiles.is_solid(cx, 3));
        }
        assert!(bench.tiles.is_solid(5, 3));
        assert_eq!(bench.spawned(), vec![ActorType::DustCloud; 3]);
        assert!(bench.events.contains(&GameEvent::FloorCrumbled { x: 32, y: 48 }));
    }

    #[test]
    fn unstable_floor_forgives_a_short_visit() {
        let mut bench = Bench::new(with_run(Tile::Crumbly));
        let mut floor = bench.spawn(ActorType::UnstableFloor, 32, 48);
        bench.hero.rect.x = 32;
        bench.hero.rect.y = 16;
        bench.tick(&mut floor);
        bench.tick(&mut floor);
        bench.hero.rect.y = 0;
        bench.tick(&mut floor);
        bench.hero.rect.y = 16;
        assert!(bench.tick(&mut floor));
        assert!(bench.tiles.is_solid(2, 3));
    }

    #[test]
    fn bridge_extends_until_solid() {
        let mut bench = Bench::new(grid_from(&[
            "        ",
            "        ",
            "        ",
            "##    ##",
        ]));
        let mut head = bench.spawn(ActorType::ExpandingFloor, 32, 48);
        assert!(bench.tiles.is_solid(2, 3));
        bench.tick(&mut head);
        assert!(!bench.tiles.is_solid(3, 3));

        signal(&mut head, Signal::ExtendFloors, &mut bench.ctx());
        for _ in 0..10 {
            bench.tick(&mut head);
        }
        for cx in 2..6 {
            assert_eq!(bench.tiles.tile(cx, 3), Some(Tile::Bridge));
        }
        assert_eq!(head.rect.w, 4 * TILE_WIDTH);
        assert_eq!(head.data, ActorData::ExpandingFloor(ExpandingFloorState { extending: false, length: 4 }));
    }

    #[test]
    fn fan_blows_until_shot() {
        let mut bench = Bench::new(grid_from(&[
            "          ",
            "          ",
            "          ",
            "##########",
        ]));
        let mut fan = bench.spawn(ActorType::FanRight, 0, 16);
        bench.hero.rect.x = 48;
        bench.hero.rect.y = 16;
        bench.tick(&mut fan);
        assert_eq!(bench.hero.x(), 48 + FAN_PUSH);

        assert!(can_be_shot(&fan));
        assert!(notify_shot(&mut fan, &mut bench.ctx()));
        assert_eq!(bench.hero.score(), FAN_POINTS);
        assert!(!can_be_shot(&fan));

        bench.tick(&mut fan);
        assert_eq!(bench.hero.x(), 48 + FAN_PUSH);
        assert!(fan.is_alive);
    }
}
