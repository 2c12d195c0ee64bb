/// Level mechanisms: doors and their locks, lifts, the exit door and
/// teleporters.
///
/// Locks never touch doors directly. A keyhole that accepts its key posts a
/// `Signal::OpenDoors` broadcast; every door whose lock matches starts its
/// opening animation and clears its solid cell when it finishes.

use tracing::debug;

use super::behavior::{Behavior, Signal};
use super::kind::{ActorType, Lock};
use super::{cell_of, Actor, ActorData, ActorError, Ctx, LevelCommand};
use crate::domain::hero::Inventory;
use crate::domain::sprite::{Canvas, Sprite};
use crate::domain::tile::{TILE_HEIGHT, TILE_WIDTH};
use crate::sim::event::GameEvent;

pub const DOOR_OPEN_TICKS: u8 = 8;
const EXIT_DOOR_TICKS: u8 = 4;

// ══════════════════════════════════════════════════════════════
// Doors
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DoorState {
    pub lock: Lock,
    /// Ticks spent opening; `None` while shut.
    pub opening: Option<u8>,
}

pub struct Door;

impl Behavior for Door {
    fn create(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let Some(lock) = actor.kind.lock() else {
            return Err(ActorError::InvalidType { handler: "door", kind: actor.kind });
        };
        let (cx, cy) = cell_of(&actor.rect);
        ctx.tiles.set_solid(cx, cy, true);
        actor.data = ActorData::Door(DoorState { lock, opening: None });
        Ok(())
    }

    fn free(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let (cx, cy) = cell_of(&actor.rect);
        ctx.tiles.set_solid(cx, cy, false);
        Ok(())
    }

    fn signal(&self, actor: &mut Actor, signal: Signal, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        let door = state!(actor, Door);
        if signal == Signal::OpenDoors(door.lock) && door.opening.is_none() {
            debug!(actor = id.0, lock = ?door.lock, "door opening");
            door.opening = Some(0);
        }
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let (cx, cy) = cell_of(&actor.rect);
        let door = state!(actor, Door);
        let Some(n) = door.opening else { return Ok(()) };
        let n = n + 1;
        door.opening = Some(n);
        if n >= DOOR_OPEN_TICKS {
            ctx.tiles.set_solid(cx, cy, false);
            actor.is_alive = false;
            ctx.events.push(GameEvent::DoorOpened);
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let door = state_ref!(actor, Door);
        let frame = door.opening.unwrap_or(0) as u16;
        canvas.draw(Sprite::actor(actor.kind, frame), actor.rect.x, actor.rect.y);
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════
// Keyholes, access card slot, glove slot
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct KeyholeState {
    pub used: bool,
    pub frame: u16,
}

fn slot_unused(actor: &Actor) -> bool {
    matches!(actor.data, ActorData::Keyhole(KeyholeState { used: false, .. }))
}

fn blink(actor: &mut Actor) -> Result<(), ActorError> {
    let slot = state!(actor, Keyhole);
    if !slot.used {
        slot.frame = (slot.frame + 1) % 2;
    }
    Ok(())
}

fn draw_slot(actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
    let slot = state_ref!(actor, Keyhole);
    let frame = if slot.used { 2 } else { slot.frame };
    canvas.draw(Sprite::actor(actor.kind, frame), actor.rect.x, actor.rect.y);
    Ok(())
}

/// Takes the matching key (or the access card) and opens the matching doors.
pub struct Keyhole;

impl Behavior for Keyhole {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        if actor.kind.lock().is_none() {
            return Err(ActorError::InvalidType { handler: "keyhole", kind: actor.kind });
        }
        actor.data = ActorData::Keyhole(KeyholeState::default());
        Ok(())
    }

    fn hero_interact_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let Some(lock) = actor.kind.lock() else {
            return Err(ActorError::InvalidType { handler: "keyhole", kind: actor.kind });
        };
        let slot = state!(actor, Keyhole);
        if slot.used { return Ok(()); }

        let item = match lock {
            Lock::Key(color) => color.key(),
            Lock::AccessCard => Inventory::ACCESS_CARD,
        };
        if ctx.hero.take(item, ctx.events) {
            slot.used = true;
            ctx.commands.push(LevelCommand::Broadcast(Signal::OpenDoors(lock)));
        } else {
            match lock {
                Lock::Key(color) => ctx.message(format!("You need the {} key.", color.name())),
                Lock::AccessCard => ctx.message("You need the access card."),
            }
        }
        Ok(())
    }

    fn act(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        blink(actor)
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        draw_slot(actor, canvas)
    }

    fn can_interact(&self, actor: &Actor) -> bool {
        slot_unused(actor)
    }
}

/// Takes the glove and extends every expanding floor in the level.
pub struct GloveSlot;

impl Behavior for GloveSlot {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.data = ActorData::Keyhole(KeyholeState::default());
        Ok(())
    }

    fn hero_interact_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let slot = state!(actor, Keyhole);
        if slot.used { return Ok(()); }
        if ctx.hero.take(Inventory::GLOVE, ctx.events) {
            slot.used = true;
            ctx.commands.push(LevelCommand::Broadcast(Signal::ExtendFloors));
        } else {
            ctx.message("The slot is shaped like a glove.");
        }
        Ok(())
    }

    fn act(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        blink(actor)
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        draw_slot(actor, canvas)
    }

    fn can_interact(&self, actor: &Actor) -> bool {
        slot_unused(actor)
    }
}

// ══════════════════════════════════════════════════════════════
// Lift
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LiftPhase {
    #[default]
    Idle,
    Ascending,
    Descending,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LiftState {
    pub phase: LiftPhase,
}

/// A platform that grows upward one tile per tick while the hero stands on
/// it holding interact, and sinks back when released. Its rectangle spans
/// the platform and the column under it; every cell of it is solid.
pub struct Lift;

impl Behavior for Lift {
    fn create(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let (cx, cy) = cell_of(&actor.rect);
        ctx.tiles.set_solid(cx, cy, true);
        actor.data = ActorData::Lift(LiftState::default());
        Ok(())
    }

    fn free(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let (cx, top) = cell_of(&actor.rect);
        let rows = actor.rect.h / TILE_HEIGHT;
        for cy in top..top + rows {
            ctx.tiles.set_solid(cx, cy, false);
        }
        Ok(())
    }

    fn hero_interact_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let rect = actor.rect;
        let lift = state!(actor, Lift);
        if ctx.hero.rect().stands_on(&rect) {
            lift.phase = LiftPhase::Ascending;
        }
        Ok(())
    }

    fn hero_interact_end(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let lift = state!(actor, Lift);
        lift.phase = LiftPhase::Descending;
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let rect = actor.rect;
        let (cx, top) = cell_of(&rect);
        let lift = state!(actor, Lift);
        match lift.phase {
            LiftPhase::Idle => {}
            LiftPhase::Ascending => {
                if !ctx.hero.rect().stands_on(&rect) {
                    lift.phase = LiftPhase::Descending;
                    return Ok(());
                }
                let applied = ctx.hero.push_vertically(ctx.tiles, -TILE_HEIGHT);
                if applied != -TILE_HEIGHT {
                    // no headroom: put the hero back and stop
                    ctx.hero.set_y(ctx.hero.y() - applied);
                    lift.phase = LiftPhase::Idle;
                    return Ok(());
                }
                ctx.tiles.set_solid(cx, top - 1, true);
                actor.rect.y -= TILE_HEIGHT;
                actor.rect.h += TILE_HEIGHT;
            }
            LiftPhase::Descending => {
                if rect.h <= TILE_HEIGHT {
                    lift.phase = LiftPhase::Idle;
                    return Ok(());
                }
                ctx.tiles.set_solid(cx, top, false);
                actor.rect.y += TILE_HEIGHT;
                actor.rect.h -= TILE_HEIGHT;
            }
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        state_ref!(actor, Lift);
        canvas.draw(Sprite::actor(actor.kind, 0), actor.rect.x, actor.rect.y);
        let mut y = actor.rect.y + TILE_HEIGHT;
        while y < actor.rect.bottom() {
            canvas.draw(Sprite::actor(actor.kind, 1), actor.rect.x, y);
            y += TILE_HEIGHT;
        }
        Ok(())
    }

    fn can_interact(&self, _actor: &Actor) -> bool {
        true
    }
}

// ══════════════════════════════════════════════════════════════
// Exit door
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ExitPhase {
    #[default]
    Closed,
    Opening(u8),
    Closing(u8),
    Done,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ExitDoorState {
    pub phase: ExitPhase,
}

/// Opens, swallows the hero, closes, ends the level.
pub struct ExitDoor;

impl Behavior for ExitDoor {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.rect.w = 2 * TILE_WIDTH;
        actor.rect.h = 2 * TILE_HEIGHT;
        actor.acts_while_invisible = true;
        actor.data = ActorData::ExitDoor(ExitDoorState::default());
        Ok(())
    }

    fn hero_interact_start(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let door = state!(actor, ExitDoor);
        if door.phase == ExitPhase::Closed {
            door.phase = ExitPhase::Opening(0);
        }
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let door = state!(actor, ExitDoor);
        door.phase = match door.phase {
            ExitPhase::Opening(n) if n + 1 >= EXIT_DOOR_TICKS => {
                ctx.hero.hidden = true;
                ExitPhase::Closing(0)
            }
            ExitPhase::Opening(n) => ExitPhase::Opening(n + 1),
            ExitPhase::Closing(n) if n + 1 >= EXIT_DOOR_TICKS => {
                ctx.commands.push(LevelCommand::FinishLevel);
                ExitPhase::Done
            }
            ExitPhase::Closing(n) => ExitPhase::Closing(n + 1),
            phase => phase,
        };
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let door = state_ref!(actor, ExitDoor);
        let frame = match door.phase {
            ExitPhase::Closed | ExitPhase::Done => 0,
            ExitPhase::Opening(n) => n as u16,
            ExitPhase::Closing(n) => (EXIT_DOOR_TICKS - 1 - n) as u16,
        };
        canvas.draw(Sprite::actor(actor.kind, frame), actor.rect.x, actor.rect.y);
        Ok(())
    }

    fn can_interact(&self, actor: &Actor) -> bool {
        matches!(actor.data, ActorData::ExitDoor(ExitDoorState { phase: ExitPhase::Closed }))
    }
}

// ══════════════════════════════════════════════════════════════
// Teleporter
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TeleporterState {
    pub frame: u16,
}

/// Sends the hero to the teleporter of the other kind.
pub struct Teleporter;

impl Behavior for Teleporter {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        if !matches!(actor.kind, ActorType::Teleporter1 | ActorType::Teleporter2) {
            return Err(ActorError::InvalidType { handler: "teleporter", kind: actor.kind });
        }
        actor.rect.h = 2 * TILE_HEIGHT;
        actor.data = ActorData::Teleporter(TeleporterState::default());
        Ok(())
    }

    fn hero_interact_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        ctx.commands.push(LevelCommand::Teleport { from: actor.id });
        Ok(())
    }

    fn act(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let tp = state!(actor, Teleporter);
        tp.frame = (tp.frame + 1) % 4;
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let tp = state_ref!(actor, Teleporter);
        canvas.draw(Sprite::actor(actor.kind, tp.frame), actor.rect.x, actor.rect.y);
        Ok(())
    }

    fn can_interact(&self, _actor: &Actor) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::super::{hero_interact_end, hero_interact_start, signal};
    use super::*;
    use crate::domain::tile::{grid_from, TileGrid};

    fn shaft() -> TileGrid {
        grid_from(&[
            "      ",
            "      ",
            "      ",
            "      ",
            "      ",
            "      ",
            "      ",
            "######",
        ])
    }

    #[test]
    fn door_solid_until_opened() {
        let mut bench = Bench::new(shaft());
        let mut door = bench.spawn(ActorType::DoorRed, 32, 96);
        assert!(bench.tiles.is_solid(2, 6));

        signal(&mut door, Signal::OpenDoors(Lock::AccessCard), &mut bench.ctx());
        bench.tick(&mut door);
        assert!(bench.tiles.is_solid(2, 6));

        let lock = door.kind.lock().unwrap();
        signal(&mut door, Signal::OpenDoors(lock), &mut bench.ctx());
        for _ in 0..DOOR_OPEN_TICKS - 1 {
            assert!(bench.tick(&mut door));
            assert!(bench.tiles.is_solid(2, 6));
        }
        assert!(!bench.tick(&mut door));
        assert!(!bench.tiles.is_solid(2, 6));
    }

    #[test]
    fn keyhole_consumes_key_and_broadcasts() {
        let mut bench = Bench::new(shaft());
        let mut hole = bench.spawn(ActorType::KeyholeBlue, 16, 80);
        hero_interact_start(&mut hole, &mut bench.ctx());
        assert_eq!(
            bench.commands,
            vec![LevelCommand::ShowMessage("You need the blue key.".into())]
        );

        bench.commands.clear();
        bench.hero.give(Inventory::KEY_BLUE, &mut bench.events);
        hero_interact_start(&mut hole, &mut bench.ctx());
        assert!(!bench.hero.inventory().contains(Inventory::KEY_BLUE));
        assert_eq!(
            bench.commands,
            vec![LevelCommand::Broadcast(Signal::OpenDoors(Lock::Key(crate::domain::actor::KeyColor::Blue)))]
        );
        assert!(!super::super::hero_can_interact(&hole));
    }

    #[test]
    fn lift_carries_hero_up_one_tile_per_tick() {
        let mut bench = Bench::new(shaft());
        let mut lift = bench.spawn(ActorType::Lift, 32, 96);
        bench.hero.rect.x = 32;
        bench.hero.rect.y = 64;
        hero_interact_start(&mut lift, &mut bench.ctx());

        for n in 1..=3 {
            bench.tick(&mut lift);
            assert_eq!(lift.rect.y, 96 - n * TILE_HEIGHT);
            assert_eq!(lift.rect.h, (n + 1) * TILE_HEIGHT);
            assert_eq!(bench.hero.y(), 64 - n * TILE_HEIGHT);
            assert!(bench.tiles.is_solid(2, 6 - n));
        }

        hero_interact_end(&mut lift, &mut bench.ctx());
        for _ in 0..3 {
            bench.tick(&mut lift);
        }
        assert_eq!(lift.rect, crate::domain::geometry::Rect::new(32, 96, 16, 16));
        assert!(!bench.tiles.is_solid(2, 5));
        assert!(bench.tiles.is_solid(2, 6));
    }

    #[test]
    fn lift_stops_under_ceiling() {
        let mut bench = Bench::new(grid_from(&[
            "######",
            "      ",
            "      ",
            "      ",
            "######",
        ]));
        let mut lift = bench.spawn(ActorType::Lift, 32, 48);
        bench.hero.rect.x = 32;
        bench.hero.rect.y = 16;
        hero_interact_start(&mut lift, &mut bench.ctx());
        bench.tick(&mut lift);
        assert_eq!(lift.rect.y, 48);
        assert_eq!(bench.hero.y(), 16);
        assert_eq!(lift.data, ActorData::Lift(LiftState { phase: LiftPhase::Idle }));
    }

    #[test]
    fn lift_free_clears_its_column() {
        let mut bench = Bench::new(shaft());
        let mut lift = bench.spawn(ActorType::Lift, 32, 96);
        bench.hero.rect.x = 32;
        bench.hero.rect.y = 64;
        hero_interact_start(&mut lift, &mut bench.ctx());
        bench.tick(&mut lift);
        bench.tick(&mut lift);
        super::super::free(&mut lift, &mut bench.ctx());
        for cy in 4..7 {
            assert!(!bench.tiles.is_solid(2, cy));
        }
    }

    #[test]
    fn exit_door_hides_hero_then_finishes() {
        let mut bench = Bench::new(shaft());
        let mut exit = bench.spawn(ActorType::ExitDoor, 16, 80);
        hero_interact_start(&mut exit, &mut bench.ctx());
        for _ in 0..EXIT_DOOR_TICKS {
            bench.tick(&mut exit);
        }
        assert!(bench.hero.hidden);
        assert!(bench.commands.is_empty());
        for _ in 0..EXIT_DOOR_TICKS {
            bench.tick(&mut exit);
        }
        assert_eq!(bench.commands, vec![LevelCommand::FinishLevel]);
    }
}
