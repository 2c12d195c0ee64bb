/// Actors: every non-tile object in a level.
///
/// An `Actor` is a plain record (id, type, rectangle, flags) plus a
/// family-specific `ActorData` payload. Behaviour lives in the family's
/// `Behavior` implementation, looked up by type; the free functions here
/// (`create`, `tick`, `render`, `notify_shot`, ...) are the only entry points
/// the level uses, and they route every handler failure into a `Diagnostic`
/// instead of aborting the tick.
///
/// ## Touch latch
///
/// `touches_hero` remembers whether the actor overlapped the hero at the end
/// of the previous tick. `tick()` compares it with the current overlap and
/// fires exactly one HERO_TOUCH_START on the false→true edge and one
/// HERO_TOUCH_END on the true→false edge, before running ACT.
///
/// ## Side effects
///
/// Handlers get a `Ctx`: mutable access to the tile grid and hero, plus
/// outboxes for events and level commands. Spawns and level-wide requests
/// go through `commands` and are applied by the level after the actor pass,
/// so the actor list is never mutated while it is being iterated.

use thiserror::Error;
use tracing::{debug, warn};

use super::geometry::Rect;
use super::hero::Hero;
use super::sprite::Canvas;
use super::tile::{TileGrid, HALFTILE_HEIGHT, TILE_HEIGHT, TILE_WIDTH};
use crate::sim::event::GameEvent;

/// Borrow the family payload mutably, or bail out with `InvalidState`.
macro_rules! state {
    ($actor:expr, $variant:ident) => {
        match &mut $actor.data {
            ActorData::$variant(state) => state,
            other => {
                return Err(ActorError::InvalidState { kind: $actor.kind, state: other.name() })
            }
        }
    };
}

/// Read-only counterpart of `state!`.
macro_rules! state_ref {
    ($actor:expr, $variant:ident) => {
        match &$actor.data {
            ActorData::$variant(state) => state,
            other => {
                return Err(ActorError::InvalidState { kind: $actor.kind, state: other.name() })
            }
        }
    };
}

mod animation;
mod behavior;
mod bots;
mod floors;
mod hazards;
mod items;
pub mod kind;
mod mechanisms;

pub use behavior::Signal;
pub use kind::{ActorType, Family, KeyColor, Lock};

use behavior::Behavior;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ActorId(pub u32);

#[derive(Clone, Debug)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorType,
    pub rect: Rect,
    pub data: ActorData,
    pub is_alive: bool,
    pub touches_hero: bool,
    pub is_in_foreground: bool,
    pub is_visible: bool,
    pub acts_while_invisible: bool,
}

/// Per-family state. `Inert` marks placeholders and actors whose creation
/// failed; they are routed to the no-op behaviour.
#[derive(Clone, Debug, PartialEq)]
pub enum ActorData {
    Inert,
    Animation(animation::AnimationState),
    Score(animation::ScoreState),
    Particle(animation::ParticleState),
    Walker(bots::WalkerState),
    WallCrawler(bots::WallCrawlerState),
    RedBall(bots::RedBallState),
    Camera(bots::CameraState),
    Spikes(hazards::SpikeState),
    Fire(hazards::FireState),
    Acme(hazards::AcmeState),
    Mill(hazards::MillState),
    Bomb(hazards::BombState),
    BombFire(hazards::BombFireState),
    HostileShot(hazards::HostileShotState),
    Door(mechanisms::DoorState),
    Keyhole(mechanisms::KeyholeState),
    Lift(mechanisms::LiftState),
    ExitDoor(mechanisms::ExitDoorState),
    Teleporter(mechanisms::TeleporterState),
    Conveyor(floors::ConveyorState),
    UnstableFloor(floors::UnstableFloorState),
    ExpandingFloor(floors::ExpandingFloorState),
    Fan(floors::FanState),
    Item(items::ItemState),
    Box(items::BoxState),
    Rocket(items::RocketState),
}

impl ActorData {
    pub fn name(&self) -> &'static str {
        match self {
            ActorData::Inert => "inert",
            ActorData::Animation(_) => "animation",
            ActorData::Score(_) => "score",
            ActorData::Particle(_) => "particle",
            ActorData::Walker(_) => "walker",
            ActorData::WallCrawler(_) => "wall crawler",
            ActorData::RedBall(_) => "red ball",
            ActorData::Camera(_) => "camera",
            ActorData::Spikes(_) => "spikes",
            ActorData::Fire(_) => "fire",
            ActorData::Acme(_) => "acme",
            ActorData::Mill(_) => "mill",
            ActorData::Bomb(_) => "bomb",
            ActorData::BombFire(_) => "bomb fire",
            ActorData::HostileShot(_) => "hostile shot",
            ActorData::Door(_) => "door",
            ActorData::Keyhole(_) => "keyhole",
            ActorData::Lift(_) => "lift",
            ActorData::ExitDoor(_) => "exit door",
            ActorData::Teleporter(_) => "teleporter",
            ActorData::Conveyor(_) => "conveyor",
            ActorData::UnstableFloor(_) => "unstable floor",
            ActorData::ExpandingFloor(_) => "expanding floor",
            ActorData::Fan(_) => "fan",
            ActorData::Item(_) => "item",
            ActorData::Box(_) => "box",
            ActorData::Rocket(_) => "rocket",
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Errors and diagnostics
// ══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActorError {
    #[error("{handler} handler does not know actor type {kind:?}")]
    InvalidType { handler: &'static str, kind: ActorType },
    #[error("actor type {kind:?} found in unexpected state `{state}`")]
    InvalidState { kind: ActorType, state: &'static str },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operation {
    Create,
    Free,
    HeroTouchStart,
    HeroTouchEnd,
    HeroInteractStart,
    HeroInteractEnd,
    Act,
    Blit,
    Shot,
    Signal,
}

/// A handler failure, kept by the level for inspection.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub actor: ActorId,
    pub kind: ActorType,
    pub operation: Operation,
    pub error: ActorError,
}

fn report<T>(
    diagnostics: &mut Vec<Diagnostic>,
    actor: &Actor,
    operation: Operation,
    result: Result<T, ActorError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(actor = actor.id.0, kind = ?actor.kind, ?operation, %error, "actor handler failed");
            diagnostics.push(Diagnostic { actor: actor.id, kind: actor.kind, operation, error });
            None
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Handler context and level commands
// ══════════════════════════════════════════════════════════════

/// Requests an actor makes of the level; applied after the actor pass.
#[derive(Clone, Debug, PartialEq)]
pub enum LevelCommand {
    Spawn { kind: ActorType, x: i32, y: i32 },
    Broadcast(Signal),
    Teleport { from: ActorId },
    FinishLevel,
    ShowMessage(String),
}

pub struct Ctx<'a> {
    pub tiles: &'a mut TileGrid,
    pub hero: &'a mut Hero,
    pub events: &'a mut Vec<GameEvent>,
    pub commands: &'a mut Vec<LevelCommand>,
    pub diagnostics: &'a mut Vec<Diagnostic>,
}

impl Ctx<'_> {
    pub fn spawn(&mut self, kind: ActorType, x: i32, y: i32) {
        self.commands.push(LevelCommand::Spawn { kind, x, y });
    }

    /// Add points and float a popup for them at (x, y).
    pub fn award(&mut self, points: u64, x: i32, y: i32) {
        self.hero.add_score(points, self.events);
        if let Some(popup) = ActorType::score_popup(points) {
            self.spawn(popup, x, y);
        }
    }

    pub fn message(&mut self, text: impl Into<String>) {
        self.commands.push(LevelCommand::ShowMessage(text.into()));
    }
}

// ── Shared helpers for family handlers ──

/// Is there solid ground right under `rect`?
pub(crate) fn on_floor(rect: &Rect, tiles: &TileGrid) -> bool {
    tiles.rect_is_blocked(&Rect::new(rect.x, rect.bottom(), rect.w, 1))
}

/// Drop up to half a tile, stopping on the first solid cell.
/// Returns whether it moved.
pub(crate) fn fall(rect: &mut Rect, tiles: &TileGrid) -> bool {
    let mut dy = HALFTILE_HEIGHT;
    while dy > 0 && tiles.rect_is_blocked(&rect.offset(0, dy)) {
        dy -= 1;
    }
    rect.y += dy;
    dy > 0
}

/// Shot to pieces: explode, award points, die.
pub(crate) fn destroy(actor: &mut Actor, ctx: &mut Ctx, points: u64, remains: ActorType) {
    actor.is_alive = false;
    ctx.spawn(remains, actor.rect.x, actor.rect.y);
    ctx.award(points, actor.rect.x, actor.rect.y);
    ctx.events.push(GameEvent::ActorDestroyed { kind: actor.kind, x: actor.rect.x, y: actor.rect.y });
}

// ══════════════════════════════════════════════════════════════
// Dispatch
// ══════════════════════════════════════════════════════════════

fn handler(actor: &Actor) -> &'static dyn Behavior {
    if matches!(actor.data, ActorData::Inert) {
        return &animation::Placeholder;
    }
    behavior::of(actor.kind)
}

/// Build an actor of `kind` at (x, y) and run its CREATE handler.
/// A failed CREATE leaves an inert placeholder behind.
pub fn create(id: ActorId, kind: ActorType, x: i32, y: i32, ctx: &mut Ctx) -> Actor {
    let mut actor = Actor {
        id,
        kind,
        rect: Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT),
        data: ActorData::Inert,
        is_alive: true,
        touches_hero: false,
        is_in_foreground: false,
        is_visible: false,
        acts_while_invisible: false,
    };
    let result = behavior::of(kind).create(&mut actor, ctx);
    if report(ctx.diagnostics, &actor, Operation::Create, result).is_none() {
        actor.data = ActorData::Inert;
    }
    debug!(actor = id.0, ?kind, x, y, "actor created");
    actor
}

/// Run the FREE handler. The level drops the actor afterwards.
pub fn free(actor: &mut Actor, ctx: &mut Ctx) {
    let result = handler(actor).free(actor, ctx);
    report(ctx.diagnostics, actor, Operation::Free, result);
    debug!(actor = actor.id.0, kind = ?actor.kind, "actor freed");
}

/// One simulation tick: touch edge detection, then ACT.
/// Touch edges run for every live actor; only ACT waits for visibility.
/// Returns whether the actor is still alive.
pub fn tick(actor: &mut Actor, ctx: &mut Ctx) -> bool {
    if !actor.is_alive { return false; }

    let behavior = handler(actor);
    let touching = !ctx.hero.hidden && actor.rect.overlaps(&ctx.hero.rect);
    if touching && !actor.touches_hero {
        actor.touches_hero = true;
        let result = behavior.hero_touch_start(actor, ctx);
        report(ctx.diagnostics, actor, Operation::HeroTouchStart, result);
    } else if !touching && actor.touches_hero {
        actor.touches_hero = false;
        let result = behavior.hero_touch_end(actor, ctx);
        report(ctx.diagnostics, actor, Operation::HeroTouchEnd, result);
    }

    if actor.is_alive && (actor.is_visible || actor.acts_while_invisible) {
        let result = behavior.act(actor, ctx);
        report(ctx.diagnostics, actor, Operation::Act, result);
    }
    actor.is_alive
}

pub fn render(actor: &Actor, canvas: &mut dyn Canvas, diagnostics: &mut Vec<Diagnostic>) {
    if !actor.is_alive { return; }
    let result = handler(actor).blit(actor, canvas);
    report(diagnostics, actor, Operation::Blit, result);
}

pub fn can_be_shot(actor: &Actor) -> bool {
    actor.is_alive && handler(actor).can_be_shot(actor)
}

/// Deliver a hit. Returns true if the actor absorbed the shot.
pub fn notify_shot(actor: &mut Actor, ctx: &mut Ctx) -> bool {
    let result = handler(actor).shot(actor, ctx);
    report(ctx.diagnostics, actor, Operation::Shot, result).unwrap_or(false)
}

pub fn hero_can_interact(actor: &Actor) -> bool {
    actor.is_alive && handler(actor).can_interact(actor)
}

pub fn hero_interact_start(actor: &mut Actor, ctx: &mut Ctx) {
    let result = handler(actor).hero_interact_start(actor, ctx);
    report(ctx.diagnostics, actor, Operation::HeroInteractStart, result);
}

pub fn hero_interact_end(actor: &mut Actor, ctx: &mut Ctx) {
    let result = handler(actor).hero_interact_end(actor, ctx);
    report(ctx.diagnostics, actor, Operation::HeroInteractEnd, result);
}

pub fn signal(actor: &mut Actor, signal: Signal, ctx: &mut Ctx) {
    if !actor.is_alive { return; }
    let result = handler(actor).signal(actor, signal, ctx);
    report(ctx.diagnostics, actor, Operation::Signal, result);
}

pub fn is_foreground(actor: &Actor) -> bool {
    actor.is_in_foreground
}

/// Tile-aligned cell of the actor's top-left corner.
pub(crate) fn cell_of(rect: &Rect) -> (i32, i32) {
    (rect.x.div_euclid(TILE_WIDTH), rect.y.div_euclid(TILE_HEIGHT))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Minimal level harness for exercising handlers in isolation.

    use super::*;
    use crate::domain::hero::{HERO_HEIGHT, HERO_WIDTH};

    pub struct Bench {
        pub tiles: TileGrid,
        pub hero: Hero,
        pub events: Vec<GameEvent>,
        pub commands: Vec<LevelCommand>,
        pub diagnostics: Vec<Diagnostic>,
        next: u32,
    }

    impl Bench {
        pub fn new(tiles: TileGrid) -> Self {
            let mut hero = Hero::new();
            // parked far away from everything
            hero.rect = Rect::new(tiles.pixel_width() - HERO_WIDTH, 0, HERO_WIDTH, HERO_HEIGHT);
            Bench {
                tiles,
                hero,
                events: vec![],
                commands: vec![],
                diagnostics: vec![],
                next: 1,
            }
        }

        pub fn ctx(&mut self) -> Ctx<'_> {
            Ctx {
                tiles: &mut self.tiles,
                hero: &mut self.hero,
                events: &mut self.events,
                commands: &mut self.commands,
                diagnostics: &mut self.diagnostics,
            }
        }

        pub fn spawn(&mut self, kind: ActorType, x: i32, y: i32) -> Actor {
            let id = ActorId(self.next);
            self.next += 1;
            let mut actor = create(id, kind, x, y, &mut self.ctx());
            actor.is_visible = true;
            actor
        }

        pub fn tick(&mut self, actor: &mut Actor) -> bool {
            tick(actor, &mut self.ctx())
        }

        pub fn spawned(&self) -> Vec<ActorType> {
            self.commands
                .iter()
                .filter_map(|c| match c {
                    LevelCommand::Spawn { kind, .. } => Some(*kind),
                    _ => None,
                })
                .collect()
        }
    }
}
