/// Events emitted during a simulation step.
/// The presentation layer consumes these for the HUD and sound; the
/// simulation itself never reads them back.

use crate::domain::actor::ActorType;
use crate::domain::hero::Inventory;

#[derive(Clone, Debug, PartialEq)]
#[allow(dead_code)]
pub enum GameEvent {
    // ── Hero state changes (HUD) ──
    HealthChanged { health: u8 },
    FirepowerChanged { firepower: u8 },
    InventoryChanged { inventory: Inventory },
    ScoreChanged { score: u64 },

    // ── Hero motion ──
    HeroJumped,
    HeroLanded,
    HeroBumpedHead,
    HeroHurt,
    HeroKilled,
    Teleported,

    // ── Shots ──
    ShotFired,
    ShotHit { kind: ActorType },
    ShotBlocked { x: i32, y: i32 },

    // ── Actors ──
    ActorDestroyed { kind: ActorType, x: i32, y: i32 },
    ItemPicked { kind: ActorType },
    LetterBonus,
    DoorOpened,
    FloorCrumbled { x: i32, y: i32 },
    LevelFinished,
}
