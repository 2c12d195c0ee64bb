/// The behaviour table.
///
/// One `Behavior` implementation per family; every lifecycle operation has a
/// no-op default so a family only spells out the operations it reacts to.
/// `of()` is the static lookup from type to implementation.

use super::kind::{ActorType, Family, Lock};
use super::{animation, bots, floors, hazards, items, mechanisms};
use super::{Actor, ActorError, Ctx};
use crate::domain::sprite::Canvas;

/// Level-wide notifications delivered to every actor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Signal {
    OpenDoors(Lock),
    ExtendFloors,
}

pub trait Behavior: Sync {
    /// Size the actor, initialise its data and any grid registrations.
    fn create(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError>;

    /// Release registrations made elsewhere (hurting list, solid cells).
    fn free(&self, _actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        Ok(())
    }

    fn hero_touch_start(&self, _actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        Ok(())
    }

    fn hero_touch_end(&self, _actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        Ok(())
    }

    fn hero_interact_start(&self, _actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        Ok(())
    }

    fn hero_interact_end(&self, _actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        Ok(())
    }

    fn act(&self, _actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        Ok(())
    }

    /// Draw only. Must not change simulation state.
    fn blit(&self, _actor: &Actor, _canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        Ok(())
    }

    /// Returns true if the shot was absorbed.
    fn shot(&self, _actor: &mut Actor, _ctx: &mut Ctx) -> Result<bool, ActorError> {
        Ok(false)
    }

    fn signal(&self, _actor: &mut Actor, _signal: Signal, _ctx: &mut Ctx) -> Result<(), ActorError> {
        Ok(())
    }

    fn can_be_shot(&self, _actor: &Actor) -> bool {
        false
    }

    fn can_interact(&self, _actor: &Actor) -> bool {
        false
    }
}

pub fn of(kind: ActorType) -> &'static dyn Behavior {
    match kind.family() {
        Family::Placeholder => &animation::Placeholder,
        Family::Animation => &animation::LoopingAnimation,
        Family::SingleAnimation => &animation::SingleAnimation,
        Family::ScorePopup => &animation::ScorePopup,
        Family::Particle => &animation::Particle,
        Family::Walker => &bots::Walker,
        Family::WallCrawler => &bots::WallCrawler,
        Family::RedBall => &bots::RedBall,
        Family::Camera => &bots::SecurityCamera,
        Family::Spikes => &hazards::Spikes,
        Family::Fire => &hazards::Fire,
        Family::Acme => &hazards::Acme,
        Family::Mill => &hazards::Mill,
        Family::Bomb => &hazards::Bomb,
        Family::BombFire => &hazards::BombFire,
        Family::HostileShot => &hazards::HostileShot,
        Family::Door => &mechanisms::Door,
        Family::Keyhole => &mechanisms::Keyhole,
        Family::GloveSlot => &mechanisms::GloveSlot,
        Family::Lift => &mechanisms::Lift,
        Family::ExitDoor => &mechanisms::ExitDoor,
        Family::Teleporter => &mechanisms::Teleporter,
        Family::ExpandingFloor => &floors::ExpandingFloor,
        Family::Conveyor => &floors::Conveyor,
        Family::UnstableFloor => &floors::UnstableFloor,
        Family::Fan => &floors::Fan,
        Family::Item => &items::Item,
        Family::SodaFlying => &items::SodaFlying,
        Family::Box => &items::Crate,
        Family::Rocket => &items::Rocket,
    }
}
