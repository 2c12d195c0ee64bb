/// Pickups, boxes and the rocket.
///
/// An item applies its effect once, on the first touch, then floats a score
/// popup and dies. Boxes hold one item (or nothing) and burst when shot.

use super::behavior::Behavior;
use super::kind::ActorType;
use super::{destroy, fall, Actor, ActorData, ActorError, Ctx};
use crate::domain::hero::{Inventory, Letter, MAX_HEALTH};
use crate::domain::sprite::{Canvas, Sprite};
use crate::domain::tile::{HALFTILE_HEIGHT, TILE_HEIGHT};
use crate::sim::event::GameEvent;

pub const LETTER_POINTS: u64 = 500;
pub const WORD_BONUS: u64 = 10000;
const SODA_FLYING_POINTS: u64 = 1000;
const BALLOON_RISE: i32 = 2;
const SODA_RISE: i32 = 4;
const ROCKET_IGNITION_TICKS: u8 = 10;
const ROCKET_SPEED: i32 = HALFTILE_HEIGHT;

// ══════════════════════════════════════════════════════════════
// Items
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ItemState {
    pub frame: u16,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Effect {
    Give(Inventory),
    Firepower,
    FullHealth,
    Health(u8),
    Letter(Letter),
    Nothing,
}

/// What picking up `kind` does, and what it is worth.
fn pickup(kind: ActorType) -> Option<(Effect, u64)> {
    use ActorType::*;
    let entry = match kind {
        KeyRed => (Effect::Give(Inventory::KEY_RED), 1000),
        KeyBlue => (Effect::Give(Inventory::KEY_BLUE), 1000),
        KeyPink => (Effect::Give(Inventory::KEY_PINK), 1000),
        KeyGreen => (Effect::Give(Inventory::KEY_GREEN), 1000),
        AccessCard => (Effect::Give(Inventory::ACCESS_CARD), 1000),
        Glove => (Effect::Give(Inventory::GLOVE), 1000),
        Boot => (Effect::Give(Inventory::BOOT), 1000),
        Clamp => (Effect::Give(Inventory::CLAMP), 1000),
        Gun => (Effect::Firepower, 1000),
        FullLife => (Effect::FullHealth, 1000),
        Soda => (Effect::Health(1), 200),
        ChickenSingle => (Effect::Health(1), 100),
        ChickenDouble => (Effect::Health(2), 200),
        Football | Flag | Radio => (Effect::Nothing, 100),
        Joystick => (Effect::Nothing, 2000),
        Disk => (Effect::Nothing, 5000),
        Balloon => (Effect::Nothing, 10000),
        Notebook => (Effect::Nothing, 1000),
        LetterD | LetterU | LetterK | LetterE | LetterM => {
            (Effect::Letter(kind.letter()?), LETTER_POINTS)
        }
        _ => return None,
    };
    Some(entry)
}

fn apply(effect: Effect, ctx: &mut Ctx, x: i32, y: i32) {
    match effect {
        Effect::Give(item) => ctx.hero.give(item, ctx.events),
        Effect::Firepower => {
            let firepower = ctx.hero.firepower() + 1;
            ctx.hero.set_firepower(firepower, ctx.events);
        }
        Effect::FullHealth => ctx.hero.set_health(MAX_HEALTH, ctx.events),
        Effect::Health(amount) => ctx.hero.add_health(amount, ctx.events),
        Effect::Letter(letter) => {
            if ctx.hero.fetch_letter(letter) {
                ctx.award(WORD_BONUS, x, y - TILE_HEIGHT);
                ctx.events.push(GameEvent::LetterBonus);
            }
        }
        Effect::Nothing => {}
    }
}

pub struct Item;

impl Behavior for Item {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        if pickup(actor.kind).is_none() {
            return Err(ActorError::InvalidType { handler: "item", kind: actor.kind });
        }
        actor.data = ActorData::Item(ItemState::default());
        Ok(())
    }

    fn hero_touch_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let Some((effect, points)) = pickup(actor.kind) else {
            return Err(ActorError::InvalidType { handler: "item", kind: actor.kind });
        };
        state_ref!(actor, Item);
        let (x, y) = (actor.rect.x, actor.rect.y);
        apply(effect, ctx, x, y);
        ctx.award(points, x, y);
        ctx.events.push(GameEvent::ItemPicked { kind: actor.kind });
        actor.is_alive = false;
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let item = state!(actor, Item);
        item.frame = (item.frame + 1) % 4;
        if actor.kind == ActorType::Balloon {
            let up = actor.rect.offset(0, -BALLOON_RISE);
            if !ctx.tiles.rect_is_blocked(&up) {
                actor.rect = up;
            }
        } else {
            fall(&mut actor.rect, ctx.tiles);
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let item = state_ref!(actor, Item);
        canvas.draw(Sprite::actor(actor.kind, item.frame), actor.rect.x, actor.rect.y);
        Ok(())
    }

    fn shot(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<bool, ActorError> {
        state_ref!(actor, Item);
        let (x, y) = (actor.rect.x, actor.rect.y);
        match actor.kind {
            ActorType::Soda => {
                actor.is_alive = false;
                ctx.spawn(ActorType::SodaFlying, x, y);
            }
            // stays the same actor, just worth more
            ActorType::ChickenSingle => actor.kind = ActorType::ChickenDouble,
            ActorType::Balloon => {
                actor.is_alive = false;
                ctx.spawn(ActorType::DustCloud, x, y);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn can_be_shot(&self, actor: &Actor) -> bool {
        matches!(actor.kind, ActorType::Soda | ActorType::ChickenSingle | ActorType::Balloon)
    }
}

/// A shot soda can rocketing upwards; catch it for a bonus.
pub struct SodaFlying;

impl Behavior for SodaFlying {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.acts_while_invisible = true;
        actor.data = ActorData::Item(ItemState::default());
        Ok(())
    }

    fn hero_touch_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        state_ref!(actor, Item);
        ctx.award(SODA_FLYING_POINTS, actor.rect.x, actor.rect.y);
        ctx.events.push(GameEvent::ItemPicked { kind: actor.kind });
        actor.is_alive = false;
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let soda = state!(actor, Item);
        soda.frame = (soda.frame + 1) % 4;
        let up = actor.rect.offset(0, -SODA_RISE);
        if ctx.tiles.rect_is_blocked(&up) {
            actor.is_alive = false;
        } else {
            actor.rect = up;
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let soda = state_ref!(actor, Item);
        canvas.draw(Sprite::actor(actor.kind, soda.frame), actor.rect.x, actor.rect.y);
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════
// Boxes
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BoxState {
    pub contents: Option<ActorType>,
    pub particle: ActorType,
}

/// Contents and particle colour of a box type. `None` if it isn't a box.
fn packing(kind: ActorType) -> Option<(Option<ActorType>, ActorType)> {
    use ActorType::*;
    let grey = |item: Option<ActorType>| Some((item, ParticleGrey));
    match kind {
        BoxGreyEmpty => grey(None),
        BoxGreyBoot => grey(Some(Boot)),
        BoxGreyClamp => grey(Some(Clamp)),
        BoxGreyGun => grey(Some(Gun)),
        BoxGreyBomb => grey(Some(Bomb)),
        BoxGreyGlove => grey(Some(Glove)),
        BoxGreyFullLife => grey(Some(FullLife)),
        BoxGreyAccessCard => grey(Some(AccessCard)),
        BoxGreyLetterD => grey(Some(LetterD)),
        BoxGreyLetterU => grey(Some(LetterU)),
        BoxGreyLetterK => grey(Some(LetterK)),
        BoxGreyLetterE => grey(Some(LetterE)),
        BoxGreyLetterM => grey(Some(LetterM)),
        BoxRedSoda => Some((Some(Soda), ParticleRed)),
        BoxRedChicken => Some((Some(ChickenSingle), ParticleRed)),
        BoxBlueFootball => Some((Some(Football), ParticleBlue)),
        BoxBlueJoystick => Some((Some(Joystick), ParticleBlue)),
        BoxBlueDisk => Some((Some(Disk), ParticleBlue)),
        BoxBlueBalloon => Some((Some(Balloon), ParticleBlue)),
        BoxBlueFlag => Some((Some(Flag), ParticleBlue)),
        BoxBlueRadio => Some((Some(Radio), ParticleBlue)),
        _ => None,
    }
}

/// Behaviour of the box family.
pub struct Crate;

impl Behavior for Crate {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let Some((contents, particle)) = packing(actor.kind) else {
            return Err(ActorError::InvalidType { handler: "box", kind: actor.kind });
        };
        actor.data = ActorData::Box(BoxState { contents, particle });
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        state_ref!(actor, Box);
        fall(&mut actor.rect, ctx.tiles);
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        state_ref!(actor, Box);
        canvas.draw(Sprite::actor(actor.kind, 0), actor.rect.x, actor.rect.y);
        Ok(())
    }

    fn shot(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<bool, ActorError> {
        let packed = *state_ref!(actor, Box);
        let (x, y) = (actor.rect.x, actor.rect.y);
        actor.is_alive = false;
        if let Some(item) = packed.contents {
            ctx.spawn(item, x, y);
        }
        for _ in 0..4 {
            ctx.spawn(packed.particle, x, y);
        }
        ctx.events.push(GameEvent::ActorDestroyed { kind: actor.kind, x, y });
        Ok(true)
    }

    fn can_be_shot(&self, _actor: &Actor) -> bool {
        true
    }
}

// ══════════════════════════════════════════════════════════════
// Rocket
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum RocketPhase {
    #[default]
    Idle,
    Ignition(u8),
    Flying,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RocketState {
    pub phase: RocketPhase,
}

/// Shot once it ignites, then lifts off and explodes against the ceiling.
/// It marks no cells solid, so it is scenery to the hero, never a platform.
pub struct Rocket;

impl Behavior for Rocket {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.rect.h = 2 * TILE_HEIGHT;
        actor.acts_while_invisible = true;
        actor.data = ActorData::Rocket(RocketState::default());
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let rect = actor.rect;
        let rocket = state!(actor, Rocket);
        match rocket.phase {
            RocketPhase::Idle => {}
            RocketPhase::Ignition(n) => {
                rocket.phase = if n + 1 >= ROCKET_IGNITION_TICKS {
                    RocketPhase::Flying
                } else {
                    RocketPhase::Ignition(n + 1)
                };
                if n % 2 == 0 {
                    ctx.spawn(ActorType::Steam, rect.x, rect.bottom() - TILE_HEIGHT);
                }
            }
            RocketPhase::Flying => {
                let up = rect.offset(0, -ROCKET_SPEED);
                if ctx.tiles.rect_is_blocked(&up) {
                    destroy(actor, ctx, 0, ActorType::Explosion);
                    return Ok(());
                }
                actor.rect = up;
            }
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let rocket = state_ref!(actor, Rocket);
        let frame = match rocket.phase {
            RocketPhase::Idle => 0,
            RocketPhase::Ignition(n) => 1 + (n % 2) as u16,
            RocketPhase::Flying => 3,
        };
        canvas.draw(Sprite::actor(actor.kind, frame), actor.rect.x, actor.rect.y);
        Ok(())
    }

    fn shot(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<bool, ActorError> {
        let rocket = state!(actor, Rocket);
        if rocket.phase != RocketPhase::Idle { return Ok(false); }
        rocket.phase = RocketPhase::Ignition(0);
        Ok(true)
    }

    fn can_be_shot(&self, actor: &Actor) -> bool {
        matches!(actor.data, ActorData::Rocket(RocketState { phase: RocketPhase::Idle }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::super::{can_be_shot, notify_shot};
    use super::*;
    use crate::domain::hero::MAX_FIREPOWER;
    use crate::domain::tile::{grid_from, TileGrid};

    fn floor() -> TileGrid {
        grid_from(&[
            "        ",
            "        ",
            "        ",
            "########",
        ])
    }

    /// Spawn `kind` on the floor at column `cx` and walk the hero onto it.
    fn pick(bench: &mut Bench, kind: ActorType, cx: i32) -> Actor {
        let mut item = bench.spawn(kind, cx * 16, 32);
        bench.hero.rect.x = cx * 16;
        bench.hero.rect.y = 16;
        assert!(!bench.tick(&mut item));
        bench.hero.rect.x = 112;
        item
    }

    #[test]
    fn key_goes_to_inventory_with_popup() {
        let mut bench = Bench::new(floor());
        pick(&mut bench, ActorType::KeyRed, 2);
        assert!(bench.hero.inventory().contains(Inventory::KEY_RED));
        assert_eq!(bench.hero.score(), 1000);
        assert_eq!(bench.spawned(), vec![ActorType::Score1000]);
        assert!(bench.events.contains(&GameEvent::ItemPicked { kind: ActorType::KeyRed }));
    }

    #[test]
    fn gun_raises_firepower_up_to_cap() {
        let mut bench = Bench::new(floor());
        for _ in 0..6 {
            pick(&mut bench, ActorType::Gun, 2);
        }
        assert_eq!(bench.hero.firepower(), MAX_FIREPOWER);
    }

    #[test]
    fn letters_in_order_earn_word_bonus() {
        let mut bench = Bench::new(floor());
        let word = [
            ActorType::LetterD,
            ActorType::LetterU,
            ActorType::LetterK,
            ActorType::LetterE,
            ActorType::LetterM,
        ];
        for kind in word {
            pick(&mut bench, kind, 3);
        }
        assert_eq!(bench.hero.score(), 5 * LETTER_POINTS + WORD_BONUS);
        assert!(bench.events.contains(&GameEvent::LetterBonus));
    }

    #[test]
    fn letters_out_of_order_earn_nothing_extra() {
        let mut bench = Bench::new(floor());
        let word = [
            ActorType::LetterD,
            ActorType::LetterK,
            ActorType::LetterU,
            ActorType::LetterE,
            ActorType::LetterM,
        ];
        for kind in word {
            pick(&mut bench, kind, 3);
        }
        assert_eq!(bench.hero.score(), 5 * LETTER_POINTS);
        assert!(!bench.events.contains(&GameEvent::LetterBonus));
    }

    #[test]
    fn box_shot_releases_its_item() {
        let mut bench = Bench::new(floor());
        let mut crate_ = bench.spawn(ActorType::BoxGreyGun, 32, 32);
        assert!(can_be_shot(&crate_));
        assert!(notify_shot(&mut crate_, &mut bench.ctx()));
        assert!(!crate_.is_alive);
        let spawned = bench.spawned();
        assert_eq!(spawned.iter().filter(|&&k| k == ActorType::Gun).count(), 1);
        assert_eq!(spawned.iter().filter(|&&k| k == ActorType::ParticleGrey).count(), 4);
        assert_eq!(bench.commands[0], super::super::LevelCommand::Spawn { kind: ActorType::Gun, x: 32, y: 32 });
    }

    #[test]
    fn empty_box_only_bursts() {
        let mut bench = Bench::new(floor());
        let mut crate_ = bench.spawn(ActorType::BoxGreyEmpty, 32, 32);
        notify_shot(&mut crate_, &mut bench.ctx());
        assert_eq!(bench.spawned(), vec![ActorType::ParticleGrey; 4]);
    }

    #[test]
    fn shot_soda_takes_off_and_chicken_doubles() {
        let mut bench = Bench::new(floor());
        let mut soda = bench.spawn(ActorType::Soda, 32, 32);
        assert!(notify_shot(&mut soda, &mut bench.ctx()));
        assert!(!soda.is_alive);
        assert_eq!(bench.spawned(), vec![ActorType::SodaFlying]);

        let mut chicken = bench.spawn(ActorType::ChickenSingle, 64, 32);
        assert!(notify_shot(&mut chicken, &mut bench.ctx()));
        assert!(chicken.is_alive);
        assert_eq!(chicken.kind, ActorType::ChickenDouble);
        assert!(!can_be_shot(&chicken));
    }

    #[test]
    fn items_drop_to_the_floor() {
        let mut bench = Bench::new(floor());
        let mut disk = bench.spawn(ActorType::Disk, 32, 0);
        for _ in 0..8 {
            bench.tick(&mut disk);
        }
        assert_eq!(disk.rect.y, 32);
    }

    #[test]
    fn rocket_ignites_flies_and_explodes() {
        let mut bench = Bench::new(grid_from(&[
            "########",
            "        ",
            "        ",
            "        ",
            "        ",
            "########",
        ]));
        let mut rocket = bench.spawn(ActorType::Rocket, 32, 48);
        bench.tick(&mut rocket);
        assert_eq!(rocket.rect.y, 48);

        assert!(notify_shot(&mut rocket, &mut bench.ctx()));
        assert!(!can_be_shot(&rocket));
        for _ in 0..ROCKET_IGNITION_TICKS {
            bench.tick(&mut rocket);
        }
        assert_eq!(rocket.rect.y, 48);

        let mut ticks = 0;
        while bench.tick(&mut rocket) {
            ticks += 1;
        }
        // 48 -> 16 in half-tile steps, then blocked by the ceiling
        assert_eq!(ticks, 4);
        assert_eq!(rocket.rect.y, 16);
        assert!(bench.spawned().contains(&ActorType::Explosion));
    }

    #[test]
    fn flying_rocket_leaves_the_hero_alone() {
        let mut bench = Bench::new(grid_from(&[
            "########",
            "        ",
            "        ",
            "        ",
            "        ",
            "        ",
            "        ",
            "########",
        ]));
        let mut rocket = bench.spawn(ActorType::Rocket, 32, 80);
        rocket.data = ActorData::Rocket(RocketState { phase: RocketPhase::Flying });
        bench.hero.rect.x = 32;
        bench.hero.rect.y = 48;
        assert!(bench.hero.rect().stands_on(&rocket.rect));

        bench.tick(&mut rocket);
        assert_eq!(rocket.rect.y, 72);
        assert_eq!(bench.hero.rect.y, 48);
        assert!(!bench.tiles.is_solid(2, 4));
    }
}
