/// Hazards: actors whose main job is hurting the hero on contact.
///
/// ## Hurting registration
///
/// The hero keeps a multiset of actors currently hurting it. A hazard adds
/// itself on HERO_TOUCH_START (or when it becomes dangerous while already
/// touching) and removes itself on HERO_TOUCH_END, when it stops being
/// dangerous, and in FREE. `HurtLatch` remembers whether this actor is
/// registered so add and remove always pair up exactly once.

use super::behavior::Behavior;
use super::kind::ActorType;
use super::{cell_of, destroy, fall, Actor, ActorData, ActorError, ActorId, Ctx};
use crate::domain::geometry::{Facing, Rect};
use crate::domain::hero::Hero;
use crate::domain::sprite::{Canvas, Sprite};
use crate::domain::tile::{TileGrid, HALFTILE_HEIGHT, HALFTILE_WIDTH, TILE_HEIGHT, TILE_WIDTH};
use crate::sim::event::GameEvent;

pub const FIRE_OFF_TICKS: u8 = 40;
pub const FIRE_IGNITION_TICKS: u8 = 20;
pub const FIRE_BURNING_TICKS: u8 = 20;
const ACME_SHAKE_TICKS: u8 = 8;
const BOMB_FUSE_TICKS: u8 = 20;
const BOMB_FIRE_FRAMES: u16 = 6;
const BOMB_FIRE_REACH: i32 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct HurtLatch {
    registered: bool,
}

impl HurtLatch {
    pub fn engage(&mut self, id: ActorId, hero: &mut Hero) {
        if !self.registered {
            hero.add_hurting_actor(id);
            self.registered = true;
        }
    }

    pub fn release(&mut self, id: ActorId, hero: &mut Hero) {
        if self.registered {
            hero.remove_hurting_actor(id);
            self.registered = false;
        }
    }

    /// Engage or release to match `dangerous`.
    pub fn set(&mut self, dangerous: bool, id: ActorId, hero: &mut Hero) {
        if dangerous {
            self.engage(id, hero);
        } else {
            self.release(id, hero);
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Spikes and electric arcs: always dangerous
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SpikeState {
    pub frame: u16,
    pub hurt: HurtLatch,
}

pub struct Spikes;

impl Behavior for Spikes {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.data = ActorData::Spikes(SpikeState::default());
        Ok(())
    }

    fn free(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Spikes).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Spikes).hurt.engage(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_end(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Spikes).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn act(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        if actor.kind == ActorType::ElectricArc {
            let spikes = state!(actor, Spikes);
            spikes.frame = (spikes.frame + 1) % 4;
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let spikes = state_ref!(actor, Spikes);
        canvas.draw(Sprite::actor(actor.kind, spikes.frame), actor.rect.x, actor.rect.y);
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════
// Fire: OFF → IGNITION → BURNING → OFF
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FirePhase {
    #[default]
    Off,
    Ignition,
    Burning,
}

impl FirePhase {
    fn duration(self) -> u8 {
        match self {
            FirePhase::Off => FIRE_OFF_TICKS,
            FirePhase::Ignition => FIRE_IGNITION_TICKS,
            FirePhase::Burning => FIRE_BURNING_TICKS,
        }
    }

    fn next(self) -> FirePhase {
        match self {
            FirePhase::Off => FirePhase::Ignition,
            FirePhase::Ignition => FirePhase::Burning,
            FirePhase::Burning => FirePhase::Off,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct FireState {
    pub phase: FirePhase,
    pub ticks: u8,
    pub hurt: HurtLatch,
}

/// A flame jet two tiles long, only hurting while burning.
pub struct Fire;

impl Behavior for Fire {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.rect.w = 2 * TILE_WIDTH;
        if actor.kind == ActorType::FireLeft {
            actor.rect.x -= TILE_WIDTH;
        }
        actor.data = ActorData::Fire(FireState::default());
        Ok(())
    }

    fn free(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Fire).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        let fire = state!(actor, Fire);
        if fire.phase == FirePhase::Burning {
            fire.hurt.engage(id, ctx.hero);
        }
        Ok(())
    }

    fn hero_touch_end(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Fire).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let (id, touching) = (actor.id, actor.touches_hero);
        let fire = state!(actor, Fire);
        fire.ticks += 1;
        if fire.ticks >= fire.phase.duration() {
            fire.ticks = 0;
            fire.phase = fire.phase.next();
        }
        let burning = fire.phase == FirePhase::Burning;
        fire.hurt.set(burning && touching, id, ctx.hero);
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let fire = state_ref!(actor, Fire);
        let frame = match fire.phase {
            FirePhase::Off => return Ok(()),
            FirePhase::Ignition => fire.ticks as u16 % 2,
            FirePhase::Burning => 2 + fire.ticks as u16 % 2,
        };
        canvas.draw(Sprite::actor(actor.kind, frame), actor.rect.x, actor.rect.y);
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════
// Acme stone: waits above, shakes, drops
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AcmePhase {
    #[default]
    Waiting,
    Shaking(u8),
    Falling,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AcmeState {
    pub phase: AcmePhase,
    pub hurt: HurtLatch,
}

/// Is the hero somewhere below `stone` with nothing solid in between?
/// Checked cell by cell over the stone's columns.
fn hero_below(stone: &Rect, hero: &Rect, tiles: &TileGrid) -> bool {
    if !stone.overlaps_columns(hero) || hero.y < stone.bottom() {
        return false;
    }
    let cx0 = stone.x.div_euclid(TILE_WIDTH);
    let cx1 = (stone.right() - 1).div_euclid(TILE_WIDTH);
    let top = stone.bottom().div_euclid(TILE_HEIGHT);
    let bottom = hero.y.div_euclid(TILE_HEIGHT);
    (top..bottom).all(|cy| (cx0..=cx1).all(|cx| !tiles.is_solid(cx, cy)))
}

pub struct Acme;

impl Behavior for Acme {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.rect.w = 2 * TILE_WIDTH;
        actor.data = ActorData::Acme(AcmeState::default());
        Ok(())
    }

    fn free(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Acme).hurt.release(id, ctx.hero);
        Ok(())
    }

    /// Hurts in every phase, not only while falling.
    fn hero_touch_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Acme).hurt.engage(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_end(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Acme).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let (id, rect) = (actor.id, actor.rect);
        let acme = state!(actor, Acme);
        match acme.phase {
            AcmePhase::Waiting => {
                if hero_below(&rect, &ctx.hero.rect(), ctx.tiles) {
                    acme.phase = AcmePhase::Shaking(0);
                }
            }
            AcmePhase::Shaking(n) => {
                acme.phase = if n + 1 >= ACME_SHAKE_TICKS {
                    AcmePhase::Falling
                } else {
                    AcmePhase::Shaking(n + 1)
                };
            }
            AcmePhase::Falling => {
                for _ in 0..2 {
                    let next = actor.rect.offset(0, HALFTILE_HEIGHT);
                    if ctx.tiles.rect_is_blocked(&next) {
                        actor.is_alive = false;
                        ctx.spawn(ActorType::DustCloud, actor.rect.x, actor.rect.y);
                        ctx.spawn(ActorType::DustCloud, actor.rect.x + TILE_WIDTH, actor.rect.y);
                        break;
                    }
                    actor.rect = next;
                }
                let touching = actor.is_alive && actor.rect.overlaps(&ctx.hero.rect());
                acme.hurt.set(touching, id, ctx.hero);
            }
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let acme = state_ref!(actor, Acme);
        let wobble = match acme.phase {
            AcmePhase::Shaking(n) => (n % 2) as i32,
            _ => 0,
        };
        canvas.draw(Sprite::actor(actor.kind, 0), actor.rect.x + wobble, actor.rect.y);
        Ok(())
    }

    fn shot(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<bool, ActorError> {
        destroy(actor, ctx, 500, ActorType::Explosion);
        Ok(true)
    }

    fn can_be_shot(&self, _actor: &Actor) -> bool {
        true
    }
}

// ══════════════════════════════════════════════════════════════
// Mill
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct MillState {
    pub frame: u16,
    pub hits: u8,
    pub hurt: HurtLatch,
}

pub struct Mill;

impl Behavior for Mill {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.rect.h = 2 * TILE_HEIGHT;
        actor.data = ActorData::Mill(MillState { frame: 0, hits: 5, hurt: HurtLatch::default() });
        Ok(())
    }

    fn free(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Mill).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Mill).hurt.engage(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_end(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Mill).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn act(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let mill = state!(actor, Mill);
        mill.frame = (mill.frame + 1) % 4;
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let mill = state_ref!(actor, Mill);
        canvas.draw(Sprite::actor(actor.kind, mill.frame), actor.rect.x, actor.rect.y);
        Ok(())
    }

    fn shot(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<bool, ActorError> {
        let mill = state!(actor, Mill);
        mill.hits = mill.hits.saturating_sub(1);
        if mill.hits == 0 {
            destroy(actor, ctx, 1000, ActorType::Explosion);
        }
        Ok(true)
    }

    fn can_be_shot(&self, _actor: &Actor) -> bool {
        true
    }
}

// ══════════════════════════════════════════════════════════════
// Bomb and bomb fire
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BombState {
    pub ticks: u8,
}

/// Fuse burns down, then the bomb explodes and sets the floor around it on fire.
pub struct Bomb;

impl Behavior for Bomb {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.acts_while_invisible = true;
        actor.data = ActorData::Bomb(BombState::default());
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let bomb = state!(actor, Bomb);
        bomb.ticks += 1;
        if bomb.ticks < BOMB_FUSE_TICKS {
            fall(&mut actor.rect, ctx.tiles);
            return Ok(());
        }

        actor.is_alive = false;
        let (cx, cy) = cell_of(&actor.rect);
        ctx.spawn(ActorType::Explosion, actor.rect.x, actor.rect.y);
        ctx.spawn(ActorType::BombFire, cx * TILE_WIDTH, cy * TILE_HEIGHT);
        for dir in [Facing::Left, Facing::Right] {
            for i in 1..=BOMB_FIRE_REACH {
                let x = cx + dir.sign() * i;
                if ctx.tiles.is_solid(x, cy) || !ctx.tiles.is_solid(x, cy + 1) {
                    break;
                }
                ctx.spawn(ActorType::BombFire, x * TILE_WIDTH, cy * TILE_HEIGHT);
            }
        }
        ctx.events.push(GameEvent::ActorDestroyed { kind: actor.kind, x: actor.rect.x, y: actor.rect.y });
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let bomb = state_ref!(actor, Bomb);
        canvas.draw(Sprite::actor(actor.kind, (bomb.ticks / 4 % 2) as u16), actor.rect.x, actor.rect.y);
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BombFireState {
    pub frame: u16,
    pub hurt: HurtLatch,
}

pub struct BombFire;

impl Behavior for BombFire {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.is_in_foreground = true;
        actor.acts_while_invisible = true;
        actor.data = ActorData::BombFire(BombFireState::default());
        Ok(())
    }

    fn free(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, BombFire).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, BombFire).hurt.engage(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_end(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, BombFire).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn act(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let fire = state!(actor, BombFire);
        fire.frame += 1;
        if fire.frame >= BOMB_FIRE_FRAMES {
            actor.is_alive = false;
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let fire = state_ref!(actor, BombFire);
        canvas.draw(Sprite::actor(actor.kind, fire.frame), actor.rect.x, actor.rect.y);
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════
// Hostile shot
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HostileShotState {
    pub direction: Facing,
    pub frame: u16,
    pub hurt: HurtLatch,
}

/// Flies straight until it meets a wall. Passing through the hero does not
/// stop it.
pub struct HostileShot;

impl Behavior for HostileShot {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let direction = match actor.kind {
            ActorType::HostileShotLeft => Facing::Left,
            ActorType::HostileShotRight => Facing::Right,
            kind => return Err(ActorError::InvalidType { handler: "hostile shot", kind }),
        };
        actor.rect.h = HALFTILE_HEIGHT;
        actor.rect.y += HALFTILE_HEIGHT / 2;
        actor.acts_while_invisible = true;
        actor.data = ActorData::HostileShot(HostileShotState {
            direction,
            frame: 0,
            hurt: HurtLatch::default(),
        });
        Ok(())
    }

    fn free(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, HostileShot).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, HostileShot).hurt.engage(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_end(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, HostileShot).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let shot = state!(actor, HostileShot);
        shot.frame = (shot.frame + 1) % 2;
        let next = actor.rect.offset(shot.direction.sign() * HALFTILE_WIDTH, 0);
        if ctx.tiles.rect_is_blocked(&next) {
            actor.is_alive = false;
        } else {
            actor.rect = next;
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let shot = state_ref!(actor, HostileShot);
        canvas.draw(Sprite::actor(actor.kind, shot.frame), actor.rect.x, actor.rect.y);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::super::{free, tick, LevelCommand};
    use super::*;
    use crate::domain::tile::grid_from;

    fn corridor() -> TileGrid {
        grid_from(&[
            "          ",
            "          ",
            "          ",
            "##########",
        ])
    }

    fn stand_hero_at(bench: &mut Bench, x: i32) {
        bench.hero.rect.x = x;
        bench.hero.rect.y = 16;
    }

    #[test]
    fn every_registration_is_removed() {
        let mut bench = Bench::new(corridor());
        let mut hazards = vec![
            bench.spawn(ActorType::SpikesUp, 32, 32),
            bench.spawn(ActorType::ElectricArc, 32, 16),
            bench.spawn(ActorType::Mill, 32, 16),
        ];
        stand_hero_at(&mut bench, 32);
        for h in hazards.iter_mut() {
            bench.tick(h);
        }
        assert_eq!(bench.hero.hurting_count(), 3);

        // one dies while still touching
        hazards[2].is_alive = false;
        free(&mut hazards[2], &mut bench.ctx());
        assert_eq!(bench.hero.hurting_count(), 2);

        stand_hero_at(&mut bench, 112);
        for h in hazards.iter_mut().take(2) {
            bench.tick(h);
        }
        assert_eq!(bench.hero.hurting_count(), 0);
    }

    #[test]
    fn fire_hurts_only_while_burning() {
        let mut bench = Bench::new(corridor());
        let mut fire = bench.spawn(ActorType::FireRight, 32, 32);
        stand_hero_at(&mut bench, 40);
        let mut counts = vec![];
        for _ in 0..100 {
            bench.tick(&mut fire);
            counts.push(bench.hero.hurting_count());
        }
        let off_and_ignition = (FIRE_OFF_TICKS + FIRE_IGNITION_TICKS) as usize;
        let burning = FIRE_BURNING_TICKS as usize;
        assert!(counts[..off_and_ignition - 1].iter().all(|&c| c == 0));
        assert!(counts[off_and_ignition - 1..off_and_ignition - 1 + burning].iter().all(|&c| c == 1));
        assert_eq!(counts[off_and_ignition - 1 + burning], 0);
    }

    #[test]
    fn acme_drops_only_with_clear_line_of_fall() {
        let tiles = grid_from(&[
            "          ",
            "          ",
            "          ",
            "   #      ",
            "          ",
            "          ",
            "##########",
        ]);
        let mut bench = Bench::new(tiles);
        let mut blocked = bench.spawn(ActorType::Acme, 48, 16);
        let mut open = bench.spawn(ActorType::Acme, 96, 16);

        stand_hero_at(&mut bench, 48);
        bench.hero.rect.y = 64;
        bench.tick(&mut blocked);
        assert_eq!(blocked.data, ActorData::Acme(AcmeState::default()));

        bench.hero.rect.x = 100;
        bench.tick(&mut open);
        assert!(matches!(open.data, ActorData::Acme(AcmeState { phase: AcmePhase::Shaking(0), .. })));
        for _ in 0..=ACME_SHAKE_TICKS {
            bench.tick(&mut open);
        }
        assert!(open.rect.y > 16);
    }

    #[test]
    fn waiting_acme_hurts_on_touch() {
        let mut bench = Bench::new(corridor());
        let mut acme = bench.spawn(ActorType::Acme, 48, 0);
        bench.hero.rect.x = 56;
        bench.hero.rect.y = 0;
        bench.tick(&mut acme);
        assert!(matches!(acme.data, ActorData::Acme(AcmeState { phase: AcmePhase::Waiting, .. })));
        assert_eq!(bench.hero.hurting_count(), 1);

        bench.hero.rect.x = 128;
        bench.tick(&mut acme);
        assert_eq!(bench.hero.hurting_count(), 0);
    }

    #[test]
    fn acme_crashes_on_floor() {
        let mut bench = Bench::new(corridor());
        let mut acme = bench.spawn(ActorType::Acme, 48, 0);
        acme.data = ActorData::Acme(AcmeState { phase: AcmePhase::Falling, ..Default::default() });
        let mut ticks = 0;
        while tick(&mut acme, &mut bench.ctx()) {
            ticks += 1;
            assert!(ticks < 10);
        }
        assert_eq!(acme.rect.y, 32);
        assert_eq!(bench.spawned(), vec![ActorType::DustCloud, ActorType::DustCloud]);
    }

    #[test]
    fn bomb_fire_spreads_along_floor_until_gap() {
        let tiles = grid_from(&[
            "          ",
            "          ",
            "#### #####",
        ]);
        let mut bench = Bench::new(tiles);
        let mut bomb = bench.spawn(ActorType::Bomb, 48, 16);
        for _ in 0..BOMB_FUSE_TICKS {
            bench.tick(&mut bomb);
        }
        assert!(!bomb.is_alive);
        let fires: Vec<i32> = bench
            .commands
            .iter()
            .filter_map(|c| match c {
                LevelCommand::Spawn { kind: ActorType::BombFire, x, .. } => Some(*x),
                _ => None,
            })
            .collect();
        // own cell and three to the left; the gap on the right stops it at once
        assert_eq!(fires, vec![48, 32, 16, 0]);
    }

    #[test]
    fn hostile_shot_dies_at_wall() {
        let tiles = grid_from(&[
            "          ",
            "     #    ",
            "##########",
        ]);
        let mut bench = Bench::new(tiles);
        let mut shot = bench.spawn(ActorType::HostileShotRight, 48, 16);
        assert!(bench.tick(&mut shot));
        assert_eq!(shot.rect.x, 56);
        assert!(bench.tick(&mut shot));
        assert_eq!(shot.rect.x, 64);
        assert!(!bench.tick(&mut shot));
    }
}
