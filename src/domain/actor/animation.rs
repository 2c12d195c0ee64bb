/// Purely visual families: placeholders, looping and one-shot animations,
/// score popups and particles.

use super::behavior::Behavior;
use super::kind::ActorType;
use super::{Actor, ActorData, ActorError, Ctx};
use crate::domain::sprite::{Canvas, Sprite};
use crate::domain::tile::{HALFTILE_HEIGHT, HALFTILE_WIDTH, TILE_WIDTH};

const SCORE_TICKS: u8 = 16;
const PARTICLE_TICKS: u8 = 20;

/// Frame counter shared by both animation families.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AnimationState {
    pub frame: u16,
    pub frames: u16,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ScoreState {
    pub ticks: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ParticleState {
    pub dx: i32,
    pub dy: i32,
    pub ticks: u8,
}

// ── Placeholder ──

/// Types without an implementation yet: every operation is a no-op.
pub struct Placeholder;

impl Behavior for Placeholder {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.data = ActorData::Inert;
        Ok(())
    }
}

// ── Looping ──

fn looping_frames(kind: ActorType) -> Option<(u16, i32)> {
    use ActorType::*;
    // (frames, width in tiles)
    match kind {
        Screen => Some((4, 2)),
        SurveillanceScreen => Some((2, 2)),
        BrokenWallBg | StoneBg | FenceBg | StoneWindowBg => Some((1, 1)),
        WindowLeftBg | WindowRightBg => Some((1, 1)),
        _ => None,
    }
}

pub struct LoopingAnimation;

impl Behavior for LoopingAnimation {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let Some((frames, width)) = looping_frames(actor.kind) else {
            actor.data = ActorData::Inert;
            return Err(ActorError::InvalidType { handler: "looping animation", kind: actor.kind });
        };
        actor.rect.w = width * TILE_WIDTH;
        actor.data = ActorData::Animation(AnimationState { frame: 0, frames });
        Ok(())
    }

    fn act(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let anim = state!(actor, Animation);
        anim.frame += 1;
        if anim.frame >= anim.frames {
            anim.frame = 0;
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let anim = state_ref!(actor, Animation);
        canvas.draw(Sprite::actor(actor.kind, anim.frame), actor.rect.x, actor.rect.y);
        Ok(())
    }
}

// ── One-shot ──

fn single_frames(kind: ActorType) -> Option<u16> {
    use ActorType::*;
    match kind {
        Explosion => Some(6),
        DustCloud => Some(5),
        Steam => Some(5),
        RobotDisappearing => Some(4),
        _ => None,
    }
}

/// Plays once, then dies.
pub struct SingleAnimation;

impl Behavior for SingleAnimation {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let Some(frames) = single_frames(actor.kind) else {
            actor.data = ActorData::Inert;
            return Err(ActorError::InvalidType { handler: "single animation", kind: actor.kind });
        };
        actor.is_in_foreground = true;
        actor.acts_while_invisible = true;
        actor.data = ActorData::Animation(AnimationState { frame: 0, frames });
        Ok(())
    }

    fn act(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let anim = state!(actor, Animation);
        anim.frame += 1;
        if anim.frame >= anim.frames {
            anim.frame = anim.frames - 1;
            actor.is_alive = false;
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let anim = state_ref!(actor, Animation);
        canvas.draw(Sprite::actor(actor.kind, anim.frame), actor.rect.x, actor.rect.y);
        Ok(())
    }
}

// ── Score popup ──

/// Floats upwards for a while, then vanishes. Points are awarded by the
/// spawner, not by the popup.
pub struct ScorePopup;

impl Behavior for ScorePopup {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.is_in_foreground = true;
        actor.acts_while_invisible = true;
        actor.data = ActorData::Score(ScoreState::default());
        Ok(())
    }

    fn act(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let score = state!(actor, Score);
        score.ticks += 1;
        if score.ticks >= SCORE_TICKS {
            actor.is_alive = false;
        } else if score.ticks % 2 == 0 {
            actor.rect.y -= HALFTILE_HEIGHT / 2;
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let score = state_ref!(actor, Score);
        let frame = (score.ticks / 2 % 2) as u16;
        canvas.draw(Sprite::actor(actor.kind, frame), actor.rect.x, actor.rect.y);
        Ok(())
    }
}

// ── Particle ──

/// Launch velocities, picked by id so a burst of four spreads out.
const LAUNCH: [(i32, i32); 4] = [(-4, -12), (4, -12), (-2, -16), (2, -16)];

pub struct Particle;

impl Behavior for Particle {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let (dx, dy) = LAUNCH[actor.id.0 as usize % LAUNCH.len()];
        actor.rect.w = HALFTILE_WIDTH;
        actor.rect.h = HALFTILE_HEIGHT;
        actor.is_in_foreground = true;
        actor.acts_while_invisible = true;
        actor.data = ActorData::Particle(ParticleState { dx, dy, ticks: 0 });
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let p = state!(actor, Particle);
        actor.rect.x += p.dx;
        actor.rect.y += p.dy;
        p.dy += 2;
        p.ticks += 1;
        if p.ticks >= PARTICLE_TICKS || actor.rect.y > ctx.tiles.pixel_height() {
            actor.is_alive = false;
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let p = state_ref!(actor, Particle);
        canvas.draw(Sprite::actor(actor.kind, (p.ticks % 4) as u16), actor.rect.x, actor.rect.y);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::*;
    use crate::domain::sprite::DrawList;
    use crate::domain::tile::TileGrid;

    #[test]
    fn looping_animation_wraps_after_frame_count() {
        let mut bench = Bench::new(TileGrid::new(8, 8));
        let mut screen = bench.spawn(ActorType::Screen, 0, 0);
        for _ in 0..4 {
            assert!(bench.tick(&mut screen));
        }
        assert_eq!(screen.data, ActorData::Animation(AnimationState { frame: 0, frames: 4 }));
        assert!(screen.is_alive);
    }

    #[test]
    fn single_animation_dies_on_last_frame() {
        let mut bench = Bench::new(TileGrid::new(8, 8));
        let mut boom = bench.spawn(ActorType::Explosion, 0, 0);
        for _ in 0..5 {
            assert!(bench.tick(&mut boom));
        }
        assert!(!bench.tick(&mut boom));
    }

    #[test]
    fn unknown_type_becomes_placeholder_with_diagnostic() {
        let mut bench = Bench::new(TileGrid::new(8, 8));
        let mut actor = bench.spawn(ActorType::Screen, 0, 0);
        actor.kind = ActorType::Robot;
        actor.data = ActorData::Inert;
        let err = LoopingAnimation.create(&mut actor, &mut bench.ctx()).unwrap_err();
        assert_eq!(
            err,
            ActorError::InvalidType { handler: "looping animation", kind: ActorType::Robot }
        );
        assert_eq!(actor.data, ActorData::Inert);
    }

    #[test]
    fn score_popup_rises_and_expires() {
        let mut bench = Bench::new(TileGrid::new(8, 8));
        let mut popup = bench.spawn(ActorType::Score100, 16, 64);
        let mut ticks = 0;
        while bench.tick(&mut popup) {
            ticks += 1;
        }
        assert_eq!(ticks, SCORE_TICKS as usize - 1);
        assert!(popup.rect.y < 64);
        assert_eq!(bench.hero.score(), 0);
    }

    #[test]
    fn particles_of_one_burst_spread_apart() {
        let mut bench = Bench::new(TileGrid::new(8, 8));
        let mut parts: Vec<Actor> =
            (0..4).map(|_| bench.spawn(ActorType::ParticleGrey, 64, 64)).collect();
        for p in parts.iter_mut() {
            bench.tick(p);
        }
        let mut xs: Vec<i32> = parts.iter().map(|p| p.rect.x).collect();
        xs.sort();
        xs.dedup();
        assert_eq!(xs.len(), 4);
    }

    #[test]
    fn blit_draws_current_frame() {
        let mut bench = Bench::new(TileGrid::new(8, 8));
        let mut screen = bench.spawn(ActorType::Screen, 16, 32);
        bench.tick(&mut screen);
        let mut canvas = DrawList::default();
        LoopingAnimation.blit(&screen, &mut canvas).unwrap();
        assert_eq!(canvas.calls, vec![(Sprite::actor(ActorType::Screen, 1), 16, 32)]);
    }
}
