/// Enemy bots: patrolling walkers, wall crawlers, bouncing balls and the
/// security camera.
///
/// Walkers follow one rule, checked each tick:
///   1. not standing on anything → drop half a tile
///   2. probe half a tile ahead; a solid cell in the way or no floor under
///      the leading edge → turn around
///   3. otherwise step forward
///
/// Every bot except the camera hurts on contact through a `HurtLatch`.

use super::behavior::Behavior;
use super::hazards::HurtLatch;
use super::kind::ActorType;
use super::{destroy, fall, on_floor, Actor, ActorData, ActorError, Ctx};
use crate::domain::geometry::Facing;
use crate::domain::sprite::{Canvas, Sprite};
use crate::domain::tile::{HALFTILE_HEIGHT, HALFTILE_WIDTH, TILE_HEIGHT, TILE_WIDTH};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WalkerState {
    pub direction: Facing,
    pub frame: u16,
    pub hits: u8,
    pub hurt: HurtLatch,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WallCrawlerState {
    pub going_up: bool,
    pub frame: u16,
    pub hurt: HurtLatch,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RedBallState {
    /// Remaining bounce steps; 0 while falling or resting.
    pub counter: u8,
    pub hurt: HurtLatch,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct CameraState {
    /// 0 looking left, 1 ahead, 2 right.
    pub frame: u16,
}

// ══════════════════════════════════════════════════════════════
// Walker
// ══════════════════════════════════════════════════════════════

struct WalkerStats {
    width: i32,
    height: i32,
    hits: u8,
    points: u64,
}

fn walker_stats(kind: ActorType) -> Option<WalkerStats> {
    use ActorType::*;
    let (width, height, hits, points) = match kind {
        Robot => (1, 1, 1, 100),
        FlameGnomeBot => (1, 1, 2, 200),
        FootBot => (1, 2, 3, 500),
        FireWheelBot => (2, 2, 4, 1000),
        TankBot => (2, 1, 3, 500),
        _ => return None,
    };
    Some(WalkerStats { width, height, hits, points })
}

pub struct Walker;

impl Walker {
    /// A tank fires along its new heading every time it turns.
    fn fire(actor: &Actor, direction: Facing, ctx: &mut Ctx) {
        let (kind, x) = match direction {
            Facing::Left => (ActorType::HostileShotLeft, actor.rect.x - TILE_WIDTH),
            Facing::Right => (ActorType::HostileShotRight, actor.rect.right()),
        };
        ctx.spawn(kind, x, actor.rect.y);
    }
}

impl Behavior for Walker {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        let Some(stats) = walker_stats(actor.kind) else {
            return Err(ActorError::InvalidType { handler: "walker", kind: actor.kind });
        };
        actor.rect.w = stats.width * TILE_WIDTH;
        actor.rect.h = stats.height * TILE_HEIGHT;
        actor.data = ActorData::Walker(WalkerState {
            direction: Facing::Left,
            frame: 0,
            hits: stats.hits,
            hurt: HurtLatch::default(),
        });
        Ok(())
    }

    fn free(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Walker).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Walker).hurt.engage(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_end(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, Walker).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let walker = state!(actor, Walker);
        walker.frame = walker.frame.wrapping_add(1);
        if fall(&mut actor.rect, ctx.tiles) {
            return Ok(());
        }

        let rect = actor.rect;
        let dir = walker.direction;
        let ahead = rect.offset(dir.sign() * HALFTILE_WIDTH, 0);
        let edge_x = match dir {
            Facing::Left => ahead.x,
            Facing::Right => ahead.right() - 1,
        };
        let floor_ahead = ctx.tiles.is_solid_at(edge_x, rect.bottom());
        if ctx.tiles.rect_is_blocked(&ahead) || !floor_ahead {
            walker.direction = dir.reversed();
            if actor.kind == ActorType::TankBot {
                Walker::fire(actor, dir.reversed(), ctx);
            }
        } else {
            actor.rect = ahead;
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let walker = state_ref!(actor, Walker);
        let base = match walker.direction {
            Facing::Left => 0,
            Facing::Right => 2,
        };
        canvas.draw(Sprite::actor(actor.kind, base + walker.frame % 2), actor.rect.x, actor.rect.y);
        Ok(())
    }

    fn shot(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<bool, ActorError> {
        let walker = state!(actor, Walker);
        walker.hits = walker.hits.saturating_sub(1);
        if walker.hits == 0 {
            let points = walker_stats(actor.kind).map_or(0, |s| s.points);
            let remains = if actor.kind == ActorType::Robot {
                ActorType::RobotDisappearing
            } else {
                ActorType::Explosion
            };
            destroy(actor, ctx, points, remains);
        }
        Ok(true)
    }

    fn can_be_shot(&self, _actor: &Actor) -> bool {
        true
    }
}

// ══════════════════════════════════════════════════════════════
// Wall crawler
// ══════════════════════════════════════════════════════════════

/// Climbs up and down a wall, turning where the wall or the shaft ends.
pub struct WallCrawler;

impl Behavior for WallCrawler {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        if !matches!(actor.kind, ActorType::WallCrawlerBotLeft | ActorType::WallCrawlerBotRight) {
            return Err(ActorError::InvalidType { handler: "wall crawler", kind: actor.kind });
        }
        actor.data = ActorData::WallCrawler(WallCrawlerState {
            going_up: true,
            frame: 0,
            hurt: HurtLatch::default(),
        });
        Ok(())
    }

    fn free(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, WallCrawler).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, WallCrawler).hurt.engage(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_end(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, WallCrawler).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let rect = actor.rect;
        let wall_x = match actor.kind {
            ActorType::WallCrawlerBotLeft => rect.x - 1,
            _ => rect.right(),
        };
        let crawler = state!(actor, WallCrawler);
        crawler.frame = crawler.frame.wrapping_add(1);
        let dy = if crawler.going_up { -HALFTILE_HEIGHT } else { HALFTILE_HEIGHT };
        let ahead = rect.offset(0, dy);
        let probe_y = if crawler.going_up { ahead.y } else { ahead.bottom() - 1 };
        let clear = !ctx.tiles.rect_is_blocked(&ahead);
        let wall = ctx.tiles.is_solid_at(wall_x, probe_y);
        if clear && wall {
            actor.rect = ahead;
        } else {
            crawler.going_up = !crawler.going_up;
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let crawler = state_ref!(actor, WallCrawler);
        canvas.draw(Sprite::actor(actor.kind, crawler.frame % 4), actor.rect.x, actor.rect.y);
        Ok(())
    }

    fn shot(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<bool, ActorError> {
        destroy(actor, ctx, 100, ActorType::Explosion);
        Ok(true)
    }

    fn can_be_shot(&self, _actor: &Actor) -> bool {
        true
    }
}

// ══════════════════════════════════════════════════════════════
// Red ball
// ══════════════════════════════════════════════════════════════

/// Pixels climbed per tick, indexed by the bounce counter.
const BOUNCE: [i32; 6] = [0, 4, 8, 8, 16, 16];
const BOUNCE_START: u8 = 5;

pub struct RedBall;

impl Behavior for RedBall {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        if !matches!(actor.kind, ActorType::RedBallJumping | ActorType::RedBallLying) {
            return Err(ActorError::InvalidType { handler: "red ball", kind: actor.kind });
        }
        actor.data = ActorData::RedBall(RedBallState::default());
        Ok(())
    }

    fn free(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, RedBall).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_start(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, RedBall).hurt.engage(id, ctx.hero);
        Ok(())
    }

    fn hero_touch_end(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let id = actor.id;
        state!(actor, RedBall).hurt.release(id, ctx.hero);
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let bouncing = actor.kind == ActorType::RedBallJumping;
        let ball = state!(actor, RedBall);
        if !bouncing { return Ok(()); }

        if ball.counter > 0 {
            let next = actor.rect.offset(0, -BOUNCE[ball.counter as usize]);
            if ctx.tiles.rect_is_blocked(&next) {
                ball.counter = 0;
            } else {
                actor.rect = next;
                ball.counter -= 1;
            }
        } else if on_floor(&actor.rect, ctx.tiles) {
            ball.counter = BOUNCE_START;
        } else {
            fall(&mut actor.rect, ctx.tiles);
        }
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let ball = state_ref!(actor, RedBall);
        let frame = if ball.counter > 0 { 1 } else { 0 };
        canvas.draw(Sprite::actor(actor.kind, frame), actor.rect.x, actor.rect.y);
        Ok(())
    }

    fn shot(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<bool, ActorError> {
        destroy(actor, ctx, 100, ActorType::Explosion);
        Ok(true)
    }

    fn can_be_shot(&self, _actor: &Actor) -> bool {
        true
    }
}

// ══════════════════════════════════════════════════════════════
// Security camera
// ══════════════════════════════════════════════════════════════

/// Turns to watch the hero. Harmless, but worth points when shot.
pub struct SecurityCamera;

impl Behavior for SecurityCamera {
    fn create(&self, actor: &mut Actor, _ctx: &mut Ctx) -> Result<(), ActorError> {
        actor.data = ActorData::Camera(CameraState { frame: 1 });
        Ok(())
    }

    fn act(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<(), ActorError> {
        let rect = actor.rect;
        let camera = state!(actor, Camera);
        let hero = ctx.hero.rect();
        camera.frame = if hero.right() <= rect.x {
            0
        } else if hero.x >= rect.right() {
            2
        } else {
            1
        };
        Ok(())
    }

    fn blit(&self, actor: &Actor, canvas: &mut dyn Canvas) -> Result<(), ActorError> {
        let camera = state_ref!(actor, Camera);
        canvas.draw(Sprite::actor(actor.kind, camera.frame), actor.rect.x, actor.rect.y);
        Ok(())
    }

    fn shot(&self, actor: &mut Actor, ctx: &mut Ctx) -> Result<bool, ActorError> {
        destroy(actor, ctx, 100, ActorType::Explosion);
        Ok(true)
    }

    fn can_be_shot(&self, _actor: &Actor) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::*;
    use crate::domain::tile::grid_from;

    fn walker_dir(actor: &Actor) -> Facing {
        match &actor.data {
            ActorData::Walker(w) => w.direction,
            other => panic!("unexpected data {other:?}"),
        }
    }

    #[test]
    fn walker_turns_at_ledge() {
        let bench_tiles = grid_from(&[
            "        ",
            "        ",
            "  ###   ",
        ]);
        let mut bench = Bench::new(bench_tiles);
        // robot standing on the ledge's left cell, heading left
        let mut robot = bench.spawn(ActorType::Robot, 32, 16);
        bench.tick(&mut robot);
        assert_eq!(robot.rect.x, 32);
        assert_eq!(walker_dir(&robot), Facing::Right);
        for _ in 0..4 {
            bench.tick(&mut robot);
        }
        assert_eq!(robot.rect.x, 64);
        bench.tick(&mut robot);
        assert_eq!(robot.rect.x, 64);
        assert_eq!(walker_dir(&robot), Facing::Left);
    }

    #[test]
    fn walker_turns_at_wall() {
        let mut bench = Bench::new(grid_from(&[
            "        ",
            "#       ",
            "########",
        ]));
        let mut robot = bench.spawn(ActorType::Robot, 24, 16);
        bench.tick(&mut robot);
        assert_eq!(robot.rect.x, 16);
        bench.tick(&mut robot);
        assert_eq!(robot.rect.x, 16);
        assert_eq!(walker_dir(&robot), Facing::Right);
    }

    #[test]
    fn unsupported_walker_falls() {
        let mut bench = Bench::new(grid_from(&[
            "        ",
            "        ",
            "########",
        ]));
        let mut robot = bench.spawn(ActorType::Robot, 48, 0);
        bench.tick(&mut robot);
        assert_eq!((robot.rect.x, robot.rect.y), (48, 8));
        bench.tick(&mut robot);
        assert_eq!(robot.rect.y, 16);
    }

    #[test]
    fn tank_fires_when_turning() {
        let mut bench = Bench::new(grid_from(&[
            "        ",
            "#       ",
            "########",
        ]));
        let mut tank = bench.spawn(ActorType::TankBot, 16, 16);
        bench.tick(&mut tank);
        assert_eq!(bench.spawned(), vec![ActorType::HostileShotRight]);
    }

    #[test]
    fn walker_needs_all_hits() {
        let mut bench = Bench::new(grid_from(&["        ", "        ", "########"]));
        let mut foot = bench.spawn(ActorType::FootBot, 48, 0);
        for _ in 0..2 {
            assert!(notify(&mut bench, &mut foot));
            assert!(foot.is_alive);
        }
        assert!(notify(&mut bench, &mut foot));
        assert!(!foot.is_alive);
        assert_eq!(bench.hero.score(), 500);
        assert_eq!(bench.spawned(), vec![ActorType::Explosion, ActorType::Score500]);
    }

    fn notify(bench: &mut Bench, actor: &mut Actor) -> bool {
        super::super::notify_shot(actor, &mut bench.ctx())
    }

    #[test]
    fn dying_walker_releases_hero() {
        let mut bench = Bench::new(grid_from(&["        ", "        ", "########"]));
        let mut robot = bench.spawn(ActorType::Robot, 48, 16);
        bench.hero.rect.x = 48;
        bench.hero.rect.y = 0;
        bench.tick(&mut robot);
        assert_eq!(bench.hero.hurting_count(), 1);
        notify(&mut bench, &mut robot);
        super::super::free(&mut robot, &mut bench.ctx());
        assert_eq!(bench.hero.hurting_count(), 0);
    }

    #[test]
    fn crawler_reverses_where_wall_ends() {
        let mut bench = Bench::new(grid_from(&[
            "        ",
            "        ",
            "#       ",
            "#       ",
            "########",
        ]));
        let mut crawler = bench.spawn(ActorType::WallCrawlerBotLeft, 16, 48);
        bench.tick(&mut crawler);
        assert_eq!(crawler.rect.y, 40);
        bench.tick(&mut crawler);
        assert_eq!(crawler.rect.y, 32);
        // cell above (row 1) has no wall beside it
        bench.tick(&mut crawler);
        assert_eq!(crawler.rect.y, 32);
        bench.tick(&mut crawler);
        assert_eq!(crawler.rect.y, 40);
    }

    #[test]
    fn red_ball_bounces_back_to_floor() {
        let mut bench = Bench::new(grid_from(&[
            "        ", "        ", "        ", "        ", "        ", "        ", "########",
        ]));
        let mut ball = bench.spawn(ActorType::RedBallJumping, 16, 80);
        let mut lowest = 0;
        let mut highest = i32::MAX;
        for _ in 0..40 {
            bench.tick(&mut ball);
            lowest = lowest.max(ball.rect.y);
            highest = highest.min(ball.rect.y);
        }
        assert_eq!(lowest, 80);
        assert_eq!(highest, 80 - 52);
    }

    #[test]
    fn camera_follows_hero() {
        let mut bench = Bench::new(grid_from(&["        ", "        ", "########"]));
        let mut cam = bench.spawn(ActorType::Camera, 48, 0);
        bench.hero.rect.x = 0;
        bench.tick(&mut cam);
        assert_eq!(cam.data, ActorData::Camera(CameraState { frame: 0 }));
        bench.hero.rect.x = 100;
        bench.tick(&mut cam);
        assert_eq!(cam.data, ActorData::Camera(CameraState { frame: 2 }));
    }
}
