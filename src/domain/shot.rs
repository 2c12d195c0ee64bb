/// The hero's projectile.
///
/// A shot flies two half tiles per tick. Every half step is tested first
/// against shootable actors, then against the tile grid; whichever stops it
/// puts the shot into its one-tick death grace. A shot in grace no longer
/// moves or collides.

use super::actor::{self, Actor, ActorType, Ctx};
use super::geometry::{Facing, Rect};
use super::hero::Hero;
use super::sprite::{Canvas, Sheet, Sprite};
use super::tile::{HALFTILE_HEIGHT, HALFTILE_WIDTH, TILE_WIDTH};
use crate::sim::event::GameEvent;

pub const SHOT_WIDTH: i32 = TILE_WIDTH;
pub const SHOT_HEIGHT: i32 = HALFTILE_HEIGHT;

const FLYING: u8 = 2;
const GRACE: u8 = 1;
const STEPS_PER_TICK: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct Shot {
    pub rect: Rect,
    pub direction: Facing,
    pub is_alive: bool,
    /// 2 flying, 1 death grace, 0 dead.
    countdown: u8,
    frame: u16,
}

impl Shot {
    pub fn new(x: i32, y: i32, direction: Facing) -> Self {
        Shot {
            rect: Rect::new(x, y, SHOT_WIDTH, SHOT_HEIGHT),
            direction,
            is_alive: true,
            countdown: FLYING,
            frame: 0,
        }
    }

    /// A shot leaving the hero's gun, in front of the hero at chest height.
    pub fn from_hero(hero: &Hero) -> Self {
        let rect = hero.rect();
        let x = match hero.direction {
            Facing::Left => rect.x - SHOT_WIDTH,
            Facing::Right => rect.right(),
        };
        Shot::new(x, rect.y + HALFTILE_HEIGHT, hero.direction)
    }

    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    /// Advance one tick. Returns whether the shot is still alive.
    pub fn tick(&mut self, actors: &mut [Actor], ctx: &mut Ctx) -> bool {
        if !self.is_alive { return false; }
        self.frame = (self.frame + 1) % 4;

        if self.countdown <= GRACE {
            self.countdown = 0;
            self.is_alive = false;
            return false;
        }

        let dx = self.direction.sign() * HALFTILE_WIDTH;
        for _ in 0..STEPS_PER_TICK {
            let next = self.rect.offset(dx, 0);
            if self.hit_actor(&next, actors, ctx) || self.hit_wall(&next, ctx) {
                self.countdown = GRACE;
                break;
            }
            self.rect = next;
        }
        true
    }

    fn hit_actor(&self, next: &Rect, actors: &mut [Actor], ctx: &mut Ctx) -> bool {
        for target in actors.iter_mut() {
            if !target.is_visible || !actor::can_be_shot(target) { continue; }
            if !target.rect.overlaps(next) { continue; }
            if actor::notify_shot(target, ctx) {
                ctx.events.push(GameEvent::ShotHit { kind: target.kind });
                return true;
            }
        }
        false
    }

    fn hit_wall(&self, next: &Rect, ctx: &mut Ctx) -> bool {
        if !ctx.tiles.rect_is_blocked(next) { return false; }
        let x = next.x;
        let y = next.y - HALFTILE_HEIGHT / 2;
        ctx.spawn(ActorType::Explosion, x, y);
        ctx.events.push(GameEvent::ShotBlocked { x, y });
        true
    }

    /// The level calls this once the shot has left the viewport.
    pub fn notify_out_of_sight(&mut self) {
        self.countdown = 0;
        self.is_alive = false;
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        if !self.is_alive { return; }
        canvas.draw(Sprite { sheet: Sheet::Shot, frame: self.frame }, self.rect.x, self.rect.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::actor::testing::Bench;
    use crate::domain::actor::LevelCommand;
    use crate::domain::sprite::DrawList;
    use crate::domain::tile::grid_from;

    fn range() -> crate::domain::tile::TileGrid {
        grid_from(&[
            "          ",
            "          ",
            "      #   ",
            "##########",
        ])
    }

    fn explosions(bench: &Bench) -> usize {
        bench.spawned().iter().filter(|&&k| k == ActorType::Explosion).count()
    }

    #[test]
    fn shot_stops_at_wall_with_one_explosion() {
        let mut bench = Bench::new(range());
        let mut shot = Shot::new(16, 36, Facing::Right);
        for _ in 0..4 {
            assert!(shot.tick(&mut [], &mut bench.ctx()));
            assert_eq!(shot.countdown(), FLYING);
        }
        assert_eq!(shot.rect.x, 80);

        // leading edge would enter the wall at x = 96
        assert!(shot.tick(&mut [], &mut bench.ctx()));
        assert_eq!(shot.countdown(), GRACE);
        assert_eq!(shot.rect.x, 80);
        assert_eq!(explosions(&bench), 1);

        assert!(!shot.tick(&mut [], &mut bench.ctx()));
        assert!(!shot.is_alive);
        assert_eq!(explosions(&bench), 1);
    }

    #[test]
    fn shot_hits_box_before_wall() {
        let mut bench = Bench::new(range());
        let mut actors = vec![bench.spawn(ActorType::BoxGreyGun, 64, 32)];
        let mut shot = Shot::new(16, 36, Facing::Right);
        for _ in 0..3 {
            shot.tick(&mut actors, &mut bench.ctx());
        }
        assert_eq!(shot.countdown(), GRACE);
        assert!(!actors[0].is_alive);
        assert_eq!(explosions(&bench), 0);
        assert!(bench.commands.contains(&LevelCommand::Spawn { kind: ActorType::Gun, x: 64, y: 32 }));
        assert!(bench.events.contains(&GameEvent::ShotHit { kind: ActorType::BoxGreyGun }));
    }

    #[test]
    fn shot_passes_unshootable_and_invisible_actors() {
        let mut bench = Bench::new(range());
        let mut ghost = bench.spawn(ActorType::BoxGreyEmpty, 48, 32);
        ghost.is_visible = false;
        let mut actors = vec![bench.spawn(ActorType::KeyRed, 32, 32), ghost];
        let mut shot = Shot::new(16, 36, Facing::Right);
        shot.tick(&mut actors, &mut bench.ctx());
        shot.tick(&mut actors, &mut bench.ctx());
        assert_eq!(shot.countdown(), FLYING);
        assert!(actors.iter().all(|a| a.is_alive));
    }

    #[test]
    fn shot_leaves_hero_on_facing_side() {
        let mut hero = Hero::new();
        hero.rect = Rect::new(64, 16, 16, 32);
        assert_eq!(Shot::from_hero(&hero).rect, Rect::new(80, 24, SHOT_WIDTH, SHOT_HEIGHT));
        hero.direction = Facing::Left;
        assert_eq!(Shot::from_hero(&hero).rect.x, 48);
    }

    #[test]
    fn out_of_sight_kills_immediately() {
        let mut bench = Bench::new(range());
        let mut shot = Shot::new(16, 36, Facing::Right);
        shot.notify_out_of_sight();
        assert!(!shot.tick(&mut [], &mut bench.ctx()));
        let mut canvas = DrawList::default();
        shot.render(&mut canvas);
        assert!(canvas.calls.is_empty());
    }
}
