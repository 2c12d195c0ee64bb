/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Input (walk direction, jump, interact edge)
///   2. Actor visibility against the camera
///   3. Actors, in insertion order (touch transitions, then ACT)
///   4. Hero (walk, jump/fall, landing, damage)
///   5. Fire
///   6. Shots
///   7. Level commands (spawns, broadcasts, teleports, finish)
///   8. Removal of dead actors (FREE)
///   9. Outcome (hero dead?) and camera follow
///
/// Spawns requested in 3 and 6 join the actor list in 7 and act for the
/// first time on the next tick.

use tracing::info;

use crate::domain::geometry::Facing;
use crate::domain::hero::Motion;
use super::event::GameEvent;
use super::world::{Phase, World};

/// What the player asked for this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub walk: Option<Facing>,
    pub jump: bool,
    pub fire: bool,
    /// Held state; the world turns it into START/END edges.
    pub interact: bool,
}

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut World, input: FrameInput) -> Vec<GameEvent> {
    if world.phase != Phase::Playing || world.paused { return vec![]; }
    world.tick += 1;

    resolve_input(world, &input);
    world.update_visibility();
    world.act_actors();

    let health = world.tick_hero();

    resolve_fire(world, input.fire);
    world.act_shots();
    world.apply_commands();
    world.remove_dead();

    if health == 0 && world.phase == Phase::Playing {
        hero_die(world);
    }

    let hero = world.hero.rect();
    let (w, h) = (world.tiles.pixel_width(), world.tiles.pixel_height());
    world.camera.follow(&hero, w, h);
    world.tick_message();

    world.take_events()
}

// ══════════════════════════════════════════════════════════════
// Input
// ══════════════════════════════════════════════════════════════

fn resolve_input(world: &mut World, input: &FrameInput) {
    if world.hero.hidden {
        world.hero.set_motion(Motion::Idle);
        world.set_interact(false);
        return;
    }
    match input.walk {
        Some(direction) => {
            world.hero.set_direction(direction);
            world.hero.set_motion(Motion::Walking);
        }
        None => world.hero.set_motion(Motion::Idle),
    }
    if input.jump {
        world.hero_jump();
    }
    world.set_interact(input.interact);
}

fn resolve_fire(world: &mut World, fire: bool) {
    if !fire {
        world.hero.shooting = false;
        return;
    }
    world.fire();
}

// ══════════════════════════════════════════════════════════════
// Outcome
// ══════════════════════════════════════════════════════════════

fn hero_die(world: &mut World) {
    info!(level = %world.name, tick = world.tick, "hero died");
    world.phase = Phase::HeroDead;
    world.push_event(GameEvent::HeroKilled);
}
