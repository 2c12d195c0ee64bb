/// Drawing seam between the simulation and a presentation layer.
///
/// Simulation code never draws pixels; it asks a `Canvas` to place a sprite
/// (sheet + frame) at a level pixel position. The terminal renderer maps
/// sprites to glyphs, tests record the calls with `DrawList`.

use super::actor::ActorType;
use super::tile::Tile;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Sheet {
    Tile(Tile),
    Hero,
    Shot,
    Actor(ActorType),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Sprite {
    pub sheet: Sheet,
    pub frame: u16,
}

impl Sprite {
    pub fn actor(kind: ActorType, frame: u16) -> Self {
        Sprite { sheet: Sheet::Actor(kind), frame }
    }
}

pub trait Canvas {
    fn draw(&mut self, sprite: Sprite, x: i32, y: i32);
}

/// A canvas that just remembers what was drawn, in order.
#[derive(Default, Debug)]
#[allow(dead_code)]
pub struct DrawList {
    pub calls: Vec<(Sprite, i32, i32)>,
}

impl Canvas for DrawList {
    fn draw(&mut self, sprite: Sprite, x: i32, y: i32) {
        self.calls.push((sprite, x, y));
    }
}
