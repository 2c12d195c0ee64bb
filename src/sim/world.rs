/// World: one running level.
///
/// ## Ownership
///
/// The world owns the tile grid, the hero, every actor and every live shot.
/// Actors never see each other: a handler gets a `Ctx` (grid, hero,
/// outboxes) and asks for anything level-wide through `LevelCommand`s,
/// which `apply_commands()` carries out after the actor and shot passes.
///
/// ## Camera / Viewport
///
/// Level coordinates are pixels. The camera is a pixel rectangle into the
/// level; an actor is visible when its rectangle overlaps the view. A camera
/// with no size yet (`view_w == 0`) sees everything, which is what tests and
/// the first tick before the renderer has measured the terminal get.
///
/// ## Render order
///
/// background actors → tiles → normal actors → hero → foreground actors →
/// shots.

use tracing::{debug, info};

use crate::domain::actor::{self, Actor, ActorId, ActorType, Ctx, Diagnostic, LevelCommand, Signal};
use crate::domain::geometry::Rect;
use crate::domain::hero::{Hero, HERO_HEIGHT};
use crate::domain::shot::Shot;
use crate::domain::sprite::{Canvas, Sheet, Sprite};
use crate::domain::tile::{Tile, TileGrid, TILE_HEIGHT, TILE_WIDTH};
use crate::sim::event::GameEvent;

/// How long an info message stays up, in ticks.
pub const MESSAGE_TICKS: u32 = 40;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    HeroDead,
    Finished,
}

/// Camera: a viewport into the level, in pixels.
#[derive(Clone, Debug, Default)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
    pub view_w: i32,
    pub view_h: i32,
}

impl Camera {
    pub fn new() -> Self {
        Camera::default()
    }

    pub fn view(&self) -> Option<Rect> {
        if self.view_w == 0 || self.view_h == 0 { return None; }
        Some(Rect::new(self.x, self.y, self.view_w, self.view_h))
    }

    pub fn sees(&self, rect: &Rect) -> bool {
        match self.view() {
            None => true,
            Some(view) => view.overlaps(rect),
        }
    }

    /// Dead-zone follow: scroll only when the target leaves the inner 60%
    /// of the view. Levels smaller than the view are centred.
    pub fn follow(&mut self, target: &Rect, world_w: i32, world_h: i32) {
        if self.view_w == 0 || self.view_h == 0 { return; }
        self.x = follow_axis(self.x, target.x, target.w, self.view_w, world_w);
        self.y = follow_axis(self.y, target.y, target.h, self.view_h, world_h);
    }

    /// Snap directly onto the target (level start, restart).
    pub fn center_on(&mut self, target: &Rect, world_w: i32, world_h: i32) {
        if self.view_w == 0 || self.view_h == 0 { return; }
        self.x = center_axis(target.x + target.w / 2, self.view_w, world_w);
        self.y = center_axis(target.y + target.h / 2, self.view_h, world_h);
    }
}

fn follow_axis(pos: i32, target: i32, size: i32, view: i32, world: i32) -> i32 {
    if world <= view {
        return -(view - world) / 2;
    }
    let margin = view / 5;
    let mut pos = pos;
    if target < pos + margin {
        pos = target - margin;
    } else if target + size > pos + view - margin {
        pos = target + size - view + margin;
    }
    pos.clamp(0, world - view)
}

fn center_axis(center: i32, view: i32, world: i32) -> i32 {
    if world <= view {
        return -(view - world) / 2;
    }
    (center - view / 2).clamp(0, world - view)
}

pub struct World {
    pub name: String,
    pub tiles: TileGrid,
    pub hero: Hero,
    pub actors: Vec<Actor>,
    pub shots: Vec<Shot>,
    pub camera: Camera,

    // ── Meta ──
    pub phase: Phase,
    pub tick: u64,
    pub paused: bool,
    pub diagnostics: Vec<Diagnostic>,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,

    // ── Internal ──
    next_id: u32,
    events: Vec<GameEvent>,
    commands: Vec<LevelCommand>,
    /// Actors that got HERO_INTERACT_START and still owe an END.
    interacting: Vec<ActorId>,
    interact_held: bool,
}

/// Split the world into the actor list, the shot list and a handler context.
macro_rules! parts {
    ($world:expr) => {
        (
            &mut $world.actors,
            &mut $world.shots,
            Ctx {
                tiles: &mut $world.tiles,
                hero: &mut $world.hero,
                events: &mut $world.events,
                commands: &mut $world.commands,
                diagnostics: &mut $world.diagnostics,
            },
        )
    };
}

// ── Construction ──

impl World {
    pub fn new(name: impl Into<String>, tiles: TileGrid, hero: Hero) -> Self {
        World {
            name: name.into(),
            tiles,
            hero,
            actors: vec![],
            shots: vec![],
            camera: Camera::new(),
            phase: Phase::Playing,
            tick: 0,
            paused: false,
            diagnostics: vec![],
            message: String::new(),
            message_timer: 0,
            next_id: 1,
            events: vec![],
            commands: vec![],
            interacting: vec![],
            interact_held: false,
        }
    }

    /// Create an actor and append it to the level. Returns its id.
    pub fn add_actor(&mut self, kind: ActorType, x: i32, y: i32) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        let (actors, _, mut ctx) = parts!(self);
        let mut new = actor::create(id, kind, x, y, &mut ctx);
        new.is_visible = self.camera.sees(&new.rect);
        actors.push(new);
        id
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    pub fn tick_message(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 { self.message.clear(); }
        }
    }

    /// Events collected since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn hero_jump(&mut self) {
        self.hero.jump(&mut self.events);
    }

    /// Hero movement and damage. Returns the health left.
    pub fn tick_hero(&mut self) -> u8 {
        self.hero.tick(&self.tiles, &mut self.events)
    }
}

// ── Tick passes ──

impl World {
    pub fn update_visibility(&mut self) {
        for a in self.actors.iter_mut() {
            a.is_visible = self.camera.sees(&a.rect);
        }
    }

    /// Touch transitions and ACT for every actor, in insertion order.
    pub fn act_actors(&mut self) {
        let (actors, _, mut ctx) = parts!(self);
        for a in actors.iter_mut() {
            actor::tick(a, &mut ctx);
        }
    }

    /// Feed the interact button. START goes to every interactive actor the
    /// hero touches on the press; END goes to the same actors on release.
    pub fn set_interact(&mut self, held: bool) {
        if held == self.interact_held { return; }
        self.interact_held = held;

        let (actors, _, mut ctx) = parts!(self);
        if held {
            let hero = ctx.hero.rect();
            for a in actors.iter_mut() {
                if actor::hero_can_interact(a) && a.rect.touches(&hero) {
                    actor::hero_interact_start(a, &mut ctx);
                    self.interacting.push(a.id);
                }
            }
        } else {
            for id in self.interacting.drain(..) {
                if let Some(a) = actors.iter_mut().find(|a| a.id == id && a.is_alive) {
                    actor::hero_interact_end(a, &mut ctx);
                }
            }
        }
    }

    /// Fire a shot if fewer than `firepower` are in flight.
    pub fn fire(&mut self) -> bool {
        if self.hero.hidden { return false; }
        if self.shots.len() >= self.hero.firepower() as usize { return false; }
        self.shots.push(Shot::from_hero(&self.hero));
        self.hero.shooting = true;
        self.events.push(GameEvent::ShotFired);
        true
    }

    pub fn act_shots(&mut self) {
        let camera = self.camera.clone();
        let (actors, shots, mut ctx) = parts!(self);
        for shot in shots.iter_mut() {
            if shot.tick(actors, &mut ctx) && !camera.sees(&shot.rect) {
                shot.notify_out_of_sight();
            }
        }
        shots.retain(|s| s.is_alive);
    }

    /// Carry out what the actors asked for during this tick. Commands issued
    /// while applying (a broadcast that spawns, say) run in the same call.
    pub fn apply_commands(&mut self) {
        while !self.commands.is_empty() {
            let batch = std::mem::take(&mut self.commands);
            for command in batch {
                self.apply(command);
            }
        }
    }

    fn apply(&mut self, command: LevelCommand) {
        match command {
            LevelCommand::Spawn { kind, x, y } => {
                self.add_actor(kind, x, y);
            }
            LevelCommand::Broadcast(signal) => self.broadcast(signal),
            LevelCommand::Teleport { from } => self.teleport(from),
            LevelCommand::FinishLevel => {
                info!(level = %self.name, score = self.hero.score(), "level finished");
                self.phase = Phase::Finished;
                self.events.push(GameEvent::LevelFinished);
            }
            LevelCommand::ShowMessage(text) => self.set_message(&text, MESSAGE_TICKS),
        }
    }

    pub fn broadcast(&mut self, signal: Signal) {
        debug!(?signal, "broadcast");
        let (actors, _, mut ctx) = parts!(self);
        for a in actors.iter_mut() {
            actor::signal(a, signal, &mut ctx);
        }
    }

    fn teleport(&mut self, from: ActorId) {
        let Some(source) = self.actor(from) else { return };
        let target_kind = match source.kind {
            ActorType::Teleporter1 => ActorType::Teleporter2,
            ActorType::Teleporter2 => ActorType::Teleporter1,
            _ => return,
        };
        let Some(target) = self.actors.iter().find(|a| a.kind == target_kind && a.is_alive) else {
            return;
        };
        let rect = target.rect;
        self.hero.set_x(rect.x);
        self.hero.set_y(rect.bottom() - HERO_HEIGHT);
        self.events.push(GameEvent::Teleported);
        self.center_camera();
    }

    /// Snap the camera onto the hero.
    pub fn center_camera(&mut self) {
        let hero = self.hero.rect();
        self.camera.center_on(&hero, self.tiles.pixel_width(), self.tiles.pixel_height());
    }

    /// Run FREE for every dead actor, then drop them.
    pub fn remove_dead(&mut self) {
        let (actors, _, mut ctx) = parts!(self);
        for a in actors.iter_mut().filter(|a| !a.is_alive) {
            actor::free(a, &mut ctx);
        }
        actors.retain(|a| a.is_alive);
    }

    /// Tear the level down: FREE every actor still alive.
    pub fn clear(&mut self) {
        for a in self.actors.iter_mut() {
            a.is_alive = false;
        }
        self.remove_dead();
        self.shots.clear();
    }
}

// ── Rendering ──

impl World {
    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        let World { actors, diagnostics, .. } = self;
        for a in actors.iter().filter(|a| a.is_visible && a.kind.is_background()) {
            actor::render(a, canvas, diagnostics);
        }
        self.render_tiles(canvas);
        let World { actors, diagnostics, .. } = self;
        for a in actors.iter().filter(|a| a.is_visible && !a.kind.is_background() && !actor::is_foreground(a)) {
            actor::render(a, canvas, diagnostics);
        }
        if self.hero.is_drawn() {
            canvas.draw(Sprite { sheet: Sheet::Hero, frame: self.hero.frame() }, self.hero.x(), self.hero.y());
        }
        let World { actors, diagnostics, .. } = self;
        for a in actors.iter().filter(|a| a.is_visible && actor::is_foreground(a)) {
            actor::render(a, canvas, diagnostics);
        }
        for shot in &self.shots {
            shot.render(canvas);
        }
    }

    fn render_tiles(&self, canvas: &mut dyn Canvas) {
        let (cx0, cy0, cx1, cy1) = match self.camera.view() {
            None => (0, 0, self.tiles.width() as i32, self.tiles.height() as i32),
            Some(view) => (
                view.x.div_euclid(TILE_WIDTH).max(0),
                view.y.div_euclid(TILE_HEIGHT).max(0),
                (view.right() + TILE_WIDTH - 1).div_euclid(TILE_WIDTH).min(self.tiles.width() as i32),
                (view.bottom() + TILE_HEIGHT - 1).div_euclid(TILE_HEIGHT).min(self.tiles.height() as i32),
            ),
        };
        for cy in cy0..cy1 {
            for cx in cx0..cx1 {
                match self.tiles.tile(cx, cy) {
                    None | Some(Tile::Empty) => {}
                    Some(tile) => canvas.draw(
                        Sprite { sheet: Sheet::Tile(tile), frame: 0 },
                        cx * TILE_WIDTH,
                        cy * TILE_HEIGHT,
                    ),
                }
            }
        }
    }
}
