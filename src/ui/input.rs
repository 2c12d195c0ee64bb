/// Keyboard input tracker.
///
/// Tracks which keys are currently held down, enabling:
///   - Continuous walking while an arrow key is held
///   - Held interact (lifts keep rising while the key stays down)
///   - Edge-triggered jump, fire and meta keys
///
/// Uses crossterm's keyboard enhancement for Release events when available.
/// Falls back to timeout-based release detection on terminals that don't support it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::geometry::Facing;

/// After this duration without a Press/Repeat event, consider the key released.
/// Only used when the terminal doesn't report Release events.
const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

// ── Key bindings ──

pub const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
pub const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
pub const KEYS_JUMP: &[KeyCode] = &[KeyCode::Char(' '), KeyCode::Char('w'), KeyCode::Char('W')];
pub const KEYS_FIRE: &[KeyCode] = &[KeyCode::Char('x'), KeyCode::Char('X'), KeyCode::Char('f'), KeyCode::Char('F')];
pub const KEYS_INTERACT: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('e'), KeyCode::Char('E')];
pub const KEYS_PAUSE: &[KeyCode] = &[KeyCode::F(1), KeyCode::Char('p'), KeyCode::Char('P')];
pub const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

pub struct InputState {
    /// Timestamp of last Press/Repeat event for each key.
    last_active: HashMap<KeyCode, Instant>,

    /// Keys that went from released to held during the most recent drain.
    fresh_presses: Vec<KeyCode>,

    /// Raw key events collected during drain, for meta-key handling.
    pub raw_events: Vec<KeyEvent>,

    /// Whether to honor Release events. Only true when keyboard
    /// enhancement is confirmed working.
    pub honor_release: bool,
}

impl Default for InputState {
    fn default() -> Self {
        InputState::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            last_active: HashMap::with_capacity(16),
            fresh_presses: Vec::with_capacity(8),
            raw_events: Vec::with_capacity(8),
            honor_release: false,
        }
    }

    /// Drain all pending terminal events and update key states.
    /// Call this once per frame, before the simulation tick.
    pub fn drain_events(&mut self) {
        self.fresh_presses.clear();
        self.raw_events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                self.feed(key, Instant::now());
            }
        }
        self.expire(Instant::now());
    }

    /// Apply one key event observed at `now`.
    fn feed(&mut self, key: KeyEvent, now: Instant) {
        self.raw_events.push(key);
        match key.kind {
            KeyEventKind::Release if self.honor_release => {
                self.last_active.remove(&key.code);
            }
            // without enhancement, rely on the timeout instead
            KeyEventKind::Release => {}
            _ => {
                let was_held = self.is_held_at(key.code, now);
                self.last_active.insert(key.code, now);
                if !was_held {
                    self.fresh_presses.push(key.code);
                }
            }
        }
    }

    fn expire(&mut self, now: Instant) {
        self.last_active.retain(|_, t| now.duration_since(*t) < HOLD_TIMEOUT);
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.is_held_at(code, Instant::now())
    }

    pub fn any_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.is_held(*c))
    }

    /// Was this key freshly pressed this frame? (edge trigger)
    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.fresh_presses.contains(&code)
    }

    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.was_pressed(*c))
    }

    /// Held or pressed this frame; a tap shorter than a frame still counts.
    pub fn any_active(&self, codes: &[KeyCode]) -> bool {
        self.any_held(codes) || self.any_pressed(codes)
    }

    /// Walking direction; left wins when both are down.
    pub fn walk(&self) -> Option<Facing> {
        if self.any_active(KEYS_LEFT) {
            Some(Facing::Left)
        } else if self.any_active(KEYS_RIGHT) {
            Some(Facing::Right)
        } else {
            None
        }
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.raw_events.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }

    // ── Internal ──

    fn is_held_at(&self, code: KeyCode, now: Instant) -> bool {
        self.last_active.get(&code)
            .map(|t| now.duration_since(*t) < HOLD_TIMEOUT)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn repeat_press_is_not_fresh() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        input.feed(press(KeyCode::Char(' ')), t0);
        assert!(input.any_pressed(KEYS_JUMP));
        input.fresh_presses.clear();
        input.feed(press(KeyCode::Char(' ')), t0 + Duration::from_millis(30));
        assert!(!input.any_pressed(KEYS_JUMP));
    }

    #[test]
    fn keys_expire_without_release_support() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        input.feed(press(KeyCode::Left), t0);
        input.feed(release(KeyCode::Left), t0);
        assert!(input.is_held_at(KeyCode::Left, t0));
        input.expire(t0 + HOLD_TIMEOUT);
        assert!(!input.is_held_at(KeyCode::Left, t0 + HOLD_TIMEOUT));
    }

    #[test]
    fn honored_release_drops_key() {
        let mut input = InputState::new();
        input.honor_release = true;
        let t0 = Instant::now();
        input.feed(press(KeyCode::Up), t0);
        input.feed(release(KeyCode::Up), t0);
        assert!(!input.is_held_at(KeyCode::Up, t0));
        // the press itself is still seen this frame
        assert!(input.any_pressed(KEYS_INTERACT));
    }

    #[test]
    fn ctrl_c_detected() {
        let mut input = InputState::new();
        input.feed(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Instant::now());
        assert!(input.ctrl_c_pressed());
    }
}
