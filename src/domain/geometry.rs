/// Collision utility: axis-aligned pixel rectangles.
///
/// Every simulated thing (hero, shots, actors, tile cells) is described by a
/// `Rect` in pixel units. `(x, y)` is the top-left corner and the rectangle
/// covers the half-open ranges `[x, x + w)` × `[y, y + h)`.
///
/// ## Predicates
///
///   - `overlaps` — the interiors intersect. Shared edges do NOT count.
///     Used for hero touch detection and shot hits.
///   - `touches`  — overlap OR a shared edge / corner.
///     Used for hero interaction (standing on a lift counts as touching it).
///   - `contains` — the other rectangle lies entirely inside this one.
///
/// Empty rectangles (w or h <= 0) never overlap anything, but may still touch.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1 for left, +1 for right.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Facing::Left => -1,
            Facing::Right => 1,
        }
    }

    pub fn reversed(self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Same size, moved by (dx, dy).
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() { return false; }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn touches(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    pub fn contains(&self, inner: &Rect) -> bool {
        inner.x >= self.x
            && inner.y >= self.y
            && inner.right() <= self.right()
            && inner.bottom() <= self.bottom()
    }

    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Is `self` resting exactly on top of `floor`?
    /// Bottom edge on floor's top edge, with some horizontal overlap.
    pub fn stands_on(&self, floor: &Rect) -> bool {
        self.bottom() == floor.y && self.x < floor.right() && floor.x < self.right()
    }

    /// Do the horizontal extents overlap (ignoring y)?
    pub fn overlaps_columns(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right()
    }

    /// Do the vertical extents overlap (ignoring x)?
    pub fn overlaps_rows(&self, other: &Rect) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rects() -> Vec<Rect> {
        let mut rects = vec![];
        for x in [-16, -8, 0, 4, 8, 16, 24] {
            for y in [-8, 0, 8, 16] {
                for (w, h) in [(0, 8), (8, 8), (16, 32), (32, 16)] {
                    rects.push(Rect::new(x, y, w, h));
                }
            }
        }
        rects
    }

    #[test]
    fn overlap_is_symmetric() {
        let rects = sample_rects();
        for a in &rects {
            for b in &rects {
                assert_eq!(a.overlaps(b), b.overlaps(a), "a={a:?} b={b:?}");
                assert_eq!(a.touches(b), b.touches(a), "a={a:?} b={b:?}");
            }
        }
    }

    #[test]
    fn shared_edge_touches_but_does_not_overlap() {
        let a = Rect::new(0, 0, 16, 16);
        let b = Rect::new(16, 0, 16, 16);
        assert!(!a.overlaps(&b));
        assert!(a.touches(&b));
    }

    #[test]
    fn separated_rects_neither_touch_nor_overlap() {
        let a = Rect::new(0, 0, 16, 16);
        let b = Rect::new(17, 0, 16, 16);
        assert!(!a.overlaps(&b));
        assert!(!a.touches(&b));
    }

    #[test]
    fn empty_rect_never_overlaps() {
        let a = Rect::new(0, 0, 0, 16);
        let b = Rect::new(0, 0, 16, 16);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn overlap_implies_touch() {
        let rects = sample_rects();
        for a in &rects {
            for b in &rects {
                if a.overlaps(b) {
                    assert!(a.touches(b), "a={a:?} b={b:?}");
                }
            }
        }
    }

    #[test]
    fn containment() {
        let outer = Rect::new(0, 0, 32, 32);
        assert!(outer.contains(&Rect::new(8, 8, 16, 16)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&Rect::new(24, 8, 16, 16)));
        assert!(outer.contains_point(0, 0));
        assert!(!outer.contains_point(32, 0));
    }

    #[test]
    fn standing_on_floor() {
        let floor = Rect::new(0, 32, 16, 16);
        assert!(Rect::new(8, 0, 16, 32).stands_on(&floor));
        assert!(!Rect::new(16, 0, 16, 32).stands_on(&floor));
        assert!(!Rect::new(0, 1, 16, 32).stands_on(&floor));
    }

    #[test]
    fn facing_sign_and_reverse() {
        assert_eq!(Facing::Left.sign(), -1);
        assert_eq!(Facing::Right.sign(), 1);
        assert_eq!(Facing::Left.reversed(), Facing::Right);
    }
}
