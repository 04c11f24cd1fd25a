//! Axis-aligned containment tests
//!
//! Collision policy: a projectile hits an entity when any of the projectile's
//! four bounding-box corners lies inside the entity's rectangle. A projectile
//! large enough to enclose an entity without a corner inside it is not a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle described by its center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Bounding-box corners: top-left, top-right, bottom-left, bottom-right (y up)
    pub fn corners(&self) -> [Vec2; 4] {
        let h = self.half_extents();
        [
            Vec2::new(self.center.x - h.x, self.center.y + h.y),
            Vec2::new(self.center.x + h.x, self.center.y + h.y),
            Vec2::new(self.center.x - h.x, self.center.y - h.y),
            Vec2::new(self.center.x + h.x, self.center.y - h.y),
        ]
    }
}

/// True iff `point` lies within `rect`'s half-extents (edges inclusive)
#[inline]
pub fn contains(rect: &Rect, point: Vec2) -> bool {
    let d = (point - rect.center).abs();
    let h = rect.half_extents();
    d.x <= h.x && d.y <= h.y
}

/// True iff any corner of `projectile` lies inside `target`
pub fn collides(target: &Rect, projectile: &Rect) -> bool {
    projectile.corners().iter().any(|&c| contains(target, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges_inclusive() {
        let r = Rect::new(Vec2::new(100.0, 100.0), Vec2::new(20.0, 10.0));
        assert!(contains(&r, Vec2::new(100.0, 100.0)));
        assert!(contains(&r, Vec2::new(110.0, 105.0)));
        assert!(contains(&r, Vec2::new(90.0, 95.0)));
        assert!(!contains(&r, Vec2::new(110.5, 100.0)));
        assert!(!contains(&r, Vec2::new(100.0, 94.0)));
    }

    #[test]
    fn test_corner_overlap_collides() {
        let alien = Rect::new(Vec2::new(100.0, 100.0), Vec2::new(33.0, 33.0));
        let bolt = Rect::new(Vec2::new(100.0, 80.0), Vec2::new(4.0, 16.0));
        // Top corners at y = 88, alien bottom at 83.5
        assert!(collides(&alien, &bolt));

        let far = Rect::new(Vec2::new(100.0, 60.0), Vec2::new(4.0, 16.0));
        assert!(!collides(&alien, &far));
    }

    #[test]
    fn test_enclosing_projectile_is_not_a_hit() {
        let small = Rect::new(Vec2::new(50.0, 50.0), Vec2::new(4.0, 4.0));
        let huge = Rect::new(Vec2::new(50.0, 50.0), Vec2::new(40.0, 40.0));
        assert!(!collides(&small, &huge));
        // The reverse direction has every corner inside
        assert!(collides(&huge, &small));
    }
}
