//! Collision detection and response for circles and rotated rectangles
//!
//! Hitboxes are either circles (asteroids, player, boss, round shots) or
//! rectangles rotated about their center (squared shots). Response is
//! purpose-built: overlapping bodies are pushed apart along the line between
//! their centers, and velocities are mirrored about fixed normals.

use glam::Vec2;

use crate::{angle_between, reflect, rotate_deg};

/// A circular hitbox
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
        }
    }

    /// Same circle moved by `offset`
    #[inline]
    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            center: self.center + offset,
            radius: self.radius,
        }
    }
}

/// True when the circles touch or overlap
#[inline]
pub fn circles_collide(a: Circle, b: Circle) -> bool {
    a.center.distance(b.center) <= a.radius + b.radius
}

/// Displacement that moves `mover` out of `obstacle` along the line between
/// their centers, leaving them exactly touching. `None` when they don't overlap.
pub fn separation_offset(mover: Circle, obstacle: Circle) -> Option<Vec2> {
    let distance = mover.center.distance(obstacle.center);
    let radius_sum = mover.radius + obstacle.radius;

    if distance >= radius_sum {
        return None;
    }

    let angle = angle_between(obstacle.center, mover.center);
    // Screen-up scaled by the (negative) overlap, turned to face obstacle -> mover
    Some(rotate_deg(Vec2::new(0.0, distance - radius_sum), angle))
}

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }
}

/// Axis-aligned rectangle vs circle
pub fn rect_circle_collision(rect: Rect, circle: Circle) -> bool {
    let half = rect.size / 2.0;
    let d = (circle.center - rect.center()).abs();

    if d.x > half.x + circle.radius || d.y > half.y + circle.radius {
        return false;
    }

    if d.x <= half.x || d.y <= half.y {
        return true;
    }

    (d - half).length_squared() <= circle.radius * circle.radius
}

/// Rectangle of `size` centered on `center` and rotated clockwise by
/// `angle_deg`, vs circle.
///
/// The circle is brought into the rectangle's unrotated frame first, then
/// tested axis-aligned.
pub fn rotated_rect_circle_collision(center: Vec2, size: Vec2, angle_deg: f32, circle: Circle) -> bool {
    let local = rotate_deg(circle.center - center, -angle_deg);
    rect_circle_collision(
        Rect::from_center(center, size),
        Circle {
            center: center + local,
            radius: circle.radius,
        },
    )
}

/// Which arena edge a hitbox crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Left,
    Bottom,
    Right,
}

impl Edge {
    /// Normal pointing back into the arena
    pub fn inward_normal(self) -> Vec2 {
        match self {
            Edge::Top => Vec2::Y,
            Edge::Left => Vec2::X,
            Edge::Bottom => Vec2::NEG_Y,
            Edge::Right => Vec2::NEG_X,
        }
    }
}

/// First arena edge (top, left, bottom, right) the circle touches or crosses
pub fn border_edge(circle: Circle, width: f32, height: f32) -> Option<Edge> {
    let Circle { center: p, radius: r } = circle;

    if p.y - r <= 0.0 {
        Some(Edge::Top)
    } else if p.x - r <= 0.0 {
        Some(Edge::Left)
    } else if p.y + r >= height - 1.0 {
        Some(Edge::Bottom)
    } else if p.x + r >= width - 1.0 {
        Some(Edge::Right)
    } else {
        None
    }
}

/// Mirror a velocity off an arena edge
#[inline]
pub fn bounce_off_edge(velocity: Vec2, edge: Edge) -> Vec2 {
    reflect(velocity, edge.inward_normal())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_collide() {
        let a = Circle::new(0.0, 0.0, 10.0);
        assert!(circles_collide(a, Circle::new(19.0, 0.0, 10.0)));
        assert!(circles_collide(a, Circle::new(20.0, 0.0, 10.0)));
        assert!(!circles_collide(a, Circle::new(20.5, 0.0, 10.0)));
    }

    #[test]
    fn test_separation_leaves_exact_contact() {
        let mover = Circle::new(100.0, 100.0, 10.0);
        let obstacle = Circle::new(119.0, 100.0, 10.0);

        let offset = separation_offset(mover, obstacle).expect("overlapping");
        let resolved = mover.translated(offset);

        assert!((resolved.center.distance(obstacle.center) - 20.0).abs() < 1e-4);
        // Pushed away from the obstacle, not through it
        assert!(resolved.center.x < mover.center.x);
    }

    #[test]
    fn test_separation_diagonal() {
        let mover = Circle::new(0.0, 0.0, 12.0);
        let obstacle = Circle::new(7.0, -9.0, 8.0);

        let offset = separation_offset(mover, obstacle).unwrap();
        let resolved = mover.translated(offset);
        assert!((resolved.center.distance(obstacle.center) - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_separation_none_when_apart() {
        let mover = Circle::new(0.0, 0.0, 5.0);
        assert!(separation_offset(mover, Circle::new(10.0, 0.0, 5.0)).is_none());
        assert!(separation_offset(mover, Circle::new(30.0, 0.0, 5.0)).is_none());
    }

    #[test]
    fn test_rect_circle_axis_aligned() {
        let rect = Rect::from_center(Vec2::ZERO, Vec2::new(20.0, 10.0));
        assert!(rect_circle_collision(rect, Circle::new(14.0, 0.0, 5.0)));
        assert!(!rect_circle_collision(rect, Circle::new(16.0, 0.0, 5.0)));
        // Near a corner, outside the rounded region
        assert!(!rect_circle_collision(rect, Circle::new(14.0, 9.0, 5.0)));
        assert!(rect_circle_collision(rect, Circle::new(12.0, 7.0, 5.0)));
    }

    #[test]
    fn test_rotated_rect_circle() {
        // A tall thin bar; a circle off to its side misses until the bar is turned 90°
        let size = Vec2::new(4.0, 40.0);
        let circle = Circle::new(15.0, 0.0, 3.0);

        assert!(!rotated_rect_circle_collision(Vec2::ZERO, size, 0.0, circle));
        assert!(rotated_rect_circle_collision(Vec2::ZERO, size, 90.0, circle));
        assert!(rotated_rect_circle_collision(Vec2::ZERO, size, -90.0, circle));
    }

    #[test]
    fn test_border_edge_order() {
        // Touching top and left at once: top wins
        let corner = Circle::new(5.0, 5.0, 10.0);
        assert_eq!(border_edge(corner, 100.0, 100.0), Some(Edge::Top));

        assert_eq!(border_edge(Circle::new(5.0, 50.0, 10.0), 100.0, 100.0), Some(Edge::Left));
        assert_eq!(border_edge(Circle::new(50.0, 95.0, 10.0), 100.0, 100.0), Some(Edge::Bottom));
        assert_eq!(border_edge(Circle::new(95.0, 50.0, 10.0), 100.0, 100.0), Some(Edge::Right));
        assert_eq!(border_edge(Circle::new(50.0, 50.0, 10.0), 100.0, 100.0), None);
    }

    #[test]
    fn test_bounce_off_edge() {
        let v = Vec2::new(3.0, -2.0);
        assert_eq!(bounce_off_edge(v, Edge::Top), Vec2::new(3.0, 2.0));
        assert_eq!(bounce_off_edge(v, Edge::Right), Vec2::new(-3.0, -2.0));
    }
}
