//! Collision detection and steering for circles
//!
//! Everything in the arena is a circle, so this is just distances.

use glam::Vec2;

use super::state::Bullet;

/// Check if two circles overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Check if a point lies strictly inside a circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

/// Index of the newest bullet (last in list order) whose centre is inside the circle
///
/// This is not the nearest bullet, only the first one found scanning from
/// the back of the list.
pub fn last_bullet_hit(bullets: &[Bullet], center: Vec2, radius: f32) -> Option<usize> {
    bullets
        .iter()
        .rposition(|b| point_in_circle(b.pos, center, radius))
}

/// Displacement that moves `from` toward `to` by `speed`
///
/// Returns zero when the points coincide, since there is no direction to
/// move in.
pub fn pursuit_step(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= f32::EPSILON {
        return Vec2::ZERO;
    }
    delta / dist * speed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 20.0, Vec2::new(30.0, 0.0), 15.0));
        // Exactly touching
        assert!(!circles_overlap(a, 20.0, Vec2::new(35.0, 0.0), 15.0));
        assert!(!circles_overlap(a, 20.0, Vec2::new(0.0, 50.0), 15.0));
    }

    #[test]
    fn test_point_in_circle() {
        let center = Vec2::new(100.0, 100.0);
        assert!(point_in_circle(Vec2::new(110.0, 100.0), center, 15.0));
        assert!(!point_in_circle(Vec2::new(115.0, 100.0), center, 15.0));
    }

    #[test]
    fn test_last_bullet_hit_prefers_newest() {
        let center = Vec2::new(100.0, 100.0);
        let bullets = vec![
            Bullet::new(Vec2::new(100.0, 101.0), 0.0),
            // Inside, but further away than the older one
            Bullet::new(Vec2::new(112.0, 100.0), 0.0),
            Bullet::new(Vec2::new(0.0, 0.0), 0.0),
        ];
        assert_eq!(last_bullet_hit(&bullets, center, 15.0), Some(1));
        assert_eq!(last_bullet_hit(&bullets[2..], center, 15.0), None);
    }

    #[test]
    fn test_pursuit_step() {
        let step = pursuit_step(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0), 1.5);
        assert!((step.length() - 1.5).abs() < 1e-5);
        assert!((step.x - 0.9).abs() < 1e-5);
        assert!((step.y - 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_pursuit_step_zero_distance() {
        let p = Vec2::new(42.0, 42.0);
        let step = pursuit_step(p, p, 2.0);
        assert_eq!(step, Vec2::ZERO);
        assert!(!step.x.is_nan());
    }
}
