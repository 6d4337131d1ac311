//! Collision resolution between a moving body and static platforms
//!
//! Discrete swept test: the body has already been integrated this tick, so
//! its previous edges are rebuilt as `pos - vel`. A surface is only crossed
//! if the previous edge was on one side and the current edge is on the other,
//! which keeps fast falls from tunneling through 20px ledges.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::platform::Platform;

/// Slack on previous-edge comparisons; absorbs f32 rounding in `pos - vel`
const SWEEP_EPSILON: f32 = 0.001;

/// Which face of a platform stopped the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// No correction applied
    None,
    /// Landed on the top face
    Landed,
    /// Bumped the underside while rising
    Ceiling,
    /// Ran into the platform's left face while moving right
    WallLeft,
    /// Ran into the platform's right face while moving left
    WallRight,
}

/// Resolve one body against one platform, correcting at most one axis
///
/// Vertical contacts win over side contacts so walking across the seam of
/// two ledges never snags on an edge.
pub fn resolve_platform(body: &mut Body, platform: &Platform) -> Contact {
    let cur = body.rect();
    let prev = body.prev_rect();

    // Horizontal overlap: candidate for landing / ceiling
    if cur.right() > platform.left() && cur.left() < platform.right() {
        if body.vel.y >= 0.0
            && cur.bottom() >= platform.top()
            && prev.bottom() <= platform.top() + SWEEP_EPSILON
        {
            body.pos.y = platform.top() - body.height();
            body.vel.y = 0.0;
            return Contact::Landed;
        }

        if body.vel.y < 0.0
            && cur.top() <= platform.bottom()
            && prev.top() >= platform.bottom() - SWEEP_EPSILON
        {
            body.pos.y = platform.bottom();
            body.vel.y = 0.0;
            return Contact::Ceiling;
        }
    }

    // Vertical overlap: candidate for side push
    if cur.bottom() > platform.top() && cur.top() < platform.bottom() {
        if body.vel.x > 0.0
            && cur.right() > platform.left()
            && prev.right() <= platform.left() + SWEEP_EPSILON
        {
            body.pos.x = platform.left() - body.width();
            body.vel.x = 0.0;
            return Contact::WallLeft;
        }

        if body.vel.x < 0.0
            && cur.left() < platform.right()
            && prev.left() >= platform.right() - SWEEP_EPSILON
        {
            body.pos.x = platform.right();
            body.vel.x = 0.0;
            return Contact::WallRight;
        }
    }

    Contact::None
}

/// Resolve a body against every platform in creation order
///
/// Each platform sees the position left by the previous one. Returns true if
/// any platform reported a landing.
pub fn resolve_platforms(body: &mut Body, platforms: &[Platform]) -> bool {
    let mut landed = false;
    for platform in platforms {
        if resolve_platform(body, platform) == Contact::Landed {
            landed = true;
        }
    }
    landed
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn ledge() -> Platform {
        // top = 500, bottom = 520, spans x 100..300
        Platform::new(1, 100.0, 500.0, 200.0)
    }

    fn body_after_step(pos: Vec2, vel: Vec2) -> Body {
        let mut body = Body::new(pos - vel, Vec2::new(32.0, 48.0));
        body.vel = vel;
        body.integrate();
        body
    }

    #[test]
    fn test_landing_snaps_to_top() {
        // Previous bottom 498, now 508 (sunk 8px into the ledge)
        let mut body = body_after_step(Vec2::new(150.0, 460.0), Vec2::new(0.0, 10.0));
        let contact = resolve_platform(&mut body, &ledge());
        assert_eq!(contact, Contact::Landed);
        assert_eq!(body.pos.y, 500.0 - 48.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_fast_fall_does_not_tunnel() {
        // Falls 60px in one tick, fully past the 20px platform
        let mut body = body_after_step(Vec2::new(150.0, 500.0), Vec2::new(0.0, 60.0));
        assert_eq!(resolve_platform(&mut body, &ledge()), Contact::Landed);
        assert_eq!(body.pos.y, 452.0);
    }

    #[test]
    fn test_resting_body_stays_put() {
        let platform = ledge();
        let mut body = Body::new(Vec2::new(150.0, 452.0), Vec2::new(32.0, 48.0));
        for _ in 0..100 {
            body.vel.y += crate::consts::GRAVITY;
            body.integrate();
            assert_eq!(resolve_platform(&mut body, &platform), Contact::Landed);
            assert_eq!(body.pos.y, 452.0);
            assert_eq!(body.vel.y, 0.0);
        }
    }

    #[test]
    fn test_ceiling_hit() {
        // Rising from below: previous top 525, now 515
        let mut body = body_after_step(Vec2::new(150.0, 515.0), Vec2::new(0.0, -10.0));
        let contact = resolve_platform(&mut body, &ledge());
        assert_eq!(contact, Contact::Ceiling);
        assert_eq!(body.pos.y, 520.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_side_push_moving_right() {
        // Body level with the ledge, walking into its left face
        let mut body = body_after_step(Vec2::new(72.0, 480.0), Vec2::new(5.0, 0.0));
        let contact = resolve_platform(&mut body, &ledge());
        assert_eq!(contact, Contact::WallLeft);
        assert_eq!(body.pos.x, 100.0 - 32.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_side_push_moving_left() {
        let mut body = body_after_step(Vec2::new(297.0, 480.0), Vec2::new(-5.0, 0.0));
        let contact = resolve_platform(&mut body, &ledge());
        assert_eq!(contact, Contact::WallRight);
        assert_eq!(body.pos.x, 300.0);
    }

    #[test]
    fn test_walking_off_edge_misses() {
        let mut body = body_after_step(Vec2::new(310.0, 452.0), Vec2::new(5.0, 0.7));
        assert_eq!(resolve_platform(&mut body, &ledge()), Contact::None);
    }

    #[test]
    fn test_landing_wins_over_side() {
        // Moving right and down onto the corner: both tests could fire
        let mut body = body_after_step(Vec2::new(75.0, 455.0), Vec2::new(5.0, 6.0));
        assert_eq!(resolve_platform(&mut body, &ledge()), Contact::Landed);
        assert_eq!(body.vel.x, 5.0);
    }

    #[test]
    fn test_resolve_platforms_reports_landing() {
        let platforms = vec![Platform::new(1, 0.0, 200.0, 50.0), ledge()];
        let mut body = body_after_step(Vec2::new(150.0, 460.0), Vec2::new(0.0, 10.0));
        assert!(resolve_platforms(&mut body, &platforms));

        let mut airborne = body_after_step(Vec2::new(150.0, 100.0), Vec2::new(0.0, 10.0));
        assert!(!resolve_platforms(&mut airborne, &platforms));
    }
}
