//! The player-controlled flyer

use super::world::{Collision, GamePhase, TickContext, Updatable};
use crate::consts::*;

/// Circular collision body used for every hit test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// The flyer. Horizontal position is fixed at [`FLYER_X`].
#[derive(Debug, Clone, PartialEq)]
pub struct Flyer {
    pub y: f32,
    /// Vertical speed in px/tick, positive is down
    pub velocity: f32,
    /// Pitch in radians, kept within [NOSE_UP_ROTATION, NOSE_DOWN_ROTATION]
    pub rotation: f32,
}

impl Default for Flyer {
    fn default() -> Self {
        Self::new()
    }
}

impl Flyer {
    pub fn new() -> Self {
        Self {
            y: FLYER_REST_Y,
            velocity: 0.0,
            rotation: 0.0,
        }
    }

    pub fn body(&self) -> Body {
        Body {
            x: FLYER_X,
            y: self.y,
            radius: FLYER_RADIUS,
        }
    }

    /// Instant upward kick
    pub fn flap(&mut self) {
        self.velocity = -IMPULSE;
    }

    pub fn reset(&mut self) {
        self.y = FLYER_REST_Y;
        self.velocity = 0.0;
        self.rotation = 0.0;
    }
}

impl Updatable for Flyer {
    fn update(&mut self, ctx: &mut TickContext<'_>) -> Option<Collision> {
        if ctx.phase == GamePhase::Ready {
            self.y = FLYER_REST_Y;
            self.rotation = 0.0;
            return None;
        }

        self.velocity += GRAVITY;
        self.y += self.velocity;

        // Two poses: nose up while rising, then tip over a few degrees per tick
        if self.velocity < IMPULSE {
            self.rotation = NOSE_UP_ROTATION;
        } else {
            self.rotation = (self.rotation + ROTATION_STEP).min(NOSE_DOWN_ROTATION);
        }

        if self.y + FLYER_HEIGHT / 2.0 >= GROUND_PLANE {
            self.y = GROUND_PLANE - FLYER_HEIGHT / 2.0;
            return Some(Collision::Ground);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::testbed::TestBed;

    fn step(flyer: &mut Flyer, phase: GamePhase) -> Option<Collision> {
        let mut bed = TestBed::new();
        let body = flyer.body();
        flyer.update(&mut bed.ctx(phase, 1, body))
    }

    #[test]
    fn test_flap_sets_negative_impulse() {
        let mut flyer = Flyer::new();
        flyer.velocity = 3.0;
        flyer.flap();
        assert_eq!(flyer.velocity, -4.6);
    }

    #[test]
    fn test_ready_pins_rest_pose() {
        let mut flyer = Flyer {
            y: 300.0,
            velocity: 2.0,
            rotation: 1.0,
        };
        assert_eq!(step(&mut flyer, GamePhase::Ready), None);
        assert_eq!(flyer.y, FLYER_REST_Y);
        assert_eq!(flyer.rotation, 0.0);
    }

    #[test]
    fn test_gravity_integrates() {
        let mut flyer = Flyer::new();
        flyer.flap();
        step(&mut flyer, GamePhase::Playing);
        assert!((flyer.velocity - -4.35).abs() < 1e-5);
        assert!((flyer.y - (150.0 - 4.35)).abs() < 1e-4);
        assert_eq!(flyer.rotation, NOSE_UP_ROTATION);
    }

    #[test]
    fn test_rotation_tips_over_and_clamps() {
        let mut flyer = Flyer {
            y: 0.0,
            velocity: IMPULSE,
            rotation: NOSE_UP_ROTATION,
        };
        step(&mut flyer, GamePhase::Playing);
        assert!((flyer.rotation - (NOSE_UP_ROTATION + ROTATION_STEP)).abs() < 1e-6);

        for _ in 0..40 {
            flyer.y = 0.0;
            step(&mut flyer, GamePhase::Playing);
        }
        assert_eq!(flyer.rotation, NOSE_DOWN_ROTATION);
    }

    #[test]
    fn test_ground_contact_clamps_and_collides() {
        let mut flyer = Flyer {
            y: 355.0,
            velocity: 1.0,
            rotation: 0.0,
        };
        assert_eq!(step(&mut flyer, GamePhase::Playing), Some(Collision::Ground));
        assert_eq!(flyer.y, 356.0);
    }

    #[test]
    fn test_keeps_falling_while_over() {
        let mut flyer = Flyer {
            y: 200.0,
            velocity: 0.0,
            rotation: 0.0,
        };
        assert_eq!(step(&mut flyer, GamePhase::Over), None);
        assert_eq!(flyer.velocity, GRAVITY);
        assert_eq!(flyer.y, 200.25);
    }
}
