//! Gated obstacle pairs: spawning, scrolling, hit tests and scoring

use std::collections::VecDeque;

use log::debug;
use rand::Rng;

use super::flyer::Body;
use super::world::{Collision, GameEvent, GamePhase, TickContext, Updatable};
use crate::consts::*;

/// A top/bottom barrier pair sharing one gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Left edge of both barriers
    pub x: f32,
    /// Top edge of the top barrier (negative, it starts above the screen)
    pub y: f32,
}

impl Obstacle {
    /// Bottom edge of the top barrier
    pub fn gap_top(&self) -> f32 {
        self.y + OBSTACLE_HEIGHT
    }

    /// Top edge of the bottom barrier
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top() + OBSTACLE_GAP
    }

    pub fn right(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    pub fn overlaps_horizontally(&self, body: &Body) -> bool {
        body.x + body.radius > self.x && body.x - body.radius < self.right()
    }

    pub fn hits(&self, body: &Body) -> bool {
        self.overlaps_horizontally(body)
            && (body.y - body.radius < self.gap_top() || body.y + body.radius > self.gap_bottom())
    }
}

/// Obstacles ordered by spawn time, front is leftmost
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleField {
    obstacles: VecDeque<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Append at the back; callers keep x ascending
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        debug_assert!(self.obstacles.back().is_none_or(|last| last.x <= obstacle.x));
        self.obstacles.push_back(obstacle);
    }

    fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let y = OBSTACLE_BASE_OFFSET * (rng.random::<f32>() + 1.0);
        debug!("Spawned obstacle with offset {y:.1}");
        self.push(Obstacle {
            x: VIEWPORT_WIDTH,
            y,
        });
    }
}

impl Updatable for ObstacleField {
    fn update(&mut self, ctx: &mut TickContext<'_>) -> Option<Collision> {
        if ctx.phase != GamePhase::Playing {
            return None;
        }

        if ctx.frames % SPAWN_INTERVAL == 0 {
            self.spawn(&mut *ctx.rng);
        }

        let mut hit = None;
        for obstacle in &mut self.obstacles {
            obstacle.x -= OBSTACLE_SPEED;
            if obstacle.hits(&ctx.flyer) {
                hit = Some(Collision::Obstacle);
            }
        }

        // Uniform speed keeps the deque sorted, so everything off screen is at the front
        while self.obstacles.front().is_some_and(|o| o.right() <= 0.0) {
            self.obstacles.pop_front();
            let score = ctx.score.increment();
            debug!("Obstacle cleared, score {score}");
            ctx.events.push(GameEvent::Scored { score });
        }

        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::testbed::TestBed;

    /// Flyer sitting inside the gap of an obstacle with offset -200
    fn safe_body() -> Body {
        Body {
            x: FLYER_X,
            y: 250.0,
            radius: FLYER_RADIUS,
        }
    }

    #[test]
    fn test_hit_against_top_barrier() {
        let obstacle = Obstacle { x: 50.0, y: -140.0 };
        assert_eq!(obstacle.gap_top(), 260.0);
        assert_eq!(obstacle.gap_bottom(), 360.0);

        let body = Body {
            x: 50.0,
            y: 200.0,
            radius: 12.0,
        };
        assert!(obstacle.overlaps_horizontally(&body));
        assert!(obstacle.hits(&body));
    }

    #[test]
    fn test_gap_and_clear_air_are_safe() {
        let obstacle = Obstacle { x: 50.0, y: -140.0 };
        let in_gap = Body {
            x: 50.0,
            y: 310.0,
            radius: 12.0,
        };
        assert!(!obstacle.hits(&in_gap));

        let bottom = Body { y: 350.0, ..in_gap };
        assert!(obstacle.hits(&bottom));

        let far_left = Body { x: 0.0, ..bottom };
        assert!(!obstacle.hits(&far_left));
    }

    #[test]
    fn test_spawns_every_interval() {
        let mut bed = TestBed::new();
        let mut field = ObstacleField::new();
        for frame in 0..(SPAWN_INTERVAL + 2) {
            field.update(&mut bed.ctx(GamePhase::Playing, frame, safe_body()));
            let expected = (frame / SPAWN_INTERVAL + 1) as usize;
            assert_eq!(field.len(), expected, "frame {frame}");
        }
    }

    #[test]
    fn test_idle_unless_playing() {
        let mut bed = TestBed::new();
        let mut field = ObstacleField::new();
        field.push(Obstacle { x: 100.0, y: -200.0 });
        for phase in [GamePhase::Ready, GamePhase::Over] {
            assert_eq!(field.update(&mut bed.ctx(phase, 0, safe_body())), None);
        }
        assert_eq!(field.len(), 1);
        assert_eq!(field.iter().next().map(|o| o.x), Some(100.0));
    }

    #[test]
    fn test_spawn_offset_band() {
        let mut bed = TestBed::new();
        let mut field = ObstacleField::new();
        for _ in 0..500 {
            field.spawn(&mut bed.rng);
        }
        assert!(field.iter().all(|o| (-300.0..=-150.0).contains(&o.y)));
        assert!(field.iter().all(|o| o.x == VIEWPORT_WIDTH));
    }

    #[test]
    fn test_removed_once_fully_off_screen() {
        let mut bed = TestBed::new();
        let mut field = ObstacleField::new();

        // Spawned at 320 on frame 0 and moved in the same tick
        field.update(&mut bed.ctx(GamePhase::Playing, 0, safe_body()));
        field.obstacles[0].y = -200.0;
        for _ in 1..185 {
            field.update(&mut bed.ctx(GamePhase::Playing, 1, safe_body()));
        }
        assert_eq!(field.len(), 1);
        assert_eq!(field.obstacles[0].x, -50.0);
        assert_eq!(bed.score.value(), 0);

        field.update(&mut bed.ctx(GamePhase::Playing, 1, safe_body()));
        assert!(field.is_empty());
        assert_eq!(bed.score.value(), 1);
        assert_eq!(bed.events, vec![GameEvent::Scored { score: 1 }]);
    }

    #[test]
    fn test_removes_every_qualifying_obstacle_in_one_tick() {
        let mut bed = TestBed::new();
        let mut field = ObstacleField::new();
        field.push(Obstacle { x: -52.0, y: -200.0 });
        field.push(Obstacle { x: -51.0, y: -200.0 });
        field.push(Obstacle { x: -50.0, y: -200.0 });
        field.push(Obstacle { x: 100.0, y: -200.0 });

        field.update(&mut bed.ctx(GamePhase::Playing, 1, safe_body()));
        assert_eq!(field.len(), 1);
        assert_eq!(bed.score.value(), 3);
        assert_eq!(
            bed.events,
            vec![
                GameEvent::Scored { score: 1 },
                GameEvent::Scored { score: 2 },
                GameEvent::Scored { score: 3 },
            ]
        );
    }
}
