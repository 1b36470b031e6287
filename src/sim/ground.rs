//! Scrolling ground strip (cosmetic)

use super::world::{Collision, GamePhase, TickContext, Updatable};
use crate::consts::GROUND_SPEED;

#[derive(Debug, Clone, PartialEq)]
pub struct GroundStrip {
    /// Distance scrolled, wrapped into [0, wrap)
    scrolled: f32,
    /// Half the viewport width
    wrap: f32,
}

impl GroundStrip {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            scrolled: 0.0,
            wrap: viewport_width / 2.0,
        }
    }

    /// Horizontal draw offset of the first tile, in (-wrap, 0]
    pub fn offset(&self) -> f32 {
        -self.scrolled
    }
}

impl Updatable for GroundStrip {
    fn update(&mut self, ctx: &mut TickContext<'_>) -> Option<Collision> {
        if ctx.phase != GamePhase::Playing {
            return None;
        }
        self.scrolled = if self.wrap > 0.0 {
            (self.scrolled + GROUND_SPEED).rem_euclid(self.wrap)
        } else {
            0.0
        };
        None
    }
}
