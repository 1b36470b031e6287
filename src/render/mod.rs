//! Rendering
//!
//! The render pass draws the world onto any [`Surface`] in a fixed order:
//! background, obstacles, ground, flyer. It never touches game state.

pub mod canvas;
pub mod term;

pub use canvas::Canvas;
pub use term::TermScreen;

use std::f32::consts::PI;

use crate::assets::{Image, Sprites};
use crate::consts::*;
use crate::sim::{Flyer, GameWorld, GroundStrip, ObstacleField};

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    pub const fn darken(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }
}

/// Sky fill drawn under the background image
pub const SKY: Rgb = Rgb(0x70, 0xc5, 0xce);

// ── Surface ─────────────────────────────────────────────────────────────────

/// A 2D drawing surface in logical canvas coordinates.
///
/// Transform calls compose onto the current transform and apply to every
/// later draw, until the matching `restore`.
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);
    /// Draw `image` stretched to the `w` x `h` rectangle at (`x`, `y`)
    fn draw_image(&mut self, image: &Image, x: f32, y: f32, w: f32, h: f32);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn rotate(&mut self, radians: f32);
}

/// Something that knows how to draw itself
pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface, sprites: &Sprites);
}

impl Drawable for ObstacleField {
    fn draw(&self, surface: &mut dyn Surface, sprites: &Sprites) {
        let (w, h) = (OBSTACLE_WIDTH, OBSTACLE_HEIGHT);
        for obstacle in self.iter() {
            // One sprite serves both barriers; the top one is flipped about its center
            surface.save();
            surface.translate(obstacle.x + w / 2.0, obstacle.y + h / 2.0);
            surface.rotate(PI);
            surface.draw_image(&sprites.obstacle, -w / 2.0, -h / 2.0, w, h);
            surface.restore();

            surface.draw_image(&sprites.obstacle, obstacle.x, obstacle.gap_bottom(), w, h);
        }
    }
}

impl Drawable for GroundStrip {
    fn draw(&self, surface: &mut dyn Surface, sprites: &Sprites) {
        let y = VIEWPORT_HEIGHT - GROUND_HEIGHT;
        let x = self.offset();
        surface.draw_image(&sprites.ground, x, y, VIEWPORT_WIDTH, GROUND_HEIGHT);
        surface.draw_image(
            &sprites.ground,
            x + VIEWPORT_WIDTH,
            y,
            VIEWPORT_WIDTH,
            GROUND_HEIGHT,
        );
    }
}

impl Drawable for Flyer {
    fn draw(&self, surface: &mut dyn Surface, sprites: &Sprites) {
        let (w, h) = (FLYER_WIDTH, FLYER_HEIGHT);
        surface.save();
        surface.translate(FLYER_X, self.y);
        surface.rotate(self.rotation);
        surface.draw_image(&sprites.flyer, -w / 2.0, -h / 2.0, w, h);
        surface.restore();
    }
}

/// Draw one frame of the world
pub fn render_world(world: &GameWorld, sprites: &Sprites, surface: &mut dyn Surface) {
    surface.fill_rect(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT, SKY);
    surface.draw_image(&sprites.background, 0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT);

    let layers: [&dyn Drawable; 3] = [&world.obstacles, &world.ground, &world.flyer];
    for layer in layers {
        layer.draw(surface, sprites);
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// Draw call log, images identified by size
    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Fill { x: f32, y: f32, w: f32, h: f32, color: Rgb },
        Image { size: (usize, usize), x: f32, y: f32, w: f32, h: f32 },
        Save,
        Restore,
        Translate(f32, f32),
        Rotate(f32),
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
            self.ops.push(Op::Fill { x, y, w, h, color });
        }

        fn draw_image(&mut self, image: &Image, x: f32, y: f32, w: f32, h: f32) {
            let size = (image.width(), image.height());
            self.ops.push(Op::Image { size, x, y, w, h });
        }

        fn save(&mut self) {
            self.ops.push(Op::Save);
        }

        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }

        fn translate(&mut self, dx: f32, dy: f32) {
            self.ops.push(Op::Translate(dx, dy));
        }

        fn rotate(&mut self, radians: f32) {
            self.ops.push(Op::Rotate(radians));
        }
    }
}
