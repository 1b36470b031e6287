//! Software canvas at the logical game resolution
//!
//! Keeps a transform stack like an HTML canvas context. Every draw is
//! rasterised by mapping destination pixel centers back through the inverse
//! transform, so rotated sprites come out without holes.

use glam::{Affine2, Vec2};

use super::{Rgb, SKY, Surface};
use crate::assets::Image;

pub struct Canvas {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
    transform: Affine2,
    saved: Vec<Affine2>,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![SKY; w * h],
            transform: Affine2::IDENTITY,
            saved: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn set(&mut self, x: usize, y: usize, c: Rgb) {
        if x < self.w && y < self.h {
            self.px[y * self.w + x] = c;
        }
    }

    /// Fill the transformed rectangle, asking `shade` for the color at each
    /// normalized (u, v) in [0, 1). `None` leaves the pixel untouched.
    fn raster(&mut self, x: f32, y: f32, w: f32, h: f32, shade: impl Fn(f32, f32) -> Option<Rgb>) {
        if w <= 0.0 || h <= 0.0 || self.w == 0 || self.h == 0 {
            return;
        }

        let corners = [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x, y + h),
            Vec2::new(x + w, y + h),
        ]
        .map(|p| self.transform.transform_point2(p));
        let (mut min, mut max) = (corners[0], corners[0]);
        for c in &corners[1..] {
            min = min.min(*c);
            max = max.max(*c);
        }

        let x0 = min.x.floor().max(0.0) as usize;
        let y0 = min.y.floor().max(0.0) as usize;
        let x1 = (max.x.ceil().max(0.0) as usize).min(self.w);
        let y1 = (max.y.ceil().max(0.0) as usize).min(self.h);

        let inverse = self.transform.inverse();
        for py in y0..y1 {
            for px in x0..x1 {
                let local = inverse.transform_point2(Vec2::new(px as f32 + 0.5, py as f32 + 0.5));
                let u = (local.x - x) / w;
                let v = (local.y - y) / h;
                if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    continue;
                }
                if let Some(c) = shade(u, v) {
                    self.set(px, py, c);
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.raster(x, y, w, h, |_, _| Some(color));
    }

    fn draw_image(&mut self, image: &Image, x: f32, y: f32, w: f32, h: f32) {
        if image.width() == 0 || image.height() == 0 {
            return;
        }
        let (iw, ih) = (image.width(), image.height());
        self.raster(x, y, w, h, |u, v| {
            let ix = ((u * iw as f32) as usize).min(iw - 1);
            let iy = ((v * ih as f32) as usize).min(ih - 1);
            image.get(ix, iy)
        });
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform * Affine2::from_translation(Vec2::new(dx, dy));
    }

    fn rotate(&mut self, radians: f32) {
        self.transform = self.transform * Affine2::from_angle(radians);
    }
}
