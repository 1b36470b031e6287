//! Terminal presenter
//!
//! Scales the logical canvas into the terminal, letterboxed, and prints it
//! two pixels per cell with the upper half block character.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};

use super::{Canvas, Rgb};

const LETTERBOX: Rgb = Rgb(20, 24, 28);

/// Where the canvas landed on the terminal pixel grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    /// Terminal pixels per canvas pixel
    pub scale: f32,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Letterbox {
    pub fn fit(canvas_w: usize, canvas_h: usize, pw: usize, ph: usize) -> Option<Self> {
        if canvas_w == 0 || canvas_h == 0 || pw == 0 || ph == 0 {
            return None;
        }
        let scale = (pw as f32 / canvas_w as f32).min(ph as f32 / canvas_h as f32);
        let w = canvas_w as f32 * scale;
        let h = canvas_h as f32 * scale;
        Some(Self {
            scale,
            x: ((pw as f32 - w) / 2.0).floor(),
            y: ((ph as f32 - h) / 2.0).floor(),
            w,
            h,
        })
    }

    /// Map a terminal cell to logical canvas coordinates, if it is on the canvas
    pub fn cell_to_canvas(&self, col: u16, row: u16) -> Option<(f32, f32)> {
        let px = col as f32 + 0.5;
        // A cell covers pixel rows 2*row and 2*row+1
        let py = row as f32 * 2.0 + 1.0;
        let cx = (px - self.x) / self.scale;
        let cy = (py - self.y) / self.scale;
        let inside = (0.0..self.w / self.scale).contains(&cx) && (0.0..self.h / self.scale).contains(&cy);
        inside.then_some((cx, cy))
    }
}

// ── Pixel buffer with half-block rendering ──────────────────────────────────

pub struct TermScreen {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
    letterbox: Option<Letterbox>,
}

impl TermScreen {
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut screen = Self {
            w: 0,
            h: 0,
            px: Vec::new(),
            letterbox: None,
        };
        screen.resize(cols, rows);
        screen
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.w = cols as usize;
        self.h = rows as usize * 2;
        self.px.clear();
        self.px.resize(self.w * self.h, LETTERBOX);
        self.letterbox = None;
    }

    pub fn letterbox(&self) -> Option<Letterbox> {
        self.letterbox
    }

    fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    /// Downsample the canvas (nearest pixel) into the letterboxed area
    pub fn blit(&mut self, canvas: &Canvas) {
        self.letterbox = Letterbox::fit(canvas.width(), canvas.height(), self.w, self.h);
        self.px.fill(LETTERBOX);
        let Some(lb) = self.letterbox else {
            return;
        };

        let x0 = lb.x as usize;
        let y0 = lb.y as usize;
        let x1 = ((lb.x + lb.w) as usize).min(self.w);
        let y1 = ((lb.y + lb.h) as usize).min(self.h);
        for y in y0..y1 {
            let cy = (((y - y0) as f32 + 0.5) / lb.scale) as usize;
            let cy = cy.min(canvas.height() - 1);
            for x in x0..x1 {
                let cx = (((x - x0) as f32 + 0.5) / lb.scale) as usize;
                let cx = cx.min(canvas.width() - 1);
                self.px[y * self.w + x] = canvas.get(cx, cy);
            }
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        if rows == 0 || self.w == 0 {
            return out.flush();
        }
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(color(top)))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(color(top)))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(color(bot)))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row < rows - 1 {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

fn color(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}
