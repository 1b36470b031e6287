//! Score display, overlays and the terminal HUD
//!
//! The simulation never talks to the UI directly. The driver hands each
//! batch of [`GameEvent`]s to [`publish`], which calls into the sinks.

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::render::{Rgb, Surface};
use crate::sim::GameEvent;

/// Receives the score whenever it changes
pub trait ScoreSink {
    fn show_score(&mut self, score: u32);
    /// Score of the run that just ended
    fn show_final_score(&mut self, score: u32);
}

/// The two overlays toggled by phase changes
pub trait OverlaySink {
    fn set_ready_visible(&mut self, visible: bool);
    fn set_game_over_visible(&mut self, visible: bool);
}

/// Forward game events to the UI sinks
pub fn publish(events: &[GameEvent], sink: &mut (impl ScoreSink + OverlaySink)) {
    for event in events {
        match *event {
            GameEvent::Started => sink.set_ready_visible(false),
            GameEvent::Flapped => {}
            GameEvent::Scored { score } => sink.show_score(score),
            GameEvent::GameOver { score, .. } => {
                sink.show_final_score(score);
                sink.set_game_over_visible(true);
            }
            GameEvent::Reset => {
                sink.show_score(0);
                sink.set_game_over_visible(false);
                sink.set_ready_visible(true);
            }
        }
    }
}

// ── 3x5 bitmap glyphs ───────────────────────────────────────────────────────

#[rustfmt::skip]
static DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
static LETTERS: [(char, [u8; 15]); 8] = [
    ('A', [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1]),
    ('D', [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,1,0]),
    ('E', [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1]),
    ('G', [0,1,1, 1,0,0, 1,0,1, 1,0,1, 0,1,1]),
    ('M', [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1]),
    ('R', [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1]),
    ('V', [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0]),
    ('Y', [1,0,1, 1,0,1, 0,1,0, 0,1,0, 0,1,0]),
];

fn glyph(ch: char) -> Option<&'static [u8; 15]> {
    match ch {
        'O' => Some(&DIGITS[0]),
        '0'..='9' => Some(&DIGITS[ch as usize - '0' as usize]),
        _ => LETTERS.iter().find(|(c, _)| *c == ch).map(|(_, g)| g),
    }
}

const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);
const GOLD: Rgb = Rgb(245, 200, 66);
const PANEL: Rgb = Rgb(220, 195, 120);
const PANEL_EDGE: Rgb = Rgb(210, 185, 110);
const BUTTON: Rgb = Rgb(225, 75, 35);

/// Centered text, each glyph pixel a `cell` x `cell` block
fn draw_text(surface: &mut dyn Surface, text: &str, cx: f32, y: f32, cell: f32, fg: Rgb) {
    let n = text.chars().count() as f32;
    let total_w = n * 4.0 * cell - cell; // 3 cells per glyph + 1 spacing
    let start_x = cx - total_w / 2.0;
    for (color, shift) in [(SHADOW, cell / 2.0), (fg, 0.0)] {
        for (i, ch) in text.chars().enumerate() {
            let Some(glyph) = glyph(ch) else {
                continue;
            };
            let gx = start_x + i as f32 * 4.0 * cell;
            for row in 0..5 {
                for col in 0..3 {
                    if glyph[row * 3 + col] == 1 {
                        surface.fill_rect(
                            gx + col as f32 * cell + shift,
                            y + row as f32 * cell + shift,
                            cell,
                            cell,
                            color,
                        );
                    }
                }
            }
        }
    }
}

// ── HUD ─────────────────────────────────────────────────────────────────────

/// Restart button on the game-over panel, logical coordinates (x, y, w, h)
pub const RESTART_BUTTON: (f32, f32, f32, f32) = (110.0, 272.0, 100.0, 40.0);

const PANEL_RECT: (f32, f32, f32, f32) = (60.0, 168.0, 200.0, 156.0);

/// Score readout and overlays drawn over the game
#[derive(Debug, Clone)]
pub struct Hud {
    score: u32,
    final_score: u32,
    best: u32,
    ready_visible: bool,
    game_over_visible: bool,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score: 0,
            final_score: 0,
            best: 0,
            ready_visible: true,
            game_over_visible: false,
        }
    }
}

impl ScoreSink for Hud {
    fn show_score(&mut self, score: u32) {
        self.score = score;
    }

    fn show_final_score(&mut self, score: u32) {
        self.final_score = score;
        self.best = self.best.max(score);
    }
}

impl OverlaySink for Hud {
    fn set_ready_visible(&mut self, visible: bool) {
        self.ready_visible = visible;
    }

    fn set_game_over_visible(&mut self, visible: bool) {
        self.game_over_visible = visible;
    }
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn ready_visible(&self) -> bool {
        self.ready_visible
    }

    pub fn game_over_visible(&self) -> bool {
        self.game_over_visible
    }

    /// True when a pointer at logical (x, y) presses the visible restart button
    pub fn restart_button_hit(&self, x: f32, y: f32) -> bool {
        let (bx, by, bw, bh) = RESTART_BUTTON;
        self.game_over_visible && x >= bx && x < bx + bw && y >= by && y < by + bh
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let cx = VIEWPORT_WIDTH / 2.0;
        if !self.game_over_visible {
            draw_text(surface, &self.score.to_string(), cx, 24.0, 8.0, WHITE);
        }
        if self.ready_visible {
            self.draw_ready(surface);
        }
        if self.game_over_visible {
            self.draw_game_over(surface);
        }
    }

    fn draw_ready(&self, surface: &mut dyn Surface) {
        let cx = VIEWPORT_WIDTH / 2.0;
        draw_text(surface, "READY", cx, VIEWPORT_HEIGHT * 0.25, 10.0, GOLD);

        // Upward chevron hinting at the flap
        let tip_y = VIEWPORT_HEIGHT * 0.25 + 90.0;
        for step in 0..4 {
            let s = step as f32;
            surface.fill_rect(cx - 6.0 - s * 8.0, tip_y + s * 8.0, 8.0, 8.0, WHITE);
            surface.fill_rect(cx - 2.0 + s * 8.0, tip_y + s * 8.0, 8.0, 8.0, WHITE);
        }
    }

    fn draw_game_over(&self, surface: &mut dyn Surface) {
        let cx = VIEWPORT_WIDTH / 2.0;
        draw_text(surface, "GAME OVER", cx, 100.0, 6.0, WHITE);

        let (px, py, pw, ph) = PANEL_RECT;
        surface.fill_rect(px - 4.0, py - 4.0, pw + 8.0, ph + 8.0, SHADOW);
        surface.fill_rect(px, py, pw, ph, PANEL_EDGE);
        surface.fill_rect(px + 4.0, py + 4.0, pw - 8.0, ph - 8.0, PANEL);

        draw_text(surface, &self.final_score.to_string(), cx, py + 16.0, 8.0, WHITE);
        draw_text(surface, &self.best.to_string(), cx, py + 64.0, 6.0, GOLD);

        let (bx, by, bw, bh) = RESTART_BUTTON;
        surface.fill_rect(bx, by, bw, bh, SHADOW);
        surface.fill_rect(bx + 2.0, by + 2.0, bw - 4.0, bh - 4.0, BUTTON);
        // Play triangle
        let tx = bx + bw / 2.0 - 8.0;
        for row in 0..12 {
            let r = row as f32;
            let len = 2.0 * (6.0 - (r - 5.5).abs());
            surface.fill_rect(tx, by + 8.0 + r * 2.0, len * 1.5, 2.0, WHITE);
        }
    }
}
