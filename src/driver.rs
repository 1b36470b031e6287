//! Clock and frame loop
//!
//! Each frame: apply queued input, advance the world one tick, publish its
//! events, redraw. The loop owns the terminal for its whole lifetime.

use std::io::{self, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, terminal,
};
use log::{debug, info};

use crate::assets::Sprites;
use crate::audio::Audio;
use crate::config::Config;
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::input::{self, Action};
use crate::render::{Canvas, TermScreen, render_world};
use crate::sim::{Command, GameWorld};
use crate::ui::{self, Hud};

/// Fixed frame pacing
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    frame: Duration,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
        }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Time left to sleep after a frame that took `elapsed`
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.frame.checked_sub(elapsed).filter(|d| !d.is_zero())
    }
}

/// Everything one game needs besides the terminal
pub struct Session {
    pub world: GameWorld,
    pub hud: Hud,
    sprites: Sprites,
    canvas: Canvas,
    audio: Audio,
}

impl Session {
    pub fn new(seed: u64, sprites: Sprites, audio: Audio) -> Self {
        Self {
            world: GameWorld::new(seed),
            hud: Hud::new(),
            sprites,
            canvas: Canvas::new(VIEWPORT_WIDTH as usize, VIEWPORT_HEIGHT as usize),
            audio,
        }
    }

    pub fn apply(&mut self, command: Command) {
        self.world.apply(command);
    }

    /// One tick of simulation followed by a full redraw
    pub fn advance(&mut self) -> &Canvas {
        self.world.tick();

        let events = self.world.drain_events();
        ui::publish(&events, &mut self.hud);
        for event in &events {
            self.audio.on_event(event);
        }

        render_world(&self.world, &self.sprites, &mut self.canvas);
        self.hud.draw(&mut self.canvas);
        &self.canvas
    }
}

fn enter(out: &mut impl Write) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        EnableMouseCapture,
    )
}

fn leave(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()
}

/// Take over the terminal and play until the player quits
pub fn run(config: &Config, sprites: Sprites) -> io::Result<()> {
    let seed = config.seed_or_random();
    info!("Seed {seed}, {} ticks per second", config.fps);
    let session = Session::new(seed, sprites, Audio::new(!config.mute));

    let mut out = stdout();
    enter(&mut out)?;
    let result = play(session, FrameClock::new(config.fps), &mut out);
    // Restore the terminal even when the loop failed
    let restored = leave(&mut out);
    result.and(restored)
}

fn play(mut session: Session, clock: FrameClock, out: &mut impl Write) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut screen = TermScreen::new(cols, rows);

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Event::Resize(c, r) = event {
                debug!("Resized to {c}x{r}");
                screen.resize(c, r);
                continue;
            }
            match input::route(&event, screen.letterbox(), &session.hud) {
                Some(Action::Quit) => {
                    info!("Quit at frame {}", session.world.frames);
                    return Ok(());
                }
                Some(Action::Game(command)) => session.apply(command),
                None => {}
            }
        }

        // Update and render
        let canvas = session.advance();
        screen.blit(canvas);
        screen.render(out)?;

        // Frame pacing
        if let Some(rest) = clock.remaining(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}
