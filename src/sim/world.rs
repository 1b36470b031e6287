//! Game world and state machine
//!
//! `GameWorld` owns every piece of mutable game state. The driver feeds it
//! commands between ticks and calls [`GameWorld::tick`] once per frame.

use log::{debug, info, trace};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::flyer::{Body, Flyer};
use super::ground::GroundStrip;
use super::obstacles::ObstacleField;
use super::score::Score;
use crate::consts::VIEWPORT_WIDTH;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting for the first activate; flyer rests in place
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    Over,
}

/// Logical player actions, already decoupled from keys and pointers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the run or flap
    Activate,
    /// Return from game over to ready
    Restart,
}

/// What the flyer ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Ground,
    Obstacle,
}

/// Events for the outer layers (HUD, audio), emitted in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ready -> Playing
    Started,
    Flapped,
    /// An obstacle was cleared
    Scored { score: u32 },
    /// Playing -> Over
    GameOver { score: u32, cause: Collision },
    /// Over -> Ready
    Reset,
}

/// Per-tick view of the world handed to each updatable
pub struct TickContext<'a> {
    pub phase: GamePhase,
    /// Frame counter value for this tick
    pub frames: u64,
    /// Flyer collision body as of the latest update
    pub flyer: Body,
    pub rng: &'a mut Pcg32,
    pub score: &'a mut Score,
    pub events: &'a mut Vec<GameEvent>,
}

impl TickContext<'_> {
    /// Apply an update's collision result; only a playing run can end
    fn conclude(&mut self, hit: Option<Collision>) {
        let Some(cause) = hit else {
            return;
        };
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Over;
        let score = self.score.value();
        info!("Game over ({cause:?}) at frame {} with score {score}", self.frames);
        self.events.push(GameEvent::GameOver { score, cause });
    }
}

/// Something advanced once per tick
pub trait Updatable {
    /// Advance one tick, reporting a collision with the flyer if any
    fn update(&mut self, ctx: &mut TickContext<'_>) -> Option<Collision>;
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameWorld {
    pub phase: GamePhase,
    /// Ticks since the last reset
    pub frames: u64,
    pub flyer: Flyer,
    pub ground: GroundStrip,
    pub obstacles: ObstacleField,
    pub score: Score,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameWorld {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::Ready,
            frames: 0,
            flyer: Flyer::new(),
            ground: GroundStrip::new(VIEWPORT_WIDTH),
            obstacles: ObstacleField::new(),
            score: Score::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Apply a player command. Commands that have no transition from the
    /// current phase are ignored.
    pub fn apply(&mut self, command: Command) {
        match (self.phase, command) {
            (GamePhase::Ready, Command::Activate) => {
                info!("Run started");
                self.phase = GamePhase::Playing;
                self.events.push(GameEvent::Started);
                self.flap();
            }
            (GamePhase::Playing, Command::Activate) => self.flap(),
            (GamePhase::Over, Command::Restart) => self.reset(),
            (phase, command) => trace!("Ignoring {command:?} while {phase:?}"),
        }
    }

    fn flap(&mut self) {
        self.flyer.flap();
        self.events.push(GameEvent::Flapped);
    }

    fn reset(&mut self) {
        info!("Reset after {} frames, score {}", self.frames, self.score.value());
        self.flyer.reset();
        self.obstacles.clear();
        self.score.reset();
        self.frames = 0;
        self.phase = GamePhase::Ready;
        self.events.push(GameEvent::Reset);
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self) {
        let Self {
            phase,
            frames,
            flyer,
            ground,
            obstacles,
            score,
            rng,
            events,
        } = self;

        let mut ctx = TickContext {
            phase: *phase,
            frames: *frames,
            flyer: flyer.body(),
            rng,
            score,
            events,
        };

        let hit = flyer.update(&mut ctx);
        ctx.conclude(hit);
        ctx.flyer = flyer.body();

        let hit = ground.update(&mut ctx);
        ctx.conclude(hit);

        let hit = obstacles.update(&mut ctx);
        ctx.conclude(hit);

        if ctx.phase != *phase {
            debug!("Phase {:?} -> {:?}", *phase, ctx.phase);
        }
        *phase = ctx.phase;
        *frames += 1;
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
pub(crate) mod testbed {
    use super::*;

    /// Owns the borrowed parts of a `TickContext` for unit tests
    pub struct TestBed {
        pub rng: Pcg32,
        pub score: Score,
        pub events: Vec<GameEvent>,
    }

    impl TestBed {
        pub fn new() -> Self {
            Self {
                rng: Pcg32::seed_from_u64(7),
                score: Score::new(),
                events: Vec::new(),
            }
        }

        pub fn ctx(&mut self, phase: GamePhase, frames: u64, flyer: Body) -> TickContext<'_> {
            TickContext {
                phase,
                frames,
                flyer,
                rng: &mut self.rng,
                score: &mut self.score,
                events: &mut self.events,
            }
        }
    }
}
