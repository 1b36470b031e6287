//! Flappy Term - a single-screen arcade flyer for the terminal
//!
//! Core modules:
//! - `sim`: Deterministic fixed-timestep simulation (physics, obstacles, scoring, state machine)
//! - `render`: Drawing surface abstraction, software canvas and terminal presenter
//! - `assets`: Image provider and the load barrier gating the loop
//! - `ui`: Score and overlay sinks, terminal HUD
//! - `audio`: Sound effects driven by game events
//! - `input`: Maps terminal key/mouse events to game actions
//! - `driver`: The frame loop

pub mod assets;
pub mod audio;
pub mod config;
pub mod driver;
pub mod input;
pub mod logging;
pub mod render;
pub mod sim;
pub mod ui;

pub use config::Config;
pub use sim::{Command, GameEvent, GamePhase, GameWorld};

/// Game configuration constants, all in logical canvas pixels and ticks
pub mod consts {
    /// Logical canvas size; physics is defined in this space
    pub const VIEWPORT_WIDTH: f32 = 320.0;
    pub const VIEWPORT_HEIGHT: f32 = 480.0;

    pub const DEGREE: f32 = std::f32::consts::PI / 180.0;

    /// Flyer
    pub const FLYER_X: f32 = 50.0;
    pub const FLYER_REST_Y: f32 = 150.0;
    pub const FLYER_WIDTH: f32 = 34.0;
    pub const FLYER_HEIGHT: f32 = 24.0;
    /// Circular collision boundary
    pub const FLYER_RADIUS: f32 = 12.0;
    /// Downward acceleration, px/tick²
    pub const GRAVITY: f32 = 0.25;
    /// Upward kick applied by a flap, px/tick
    pub const IMPULSE: f32 = 4.6;
    pub const NOSE_UP_ROTATION: f32 = -25.0 * DEGREE;
    pub const NOSE_DOWN_ROTATION: f32 = 90.0 * DEGREE;
    pub const ROTATION_STEP: f32 = 5.0 * DEGREE;

    /// Ground strip
    pub const GROUND_HEIGHT: f32 = 112.0;
    pub const GROUND_SPEED: f32 = 2.0;

    /// Obstacles
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const OBSTACLE_HEIGHT: f32 = 400.0;
    pub const OBSTACLE_GAP: f32 = 100.0;
    pub const OBSTACLE_SPEED: f32 = 2.0;
    /// Spawn offsets are `OBSTACLE_BASE_OFFSET * (r + 1)` for r in [0, 1)
    pub const OBSTACLE_BASE_OFFSET: f32 = -150.0;
    pub const SPAWN_INTERVAL: u64 = 120;

    /// Top of the ground strip, where the flyer collides
    pub const GROUND_PLANE: f32 = VIEWPORT_HEIGHT - GROUND_HEIGHT;
}
