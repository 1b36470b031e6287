//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed timestep per tick, no wall-clock time
//! - Seeded RNG only
//! - No rendering, terminal or audio dependencies

pub mod flyer;
pub mod ground;
pub mod obstacles;
pub mod score;
pub mod world;

pub use flyer::{Body, Flyer};
pub use ground::GroundStrip;
pub use obstacles::{Obstacle, ObstacleField};
pub use score::Score;
pub use world::{Collision, Command, GameEvent, GamePhase, GameWorld, TickContext, Updatable};
