//! Simulation core for the Outpost colony game.
//!
//! Owns simulated time, the character needs/action machinery, and the
//! dispatch of externally-decided agent commands into the world model.
//! The crate is engine-agnostic: movement resolution and the decision
//! transport are request queues drained by whatever drives the loop.
//!
//! # Modules
//!
//! - [`clock`] -- Tick counting, game time, reference-counted pause
//! - [`character`] -- Needs simulation and the action state machine
//! - [`registry`] -- Name-keyed character collection
//! - [`sim`] -- The orchestrator: tick processing and command dispatch
//! - [`snapshot`] -- World-state serialization for the decision-maker
//! - [`config`] -- Initial world state loaded from JSON

pub mod character;
pub mod clock;
pub mod config;
pub mod error;
pub mod registry;
pub mod sim;
pub mod snapshot;

pub use character::Character;
pub use clock::{GameClock, TICKS_PER_MINUTE, TickEvents};
pub use config::InitGameData;
pub use error::CoreError;
pub use registry::CharacterRegistry;
pub use sim::{MoveRequest, Simulation};
pub use snapshot::{instruction_request, world_state};
