//! Shared type definitions for the Outpost simulation.
//!
//! This crate is the single source of truth for the types exchanged between
//! the world model, the simulation core, and the engine binary. It carries
//! no behavior beyond validation and formatting helpers.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe numeric wrappers for catalog identifiers
//! - [`enums`] -- Enumeration types (facility kinds, action states, phases)
//! - [`items`] -- Item stacks and the static item/recipe definitions
//! - [`command`] -- The agent-command wire type consumed from the decision server

pub mod command;
pub mod enums;
pub mod ids;
pub mod items;

// Re-export all public types at crate root for convenience.
pub use command::{AgentCommand, CommandType};
pub use enums::{ActionState, CropKind, CultivatePhase, FacilityKind};
pub use ids::{ItemId, TaskId};
pub use items::{CharacterSkills, CharacterStats, ItemDef, ItemStack, TaskDef};
