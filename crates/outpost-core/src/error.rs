//! Error types for the outpost-core crate.
//!
//! Command failures are rejected preconditions: logged, surfaced to the
//! caller, and never fatal. The simulation degrades every error to a
//! no-op plus a diagnostic.

use outpost_types::FacilityKind;
use outpost_world::WorldError;

/// Errors that can occur in the simulation core.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A character name was registered twice.
    #[error("duplicate character name: {0}")]
    DuplicateCharacter(String),

    /// No character is registered under the given name.
    #[error("character not found: {0}")]
    CharacterNotFound(String),

    /// A command needed the character to be standing at a facility.
    #[error("character {character} is not at any facility")]
    NotAtFacility {
        /// The character executing the command.
        character: String,
    },

    /// The character lacks the skill the facility requires.
    #[error("character {character} lacks the skill to use a {facility:?}")]
    MissingSkill {
        /// The character executing the command.
        character: String,
        /// The facility kind that was refused.
        facility: FacilityKind,
    },

    /// A facility of this kind cannot be used directly.
    #[error("facility kind {0:?} has no use action")]
    UnusableFacility(FacilityKind),

    /// An eat attempt found no food in the carried inventory.
    #[error("character {character} is carrying no food")]
    NoFoodCarried {
        /// The character executing the command.
        character: String,
    },

    /// A sleep attempt while energy is already at its maximum.
    #[error("character {character} has full energy, sleep refused")]
    EnergyAlreadyFull {
        /// The character executing the command.
        character: String,
    },

    /// The command's parameters failed validation.
    #[error("invalid command for {character}: {reason}")]
    InvalidCommand {
        /// The character the command addressed.
        character: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A world-model operation failed.
    #[error(transparent)]
    World(#[from] WorldError),
}
