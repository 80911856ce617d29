//! Error types for the outpost-world crate.
//!
//! All rejected preconditions surface as typed errors rather than panics.
//! None of these are fatal: callers log them and continue, per the
//! fail-to-no-op policy of the simulation core.

use outpost_types::{CultivatePhase, ItemId, ItemStack, TaskId};

/// Errors that can occur in world-model operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The item stack failed basic validation (zero id or zero count).
    #[error("invalid item stack: item {item} count {count}")]
    InvalidStack {
        /// The offending item id.
        item: ItemId,
        /// The offending count.
        count: u32,
    },

    /// The item id has no entry in the item catalog.
    #[error("unknown item id: {0}")]
    UnknownItem(ItemId),

    /// The task id has no entry in the task catalog.
    #[error("unknown task id: {0}")]
    UnknownTask(TaskId),

    /// Adding the stack would exceed the inventory's total space.
    #[error(
        "inventory full: adding {stack:?} needs {needed} space but only {free} is free"
    )]
    CapacityExceeded {
        /// The stack that was being added.
        stack: ItemStack,
        /// Space the stack would consume.
        needed: u32,
        /// Space currently free.
        free: u32,
    },

    /// Removing more of an item than the inventory holds.
    #[error("insufficient items: wanted {requested} of {item} but only have {available}")]
    InsufficientItems {
        /// The item being removed.
        item: ItemId,
        /// The quantity requested.
        requested: u32,
        /// The quantity actually held.
        available: u32,
    },

    /// A space-accounting computation overflowed.
    #[error("arithmetic overflow in inventory accounting: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// A facility name was registered twice.
    #[error("duplicate facility name: {0}")]
    DuplicateName(String),

    /// No facility is registered under the given name.
    #[error("facility not found: {0}")]
    FacilityNotFound(String),

    /// A worker bind was attempted while a different worker holds the slot.
    #[error("facility {facility} is occupied by {occupant}")]
    Occupied {
        /// The facility that rejected the bind.
        facility: String,
        /// The worker currently bound.
        occupant: String,
    },

    /// A worker bind was attempted during a chamber phase that takes no work.
    #[error("chamber {chamber} cannot accept a worker in phase {phase:?}")]
    WrongPhase {
        /// The chamber that rejected the bind.
        chamber: String,
        /// The phase it was in.
        phase: CultivatePhase,
    },
}
