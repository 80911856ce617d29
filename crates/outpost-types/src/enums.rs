//! Enumeration types for the Outpost simulation.

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

// ---------------------------------------------------------------------------
// Facility kinds
// ---------------------------------------------------------------------------

/// The kind of a fixed-location interactable facility.
///
/// The kind decides how a character's `Use` command is interpreted when the
/// character is standing at the facility's interaction point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FacilityKind {
    /// Cooking station; runs recipes that require a stove.
    Stove,
    /// Crafting station; runs recipes that require a workstation.
    WorkStation,
    /// Crop production chamber with an explicit plant/grow/harvest cycle.
    CultivateChamber,
    /// Bulk item storage with a large inventory.
    Storage,
    /// Sleeping spot; restores energy.
    Bed,
    /// Eating spot; consumes carried food.
    Table,
}

impl FacilityKind {
    /// Human-readable label used in snapshots and log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stove => "Stove",
            Self::WorkStation => "WorkStation",
            Self::CultivateChamber => "CultivateChamber",
            Self::Storage => "Storage",
            Self::Bed => "Bed",
            Self::Table => "Table",
        }
    }
}

// ---------------------------------------------------------------------------
// Character action states
// ---------------------------------------------------------------------------

/// The action state of a character.
///
/// Every transition funnels through the character's single state setter; the
/// non-Idle to Idle edge is the sole trigger for requesting the character's
/// next command from the decision server.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ActionState {
    /// No activity; the command loop re-entry state.
    #[default]
    Idle,
    /// Traveling toward a facility's interaction point.
    Moving,
    /// Blocked on an outstanding decision-server request.
    Thinking,
    /// Bound to a facility and contributing work progress.
    Working,
    /// Consuming a food item over its eat duration.
    Eating,
    /// Recovering energy in a bed.
    Sleeping,
    /// Counting down an explicit wait command.
    Waiting,
}

impl ActionState {
    /// Human-readable label used in snapshots and log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Moving => "Moving",
            Self::Thinking => "Thinking",
            Self::Working => "Working",
            Self::Eating => "Eating",
            Self::Sleeping => "Sleeping",
            Self::Waiting => "Waiting",
        }
    }
}

// ---------------------------------------------------------------------------
// Cultivation
// ---------------------------------------------------------------------------

/// A crop that can be grown in a cultivate chamber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CropKind {
    /// Cotton, the raw material for thread and cloth.
    Cotton,
    /// Corn, the raw ingredient for meals.
    Corn,
}

impl CropKind {
    /// The item produced by harvesting one grown unit of this crop.
    pub const fn product(self) -> ItemId {
        match self {
            Self::Cotton => ItemId(1001),
            Self::Corn => ItemId(1002),
        }
    }

    /// Human-readable label used in snapshots and log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cotton => "Cotton",
            Self::Corn => "Corn",
        }
    }
}

/// Phase of a cultivate chamber's production cycle.
///
/// Legal transitions:
///
/// ```text
/// Idle -> WaitingToPlant -> Planting -> Growing -> ReadyToHarvest
///      -> Harvesting -> (WaitingToPlant when a target crop is still set,
///                        otherwise Idle)
/// ```
///
/// Cancel forces any non-idle phase back to `Idle`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CultivatePhase {
    /// No crop selected; waiting for a player order.
    #[default]
    Idle,
    /// Crop selected; waiting for a worker to start planting.
    WaitingToPlant,
    /// A worker is planting (minute-driven work progress).
    Planting,
    /// Crops grow on their own (hour-driven growth progress).
    Growing,
    /// Fully grown; waiting for a worker to start harvesting.
    ReadyToHarvest,
    /// A worker is harvesting (minute-driven work progress).
    Harvesting,
}

impl CultivatePhase {
    /// Human-readable label used in snapshots and log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::WaitingToPlant => "WaitingToPlant",
            Self::Planting => "Planting",
            Self::Growing => "Growing",
            Self::ReadyToHarvest => "ReadyToHarvest",
            Self::Harvesting => "Harvesting",
        }
    }
}
