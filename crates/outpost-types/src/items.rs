//! Item stacks and the static item/recipe definitions.
//!
//! [`ItemStack`] is the immutable value passed through every inventory
//! mutation. [`ItemDef`] and [`TaskDef`] are catalog entries loaded once at
//! startup and read-only thereafter; their serde field names match the
//! external JSON data files.

use serde::{Deserialize, Serialize};

use crate::enums::FacilityKind;
use crate::ids::{ItemId, TaskId};

// ---------------------------------------------------------------------------
// ItemStack
// ---------------------------------------------------------------------------

/// A quantity of a single item kind.
///
/// A stack is valid iff the item id is non-zero and the count is positive.
/// Invalid stacks are rejected by every inventory operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// The item kind.
    #[serde(rename = "ItemID")]
    pub item: ItemId,
    /// How many units, always positive in a valid stack.
    #[serde(rename = "Count")]
    pub count: u32,
}

impl ItemStack {
    /// Create a stack of `count` units of `item`.
    pub const fn new(item: ItemId, count: u32) -> Self {
        Self { item, count }
    }

    /// Whether this stack can participate in inventory operations.
    pub const fn is_valid(&self) -> bool {
        self.item.is_some() && self.count > 0
    }
}

// ---------------------------------------------------------------------------
// Catalog definitions
// ---------------------------------------------------------------------------

/// Static definition of an item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    /// Catalog id.
    #[serde(rename = "ItemID")]
    pub id: ItemId,
    /// Internal name (stable, English).
    #[serde(rename = "ItemName")]
    pub name: String,
    /// Name shown to players and the decision server.
    #[serde(rename = "DisplayName")]
    pub display_name: String,
    /// Inventory space consumed per unit.
    #[serde(rename = "SpaceCost")]
    pub space_cost: u32,
    /// Whether the item can be eaten at a table.
    #[serde(rename = "IsFood", default)]
    pub is_food: bool,
    /// Total hunger restored when eaten (only meaningful for food).
    #[serde(rename = "NutritionValue", default)]
    pub nutrition: f32,
    /// Simulated minutes spent eating one unit; 0 means instantaneous.
    #[serde(rename = "EatDuration", default)]
    pub eat_duration_minutes: u32,
}

/// Static definition of a recipe (production task).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDef {
    /// Catalog id.
    #[serde(rename = "TaskID")]
    pub id: TaskId,
    /// Internal name (stable, English).
    #[serde(rename = "TaskName")]
    pub name: String,
    /// The item produced, one unit per completed run.
    #[serde(rename = "ProductID")]
    pub product: ItemId,
    /// Qualifying work minutes required to complete one run.
    #[serde(rename = "TaskWorkload")]
    pub workload: u32,
    /// Ingredient stacks consumed per run.
    #[serde(rename = "Ingredients")]
    pub ingredients: Vec<ItemStack>,
    /// The facility kind able to run this recipe.
    #[serde(rename = "RequiredFacility")]
    pub required_facility: FacilityKind,
}

// ---------------------------------------------------------------------------
// Character attributes
// ---------------------------------------------------------------------------

/// Mutable vital stats of a character.
///
/// Hunger and energy are clamped to `[0, max]` on every update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    /// Current satiety; 0 means starving.
    #[serde(rename = "Hunger")]
    pub hunger: f32,
    /// Upper bound for hunger.
    #[serde(rename = "MaxHunger")]
    pub max_hunger: f32,
    /// Current energy; 0 means exhausted.
    #[serde(rename = "Energy")]
    pub energy: f32,
    /// Upper bound for energy.
    #[serde(rename = "MaxEnergy")]
    pub max_energy: f32,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            hunger: 100.0,
            max_hunger: 100.0,
            energy: 100.0,
            max_energy: 100.0,
        }
    }
}

/// Skill gates deciding which facilities a character may operate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSkills {
    /// May operate stoves.
    #[serde(rename = "CanCook", default)]
    pub can_cook: bool,
    /// May operate cultivate chambers.
    #[serde(rename = "CanFarm", default)]
    pub can_farm: bool,
    /// May operate workstations.
    #[serde(rename = "CanCraft", default)]
    pub can_craft: bool,
}
