//! Initial world state loaded from a JSON document.
//!
//! The config seeds a freshly built world: storage contents, standing
//! production orders, crops already selected for chambers, and character
//! stat/skill/bed assignments. Entries are keyed by in-world actor names;
//! a name that does not match the registry is logged and skipped rather
//! than failing the whole load, so a stale config degrades gracefully.

use std::collections::BTreeMap;

use outpost_types::{CharacterSkills, CharacterStats, CropKind, ItemStack, TaskId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::sim::Simulation;

/// One standing-order entry in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    /// The recipe to queue.
    #[serde(rename = "TaskID")]
    pub task: TaskId,
    /// How many completions to order.
    #[serde(rename = "Count")]
    pub count: u32,
}

/// Per-character assignments in the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSetup {
    /// The registry name this entry applies to.
    #[serde(rename = "Name")]
    pub name: String,
    /// Starting stats; omit the whole object to keep the defaults.
    #[serde(rename = "Stats", default)]
    pub stats: Option<CharacterStats>,
    /// Skill flags.
    #[serde(rename = "Skills", default)]
    pub skills: Option<CharacterSkills>,
    /// The bed assigned to this character.
    #[serde(rename = "Bed", default)]
    pub bed: Option<String>,
    /// Items the character starts out carrying.
    #[serde(rename = "Carried", default)]
    pub carried: Vec<ItemStack>,
}

/// The initial-state document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitGameData {
    /// Facility name -> stacks to seed into its inventory.
    #[serde(rename = "StorageContents", default)]
    pub storage_contents: BTreeMap<String, Vec<ItemStack>>,
    /// Facility name -> standing orders to queue.
    #[serde(rename = "FacilityOrders", default)]
    pub facility_orders: BTreeMap<String, Vec<OrderEntry>>,
    /// Chamber name -> crop to select.
    #[serde(rename = "PlantedCrops", default)]
    pub planted_crops: BTreeMap<String, CropKind>,
    /// Character assignments.
    #[serde(rename = "Characters", default)]
    pub characters: Vec<CharacterSetup>,
}

impl InitGameData {
    /// Parse a config document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apply the config to a built world.
    ///
    /// Every entry is applied independently; a missing actor or a
    /// rejected item seed is logged and skipped.
    pub fn apply(&self, sim: &mut Simulation) {
        self.apply_storage(sim);
        self.apply_orders(sim);
        self.apply_crops(sim);
        self.apply_characters(sim);
        info!("initial game data applied");
    }

    fn apply_storage(&self, sim: &mut Simulation) {
        // Cloned so the catalog outlives the facility borrows below.
        let items = sim.items().clone();
        for (name, stacks) in &self.storage_contents {
            let Some(facility) = sim.facilities_mut().get_mut(name) else {
                warn!(facility = %name, "storage contents for unknown facility skipped");
                continue;
            };
            let Some(inventory) = facility.inventory_mut() else {
                warn!(facility = %name, "storage contents for a facility with no inventory");
                continue;
            };
            for stack in stacks {
                if let Err(err) = inventory.add(*stack, &items) {
                    warn!(facility = %name, ?stack, %err, "seed stack rejected");
                }
            }
        }
    }

    fn apply_orders(&self, sim: &mut Simulation) {
        for (name, orders) in &self.facility_orders {
            for order in orders {
                if let Err(err) = sim.add_order(name, order.task, order.count) {
                    warn!(facility = %name, task = %order.task, %err, "order skipped");
                }
            }
        }
    }

    fn apply_crops(&self, sim: &mut Simulation) {
        for (name, crop) in &self.planted_crops {
            if let Err(err) = sim.select_crop(name, *crop) {
                warn!(chamber = %name, ?crop, %err, "crop selection skipped");
            }
        }
    }

    fn apply_characters(&self, sim: &mut Simulation) {
        let items = sim.items().clone();
        for setup in &self.characters {
            let Some(character) = sim.characters_mut().get_mut(&setup.name) else {
                warn!(character = %setup.name, "setup for unknown character skipped");
                continue;
            };
            if let Some(stats) = setup.stats {
                *character.stats_mut() = stats;
            }
            if let Some(skills) = setup.skills {
                character.set_skills(skills);
            }
            if let Some(bed) = &setup.bed {
                character.assign_bed(bed.clone());
            }
            for stack in &setup.carried {
                if let Err(err) = character.inventory_mut().add(*stack, &items) {
                    warn!(character = %setup.name, ?stack, %err, "carried stack rejected");
                }
            }
        }
    }
}
