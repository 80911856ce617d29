//! The facility sum type and name-keyed registry.
//!
//! Every fixed interactable in the colony is a [`Facility`]. The two
//! production variants carry their own state machines; storage, beds and
//! tables are passive and exist so characters have somewhere to put
//! things, sleep and eat. Facilities are addressed by unique name, the
//! same key the command layer uses for targets.

use std::collections::BTreeMap;

use outpost_types::FacilityKind;
use tracing::warn;

use crate::chamber::CultivateChamber;
use crate::error::WorldError;
use crate::inventory::Inventory;
use crate::workstation::ProductionFacility;

/// Storage depot capacity.
const STORAGE_SPACE: u32 = 200;

/// Any fixed interactable in the colony.
#[derive(Debug, Clone)]
pub enum Facility {
    /// Stove or workstation with a production cycle.
    Production(ProductionFacility),
    /// Cultivation chamber with its crop cycle.
    Chamber(CultivateChamber),
    /// Passive bulk storage.
    Storage {
        /// Registry name.
        name: String,
        /// The depot's contents.
        inventory: Inventory,
    },
    /// A bed; characters sleep here.
    Bed {
        /// Registry name.
        name: String,
    },
    /// A table; characters eat here.
    Table {
        /// Registry name.
        name: String,
    },
}

impl Facility {
    /// Create a storage depot with the standard capacity.
    pub fn storage(name: impl Into<String>) -> Self {
        Self::Storage {
            name: name.into(),
            inventory: Inventory::new(STORAGE_SPACE),
        }
    }

    /// Create a bed.
    pub fn bed(name: impl Into<String>) -> Self {
        Self::Bed { name: name.into() }
    }

    /// Create a table.
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table { name: name.into() }
    }

    /// Registry name.
    pub fn name(&self) -> &str {
        match self {
            Self::Production(facility) => facility.name(),
            Self::Chamber(chamber) => chamber.name(),
            Self::Storage { name, .. } | Self::Bed { name } | Self::Table { name } => name,
        }
    }

    /// The facility's kind.
    pub const fn kind(&self) -> FacilityKind {
        match self {
            Self::Production(facility) => facility.kind(),
            Self::Chamber(_) => FacilityKind::CultivateChamber,
            Self::Storage { .. } => FacilityKind::Storage,
            Self::Bed { .. } => FacilityKind::Bed,
            Self::Table { .. } => FacilityKind::Table,
        }
    }

    /// The facility's inventory, if it has one. Beds and tables hold
    /// nothing.
    pub const fn inventory(&self) -> Option<&Inventory> {
        match self {
            Self::Production(facility) => Some(facility.inventory()),
            Self::Chamber(chamber) => Some(chamber.inventory()),
            Self::Storage { inventory, .. } => Some(inventory),
            Self::Bed { .. } | Self::Table { .. } => None,
        }
    }

    /// Mutable access to the facility's inventory, if it has one.
    pub const fn inventory_mut(&mut self) -> Option<&mut Inventory> {
        match self {
            Self::Production(facility) => Some(facility.inventory_mut()),
            Self::Chamber(chamber) => Some(chamber.inventory_mut()),
            Self::Storage { inventory, .. } => Some(inventory),
            Self::Bed { .. } | Self::Table { .. } => None,
        }
    }

    /// The production state machine, if this is a stove or workstation.
    pub const fn as_production(&self) -> Option<&ProductionFacility> {
        match self {
            Self::Production(facility) => Some(facility),
            _ => None,
        }
    }

    /// Mutable production state machine access.
    pub const fn as_production_mut(&mut self) -> Option<&mut ProductionFacility> {
        match self {
            Self::Production(facility) => Some(facility),
            _ => None,
        }
    }

    /// The chamber state machine, if this is a cultivation chamber.
    pub const fn as_chamber(&self) -> Option<&CultivateChamber> {
        match self {
            Self::Chamber(chamber) => Some(chamber),
            _ => None,
        }
    }

    /// Mutable chamber state machine access.
    pub const fn as_chamber_mut(&mut self) -> Option<&mut CultivateChamber> {
        match self {
            Self::Chamber(chamber) => Some(chamber),
            _ => None,
        }
    }
}

/// Name-keyed facility collection with unique names.
#[derive(Debug, Clone, Default)]
pub struct FacilityRegistry {
    facilities: BTreeMap<String, Facility>,
}

impl FacilityRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            facilities: BTreeMap::new(),
        }
    }

    /// Register a facility under its own name.
    ///
    /// A duplicate name is rejected; the existing facility is kept.
    pub fn register(&mut self, facility: Facility) -> Result<(), WorldError> {
        let name = facility.name().to_owned();
        if self.facilities.contains_key(&name) {
            warn!(facility = %name, "duplicate facility name rejected");
            return Err(WorldError::DuplicateName(name));
        }
        self.facilities.insert(name, facility);
        Ok(())
    }

    /// Look up a facility by name.
    pub fn get(&self, name: &str) -> Option<&Facility> {
        self.facilities.get(name)
    }

    /// Mutable lookup by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Facility> {
        self.facilities.get_mut(name)
    }

    /// Lookup that errors on a missing name.
    pub fn require(&self, name: &str) -> Result<&Facility, WorldError> {
        self.facilities
            .get(name)
            .ok_or_else(|| WorldError::FacilityNotFound(name.to_owned()))
    }

    /// Mutable lookup that errors on a missing name.
    pub fn require_mut(&mut self, name: &str) -> Result<&mut Facility, WorldError> {
        self.facilities
            .get_mut(name)
            .ok_or_else(|| WorldError::FacilityNotFound(name.to_owned()))
    }

    /// Whether a facility with the name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.facilities.contains_key(name)
    }

    /// Number of registered facilities.
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Iterate over facilities in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Facility> {
        self.facilities.values()
    }

    /// Iterate mutably over facilities in name order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Facility> {
        self.facilities.values_mut()
    }
}
