//! Read-only item and recipe catalogs.
//!
//! Catalogs are loaded once at startup -- either from the external JSON data
//! files or from the built-in standard set matching them -- and only read
//! thereafter. Lookups are by id; a missing id is a caller error surfaced
//! as [`WorldError::UnknownItem`] / [`WorldError::UnknownTask`].

use std::collections::BTreeMap;

use outpost_types::{FacilityKind, ItemDef, ItemId, ItemStack, TaskDef, TaskId};
use tracing::warn;

use crate::error::WorldError;

// ---------------------------------------------------------------------------
// Item catalog
// ---------------------------------------------------------------------------

/// Id-keyed lookup of item definitions.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, ItemDef>,
}

impl ItemCatalog {
    /// Build a catalog from a list of definitions.
    ///
    /// A duplicate id keeps the first definition and logs a warning, the
    /// same policy as the name registries.
    pub fn from_defs(defs: Vec<ItemDef>) -> Self {
        let mut items = BTreeMap::new();
        for def in defs {
            if items.contains_key(&def.id) {
                warn!(item = %def.id, name = %def.name, "duplicate item definition ignored");
                continue;
            }
            items.insert(def.id, def);
        }
        Self { items }
    }

    /// Parse a catalog from the external JSON data file format
    /// (a top-level array of item objects).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let defs: Vec<ItemDef> = serde_json::from_str(json)?;
        Ok(Self::from_defs(defs))
    }

    /// The standard item set.
    pub fn standard() -> Self {
        Self::from_defs(vec![
            ItemDef {
                id: ItemId(1001),
                name: String::from("Cotton"),
                display_name: String::from("Cotton"),
                space_cost: 1,
                is_food: false,
                nutrition: 0.0,
                eat_duration_minutes: 0,
            },
            ItemDef {
                id: ItemId(1002),
                name: String::from("Corn"),
                display_name: String::from("Corn"),
                space_cost: 1,
                is_food: false,
                nutrition: 0.0,
                eat_duration_minutes: 0,
            },
            ItemDef {
                id: ItemId(2001),
                name: String::from("Thread"),
                display_name: String::from("Thread"),
                space_cost: 1,
                is_food: false,
                nutrition: 0.0,
                eat_duration_minutes: 0,
            },
            ItemDef {
                id: ItemId(2002),
                name: String::from("Cloth"),
                display_name: String::from("Cloth"),
                space_cost: 2,
                is_food: false,
                nutrition: 0.0,
                eat_duration_minutes: 0,
            },
            ItemDef {
                id: ItemId(2003),
                name: String::from("Meal"),
                display_name: String::from("Meal"),
                space_cost: 2,
                is_food: true,
                nutrition: 60.0,
                eat_duration_minutes: 20,
            },
            ItemDef {
                id: ItemId(3001),
                name: String::from("Coat"),
                display_name: String::from("Coat"),
                space_cost: 3,
                is_food: false,
                nutrition: 0.0,
                eat_duration_minutes: 0,
            },
        ])
    }

    /// Look up an item definition.
    pub fn get(&self, id: ItemId) -> Option<&ItemDef> {
        self.items.get(&id)
    }

    /// Look up an item definition, erroring on a missing id.
    pub fn require(&self, id: ItemId) -> Result<&ItemDef, WorldError> {
        self.items.get(&id).ok_or(WorldError::UnknownItem(id))
    }

    /// The space one unit of the item consumes, if the item is known.
    pub fn space_cost(&self, id: ItemId) -> Option<u32> {
        self.items.get(&id).map(|def| def.space_cost)
    }

    /// Whether the item is edible.
    pub fn is_food(&self, id: ItemId) -> bool {
        self.items.get(&id).is_some_and(|def| def.is_food)
    }

    /// Display name for snapshots, falling back to a placeholder for
    /// unknown ids (matches the wire behavior of the original data layer).
    pub fn display_name(&self, id: ItemId) -> &str {
        self.items
            .get(&id)
            .map_or("UnknownItem", |def| def.display_name.as_str())
    }

    /// Iterate over all definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemDef> {
        self.items.values()
    }
}

// ---------------------------------------------------------------------------
// Task catalog
// ---------------------------------------------------------------------------

/// Id-keyed lookup of recipe definitions.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    tasks: BTreeMap<TaskId, TaskDef>,
}

impl TaskCatalog {
    /// Build a catalog from a list of definitions. Duplicates keep the
    /// first definition and log a warning.
    pub fn from_defs(defs: Vec<TaskDef>) -> Self {
        let mut tasks = BTreeMap::new();
        for def in defs {
            if tasks.contains_key(&def.id) {
                warn!(task = %def.id, name = %def.name, "duplicate task definition ignored");
                continue;
            }
            tasks.insert(def.id, def);
        }
        Self { tasks }
    }

    /// Parse a catalog from the external JSON data file format
    /// (a top-level array of task objects).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let defs: Vec<TaskDef> = serde_json::from_str(json)?;
        Ok(Self::from_defs(defs))
    }

    /// The standard recipe set.
    pub fn standard() -> Self {
        Self::from_defs(vec![
            TaskDef {
                id: TaskId(2001),
                name: String::from("SpinThread"),
                product: ItemId(2001),
                workload: 8,
                ingredients: vec![ItemStack::new(ItemId(1001), 5)],
                required_facility: FacilityKind::WorkStation,
            },
            TaskDef {
                id: TaskId(2002),
                name: String::from("WeaveCloth"),
                product: ItemId(2002),
                workload: 8,
                ingredients: vec![ItemStack::new(ItemId(1001), 5)],
                required_facility: FacilityKind::WorkStation,
            },
            TaskDef {
                id: TaskId(2003),
                name: String::from("CookMeal"),
                product: ItemId(2003),
                workload: 5,
                ingredients: vec![ItemStack::new(ItemId(1002), 2)],
                required_facility: FacilityKind::Stove,
            },
            TaskDef {
                id: TaskId(3001),
                name: String::from("SewCoat"),
                product: ItemId(3001),
                workload: 12,
                ingredients: vec![
                    ItemStack::new(ItemId(2001), 1),
                    ItemStack::new(ItemId(2002), 1),
                ],
                required_facility: FacilityKind::WorkStation,
            },
        ])
    }

    /// Look up a recipe definition.
    pub fn get(&self, id: TaskId) -> Option<&TaskDef> {
        self.tasks.get(&id)
    }

    /// Look up a recipe definition, erroring on a missing id.
    pub fn require(&self, id: TaskId) -> Result<&TaskDef, WorldError> {
        self.tasks.get(&id).ok_or(WorldError::UnknownTask(id))
    }

    /// Iterate over all definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &TaskDef> {
        self.tasks.values()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn standard_items_resolve() {
        let items = ItemCatalog::standard();
        assert_eq!(items.get(ItemId(1002)).map(|d| d.name.as_str()), Some("Corn"));
        assert!(items.is_food(ItemId(2003)));
        assert!(!items.is_food(ItemId(1001)));
        assert_eq!(items.space_cost(ItemId(2002)), Some(2));
    }

    #[test]
    fn unknown_item_is_an_error() {
        let items = ItemCatalog::standard();
        assert!(items.get(ItemId(9999)).is_none());
        assert!(items.require(ItemId(9999)).is_err());
        assert_eq!(items.display_name(ItemId(9999)), "UnknownItem");
    }

    #[test]
    fn standard_recipes_resolve() {
        let tasks = TaskCatalog::standard();
        let cook = tasks.require(TaskId(2003)).unwrap();
        assert_eq!(cook.product, ItemId(2003));
        assert_eq!(cook.workload, 5);
        assert_eq!(cook.ingredients, vec![ItemStack::new(ItemId(1002), 2)]);
        assert_eq!(cook.required_facility, FacilityKind::Stove);
    }

    #[test]
    fn duplicate_definitions_keep_the_first() {
        let items = ItemCatalog::from_defs(vec![
            ItemDef {
                id: ItemId(1),
                name: String::from("First"),
                display_name: String::from("First"),
                space_cost: 1,
                is_food: false,
                nutrition: 0.0,
                eat_duration_minutes: 0,
            },
            ItemDef {
                id: ItemId(1),
                name: String::from("Second"),
                display_name: String::from("Second"),
                space_cost: 9,
                is_food: false,
                nutrition: 0.0,
                eat_duration_minutes: 0,
            },
        ]);
        assert_eq!(items.get(ItemId(1)).map(|d| d.name.as_str()), Some("First"));
    }

    #[test]
    fn catalog_parses_external_json() {
        let items = ItemCatalog::from_json(
            r#"[{"ItemID": 1001, "ItemName": "Cotton", "DisplayName": "Cotton",
                 "SpaceCost": 1}]"#,
        )
        .unwrap();
        assert_eq!(items.space_cost(ItemId(1001)), Some(1));
    }
}
