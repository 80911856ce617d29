//! World-state serialization for the external decision-maker.
//!
//! Each decision request carries a full snapshot of the world: every
//! facility with its inventory and kind-specific state, every character
//! with needs and action state, and the static item and recipe catalogs.
//! Keys are PascalCase to match the wire contract of the decision server.

use outpost_world::{Facility, Inventory, ItemCatalog};
use serde_json::{Value, json};

use crate::character::Character;
use crate::sim::Simulation;

/// Build the `GetInstruction` request payload for one character.
pub fn instruction_request(sim: &Simulation, target: &str) -> Value {
    json!({
        "RequestType": "GetInstruction",
        "TargetAgent": target,
        "GameTime": sim.clock().game_time(),
        "Environment": {
            "Actors": sim
                .facilities()
                .iter()
                .map(|facility| facility_json(facility, sim.items()))
                .collect::<Vec<Value>>(),
        },
        "Characters": {
            "Characters": sim
                .characters()
                .iter()
                .map(|character| character_json(character, sim.items()))
                .collect::<Vec<Value>>(),
        },
        "ItemDatabase": item_database(sim.items()),
        "TaskRecipes": task_recipes(sim),
    })
}

/// Build the fire-and-forget `UpdateGameState` payload.
///
/// Same world content as an instruction request, without a target agent
/// or the static catalogs (the server already holds those).
pub fn world_state(sim: &Simulation) -> Value {
    json!({
        "RequestType": "UpdateGameState",
        "GameTime": sim.clock().game_time(),
        "Environment": {
            "Actors": sim
                .facilities()
                .iter()
                .map(|facility| facility_json(facility, sim.items()))
                .collect::<Vec<Value>>(),
        },
        "Characters": {
            "Characters": sim
                .characters()
                .iter()
                .map(|character| character_json(character, sim.items()))
                .collect::<Vec<Value>>(),
        },
    })
}

fn inventory_json(inventory: &Inventory, items: &ItemCatalog) -> Value {
    Value::Array(
        inventory
            .iter()
            .map(|stack| {
                json!({
                    "ItemID": stack.item,
                    "ItemName": items.display_name(stack.item),
                    "Count": stack.count,
                })
            })
            .collect(),
    )
}

fn facility_json(facility: &Facility, items: &ItemCatalog) -> Value {
    let mut actor = json!({
        "ActorName": facility.name(),
        "ActorType": facility.kind().label(),
    });
    if let Some(inventory) = facility.inventory()
        && let Some(object) = actor.as_object_mut()
    {
        object.insert(
            String::from("Inventory"),
            inventory_json(inventory, items),
        );
    }

    let extra = match facility {
        Facility::Production(production) => json!({
            "CurrentTaskID": production.current_task(),
            "WorkProgress": production.work_progress(),
            "CurrentWorker": production.worker(),
            "Orders": production
                .orders()
                .iter()
                .map(|(task, count)| json!({ "TaskID": task, "Count": count }))
                .collect::<Vec<Value>>(),
        }),
        Facility::Chamber(chamber) => json!({
            "Phase": chamber.phase().label(),
            "TargetCrop": chamber.target_crop().map(outpost_types::CropKind::label),
            "CurrentCrop": chamber.current_crop().map(outpost_types::CropKind::label),
            "WorkProgress": chamber.work_progress(),
            "GrowthProgress": chamber.growth_progress(),
            "CurrentWorker": chamber.worker(),
        }),
        Facility::Storage { .. } | Facility::Bed { .. } | Facility::Table { .. } => {
            json!({})
        }
    };
    merge(actor, extra)
}

fn character_json(character: &Character, items: &ItemCatalog) -> Value {
    json!({
        "CharacterName": character.name(),
        "ActionState": character.action_state().label(),
        "Hunger": character.stats().hunger,
        "MaxHunger": character.stats().max_hunger,
        "Energy": character.stats().energy,
        "MaxEnergy": character.stats().max_energy,
        "CanCook": character.skills().can_cook,
        "CanFarm": character.skills().can_farm,
        "CanCraft": character.skills().can_craft,
        "CurrentPlace": character.current_place(),
        "Inventory": inventory_json(character.inventory(), items),
    })
}

fn item_database(items: &ItemCatalog) -> Value {
    Value::Array(items.iter().map(|def| json!(def)).collect())
}

fn task_recipes(sim: &Simulation) -> Value {
    Value::Array(sim.tasks().iter().map(|def| json!(def)).collect())
}

/// Merge two JSON objects, keys of `extra` winning.
fn merge(base: Value, extra: Value) -> Value {
    match (base, extra) {
        (Value::Object(mut base), Value::Object(extra)) => {
            base.extend(extra);
            Value::Object(base)
        }
        (base, _) => base,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use outpost_types::{CharacterSkills, CropKind, ItemId, ItemStack};
    use outpost_world::{CultivateChamber, ProductionFacility};

    use super::*;

    fn world() -> Simulation {
        let mut sim = Simulation::with_standard_catalogs();
        sim.facilities_mut()
            .register(Facility::Production(ProductionFacility::stove("Stove_1")))
            .unwrap();
        let mut chamber = CultivateChamber::new("Chamber_1");
        chamber.select_crop(CropKind::Corn);
        sim.facilities_mut()
            .register(Facility::Chamber(chamber))
            .unwrap();

        let mut ada = Character::new("Ada");
        ada.set_skills(CharacterSkills {
            can_cook: true,
            can_farm: false,
            can_craft: false,
        });
        ada.inventory_mut()
            .add(ItemStack::new(ItemId(2003), 1), sim.items())
            .unwrap();
        sim.spawn_character(ada).unwrap();
        sim
    }

    #[test]
    fn request_has_the_wire_shape() {
        let sim = world();
        let payload = instruction_request(&sim, "Ada");
        assert_eq!(payload["RequestType"], "GetInstruction");
        assert_eq!(payload["TargetAgent"], "Ada");
        assert_eq!(payload["GameTime"], "Day 1 00:00");
        assert!(payload["Environment"]["Actors"].is_array());
        assert!(payload["Characters"]["Characters"].is_array());
        assert!(payload["ItemDatabase"].is_array());
        assert!(payload["TaskRecipes"].is_array());
    }

    #[test]
    fn chamber_actor_carries_phase_fields() {
        let sim = world();
        let payload = instruction_request(&sim, "Ada");
        let actors = payload["Environment"]["Actors"].as_array().unwrap();
        let chamber = actors
            .iter()
            .find(|a| a["ActorName"] == "Chamber_1")
            .unwrap();
        assert_eq!(chamber["ActorType"], "CultivateChamber");
        assert_eq!(chamber["Phase"], "WaitingToPlant");
        assert_eq!(chamber["TargetCrop"], "Corn");
        assert_eq!(chamber["GrowthProgress"], 0);
    }

    #[test]
    fn character_entry_carries_needs_and_inventory() {
        let sim = world();
        let payload = instruction_request(&sim, "Ada");
        let characters = payload["Characters"]["Characters"].as_array().unwrap();
        assert_eq!(characters.len(), 1);
        let ada = &characters[0];
        assert_eq!(ada["CharacterName"], "Ada");
        assert_eq!(ada["ActionState"], "Idle");
        assert_eq!(ada["CanCook"], true);
        let inventory = ada["Inventory"].as_array().unwrap();
        assert_eq!(inventory[0]["ItemID"], 2003);
        assert_eq!(inventory[0]["ItemName"], "Meal");
        assert_eq!(inventory[0]["Count"], 1);
    }

    #[test]
    fn production_actor_lists_standing_orders() {
        let mut sim = world();
        sim.add_order("Stove_1", outpost_types::TaskId(2003), 2).unwrap();
        let payload = instruction_request(&sim, "Ada");
        let actors = payload["Environment"]["Actors"].as_array().unwrap();
        let stove = actors.iter().find(|a| a["ActorName"] == "Stove_1").unwrap();
        assert_eq!(stove["ActorType"], "Stove");
        assert_eq!(stove["Orders"][0]["TaskID"], 2003);
        assert_eq!(stove["Orders"][0]["Count"], 2);
    }
}
