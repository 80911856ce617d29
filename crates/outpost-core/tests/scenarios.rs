//! End-to-end scenarios driving the full simulation through the public
//! surface: agent commands in, ticks forward, world state out.

// Scenario tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::indexing_slicing
)]

use outpost_core::{Character, InitGameData, Simulation, TICKS_PER_MINUTE};
use outpost_types::{
    ActionState, AgentCommand, CharacterSkills, CommandType, CropKind, CultivatePhase, ItemId,
    TaskId,
};
use outpost_world::{CultivateChamber, Facility, ProductionFacility};

/// A small colony: stove, workstation, chamber, depot, table, bed, and
/// one character with every skill.
fn colony() -> Simulation {
    let mut sim = Simulation::with_standard_catalogs();
    sim.facilities_mut()
        .register(Facility::Production(ProductionFacility::stove("Stove_1")))
        .unwrap();
    sim.facilities_mut()
        .register(Facility::Production(ProductionFacility::workstation(
            "WorkStation_1",
        )))
        .unwrap();
    sim.facilities_mut()
        .register(Facility::Chamber(CultivateChamber::new("Chamber_1")))
        .unwrap();
    sim.facilities_mut()
        .register(Facility::storage("Depot_1"))
        .unwrap();
    sim.facilities_mut()
        .register(Facility::table("Table_1"))
        .unwrap();
    sim.facilities_mut().register(Facility::bed("Bed_1")).unwrap();

    let mut poe = Character::new("Poe");
    poe.set_skills(CharacterSkills {
        can_cook: true,
        can_farm: true,
        can_craft: true,
    });
    sim.spawn_character(poe).unwrap();
    sim
}

fn command(character: &str, kind: CommandType, target: &str, param: u32, count: u32) -> AgentCommand {
    AgentCommand {
        character_name: character.to_owned(),
        command_type: kind,
        target_name: target.to_owned(),
        param_id: param,
        count,
    }
}

/// Answer the single outstanding decision request with a command.
fn answer(sim: &mut Simulation, expected: &str, cmd: &AgentCommand) {
    let requests = sim.take_decision_requests();
    assert_eq!(requests, vec![expected.to_owned()]);
    sim.apply_decision(expected, cmd);
}

/// Move a character and resolve the pathfinding instantly, answering the
/// arrival decision with the supplied follow-up command.
fn move_then(sim: &mut Simulation, character: &str, target: &str, followup: &AgentCommand) {
    sim.execute_command(&command(character, CommandType::Move, target, 0, 0)).unwrap();
    let moves = sim.take_move_requests();
    assert_eq!(moves.len(), 1);
    sim.complete_move(character, true);
    answer(sim, character, followup);
}

fn run_minutes(sim: &mut Simulation, minutes: u32) {
    for _ in 0..minutes {
        for _ in 0..TICKS_PER_MINUTE {
            sim.advance_tick();
        }
    }
}

#[test]
fn cultivation_runs_a_full_cycle() {
    let mut sim = colony();
    sim.select_crop("Chamber_1", CropKind::Cotton).unwrap();

    // Walk to the chamber and start planting.
    let use_chamber = command("Poe", CommandType::Use, "", 0, 0);
    move_then(&mut sim, "Poe", "Chamber_1", &use_chamber);
    assert_eq!(
        sim.characters().get("Poe").unwrap().action_state(),
        ActionState::Working
    );

    // Ten working minutes finish the planting.
    run_minutes(&mut sim, 10);
    let chamber = sim.facilities().get("Chamber_1").unwrap().as_chamber().unwrap();
    assert_eq!(chamber.phase(), CultivatePhase::Growing);

    // The released planter waits out the growth period.
    answer(&mut sim, "Poe", &command("Poe", CommandType::Wait, "", 1500, 0));
    run_minutes(&mut sim, 1441);
    let chamber = sim.facilities().get("Chamber_1").unwrap().as_chamber().unwrap();
    assert_eq!(chamber.phase(), CultivatePhase::ReadyToHarvest);

    // Cut the wait short is not possible; let it elapse, then harvest.
    run_minutes(&mut sim, 59);
    answer(&mut sim, "Poe", &use_chamber);
    run_minutes(&mut sim, 10);

    let chamber = sim.facilities().get("Chamber_1").unwrap().as_chamber().unwrap();
    assert_eq!(chamber.inventory().count(ItemId(1001)), 1);
    // The target crop survived the cycle, so the chamber rearms itself.
    assert_eq!(chamber.phase(), CultivatePhase::WaitingToPlant);
}

#[test]
fn config_driven_cooking_settles_the_order() {
    let mut sim = colony();
    let config = InitGameData::from_json(
        r#"{
            "StorageContents": { "Stove_1": [ { "ItemID": 1002, "Count": 2 } ] },
            "FacilityOrders": { "Stove_1": [ { "TaskID": 2003, "Count": 1 } ] }
        }"#,
    )
    .unwrap();
    config.apply(&mut sim);

    let cook = command("Poe", CommandType::Use, "", 2003, 0);
    move_then(&mut sim, "Poe", "Stove_1", &cook);
    run_minutes(&mut sim, 5);

    let stove = sim.facilities().get("Stove_1").unwrap();
    let inventory = stove.inventory().unwrap();
    assert_eq!(inventory.count(ItemId(2003)), 1);
    assert_eq!(inventory.count(ItemId(1002)), 0);
    // The standing order was fulfilled and removed.
    assert!(stove.as_production().unwrap().orders().is_empty());
    assert_eq!(stove.as_production().unwrap().current_task(), TaskId::NONE);
}

#[test]
fn crafting_chain_thread_to_coat() {
    let mut sim = colony();
    let config = InitGameData::from_json(
        r#"{ "StorageContents": { "WorkStation_1": [ { "ItemID": 1001, "Count": 10 } ] } }"#,
    )
    .unwrap();
    config.apply(&mut sim);

    // Spin thread, weave cloth, then sew the coat at the same bench.
    let spin = command("Poe", CommandType::Use, "", 2001, 0);
    move_then(&mut sim, "Poe", "WorkStation_1", &spin);
    run_minutes(&mut sim, 8);

    answer(&mut sim, "Poe", &command("Poe", CommandType::Use, "", 2002, 0));
    run_minutes(&mut sim, 8);

    answer(&mut sim, "Poe", &command("Poe", CommandType::Use, "", 3001, 0));
    run_minutes(&mut sim, 12);

    let bench = sim.facilities().get("WorkStation_1").unwrap();
    let inventory = bench.inventory().unwrap();
    assert_eq!(inventory.count(ItemId(3001)), 1);
    assert_eq!(inventory.count(ItemId(2001)), 0);
    assert_eq!(inventory.count(ItemId(2002)), 0);
    assert_eq!(inventory.count(ItemId(1001)), 0);
}

#[test]
fn meal_round_trip_feeds_the_character() {
    let mut sim = colony();
    let config = InitGameData::from_json(
        r#"{
            "StorageContents": { "Depot_1": [ { "ItemID": 2003, "Count": 1 } ] },
            "Characters": [
                { "Name": "Poe",
                  "Stats": { "Hunger": 30.0, "MaxHunger": 100.0,
                             "Energy": 90.0, "MaxEnergy": 100.0 } }
            ]
        }"#,
    )
    .unwrap();
    config.apply(&mut sim);

    // Fetch the meal from the depot.
    let take = command("Poe", CommandType::Take, "", 2003, 1);
    move_then(&mut sim, "Poe", "Depot_1", &take);
    // The instant take is followed by an immediate next request; answer
    // it by walking to the table, then eat on arrival.
    answer(&mut sim, "Poe", &command("Poe", CommandType::Move, "Table_1", 0, 0));
    let moves = sim.take_move_requests();
    assert_eq!(moves.len(), 1);
    sim.complete_move("Poe", true);
    let eat = command("Poe", CommandType::Use, "", 0, 0);
    answer(&mut sim, "Poe", &eat);
    assert_eq!(
        sim.characters().get("Poe").unwrap().action_state(),
        ActionState::Eating
    );

    run_minutes(&mut sim, 20);
    let poe = sim.characters().get("Poe").unwrap();
    // 30 starting hunger, 60 nutrition over 20 minutes, minus nothing
    // while eating: ~90, allowing for float accumulation.
    assert!(poe.stats().hunger > 85.0);
    assert!(poe.inventory().is_empty());
    // Finishing the meal asked for the next command.
    assert_eq!(sim.take_decision_requests(), vec![String::from("Poe")]);
}

#[test]
fn missing_ingredients_interrupt_without_corruption() {
    let mut sim = colony();
    // No corn anywhere; the cook is released on the first minute.
    let cook = command("Poe", CommandType::Use, "", 2003, 0);
    move_then(&mut sim, "Poe", "Stove_1", &cook);
    run_minutes(&mut sim, 1);

    let stove = sim.facilities().get("Stove_1").unwrap();
    assert!(stove.inventory().unwrap().is_empty());
    assert_eq!(stove.as_production().unwrap().worker(), None);
    assert_eq!(
        sim.characters().get("Poe").unwrap().action_state(),
        ActionState::Thinking
    );
}

#[test]
fn clock_freezes_while_a_decision_is_outstanding() {
    let mut sim = colony();
    sim.queue_decision("Poe");
    let minutes_before = sim.clock().total_minutes();

    // Ticks accumulate nowhere while the request is pending.
    run_minutes(&mut sim, 5);
    assert_eq!(sim.clock().total_minutes(), minutes_before);

    let _ = sim.take_decision_requests();
    sim.apply_decision("Poe", &command("Poe", CommandType::Wait, "", 3, 0));
    run_minutes(&mut sim, 3);
    assert_eq!(sim.clock().total_minutes(), 3);
}
