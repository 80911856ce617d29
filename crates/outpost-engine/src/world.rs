//! Default colony layout and initial-state loading.
//!
//! The engine builds a fixed habitat -- kitchen, crafting corner, one
//! cultivation chamber, bulk storage, and furniture for two colonists --
//! then overlays `outpost-config.json` from the working directory when
//! present. The config uses the [`InitGameData`] document format.

use std::path::Path;

use outpost_core::{Character, InitGameData, Simulation};
use outpost_types::CharacterSkills;
use outpost_world::{CultivateChamber, Facility, ProductionFacility};
use tracing::{info, warn};

use crate::error::EngineError;

/// Path of the optional initial-state document.
const CONFIG_PATH: &str = "outpost-config.json";

/// Build the starting colony.
pub fn build_colony() -> Result<Simulation, EngineError> {
    let mut sim = Simulation::with_standard_catalogs();

    let facilities = [
        Facility::Production(ProductionFacility::stove("Stove_1")),
        Facility::Production(ProductionFacility::workstation("WorkStation_1")),
        Facility::Chamber(CultivateChamber::new("Chamber_1")),
        Facility::storage("Storage_1"),
        Facility::table("Table_1"),
        Facility::bed("Bed_1"),
        Facility::bed("Bed_2"),
    ];
    for facility in facilities {
        sim.facilities_mut()
            .register(facility)
            .map_err(|err| EngineError::Setup {
                message: format!("facility registration failed: {err}"),
            })?;
    }

    let mut mara = Character::new("Mara");
    mara.set_skills(CharacterSkills {
        can_cook: true,
        can_farm: true,
        can_craft: false,
    });
    mara.assign_bed("Bed_1");

    let mut jonas = Character::new("Jonas");
    jonas.set_skills(CharacterSkills {
        can_cook: false,
        can_farm: true,
        can_craft: true,
    });
    jonas.assign_bed("Bed_2");

    for character in [mara, jonas] {
        sim.spawn_character(character)
            .map_err(|err| EngineError::Setup {
                message: format!("character spawn failed: {err}"),
            })?;
    }

    info!(
        facilities = sim.facilities().len(),
        characters = sim.characters().len(),
        "colony built"
    );
    Ok(sim)
}

/// Overlay the optional initial-state document onto a built colony.
///
/// A missing file is normal; a malformed one is logged and skipped so a
/// bad config never prevents startup.
pub fn apply_initial_state(sim: &mut Simulation) {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        info!("no initial-state config found, starting from defaults");
        return;
    }
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(%err, path = CONFIG_PATH, "config unreadable, skipped");
            return;
        }
    };
    match InitGameData::from_json(&contents) {
        Ok(config) => {
            config.apply(sim);
            info!(path = CONFIG_PATH, "initial-state config applied");
        }
        Err(err) => {
            warn!(%err, path = CONFIG_PATH, "config unparsable, skipped");
        }
    }
}
