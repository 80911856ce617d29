//! World model for the Outpost simulation: inventories, the static item and
//! recipe catalogs, and the per-facility production state machines.
//!
//! Everything in this crate is synchronous and engine-independent. Facilities
//! never reach into character state; the simulation core reads the bound
//! worker's action state and feeds it into the per-minute advance calls,
//! then applies the returned outcome (e.g. releasing the worker to idle).
//!
//! # Modules
//!
//! - [`catalog`] -- Read-only item and recipe lookups
//! - [`inventory`] -- Bounded item container with space accounting
//! - [`workstation`] -- Stove/workstation production cycle
//! - [`chamber`] -- Cultivate chamber plant/grow/harvest cycle
//! - [`facility`] -- The facility sum type and name-keyed registry

pub mod catalog;
pub mod chamber;
pub mod error;
pub mod facility;
pub mod inventory;
pub mod workstation;

pub use catalog::{ItemCatalog, TaskCatalog};
pub use chamber::{ChamberOutcome, CultivateChamber, GrowthOutcome};
pub use error::WorldError;
pub use facility::{Facility, FacilityRegistry};
pub use inventory::{Inventory, transfer};
pub use workstation::{ProductionFacility, WorkOutcome};
