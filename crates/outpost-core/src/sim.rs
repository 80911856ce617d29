//! The simulation orchestrator: tick processing and command dispatch.
//!
//! [`Simulation`] owns the clock, the character and facility registries
//! and the static catalogs, and wires them together. Everything here runs
//! synchronously on the tick thread; the two asynchronous boundaries --
//! movement resolution and the external decision-maker -- are surfaced as
//! request queues the engine drains, with completions fed back in through
//! [`Simulation::complete_move`] and [`Simulation::apply_decision`].
//!
//! Decision flow: whenever a character finishes an action and becomes
//! idle, a decision request is queued, the character enters `Thinking`
//! and the clock takes one pause reference. The clock resumes only when
//! every outstanding request has been answered or aborted, so a slow
//! decision-maker freezes simulated time rather than desynchronizing it.

use std::collections::{BTreeMap, VecDeque};

use outpost_types::{
    ActionState, AgentCommand, CommandType, CropKind, FacilityKind, ItemId, ItemStack, TaskId,
};
use outpost_world::{
    ChamberOutcome, Facility, FacilityRegistry, ItemCatalog, TaskCatalog, WorkOutcome, transfer,
};
use tracing::{debug, info, warn};

use crate::character::Character;
use crate::clock::GameClock;
use crate::error::CoreError;
use crate::registry::CharacterRegistry;

/// A pathfinding request the engine must resolve.
///
/// Movement itself is external; the core only records intent and later
/// consumes the completion via [`Simulation::complete_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// The character that wants to move.
    pub character: String,
    /// The facility they are headed to.
    pub target: String,
}

/// The simulation core.
#[derive(Debug, Clone)]
pub struct Simulation {
    clock: GameClock,
    items: ItemCatalog,
    tasks: TaskCatalog,
    characters: CharacterRegistry,
    facilities: FacilityRegistry,
    /// Characters owed a next command, in the order the need arose.
    pending_decisions: VecDeque<String>,
    /// Movement intents awaiting resolution by the engine.
    pending_moves: VecDeque<MoveRequest>,
}

impl Simulation {
    /// Create an empty world over the given catalogs.
    pub const fn new(items: ItemCatalog, tasks: TaskCatalog) -> Self {
        Self {
            clock: GameClock::new(),
            items,
            tasks,
            characters: CharacterRegistry::new(),
            facilities: FacilityRegistry::new(),
            pending_decisions: VecDeque::new(),
            pending_moves: VecDeque::new(),
        }
    }

    /// Create an empty world over the standard catalogs.
    pub fn with_standard_catalogs() -> Self {
        Self::new(ItemCatalog::standard(), TaskCatalog::standard())
    }

    // ---- accessors ------------------------------------------------------

    /// The clock.
    pub const fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// The item catalog.
    pub const fn items(&self) -> &ItemCatalog {
        &self.items
    }

    /// The recipe catalog.
    pub const fn tasks(&self) -> &TaskCatalog {
        &self.tasks
    }

    /// The character registry.
    pub const fn characters(&self) -> &CharacterRegistry {
        &self.characters
    }

    /// Mutable character registry access (spawn, config load).
    pub const fn characters_mut(&mut self) -> &mut CharacterRegistry {
        &mut self.characters
    }

    /// The facility registry.
    pub const fn facilities(&self) -> &FacilityRegistry {
        &self.facilities
    }

    /// Mutable facility registry access (world init, config load).
    pub const fn facilities_mut(&mut self) -> &mut FacilityRegistry {
        &mut self.facilities
    }

    // ---- tick processing ------------------------------------------------

    /// Advance by one engine tick.
    ///
    /// A no-op while the clock is paused. Minute effects (character needs,
    /// facility work) and hour effects (crop growth) run in chronological
    /// order within the tick that crosses their boundary.
    pub fn advance_tick(&mut self) {
        let events = self.clock.advance();
        if events.minute_elapsed {
            self.on_minute();
        }
        if events.hour_elapsed {
            self.on_hour();
        }
    }

    fn on_minute(&mut self) {
        // Characters first: needs decay, timers, wake-ups.
        let mut became_idle = Vec::new();
        for character in self.characters.iter_mut() {
            if character.advance_minute() {
                became_idle.push(character.name().to_owned());
            }
        }
        for name in became_idle {
            self.queue_decision(&name);
        }

        // Facilities read the worker states as they stand after the
        // character pass.
        let states: BTreeMap<String, ActionState> = self
            .characters
            .iter()
            .map(|c| (c.name().to_owned(), c.action_state()))
            .collect();

        let mut released = Vec::new();
        for facility in self.facilities.iter_mut() {
            match facility {
                Facility::Production(production) => {
                    let working = production
                        .worker()
                        .is_some_and(|w| states.get(w) == Some(&ActionState::Working));
                    match production.advance_minute(working, &self.tasks, &self.items) {
                        Ok(
                            WorkOutcome::Completed { released: name, .. }
                            | WorkOutcome::MissingIngredients { released: name, .. },
                        ) => released.push(name),
                        Ok(WorkOutcome::Idle | WorkOutcome::InProgress { .. }) => {}
                        Err(err) => {
                            warn!(facility = %production.name(), %err, "work cycle error");
                        }
                    }
                }
                Facility::Chamber(chamber) => {
                    let working = chamber
                        .worker()
                        .is_some_and(|w| states.get(w) == Some(&ActionState::Working));
                    match chamber.advance_minute(working, &self.items) {
                        ChamberOutcome::PlantingComplete { released: name }
                        | ChamberOutcome::HarvestComplete { released: name, .. } => {
                            released.push(name);
                        }
                        ChamberOutcome::Idle | ChamberOutcome::Progressed => {}
                    }
                }
                Facility::Storage { .. } | Facility::Bed { .. } | Facility::Table { .. } => {}
            }
        }
        for name in released {
            self.release_character(&name);
        }
    }

    fn on_hour(&mut self) {
        for facility in self.facilities.iter_mut() {
            if let Some(chamber) = facility.as_chamber_mut() {
                let _ = chamber.advance_hour();
            }
        }
    }

    /// Return a facility-released worker to idle, firing the decision edge.
    fn release_character(&mut self, name: &str) {
        let Some(character) = self.characters.get_mut(name) else {
            warn!(character = name, "released worker is not registered");
            return;
        };
        if character.set_action_state(ActionState::Idle) {
            self.queue_decision(name);
        }
    }

    // ---- decision plumbing ----------------------------------------------

    /// Queue a next-command request for a character.
    ///
    /// The character enters `Thinking` and the clock takes one pause
    /// reference, released when the request is answered or aborted. Also
    /// the entry point for kicking off freshly spawned characters.
    pub fn queue_decision(&mut self, name: &str) {
        let Some(character) = self.characters.get_mut(name) else {
            warn!(character = name, "decision queued for unknown character");
            return;
        };
        let _ = character.set_action_state(ActionState::Thinking);
        self.pending_decisions.push_back(name.to_owned());
        self.clock.pause();
        debug!(character = name, "decision requested, clock paused");
    }

    /// Drain the queued decision requests, oldest first.
    pub fn take_decision_requests(&mut self) -> Vec<String> {
        self.pending_decisions.drain(..).collect()
    }

    /// Drain the queued movement intents, oldest first.
    pub fn take_move_requests(&mut self) -> Vec<MoveRequest> {
        self.pending_moves.drain(..).collect()
    }

    /// Apply a decision-maker response to the character that requested it.
    ///
    /// Releases the request's pause reference first. A response naming a
    /// character other than the requester is a protocol error: nothing is
    /// executed and the requester is re-queued for a retry, like a
    /// transport failure. Otherwise the command runs; a command that does
    /// not leave the character in a lasting action state -- the instant
    /// `Take`/`Put`, an instant meal, or any failed command -- immediately
    /// queues a fresh request, so an agent can never be stranded by its
    /// own bad command.
    pub fn apply_decision(&mut self, requester: &str, command: &AgentCommand) {
        self.clock.resume();
        if command.character_name != requester {
            warn!(
                requested = requester,
                answered = %command.character_name,
                "response named the wrong character, retrying"
            );
            if self.characters.contains(requester) {
                self.pending_decisions.push_back(requester.to_owned());
                self.clock.pause();
            }
            return;
        }
        if let Err(err) = self.execute_command(command) {
            warn!(character = requester, kind = ?command.command_type, %err, "command rejected");
        }
        let needs_followup = self.characters.get(requester).is_some_and(|c| {
            matches!(c.action_state(), ActionState::Idle | ActionState::Thinking)
        });
        if needs_followup {
            self.queue_decision(requester);
        }
    }

    /// Abort an outstanding decision request after a transport failure.
    ///
    /// Releases the pause reference and re-queues the character so the
    /// engine can retry; the character stays in `Thinking` meanwhile.
    pub fn abort_decision(&mut self, name: &str) {
        self.clock.resume();
        if self.characters.contains(name) {
            self.pending_decisions.push_back(name.to_owned());
            self.clock.pause();
        }
    }

    // ---- command execution ----------------------------------------------

    /// Execute one agent command against the world.
    ///
    /// Instant commands (`Take`, `Put`) complete within the call; stateful
    /// ones (`Move`, `Use`, `Wait`) leave the character in the matching
    /// action state. Every failure is a rejected precondition: logged by
    /// the caller, nothing mutated.
    pub fn execute_command(&mut self, command: &AgentCommand) -> Result<(), CoreError> {
        let name = command.character_name.as_str();
        if !self.characters.contains(name) {
            return Err(CoreError::CharacterNotFound(name.to_owned()));
        }
        match command.command_type {
            CommandType::Move => self.execute_move(name, &command.target_name),
            CommandType::Take => {
                self.execute_take(name, ItemId(command.param_id), command.count)
            }
            CommandType::Put => self.execute_put(name, ItemId(command.param_id), command.count),
            CommandType::Use => self.execute_use(name, command.param_id),
            CommandType::Wait => self.execute_wait(name, command.param_id),
        }
    }

    fn execute_move(&mut self, name: &str, target: &str) -> Result<(), CoreError> {
        if !self.facilities.contains(target) {
            return Err(CoreError::InvalidCommand {
                character: name.to_owned(),
                reason: format!("move target {target} does not exist"),
            });
        }
        let character = self.characters.require_mut(name)?;
        character.begin_move(target);
        self.pending_moves.push_back(MoveRequest {
            character: name.to_owned(),
            target: target.to_owned(),
        });
        Ok(())
    }

    /// Resolve a pending move issued by [`CommandType::Move`].
    ///
    /// Called by the engine when pathfinding finishes. The character
    /// returns to idle either way, which queues their next decision.
    pub fn complete_move(&mut self, name: &str, success: bool) {
        let Some(character) = self.characters.get_mut(name) else {
            warn!(character = name, "move completed for unknown character");
            return;
        };
        if !success {
            warn!(character = name, "move failed, character left in place");
        }
        if character.finish_move(success) {
            self.queue_decision(name);
        }
    }

    fn execute_take(&mut self, name: &str, item: ItemId, count: u32) -> Result<(), CoreError> {
        let place = self.place_of(name)?;
        let stack = ItemStack::new(item, count);
        let facility = self.facilities.require_mut(&place)?;
        let Some(source) = facility.inventory_mut() else {
            return Err(CoreError::UnusableFacility(facility.kind()));
        };
        let character = self.characters.require_mut(name)?;
        transfer(source, character.inventory_mut(), stack, &self.items)?;
        debug!(character = name, facility = %place, ?stack, "take");
        Ok(())
    }

    fn execute_put(&mut self, name: &str, item: ItemId, count: u32) -> Result<(), CoreError> {
        let place = self.place_of(name)?;
        let stack = ItemStack::new(item, count);
        let facility = self.facilities.require_mut(&place)?;
        let Some(destination) = facility.inventory_mut() else {
            return Err(CoreError::UnusableFacility(facility.kind()));
        };
        let character = self.characters.require_mut(name)?;
        transfer(character.inventory_mut(), destination, stack, &self.items)?;
        debug!(character = name, facility = %place, ?stack, "put");
        Ok(())
    }

    fn execute_use(&mut self, name: &str, param: u32) -> Result<(), CoreError> {
        let place = self.place_of(name)?;
        let kind = self.facilities.require(&place)?.kind();
        let skills = *self.characters.require(name)?.skills();

        match kind {
            FacilityKind::Stove | FacilityKind::WorkStation => {
                let allowed = match kind {
                    FacilityKind::Stove => skills.can_cook,
                    _ => skills.can_craft,
                };
                if !allowed {
                    return Err(CoreError::MissingSkill {
                        character: name.to_owned(),
                        facility: kind,
                    });
                }
                let task = TaskId(param);
                let def = self.tasks.require(task)?;
                if def.required_facility != kind {
                    return Err(CoreError::InvalidCommand {
                        character: name.to_owned(),
                        reason: format!("task {task} does not run on a {kind:?}"),
                    });
                }
                let facility = self.facilities.require_mut(&place)?;
                let Some(production) = facility.as_production_mut() else {
                    return Err(CoreError::UnusableFacility(kind));
                };
                production.set_worker(name, task);
                let character = self.characters.require_mut(name)?;
                let _ = character.set_action_state(ActionState::Working);
                info!(character = name, facility = %place, %task, "work started");
                Ok(())
            }
            FacilityKind::CultivateChamber => {
                if !skills.can_farm {
                    return Err(CoreError::MissingSkill {
                        character: name.to_owned(),
                        facility: kind,
                    });
                }
                let facility = self.facilities.require_mut(&place)?;
                let Some(chamber) = facility.as_chamber_mut() else {
                    return Err(CoreError::UnusableFacility(kind));
                };
                chamber.set_worker(name)?;
                let character = self.characters.require_mut(name)?;
                let _ = character.set_action_state(ActionState::Working);
                info!(character = name, chamber = %place, "field work started");
                Ok(())
            }
            FacilityKind::Table => self.execute_eat(name),
            FacilityKind::Bed => {
                let character = self.characters.require_mut(name)?;
                if character.is_energy_full() {
                    return Err(CoreError::EnergyAlreadyFull {
                        character: name.to_owned(),
                    });
                }
                let _ = character.set_action_state(ActionState::Sleeping);
                info!(character = name, "sleeping");
                Ok(())
            }
            FacilityKind::Storage => Err(CoreError::UnusableFacility(kind)),
        }
    }

    /// Consume the first carried food item and start eating it.
    fn execute_eat(&mut self, name: &str) -> Result<(), CoreError> {
        let character = self.characters.require_mut(name)?;
        let food = character
            .inventory()
            .iter()
            .find(|stack| self.items.is_food(stack.item))
            .map(|stack| stack.item)
            .ok_or_else(|| CoreError::NoFoodCarried {
                character: name.to_owned(),
            })?;
        let def = self.items.require(food)?;
        let (nutrition, duration) = (def.nutrition, def.eat_duration_minutes);

        character
            .inventory_mut()
            .remove(ItemStack::new(food, 1), &self.items)?;
        info!(character = name, item = %food, "eating");
        // An instant meal leaves the character idle; the dispatcher's
        // follow-up rule in apply_decision issues the next request.
        let _ = character.begin_eating(nutrition, duration);
        Ok(())
    }

    fn execute_wait(&mut self, name: &str, minutes: u32) -> Result<(), CoreError> {
        if minutes == 0 {
            return Err(CoreError::InvalidCommand {
                character: name.to_owned(),
                reason: String::from("wait duration must be at least one minute"),
            });
        }
        let character = self.characters.require_mut(name)?;
        character.begin_waiting(minutes);
        Ok(())
    }

    /// The facility the character is standing at, or a fail-closed error.
    fn place_of(&self, name: &str) -> Result<String, CoreError> {
        self.characters
            .require(name)?
            .current_place()
            .map(ToOwned::to_owned)
            .ok_or_else(|| CoreError::NotAtFacility {
                character: name.to_owned(),
            })
    }

    // ---- player surface --------------------------------------------------

    /// Select the crop a chamber should plant next.
    pub fn select_crop(&mut self, chamber: &str, crop: CropKind) -> Result<(), CoreError> {
        let facility = self.facilities.require_mut(chamber)?;
        let Some(chamber_state) = facility.as_chamber_mut() else {
            return Err(CoreError::UnusableFacility(facility.kind()));
        };
        chamber_state.select_crop(crop);
        Ok(())
    }

    /// Cancel a chamber's cultivation cycle, releasing any bound worker.
    pub fn cancel_cultivation(&mut self, chamber: &str) -> Result<(), CoreError> {
        let facility = self.facilities.require_mut(chamber)?;
        let Some(chamber_state) = facility.as_chamber_mut() else {
            return Err(CoreError::UnusableFacility(facility.kind()));
        };
        let released = chamber_state.cancel();
        if let Some(name) = released {
            self.release_character(&name);
        }
        Ok(())
    }

    /// Cancel a production facility's in-flight task, releasing any bound
    /// worker. Standing orders and the staging inventory are untouched.
    pub fn cancel_production(&mut self, facility: &str) -> Result<(), CoreError> {
        let entry = self.facilities.require_mut(facility)?;
        let Some(production) = entry.as_production_mut() else {
            return Err(CoreError::UnusableFacility(entry.kind()));
        };
        let released = production.worker().map(ToOwned::to_owned);
        production.clear_worker();
        if let Some(name) = released {
            self.release_character(&name);
        }
        Ok(())
    }

    /// Add a standing order to a production facility.
    pub fn add_order(&mut self, facility: &str, task: TaskId, count: u32) -> Result<(), CoreError> {
        let entry = self.facilities.require_mut(facility)?;
        let Some(production) = entry.as_production_mut() else {
            return Err(CoreError::UnusableFacility(entry.kind()));
        };
        production.add_order(task, count);
        Ok(())
    }

    /// Spawn a character and register it.
    pub fn spawn_character(&mut self, character: Character) -> Result<(), CoreError> {
        info!(character = %character.name(), "spawned");
        self.characters.register(character)
    }
}
