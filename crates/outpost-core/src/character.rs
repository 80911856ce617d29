//! Character needs simulation and action lifecycle.
//!
//! A character is always in exactly one [`ActionState`]. Every transition
//! funnels through [`Character::set_action_state`], which detects the one
//! edge that matters to the command loop: leaving a non-idle state for
//! `Idle`. That edge is the sole re-entry point into command sequencing,
//! so exactly one "what next" request fires per completed action.
//!
//! Per-minute needs decay and recovery depend on the current state:
//!
//! - Idle / Thinking / Moving drain hunger and energy slowly
//! - Working drains both at double rate
//! - Sleeping restores energy and barely touches hunger
//! - Eating restores hunger at the meal's per-minute rate
//! - Waiting drains slowly and counts a timer down
//!
//! All stat updates clamp to `[0, max]`.

use outpost_types::{ActionState, CharacterSkills, CharacterStats};
use outpost_world::Inventory;
use tracing::debug;

/// Carried inventory capacity.
const CARRY_SPACE: u32 = 20;

/// Hunger and energy drain per minute while idle, thinking or moving.
const DRAIN_IDLE: f32 = 0.1;
/// Hunger and energy drain per minute while working.
const DRAIN_WORKING: f32 = 0.2;
/// Drain per minute while waiting, and hunger drain while sleeping.
const DRAIN_SLOW: f32 = 0.05;
/// Energy restored per minute of sleep.
const SLEEP_ENERGY_GAIN: f32 = 1.0;

/// An externally-controlled colonist.
#[derive(Debug, Clone)]
pub struct Character {
    name: String,
    stats: CharacterStats,
    skills: CharacterSkills,
    action_state: ActionState,
    inventory: Inventory,
    /// The facility the character is standing at, by registry name.
    current_place: Option<String>,
    /// The facility a pending move is headed to.
    target_place: Option<String>,
    /// The bed assigned at config time, if any.
    assigned_bed: Option<String>,
    eat_remaining_minutes: u32,
    nutrition_per_minute: f32,
    wait_remaining_minutes: u32,
    /// Minutes spent in `Thinking` over the character's lifetime.
    thinking_minutes: u64,
}

impl Character {
    /// Create an idle character with full default stats and no skills.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stats: CharacterStats::default(),
            skills: CharacterSkills::default(),
            action_state: ActionState::Idle,
            inventory: Inventory::new(CARRY_SPACE),
            current_place: None,
            target_place: None,
            assigned_bed: None,
            eat_remaining_minutes: 0,
            nutrition_per_minute: 0.0,
            wait_remaining_minutes: 0,
            thinking_minutes: 0,
        }
    }

    /// Registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current stats.
    pub const fn stats(&self) -> &CharacterStats {
        &self.stats
    }

    /// Mutable stats access (config load).
    pub const fn stats_mut(&mut self) -> &mut CharacterStats {
        &mut self.stats
    }

    /// Skill flags.
    pub const fn skills(&self) -> &CharacterSkills {
        &self.skills
    }

    /// Replace the skill flags (config load).
    pub const fn set_skills(&mut self, skills: CharacterSkills) {
        self.skills = skills;
    }

    /// Current action state.
    pub const fn action_state(&self) -> ActionState {
        self.action_state
    }

    /// The carried inventory.
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable access to the carried inventory.
    pub const fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// The facility the character is standing at, if any.
    pub fn current_place(&self) -> Option<&str> {
        self.current_place.as_deref()
    }

    /// The destination of a pending move, if any.
    pub fn target_place(&self) -> Option<&str> {
        self.target_place.as_deref()
    }

    /// The bed assigned to this character, if any.
    pub fn assigned_bed(&self) -> Option<&str> {
        self.assigned_bed.as_deref()
    }

    /// Assign a bed (config load).
    pub fn assign_bed(&mut self, bed: impl Into<String>) {
        self.assigned_bed = Some(bed.into());
    }

    /// Lifetime minutes spent thinking.
    pub const fn thinking_minutes(&self) -> u64 {
        self.thinking_minutes
    }

    /// Minutes left on an in-flight wait, 0 when not waiting.
    pub const fn wait_remaining_minutes(&self) -> u32 {
        self.wait_remaining_minutes
    }

    /// Transition to a new action state.
    ///
    /// Returns true exactly when the character just became `Idle` from a
    /// non-idle state; the caller must answer that edge with a
    /// next-command request.
    #[must_use = "an idle edge must trigger a next-command request"]
    pub fn set_action_state(&mut self, state: ActionState) -> bool {
        let previous = self.action_state;
        self.action_state = state;
        if previous != state {
            debug!(character = %self.name, from = ?previous, to = ?state, "action state");
        }
        previous != ActionState::Idle && state == ActionState::Idle
    }

    /// Begin moving toward a facility, leaving the current place.
    pub fn begin_move(&mut self, target: impl Into<String>) {
        self.current_place = None;
        self.target_place = Some(target.into());
        let _ = self.set_action_state(ActionState::Moving);
    }

    /// Resolve a pending move.
    ///
    /// On success the character arrives at the target; on failure the
    /// target is dropped. Either way the character returns to `Idle`,
    /// which yields the next-command edge.
    #[must_use = "an idle edge must trigger a next-command request"]
    pub fn finish_move(&mut self, success: bool) -> bool {
        let target = self.target_place.take();
        if success {
            self.current_place = target;
        }
        self.set_action_state(ActionState::Idle)
    }

    /// Begin eating a consumed food item.
    ///
    /// The restoration rate is the item's total nutrition spread over its
    /// eat duration; a zero-duration item restores everything at once and
    /// never enters `Eating`.
    ///
    /// Returns true if the instant path produced an idle edge (it cannot:
    /// eating is only started from `Idle`, but the funnel's contract is
    /// kept uniform).
    #[must_use = "an idle edge must trigger a next-command request"]
    pub fn begin_eating(&mut self, nutrition: f32, duration_minutes: u32) -> bool {
        if duration_minutes == 0 {
            self.stats.hunger = clamp_stat(self.stats.hunger + nutrition, self.stats.max_hunger);
            return self.set_action_state(ActionState::Idle);
        }
        self.eat_remaining_minutes = duration_minutes;
        // Denominator checked above; durations are small minute counts.
        #[allow(clippy::cast_precision_loss)]
        {
            self.nutrition_per_minute = nutrition / duration_minutes as f32;
        }
        let _ = self.set_action_state(ActionState::Eating);
        false
    }

    /// Begin a timed wait.
    pub fn begin_waiting(&mut self, minutes: u32) {
        self.wait_remaining_minutes = minutes;
        let _ = self.set_action_state(ActionState::Waiting);
    }

    /// Whether energy is already at its maximum (sleep would be useless).
    pub fn is_energy_full(&self) -> bool {
        self.stats.energy >= self.stats.max_energy
    }

    /// Whether hunger is at its maximum.
    pub fn is_hunger_full(&self) -> bool {
        self.stats.hunger >= self.stats.max_hunger
    }

    /// Apply one simulated minute of the current state's effects.
    ///
    /// Returns true when the minute completed the current action and the
    /// character became `Idle` (sleep saturated, meal finished, wait
    /// elapsed); the caller must answer with a next-command request.
    #[must_use = "an idle edge must trigger a next-command request"]
    pub fn advance_minute(&mut self) -> bool {
        match self.action_state {
            ActionState::Idle | ActionState::Moving => {
                self.drain(DRAIN_IDLE, DRAIN_IDLE);
                false
            }
            ActionState::Thinking => {
                self.drain(DRAIN_IDLE, DRAIN_IDLE);
                self.thinking_minutes = self.thinking_minutes.saturating_add(1);
                false
            }
            ActionState::Working => {
                self.drain(DRAIN_WORKING, DRAIN_WORKING);
                false
            }
            ActionState::Sleeping => {
                self.stats.hunger =
                    clamp_stat(self.stats.hunger - DRAIN_SLOW, self.stats.max_hunger);
                self.stats.energy = clamp_stat(
                    self.stats.energy + SLEEP_ENERGY_GAIN,
                    self.stats.max_energy,
                );
                if self.is_energy_full() {
                    return self.set_action_state(ActionState::Idle);
                }
                false
            }
            ActionState::Eating => {
                self.stats.hunger = clamp_stat(
                    self.stats.hunger + self.nutrition_per_minute,
                    self.stats.max_hunger,
                );
                self.eat_remaining_minutes = self.eat_remaining_minutes.saturating_sub(1);
                if self.eat_remaining_minutes == 0 {
                    self.nutrition_per_minute = 0.0;
                    return self.set_action_state(ActionState::Idle);
                }
                false
            }
            ActionState::Waiting => {
                self.drain(DRAIN_SLOW, DRAIN_SLOW);
                self.wait_remaining_minutes = self.wait_remaining_minutes.saturating_sub(1);
                if self.wait_remaining_minutes == 0 {
                    return self.set_action_state(ActionState::Idle);
                }
                false
            }
        }
    }

    fn drain(&mut self, hunger: f32, energy: f32) {
        self.stats.hunger = clamp_stat(self.stats.hunger - hunger, self.stats.max_hunger);
        self.stats.energy = clamp_stat(self.stats.energy - energy, self.stats.max_energy);
    }
}

/// Clamp a stat to `[0, max]` without `f32::clamp`'s NaN panic path.
fn clamp_stat(value: f32, max: f32) -> f32 {
    value.max(0.0).min(max)
}
