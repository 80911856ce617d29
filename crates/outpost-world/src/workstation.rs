//! Production facility work cycle (stove and workstation).
//!
//! Both concrete facilities run the same pipeline over different recipe
//! sets, so one type covers them, distinguished by [`FacilityKind`].
//!
//! The facility owns a staging inventory: ingredients are put into it by
//! characters, products come out of it. A standing-order queue holds
//! player-authored quotas; it is independent of the in-flight task the
//! bound worker chose. The per-minute advance is driven by the simulation
//! core, which supplies the bound worker's "actually working" flag and
//! applies the returned outcome (releasing the worker where required).

use std::collections::BTreeMap;

use outpost_types::{FacilityKind, ItemId, ItemStack, TaskDef, TaskId};
use tracing::{debug, info, warn};

use crate::catalog::{ItemCatalog, TaskCatalog};
use crate::error::WorldError;
use crate::inventory::Inventory;

/// Staging inventory capacity for stoves and workstations.
const STAGING_SPACE: u32 = 50;

/// What a production facility did during one simulated minute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkOutcome {
    /// No worker bound, worker not actually working, or no task set.
    Idle,
    /// One qualifying minute of progress was accrued.
    InProgress {
        /// Progress after this minute.
        progress: u32,
        /// The recipe's workload threshold.
        workload: u32,
    },
    /// Ingredients were missing on the first qualifying minute; the worker
    /// was released and the cycle aborted with nothing consumed.
    MissingIngredients {
        /// The task that could not start.
        task: TaskId,
        /// The worker that was released.
        released: String,
    },
    /// The workload threshold was reached: ingredients consumed, one unit
    /// of product staged, worker released, standing orders settled.
    Completed {
        /// The completed task.
        task: TaskId,
        /// The product added to the staging inventory.
        product: ItemId,
        /// The worker that was released.
        released: String,
    },
}

/// A stove or workstation with its staging inventory and order queue.
#[derive(Debug, Clone)]
pub struct ProductionFacility {
    name: String,
    kind: FacilityKind,
    /// Standing orders: task id -> remaining count. Order irrelevant.
    orders: BTreeMap<TaskId, u32>,
    /// Weak link to the bound worker, by registry name.
    worker: Option<String>,
    /// The in-flight task; [`TaskId::NONE`] when none.
    current_task: TaskId,
    work_progress: u32,
    inventory: Inventory,
}

impl ProductionFacility {
    /// Create a stove.
    pub fn stove(name: impl Into<String>) -> Self {
        Self::new(name, FacilityKind::Stove)
    }

    /// Create a workstation.
    pub fn workstation(name: impl Into<String>) -> Self {
        Self::new(name, FacilityKind::WorkStation)
    }

    fn new(name: impl Into<String>, kind: FacilityKind) -> Self {
        Self {
            name: name.into(),
            kind,
            orders: BTreeMap::new(),
            worker: None,
            current_task: TaskId::NONE,
            work_progress: 0,
            inventory: Inventory::new(STAGING_SPACE),
        }
    }

    /// Registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// [`FacilityKind::Stove`] or [`FacilityKind::WorkStation`].
    pub const fn kind(&self) -> FacilityKind {
        self.kind
    }

    /// The bound worker's name, if any.
    pub fn worker(&self) -> Option<&str> {
        self.worker.as_deref()
    }

    /// The in-flight task id; [`TaskId::NONE`] when no task is bound.
    pub const fn current_task(&self) -> TaskId {
        self.current_task
    }

    /// Qualifying minutes accrued toward the in-flight task.
    pub const fn work_progress(&self) -> u32 {
        self.work_progress
    }

    /// The staging inventory.
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable access to the staging inventory (transfers, config load).
    pub const fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// The standing-order queue.
    pub const fn orders(&self) -> &BTreeMap<TaskId, u32> {
        &self.orders
    }

    /// Add `quantity` to the standing order for `task`.
    ///
    /// A zero quantity is ignored; an empty order would sit in the queue
    /// until an unrelated completion settled it.
    pub fn add_order(&mut self, task: TaskId, quantity: u32) {
        if quantity == 0 {
            warn!(facility = %self.name, %task, "zero-count order ignored");
            return;
        }
        let entry = self.orders.entry(task).or_insert(0);
        *entry = entry.saturating_add(quantity);
        debug!(facility = %self.name, %task, remaining = *entry, "standing order updated");
    }

    /// Drop the standing order for `task` entirely.
    pub fn cancel_order(&mut self, task: TaskId) {
        self.orders.remove(&task);
    }

    /// Bind a worker and the specific task they intend to perform.
    ///
    /// Resets work progress. Binding replaces any previous worker; the
    /// in-flight progress of the replaced worker is cancelled.
    pub fn set_worker(&mut self, worker: impl Into<String>, task: TaskId) {
        let worker = worker.into();
        if let Some(previous) = self.worker.as_deref()
            && previous != worker
        {
            warn!(
                facility = %self.name,
                previous,
                new = %worker,
                "replacing bound worker, in-flight progress cancelled"
            );
        }
        self.worker = Some(worker);
        self.current_task = task;
        self.work_progress = 0;
    }

    /// Clear the worker binding and cancel in-flight progress.
    pub fn clear_worker(&mut self) {
        self.worker = None;
        self.current_task = TaskId::NONE;
        self.work_progress = 0;
    }

    /// Advance the work cycle by one simulated minute.
    ///
    /// `worker_is_working` is the bound worker's actual action state as
    /// observed by the simulation core; minutes where the worker exists
    /// but is not in the Working state accrue nothing.
    ///
    /// On the first qualifying minute of a task the recipe's ingredients
    /// are checked against the staging inventory; a shortfall aborts the
    /// cycle and releases the worker with nothing consumed. On reaching
    /// the workload threshold the ingredients are consumed, one unit of
    /// product is staged, the worker is released, and a matching standing
    /// order is decremented.
    pub fn advance_minute(
        &mut self,
        worker_is_working: bool,
        tasks: &TaskCatalog,
        items: &ItemCatalog,
    ) -> Result<WorkOutcome, WorldError> {
        let Some(worker) = self.worker.clone() else {
            return Ok(WorkOutcome::Idle);
        };
        if !worker_is_working || !self.current_task.is_some() {
            return Ok(WorkOutcome::Idle);
        }

        let task = self.current_task;
        let def = tasks.require(task)?;

        // First qualifying minute: verify the full ingredient list up
        // front so a doomed task never consumes anything.
        if self.work_progress == 0 && !self.has_ingredients(def) {
            warn!(
                facility = %self.name,
                %task,
                worker = %worker,
                "missing ingredients, releasing worker"
            );
            self.clear_worker();
            return Ok(WorkOutcome::MissingIngredients {
                task,
                released: worker,
            });
        }

        self.work_progress = self.work_progress.saturating_add(1);
        if self.work_progress < def.workload {
            return Ok(WorkOutcome::InProgress {
                progress: self.work_progress,
                workload: def.workload,
            });
        }

        // Threshold reached: consume ingredients, stage the product.
        let consumed = self.consume_ingredients(def, items);
        if consumed {
            if let Err(err) = self
                .inventory
                .add(ItemStack::new(def.product, 1), items)
            {
                warn!(
                    facility = %self.name,
                    %task,
                    %err,
                    "staging inventory rejected the product"
                );
            }
        } else {
            // Detectable inconsistency: the task ran to completion but the
            // ingredients checked at start are no longer all present. The
            // product is withheld; the worker is still released below
            // because their obligation ends regardless of outcome.
            warn!(
                facility = %self.name,
                %task,
                "ingredient consumption failed at completion, product withheld"
            );
        }

        self.clear_worker();
        self.settle_order(task);
        info!(facility = %self.name, %task, worker = %worker, "task completed");
        Ok(WorkOutcome::Completed {
            task,
            product: def.product,
            released: worker,
        })
    }

    /// Whether the staging inventory holds every ingredient stack.
    fn has_ingredients(&self, def: &TaskDef) -> bool {
        def.ingredients
            .iter()
            .all(|stack| self.inventory.count(stack.item) >= stack.count)
    }

    /// Remove every ingredient stack; false if any removal failed.
    ///
    /// Removals are attempted in order and not rolled back on failure --
    /// by the time this runs the availability check already passed at task
    /// start, so a failure here is the logged anomaly path, not a
    /// recoverable precondition.
    fn consume_ingredients(&mut self, def: &TaskDef, items: &ItemCatalog) -> bool {
        let mut all_ok = true;
        for stack in &def.ingredients {
            if let Err(err) = self.inventory.remove(*stack, items) {
                warn!(facility = %self.name, ?stack, %err, "ingredient removal failed");
                all_ok = false;
            }
        }
        all_ok
    }

    /// Decrement the standing order matching a completed task, removing it
    /// once the quota is fulfilled. Tasks with no matching order are
    /// surplus production and leave the queue untouched.
    fn settle_order(&mut self, task: TaskId) {
        if let Some(remaining) = self.orders.get_mut(&task) {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.orders.remove(&task);
                info!(facility = %self.name, %task, "standing order fulfilled");
            }
        }
    }
}
