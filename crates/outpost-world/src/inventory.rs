//! Bounded item container with space accounting.
//!
//! An inventory is owned by exactly one character or facility. The only
//! mutators are [`Inventory::add`] and [`Inventory::remove`]; both are
//! fallible with no partial effects, which is what makes the
//! remove-then-add-with-rollback transfer protocol safe: a failed second
//! half can always restore the first without risking item loss.
//!
//! Invariants maintained:
//!
//! - `used_space == Σ count * space_cost` over all stacks
//! - `used_space <= total_space`
//! - no entry with count 0 persists

use std::collections::BTreeMap;

use outpost_types::{ItemId, ItemStack};
use tracing::{error, warn};

use crate::catalog::ItemCatalog;
use crate::error::WorldError;

/// A bounded container of item stacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    /// item id -> count, unique keys, counts always positive.
    items: BTreeMap<ItemId, u32>,
    used_space: u32,
    total_space: u32,
}

impl Inventory {
    /// Create an empty inventory with the given capacity.
    pub const fn new(total_space: u32) -> Self {
        Self {
            items: BTreeMap::new(),
            used_space: 0,
            total_space,
        }
    }

    /// Space consumed by the current contents.
    pub const fn used_space(&self) -> u32 {
        self.used_space
    }

    /// Total capacity.
    pub const fn total_space(&self) -> u32 {
        self.total_space
    }

    /// Units of `item` currently held; 0 if absent.
    pub fn count(&self, item: ItemId) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Whether the inventory holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over held stacks in item-id order.
    pub fn iter(&self) -> impl Iterator<Item = ItemStack> + '_ {
        self.items
            .iter()
            .map(|(&item, &count)| ItemStack::new(item, count))
    }

    /// Pure capacity pre-check: would `add` accept this stack?
    ///
    /// Used before the two-step transfer protocol to fail early. A stack
    /// that fails validation or names an unknown item is not accepted.
    pub fn accepts(&self, stack: ItemStack, items: &ItemCatalog) -> bool {
        if !stack.is_valid() {
            return false;
        }
        let Some(space_cost) = items.space_cost(stack.item) else {
            return false;
        };
        let Some(needed) = stack.count.checked_mul(space_cost) else {
            return false;
        };
        self.used_space
            .checked_add(needed)
            .is_some_and(|total| total <= self.total_space)
    }

    /// Add a stack, merging into an existing entry of the same item.
    ///
    /// Atomic: on any error nothing is mutated. Fails if the stack is
    /// invalid, the item is unknown, or the space cost does not fit.
    pub fn add(&mut self, stack: ItemStack, items: &ItemCatalog) -> Result<(), WorldError> {
        if !stack.is_valid() {
            return Err(WorldError::InvalidStack {
                item: stack.item,
                count: stack.count,
            });
        }
        let def = items.require(stack.item)?;

        let needed = stack.count.checked_mul(def.space_cost).ok_or_else(|| {
            WorldError::ArithmeticOverflow {
                context: String::from("space cost multiplication in add"),
            }
        })?;
        let new_used = self.used_space.checked_add(needed).ok_or_else(|| {
            WorldError::ArithmeticOverflow {
                context: String::from("used space addition in add"),
            }
        })?;
        if new_used > self.total_space {
            return Err(WorldError::CapacityExceeded {
                stack,
                needed,
                free: self.total_space.saturating_sub(self.used_space),
            });
        }

        let entry = self.items.entry(stack.item).or_insert(0);
        *entry = entry.checked_add(stack.count).ok_or_else(|| {
            WorldError::ArithmeticOverflow {
                context: String::from("stack count addition in add"),
            }
        })?;
        self.used_space = new_used;
        Ok(())
    }

    /// Remove a stack, deleting the entry entirely when it reaches 0.
    ///
    /// Atomic: on any error nothing is mutated. Fails if the stack is
    /// invalid, the item is unknown, or fewer units are held than asked.
    pub fn remove(&mut self, stack: ItemStack, items: &ItemCatalog) -> Result<(), WorldError> {
        if !stack.is_valid() {
            return Err(WorldError::InvalidStack {
                item: stack.item,
                count: stack.count,
            });
        }
        let def = items.require(stack.item)?;

        let held = self.count(stack.item);
        if held < stack.count {
            return Err(WorldError::InsufficientItems {
                item: stack.item,
                requested: stack.count,
                available: held,
            });
        }

        let freed = stack.count.checked_mul(def.space_cost).ok_or_else(|| {
            WorldError::ArithmeticOverflow {
                context: String::from("space cost multiplication in remove"),
            }
        })?;

        let remaining = held.saturating_sub(stack.count);
        if remaining == 0 {
            self.items.remove(&stack.item);
        } else {
            self.items.insert(stack.item, remaining);
        }
        // Floor at 0 like the accounting it mirrors; held >= count was
        // checked above so this cannot actually saturate.
        self.used_space = self.used_space.saturating_sub(freed);
        Ok(())
    }
}

/// Move a stack from one inventory to another with rollback.
///
/// Remove-then-add: if the destination rejects the stack, it is added back
/// to the source, leaving both inventories in their pre-call state. The
/// restore cannot fail under single-threaded execution (the space was just
/// freed); if it somehow does, that is an item-loss anomaly and is logged
/// at error level.
pub fn transfer(
    from: &mut Inventory,
    to: &mut Inventory,
    stack: ItemStack,
    items: &ItemCatalog,
) -> Result<(), WorldError> {
    from.remove(stack, items)?;
    if let Err(err) = to.add(stack, items) {
        warn!(?stack, %err, "transfer rejected by destination, rolling back");
        if let Err(lost) = from.add(stack, items) {
            error!(?stack, %lost, "transfer rollback failed, items lost");
        }
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> ItemCatalog {
        ItemCatalog::standard()
    }

    /// Recompute used space from the stacks and compare with the counter.
    fn space_is_consistent(inv: &Inventory, items: &ItemCatalog) -> bool {
        let recomputed: u32 = inv
            .iter()
            .map(|s| s.count * items.space_cost(s.item).unwrap_or(0))
            .sum();
        recomputed == inv.used_space() && inv.used_space() <= inv.total_space()
    }

    #[test]
    fn add_merges_stacks() {
        let items = catalog();
        let mut inv = Inventory::new(50);
        inv.add(ItemStack::new(ItemId(1001), 3), &items).unwrap();
        inv.add(ItemStack::new(ItemId(1001), 2), &items).unwrap();
        assert_eq!(inv.count(ItemId(1001)), 5);
        assert_eq!(inv.used_space(), 5);
        assert!(space_is_consistent(&inv, &items));
    }

    #[test]
    fn add_rejects_invalid_stack() {
        let items = catalog();
        let mut inv = Inventory::new(50);
        assert!(inv.add(ItemStack::new(ItemId(0), 5), &items).is_err());
        assert!(inv.add(ItemStack::new(ItemId(1001), 0), &items).is_err());
        assert!(inv.is_empty());
    }

    #[test]
    fn add_rejects_unknown_item() {
        let items = catalog();
        let mut inv = Inventory::new(50);
        assert!(inv.add(ItemStack::new(ItemId(4242), 1), &items).is_err());
        assert!(inv.is_empty());
    }

    #[test]
    fn add_respects_capacity_with_space_cost() {
        let items = catalog();
        // Cloth costs 2 space per unit.
        let mut inv = Inventory::new(5);
        inv.add(ItemStack::new(ItemId(2002), 2), &items).unwrap();
        assert_eq!(inv.used_space(), 4);
        // A third cloth would need 2 more, only 1 free.
        assert!(inv.add(ItemStack::new(ItemId(2002), 1), &items).is_err());
        assert_eq!(inv.count(ItemId(2002)), 2);
        assert!(space_is_consistent(&inv, &items));
    }

    #[test]
    fn remove_deletes_entry_at_zero() {
        let items = catalog();
        let mut inv = Inventory::new(50);
        inv.add(ItemStack::new(ItemId(1002), 4), &items).unwrap();
        inv.remove(ItemStack::new(ItemId(1002), 4), &items).unwrap();
        assert_eq!(inv.count(ItemId(1002)), 0);
        assert!(inv.is_empty());
        assert_eq!(inv.used_space(), 0);
    }

    #[test]
    fn remove_rejects_shortfall_without_mutation() {
        let items = catalog();
        let mut inv = Inventory::new(50);
        inv.add(ItemStack::new(ItemId(1002), 2), &items).unwrap();
        let result = inv.remove(ItemStack::new(ItemId(1002), 3), &items);
        assert!(result.is_err());
        assert_eq!(inv.count(ItemId(1002)), 2);
        assert!(space_is_consistent(&inv, &items));
    }

    #[test]
    fn accepts_is_a_pure_precheck() {
        let items = catalog();
        let inv = Inventory::new(3);
        assert!(inv.accepts(ItemStack::new(ItemId(1001), 3), &items));
        assert!(!inv.accepts(ItemStack::new(ItemId(1001), 4), &items));
        assert!(!inv.accepts(ItemStack::new(ItemId(0), 1), &items));
        assert!(!inv.accepts(ItemStack::new(ItemId(4242), 1), &items));
    }

    #[test]
    fn transfer_moves_items() {
        let items = catalog();
        let mut from = Inventory::new(50);
        let mut to = Inventory::new(50);
        from.add(ItemStack::new(ItemId(1001), 5), &items).unwrap();

        transfer(&mut from, &mut to, ItemStack::new(ItemId(1001), 3), &items).unwrap();
        assert_eq!(from.count(ItemId(1001)), 2);
        assert_eq!(to.count(ItemId(1001)), 3);
        assert!(space_is_consistent(&from, &items));
        assert!(space_is_consistent(&to, &items));
    }

    #[test]
    fn transfer_rolls_back_when_destination_is_full() {
        let items = catalog();
        let mut from = Inventory::new(50);
        let mut to = Inventory::new(2);
        from.add(ItemStack::new(ItemId(1001), 5), &items).unwrap();
        to.add(ItemStack::new(ItemId(1002), 2), &items).unwrap();

        let before_from = from.clone();
        let before_to = to.clone();
        let result = transfer(&mut from, &mut to, ItemStack::new(ItemId(1001), 3), &items);
        assert!(result.is_err());
        // Net zero item change on both sides.
        assert_eq!(from, before_from);
        assert_eq!(to, before_to);
    }

    #[test]
    fn transfer_fails_on_source_shortfall() {
        let items = catalog();
        let mut from = Inventory::new(50);
        let mut to = Inventory::new(50);
        from.add(ItemStack::new(ItemId(1001), 1), &items).unwrap();

        let result = transfer(&mut from, &mut to, ItemStack::new(ItemId(1001), 2), &items);
        assert!(result.is_err());
        assert_eq!(from.count(ItemId(1001)), 1);
        assert!(to.is_empty());
    }

    #[test]
    fn used_space_never_exceeds_total_over_random_ops() {
        let items = catalog();
        let mut inv = Inventory::new(10);
        // Mixed adds and removes, some failing; the invariant holds after
        // every successful operation.
        let ops: [(bool, u32, u32); 8] = [
            (true, 1001, 4),
            (true, 2002, 4),
            (false, 1001, 2),
            (true, 2003, 3),
            (false, 2002, 1),
            (true, 1002, 6),
            (false, 1001, 2),
            (true, 2003, 1),
        ];
        for (is_add, id, count) in ops {
            let stack = ItemStack::new(ItemId(id), count);
            if is_add {
                let _ = inv.add(stack, &items);
            } else {
                let _ = inv.remove(stack, &items);
            }
            assert!(space_is_consistent(&inv, &items));
        }
    }
}
