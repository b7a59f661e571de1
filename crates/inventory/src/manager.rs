//! Inventory manager: the sole owner and mutator of the catalog and ledger.
//!
//! Both stores live behind one `RwLock`. Every mutation holds the write lock
//! for its whole lookup-check-mutate section, so concurrent callers can never
//! observe (or act on) a half-applied change. Readers get cloned snapshots.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::Serialize;

use tracker_core::{Entity, InventoryError, InventoryResult};

use crate::item::Item;
use crate::record::{eq_ignore_case, CheckoutRecord};

/// Catalog pre-populated when no other seed list is configured.
pub const DEFAULT_ITEMS: &[(&str, i64)] = &[("Calculator", 10), ("Pencil", 30), ("iPad", 5)];

/// Point-in-time report of item availability and outstanding loans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub item_availability: Vec<Item>,
    pub missing_items: Vec<CheckoutRecord>,
}

#[derive(Debug, Default)]
struct State {
    catalog: HashMap<String, Item>,
    ledger: Vec<CheckoutRecord>,
}

#[derive(Debug, Default)]
pub struct InventoryManager {
    state: RwLock<State>,
}

impl InventoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager pre-populated with `items`. The first invalid or duplicate
    /// entry aborts with its error.
    pub fn with_items<'a, I>(items: I) -> InventoryResult<Self>
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let manager = Self::new();
        for (name, total) in items {
            manager.initialize_item(name, total)?;
        }
        Ok(manager)
    }

    // Mutations never leave `State` inconsistent before a possible panic, so a
    // poisoned lock still guards valid data.
    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a new item with every unit available.
    ///
    /// Names that differ only by case count as duplicates, since loans are
    /// matched to items case-insensitively.
    pub fn initialize_item(&self, name: &str, total: i64) -> InventoryResult<Item> {
        let mut state = self.write();
        if state.catalog.keys().any(|k| eq_ignore_case(k, name)) {
            tracing::debug!(item = name, "rejected duplicate item");
            return Err(InventoryError::duplicate_item(name));
        }
        let item = Item::new(name, total)?;
        state.catalog.insert(item.id().to_owned(), item.clone());

        tracing::info!(item = name, total, "item initialized");
        Ok(item)
    }

    /// Lend one unit of `item_name` to `student`.
    pub fn checkout_item(&self, student: &str, item_name: &str) -> InventoryResult<String> {
        let mut state = self.write();
        let item = state
            .catalog
            .get_mut(item_name)
            .ok_or_else(|| InventoryError::unknown_item(item_name))?;

        if !item.decrement_available() {
            tracing::debug!(item = item_name, student, "checkout rejected: none available");
            return Err(InventoryError::none_available(item_name));
        }
        let available = item.available_count();
        state
            .ledger
            .push(CheckoutRecord::new(student, item_name, Utc::now()));

        tracing::info!(item = item_name, student, available, "item checked out");
        Ok(format!("'{item_name}' checked out to {student}."))
    }

    /// Take back one unit of `item_name` from `student`.
    ///
    /// When the student holds several units, the oldest loan is closed; loans
    /// of the same item to the same student are interchangeable.
    pub fn checkin_item(&self, student: &str, item_name: &str) -> InventoryResult<String> {
        let mut state = self.write();
        let State { catalog, ledger } = &mut *state;

        let item = catalog
            .get_mut(item_name)
            .ok_or_else(|| InventoryError::unknown_item(item_name))?;

        let Some(pos) = ledger.iter().position(|r| r.matches(student, item_name)) else {
            tracing::debug!(item = item_name, student, "checkin rejected: no matching loan");
            return Err(InventoryError::no_matching_record(student, item_name));
        };
        ledger.remove(pos);

        // Every open loan accounts for one unit below the total.
        let returned = item.increment_available();
        debug_assert!(returned, "available count for '{item_name}' already at total");
        if !returned {
            tracing::error!(
                item = item_name,
                total = item.total_count(),
                "ledger and counts out of sync: available count already at total"
            );
        }

        tracing::info!(
            item = item_name,
            student,
            available = item.available_count(),
            "item checked in"
        );
        Ok(format!("'{item_name}' returned by {student}."))
    }

    /// Set the number of units owned, keeping the checked-out count fixed.
    pub fn update_item_total(&self, item_name: &str, new_total: i64) -> InventoryResult<String> {
        let mut state = self.write();
        let item = state
            .catalog
            .get_mut(item_name)
            .ok_or_else(|| InventoryError::unknown_item(item_name))?;

        let previous = item.total_count();
        item.set_total(new_total)?;

        tracing::info!(item = item_name, previous, total = new_total, "item total updated");
        Ok(format!("Total count for '{item_name}' updated to {new_total}."))
    }

    /// Remove an item that has no units checked out.
    pub fn delete_item(&self, item_name: &str) -> InventoryResult<String> {
        let mut state = self.write();
        if !state.catalog.contains_key(item_name) {
            return Err(InventoryError::unknown_item(item_name));
        }

        let outstanding = state.ledger.iter().filter(|r| r.refers_to(item_name)).count();
        if outstanding > 0 {
            tracing::debug!(item = item_name, outstanding, "delete rejected: item in use");
            return Err(InventoryError::item_in_use(item_name, outstanding));
        }
        state.catalog.remove(item_name);

        tracing::info!(item = item_name, "item deleted");
        Ok(format!("'{item_name}' removed from inventory."))
    }

    /// Names of all tracked items, sorted.
    pub fn tracked_item_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().catalog.keys().cloned().collect();
        names.sort();
        names
    }

    /// Snapshot of every item's counts, sorted by name.
    pub fn item_counts(&self) -> Vec<Item> {
        sorted_items(&self.read().catalog)
    }

    /// Snapshot of outstanding loans, oldest first.
    pub fn missing_items(&self) -> Vec<CheckoutRecord> {
        self.read().ledger.clone()
    }

    /// Item counts and outstanding loans taken from the same instant.
    pub fn summary(&self) -> Summary {
        let state = self.read();
        Summary {
            item_availability: sorted_items(&state.catalog),
            missing_items: state.ledger.clone(),
        }
    }
}

fn sorted_items(catalog: &HashMap<String, Item>) -> Vec<Item> {
    let mut items: Vec<Item> = catalog.values().cloned().collect();
    items.sort_by(|a, b| a.id().cmp(b.id()));
    items
}
