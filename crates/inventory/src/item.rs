use serde::{Deserialize, Serialize};

use tracker_core::{Entity, InventoryError, InventoryResult};

/// A tracked classroom resource type.
///
/// Invariant: `0 <= available_count <= total_count`.
///
/// Deserialization goes through the same checks as the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ItemCounts")]
pub struct Item {
    name: String,
    total_count: i64,
    available_count: i64,
}

impl Item {
    /// Create an item with every unit available.
    pub fn new(name: impl Into<String>, total: i64) -> InventoryResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InventoryError::InvalidName);
        }
        if total < 0 {
            return Err(InventoryError::invalid_quantity(total));
        }
        Ok(Self {
            name,
            total_count: total,
            available_count: total,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn available_count(&self) -> i64 {
        self.available_count
    }

    /// Units currently out with students.
    pub fn checked_out(&self) -> i64 {
        self.total_count - self.available_count
    }

    /// Take one unit. Returns `false` when none are left.
    pub(crate) fn decrement_available(&mut self) -> bool {
        if self.available_count > 0 {
            self.available_count -= 1;
            true
        } else {
            false
        }
    }

    /// Return one unit. Returns `false` (and changes nothing) at the cap.
    pub(crate) fn increment_available(&mut self) -> bool {
        if self.available_count < self.total_count {
            self.available_count += 1;
            true
        } else {
            false
        }
    }

    /// Change the total while keeping the number of checked-out units fixed.
    pub(crate) fn set_total(&mut self, new_total: i64) -> InventoryResult<()> {
        if new_total < 0 {
            return Err(InventoryError::invalid_quantity(new_total));
        }
        let checked_out = self.checked_out();
        if new_total < checked_out {
            return Err(InventoryError::below_checked_out(new_total, checked_out));
        }
        self.available_count += new_total - self.total_count;
        self.total_count = new_total;
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemCounts {
    name: String,
    total_count: i64,
    available_count: i64,
}

impl TryFrom<ItemCounts> for Item {
    type Error = InventoryError;

    fn try_from(raw: ItemCounts) -> Result<Self, Self::Error> {
        let mut item = Item::new(raw.name, raw.total_count)?;
        if !(0..=item.total_count).contains(&raw.available_count) {
            return Err(InventoryError::invalid_quantity(raw.available_count));
        }
        item.available_count = raw.available_count;
        Ok(item)
    }
}

impl Entity for Item {
    type Id = str;

    fn id(&self) -> &str {
        &self.name
    }
}
