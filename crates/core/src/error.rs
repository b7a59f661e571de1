//! Inventory error model.

use thiserror::Error;

/// Result type used by every inventory operation.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Business failure raised by the inventory manager.
///
/// All variants are local, recoverable outcomes reported to the immediate
/// caller. None of them indicate a fault in the process itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// An item with this name is already tracked.
    #[error("item '{0}' is already tracked")]
    DuplicateItem(String),

    /// A count was negative, or an available count exceeded its total.
    #[error("invalid quantity {0}: counts cannot be negative or exceed the total")]
    InvalidQuantity(i64),

    /// An item name was empty or whitespace.
    #[error("item name cannot be empty")]
    InvalidName,

    /// The catalog has no item with this name.
    #[error("item type '{0}' is not tracked")]
    UnknownItem(String),

    /// Every unit of the item is currently checked out.
    #[error("sorry, no '{0}' are currently available")]
    NoneAvailable(String),

    /// The ledger has no loan of this item to this student.
    #[error("system does not show {student} having a '{item}'; check for typos")]
    NoMatchingRecord { student: String, item: String },

    /// Shrinking the total would leave fewer units than are checked out.
    #[error("cannot set total to {requested}; there are currently {checked_out} items checked out")]
    BelowCheckedOut { requested: i64, checked_out: i64 },

    /// The item still has outstanding loans.
    #[error("item '{item}' still has {outstanding} unit(s) checked out")]
    ItemInUse { item: String, outstanding: usize },
}

impl InventoryError {
    pub fn duplicate_item(name: impl Into<String>) -> Self {
        Self::DuplicateItem(name.into())
    }

    pub fn invalid_quantity(value: i64) -> Self {
        Self::InvalidQuantity(value)
    }

    pub fn unknown_item(name: impl Into<String>) -> Self {
        Self::UnknownItem(name.into())
    }

    pub fn none_available(name: impl Into<String>) -> Self {
        Self::NoneAvailable(name.into())
    }

    pub fn no_matching_record(student: impl Into<String>, item: impl Into<String>) -> Self {
        Self::NoMatchingRecord {
            student: student.into(),
            item: item.into(),
        }
    }

    pub fn below_checked_out(requested: i64, checked_out: i64) -> Self {
        Self::BelowCheckedOut {
            requested,
            checked_out,
        }
    }

    pub fn item_in_use(item: impl Into<String>, outstanding: usize) -> Self {
        Self::ItemInUse {
            item: item.into(),
            outstanding,
        }
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateItem(_) => "duplicate_item",
            Self::InvalidQuantity(_) => "invalid_quantity",
            Self::InvalidName => "invalid_name",
            Self::UnknownItem(_) => "unknown_item",
            Self::NoneAvailable(_) => "none_available",
            Self::NoMatchingRecord { .. } => "no_matching_record",
            Self::BelowCheckedOut { .. } => "below_checked_out",
            Self::ItemInUse { .. } => "item_in_use",
        }
    }

    /// True for failures caused by the current state rather than by the input.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ItemInUse { .. })
    }
}
