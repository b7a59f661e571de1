use chrono::{DateTime, Utc};
use serde::Serialize;

/// One unit of one item currently out with one student.
///
/// Records carry no id: two loans of the same item to the same student are
/// interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRecord {
    pub student_name: String,
    pub item_name: String,
    pub checked_out_at: DateTime<Utc>,
}

impl CheckoutRecord {
    pub fn new(
        student_name: impl Into<String>,
        item_name: impl Into<String>,
        checked_out_at: DateTime<Utc>,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            item_name: item_name.into(),
            checked_out_at,
        }
    }

    /// Case-insensitive match on both student and item.
    pub fn matches(&self, student: &str, item: &str) -> bool {
        eq_ignore_case(&self.student_name, student) && self.refers_to(item)
    }

    /// Case-insensitive match on the item only.
    pub fn refers_to(&self, item: &str) -> bool {
        eq_ignore_case(&self.item_name, item)
    }
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
