//! Field-level change tracking.
//!
//! Passes never persist anything; they record what they rewrote so the caller
//! can log it, show it, or flush exactly those fields.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One rewritten numeric field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Field path, e.g. `items[0].amount` or `grand_total`.
    pub field: String,
    /// Value before the pass.
    pub before: Decimal,
    /// Value after the pass.
    pub after: Decimal,
}

/// Ordered list of field changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLog(Vec<FieldChange>);

impl ChangeLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Writes `value` into `slot`, recording a change when the number differs.
    ///
    /// `field` is only evaluated when a change is recorded. Values that are
    /// numerically equal but differ in scale (`15` vs `15.00`) are written
    /// without being recorded.
    pub fn set<F>(&mut self, slot: &mut Decimal, value: Decimal, field: F)
    where
        F: FnOnce() -> String,
    {
        if *slot != value {
            self.0.push(FieldChange {
                field: field(),
                before: *slot,
                after: value,
            });
        }
        *slot = value;
    }

    /// Same as [`ChangeLog::set`] for optional fields; `None` is recorded as 0.
    pub fn set_opt<F>(&mut self, slot: &mut Option<Decimal>, value: Decimal, field: F)
    where
        F: FnOnce() -> String,
    {
        let before = slot.unwrap_or(Decimal::ZERO);
        if slot.is_none() || before != value {
            self.0.push(FieldChange {
                field: field(),
                before,
                after: value,
            });
        }
        *slot = Some(value);
    }

    /// Returns the number of recorded changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over recorded changes.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldChange> {
        self.0.iter()
    }

    /// Returns the last change recorded for `field`, if any.
    #[must_use]
    pub fn find(&self, field: &str) -> Option<&FieldChange> {
        self.0.iter().rev().find(|c| c.field == field)
    }

    /// Appends every change of `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a FieldChange;
    type IntoIter = std::slice::Iter<'a, FieldChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
