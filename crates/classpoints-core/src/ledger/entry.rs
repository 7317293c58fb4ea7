use std::collections::BTreeMap;

use crate::category::Category;

/// A single score entry for one student, submitted to the ledger at once.
///
/// Categories without a delta are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreEntry {
    pub id: String,
    pub name: String,
    pub deltas: BTreeMap<Category, i64>,
}

impl ScoreEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            deltas: BTreeMap::new(),
        }
    }

    /// Set the delta for a category. A later call for the same category wins.
    pub fn with_delta(mut self, category: Category, delta: i64) -> Self {
        self.set_delta(category, delta);
        self
    }

    pub fn set_delta(&mut self, category: Category, delta: i64) {
        self.deltas.insert(category, delta);
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}
