//! Repository selection
//!
//! Menus hand out positions into the list they rendered. Positions are only
//! meaningful against that exact list, so a [`Selection`] converts them to
//! repository names straight away and resolves the names against whatever
//! the inventory holds at execution time.

use crate::inventory::RepositoryRecord;
use std::collections::HashSet;

/// Records at the given 1-based positions
///
/// Positions outside `[1, len]` are dropped; repeated positions are
/// returned once. Order follows `indices`.
pub fn select_by_indices(inventory: &[RepositoryRecord], indices: &[usize]) -> Vec<RepositoryRecord> {
    let mut seen = HashSet::new();
    indices
        .iter()
        .filter(|&&i| i >= 1 && i <= inventory.len())
        .filter(|&&i| seen.insert(i))
        .map(|&i| inventory[i - 1].clone())
        .collect()
}

/// Records whose full name contains `keyword` (case-sensitive)
///
/// An empty keyword matches everything.
pub fn select_by_keyword(inventory: &[RepositoryRecord], keyword: &str) -> Vec<RepositoryRecord> {
    inventory
        .iter()
        .filter(|r| r.full_name.contains(keyword))
        .cloned()
        .collect()
}

/// Repository names chosen by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: Vec<String>,
}

impl Selection {
    /// Capture the names behind 1-based menu positions of `rendered`
    pub fn from_indices(rendered: &[RepositoryRecord], indices: &[usize]) -> Self {
        Self::from_records(&select_by_indices(rendered, indices))
    }

    pub fn from_records(records: &[RepositoryRecord]) -> Self {
        Self {
            keys: records.iter().map(|r| r.full_name.clone()).collect(),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Current records for the selected names, in selection order
    ///
    /// Names that are no longer in `inventory` are dropped.
    pub fn resolve(&self, inventory: &[RepositoryRecord]) -> Vec<RepositoryRecord> {
        self.keys
            .iter()
            .filter_map(|key| inventory.iter().find(|r| &r.full_name == key))
            .cloned()
            .collect()
    }
}
