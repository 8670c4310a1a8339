// Saved base widths kept for side-by-side comparison and export

use crate::types::{BaseWidth, SavedColumn};
use anyhow::Result;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Error)]
#[error("A column with base width {0}px already exists, use a different value")]
pub struct DuplicateWidthError(pub BaseWidth);

/// Storage that mirrors the saved columns. Loading never fails: unreadable data is empty.
pub trait ColumnStore {
    fn load(&self) -> Vec<SavedColumn>;
    fn save(&self, columns: &[SavedColumn]) -> Result<()>;
}

/// Ordered, unique-by-width collection of saved columns
#[derive(Debug)]
pub struct ColumnSet<S: ColumnStore> {
    columns: Vec<SavedColumn>,
    store: S,
}

impl<S: ColumnStore> ColumnSet<S> {
    // Restores from the store, keeping the first occurrence of any duplicated width
    pub fn restore(store: S) -> Self {
        let mut columns: Vec<SavedColumn> = Vec::new();
        for column in store.load() {
            if !columns.iter().any(|c| c.base_width == column.base_width) {
                columns.push(column);
            }
        }
        debug!(count = columns.len(), "restored saved columns");
        Self { columns, store }
    }

    pub fn add(&mut self, width: BaseWidth) -> Result<(), DuplicateWidthError> {
        if self.contains(width) {
            return Err(DuplicateWidthError(width));
        }
        self.columns.push(SavedColumn { base_width: width });
        debug!(%width, "saved column");
        self.persist();
        Ok(())
    }

    // Returns whether a column was removed; removing an unknown width is a no-op
    pub fn remove(&mut self, width: BaseWidth) -> bool {
        let before = self.columns.len();
        self.columns.retain(|c| c.base_width != width);
        if self.columns.len() == before {
            return false;
        }
        debug!(%width, "removed column");
        self.persist();
        true
    }

    pub fn reset_all(&mut self) {
        self.columns.clear();
        debug!("reset saved columns");
        self.persist();
    }

    pub fn contains(&self, width: BaseWidth) -> bool {
        self.columns.iter().any(|c| c.base_width == width)
    }

    pub fn widths(&self) -> impl Iterator<Item = BaseWidth> + '_ {
        self.columns.iter().map(|c| c.base_width)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    // Store failures are logged; the in-memory set stays authoritative
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.columns) {
            warn!(error = %e, "failed to persist saved columns");
        }
    }
}
