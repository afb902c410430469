//! Header row handling shared by both decoders.

use crate::models::{Cell, RowRecord};
use std::collections::HashSet;

/// Normalized header names for a table.
///
/// Blank headers get a positional name (`__column_<n>`, 1-based) and repeated
/// headers get a numeric suffix (`name`, `name_1`, `name_2`, ...) so that every
/// column of a decoded row has a distinct name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Headers(Vec<String>);
impl Headers {
    pub(crate) fn new(raw: impl IntoIterator<Item = Option<String>>) -> Self {
        let mut seen = HashSet::new();
        let names = raw
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let base = match name {
                    Some(name) if !name.is_empty() => name,
                    _ => positional(index),
                };
                let mut candidate = base.clone();
                let mut suffix = 0;
                while !seen.insert(candidate.clone()) {
                    suffix += 1;
                    candidate = format!("{base}_{suffix}");
                }
                candidate
            })
            .collect();
        Self(names)
    }

    /// Pair cells with header names. Cells past the end of the header row get
    /// a positional name. Returns `None` for blank rows.
    pub(crate) fn row(&self, cells: impl IntoIterator<Item = Cell>) -> Option<RowRecord> {
        let row: RowRecord = cells
            .into_iter()
            .enumerate()
            .map(|(index, cell)| (self.0.get(index).cloned().unwrap_or_else(|| positional(index)), cell))
            .collect();
        (!row.is_blank()).then_some(row)
    }
}

fn positional(index: usize) -> String {
    format!("__column_{}", index + 1)
}
