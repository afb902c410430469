use super::Cell;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One decoded spreadsheet row: header names paired with cell values, in
/// column order.
///
/// Nothing is validated here. Columns the reconciler doesn't know about are
/// kept so that outcome reports can echo the row back exactly as it arrived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    cells: Vec<(String, Cell)>,
}
impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, header: impl Into<String>, cell: impl Into<Cell>) {
        self.cells.push((header.into(), cell.into()));
    }

    /// Builder-style [`push`](Self::push), mostly useful in tests.
    pub fn with(mut self, header: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.push(header, cell);
        self
    }

    /// Cell under the given header. Headers are matched exactly.
    pub fn get(&self, header: &str) -> Option<&Cell> {
        self.cells.iter().find(|(name, _)| name == header).map(|(_, cell)| cell)
    }

    /// A row is blank when it has no cells or every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, cell)| cell.is_blank())
    }
}
impl FromIterator<(String, Cell)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (String, Cell)>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

// Rows go back to the caller as plain JSON objects, in column order.
impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, cell) in &self.cells {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}
