use crate::error::{ErrorKind, Result};
use serde::{Serialize, Serializer};

/// The untyped value of a single spreadsheet cell.
///
/// CSV only ever produces [`Text`](Self::Text); workbooks produce whatever
/// type the cell was stored as. Date and time cells are carried as their
/// serial number.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A spreadsheet error value, e.g. `#DIV/0!`.
    Error(String),
}
impl Cell {
    /// Empty cells and empty strings both count as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Coerce the cell to its text form.
    ///
    /// Identifiers typed into a spreadsheet come back as numbers, and `1`
    /// must match a stored `"1"`, so integral floats are written without a
    /// fractional part. An empty cell has no text form (`None`); an empty
    /// string stays an empty string.
    pub fn to_text(&self) -> Result<Option<String>> {
        Ok(Some(match self {
            Self::Empty => return Ok(None),
            Self::Text(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) if !f.is_finite() => exn::bail!(ErrorKind::NonFiniteNumber),
            Self::Float(f) if f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f) => {
                (*f as i64).to_string()
            },
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Error(e) => exn::bail!(ErrorKind::CellError(e.clone())),
        }))
    }
}
impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}
impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_none(),
            Self::Text(s) | Self::Error(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}
