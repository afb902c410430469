use crate::error::{Error, ErrorKind};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// A supported upload encoding, selected from the declared media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Comma-delimited UTF-8 text (`text/csv`).
    Csv,
    /// Office Open XML spreadsheet (`.xlsx`).
    Xlsx,
}
impl MediaType {
    pub const CSV: &'static str = "text/csv";
    pub const XLSX: &'static str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => Self::CSV,
            Self::Xlsx => Self::XLSX,
        }
    }
}
impl FromStr for MediaType {
    type Err = Error;
    /// Parameters (`; charset=utf-8`) are ignored and the essence is compared
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(Self::CSV) {
            Ok(Self::Csv)
        } else if essence.eq_ignore_ascii_case(Self::XLSX) {
            Ok(Self::Xlsx)
        } else {
            exn::bail!(ErrorKind::UnsupportedMediaType(s.to_string()))
        }
    }
}
impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
