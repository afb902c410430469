mod book;
mod cell;
mod row;

pub use self::book::BookRecord;
pub use self::cell::Cell;
pub use self::row::RowRecord;

/// Column headers the reconciler reads; every other column is carried along
/// untouched.
pub mod fields {
    pub const BOOK_NUM: &str = "bookNum";
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
}
