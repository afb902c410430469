use serde::{Deserialize, Serialize};

/// A book as persisted in the catalog.
///
/// `book_num` is the business key: unique across the catalog and never
/// rewritten once a record exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub book_num: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
impl BookRecord {
    pub fn new(book_num: impl Into<String>, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            book_num: book_num.into(),
            name: name.into(),
            description,
        }
    }

    /// Whether the mutable fields (everything except the key) match.
    pub fn same_content(&self, name: &str, description: Option<&str>) -> bool {
        self.name == name && self.description.as_deref() == description
    }
}
