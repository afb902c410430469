use bookshelf_ingest::BookRecord;

#[derive(sqlx::FromRow)]
pub(crate) struct BookRow {
    book_num: String,
    name: String,
    description: Option<String>,
}
impl From<BookRow> for BookRecord {
    fn from(row: BookRow) -> Self {
        Self {
            book_num: row.book_num,
            name: row.name,
            description: row.description,
        }
    }
}
