use shelf_models::SavedSearch;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SavedSearchRow {
    pub(crate) id: Option<i64>,
    pub(crate) source: i64,
    pub(crate) name: String,
    pub(crate) query: Option<String>,
    pub(crate) filters: Option<String>,
}
impl From<&SavedSearch> for SavedSearchRow {
    fn from(search: &SavedSearch) -> Self {
        Self {
            id: search.id,
            source: search.source,
            name: search.name.clone(),
            query: search.query.clone(),
            filters: search.filters.clone(),
        }
    }
}
impl From<SavedSearchRow> for SavedSearch {
    fn from(row: SavedSearchRow) -> Self {
        Self {
            id: row.id,
            source: row.source,
            name: row.name,
            query: row.query,
            filters: row.filters,
        }
    }
}
