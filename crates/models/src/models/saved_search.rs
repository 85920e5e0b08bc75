/// A named query against one source, identified by `(source, name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSearch {
    pub id: Option<i64>,
    pub source: i64,
    pub name: String,
    pub query: Option<String>,
    /// Source-defined filter state, serialized as JSON
    pub filters: Option<String>,
}
