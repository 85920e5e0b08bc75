use serde::{Deserialize, Serialize};
use shelf_models::{Category, SavedSearch};

/// A category, matched across installs by exact name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub flags: i64,
}
impl From<&Category> for CategorySnapshot {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            order: category.order,
            flags: category.flags,
        }
    }
}
impl CategorySnapshot {
    pub fn to_category(&self) -> Category {
        Category {
            id: None,
            name: self.name.clone(),
            order: self.order,
            flags: self.flags,
        }
    }
}

/// A saved search, identified by `(source, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearchSnapshot {
    pub source: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Source-defined filter state, kept opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
}
impl From<&SavedSearch> for SavedSearchSnapshot {
    fn from(search: &SavedSearch) -> Self {
        Self {
            source: search.source,
            name: search.name.clone(),
            query: search.query.clone(),
            filters: search.filters.clone(),
        }
    }
}
impl SavedSearchSnapshot {
    pub fn to_saved_search(&self) -> SavedSearch {
        SavedSearch {
            id: None,
            source: self.source,
            name: self.name.clone(),
            query: self.query.clone(),
            filters: self.filters.clone(),
        }
    }
}
