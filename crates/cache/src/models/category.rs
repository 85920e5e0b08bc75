use shelf_models::Category;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CategoryRow {
    pub(crate) id: Option<i64>,
    pub(crate) name: String,
    pub(crate) sort_order: i64,
    pub(crate) flags: i64,
}
impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            sort_order: category.order,
            flags: category.flags,
        }
    }
}
impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            order: row.sort_order,
            flags: row.flags,
        }
    }
}
