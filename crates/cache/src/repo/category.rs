use super::Transaction;
use crate::error::{ErrorKind, Result};
use crate::models::CategoryRow;
use exn::ResultExt;
use shelf_models::Category;

impl Transaction {
    /// All categories by sort order.
    pub async fn list_categories(&mut self) -> Result<Vec<Category>> {
        let rows: Vec<CategoryRow> = sqlx::query_as(include_str!("../../queries/list_categories.sql"))
            .fetch_all(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    pub async fn insert_category(&mut self, category: &Category) -> Result<i64> {
        let row = CategoryRow::from(category);
        let result = sqlx::query(include_str!("../../queries/insert_category.sql"))
            .bind(row.name)
            .bind(row.sort_order)
            .bind(row.flags)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.last_insert_rowid())
    }

    pub async fn categories_for_entry(&mut self, entry_id: i64) -> Result<Vec<Category>> {
        let rows: Vec<CategoryRow> = sqlx::query_as(include_str!("../../queries/list_categories_for_entry.sql"))
            .bind(entry_id)
            .fetch_all(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Put an entry into a category. Returns `false` if it already was.
    pub async fn link_entry_category(&mut self, entry_id: i64, category_id: i64) -> Result<bool> {
        let result = sqlx::query(include_str!("../../queries/link_entry_category.sql"))
            .bind(entry_id)
            .bind(category_id)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
