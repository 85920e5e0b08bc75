use super::Transaction;
use crate::error::{ErrorKind, Result};
use crate::models::SavedSearchRow;
use exn::ResultExt;
use shelf_models::SavedSearch;

impl Transaction {
    pub async fn list_saved_searches(&mut self) -> Result<Vec<SavedSearch>> {
        let rows: Vec<SavedSearchRow> = sqlx::query_as(include_str!("../../queries/list_saved_searches.sql"))
            .fetch_all(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(rows.into_iter().map(SavedSearch::from).collect())
    }

    pub async fn find_saved_search(&mut self, source: i64, name: &str) -> Result<Option<SavedSearch>> {
        let row: Option<SavedSearchRow> = sqlx::query_as(include_str!("../../queries/find_saved_search.sql"))
            .bind(source)
            .bind(name)
            .fetch_optional(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(row.map(SavedSearch::from))
    }

    pub async fn insert_saved_search(&mut self, search: &SavedSearch) -> Result<i64> {
        let row = SavedSearchRow::from(search);
        let result = sqlx::query(include_str!("../../queries/insert_saved_search.sql"))
            .bind(row.source)
            .bind(row.name)
            .bind(row.query)
            .bind(row.filters)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use crate::repo::tests::repository;
    use shelf_models::SavedSearch;

    #[tokio::test]
    async fn test_saved_search_identity() {
        let repo = repository().await;
        let mut tx = repo.begin().await.unwrap();
        let search = SavedSearch {
            id: None,
            source: 3,
            name: "Weekly".to_string(),
            query: Some("isekai".to_string()),
            filters: Some("[]".to_string()),
        };
        let id = tx.insert_saved_search(&search).await.unwrap();
        assert!(tx.insert_saved_search(&search).await.is_err());
        let found = tx.find_saved_search(3, "Weekly").await.unwrap().unwrap();
        assert_eq!(found.id, Some(id));
        assert!(tx.find_saved_search(4, "Weekly").await.unwrap().is_none());
        assert_eq!(tx.list_saved_searches().await.unwrap().len(), 1);
    }
}
