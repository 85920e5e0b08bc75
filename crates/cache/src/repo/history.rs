use super::{Transaction, expect_one};
use crate::error::{ErrorKind, Result};
use crate::models::{HistoryRow, HistoryUrlRow};
use exn::{OptionExt, ResultExt};
use shelf_models::History;

impl Transaction {
    /// Reading history of an entry, keyed by chapter URL, most recent first.
    pub async fn history_for_entry(&mut self, entry_id: i64) -> Result<Vec<(String, History)>> {
        let rows: Vec<HistoryUrlRow> = sqlx::query_as(include_str!("../../queries/list_history_for_entry.sql"))
            .bind(entry_id)
            .fetch_all(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(|r| r.try_into()).collect()
    }

    pub async fn find_history_by_chapter(&mut self, chapter_id: i64) -> Result<Option<History>> {
        let row: Option<HistoryRow> = sqlx::query_as(include_str!("../../queries/find_history_by_chapter.sql"))
            .bind(chapter_id)
            .fetch_optional(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(|r| r.try_into()).transpose()
    }

    pub async fn insert_history(&mut self, history: &History) -> Result<i64> {
        let row = HistoryRow::from(history);
        let result = sqlx::query(include_str!("../../queries/insert_history.sql"))
            .bind(row.chapter_id)
            .bind(row.last_read)
            .bind(row.time_read)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update_history(&mut self, history: &History) -> Result<()> {
        let row = HistoryRow::from(history);
        let id = row.id.ok_or_raise(|| ErrorKind::MissingId("history"))?;
        let result = sqlx::query(include_str!("../../queries/update_history.sql"))
            .bind(row.last_read)
            .bind(row.time_read)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        expect_one(result, "history")
    }
}

#[cfg(test)]
mod tests {
    use crate::repo::tests::{persisted_entry, repository};
    use shelf_models::{Chapter, History, timestamp};

    #[tokio::test]
    async fn test_history_is_keyed_by_chapter_url() {
        let repo = repository().await;
        let mut tx = repo.begin().await.unwrap();
        let entry_id = persisted_entry(&mut tx, "/a").await.id.unwrap();
        let other_id = persisted_entry(&mut tx, "/b").await.id.unwrap();
        let chapter_id = tx.insert_chapter(entry_id, &Chapter::new("/c/1", "One")).await.unwrap();
        let other_chapter = tx.insert_chapter(other_id, &Chapter::new("/c/1", "One")).await.unwrap();

        let mut history = History {
            id: None,
            chapter_id,
            last_read: timestamp::from_millis(1_000).unwrap(),
            time_read: 60,
        };
        history.id = Some(tx.insert_history(&history).await.unwrap());
        let unrelated = History { chapter_id: other_chapter, ..history.clone() };
        tx.insert_history(&History { id: None, ..unrelated }).await.unwrap();

        let rows = tx.history_for_entry(entry_id).await.unwrap();
        assert_eq!(rows, vec![("/c/1".to_string(), history.clone())]);

        history.last_read = timestamp::from_millis(5_000).unwrap();
        tx.update_history(&history).await.unwrap();
        assert_eq!(tx.find_history_by_chapter(chapter_id).await.unwrap(), Some(history));
    }

    #[tokio::test]
    async fn test_one_history_row_per_chapter() {
        let repo = repository().await;
        let mut tx = repo.begin().await.unwrap();
        let entry_id = persisted_entry(&mut tx, "/a").await.id.unwrap();
        let chapter_id = tx.insert_chapter(entry_id, &Chapter::new("/c/1", "One")).await.unwrap();
        let history = History {
            id: None,
            chapter_id,
            last_read: timestamp::now(),
            time_read: 0,
        };
        tx.insert_history(&history).await.unwrap();
        assert!(tx.insert_history(&history).await.is_err());
    }
}
