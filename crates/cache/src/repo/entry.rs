use super::{Transaction, expect_one};
use crate::error::{ErrorKind, Result};
use crate::models::EntryRow;
use exn::{OptionExt, ResultExt};
use shelf_models::{Entry, MERGED_SOURCE_ID};

impl Transaction {
    // =========================================================================
    // Get/Fetch
    // =========================================================================

    /// Look up an entry by its `(url, source)` identity.
    pub async fn find_entry(&mut self, url: &str, source: i64) -> Result<Option<Entry>> {
        let row: Option<EntryRow> = sqlx::query_as(include_str!("../../queries/find_entry.sql"))
            .bind(url)
            .bind(source)
            .fetch_optional(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(|r| r.try_into()).transpose()
    }

    pub async fn get_entry(&mut self, id: i64) -> Result<Option<Entry>> {
        let row: Option<EntryRow> = sqlx::query_as(include_str!("../../queries/get_entry.sql"))
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(|r| r.try_into()).transpose()
    }

    /// All entries in the user's library, oldest first.
    pub async fn list_favorite_entries(&mut self) -> Result<Vec<Entry>> {
        let rows: Vec<EntryRow> = sqlx::query_as(include_str!("../../queries/list_favorite_entries.sql"))
            .fetch_all(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// Constituents of favorited merge-roots that are not favorites themselves.
    ///
    /// Each constituent appears once, even when several roots reference it.
    pub async fn list_merged_constituents(&mut self) -> Result<Vec<Entry>> {
        let rows: Vec<EntryRow> = sqlx::query_as(include_str!("../../queries/list_merged_constituents.sql"))
            .bind(MERGED_SOURCE_ID)
            .fetch_all(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(|r| r.try_into()).collect()
    }

    // =========================================================================
    // Insert/Update
    // =========================================================================

    /// Insert a new entry, ignoring any id it carries. Returns the new id.
    ///
    /// Fails with [`ErrorKind::Database`] if the `(url, source)` identity is
    /// already taken.
    pub async fn insert_entry(&mut self, entry: &Entry) -> Result<i64> {
        let row = EntryRow::try_from(entry)?;
        let result = sqlx::query(include_str!("../../queries/insert_entry.sql"))
            .bind(row.source)
            .bind(row.url)
            .bind(row.title)
            .bind(row.artist)
            .bind(row.author)
            .bind(row.description)
            .bind(row.genres)
            .bind(row.status)
            .bind(row.thumbnail_url)
            .bind(row.favorite)
            .bind(row.initialized)
            .bind(row.last_update)
            .bind(row.date_added)
            .bind(row.viewer_flags)
            .bind(row.chapter_flags)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite every mutable column of a persisted entry.
    ///
    /// The identity columns (`url`, `source`) are never changed.
    pub async fn update_entry(&mut self, entry: &Entry) -> Result<()> {
        let row = EntryRow::try_from(entry)?;
        let id = row.id.ok_or_raise(|| ErrorKind::MissingId("entry"))?;
        let result = sqlx::query(include_str!("../../queries/update_entry.sql"))
            .bind(row.title)
            .bind(row.artist)
            .bind(row.author)
            .bind(row.description)
            .bind(row.genres)
            .bind(row.status)
            .bind(row.thumbnail_url)
            .bind(row.favorite)
            .bind(row.initialized)
            .bind(row.last_update)
            .bind(row.date_added)
            .bind(row.viewer_flags)
            .bind(row.chapter_flags)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        expect_one(result, "entry")
    }
}

#[cfg(test)]
mod tests {
    use crate::repo::tests::{persisted_entry, repository};
    use crate::error::ErrorKind;
    use shelf_models::{Entry, EntryStatus, MERGED_SOURCE_ID, MergedReference};

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = repository().await;
        let mut tx = repo.begin().await.unwrap();
        let mut entry = Entry::new(5, "/series/1", "Series");
        entry.genres = vec!["Action".to_string()];
        entry.status = EntryStatus::Ongoing;
        let id = tx.insert_entry(&entry).await.unwrap();

        let found = tx.find_entry("/series/1", 5).await.unwrap().unwrap();
        assert_eq!(found.id, Some(id));
        assert_eq!(found.genres, entry.genres);
        assert_eq!(found.status, EntryStatus::Ongoing);
        assert!(tx.find_entry("/series/1", 6).await.unwrap().is_none());
        assert_eq!(tx.get_entry(id).await.unwrap(), Some(found));
    }

    #[tokio::test]
    async fn test_identity_is_unique() {
        let repo = repository().await;
        let mut tx = repo.begin().await.unwrap();
        let entry = Entry::new(5, "/series/1", "Series");
        tx.insert_entry(&entry).await.unwrap();
        let err = tx.insert_entry(&entry).await.unwrap_err();
        assert!(matches!(*err, ErrorKind::Database));
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let repo = repository().await;
        let mut tx = repo.begin().await.unwrap();
        let mut entry = persisted_entry(&mut tx, "/a").await;
        entry.title = "Renamed".to_string();
        entry.viewer_flags = 9;
        tx.update_entry(&entry).await.unwrap();
        let found = tx.find_entry("/a", 1).await.unwrap().unwrap();
        assert_eq!(found, entry);
    }

    #[tokio::test]
    async fn test_update_requires_persisted_entry() {
        let repo = repository().await;
        let mut tx = repo.begin().await.unwrap();
        let err = tx.update_entry(&Entry::new(1, "/a", "A")).await.unwrap_err();
        assert!(matches!(*err, ErrorKind::MissingId("entry")));

        let mut ghost = Entry::new(1, "/a", "A");
        ghost.id = Some(404);
        let err = tx.update_entry(&ghost).await.unwrap_err();
        assert!(matches!(*err, ErrorKind::NotFound("entry")));
    }

    #[tokio::test]
    async fn test_merged_constituents_are_distinct_non_favorites() {
        let repo = repository().await;
        let mut tx = repo.begin().await.unwrap();
        let favorite = persisted_entry(&mut tx, "/fav").await;
        let plain = Entry::new(1, "/plain", "Plain");
        let plain_id = tx.insert_entry(&plain).await.unwrap();

        for root_url in ["/merged/1", "/merged/2"] {
            let mut root = Entry::new(MERGED_SOURCE_ID, root_url, "Merged");
            root.favorite = true;
            let root_id = tx.insert_entry(&root).await.unwrap();
            for (url, id) in [("/fav", favorite.id), ("/plain", Some(plain_id))] {
                let reference = MergedReference {
                    id: None,
                    merge_id: root_id,
                    merge_url: root_url.to_string(),
                    entry_id: id,
                    entry_url: url.to_string(),
                    entry_source: 1,
                    is_info_entry: false,
                    get_chapter_updates: true,
                    download_chapters: true,
                    chapter_priority: 0,
                    chapter_sort_mode: 0,
                };
                tx.insert_merged_reference(&reference).await.unwrap();
            }
        }

        let constituents = tx.list_merged_constituents().await.unwrap();
        assert_eq!(constituents.len(), 1);
        assert_eq!(constituents[0].url, "/plain");
        assert_eq!(tx.list_favorite_entries().await.unwrap().len(), 3);
    }
}
