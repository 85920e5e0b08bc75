use super::{Transaction, expect_one};
use crate::error::{ErrorKind, Result};
use crate::models::ChapterRow;
use exn::{OptionExt, ResultExt};
use shelf_models::Chapter;

impl Transaction {
    /// Chapters of an entry in source order.
    pub async fn chapters_for_entry(&mut self, entry_id: i64) -> Result<Vec<Chapter>> {
        let rows: Vec<ChapterRow> = sqlx::query_as(include_str!("../../queries/list_chapters_for_entry.sql"))
            .bind(entry_id)
            .fetch_all(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(|r| r.try_into()).collect()
    }

    pub async fn count_chapters(&mut self, entry_id: i64) -> Result<usize> {
        let count: i64 = sqlx::query_scalar(include_str!("../../queries/count_chapters_for_entry.sql"))
            .bind(entry_id)
            .fetch_one(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        usize::try_from(count).or_raise(|| ErrorKind::InvalidData("chapter count"))
    }

    /// First chapter of the entry with the given URL.
    pub async fn find_chapter_by_url(&mut self, entry_id: i64, url: &str) -> Result<Option<Chapter>> {
        let row: Option<ChapterRow> = sqlx::query_as(include_str!("../../queries/find_chapter_by_url.sql"))
            .bind(entry_id)
            .bind(url)
            .fetch_optional(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(|r| r.try_into()).transpose()
    }

    /// Insert a chapter under `entry_id`, ignoring the ids it carries.
    pub async fn insert_chapter(&mut self, entry_id: i64, chapter: &Chapter) -> Result<i64> {
        let row = ChapterRow::from(chapter);
        let result = sqlx::query(include_str!("../../queries/insert_chapter.sql"))
            .bind(entry_id)
            .bind(row.url)
            .bind(row.name)
            .bind(row.scanlator)
            .bind(row.number)
            .bind(row.source_order)
            .bind(row.read)
            .bind(row.bookmark)
            .bind(row.last_page_read)
            .bind(row.date_fetch)
            .bind(row.date_upload)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update_chapter(&mut self, chapter: &Chapter) -> Result<()> {
        let row = ChapterRow::from(chapter);
        let id = row.id.ok_or_raise(|| ErrorKind::MissingId("chapter"))?;
        let result = sqlx::query(include_str!("../../queries/update_chapter.sql"))
            .bind(row.url)
            .bind(row.name)
            .bind(row.scanlator)
            .bind(row.number)
            .bind(row.source_order)
            .bind(row.read)
            .bind(row.bookmark)
            .bind(row.last_page_read)
            .bind(row.date_fetch)
            .bind(row.date_upload)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        expect_one(result, "chapter")
    }
}
