use super::Transaction;
use crate::error::{ErrorKind, Result};
use crate::models::MergedReferenceRow;
use exn::ResultExt;
use shelf_models::MergedReference;

impl Transaction {
    /// Look up the edge from a merge-root to one constituent, both by URL.
    pub async fn find_merged_reference(&mut self, merge_url: &str, entry_url: &str) -> Result<Option<MergedReference>> {
        let row: Option<MergedReferenceRow> = sqlx::query_as(include_str!("../../queries/find_merged_reference.sql"))
            .bind(merge_url)
            .bind(entry_url)
            .fetch_optional(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(row.map(MergedReference::from))
    }

    /// Outgoing edges of a merge-root by chapter priority.
    pub async fn merged_references_for_root(&mut self, merge_id: i64) -> Result<Vec<MergedReference>> {
        let rows: Vec<MergedReferenceRow> =
            sqlx::query_as(include_str!("../../queries/list_merged_references_for_root.sql"))
                .bind(merge_id)
                .fetch_all(&mut *self.tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
        Ok(rows.into_iter().map(MergedReference::from).collect())
    }

    pub async fn insert_merged_reference(&mut self, reference: &MergedReference) -> Result<i64> {
        let row = MergedReferenceRow::from(reference);
        let result = sqlx::query(include_str!("../../queries/insert_merged_reference.sql"))
            .bind(row.merge_id)
            .bind(row.merge_url)
            .bind(row.entry_id)
            .bind(row.entry_url)
            .bind(row.entry_source)
            .bind(row.is_info_entry)
            .bind(row.get_chapter_updates)
            .bind(row.download_chapters)
            .bind(row.chapter_priority)
            .bind(row.chapter_sort_mode)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.last_insert_rowid())
    }
}
