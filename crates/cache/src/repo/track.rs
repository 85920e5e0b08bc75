use super::{Transaction, expect_one};
use crate::error::{ErrorKind, Result};
use crate::models::TrackRow;
use exn::{OptionExt, ResultExt};
use shelf_models::Track;

impl Transaction {
    pub async fn tracks_for_entry(&mut self, entry_id: i64) -> Result<Vec<Track>> {
        let rows: Vec<TrackRow> = sqlx::query_as(include_str!("../../queries/list_tracks_for_entry.sql"))
            .bind(entry_id)
            .fetch_all(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// Insert a track under `entry_id`; one track per service and entry.
    pub async fn insert_track(&mut self, entry_id: i64, track: &Track) -> Result<i64> {
        let row = TrackRow::from(track);
        let result = sqlx::query(include_str!("../../queries/insert_track.sql"))
            .bind(entry_id)
            .bind(row.service)
            .bind(row.media_id)
            .bind(row.library_id)
            .bind(row.title)
            .bind(row.last_chapter_read)
            .bind(row.total_chapters)
            .bind(row.score)
            .bind(row.status)
            .bind(row.tracking_url)
            .bind(row.started_at)
            .bind(row.finished_at)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update_track(&mut self, track: &Track) -> Result<()> {
        let row = TrackRow::from(track);
        let id = row.id.ok_or_raise(|| ErrorKind::MissingId("track"))?;
        let result = sqlx::query(include_str!("../../queries/update_track.sql"))
            .bind(row.media_id)
            .bind(row.library_id)
            .bind(row.title)
            .bind(row.last_chapter_read)
            .bind(row.total_chapters)
            .bind(row.score)
            .bind(row.status)
            .bind(row.tracking_url)
            .bind(row.started_at)
            .bind(row.finished_at)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        expect_one(result, "track")
    }
}

#[cfg(test)]
mod tests {
    use crate::repo::tests::{persisted_entry, repository};
    use shelf_models::Track;

    #[tokio::test]
    async fn test_insert_and_update_track() {
        let repo = repository().await;
        let mut tx = repo.begin().await.unwrap();
        let entry_id = persisted_entry(&mut tx, "/a").await.id.unwrap();
        let mut track = Track::new(2, 1001, "On the tracker");
        track.id = Some(tx.insert_track(entry_id, &track).await.unwrap());
        track.entry_id = Some(entry_id);
        assert!(tx.insert_track(entry_id, &track).await.is_err(), "one track per service");

        track.last_chapter_read = 14.5;
        track.library_id = Some(77);
        tx.update_track(&track).await.unwrap();
        assert_eq!(tx.tracks_for_entry(entry_id).await.unwrap(), vec![track]);
    }
}
