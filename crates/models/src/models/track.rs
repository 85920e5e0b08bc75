use time::UtcDateTime;

/// Sync state of an entry with one external tracking service.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: Option<i64>,
    pub entry_id: Option<i64>,
    /// Tracking service id
    pub service: i64,
    /// Remote id of the media on the tracking service
    pub media_id: i64,
    /// Remote id of the user's library item, if the service has one
    pub library_id: Option<i64>,
    pub title: String,
    pub last_chapter_read: f64,
    pub total_chapters: i64,
    pub score: f64,
    pub status: i64,
    pub tracking_url: String,
    pub started_at: Option<UtcDateTime>,
    pub finished_at: Option<UtcDateTime>,
}
impl Track {
    pub fn new(service: i64, media_id: i64, title: impl Into<String>) -> Self {
        Self {
            id: None,
            entry_id: None,
            service,
            media_id,
            library_id: None,
            title: title.into(),
            last_chapter_read: 0.0,
            total_chapters: 0,
            score: 0.0,
            status: 0,
            tracking_url: String::new(),
            started_at: None,
            finished_at: None,
        }
    }
}
