use time::UtcDateTime;

/// When a chapter was last read, and for how long in total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    pub id: Option<i64>,
    pub chapter_id: i64,
    pub last_read: UtcDateTime,
    /// Accumulated reading time in milliseconds
    pub time_read: i64,
}
