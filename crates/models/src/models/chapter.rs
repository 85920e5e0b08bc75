use time::UtcDateTime;

/// A single chapter of an [`Entry`](super::Entry).
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub id: Option<i64>,
    pub entry_id: Option<i64>,
    pub url: String,
    pub name: String,
    pub scanlator: Option<String>,
    /// Recognized chapter number; negative when the name could not be parsed
    pub number: f64,
    /// Position in the source's chapter list (0 = newest)
    pub source_order: i64,
    pub read: bool,
    pub bookmark: bool,
    pub last_page_read: i64,
    /// When this chapter was first seen locally
    pub date_fetch: Option<UtcDateTime>,
    /// When the source published this chapter
    pub date_upload: Option<UtcDateTime>,
}
impl Chapter {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            entry_id: None,
            url: url.into(),
            name: name.into(),
            scanlator: None,
            number: -1.0,
            source_order: 0,
            read: false,
            bookmark: false,
            last_page_read: 0,
            date_fetch: None,
            date_upload: None,
        }
    }

    /// Whether [`number`](Self::number) holds a recognized chapter number.
    pub fn is_recognized_number(&self) -> bool {
        self.number >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_number() {
        let mut chapter = Chapter::new("/c/1", "Chapter 1");
        assert!(!chapter.is_recognized_number());
        chapter.number = 0.0;
        assert!(chapter.is_recognized_number());
    }
}
