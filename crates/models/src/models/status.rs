use std::fmt::{Display, Formatter, Result as FmtResult};

/// Publication status reported by a source.
///
/// Stored as a small integer; unknown values decode to
/// [`Unknown`](Self::Unknown) rather than failing, since sources add new
/// statuses faster than the library does.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryStatus {
    #[default]
    Unknown,
    Ongoing,
    Completed,
    Licensed,
    PublishingFinished,
    Cancelled,
    OnHiatus,
}
impl EntryStatus {
    pub fn as_i64(&self) -> i64 {
        match self {
            EntryStatus::Unknown => 0,
            EntryStatus::Ongoing => 1,
            EntryStatus::Completed => 2,
            EntryStatus::Licensed => 3,
            EntryStatus::PublishingFinished => 4,
            EntryStatus::Cancelled => 5,
            EntryStatus::OnHiatus => 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Unknown => "Unknown",
            EntryStatus::Ongoing => "Ongoing",
            EntryStatus::Completed => "Completed",
            EntryStatus::Licensed => "Licensed",
            EntryStatus::PublishingFinished => "Publishing finished",
            EntryStatus::Cancelled => "Cancelled",
            EntryStatus::OnHiatus => "On hiatus",
        }
    }
}
impl From<i64> for EntryStatus {
    fn from(value: i64) -> Self {
        match value {
            1 => EntryStatus::Ongoing,
            2 => EntryStatus::Completed,
            3 => EntryStatus::Licensed,
            4 => EntryStatus::PublishingFinished,
            5 => EntryStatus::Cancelled,
            6 => EntryStatus::OnHiatus,
            _ => EntryStatus::Unknown,
        }
    }
}
impl Display for EntryStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, EntryStatus::Unknown)]
    #[case(2, EntryStatus::Completed)]
    #[case(6, EntryStatus::OnHiatus)]
    #[case(42, EntryStatus::Unknown)]
    #[case(-1, EntryStatus::Unknown)]
    fn test_from_integer(#[case] value: i64, #[case] expected: EntryStatus) {
        assert_eq!(EntryStatus::from(value), expected);
    }

    #[test]
    fn test_integer_is_stable() {
        assert_eq!(EntryStatus::from(EntryStatus::Licensed.as_i64()), EntryStatus::Licensed);
    }
}
