use shelf_config::BackupConfig;
use std::ops::{BitOr, BitOrAssign};

/// Which per-entry parts a backup contains, or a restore applies.
///
/// Entries themselves, categories as a list, saved searches and merged
/// references are always included; the flags only control what is attached
/// to each entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackupFlags(u8);

impl BackupFlags {
    pub const NONE: Self = Self(0);
    pub const CHAPTERS: Self = Self(1);
    pub const CATEGORIES: Self = Self(1 << 1);
    pub const HISTORY: Self = Self(1 << 2);
    pub const TRACKING: Self = Self(1 << 3);
    pub const ALL: Self = Self(0b1111);

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Unknown bits are dropped.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for BackupFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for BackupFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for BackupFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<&BackupConfig> for BackupFlags {
    fn from(config: &BackupConfig) -> Self {
        let mut flags = Self::NONE;
        for (enabled, flag) in [
            (config.include_chapters, Self::CHAPTERS),
            (config.include_categories, Self::CATEGORIES),
            (config.include_history, Self::HISTORY),
            (config.include_tracking, Self::TRACKING),
        ] {
            if enabled {
                flags |= flag;
            }
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BackupFlags::ALL, BackupFlags::HISTORY, true)]
    #[case(BackupFlags::CHAPTERS | BackupFlags::TRACKING, BackupFlags::TRACKING, true)]
    #[case(BackupFlags::CHAPTERS | BackupFlags::TRACKING, BackupFlags::HISTORY, false)]
    #[case(BackupFlags::NONE, BackupFlags::CHAPTERS, false)]
    #[case(BackupFlags::CHAPTERS, BackupFlags::NONE, true)]
    fn test_contains(#[case] flags: BackupFlags, #[case] flag: BackupFlags, #[case] expected: bool) {
        assert_eq!(flags.contains(flag), expected);
    }

    #[test]
    fn test_truncate_unknown_bits() {
        assert_eq!(BackupFlags::from_bits_truncate(0xFF), BackupFlags::ALL);
    }

    #[test]
    fn test_from_config() {
        let config = BackupConfig {
            include_history: false,
            include_tracking: false,
            ..BackupConfig::default()
        };
        assert_eq!(BackupFlags::from(&config), BackupFlags::CHAPTERS | BackupFlags::CATEGORIES);
    }
}
