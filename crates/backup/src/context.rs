use crate::error::{Error, ErrorKind};
use crate::flags::BackupFlags;
use crate::codec;
use crate::restore::RestoreOptions;
use exn::ResultExt;
use shelf_compress::Compression;
use shelf_config::Config;
use std::path::PathBuf;
use time::UtcDateTime;

/// Backup and restore settings resolved from a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub flags: BackupFlags,
    pub compression: Compression,
    pub directory: PathBuf,
    pub offline: bool,
}

impl TryFrom<&Config> for Context {
    type Error = Error;
    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        config.validate().or_raise(|| ErrorKind::Config)?;
        Ok(Self {
            flags: BackupFlags::from(&config.backup),
            compression: config.compression().or_raise(|| ErrorKind::Config)?,
            directory: config.backup.directory.clone(),
            offline: config.restore.offline,
        })
    }
}

impl Context {
    /// Where a backup taken at `now` should be written.
    pub fn backup_path(&self, now: UtcDateTime) -> PathBuf {
        self.directory.join(codec::backup_filename(now))
    }

    pub fn restore_options(&self) -> RestoreOptions {
        RestoreOptions {
            include: self.flags,
            offline: self.offline,
        }
    }
}
