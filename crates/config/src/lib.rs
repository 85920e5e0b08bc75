//! Configuration for the shelf library manager.
//!
//! Values are merged from three layers, later ones winning:
//!
//! 1. built-in defaults (paths under the platform's data directory),
//! 2. an optional configuration file, TOML, YAML or JSON by extension,
//! 3. `SHELF_`-prefixed environment variables, with `__` separating
//!    nested keys (`SHELF_BACKUP__COMPRESSION=bzip2`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use shelf_compress::Compression;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "SHELF_";
const CONFIG_FILE: &str = "config.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "shelf")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the SQLite library database.
    pub database: PathBuf,
    pub backup: BackupConfig,
    pub restore: RestoreConfig,
}

/// What a backup contains and where it goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Directory new backup files are written to.
    pub directory: PathBuf,
    /// Compression format name (`none`, `gzip`, `bzip2`, `zstd`).
    pub compression: String,
    pub include_chapters: bool,
    pub include_categories: bool,
    pub include_history: bool,
    pub include_tracking: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreConfig {
    /// Never contact sources during a restore.
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            database: data_dir.join("library.db"),
            backup: BackupConfig {
                directory: data_dir.join("backups"),
                ..BackupConfig::default()
            },
            restore: RestoreConfig::default(),
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("backups"),
            compression: Compression::default().to_string(),
            include_chapters: true,
            include_categories: true,
            include_history: true,
            include_tracking: true,
        }
    }
}

impl Config {
    /// Platform default location of the configuration file, if the platform
    /// has a home directory at all.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load and validate the configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is used
    /// when a file exists there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(path)?.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        tracing::debug!(database = %config.database.display(), "configuration loaded");
        Ok(config)
    }

    /// The merged configuration sources, before extraction.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        let file = match path {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.is_file()),
        };
        if let Some(file) = file {
            figment = Self::merge_file(figment, &file)?;
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
        let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase);
        let figment = match extension.as_deref() {
            Some("toml") => figment.merge(Toml::file_exact(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
            Some("json") => figment.merge(Json::file_exact(path)),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
        };
        Ok(figment)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("database"));
        }
        if self.backup.directory.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("backup.directory"));
        }
        self.compression()?;
        Ok(())
    }

    /// The configured backup compression format.
    pub fn compression(&self) -> Result<Compression> {
        self.backup.compression.parse().map_err(ErrorKind::compression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;
    use shelf_compress::error::ErrorKind as CompressionErrorKind;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.compression().unwrap(), Compression::Gzip);
        assert!(config.backup.include_history);
        assert!(!config.restore.offline);
    }

    #[rstest]
    #[case("shelf.toml", "[backup]\ncompression = \"bzip2\"\ninclude_history = false\n")]
    #[case("shelf.yaml", "backup:\n  compression: bzip2\n  include_history: false\n")]
    #[case("shelf.yml", "backup:\n  compression: bzip2\n  include_history: false\n")]
    #[case("shelf.json", r#"{"backup": {"compression": "bzip2", "include_history": false}}"#)]
    fn test_file_formats(#[case] name: &str, #[case] contents: &str) {
        // Jail serializes access to the process environment.
        Jail::expect_with(|jail| {
            jail.create_file(name, contents)?;
            let config = Config::load(Some(Path::new(name))).map_err(|e| e.to_string())?;
            assert_eq!(config.compression().map_err(|e| e.to_string())?, Compression::Bzip2);
            assert!(!config.backup.include_history);
            assert!(config.backup.include_chapters, "unset keys keep their defaults");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelf.ini");
        std::fs::write(&path, "offline = true").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(*err, ErrorKind::UnsupportedFormat(_)));
    }

    #[rstest]
    #[case("lzma", CompressionErrorKind::UnsupportedFormat("lzma".to_string()))]
    #[case("brotli", CompressionErrorKind::UnsupportedFormat("brotli".to_string()))]
    fn test_rejects_compression(#[case] name: &str, #[case] expected: CompressionErrorKind) {
        let mut config = Config::default();
        config.backup.compression = name.to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(&*err, ErrorKind::Compression(kind) if *kind == expected));
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("shelf.toml", "database = \"from-file.db\"\n[restore]\noffline = false\n")?;
            jail.set_env("SHELF_RESTORE__OFFLINE", "true");
            jail.set_env("SHELF_BACKUP__COMPRESSION", "none");
            let config = Config::load(Some(Path::new("shelf.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.database, PathBuf::from("from-file.db"));
            assert!(config.restore.offline);
            assert_eq!(config.compression().map_err(|e| e.to_string())?, Compression::None);
            Ok(())
        });
    }

    #[test]
    fn test_empty_database_path() {
        let config = Config {
            database: PathBuf::new(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(*err, ErrorKind::Invalid("database")));
    }
}
