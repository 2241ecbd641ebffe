use std::path::{Path, PathBuf};

use services::AppServices;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
    #[error("failed to prepare database file: {0}")]
    Io(#[from] std::io::Error),
}

/// Where questions and progress live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Json { questions: PathBuf, progress: PathBuf },
    Sqlite { url: String },
}

impl StorageConfig {
    /// Resolve the backend from parsed arguments; `--db` wins over the JSON paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDbUrl` for a blank database URL.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        match &cli.db {
            Some(raw) if raw.trim().is_empty() => {
                Err(ConfigError::InvalidDbUrl { raw: raw.clone() })
            }
            Some(raw) => Ok(Self::Sqlite {
                url: normalize_sqlite_url(raw),
            }),
            None => Ok(Self::Json {
                questions: cli.questions.clone(),
                progress: cli.progress.clone(),
            }),
        }
    }

    /// Open the configured backend and wire the services over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database file cannot be created or migrated.
    pub async fn open(&self) -> anyhow::Result<AppServices> {
        match self {
            Self::Json { questions, progress } => {
                Ok(AppServices::json(questions.clone(), progress.clone()))
            }
            Self::Sqlite { url } => {
                prepare_sqlite_file(url)?;
                Ok(AppServices::sqlite(url).await?)
            }
        }
    }
}

/// Turn `path`, `sqlite:path` or `sqlite://path` into an absolute `sqlite://` URL.
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path = Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file and its parent directories if missing.
fn prepare_sqlite_file(db_url: &str) -> Result<(), ConfigError> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let invalid = || ConfigError::InvalidDbUrl {
        raw: db_url.to_string(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` overrides `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn json_backend_by_default() {
        let cli = Cli::try_parse_from([
            "interview-prep",
            "--questions",
            "q.json",
            "--progress",
            "p.json",
            "stats",
        ])
        .unwrap();
        assert_eq!(
            StorageConfig::from_cli(&cli).unwrap(),
            StorageConfig::Json {
                questions: PathBuf::from("q.json"),
                progress: PathBuf::from("p.json"),
            }
        );
    }

    #[test]
    fn db_flag_selects_sqlite() {
        let cli = Cli::try_parse_from(["interview-prep", "--db", "sqlite::memory:", "stats"])
            .unwrap();
        assert_eq!(
            StorageConfig::from_cli(&cli).unwrap(),
            StorageConfig::Sqlite {
                url: "sqlite::memory:".into()
            }
        );
    }

    #[test]
    fn blank_db_is_rejected() {
        let cli = Cli::try_parse_from(["interview-prep", "--db", "  ", "stats"]).unwrap();
        assert!(matches!(
            StorageConfig::from_cli(&cli),
            Err(ConfigError::InvalidDbUrl { .. })
        ));
    }

    #[test]
    fn normalizes_relative_paths() {
        let url = normalize_sqlite_url("sqlite:data/prep.sqlite3");
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/prep.sqlite3"));
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/prep.db"),
            "sqlite:///tmp/prep.db"
        );
    }

    #[test]
    fn prepares_nested_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/prep.sqlite3");
        let url = normalize_sqlite_url(path.to_str().unwrap());

        prepare_sqlite_file(&url).unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn opens_sqlite_backend() {
        let dir = tempfile::tempdir().unwrap();
        let url = normalize_sqlite_url(dir.path().join("prep.sqlite3").to_str().unwrap());
        let services = StorageConfig::Sqlite { url }.open().await.unwrap();

        let stats = services.query().stats().await.unwrap();
        assert_eq!(stats.total, 0);
    }
}
