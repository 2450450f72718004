//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the CLI
//! uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`ImportError`], [`SourceError`], [`ConfigError`])
//!   for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use course_minder::error::{ResultExt, Result};
//!
//! async fn open(url: &str) -> Result<SqlitePool> {
//!     db::init_db(url).await.with_context(format!("opening {url}"))
//! }
//! ```

use crate::config::ConfigError;
use crate::importer::ImportError;
use crate::ingest::SourceError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Playlist import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// A playlist source could not be set up
    #[error("Source setup error: {0}")]
    Source(#[from] SourceError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Database(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, SourceError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Source(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, ConfigError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Config(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::FetchError;

    #[test]
    fn test_import_error_is_transparent() {
        let err = Error::from(ImportError::Fetch(FetchError::Exhausted {
            playlist_id: "PLgone".to_string(),
            source: SourceError::NotFound("PLgone".to_string()),
        }));
        assert!(err.to_string().starts_with("Failed to fetch playlist PLgone"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::from(ImportError::NotFound(9)).context("while showing import");
        let msg = err.to_string();
        assert!(msg.contains("while showing import"));
        assert!(msg.contains('9'));
    }

    #[test]
    fn test_result_ext() {
        let result: std::result::Result<(), sqlx::Error> = Err(sqlx::Error::RowNotFound);
        let with_ctx = result.with_context("loading imports");
        let err = with_ctx.unwrap_err();
        assert!(err.to_string().contains("loading imports"));
        assert!(matches!(err, Error::WithContext { source, .. } if matches!(*source, Error::Database(_))));
    }

    #[test]
    fn test_config_error_context() {
        let result: std::result::Result<(), ConfigError> = Err(ConfigError::NoConfigDir);
        let msg = result.with_context("saving config").unwrap_err().to_string();
        assert!(msg.contains("saving config"));
        assert!(msg.contains("config directory"));
    }
}
