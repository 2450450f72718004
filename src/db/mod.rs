//! Database module for playlist import persistence.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! Provides async operations for:
//! - Atomic find-or-create of imports (one per owner and playlist)
//! - Owner-scoped listing, lookup and deletion
//!
//! # Example
//!
//! ```ignore
//! use course_minder::db::{init_db, db_url, SqliteImportStore};
//!
//! let pool = init_db(&db_url(None)).await?;
//! let store = SqliteImportStore::new(pool);
//! ```

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

use crate::ingest::NormalizedPlaylist;
use crate::model::{ImportResult, ImportRow, PlaylistImport, PlaylistSummary, VideoRow};

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "course_minder.db";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool with up to 5 connections (foreign keys on, so deleting an import
/// removes its videos), and runs all pending migrations.
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        Sqlite::create_database(db_url).await?;
    }

    let options = SqliteConnectOptions::from_str(db_url)?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Storage for playlist imports.
///
/// `create_import` must be atomic per (owner, external ID): two concurrent
/// calls for the same pair create one record, and the loser gets it back
/// as [`ImportResult::Existing`].
#[async_trait]
pub trait ImportStore: Send + Sync {
    /// Look up the import of `external_id` by `owner_user_id`.
    async fn find_existing_import(
        &self,
        owner_user_id: &str,
        external_id: &str,
    ) -> sqlx::Result<Option<PlaylistImport>>;

    /// Store `playlist` for `owner_user_id`, or return what is already stored.
    async fn create_import(
        &self,
        owner_user_id: &str,
        playlist: &NormalizedPlaylist,
    ) -> sqlx::Result<ImportResult>;

    /// Delete an import and its videos. Returns whether anything was deleted.
    async fn delete_import(&self, owner_user_id: &str, import_id: i64) -> sqlx::Result<bool>;

    /// All imports of a user, newest first.
    async fn list_imports(&self, owner_user_id: &str) -> sqlx::Result<Vec<PlaylistSummary>>;

    /// One import with its videos.
    async fn get_import(
        &self,
        owner_user_id: &str,
        import_id: i64,
    ) -> sqlx::Result<Option<PlaylistImport>>;
}

/// [`ImportStore`] backed by a SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteImportStore {
    pool: SqlitePool,
}

impl SqliteImportStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImportStore for SqliteImportStore {
    async fn find_existing_import(
        &self,
        owner_user_id: &str,
        external_id: &str,
    ) -> sqlx::Result<Option<PlaylistImport>> {
        find_import_by_external_id(&self.pool, owner_user_id, external_id).await
    }

    async fn create_import(
        &self,
        owner_user_id: &str,
        playlist: &NormalizedPlaylist,
    ) -> sqlx::Result<ImportResult> {
        create_import(&self.pool, owner_user_id, playlist).await
    }

    async fn delete_import(&self, owner_user_id: &str, import_id: i64) -> sqlx::Result<bool> {
        delete_import(&self.pool, owner_user_id, import_id).await
    }

    async fn list_imports(&self, owner_user_id: &str) -> sqlx::Result<Vec<PlaylistSummary>> {
        list_imports(&self.pool, owner_user_id).await
    }

    async fn get_import(
        &self,
        owner_user_id: &str,
        import_id: i64,
    ) -> sqlx::Result<Option<PlaylistImport>> {
        get_import(&self.pool, owner_user_id, import_id).await
    }
}

const IMPORT_COLUMNS: &str = "id, owner_user_id, external_id, title, description, thumbnail_url, \
     channel_title, video_count, total_duration_seconds, source, imported_at";

/// Find an import by owner and external playlist ID, with its videos.
pub async fn find_import_by_external_id(
    pool: &SqlitePool,
    owner_user_id: &str,
    external_id: &str,
) -> sqlx::Result<Option<PlaylistImport>> {
    let row: Option<ImportRow> = sqlx::query_as(&format!(
        "SELECT {IMPORT_COLUMNS} FROM playlist_imports WHERE owner_user_id = ? AND external_id = ?"
    ))
    .bind(owner_user_id)
    .bind(external_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let videos = get_videos(pool, row.id).await?;
            row.into_import(videos).map(Some)
        }
        None => Ok(None),
    }
}

/// Find-or-create an import in one transaction.
///
/// The insert is conditional on the (owner, external ID) unique key. If it
/// inserts, the videos go in with it; if not, the stored record is returned
/// untouched.
pub async fn create_import(
    pool: &SqlitePool,
    owner_user_id: &str,
    playlist: &NormalizedPlaylist,
) -> sqlx::Result<ImportResult> {
    let imported_at = Utc::now();
    let mut tx = pool.begin().await?;

    let inserted: Option<(i64,)> = sqlx::query_as(
        r#"
        INSERT INTO playlist_imports (
            owner_user_id, external_id, title, description, thumbnail_url,
            channel_title, video_count, total_duration_seconds, source, imported_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(owner_user_id, external_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(owner_user_id)
    .bind(&playlist.external_id)
    .bind(&playlist.title)
    .bind(&playlist.description)
    .bind(&playlist.thumbnail_url)
    .bind(&playlist.channel_title)
    .bind(i64::from(playlist.video_count))
    .bind(playlist.total_duration_seconds as i64)
    .bind(playlist.source.as_str())
    .bind(imported_at.to_rfc3339_opts(SecondsFormat::Micros, true))
    .fetch_optional(&mut *tx)
    .await?;

    let Some((id,)) = inserted else {
        tx.rollback().await?;
        let existing = find_import_by_external_id(pool, owner_user_id, &playlist.external_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        return Ok(ImportResult::Existing(existing));
    };

    insert_videos(&mut tx, id, playlist).await?;
    tx.commit().await?;

    // Re-read so the caller sees exactly what later reads will see
    let created = get_import(pool, owner_user_id, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    Ok(ImportResult::Created(created))
}

async fn insert_videos(
    tx: &mut Transaction<'_, Sqlite>,
    import_id: i64,
    playlist: &NormalizedPlaylist,
) -> sqlx::Result<()> {
    for video in &playlist.videos {
        sqlx::query(
            r#"
            INSERT INTO playlist_videos (
                import_id, position, video_id, title, description,
                thumbnail_url, channel_title, duration_raw, duration_seconds
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(import_id)
        .bind(i64::from(video.position))
        .bind(&video.video_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.channel_title)
        .bind(&video.duration_raw)
        .bind(i64::from(video.duration_seconds))
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Delete one of a user's imports. Videos go with it (cascade).
pub async fn delete_import(
    pool: &SqlitePool,
    owner_user_id: &str,
    import_id: i64,
) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM playlist_imports WHERE id = ? AND owner_user_id = ?")
        .bind(import_id)
        .bind(owner_user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// All imports of a user, newest first.
pub async fn list_imports(
    pool: &SqlitePool,
    owner_user_id: &str,
) -> sqlx::Result<Vec<PlaylistSummary>> {
    let rows: Vec<ImportRow> = sqlx::query_as(&format!(
        "SELECT {IMPORT_COLUMNS} FROM playlist_imports WHERE owner_user_id = ? \
         ORDER BY imported_at DESC, id DESC"
    ))
    .bind(owner_user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(ImportRow::into_summary).collect()
}

/// One of a user's imports, with its videos in playlist order.
pub async fn get_import(
    pool: &SqlitePool,
    owner_user_id: &str,
    import_id: i64,
) -> sqlx::Result<Option<PlaylistImport>> {
    let row: Option<ImportRow> = sqlx::query_as(&format!(
        "SELECT {IMPORT_COLUMNS} FROM playlist_imports WHERE id = ? AND owner_user_id = ?"
    ))
    .bind(import_id)
    .bind(owner_user_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let videos = get_videos(pool, row.id).await?;
            row.into_import(videos).map(Some)
        }
        None => Ok(None),
    }
}

async fn get_videos(pool: &SqlitePool, import_id: i64) -> sqlx::Result<Vec<VideoRow>> {
    sqlx::query_as(
        r#"
        SELECT position, video_id, title, description, thumbnail_url,
               channel_title, duration_raw, duration_seconds
        FROM playlist_videos
        WHERE import_id = ?
        ORDER BY position
        "#,
    )
    .bind(import_id)
    .fetch_all(pool)
    .await
}
