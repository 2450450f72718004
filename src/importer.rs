//! Playlist import - the operation the rest of the application calls.
//!
//! 1. Parse the reference once into a playlist ID
//! 2. Return the caller's existing import of that ID, if any (no fetch)
//! 3. Otherwise acquire the playlist and store it with a find-or-create, so
//!    a concurrent duplicate request still ends up with one record

use crate::db::ImportStore;
use crate::ingest::{FetchError, PlaylistFetcher, parse_playlist_id};
use crate::model::{ImportResult, PlaylistImport, PlaylistSummary};

/// Errors surfaced to callers of the importer
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Playlist reference is empty")]
    EmptyReference,

    /// No source could produce the playlist
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Playlist import {0} not found")]
    NotFound(i64),
}

/// Imports playlists for users, at most once per (user, playlist)
pub struct Importer<S> {
    store: S,
    fetcher: PlaylistFetcher,
}

impl<S: ImportStore> Importer<S> {
    pub fn new(store: S, fetcher: PlaylistFetcher) -> Self {
        Self { store, fetcher }
    }

    /// Import the playlist named by `reference` (URL or bare ID) for a user.
    ///
    /// Importing something the user already has returns the stored record
    /// unchanged as [`ImportResult::Existing`].
    pub async fn import_playlist(
        &self,
        owner_user_id: &str,
        reference: &str,
    ) -> Result<ImportResult, ImportError> {
        let playlist_id = parse_playlist_id(reference);
        if playlist_id.is_empty() {
            return Err(ImportError::EmptyReference);
        }

        if let Some(existing) = self
            .store
            .find_existing_import(owner_user_id, playlist_id)
            .await?
        {
            tracing::info!(
                owner = owner_user_id,
                playlist_id,
                import_id = existing.id,
                "Playlist already imported"
            );
            return Ok(ImportResult::Existing(existing));
        }

        let playlist = self.fetcher.fetch(playlist_id).await?;
        let result = self.store.create_import(owner_user_id, &playlist).await?;

        tracing::info!(
            owner = owner_user_id,
            playlist_id,
            import_id = result.record().id,
            new = result.is_new(),
            "Playlist import stored"
        );
        Ok(result)
    }

    /// Delete one of the user's imports (videos go with it).
    pub async fn delete_import(&self, owner_user_id: &str, import_id: i64) -> Result<(), ImportError> {
        if self.store.delete_import(owner_user_id, import_id).await? {
            tracing::info!(owner = owner_user_id, import_id, "Playlist import deleted");
            Ok(())
        } else {
            Err(ImportError::NotFound(import_id))
        }
    }

    /// The user's imports, newest first.
    pub async fn list_imports(&self, owner_user_id: &str) -> Result<Vec<PlaylistSummary>, ImportError> {
        Ok(self.store.list_imports(owner_user_id).await?)
    }

    /// One of the user's imports with its videos.
    pub async fn get_import(
        &self,
        owner_user_id: &str,
        import_id: i64,
    ) -> Result<PlaylistImport, ImportError> {
        self.store
            .get_import(owner_user_id, import_id)
            .await?
            .ok_or(ImportError::NotFound(import_id))
    }
}
