//! Cache-or-fetch resolution of query terms.
//!
//! One JSON file per term under the data directory, written once and
//! trusted indefinitely: a term that has a cache file never touches the
//! network again.

use crate::http_client::ExerciseDbApi;
use crate::{Exercise, ExerciseDbError, catalog};
use std::path::{Path, PathBuf};

pub struct Store<C> {
    data_dir: PathBuf,
    client: C,
}

impl<C: ExerciseDbApi> Store<C> {
    /// Create a store rooted at `data_dir`, creating the directory if it
    /// does not exist yet.
    pub fn new(data_dir: impl Into<PathBuf>, client: C) -> Result<Self, ExerciseDbError> {
        let data_dir = data_dir.into();
        if !data_dir.exists() {
            std::fs::create_dir_all(&data_dir)?;
        }
        Ok(Self { data_dir, client })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Cache file path for a query term.
    pub fn cache_path(&self, term: &str) -> PathBuf {
        self.data_dir.join(catalog::cache_file_name(term))
    }

    /// Return the records for `term`, reading the cache file when present
    /// and fetching from the API otherwise.
    ///
    /// On a fetch, the raw body is written to the cache before parsing and
    /// regardless of HTTP status; an error payload therefore surfaces as a
    /// `Decode` error here and again on later cache reads.
    pub async fn get_data(&self, term: &str) -> Result<Vec<Exercise>, ExerciseDbError> {
        let path = self.cache_path(term);
        let raw = if path.is_file() {
            tracing::debug!(%term, path = %path.display(), "cache hit");
            tokio::fs::read_to_string(&path).await?
        } else {
            let fetched = self.client.fetch(term).await?;
            if fetched.status >= 400 {
                tracing::warn!(%term, status = fetched.status, "error status from API, caching body anyway");
            }
            tokio::fs::write(&path, &fetched.body).await?;
            fetched.body
        };
        parse_exercises(&raw)
    }
}

fn parse_exercises(raw: &str) -> Result<Vec<Exercise>, ExerciseDbError> {
    serde_json::from_str(raw).map_err(|e| {
        let snippet: String = raw.chars().take(256).collect();
        ExerciseDbError::Decode(format!("{e} - body: {snippet}"))
    })
}
