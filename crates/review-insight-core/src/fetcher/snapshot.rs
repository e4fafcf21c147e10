use super::{Locale, ReviewQuery, ReviewSource};
use crate::error::{Error, Result};
use crate::model::{AppId, AppMetadata, ReviewRecord};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// A fetched batch saved to disk so it can be analyzed again offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub app_id: AppId,
    pub app: AppMetadata,
    pub reviews: Vec<ReviewRecord>,
}

impl Snapshot {
    /// Fetch metadata and reviews from `source` into a snapshot.
    pub fn capture<S: ReviewSource>(source: &S, query: &ReviewQuery<'_>) -> Result<Self> {
        let app = source.fetch_app(query.app_id, query.locale)?;
        let reviews = source.fetch_reviews(query)?;
        Ok(Self {
            app_id: query.app_id.clone(),
            app,
            reviews,
        })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        info!(
            "Saved {} reviews for {} to {}",
            self.reviews.len(),
            self.app_id,
            path.display()
        );
        Ok(())
    }
}

/// Replays a [`Snapshot`] as if it came from the store.
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Snapshot::read(path).map(Self::new)
    }

    fn check_app(&self, app_id: &AppId) -> Result<()> {
        if &self.snapshot.app_id != app_id {
            return Err(Error::Fetch(format!(
                "snapshot holds reviews for '{}', not '{}'",
                self.snapshot.app_id, app_id
            )));
        }
        Ok(())
    }
}

impl ReviewSource for SnapshotSource {
    fn fetch_app(&self, app_id: &AppId, _locale: &Locale) -> Result<AppMetadata> {
        self.check_app(app_id)?;
        Ok(self.snapshot.app.clone())
    }

    fn fetch_reviews(&self, query: &ReviewQuery<'_>) -> Result<Vec<ReviewRecord>> {
        self.check_app(query.app_id)?;
        Ok(self
            .snapshot
            .reviews
            .iter()
            .take(query.count as usize)
            .cloned()
            .collect())
    }
}
