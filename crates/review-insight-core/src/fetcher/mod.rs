pub mod play_store;
pub mod snapshot;

use crate::error::Result;
use crate::model::{AppId, AppMetadata, ReviewRecord};

pub use play_store::PlayStoreClient;
pub use snapshot::{Snapshot, SnapshotSource};

/// Language and country the store should localize reviews for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub lang: String,
    pub country: String,
}

impl Locale {
    pub fn new(lang: &str, country: &str) -> Self {
        Self {
            lang: lang.to_string(),
            country: country.to_string(),
        }
    }
}

/// Review ordering understood by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    MostRelevant,
    Newest,
    Rating,
}

impl Sort {
    pub fn code(self) -> u8 {
        match self {
            Sort::MostRelevant => 1,
            Sort::Newest => 2,
            Sort::Rating => 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewQuery<'a> {
    pub app_id: &'a AppId,
    pub locale: &'a Locale,
    pub sort: Sort,
    pub count: u32,
}

/// Network-backed (or replayed) source of app metadata and reviews.
///
/// Implementations are fallible and may block for as long as their
/// transport allows; the pipeline calls them once per run.
pub trait ReviewSource {
    fn fetch_app(&self, app_id: &AppId, locale: &Locale) -> Result<AppMetadata>;
    fn fetch_reviews(&self, query: &ReviewQuery<'_>) -> Result<Vec<ReviewRecord>>;
}

impl<S: ReviewSource + ?Sized> ReviewSource for &S {
    fn fetch_app(&self, app_id: &AppId, locale: &Locale) -> Result<AppMetadata> {
        (**self).fetch_app(app_id, locale)
    }

    fn fetch_reviews(&self, query: &ReviewQuery<'_>) -> Result<Vec<ReviewRecord>> {
        (**self).fetch_reviews(query)
    }
}

impl<S: ReviewSource + ?Sized> ReviewSource for Box<S> {
    fn fetch_app(&self, app_id: &AppId, locale: &Locale) -> Result<AppMetadata> {
        (**self).fetch_app(app_id, locale)
    }

    fn fetch_reviews(&self, query: &ReviewQuery<'_>) -> Result<Vec<ReviewRecord>> {
        (**self).fetch_reviews(query)
    }
}
