use crate::classifier::SentimentModel;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::fetcher::{Locale, ReviewQuery, ReviewSource, Sort};
use crate::model::{AppId, ClassifiedReview, ReviewCount, ReviewRecord};
use crate::progress::ProgressReporter;
use crate::report::{AnalysisReport, RunTimings};
use crate::resolver::resolve_app_id;
use crate::text::normalize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of a run that got past its preconditions and the fetch.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(AnalysisReport),
    /// The store returned no reviews; informational, not an error.
    NoReviews(AppId),
}

/// Runs the fetch → clean → classify → aggregate pipeline.
pub struct AnalysisEngine<S: ReviewSource> {
    source: S,
    // Load failures are kept as text and reported on every attempted run.
    model: std::result::Result<SentimentModel, String>,
    locale: Locale,
}

impl<S: ReviewSource> AnalysisEngine<S> {
    pub fn new(source: S, model: Result<SentimentModel>, locale: Locale) -> Self {
        let model = model.map_err(|e| {
            warn!("Sentiment model not loaded: {}", e);
            e.to_string()
        });
        Self {
            source,
            model,
            locale,
        }
    }

    /// Load the model named by `config` and wrap `source`.
    pub fn from_config(source: S, config: &AppConfig) -> Self {
        let locale = Locale::new(&config.fetch.lang, &config.fetch.country);
        Self::new(source, SentimentModel::load(&config.model), locale)
    }

    pub fn model(&self) -> Result<&SentimentModel> {
        self.model
            .as_ref()
            .map_err(|reason| Error::ModelUnavailable(reason.clone()))
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Checks, in order: model loaded, URL non-empty, app id present.
    pub fn check_preconditions(&self, url: &str) -> Result<AppId> {
        self.model()?;
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::EmptyUrl);
        }
        resolve_app_id(url).ok_or_else(|| Error::InvalidUrl(url.to_string()))
    }

    /// Preconditions first, then the requested review count.
    pub fn check_request(&self, url: &str, count: u32) -> Result<ReviewCount> {
        self.check_preconditions(url)?;
        ReviewCount::new(count)
    }

    /// Run the full pipeline:
    /// 1. Resolve the app id (no network on failure)
    /// 2. Fetch app metadata and the newest `count` reviews
    /// 3. Clean and classify every review
    /// 4. Assemble the report
    pub fn run(
        &self,
        url: &str,
        count: ReviewCount,
        reporter: &dyn ProgressReporter,
    ) -> Result<RunOutcome> {
        let app_id = self.check_preconditions(url)?;
        let model = self.model()?;

        // Phase 1: Fetch
        info!("Fetching up to {} reviews for {}...", count.get(), app_id);
        reporter.on_fetch_start(app_id.as_str(), count.get());
        let fetch_start = Instant::now();
        let query = ReviewQuery {
            app_id: &app_id,
            locale: &self.locale,
            sort: Sort::Newest,
            count: count.get(),
        };
        let fetched = self
            .source
            .fetch_app(&app_id, &self.locale)
            .and_then(|app| Ok((app, self.source.fetch_reviews(&query)?)));
        let (app, records) = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                reporter.on_run_failed(&e.to_string());
                return Err(e);
            }
        };
        let fetch_duration = fetch_start.elapsed();
        reporter.on_fetch_complete(records.len(), fetch_duration.as_secs_f64());
        debug!(
            "Fetch completed in {:.2}s, {} reviews for '{}'",
            fetch_duration.as_secs_f64(),
            records.len(),
            app.title
        );

        if records.is_empty() {
            info!("No reviews available for {}", app_id);
            return Ok(RunOutcome::NoReviews(app_id));
        }

        // Phase 2: Classify
        info!("Classifying {} reviews...", records.len());
        let classify_start = Instant::now();
        let reviews = match classify_all(model, records, reporter) {
            Ok(reviews) => reviews,
            Err(e) => {
                reporter.on_run_failed(&e.to_string());
                return Err(e);
            }
        };
        let classify_duration = classify_start.elapsed();
        reporter.on_classify_complete(reviews.len(), classify_duration.as_secs_f64());
        debug!(
            "Classification completed in {:.2}s",
            classify_duration.as_secs_f64()
        );

        // Phase 3: Aggregate
        let timings = RunTimings {
            fetch_duration,
            classify_duration,
        };
        match AnalysisReport::new(app_id.clone(), app, reviews, timings) {
            Some(report) => Ok(RunOutcome::Completed(report)),
            None => Ok(RunOutcome::NoReviews(app_id)),
        }
    }
}

/// Clean and classify a batch. The first failure discards the whole batch.
pub fn classify_all(
    model: &SentimentModel,
    records: Vec<ReviewRecord>,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<ClassifiedReview>> {
    let total = records.len();
    reporter.on_classify_start(total);

    let mut classified = Vec::with_capacity(total);
    for (i, record) in records.into_iter().enumerate() {
        let cleaned = normalize(&record.content);
        let label = model.predict(&cleaned)?;
        classified.push(ClassifiedReview {
            record,
            cleaned,
            label,
        });
        reporter.on_classify_progress(i + 1, total);
    }
    Ok(classified)
}
