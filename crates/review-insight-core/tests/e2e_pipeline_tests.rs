mod common;

use chrono::NaiveDate;
use common::*;
use review_insight_core::error::Error;
use review_insight_core::fetcher::{Locale, Snapshot, SnapshotSource};
use review_insight_core::{
    AnalysisEngine, AppConfig, ReviewCount, RunOutcome, SentimentLabel, SilentReporter,
};
use std::fs;
use tempfile::tempdir;

fn completed(outcome: RunOutcome) -> review_insight_core::AnalysisReport {
    match outcome {
        RunOutcome::Completed(report) => report,
        RunOutcome::NoReviews(app_id) => panic!("expected a report, got no reviews for {}", app_id),
    }
}

#[test]
fn test_three_review_scenario() {
    let engine = engine(FakeSource::new(three_reviews()));
    let report = completed(
        engine
            .run(STORE_URL, ReviewCount::new(50).unwrap(), &SilentReporter)
            .unwrap(),
    );

    assert_eq!(report.app_id().as_str(), "com.mobile.legends");
    assert_eq!(report.app().developer, "Moonton");

    let labels: Vec<&SentimentLabel> = report.reviews().iter().map(|r| &r.label).collect();
    assert_eq!(
        labels,
        vec![
            &SentimentLabel::Positive,
            &SentimentLabel::Negative,
            &SentimentLabel::Positive
        ]
    );

    let summary = report.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.positive, 2);
    assert_eq!(summary.negative, 1);
    assert_eq!(format!("{:.1}%", summary.positive_percent()), "66.7%");
    assert_eq!(format!("-{:.1}%", summary.negative_percent()), "-33.3%");
    assert_eq!(summary.net_score, 33.3);

    let trend = report.daily_trend();
    assert_eq!(trend.len(), 2);
    assert_eq!(trend.iter().map(|b| b.count).sum::<usize>(), 3);
    assert_eq!(trend[0].day, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(trend[0].label, SentimentLabel::Positive);
    assert_eq!(trend[0].count, 2);
    assert_eq!(trend[1].label, SentimentLabel::Negative);
}

#[test]
fn test_cleaned_text_and_corpora() {
    let engine = engine(FakeSource::new(three_reviews()));
    let report = completed(
        engine
            .run(STORE_URL, ReviewCount::default(), &SilentReporter)
            .unwrap(),
    );

    assert_eq!(report.reviews()[0].cleaned, "gamenya bagus banget");
    assert_eq!(
        report.corpus(&SentimentLabel::Positive),
        "gamenya bagus banget mantap suka sekali"
    );
    assert_eq!(
        report.corpus(&SentimentLabel::Negative),
        "sering crash setelah update"
    );

    let terms = report.top_terms(&SentimentLabel::Positive, 2);
    assert_eq!(terms.len(), 2);
    assert!(terms.iter().all(|t| t.count == 1));
}

#[test]
fn test_url_without_id_makes_no_fetch() {
    let engine = engine(FakeSource::new(three_reviews()));
    let err = engine
        .run(
            "https://play.google.com/store/apps/details?hl=id",
            ReviewCount::default(),
            &SilentReporter,
        )
        .unwrap_err();

    assert!(matches!(err, Error::InvalidUrl(_)));
    assert!(err.is_input_error());
    assert_eq!(engine.source().total_calls(), 0);
}

#[test]
fn test_empty_url_makes_no_fetch() {
    let engine = engine(FakeSource::new(three_reviews()));
    let err = engine
        .run("   ", ReviewCount::default(), &SilentReporter)
        .unwrap_err();
    assert!(matches!(err, Error::EmptyUrl));
    assert_eq!(engine.source().total_calls(), 0);
}

#[test]
fn test_missing_model_checked_first() {
    let engine = AnalysisEngine::new(
        FakeSource::new(three_reviews()),
        Err(Error::ModelUnavailable("models/vectorizer.json not found".to_string())),
        Locale::new("id", "id"),
    );

    // Even an empty URL reports the model problem first
    let err = engine
        .run("", ReviewCount::default(), &SilentReporter)
        .unwrap_err();
    assert!(matches!(err, Error::ModelUnavailable(_)));

    // And it is reported again on every attempt
    let err = engine
        .run(STORE_URL, ReviewCount::default(), &SilentReporter)
        .unwrap_err();
    assert!(matches!(err, Error::ModelUnavailable(_)));
    assert_eq!(engine.source().total_calls(), 0);
}

#[test]
fn test_zero_reviews_is_not_an_error() {
    let engine = engine(FakeSource::new(vec![]));
    let outcome = engine
        .run(STORE_URL, ReviewCount::default(), &SilentReporter)
        .unwrap();
    assert!(matches!(outcome, RunOutcome::NoReviews(_)));
    assert_eq!(engine.source().review_calls.get(), 1);
}

#[test]
fn test_requested_count_reaches_source() {
    let engine = engine(FakeSource::new(three_reviews()));
    engine
        .run(STORE_URL, ReviewCount::new(120).unwrap(), &SilentReporter)
        .unwrap();
    assert_eq!(engine.source().last_count.get(), 120);
}

#[test]
fn test_fetch_failure_propagates_cause() {
    let source = FakeSource::new(three_reviews());
    *source.fail_with.borrow_mut() = Some("connection reset".to_string());
    let engine = engine(source);

    let err = engine
        .run(STORE_URL, ReviewCount::default(), &SilentReporter)
        .unwrap_err();
    assert!(err.to_string().contains("connection reset"));
    // Metadata failed, reviews were never requested
    assert_eq!(engine.source().review_calls.get(), 0);
}

#[test]
fn test_classification_failure_discards_batch() {
    let mut reviews = three_reviews();
    reviews.push(review("Rudi", "aplikasi rusak", 2, 8, 1));
    let engine = engine(FakeSource::new(reviews));

    let err = engine
        .run(STORE_URL, ReviewCount::default(), &SilentReporter)
        .unwrap_err();
    assert!(matches!(err, Error::Classify(_)));
}

#[test]
fn test_snapshot_with_artifacts_on_disk() {
    let dir = tempdir().unwrap();
    let vectorizer_path = dir.path().join("vectorizer.json");
    let classifier_path = dir.path().join("classifier.json");
    fs::write(
        &vectorizer_path,
        r#"{"vocabulary": {"bagus": 0, "mantap": 1, "crash": 2, "lag": 3}, "idf": [1.0, 1.0, 1.0, 1.0]}"#,
    )
    .unwrap();
    fs::write(
        &classifier_path,
        r#"{"classes": ["Negatif", "Positif"], "coef": [[1.5, 1.5, -2.0, -2.0]], "intercept": [-0.1]}"#,
    )
    .unwrap();

    let mut config = AppConfig::default();
    config.model.vectorizer_path = vectorizer_path.to_string_lossy().into_owned();
    config.model.classifier_path = classifier_path.to_string_lossy().into_owned();

    let app_id = review_insight_core::resolve_app_id(STORE_URL).unwrap();
    let snapshot = Snapshot {
        app_id,
        app: Default::default(),
        reviews: three_reviews(),
    };
    let snapshot_path = dir.path().join("snapshot.json");
    snapshot.write(&snapshot_path).unwrap();

    let source = SnapshotSource::open(&snapshot_path).unwrap();
    let engine = AnalysisEngine::from_config(source, &config);
    let report = completed(
        engine
            .run(STORE_URL, ReviewCount::default(), &SilentReporter)
            .unwrap(),
    );

    let summary = report.summary();
    assert_eq!(summary.positive, 2);
    assert_eq!(summary.negative, 1);
    assert_eq!(summary.net_score, 33.3);
}

#[test]
fn test_missing_artifacts_disable_runs() {
    let dir = tempdir().unwrap();
    let mut config = AppConfig::default();
    config.model.vectorizer_path = dir.path().join("none.json").to_string_lossy().into_owned();

    let engine = AnalysisEngine::from_config(FakeSource::new(three_reviews()), &config);
    let err = engine
        .run(STORE_URL, ReviewCount::default(), &SilentReporter)
        .unwrap_err();
    assert!(matches!(err, Error::ModelUnavailable(_)));
    assert_eq!(engine.source().total_calls(), 0);
}

#[test]
fn test_count_checked_after_preconditions() {
    let missing = AnalysisEngine::new(
        FakeSource::new(three_reviews()),
        Err(Error::ModelUnavailable("no artifacts".to_string())),
        Locale::new("id", "id"),
    );
    assert!(matches!(
        missing.check_request(STORE_URL, 5).unwrap_err(),
        Error::ModelUnavailable(_)
    ));

    let engine = engine(FakeSource::new(three_reviews()));
    assert!(matches!(
        engine.check_request("https://play.google.com/store", 5).unwrap_err(),
        Error::InvalidUrl(_)
    ));
    assert!(matches!(
        engine.check_request(STORE_URL, 5).unwrap_err(),
        Error::InvalidCount { got: 5, .. }
    ));
    assert_eq!(engine.check_request(STORE_URL, 120).unwrap().get(), 120);
    assert_eq!(engine.source().total_calls(), 0);
}
