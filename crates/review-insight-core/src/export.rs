use crate::error::Result;
use crate::report::AnalysisReport;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const CSV_HEADERS: [&str; 6] = [
    "timestamp",
    "user",
    "rating",
    "review",
    "cleaned_review",
    "sentiment",
];

/// Write every classified review of `report` as CSV rows.
pub fn write_csv<W: Write>(report: &AnalysisReport, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;

    for review in report.reviews() {
        let timestamp = review.record.posted_at.format("%Y-%m-%d %H:%M:%S").to_string();
        let rating = review.record.rating.to_string();
        wtr.write_record([
            timestamp.as_str(),
            review.record.user_name.as_str(),
            rating.as_str(),
            review.record.content.as_str(),
            review.cleaned.as_str(),
            review.label.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export to `path`, creating parent directories. Returns the row count.
pub fn export_csv(report: &AnalysisReport, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_csv(report, File::create(path)?)?;
    info!(
        "Exported {} reviews to {}",
        report.reviews().len(),
        path.display()
    );
    Ok(report.reviews().len())
}

/// `Review_<app title>.csv`, with characters unsafe in file names replaced.
pub fn default_file_name(report: &AnalysisReport) -> String {
    let title: String = report
        .app()
        .title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = if title.is_empty() {
        report.app_id().to_string()
    } else {
        title
    };
    format!("Review_{}.csv", stem)
}

/// Summary, trend and top terms of `report` as pretty JSON.
pub fn write_digest_json<W: Write>(report: &AnalysisReport, top_terms: usize, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &report.digest(top_terms))?;
    Ok(())
}
