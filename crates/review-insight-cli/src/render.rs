use colored::*;
use review_insight_core::{AnalysisReport, SentimentLabel};

fn paint(label: &SentimentLabel, text: String) -> ColoredString {
    match label {
        SentimentLabel::Positive => text.green(),
        SentimentLabel::Negative => text.red(),
        SentimentLabel::Other(_) => text.yellow(),
    }
}

pub fn print_report(report: &AnalysisReport, top_terms: usize) {
    let app = report.app();
    let summary = report.summary();

    println!();
    println!("{}", app.title.bold());
    println!("  {} {}", "Developer:".dimmed(), app.developer);
    println!("  {} {}", "Genre:".dimmed(), app.genre);
    match app.score {
        Some(score) => println!("  {} {:.1}", "Score:".dimmed(), score),
        None => println!("  {} -", "Score:".dimmed()),
    }
    println!("  {} {}", "Icon:".dimmed(), app.icon_url);
    println!("  {} {}", "App id:".dimmed(), report.app_id());

    println!();
    println!("{}", "Sentiment".bold());
    println!("  {:<12} {}", "Reviews", summary.total);
    for share in &summary.shares {
        let percent = match share.label {
            SentimentLabel::Negative => format!("-{:.1}%", share.percent),
            _ => format!("{:.1}%", share.percent),
        };
        println!(
            "  {:<12} {:>5}  {}",
            share.label.as_str(),
            share.count,
            paint(&share.label, percent)
        );
    }
    let net = format!("{:.1}", summary.net_score);
    let net = if summary.net_score >= 0.0 {
        net.green()
    } else {
        net.red()
    };
    println!("  {:<12} {}", "Net score", net.bold());

    println!();
    println!("{}", "Daily trend".bold());
    for bucket in report.daily_trend() {
        println!(
            "  {}  {:<10} {:>5}",
            bucket.day,
            paint(&bucket.label, bucket.label.to_string()),
            bucket.count
        );
    }

    if top_terms > 0 {
        for share in &summary.shares {
            let terms = report.top_terms(&share.label, top_terms);
            if terms.is_empty() {
                continue;
            }
            println!();
            println!("{}", format!("Top terms: {}", share.label).bold());
            let line = terms
                .iter()
                .map(|t| format!("{} ({})", t.term, t.count))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {}", paint(&share.label, line));
        }
    }

    let timings = report.timings();
    println!();
    println!(
        "{} fetch {}, classify {}",
        "Timings:".dimmed(),
        format!("{:.2}s", timings.fetch_duration.as_secs_f64()).green(),
        format!("{:.2}s", timings.classify_duration.as_secs_f64()).green(),
    );
}

/// The newest `limit` reviews with their labels.
pub fn print_reviews(report: &AnalysisReport, limit: usize) {
    for review in report.reviews().iter().take(limit) {
        println!(
            "{} {} {} {}",
            review.record.posted_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            "★".repeat(review.record.rating as usize).yellow(),
            review.record.user_name.bold(),
            paint(&review.label, format!("[{}]", review.label)),
        );
        println!("  {}", review.record.content);
    }
}
