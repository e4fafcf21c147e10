mod commands;
mod interactive;
mod logging;
mod progress;
mod render;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use review_insight_core::classifier::SentimentModel;
use review_insight_core::export::{default_file_name, export_csv, write_digest_json};
use review_insight_core::fetcher::{
    Locale, PlayStoreClient, ReviewQuery, ReviewSource, Snapshot, SnapshotSource, Sort,
};
use review_insight_core::{
    normalize, resolve_app_id, AnalysisEngine, AppConfig, ReviewCount, RunOutcome, Session,
};
use tracing::{error, info};

fn main() -> Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match review_insight_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    let result = match args.command {
        Some(Commands::Analyze {
            url,
            count,
            export,
            snapshot,
            json,
        }) => run_analyze(&config, &url, count, export, snapshot.as_deref(), json),
        Some(Commands::Fetch { url, out, count }) => run_fetch(&config, &url, &out, count),
        Some(Commands::Interactive) => run_interactive(&config),
        Some(Commands::Resolve { url }) => match resolve_app_id(&url) {
            Some(app_id) => {
                println!("{}", app_id);
                Ok(())
            }
            None => Err(anyhow!("no app id found in '{}'", url)),
        },
        Some(Commands::Clean { text }) => {
            println!("{}", normalize(&text));
            Ok(())
        }
        Some(Commands::Classify { text }) => run_classify(&config, &text),
        Some(Commands::PrintConfig) => toml::to_string_pretty(&config)
            .map(|rendered| println!("{}", rendered))
            .context("rendering configuration"),
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("Error: {:#}", err);
        process::exit(1);
    }

    Ok(())
}

fn review_count(config: &AppConfig, count: Option<u32>) -> Result<ReviewCount> {
    Ok(ReviewCount::new(count.unwrap_or(config.report.default_count))?)
}

fn open_source(config: &AppConfig, snapshot: Option<&Path>) -> Result<Box<dyn ReviewSource>> {
    Ok(match snapshot {
        Some(path) => {
            info!("Replaying snapshot {}", path.display());
            let source = SnapshotSource::open(path)
                .with_context(|| format!("opening snapshot {}", path.display()))?;
            Box::new(source)
        }
        None => Box::new(PlayStoreClient::new(&config.fetch)?),
    })
}

fn run_analyze(
    config: &AppConfig,
    url: &str,
    count: Option<u32>,
    export: Option<PathBuf>,
    snapshot: Option<&Path>,
    json: Option<PathBuf>,
) -> Result<()> {
    let engine = AnalysisEngine::from_config(open_source(config, snapshot)?, config);
    let count = engine.check_request(url, count.unwrap_or(config.report.default_count))?;
    let reporter = CliReporter::new();

    let report = match engine.run(url, count, &reporter)? {
        RunOutcome::Completed(report) => report,
        RunOutcome::NoReviews(app_id) => {
            println!("{} {}", "No reviews to analyze for".yellow(), app_id);
            return Ok(());
        }
    };

    render::print_report(&report, config.report.top_terms);

    if let Some(path) = export {
        let path = if path.is_dir() {
            path.join(default_file_name(&report))
        } else {
            path
        };
        let rows = export_csv(&report, &path)?;
        println!("{} rows written to {}", rows, path.display());
    }

    if let Some(path) = json {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        write_digest_json(&report, config.report.top_terms, file)?;
        println!("Digest written to {}", path.display());
    }

    Ok(())
}

fn run_fetch(config: &AppConfig, url: &str, out: &Path, count: Option<u32>) -> Result<()> {
    let count = review_count(config, count)?;
    let app_id = resolve_app_id(url).ok_or_else(|| anyhow!("no app id found in '{}'", url))?;
    let client = PlayStoreClient::new(&config.fetch)?;
    let locale = Locale::new(&config.fetch.lang, &config.fetch.country);
    let query = ReviewQuery {
        app_id: &app_id,
        locale: &locale,
        sort: Sort::Newest,
        count: count.get(),
    };

    let snapshot = Snapshot::capture(&client, &query)?;
    snapshot.write(out)?;
    println!(
        "{} reviews for {} saved to {}",
        snapshot.reviews.len().to_string().green(),
        snapshot.app.title.bold(),
        out.display()
    );
    Ok(())
}

fn run_interactive(config: &AppConfig) -> Result<()> {
    let engine = AnalysisEngine::from_config(PlayStoreClient::new(&config.fetch)?, config);
    if let Err(e) = engine.model() {
        error!("{}; runs are disabled until the model artifacts are fixed", e);
    }
    interactive::run_shell(Session::new(engine), config)
}

fn run_classify(config: &AppConfig, text: &str) -> Result<()> {
    let model = SentimentModel::load(&config.model)?;
    let cleaned = normalize(text);
    let label = model.predict(&cleaned)?;
    println!("{} -> {}", cleaned.dimmed(), label.to_string().bold());
    Ok(())
}
