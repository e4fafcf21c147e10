use crate::progress::CliReporter;
use crate::render;
use anyhow::Result;
use colored::*;
use review_insight_core::export::{default_file_name, export_csv};
use review_insight_core::fetcher::ReviewSource;
use review_insight_core::{AppConfig, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};

const HELP: &str = "\
Commands:
  run <url> [count]   fetch and classify the newest reviews (count 10-2000, step 10)
  show [n]            print the held report, and its first n reviews
  export [path]       write the held report as CSV
  reset               drop the held report
  status              print the session state
  help                print this help
  quit                leave the session";

pub fn run_shell<S: ReviewSource>(mut session: Session<S>, config: &AppConfig) -> Result<()> {
    let reporter = CliReporter::new();
    let stdin = io::stdin();
    let mut line = String::new();

    println!("{}", "Review Insight interactive session".bold());
    println!("{}", HELP);

    loop {
        print!("{} ", ">".cyan());
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command {
            "run" => {
                let Some(url) = args.first() else {
                    warn!("Usage: run <url> [count]");
                    continue;
                };
                let count = match parse_count(args.get(1).copied(), config)
                    .and_then(|count| Ok(session.engine().check_request(url, count)?))
                {
                    Ok(count) => count,
                    Err(e) => {
                        error!("{}", e);
                        continue;
                    }
                };
                match session.run(url, count, &reporter) {
                    Ok(Some(report)) => render::print_report(report, config.report.top_terms),
                    Ok(None) => info!("No reviews to analyze"),
                    Err(e) => error!("Run failed: {}", e),
                }
            }
            "show" => match session.report() {
                Some(report) => {
                    render::print_report(report, config.report.top_terms);
                    if let Some(n) = args.first().and_then(|n| n.parse::<usize>().ok()) {
                        println!();
                        render::print_reviews(report, n);
                    }
                }
                None => warn!("No report held; use `run` first"),
            },
            "export" => match session.report() {
                Some(report) => {
                    let path = args
                        .first()
                        .map(PathBuf::from)
                        .unwrap_or_else(|| PathBuf::from(default_file_name(report)));
                    match export_csv(report, &path) {
                        Ok(rows) => println!("{} rows written to {}", rows, path.display()),
                        Err(e) => error!("Export failed: {}", e),
                    }
                }
                None => warn!("No report held; use `run` first"),
            },
            "reset" => {
                session.reset();
                println!("Session cleared");
            }
            "status" => println!("{:?}", session.state()),
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            other => warn!("Unknown command '{}'; try `help`", other),
        }
    }

    Ok(())
}

fn parse_count(arg: Option<&str>, config: &AppConfig) -> Result<u32> {
    Ok(match arg {
        Some(raw) => raw.parse::<u32>()?,
        None => config.report.default_count,
    })
}
