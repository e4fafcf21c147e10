use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "review-insight")]
#[command(about = "Sentiment dashboard for Play Store reviews", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch, classify and summarize the newest reviews of an app
    Analyze {
        /// Play Store URL containing `id=<package>`
        url: String,
        /// Number of reviews to fetch (10-2000, step 10)
        #[arg(short, long)]
        count: Option<u32>,
        /// Write the classified reviews as CSV (a directory gets the default file name)
        #[arg(short, long)]
        export: Option<PathBuf>,
        /// Read reviews from a saved snapshot instead of the store
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        /// Write a JSON digest of the report
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Fetch reviews and save them as a snapshot for offline analysis
    Fetch {
        url: String,
        #[arg(short, long)]
        out: PathBuf,
        #[arg(short, long)]
        count: Option<u32>,
    },
    /// Start an interactive analysis session
    Interactive,
    /// Print the app id found in a store URL
    Resolve { url: String },
    /// Print the normalized form of a text
    Clean { text: String },
    /// Classify a single text with the loaded model
    Classify { text: String },
    /// Print configuration values
    PrintConfig,
}
