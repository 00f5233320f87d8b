use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kickoff")]
#[command(version = "0.1.0")]
#[command(about = "Football match analysis relay: stats, odds and model-written betting analysis", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config directory (default.toml plus per-environment overrides)
    #[arg(short, long, default_value = "config")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default)
    Serve {
        /// Listen address (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Listen port (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Analyze a single match and print the result as JSON
    Analyze {
        /// League id or name (e.g. 39 or premier_league)
        #[arg(short, long)]
        league: String,
        /// Match date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Home team name
        #[arg(long)]
        home: String,
        /// Away team name
        #[arg(long)]
        away: String,
        /// Include league injuries in the analysis
        #[arg(long)]
        injuries: bool,
        /// Do not fetch bookmaker odds
        #[arg(long)]
        no_odds: bool,
    },
    /// Show recent analyses
    History {
        /// Number of records to show (max 50)
        #[arg(short = 'n', long, default_value = "20")]
        limit: u32,
    },
}
