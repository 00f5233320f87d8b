use clap::Parser;
use kickoff::cli::Cli;

mod main_dispatch;
mod main_runtime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    main_dispatch::run(&cli).await
}
