use anyhow::{bail, Context};
use kickoff::api::start_api_server;
use kickoff::bootstrap::build_services;
use kickoff::cli::{Cli, Commands};
use kickoff::config::AppConfig;
use kickoff::domain::{AnalysisOptions, MatchRequest};
use kickoff::persistence::{HistoryStore, SqliteHistoryStore, HISTORY_LIMIT};
use tracing::info;

pub(crate) async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;

    match &cli.command {
        None => run_serve(config, None, None).await,
        Some(Commands::Serve { host, port }) => run_serve(config, host.clone(), *port).await,
        Some(Commands::Analyze {
            league,
            date,
            home,
            away,
            injuries,
            no_odds,
        }) => {
            crate::main_runtime::init_logging_simple();
            let request = MatchRequest::new(league.as_str(), date.as_str(), home.as_str(), away.as_str())
                .with_options(AnalysisOptions {
                    include_injuries: *injuries,
                    skip_odds: *no_odds,
                });
            run_analyze(config, request).await
        }
        Some(Commands::History { limit }) => {
            crate::main_runtime::init_logging_simple();
            run_history(config, *limit).await
        }
    }
}

fn ensure_valid(config: &AppConfig) -> anyhow::Result<()> {
    if let Err(errors) = config.validate() {
        bail!("Invalid configuration:\n  - {}", errors.join("\n  - "));
    }
    Ok(())
}

async fn run_serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let _guard = crate::main_runtime::init_logging(&config.logging);
    ensure_valid(&config)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let services = build_services(&config).await?;
    info!(
        model = %config.llm.model,
        season = config.football.season,
        odds = services.pipeline.odds_enabled(),
        "Services ready"
    );

    start_api_server(services.app_state(), &config.server.host, config.server.port).await?;
    Ok(())
}

async fn run_analyze(config: AppConfig, request: MatchRequest) -> anyhow::Result<()> {
    ensure_valid(&config)?;
    let services = build_services(&config).await?;

    let outcome = services.pipeline.analyze(&request).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

async fn run_history(config: AppConfig, limit: u32) -> anyhow::Result<()> {
    let store =
        SqliteHistoryStore::connect(&config.database.url, config.database.max_connections).await?;
    store.migrate().await?;

    let records = store.recent(limit.min(HISTORY_LIMIT)).await?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
