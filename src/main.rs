//! HomieHQ checklist command line.
//!
//! Thin call site over the checklist engine: every command builds a
//! coordinator (or aggregator) for one property and prints the result.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use homiehq_checklist::adapters::{
    ChecklistApiConfig, InMemoryChecklistApi, ReqwestChecklistApi, StaticAccessToken,
    StaticConfirmation, StdinConfirmation,
};
use homiehq_checklist::application::{
    ChecklistAggregator, ChecklistCoordinator, ChecklistError, MutationOutcome,
};
use homiehq_checklist::config::AppConfig;
use homiehq_checklist::domain::checklist::{ChecklistStats, ChecklistView, ItemDraft, Season};
use homiehq_checklist::domain::foundation::{ChecklistItemId, PropertyId};
use homiehq_checklist::ports::{ApiError, ChecklistApi, ConfirmationPrompt};
use homiehq_checklist::telemetry;

#[derive(Parser)]
#[command(name = "homiehq-checklist")]
#[command(about = "Seasonal home maintenance checklists for HomieHQ properties")]
#[command(version)]
#[command(
    after_help = "Environment:\n  HOMIEHQ__API__BASE_URL       Backend API root\n  HOMIEHQ__AUTH__ACCESS_TOKEN  Bearer token\n  RUST_LOG                     Log filter override"
)]
struct Cli {
    /// Use an in-process backend seeded with default tasks
    #[arg(long, global = true, env = "HOMIEHQ_OFFLINE", default_value_t = false)]
    offline: bool,

    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Override the configured API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one season's checklist
    Show {
        #[arg(long)]
        property: PropertyId,
        /// Defaults to the current season
        #[arg(long)]
        season: Option<Season>,
    },
    /// Completion per season; several properties are summed into a portfolio
    Summary {
        #[arg(long = "property", required = true, num_args = 1..)]
        properties: Vec<PropertyId>,
    },
    /// Mark an item complete or incomplete
    Toggle {
        #[arg(long)]
        property: PropertyId,
        #[arg(long)]
        item: ChecklistItemId,
        #[arg(long)]
        season: Option<Season>,
    },
    /// Add a custom task
    Add {
        #[arg(long)]
        property: PropertyId,
        #[arg(long)]
        task: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        season: Option<Season>,
    },
    /// Delete an item
    Delete {
        #[arg(long)]
        property: PropertyId,
        #[arg(long)]
        item: ChecklistItemId,
        #[arg(long)]
        season: Option<Season>,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
    /// Restore a season's default tasks
    Reset {
        #[arg(long)]
        property: PropertyId,
        #[arg(long)]
        season: Option<Season>,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{}", .0.user_message())]
    Checklist(#[from] ChecklistError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Err(e) = config.validate() {
        eprintln!("error: invalid configuration: {}", e);
        return ExitCode::from(2);
    }
    if let Err(e) = telemetry::init_tracing(&config.logging) {
        eprintln!("warning: logging not initialized: {}", e);
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_api(offline: bool, config: &AppConfig) -> Result<Arc<dyn ChecklistApi>, ApiError> {
    if offline {
        tracing::info!("Using in-memory checklist backend");
        return Ok(Arc::new(InMemoryChecklistApi::new()));
    }

    let api_config = ChecklistApiConfig::new(config.api.base_url.clone())
        .with_timeout(config.api.timeout())
        .with_max_fetch_retries(config.api.max_fetch_retries);
    let tokens = StaticAccessToken::from_secret(config.auth.access_token.clone());
    Ok(Arc::new(ReqwestChecklistApi::new(api_config, Arc::new(tokens))?))
}

fn confirmation(yes: bool) -> Arc<dyn ConfirmationPrompt> {
    if yes {
        Arc::new(StaticConfirmation::approve())
    } else {
        Arc::new(StdinConfirmation::new())
    }
}

async fn open(
    api: Arc<dyn ChecklistApi>,
    confirmation: Arc<dyn ConfirmationPrompt>,
    property: PropertyId,
    season: Option<Season>,
) -> Result<ChecklistCoordinator, CliError> {
    let mut coordinator = ChecklistCoordinator::with_season(
        api,
        confirmation,
        property,
        season.unwrap_or_else(Season::current),
    );
    coordinator.load().await?;
    Ok(coordinator)
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), CliError> {
    let api = build_api(cli.offline, &config)?;
    let json = cli.json;

    match cli.command {
        Command::Show { property, season } => {
            let coordinator = open(api, confirmation(true), property, season).await?;
            print_view(coordinator.property_id(), coordinator.view(), json)?;
        }
        Command::Summary { properties } => {
            let aggregator = ChecklistAggregator::new(api);
            if let [property] = properties.as_slice() {
                let summary = aggregator.fetch_all_seasons_summary(property).await;
                if json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                } else {
                    println!("Property {}", property);
                    for (season, stats) in summary.iter() {
                        print_stats_line(season, &stats, summary.failed_seasons.contains(&season));
                    }
                    println!("  {:<8} {}", "Overall", format_stats(&summary.overall()));
                }
            } else {
                let portfolio = aggregator.fetch_portfolio_summary(&properties).await;
                if json {
                    println!("{}", serde_json::to_string_pretty(&portfolio)?);
                } else {
                    println!("Portfolio of {} properties", portfolio.property_count);
                    for (season, stats) in portfolio.seasons.iter() {
                        let partial = portfolio.failed_cells.iter().any(|(_, s)| *s == season);
                        print_stats_line(season, &stats, partial);
                    }
                    println!("  {:<8} {}", "Overall", format_stats(&portfolio.seasons.overall()));
                }
            }
        }
        Command::Toggle {
            property,
            item,
            season,
        } => {
            let mut coordinator = open(api, confirmation(true), property, season).await?;
            coordinator.toggle_item(&item).await?;
            print_view(coordinator.property_id(), coordinator.view(), json)?;
        }
        Command::Add {
            property,
            task,
            description,
            season,
        } => {
            let mut coordinator = open(api, confirmation(true), property, season).await?;
            coordinator
                .add_item(ItemDraft::new(task, description.unwrap_or_default()))
                .await?;
            print_feedback(&coordinator, json);
            print_view(coordinator.property_id(), coordinator.view(), json)?;
        }
        Command::Delete {
            property,
            item,
            season,
            yes,
        } => {
            let mut coordinator = open(api, confirmation(yes), property, season).await?;
            if coordinator.delete_item(&item).await? == MutationOutcome::Cancelled {
                eprintln!("Cancelled.");
                return Ok(());
            }
            print_feedback(&coordinator, json);
            print_view(coordinator.property_id(), coordinator.view(), json)?;
        }
        Command::Reset {
            property,
            season,
            yes,
        } => {
            let mut coordinator = open(api, confirmation(yes), property, season).await?;
            if coordinator.reset_checklist().await? == MutationOutcome::Cancelled {
                eprintln!("Cancelled.");
                return Ok(());
            }
            print_feedback(&coordinator, json);
            print_view(coordinator.property_id(), coordinator.view(), json)?;
        }
    }
    Ok(())
}

fn format_stats(stats: &ChecklistStats) -> String {
    format!(
        "{}/{} complete ({})",
        stats.completed_items, stats.total_items, stats.completion_percentage
    )
}

fn print_stats_line(season: Season, stats: &ChecklistStats, failed: bool) {
    let marker = if failed { "  (unavailable)" } else { "" };
    println!("  {:<8} {}{}", season.to_string(), format_stats(stats), marker);
}

fn print_feedback(coordinator: &ChecklistCoordinator, json: bool) {
    if json {
        return;
    }
    if let Some(message) = coordinator.message() {
        println!("{}", message);
    }
    // The mutation went through; only the follow-up refresh failed.
    if let Some(error) = coordinator.error() {
        eprintln!("warning: {}", error.user_message());
    }
}

fn print_view(property: &PropertyId, view: &ChecklistView, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    println!(
        "{} checklist for property {}: {}",
        view.season(),
        property,
        format_stats(&view.stats())
    );
    for item in view.items() {
        let mark = if item.is_completed { "x" } else { " " };
        let custom = if item.is_default { "" } else { "  (custom)" };
        println!("  [{}] {:>5}  {}{}", mark, item.id.to_string(), item.task, custom);
        if let Some(description) = &item.description {
            println!("              {}", description);
        }
    }
    Ok(())
}
