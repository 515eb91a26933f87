//! Agora command line for delegate listings and boost filtering.

use agora_boost::{Boost, BoostSanitizer, Proposal};
use agora_cli::{read_records, AgoraConfig, HttpTransport};
use agora_governance::{
    create_standard_config, DelegateAggregator, DelegatesQueryParams, StandardStrategy,
};
use agora_subscriptions::SubscriptionClient;
use agora_types::{Address, Environment};
use agora_utils::LogFormat;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agora", about = "Governance delegate data and boost eligibility")]
struct Cli {
    /// Path to a TOML configuration file. File settings are used as the
    /// base; CLI flags and env vars override them.
    #[arg(long, env = "AGORA_CONFIG")]
    config: Option<PathBuf>,

    /// Deployment environment: "production", "demo", or "local".
    #[arg(long, env = "AGORA_ENVIRONMENT")]
    environment: Option<Environment>,

    /// GraphQL endpoint of the governance subgraph.
    #[arg(long, env = "AGORA_SUBGRAPH_URL")]
    subgraph_url: Option<String>,

    /// Base URL of the email notification service.
    #[arg(long, env = "AGORA_SUBSCRIPTIONS_URL")]
    subscriptions_url: Option<String>,

    /// Governance standard, e.g. "compound-governor".
    #[arg(long, env = "AGORA_STANDARD")]
    standard: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "AGORA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "AGORA_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// List delegates, ordered by voting power.
    Delegates {
        #[arg(long, default_value_t = 10)]
        first: u32,
        #[arg(long, default_value_t = 0)]
        skip: u32,
        /// Ordering key (defaults to delegatedVotes).
        #[arg(long)]
        order_by: Option<String>,
        /// Only this delegate; prints a zero record if it is not indexed.
        #[arg(long)]
        id: Option<Address>,
    },
    /// Show one delegate with its token balance.
    Delegate { address: Address },
    /// Describe the on-chain delegation call for the configured standard.
    DelegateMethod,
    /// Filter a boost list down to the boosts eligible for display.
    Sanitize {
        /// Space the boosts belong to.
        #[arg(long)]
        space: String,
        /// JSON file with an array of boosts.
        #[arg(long)]
        boosts: PathBuf,
        /// JSON file with an array of proposals.
        #[arg(long)]
        proposals: PathBuf,
    },
    /// Show a space's boost whitelist status.
    Whitelist { space: String },
    /// Look up an address's email subscription settings.
    Subscription { address: Address },
}

fn load_config(cli: &Cli) -> anyhow::Result<AgoraConfig> {
    let base = match &cli.config {
        Some(path) => AgoraConfig::from_toml_file(path)?,
        None => AgoraConfig::default(),
    };
    Ok(AgoraConfig {
        environment: cli.environment.unwrap_or(base.environment),
        subgraph_url: cli.subgraph_url.clone().unwrap_or(base.subgraph_url),
        subscriptions_url: cli.subscriptions_url.clone().unwrap_or(base.subscriptions_url),
        standard: cli.standard.clone().unwrap_or(base.standard),
        log_level: cli.log_level.clone().unwrap_or(base.log_level),
        log_format: cli.log_format.unwrap_or(base.log_format),
        ..base
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    agora_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    let whitelist = config.whitelist.clone().install()?;
    tracing::debug!(
        environment = %config.environment,
        spaces = whitelist.spaces(config.environment).len(),
        "whitelist ready"
    );

    match cli.command {
        Command::Delegates {
            first,
            skip,
            order_by,
            id,
        } => {
            let aggregator =
                DelegateAggregator::new(&config.standard, HttpTransport::new(&config.subgraph_url)?)?;
            let records = match id {
                Some(address) => aggregator.delegates_or_initialize(address.as_str()).await?,
                None => {
                    let mut params = DelegatesQueryParams::page(first, skip);
                    params.order_by = order_by;
                    aggregator.delegates(&params).await?
                }
            };
            print_json(&records)?;
        }
        Command::Delegate { address } => {
            let aggregator =
                DelegateAggregator::new(&config.standard, HttpTransport::new(&config.subgraph_url)?)?;
            print_json(&aggregator.delegate_or_initialize(address.as_str()).await?)?;
        }
        Command::DelegateMethod => {
            let strategy = create_standard_config(&config.standard)?;
            print_json(&strategy.delegate_method())?;
        }
        Command::Sanitize {
            space,
            boosts,
            proposals,
        } => {
            let boosts: Vec<Boost> = read_records(&boosts, "boost")?;
            let proposals: Vec<Proposal> = read_records(&proposals, "proposal")?;
            let sanitizer = BoostSanitizer::global(config.environment);
            if !sanitizer.is_whitelisted(&space) {
                tracing::warn!(%space, environment = %config.environment, "space is not whitelisted for boosts");
            }
            print_json(&sanitizer.sanitize(&boosts, &proposals, &space))?;
        }
        Command::Whitelist { space } => {
            let sanitizer = BoostSanitizer::global(config.environment);
            print_json(&serde_json::json!({
                "environment": config.environment,
                "space": space,
                "whitelisted": sanitizer.is_whitelisted(&space),
                "bribeDisabled": sanitizer.bribe_disabled(&space),
            }))?;
        }
        Command::Subscription { address } => {
            let client = SubscriptionClient::read_only(&config.subscriptions_url)?;
            let details = client
                .subscription_details(&serde_json::json!({ "address": address }))
                .await?;
            print_json(&details)?;
        }
    }

    Ok(())
}
