use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use riftscope::analysis::champion_stats::PerformanceTracker;
use riftscope::api::client::RiotApiClient;
use riftscope::display::output::{
    display_champion_performance, display_error, display_info, display_partial_warning,
    display_rank, display_success,
};
use riftscope::{AppError, Config, FetcherConfig, RateLimitedFetcher};

#[derive(Parser, Debug)]
#[command(name = "riftscope")]
#[command(about = "Fetch and analyze recent League of Legends games", long_about = None)]
struct Args {
    /// Riot game name
    game_name: String,

    /// Riot tag line
    tag_line: String,

    /// Platform region (default: euw1, or RIOT_REGION)
    #[arg(short, long)]
    region: Option<String>,

    /// Number of matches to analyze (max: 100)
    #[arg(short, long, default_value = "20")]
    matches: usize,

    /// Match-detail requests dispatched concurrently per batch
    #[arg(long, default_value = "10")]
    batch_size: usize,

    /// Delay between batches, in milliseconds
    #[arg(long, default_value = "200")]
    batch_delay_ms: u64,

    /// Disable the in-memory match cache
    #[arg(long)]
    no_cache: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(region) = args.region {
        config.region = region;
    }

    let player_name = format!("{}#{}", args.game_name, args.tag_line);
    display_info(&format!(
        "Fetching data for {} in region {}",
        player_name, config.region
    ));

    let client = Arc::new(RiotApiClient::new(config)?);

    // Step 1: resolve the Riot ID to a PUUID
    let account = client.get_account(&args.game_name, &args.tag_line).await?;
    display_success(&format!("Found PUUID: {}", &account.puuid[0..8]));

    // Step 2: summoner profile and ranked entries in parallel. Missing
    // ranked data is fine, the profile is not.
    let (summoner, entries) = tokio::join!(
        client.get_summoner(&account.puuid),
        client.get_league_entries(&account.puuid)
    );
    let summoner = summoner?;
    display_success(&format!("Summoner level: {}", summoner.summoner_level));

    let entries = match entries {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "could not fetch ranked entries");
            Vec::new()
        }
    };

    // Step 3: recent match IDs
    let count = args.matches.min(100);
    let match_ids = client.get_match_ids(&account.puuid, count).await?;
    if match_ids.is_empty() {
        return Err(AppError::NoRecentGames.into());
    }
    display_success(&format!("Found {} matches to analyze", match_ids.len()));

    // Step 4: match details, batched under the rate limit
    let fetcher_config = FetcherConfig {
        batch_size: args.batch_size,
        inter_batch_delay: Duration::from_millis(args.batch_delay_ms),
        cache_ttl: if args.no_cache {
            Duration::ZERO
        } else {
            Duration::from_secs(30 * 60)
        },
        ..FetcherConfig::default()
    };
    let fetcher = RateLimitedFetcher::new(fetcher_config)?;
    let requests = client.match_requests(match_ids.clone());

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Fetching {} match details", requests.len()));
    spinner.enable_steady_tick(Duration::from_millis(120));
    let outcomes = fetcher.fetch_all(&requests).await;
    spinner.finish_and_clear();

    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    if failed > 0 {
        display_partial_warning(outcomes.len() - failed, match_ids.len());
    } else {
        display_success("Match data fetched");
    }

    // Step 5: aggregate and display whatever we got
    let mut tracker = PerformanceTracker::new();
    for outcome in &outcomes {
        if let Some(m) = &outcome.value {
            tracker.add_match(m, &account.puuid);
        }
    }

    display_rank(&entries, &player_name);
    display_champion_performance(&tracker, &player_name);

    Ok(())
}
