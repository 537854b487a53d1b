use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing::{info, warn};

use emoji_stats_feed::runtime::{build_runtime, load_and_log_config, shutdown_signal};
use emoji_stats_feed::{CommonArgs, FeedOptions, StatsFeed, StatsService, logging};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless subscriber to the emoji stats feed", long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Print one fresh snapshot as JSON and exit
    #[arg(long, default_value = "false")]
    once: bool,

    /// How long `--once` waits for a snapshot, in seconds
    #[arg(long, default_value = "10", requires = "once")]
    timeout_secs: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_dual_logging();

    let rt = build_runtime()?;
    rt.block_on(run(args))
}

async fn run(args: Args) -> Result<()> {
    let (config, _) = load_and_log_config(&args.common)?;
    let options = FeedOptions::from(&config.feed);

    if args.once {
        return print_once(config.feed.endpoint, options, args.timeout_secs).await;
    }

    let feed = StatsFeed::connect(config.feed.endpoint, options);
    let mut view = feed.view();

    tokio::select! {
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
        _ = async {
            while let Ok(pair) = view.changed().await {
                info!(
                    "emoji={} packs={} indexed_emoji={} indexed_packs={} (previous emoji={})",
                    pair.current.total_emoji_count,
                    pair.current.total_emojipack_count,
                    pair.current.indexed_emoji_count,
                    pair.current.indexed_emojipack_count,
                    pair.previous.total_emoji_count,
                );
            }
            warn!("Stats feed ended");
        } => {}
    }

    feed.stop().await;
    Ok(())
}

/// Fetch one snapshot through the pull accessor and print it as JSON
async fn print_once(
    endpoint: emoji_stats_feed::Endpoint,
    options: FeedOptions,
    timeout_secs: u64,
) -> Result<()> {
    let service = StatsService::new(endpoint, options);
    let result = service
        .get_latest_timeout(Duration::from_secs(timeout_secs))
        .await;
    service.stop().await;

    let snapshot = result?;
    println!("{}", serde_json::to_string(&snapshot)?);
    Ok(())
}
