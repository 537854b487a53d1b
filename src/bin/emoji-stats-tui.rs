use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};

use emoji_stats_feed::runtime::{build_runtime, load_and_log_config, shutdown_signal};
use emoji_stats_feed::tui::{self, LogBuffer, TuiApp};
use emoji_stats_feed::{CommonArgs, FeedOptions, StatsFeed, logging};

#[derive(Parser, Debug)]
#[command(author, version, about = "Emoji stats with TUI dashboard", long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Disable TUI and run in headless mode
    #[arg(long, default_value = "false")]
    no_tui: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_buffer = logging::init_tui_logging(args.no_tui);

    let rt = build_runtime()?;
    rt.block_on(run(args, log_buffer))
}

async fn run(args: Args, log_buffer: Option<LogBuffer>) -> Result<()> {
    let (config, _) = load_and_log_config(&args.common)?;
    let endpoint = config.feed.endpoint.clone();
    let feed = StatsFeed::connect(endpoint.clone(), FeedOptions::from(&config.feed));

    // TUI signals on this when the user quits
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
    // Tells the TUI to exit on external signals
    let (tui_shutdown_tx, tui_shutdown_rx) = mpsc::channel::<()>(1);

    let tui_handle = if args.no_tui {
        None
    } else {
        let mut app = TuiApp::new(
            feed.view(),
            feed.state_changes(),
            endpoint,
            config.dashboard.animation,
        );
        if let Some(buffer) = log_buffer {
            app = app.with_log_buffer(buffer);
        }

        let shutdown_tx = shutdown_tx.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = tui::run_tui(app, shutdown_tx, tui_shutdown_rx).await {
                error!("TUI error: {}", e);
            }
            info!("TUI exited, initiating shutdown");
        }))
    };

    let mut view = feed.view();
    let signal = shutdown_signal();
    tokio::pin!(signal);
    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            _ = &mut signal => {
                info!("Shutdown signal received");
                let _ = tui_shutdown_tx.send(()).await;
                break;
            }
            changed = view.changed() => match changed {
                Ok(pair) => info!(
                    "Accepted snapshot: emoji {} -> {}",
                    pair.previous.total_emoji_count, pair.current.total_emoji_count
                ),
                Err(_) => break,
            },
        }
    }

    feed.stop().await;

    if let Some(handle) = tui_handle {
        let _ = handle.await;
    }

    Ok(())
}
