//! # Signage Player
//!
//! Runs the rotation for one screen without a display attached: the current
//! item is logged as it changes. Useful for kiosks that embed their own
//! renderer via [`signage_player::ChannelSink`] and for checking an
//! assignment end to end.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signage_model::ScreenId;
use signage_player::{ConfigClient, ConfigPoller, LogSink, PlaybackDriver};

#[derive(Parser, Debug)]
#[command(name = "signage-player")]
#[command(about = "Plays the playlist assigned to a hospital signage screen")]
struct Args {
    /// Base URL of the signage server
    #[arg(long, env = "SIGNAGE_SERVER_URL", default_value = "http://localhost:5000")]
    server: String,

    /// Id of the screen this player renders
    #[arg(long, env = "SIGNAGE_SCREEN_ID")]
    screen: ScreenId,

    /// How often to re-fetch the screen config ("30", "45s", "2m")
    #[arg(long, env = "SIGNAGE_POLL_SECS", default_value = "30s", value_parser = parse_interval)]
    poll_interval: Duration,
}

/// Plain numbers are seconds; anything else goes through humantime.
fn parse_interval(raw: &str) -> Result<Duration, humantime::DurationError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => humantime::parse_duration(raw.trim()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    anyhow::ensure!(
        !args.poll_interval.is_zero(),
        "poll interval must be greater than zero"
    );

    let client = ConfigClient::new(&args.server, args.screen)
        .context("failed to set up config client")?;
    let media_base = client.base_url().to_string();

    let (poller, playlists) = ConfigPoller::new(client, args.poll_interval);
    let driver = PlaybackDriver::new(playlists, LogSink::default(), media_base);

    info!(
        screen_id = %args.screen,
        poll_interval = %humantime::format_duration(args.poll_interval),
        "player starting"
    );

    let poller_task = tokio::spawn(poller.run());
    tokio::select! {
        _ = driver.run() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for shutdown signal")?;
            info!("shutdown signal received");
        }
    }
    poller_task.abort();

    Ok(())
}
