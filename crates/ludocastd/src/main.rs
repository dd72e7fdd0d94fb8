//! Standalone lobby server.
//!
//! Run with:
//! ```not_rust
//! ludocastd
//! ludocastd --bind 0.0.0.0:4000 --players 4 --ring green,red,blue,yellow
//! LUDOCAST_PLAYERS=3 ludocastd --log-level debug
//! ```

use std::time::Duration;

use clap::Parser;
use ludocast::LudocastServer;
use ludocast_lobby::{ColorRing, LobbyConfig};
use ludocast_protocol::Color;

#[derive(Parser, Debug)]
#[command(name = "ludocastd")]
#[command(about = "Realtime lobby server for four-color race board games", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(short, long, env = "LUDOCAST_BIND", default_value = "0.0.0.0:4000")]
    bind: String,

    /// Seats per game (2 to 4)
    #[arg(short, long, env = "LUDOCAST_PLAYERS", default_value_t = 2)]
    players: usize,

    /// Turn ring as comma-separated colors, each color exactly once
    #[arg(
        long,
        env = "LUDOCAST_RING",
        value_delimiter = ',',
        default_value = "green,red,blue,yellow"
    )]
    ring: Vec<Color>,

    /// Drop refused claims without answering the claimant
    #[arg(long, env = "LUDOCAST_SILENT_REJECTIONS")]
    silent_rejections: bool,

    /// Close connections silent for this many seconds
    #[arg(long, env = "LUDOCAST_IDLE_TIMEOUT")]
    idle_timeout: Option<u64>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    ludocast::logging::init(&args.log_level)?;

    let config = LobbyConfig {
        player_count: args.players,
        ring: ColorRing::new(args.ring)?,
        notify_rejections: !args.silent_rejections,
    };
    tracing::info!(players = config.player_count, ring = %config.ring, "configuring lobby");

    let mut builder = LudocastServer::builder()
        .bind(&args.bind)
        .lobby_config(config);
    if let Some(secs) = args.idle_timeout {
        builder = builder.idle_timeout(Duration::from_secs(secs));
    }
    let server = builder.build().await?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}
