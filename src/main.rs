//! Storybloom server binary.

use std::path::Path;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storybloom::cli::Cli;
use storybloom::config::{self, Config};
use storybloom::context::ServiceContext;
use storybloom::error::StoryError;
use storybloom::server::{self, AppState};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter =
        if cli.verbose { "storybloom=debug,tower_http=debug" } else { "storybloom=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), StoryError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(StoryError::Config)?;
    let addr = cli.listen_addr().map_err(StoryError::Config)?;

    // Mode selection: live by default, replay or record via environment.
    let replay_path = std::env::var("STORYBLOOM_REPLAY").ok();
    let is_recording = std::env::var("STORYBLOOM_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        info!(cassette = %cassette_path, "replay mode");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        info!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    let state = AppState::new(ctx, config.defaults.clone());
    server::serve(addr, state, recording_session).await.map_err(StoryError::Io)
}
