//! roomctl - command-line room-booking assistant
//!
//! Main entry point: loads configuration and the room registry, ensures a
//! valid Google credential, then lists available rooms or books one.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use roomctl_core::ports::CalendarGateway;
use roomctl_domain::{Result, RoomCtlError};
use roomctl_infra::{
    load_config, load_rooms, token_path, AccessTokenProvider, FileTokenStore, GoogleAuthenticator,
    GoogleCalendarGateway,
};
use roomctl_lib::cli::Cli;
use roomctl_lib::{commands, output, AppContext};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(RoomCtlError::NoRoomAvailable) => {
            println!("No available rooms found for booking.");
            ExitCode::FAILURE
        }
        Err(RoomCtlError::RoomNotFound(name)) => {
            // Soft failure: report and exit cleanly, nothing was booked
            println!("Room named '{name}' is not available.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config()?;
    output::print_config_banner(&config.booking);

    let rooms = load_rooms(&config)?;
    tracing::debug!(rooms = rooms.len(), "room registry loaded");

    let authenticator = Arc::new(GoogleAuthenticator::new(
        &config.google,
        FileTokenStore::new(token_path()),
    )?);

    // Acquire-or-refresh-or-interactively-obtain, persisting on every
    // successful path. Later gateway calls reuse the persisted credential.
    authenticator
        .ensure_access_token(|authorization_url| {
            println!("Open this URL in your browser to authorize roomctl:");
            println!("  {authorization_url}");
            println!("Waiting for authorization...");
        })
        .await?;

    let provider: Arc<dyn AccessTokenProvider> = authenticator;
    let gateway: Arc<dyn CalendarGateway> = Arc::new(GoogleCalendarGateway::new(provider)?);

    let options = cli.into_options(&config);
    let ctx = AppContext::new(config, rooms, gateway);

    if options.list {
        return commands::list::run(&ctx, &options).await;
    }

    let receipt = commands::book::run(&ctx, &options).await?;
    output::print_receipt(&receipt);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ROOMCTL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
