// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod render;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use commands::{Client, Command};
use condo_api::ApiError;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};
use tracing_log::AsTrace;

/// Condo Hub - book and manage building amenities from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the Condo Hub backend
    #[arg(long, env = "CONDO_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// File the signed-in session is kept in between runs
    #[arg(long, env = "CONDO_SESSION_FILE", default_value = ".condo-session.json")]
    session_file: PathBuf,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    // RUST_LOG wins over -v/-q
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_level().to_string())),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    debug!(api_url = %args.api_url, session_file = %args.session_file.display(), "Starting");

    let client: Client = Client::connect(&args.api_url, &args.session_file)?;
    if let Err(err) = args.command.run(&client).await {
        error!("{err}");
        if let Some(api_error) = err.downcast_ref::<ApiError>() {
            if let ApiError::InvalidForm { errors } = api_error {
                for (field, message) in errors {
                    error!("  {field}: {message}");
                }
            }
            if api_error.is_local() {
                error!("Nothing was sent to the server");
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
