pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod format;
pub mod garmin;
pub mod logging;
pub mod models;

#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use config::AppConfig;
use db::AppState;
use tracing::error;

/// Entry point for the `training-dashboard` binary. Returns the exit code.
pub fn run() -> i32 {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let args = cli::Cli::parse();
  logging::init(args.verbose);

  let config = match AppConfig::from_env() {
    Ok(config) => config,
    Err(e) => {
      error!("{}", e);
      return 2;
    }
  };

  let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
    Ok(runtime) => runtime,
    Err(e) => {
      error!("Failed to start async runtime: {}", e);
      return 1;
    }
  };

  runtime.block_on(async move {
    // Preview-only imports never open the database
    if let Some(output) = cli::run_offline(&args, &config) {
      return exit_code(output);
    }

    let pool = match db::initialize_db(&config).await {
      Ok(pool) => pool,
      Err(e) => {
        error!("Failed to initialize database: {}", e);
        return 1;
      }
    };

    let state = AppState { db: pool, config };
    let result = cli::run_command(&args, &state).await;
    state.db.close().await;
    exit_code(result)
  })
}

fn exit_code(result: Result<(), commands::CommandError>) -> i32 {
  match result {
    Ok(()) => 0,
    Err(e) => {
      error!("{}", e);
      1
    }
  }
}
