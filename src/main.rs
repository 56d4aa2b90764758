// src/main.rs
use clap::Parser;
use soccer_dashboard::cli::{Args, is_config_operation};
use soccer_dashboard::commands::{
    handle_config_update_command, handle_list_config_command, run_command,
};
use soccer_dashboard::config::Config;
use soccer_dashboard::display::print_error;
use soccer_dashboard::error::AppError;
use soccer_dashboard::logging::setup_logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Keep the guard alive for the whole run so buffered logs get flushed
    let (log_file_path, _guard) = setup_logging(&args).await?;
    info!("Logging to {}", log_file_path);

    if args.list_config {
        return handle_list_config_command().await;
    }

    if is_config_operation(&args) {
        return handle_config_update_command(&args).await;
    }

    let Some(command) = args.command.clone() else {
        println!("No command given. Run with --help to see the available commands.");
        return Ok(());
    };

    let config = match Config::load().await {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            print_error(&mut std::io::stdout(), &e.to_string())?;
            return Err(e);
        }
    };
    let demo_fallback = args.demo || config.demo_fallback;

    run_command(command, &config, demo_fallback).await
}
