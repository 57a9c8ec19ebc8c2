mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ucode_core::ObjectFunction;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Local commands never touch the network
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),
        Command::Util(args) => commands::util::handle(args, &cli.global),

        cmd => {
            let function = build_function(&cli.global)?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &function, &cli.global).await
        }
    }
}

/// Load settings, apply flag overrides and build the function facade.
fn build_function(global: &GlobalOpts) -> Result<ObjectFunction, CliError> {
    let mut settings = ucode_config::load_settings(global.config.as_deref())?;

    if let Some(ref url) = global.base_url {
        settings.base_url.clone_from(url);
    }
    if let Some(ref app_id) = global.app_id {
        settings.app_id.clone_from(app_id);
    }
    if global.timeout.is_some() {
        settings.timeout_secs = global.timeout;
    }
    if settings.function_name.is_empty() {
        settings.function_name = "ucode".into();
    }

    let config = settings.into_config()?;
    Ok(ObjectFunction::new(config)?)
}
