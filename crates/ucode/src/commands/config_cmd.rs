//! Config subcommand handlers.

use ucode_config::{Settings, config_path, load_settings, save_settings};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = global.config.clone().unwrap_or_else(config_path);

    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let settings = load_settings(Some(&path))?;
            output::print_output(settings.to_redacted_toml()?.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            save_settings(&path, &Settings::default())?;
            if !global.quiet {
                eprintln!("Settings written to {}", path.display());
            }
            Ok(())
        }
    }
}
