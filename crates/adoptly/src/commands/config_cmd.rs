//! Config subcommand handlers.

use serde::Serialize;

use adoptly_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// The configuration the pet commands would run with.
#[derive(Debug, Serialize)]
struct EffectiveConfig {
    api_url: String,
    timeout_secs: u64,
    config_file: String,
    config_file_exists: bool,
}

fn effective(cfg: &Config, global: &GlobalOpts) -> Result<EffectiveConfig, CliError> {
    let client = cfg.client_config(global.api_url.as_deref())?;
    let path = config::config_path();
    Ok(EffectiveConfig {
        api_url: client.base_url().to_string(),
        timeout_secs: client.timeout().as_secs(),
        config_file_exists: path.exists(),
        config_file: path.display().to_string(),
    })
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let eff = effective(&cfg, global)?;
            let out = output::render_single(
                &global.output,
                &eff,
                |e| {
                    format!(
                        "API URL:     {}\nTimeout:     {}s\nConfig file: {}{}",
                        e.api_url,
                        e.timeout_secs,
                        e.config_file,
                        if e.config_file_exists { "" } else { " (not found)" },
                    )
                },
                |e| e.api_url.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
