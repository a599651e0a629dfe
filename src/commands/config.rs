use std::io::{self, IsTerminal};

use clap::{Args, Subcommand};
use owo_colors::OwoColorize;

use crate::config;

#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand, Clone)]
enum ConfigSubcommand {
    #[command(about = "Validate the config file and environment")]
    Check,
    #[command(about = "Print the resolved config file path")]
    Path,
}

pub fn run(args: ConfigArgs) -> Result<(), String> {
    match args.command {
        ConfigSubcommand::Check => {
            let source = match config::validate_config()? {
                Some(path) => path.display().to_string(),
                None => "environment only, no config file".to_string(),
            };
            if io::stdout().is_terminal() {
                println!("{} {source}", "config OK:".green());
            } else {
                println!("config OK: {source}");
            }
            Ok(())
        }
        ConfigSubcommand::Path => {
            println!("{}", config::config_path()?.display());
            Ok(())
        }
    }
}
