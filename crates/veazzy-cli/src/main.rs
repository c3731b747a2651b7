//! veazzy CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use veazzy_cli::cli::{Cli, Command, ConfigAction};
use veazzy_cli::commands::{self, codec::EnvelopeOptions};
use veazzy_cli::config::CliConfig;
use veazzy_cli::error::CliResult;
use veazzy_core::init_tracing;
use veazzy_protocol::CodecRegistry;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Codec commands still run without a subscriber.
    match config.tracing(cli.debug) {
        Ok(tracing) => {
            if let Err(e) = init_tracing(tracing) {
                eprintln!("warning: {}", e);
            }
        }
        Err(e) => eprintln!("warning: {}", e),
    }

    match run(cli, &config) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> CliResult<CliConfig> {
    match cli.config {
        Some(ref path) => CliConfig::load_from(path),
        None => CliConfig::load(),
    }
}

fn run(cli: Cli, config: &CliConfig) -> CliResult<String> {
    let config_path = cli.config.clone().unwrap_or_else(CliConfig::default_path);

    match cli.command {
        Command::Decode { file } => {
            let xml = commands::read_input(file.as_deref())?;
            commands::codec::decode(&CodecRegistry::with_defaults(), &xml, &config.output)
        }
        Command::Encode {
            file,
            iq_id,
            to,
            from,
        } => {
            let json = commands::read_input(file.as_deref())?;
            let envelope = EnvelopeOptions { iq_id, to, from };
            commands::codec::encode(&json, &envelope, &config.output)
        }
        Command::Kinds => Ok(commands::codec::kinds(&CodecRegistry::with_defaults())),
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(config, &config_path),
            ConfigAction::Validate => commands::config::validate(config),
            ConfigAction::Path => Ok(commands::config::path(&config_path)),
        },
    }
}
