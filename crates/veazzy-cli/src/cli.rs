//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use veazzy_core::Address;

/// veazzy - meeting-control stanza codec
#[derive(Debug, Parser)]
#[command(name = "veazzy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "VEAZZY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode an XML stanza into a JSON message
    Decode {
        /// File to read (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Encode a JSON message into an XML stanza
    Encode {
        /// File to read (stdin when omitted)
        file: Option<PathBuf>,

        /// Wrap the payload in an <iq type="set"> with this id
        #[arg(long)]
        iq_id: Option<String>,

        /// Recipient of the wrapping <iq>
        #[arg(long)]
        to: Option<Address>,

        /// Sender of the wrapping <iq>
        #[arg(long)]
        from: Option<Address>,
    },

    /// List registered (namespace, element) pairs
    Kinds,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the current configuration
    Dump,

    /// Validate the configuration file
    Validate,

    /// Show the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encode_with_envelope() {
        let cli = Cli::try_parse_from([
            "veazzy",
            "encode",
            "msg.json",
            "--iq-id",
            "h2",
            "--to",
            "room1@conf.example/focus",
        ])
        .unwrap();

        match cli.command {
            Command::Encode { file, iq_id, to, from } => {
                assert_eq!(file, Some(PathBuf::from("msg.json")));
                assert_eq!(iq_id.as_deref(), Some("h2"));
                assert_eq!(to.unwrap().to_string(), "room1@conf.example/focus");
                assert!(from.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_address() {
        let result = Cli::try_parse_from(["veazzy", "encode", "--to", "@/"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_debug_and_config() {
        let cli =
            Cli::try_parse_from(["veazzy", "-v", "--config", "/tmp/v.toml", "config", "path"])
                .unwrap();
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/v.toml")));
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Path
            }
        ));
    }
}
