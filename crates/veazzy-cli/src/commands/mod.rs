//! Subcommand implementations.

pub mod codec;
pub mod config;

use std::io::Read;
use std::path::Path;

use crate::error::CliResult;

/// Reads a command's input from `file`, or from stdin when no file is given.
pub fn read_input(file: Option<&Path>) -> CliResult<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}
