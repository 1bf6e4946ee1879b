// Copyright (c) 2026 Factoid Tools Contributors. MIT License.
// See LICENSE for details.

//! # fct
//!
//! Entry point for the `fct` binary. Parses CLI arguments, initializes
//! logging, runs one subcommand and prints its result on stdout.
//!
//! - `keygen`   generate a key and print its four addresses
//! - `validate` check an address string
//! - `public`   derive the public address of a private one
//! - `fee`      estimate a fee
//! - `transfer` build and sign a transfer

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use cli::{Commands, FctCli};

fn main() -> Result<()> {
    let cli = FctCli::parse();
    logging::init_logging(logging::DEFAULT_FILTER, cli.log_format);

    match cli.command {
        Commands::Keygen(args) => print_json(&commands::keygen(&args)?),
        Commands::Validate(args) => {
            let report = commands::validate(&args);
            print_json(&report)?;
            if !report.valid {
                anyhow::bail!("invalid address");
            }
            Ok(())
        }
        Commands::Public(args) => {
            println!("{}", commands::public(&args)?);
            Ok(())
        }
        Commands::Fee(args) => print_json(&commands::fee(&args)?),
        Commands::Transfer(args) => print_json(&commands::transfer(&args)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
