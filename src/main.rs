//! `fumen` command-line tool (default binary).
//!
//! Converts between fumen text and a JSON array of pages. Logging goes to
//! stderr through `env_logger`; set `RUST_LOG=debug` to see codec traces.

use std::io::Read;

use anyhow::{Context, Result};

use tetris_fumen::cli::{parse_args, run_decode, run_encode, CliConfig, Command, USAGE};

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("cannot read stdin")?;
    Ok(buf)
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = parse_args(&args, CliConfig::from_env())?;

    match invocation.command {
        Command::Help => print!("{}", USAGE),
        Command::Decode { input } => {
            let input = match input {
                Some(text) => text,
                None => read_stdin()?,
            };
            println!("{}", run_decode(&input, &invocation.config)?);
        }
        Command::Encode { path } => {
            let json = match path {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("cannot read {}", path))?,
                None => read_stdin()?,
            };
            println!("{}", run_encode(&json, &invocation.config)?);
        }
    }

    Ok(())
}
