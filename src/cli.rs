//! Command-line front end for the `fumen` binary.
//!
//! Configuration comes from the environment first and is then overridden by
//! flags on the command line:
//!
//! - `FUMEN_FILLER_EVERY`: insert a `?` filler after every N encoded symbols
//! - `FUMEN_PRETTY`: set to "1" or "true" to pretty-print decoded JSON

use anyhow::{anyhow, Context, Result};
use log::debug;

use crate::codec::fumen::EDITOR_FILLER_EVERY;
use crate::codec::{self, EncodeOptions, FORMAT_TAG};
use crate::json::{pages_from_json, pages_to_json};

pub const USAGE: &str = "\
usage: fumen <command> [options]

commands:
  decode [TEXT|URL]   print the pages of a fumen as JSON (reads stdin without TEXT)
  encode [FILE]       encode a JSON page array (reads stdin without FILE)
  help                show this message

options:
  --pretty            pretty-print decoded JSON
  --filler-every N    insert a '?' after every N encoded symbols (0 disables)
  --wrap              same as --filler-every 47

environment:
  FUMEN_FILLER_EVERY, FUMEN_PRETTY, RUST_LOG
";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliConfig {
    pub filler_every: Option<usize>,
    pub pretty: bool,
}

impl CliConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filler_every = lookup("FUMEN_FILLER_EVERY")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0);

        let pretty = lookup("FUMEN_PRETTY")
            .map(|s| {
                let s = s.trim();
                s == "1" || s.eq_ignore_ascii_case("true")
            })
            .unwrap_or(false);

        Self {
            filler_every,
            pretty,
        }
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::default().with_filler_every(self.filler_every.unwrap_or(0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `None` reads the fumen from stdin
    Decode { input: Option<String> },
    /// `None` reads the JSON from stdin
    Encode { path: Option<String> },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub config: CliConfig,
}

/// Parse arguments (without the program name) on top of `config`
pub fn parse_args(args: &[String], config: CliConfig) -> Result<Invocation> {
    let mut config = config;
    let mut positional: Vec<&str> = Vec::new();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--pretty" => config.pretty = true,
            "--wrap" => config.filler_every = Some(EDITOR_FILLER_EVERY),
            "--filler-every" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --filler-every"))?;
                let n = v
                    .parse::<usize>()
                    .map_err(|_| anyhow!("invalid --filler-every value: {}", v))?;
                config.filler_every = if n == 0 { None } else { Some(n) };
            }
            "-h" | "--help" => positional.insert(0, "help"),
            other if other.starts_with("--") => {
                return Err(anyhow!("unknown option: {}", other));
            }
            other => positional.push(other),
        }
        i += 1;
    }

    let command = match positional.as_slice() {
        [] | ["help", ..] => Command::Help,
        ["decode"] => Command::Decode { input: None },
        ["decode", input] => Command::Decode {
            input: Some(input.to_string()),
        },
        ["encode"] => Command::Encode { path: None },
        ["encode", path] => Command::Encode {
            path: Some(path.to_string()),
        },
        ["decode" | "encode", _, extra, ..] => {
            return Err(anyhow!("unexpected argument: {}", extra));
        }
        [other, ..] => return Err(anyhow!("unknown command: {}", other)),
    };

    Ok(Invocation { command, config })
}

/// Cut a pasted viewer URL down to the fumen it carries
///
/// Text without an embedded tag is returned trimmed and left for the
/// decoder to reject.
pub fn extract_fumen(input: &str) -> &str {
    let input = input.trim();
    match input.find(FORMAT_TAG) {
        Some(start) => {
            let rest = &input[start..];
            // Query strings may carry more parameters after the fumen.
            match rest.find(|c: char| c == '&' || c == '#') {
                Some(end) => &rest[..end],
                None => rest,
            }
        }
        None => input,
    }
}

/// Decode fumen text (or a URL holding one) into page JSON
pub fn run_decode(input: &str, config: &CliConfig) -> Result<String> {
    let text = extract_fumen(input);
    debug!("decoding {} characters", text.len());

    let pages = codec::decode(text).with_context(|| format!("cannot decode {:?}", text))?;
    pages_to_json(&pages, config.pretty).context("cannot serialize pages")
}

/// Encode page JSON into fumen text
pub fn run_encode(json: &str, config: &CliConfig) -> Result<String> {
    let pages = pages_from_json(json).context("invalid page JSON")?;
    debug!("encoding {} pages", pages.len());

    codec::encode_with(&pages, &config.encode_options()).context("cannot encode pages")
}
