//! `rokmail` – decode binary mail payloads to JSON.
//!
//! ```text
//! rokmail [--pretty] [--summary] [--max-depth N] [--strict-utf8] [-v...] <FILE>...
//! ```
//!
//! Each file is decoded independently. The exit status is non-zero if any
//! file could not be read or decoded.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rokmail::{DecoderOptions, Mail, Utf8Mode};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rokmail", version, about = "Decode binary mail payloads to JSON")]
struct Cli {
    /// Files to decode.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Print one summary line per file instead of the decoded sections.
    #[arg(long, conflicts_with = "pretty")]
    summary: bool,

    /// Maximum nesting depth of objects.
    #[arg(long, env = "ROKMAIL_MAX_DEPTH", default_value_t = DecoderOptions::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Fail on invalid UTF-8 instead of replacing it.
    #[arg(long, env = "ROKMAIL_STRICT_UTF8")]
    strict_utf8: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn decoder_options(&self) -> DecoderOptions {
        DecoderOptions {
            max_depth: self.max_depth,
            utf8: if self.strict_utf8 {
                Utf8Mode::Strict
            } else {
                Utf8Mode::Lossy
            },
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("rokmail=debug"),
        _ => EnvFilter::new("rokmail=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn decode_file(path: &Path, options: DecoderOptions) -> Result<Mail> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read payload");
    rokmail::decode_with_options(&bytes, options)
        .with_context(|| format!("failed to decode {}", path.display()))
}

fn render_json(mail: &Mail, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(mail)?
    } else {
        serde_json::to_string(mail)?
    };
    Ok(json)
}

fn render_summary(path: &Path, mail: &Mail) -> String {
    let time = mail.time().map(|t| t.to_string());
    format!(
        "{}\tsections={}\ttype={}\ttime={}\tid={}",
        path.display(),
        mail.len(),
        mail.mail_type().unwrap_or("-"),
        time.as_deref().unwrap_or("-"),
        mail.id().as_deref().unwrap_or("-"),
    )
}

fn run(cli: &Cli, out: &mut impl Write) -> bool {
    let options = cli.decoder_options();
    let mut ok = true;
    for path in &cli.files {
        let line = decode_file(path, options).and_then(|mail| {
            if cli.summary {
                Ok(render_summary(path, &mail))
            } else {
                render_json(&mail, cli.pretty)
            }
        });
        match line {
            Ok(line) => {
                if let Err(err) = writeln!(out, "{line}") {
                    error!("failed to write output: {err}");
                    return false;
                }
            }
            Err(err) => {
                eprintln!("error: {err:#}");
                ok = false;
            }
        }
    }
    ok
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    if run(&cli, &mut stdout.lock()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
