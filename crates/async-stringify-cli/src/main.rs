use std::path::PathBuf;

use anyhow::{Context, Result};
use async_stringify::{Options, Space, Value};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "async-stringify",
    about = "Re-encode JSON through an asynchronous replacer",
    version
)]
struct Args {
    /// Indent with N spaces (capped at 10)
    #[arg(long, value_name = "N", conflicts_with = "indent_str")]
    indent: Option<usize>,

    /// Indent with this string (first 10 characters)
    #[arg(long, value_name = "S")]
    indent_str: Option<String>,

    /// Drop members with this key (repeatable)
    #[arg(long, value_name = "KEY")]
    omit: Vec<String>,

    /// Replace members with this key by "[redacted]" (repeatable)
    #[arg(long, value_name = "KEY")]
    redact: Vec<String>,

    /// Treat string members with this key as paths and inline the JSON file
    /// they point to (repeatable)
    #[arg(long, value_name = "KEY")]
    include: Vec<String>,

    /// Maximum nesting depth
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

struct Rules {
    omit: Vec<String>,
    redact: Vec<String>,
    include: Vec<String>,
}

impl Rules {
    async fn apply(&self, key: String, value: Value) -> Result<Value> {
        if self.omit.contains(&key) {
            debug!(key = %key, "omitting member");
            return Ok(Value::Undefined);
        }
        if self.redact.contains(&key) {
            debug!(key = %key, "redacting member");
            return Ok(Value::from("[redacted]"));
        }
        if self.include.contains(&key) {
            if let Value::String(path) = &value {
                info!(key = %key, path = %path, "inlining file");
                let text = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("reading {path} for key {key:?}"))?;
                let json: serde_json::Value = serde_json::from_str(&text)
                    .with_context(|| format!("parsing {path} as JSON"))?;
                return Ok(Value::from(json));
            }
        }
        Ok(value)
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut buf = String::new();
    match &args.input {
        Some(path) => {
            buf = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
        }
        None => {
            tokio::io::stdin().read_to_string(&mut buf).await?;
        }
    }
    let input: serde_json::Value = serde_json::from_str(&buf).context("input is not JSON")?;

    let space = match (args.indent, args.indent_str) {
        (Some(n), _) => Some(Space::Count(n)),
        (None, Some(s)) => Some(Space::Indent(s)),
        (None, None) => None,
    };
    let options = Options {
        space,
        max_depth: args.max_depth,
    };
    let rules = Rules {
        omit: args.omit,
        redact: args.redact,
        include: args.include,
    };

    let rules = &rules;
    let transform =
        move |_: Value, key: String, value: Value| async move { rules.apply(key, value).await };
    let out = async_stringify::stringify_with(Value::from(input), &transform, &options).await?;
    if let Some(text) = out {
        println!("{}", text);
    }

    Ok(())
}
