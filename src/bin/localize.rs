//! Localize binary - localizes a JSON record file and prints the result
//!
//! Usage:
//!   cargo run --bin localize -- record.json
//!   cargo run --bin localize -- record.json --accept-language "en-GB, en;q=0.8"
//!   cargo run --bin localize -- record.json --required Name,Description --optional Area
//!
//! Whole-record mode unless `--required` or `--optional` is given, in which
//! case the per-field result is printed instead.

use anyhow::{bail, Context, Result};
use i18n_transform::i18n::{
    parse_accept_language, transform_by_field, try_transform, FieldSpec, Record,
};
use serde_json::Value;
use tracing::info;

/// Parsed command-line arguments
struct Args {
    record_path: String,
    accept_language: Option<String>,
    fields: Option<FieldSpec>,
}

impl Args {
    fn parse(args: &[String]) -> Result<Self> {
        let mut record_path = None;
        let mut accept_language = None;
        let mut fields: Option<FieldSpec> = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--accept-language" | "-l" => {
                    let value = iter.next().context("--accept-language needs a value")?;
                    accept_language = Some(value.clone());
                }
                "--required" => {
                    let value = iter.next().context("--required needs a value")?;
                    fields = Some(fields.unwrap_or_default().required(split_list(value)));
                }
                "--optional" => {
                    let value = iter.next().context("--optional needs a value")?;
                    fields = Some(fields.unwrap_or_default().optional(split_list(value)));
                }
                flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
                path if record_path.is_none() => record_path = Some(path.to_string()),
                extra => bail!("Unexpected argument: {}", extra),
            }
        }

        Ok(Self {
            record_path: record_path.context(
                "Usage: localize <record.json> [--accept-language <header>] [--required a,b] [--optional c,d]",
            )?,
            accept_language,
            fields,
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("i18n_transform=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = Args::parse(&args)?;

    let content = std::fs::read_to_string(&args.record_path)
        .with_context(|| format!("Failed to read {}", args.record_path))?;
    let record: Record = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON object", args.record_path))?;

    let preferences = args
        .accept_language
        .as_deref()
        .map(parse_accept_language)
        .unwrap_or_default();
    info!("Localizing {} with {} preference(s)", args.record_path, preferences.len());

    let output = match &args.fields {
        Some(fields) => serde_json::to_value(transform_by_field(&record, &preferences, fields)?)?,
        None => Value::Object(try_transform(record, &preferences)?),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
