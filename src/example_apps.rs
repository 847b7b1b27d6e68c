use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, error::ErrorKind};

use crate::config::{InsightConfig, KSelection};
use crate::data::SourceId;
use crate::errors::InsightError;
use crate::insights::InsightReport;
use crate::pipeline::InsightEngine;
use crate::source::RawTable;

#[derive(Debug, Parser)]
#[command(
    name = "insight_demo",
    disable_help_subcommand = true,
    about = "Mine trend tables for association rules and content clusters",
    long_about = "Normalize music, video, search-trend, and social-topic tables, mine association rules between trending terms, and cluster content by popularity and inferred genre.",
    after_help = "Tables default to a built-in snapshot. RUST_LOG=debug shows per-level mining counts."
)]
/// CLI for `insight_demo`.
///
/// Common usage:
/// - Built-in snapshot with defaults: no arguments
/// - Own tables: `--tables snapshot.json` (a JSON array of `{source, rows}`)
/// - Partial config over defaults: `--config insights.json`
/// - Force a cluster count: `--k 2`
struct InsightDemoCli {
    #[arg(long, value_name = "PATH", help = "JSON file with an array of source tables")]
    tables: Option<PathBuf>,
    #[arg(long, value_name = "PATH", help = "JSON configuration applied over defaults")]
    config: Option<PathBuf>,
    #[arg(
        long,
        value_parser = parse_positive_usize,
        help = "Fixed cluster count (default: chosen by silhouette)"
    )]
    k: Option<usize>,
    #[arg(
        long = "group-size",
        value_parser = parse_positive_usize,
        help = "Terms per basket window"
    )]
    group_size: Option<usize>,
    #[arg(long = "min-support", help = "Minimum itemset support in (0, 1]")]
    min_support: Option<f64>,
    #[arg(
        long = "source",
        value_name = "SOURCE",
        value_parser = parse_source,
        help = "Restrict to a source, repeat as needed"
    )]
    sources: Vec<SourceId>,
    #[arg(long, help = "Case-insensitive keyword required in item text")]
    keyword: Option<String>,
    #[arg(long, help = "Inferred category required on clustered items")]
    category: Option<String>,
    #[arg(
        long = "add-keyword",
        value_name = "SOURCE=KEYWORD",
        value_parser = parse_keyword_arg,
        help = "Extra genre keyword for a source, repeat as needed"
    )]
    extra_keywords: Vec<(SourceId, String)>,
    #[arg(long, help = "Print the report as JSON")]
    json: bool,
}

/// Run the insight demo over `--tables` or, when absent, `default_tables()`.
pub fn run_insight_demo<Tables, I>(args_iter: I, default_tables: Tables) -> Result<(), Box<dyn Error>>
where
    Tables: FnOnce() -> Vec<RawTable>,
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) = parse_cli::<InsightDemoCli, _>(
        std::iter::once("insight_demo".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let tables = match &cli.tables {
        Some(path) => load_tables(path)?,
        None => default_tables(),
    };
    let config = demo_config(&cli)?;
    let engine = InsightEngine::new(config)?;
    let report = engine.run(&tables);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Read a JSON array of source tables.
pub fn load_tables(path: impl AsRef<Path>) -> Result<Vec<RawTable>, InsightError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn demo_config(cli: &InsightDemoCli) -> Result<InsightConfig, InsightError> {
    let mut config = match &cli.config {
        Some(path) => InsightConfig::from_json_file(path)?,
        None => InsightConfig::default(),
    };
    if let Some(k) = cli.k {
        config.clustering.k = KSelection::Fixed(k);
    }
    if let Some(group_size) = cli.group_size {
        config.baskets.group_size = group_size;
    }
    if let Some(min_support) = cli.min_support {
        config.mining.min_support = min_support;
    }
    if !cli.sources.is_empty() {
        config.filter.sources = Some(cli.sources.clone());
    }
    if cli.keyword.is_some() {
        config.filter.keyword = cli.keyword.clone();
    }
    if cli.category.is_some() {
        config.filter.category = cli.category.clone();
    }
    for (source, keyword) in &cli.extra_keywords {
        config.vocabulary = config.vocabulary.with_keywords(*source, [keyword.as_str()]);
    }
    config.validate()?;
    Ok(config)
}

fn print_report(report: &InsightReport) {
    for line in report.summary_lines() {
        println!("{line}");
    }
    if let Some(mix) = &report.record_mix {
        let parts: Vec<String> = mix
            .per_source
            .iter()
            .map(|entry| format!("{}={} ({:.0}%)", entry.source, entry.count, entry.share * 100.0))
            .collect();
        println!("records: {} [{}]", mix.total, parts.join(", "));
    }
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("Could not parse '{}' as a positive integer", raw))?;
    if parsed == 0 {
        return Err("value must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_source(raw: &str) -> Result<SourceId, String> {
    raw.parse::<SourceId>()
}

fn parse_keyword_arg(raw: &str) -> Result<(SourceId, String), String> {
    let Some((source, keyword)) = raw.split_once('=') else {
        return Err(format!("expected SOURCE=KEYWORD, got '{raw}'"));
    };
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(format!("keyword for '{}' is empty", source.trim()));
    }
    Ok((source.parse::<SourceId>()?, keyword.to_string()))
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
