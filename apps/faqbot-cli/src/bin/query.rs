use std::env;
use std::path::{Path, PathBuf};

use faqbot_core::catalog::{catalog_from_settings, load_catalog};
use faqbot_core::config::Config;
use faqbot_matcher::{Matcher, MatcherConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "faqbot=warn";

/// Positional arguments are the question then an optional catalog file; flags may appear anywhere.
struct Args {
    question: String,
    catalog: Option<String>,
    explain: bool,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut positional = args.iter().skip(1).filter(|a| !a.starts_with("--"));
    let question = positional.next()?.clone();
    let catalog = positional.next().cloned();
    let explain = args.iter().skip(1).any(|a| a == "--explain");
    Some(Args { question, catalog, explain })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(Args { question, catalog: catalog_arg, explain }) = parse_args(&args) else {
        eprintln!("Usage: {} <question> [catalog-file] [--explain]", args[0]);
        eprintln!("Example: {} \"what's your return policy\"", args[0]);
        std::process::exit(1);
    };

    let config = Config::load()?;
    let settings = config.settings()?;
    let catalog = match catalog_arg {
        Some(path) => load_catalog(&PathBuf::from(path))?,
        None => catalog_from_settings(&settings.catalog, Path::new("."))?,
    };
    let matcher = Matcher::build_with(catalog, MatcherConfig::from(&settings.matcher))?;

    let result = matcher.query(&question);
    println!("{}", serde_json::to_string_pretty(&result)?);
    if explain {
        eprintln!("\nTop candidates:");
        for (i, score) in matcher.ranked(&question, 5) {
            if let Some(entry) = matcher.catalog().get(i) {
                eprintln!("  {:.4}  #{:<3} {}", score, i + 1, entry.question);
            }
        }
    }
    Ok(())
}
