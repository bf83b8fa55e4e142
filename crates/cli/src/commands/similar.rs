//! Similar command - duplicate check against recent history

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::classify::{build_classifier, read_stdin};
use crate::args::SimilarArgs;
use crate::config::AppConfig;

pub async fn execute(args: SimilarArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let history = load_history(&args)?;

    tracing::info!(
        title = %args.title,
        history_count = history.len(),
        "Checking for duplicates"
    );

    let classifier = build_classifier(&config)?;
    let verdict = classifier.check_similarity(&args.title, &history).await;

    if args.json {
        let json =
            serde_json::to_string_pretty(&verdict).context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        match verdict.matched_title {
            Some(ref matched) => println!("Duplicate of: {}", matched),
            None => println!("New article."),
        }
    }

    Ok(())
}

fn load_history(args: &SimilarArgs) -> Result<Vec<String>> {
    let Some(ref path) = args.history_file else {
        return Ok(args.history.clone());
    };

    let text = if path.as_os_str() == "-" {
        read_stdin()?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read history file: {}", path.display()))?
    };

    Ok(parse_history(&text))
}

/// One entry per non-blank line, in file order
fn parse_history(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
