//! Classify command - one-shot article classification

use anyhow::{Context, Result, bail};
use news_classifier_adapters::llm::{GeminiClient, StubGenerationClient};
use news_classifier_domain::usecases::ArticleClassifier;
use news_classifier_domain::{Classification, GenerationClient};
use secrecy::SecretString;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use crate::args::ClassifyArgs;
use crate::config::AppConfig;

pub(crate) type DynClassifier = ArticleClassifier<Box<dyn GenerationClient>>;

pub async fn execute(args: ClassifyArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let content = get_content(&args)?;

    tracing::info!(
        title = %args.title,
        content_length = content.chars().count(),
        "Classifying article"
    );

    let classifier = build_classifier(&config)?;
    let classification = match classifier.classify(&args.title, &content).await {
        Some(c) => Some(c),
        None if args.fallback => Some(Classification::fallback()),
        None => None,
    };

    // Output results
    if args.json {
        let json = serde_json::to_string_pretty(&classification)
            .context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        match classification {
            Some(c) => {
                println!("Classification Results");
                println!("======================");
                println!();
                println!("Category: {}", describe(c.category_label(), c.category().map(|v| v.key())));
                println!("Type:     {}", describe(c.kind_label(), c.article_type().map(|v| v.key())));
            }
            None => println!("No classification available."),
        }
    }

    Ok(())
}

fn describe(label: Option<&str>, key: Option<&str>) -> String {
    match (label, key) {
        (Some(label), Some(key)) => format!("{} ({})", label, key),
        (Some(label), None) => format!("{} (not in taxonomy)", label),
        (None, _) => "(missing)".to_string(),
    }
}

/// Build the classifier for the configured provider
///
/// A missing credential yields a disabled classifier instead of an error.
pub(crate) fn build_classifier(config: &AppConfig) -> Result<DynClassifier> {
    let model = config.llm.model.clone();

    match config.llm.provider.as_str() {
        "gemini" => {
            let env_var = &config.llm.gemini.api_key_env;
            let Some(api_key) = load_api_key(env_var) else {
                return Ok(ArticleClassifier::unavailable(format!(
                    "{} not found in environment",
                    env_var
                )));
            };

            match GeminiClient::with_base_url(
                api_key,
                config.llm.gemini.base_url.clone(),
                Duration::from_secs(config.llm.timeout_secs),
            ) {
                Ok(client) => {
                    let client: Box<dyn GenerationClient> = Box::new(client);
                    Ok(ArticleClassifier::ready(client, model))
                }
                Err(e) => Ok(ArticleClassifier::unavailable(e.to_string())),
            }
        }
        "stub" => {
            let client: Box<dyn GenerationClient> = Box::new(StubGenerationClient::with_text(
                config.llm.stub.response.clone(),
            ));
            Ok(ArticleClassifier::ready(client, model))
        }
        other => bail!("Unknown LLM provider: {}", other),
    }
}

/// Read the credential once; absent or blank means none
pub(crate) fn load_api_key(env_var: &str) -> Option<SecretString> {
    if env_var.trim().is_empty() {
        return None;
    }

    match std::env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => Some(SecretString::new(key.into())),
        _ => None,
    }
}

fn get_content(args: &ClassifyArgs) -> Result<String> {
    if let Some(ref content) = args.content {
        return Ok(content.clone());
    }

    match args.file {
        Some(ref path) if path.as_os_str() == "-" => read_stdin(),
        Some(ref path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => Ok(String::new()),
    }
}

pub(crate) fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read from stdin")?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_classifier_without_key_is_disabled() {
        let mut config = AppConfig::default();
        config.llm.gemini.api_key_env = "NEWS_CLASSIFIER_UNIT_TEST_UNSET_KEY".to_string();

        let classifier = build_classifier(&config).unwrap();
        assert!(!classifier.is_available());
    }

    #[test]
    fn test_build_classifier_rejects_unknown_provider() {
        let mut config = AppConfig::default();
        config.llm.provider = "openai".to_string();

        assert!(build_classifier(&config).is_err());
    }

    #[tokio::test]
    async fn test_stub_provider_classifies() {
        let mut config = AppConfig::default();
        config.llm.provider = "stub".to_string();
        config.llm.stub.response = r#"{"category":"체육","type":"사회"}"#.to_string();

        let classifier = build_classifier(&config).unwrap();
        assert_eq!(classifier.model(), Some("gemini-2.0-flash"));

        let result = classifier.classify("Stadium accident", "...").await;
        assert_eq!(result, Some(Classification::new("체육", "사회")));
    }

    #[test]
    fn test_blank_env_var_name_has_no_key() {
        assert!(load_api_key("  ").is_none());
    }
}
