//! Doctor command - validate configuration and show status

use anyhow::Result;
use news_classifier_domain::taxonomy::{CATEGORIES, TYPES};
use news_classifier_domain::{TAXONOMY_VERSION, taxonomy_fingerprint};
use serde::Serialize;
use std::path::PathBuf;

use super::classify::build_classifier;
use crate::args::DoctorArgs;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    llm: CheckResult,
    taxonomy: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        llm: CheckResult::error("Not checked"),
        taxonomy: check_taxonomy(),
        overall: "error".to_string(),
    };

    // Check config
    match AppConfig::load(config_path.as_deref()) {
        Ok(config) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            report.llm = check_llm(&config);
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {:#}", e));
        }
    }

    // Determine overall status
    let checks = [&report.config, &report.llm, &report.taxonomy];

    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    // Output report
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

fn check_llm(config: &AppConfig) -> CheckResult {
    let provider = &config.llm.provider;
    let model = &config.llm.model;

    let classifier = match build_classifier(config) {
        Ok(c) => c,
        Err(e) => return CheckResult::error(format!("{:#}", e)),
    };

    if provider == "stub" {
        return CheckResult::ok(format!("Provider: stub (offline), Model: {}", model));
    }

    // Report credential presence without revealing the value
    let api_key_env = &config.llm.gemini.api_key_env;
    let details = serde_json::json!({
        "provider": provider,
        "model": model,
        "base_url": config.llm.gemini.base_url,
        "timeout_secs": config.llm.timeout_secs,
    });

    if classifier.is_available() {
        CheckResult::ok(format!(
            "Provider: {}, Model: {}, API key: {} (set)",
            provider, model, api_key_env
        ))
        .with_details(details)
    } else {
        CheckResult::warn(format!(
            "Provider: {}, Model: {}, API key: {} (not set, classifier disabled)",
            provider, model, api_key_env
        ))
        .with_details(details)
    }
}

fn check_taxonomy() -> CheckResult {
    CheckResult::ok(format!(
        "Taxonomy v{}: {} categories, {} types",
        TAXONOMY_VERSION,
        CATEGORIES.len(),
        TYPES.len()
    ))
    .with_details(serde_json::json!({
        "version": TAXONOMY_VERSION,
        "fingerprint": taxonomy_fingerprint(),
        "categories": CATEGORIES.iter().map(|d| d.label).collect::<Vec<_>>(),
        "types": TYPES.iter().map(|d| d.label).collect::<Vec<_>>(),
    }))
}

fn print_report(report: &DoctorReport) {
    println!("news-classifier doctor");
    println!("======================");
    println!();

    print_check("Config", &report.config);
    print_check("LLM", &report.llm);
    print_check("Taxonomy", &report.taxonomy);

    println!();
    println!("Overall: {}", report.overall.to_uppercase());
}

fn print_check(name: &str, check: &CheckResult) {
    let icon = match check.status.as_str() {
        "ok" => "✓",
        "warn" => "!",
        _ => "✗",
    };
    println!("[{}] {}: {}", icon, name, check.message);
}
