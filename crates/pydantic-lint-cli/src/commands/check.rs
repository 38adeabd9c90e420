//! Check command implementation.

use anyhow::{Context, Result};
use pydantic_lint_core::Analyzer;
use pydantic_lint_rules::{all_rules, select_rules};
use pydantic_lint_ts::PythonParser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config_resolver;
use crate::OutputFormat;

/// Arguments of `pydantic-lint check`.
#[derive(Debug)]
pub struct CheckArgs {
    /// File or directory to analyze.
    pub path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Disable `RootModel` recognition.
    pub no_root_model: bool,
}

/// Runs the check command.
///
/// Returns exit code 1 when any violation reaches the configured
/// `fail_on` severity.
pub fn run(args: CheckArgs, explicit_config: Option<&Path>) -> Result<ExitCode> {
    let lookup_dir = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let source = config_resolver::resolve(&lookup_dir, explicit_config);
    let mut config = source.load()?;

    if args.no_root_model {
        config.classifier.include_root_model = false;
    }

    let path = args
        .path
        .unwrap_or_else(|| config.analyzer.root.clone());
    let threshold = config.fail_threshold();

    let rules = match args.rules.as_deref() {
        Some(filter) => {
            let selectors: Vec<&str> = filter
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            select_rules(&selectors)
        }
        None => all_rules(),
    };

    let analyzer = Analyzer::builder()
        .root(path.clone())
        .config(config)
        .parser(PythonParser::new())
        .rules(rules)
        .excludes(args.exclude)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, args.format, analyzer.root())?;

    if result.has_violations_at(threshold) {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
