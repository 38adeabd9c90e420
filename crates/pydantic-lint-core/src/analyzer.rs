//! Core analyzer for orchestrating lint execution.

use crate::ast::SourceParser;
use crate::checker::Checker;
use crate::config::Config;
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::types::{Diagnostic, LintResult, Severity, Suggestion, Violation};
use crate::utils::noqa::NoqaIndex;

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file could not be read, e.g. because it is not UTF-8.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Error parsing a Python source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Error walking the source tree.
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The worker pool could not be created.
    #[error("Failed to create worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// No source parser was supplied to the builder.
    #[error("No source parser configured")]
    MissingParser,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    parser: Option<Box<dyn SourceParser>>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds several boxed rules to the analyzer.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the parser used to turn source files into syntax trees.
    #[must_use]
    pub fn parser(mut self, parser: impl SourceParser + 'static) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include glob pattern.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// Rules disabled in the configuration are dropped here.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was set, a glob pattern is invalid, or
    /// the current directory cannot be determined for a relative root.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let exclude = compile_patterns(
            self.exclude_patterns
                .iter()
                .chain(&config.analyzer.exclude),
        )?;
        let include = compile_patterns(
            self.include_patterns
                .iter()
                .chain(&config.analyzer.include),
        )?;

        let rules: Vec<RuleBox> = self
            .rules
            .into_iter()
            .filter(|rule| {
                let enabled = config.is_rule_enabled(rule.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .collect();

        Ok(Analyzer {
            root,
            rules,
            parser,
            exclude,
            include,
            fail_on_parse_error: self.fail_on_parse_error || config.analyzer.fail_on_parse_error,
            config,
        })
    }
}

fn compile_patterns<'a>(
    patterns: impl Iterator<Item = &'a String>,
) -> Result<Vec<glob::Pattern>, AnalyzerError> {
    patterns
        .map(|p| glob::Pattern::new(p).map_err(AnalyzerError::from))
        .collect()
}

type FileOutcome = Result<Vec<Violation>, AnalyzerError>;

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    parser: Box<dyn SourceParser>,
    exclude: Vec<glob::Pattern>,
    include: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered (enabled) rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files under the root and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, or if a file cannot be read
    /// or parsed while `fail_on_parse_error` is set. Otherwise such files are
    /// logged and skipped.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let outcomes = self.check_files(&files)?;

        let mut result = LintResult::new();
        for outcome in outcomes {
            match outcome {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(e @ (AnalyzerError::Parse { .. } | AnalyzerError::Read { .. })) => {
                    warn!("Skipping file: {}", e);
                    if self.fail_on_parse_error {
                        return Err(e);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Checks one in-memory source unit as if it lived at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if the source is not valid Python.
    pub fn analyze_source(
        &self,
        path: &Path,
        source: &str,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        let module = self
            .parser
            .parse(source)
            .map_err(|e| AnalyzerError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let ctx = FileContext::new(path, source, &self.root);
        let noqa = NoqaIndex::from_comments(&module.comments);
        let diagnostics = Checker::new(&self.rules, self.config.classifier).check_module(&module);

        let violations = diagnostics
            .iter()
            .filter(|d| {
                let suppressed = noqa.is_suppressed(d.line, d.code);
                if suppressed {
                    debug!(
                        "Suppressed {} at {}:{}",
                        d.code,
                        ctx.relative_path.display(),
                        d.line
                    );
                }
                !suppressed
            })
            .map(|d| self.to_violation(d, &ctx))
            .collect();

        Ok(violations)
    }

    fn check_files(&self, files: &[PathBuf]) -> Result<Vec<FileOutcome>, AnalyzerError> {
        let run = || -> Vec<FileOutcome> {
            files
                .par_iter()
                .map(|path| self.analyze_file(path))
                .collect()
        };

        match self.config.analyzer.parallelism {
            Some(threads) => {
                debug!("Using {} worker threads", threads);
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                Ok(pool.install(run))
            }
            None => Ok(run()),
        }
    }

    fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.analyze_source(path, &content)
    }

    fn to_violation(&self, diagnostic: &Diagnostic, ctx: &FileContext<'_>) -> Violation {
        let rule = self.rules.iter().find(|r| r.code() == diagnostic.code);
        let severity = self
            .config
            .rule_severity(diagnostic.rule)
            .or_else(|| rule.map(|r| r.default_severity()))
            .unwrap_or(Severity::Error);

        let (offset, length) = ctx.span_for(diagnostic.line, diagnostic.column);
        let mut violation =
            Violation::from_diagnostic(diagnostic, ctx.relative_path.clone(), severity);
        violation.location = violation.location.with_span(offset, length);

        match rule.and_then(|r| r.fix_hint()) {
            Some(hint) => violation.with_suggestion(Suggestion::new(hint)),
            None => violation,
        }
    }

    /// Discovers all Python source files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let respect = self.config.analyzer.respect_gitignore;
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .ignore(respect)
            .git_ignore(respect)
            .git_exclude(respect)
            .git_global(respect)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("py") {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded, matching patterns against both
    /// the path relative to the root and the full path.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let matches =
            |p: &glob::Pattern| p.matches_path(relative) || p.matches_path(path);

        if self.exclude.iter().any(matches) {
            return true;
        }
        !self.include.is_empty() && !self.include.iter().any(matches)
    }
}
