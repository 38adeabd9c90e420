//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/pydantic-lint.toml` or `.pydantic-lint.toml`
//! 3. `$PYDANTIC_LINT_CONFIG_DIR/config.toml`, else `~/.pydantic-lint/config.toml`
//! 4. No config found → defaults

use anyhow::{Context, Result};
use pydantic_lint_core::Config;
use std::path::{Path, PathBuf};

/// Environment variable overriding the global config directory.
pub const CONFIG_DIR_ENV: &str = "PYDANTIC_LINT_CONFIG_DIR";

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["pydantic-lint.toml", ".pydantic-lint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Config::default());
        };

        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Resolves the configuration file for `project_dir`.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir())
}

/// Resolution with the global directory passed in, so tests need not touch
/// the environment.
fn resolve_in(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    // A single file is checked with the config of its directory.
    let project_dir = if project_dir.is_file() {
        project_dir.parent().unwrap_or(project_dir)
    } else {
        project_dir
    };

    if let Some(candidate) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |candidate| {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        })
}

/// Returns the global config directory path.
///
/// Resolution: `$PYDANTIC_LINT_CONFIG_DIR` > `~/.pydantic-lint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".pydantic-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &str) {
        fs::write(path, content).unwrap();
    }

    #[test]
    fn explicit_wins_without_existence_check() {
        let project = TempDir::new().unwrap();
        touch(&project.path().join("pydantic-lint.toml"), "");

        let result = resolve_in(project.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn project_names_in_priority_order() {
        let project = TempDir::new().unwrap();
        touch(&project.path().join(".pydantic-lint.toml"), "");
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(project.path().join(".pydantic-lint.toml"))
        );

        touch(&project.path().join("pydantic-lint.toml"), "");
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(project.path().join("pydantic-lint.toml"))
        );
    }

    #[test]
    fn single_file_uses_its_directory() {
        let project = TempDir::new().unwrap();
        let file = project.path().join("models.py");
        touch(&file, "");
        touch(&project.path().join("pydantic-lint.toml"), "");

        assert_eq!(
            resolve_in(&file, None, None),
            ConfigSource::Project(project.path().join("pydantic-lint.toml"))
        );
    }

    #[test]
    fn global_is_a_fallback_only() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let global_dir = Some(global.path().to_path_buf());

        assert_eq!(
            resolve_in(project.path(), None, global_dir.clone()),
            ConfigSource::Default
        );

        touch(&global.path().join("config.toml"), "");
        assert_eq!(
            resolve_in(project.path(), None, global_dir.clone()),
            ConfigSource::Global(global.path().join("config.toml"))
        );

        touch(&project.path().join("pydantic-lint.toml"), "");
        assert!(matches!(
            resolve_in(project.path(), None, global_dir),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn load_reads_classifier_section() {
        let project = TempDir::new().unwrap();
        let path = project.path().join("pydantic-lint.toml");
        touch(&path, "[classifier]\ninclude_root_model = false\n");

        let config = ConfigSource::Project(path).load().unwrap();
        assert!(!config.classifier.include_root_model);
    }

    #[test]
    fn load_default_and_missing_explicit() {
        assert!(ConfigSource::Default.load().is_ok());
        assert!(ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
            .load()
            .is_err());
    }
}
