//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Name of the file written by `pydantic-lint init`.
const CONFIG_FILE: &str = "pydantic-lint.toml";

const DEFAULT_CONFIG: &str = r#"# pydantic-lint configuration

# Lowest severity that makes `check` exit with status 1
fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/.venv/**",
    "**/venv/**",
    "**/__pycache__/**",
]

# Only analyze files matching these patterns (default: every *.py file)
# include = ["src/**"]

# Respect .gitignore files
respect_gitignore = true

# Worker threads for file analysis (default: one per core)
# parallelism = 4

# Abort on the first file that fails to parse
fail_on_parse_error = false

[classifier]
# Treat `RootModel` subclasses as models
include_root_model = true

# Rule configurations
# Each rule can be disabled or have its severity overridden

# [rules.non-annotated-attribute]
# enabled = false

# [rules.name-shadows-annotation]
# severity = "warning"
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    let path = write_config(Path::new("."), force)?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: pydantic-lint check");

    Ok(())
}

/// Writes the default configuration into `dir`, returning its path.
fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pydantic_lint_core::{Config, Severity};
    use tempfile::TempDir;

    #[test]
    fn template_parses_as_config() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.fail_threshold(), Severity::Error);
        assert!(config.classifier.include_root_model);
        assert_eq!(config.analyzer.exclude.len(), 3);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "# mine\n").unwrap();

        assert!(write_config(dir.path(), false).is_err());
        let kept = std::fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(kept, "# mine\n");

        let path = write_config(dir.path(), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), DEFAULT_CONFIG);
    }
}
