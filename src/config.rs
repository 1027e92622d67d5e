//! `lint-score.toml` loading. Every field has a default, so the file is optional.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration loaded from lint-score.toml.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ScoreConfig {
    pub linter: LinterConfig,
    pub gate: GateConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinterConfig {
    /// Shell command whose stdout is the lint report.
    pub command: String,
    pub working_dir: PathBuf,
    /// Exit codes that mean the lint run itself failed.
    pub fatal_exit_codes: Vec<i32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct GateConfig {
    pub min_score: Option<f64>,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            command: "pylint --exit-zero .".to_string(),
            working_dir: PathBuf::from("."),
            // pylint: usage error
            fatal_exit_codes: vec![32],
        }
    }
}

/// Errors from loading the config file.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Load config from `path`. A missing file yields the defaults; a file that
/// exists but cannot be read or parsed is an error.
pub fn load_config(path: &Path) -> Result<ScoreConfig, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ScoreConfig::default());
        }
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("lint-score.toml")).unwrap();
        assert_eq!(cfg.linter.command, "pylint --exit-zero .");
        assert_eq!(cfg.linter.working_dir, PathBuf::from("."));
        assert_eq!(cfg.linter.fatal_exit_codes, vec![32]);
        assert!(cfg.gate.min_score.is_none());
    }

    #[test]
    fn test_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lint-score.toml");
        std::fs::write(
            &path,
            r#"
[linter]
command = "pylint --rcfile=.pylintrc pkg"
working_dir = "python"
fatal_exit_codes = [1, 32]

[gate]
min_score = 9.5
"#,
        )
        .unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.linter.command, "pylint --rcfile=.pylintrc pkg");
        assert_eq!(cfg.linter.working_dir, PathBuf::from("python"));
        assert_eq!(cfg.linter.fatal_exit_codes, vec![1, 32]);
        assert_eq!(cfg.gate.min_score, Some(9.5));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lint-score.toml");
        std::fs::write(&path, "[gate]\nmin_score = 8.0\n").unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.linter.command, "pylint --exit-zero .");
        assert_eq!(cfg.gate.min_score, Some(8.0));
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lint-score.toml");
        std::fs::write(&path, "[linter\ncommand = ").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn test_wrong_type_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lint-score.toml");
        std::fs::write(&path, "[gate]\nmin_score = \"high\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}
