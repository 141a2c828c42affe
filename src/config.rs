//! Configuration from environment variables.
//!
//! | Variable            | Default          |
//! |---------------------|------------------|
//! | `QA_DATA_FILE`      | `./qa_data.json` |
//! | `QA_MATCH_POLICY`   | `basic`          |
//! | `QA_THRESHOLD`      | `0.3`            |
//! | `QA_PRUNING`        | `true`           |
//! | `QA_STOPWORDS_FILE` | unset            |
//! | `QA_HTTP_ADDR`      | unset (stdio)    |
//! | `QA_LOG_LEVEL`      | `info`           |

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{QaError, QaResult};
use crate::search::{MatchConfig, MatchPolicy, Tokenizer};

pub const DEFAULT_DATA_FILE: &str = "qa_data.json";
pub const DEFAULT_THRESHOLD: f64 = 0.3;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the JSON data document
    pub data_file: PathBuf,
    pub policy: MatchPolicy,
    /// Threshold used when a query does not supply one
    pub threshold: f64,
    pub pruning: bool,
    /// Stop words added to the built-in list
    pub extra_stop_words: Vec<String>,
    /// Serve the REST API on this address instead of the stdio tool server
    pub http_addr: Option<String>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            data_file: current_dir.join(DEFAULT_DATA_FILE),
            policy: MatchPolicy::default(),
            threshold: DEFAULT_THRESHOLD,
            pruning: true,
            extra_stop_words: Vec::new(),
            http_addr: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Read settings from the process environment
    pub fn from_env() -> QaResult<Self> {
        let vars: HashMap<String, String> = env::vars().collect();
        let current_dir = env::current_dir()?;
        Self::from_vars(&vars, &current_dir)
    }

    /// Resolve settings from an explicit variable map; relative paths are
    /// taken against `base_dir`.
    pub fn from_vars(vars: &HashMap<String, String>, base_dir: &Path) -> QaResult<Self> {
        let get = |key: &str| lookup(vars, key);

        let data_file = match get("QA_DATA_FILE") {
            Some(path) => resolve_path(path, base_dir),
            None => base_dir.join(DEFAULT_DATA_FILE),
        };

        let policy = match get("QA_MATCH_POLICY") {
            Some(value) => value.parse()?,
            None => MatchPolicy::default(),
        };

        let threshold = match get("QA_THRESHOLD") {
            Some(value) => parse_threshold(value)?,
            None => DEFAULT_THRESHOLD,
        };

        let pruning = match get("QA_PRUNING") {
            Some(value) => parse_bool("QA_PRUNING", value)?,
            None => true,
        };

        let extra_stop_words = match get("QA_STOPWORDS_FILE") {
            Some(path) => load_stop_words(&resolve_path(path, base_dir))?,
            None => Vec::new(),
        };

        Ok(Self {
            data_file,
            policy,
            threshold,
            pruning,
            extra_stop_words,
            http_addr: get("QA_HTTP_ADDR").map(str::to_string),
            log_level: get("QA_LOG_LEVEL")
                .unwrap_or(DEFAULT_LOG_LEVEL)
                .to_string(),
        })
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            policy: self.policy,
            pruning: self.pruning,
        }
    }

    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::with_extra_stop_words(&self.extra_stop_words)
    }
}

/// Non-blank value of `key`
fn lookup<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn resolve_path(path: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Thresholds are similarity scores, so they live in [0, 1]
pub fn parse_threshold(value: &str) -> QaResult<f64> {
    let threshold: f64 = value
        .trim()
        .parse()
        .map_err(|_| QaError::Config(format!("threshold '{}' is not a number", value)))?;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(QaError::Config(format!(
            "threshold {} must be between 0 and 1",
            threshold
        )));
    }
    Ok(threshold)
}

fn parse_bool(key: &str, value: &str) -> QaResult<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(QaError::Config(format!("{} must be a boolean, got '{}'", key, value))),
    }
}

/// One stop word per line; blank lines and `#` comments are ignored
fn load_stop_words(path: &Path) -> QaResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        QaError::Config(format!("cannot read stop words from {}: {}", path.display(), e))
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let base = Path::new("/srv/qa");
        let config = Config::from_vars(&HashMap::new(), base).unwrap();
        assert_eq!(config.data_file, base.join("qa_data.json"));
        assert_eq!(config.policy, MatchPolicy::Basic);
        assert_eq!(config.threshold, 0.3);
        assert!(config.pruning);
        assert!(config.http_addr.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let base = Path::new("/srv/qa");
        let config = Config::from_vars(
            &vars(&[
                ("QA_DATA_FILE", "data/faq.json"),
                ("QA_MATCH_POLICY", "advanced"),
                ("QA_THRESHOLD", "0.45"),
                ("QA_PRUNING", "off"),
                ("QA_HTTP_ADDR", "127.0.0.1:8080"),
            ]),
            base,
        )
        .unwrap();
        assert_eq!(config.data_file, base.join("data/faq.json"));
        assert_eq!(config.policy, MatchPolicy::Advanced);
        assert_eq!(config.threshold, 0.45);
        assert!(!config.pruning);
        assert_eq!(config.http_addr.as_deref(), Some("127.0.0.1:8080"));
    }

    #[test]
    fn test_absolute_data_file_kept() {
        let config =
            Config::from_vars(&vars(&[("QA_DATA_FILE", "/var/lib/qa.json")]), Path::new("/srv")).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/var/lib/qa.json"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let base = Path::new("/srv");
        assert!(Config::from_vars(&vars(&[("QA_THRESHOLD", "high")]), base).is_err());
        assert!(Config::from_vars(&vars(&[("QA_THRESHOLD", "1.5")]), base).is_err());
        assert!(Config::from_vars(&vars(&[("QA_MATCH_POLICY", "fuzzy")]), base).is_err());
        assert!(Config::from_vars(&vars(&[("QA_PRUNING", "maybe")]), base).is_err());
    }

    #[test]
    fn test_stop_words_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stop.txt"), "# extra\n路由器\n\n  机器  \n").unwrap();

        let config =
            Config::from_vars(&vars(&[("QA_STOPWORDS_FILE", "stop.txt")]), dir.path()).unwrap();
        assert_eq!(config.extra_stop_words, vec!["路由器".to_string(), "机器".to_string()]);
        assert!(config.tokenizer().is_stop_word("路由器"));
    }

    #[test]
    fn test_missing_stop_words_file_is_config_error() {
        let err = Config::from_vars(&vars(&[("QA_STOPWORDS_FILE", "nope.txt")]), Path::new("/nonexistent"))
            .unwrap_err();
        assert!(matches!(err, QaError::Config(_)));
    }
}
