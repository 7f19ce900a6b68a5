use crate::matching::normalize::{Normalizer, DEFAULT_BOILERPLATE_PHRASES, DEFAULT_STOP_WORDS};
use crate::matching::DEFAULT_THRESHOLD;
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "FUZZY_DUPER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the files to deduplicate.
    pub source_root: PathBuf,
    /// Directory rebuilt with one folder per cluster.
    pub destination_root: PathBuf,
    /// Where the cluster list is persisted as JSON.
    pub clusters_file: PathBuf,
    /// Minimum similarity (0-100) for a file to join an existing cluster.
    pub threshold: u8,
    pub ignore_patterns: Vec<String>,
    pub boilerplate_phrases: Vec<String>,
    pub stop_words: Vec<String>,
    /// Optional CSV file that receives one row of run statistics per run.
    pub stats_csv: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("downloads"),
            destination_root: PathBuf::from("matched_downloads"),
            clusters_file: PathBuf::from("founded_books.json"),
            threshold: DEFAULT_THRESHOLD,
            ignore_patterns: Vec::new(),
            boilerplate_phrases: to_strings(DEFAULT_BOILERPLATE_PHRASES),
            stop_words: to_strings(DEFAULT_STOP_WORDS),
            stats_csv: None,
        }
    }
}

impl AppConfig {
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(&self.boilerplate_phrases, &self.stop_words)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold > 100 {
            return Err(ConfigError::Message(format!(
                "threshold must be between 0 and 100, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Load `Config.toml` (optional) overlaid with `FUZZY_DUPER_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("ignore_patterns")
                .with_list_parse_key("boilerplate_phrases")
                .with_list_parse_key("stop_words"),
        )
        .build()?;
    let config = builder.try_deserialize::<AppConfig>()?;
    config.validate()?;
    Ok(config)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.source_root, PathBuf::from("downloads"));
        assert_eq!(config.destination_root, PathBuf::from("matched_downloads"));
        assert_eq!(config.clusters_file, PathBuf::from("founded_books.json"));
        assert_eq!(config.threshold, 85);
        assert!(config.stop_words.contains(&"pdfdrive".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::builder()
            .add_source(config::File::from_str(
                "threshold = 90\nstop_words = [\"vol\"]",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>()
            .unwrap();

        assert_eq!(config.threshold, 90);
        assert_eq!(config.stop_words, vec!["vol"]);
        assert_eq!(config.boilerplate_phrases, vec!["premium ebooks"]);
        assert_eq!(config.normalizer().normalize("Dune Vol 1.pdf"), "dune 1");
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = AppConfig {
            threshold: 101,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
