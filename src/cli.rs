use clap::{Args, Parser, Subcommand};
use fuzzy_duper::AppConfig;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fuzzy-duper")]
#[command(about = "Group near-duplicate files by name and rebuild a clean folder tree", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Command-line values that take precedence over `Config.toml` and the environment.
#[derive(Debug, Args)]
pub struct Overrides {
    /// Directory holding the files to deduplicate
    #[arg(long, global = true)]
    pub source: Option<PathBuf>,

    /// Directory rebuilt with one folder per cluster
    #[arg(long, global = true)]
    pub destination: Option<PathBuf>,

    /// JSON file the clusters are written to and read from
    #[arg(long, global = true)]
    pub clusters_file: Option<PathBuf>,

    /// Minimum similarity (0-100) for a file to join an existing cluster
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,

    /// Append run statistics to this CSV file
    #[arg(long, global = true)]
    pub stats_csv: Option<PathBuf>,

    /// Rebuild an existing destination without asking
    #[arg(short, long, global = true)]
    pub yes: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(source) = &self.source {
            config.source_root = source.clone();
        }
        if let Some(destination) = &self.destination {
            config.destination_root = destination.clone();
        }
        if let Some(clusters_file) = &self.clusters_file {
            config.clusters_file = clusters_file.clone();
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(stats_csv) = &self.stats_csv {
            config.stats_csv = Some(stats_csv.clone());
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Cluster the source files, save the clusters and rebuild the destination
    Process,
    /// Cluster the source files and save the clusters only
    Cluster,
    /// Rebuild the destination from a previously saved cluster file
    Materialize,
    /// Print the normalized form of each name
    Normalize {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the similarity score of two names
    Compare { first: String, second: String },
    /// Print configuration values
    PrintConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::parse_from([
            "fuzzy-duper",
            "process",
            "--source",
            "in",
            "--threshold",
            "90",
            "-y",
        ]);
        let mut config = AppConfig::default();
        cli.overrides.apply(&mut config);

        assert!(matches!(cli.command, Some(Commands::Process)));
        assert!(cli.overrides.yes);
        assert_eq!(config.source_root, PathBuf::from("in"));
        assert_eq!(config.destination_root, PathBuf::from("matched_downloads"));
        assert_eq!(config.threshold, 90);
    }

    #[test]
    fn test_threshold_range() {
        assert!(Cli::try_parse_from(["fuzzy-duper", "--threshold", "101", "cluster"]).is_err());
    }
}
