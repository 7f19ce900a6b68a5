use crate::config::AppConfig;
use crate::error::Error;
use crate::matching::{build_clusters, sort_files, Normalizer};
use crate::progress::MatchReporter;
use crate::reconcile::{self, ReconcileStats};
use crate::scanner::{DirectoryWalker, FileProvider};
use crate::stats::MatchSummary;
use crate::storage::{self, ClusterSet, FileRecord};
use chrono::Utc;
use std::time::Instant;

pub struct MatchEngine {
    config: AppConfig,
    normalizer: Normalizer,
}

#[derive(Debug)]
pub struct MatchResult {
    pub clusters: ClusterSet,
    pub summary: MatchSummary,
}

impl MatchEngine {
    pub fn new(config: AppConfig) -> Self {
        let normalizer = config.normalizer();
        Self { config, normalizer }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Find, cluster and persist. Nothing is written when the source root is invalid.
    pub fn cluster(&self, reporter: &dyn MatchReporter) -> Result<MatchResult, Error> {
        let result = self.cluster_and_save(reporter)?;
        self.write_stats(&result.summary)?;
        Ok(result)
    }

    /// Full pipeline: find, cluster, persist, then rebuild the destination tree.
    pub fn run(&self, reporter: &dyn MatchReporter) -> Result<MatchResult, Error> {
        let mut result = self.cluster_and_save(reporter)?;

        let reconcile_start = Instant::now();
        let stats = self.materialize(&result.clusters, reporter)?;
        result.summary = result
            .summary
            .with_reconcile(stats, reconcile_start.elapsed());

        self.write_stats(&result.summary)?;
        Ok(result)
    }

    /// Cluster whatever `provider` yields, without touching the filesystem.
    pub fn cluster_from(
        &self,
        provider: &dyn FileProvider,
        reporter: &dyn MatchReporter,
    ) -> Result<MatchResult, Error> {
        let started_at = Utc::now();

        reporter.on_scan_start(&self.config.source_root);
        let scan_start = Instant::now();
        let files = provider.files()?;
        let scan_duration = scan_start.elapsed();
        reporter.on_scan_complete(files.len(), scan_duration.as_secs_f64());

        let cluster_start = Instant::now();
        let clusters = self.cluster_files(files, reporter);
        let cluster_duration = cluster_start.elapsed();
        reporter.on_cluster_complete(
            clusters.len(),
            clusters.total_collisions(),
            cluster_duration.as_secs_f64(),
        );

        let summary = MatchSummary::new(&clusters, started_at, scan_duration, cluster_duration);
        Ok(MatchResult { clusters, summary })
    }

    pub fn cluster_files(
        &self,
        mut files: Vec<FileRecord>,
        reporter: &dyn MatchReporter,
    ) -> ClusterSet {
        reporter.on_cluster_start(files.len());
        sort_files(&mut files);
        build_clusters(&files, self.config.threshold, &self.normalizer, reporter)
    }

    pub fn materialize(
        &self,
        clusters: &ClusterSet,
        reporter: &dyn MatchReporter,
    ) -> Result<ReconcileStats, Error> {
        reconcile::materialize(
            clusters,
            &self.config.source_root,
            &self.config.destination_root,
            &self.normalizer,
            reporter,
        )
    }

    /// Rebuild the destination from the persisted cluster file.
    pub fn materialize_saved(&self, reporter: &dyn MatchReporter) -> Result<ReconcileStats, Error> {
        let clusters = storage::load(&self.config.clusters_file)?;
        self.materialize(&clusters, reporter)
    }

    fn cluster_and_save(&self, reporter: &dyn MatchReporter) -> Result<MatchResult, Error> {
        let walker = DirectoryWalker::new(&self.config.source_root)
            .with_ignore_patterns(self.config.ignore_patterns.clone());
        let result = self.cluster_from(&walker, reporter)?;

        storage::save(&result.clusters, &self.config.clusters_file)?;
        reporter.on_clusters_saved(&self.config.clusters_file, result.clusters.len());
        Ok(result)
    }

    fn write_stats(&self, summary: &MatchSummary) -> Result<(), Error> {
        if let Some(path) = &self.config.stats_csv {
            summary.write_csv(path)?;
        }
        Ok(())
    }
}
