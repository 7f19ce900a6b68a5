use crate::error::Error;
use crate::reconcile::ReconcileStats;
use crate::storage::models::ClusterSet;
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::time::Duration;

/// Counts and timings for one run of the pipeline.
#[derive(Debug, Clone)]
pub struct MatchSummary {
    pub started_at: DateTime<Utc>,
    pub total_files: usize,
    pub unique_files: usize,
    pub collisions: usize,
    pub clusters_without_collisions: usize,
    pub clusters_with_collisions: usize,
    pub scan_duration: Duration,
    pub cluster_duration: Duration,
    pub reconcile: Option<ReconcileStats>,
    pub reconcile_duration: Option<Duration>,
}

impl MatchSummary {
    pub fn new(
        clusters: &ClusterSet,
        started_at: DateTime<Utc>,
        scan_duration: Duration,
        cluster_duration: Duration,
    ) -> Self {
        Self {
            started_at,
            total_files: clusters.total_files(),
            unique_files: clusters.len(),
            collisions: clusters.total_collisions(),
            clusters_without_collisions: clusters.without_collisions(),
            clusters_with_collisions: clusters.with_collisions(),
            scan_duration,
            cluster_duration,
            reconcile: None,
            reconcile_duration: None,
        }
    }

    pub fn with_reconcile(mut self, stats: ReconcileStats, duration: Duration) -> Self {
        self.reconcile = Some(stats);
        self.reconcile_duration = Some(duration);
        self
    }

    fn headers() -> [&'static str; 14] {
        [
            "started_at",
            "total_files",
            "unique_files",
            "collisions",
            "clusters_without_collisions",
            "clusters_with_collisions",
            "scan_secs",
            "cluster_secs",
            "reconcile_secs",
            "folders_created",
            "files_copied",
            "files_renamed",
            "sources_missing",
            "copy_failures",
        ]
    }

    fn record(&self) -> Vec<String> {
        let reconcile = self.reconcile.clone().unwrap_or_default();
        let reconcile_secs = self
            .reconcile_duration
            .map(|d| format!("{:.3}", d.as_secs_f64()))
            .unwrap_or_default();

        vec![
            self.started_at.to_rfc3339(),
            self.total_files.to_string(),
            self.unique_files.to_string(),
            self.collisions.to_string(),
            self.clusters_without_collisions.to_string(),
            self.clusters_with_collisions.to_string(),
            format!("{:.3}", self.scan_duration.as_secs_f64()),
            format!("{:.3}", self.cluster_duration.as_secs_f64()),
            reconcile_secs,
            reconcile.folders_created.to_string(),
            reconcile.files_copied.to_string(),
            reconcile.files_renamed.to_string(),
            reconcile.sources_missing.to_string(),
            reconcile.copy_failures.to_string(),
        ]
    }

    /// Append one row to `path`, writing the header first if the file is new.
    pub fn write_csv(&self, path: &Path) -> Result<(), Error> {
        let file_exists = fs::metadata(path).is_ok();

        let file = OpenOptions::new().append(true).create(true).open(path)?;
        let mut wtr = csv::Writer::from_writer(file);

        if !file_exists {
            wtr.write_record(Self::headers())?;
        }
        wtr.write_record(self.record())?;

        wtr.flush()?;
        Ok(())
    }
}
