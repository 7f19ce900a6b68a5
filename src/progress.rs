use crate::reconcile::ReconcileStats;
use crate::storage::models::{Cluster, FileRecord};
use std::fmt;
use std::io;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Which side of a cluster a file being materialized belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Representative,
    Collision,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRole::Representative => write!(f, "representative"),
            FileRole::Collision => write!(f, "collision"),
        }
    }
}

/// Sink for pipeline events, passed explicitly into every component.
///
/// The CLI implements it with tracing plus indicatif, tests with a recorder.
/// All methods have default no-op implementations.
pub trait MatchReporter: Send + Sync {
    fn on_scan_start(&self, _root: &Path) {}
    fn on_scan_complete(&self, _total_files: usize, _duration_secs: f64) {}
    fn on_cluster_start(&self, _total_files: usize) {}
    fn on_cluster_created(&self, _index: usize, _representative: &FileRecord) {}
    fn on_duplicate(&self, _file: &FileRecord, _cluster: &Cluster, _score: u8) {}
    fn on_cluster_complete(&self, _clusters: usize, _collisions: usize, _duration_secs: f64) {}
    fn on_clusters_saved(&self, _path: &Path, _clusters: usize) {}
    fn on_reconcile_start(&self, _destination: &Path, _clusters: usize) {}
    fn on_destination_reset(&self, _destination: &Path) {}
    fn on_folder_created(&self, _folder: &Path) {}
    fn on_folder_failed(&self, _folder: &Path, _error: &io::Error) {}
    fn on_file_copied(&self, _role: FileRole, _source: &Path, _destination: &Path) {}
    fn on_file_renamed(&self, _wanted: &Path, _renamed: &Path) {}
    fn on_source_missing(&self, _role: FileRole, _source: &Path) {}
    fn on_copy_failed(&self, _role: FileRole, _source: &Path, _error: &io::Error) {}
    fn on_cluster_reconciled(&self, _done: usize, _total: usize) {}
    fn on_reconcile_complete(&self, _stats: &ReconcileStats, _duration_secs: f64) {}
}

/// No-op reporter for silent operation.
pub struct SilentReporter;

impl MatchReporter for SilentReporter {}

/// Reporter that forwards every event to `tracing`.
pub struct TracingReporter;

impl MatchReporter for TracingReporter {
    fn on_scan_start(&self, root: &Path) {
        info!("Scanning files under '{}'...", root.display());
    }

    fn on_scan_complete(&self, total_files: usize, duration_secs: f64) {
        info!("Found {} files in {:.2}s", total_files, duration_secs);
    }

    fn on_cluster_start(&self, total_files: usize) {
        info!("Clustering {} files...", total_files);
    }

    fn on_cluster_created(&self, index: usize, representative: &FileRecord) {
        debug!("Cluster #{}: '{}'", index, representative.name);
    }

    fn on_duplicate(&self, file: &FileRecord, cluster: &Cluster, score: u8) {
        info!(
            "Duplicate found: '{}' matches '{}' with similarity {}",
            file.name, cluster.representative_name, score
        );
    }

    fn on_cluster_complete(&self, clusters: usize, collisions: usize, duration_secs: f64) {
        info!(
            "Clustering completed in {:.2}s: {} clusters, {} collisions",
            duration_secs, clusters, collisions
        );
    }

    fn on_clusters_saved(&self, path: &Path, clusters: usize) {
        info!("Saved {} clusters to '{}'", clusters, path.display());
    }

    fn on_reconcile_start(&self, destination: &Path, clusters: usize) {
        info!(
            "Materializing {} clusters into '{}'...",
            clusters,
            destination.display()
        );
    }

    fn on_destination_reset(&self, destination: &Path) {
        info!("Deleting existing '{}' folder.", destination.display());
    }

    fn on_folder_created(&self, folder: &Path) {
        debug!("Created folder: '{}'", folder.display());
    }

    fn on_folder_failed(&self, folder: &Path, err: &io::Error) {
        error!("Error creating folder '{}': {}", folder.display(), err);
    }

    fn on_file_copied(&self, role: FileRole, source: &Path, destination: &Path) {
        debug!(
            "Copied {} '{}' to '{}'",
            role,
            source.display(),
            destination.display()
        );
    }

    fn on_file_renamed(&self, wanted: &Path, renamed: &Path) {
        info!(
            "'{}' already exists, copying as '{}'",
            wanted.display(),
            renamed.display()
        );
    }

    fn on_source_missing(&self, role: FileRole, source: &Path) {
        warn!("{} file not found: '{}'", role, source.display());
    }

    fn on_copy_failed(&self, role: FileRole, source: &Path, err: &io::Error) {
        error!("Error copying {} '{}': {}", role, source.display(), err);
    }

    fn on_reconcile_complete(&self, stats: &ReconcileStats, duration_secs: f64) {
        info!(
            "Materialized {} folders in {:.2}s: {} copied, {} renamed, {} missing, {} failed",
            stats.folders_created,
            duration_secs,
            stats.files_copied,
            stats.files_renamed,
            stats.sources_missing,
            stats.copy_failures,
        );
    }
}
