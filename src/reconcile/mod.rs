pub mod naming;

use crate::error::Error;
use crate::matching::normalize::Normalizer;
use crate::progress::{FileRole, MatchReporter};
use crate::scanner::resolve;
use crate::storage::models::{Cluster, ClusterSet};
use naming::{folder_name, sanitize_file_name, unique_destination};
use std::fs;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileStats {
    pub folders_created: usize,
    pub folder_failures: usize,
    pub files_copied: usize,
    pub files_renamed: usize,
    pub sources_missing: usize,
    pub copy_failures: usize,
}

/// Rebuild `destination_root` with one folder per cluster.
///
/// The destination is deleted and recreated first; failing to do so is the
/// only fatal error. Missing sources and failed copies are reported and
/// skipped. A copy never replaces a file already placed during the run.
pub fn materialize(
    clusters: &ClusterSet,
    source_root: &Path,
    destination_root: &Path,
    normalizer: &Normalizer,
    reporter: &dyn MatchReporter,
) -> Result<ReconcileStats, Error> {
    let start = Instant::now();
    reporter.on_reconcile_start(destination_root, clusters.len());

    ensure_disjoint(source_root, destination_root)?;
    reset_destination(destination_root, reporter)?;

    let mut reconciler = Reconciler {
        source_root,
        destination_root,
        normalizer,
        reporter,
        stats: ReconcileStats::default(),
    };

    let total = clusters.len();
    for (done, cluster) in clusters.iter().enumerate() {
        reconciler.materialize_cluster(cluster);
        reporter.on_cluster_reconciled(done + 1, total);
    }

    let stats = reconciler.stats;
    reporter.on_reconcile_complete(&stats, start.elapsed().as_secs_f64());
    Ok(stats)
}

/// Refuse to wipe a destination that is, or contains, the source root.
fn ensure_disjoint(source_root: &Path, destination_root: &Path) -> Result<(), Error> {
    let (Ok(source), Ok(destination)) = (
        fs::canonicalize(source_root),
        fs::canonicalize(destination_root),
    ) else {
        return Ok(());
    };

    if source.starts_with(&destination) {
        return Err(Error::Other(format!(
            "destination '{}' contains the source root '{}'",
            destination_root.display(),
            source_root.display()
        )));
    }
    Ok(())
}

fn reset_destination(destination: &Path, reporter: &dyn MatchReporter) -> Result<(), Error> {
    if destination.exists() {
        reporter.on_destination_reset(destination);
        fs::remove_dir_all(destination).map_err(|source| Error::DestinationReset {
            path: destination.to_path_buf(),
            source,
        })?;
    }
    fs::create_dir_all(destination).map_err(|source| Error::DestinationReset {
        path: destination.to_path_buf(),
        source,
    })
}

struct Reconciler<'a> {
    source_root: &'a Path,
    destination_root: &'a Path,
    normalizer: &'a Normalizer,
    reporter: &'a dyn MatchReporter,
    stats: ReconcileStats,
}

impl Reconciler<'_> {
    fn materialize_cluster(&mut self, cluster: &Cluster) {
        let folder = self
            .destination_root
            .join(folder_name(&cluster.representative_name, self.normalizer));

        // distinct clusters may sanitize to the same folder
        if !folder.is_dir() {
            if let Err(err) = fs::create_dir_all(&folder) {
                self.stats.folder_failures += 1;
                self.reporter.on_folder_failed(&folder, &err);
                return;
            }
            self.stats.folders_created += 1;
            self.reporter.on_folder_created(&folder);
        }

        self.copy_into(
            FileRole::Representative,
            &cluster.representative_path,
            &folder,
        );
        for collision in &cluster.collisions {
            self.copy_into(FileRole::Collision, collision, &folder);
        }
    }

    fn copy_into(&mut self, role: FileRole, relative_path: &str, folder: &Path) {
        // paths escaping the source root are treated as missing
        let source = match resolve(self.source_root, relative_path) {
            Some(source) if source.is_file() => source,
            Some(source) => {
                self.stats.sources_missing += 1;
                self.reporter.on_source_missing(role, &source);
                return;
            }
            None => {
                self.stats.sources_missing += 1;
                self.reporter
                    .on_source_missing(role, &self.source_root.join(relative_path));
                return;
            }
        };

        let source_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = sanitize_file_name(&source_name, self.normalizer);

        let wanted = folder.join(&file_name);
        let destination = unique_destination(folder, &file_name);
        if destination != wanted {
            self.stats.files_renamed += 1;
            self.reporter.on_file_renamed(&wanted, &destination);
        }

        match fs::copy(&source, &destination) {
            Ok(_) => {
                self.stats.files_copied += 1;
                self.reporter.on_file_copied(role, &source, &destination);
            }
            Err(err) => {
                self.stats.copy_failures += 1;
                self.reporter.on_copy_failed(role, &source, &err);
            }
        }
    }
}
