use fuzzy_duper::progress::{FileRole, MatchReporter, TracingReporter};
use fuzzy_duper::{Cluster, FileRecord, ReconcileStats};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// CLI reporter: indicatif bars for each phase, log lines through tracing.
///
/// - Scan phase: spinner (file count unknown upfront)
/// - Cluster phase: bar over files
/// - Materialize phase: bar over clusters
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
    log: TracingReporter,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            log: TracingReporter,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.lock();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.lock().take() {
            pb.finish_and_clear();
        }
    }

    fn inc(&self) {
        if let Some(pb) = self.lock().as_ref() {
            pb.inc(1);
        }
    }

    /// Run `f` with the bar hidden so log lines do not tear it.
    fn suspended<F: FnOnce()>(&self, f: F) {
        match self.lock().as_ref() {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(TICK_CHARS);
    pb.set_style(style);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn counter(len: usize, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let template = format!(
        "  {{spinner:.cyan}} {} [{{bar:30.cyan/dim}}] {{pos}}/{{len}} ({{eta}} remaining)",
        label
    );
    let style = ProgressStyle::with_template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸─")
        .tick_chars(TICK_CHARS);
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

impl MatchReporter for CliReporter {
    fn on_scan_start(&self, _root: &Path) {
        self.set_bar(spinner("Scanning files..."));
    }

    fn on_scan_complete(&self, total_files: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Scan complete: {} files in {:.2}s",
            total_files, duration_secs
        );
    }

    fn on_cluster_start(&self, total_files: usize) {
        self.set_bar(counter(total_files, "Clustering"));
    }

    fn on_cluster_created(&self, index: usize, representative: &FileRecord) {
        self.inc();
        self.log.on_cluster_created(index, representative);
    }

    fn on_duplicate(&self, file: &FileRecord, cluster: &Cluster, score: u8) {
        self.inc();
        self.suspended(|| self.log.on_duplicate(file, cluster, score));
    }

    fn on_cluster_complete(&self, clusters: usize, collisions: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Clustering complete: {} clusters, {} collisions in {:.2}s",
            clusters, collisions, duration_secs
        );
    }

    fn on_clusters_saved(&self, path: &Path, clusters: usize) {
        self.log.on_clusters_saved(path, clusters);
    }

    fn on_reconcile_start(&self, destination: &Path, clusters: usize) {
        self.log.on_reconcile_start(destination, clusters);
        self.set_bar(counter(clusters, "Materializing"));
    }

    fn on_destination_reset(&self, destination: &Path) {
        self.suspended(|| self.log.on_destination_reset(destination));
    }

    fn on_folder_created(&self, folder: &Path) {
        self.log.on_folder_created(folder);
    }

    fn on_folder_failed(&self, folder: &Path, err: &io::Error) {
        self.suspended(|| self.log.on_folder_failed(folder, err));
    }

    fn on_file_copied(&self, role: FileRole, source: &Path, destination: &Path) {
        self.log.on_file_copied(role, source, destination);
    }

    fn on_file_renamed(&self, wanted: &Path, renamed: &Path) {
        self.suspended(|| self.log.on_file_renamed(wanted, renamed));
    }

    fn on_source_missing(&self, role: FileRole, source: &Path) {
        self.suspended(|| self.log.on_source_missing(role, source));
    }

    fn on_copy_failed(&self, role: FileRole, source: &Path, err: &io::Error) {
        self.suspended(|| self.log.on_copy_failed(role, source, err));
    }

    fn on_cluster_reconciled(&self, done: usize, _total: usize) {
        if let Some(pb) = self.lock().as_ref() {
            pb.set_position(done as u64);
        }
    }

    fn on_reconcile_complete(&self, stats: &ReconcileStats, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Materialize complete: {} folders, {} files copied in {:.2}s",
            stats.folders_created, stats.files_copied, duration_secs
        );
        self.log.on_reconcile_complete(stats, duration_secs);
    }
}
