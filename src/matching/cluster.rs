use crate::matching::normalize::Normalizer;
use crate::matching::similarity::similarity;
use crate::progress::MatchReporter;
use crate::storage::models::{Cluster, ClusterSet, FileRecord};

pub const DEFAULT_THRESHOLD: u8 = 85;

/// Order files by name, case-insensitively. Equal keys keep their input order.
pub fn sort_files(files: &mut [FileRecord]) {
    files.sort_by_cached_key(|file| file.name.to_lowercase());
}

/// Greedy single-pass clustering.
///
/// Each file is compared with the normalized name of every existing cluster's
/// representative, in cluster order, and joins the first one scoring at least
/// `threshold`. Collisions are never compared against, so grouping is not
/// transitive. A file that matches nothing becomes a new representative.
///
/// `files` should already be ordered with [`sort_files`].
pub fn build_clusters(
    files: &[FileRecord],
    threshold: u8,
    normalizer: &Normalizer,
    reporter: &dyn MatchReporter,
) -> ClusterSet {
    let mut clusters = ClusterSet::new();
    // normalized representative names, parallel to `clusters`
    let mut representatives: Vec<String> = Vec::new();

    for file in files {
        let normalized = normalizer.normalize(&file.name);

        let matched = representatives
            .iter()
            .enumerate()
            .find_map(|(index, representative)| {
                let score = similarity(&normalized, representative);
                (score >= threshold).then_some((index, score))
            });

        match matched {
            Some((index, score)) => {
                clusters.add_collision(index, file.path.clone());
                if let Some(cluster) = clusters.get(index) {
                    reporter.on_duplicate(file, cluster, score);
                }
            }
            None => {
                let index = clusters.push(Cluster::from_representative(file));
                representatives.push(normalized);
                reporter.on_cluster_created(index, file);
            }
        }
    }

    clusters
}
