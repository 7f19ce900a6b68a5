use serde::{Deserialize, Serialize};

/// A file discovered under the source root.
///
/// `path` is relative to the root with components joined by `/`; `name` is
/// its final segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub path: String,
}

impl FileRecord {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Build a record from a relative path, deriving `name` from its last segment.
    pub fn from_relative_path(path: &str) -> Self {
        let path = replace_nbsp(path);
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        Self { name, path }
    }
}

/// Replace non-breaking spaces with regular spaces.
pub fn replace_nbsp(s: &str) -> String {
    s.replace('\u{a0}', " ")
}

/// A group of files whose normalized names matched a representative.
///
/// Field order and the `colisions` key are part of the persisted format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    #[serde(rename = "name")]
    pub representative_name: String,
    #[serde(rename = "path")]
    pub representative_path: String,
    #[serde(rename = "colisions", alias = "collisions", default)]
    pub collisions: Vec<String>,
}

impl Cluster {
    pub fn from_representative(file: &FileRecord) -> Self {
        Self {
            representative_name: file.name.clone(),
            representative_path: file.path.clone(),
            collisions: Vec::new(),
        }
    }

    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }

    /// Number of files in the cluster, representative included.
    pub fn file_count(&self) -> usize {
        1 + self.collisions.len()
    }
}

/// Clusters in the order their representatives were first encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterSet {
    clusters: Vec<Cluster>,
}

impl ClusterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Cluster> {
        self.clusters.get(index)
    }

    pub fn as_slice(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Append a new cluster and return its index.
    pub(crate) fn push(&mut self, cluster: Cluster) -> usize {
        self.clusters.push(cluster);
        self.clusters.len() - 1
    }

    pub(crate) fn add_collision(&mut self, index: usize, path: String) {
        self.clusters[index].collisions.push(path);
    }

    pub fn total_collisions(&self) -> usize {
        self.clusters.iter().map(|c| c.collisions.len()).sum()
    }

    pub fn total_files(&self) -> usize {
        self.clusters.iter().map(Cluster::file_count).sum()
    }

    pub fn with_collisions(&self) -> usize {
        self.clusters.iter().filter(|c| c.has_collisions()).count()
    }

    pub fn without_collisions(&self) -> usize {
        self.clusters.len() - self.with_collisions()
    }
}

impl From<Vec<Cluster>> for ClusterSet {
    fn from(clusters: Vec<Cluster>) -> Self {
        Self { clusters }
    }
}

impl<'a> IntoIterator for &'a ClusterSet {
    type Item = &'a Cluster;
    type IntoIter = std::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}
