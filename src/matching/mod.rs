pub mod cluster;
pub mod normalize;
pub mod similarity;

pub use cluster::{build_clusters, sort_files, DEFAULT_THRESHOLD};
pub use normalize::Normalizer;
pub use similarity::similarity;
