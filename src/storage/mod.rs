pub mod json;
pub mod models;

pub use json::{from_reader, load, save, to_writer};
pub use models::{Cluster, ClusterSet, FileRecord};
