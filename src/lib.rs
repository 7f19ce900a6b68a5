pub mod config;
pub mod engine;
pub mod error;
pub mod matching;
pub mod progress;
pub mod reconcile;
pub mod scanner;
pub mod stats;
pub mod storage;

pub use config::AppConfig;
pub use engine::{MatchEngine, MatchResult};
pub use error::Error;
pub use matching::{build_clusters, similarity, Normalizer, DEFAULT_THRESHOLD};
pub use progress::{FileRole, MatchReporter, SilentReporter, TracingReporter};
pub use reconcile::{materialize, ReconcileStats};
pub use storage::{Cluster, ClusterSet, FileRecord};
