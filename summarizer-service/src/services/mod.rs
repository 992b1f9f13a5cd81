pub mod artifacts;
pub mod health;
pub mod metrics;
pub mod providers;
pub mod summarizer;

pub use artifacts::{ArtifactKind, ArtifactLog};
pub use health::{DiskProbe, FsDiskProbe, HealthMonitor};
pub use metrics::init_metrics;
pub use providers::{ProviderError, SummaryProvider};
pub use summarizer::Summarizer;
