pub mod orchestrator;
pub mod service;

pub use orchestrator::{score_tier, ReviewOrchestrator, ReviewSession};
pub use service::AnalysisClient;
