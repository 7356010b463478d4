pub mod holdings_store;
pub mod orchestrator;

pub use holdings_store::HoldingsStore;
pub use orchestrator::{BatchOutcome, PortfolioOrchestrator, TrackerError};
