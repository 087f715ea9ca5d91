//! State module for tracking harvest progress
//!
//! # Components
//!
//! - `RunPhase`: the phase a harvest run is in (idle, index fetched, crawling, persisted)
//! - `PageOutcome`: what processing one detail page produced

mod page_outcome;
mod run_phase;

// Re-export main types
pub use page_outcome::PageOutcome;
pub use run_phase::RunPhase;
