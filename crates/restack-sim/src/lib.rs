//! restack-sim: deterministic simulation harness for the reorder engine.
//!
//! Expands seeds into reproducible drag-gesture scripts, replays them through
//! real [`restack_core`] sessions, and checks the engine's invariants after
//! every commit: partition, capacity, rejection atomicity, and bit-identical
//! determinism across identically-seeded runs.
//!
//! # Conventions
//!
//! - **Errors**: `anyhow::Result` at the harness boundary.
//! - **Logging**: `tracing` macros (`info!` for campaign summaries).

pub mod campaign;
pub mod oracle;
pub mod rng;

pub use campaign::{CampaignConfig, CampaignReport, SeedFailure, SeedRun, run_campaign, run_seed};
pub use oracle::{EngineOracle, InvariantViolation, OracleResult, check_determinism};
pub use rng::DeterministicRng;
