//! Campaign runner for deterministic drag-session simulation.
//!
//! A campaign executes many seeds. Each seed expands into a reproducible
//! script of drag gestures (start, a few hovers, then a drop or cancel),
//! replays the script twice through real sessions, and checks the invariant
//! oracle after every committed step plus determinism across the two runs.

#![allow(clippy::module_name_repetitions)]

use std::ops::Range;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use restack_core::{Board, BoardSession, DragEvent, DropOutcome, DropTarget, ItemId};

use crate::oracle::{EngineOracle, InvariantViolation, OracleResult, check_determinism};
use crate::rng::DeterministicRng;

/// Campaign-level configuration controlling how many seeds to run and how
/// each seed's gesture script is shaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Range of seeds to execute, e.g. `0..100`.
    pub seed_range: Range<u64>,
    /// Number of gestures per seed.
    pub gestures: usize,
    /// Probability a gesture ends in a cancel instead of a drop (percent).
    pub cancel_percent: u8,
    /// Probability a drop targets a container's empty space rather than an
    /// item (percent).
    pub container_target_percent: u8,
    /// Probability a drop fires with no target at all (percent).
    pub drop_nowhere_percent: u8,
    /// Maximum number of hover recomputations before the terminal event.
    pub max_hovers: u8,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            seed_range: 0..50,
            gestures: 40,
            cancel_percent: 10,
            container_target_percent: 20,
            drop_nowhere_percent: 5,
            max_hovers: 3,
        }
    }
}

impl CampaignConfig {
    /// Validate configuration before running.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.seed_range.is_empty() {
            bail!("seed_range must not be empty");
        }
        if self.gestures == 0 {
            bail!("gestures must be > 0");
        }
        Ok(())
    }
}

/// Failure details for a single seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFailure {
    /// The seed that failed.
    pub seed: u64,
    /// Invariant violations found.
    pub violations: Vec<InvariantViolation>,
}

/// Aggregate report produced by a campaign run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignReport {
    /// Total seeds executed.
    pub seeds_run: usize,
    /// Seeds that passed all invariants.
    pub seeds_passed: usize,
    /// First seed that failed (for prioritized replay).
    pub first_failure: Option<u64>,
    /// All seed failures with violation details.
    pub failures: Vec<SeedFailure>,
    /// Commits observed across all seeds.
    pub commits: usize,
    /// Rejections observed across all seeds.
    pub rejections: usize,
    /// Cancels observed across all seeds.
    pub cancels: usize,
}

impl CampaignReport {
    /// True if every seed passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome counts plus the committed-snapshot trail of one scripted run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRun {
    /// Canonical JSON of every committed snapshot, in commit order.
    pub snapshots: Vec<String>,
    /// Oracle checks accumulated over the run.
    pub oracle: OracleResult,
    /// Drops that committed.
    pub commits: usize,
    /// Drops that were rejected.
    pub rejections: usize,
    /// Gestures that ended in a cancel (explicit or target-less drop).
    pub cancels: usize,
}

/// Replay the scripted gestures for `seed` against a fresh session over
/// `board`.
///
/// Every step is derived from the seed's RNG stream only, so two calls with
/// the same seed and board produce identical scripts and identical results.
///
/// # Panics
///
/// Panics if `board` holds no items; there is nothing to drag.
#[must_use]
pub fn run_seed(config: &CampaignConfig, board: &Board, seed: u64) -> SeedRun {
    let mut rng = DeterministicRng::new(seed);
    let mut session = BoardSession::new(board.clone());
    let oracle = EngineOracle::for_board(board);

    let item_pool: Vec<ItemId> = board.item_ids().cloned().collect();
    assert!(!item_pool.is_empty(), "run_seed: board holds no items");
    let container_pool: Vec<_> = board.containers().iter().map(|c| c.id.clone()).collect();

    let mut result = OracleResult::pass();
    let mut snapshots = Vec::new();
    let (mut commits, mut rejections, mut cancels) = (0, 0, 0);

    for step in 0..config.gestures {
        let source = item_pool[rng.next_index(item_pool.len())].clone();
        if !session.start(&source) {
            continue;
        }

        let hovers = rng.next_index(usize::from(config.max_hovers) + 1);
        for _ in 0..hovers {
            let target = item_pool[rng.next_index(item_pool.len())].clone();
            let _ = session.hover(&DragEvent::over_item(source.clone(), target));
        }

        if rng.chance_percent(config.cancel_percent) {
            session.cancel();
            cancels += 1;
        } else {
            let event = terminal_event(config, &mut rng, &source, &item_pool, &container_pool);
            let before = snapshot_json(session.board());
            match session.drop(&event) {
                DropOutcome::Committed(next) => {
                    commits += 1;
                    snapshots.push(snapshot_json(&next));
                    result = result.merge(oracle.check_board(&next));
                }
                DropOutcome::Rejected(_) => {
                    rejections += 1;
                    if snapshot_json(session.board()) != before {
                        result = result
                            .merge(OracleResult::fail(vec![InvariantViolation::RejectionMutated {
                                step,
                            }]));
                    }
                }
                DropOutcome::Canceled => cancels += 1,
            }
        }
    }

    SeedRun {
        snapshots,
        oracle: result,
        commits,
        rejections,
        cancels,
    }
}

fn terminal_event(
    config: &CampaignConfig,
    rng: &mut DeterministicRng,
    source: &ItemId,
    items: &[ItemId],
    containers: &[restack_core::ContainerId],
) -> DragEvent {
    if rng.chance_percent(config.drop_nowhere_percent) {
        return DragEvent::without_target(source.clone());
    }
    if rng.chance_percent(config.container_target_percent) {
        let container = containers[rng.next_index(containers.len())].clone();
        return DragEvent {
            source: source.clone(),
            target: Some(DropTarget::Container(container)),
            edge: None,
            axis: None,
        };
    }
    let target = items[rng.next_index(items.len())].clone();
    DragEvent::over_item(source.clone(), target)
}

fn snapshot_json(board: &Board) -> String {
    serde_json::to_string(board).unwrap_or_default()
}

/// Run a full campaign across all seeds in the config.
///
/// Each seed runs twice; the two committed-snapshot trails must be
/// bit-identical (determinism) and every intermediate snapshot must pass the
/// oracle.
///
/// # Errors
///
/// Returns an error if config validation fails.
pub fn run_campaign(config: &CampaignConfig, board: &Board) -> Result<CampaignReport> {
    config.validate()?;

    let mut report = CampaignReport {
        seeds_run: 0,
        seeds_passed: 0,
        first_failure: None,
        failures: Vec::new(),
        commits: 0,
        rejections: 0,
        cancels: 0,
    };

    for seed in config.seed_range.clone() {
        let first = run_seed(config, board, seed);
        let second = run_seed(config, board, seed);

        let verdict = first
            .oracle
            .clone()
            .merge(check_determinism(&first.snapshots, &second.snapshots));

        report.seeds_run += 1;
        report.commits += first.commits;
        report.rejections += first.rejections;
        report.cancels += first.cancels;

        if verdict.passed {
            report.seeds_passed += 1;
        } else {
            if report.first_failure.is_none() {
                report.first_failure = Some(seed);
            }
            report.failures.push(SeedFailure {
                seed,
                violations: verdict.violations,
            });
        }
    }

    tracing::info!(
        seeds = report.seeds_run,
        passed = report.seeds_passed,
        commits = report.commits,
        rejections = report.rejections,
        cancels = report.cancels,
        "campaign finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::{CampaignConfig, run_campaign, run_seed};
    use restack_core::Board;

    #[test]
    fn default_config_validates() {
        assert!(CampaignConfig::default().validate().is_ok());
        let empty = CampaignConfig {
            seed_range: 5..5,
            ..CampaignConfig::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let config = CampaignConfig::default();
        let board = Board::sample();
        let a = run_seed(&config, &board, 17);
        let b = run_seed(&config, &board, 17);
        assert_eq!(a, b);
    }

    #[test]
    fn campaign_over_the_sample_board_passes() {
        let config = CampaignConfig {
            seed_range: 0..20,
            ..CampaignConfig::default()
        };
        let report = run_campaign(&config, &Board::sample()).expect("config is valid");
        assert!(report.all_passed(), "failures: {:?}", report.failures);
        assert_eq!(report.seeds_run, 20);
        assert!(report.commits > 0, "campaign should exercise commits");
    }

    #[test]
    fn bounded_containers_produce_rejections_eventually() {
        let config = CampaignConfig {
            seed_range: 0..30,
            ..CampaignConfig::default()
        };
        let report = run_campaign(&config, &Board::sample()).expect("config is valid");
        // With bounds of 5 and 6 items in play, some cross-container drops
        // must hit a full target across 30 seeds of 40 gestures.
        assert!(report.rejections > 0);
    }
}
