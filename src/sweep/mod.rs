//! Bot PR sweep engine
//!
//! Three-phase pattern per repository:
//! 1. Gather - list open PRs and fetch a snapshot per bot PR (effectful)
//! 2. Plan - evaluate snapshots into `RepoPlan` steps (pure, testable)
//! 3. Execute - perform merges and record outcomes (effectful)

mod evaluate;
mod execute;
mod plan;
mod progress;

pub use evaluate::{BotAllowList, DEFAULT_BOTS, Evaluation, evaluate_pull_request, screen_author};
pub use execute::{
    DEFAULT_REPO_DELAY, MergeOutcome, OutcomeStatus, PrDecision, SweepFailure, SweepOptions,
    SweepReport, execute_plan, sweep_repositories,
};
pub use plan::{MERGE_MESSAGE_PREAMBLE, RepoPlan, SweepStep, merge_request_for, plan_repository};
pub use progress::{NoopProgress, SweepProgress};
