//! [apps/vanity-miner/src/errors.rs]
//! Typed failure modes surfaced at the CLI boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MinerError {
    #[error("{0}")]
    Pattern(#[from] vanity_core_pattern::errors::PatternError),

    #[error("no worker threads could be spawned")]
    ThreadSpawnFailure,
}
