//! Initialization steps.
//!
//! Every step that submits a transaction is an [`IdempotentStep`]: it first
//! checks on-chain whether its target state already holds, and only submits
//! its transaction if not. Running a step is always done through [`ensure`],
//! so that re-running the whole initialization after a failure picks up
//! where it stopped.

mod pool;
mod registry;
mod swap;
mod token;

pub use {pool::*, registry::*, swap::*, token::*};

use {async_trait::async_trait, swayswap_types::TxOutcome};

#[async_trait]
pub trait IdempotentStep {
    /// Human-readable description, used in logs.
    fn describe(&self) -> String;

    /// Whether the step's target state already holds on-chain.
    async fn is_satisfied(&self) -> anyhow::Result<bool>;

    /// Submit the transaction that brings about the target state, and wait
    /// for it to be included.
    async fn execute(&self) -> anyhow::Result<TxOutcome>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The target state already held; nothing was submitted.
    Skipped,
    /// The step's transaction was submitted and succeeded.
    Executed(TxOutcome),
}

impl StepOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, StepOutcome::Executed(_))
    }
}

/// Run the step unless its target state already holds.
pub async fn ensure<S>(step: &S) -> anyhow::Result<StepOutcome>
where
    S: IdempotentStep + Sync + ?Sized,
{
    let description = step.describe();

    if step.is_satisfied().await? {
        tracing::info!(step = %description, "Already done, skipping");
        return Ok(StepOutcome::Skipped);
    }

    tracing::info!(step = %description, "Executing");

    let outcome = step.execute().await?;

    tracing::info!(
        step = %description,
        tx_id = %outcome.tx_id,
        block_height = outcome.block_height,
        gas_used = outcome.gas_used,
        "Done"
    );

    Ok(StepOutcome::Executed(outcome))
}
