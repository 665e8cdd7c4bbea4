//! Minimal saga runner for workflows spanning independent subsystems.
//!
//! A [`Saga`] is an ordered list of steps. Each step has a forward action and
//! an optional compensating action. When a forward action fails, every step
//! that already completed is compensated in reverse order. Compensation keeps
//! going after a compensation failure so one broken rollback does not strand
//! the remaining ones; all compensation failures are returned to the caller.
//!
//! Steps share a mutable context `C` so later steps can consume values
//! produced by earlier ones (for example a freshly generated identifier).

use async_trait::async_trait;
use tracing::{debug, error, warn};

/// One forward action plus its compensation.
#[async_trait]
pub trait SagaStep<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    /// Stable step name used in logs and failure reports.
    fn name(&self) -> &'static str;

    /// Perform the forward action.
    async fn execute(&self, ctx: &mut C) -> Result<(), E>;

    /// Undo a completed forward action. Steps with nothing to undo keep the
    /// default.
    async fn compensate(&self, _ctx: &C) -> Result<(), E> {
        Ok(())
    }
}

/// Compensation that failed while unwinding a saga.
#[derive(Debug)]
pub struct CompensationFailure<E> {
    /// Step whose compensation failed.
    pub step: &'static str,
    /// Error returned by the compensation.
    pub cause: E,
}

/// Outcome of a saga whose forward path failed.
#[derive(Debug)]
pub struct SagaFailure<E> {
    /// Step whose forward action failed.
    pub step: &'static str,
    /// Error returned by the failed forward action.
    pub cause: E,
    /// Compensations that failed while unwinding, in execution order.
    pub compensation_failures: Vec<CompensationFailure<E>>,
}

impl<E> SagaFailure<E> {
    /// Whether every completed step was rolled back.
    #[must_use]
    pub fn is_fully_compensated(&self) -> bool {
        self.compensation_failures.is_empty()
    }
}

/// Ordered sequence of saga steps.
///
/// # Examples
/// ```
/// use async_trait::async_trait;
/// use identity_admin::domain::saga::{Saga, SagaStep};
///
/// struct Append(&'static str);
///
/// #[async_trait]
/// impl SagaStep<Vec<&'static str>, String> for Append {
///     fn name(&self) -> &'static str {
///         self.0
///     }
///
///     async fn execute(&self, ctx: &mut Vec<&'static str>) -> Result<(), String> {
///         ctx.push(self.0);
///         Ok(())
///     }
/// }
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let saga = Saga::new().step(Append("first")).step(Append("second"));
/// let mut ctx = Vec::new();
/// saga.run(&mut ctx).await.expect("saga succeeds");
/// assert_eq!(ctx, ["first", "second"]);
/// # });
/// ```
pub struct Saga<C, E> {
    steps: Vec<Box<dyn SagaStep<C, E>>>,
}

impl<C, E> Default for Saga<C, E> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<C, E> Saga<C, E>
where
    C: Send + Sync,
    E: Send + std::fmt::Display,
{
    /// Create an empty saga.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step; steps run in insertion order.
    #[must_use]
    pub fn step(mut self, step: impl SagaStep<C, E> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Run every step in order, compensating completed steps on failure.
    ///
    /// Steps run strictly sequentially; a step never starts before the
    /// previous one has finished.
    ///
    /// # Errors
    /// Returns [`SagaFailure`] naming the failed step, its error, and any
    /// compensation that also failed.
    pub async fn run(&self, ctx: &mut C) -> Result<(), SagaFailure<E>> {
        for (index, step) in self.steps.iter().enumerate() {
            debug!(step = step.name(), "saga step starting");
            if let Err(cause) = step.execute(ctx).await {
                warn!(step = step.name(), error = %cause, "saga step failed; compensating");
                let completed = self.steps.get(..index).unwrap_or_default();
                let compensation_failures = Self::compensate(completed, ctx).await;
                return Err(SagaFailure {
                    step: step.name(),
                    cause,
                    compensation_failures,
                });
            }
        }
        Ok(())
    }

    async fn compensate(
        completed: &[Box<dyn SagaStep<C, E>>],
        ctx: &C,
    ) -> Vec<CompensationFailure<E>> {
        let mut failures = Vec::new();
        for step in completed.iter().rev() {
            match step.compensate(ctx).await {
                Ok(()) => debug!(step = step.name(), "saga step compensated"),
                Err(cause) => {
                    error!(step = step.name(), error = %cause, "saga compensation failed");
                    failures.push(CompensationFailure {
                        step: step.name(),
                        cause,
                    });
                }
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests;
