//! Tests for the saga runner ordering and compensation rules.

use std::sync::{Arc, Mutex};

use super::*;
use rstest::{fixture, rstest};

type Journal = Arc<Mutex<Vec<String>>>;

#[derive(Default)]
struct Ctx {
    produced: Vec<&'static str>,
}

struct RecordingStep {
    name: &'static str,
    journal: Journal,
    fail_execute: bool,
    fail_compensate: bool,
}

impl RecordingStep {
    fn ok(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: journal.clone(),
            fail_execute: false,
            fail_compensate: false,
        }
    }

    fn failing(mut self) -> Self {
        self.fail_execute = true;
        self
    }

    fn failing_rollback(mut self) -> Self {
        self.fail_compensate = true;
        self
    }

    fn record(&self, entry: String) {
        self.journal.lock().expect("journal lock").push(entry);
    }
}

#[async_trait]
impl SagaStep<Ctx, String> for RecordingStep {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn execute(&self, ctx: &mut Ctx) -> Result<(), String> {
        self.record(format!("execute:{}", self.name));
        if self.fail_execute {
            return Err(format!("{} failed", self.name));
        }
        ctx.produced.push(self.name);
        Ok(())
    }

    async fn compensate(&self, _ctx: &Ctx) -> Result<(), String> {
        self.record(format!("compensate:{}", self.name));
        if self.fail_compensate {
            return Err(format!("{} rollback failed", self.name));
        }
        Ok(())
    }
}

#[fixture]
fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().expect("journal lock").clone()
}

#[rstest]
#[tokio::test]
async fn runs_all_steps_in_order_without_compensation(journal: Journal) {
    let saga = Saga::new()
        .step(RecordingStep::ok("a", &journal))
        .step(RecordingStep::ok("b", &journal));
    let mut ctx = Ctx::default();

    saga.run(&mut ctx).await.expect("saga succeeds");

    assert_eq!(ctx.produced, ["a", "b"]);
    assert_eq!(entries(&journal), ["execute:a", "execute:b"]);
}

#[rstest]
#[tokio::test]
async fn compensates_completed_steps_in_reverse_order(journal: Journal) {
    let saga = Saga::new()
        .step(RecordingStep::ok("a", &journal))
        .step(RecordingStep::ok("b", &journal))
        .step(RecordingStep::ok("c", &journal).failing())
        .step(RecordingStep::ok("d", &journal));
    let mut ctx = Ctx::default();

    let failure = saga.run(&mut ctx).await.expect_err("saga fails");

    assert_eq!(failure.step, "c");
    assert_eq!(failure.cause, "c failed");
    assert!(failure.is_fully_compensated());
    assert_eq!(
        entries(&journal),
        ["execute:a", "execute:b", "execute:c", "compensate:b", "compensate:a"]
    );
}

#[rstest]
#[tokio::test]
async fn first_step_failure_compensates_nothing(journal: Journal) {
    let saga = Saga::new()
        .step(RecordingStep::ok("a", &journal).failing())
        .step(RecordingStep::ok("b", &journal));
    let mut ctx = Ctx::default();

    let failure = saga.run(&mut ctx).await.expect_err("saga fails");

    assert_eq!(failure.step, "a");
    assert!(failure.is_fully_compensated());
    assert_eq!(entries(&journal), ["execute:a"]);
}

#[rstest]
#[tokio::test]
async fn compensation_failures_are_collected_and_unwinding_continues(journal: Journal) {
    let saga = Saga::new()
        .step(RecordingStep::ok("a", &journal))
        .step(RecordingStep::ok("b", &journal).failing_rollback())
        .step(RecordingStep::ok("c", &journal).failing());
    let mut ctx = Ctx::default();

    let failure = saga.run(&mut ctx).await.expect_err("saga fails");

    assert!(!failure.is_fully_compensated());
    assert_eq!(failure.compensation_failures.len(), 1);
    let rollback = failure
        .compensation_failures
        .first()
        .expect("one compensation failure");
    assert_eq!(rollback.step, "b");
    assert_eq!(rollback.cause, "b rollback failed");
    assert_eq!(
        entries(&journal),
        ["execute:a", "execute:b", "execute:c", "compensate:b", "compensate:a"]
    );
}

#[rstest]
#[tokio::test]
async fn empty_saga_succeeds() {
    let saga: Saga<Ctx, String> = Saga::new();
    saga.run(&mut Ctx::default()).await.expect("empty saga succeeds");
}
