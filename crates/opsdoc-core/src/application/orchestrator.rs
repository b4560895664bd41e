//! Concurrent execution of generation tasks with partial-failure isolation.
//!
//! A batch moves `Idle -> Running -> Settled -> {Reported | Aborted}`. Every
//! task is launched before any is awaited, and the batch only settles once
//! each task has succeeded, failed, timed out or panicked. The failure policy
//! is applied after settling, never earlier.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tracing::{Instrument, debug, info_span, warn};

use crate::{
    application::{
        ApplicationError,
        error::TaskFailure,
        report::BatchReport,
    },
    domain::FailurePolicy,
    error::{OpsdocError, OpsdocResult},
};

// ── Tasks ────────────────────────────────────────────────────────────────────

type TaskFuture = Pin<Box<dyn Future<Output = OpsdocResult<u64>> + Send + 'static>>;

/// A named, independent unit of asynchronous work that reports the number of
/// bytes it wrote.
pub struct GenerationTask {
    name: String,
    action: Box<dyn FnOnce() -> TaskFuture + Send + 'static>,
}

impl GenerationTask {
    pub fn new<F, Fut>(name: impl Into<String>, action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = OpsdocResult<u64>> + Send + 'static,
    {
        Self {
            name: name.into(),
            action: Box::new(move || -> TaskFuture { Box::pin(action()) }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wrap this task so it fails with `TaskTimedOut` once `timeout` elapses.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let Self { name, action } = self;
        Self {
            name,
            action: Box::new(move || -> TaskFuture {
                Box::pin(async move {
                    tokio::time::timeout(timeout, action())
                        .await
                        .unwrap_or_else(|_| Err(ApplicationError::TaskTimedOut { timeout }.into()))
                })
            }),
        }
    }
}

impl fmt::Debug for GenerationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationTask")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ── Results ──────────────────────────────────────────────────────────────────

/// Terminal outcome of one task.
///
/// Only [`GenerationResult::succeeded`] and [`GenerationResult::failed`]
/// construct one, so a failed result always carries its error.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    name: String,
    size: u64,
    duration: Duration,
    error: Option<OpsdocError>,
}

impl GenerationResult {
    pub fn succeeded(name: impl Into<String>, size: u64, duration: Duration) -> Self {
        Self {
            name: name.into(),
            size,
            duration,
            error: None,
        }
    }

    pub fn failed(name: impl Into<String>, duration: Duration, error: OpsdocError) -> Self {
        Self {
            name: name.into(),
            size: 0,
            duration,
            error: Some(error),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    /// Bytes written; `0` for failures.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn error(&self) -> Option<&OpsdocError> {
        self.error.as_ref()
    }
}

// ── Batch state ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Running,
    Settled,
    Reported,
    Aborted,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Settled => "settled",
            Self::Reported => "reported",
            Self::Aborted => "aborted",
        })
    }
}

// ── Cancellation ─────────────────────────────────────────────────────────────

/// Best-effort cancellation shared between the caller and the orchestrator.
///
/// Once set, tasks that have not been launched yet are recorded as
/// `TaskCancelled`. Tasks already running are left to finish.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ── Orchestrator ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct TaskOrchestrator {
    task_timeout: Option<Duration>,
    cancellation: CancellationFlag,
}

impl TaskOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a timeout to every task this orchestrator runs.
    pub fn with_task_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.task_timeout = timeout;
        self
    }

    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = flag;
        self
    }

    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancellation
    }

    /// Run `tasks` concurrently and apply `policy` once all have settled.
    ///
    /// # Errors
    ///
    /// Under `AbortOnAnyFailure`, an `AggregateTask` error naming every
    /// failed task. `TolerateAndReport` never errors.
    pub async fn run_batch(
        &self,
        tasks: Vec<GenerationTask>,
        policy: FailurePolicy,
    ) -> OpsdocResult<Vec<GenerationResult>> {
        self.execute("batch", tasks, policy)
            .await
            .map(|report| report.results)
    }

    /// Like [`run_batch`](Self::run_batch) but keeps the stage label and
    /// final state in a [`BatchReport`].
    pub async fn execute(
        &self,
        stage: &str,
        tasks: Vec<GenerationTask>,
        policy: FailurePolicy,
    ) -> OpsdocResult<BatchReport> {
        let results = self.settle(stage, tasks).await;
        let failures: Vec<TaskFailure> = results
            .iter()
            .filter_map(|r| r.error().map(|e| TaskFailure::new(r.name(), e.clone())))
            .collect();

        let state = match policy {
            FailurePolicy::AbortOnAnyFailure if !failures.is_empty() => BatchState::Aborted,
            _ => BatchState::Reported,
        };
        debug!(stage, %policy, %state, failed = failures.len(), "Batch settled");

        if state == BatchState::Aborted {
            return Err(ApplicationError::AggregateTask {
                stage: stage.to_string(),
                failures,
            }
            .into());
        }

        for failure in &failures {
            warn!(stage, task = %failure.name, error = %failure.error, "Task failed, continuing");
        }

        Ok(BatchReport {
            stage: stage.to_string(),
            policy,
            state,
            results,
        })
    }

    /// Launch every task, then wait for all of them. Never fails; results come
    /// back in submission order.
    pub async fn settle(&self, stage: &str, tasks: Vec<GenerationTask>) -> Vec<GenerationResult> {
        let mut state = BatchState::Idle;
        debug!(stage, tasks = tasks.len(), %state, "Batch created");

        let mut slots: Vec<Option<GenerationResult>> = Vec::with_capacity(tasks.len());
        let mut names = Vec::with_capacity(tasks.len());
        let mut launched_at = Vec::with_capacity(tasks.len());
        let mut index_of = HashMap::new();
        let mut set = JoinSet::new();

        for (index, task) in tasks.into_iter().enumerate() {
            let task = match self.task_timeout {
                Some(timeout) => task.with_timeout(timeout),
                None => task,
            };
            let GenerationTask { name, action } = task;
            names.push(name.clone());
            launched_at.push(Instant::now());

            if self.cancellation.is_cancelled() {
                debug!(stage, task = %name, "Skipping task, batch cancelled");
                slots.push(Some(GenerationResult::failed(
                    name,
                    Duration::ZERO,
                    ApplicationError::TaskCancelled.into(),
                )));
                continue;
            }

            slots.push(None);
            let span = info_span!("task", stage, name = %name);
            let handle = set.spawn(
                async move {
                    let started = Instant::now();
                    let outcome = action().await;
                    (outcome, started.elapsed())
                }
                .instrument(span),
            );
            index_of.insert(handle.id(), index);
        }

        state = BatchState::Running;
        debug!(stage, running = set.len(), %state, "Tasks launched");

        while let Some(joined) = set.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, (Ok(size), elapsed))) => (
                    id,
                    GenerationResult::succeeded(String::new(), size, elapsed),
                ),
                Ok((id, (Err(error), elapsed))) => {
                    (id, GenerationResult::failed(String::new(), elapsed, error))
                }
                Err(join_error) => {
                    let id = join_error.id();
                    let error = if join_error.is_panic() {
                        ApplicationError::TaskPanicked {
                            message: panic_message(join_error.into_panic()),
                        }
                    } else {
                        ApplicationError::TaskCancelled
                    };
                    let elapsed = index_of
                        .get(&id)
                        .map(|&i| launched_at[i].elapsed())
                        .unwrap_or_default();
                    (id, GenerationResult::failed(String::new(), elapsed, error.into()))
                }
            };

            if let Some(&index) = index_of.get(&id) {
                slots[index] = Some(GenerationResult {
                    name: names[index].clone(),
                    ..result
                });
            }
        }

        state = BatchState::Settled;
        debug!(stage, %state, "All tasks settled");

        slots
            .into_iter()
            .zip(names)
            .map(|(slot, name)| {
                slot.unwrap_or_else(|| {
                    GenerationResult::failed(name, Duration::ZERO, ApplicationError::TaskCancelled.into())
                })
            })
            .collect()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::sync::atomic::AtomicUsize;

    fn ok_task(name: &str, size: u64, delay_ms: u64) -> GenerationTask {
        GenerationTask::new(name, move || async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            Ok(size)
        })
    }

    fn failing_task(name: &str) -> GenerationTask {
        GenerationTask::new(name, || async {
            Err(ApplicationError::Render {
                artifact: "x".into(),
                reason: "broken".into(),
            }
            .into())
        })
    }

    fn explode() -> OpsdocResult<u64> {
        panic!("renderer exploded")
    }

    fn three_with_middle_failing() -> Vec<GenerationTask> {
        vec![ok_task("one", 1, 5), failing_task("two"), ok_task("three", 3, 1)]
    }

    #[tokio::test]
    async fn tolerate_returns_every_result() {
        let results = TaskOrchestrator::new()
            .run_batch(three_with_middle_failing(), FailurePolicy::TolerateAndReport)
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results.iter().filter(|r| r.success()).count(), 2);
        assert!(!results[1].success());
        assert!(results[1].error().is_some());
    }

    #[tokio::test]
    async fn abort_raises_after_all_tasks_settle() {
        let finished = Arc::new(AtomicUsize::new(0));
        let tasks = (0..3)
            .map(|i| {
                let finished = Arc::clone(&finished);
                GenerationTask::new(format!("task-{i}"), move || async move {
                    tokio::time::sleep(Duration::from_millis(10 * (3 - i))).await;
                    finished.fetch_add(1, Ordering::SeqCst);
                    if i == 1 {
                        Err(ApplicationError::TaskCancelled.into())
                    } else {
                        Ok(1)
                    }
                })
            })
            .collect();

        let err = TaskOrchestrator::new()
            .run_batch(tasks, FailurePolicy::AbortOnAnyFailure)
            .await
            .unwrap_err();

        assert_eq!(finished.load(Ordering::SeqCst), 3);
        assert_eq!(err.kind(), ErrorKind::AggregateTask);
        match err {
            OpsdocError::Application(ApplicationError::AggregateTask { failures, .. }) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].name, "task-1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn abort_without_failures_returns_results() {
        let results = TaskOrchestrator::new()
            .run_batch(vec![ok_task("a", 1, 0), ok_task("b", 2, 0)], FailurePolicy::AbortOnAnyFailure)
            .await
            .unwrap();
        assert!(results.iter().all(GenerationResult::success));
    }

    #[tokio::test]
    async fn results_keep_submission_order() {
        let tasks = vec![ok_task("slow", 1, 30), ok_task("medium", 2, 15), ok_task("fast", 3, 0)];
        let results = TaskOrchestrator::new()
            .run_batch(tasks, FailurePolicy::TolerateAndReport)
            .await
            .unwrap();

        let names: Vec<_> = results.iter().map(GenerationResult::name).collect();
        assert_eq!(names, vec!["slow", "medium", "fast"]);
        assert_eq!(results[2].size(), 3);
    }

    #[tokio::test]
    async fn panics_become_failed_results() {
        let tasks = vec![
            ok_task("fine", 1, 0),
            GenerationTask::new("explodes", || async { explode() }),
        ];
        let results = TaskOrchestrator::new()
            .run_batch(tasks, FailurePolicy::TolerateAndReport)
            .await
            .unwrap();

        assert!(results[0].success());
        let error = results[1].error().unwrap();
        assert_eq!(error.kind(), ErrorKind::Task);
        assert!(error.to_string().contains("renderer exploded"));
    }

    #[tokio::test]
    async fn timed_out_task_does_not_block_siblings() {
        let tasks = vec![ok_task("slow", 1, 5_000), ok_task("quick", 2, 0)];
        let results = TaskOrchestrator::new()
            .with_task_timeout(Some(Duration::from_millis(20)))
            .run_batch(tasks, FailurePolicy::TolerateAndReport)
            .await
            .unwrap();

        assert!(matches!(
            results[0].error(),
            Some(OpsdocError::Application(ApplicationError::TaskTimedOut { .. }))
        ));
        assert!(results[1].success());
    }

    #[tokio::test]
    async fn with_timeout_wraps_a_single_task() {
        let task = ok_task("slow", 1, 5_000).with_timeout(Duration::from_millis(10));
        let results = TaskOrchestrator::new()
            .run_batch(vec![task, ok_task("other", 1, 0)], FailurePolicy::TolerateAndReport)
            .await
            .unwrap();
        assert!(!results[0].success());
        assert!(results[1].success());
    }

    #[tokio::test]
    async fn cancelled_batch_never_starts_tasks() {
        let started = Arc::new(AtomicUsize::new(0));
        let flag = CancellationFlag::new();
        flag.cancel();

        let tasks = (0..2)
            .map(|i| {
                let started = Arc::clone(&started);
                GenerationTask::new(format!("t{i}"), move || async move {
                    started.fetch_add(1, Ordering::SeqCst);
                    Ok(0)
                })
            })
            .collect();

        let results = TaskOrchestrator::new()
            .with_cancellation(flag)
            .run_batch(tasks, FailurePolicy::TolerateAndReport)
            .await
            .unwrap();

        assert_eq!(started.load(Ordering::SeqCst), 0);
        assert!(results.iter().all(|r| matches!(
            r.error(),
            Some(OpsdocError::Application(ApplicationError::TaskCancelled))
        )));
    }

    #[tokio::test]
    async fn execute_labels_the_batch() {
        let report = TaskOrchestrator::new()
            .execute("tests", three_with_middle_failing(), FailurePolicy::TolerateAndReport)
            .await
            .unwrap();

        assert_eq!(report.stage, "tests");
        assert_eq!(report.state, BatchState::Reported);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.bytes_written(), 4);
    }

    #[tokio::test]
    async fn empty_batch_settles_immediately() {
        let results = TaskOrchestrator::new()
            .run_batch(Vec::new(), FailurePolicy::AbortOnAnyFailure)
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
