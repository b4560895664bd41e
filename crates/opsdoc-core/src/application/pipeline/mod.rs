//! Ordered generation stages.
//!
//! A [`Pipeline`] holds a list of [`GenerationStage`] plug-ins and runs them
//! one after another. Each enabled stage turns into a single batch for the
//! [`TaskOrchestrator`]; tasks inside a batch run concurrently.

pub mod stages;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    application::{
        orchestrator::{GenerationTask, TaskOrchestrator},
        report::BatchReport,
        writer::DocumentWriter,
    },
    domain::{FailurePolicy, GenerationConfig, RecordSet},
    error::OpsdocResult,
    render::RenderContext,
};

pub use stages::{ApiStage, ArchitectureStage, IndexStage, OperationsStage, TestReportStage};

/// Shared, read-only inputs for every task of a run.
///
/// Cloning is cheap; tasks take their own copy.
#[derive(Debug, Clone)]
pub struct StageContext {
    pub config: Arc<GenerationConfig>,
    pub records: Arc<RecordSet>,
    pub writer: Arc<DocumentWriter>,
    /// Already resolved through the sandbox.
    pub output_root: PathBuf,
    pub render: Arc<RenderContext>,
}

impl StageContext {
    /// A task that renders one artifact and writes it to `relative_path`.
    ///
    /// Rendering happens inside the task, so a failing renderer is isolated
    /// like any other task failure. The task is named after its path.
    pub fn artifact<F>(&self, relative_path: impl Into<String>, render: F) -> GenerationTask
    where
        F: FnOnce(&StageContext) -> OpsdocResult<String> + Send + 'static,
    {
        let path = relative_path.into();
        let ctx = self.clone();
        GenerationTask::new(path.clone(), move || async move {
            let content = render(&ctx)?;
            ctx.writer.write(&ctx.output_root, &path, &content).await
        })
    }
}

/// One step of the pipeline, contributing one batch of tasks.
pub trait GenerationStage: Send + Sync {
    /// Label used for logs, reports and aggregate errors.
    fn name(&self) -> &'static str;

    /// Policy used unless the configuration overrides it.
    fn default_policy(&self) -> FailurePolicy;

    fn enabled(&self, config: &GenerationConfig) -> bool;

    fn tasks(&self, ctx: &StageContext) -> Vec<GenerationTask>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
    orchestrator: TaskOrchestrator,
}

impl Pipeline {
    /// An empty pipeline.
    pub fn new(orchestrator: TaskOrchestrator) -> Self {
        Self {
            stages: Vec::new(),
            orchestrator,
        }
    }

    /// `api`, `architecture`, `tests`, `operations`, `index`, in that order.
    pub fn standard(orchestrator: TaskOrchestrator) -> Self {
        Self::new(orchestrator)
            .with_stage(ApiStage)
            .with_stage(ArchitectureStage)
            .with_stage(TestReportStage)
            .with_stage(OperationsStage)
            .with_stage(IndexStage)
    }

    pub fn with_stage(mut self, stage: impl GenerationStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn orchestrator(&self) -> &TaskOrchestrator {
        &self.orchestrator
    }

    /// Run every enabled stage in order.
    ///
    /// # Errors
    ///
    /// The first batch that aborts stops the pipeline with its
    /// `AggregateTask` error. Artifacts written by earlier batches stay.
    pub async fn run(&self, ctx: &StageContext) -> OpsdocResult<Vec<BatchReport>> {
        let mut reports = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            if !stage.enabled(&ctx.config) {
                debug!(stage = stage.name(), "Stage disabled, skipping");
                continue;
            }

            let policy = ctx
                .config
                .failure_policy()
                .unwrap_or_else(|| stage.default_policy());
            let tasks = stage.tasks(ctx);
            info!(stage = stage.name(), tasks = tasks.len(), %policy, "Running stage");

            let report = self.orchestrator.execute(stage.name(), tasks, policy).await?;
            reports.push(report);
        }

        Ok(reports)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .field("orchestrator", &self.orchestrator)
            .finish()
    }
}
