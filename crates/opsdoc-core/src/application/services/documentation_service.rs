//! Documentation Service - main application use case.
//!
//! One `generate` call:
//! 1. Resolve the output directory through the sandbox (no side effects yet)
//! 2. Create the output root if it is missing
//! 3. Collect records
//! 4. Run the pipeline, one batch per enabled stage
//! 5. Walk the output tree for stats

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        orchestrator::{CancellationFlag, TaskOrchestrator},
        pipeline::{Pipeline, StageContext},
        ports::{Filesystem, RecordCollector, StatsCollector},
        report::GenerationReport,
        writer::{DocumentWriter, WriterPolicy},
    },
    domain::{GenerationConfig, PathSandbox},
    error::OpsdocResult,
    render::RenderContext,
};

/// Generates the documentation tree for a project.
pub struct DocumentationService {
    collector: Arc<dyn RecordCollector>,
    filesystem: Arc<dyn Filesystem>,
    stats: Arc<dyn StatsCollector>,
    project_root: PathBuf,
    sandbox: PathSandbox,
    writer_policy: WriterPolicy,
    cancellation: CancellationFlag,
    stamp_generated_at: bool,
}

impl DocumentationService {
    /// Create a service writing below `project_root`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let service = DocumentationService::new(
    ///     Arc::new(collector),  // impl RecordCollector
    ///     Arc::new(filesystem), // impl Filesystem
    ///     Arc::new(stats),      // impl StatsCollector
    ///     std::env::current_dir()?,
    /// );
    /// let report = service.generate(&config).await?;
    /// ```
    pub fn new(
        collector: Arc<dyn RecordCollector>,
        filesystem: Arc<dyn Filesystem>,
        stats: Arc<dyn StatsCollector>,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            collector,
            filesystem,
            stats,
            project_root: project_root.into(),
            sandbox: PathSandbox::default(),
            writer_policy: WriterPolicy::default(),
            cancellation: CancellationFlag::new(),
            stamp_generated_at: true,
        }
    }

    pub fn with_sandbox(mut self, sandbox: PathSandbox) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_writer_policy(mut self, policy: WriterPolicy) -> Self {
        self.writer_policy = policy;
        self
    }

    /// Share a cancellation flag with the caller (e.g. a Ctrl-C handler).
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = flag;
        self
    }

    /// Whether rendered documents carry a `Generated:` timestamp. Turning it
    /// off makes repeated runs byte-identical.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.stamp_generated_at = enabled;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve where `config` will write, without touching the filesystem.
    ///
    /// # Errors
    ///
    /// `DomainError::Security` when the output directory escapes the
    /// project root.
    pub fn output_root(&self, config: &GenerationConfig) -> OpsdocResult<PathBuf> {
        Ok(self
            .sandbox
            .resolve(&self.project_root, config.output_directory())?)
    }

    /// Generate with the standard stages.
    pub async fn generate(&self, config: &GenerationConfig) -> OpsdocResult<GenerationReport> {
        let pipeline = Pipeline::standard(self.orchestrator(config));
        self.generate_with(config, &pipeline).await
    }

    /// The orchestrator `generate` uses for `config`.
    pub fn orchestrator(&self, config: &GenerationConfig) -> TaskOrchestrator {
        TaskOrchestrator::new()
            .with_task_timeout(config.task_timeout())
            .with_cancellation(self.cancellation.clone())
    }

    /// Generate with a caller-assembled pipeline.
    ///
    /// # Errors
    ///
    /// - `ConfigValidation` / `Security` before anything is written
    /// - `Io` if the output root cannot be created or walked
    /// - `AggregateTask` from the first stage that aborts
    #[instrument(
        skip_all,
        fields(
            project = %config.project_name(),
            output = %config.output_directory()
        )
    )]
    pub async fn generate_with(
        &self,
        config: &GenerationConfig,
        pipeline: &Pipeline,
    ) -> OpsdocResult<GenerationReport> {
        info!(%config, "Generating documentation");

        // 1. Everything that can be rejected up front
        config.validate()?;
        let output_root = self.output_root(config)?;
        debug!(root = %output_root.display(), "Output root resolved");

        // 2. Output root; an existing one is reused and its files overwritten
        if self.filesystem.exists(&output_root).await {
            debug!(root = %output_root.display(), "Output root exists");
        } else {
            self.filesystem.create_dir_all(&output_root).await?;
            self.filesystem
                .set_permissions(&output_root, self.writer_policy.directory_mode)
                .await?;
            info!(root = %output_root.display(), "Created output directory");
        }

        // 3. Records
        let records = self.collector.collect().await?;
        info!(
            endpoints = records.endpoints.len(),
            components = records.components.len(),
            reports = records.reports.len(),
            "Records collected"
        );

        // 4. Stages
        let mut render = RenderContext::from_config(config);
        if self.stamp_generated_at {
            render = render.with_generated_at(Utc::now());
        }
        let ctx = StageContext {
            config: Arc::new(config.clone()),
            records: Arc::new(records),
            writer: Arc::new(DocumentWriter::new(
                Arc::clone(&self.filesystem),
                self.sandbox.clone(),
                self.writer_policy,
            )),
            output_root: output_root.clone(),
            render: Arc::new(render),
        };
        let batches = pipeline.run(&ctx).await?;

        // 5. Stats
        let stats = self.stats.walk(&output_root).await?;

        let report = GenerationReport { batches, stats };
        info!(
            files = report.stats.total_files,
            bytes = report.stats.total_size,
            failures = report.failures().count(),
            "Documentation generated"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for DocumentationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentationService")
            .field("project_root", &self.project_root)
            .field("sandbox", &self.sandbox)
            .field("writer_policy", &self.writer_policy)
            .field("stamp_generated_at", &self.stamp_generated_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{MockFilesystem, MockRecordCollector, MockStatsCollector},
        report::GenerationStats,
    };
    use crate::domain::{FeatureToggles, FileMode, OutputFormat, RecordSet};
    use crate::error::ErrorKind;

    fn config(output: &str) -> GenerationConfig {
        GenerationConfig::builder()
            .project_name("Service Test")
            .output_directory(output)
            .formats([OutputFormat::Markdown])
            .features(FeatureToggles {
                api_docs: false,
                architecture_diagrams: false,
                test_reports: false,
                operational_guides: false,
                ..FeatureToggles::default()
            })
            .build()
            .unwrap()
    }

    fn permissive_filesystem() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_set_permissions().returning(|_, _| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs
    }

    fn service(
        fs: MockFilesystem,
        collector: MockRecordCollector,
        stats: MockStatsCollector,
    ) -> DocumentationService {
        DocumentationService::new(Arc::new(collector), Arc::new(fs), Arc::new(stats), "/project")
            .with_timestamps(false)
    }

    #[tokio::test]
    async fn escaping_output_directory_fails_before_side_effects() {
        // No expectations: any filesystem or collector call panics.
        let service = service(
            MockFilesystem::new(),
            MockRecordCollector::new(),
            MockStatsCollector::new(),
        );

        let err = service.generate(&config("../evil")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Security);
        assert!(err.is_pre_generation());
    }

    #[tokio::test]
    async fn index_only_run_writes_readme_and_walks_root() {
        let mut collector = MockRecordCollector::new();
        collector
            .expect_collect()
            .times(1)
            .returning(|| Ok(RecordSet::default()));
        let mut stats = MockStatsCollector::new();
        stats
            .expect_walk()
            .withf(|dir| dir == Path::new("/project/docs"))
            .returning(|_| {
                let mut s = GenerationStats::default();
                s.record_file(".md", 120);
                Ok(s)
            });

        let report = service(permissive_filesystem(), collector, stats)
            .generate(&config("docs"))
            .await
            .unwrap();

        assert_eq!(report.batches.len(), 1);
        assert_eq!(report.batches[0].stage, "index");
        assert!(report.is_complete());
        assert_eq!(report.stats.total_files, 1);
    }

    #[tokio::test]
    async fn collector_failure_propagates() {
        let mut collector = MockRecordCollector::new();
        collector.expect_collect().returning(|| {
            Err(ApplicationError::Io {
                path: "lambda".into(),
                operation: "scan",
                reason: "denied".into(),
            }
            .into())
        });

        let err = service(permissive_filesystem(), collector, MockStatsCollector::new())
            .generate(&config("docs"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Io);
    }

    /// Filesystem for an index-only run into `/project/docs`. The writer
    /// creates the README's parent (the root) itself; the service adds one
    /// more create only when the root is missing.
    fn root_tracking_filesystem(root_exists: bool, root_creates: usize) -> MockFilesystem {
        let root = Path::new("/project/docs");
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(move |path| path == root)
            .times(1)
            .returning(move |_| root_exists);
        fs.expect_create_dir_all()
            .withf(move |path| path == root)
            .times(root_creates)
            .returning(|_| Ok(()));
        fs.expect_set_permissions()
            .withf(move |path, mode| path == root && *mode == FileMode::directory())
            .times(root_creates)
            .returning(|_, _| Ok(()));
        fs.expect_set_permissions()
            .withf(move |path, _| path != root)
            .returning(|_, _| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs
    }

    async fn index_only_run(fs: MockFilesystem) -> GenerationReport {
        let mut collector = MockRecordCollector::new();
        collector.expect_collect().returning(|| Ok(RecordSet::default()));
        let mut stats = MockStatsCollector::new();
        stats.expect_walk().returning(|_| Ok(GenerationStats::default()));

        service(fs, collector, stats)
            .generate(&config("docs"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn missing_output_root_is_created_with_directory_mode() {
        let report = index_only_run(root_tracking_filesystem(false, 2)).await;
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn existing_output_root_is_not_recreated_by_the_service() {
        let report = index_only_run(root_tracking_filesystem(true, 1)).await;
        assert!(report.is_complete());
    }

    #[test]
    fn output_root_is_resolved_against_project_root() {
        let service = service(
            MockFilesystem::new(),
            MockRecordCollector::new(),
            MockStatsCollector::new(),
        );
        assert_eq!(
            service.output_root(&config("generated-docs")).unwrap(),
            PathBuf::from("/project/generated-docs")
        );
    }
}
