//! Integration tests for opsdoc-core, driven through the public API with
//! in-file port implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;

use opsdoc_core::application::ApplicationError;
use opsdoc_core::prelude::*;

// ── Fakes ────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingFilesystem {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    fail_on: Option<&'static str>,
}

impl RecordingFilesystem {
    fn failing_on(suffix: &'static str) -> Self {
        Self {
            fail_on: Some(suffix),
            ..Self::default()
        }
    }

    fn paths(&self) -> Vec<String> {
        self.files
            .lock()
            .unwrap()
            .keys()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    fn content(&self, path: &str) -> String {
        let files = self.files.lock().unwrap();
        String::from_utf8(files[Path::new(path)].clone()).unwrap()
    }
}

#[async_trait]
impl Filesystem for RecordingFilesystem {
    async fn create_dir_all(&self, _path: &Path) -> OpsdocResult<()> {
        Ok(())
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> OpsdocResult<()> {
        if self
            .fail_on
            .is_some_and(|suffix| path.to_string_lossy().ends_with(suffix))
        {
            return Err(ApplicationError::Io {
                path: path.to_path_buf(),
                operation: "write",
                reason: "disk full".into(),
            }
            .into());
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    async fn write_streaming(
        &self,
        path: &Path,
        content: &[u8],
        _chunk_size: usize,
    ) -> OpsdocResult<()> {
        self.write_file(path, content).await
    }

    async fn set_permissions(&self, _path: &Path, _mode: FileMode) -> OpsdocResult<()> {
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

struct FixedCollector(RecordSet);

#[async_trait]
impl RecordCollector for FixedCollector {
    async fn collect(&self) -> OpsdocResult<RecordSet> {
        Ok(self.0.clone())
    }
}

struct CountingStats(Arc<RecordingFilesystem>);

#[async_trait]
impl StatsCollector for CountingStats {
    async fn walk(&self, directory: &Path) -> OpsdocResult<GenerationStats> {
        let mut stats = GenerationStats::default();
        for (path, content) in self.0.files.lock().unwrap().iter() {
            if path.starts_with(directory) {
                let ext = path
                    .extension()
                    .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                    .unwrap_or_default();
                stats.record_file(&ext, content.len() as u64);
            }
        }
        Ok(stats)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

fn records() -> RecordSet {
    let endpoints = vec![
        ApiEndpoint::new("/api/auth/login", HttpMethod::Post)
            .with_summary("Login")
            .with_description("<script>alert(1)</script>")
            .with_response(ApiResponse::json(200, "ok").with_example(json!({"token": "t"})))
            .with_tag("Authentication"),
        ApiEndpoint::new("/api/documents", HttpMethod::Get)
            .with_response(ApiResponse::json(200, "list"))
            .with_tag("Documents")
            .with_security("BearerAuth"),
    ];
    let components = vec![
        ArchitectureComponent::new("a", "Gateway", ComponentType::Network).connects_to("b"),
        ArchitectureComponent::new("b", "Api", ComponentType::Service).connects_to("a"),
    ];
    let reports = vec![TestReport {
        test_run_id: "run-1".into(),
        timestamp: Utc.with_ymd_and_hms(2024, 12, 21, 10, 30, 0).unwrap(),
        environment: "production".into(),
        summary: TestSummary {
            total_tests: 10,
            passed_tests: 9,
            failed_tests: 1,
            skipped_tests: 0,
            overall_score: 91.0,
        },
        suite_results: Vec::new(),
        recommendations: Vec::new(),
    }];
    RecordSet::new(endpoints, components, reports)
}

fn config(formats: Vec<OutputFormat>) -> GenerationConfig {
    GenerationConfig::builder()
        .project_name("Integration Docs")
        .output_directory("generated-docs")
        .formats(formats)
        .build()
        .unwrap()
}

fn service(fs: Arc<RecordingFilesystem>) -> DocumentationService {
    DocumentationService::new(
        Arc::new(FixedCollector(records())),
        fs.clone(),
        Arc::new(CountingStats(fs)),
        "/project",
    )
    .with_timestamps(false)
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn full_run_produces_the_whole_tree() {
    let fs = Arc::new(RecordingFilesystem::default());
    let report = service(fs.clone())
        .generate(&config(vec![OutputFormat::Markdown, OutputFormat::Html]))
        .await
        .unwrap();

    let expected = [
        "/project/generated-docs/README.md",
        "/project/generated-docs/api/README.md",
        "/project/generated-docs/api/index.html",
        "/project/generated-docs/api/openapi.json",
        "/project/generated-docs/architecture/README.md",
        "/project/generated-docs/architecture/architecture.mmd",
        "/project/generated-docs/architecture/system-architecture.md",
        "/project/generated-docs/operations/README.md",
        "/project/generated-docs/operations/checklist.md",
        "/project/generated-docs/operations/deployment-guide.md",
        "/project/generated-docs/operations/monitoring.md",
        "/project/generated-docs/operations/troubleshooting.md",
        "/project/generated-docs/tests/README.md",
        "/project/generated-docs/tests/integrated-test-report.md",
        "/project/generated-docs/tests/production-run-1.md",
        "/project/generated-docs/tests/test-history.md",
    ];
    assert_eq!(fs.paths(), expected);

    assert!(report.is_complete());
    assert_eq!(report.batches.len(), 5);
    assert_eq!(report.stats.total_files, expected.len() as u64);
    assert_eq!(report.stats.files_by_type.get(".md"), Some(&13));
}

#[tokio::test]
async fn html_is_escaped_on_disk() {
    let fs = Arc::new(RecordingFilesystem::default());
    service(fs.clone())
        .generate(&config(vec![OutputFormat::Html]))
        .await
        .unwrap();

    let html = fs.content("/project/generated-docs/api/index.html");
    assert!(html.contains("&lt;script&gt;alert(1)&lt;&#x2F;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn repeated_runs_without_clock_are_identical() {
    let first = Arc::new(RecordingFilesystem::default());
    let second = Arc::new(RecordingFilesystem::default());
    let cfg = config(vec![OutputFormat::Markdown]);

    service(first.clone()).generate(&cfg).await.unwrap();
    service(second.clone()).generate(&cfg).await.unwrap();

    for path in first.paths() {
        assert_eq!(first.content(&path), second.content(&path), "{path} differs");
    }
}

#[tokio::test]
async fn tolerated_failure_is_reported_and_run_continues() {
    let fs = Arc::new(RecordingFilesystem::failing_on("test-history.md"));
    let report = service(fs.clone())
        .generate(&config(vec![OutputFormat::Markdown]))
        .await
        .unwrap();

    let failures: Vec<_> = report.failures().map(GenerationResult::name).collect();
    assert_eq!(failures, vec!["tests/test-history.md"]);
    assert!(!report.is_complete());
    // later stages still ran
    assert!(fs.paths().iter().any(|p| p.ends_with("generated-docs/README.md")));
}

#[tokio::test]
async fn aborting_stage_stops_generation() {
    let fs = Arc::new(RecordingFilesystem::failing_on("openapi.json"));
    let err = service(fs.clone())
        .generate(&config(vec![OutputFormat::Markdown]))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AggregateTask);
    assert!(err.to_string().contains("api/openapi.json"));
    // sibling in the same batch settled and stayed on disk
    assert!(fs.paths().iter().any(|p| p.ends_with("api/README.md")));
    assert!(!fs.paths().iter().any(|p| p.contains("architecture")));
}

#[tokio::test]
async fn cancelled_run_records_every_task_as_cancelled() {
    let fs = Arc::new(RecordingFilesystem::default());
    let flag = CancellationFlag::new();
    flag.cancel();
    let cfg = GenerationConfig::builder()
        .project_name("Integration Docs")
        .failure_policy(Some(FailurePolicy::TolerateAndReport))
        .build()
        .unwrap();

    let report = service(fs.clone())
        .with_cancellation(flag)
        .generate(&cfg)
        .await
        .unwrap();

    assert!(report.results().all(|r| !r.success()));
    assert!(
        report
            .failures()
            .all(|r| r.error().map(OpsdocError::kind) == Some(ErrorKind::Task))
    );
    assert!(fs.paths().is_empty());
}
