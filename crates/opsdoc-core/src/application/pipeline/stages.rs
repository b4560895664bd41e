//! The standard stages.
//!
//! | Stage          | Enabled by              | Default policy |
//! |----------------|-------------------------|----------------|
//! | `api`          | `api_docs`              | abort          |
//! | `architecture` | `architecture_diagrams` | abort          |
//! | `tests`        | `test_reports`          | tolerate       |
//! | `operations`   | `operational_guides`    | tolerate       |
//! | `index`        | always                  | abort          |

use super::{GenerationStage, StageContext};
use crate::{
    application::orchestrator::GenerationTask,
    domain::{FailurePolicy, GenerationConfig, OutputFormat},
    render::{api_html, api_markdown, architecture, index, mermaid, openapi, operations, test_reports},
};

// ── API ──────────────────────────────────────────────────────────────────────

/// `api/openapi.json` and `api/README.md` always; `api/index.html` with the
/// html format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiStage;

impl GenerationStage for ApiStage {
    fn name(&self) -> &'static str {
        "api"
    }

    fn default_policy(&self) -> FailurePolicy {
        FailurePolicy::AbortOnAnyFailure
    }

    fn enabled(&self, config: &GenerationConfig) -> bool {
        config.features().api_docs
    }

    fn tasks(&self, ctx: &StageContext) -> Vec<GenerationTask> {
        let mut tasks = vec![
            ctx.artifact("api/openapi.json", |c| {
                openapi::render(&c.records.endpoints, &c.render)
            }),
            ctx.artifact("api/README.md", |c| {
                Ok(api_markdown::render(&c.records.endpoints, &c.render))
            }),
        ];

        if ctx.config.has_format(OutputFormat::Html) {
            tasks.push(ctx.artifact("api/index.html", |c| {
                Ok(api_html::render(&c.records.endpoints, &c.render))
            }));
        }

        tasks
    }
}

// ── Architecture ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct ArchitectureStage;

impl GenerationStage for ArchitectureStage {
    fn name(&self) -> &'static str {
        "architecture"
    }

    fn default_policy(&self) -> FailurePolicy {
        FailurePolicy::AbortOnAnyFailure
    }

    fn enabled(&self, config: &GenerationConfig) -> bool {
        config.features().architecture_diagrams
    }

    fn tasks(&self, ctx: &StageContext) -> Vec<GenerationTask> {
        vec![
            ctx.artifact("architecture/README.md", |c| {
                Ok(architecture::index(&c.records.components, &c.render))
            }),
            ctx.artifact("architecture/system-architecture.md", |c| {
                Ok(architecture::system_architecture(&c.records.components, &c.render))
            }),
            ctx.artifact("architecture/architecture.mmd", |c| {
                Ok(mermaid::render(&c.records.components))
            }),
        ]
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Index always; integrated report, history and one file per run only when
/// runs exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestReportStage;

impl GenerationStage for TestReportStage {
    fn name(&self) -> &'static str {
        "tests"
    }

    fn default_policy(&self) -> FailurePolicy {
        FailurePolicy::TolerateAndReport
    }

    fn enabled(&self, config: &GenerationConfig) -> bool {
        config.features().test_reports
    }

    fn tasks(&self, ctx: &StageContext) -> Vec<GenerationTask> {
        let mut tasks = vec![ctx.artifact("tests/README.md", |c| {
            Ok(test_reports::index(&c.records.reports, &c.render))
        })];

        if ctx.records.reports.is_empty() {
            return tasks;
        }

        tasks.push(ctx.artifact("tests/integrated-test-report.md", |c| {
            Ok(test_reports::integrated(&c.records.reports, &c.render))
        }));
        for report in ctx.records.reports.iter().cloned() {
            tasks.push(ctx.artifact(format!("tests/{}", report.file_name()), move |_| {
                Ok(test_reports::run(&report))
            }));
        }
        tasks.push(ctx.artifact("tests/test-history.md", |c| {
            Ok(test_reports::history(&c.records.reports))
        }));

        tasks
    }
}

// ── Operations ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct OperationsStage;

impl GenerationStage for OperationsStage {
    fn name(&self) -> &'static str {
        "operations"
    }

    fn default_policy(&self) -> FailurePolicy {
        FailurePolicy::TolerateAndReport
    }

    fn enabled(&self, config: &GenerationConfig) -> bool {
        config.features().operational_guides
    }

    fn tasks(&self, ctx: &StageContext) -> Vec<GenerationTask> {
        vec![
            ctx.artifact("operations/deployment-guide.md", |c| {
                Ok(operations::deployment_guide(&c.render))
            }),
            ctx.artifact("operations/troubleshooting.md", |c| {
                Ok(operations::troubleshooting(&c.render))
            }),
            ctx.artifact("operations/checklist.md", |c| {
                Ok(operations::checklist_guide(&c.render))
            }),
            ctx.artifact("operations/monitoring.md", |c| Ok(operations::monitoring(&c.render))),
            ctx.artifact("operations/README.md", |c| Ok(operations::index(&c.render))),
        ]
    }
}

// ── Index ────────────────────────────────────────────────────────────────────

/// Top-level `README.md`. Runs last so it only links sections that ran.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexStage;

impl GenerationStage for IndexStage {
    fn name(&self) -> &'static str {
        "index"
    }

    fn default_policy(&self) -> FailurePolicy {
        FailurePolicy::AbortOnAnyFailure
    }

    fn enabled(&self, _config: &GenerationConfig) -> bool {
        true
    }

    fn tasks(&self, ctx: &StageContext) -> Vec<GenerationTask> {
        vec![ctx.artifact("README.md", |c| {
            Ok(index::readme(&c.config, &c.records, &c.render))
        })]
    }
}
