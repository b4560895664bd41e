//! Top-level `README.md` linking every artifact the run produced.

use super::{Doc, RenderContext, operations};
use crate::domain::{GenerationConfig, OutputFormat, RecordSet};

pub fn readme(config: &GenerationConfig, records: &RecordSet, ctx: &RenderContext) -> String {
    let features = config.features();
    let mut doc = Doc::new();

    doc.para(format!("# {} Documentation", ctx.project_name));
    doc.line(format!("Version: {}", ctx.version));
    if let Some(stamp) = ctx.generated_stamp() {
        doc.line(format!("Generated: {stamp}"));
    }
    doc.blank();

    doc.para("## Contents");

    if features.api_docs {
        doc.para("### API");
        doc.line("- [API reference](./api/README.md)");
        if config.has_format(OutputFormat::Html) {
            doc.line("- [API reference (HTML)](./api/index.html)");
        }
        doc.line("- [OpenAPI document](./api/openapi.json)");
        doc.blank();
    }

    if features.architecture_diagrams {
        doc.para("### Architecture");
        doc.line("- [Overview](./architecture/README.md)");
        doc.line("- [System architecture](./architecture/system-architecture.md)");
        doc.line("- [Mermaid diagram](./architecture/architecture.mmd)");
        doc.blank();
    }

    if features.test_reports {
        doc.para("### Tests");
        doc.line("- [Test reports](./tests/README.md)");
        if !records.reports.is_empty() {
            doc.line("- [Integrated test report](./tests/integrated-test-report.md)");
            doc.line("- [Run history](./tests/test-history.md)");
        }
        doc.blank();
    }

    if features.operational_guides {
        doc.para("### Operations");
        doc.line("- [Operations index](./operations/README.md)");
        for (file, title) in operations::GUIDES {
            doc.line(format!("- [{title}](./operations/{file})"));
        }
        doc.blank();
    }

    doc.para("## Record Counts");
    doc.line(format!("- Endpoints: {}", records.endpoints.len()));
    doc.line(format!("- Components: {}", records.components.len()));
    doc.line(format!("- Test runs: {}", records.reports.len()));
    doc.blank();

    doc.finish()
}
