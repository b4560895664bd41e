//! Architecture documents: the grouped component write-up and its index.

use super::{Doc, RenderContext, mermaid};
use crate::domain::{ArchitectureComponent, ComponentType, display_value};

/// `architecture/system-architecture.md`
pub fn system_architecture(components: &[ArchitectureComponent], ctx: &RenderContext) -> String {
    let mut doc = Doc::new();
    doc.para(format!("# {} System Architecture", ctx.project_name));
    if let Some(stamp) = ctx.generated_stamp() {
        doc.para(format!("Generated: {stamp}"));
    }

    doc.para("## Overview");
    doc.para(format!(
        "{} is composed of {} components. The diagram below shows how requests \
         flow between them; each section after it describes one component type.",
        ctx.project_name,
        components.len()
    ));

    doc.para("## System Diagram");
    doc.fence("mermaid", &mermaid::render(components));

    for (kind, members) in group_by_type(components) {
        doc.para(format!("## {}", kind.title()));
        for component in members {
            render_component(&mut doc, component);
        }
    }

    doc.finish()
}

fn render_component(doc: &mut Doc, component: &ArchitectureComponent) {
    doc.para(format!("### {}", component.name));
    if !component.technology.is_empty() {
        doc.para(format!("**Technology:** {}", component.technology));
    }
    if !component.description.is_empty() {
        doc.para(format!("**Description:** {}", component.description));
    }
    if !component.properties.is_empty() {
        doc.line("**Key properties:**");
        for (key, value) in &component.properties {
            doc.line(format!("- {key}: {}", display_value(value)));
        }
        doc.blank();
    }
    if !component.connections.is_empty() {
        doc.para(format!("**Connects to:** {}", component.connections.join(", ")));
    }
    doc.para("---");
}

/// `architecture/README.md`
pub fn index(components: &[ArchitectureComponent], ctx: &RenderContext) -> String {
    let mut doc = Doc::new();
    doc.para(format!("# {} Architecture", ctx.project_name));

    doc.para("## Documents");
    doc.line("- [System architecture](system-architecture.md)");
    doc.line("- [Mermaid source](architecture.mmd)");
    doc.blank();

    doc.para("## Components");
    doc.line("| Component | Type | Technology | Description |");
    doc.line("|-----------|------|------------|-------------|");
    for c in components {
        doc.line(format!(
            "| {} | {} | {} | {} |",
            c.name, c.kind, c.technology, c.description
        ));
    }
    doc.blank();

    doc.finish()
}

/// Components grouped by type, types in first-seen order.
fn group_by_type(
    components: &[ArchitectureComponent],
) -> Vec<(ComponentType, Vec<&ArchitectureComponent>)> {
    let mut groups: Vec<(ComponentType, Vec<&ArchitectureComponent>)> = Vec::new();
    for component in components {
        match groups.iter_mut().find(|(kind, _)| *kind == component.kind) {
            Some((_, members)) => members.push(component),
            None => groups.push((component.kind, vec![component])),
        }
    }
    groups
}
