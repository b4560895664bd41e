//! Mermaid flowchart of the architecture graph.
//!
//! Edges are written straight from each component's adjacency list. There is
//! no traversal, so cycles and dangling targets render as-is.

use super::Doc;
use crate::domain::{ArchitectureComponent, ComponentType};

pub const CLASS_FILLS: [(ComponentType, &str); 6] = [
    (ComponentType::Service, "#e1f5fe"),
    (ComponentType::Database, "#f3e5f5"),
    (ComponentType::Storage, "#e8f5e8"),
    (ComponentType::Network, "#fff3e0"),
    (ComponentType::Security, "#ffebee"),
    (ComponentType::Monitoring, "#f1f8e9"),
];

/// Opening and closing bracket for a component type.
pub fn glyph(kind: ComponentType) -> (&'static str, &'static str) {
    match kind {
        ComponentType::Service => ("[", "]"),
        ComponentType::Database => ("[(", ")]"),
        ComponentType::Storage => ("[/", "/]"),
        ComponentType::Network => ("(", ")"),
        ComponentType::Security => ("{", "}"),
        ComponentType::Monitoring => ("((", "))"),
    }
}

fn label(component: &ArchitectureComponent) -> String {
    let text = if component.technology.is_empty() {
        component.name.clone()
    } else {
        format!("{}<br/>{}", component.name, component.technology)
    };
    text.replace('"', "#quot;")
}

pub fn render(components: &[ArchitectureComponent]) -> String {
    let mut doc = Doc::new();
    doc.line("graph TB");

    for component in components {
        let (open, close) = glyph(component.kind);
        doc.line(format!(
            "    {}{open}\"{}\"{close}",
            component.id,
            label(component)
        ));
    }
    doc.blank();

    for component in components {
        for target in &component.connections {
            doc.line(format!("    {} --> {}", component.id, target));
        }
    }
    doc.blank();

    for (kind, fill) in CLASS_FILLS {
        doc.line(format!("    classDef {kind} fill:{fill}"));
    }
    for component in components {
        doc.line(format!("    class {} {}", component.id, component.kind));
    }

    doc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cyclic() -> Vec<ArchitectureComponent> {
        vec![
            ArchitectureComponent::new("a", "Gateway", ComponentType::Network).connects_to("b"),
            ArchitectureComponent::new("b", "Api", ComponentType::Service)
                .with_technology("Lambda")
                .connects_to("a")
                .connects_to("c"),
            ArchitectureComponent::new("c", "Table", ComponentType::Database),
            ArchitectureComponent::new("d", "Bucket", ComponentType::Storage),
            ArchitectureComponent::new("e", "Logs", ComponentType::Monitoring).connects_to("b"),
        ]
    }

    #[test]
    fn cycle_renders_both_edges_once() {
        let out = render(&cyclic());

        assert_eq!(out.matches("    a --> b\n").count(), 1);
        assert_eq!(out.matches("    b --> a\n").count(), 1);
        assert_eq!(out.matches(" --> ").count(), 4);
    }

    #[test]
    fn one_node_and_class_per_component() {
        let out = render(&cyclic());

        assert!(out.starts_with("graph TB\n"));
        assert!(out.contains("    a(\"Gateway\")\n"));
        assert!(out.contains("    b[\"Api<br/>Lambda\"]\n"));
        assert!(out.contains("    c[(\"Table\")]\n"));
        assert!(out.contains("    d[/\"Bucket\"/]\n"));
        assert!(out.contains("    e((\"Logs\"))\n"));
        assert_eq!(out.matches("    class ").count(), 5);
        assert!(out.contains("    class c database\n"));
    }

    #[test]
    fn every_type_gets_a_distinct_glyph() {
        let mut seen: Vec<_> = ComponentType::ALL.iter().map(|k| glyph(*k)).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn quotes_in_labels_are_entity_encoded() {
        let components = vec![ArchitectureComponent::new(
            "x",
            "The \"main\" API",
            ComponentType::Security,
        )];
        let out = render(&components);
        assert!(out.contains("x{\"The #quot;main#quot; API\"}"));
    }

    #[test]
    fn class_definitions_cover_all_types() {
        let out = render(&[]);
        assert!(out.contains("    classDef service fill:#e1f5fe\n"));
        assert!(out.contains("    classDef monitoring fill:#f1f8e9\n"));
        assert_eq!(out.matches("classDef").count(), 6);
    }
}
