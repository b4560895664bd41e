//! Architecture graph records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_objects::ComponentType;

/// A node of the architecture graph.
///
/// `connections` holds ids of other components. The graph may contain
/// cycles and dangling ids; nothing here validates or traverses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureComponent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub description: String,
    pub technology: String,
    #[serde(default)]
    pub connections: Vec<String>,
    /// Insertion-ordered free-form properties.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl ArchitectureComponent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ComponentType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: String::new(),
            technology: String::new(),
            connections: Vec::new(),
            properties: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = technology.into();
        self
    }

    pub fn connects_to(mut self, id: impl Into<String>) -> Self {
        self.connections.push(id.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Render a property value the way it reads in prose: strings unquoted,
/// arrays comma-joined, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn properties_keep_insertion_order() {
        let component = ArchitectureComponent::new("fsx", "FSx", ComponentType::Storage)
            .with_property("protocol", "NFS/SMB")
            .with_property("deduplication", true)
            .with_property("compression", true);

        let keys: Vec<_> = component.properties.keys().cloned().collect();
        assert_eq!(keys, vec!["protocol", "deduplication", "compression"]);
    }

    #[test]
    fn display_value_flattens_arrays_and_strings() {
        assert_eq!(display_value(&json!("nodejs20.x")), "nodejs20.x");
        assert_eq!(display_value(&json!(["Claude", "Titan"])), "Claude,Titan");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(3008)), "3008");
    }
}
