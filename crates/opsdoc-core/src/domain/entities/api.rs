//! API surface records: endpoints, parameters, bodies and responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::{HttpMethod, ParameterLocation};

// ── ApiEndpoint ──────────────────────────────────────────────────────────────

/// One documented HTTP endpoint.
///
/// Identity is `(path, method)`. Tags are non-unique grouping labels; an
/// endpoint with several tags is listed under each of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    pub path: String,
    pub method: HttpMethod,
    pub summary: String,
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ApiParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<ApiRequestBody>,
    #[serde(default)]
    pub responses: Vec<ApiResponse>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub security: Vec<String>,
}

impl ApiEndpoint {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            summary: String::new(),
            description: String::new(),
            parameters: Vec::new(),
            request_body: None,
            responses: Vec::new(),
            tags: Vec::new(),
            security: Vec::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parameter(mut self, parameter: ApiParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_request_body(mut self, body: ApiRequestBody) -> Self {
        self.request_body = Some(body);
        self
    }

    pub fn with_response(mut self, response: ApiResponse) -> Self {
        self.responses.push(response);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_security(mut self, scheme: impl Into<String>) -> Self {
        self.security.push(scheme.into());
        self
    }

    /// `true` when both endpoints describe the same `(path, method)` pair.
    pub fn same_route(&self, other: &ApiEndpoint) -> bool {
        self.path == other.path && self.method == other.method
    }
}

// ── ApiParameter ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl ApiParameter {
    pub fn new(
        name: impl Into<String>,
        location: ParameterLocation,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            required: false,
            kind: kind.into(),
            description: String::new(),
            example: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }
}

// ── ApiRequestBody ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequestBody {
    pub description: String,
    pub content_type: String,
    pub schema: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl ApiRequestBody {
    pub fn new(description: impl Into<String>, content_type: impl Into<String>, schema: Value) -> Self {
        Self {
            description: description.into(),
            content_type: content_type.into(),
            schema,
            example: None,
        }
    }

    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }
}

// ── ApiResponse ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl ApiResponse {
    pub fn new(status_code: u16, description: impl Into<String>) -> Self {
        Self {
            status_code,
            description: description.into(),
            content_type: None,
            schema: None,
            example: None,
        }
    }

    /// A JSON response (`application/json`).
    pub fn json(status_code: u16, description: impl Into<String>) -> Self {
        Self::new(status_code, description).with_content_type("application/json")
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_accumulates_fields() {
        let endpoint = ApiEndpoint::new("/api/documents", HttpMethod::Get)
            .with_summary("List documents")
            .with_parameter(ApiParameter::new("page", ParameterLocation::Query, "integer"))
            .with_response(ApiResponse::json(200, "Document list"))
            .with_tag("Documents")
            .with_security("BearerAuth");

        assert_eq!(endpoint.parameters.len(), 1);
        assert_eq!(endpoint.responses[0].content_type.as_deref(), Some("application/json"));
        assert_eq!(endpoint.tags, vec!["Documents"]);
        assert!(endpoint.request_body.is_none());
    }

    #[test]
    fn identity_is_path_and_method() {
        let get = ApiEndpoint::new("/api/documents", HttpMethod::Get);
        let post = ApiEndpoint::new("/api/documents", HttpMethod::Post);
        let get_again = ApiEndpoint::new("/api/documents", HttpMethod::Get).with_summary("x");

        assert!(!get.same_route(&post));
        assert!(get.same_route(&get_again));
    }

    #[test]
    fn parameter_serializes_with_wire_names() {
        let param = ApiParameter::new("limit", ParameterLocation::Query, "integer")
            .with_example(json!(20));
        let value = serde_json::to_value(&param).unwrap();

        assert_eq!(value["in"], "query");
        assert_eq!(value["type"], "integer");
        assert_eq!(value["example"], 20);
    }
}
