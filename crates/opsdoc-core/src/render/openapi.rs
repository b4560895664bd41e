//! OpenAPI 3.0.3 document (`api/openapi.json`).
//!
//! Key order is part of the output contract: `serde_json` is built with
//! `preserve_order`, so objects serialize in insertion order. Absent optional
//! members are left out rather than emitted as `null`.

use serde_json::{Map, Value, json};

use super::RenderContext;
use crate::application::ApplicationError;
use crate::domain::{ApiEndpoint, ApiParameter, ApiRequestBody, ApiResponse};
use crate::error::OpsdocResult;

pub const OPENAPI_VERSION: &str = "3.0.3";

/// Build the OpenAPI document as a JSON value.
pub fn document(endpoints: &[ApiEndpoint], ctx: &RenderContext) -> Value {
    let mut paths = Map::new();
    for endpoint in endpoints {
        let entry = paths
            .entry(endpoint.path.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(methods) = entry {
            methods.insert(endpoint.method.as_lower().to_string(), operation(endpoint));
        }
    }

    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": format!("{} API", ctx.project_name),
            "version": ctx.version,
            "description": format!("{} API documentation", ctx.project_name),
        },
        "servers": [
            { "url": "https://api.example.com", "description": "Production" },
            { "url": "https://staging-api.example.com", "description": "Staging" },
        ],
        "components": {
            "securitySchemes": {
                "BearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" },
            },
        },
        "paths": paths,
    })
}

/// Pretty-printed (two-space) JSON text.
pub fn render(endpoints: &[ApiEndpoint], ctx: &RenderContext) -> OpsdocResult<String> {
    serde_json::to_string_pretty(&document(endpoints, ctx)).map_err(|e| {
        ApplicationError::Render {
            artifact: "api/openapi.json".into(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn operation(endpoint: &ApiEndpoint) -> Value {
    let mut op = Map::new();
    op.insert("summary".into(), endpoint.summary.clone().into());
    op.insert("description".into(), endpoint.description.clone().into());
    op.insert("tags".into(), json!(endpoint.tags));
    op.insert(
        "parameters".into(),
        Value::Array(endpoint.parameters.iter().map(parameter).collect()),
    );
    if let Some(body) = &endpoint.request_body {
        op.insert("requestBody".into(), request_body(body));
    }

    let mut responses = Map::new();
    for r in &endpoint.responses {
        responses.insert(r.status_code.to_string(), response(r));
    }
    op.insert("responses".into(), Value::Object(responses));

    if !endpoint.security.is_empty() {
        let requirements = endpoint
            .security
            .iter()
            .map(|scheme| {
                let mut requirement = Map::new();
                requirement.insert(scheme.clone(), json!([]));
                Value::Object(requirement)
            })
            .collect();
        op.insert("security".into(), Value::Array(requirements));
    }

    Value::Object(op)
}

fn parameter(p: &ApiParameter) -> Value {
    let mut out = Map::new();
    out.insert("name".into(), p.name.clone().into());
    out.insert("in".into(), p.location.as_str().into());
    out.insert("required".into(), p.required.into());
    out.insert("schema".into(), json!({ "type": p.kind }));
    out.insert("description".into(), p.description.clone().into());
    if let Some(example) = &p.example {
        out.insert("example".into(), example.clone());
    }
    Value::Object(out)
}

fn request_body(body: &ApiRequestBody) -> Value {
    let mut media = Map::new();
    media.insert("schema".into(), body.schema.clone());
    if let Some(example) = &body.example {
        media.insert("example".into(), example.clone());
    }

    let mut content = Map::new();
    content.insert(body.content_type.clone(), Value::Object(media));

    json!({
        "description": body.description,
        "content": content,
    })
}

fn response(r: &ApiResponse) -> Value {
    let mut out = Map::new();
    out.insert("description".into(), r.description.clone().into());
    if let Some(content_type) = &r.content_type {
        let mut media = Map::new();
        if let Some(schema) = &r.schema {
            media.insert("schema".into(), schema.clone());
        }
        if let Some(example) = &r.example {
            media.insert("example".into(), example.clone());
        }
        let mut content = Map::new();
        content.insert(content_type.clone(), Value::Object(media));
        out.insert("content".into(), Value::Object(content));
    }
    Value::Object(out)
}
