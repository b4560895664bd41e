//! API reference as Markdown (`api/README.md`).

use super::{Doc, RenderContext, anchor, group_by_tag};
use crate::domain::{ApiEndpoint, ApiParameter, ApiRequestBody, ApiResponse};

pub fn render(endpoints: &[ApiEndpoint], ctx: &RenderContext) -> String {
    let mut doc = Doc::new();
    doc.para(format!("# {} API Documentation", ctx.project_name));
    doc.line(format!("Version: {}", ctx.version));
    if let Some(stamp) = ctx.generated_stamp() {
        doc.line(format!("Generated: {stamp}"));
    }
    doc.blank();

    let groups = group_by_tag(endpoints);

    doc.para("## Contents");
    doc.line("- [Authentication](#authentication)");
    for (tag, _) in &groups {
        doc.line(format!("- [{tag}](#{})", anchor(tag)));
    }
    doc.blank();

    doc.para("## Authentication");
    doc.para("This API uses Bearer token authentication.");
    doc.fence("", "Authorization: Bearer <your-token>");

    for (tag, members) in &groups {
        doc.para(format!("## {tag}"));
        for endpoint in members {
            render_endpoint(&mut doc, endpoint, ctx);
        }
    }

    doc.finish()
}

fn render_endpoint(doc: &mut Doc, endpoint: &ApiEndpoint, ctx: &RenderContext) {
    doc.para(format!("### {} {}", endpoint.method, endpoint.path));
    if !endpoint.summary.is_empty() {
        doc.para(format!("**{}**", endpoint.summary));
    }
    if !endpoint.description.is_empty() {
        doc.para(&endpoint.description);
    }
    if !endpoint.security.is_empty() {
        doc.para(format!("**Security:** {}", endpoint.security.join(", ")));
    }

    if !endpoint.parameters.is_empty() {
        render_parameters(doc, &endpoint.parameters);
    }

    if let Some(body) = &endpoint.request_body {
        render_request_body(doc, body, ctx);
    }

    doc.para("#### Responses");
    for response in &endpoint.responses {
        render_response(doc, response, ctx);
    }

    doc.para("---");
}

fn render_parameters(doc: &mut Doc, parameters: &[ApiParameter]) {
    doc.para("#### Parameters");
    doc.line("| Name | In | Required | Type | Description |");
    doc.line("|------|----|----------|------|-------------|");
    for p in parameters {
        doc.line(format!(
            "| {} | {} | {} | {} | {} |",
            p.name,
            p.location,
            if p.required { "✓" } else { "" },
            p.kind,
            p.description
        ));
    }
    doc.blank();
}

fn render_request_body(doc: &mut Doc, body: &ApiRequestBody, ctx: &RenderContext) {
    doc.para("#### Request Body");
    doc.para(format!("**Content-Type:** {}", body.content_type));
    if !body.description.is_empty() {
        doc.para(&body.description);
    }
    if let (true, Some(example)) = (ctx.include_code_examples, &body.example) {
        doc.para("**Example:**");
        doc.fence("json", &format!("{example:#}"));
    }
}

fn render_response(doc: &mut Doc, response: &ApiResponse, ctx: &RenderContext) {
    doc.para(format!("**{}** - {}", response.status_code, response.description));
    if let (true, Some(example)) = (ctx.include_code_examples, &response.example) {
        doc.fence("json", &format!("{example:#}"));
    }
}
