//! API reference as a standalone HTML page (`api/index.html`).
//!
//! Mirrors the Markdown layout. Every interpolated value goes through
//! [`escape_html`]; the only unescaped text is the static markup below.

use super::{Doc, RenderContext, anchor, escape_html, group_by_tag};
use crate::domain::ApiEndpoint;

const STYLE: &str = r#"    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; padding: 20px; }
        .container { max-width: 1200px; margin: 0 auto; }
        .header { background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 30px; }
        .nav a { margin-right: 20px; }
        .endpoint { border: 1px solid #e9ecef; border-radius: 8px; margin-bottom: 20px; overflow: hidden; }
        .endpoint-header { background: #f5f5f5; padding: 15px; }
        .endpoint-body { padding: 20px; }
        .method { display: inline-block; padding: 4px 8px; border-radius: 4px; color: white; font-weight: bold; margin-right: 10px; }
        .method.GET { background: #28a745; }
        .method.POST { background: #007bff; }
        .method.PUT { background: #ffc107; color: #212529; }
        .method.DELETE { background: #dc3545; }
        .method.PATCH { background: #6f42c1; }
        table { width: 100%; border-collapse: collapse; margin: 15px 0; }
        th, td { border: 1px solid #dee2e6; padding: 8px 12px; text-align: left; }
        th { background: #f8f9fa; }
        pre { background: #f8f9fa; border: 1px solid #e9ecef; border-radius: 4px; padding: 15px; overflow-x: auto; }
    </style>"#;

pub fn render(endpoints: &[ApiEndpoint], ctx: &RenderContext) -> String {
    let title = escape_html(&format!("{} API Documentation", ctx.project_name));
    let groups = group_by_tag(endpoints);

    let mut doc = Doc::new();
    doc.line("<!DOCTYPE html>");
    doc.line("<html lang=\"en\">");
    doc.line("<head>");
    doc.line("    <meta charset=\"UTF-8\">");
    doc.line("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    doc.line(format!("    <title>{title}</title>"));
    doc.line(STYLE);
    doc.line("</head>");
    doc.line("<body>");
    doc.line("    <div class=\"container\">");

    doc.line("        <div class=\"header\">");
    doc.line(format!("            <h1>{title}</h1>"));
    let mut meta = format!("Version: {}", escape_html(&ctx.version));
    if let Some(stamp) = ctx.generated_stamp() {
        meta.push_str(&format!(" | Generated: {}", escape_html(&stamp)));
    }
    doc.line(format!("            <p>{meta}</p>"));
    doc.line("        </div>");

    doc.line("        <div class=\"nav\">");
    for (tag, _) in &groups {
        doc.line(format!(
            "            <a href=\"#{}\">{}</a>",
            escape_html(&anchor(tag)),
            escape_html(tag)
        ));
    }
    doc.line("        </div>");

    doc.line("        <h2 id=\"authentication\">Authentication</h2>");
    doc.line("        <p>This API uses Bearer token authentication.</p>");
    doc.line("        <pre>Authorization: Bearer &lt;your-token&gt;</pre>");

    for (tag, members) in &groups {
        doc.line(format!(
            "        <h2 id=\"{}\">{}</h2>",
            escape_html(&anchor(tag)),
            escape_html(tag)
        ));
        for endpoint in members {
            render_endpoint(&mut doc, endpoint, ctx);
        }
    }

    doc.line("    </div>");
    doc.line("</body>");
    doc.line("</html>");
    doc.finish()
}

fn render_endpoint(doc: &mut Doc, endpoint: &ApiEndpoint, ctx: &RenderContext) {
    doc.line("        <div class=\"endpoint\">");
    doc.line("            <div class=\"endpoint-header\">");
    doc.line(format!(
        "                <span class=\"method {m}\">{m}</span>",
        m = endpoint.method
    ));
    doc.line(format!(
        "                <strong>{}</strong>",
        escape_html(&endpoint.path)
    ));
    if !endpoint.summary.is_empty() {
        doc.line(format!("                <p>{}</p>", escape_html(&endpoint.summary)));
    }
    doc.line("            </div>");
    doc.line("            <div class=\"endpoint-body\">");
    if !endpoint.description.is_empty() {
        doc.line(format!("                <p>{}</p>", escape_html(&endpoint.description)));
    }

    if !endpoint.parameters.is_empty() {
        doc.line("                <h4>Parameters</h4>");
        doc.line("                <table>");
        doc.line("                    <tr><th>Name</th><th>In</th><th>Required</th><th>Type</th><th>Description</th></tr>");
        for p in &endpoint.parameters {
            doc.line(format!(
                "                    <tr><td><code>{}</code></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&p.name),
                p.location,
                if p.required { "✓" } else { "" },
                escape_html(&p.kind),
                escape_html(&p.description)
            ));
        }
        doc.line("                </table>");
    }

    if let Some(body) = &endpoint.request_body {
        doc.line("                <h4>Request Body</h4>");
        doc.line(format!(
            "                <p><strong>Content-Type:</strong> {}</p>",
            escape_html(&body.content_type)
        ));
        if !body.description.is_empty() {
            doc.line(format!("                <p>{}</p>", escape_html(&body.description)));
        }
        if let (true, Some(example)) = (ctx.include_code_examples, &body.example) {
            doc.line(format!(
                "                <pre><code>{}</code></pre>",
                escape_html(&format!("{example:#}"))
            ));
        }
    }

    doc.line("                <h4>Responses</h4>");
    for response in &endpoint.responses {
        doc.line(format!(
            "                <p><strong>{}</strong> - {}</p>",
            response.status_code,
            escape_html(&response.description)
        ));
        if let (true, Some(example)) = (ctx.include_code_examples, &response.example) {
            doc.line(format!(
                "                <pre><code>{}</code></pre>",
                escape_html(&format!("{example:#}"))
            ));
        }
    }

    doc.line("            </div>");
    doc.line("        </div>");
}
