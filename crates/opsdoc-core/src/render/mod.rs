//! Renderers: pure functions from records to text.
//!
//! Nothing in here performs I/O or reads the clock. The only time-dependent
//! input is [`RenderContext::generated_at`], and leaving it `None` makes every
//! renderer byte-deterministic.

pub mod api_html;
pub mod api_markdown;
pub mod architecture;
pub mod index;
pub mod mermaid;
pub mod openapi;
pub mod operations;
pub mod test_reports;

use chrono::{DateTime, Utc};

use crate::domain::{ApiEndpoint, GenerationConfig};

/// Values every renderer may interpolate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub project_name: String,
    pub version: String,
    pub generated_at: Option<DateTime<Utc>>,
    pub include_code_examples: bool,
}

impl RenderContext {
    pub fn new(project_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            version: version.into(),
            generated_at: None,
            include_code_examples: true,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.project_name(), config.version())
            .with_code_examples(config.features().include_code_examples)
    }

    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    pub fn with_code_examples(mut self, enabled: bool) -> Self {
        self.include_code_examples = enabled;
        self
    }

    /// `Generated: ...` stamp, if a clock value was supplied.
    pub fn generated_stamp(&self) -> Option<String> {
        self.generated_at.map(|at| format_timestamp(&at))
    }
}

pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Escape `& < > " ' /` for safe interpolation into HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

/// Group endpoints by tag, tags in first-seen order.
///
/// An endpoint with several tags appears in each group.
pub fn group_by_tag(endpoints: &[ApiEndpoint]) -> Vec<(&str, Vec<&ApiEndpoint>)> {
    let mut groups: Vec<(&str, Vec<&ApiEndpoint>)> = Vec::new();
    for endpoint in endpoints {
        for tag in &endpoint.tags {
            match groups.iter_mut().find(|(t, _)| *t == tag.as_str()) {
                Some((_, members)) => members.push(endpoint),
                None => groups.push((tag.as_str(), vec![endpoint])),
            }
        }
    }
    groups
}

/// Markdown/HTML anchor for a heading.
pub fn anchor(heading: &str) -> String {
    heading
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

/// Line-oriented string builder shared by the renderers.
#[derive(Debug, Default)]
pub(crate) struct Doc(String);

impl Doc {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.0.push_str(text.as_ref());
        self.0.push('\n');
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.0.push('\n');
        self
    }

    /// A line followed by a blank line.
    pub(crate) fn para(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(text).blank()
    }

    pub(crate) fn push(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.0.push_str(text.as_ref());
        self
    }

    /// Fenced code block.
    pub(crate) fn fence(&mut self, lang: &str, body: &str) -> &mut Self {
        self.line(format!("```{lang}"));
        self.line(body.trim_end_matches('\n'));
        self.line("```").blank()
    }

    pub(crate) fn finish(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HttpMethod;
    use chrono::TimeZone;

    #[test]
    fn escapes_script_tags() {
        assert_eq!(
            escape_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;&#x2F;script&gt;"
        );
    }

    #[test]
    fn escapes_every_special_character() {
        assert_eq!(escape_html(r#"&<>"'/"#), "&amp;&lt;&gt;&quot;&#x27;&#x2F;");
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn groups_in_first_seen_order() {
        let endpoints = vec![
            ApiEndpoint::new("/a", HttpMethod::Get).with_tag("Chat"),
            ApiEndpoint::new("/b", HttpMethod::Get).with_tag("Auth").with_tag("Chat"),
            ApiEndpoint::new("/c", HttpMethod::Get).with_tag("Auth"),
        ];

        let groups = group_by_tag(&endpoints);
        let tags: Vec<_> = groups.iter().map(|(t, _)| *t).collect();
        assert_eq!(tags, vec!["Chat", "Auth"]);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn anchors_are_lowercase_and_dashed() {
        assert_eq!(anchor("Document Management"), "document-management");
    }

    #[test]
    fn stamp_only_with_clock() {
        let ctx = RenderContext::new("Docs", "1.0.0");
        assert_eq!(ctx.generated_stamp(), None);

        let at = Utc.with_ymd_and_hms(2024, 12, 21, 10, 30, 0).unwrap();
        let ctx = ctx.with_generated_at(at);
        assert_eq!(ctx.generated_stamp().as_deref(), Some("2024-12-21 10:30:00 UTC"));
    }
}
