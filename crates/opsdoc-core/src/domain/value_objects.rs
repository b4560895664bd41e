//! Domain value objects: HttpMethod, ParameterLocation, ComponentType,
//! OutputFormat, FailurePolicy.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each carries its canonical string form (`as_str`), a `Display` impl and a
//! forgiving `FromStr` parser for configuration input.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── HttpMethod ───────────────────────────────────────────────────────────────

/// HTTP method of a documented endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Lower-case name used as the operation key in OpenAPI `paths`.
    pub const fn as_lower(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            other => Err(DomainError::InvalidHttpMethod {
                value: other.to_string(),
            }),
        }
    }
}

// ── ParameterLocation ────────────────────────────────────────────────────────

/// Where an API parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Path => "path",
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ComponentType ────────────────────────────────────────────────────────────

/// Kind of an architecture component. Drives the Mermaid node shape and the
/// CSS-like class applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Service,
    Database,
    Storage,
    Network,
    Security,
    Monitoring,
}

impl ComponentType {
    pub const ALL: [ComponentType; 6] = [
        Self::Service,
        Self::Database,
        Self::Storage,
        Self::Network,
        Self::Security,
        Self::Monitoring,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Database => "database",
            Self::Storage => "storage",
            Self::Network => "network",
            Self::Security => "security",
            Self::Monitoring => "monitoring",
        }
    }

    /// Heading used when components are grouped by type.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Service => "Services",
            Self::Database => "Databases",
            Self::Storage => "Storage",
            Self::Network => "Network",
            Self::Security => "Security",
            Self::Monitoring => "Monitoring",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── OutputFormat ─────────────────────────────────────────────────────────────

/// An output format the user may enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Html,
    Json,
}

impl OutputFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Json => "json",
        }
    }

    /// Parse a comma-separated list such as `markdown,html`.
    ///
    /// Blank entries are ignored; an empty result is `NoFormats`.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, DomainError> {
        let mut formats = Vec::new();
        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let format = part.parse::<Self>()?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        if formats.is_empty() {
            return Err(DomainError::NoFormats);
        }
        Ok(formats)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(DomainError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

// ── FailurePolicy ────────────────────────────────────────────────────────────

/// How a batch of generation tasks reacts to individual failures.
///
/// Both policies wait for every task to settle before deciding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Raise one aggregate error naming every failed task.
    AbortOnAnyFailure,
    /// Hand back every result, mixed success and failure.
    TolerateAndReport,
}

impl FailurePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AbortOnAnyFailure => "abort",
            Self::TolerateAndReport => "tolerate",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" | "abort-on-any-failure" | "abortonanyfailure" => Ok(Self::AbortOnAnyFailure),
            "tolerate" | "tolerate-and-report" | "tolerateandreport" => {
                Ok(Self::TolerateAndReport)
            }
            other => Err(DomainError::InvalidFailurePolicy {
                value: other.to_string(),
            }),
        }
    }
}
