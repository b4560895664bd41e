//! Record collection from project sources.
//!
//! Scans function directories for literal `/api/...` paths and appends the
//! built-in baseline. Scanning is best effort: a missing root contributes
//! nothing and an unreadable file is logged and skipped.
//!
//! # Directory layout scanned
//!
//! ```text
//! <project>/lambda/
//! ├── get-documents/
//! │   └── index.js     ← every "/api/..." literal becomes a GET endpoint
//! └── chat-handler/
//!     └── index.js     ← POST (fallback)
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, instrument, warn};

use opsdoc_core::{
    application::{ApplicationError, ports::RecordCollector},
    domain::{ApiEndpoint, ApiResponse, HttpMethod, RecordSet},
    error::OpsdocResult,
};

use crate::builtin_records;

/// Source file read from each function directory.
pub const ENTRY_FILE: &str = "index.js";

static ENDPOINT_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"/api/[^\s'"`]+"#).expect("endpoint pattern is a valid literal"));

/// Collects endpoints from function sources plus the built-in baseline.
#[derive(Debug, Clone)]
pub struct ProjectCollector {
    scan_roots: Vec<PathBuf>,
    include_baseline: bool,
}

impl ProjectCollector {
    /// Scan `<project_root>/lambda`.
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self::with_scan_roots([project_root.as_ref().join("lambda")])
    }

    pub fn with_scan_roots(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            scan_roots: roots.into_iter().map(Into::into).collect(),
            include_baseline: true,
        }
    }

    /// Skip the built-in samples (useful for tests of the scanner alone).
    pub fn without_baseline(mut self) -> Self {
        self.include_baseline = false;
        self
    }

    pub fn scan_roots(&self) -> &[PathBuf] {
        &self.scan_roots
    }

    /// Scan every root synchronously, in root order then directory-name order.
    pub fn scan(&self) -> Vec<ApiEndpoint> {
        self.scan_roots
            .iter()
            .flat_map(|root| scan_root(root))
            .collect()
    }
}

#[async_trait]
impl RecordCollector for ProjectCollector {
    #[instrument(skip(self), fields(roots = self.scan_roots.len()))]
    async fn collect(&self) -> OpsdocResult<RecordSet> {
        let collector = self.clone();
        let scanned = tokio::task::spawn_blocking(move || collector.scan())
            .await
            .map_err(|e| ApplicationError::Io {
                path: self.scan_roots.first().cloned().unwrap_or_default(),
                operation: "scan",
                reason: e.to_string(),
            })?;
        debug!(count = scanned.len(), "scanned endpoints");

        let mut records = RecordSet::new(scanned, Vec::new(), Vec::new());
        if self.include_baseline {
            records.extend(builtin_records::baseline());
        }
        Ok(records)
    }
}

fn scan_root(root: &Path) -> Vec<ApiEndpoint> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(root = %root.display(), error = %e, "scan root unavailable");
            return Vec::new();
        }
    };

    let mut functions: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    functions.sort();

    functions
        .iter()
        .flat_map(|dir| scan_function(dir))
        .collect()
}

fn scan_function(dir: &Path) -> Vec<ApiEndpoint> {
    let entry = dir.join(ENTRY_FILE);
    if !entry.is_file() {
        return Vec::new();
    }

    let source = match fs::read_to_string(&entry) {
        Ok(source) => source,
        Err(e) => {
            warn!(
                file  = %entry.display(),
                error = %e,
                "skipping unreadable function source"
            );
            return Vec::new();
        }
    };

    let function = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    ENDPOINT_LITERAL
        .find_iter(&source)
        .map(|m| endpoint_for(m.as_str(), &function))
        .collect()
}

fn endpoint_for(path: &str, function: &str) -> ApiEndpoint {
    ApiEndpoint::new(path, infer_method(function))
        .with_summary(format!("{function} endpoint"))
        .with_description(format!("API endpoint served by {function}"))
        .with_response(ApiResponse::json(200, "Success"))
        .with_tag(infer_tag(path))
        .with_security("BearerAuth")
}

/// Method from the function directory name; POST when nothing matches.
pub fn infer_method(function: &str) -> HttpMethod {
    let has = |needle: &str| function.contains(needle);

    if has("get") || has("list") {
        HttpMethod::Get
    } else if has("create") || has("upload") {
        HttpMethod::Post
    } else if has("update") {
        HttpMethod::Put
    } else if has("delete") {
        HttpMethod::Delete
    } else {
        HttpMethod::Post
    }
}

pub fn infer_tag(path: &str) -> &'static str {
    const TAGS: [(&str, &str); 4] = [
        ("/auth", "Authentication"),
        ("/chat", "Chat"),
        ("/document", "Documents"),
        ("/user", "Users"),
    ];

    TAGS.iter()
        .find(|(needle, _)| path.contains(needle))
        .map_or("Other", |&(_, tag)| tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn function(root: &Path, name: &str, source: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(ENTRY_FILE), source).unwrap();
    }

    #[test]
    fn infers_methods_from_function_names() {
        assert_eq!(infer_method("list-documents"), HttpMethod::Get);
        assert_eq!(infer_method("upload-file"), HttpMethod::Post);
        assert_eq!(infer_method("update-user"), HttpMethod::Put);
        assert_eq!(infer_method("delete-session"), HttpMethod::Delete);
        assert_eq!(infer_method("chat-handler"), HttpMethod::Post);
    }

    #[test]
    fn infers_tags_from_paths() {
        assert_eq!(infer_tag("/api/auth/refresh"), "Authentication");
        assert_eq!(infer_tag("/api/documents/42"), "Documents");
        assert_eq!(infer_tag("/api/users/me"), "Users");
        assert_eq!(infer_tag("/api/health"), "Other");
    }

    #[test]
    fn extracts_literals_in_directory_order() {
        let temp = TempDir::new().unwrap();
        function(
            temp.path(),
            "b-delete-document",
            "router.delete('/api/documents/:id', handler);",
        );
        function(
            temp.path(),
            "a-get-user",
            "const url = `/api/users/me`; fetch(\"/api/auth/check\")",
        );
        // no entry file: ignored
        fs::create_dir_all(temp.path().join("c-empty")).unwrap();

        let endpoints = ProjectCollector::with_scan_roots([temp.path()]).scan();
        let routes: Vec<_> = endpoints
            .iter()
            .map(|e| (e.method, e.path.as_str(), e.tags[0].as_str()))
            .collect();

        assert_eq!(
            routes,
            vec![
                (HttpMethod::Get, "/api/users/me", "Users"),
                (HttpMethod::Get, "/api/auth/check", "Authentication"),
                (HttpMethod::Delete, "/api/documents/:id", "Documents"),
            ]
        );
        assert!(endpoints.iter().all(|e| e.security == ["BearerAuth"]));
        assert!(endpoints.iter().all(|e| e.responses[0].status_code == 200));
    }

    #[tokio::test]
    async fn missing_root_yields_only_baseline() {
        let temp = TempDir::new().unwrap();
        let collector = ProjectCollector::new(temp.path());

        let records = collector.collect().await.unwrap();

        assert_eq!(records, builtin_records::baseline());
    }

    #[tokio::test]
    async fn scanned_endpoints_precede_baseline() {
        let temp = TempDir::new().unwrap();
        function(&temp.path().join("lambda"), "list-chats", "'/api/chat/history'");

        let records = ProjectCollector::new(temp.path()).collect().await.unwrap();

        assert_eq!(records.endpoints.len(), 5);
        assert_eq!(records.endpoints[0].path, "/api/chat/history");
        assert_eq!(records.endpoints[0].tags, ["Chat"]);
        assert_eq!(records.components.len(), 12);
    }

    #[tokio::test]
    async fn without_baseline_returns_scan_only() {
        let temp = TempDir::new().unwrap();
        let records = ProjectCollector::new(temp.path())
            .without_baseline()
            .collect()
            .await
            .unwrap();

        assert!(records.is_empty());
    }
}
