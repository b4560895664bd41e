//! Path sandbox: validates relative output paths and resolves them under a
//! root directory.
//!
//! Resolution is purely lexical. Nothing here touches the filesystem, so
//! symlinks are not followed and the result is deterministic for a given
//! `(root, input)` pair.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

// ── Forbidden patterns ───────────────────────────────────────────────────────

/// A class of input that is never accepted as an output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForbiddenPattern {
    /// `..` anywhere in the input.
    ParentTraversal,
    /// `~` anywhere in the input.
    HomeReference,
    /// A NUL byte.
    NulByte,
    /// One of `< > : " | ? *`.
    ReservedCharacter,
    /// A leading `/`.
    AbsolutePath,
    /// A `\` anywhere in the input.
    Backslash,
}

impl ForbiddenPattern {
    pub const ALL: [ForbiddenPattern; 6] = [
        Self::ParentTraversal,
        Self::HomeReference,
        Self::NulByte,
        Self::ReservedCharacter,
        Self::AbsolutePath,
        Self::Backslash,
    ];

    pub fn matches(&self, input: &str) -> bool {
        match self {
            Self::ParentTraversal => input.contains(".."),
            Self::HomeReference => input.contains('~'),
            Self::NulByte => input.contains('\0'),
            Self::ReservedCharacter => input.contains(['<', '>', ':', '"', '|', '?', '*']),
            Self::AbsolutePath => input.starts_with('/'),
            Self::Backslash => input.contains('\\'),
        }
    }

    pub const fn describe(&self) -> &'static str {
        match self {
            Self::ParentTraversal => "parent-directory traversal",
            Self::HomeReference => "home-directory reference",
            Self::NulByte => "NUL byte",
            Self::ReservedCharacter => "reserved filename character",
            Self::AbsolutePath => "absolute path",
            Self::Backslash => "backslash",
        }
    }
}

// ── Violations ───────────────────────────────────────────────────────────────

/// Why the sandbox rejected a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityViolation {
    EmptyPath,
    Forbidden(ForbiddenPattern),
    EscapesRoot,
    TooLong { length: usize, max: usize },
}

impl SecurityViolation {
    /// Short phrase completing "the path was rejected because it ...".
    pub fn describe(&self) -> String {
        match self {
            Self::EmptyPath => "is empty".into(),
            Self::Forbidden(pattern) => format!("contains a {}", pattern.describe()),
            Self::EscapesRoot => "resolves outside the root directory".into(),
            Self::TooLong { length, max } => {
                format!("is {length} characters long (limit {max})")
            }
        }
    }
}

impl fmt::Display for SecurityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPath => f.write_str("invalid path specified"),
            Self::Forbidden(pattern) => write!(f, "forbidden pattern ({})", pattern.describe()),
            Self::EscapesRoot => f.write_str("access outside the root directory is forbidden"),
            Self::TooLong { length, max } => write!(f, "path too long ({length} > {max})"),
        }
    }
}

// ── Policy ───────────────────────────────────────────────────────────────────

/// Immutable sandbox configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxPolicy {
    max_path_length: usize,
    forbidden: Vec<ForbiddenPattern>,
}

impl SandboxPolicy {
    pub const DEFAULT_MAX_PATH_LENGTH: usize = 260;

    pub fn new(max_path_length: usize, forbidden: Vec<ForbiddenPattern>) -> Self {
        Self {
            max_path_length,
            forbidden,
        }
    }

    pub fn with_max_path_length(mut self, max: usize) -> Self {
        self.max_path_length = max;
        self
    }

    pub fn max_path_length(&self) -> usize {
        self.max_path_length
    }

    pub fn forbidden(&self) -> &[ForbiddenPattern] {
        &self.forbidden
    }
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_PATH_LENGTH, ForbiddenPattern::ALL.to_vec())
    }
}

// ── Sandbox ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct PathSandbox {
    policy: SandboxPolicy,
}

impl PathSandbox {
    pub fn new(policy: SandboxPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SandboxPolicy {
        &self.policy
    }

    /// Resolve `input` under `root`.
    ///
    /// # Errors
    ///
    /// `DomainError::Security` when the input is blank, matches a forbidden
    /// pattern, normalizes to a path outside `root`, or exceeds the maximum
    /// length.
    pub fn resolve(&self, root: &Path, input: &str) -> Result<PathBuf, DomainError> {
        let reject = |violation| DomainError::Security {
            path: input.to_string(),
            violation,
        };

        if input.trim().is_empty() {
            return Err(reject(SecurityViolation::EmptyPath));
        }

        if let Some(pattern) = self.policy.forbidden.iter().find(|p| p.matches(input)) {
            return Err(reject(SecurityViolation::Forbidden(*pattern)));
        }

        let root = normalize(root);
        let resolved = normalize(&root.join(input));

        if !resolved.starts_with(&root) {
            return Err(reject(SecurityViolation::EscapesRoot));
        }

        let length = resolved.to_string_lossy().chars().count();
        if length > self.policy.max_path_length {
            return Err(reject(SecurityViolation::TooLong {
                length,
                max: self.policy.max_path_length,
            }));
        }

        Ok(resolved)
    }
}

/// Lexical normalization: drops `.` and folds `..` into its parent.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sandbox() -> PathSandbox {
        PathSandbox::default()
    }

    fn violation(result: Result<PathBuf, DomainError>) -> SecurityViolation {
        match result {
            Err(DomainError::Security { violation, .. }) => violation,
            other => panic!("expected security error, got {other:?}"),
        }
    }

    #[test]
    fn resolves_simple_relative_path() {
        let resolved = sandbox()
            .resolve(Path::new("/project"), "generated-docs")
            .unwrap();
        assert_eq!(resolved, PathBuf::from("/project/generated-docs"));
    }

    #[test]
    fn drops_current_dir_components() {
        let resolved = sandbox()
            .resolve(Path::new("/project"), "./docs/./api/README.md")
            .unwrap();
        assert_eq!(resolved, PathBuf::from("/project/docs/api/README.md"));
    }

    #[test]
    fn rejects_each_forbidden_pattern() {
        let root = Path::new("/project");
        let cases = [
            ("../evil", ForbiddenPattern::ParentTraversal),
            ("docs/../../etc", ForbiddenPattern::ParentTraversal),
            ("~/docs", ForbiddenPattern::HomeReference),
            ("docs\0", ForbiddenPattern::NulByte),
            ("docs<1>", ForbiddenPattern::ReservedCharacter),
            ("c:docs", ForbiddenPattern::ReservedCharacter),
            ("/etc/passwd", ForbiddenPattern::AbsolutePath),
            ("docs\\api", ForbiddenPattern::Backslash),
        ];

        for (input, expected) in cases {
            assert_eq!(
                violation(sandbox().resolve(root, input)),
                SecurityViolation::Forbidden(expected),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(
            violation(sandbox().resolve(Path::new("/project"), "")),
            SecurityViolation::EmptyPath
        );
        assert_eq!(
            violation(sandbox().resolve(Path::new("/project"), "   ")),
            SecurityViolation::EmptyPath
        );
    }

    #[test]
    fn rejects_overlong_paths() {
        let long = "a".repeat(300);
        assert!(matches!(
            violation(sandbox().resolve(Path::new("/project"), &long)),
            SecurityViolation::TooLong { max: 260, .. }
        ));
    }

    #[test]
    fn custom_policy_changes_the_limit() {
        let sandbox = PathSandbox::new(SandboxPolicy::default().with_max_path_length(20));
        assert!(sandbox.resolve(Path::new("/p"), "short").is_ok());
        assert!(sandbox.resolve(Path::new("/p"), "a-much-longer-name.md").is_err());
    }

    #[test]
    fn escape_check_is_component_wise() {
        // Lexically escapes once the forbidden-pattern check is disabled.
        let lenient = PathSandbox::new(SandboxPolicy::new(260, Vec::new()));
        assert_eq!(
            violation(lenient.resolve(Path::new("/docs"), "../docs-evil/x")),
            SecurityViolation::EscapesRoot
        );
        assert!(lenient.resolve(Path::new("/docs"), "a/../b").is_ok());
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = sandbox().resolve(Path::new("/project"), "docs/api").unwrap();
        let b = sandbox().resolve(Path::new("/project"), "docs/api").unwrap();
        assert_eq!(a, b);
    }
}
