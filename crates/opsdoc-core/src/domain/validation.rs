use crate::domain::{error::DomainError, value_objects::OutputFormat};

/// Centralized domain validation.
///
/// All configuration checks live here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub const MIN_PROJECT_NAME_LENGTH: usize = 3;
    pub const MAX_PROJECT_NAME_LENGTH: usize = 100;

    /// Name must be 3..=100 characters after trimming and contain only ASCII
    /// alphanumerics, whitespace, `-`, `_` or Japanese script.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();
        let invalid = |reason: String| DomainError::InvalidProjectName {
            name: name.to_string(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("name is empty".into()));
        }

        let length = trimmed.chars().count();
        if length < Self::MIN_PROJECT_NAME_LENGTH {
            return Err(invalid(format!(
                "too short (minimum {} characters)",
                Self::MIN_PROJECT_NAME_LENGTH
            )));
        }
        if length > Self::MAX_PROJECT_NAME_LENGTH {
            return Err(invalid(format!(
                "too long (maximum {} characters)",
                Self::MAX_PROJECT_NAME_LENGTH
            )));
        }

        if let Some(bad) = trimmed.chars().find(|c| !is_allowed_name_char(*c)) {
            return Err(invalid(format!("contains disallowed character {bad:?}")));
        }

        Ok(())
    }

    pub fn validate_version(version: &str) -> Result<(), DomainError> {
        if version.trim().is_empty() {
            return Err(DomainError::InvalidVersion {
                version: version.to_string(),
                reason: "version is empty".into(),
            });
        }
        Ok(())
    }

    pub fn validate_output_directory(dir: &str) -> Result<(), DomainError> {
        if dir.trim().is_empty() {
            return Err(DomainError::InvalidOutputDirectory {
                path: dir.to_string(),
                reason: "output directory is not set".into(),
            });
        }
        Ok(())
    }

    pub fn validate_formats(formats: &[OutputFormat]) -> Result<(), DomainError> {
        if formats.is_empty() {
            return Err(DomainError::NoFormats);
        }
        Ok(())
    }
}

fn is_allowed_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || c == '-'
        || c == '_'
        // Hiragana
        || ('\u{3040}'..='\u{309F}').contains(&c)
        // Katakana
        || ('\u{30A0}'..='\u{30FF}').contains(&c)
        // CJK unified ideographs
        || ('\u{4E00}'..='\u{9FAF}').contains(&c)
}
