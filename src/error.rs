//! @acp:module "Errors"
//! @acp:summary "Error types for page rendering, content loading and configuration"
//! @acp:domain site
//! @acp:layer types

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the library
#[derive(Debug, Error)]
pub enum SiteError {
    /// A precondition on caller-supplied input was violated
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Unsupported page definition format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Unknown page: {0}")]
    UnknownPage(String),
}

impl SiteError {
    /// Build an `InvalidInput` error for the named field
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SiteError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, for `InvalidInput` errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SiteError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<handlebars::RenderError> for SiteError {
    fn from(e: handlebars::RenderError) -> Self {
        SiteError::Template(e.to_string())
    }
}

impl From<handlebars::TemplateError> for SiteError {
    fn from(e: handlebars::TemplateError) -> Self {
        SiteError::Template(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_field() {
        let err = SiteError::invalid("title", "must not be empty");
        assert_eq!(err.field(), Some("title"));
        assert_eq!(err.to_string(), "Invalid title: must not be empty");
    }

    #[test]
    fn test_other_errors_have_no_field() {
        let err = SiteError::UnknownPage("spectrum".to_string());
        assert_eq!(err.field(), None);
    }
}
