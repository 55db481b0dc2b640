//! Error types shared by the anchor renderer and the collection sorter

use miette::Diagnostic;
use thiserror::Error;

/// Everything that can go wrong while compiling or rendering a sortable table
#[derive(Debug, Error, Diagnostic)]
pub enum SortingError {
    /// A directive was written with the wrong number or shape of arguments
    #[error("{directive} tag {message}")]
    #[diagnostic(
        code(sorting::syntax),
        help("usage: `anchor field [title] [asc|desc]` or `autosort collection`")
    )]
    Syntax {
        directive: String,
        message: String,
    },

    /// A direction token outside `asc`, `desc` and the empty string
    #[error("Unknown sort direction: '{0}'")]
    #[diagnostic(code(sorting::direction), help("valid directions are 'asc', 'desc' or empty"))]
    UnknownDirection(String),

    /// Strict mode rejected the requested sort field
    #[error("Invalid field sorting: '{0}'")]
    #[diagnostic(
        code(sorting::not_found),
        help("set invalid_field_raises_404 to false to ignore invalid sort fields")
    )]
    NotFound(String),

    /// Attribute-based sorting met a record without the requested attribute
    #[error("Record has no attribute '{field}'")]
    #[diagnostic(code(sorting::attribute))]
    MissingAttribute { field: String },

    /// The autosort target is not bound to a list in the render context
    #[error("Context variable '{0}' is not a list")]
    #[diagnostic(code(sorting::binding))]
    MissingBinding(String),

    #[error("Database error: {0}")]
    #[diagnostic(code(sorting::database))]
    Database(#[from] rusqlite::Error),

    #[error("No such table: {0}")]
    #[diagnostic(code(sorting::table))]
    NoSuchTable(String),

    #[error("Template error: {0}")]
    #[diagnostic(code(sorting::template))]
    Template(#[from] tera::Error),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(sorting::config))]
    Config(String),
}

impl SortingError {
    pub(crate) fn syntax(directive: &str, message: impl Into<String>) -> Self {
        SortingError::Syntax {
            directive: directive.to_string(),
            message: message.into(),
        }
    }

    /// HTTP status a host application should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            SortingError::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// True when the request should end in a "not found" response
    pub fn is_not_found(&self) -> bool {
        matches!(self, SortingError::NotFound(_))
    }
}

pub type Result<T, E = SortingError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = SortingError::NotFound("-na me".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn test_other_errors_map_to_500() {
        let err = SortingError::MissingAttribute {
            field: "age".to_string(),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.http_status(), 500);
        assert_eq!(err.to_string(), "Record has no attribute 'age'");
    }

    #[test]
    fn test_syntax_message() {
        let err = SortingError::syntax("anchor", "takes at least 1 argument");
        assert_eq!(err.to_string(), "anchor tag takes at least 1 argument");
    }
}
