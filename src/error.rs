// src/error.rs - Error taxonomy shared by the API client and every view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The request could not complete, or the backend answered with a
    /// non-success status other than 404.
    Network {
        status_code: Option<u16>,
        endpoint: Option<String>,
    },
    /// A required field was missing or malformed before submit.
    Validation {
        field: Option<String>,
        rules: Vec<String>,
    },
    /// The backend reported the referenced entity as absent.
    NotFound {
        resource: String,
        id: Option<String>,
    },
    Configuration {
        key: Option<String>,
        validation_errors: Vec<String>,
    },
    /// The operation is not allowed in the current view phase.
    Conflict {
        phase: String,
    },
    Serialization,
    Io,
    Application,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub id: Uuid,
    pub kind: ErrorKind,
    pub message: String,
    pub severity: ErrorSeverity,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub causes: Vec<String>,
}

impl Error {
    /// Creates a new error with the specified kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            severity: ErrorSeverity::Medium,
            source: "unknown".to_string(),
            timestamp: Utc::now(),
            causes: Vec::new(),
        }
    }

    /// Sets the error severity
    pub fn severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the error source
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Adds a cause to the error chain
    pub fn caused_by(mut self, cause: impl fmt::Display) -> Self {
        self.causes.push(cause.to_string());
        self
    }

    /// Creates a network error for a failed or rejected request
    pub fn network(
        endpoint: impl Into<String>,
        status_code: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            ErrorKind::Network {
                status_code,
                endpoint: Some(endpoint.into()),
            },
            message,
        )
        .source("api")
    }

    /// Creates a client-side validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorKind::Validation {
                field: Some(field.into()),
                rules: vec![message.clone()],
            },
            message,
        )
        .severity(ErrorSeverity::Low)
    }

    /// Creates a not-found error
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        let resource = resource.into();
        let message = match &id {
            Some(id) => format!("{} '{}' not found", resource, id),
            None => format!("{} not found", resource),
        };
        Self::new(ErrorKind::NotFound { resource, id }, message).source("api")
    }

    /// Creates a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Configuration {
                key: None,
                validation_errors: Vec::new(),
            },
            message,
        )
        .severity(ErrorSeverity::High)
    }

    /// Creates an error for an operation attempted in the wrong phase
    pub fn conflict(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Conflict {
                phase: phase.into(),
            },
            message,
        )
        .severity(ErrorSeverity::Low)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self.kind, ErrorKind::Network { .. })
    }

    /// Short banner text for inline display.
    ///
    /// `context` names the failed action ("Failed to fetch stocks"). Validation
    /// and conflict messages are already written for the user and pass through
    /// unchanged.
    pub fn user_message(&self, context: &str) -> String {
        match &self.kind {
            ErrorKind::Validation { .. } | ErrorKind::Conflict { .. } => self.message.clone(),
            ErrorKind::NotFound { resource, .. } => format!("{}: {} not found.", context, resource),
            _ => format!("{}. Please try again later.", context),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.source, self.id, self.message
        )
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(ErrorKind::Io, err.to_string())
            .source("std::io::Error")
            .severity(ErrorSeverity::High)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(err.to_string()).source("serde_json")
    }
}

/// Extension trait for Results to add context
pub trait ResultExt<T> {
    /// Adds context to an error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Sets the error source
    fn with_source(self, source: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Error::new(ErrorKind::Application, f()).caused_by(e))
    }

    fn with_source(self, source: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            Error::new(ErrorKind::Application, e.to_string())
                .source(source)
                .caused_by(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error() {
        let error = Error::network("/stocks/", Some(500), "Internal Server Error");
        assert!(error.is_network());
        assert_eq!(error.source, "api");
        assert!(matches!(
            error.kind,
            ErrorKind::Network {
                status_code: Some(500),
                ..
            }
        ));
    }

    #[test]
    fn test_validation_message_passes_through() {
        let error = Error::validation("amount", "Please select an ingredient and enter amount and cost.");
        assert!(error.is_validation());
        assert_eq!(error.severity, ErrorSeverity::Low);
        assert_eq!(
            error.user_message("Failed to add stock"),
            "Please select an ingredient and enter amount and cost."
        );
    }

    #[test]
    fn test_user_message_for_network_failure() {
        let error = Error::network("/stocks/", None, "connection refused");
        assert_eq!(
            error.user_message("Failed to fetch stocks"),
            "Failed to fetch stocks. Please try again later."
        );
    }

    #[test]
    fn test_not_found() {
        let error = Error::not_found("recipe", Some("7".to_string()));
        assert!(error.is_not_found());
        assert_eq!(error.message, "recipe '7' not found");
        assert_eq!(
            error.user_message("Failed to load recipe"),
            "Failed to load recipe: recipe not found."
        );
    }

    #[test]
    fn test_result_ext_context() {
        let io: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let error = io.with_context(|| "Failed to read config".to_string()).unwrap_err();
        assert_eq!(error.message, "Failed to read config");
        assert_eq!(error.causes, vec!["missing".to_string()]);
    }
}
