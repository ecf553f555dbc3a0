use std::fmt;
use thiserror::Error;

/// Failures raised while resolving field types or synthesizing a schema.
///
/// Resolution and synthesis errors are configuration errors: they surface
/// once, when the schema is built at startup, and no partial schema is ever
/// returned.
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    #[error("cannot determine a schema type for field `{field}` of kind {kind}")]
    UnresolvableField { field: String, kind: String },

    #[error("relation chain through field `{field}` exceeds the supported depth")]
    RelationDepthExceeded { field: String },

    #[error("relation field `{field}` has no target field to resolve")]
    MissingRelationTarget { field: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// One problem found while validating an attribute mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation failure carrying every offending field, so the caller can
/// report all problems at once instead of the first one found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    #[must_use]
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    /// Field names with at least one issue, in report order.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed for {} field(s): ", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
