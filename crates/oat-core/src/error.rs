use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("unsupported OpenAPI version: {0} (expected 3.0.x)")]
    UnsupportedVersion(String),

    #[error("document does not match the OpenAPI 3.0 structure: {0}")]
    SpecParsing(#[source] serde_json::Error),

    #[error("component {reference} does not match the expected structure: {source}")]
    Component {
        reference: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported file extension for {0} (expected .json, .yaml or .yml)")]
    UnsupportedExtension(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unresolved reference: {0}")]
    InvalidReference(String),

    #[error("circular reference detected: {0}")]
    CircularReference(String),
}

#[derive(Debug, Error)]
pub enum VisitError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid reference: {reference}")]
    InvalidReference { reference: String },

    #[error("unsupported schema: {0}")]
    SchemaParsing(String),

    #[error("parameter '{name}' must be a primitive or an array of primitives")]
    UnsupportedParameterType { name: String },

    #[error("array parameter '{name}' has a non-primitive default value")]
    UnsupportedDefaultValue { name: String },

    #[error(
        "{location} parameter '{name}' uses unsupported serialization (style: {}, explode: {})",
        .style.as_deref().unwrap_or("-"),
        .explode.map(|e| e.to_string()).unwrap_or_else(|| "-".to_string())
    )]
    UnsupportedParameterStyle {
        name: String,
        location: &'static str,
        style: Option<String>,
        explode: Option<bool>,
    },

    #[error("no JSON-compatible media type found, available: {}", .available.join(", "))]
    UnsupportedContentType { available: Vec<String> },

    #[error("{method} {path}: missing mandatory field '{field}'")]
    MissingField {
        field: &'static str,
        method: &'static str,
        path: String,
    },

    #[error("malformed {what}: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("cyclic reference or excessively large document: {reason}")]
    CyclicReferenceOrExcessiveSize { reason: String },

    #[error("{method} {path}: {source}")]
    Operation {
        method: &'static str,
        path: String,
        #[source]
        source: Box<VisitError>,
    },

    #[error("{path}: {source}")]
    Path {
        path: String,
        #[source]
        source: Box<VisitError>,
    },
}

impl VisitError {
    /// Innermost error, with any operation or path context stripped.
    pub fn cause(&self) -> &VisitError {
        match self {
            VisitError::Operation { source, .. } | VisitError::Path { source, .. } => {
                source.cause()
            }
            other => other,
        }
    }

    /// Whether this failure was caused by a reference cycle or excessive nesting.
    pub fn is_cyclic(&self) -> bool {
        matches!(
            self.cause(),
            VisitError::CyclicReferenceOrExcessiveSize { .. }
        )
    }

    pub(crate) fn in_operation(self, method: &'static str, path: &str) -> Self {
        match self {
            // Already localized.
            err @ (VisitError::MissingField { .. } | VisitError::Operation { .. }) => err,
            err => VisitError::Operation {
                method,
                path: path.to_string(),
                source: Box::new(err),
            },
        }
    }

    pub(crate) fn in_path(self, path: &str) -> Self {
        VisitError::Path {
            path: path.to_string(),
            source: Box::new(self),
        }
    }
}

impl From<ResolveError> for VisitError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidReference(reference) => VisitError::InvalidReference { reference },
            ResolveError::CircularReference(chain) => {
                VisitError::CyclicReferenceOrExcessiveSize { reason: chain }
            }
        }
    }
}
