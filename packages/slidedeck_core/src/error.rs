use thiserror::Error;

/// Result type for deck decoding.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while decoding a deck document.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("{what} must be a JSON object")]
    NotAnObject { what: &'static str },

    #[error("missing '{tag}' discriminator (expected one of: {expected})")]
    MissingDiscriminator { tag: &'static str, expected: String },

    #[error("unknown {tag} '{value}'")]
    UnknownKind { tag: &'static str, value: String },

    #[error("{kind} is missing required field '{field}'")]
    MissingField { kind: &'static str, field: &'static str },

    #[error("{kind} field '{field}' must be {expected}")]
    InvalidField {
        kind: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("{kind} field '{field}' is not an absolute URL: {value} ({reason})")]
    InvalidUrl {
        kind: &'static str,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("in {owner} field '{field}': {source}")]
    InField {
        owner: &'static str,
        field: &'static str,
        source: Box<SchemaError>,
    },

    #[error("in columns block (column {column}, block {index}): {source}")]
    InColumns {
        column: usize,
        index: usize,
        source: Box<SchemaError>,
    },

    #[error("columns blocks nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("in slide {index}: {source}")]
    InSlide {
        index: usize,
        source: Box<SchemaError>,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    pub(crate) fn in_field(owner: &'static str, field: &'static str, source: SchemaError) -> Self {
        SchemaError::InField {
            owner,
            field,
            source: Box::new(source),
        }
    }

    /// The innermost error, unwrapping slide/column/field context.
    pub fn root_cause(&self) -> &SchemaError {
        match self {
            SchemaError::InField { source, .. }
            | SchemaError::InColumns { source, .. }
            | SchemaError::InSlide { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
