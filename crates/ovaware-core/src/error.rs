use thiserror::Error;

use crate::catalog::FieldKind;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field '{path}' expects {expected} value, got {found}")]
    TypeMismatch {
        path: String,
        expected: FieldKind,
        found: String,
    },
}
