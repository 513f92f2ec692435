use thiserror::Error;

/// Errors raised while interpreting gene-symbol labels and user choices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("malformed date-like label '{label}': {reason}")]
    MalformedDateLabel { label: String, reason: String },

    #[error("invalid value '{value}' for {key}; expected one of: {expected}")]
    InvalidChoice {
        key: String,
        value: String,
        expected: String,
    },

    #[error("unknown decision key '{0}'")]
    UnknownDecisionKey(String),

    #[error("row '{label}' has {got} values, expected {expected}")]
    RaggedRow {
        label: String,
        got: usize,
        expected: usize,
    },
}

pub type SymbolResult<T> = std::result::Result<T, SymbolError>;
