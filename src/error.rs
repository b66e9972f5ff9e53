//! Error types for the variable bridge
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

use crate::variables::VariableKind;

// == Variable Error Enum ==
/// Errors raised while converting values to or from host variables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VariableError {
    /// Text could not be parsed as the requested variable kind
    #[error("Cannot parse {input:?} as {kind}: {reason}")]
    Parse {
        kind: VariableKind,
        input: String,
        reason: String,
    },

    /// A host value does not fit the requested Rust type
    #[error("Cannot convert {kind} value {value} to {target}")]
    Conversion {
        kind: VariableKind,
        target: &'static str,
        value: String,
    },
}

impl VariableError {
    /// Shorthand for a parse failure.
    pub fn parse(kind: VariableKind, input: &str, reason: impl ToString) -> Self {
        VariableError::Parse {
            kind,
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Shorthand for a narrowing conversion failure.
    pub fn conversion(kind: VariableKind, target: &'static str, value: impl ToString) -> Self {
        VariableError::Conversion {
            kind,
            target,
            value: value.to_string(),
        }
    }
}

// == Plugin Error Enum ==
/// Errors returned by plugin lifecycle hooks.
#[derive(Error, Debug)]
pub enum PluginError {
    /// A variable operation failed inside a hook
    #[error("Variable error: {0}")]
    Variable(#[from] VariableError),

    /// The plugin rejected or failed a command
    #[error("Command failed: {0}")]
    Command(String),

    /// The host misbehaved or is unavailable
    #[error("Host error: {0}")]
    Host(String),
}

// == Result Type Aliases ==
/// Convenience Result type for variable operations.
pub type Result<T> = std::result::Result<T, VariableError>;

/// Result type for plugin lifecycle hooks.
pub type PluginResult<T> = std::result::Result<T, PluginError>;
