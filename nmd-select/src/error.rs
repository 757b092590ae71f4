//! Error types for configuring a select control.
//!
//! Interaction itself never fails: indices are clamped and unknown targets
//! are ignored. Only attribute and config parsing at the host boundary can
//! produce an error.

/// Errors raised while applying configuration to a control.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `max-size` was not an integer.
    #[error("invalid max-size {0:?}: expected an integer")]
    InvalidMaxSize(String),

    /// The attribute is not one the control observes.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// `match-strategy` named a strategy that does not exist.
    #[error("invalid match strategy {0:?}: expected \"tokens\" or \"substring\"")]
    InvalidStrategy(String),
}
