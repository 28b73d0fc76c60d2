//! The errors that may abort a translation run.

use thiserror::Error;

/// The closed set of fatal conditions raised by the encoders and the registry.
///
/// A translation run stops at the first error: there is no statement-level
/// recovery, and directives emitted before the failure are not retracted.
/// Callers must discard the output stream of an aborted run in full.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslationError {
    /// No handler is registered for the statement name.
    #[error(r#"no handler registered for constraint "{0}""#)]
    UnknownConstraint(String),

    /// The statement belongs to a family this translator refuses to encode.
    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(String),

    /// A coercion target variable does not have the required domain.
    #[error("domain mismatch: {0}")]
    DomainMismatch(String),

    /// An argument does not match the shape expected by the statement family.
    #[error("malformed argument: {0}")]
    MalformedArgument(String),
}

/// A specialized result type for encoding operations.
pub type EncodingResult<T> = Result<T, TranslationError>;
