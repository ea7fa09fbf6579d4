//! Animation error types

use thiserror::Error;

/// Errors raised by motion property registries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MotionError {
    /// Property was read or written before being registered
    #[error("Motion property `{0}` is not registered")]
    UnregisteredProperty(&'static str),

    /// A property with the same name is already registered
    #[error("Motion property `{0}` is already registered")]
    DuplicateProperty(&'static str),

    /// Property exists but holds a different value type
    #[error("Motion property `{name}` does not hold values of type `{expected}`")]
    TypeMismatch {
        name: &'static str,
        expected: &'static str,
    },
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, MotionError>;
