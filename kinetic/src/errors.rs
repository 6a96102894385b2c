use std::fmt::{Display, Formatter};
use std::sync::Arc;

use snafu::Snafu;

pub use crate::errors::ConfigurationError::*;
pub use crate::errors::Error::*;
pub use crate::errors::Rejection::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Runtime error: Are you sure your code runs inside #[kinetic::runtime]?
    RuntimeError,
    /// Configuration error: {source}.
    ConfigurationError { source: ConfigurationError },
    /// Application error: cannot write '{property}' - {info}.
    ApplicationError { property: String, info: String },
    /// Native animation error: {info}.
    NativeError { info: String },
    /// Unknown error: {info}.
    Unknown { info: String },
}

impl From<ConfigurationError> for Error {
    fn from(value: ConfigurationError) -> Self {
        Self::ConfigurationError { source: value }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigurationError {
    /// No valid target provided
    NoTarget,
    /// No keyframes defined
    NoKeyframes,
    /// Keyframes for '{property}' are empty
    EmptyKeyframes { property: String },
    /// Property '{property}' cannot be resolved on target
    UnresolvableProperty { property: String },
    /// Keyframe '{value}' is not numeric
    NonNumericKeyframe { value: String },
}

/// Rejection of a completion future.
#[derive(Clone, Debug)]
pub enum Rejection {
    /// The animation was stopped or cancelled before its natural end: callers usually ignore it.
    Cancelled,
    /// The animation could not write a frame (the error is kept as raised).
    Failed(Arc<Error>),
}

impl Rejection {
    /// Returns the error the animation failed with, if any.
    pub fn get_error(&self) -> Option<&Error> {
        match self {
            Cancelled => None,
            Failed(error) => Some(error.as_ref()),
        }
    }
}

impl From<Error> for Rejection {
    fn from(error: Error) -> Self {
        Failed(Arc::new(error))
    }
}

impl PartialEq for Rejection {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cancelled, Cancelled) => true,
            (Failed(error), Failed(other)) => {
                Arc::ptr_eq(error, other) || error.to_string() == other.to_string()
            }
            _ => false,
        }
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Cancelled => write!(f, "Animation cancelled"),
            Failed(error) => write!(f, "Animation failed: {}", error),
        }
    }
}

impl std::error::Error for Rejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Cancelled => None,
            Failed(error) => Some(error.as_ref()),
        }
    }
}
