use thiserror::Error;

use std::io;

/// Error type a transform may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("converting circular structure to JSON: cycle closes at {path}")]
    CircularReference { path: String },

    #[error("do not know how to serialize a {kind}")]
    UnrepresentableValue { kind: &'static str },

    #[error("nesting depth limit of {limit} exceeded at {path}")]
    DepthLimitExceeded { limit: usize, path: String },

    /// The transform's own error, passed through untouched.
    #[error(transparent)]
    Transform(BoxError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl Error {
    /// Attempts to recover the transform's error as a concrete type.
    pub fn downcast_transform<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Error::Transform(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
