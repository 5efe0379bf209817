//! Generation errors.

use crate::content::ContentError;
use std::{fmt::Display, path::PathBuf};
use thiserror::Error;

/// Every way a generation step can fail. All variants are fatal for the step.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The content source could not list posts; nothing has been written.
    #[error("failed to load posts")]
    ContentLoad(#[from] ContentError),

    /// A serializer rejected its input; nothing has been written.
    #[error("failed to serialize {format}: {message}")]
    Serialization {
        format: &'static str,
        message: String,
    },

    /// Directory creation or a file write failed.
    #[error("failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub fn serialization(format: &'static str, message: impl Display) -> Self {
        Self::Serialization {
            format,
            message: message.to_string(),
        }
    }
}
