use thiserror::Error;

/// Result type for transfer and catalog operations
pub type TransferResult<T> = Result<T, TransferError>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while transferring or cataloging videos
#[derive(Error, Debug)]
pub enum TransferError {
    /// Single-shot upload or session initiation failed. No session
    /// exists at this point, so there is nothing to abort.
    #[error("Upload failed: {source}")]
    Upload {
        #[source]
        source: BoxError,
    },

    /// A part's transport call failed.
    #[error("Part {part_number} upload failed: {source}")]
    PartUpload {
        part_number: u32,
        #[source]
        source: BoxError,
    },

    /// The store accepted a part but returned no usable etag, which
    /// makes the part unusable for completion.
    #[error("Part {part_number} returned no etag")]
    MissingPartTag { part_number: u32 },

    /// The store rejected the completion call.
    #[error("Completing upload failed: {source}")]
    Completion {
        #[source]
        source: BoxError,
    },

    /// Aborting an in-flight session failed. Logged by the engine,
    /// never surfaced in place of the causal error.
    #[error("Aborting upload failed: {source}")]
    Abort {
        #[source]
        source: BoxError,
    },

    /// Listing or signing catalog objects failed.
    #[error("Listing videos failed: {source}")]
    Listing {
        #[source]
        source: BoxError,
    },

    /// Malformed request (empty destination name, zero chunk size, ...)
    #[error("Invalid request: {message}")]
    Invalid { message: String },
}

impl TransferError {
    /// Create an upload error from any error type or message
    pub fn upload<E: Into<BoxError>>(source: E) -> Self {
        Self::Upload {
            source: source.into(),
        }
    }

    /// Create a part upload error
    pub fn part_upload<E: Into<BoxError>>(part_number: u32, source: E) -> Self {
        Self::PartUpload {
            part_number,
            source: source.into(),
        }
    }

    /// Create a completion error
    pub fn completion<E: Into<BoxError>>(source: E) -> Self {
        Self::Completion {
            source: source.into(),
        }
    }

    /// Create an abort error
    pub fn abort<E: Into<BoxError>>(source: E) -> Self {
        Self::Abort {
            source: source.into(),
        }
    }

    /// Create a listing error
    pub fn listing<E: Into<BoxError>>(source: E) -> Self {
        Self::Listing {
            source: source.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// The part number this error is tied to, if any
    pub fn part_number(&self) -> Option<u32> {
        match self {
            Self::PartUpload { part_number, .. } | Self::MissingPartTag { part_number } => {
                Some(*part_number)
            }
            _ => None,
        }
    }
}
