use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::CompressionError;

/// Unified stream error covering I/O, codec, filter protocol, naming, and
/// generic validation.
/// - `From<T>` impls enable `?` across the pump and orchestrator.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Underlying read/write failure, propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Codec construction or processing failure.
    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    /// Source path has no usable base name for the destination.
    #[error("cannot derive destination name from {}", .path.display())]
    FilenameResolutionFailed { path: PathBuf },

    /// `write` called on a push filter after `finalize`.
    #[error("write after finalize")]
    WriteAfterFinalize,

    /// `finalize` called twice on a push filter.
    #[error("filter already finalized")]
    AlreadyFinalized,

    /// Input page longer than the filter's page size.
    #[error("page too large: {have} > {max}")]
    PageTooLarge { have: usize, max: usize },

    /// Generic high-level validation with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}

/// How a stream is driven.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// Engine requests input from a source as it needs it.
    Pull,
    /// Caller hands input pages to the engine, which emits to a sink.
    Push,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Driver::Pull => f.write_str("pull"),
            Driver::Push => f.write_str("push"),
        }
    }
}
