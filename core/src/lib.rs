//! compress-core
//!
//! Page-oriented streaming compression over a fixed table of codecs.
//! Pull and push filters, buffer helpers, and file-to-file streaming.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod config;
pub mod types;
pub mod utils;

// Shared and top level module
pub mod compression;
pub mod telemetry;

// Stream layers
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        compress_buffer, decompress_buffer, Algorithm, CompressionError, Operation,
    };
    pub use crate::config::StreamConfig;
    pub use crate::stream::{
        stream_buffer_to_buffer, stream_file_to_file, PullFilter, PullSource, PushFilter, PushSink,
    };
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::{Driver, StreamError};
}
