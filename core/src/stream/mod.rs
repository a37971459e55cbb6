// ## 1️⃣ `mod.rs` — public façade + re-exports

//! stream — page-oriented compression filters and their drivers.
//!
//! - `pull`: the filter asks a source for input.
//! - `push`: the caller feeds input and a sink receives output.
//! - `pump`: drives either filter between a reader and a writer.
//! - `io`: file naming and file-to-file orchestration.

pub mod pull;
pub mod push;
pub mod pump;
pub mod io;
pub mod core;

pub use pull::{PullFilter, PullSource, PullState};
pub use push::{PushFilter, PushSink, PushState};
pub use pump::{pump, pump_pull, pump_push};
pub use io::{create_destination, open_input, resolve_destination, stream_file, InputSource};

pub use self::core::{
    stream_buffer_to_buffer,
    stream_buffer_with_telemetry,
    stream_file_to_file,
    stream_file_with_telemetry,
    stream_reader_to_buffer,
};
