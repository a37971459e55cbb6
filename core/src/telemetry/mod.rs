//! telemetry/mod.rs
//! Stream telemetry: counters, stage timers, and immutable snapshots.
//!
//! - Filters keep their own counters and codec timings.
//! - The pump adds read/write timings and freezes everything into a
//!   `TelemetrySnapshot` once the stream completes.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
