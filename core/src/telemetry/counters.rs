//! telemetry/counters.rs
//! Mutable counters collected while a filter runs.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Deterministic page and byte counts for one stream.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCounters {
    pub pages_in: u64,
    pub pages_out: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl StreamCounters {
    /// Record one input page handed to the codec.
    pub fn add_input(&mut self, len: usize) {
        self.pages_in += 1;
        self.bytes_in += len as u64;
    }

    /// Record one output page delivered by the filter.
    pub fn add_output(&mut self, len: usize) {
        self.pages_out += 1;
        self.bytes_out += len as u64;
    }

    pub fn merge(&mut self, other: &StreamCounters) {
        self.pages_in += other.pages_in;
        self.pages_out += other.pages_out;
        self.bytes_in += other.bytes_in;
        self.bytes_out += other.bytes_out;
    }
}

impl AddAssign for StreamCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
