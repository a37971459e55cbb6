//! telemetry/snapshot.rs
//! Immutable summary of one completed stream.
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compression::{Algorithm, Operation};
use crate::telemetry::counters::StreamCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};
use crate::types::Driver;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub operation: Operation,
    pub algorithm: Algorithm,
    pub driver: Driver,
    pub page_size: usize,
    pub pages_in: u64,
    pub pages_out: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    /// `bytes_out / bytes_in`; 0.0 for empty input.
    pub ratio: f64,
    pub throughput_in_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(
        operation: Operation,
        algorithm: Algorithm,
        driver: Driver,
        page_size: usize,
        counters: &StreamCounters,
        timer: &TelemetryTimer,
    ) -> Self {
        let elapsed = timer.elapsed();

        let ratio = if counters.bytes_in > 0 {
            counters.bytes_out as f64 / counters.bytes_in as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_in as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            operation,
            algorithm,
            driver,
            page_size,
            pages_in: counters.pages_in,
            pages_out: counters.pages_out,
            bytes_in: counters.bytes_in,
            bytes_out: counters.bytes_out,
            ratio,
            throughput_in_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    /// Stage timings are measured inside the run, so they never exceed it.
    pub fn sanity_check(&self) -> bool {
        self.total_stage_time() <= self.elapsed
            && (self.bytes_in == 0) == (self.pages_in == 0)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
