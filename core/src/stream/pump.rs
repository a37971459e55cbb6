//! stream/pump.rs
//! Drives a filter to completion between a reader and a writer.
//!
//! - Input is cut into page-size chunks; a short chunk marks end of input.
//! - Output pages are written in the order the filter produces them.
//! - Buffers and files both go through here: a buffer is a `Cursor` in and a
//!   `Vec<u8>` out.
use std::io::{Read, Write};

use bytes::Bytes;
use log::debug;

use crate::compression::{Algorithm, Operation};
use crate::stream::pull::PullFilter;
use crate::stream::push::PushFilter;
use crate::telemetry::{Stage, StageTimes, StreamCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::{Driver, StreamError};
use crate::utils::read_exact_or_eof;

pub fn pump<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    operation: Operation,
    algorithm: Algorithm,
    driver: Driver,
    page_size: usize,
) -> Result<TelemetrySnapshot, StreamError> {
    match driver {
        Driver::Pull => pump_pull(reader, writer, operation, algorithm, page_size),
        Driver::Push => pump_push(reader, writer, operation, algorithm, page_size),
    }
}

/// Push driver: read a chunk, `write` it, `finalize` on the first short chunk.
pub fn pump_push<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    operation: Operation,
    algorithm: Algorithm,
    page_size: usize,
) -> Result<TelemetrySnapshot, StreamError> {
    let mut timer = TelemetryTimer::new();
    let mut write_times = StageTimes::default();

    let (counters, codec_times) = {
        let sink = |page: Bytes| -> Result<(), StreamError> {
            write_times.time(Stage::Write, || writer.write_all(&page))?;
            Ok(())
        };
        let mut filter = PushFilter::new(operation, algorithm, page_size, sink)?;

        loop {
            let chunk = timer.stage_times.time(Stage::Read, || read_exact_or_eof(&mut *reader, page_size))?;
            filter.write(&chunk)?;
            if chunk.len() < page_size {
                filter.finalize()?;
                break;
            }
        }
        (filter.counters().clone(), filter.stage_times().clone())
    };

    timer.stage_times.time(Stage::Write, || writer.flush())?;
    finish_snapshot(operation, algorithm, Driver::Push, page_size, &counters, timer, &[codec_times, write_times])
}

/// Pull driver: the filter's source reads chunks lazily from `reader`.
pub fn pump_pull<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    operation: Operation,
    algorithm: Algorithm,
    page_size: usize,
) -> Result<TelemetrySnapshot, StreamError> {
    let mut timer = TelemetryTimer::new();
    let mut read_times = StageTimes::default();
    let mut ended = false;

    let (counters, codec_times) = {
        let source = |max_len: usize| -> Result<Bytes, StreamError> {
            // Once a short read was seen the source stays empty.
            if ended {
                return Ok(Bytes::new());
            }
            let chunk = read_times.time(Stage::Read, || read_exact_or_eof(&mut *reader, max_len))?;
            ended = chunk.len() < max_len;
            Ok(chunk)
        };
        let mut filter = PullFilter::new(operation, algorithm, page_size, source)?;

        while let Some(page) = filter.read_page()? {
            timer.stage_times.time(Stage::Write, || writer.write_all(&page))?;
        }
        (filter.counters().clone(), filter.stage_times().clone())
    };

    timer.stage_times.time(Stage::Write, || writer.flush())?;
    finish_snapshot(operation, algorithm, Driver::Pull, page_size, &counters, timer, &[codec_times, read_times])
}

fn finish_snapshot(
    operation: Operation,
    algorithm: Algorithm,
    driver: Driver,
    page_size: usize,
    counters: &StreamCounters,
    mut timer: TelemetryTimer,
    extra: &[StageTimes],
) -> Result<TelemetrySnapshot, StreamError> {
    for times in extra {
        timer.stage_times.merge(times);
    }
    timer.finish();

    let snapshot = TelemetrySnapshot::from(operation, algorithm, driver, page_size, counters, &timer);
    debug!(
        "{} {} {}: {} -> {} bytes in {} / {} pages, {:?}",
        algorithm, operation, driver,
        snapshot.bytes_in, snapshot.bytes_out, snapshot.pages_in, snapshot.pages_out, snapshot.elapsed
    );
    Ok(snapshot)
}
