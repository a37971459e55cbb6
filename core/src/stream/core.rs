// ## core.rs — stable public API

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::{
    compression::{Algorithm, Operation},
    config::StreamConfig,
    stream::{
        io::{open_input, stream_file, InputSource},
        pump::pump,
    },
    telemetry::TelemetrySnapshot,
    types::{Driver, StreamError},
};

pub use crate::compression::{compress_buffer, decompress_buffer, decompress_buffer_with_config};

/// Run a whole buffer through a page filter and collect the output.
pub fn stream_buffer_to_buffer(
    data: &[u8],
    operation: Operation,
    algorithm: Algorithm,
    driver: Driver,
    config: &StreamConfig,
) -> Result<Vec<u8>, StreamError> {
    stream_buffer_with_telemetry(data, operation, algorithm, driver, config).map(|(out, _)| out)
}

pub fn stream_buffer_with_telemetry(
    data: &[u8],
    operation: Operation,
    algorithm: Algorithm,
    driver: Driver,
    config: &StreamConfig,
) -> Result<(Vec<u8>, TelemetrySnapshot), StreamError> {
    config.validate()?;

    let mut reader = open_input(InputSource::Memory(data))?;
    let mut out = Vec::new();
    let snapshot = pump(&mut reader, &mut out, operation, algorithm, driver, config.page_size)?;
    Ok((out, snapshot))
}

/// Run any reader through a page filter into a collected buffer.
pub fn stream_reader_to_buffer<R: Read>(
    reader: R,
    operation: Operation,
    algorithm: Algorithm,
    driver: Driver,
    config: &StreamConfig,
) -> Result<(Vec<u8>, TelemetrySnapshot), StreamError> {
    config.validate()?;

    let mut reader = open_input(InputSource::Reader(Box::new(reader)))?;
    let mut out = Vec::new();
    let snapshot = pump(&mut reader, &mut out, operation, algorithm, driver, config.page_size)?;
    Ok((out, snapshot))
}

/// 🗜️ Compress or decompress `source` into `dest_dir`; returns the path written.
pub fn stream_file_to_file(
    source: &Path,
    dest_dir: &Path,
    operation: Operation,
    algorithm: Algorithm,
    driver: Driver,
    config: &StreamConfig,
) -> Result<PathBuf, StreamError> {
    stream_file_with_telemetry(source, dest_dir, operation, algorithm, driver, config).map(|(path, _)| path)
}

pub fn stream_file_with_telemetry(
    source: &Path,
    dest_dir: &Path,
    operation: Operation,
    algorithm: Algorithm,
    driver: Driver,
    config: &StreamConfig,
) -> Result<(PathBuf, TelemetrySnapshot), StreamError> {
    config.validate()?;
    stream_file(source, dest_dir, operation, algorithm, driver, config.page_size)
}
