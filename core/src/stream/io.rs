//! stream/io.rs
//! File-to-file orchestration: destination naming, creation, and driving a
//! filter over file handles.
//!
//! Handles are owned for the duration of one call and closed on every exit
//! path. A failure mid-stream leaves a partial destination file behind;
//! removing it is up to the caller.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::compression::{extension_for, Algorithm, Operation};
use crate::stream::pump::pump;
use crate::telemetry::TelemetrySnapshot;
use crate::types::{Driver, StreamError};
use crate::utils::validate_page_size;

/// Canonical input abstraction
pub enum InputSource<'a> {
    Reader(Box<dyn Read + 'a>),
    File(PathBuf),
    Memory(&'a [u8]),
}

/// Normalize input source into a boxed reader
pub fn open_input<'a>(src: InputSource<'a>) -> Result<Box<dyn Read + 'a>, StreamError> {
    let reader: Box<dyn Read + 'a> = match src {
        InputSource::Reader(r) => r,
        InputSource::File(p) => Box::new(BufReader::new(File::open(p)?)),
        InputSource::Memory(b) => Box::new(b),
    };
    Ok(reader)
}

/// Destination path for `source` inside `dest_dir`.
///
/// - Compress: `<file name><extension>`, e.g. `notes.txt` → `notes.txt.lzma`.
/// - Decompress: file name with its last extension removed,
///   e.g. `notes.txt.lzma` → `notes.txt`.
pub fn resolve_destination(
    source: &Path,
    dest_dir: &Path,
    operation: Operation,
    algorithm: Algorithm,
) -> Result<PathBuf, StreamError> {
    let unresolved = || StreamError::FilenameResolutionFailed { path: source.to_path_buf() };

    let file_name = source.file_name().ok_or_else(unresolved)?;
    let dest_name = match operation {
        Operation::Compress => {
            let mut name = file_name.to_os_string();
            name.push(extension_for(algorithm));
            name
        }
        Operation::Decompress => Path::new(file_name).file_stem().ok_or_else(unresolved)?.to_os_string(),
    };
    if dest_name.is_empty() {
        return Err(unresolved());
    }

    let destination = dest_dir.join(dest_name);
    if destination == source {
        warn!("destination {} would overwrite its source", destination.display());
        return Err(unresolved());
    }
    Ok(destination)
}

/// Create `path` empty, then open it for sequential writing.
/// An existing file at `path` is truncated.
pub fn create_destination(path: &Path) -> Result<File, StreamError> {
    if path.exists() {
        warn!("overwriting existing file {}", path.display());
    }
    File::create(path)?;
    let file = OpenOptions::new().write(true).truncate(true).open(path)?;
    Ok(file)
}

/// Stream `source` into a new file in `dest_dir`; returns the destination
/// path and the run's telemetry.
pub fn stream_file(
    source: &Path,
    dest_dir: &Path,
    operation: Operation,
    algorithm: Algorithm,
    driver: Driver,
    page_size: usize,
) -> Result<(PathBuf, TelemetrySnapshot), StreamError> {
    validate_page_size(page_size)?;
    let destination = resolve_destination(source, dest_dir, operation, algorithm)?;
    debug!("{} {} {} -> {}", algorithm, operation, source.display(), destination.display());

    let mut reader = open_input(InputSource::File(source.to_path_buf()))?;
    let mut writer = create_destination(&destination)?;

    let snapshot = pump(&mut reader, &mut writer, operation, algorithm, driver, page_size)?;
    writer.sync_all()?;
    Ok((destination, snapshot))
}
