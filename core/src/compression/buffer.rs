//! compression/buffer.rs
//! One-shot compression over a complete buffer.
//!
//! - Compression output must fit within the input's own length.
//! - Decompression output must fit the caller's expected size, or the
//!   configured default capacity; overflow is an error, never a truncation.
use log::{debug, warn};

use crate::compression::registry::codec_for;
use crate::compression::types::{Algorithm, CompressionError};
use crate::config::StreamConfig;
use crate::constants::{BUFFER_FEED_SIZE, DEFAULT_DECOMPRESS_CAPACITY};
use crate::utils::BoundedBuffer;

pub fn compress_buffer(input: &[u8], algorithm: Algorithm) -> Result<Vec<u8>, CompressionError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let info = codec_for(algorithm);
    let mut compressor = info.compressor()?;

    let mut out = Vec::with_capacity(input.len());
    compressor.compress_chunk(input, &mut out)?;
    compressor.finish(&mut out)?;

    let capacity = input.len();
    if out.is_empty() || out.len() > capacity {
        debug!("{}: {} bytes did not fit into {}", info.name, out.len(), capacity);
        return Err(CompressionError::CompressionFailed {
            codec: info.name,
            produced: out.len(),
            capacity,
        });
    }
    debug!("{}: compressed {} -> {} bytes", info.name, input.len(), out.len());
    Ok(out)
}

pub fn decompress_buffer(
    input: &[u8],
    algorithm: Algorithm,
    expected_size: Option<usize>,
) -> Result<Vec<u8>, CompressionError> {
    decompress_into(input, algorithm, expected_size.unwrap_or(DEFAULT_DECOMPRESS_CAPACITY))
}

/// Like `decompress_buffer`, with the default capacity taken from `config`.
pub fn decompress_buffer_with_config(
    input: &[u8],
    algorithm: Algorithm,
    expected_size: Option<usize>,
    config: &StreamConfig,
) -> Result<Vec<u8>, CompressionError> {
    decompress_into(input, algorithm, expected_size.unwrap_or(config.decompress_default_capacity))
}

fn decompress_into(input: &[u8], algorithm: Algorithm, capacity: usize) -> Result<Vec<u8>, CompressionError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let info = codec_for(algorithm);
    let mut decompressor = info.decompressor()?;

    let mut out = BoundedBuffer::new(capacity);
    let mut scratch = Vec::new();
    let overflow = |needed: usize| {
        warn!("{}: decompressed output needs at least {} bytes, capacity is {}", info.name, needed, capacity);
        CompressionError::DecompressionCapacityExceeded { codec: info.name, capacity }
    };

    // Feed in slices so a runaway stream is caught near the capacity boundary.
    for chunk in input.chunks(BUFFER_FEED_SIZE) {
        decompressor.decompress_chunk(chunk, &mut scratch)?;
        out.try_extend(&scratch).map_err(overflow)?;
        scratch.clear();
    }
    decompressor.finish(&mut scratch)?;
    out.try_extend(&scratch).map_err(overflow)?;

    debug!("{}: decompressed {} -> {} bytes (capacity {})", info.name, input.len(), out.len(), capacity);
    Ok(out.into_vec())
}
