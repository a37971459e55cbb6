//! compression/types.rs
//! Algorithm identifiers, codec traits and compression errors.
use std::fmt;
use std::str::FromStr;

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::constants::algorithm_ids;

/// Closed set of supported algorithms, tagged with their stable ids.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Lzfse    = algorithm_ids::LZFSE,
    Zlib     = algorithm_ids::ZLIB,
    Lz4      = algorithm_ids::LZ4,
    Lzma     = algorithm_ids::LZMA,
    Lzbitmap = algorithm_ids::LZBITMAP,
    Brotli   = algorithm_ids::BROTLI,
}

impl Algorithm {
    /// Every member of the set, in declaration order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Lzfse,
        Algorithm::Zlib,
        Algorithm::Lz4,
        Algorithm::Lzma,
        Algorithm::Lzbitmap,
        Algorithm::Brotli,
    ];

    pub fn id(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Lzfse    => "lzfse",
            Algorithm::Zlib     => "zlib",
            Algorithm::Lz4      => "lz4",
            Algorithm::Lzma     => "lzma",
            Algorithm::Lzbitmap => "lzbitmap",
            Algorithm::Brotli   => "brotli",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|alg| alg.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CompressionError::UnknownAlgorithmName { name: s.to_string() })
    }
}

/// Direction of a codec or filter, fixed for its lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Compress,
    Decompress,
}

impl Operation {
    pub fn from_compressing(is_compressing: bool) -> Self {
        if is_compressing { Operation::Compress } else { Operation::Decompress }
    }

    pub fn is_compress(self) -> bool {
        matches!(self, Operation::Compress)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Compress   => f.write_str("compress"),
            Operation::Decompress => f.write_str("decompress"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("unsupported compression algorithm: 0x{raw:04x}")]
    UnsupportedAlgorithm { raw: u16 },

    #[error("unknown compression algorithm name: {name:?}")]
    UnknownAlgorithmName { name: String },

    #[error("codec {codec} is not available on this platform")]
    CodecUnavailable { codec: &'static str },

    #[error("codec {codec} init failed: {msg}")]
    CodecInitFailed { codec: &'static str, msg: String },

    #[error("codec {codec} process failed: {msg}")]
    CodecProcessFailed { codec: &'static str, msg: String },

    #[error("codec {codec} could not fit output: produced {produced} bytes into capacity {capacity}")]
    CompressionFailed { codec: &'static str, produced: usize, capacity: usize },

    #[error("codec {codec} output exceeds decompression capacity of {capacity} bytes")]
    DecompressionCapacityExceeded { codec: &'static str, capacity: usize },

    #[error("compression state error: {0}")]
    StateError(String),
}

impl CompressionError {
    pub(crate) fn process(codec: &'static str, msg: impl fmt::Display) -> Self {
        CompressionError::CodecProcessFailed { codec, msg: msg.to_string() }
    }
}

/// Incremental encoder. Output may lag input until `finish`.
// Send: independent streams may run on separate threads.
pub trait Compressor: Send {
    /// Compress a single chunk, appending whatever the codec emits to `out`.
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
    /// Flush all pending state and close the stream.
    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError>;
}

/// Incremental decoder. Chunk boundaries carry no meaning.
pub trait Decompressor: Send {
    /// Decompress a single chunk, appending produced bytes to `out`.
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
    /// Signal end of input; fails if the stream is truncated.
    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError>;
}
