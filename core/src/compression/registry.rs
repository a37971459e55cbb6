//! compression/registry.rs
//! Algorithm table: algorithm → {codec capability, default extension}.

use log::warn;
use num_enum::TryFromPrimitive;

use crate::compression::codecs::{
    BrotliCompressor, BrotliDecompressor, Lz4Compressor, Lz4Decompressor, LzfseCompressor,
    LzfseDecompressor, LzmaCompressor, LzmaDecompressor, ZlibCompressor, ZlibDecompressor,
};
use crate::compression::constants::*;
use crate::compression::types::{Algorithm, CompressionError, Compressor, Decompressor, Operation};
use crate::utils::enum_name_or_hex;

/// Static description of one algorithm's codec capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecInfo {
    pub algorithm: Algorithm,
    pub name: &'static str,
    pub extension: &'static str,
    pub default_level: u32,
    /// Whether a portable codec backs this algorithm.
    pub available: bool,
}

impl CodecInfo {
    pub fn compressor(&self) -> Result<Box<dyn Compressor + Send>, CompressionError> {
        create_compressor(self.algorithm, Some(self.default_level))
    }

    pub fn decompressor(&self) -> Result<Box<dyn Decompressor + Send>, CompressionError> {
        create_decompressor(self.algorithm)
    }
}

/// Exhaustive over the closed set; never fails.
pub fn codec_for(algorithm: Algorithm) -> CodecInfo {
    let (default_level, available) = match algorithm {
        Algorithm::Lzfse    => (DEFAULT_LEVEL_LZFSE, true),
        Algorithm::Zlib     => (DEFAULT_LEVEL_ZLIB, true),
        Algorithm::Lz4      => (DEFAULT_LEVEL_LZ4, true),
        Algorithm::Lzma     => (DEFAULT_LEVEL_LZMA, true),
        Algorithm::Lzbitmap => (0, false),
        Algorithm::Brotli   => (DEFAULT_LEVEL_BROTLI, true),
    };
    CodecInfo {
        algorithm,
        name: algorithm.name(),
        extension: extension_for(algorithm),
        default_level,
        available,
    }
}

pub fn extension_for(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Lzfse    => extensions::LZFSE,
        Algorithm::Zlib     => extensions::ZLIB,
        Algorithm::Lz4      => extensions::LZ4,
        Algorithm::Lzma     => extensions::LZMA,
        Algorithm::Lzbitmap => extensions::LZBITMAP,
        Algorithm::Brotli   => extensions::BROTLI,
    }
}

/// Extension lookup by raw id.
///
/// Ids outside the closed set map to the zlib extension. This fallback is
/// for naming only; `resolve` rejects the same ids for codec selection.
pub fn extension_for_id(raw: u16) -> &'static str {
    match Algorithm::try_from_primitive(raw) {
        Ok(algorithm) => extension_for(algorithm),
        Err(_) => {
            warn!("unknown algorithm {}, naming with zlib extension", enum_name_or_hex::<Algorithm>(raw));
            extensions::ZLIB
        }
    }
}

pub fn resolve(raw: u16) -> Result<Algorithm, CompressionError> {
    Algorithm::try_from_primitive(raw).map_err(|_| CompressionError::UnsupportedAlgorithm { raw })
}

pub fn create_compressor(algorithm: Algorithm, level: Option<u32>)
    -> Result<Box<dyn Compressor + Send>, CompressionError>
{
    match algorithm {
        Algorithm::Lzfse    => LzfseCompressor::new(level.unwrap_or(DEFAULT_LEVEL_LZFSE)),
        Algorithm::Zlib     => ZlibCompressor::new(level.unwrap_or(DEFAULT_LEVEL_ZLIB)),
        Algorithm::Lz4      => Lz4Compressor::new(level.unwrap_or(DEFAULT_LEVEL_LZ4)),
        Algorithm::Lzma     => LzmaCompressor::new(level.unwrap_or(DEFAULT_LEVEL_LZMA)),
        Algorithm::Lzbitmap => Err(CompressionError::CodecUnavailable { codec: algorithm.name() }),
        Algorithm::Brotli   => BrotliCompressor::new(level.unwrap_or(DEFAULT_LEVEL_BROTLI)),
    }
}

pub fn create_decompressor(algorithm: Algorithm)
    -> Result<Box<dyn Decompressor + Send>, CompressionError>
{
    match algorithm {
        Algorithm::Lzfse    => LzfseDecompressor::new(),
        Algorithm::Zlib     => ZlibDecompressor::new(),
        Algorithm::Lz4      => Lz4Decompressor::new(),
        Algorithm::Lzma     => LzmaDecompressor::new(),
        Algorithm::Lzbitmap => Err(CompressionError::CodecUnavailable { codec: algorithm.name() }),
        Algorithm::Brotli   => BrotliDecompressor::new(),
    }
}

/// Codec state bound to one direction, as owned by a stream filter.
pub enum CodecState {
    Encode(Box<dyn Compressor + Send>),
    Decode(Box<dyn Decompressor + Send>),
}

impl CodecState {
    pub fn process(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        match self {
            CodecState::Encode(c) => c.compress_chunk(input, out),
            CodecState::Decode(d) => d.decompress_chunk(input, out),
        }
    }

    pub fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        match self {
            CodecState::Encode(c) => c.finish(out),
            CodecState::Decode(d) => d.finish(out),
        }
    }
}

pub fn create_codec(operation: Operation, algorithm: Algorithm) -> Result<CodecState, CompressionError> {
    let info = codec_for(algorithm);
    match operation {
        Operation::Compress => Ok(CodecState::Encode(info.compressor()?)),
        Operation::Decompress => Ok(CodecState::Decode(info.decompressor()?)),
    }
}
