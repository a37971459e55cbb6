//! LZFSE codec via lzfse_rust's buffer engine.
//!
//! The buffer engine needs the whole stream, so input is staged until
//! `finish` in both directions. Memory use grows with stream length.

use crate::compression::types::{Compressor, Decompressor, CompressionError};

const CODEC: &str = "lzfse";

pub struct LzfseCompressor {
    staged: Vec<u8>,
}

impl LzfseCompressor {
    pub fn new(_level: u32) -> Result<Box<dyn Compressor + Send>, CompressionError> {
        Ok(Box::new(Self { staged: Vec::new() }))
    }
}

impl Compressor for LzfseCompressor {
    fn compress_chunk(&mut self, input: &[u8], _out: &mut Vec<u8>) -> Result<(), CompressionError> {
        self.staged.extend_from_slice(input);
        Ok(())
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let src = std::mem::take(&mut self.staged);
        lzfse_rust::encode_bytes(&src, out).map_err(|e| CompressionError::process(CODEC, e))?;
        Ok(())
    }
}

pub struct LzfseDecompressor {
    staged: Vec<u8>,
}

impl LzfseDecompressor {
    pub fn new() -> Result<Box<dyn Decompressor + Send>, CompressionError> {
        Ok(Box::new(Self { staged: Vec::new() }))
    }
}

impl Decompressor for LzfseDecompressor {
    fn decompress_chunk(&mut self, input: &[u8], _out: &mut Vec<u8>) -> Result<(), CompressionError> {
        self.staged.extend_from_slice(input);
        Ok(())
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let src = std::mem::take(&mut self.staged);
        if src.is_empty() {
            return Ok(());
        }
        lzfse_rust::decode_bytes(&src, out).map_err(|e| CompressionError::process(CODEC, e))?;
        Ok(())
    }
}
