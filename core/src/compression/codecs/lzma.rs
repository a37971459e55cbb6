//! LZMA codec: xz stream via xz2, write-side encoder/decoder.

use std::io::Write;
use xz2::write::{XzDecoder, XzEncoder};

use crate::compression::codecs::SharedBuffer;
use crate::compression::types::{Compressor, Decompressor, CompressionError};

const CODEC: &str = "lzma";

pub struct LzmaCompressor {
    encoder: XzEncoder<SharedBuffer>,
    sink: SharedBuffer,
}

impl LzmaCompressor {
    pub fn new(level: u32) -> Result<Box<dyn Compressor + Send>, CompressionError> {
        let sink = SharedBuffer::new();
        Ok(Box::new(Self { encoder: XzEncoder::new(sink.clone(), level.min(9)), sink }))
    }
}

impl Compressor for LzmaCompressor {
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        self.encoder
            .write_all(input)
            .map_err(|e| CompressionError::process(CODEC, e))?;
        self.sink.drain_into(out)
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        self.encoder
            .try_finish()
            .map_err(|e| CompressionError::process(CODEC, e))?;
        self.sink.drain_into(out)
    }
}

pub struct LzmaDecompressor {
    decoder: XzDecoder<SharedBuffer>,
    sink: SharedBuffer,
    seen_input: bool,
}

impl LzmaDecompressor {
    pub fn new() -> Result<Box<dyn Decompressor + Send>, CompressionError> {
        let sink = SharedBuffer::new();
        Ok(Box::new(Self { decoder: XzDecoder::new(sink.clone()), sink, seen_input: false }))
    }
}

impl Decompressor for LzmaDecompressor {
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        self.seen_input |= !input.is_empty();
        self.decoder
            .write_all(input)
            .map_err(|e| CompressionError::process(CODEC, e))?;
        self.sink.drain_into(out)
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        // zero bytes of input is the empty stream
        if !self.seen_input {
            return Ok(());
        }
        self.decoder
            .finish()
            .map(|_| ())
            .map_err(|e| CompressionError::process(CODEC, e))?;
        self.sink.drain_into(out)
    }
}
