//! Brotli codec via the brotli crate's writer adapters.
//!
//! Both adapters only close their stream when consumed, so they sit in an
//! `Option` and are taken on `finish`.

use std::io::Write;
use ::brotli::{CompressorWriter, DecompressorWriter};

use crate::compression::codecs::SharedBuffer;
use crate::compression::constants::{BROTLI_BUFFER_SIZE, BROTLI_LGWIN};
use crate::compression::types::{Compressor, Decompressor, CompressionError};

const CODEC: &str = "brotli";

fn closed() -> CompressionError {
    CompressionError::StateError("brotli stream already finished".into())
}

pub struct BrotliCompressor {
    encoder: Option<CompressorWriter<SharedBuffer>>,
    sink: SharedBuffer,
}

impl BrotliCompressor {
    pub fn new(level: u32) -> Result<Box<dyn Compressor + Send>, CompressionError> {
        let sink = SharedBuffer::new();
        let encoder = CompressorWriter::new(sink.clone(), BROTLI_BUFFER_SIZE, level.min(11), BROTLI_LGWIN);
        Ok(Box::new(Self { encoder: Some(encoder), sink }))
    }
}

impl Compressor for BrotliCompressor {
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let encoder = self.encoder.as_mut().ok_or_else(closed)?;
        encoder
            .write_all(input)
            .map_err(|e| CompressionError::process(CODEC, e))?;
        self.sink.drain_into(out)
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let encoder = self.encoder.take().ok_or_else(closed)?;
        // into_inner runs the FINISH operation and hands back the writer;
        // it has no error to surface, output is already in `sink`
        let _ = encoder.into_inner();
        self.sink.drain_into(out)
    }
}

pub struct BrotliDecompressor {
    decoder: Option<DecompressorWriter<SharedBuffer>>,
    sink: SharedBuffer,
    seen_input: bool,
}

impl BrotliDecompressor {
    pub fn new() -> Result<Box<dyn Decompressor + Send>, CompressionError> {
        let sink = SharedBuffer::new();
        let decoder = DecompressorWriter::new(sink.clone(), BROTLI_BUFFER_SIZE);
        Ok(Box::new(Self { decoder: Some(decoder), sink, seen_input: false }))
    }
}

impl Decompressor for BrotliDecompressor {
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let decoder = self.decoder.as_mut().ok_or_else(closed)?;
        self.seen_input |= !input.is_empty();
        decoder
            .write_all(input)
            .map_err(|e| CompressionError::process(CODEC, e))?;
        self.sink.drain_into(out)
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let decoder = self.decoder.take().ok_or_else(closed)?;
        // zero bytes of input is the empty stream
        if !self.seen_input {
            return Ok(());
        }
        match decoder.into_inner() {
            Ok(_) => self.sink.drain_into(out),
            Err(_) => Err(CompressionError::process(CODEC, "truncated brotli stream")),
        }
    }
}
