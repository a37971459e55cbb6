//! Zlib codec: raw DEFLATE stream (no zlib header or adler trailer) via flate2.
//! Encoding goes through the write-side encoder; decoding drives `Decompress`.

use std::io::Write;
use flate2::{write::DeflateEncoder, Compression, Decompress, FlushDecompress, Status};

use crate::compression::codecs::SharedBuffer;
use crate::compression::types::{Compressor, Decompressor, CompressionError};

const CODEC: &str = "zlib";

/// Spare output reserved before each inflate step.
const INFLATE_CHUNK: usize = 32 * 1024;

pub struct ZlibCompressor {
    encoder: DeflateEncoder<SharedBuffer>,
    sink: SharedBuffer,
}

impl ZlibCompressor {
    pub fn new(level: u32) -> Result<Box<dyn Compressor + Send>, CompressionError> {
        let lvl = match level {
            0..=9 => Compression::new(level),
            _ => Compression::default(),
        };
        let sink = SharedBuffer::new();
        Ok(Box::new(Self { encoder: DeflateEncoder::new(sink.clone(), lvl), sink }))
    }
}

impl Compressor for ZlibCompressor {
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

/// Inflate driven directly so the end of the deflate stream is observable:
/// `finish` fails unless the final block was decoded.
pub struct ZlibDecompressor {
    inflater: Decompress,
    ended: bool,
}

impl ZlibDecompressor {
    pub fn new() -> Result<Box<dyn Decompressor + Send>, CompressionError> {
        // raw deflate, no zlib header
        Ok(Box::new(Self { inflater: Decompress::new(false), ended: false }))
    }

    fn inflate(&mut self, mut input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        while !self.ended {
            if out.capacity() - out.len() < INFLATE_CHUNK {
                out.reserve(INFLATE_CHUNK);
            }
            let (in_before, out_before) = (self.inflater.total_in(), self.inflater.total_out());
            let status = self
                .inflater
                .decompress_vec(input, out, FlushDecompress::None)
                .map_err(|e| CompressionError::process(CODEC, e))?;
            let consumed = (self.inflater.total_in() - in_before) as usize;
            let produced = self.inflater.total_out() - out_before;
            input = &input[consumed..];

            match status {
                Status::StreamEnd => self.ended = true,
                _ if consumed == 0 && produced == 0 => break,
                _ => {}
            }
        }
        if self.ended && !input.is_empty() {
            return Err(CompressionError::process(CODEC, "data after end of deflate stream"));
        }
        Ok(())
    }
}

impl Decompressor for ZlibDecompressor {
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        if self.ended && !input.is_empty() {
            return Err(CompressionError::process(CODEC, "data after end of deflate stream"));
        }
        self.inflate(input, out)
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        // zero bytes of input is the empty stream
        if self.inflater.total_in() == 0 {
            return Ok(());
        }
        self.inflate(&[], out)?;
        if !self.ended {
            return Err(CompressionError::process(CODEC, "truncated deflate stream"));
        }
        Ok(())
    }
}
