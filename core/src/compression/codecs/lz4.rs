//! codecs/lz4.rs
//! LZ4 block stream compressor/decompressor.
//!
//! Stream layout: a sequence of blocks, each holding at most `BLOCK_SIZE`
//! input bytes, closed by an end marker.
//! - `bv41` raw_len:u32 payload_len:u32 payload  (lz4 block)
//! - `bv4-` raw_len:u32 raw bytes                (stored, block did not shrink)
//! - `bv4$`                                      (end of stream)
use byteorder::{ByteOrder, LittleEndian};
use lz4_flex::block::{compress, decompress};

use crate::compression::constants::lz4_block::{BLOCK_SIZE, MAGIC_COMPRESSED, MAGIC_END, MAGIC_STORED};
use crate::compression::types::{CompressionError, Compressor, Decompressor};

const CODEC: &str = "lz4";

/// Upper bound accepted for a single block's decoded size.
const MAX_BLOCK_RAW_LEN: usize = 16 * 1024 * 1024;

/// LZ4 compressor using the lz4_flex block API.
/// Input is staged until a full block is available.
pub struct Lz4Compressor {
    staged: Vec<u8>,
}

impl Lz4Compressor {
    pub fn new(_level: u32) -> Result<Box<dyn Compressor + Send>, CompressionError> {
        // lz4 block mode has no levels.
        Ok(Box::new(Self { staged: Vec::with_capacity(BLOCK_SIZE) }))
    }

    fn emit_block(block: &[u8], out: &mut Vec<u8>) {
        let payload = compress(block);
        let raw_len = (block.len() as u32).to_le_bytes();
        if payload.len() < block.len() {
            out.extend_from_slice(&MAGIC_COMPRESSED);
            out.extend_from_slice(&raw_len);
            out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
            out.extend_from_slice(&payload);
        } else {
            out.extend_from_slice(&MAGIC_STORED);
            out.extend_from_slice(&raw_len);
            out.extend_from_slice(block);
        }
    }
}

impl Compressor for Lz4Compressor {
    fn compress_chunk(&mut self, mut input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        while !input.is_empty() {
            let take = (BLOCK_SIZE - self.staged.len()).min(input.len());
            self.staged.extend_from_slice(&input[..take]);
            input = &input[take..];

            if self.staged.len() == BLOCK_SIZE {
                Self::emit_block(&self.staged, out);
                self.staged.clear();
            }
        }
        Ok(())
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        if !self.staged.is_empty() {
            Self::emit_block(&self.staged, out);
            self.staged.clear();
        }
        out.extend_from_slice(&MAGIC_END);
        Ok(())
    }
}

/// Incremental decoder: buffers input until a whole block is present.
pub struct Lz4Decompressor {
    pending: Vec<u8>,
    ended: bool,
    seen_input: bool,
}

impl Lz4Decompressor {
    pub fn new() -> Result<Box<dyn Decompressor + Send>, CompressionError> {
        Ok(Box::new(Self { pending: Vec::new(), ended: false, seen_input: false }))
    }

    /// Decode every complete block in `pending`; returns bytes consumed.
    fn decode_blocks(&mut self, out: &mut Vec<u8>) -> Result<usize, CompressionError> {
        let buf = &self.pending;
        let mut pos = 0;

        while buf.len() - pos >= 4 {
            if self.ended {
                return Err(CompressionError::process(CODEC, "data after end of stream marker"));
            }
            let magic = &buf[pos..pos + 4];

            if magic == MAGIC_END {
                self.ended = true;
                pos += 4;
            } else if magic == MAGIC_STORED {
                if buf.len() - pos < 8 {
                    break;
                }
                let raw_len = checked_len(LittleEndian::read_u32(&buf[pos + 4..pos + 8]))?;
                let end = pos + 8 + raw_len;
                if buf.len() < end {
                    break;
                }
                out.extend_from_slice(&buf[pos + 8..end]);
                pos = end;
            } else if magic == MAGIC_COMPRESSED {
                if buf.len() - pos < 12 {
                    break;
                }
                let raw_len = checked_len(LittleEndian::read_u32(&buf[pos + 4..pos + 8]))?;
                let payload_len = LittleEndian::read_u32(&buf[pos + 8..pos + 12]) as usize;
                let end = pos + 12 + payload_len;
                if buf.len() < end {
                    break;
                }
                let block = decompress(&buf[pos + 12..end], raw_len)
                    .map_err(|e| CompressionError::process(CODEC, e))?;
                if block.len() != raw_len {
                    return Err(CompressionError::process(
                        CODEC,
                        format!("decoded size {} != header {}", block.len(), raw_len),
                    ));
                }
                out.extend_from_slice(&block);
                pos = end;
            } else {
                return Err(CompressionError::process(CODEC, format!("bad block magic {:02x?}", magic)));
            }
        }

        Ok(pos)
    }
}

fn checked_len(raw_len: u32) -> Result<usize, CompressionError> {
    let len = raw_len as usize;
    if len > MAX_BLOCK_RAW_LEN {
        return Err(CompressionError::process(
            CODEC,
            format!("block too large: {} > {}", len, MAX_BLOCK_RAW_LEN),
        ));
    }
    Ok(len)
}

impl Decompressor for Lz4Decompressor {
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        if self.ended && !input.is_empty() {
            return Err(CompressionError::process(CODEC, "data after end of stream marker"));
        }
        self.seen_input |= !input.is_empty();
        self.pending.extend_from_slice(input);
        let consumed = self.decode_blocks(out)?;
        self.pending.drain(..consumed);
        Ok(())
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        // zero bytes of input is the empty stream
        if !self.seen_input {
            return Ok(());
        }
        let consumed = self.decode_blocks(out)?;
        self.pending.drain(..consumed);

        if !self.ended || !self.pending.is_empty() {
            return Err(CompressionError::process(CODEC, "truncated lz4 block stream"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(data: &[u8], step: usize) -> Vec<u8> {
        let mut enc = Lz4Compressor::new(0).unwrap();
        let mut out = Vec::new();
        for chunk in data.chunks(step.max(1)) {
            enc.compress_chunk(chunk, &mut out).unwrap();
        }
        enc.finish(&mut out).unwrap();
        out
    }

    #[test]
    fn empty_stream_is_just_the_end_marker() {
        assert_eq!(encode(&[], 1), MAGIC_END.to_vec());
    }

    #[test]
    fn incompressible_block_is_stored() {
        let data: Vec<u8> = (0..64u8).collect();
        let encoded = encode(&data, 64);
        assert_eq!(&encoded[..4], &MAGIC_STORED);
        assert_eq!(encoded.len(), 4 + 4 + data.len() + 4);
    }

    #[test]
    fn decoder_accepts_byte_at_a_time_input() {
        let data: Vec<u8> = b"lz4 block stream ".iter().cycle().take(200_000).copied().collect();
        let encoded = encode(&data, 4096);

        let mut dec = Lz4Decompressor::new().unwrap();
        let mut out = Vec::new();
        for b in &encoded {
            dec.decompress_chunk(std::slice::from_ref(b), &mut out).unwrap();
        }
        dec.finish(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn missing_end_marker_is_truncation() {
        let data = vec![7u8; 1000];
        let encoded = encode(&data, 1000);

        let mut dec = Lz4Decompressor::new().unwrap();
        let mut out = Vec::new();
        dec.decompress_chunk(&encoded[..encoded.len() - 4], &mut out).unwrap();
        assert!(dec.finish(&mut out).is_err());
    }

    #[test]
    fn no_input_is_the_empty_stream() {
        let mut dec = Lz4Decompressor::new().unwrap();
        let mut out = Vec::new();
        dec.finish(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut dec = Lz4Decompressor::new().unwrap();
        let mut out = Vec::new();
        assert!(dec.decompress_chunk(b"nope", &mut out).is_err());
    }
}
