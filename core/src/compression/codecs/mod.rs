//! compression/codecs/mod.rs
//! Codec capabilities behind the `Compressor` / `Decompressor` traits.
//!
//! Notes:
//! - Write-side encoders/decoders emit into a `SharedBuffer`; the codec wrapper
//!   keeps a second handle and drains it after every step.
//! - Codecs never add framing of their own beyond what the algorithm defines.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::compression::types::CompressionError;

pub mod brotli;
pub mod lz4;
pub mod lzfse;
pub mod lzma;
pub mod zlib;

pub use self::brotli::*;
pub use self::lz4::*;
pub use self::lzfse::*;
pub use self::lzma::*;
pub use self::zlib::*;

/// Cloneable `Write` target: one handle is owned by the codec's writer,
/// the other drains what it produced.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move everything written so far into `out`.
    pub fn drain_into(&self, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| CompressionError::StateError("shared codec buffer poisoned".into()))?;
        out.append(&mut guard);
        Ok(())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "shared codec buffer poisoned"))?;
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
