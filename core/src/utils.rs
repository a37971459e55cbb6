use std::fmt;
use std::io::Read;

use bytes::Bytes;
use num_enum::TryFromPrimitive;

use crate::constants::MAX_PAGE_SIZE;
use crate::types::StreamError;

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// Fill up to `len` bytes, stopping early only at EOF.
/// A result shorter than `len` therefore means the reader is exhausted.
pub fn read_exact_or_eof<R: Read>(
    r: &mut R,
    len: usize,
) -> Result<Bytes, StreamError> {
    let mut buf = vec![0u8; len];
    let mut off = 0;

    while off < len {
        let n = match r.read(&mut buf[off..]) {
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if n == 0 {
            break;
        }
        off += n;
    }

    buf.truncate(off);
    Ok(Bytes::from(buf))
}

pub fn validate_page_size(page_size: usize) -> Result<(), StreamError> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(StreamError::Validation(format!(
            "invalid page size: {page_size}, must be in 1..={MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}

/// Owned output buffer with an explicit capacity.
///
/// Tracks requested capacity against actual length so "does the output fit"
/// is a checked condition rather than an implicit truncation.
#[derive(Debug, Clone)]
pub struct BoundedBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl BoundedBuffer {
    pub fn new(capacity: usize) -> Self {
        // Do not trust large capacities up front; grow as bytes arrive.
        Self { data: Vec::with_capacity(capacity.min(MAX_PAGE_SIZE)), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    /// Append `bytes`, or return how many bytes would have been needed
    /// without modifying the buffer.
    pub fn try_extend(&mut self, bytes: &[u8]) -> Result<(), usize> {
        if bytes.len() > self.remaining() {
            return Err(self.data.len() + bytes.len());
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
