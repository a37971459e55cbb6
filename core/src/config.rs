//! Stream configuration.
//!
//! Recognized options:
//! - `page_size`: bytes per chunk moved between engine and source/sink.
//!   Affects staging granularity only, never the decoded result.
//! - `decompress_default_capacity`: output capacity for one-shot
//!   decompression when no expected size is given.
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DECOMPRESS_CAPACITY, DEFAULT_PAGE_SIZE};
use crate::types::StreamError;
use crate::utils::validate_page_size;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamConfig {
    pub page_size: usize,
    pub decompress_default_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            decompress_default_capacity: DEFAULT_DECOMPRESS_CAPACITY,
        }
    }
}

impl StreamConfig {
    pub fn new(page_size: Option<usize>, decompress_default_capacity: Option<usize>) -> Self {
        Self {
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            decompress_default_capacity: decompress_default_capacity.unwrap_or(DEFAULT_DECOMPRESS_CAPACITY),
        }
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self { page_size, ..Self::default() }
    }

    /// Parse from JSON; omitted fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, StreamError> {
        let config: StreamConfig = serde_json::from_str(json)
            .map_err(|e| StreamError::Validation(format!("invalid stream config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StreamError> {
        validate_page_size(self.page_size)?;
        if self.decompress_default_capacity == 0 {
            return Err(StreamError::Validation(
                "decompress_default_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
