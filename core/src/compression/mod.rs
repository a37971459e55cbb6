//! compression/mod.rs
//! Algorithm table, codec capabilities, and one-shot buffer compression.
//!
//! Notes:
//! - The registry resolves algorithm ids to codec implementations.
//! - Codecs are incremental; the stream filters drive them page by page.
//! - Buffer mode runs the same codecs once over the whole input.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;
pub mod buffer;

pub use constants::*;
pub use types::*;
pub use registry::*;
pub use buffer::*;
