// Defaults when Option<T> is None

/// Default page size for streaming filters (32 KiB).
pub const DEFAULT_PAGE_SIZE: usize = 32 * 1024;

/// Default output capacity for one-shot decompression when the caller
/// does not know the decompressed size.
pub const DEFAULT_DECOMPRESS_CAPACITY: usize = 8_000_000;

/// Max page size sanity bound (32 MiB).
pub const MAX_PAGE_SIZE: usize = 32 * 1024 * 1024;

/// Slice size used when feeding a whole buffer through a decoder, so that
/// capacity overflow is caught before the decoder runs far past it.
pub const BUFFER_FEED_SIZE: usize = 64 * 1024;
