/// Stable algorithm IDs (u16), matching the platform codec identifiers.
pub mod algorithm_ids {
    pub const LZ4: u16      = 0x0100;
    pub const ZLIB: u16     = 0x0205;
    pub const LZMA: u16     = 0x0306;
    pub const LZBITMAP: u16 = 0x0702;
    pub const LZFSE: u16    = 0x0801;
    pub const BROTLI: u16   = 0x0B02;
}

/// Default file extensions appended to compressed files.
pub mod extensions {
    pub const LZFSE: &str    = ".lzfse";
    pub const ZLIB: &str     = ".zlib";
    pub const LZ4: &str      = ".lz4";
    pub const LZMA: &str     = ".lzma";
    pub const LZBITMAP: &str = ".lzbitmap";
    pub const BROTLI: &str   = ".brotli";
}

/// Default compression levels.
pub const DEFAULT_LEVEL_ZLIB: u32 = 5;
pub const DEFAULT_LEVEL_LZMA: u32 = 6;
pub const DEFAULT_LEVEL_BROTLI: u32 = 5;
pub const DEFAULT_LEVEL_LZ4: u32 = 0; // block mode has no levels
pub const DEFAULT_LEVEL_LZFSE: u32 = 0; // single level codec

/// Brotli window (log2) and internal writer buffer.
pub const BROTLI_LGWIN: u32 = 22;
pub const BROTLI_BUFFER_SIZE: usize = 4096;

/// LZ4 block stream framing.
pub mod lz4_block {
    /// Input bytes per encoded block.
    pub const BLOCK_SIZE: usize = 64 * 1024;
    /// Compressed block: magic, raw len (u32 LE), payload len (u32 LE), payload.
    pub const MAGIC_COMPRESSED: [u8; 4] = *b"bv41";
    /// Stored block: magic, raw len (u32 LE), raw bytes.
    pub const MAGIC_STORED: [u8; 4] = *b"bv4-";
    /// End of stream marker.
    pub const MAGIC_END: [u8; 4] = *b"bv4$";
}
