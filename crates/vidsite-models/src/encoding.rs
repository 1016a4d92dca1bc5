//! Encoding and artifact layout constants.

/// Alphabet video ids are sampled from.
pub const ID_ALPHABET: &[u8] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

/// Length of a video id.
pub const ID_LENGTH: usize = 5;

/// Hard cap on allocation attempts before giving up. The id space is large
/// relative to the expected catalog size, so hitting this means something is
/// badly wrong and the allocator must fail rather than spin.
pub const MAX_ID_ATTEMPTS: usize = 128;

/// Output bitrate cap passed to the encoder.
pub const OUTPUT_MAXRATE: &str = "1500k";

/// Low resolution thumbnail dimensions (WxH).
pub const THUMBNAIL_LOWRES_SIZE: &str = "376x222";

/// Stored original file stem. The upload's extension is appended only outside
/// production; once the file has been probed the extension carries no information.
pub const ORIGINAL_FILE_STEM: &str = "original";

/// Compressed output file name.
pub const COMPRESSED_FILE_NAME: &str = "compressed.mp4";

/// Full-size thumbnail file name.
pub const THUMBNAIL_FILE_NAME: &str = "thumbnail.png";

/// Low resolution thumbnail file name.
pub const THUMBNAIL_LOWRES_FILE_NAME: &str = "thumbnail-lowres.png";
