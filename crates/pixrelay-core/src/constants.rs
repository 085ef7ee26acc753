//! Shared constants for the relay pipeline.

/// Key prefix under which inbound images arrive.
pub const SOURCE_PREFIX: &str = "images/";

/// Key prefix for relayed objects after a successful forward.
pub const ARCHIVE_PREFIX: &str = "images-archive/";

/// Objects larger than this are handed to the transform service before relay.
pub const RESIZE_THRESHOLD_BYTES: u64 = 5_000_000;

/// File extensions accepted for relay. Matching is case-sensitive.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
