//! Error types for the `.plt` decoder.
//!
//! Every condition is fatal: no parser stage recovers locally, and a
//! failure at any stage voids the whole document. Each variant carries
//! the absolute byte offset at which it was detected so a malformed
//! input can be diagnosed with a hex dump.

use thiserror::Error;

use super::structures::ZoneType;

/// The primary error type for all decoding operations in this crate.
#[derive(Debug, Error)]
pub enum PltError {
    /// A read ran past the end of the buffer.
    #[error("read of {needed} bytes at offset {offset} exceeds buffer length {len}")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        len: usize,
    },

    /// A zero-terminated string field ended before its terminator.
    #[error("truncated string at offset {offset}")]
    TruncatedString { offset: usize },

    /// The buffer is too short to hold the 8-byte magic marker.
    #[error("invalid magic: buffer holds {len} bytes, need at least 8")]
    InvalidMagic { len: usize },

    /// A header field violates the format's structural rules.
    #[error("invalid header: {reason} at offset {offset}")]
    InvalidHeader { reason: &'static str, offset: usize },

    /// The file-type code is outside the known set (0=FULL, 1=GRID, 2=SOLUTION).
    #[error("unknown file type code {code} at offset {offset}")]
    UnknownFileType { code: i16, offset: usize },

    /// The zone-type code is outside the closed enum (0..=7).
    #[error("unknown zone type code {code} at offset {offset}")]
    UnknownZoneType { code: i32, offset: usize },

    /// A recognized but unimplemented zone type (FEPolygon, FEPolyhedron).
    #[error("unsupported zone type {zone_type:?} at offset {offset}")]
    UnsupportedZoneType { zone_type: ZoneType, offset: usize },

    /// The `299.0` record sentinel was absent where a zone record must start.
    #[error("expected zone marker 299.0 at offset {offset}, found {found}")]
    ZoneMarkerMismatch { offset: usize, found: f32 },

    /// A variable-sharing reference points at a zone that holds no
    /// decoded array for that variable, or at no zone at all.
    #[error("zone {zone} shares variable {variable:?} from zone {source_zone}, which holds no data for it")]
    DanglingShareReference {
        zone: usize,
        variable: String,
        source_zone: i32,
    },
}

/// A convenience `Result` type alias using the crate's `PltError` type.
pub type Result<T> = std::result::Result<T, PltError>;
