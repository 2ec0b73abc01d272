//! Tecplot binary `.plt` decoding.
//!
//! This module decodes the legacy Tecplot binary format used for
//! simulation mesh/field data: a textual header describing variables and
//! zones, followed by per-zone numeric payloads.
//!
//! ## Architecture
//!
//! The decoder is a chain of components, each reading through the
//! bounds-checked [`ByteCursor`]:
//!
//! - [`cursor`]: little-endian primitive reads over the immutable buffer
//! - [`tecstring`]: the format's 4-byte-per-character string encoding
//! - [`header`]: file prelude, sentinel scans, zone header records
//! - [`data`]: per-zone data records, strictly sequential
//! - [`share`]: post-pass copying shared variable arrays between zones
//!
//! ## Format Overview
//!
//! A `.plt` file consists of:
//! 1. An 8-byte magic marker, byte-order and file-type tags
//! 2. Title and variable names as zero-terminated 4-byte-per-char strings
//! 3. Zone header records, each led by the float32 sentinel `299.0`
//! 4. The end-of-header sentinel `357.0`
//! 5. Zone data records, again led by `299.0`, one per zone in order
//!
//! Records carry no length fields, so the header is delimited by scanning
//! for the sentinels and each data record's start is derived from the
//! previous record's exact end.
//!
//! ## Limitations
//!
//! - FEPolygon and FEPolyhedron zones are recognized but rejected
//! - No SZPLT (length-prefixed container) support
//! - No writer; decoding only
//!
//! The whole buffer must be in memory: sentinel scans and share
//! resolution revisit already-seen regions, so streaming decode of an
//! unbounded source is out of scope by design.

mod cursor;
mod data;
mod error;
mod header;
mod share;
mod structures;
mod tecstring;

pub use cursor::ByteCursor;
pub use error::{PltError, Result};
pub use header::parse_header;
pub use structures::{
    FileHeader, FileType, PltDocument, VarLocation, ZoneData, ZoneGeometry, ZoneHeader, ZoneType,
};

use data::parse_data_section;
use share::resolve_shares;

/// Float32 sentinel leading every zone header and zone data record.
pub(crate) const ZONE_MARKER: f32 = 299.0;

/// Float32 sentinel terminating the header section.
pub(crate) const END_OF_HEADER_MARKER: f32 = 357.0;

/// Decode a complete `.plt` document from a fully buffered file.
///
/// Runs the header parse, the sequential data-section parse and the
/// share-resolution pass. Any failure voids the whole document; there is
/// no partial decode.
///
/// # Example
///
/// ```no_run
/// let bytes = std::fs::read("flow.plt")?;
/// let doc = pltread::decode(&bytes)?;
/// for (header, _data) in doc.header.zones.iter().zip(&doc.zones) {
///     println!("{}", header.name);
/// }
/// # anyhow::Ok(())
/// ```
pub fn decode(buf: &[u8]) -> Result<PltDocument> {
    let header = parse_header(buf)?;
    let mut zones = parse_data_section(buf, &header)?;
    resolve_shares(&header, &mut zones)?;
    Ok(PltDocument { header, zones })
}
