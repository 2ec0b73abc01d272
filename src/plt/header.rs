//! Header-section parsing.
//!
//! The header has no length field and no framing for its zone records.
//! After the fixed prelude (magic, byte order, file type) and the
//! variable names, the only way to delimit it is the format's sentinel
//! scheme: step through the remaining bytes four at a time, reading each
//! quad as a little-endian float32, until the end-of-header value `357.0`
//! appears. Every `299.0` within that span marks the start of one zone
//! header record, in zone declaration order.

use log::{debug, trace};

use super::cursor::ByteCursor;
use super::error::{PltError, Result};
use super::structures::{FileHeader, FileType, VarLocation, ZoneGeometry, ZoneHeader, ZoneType};
use super::tecstring::read_tec_string;
use super::{END_OF_HEADER_MARKER, ZONE_MARKER};

/// Parse the complete file header from the start of the buffer.
///
/// # Errors
///
/// Fails with [`PltError::InvalidMagic`] when fewer than 8 bytes are
/// available, [`PltError::UnknownFileType`] for a file-type code outside
/// 0..=2, and with whatever condition a zone header record raises. A
/// buffer whose end-of-header sentinel never appears fails
/// [`PltError::OutOfBounds`] rather than scanning forever.
pub fn parse_header(buf: &[u8]) -> Result<FileHeader> {
    if buf.len() < 8 {
        return Err(PltError::InvalidMagic { len: buf.len() });
    }
    let mut magic = [0u8; 8];
    magic.copy_from_slice(&buf[..8]);

    let mut cursor = ByteCursor::new(buf, 8);
    let byte_order = cursor.read_i16()?;
    let file_type_offset = cursor.position();
    let file_type = FileType::from_i16(cursor.read_i16()?, file_type_offset)?;

    let title = read_tec_string(&mut cursor)?;
    let num_vars = cursor.read_i32()?.max(0) as usize;
    let mut var_names = Vec::with_capacity(num_vars);
    for _ in 0..num_vars {
        var_names.push(read_tec_string(&mut cursor)?);
    }
    debug!(
        "header prelude: type {file_type:?}, title {title:?}, {num_vars} variable(s)"
    );

    // Everything from here to the 357.0 sentinel is zone header records.
    let scan_start = cursor.position();
    let end_of_header = find_end_of_header(&cursor, scan_start)?;
    let markers = find_zone_markers(&cursor, scan_start, end_of_header - 4)?;
    debug!(
        "end of header at {end_of_header}, {} zone marker(s)",
        markers.len()
    );

    let mut zones = Vec::with_capacity(markers.len());
    for marker in markers {
        let mut zone_cursor = ByteCursor::new(buf, marker + 4);
        zones.push(parse_zone_header(&mut zone_cursor, num_vars)?);
    }

    Ok(FileHeader {
        magic,
        byte_order,
        file_type,
        title,
        var_names,
        end_of_header,
        zones,
    })
}

/// Scan forward for the `357.0` sentinel; returns the offset one past it.
fn find_end_of_header(cursor: &ByteCursor<'_>, start: usize) -> Result<usize> {
    let mut offset = start;
    while offset + 4 <= cursor.len() {
        if cursor.peek_f32_at(offset)? == END_OF_HEADER_MARKER {
            return Ok(offset + 4);
        }
        offset += 4;
    }
    // Sentinel absent: the scan must stop at the buffer end, not spin.
    Err(PltError::OutOfBounds {
        offset,
        needed: 4,
        len: cursor.len(),
    })
}

/// Collect every `299.0` marker offset in `[start, end)`, ascending.
fn find_zone_markers(cursor: &ByteCursor<'_>, start: usize, end: usize) -> Result<Vec<usize>> {
    let mut markers = Vec::new();
    let mut offset = start;
    while offset + 4 <= end {
        if cursor.peek_f32_at(offset)? == ZONE_MARKER {
            trace!("zone header marker at {offset}");
            markers.push(offset);
        }
        offset += 4;
    }
    Ok(markers)
}

/// Decode one zone header record, starting just past its `299.0` marker.
///
/// Fields are positional and fixed-width; the layout branches only on
/// the zone type and on the variable-location flag. The polygonal types
/// are rejected before any of their geometry fields is read.
pub fn parse_zone_header(cursor: &mut ByteCursor<'_>, num_vars: usize) -> Result<ZoneHeader> {
    let name = read_tec_string(cursor)?;
    let parent_zone = cursor.read_i32()?;
    let strand_id = cursor.read_i32()?;
    let solution_time = cursor.read_f64()?;
    let _reserved = cursor.read_i32()?;

    let zone_type_offset = cursor.position();
    let zone_type = ZoneType::from_i32(cursor.read_i32()?, zone_type_offset)?;

    // 0 = every variable node-centered, 1 = explicit per-variable codes.
    let var_locations = if cursor.read_i32()? == 1 {
        let mut locations = Vec::with_capacity(num_vars);
        for _ in 0..num_vars {
            locations.push(VarLocation::from_i32(cursor.read_i32()?));
        }
        locations
    } else {
        vec![VarLocation::Node; num_vars]
    };

    let mut raw_face_neighbors = cursor.read_i32()?;
    let user_defined_face_neighbors = cursor.read_i32()?;
    if !zone_type.is_ordered() {
        // Format quirk: non-ordered zones repeat this field.
        raw_face_neighbors = cursor.read_i32()?;
    }

    let geometry = if zone_type.is_ordered() {
        let geometry_offset = cursor.position();
        let i_max = cursor.read_i32()?;
        let j_max = cursor.read_i32()?;
        let k_max = cursor.read_i32()?;
        // Extents below 1 have no meaning and would poison every value
        // count derived from them.
        if i_max < 1 || j_max < 1 || k_max < 1 {
            return Err(PltError::InvalidHeader {
                reason: "ordered zone extent below 1",
                offset: geometry_offset,
            });
        }
        ZoneGeometry::Ordered { i_max, j_max, k_max }
    } else {
        if zone_type.nodes_per_element().is_none() {
            return Err(PltError::UnsupportedZoneType {
                zone_type,
                offset: cursor.position(),
            });
        }
        let geometry_offset = cursor.position();
        let num_pts = cursor.read_i32()?;
        let num_elements = cursor.read_i32()?;
        if num_pts < 0 || num_elements < 0 {
            return Err(PltError::InvalidHeader {
                reason: "negative finite-element count",
                offset: geometry_offset,
            });
        }
        ZoneGeometry::FiniteElement {
            num_pts,
            num_elements,
            i_cell_dim: cursor.read_i32()?,
            j_cell_dim: cursor.read_i32()?,
            k_cell_dim: cursor.read_i32()?,
        }
    };

    let aux_data_pairs = cursor.read_i32()?;
    debug!("zone header {name:?}: {zone_type:?}");

    Ok(ZoneHeader {
        name,
        parent_zone,
        strand_id,
        solution_time,
        zone_type,
        var_locations,
        raw_face_neighbors,
        user_defined_face_neighbors,
        geometry,
        aux_data_pairs,
    })
}
