//! Data-section parsing.
//!
//! Zone data records carry no length field: each zone's start offset is
//! only known once the previous zone's exact byte length has been
//! consumed, so the section is decoded strictly in zone declaration
//! order. The first record is located by scanning forward from the end
//! of the header for the `299.0` marker; every subsequent record must
//! begin exactly where the previous one ended, and that expectation is
//! verified against the marker before decoding.

use log::{debug, trace};

use super::cursor::ByteCursor;
use super::error::{PltError, Result};
use super::structures::{FileHeader, ZoneData, ZoneGeometry, ZoneHeader};
use super::ZONE_MARKER;

/// Decode every zone's data record, in zone declaration order.
///
/// # Errors
///
/// Fails with [`PltError::ZoneMarkerMismatch`] when a record does not
/// start with the `299.0` sentinel, [`PltError::UnsupportedZoneType`]
/// for connectivity of a zone type with no fixed node count, and
/// [`PltError::OutOfBounds`] when any payload runs past the buffer.
pub fn parse_data_section(buf: &[u8], header: &FileHeader) -> Result<Vec<ZoneData>> {
    // A zone-less file has no data section to scan for.
    if header.zones.is_empty() {
        return Ok(Vec::new());
    }
    let cursor = ByteCursor::new(buf, 0);
    let mut start = find_first_marker(&cursor, header.end_of_header)?;
    debug!("data section starts at {start}");

    let mut zones = Vec::with_capacity(header.zones.len());
    for (index, zone_header) in header.zones.iter().enumerate() {
        let zone = parse_zone_data(buf, header, zone_header, start)?;
        trace!(
            "zone {index} data: bytes {}..{}",
            zone.start_offset,
            zone.end_offset
        );
        start = zone.end_offset;
        zones.push(zone);
    }
    Ok(zones)
}

/// Scan forward from `start` for the first data-record marker.
fn find_first_marker(cursor: &ByteCursor<'_>, start: usize) -> Result<usize> {
    let mut offset = start;
    while offset + 4 <= cursor.len() {
        if cursor.peek_f32_at(offset)? == ZONE_MARKER {
            return Ok(offset);
        }
        offset += 4;
    }
    Err(PltError::OutOfBounds {
        offset,
        needed: 4,
        len: cursor.len(),
    })
}

/// Decode one zone's data record beginning at `start`.
fn parse_zone_data(
    buf: &[u8],
    header: &FileHeader,
    zone_header: &ZoneHeader,
    start: usize,
) -> Result<ZoneData> {
    let num_vars = header.var_names.len();
    let mut cursor = ByteCursor::new(buf, start);

    let found = cursor.read_f32()?;
    if found != ZONE_MARKER {
        return Err(PltError::ZoneMarkerMismatch {
            offset: start,
            found,
        });
    }

    let mut storage_formats = Vec::with_capacity(num_vars);
    for _ in 0..num_vars {
        storage_formats.push(cursor.read_i32()?);
    }

    let passive = if cursor.read_i32()? != 0 {
        let mut flags = Vec::with_capacity(num_vars);
        for _ in 0..num_vars {
            flags.push(cursor.read_i32()? != 0);
        }
        Some(flags)
    } else {
        None
    };

    let has_variable_sharing = cursor.read_i32()? != 0;
    let share_source = if has_variable_sharing {
        let mut sources = Vec::with_capacity(num_vars);
        for _ in 0..num_vars {
            sources.push(cursor.read_i32()?);
        }
        sources
    } else {
        vec![-1; num_vars]
    };

    let has_connectivity_sharing = cursor.read_i32()? != 0;

    let mut zone = ZoneData {
        storage_formats,
        passive,
        has_variable_sharing,
        has_connectivity_sharing,
        share_source,
        ranges: vec![None; num_vars],
        values: vec![None; num_vars],
        connectivity: None,
        start_offset: start,
        end_offset: start,
    };

    // Active variables: neither passive nor shared. Only they carry a
    // min/max pair and a payload in this record.
    let active: Vec<usize> = (0..num_vars)
        .filter(|&v| !zone.is_passive(v) && !zone.is_shared(v))
        .collect();

    for &var in &active {
        let min = cursor.read_f64()?;
        let max = cursor.read_f64()?;
        zone.ranges[var] = Some((min, max));
    }

    for &var in &active {
        let count = zone_header.value_count(var);
        zone.values[var] = Some(cursor.read_f32_array(count)?);
    }

    if !zone_header.zone_type.is_ordered() {
        let nodes = zone_header.zone_type.nodes_per_element().ok_or(
            PltError::UnsupportedZoneType {
                zone_type: zone_header.zone_type,
                offset: cursor.position(),
            },
        )?;
        let num_elements = match zone_header.geometry {
            ZoneGeometry::FiniteElement { num_elements, .. } => num_elements.max(0) as usize,
            // Ordered geometry cannot occur for a non-ordered zone type.
            ZoneGeometry::Ordered { .. } => 0,
        };
        zone.connectivity = Some(cursor.read_f32_array(num_elements * nodes)?);
    }

    zone.end_offset = cursor.position();
    Ok(zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plt::structures::{VarLocation, ZoneType};

    fn push_i32(buf: &mut Vec<u8>, v: i32) {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    fn push_f32(buf: &mut Vec<u8>, v: f32) {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    fn push_f64(buf: &mut Vec<u8>, v: f64) {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    fn header_with(zones: Vec<ZoneHeader>, num_vars: usize) -> FileHeader {
        FileHeader {
            magic: *b"#!TDV112",
            byte_order: 1,
            file_type: crate::plt::structures::FileType::Full,
            title: String::new(),
            var_names: (0..num_vars).map(|i| format!("v{i}")).collect(),
            end_of_header: 0,
            zones,
        }
    }

    fn ordered_zone(i: i32, j: i32, k: i32, num_vars: usize) -> ZoneHeader {
        ZoneHeader {
            name: "Z".into(),
            parent_zone: -1,
            strand_id: -1,
            solution_time: 0.0,
            zone_type: ZoneType::Ordered,
            var_locations: vec![VarLocation::Node; num_vars],
            raw_face_neighbors: 0,
            user_defined_face_neighbors: 0,
            geometry: ZoneGeometry::Ordered {
                i_max: i,
                j_max: j,
                k_max: k,
            },
            aux_data_pairs: 0,
        }
    }

    #[test]
    fn ordered_zone_record_decodes_payloads_and_end_offset() {
        // One 2x3x1 node-centered zone, two variables, no flags set.
        let header = header_with(vec![ordered_zone(2, 3, 1, 2)], 2);
        let mut buf = Vec::new();
        push_f32(&mut buf, 299.0);
        push_i32(&mut buf, 1); // storage format v0
        push_i32(&mut buf, 1); // storage format v1
        push_i32(&mut buf, 0); // no passive variables
        push_i32(&mut buf, 0); // no sharing
        push_i32(&mut buf, 0); // no connectivity sharing
        for var in 0..2 {
            push_f64(&mut buf, var as f64); // min
            push_f64(&mut buf, var as f64 + 5.0); // max
        }
        for var in 0..2 {
            for i in 0..6 {
                push_f32(&mut buf, (var * 10 + i) as f32);
            }
        }

        let zones = parse_data_section(&buf, &header).unwrap();
        assert_eq!(zones.len(), 1);
        let zone = &zones[0];
        assert_eq!(zone.ranges[1], Some((1.0, 6.0)));
        assert_eq!(zone.values[0].as_deref().unwrap().len(), 6);
        assert_eq!(zone.values[1].as_deref().unwrap()[0], 10.0);
        assert_eq!(zone.start_offset, 0);
        assert_eq!(zone.end_offset, buf.len());
        assert!(!zone.has_variable_sharing);
        assert!(zone.connectivity.is_none());
    }

    #[test]
    fn missing_marker_is_a_mismatch() {
        let header = header_with(vec![ordered_zone(1, 1, 1, 1)], 1);
        let mut buf = Vec::new();
        push_f32(&mut buf, 299.0);
        push_f32(&mut buf, 0.0);
        let err = parse_zone_data(&buf, &header, &header.zones[0], 4).unwrap_err();
        assert!(matches!(
            err,
            PltError::ZoneMarkerMismatch {
                offset: 4,
                found
            } if found == 0.0
        ));
    }

    #[test]
    fn passive_variables_carry_no_payload() {
        let header = header_with(vec![ordered_zone(1, 1, 1, 2)], 2);
        let mut buf = Vec::new();
        push_f32(&mut buf, 299.0);
        push_i32(&mut buf, 1);
        push_i32(&mut buf, 1);
        push_i32(&mut buf, 1); // passive flag set
        push_i32(&mut buf, 0); // v0 active
        push_i32(&mut buf, 1); // v1 passive
        push_i32(&mut buf, 0); // no sharing
        push_i32(&mut buf, 0); // no connectivity sharing
        push_f64(&mut buf, 0.0);
        push_f64(&mut buf, 1.0);
        push_f32(&mut buf, 3.5); // v0's single value

        let zones = parse_data_section(&buf, &header).unwrap();
        let zone = &zones[0];
        assert_eq!(zone.values[0].as_deref(), Some([3.5].as_slice()));
        assert!(zone.values[1].is_none());
        assert!(zone.ranges[1].is_none());
        assert!(zone.is_passive(1));
    }
}
