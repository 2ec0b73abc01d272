//! Variable-sharing resolution.
//!
//! A zone may declare that one of its variables reuses another zone's
//! array instead of storing its own copy. The data section only records
//! the source zone index, so resolution is a separate pass that runs
//! after every zone has been decoded. Zones are resolved in ascending
//! order; a reference is valid when the source index is in range and the
//! source zone holds a materialized array for that variable at the
//! moment of the dereference. That admits forward references to zones
//! that store their own data (all arrays are final before this pass
//! starts) and rejects chains through zones that are themselves only
//! references.

use log::trace;

use super::error::{PltError, Result};
use super::structures::{FileHeader, ZoneData};

/// Copy shared variable arrays from their source zones, in zone order.
///
/// # Errors
///
/// Fails with [`PltError::DanglingShareReference`] when a share-source
/// index is out of range or the referenced zone holds no decoded array
/// for that variable.
pub fn resolve_shares(header: &FileHeader, zones: &mut [ZoneData]) -> Result<()> {
    for zone_index in 0..zones.len() {
        if !zones[zone_index].has_variable_sharing {
            continue;
        }
        for var in 0..header.var_names.len() {
            let source = zones[zone_index].share_source[var];
            if source == -1 {
                continue;
            }
            let array = usize::try_from(source)
                .ok()
                .and_then(|s| zones.get(s))
                .and_then(|z| z.values[var].clone());
            match array {
                Some(array) => {
                    trace!(
                        "zone {zone_index} takes {:?} from zone {source}",
                        header.var_names[var]
                    );
                    zones[zone_index].values[var] = Some(array);
                }
                None => {
                    return Err(PltError::DanglingShareReference {
                        zone: zone_index,
                        variable: header.var_names[var].clone(),
                        source_zone: source,
                    });
                }
            }
        }
    }
    Ok(())
}
