//! Data model for a decoded `.plt` file.

use super::error::{PltError, Result};

/// File-type tag from the header prelude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Full,
    Grid,
    Solution,
}

impl FileType {
    pub fn from_i16(code: i16, offset: usize) -> Result<Self> {
        match code {
            0 => Ok(FileType::Full),
            1 => Ok(FileType::Grid),
            2 => Ok(FileType::Solution),
            _ => Err(PltError::UnknownFileType { code, offset }),
        }
    }
}

/// Zone type codes as stored in the file.
///
/// All eight codes are structurally recognized, but `FePolygon` and
/// `FePolyhedron` cannot be decoded: they are rejected with
/// [`PltError::UnsupportedZoneType`] before any of their geometry fields
/// is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneType {
    Ordered,
    FeLineSeg,
    FeTriangle,
    FeQuadrilateral,
    FeTetrahedron,
    FeBrick,
    FePolygon,
    FePolyhedron,
}

impl ZoneType {
    pub fn from_i32(code: i32, offset: usize) -> Result<Self> {
        match code {
            0 => Ok(ZoneType::Ordered),
            1 => Ok(ZoneType::FeLineSeg),
            2 => Ok(ZoneType::FeTriangle),
            3 => Ok(ZoneType::FeQuadrilateral),
            4 => Ok(ZoneType::FeTetrahedron),
            5 => Ok(ZoneType::FeBrick),
            6 => Ok(ZoneType::FePolygon),
            7 => Ok(ZoneType::FePolyhedron),
            _ => Err(PltError::UnknownZoneType { code, offset }),
        }
    }

    /// Nodes per element for the supported finite-element types.
    ///
    /// `None` for ordered zones (no connectivity) and for the polygonal
    /// types (no fixed node count; decoding them is unsupported).
    pub fn nodes_per_element(self) -> Option<usize> {
        match self {
            ZoneType::FeLineSeg => Some(2),
            ZoneType::FeTriangle => Some(3),
            ZoneType::FeQuadrilateral => Some(4),
            ZoneType::FeTetrahedron => Some(4),
            ZoneType::FeBrick => Some(8),
            ZoneType::Ordered | ZoneType::FePolygon | ZoneType::FePolyhedron => None,
        }
    }

    pub fn is_ordered(self) -> bool {
        self == ZoneType::Ordered
    }
}

/// Where a variable's values live within a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarLocation {
    Node,
    Cell,
}

impl VarLocation {
    pub fn from_i32(code: i32) -> Self {
        if code == 0 {
            VarLocation::Node
        } else {
            VarLocation::Cell
        }
    }
}

/// Geometry fields of a zone header. The field set branches on zone type,
/// so the two shapes are a closed sum rather than a bag of optionals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneGeometry {
    Ordered {
        i_max: i32,
        j_max: i32,
        k_max: i32,
    },
    FiniteElement {
        num_pts: i32,
        num_elements: i32,
        i_cell_dim: i32,
        j_cell_dim: i32,
        k_cell_dim: i32,
    },
}

/// One zone's metadata record from the header section.
#[derive(Debug, Clone)]
pub struct ZoneHeader {
    pub name: String,
    pub parent_zone: i32,
    pub strand_id: i32,
    pub solution_time: f64,
    pub zone_type: ZoneType,
    /// One location flag per variable, in variable order.
    pub var_locations: Vec<VarLocation>,
    pub raw_face_neighbors: i32,
    pub user_defined_face_neighbors: i32,
    pub geometry: ZoneGeometry,
    pub aux_data_pairs: i32,
}

impl ZoneHeader {
    /// Number of stored values for the variable at `var`, following the
    /// format's node/cell-centered sizing rules.
    pub fn value_count(&self, var: usize) -> usize {
        let node_centered = self.var_locations[var] == VarLocation::Node;
        match self.geometry {
            ZoneGeometry::Ordered { i_max, j_max, k_max } => {
                let k = if node_centered { k_max } else { k_max - 1 };
                (i_max as usize) * (j_max as usize) * (k.max(0) as usize)
            }
            ZoneGeometry::FiniteElement {
                num_pts,
                num_elements,
                ..
            } => {
                if node_centered {
                    num_pts as usize
                } else {
                    num_elements as usize
                }
            }
        }
    }
}

/// The decoded file header: prelude fields plus every zone header found
/// before the end-of-header sentinel, in marker order.
#[derive(Debug, Clone)]
pub struct FileHeader {
    pub magic: [u8; 8],
    pub byte_order: i16,
    pub file_type: FileType,
    pub title: String,
    pub var_names: Vec<String>,
    /// Absolute offset of the first byte past the `357.0` sentinel.
    pub end_of_header: usize,
    pub zones: Vec<ZoneHeader>,
}

impl FileHeader {
    /// Index of the first variable named `name`, if any. Names are not
    /// required to be unique; declaration order decides.
    pub fn var_index(&self, name: &str) -> Option<usize> {
        self.var_names.iter().position(|n| n == name)
    }
}

/// One zone's decoded data-section record.
///
/// Per-variable vectors are indexed in variable declaration order.
/// `values[v]` is `None` for passive variables and, until the share
/// resolution pass runs, for shared ones.
#[derive(Debug, Clone)]
pub struct ZoneData {
    /// Storage-format code per variable, as stored. Retained for
    /// completeness; decoding does not branch on it in this version.
    pub storage_formats: Vec<i32>,
    /// Per-variable passive flags, present only when the record's
    /// passive-variables flag was set.
    pub passive: Option<Vec<bool>>,
    pub has_variable_sharing: bool,
    pub has_connectivity_sharing: bool,
    /// Share-source zone index per variable; -1 means not shared.
    pub share_source: Vec<i32>,
    /// (min, max) per variable, present only for active variables.
    pub ranges: Vec<Option<(f64, f64)>>,
    /// Decoded float32 array per variable.
    pub values: Vec<Option<Vec<f32>>>,
    /// Element connectivity for finite-element zones.
    pub connectivity: Option<Vec<f32>>,
    /// Absolute offset of this record's `299.0` marker.
    pub start_offset: usize,
    /// Absolute offset one past the record's last byte; the next zone's
    /// marker is verified exactly here.
    pub end_offset: usize,
}

impl ZoneData {
    pub fn is_passive(&self, var: usize) -> bool {
        self.passive.as_ref().is_some_and(|p| p[var])
    }

    pub fn is_shared(&self, var: usize) -> bool {
        self.share_source[var] != -1
    }
}

/// A fully decoded `.plt` document: header, zone metadata and every
/// zone's variable arrays with sharing already resolved.
#[derive(Debug, Clone)]
pub struct PltDocument {
    pub header: FileHeader,
    pub zones: Vec<ZoneData>,
}

impl PltDocument {
    /// The decoded array for variable `name` in zone `zone`, if present.
    pub fn variable(&self, zone: usize, name: &str) -> Option<&[f32]> {
        let var = self.header.var_index(name)?;
        self.zones.get(zone)?.values.get(var)?.as_deref()
    }
}
