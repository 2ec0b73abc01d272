//! # pltread
//!
//! A decoder for legacy Tecplot binary `.plt` mesh/field data files.
//!
//! This library decodes the classic (pre-SZPLT) Tecplot binary layout: a
//! header describing variables and zones, followed by per-zone numeric
//! payloads, variable-sharing references and optional finite-element
//! connectivity. The decoder works on a fully buffered, immutable byte
//! sequence and produces an in-memory document; it never writes.
//!
//! ## Features
//!
//! - Ordered (structured) zones and the fixed-node finite-element zone
//!   types (line segment, triangle, quadrilateral, tetrahedron, brick)
//! - Passive variables and cross-zone variable sharing
//! - Per-variable min/max ranges and node/cell-centered value counts
//! - Enumerated, offset-carrying errors for every failure mode
//!
//! ## Example
//!
//! ```no_run
//! fn main() -> anyhow::Result<()> {
//!     let bytes = std::fs::read("flow.plt")?;
//!     let doc = pltread::decode(&bytes)?;
//!
//!     println!("{} ({:?})", doc.header.title, doc.header.file_type);
//!     for zone in &doc.header.zones {
//!         println!("zone {} ({:?})", zone.name, zone.zone_type);
//!     }
//!     if let Some(x) = doc.variable(0, "X") {
//!         println!("first X value: {}", x[0]);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod plt;

pub use cli::Cli;
pub use plt::{
    decode, FileHeader, FileType, PltDocument, PltError, ZoneData, ZoneGeometry, ZoneHeader,
    ZoneType,
};
