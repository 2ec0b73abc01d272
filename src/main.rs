//! Main entry point for the pltread CLI application.
//!
//! This binary loads a Tecplot binary `.plt` file fully into memory,
//! decodes it and prints a summary or zone listing. All decoding happens
//! in the library; this file only handles file loading and output
//! formatting.

use anyhow::{Context, Result};
use clap::Parser;

use pltread::{Cli, PltDocument, ZoneGeometry};

/// Application entry point.
///
/// Parses command-line arguments, reads the whole input file into an
/// immutable buffer and hands it to the decoder.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let bytes = std::fs::read(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file))?;
    let doc = pltread::decode(&bytes)
        .with_context(|| format!("failed to decode {}", cli.file))?;

    if !cli.quiet {
        print_summary(&doc);
    }
    if cli.list || cli.verbose {
        list_zones(&doc, cli.verbose);
    }

    Ok(())
}

/// Print the file-level summary: title, file type and variable names.
fn print_summary(doc: &PltDocument) {
    println!(
        "{} ({:?}), {} variable(s), {} zone(s)",
        if doc.header.title.is_empty() {
            "<untitled>"
        } else {
            doc.header.title.as_str()
        },
        doc.header.file_type,
        doc.header.var_names.len(),
        doc.header.zones.len()
    );
    println!("variables: {}", doc.header.var_names.join(", "));
}

/// List zones, optionally with per-variable detail.
///
/// Supports two output formats:
/// - Simple format (`-l`): one line per zone with type and extents
/// - Verbose format (`-v`): adds one line per variable with its range,
///   value count, and passive/shared status
fn list_zones(doc: &PltDocument, verbose: bool) {
    for (index, zone) in doc.header.zones.iter().enumerate() {
        let extents = match zone.geometry {
            ZoneGeometry::Ordered { i_max, j_max, k_max } => {
                format!("{i_max} x {j_max} x {k_max}")
            }
            ZoneGeometry::FiniteElement {
                num_pts,
                num_elements,
                ..
            } => format!("{num_pts} pts, {num_elements} elements"),
        };
        println!(
            "zone {index}: {} ({:?}, {extents}, t={})",
            zone.name, zone.zone_type, zone.solution_time
        );

        if !verbose {
            continue;
        }
        let data = &doc.zones[index];
        for (var, name) in doc.header.var_names.iter().enumerate() {
            if data.is_passive(var) {
                println!("  {name}: passive");
            } else if data.share_source[var] != -1 {
                println!("  {name}: shared from zone {}", data.share_source[var]);
            } else if let (Some((min, max)), Some(values)) =
                (data.ranges[var], data.values[var].as_ref())
            {
                println!("  {name}: {} value(s), min {min}, max {max}", values.len());
            }
        }
        if let Some(connect) = &data.connectivity {
            println!("  connectivity: {} node index(es)", connect.len());
        }
    }
}
