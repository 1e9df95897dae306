//! Rust source for the kernel's compiled-in catalog table
//!
//! The output is `include!`d by the kernel next to `CatalogEntry`, so it only
//! refers to `CatalogEntry::new` and plain literals.

use std::fmt::Write;

use crate::layout::Layout;

/// Render the catalog table as Rust items
pub fn rust_table(layout: &Layout) -> String {
    let geometry = layout.geometry();
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "// @generated by catalog-pack. Do not edit.");
    let _ = writeln!(
        out,
        "pub(crate) const GENERATED_TOTAL_SECTORS: u16 = {};",
        geometry.total_sectors
    );
    let _ = writeln!(
        out,
        "pub(crate) const GENERATED_FIRST_DATA_SECTOR: u16 = {};",
        geometry.first_data_sector
    );
    let _ = writeln!(
        out,
        "pub(crate) static GENERATED_ENTRIES: [CatalogEntry; {}] = [",
        layout.files().len()
    );
    for file in layout.files() {
        let name = file
            .name
            .iter()
            .map(|b| format!("0x{b:02X}"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "    // {}\n    CatalogEntry::new([{}], {}, {}),",
            file.display_name(),
            name,
            file.start_sector,
            file.sector_count
        );
    }
    let _ = writeln!(out, "];");
    out
}
