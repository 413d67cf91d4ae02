//! Reference-table diagnostics command

use std::path::Path;

use anyhow::Result;

use sanket_core::ReferenceTables;

pub fn cmd_reference(reference_dir: &Path) -> Result<()> {
    let tables = ReferenceTables::load_dir(reference_dir);

    println!("Reference data in {}:", reference_dir.display());
    println!("  handles:        {}", tables.handle_to_bank.len());
    println!("  IFSC prefixes:  {}", tables.ifsc_to_bank.len());
    println!("  origins:        {}", tables.website_to_origin.len());
    println!("  categories:     {}", tables.website_to_category.len());

    if !tables.is_loaded() {
        println!("No reference data loaded; merging will be blocked.");
    }

    Ok(())
}
