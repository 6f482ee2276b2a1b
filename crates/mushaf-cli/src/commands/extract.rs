use mushaf_core::error::MushafError;
use mushaf_core::extraction::docx::extract_docx;
use std::path::Path;

use crate::output;

pub fn run(input_file: &Path, output_format: &str) -> Result<(), MushafError> {
    let bytes = std::fs::read(input_file)?;

    // Page documents are named `{page}.docx`; other names report page 0.
    let page = input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(0);
    let blocks = extract_docx(&bytes).map_err(|reason| MushafError::Extraction { page, reason })?;

    match output_format {
        "json" => output::json::print(&blocks)?,
        _ => output::table::print_blocks(&blocks),
    }

    Ok(())
}
