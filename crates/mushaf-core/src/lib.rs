pub mod config;
pub mod error;
pub mod extraction;
pub mod metadata;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod report;

use config::ConvertConfig;
use error::MushafError;
use extraction::DocxDirectory;
use pipeline::{ConvertOptions, ConvertOutcome};
use std::path::{Path, PathBuf};

pub use pipeline::{convert_pages, write_output};

/// Main API entry point: convert one style's page documents into the
/// aggregate JSON file.
///
/// Loads the metadata table, converts every page from the style directory
/// and writes `output_dir/data_{style}.json`. Per-page failures end up in the
/// returned report; only failures that make the whole run meaningless
/// (unreadable metadata, unwritable output) are returned as errors.
pub fn convert_style(config: &ConvertConfig) -> Result<ConvertOutcome, MushafError> {
    convert_style_to(config, &config.output_path())
}

/// Like [`convert_style`], but writes the aggregate to `output_path`.
pub fn convert_style_to(
    config: &ConvertConfig,
    output_path: &Path,
) -> Result<ConvertOutcome, MushafError> {
    config::validate_config(config)?;

    let page_lines = metadata::load_metadata(&config.metadata_path(), config.delimiter_byte())?;
    let source = DocxDirectory::new(config.style_dir(), config.document_extension.as_str());

    let outcome = convert_pages(&source, &page_lines, &ConvertOptions::from(config))?;
    write_output(output_path, &outcome.output)?;

    Ok(outcome)
}

/// Unpack the style's bundled archive next to it, unless page documents are
/// already present.
pub fn expand_style(config: &ConvertConfig, remove_archive: bool) -> Result<Vec<PathBuf>, MushafError> {
    extraction::archive::expand_archive(
        &config.archive_path(),
        &config.style_dir(),
        &config.document_extension,
        remove_archive,
    )
}
