use mushaf_core::config::{load_config, ConvertConfig, KNOWN_STYLES};
use mushaf_core::error::MushafError;
use std::path::Path;

use crate::output;

pub fn show(config: Option<&Path>) -> Result<(), MushafError> {
    let config = match config {
        Some(path) => load_config(path)?,
        None => ConvertConfig::default(),
    };
    output::json::print(&config)
}

pub fn validate(file: &Path) -> Result<(), MushafError> {
    let config = load_config(file)?;

    println!("Config '{}' is valid.", file.display());
    println!("  Style:     {}", config.style);
    println!("  Metadata:  {}", config.metadata_path().display());
    println!("  Documents: {}/<page>.{}", config.style_dir().display(), config.document_extension);
    println!("  Output:    {}", config.output_path().display());
    println!("  Pages:     1..={}", config.total_pages);

    // Potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    if !KNOWN_STYLES.contains(&config.style.as_str()) {
        warnings.push(format!("'{}' is not a known style", config.style));
    }
    if !config.metadata_path().is_file() {
        warnings.push(format!(
            "metadata table {} does not exist",
            config.metadata_path().display()
        ));
    }
    if !config.style_dir().is_dir() {
        warnings.push(format!(
            "style directory {} does not exist",
            config.style_dir().display()
        ));
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
