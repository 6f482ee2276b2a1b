use mushaf_core::config::validate_config;
use mushaf_core::error::MushafError;

use crate::StyleArgs;

pub fn run(style: &StyleArgs, remove: bool) -> Result<(), MushafError> {
    let config = super::resolve_config(style)?;
    validate_config(&config)?;

    let written = mushaf_core::expand_style(&config, remove)?;
    if written.is_empty() {
        println!(
            "{} already contains .{} files, nothing to do.",
            config.style_dir().display(),
            config.document_extension
        );
    } else {
        println!(
            "Unpacked {} file(s) into {}",
            written.len(),
            config.style_dir().display()
        );
    }

    Ok(())
}
