pub mod config;
pub mod convert;
pub mod expand;
pub mod extract;

use mushaf_core::config::{self as core_config, ConvertConfig};
use mushaf_core::error::MushafError;

use crate::StyleArgs;

/// Load the config file (or defaults) and apply style flags on top.
pub fn resolve_config(args: &StyleArgs) -> Result<ConvertConfig, MushafError> {
    let mut config = match &args.config {
        Some(path) => core_config::load_config(path)?,
        None => ConvertConfig::default(),
    };
    if let Some(style) = &args.style {
        config.style = style.clone();
    }
    if let Some(root) = &args.root {
        config.styles_root = root.clone();
    }
    Ok(config)
}
