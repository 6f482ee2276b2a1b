use crate::error::MushafError;
use crate::render::AlignmentPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Styles shipped with the viewer.
pub const KNOWN_STYLES: &[&str] = &[
    "hafs",
    "hisham",
    "ibn-dhakwan",
    "qpc-nastaleeq",
    "hafs-digital-khatt",
    "hisham-digital-khatt",
    "ibn-dhakwan-digital-khatt",
];

/// Settings for one conversion run. Every field has a default, so a config
/// file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Directory holding one sub-directory per style.
    pub styles_root: PathBuf,
    pub style: String,
    /// Metadata table inside the style directory (`.csv` or `.xlsx`).
    pub metadata_file: String,
    /// Bundled page documents inside the style directory.
    pub archive_file: String,
    pub document_extension: String,
    pub output_dir: PathBuf,
    pub total_pages: u32,
    pub delimiter: char,
    /// Worker threads; 0 lets the pool pick one per core.
    pub jobs: usize,
    pub alignment: AlignmentPolicy,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            styles_root: PathBuf::from("quran-styles"),
            style: "hafs".into(),
            metadata_file: "pages.csv".into(),
            archive_file: "pages.zip".into(),
            document_extension: "docx".into(),
            output_dir: PathBuf::from("public/quran-pages"),
            total_pages: 604,
            delimiter: ',',
            jobs: 0,
            alignment: AlignmentPolicy::Skip,
        }
    }
}

impl ConvertConfig {
    pub fn style_dir(&self) -> PathBuf {
        self.styles_root.join(&self.style)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.style_dir().join(&self.metadata_file)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.style_dir().join(&self.archive_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("data_{}.json", self.style))
    }

    /// The delimiter as a byte. Only valid after [`validate_config`].
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<ConvertConfig, MushafError> {
    let content = std::fs::read_to_string(path).map_err(|e| MushafError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ConvertConfig =
        serde_json::from_str(&content).map_err(|e| MushafError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ConvertConfig, MushafError> {
    let config: ConvertConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &ConvertConfig) -> Result<(), MushafError> {
    if config.style.trim().is_empty() {
        return Err(MushafError::ConfigInvalid("style must not be empty".into()));
    }

    if config.style.contains(['/', '\\']) {
        return Err(MushafError::ConfigInvalid(format!(
            "style '{}' must be a directory name, not a path",
            config.style
        )));
    }

    if config.total_pages == 0 {
        return Err(MushafError::ConfigInvalid(
            "total_pages must be at least 1".into(),
        ));
    }

    if !config.delimiter.is_ascii() || config.delimiter == '"' || config.delimiter == '\n' {
        return Err(MushafError::ConfigInvalid(format!(
            "delimiter {:?} must be a single ASCII character other than a quote or newline",
            config.delimiter
        )));
    }

    if config.document_extension.trim().is_empty() {
        return Err(MushafError::ConfigInvalid(
            "document_extension must not be empty".into(),
        ));
    }

    if !KNOWN_STYLES.contains(&config.style.as_str()) {
        log::warn!(
            "style '{}' is not one of the known styles ({})",
            config.style,
            KNOWN_STYLES.join(", ")
        );
    }

    Ok(())
}
