use mushaf_core::config::validate_config;
use mushaf_core::error::MushafError;
use mushaf_core::render::AlignmentPolicy;
use std::path::PathBuf;

use crate::output;
use crate::StyleArgs;

pub struct ConvertArgs {
    pub style: StyleArgs,
    pub out: Option<PathBuf>,
    pub pages: Option<u32>,
    pub jobs: Option<usize>,
    pub delimiter: Option<char>,
    pub fail_on_gap: bool,
    pub expand: bool,
    pub report: Option<PathBuf>,
}

pub fn run(args: ConvertArgs) -> Result<(), MushafError> {
    let mut config = super::resolve_config(&args.style)?;
    if let Some(pages) = args.pages {
        config.total_pages = pages;
    }
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }
    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
    }
    if args.fail_on_gap {
        config.alignment = AlignmentPolicy::FailPage;
    }
    validate_config(&config)?;
    log::debug!("effective config: {config:?}");

    if args.expand {
        mushaf_core::expand_style(&config, false)?;
    }

    let out_path = args.out.unwrap_or_else(|| config.output_path());
    let outcome = mushaf_core::convert_style_to(&config, &out_path)?;

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&outcome.report)?;
        std::fs::write(path, json)?;
        eprintln!("Run report written to {}", path.display());
    }

    output::table::print_summary(&outcome.report, &out_path);

    Ok(())
}
