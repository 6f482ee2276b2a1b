use std::io::{BufWriter, Write};
use std::path::Path;

use rayon::prelude::*;

use crate::config::ConvertConfig;
use crate::error::MushafError;
use crate::extraction::PageSource;
use crate::model::{AggregateOutput, LineMetadata, PageLines, PageResult};
use crate::render::{render_page, AlignmentPolicy};
use crate::report::{RunReport, RunWarning, WarningKind};

/// Options for [`convert_pages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Pages `1..=total_pages` are converted.
    pub total_pages: u32,
    /// Worker threads; 0 lets rayon pick one per core.
    pub jobs: usize,
    pub alignment: AlignmentPolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            total_pages: 604,
            jobs: 0,
            alignment: AlignmentPolicy::Skip,
        }
    }
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        ConvertOptions {
            total_pages: config.total_pages,
            jobs: config.jobs,
            alignment: config.alignment,
        }
    }
}

/// Aggregated pages plus the report of everything that went wrong.
#[derive(Debug, Clone, Default)]
pub struct ConvertOutcome {
    pub output: AggregateOutput,
    pub report: RunReport,
}

enum PageOutcome {
    Converted(u32, PageResult, Vec<RunWarning>),
    Dropped(RunWarning),
}

/// Convert every page on a bounded worker pool and join the results.
///
/// A page that cannot be converted is reported and left out; it never stops
/// the other pages.
pub fn convert_pages(
    source: &dyn PageSource,
    pages: &PageLines,
    options: &ConvertOptions,
) -> Result<ConvertOutcome, MushafError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .thread_name(|i| format!("mushaf-page-{i}"))
        .build()
        .map_err(|e| MushafError::WorkerPool(e.to_string()))?;

    log::info!(
        "converting {} pages from the {} backend on {} threads",
        options.total_pages,
        source.backend_name(),
        pool.current_num_threads()
    );

    let results: Vec<PageOutcome> = pool.install(|| {
        (1..=options.total_pages)
            .into_par_iter()
            .map(|page| convert_page(source, page, pages.get(&page), options.alignment))
            .collect()
    });

    let mut outcome = ConvertOutcome::default();
    outcome.report.pages_requested = options.total_pages;

    for result in results {
        match result {
            PageOutcome::Converted(page, page_result, warnings) => {
                outcome.report.warnings.extend(warnings);
                outcome.output.pages.insert(page, page_result);
            }
            PageOutcome::Dropped(warning) => outcome.report.warnings.push(warning),
        }
    }

    outcome.report.pages_written = outcome.output.pages.len();
    outcome.report.sort();

    let gaps = outcome.report.warnings_of(WarningKind::AlignmentGap).count();
    log::info!(
        "converted {} of {} pages ({} dropped, {} alignment gaps)",
        outcome.report.pages_written,
        options.total_pages,
        outcome.report.dropped_pages().len(),
        gaps
    );
    if gaps > 0 {
        log::warn!(
            "{} content lines had no matching text; the metadata table and documents have drifted",
            gaps
        );
    }

    Ok(outcome)
}

fn convert_page(
    source: &dyn PageSource,
    page: u32,
    lines: Option<&Vec<LineMetadata>>,
    alignment: AlignmentPolicy,
) -> PageOutcome {
    let Some(lines) = lines else {
        log::warn!("page {page}: no line metadata, skipping");
        return PageOutcome::Dropped(RunWarning {
            page,
            line: None,
            kind: WarningKind::MissingMetadata,
            message: "no line metadata for page".into(),
        });
    };

    let blocks = match source.extract_page(page) {
        Ok(blocks) => blocks,
        Err(e) => {
            log::warn!("{e}");
            return PageOutcome::Dropped(RunWarning {
                page,
                line: None,
                kind: WarningKind::ExtractionFailed,
                message: e.to_string(),
            });
        }
    };

    let rendered = match render_page(page, &blocks, lines, alignment) {
        Ok(rendered) => rendered,
        Err(e) => {
            log::warn!("{e}");
            let line = match e {
                MushafError::Alignment { line, .. } => Some(line),
                _ => None,
            };
            return PageOutcome::Dropped(RunWarning {
                page,
                line,
                kind: WarningKind::RenderFailed,
                message: e.to_string(),
            });
        }
    };

    log::debug!(
        "page {page}: {} of {} text blocks used for content",
        rendered.consumed,
        blocks.len()
    );

    let warnings = rendered
        .alignment_gaps
        .iter()
        .map(|&line| RunWarning {
            page,
            line: Some(line),
            kind: WarningKind::AlignmentGap,
            message: format!("no text block left for content line {line}"),
        })
        .collect();

    PageOutcome::Converted(
        page,
        PageResult {
            html_content: rendered.content,
            notes_content: rendered.notes,
        },
        warnings,
    )
}

/// Write the aggregate as pretty JSON, replacing `path` atomically.
///
/// Parent directories are created as needed. The JSON goes to a temporary
/// file next to `path` first, so readers never see a partial document.
pub fn write_output(path: &Path, output: &AggregateOutput) -> Result<(), MushafError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, output)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| MushafError::Io(e.error))?;

    log::info!("wrote {} pages to {}", output.pages.len(), path.display());
    Ok(())
}
