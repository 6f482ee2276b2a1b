use mushaf_core::extraction::{BlockKind, TextBlock};
use mushaf_core::report::{RunReport, WarningKind};
use std::path::Path;

pub fn print_blocks(blocks: &[TextBlock]) {
    if blocks.is_empty() {
        println!("No text blocks found.");
        return;
    }

    println!("  {:>3}  {:<10}  Text", "#", "Kind");
    println!("  {}", "-".repeat(60));
    for (i, block) in blocks.iter().enumerate() {
        let kind = match block.kind {
            BlockKind::Paragraph => "paragraph".to_string(),
            BlockKind::Heading { level } => format!("heading {level}"),
        };
        println!("  {:>3}  {:<10}  {}", i + 1, kind, block.text);
    }
    println!();
    println!("{} block(s)", blocks.len());
}

/// Run summary, on stderr so stdout stays clean for piping.
pub fn print_summary(report: &RunReport, out_path: &Path) {
    eprintln!(
        "Converted {} of {} page(s), written to {}",
        report.pages_written,
        report.pages_requested,
        out_path.display()
    );

    let dropped = report.dropped_pages();
    if !dropped.is_empty() {
        eprintln!("  {} page(s) left out:", dropped.len());
        for w in report.warnings.iter().filter(|w| w.kind.drops_page()) {
            eprintln!("    page {:>3}: {}", w.page, w.message);
        }
    }

    let gaps: Vec<_> = report.warnings_of(WarningKind::AlignmentGap).collect();
    if !gaps.is_empty() {
        eprintln!(
            "  {} content line(s) had no matching text (metadata and documents disagree):",
            gaps.len()
        );
        for w in gaps {
            eprintln!("    page {:>3}, line {:>2}", w.page, w.line.unwrap_or_default());
        }
    }
}
