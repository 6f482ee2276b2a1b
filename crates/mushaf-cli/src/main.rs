mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mushaf",
    version,
    about = "Convert annotated mushaf page documents into page data for the viewer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where a style's inputs live.
#[derive(Args)]
pub struct StyleArgs {
    /// JSON config file (defaults apply to anything it leaves out)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Style name, e.g. hafs or ibn-dhakwan
    #[arg(short, long)]
    style: Option<String>,

    /// Directory holding one sub-directory per style
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every page of a style into one JSON file
    Convert {
        #[command(flatten)]
        style: StyleArgs,

        /// Output file (default: <output_dir>/data_<style>.json)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Number of pages to convert, starting at 1
        #[arg(long, value_name = "N")]
        pages: Option<u32>,

        /// Worker threads (0 = one per core)
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,

        /// Metadata table delimiter
        #[arg(long, value_name = "C")]
        delimiter: Option<char>,

        /// Drop a page when a content line has no text, instead of skipping the line
        #[arg(long)]
        fail_on_gap: bool,

        /// Unpack the style's page archive first
        #[arg(long)]
        expand: bool,

        /// Write the run report as JSON
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
    /// Print the text blocks of a single page document
    Extract {
        /// Path to a DOCX page document
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Unpack a style's bundled page archive
    Expand {
        #[command(flatten)]
        style: StyleArgs,

        /// Delete the archive after unpacking
        #[arg(long)]
        remove: bool,
    },
    /// Inspect and check config files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config as JSON
    Show {
        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Validate a config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            style,
            out,
            pages,
            jobs,
            delimiter,
            fail_on_gap,
            expand,
            report,
        } => commands::convert::run(commands::convert::ConvertArgs {
            style,
            out,
            pages,
            jobs,
            delimiter,
            fail_on_gap,
            expand,
            report,
        }),
        Commands::Extract { input_file, output } => commands::extract::run(&input_file, &output),
        Commands::Expand { style, remove } => commands::expand::run(&style, remove),
        Commands::Config { action } => match action {
            ConfigAction::Show { config } => commands::config::show(config.as_deref()),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
