//! Command-line interface for treexport.
//!
//! Walks a directory tree and writes the export document to a JSON file.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::exit;
use treexport::{BinaryDetection, DEFAULT_MAX_INLINE_BYTES, ExportBuilder, ExportOptions, export, output};

/// treexport — export a directory tree to one JSON document
#[derive(Parser)]
#[command(name = "treexport", version, about, long_about = None)]
struct Cli {
    /// Root directory to scan
    root: PathBuf,

    /// Destination of the JSON document
    outfile: PathBuf,

    /// Largest text file (bytes) whose content is inlined
    #[arg(long, default_value_t = DEFAULT_MAX_INLINE_BYTES)]
    max_bytes: u64,

    /// Extra directory names to exclude, case-insensitive (can be repeated)
    #[arg(short = 'x', long = "exclude")]
    exclude_dirs: Vec<String>,

    /// Do not exclude the built-in directory names (.git, node_modules, ...)
    #[arg(long)]
    no_default_excludes: bool,

    /// Hash only the first N bytes of files that are not inlined
    #[arg(long, value_name = "N")]
    hash_prefix: Option<u64>,

    /// Glob patterns (relative to root) to skip (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Honor .gitignore files
    #[arg(long)]
    gitignore: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    no_hidden: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Binary probe strategy
    #[arg(long, value_enum, default_value_t = ProbeMode::Simple)]
    binary_detection: ProbeMode,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ProbeMode {
    Simple,
    Accurate,
    None,
}

impl From<ProbeMode> for BinaryDetection {
    fn from(mode: ProbeMode) -> Self {
        match mode {
            ProbeMode::Simple => BinaryDetection::Simple,
            ProbeMode::Accurate => BinaryDetection::Accurate,
            ProbeMode::None => BinaryDetection::None,
        }
    }
}

impl Cli {
    fn into_options(self) -> (ExportOptions, PathBuf) {
        let options = ExportBuilder::new(self.root)
            .max_inline_bytes(self.max_bytes)
            .exclude_dirs(self.exclude_dirs)
            .use_default_excludes(!self.no_default_excludes)
            .hash_prefix_bytes(self.hash_prefix)
            .ignore_patterns(self.ignore_patterns)
            .respect_gitignore(self.gitignore)
            .include_hidden(!self.no_hidden)
            .follow_links(self.follow_links)
            .binary_detection(self.binary_detection.into())
            .build();
        (options, self.outfile)
    }
}

#[cfg(feature = "logging")]
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

fn main() {
    #[cfg(feature = "logging")]
    init_logging();

    let cli = Cli::parse();
    let (options, outfile) = cli.into_options();

    let report = match export(options.clone()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    if let Err(e) = output::write_report_to_file(report, &options, &outfile) {
        eprintln!("Error: {}", e);
        exit(1);
    }

    println!("Done. Output: {}", outfile.display());
}
