use clap::{Parser, ValueEnum};
use importsense_core::{format_report, ImportScanner, OutputFormat, ScanConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "importsense")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sort and group the leading imports of JavaScript/TypeScript files")]
#[command(long_about = "Rewrites the leading block of import statements into a canonical form: \
    imports are classified (framework core, third-party, internal, components, utils, \
    constants & types, assets & styles, side effects), alphabetized within each group, and \
    labeled when more than one group is present. Supports .js, .jsx, .ts, .tsx and their \
    module variants.\n\n\
    By default nothing is modified; pass --write to apply the sorted blocks, or --check to \
    fail the invocation when any file needs sorting.")]
pub struct Args {
    /// File or directory to process
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Apply the sorted import blocks instead of only reporting
    #[arg(short, long)]
    pub write: bool,

    /// Exit with status 1 when any file needs sorting
    #[arg(long)]
    pub check: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Summary)]
    pub format: OutputFormatArg,

    /// Workspace root (defaults to the nearest directory with a manifest)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Additional ignore patterns (gitignore style)
    #[arg(long, action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Ignore file path (defaults to .gitignore)
    #[arg(long)]
    pub ignore_file: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show verbose progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Parallel threads (0 = auto)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !args.path.exists() {
        anyhow::bail!("path does not exist: {}", args.path.display());
    }

    // Build config
    let mut config = ScanConfig::new(args.path.clone())
        .with_write(args.write)
        .with_ignore_patterns(args.ignore.clone())
        .with_threads(args.threads);

    if let Some(root) = args.root {
        if !root.is_dir() {
            anyhow::bail!("workspace root is not a directory: {}", root.display());
        }
        config = config.with_workspace_root(root);
    }

    if let Some(ignore_file) = args.ignore_file {
        config = config.with_ignore_file(ignore_file);
    }

    // Show progress if verbose
    let spinner = if args.verbose {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Sorting imports...");
        Some(pb)
    } else {
        None
    };

    // Create scanner and run
    let scanner = ImportScanner::new(config)?;
    let report = scanner.scan()?;

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Scanned {} files in {}ms",
            report.stats.total_files, report.metadata.scan_duration_ms
        ));
    }

    // Format output
    let output = format_report(&report, args.format.into())?;

    // Write output
    if let Some(path) = args.output {
        fs::write(&path, &output)?;
        if args.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        println!("{}", output);
    }

    if args.check && !args.write && report.stats.changed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
