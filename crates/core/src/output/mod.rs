mod json;
mod yaml;

pub use json::to_json;
pub use yaml::to_yaml;

use crate::scanner::{FileStatus, ScanReport};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Summary,
}

/// Format a scan report in the requested format.
pub fn format_report(report: &ScanReport, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Yaml => to_yaml(report),
        OutputFormat::Summary => Ok(format_summary(report)),
    }
}

/// Generate a human-readable summary
pub fn format_summary(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Import Sort Summary\n\
         ===================\n\
         Target: {}\n\n",
        report.root.display()
    ));

    let changed_label = if report.write { "rewritten" } else { "need sorting" };
    output.push_str(&format!(
        "Files Scanned: {}\n\
         - {}: {}\n\
         - already sorted: {}\n\
         - no imports: {}\n\
         - skipped: {}\n\n",
        report.stats.total_files,
        changed_label,
        report.stats.changed,
        report.stats.clean,
        report.stats.no_imports,
        report.stats.skipped
    ));

    let changed: Vec<_> = report
        .files
        .iter()
        .filter(|file| file.status == FileStatus::Changed)
        .collect();
    if !changed.is_empty() {
        let heading = if report.write {
            "Rewritten:\n"
        } else {
            "Needs sorting:\n"
        };
        output.push_str(heading);
        for file in changed {
            output.push_str(&format!("  {}\n", file.path.display()));
        }
        output.push('\n');
    }

    let skipped: Vec<_> = report
        .files
        .iter()
        .filter(|file| file.status == FileStatus::Skipped)
        .collect();
    if !skipped.is_empty() {
        output.push_str("Skipped:\n");
        for file in skipped {
            let reason = file.error.as_deref().unwrap_or("unknown error");
            output.push_str(&format!("  {} ({})\n", file.path.display(), reason));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Scan Duration: {}ms ({:.2} files/sec)\n\
         Timestamp: {}\n\
         Tool Version: {}\n",
        report.metadata.scan_duration_ms,
        report.metadata.files_per_second,
        report.metadata.timestamp,
        report.metadata.tool_version
    ));

    output
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}
