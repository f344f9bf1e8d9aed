use crate::config::{ConfigError, IgnoreFilter, ScanConfig};
use crate::detect::{discover_context, resolve_workspace_root};
use crate::models::{ProjectContext, RewriteOutcome, SourceKind};
use crate::rewrite::plan_rewrite;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Unsupported file type: {} (expected .js, .jsx, .ts, .tsx or a variant)", .0.display())]
    UnsupportedFile(PathBuf),
    #[error("Could not resolve a workspace root for {}", .0.display())]
    WorkspaceRoot(PathBuf),
}

/// Per-file result of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// The import block was (or would be) rewritten.
    Changed,
    /// The import block is already canonical.
    Clean,
    /// No leading import block was found.
    NoImports,
    /// The file could not be read or written back.
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Path relative to the scan root.
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    pub total_files: usize,
    pub changed: usize,
    pub clean: usize,
    pub no_imports: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    pub scan_duration_ms: u64,
    pub files_per_second: f64,
    pub timestamp: String,
    pub tool_version: String,
}

impl Default for ScanMetadata {
    fn default() -> Self {
        Self {
            scan_duration_ms: 0,
            files_per_second: 0.0,
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Aggregated results for one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub root: PathBuf,
    /// Whether edits were applied or only planned.
    pub write: bool,
    pub files: Vec<FileReport>,
    pub stats: ScanStats,
    pub metadata: ScanMetadata,
}

/// Runs the rewrite pipeline over a file or directory tree.
pub struct ImportScanner {
    config: ScanConfig,
    ignore_filter: IgnoreFilter,
}

impl ImportScanner {
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let ignore_filter = IgnoreFilter::new(&config)?;
        Ok(Self {
            config,
            ignore_filter,
        })
    }

    /// Scan the target and return the report. The project context is
    /// computed once for the workspace root and shared across files.
    pub fn scan(&self) -> Result<ScanReport, ScanError> {
        let start = Instant::now();

        let workspace_root = match &self.config.workspace_root {
            Some(root) => root.clone(),
            None => resolve_workspace_root(&self.config.root)
                .ok_or_else(|| ScanError::WorkspaceRoot(self.config.root.clone()))?,
        };
        let context = discover_context(&workspace_root);

        let targets = self.find_source_files()?;

        let files: Vec<FileReport> = if self.config.threads == 1 {
            targets
                .iter()
                .map(|(path, kind)| self.process_file(path, *kind, &context))
                .collect()
        } else {
            let pool = if self.config.threads > 0 {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(self.config.threads)
                    .build()
                    .ok()
            } else {
                None
            };

            match pool {
                Some(pool) => pool.install(|| {
                    targets
                        .par_iter()
                        .map(|(path, kind)| self.process_file(path, *kind, &context))
                        .collect()
                }),
                None => targets
                    .par_iter()
                    .map(|(path, kind)| self.process_file(path, *kind, &context))
                    .collect(),
            }
        };

        let stats = calculate_stats(&files);

        let duration = start.elapsed();
        let metadata = ScanMetadata {
            scan_duration_ms: duration.as_millis() as u64,
            files_per_second: if duration.as_secs_f64() > 0.0 {
                files.len() as f64 / duration.as_secs_f64()
            } else {
                0.0
            },
            ..Default::default()
        };

        Ok(ScanReport {
            root: self.config.root.clone(),
            write: self.config.write,
            files,
            stats,
            metadata,
        })
    }

    /// Collect the files to process. An explicit file target must be a
    /// supported source file; within a directory, unsupported files are
    /// silently passed over.
    fn find_source_files(&self) -> Result<Vec<(PathBuf, SourceKind)>, ScanError> {
        if self.config.root.is_file() {
            let kind = SourceKind::from_path(&self.config.root)
                .ok_or_else(|| ScanError::UnsupportedFile(self.config.root.clone()))?;
            return Ok(vec![(self.config.root.clone(), kind)]);
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&self.config.root)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if entry.file_type().is_dir() {
                continue;
            }

            if self.ignore_filter.should_ignore(path, false) {
                continue;
            }

            if let Some(kind) = SourceKind::from_path(path) {
                files.push((path.to_path_buf(), kind));
            }
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }

    /// Plan (and in write mode apply) the rewrite for a single file.
    fn process_file(&self, path: &Path, kind: SourceKind, context: &ProjectContext) -> FileReport {
        let relative = path
            .strip_prefix(&self.config.root)
            .unwrap_or(path)
            .to_path_buf();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                return FileReport {
                    path: relative,
                    status: FileStatus::Skipped,
                    error: Some(e.to_string()),
                }
            }
        };

        match plan_rewrite(&content, kind, context) {
            RewriteOutcome::NoImports => FileReport {
                path: relative,
                status: FileStatus::NoImports,
                error: None,
            },
            RewriteOutcome::Clean => FileReport {
                path: relative,
                status: FileStatus::Clean,
                error: None,
            },
            RewriteOutcome::Edit(replacement) => {
                if self.config.write {
                    let updated = replacement.apply(&content);
                    if let Err(e) = write_atomic(path, &updated) {
                        return FileReport {
                            path: relative,
                            status: FileStatus::Skipped,
                            error: Some(e.to_string()),
                        };
                    }
                }
                FileReport {
                    path: relative,
                    status: FileStatus::Changed,
                    error: None,
                }
            }
        }
    }
}

/// Replace a file's contents in one step: write a sibling temp file, then
/// rename it over the original, so a failed write leaves the file as it was.
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".importsense.tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

fn calculate_stats(files: &[FileReport]) -> ScanStats {
    let mut stats = ScanStats {
        total_files: files.len(),
        ..Default::default()
    };

    for file in files {
        match file.status {
            FileStatus::Changed => stats.changed += 1,
            FileStatus::Clean => stats.clean += 1,
            FileStatus::NoImports => stats.no_imports += 1,
            FileStatus::Skipped => stats.skipped += 1,
        }
    }

    stats
}
