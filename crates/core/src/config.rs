use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to build glob pattern: {0}")]
    GlobError(#[from] globset::Error),
    #[error("Failed to parse gitignore: {0}")]
    GitignoreError(#[from] ignore::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Configuration for a scan over a file or directory tree.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// File or directory to process.
    pub root: PathBuf,
    /// Apply edits instead of reporting them.
    pub write: bool,
    /// Workspace root override; discovered from the target when unset.
    pub workspace_root: Option<PathBuf>,
    /// Additional ignore patterns (glob style).
    pub ignore_patterns: Vec<String>,
    /// Custom ignore file path.
    pub ignore_file: Option<PathBuf>,
    /// Number of threads (0 = auto).
    pub threads: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            write: false,
            workspace_root: None,
            ignore_patterns: vec![],
            ignore_file: None,
            threads: 0,
        }
    }
}

impl ScanConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    pub fn with_write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    pub fn with_workspace_root(mut self, workspace_root: PathBuf) -> Self {
        self.workspace_root = Some(workspace_root);
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_ignore_file(mut self, path: PathBuf) -> Self {
        self.ignore_file = Some(path);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

/// Filter for ignoring files and directories during traversal.
pub struct IgnoreFilter {
    gitignore: Option<Gitignore>,
    custom_globs: GlobSet,
    default_ignores: GlobSet,
}

impl IgnoreFilter {
    pub fn new(config: &ScanConfig) -> Result<Self, ConfigError> {
        // Load .gitignore if present
        let gitignore = if let Some(ref ignore_file) = config.ignore_file {
            let mut builder = GitignoreBuilder::new(&config.root);
            builder.add(ignore_file);
            Some(builder.build()?)
        } else {
            let gitignore_path = config.root.join(".gitignore");
            if gitignore_path.exists() {
                let mut builder = GitignoreBuilder::new(&config.root);
                builder.add(&gitignore_path);
                Some(builder.build()?)
            } else {
                None
            }
        };

        // Build custom ignore globs
        let mut custom_builder = GlobSetBuilder::new();
        for pattern in &config.ignore_patterns {
            custom_builder.add(Glob::new(pattern)?);
        }
        let custom_globs = custom_builder.build()?;

        // Generated and vendored trees never get their imports rewritten.
        let mut default_builder = GlobSetBuilder::new();
        default_builder.add(Glob::new("**/node_modules/**")?);
        default_builder.add(Glob::new("**/dist/**")?);
        default_builder.add(Glob::new("**/build/**")?);
        default_builder.add(Glob::new("**/out/**")?);
        default_builder.add(Glob::new("**/coverage/**")?);
        default_builder.add(Glob::new("**/.next/**")?);
        default_builder.add(Glob::new("**/.git/**")?);
        default_builder.add(Glob::new("**/*.min.js")?);
        let default_ignores = default_builder.build()?;

        Ok(Self {
            gitignore,
            custom_globs,
            default_ignores,
        })
    }

    /// Check if a path should be ignored
    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        let path_str = path.to_string_lossy();

        if self.default_ignores.is_match(&*path_str) {
            return true;
        }

        if self.custom_globs.is_match(&*path_str) {
            return true;
        }

        if let Some(ref gi) = self.gitignore {
            if gi.matched(path, is_dir).is_ignore() {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert!(!config.write);
        assert!(config.workspace_root.is_none());
        assert_eq!(config.threads, 0);
    }

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::new(PathBuf::from("/test"))
            .with_write(true)
            .with_ignore_patterns(vec!["*.generated.ts".to_string()])
            .with_threads(4);

        assert_eq!(config.root, PathBuf::from("/test"));
        assert!(config.write);
        assert_eq!(config.ignore_patterns.len(), 1);
        assert_eq!(config.threads, 4);
    }

    #[test]
    fn default_ignores_skip_vendored_trees() {
        let filter = IgnoreFilter::new(&ScanConfig::default()).unwrap();

        assert!(filter.should_ignore(Path::new("web/node_modules/react/index.js"), false));
        assert!(filter.should_ignore(Path::new("app/dist/bundle.js"), false));
        assert!(filter.should_ignore(Path::new("site/.next/static/chunk.js"), false));
        assert!(!filter.should_ignore(Path::new("src/components/Button.tsx"), false));
    }

    #[test]
    fn custom_patterns_are_honored() {
        let config =
            ScanConfig::default().with_ignore_patterns(vec!["**/*.stories.tsx".to_string()]);
        let filter = IgnoreFilter::new(&config).unwrap();

        assert!(filter.should_ignore(Path::new("src/Button.stories.tsx"), false));
        assert!(!filter.should_ignore(Path::new("src/Button.tsx"), false));
    }
}
