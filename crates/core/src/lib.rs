//! ImportSense Core Library
//!
//! This library rewrites the leading block of import statements in a
//! JavaScript/TypeScript source file into a canonical, grouped, alphabetized
//! form.
//!
//! # Features
//!
//! - Locate the contiguous import prologue of a file, including adjoining
//!   blank lines and section comments
//! - Classify each import into one of eight ordered groups (core framework,
//!   third-party, internal, components, utils, constants & types, assets &
//!   styles, side effects)
//! - Regenerate the block with group labels and stable alphabetical order;
//!   rerunning over the output reproduces it byte for byte
//! - Detect project context (framework from package.json, path aliases from
//!   tsconfig.json/jsconfig.json with extends-chain resolution)
//! - Scan whole directory trees, in parallel, applying or reporting edits
//!
//! # Example
//!
//! ```no_run
//! use importsense_core::{ImportScanner, ScanConfig, OutputFormat, format_report};
//! use std::path::PathBuf;
//!
//! let config = ScanConfig::new(PathBuf::from(".")).with_write(true);
//! let scanner = ImportScanner::new(config).unwrap();
//! let report = scanner.scan().unwrap();
//!
//! let summary = format_report(&report, OutputFormat::Summary).unwrap();
//! println!("{}", summary);
//! ```

pub mod block;
pub mod classifier;
pub mod config;
pub mod detect;
pub mod models;
pub mod output;
pub mod parser;
pub mod rewrite;
pub mod scanner;
pub mod sorter;

// Re-exports for convenience
pub use block::locate_import_block;
pub use config::ScanConfig;
pub use detect::{discover_context, resolve_workspace_root};
pub use models::*;
pub use output::{format_report, format_summary, OutputFormat};
pub use rewrite::plan_rewrite;
pub use scanner::{FileStatus, ImportScanner, ScanError, ScanReport};
pub use sorter::generate_import_text;
