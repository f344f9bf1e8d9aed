//! WASM bindings for ImportSense
//!
//! This module exposes the import block rewriter to JavaScript hosts such as
//! editor extensions. The host supplies the source text, the file extension
//! and a project context; the result is either "no change" or a single
//! line-range replacement the host applies itself.

use importsense_core::{plan_rewrite, Framework, ProjectContext, RewriteOutcome, SourceKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use wasm_bindgen::prelude::*;

/// Project context as provided by the host.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasmProjectContext {
    /// One of "react", "next", "node"; anything else means unknown.
    #[serde(default)]
    pub framework: String,
    /// Alias pattern / first target pairs, in declaration order.
    #[serde(default)]
    pub aliases: Vec<(String, String)>,
    #[serde(default)]
    pub workspace_root: String,
}

/// Rewrite result handed back to the host.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasmRewriteResult {
    pub success: bool,
    /// True when an edit is needed; the fields below are then set.
    pub changed: bool,
    /// 1-based first line to replace.
    pub start_line: Option<usize>,
    /// One past the last replaced line, 1-based.
    pub end_line: Option<usize>,
    /// Newline-terminated replacement text.
    pub text: Option<String>,
    pub error: Option<String>,
}

impl WasmRewriteResult {
    fn unchanged() -> Self {
        Self {
            success: true,
            changed: false,
            start_line: None,
            end_line: None,
            text: None,
            error: None,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            success: false,
            changed: false,
            start_line: None,
            end_line: None,
            text: None,
            error: Some(message),
        }
    }
}

/// Plan the rewrite for one file's source text.
///
/// `extension` selects the grammar ("ts", "tsx", "js", ...); unsupported
/// extensions report a failure without touching the source. The context
/// object mirrors what the native detectors produce; detection itself stays
/// on the host side, since there is no filesystem here.
#[wasm_bindgen]
pub fn rewrite_source(source: &str, extension: &str, context: JsValue) -> JsValue {
    let Some(kind) = SourceKind::from_extension(extension) else {
        return to_js(&WasmRewriteResult::failure(format!(
            "unsupported file extension: {extension}"
        )));
    };

    let host_context: WasmProjectContext = match serde_wasm_bindgen::from_value(context) {
        Ok(context) => context,
        Err(e) => return to_js(&WasmRewriteResult::failure(e.to_string())),
    };

    let context = ProjectContext {
        framework: Framework::from_name(&host_context.framework),
        aliases: host_context.aliases,
        workspace_root: PathBuf::from(host_context.workspace_root),
    };

    let result = match plan_rewrite(source, kind, &context) {
        RewriteOutcome::NoImports | RewriteOutcome::Clean => WasmRewriteResult::unchanged(),
        RewriteOutcome::Edit(replacement) => WasmRewriteResult {
            success: true,
            changed: true,
            start_line: Some(replacement.start_line),
            end_line: Some(replacement.end_line),
            text: Some(replacement.text),
            error: None,
        },
    };

    to_js(&result)
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js(result: &WasmRewriteResult) -> JsValue {
    serde_wasm_bindgen::to_value(result).unwrap_or(JsValue::NULL)
}
