use crate::block::locate_import_block;
use crate::models::{ProjectContext, Replacement, RewriteOutcome, SourceKind};
use crate::sorter::generate_import_text;

/// Run the full pipeline over one file's text: locate the leading import
/// block, regenerate it, and decide whether an edit is needed.
///
/// The returned replacement spans the located block's line range, with the
/// end line one past the inclusive end, and its text is newline-terminated.
/// Regenerating from already-canonical text yields `Clean`.
pub fn plan_rewrite(source: &str, kind: SourceKind, context: &ProjectContext) -> RewriteOutcome {
    let Some(block) = locate_import_block(source, kind, context) else {
        return RewriteOutcome::NoImports;
    };

    let generated = generate_import_text(&block.imports);

    let lines: Vec<&str> = source.split('\n').collect();
    let current = lines[block.start_line - 1..block.end_line.min(lines.len())].join("\n");

    if generated == current {
        return RewriteOutcome::Clean;
    }

    RewriteOutcome::Edit(Replacement {
        start_line: block.start_line,
        end_line: block.end_line + 1,
        text: format!("{generated}\n"),
    })
}
