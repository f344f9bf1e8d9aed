use crate::classifier::classify;
use crate::models::{ImportBlock, ParsedImport, ProjectContext, SourceKind};
use crate::parser::ImportParser;
use regex::Regex;
use std::sync::LazyLock;

/// Category words accepted in a section comment. Covers the labels this tool
/// emits, so a regenerated block absorbs its own labels on the next run.
const SECTION_WORDS: &str = r"core|third[- ]?party(?:\s+libraries)?|internal(?:\s+modules)?|components?|utils?(?:\s*&\s*helpers?)?|helpers?|hooks?|constants?(?:\s*&\s*types?)?|types?|enums?|interfaces?|models?|assets?(?:\s*&\s*styles?)?|styles?|side[- ]?effects?|custom\s*modules?|libraries|modules|vendors?";

static SECTION_LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)^\s*//\s*(?:{SECTION_WORDS})\s*$")).unwrap());

static SECTION_RULE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*//\s*-+\s*$").unwrap());

static SECTION_BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)^\s*/\*\s*(?:{SECTION_WORDS})\s*\*/\s*$")).unwrap());

/// True for a comment line whose only content is a section label or a rule
/// of dashes.
pub fn is_section_comment(line: &str) -> bool {
    SECTION_LINE_COMMENT.is_match(line)
        || SECTION_RULE_LINE.is_match(line)
        || SECTION_BLOCK_COMMENT.is_match(line)
}

/// Locate the leading import block of `source` and classify its imports.
///
/// Returns `None` when the file has no leading import declarations or when
/// the source cannot be processed at all; callers treat both the same way.
pub fn locate_import_block(
    source: &str,
    kind: SourceKind,
    context: &ProjectContext,
) -> Option<ImportBlock> {
    let mut parser = ImportParser::new(kind).ok()?;
    let raw_imports = parser.leading_imports(source);
    if raw_imports.is_empty() {
        return None;
    }

    let lines: Vec<&str> = source.split('\n').collect();

    let imports: Vec<ParsedImport> = raw_imports
        .into_iter()
        .map(|raw| {
            let raw_text = lines[raw.start_line - 1..raw.end_line].join("\n");
            let group = classify(&raw.specifier, raw.is_side_effect, context);
            ParsedImport {
                specifier: raw.specifier,
                raw_text,
                start_line: raw.start_line,
                end_line: raw.end_line,
                group,
                is_side_effect: raw.is_side_effect,
                is_type_only: raw.is_type_only,
            }
        })
        .collect();

    // Walk upward over blank lines and section comments directly above the
    // first import; they belong to the block and are regenerated with it.
    let mut start_line = imports[0].start_line;
    while start_line > 1 {
        let line = lines[start_line - 2].trim();
        if line.is_empty() || is_section_comment(line) {
            start_line -= 1;
        } else {
            break;
        }
    }

    // A section comment inside a gap between two imports can push the end
    // line out; the last import's own final line is the floor.
    let last_end = imports[imports.len() - 1].end_line;
    let mut end_line = last_end;
    for pair in imports.windows(2) {
        for line_number in pair[0].end_line + 1..pair[1].start_line {
            if is_section_comment(lines[line_number - 1]) && line_number > end_line {
                end_line = line_number;
            }
        }
    }
    let end_line = end_line.max(last_end);

    Some(ImportBlock {
        imports,
        start_line,
        end_line,
    })
}
