use crate::models::SourceKind;
use thiserror::Error;
use tree_sitter::{Node, Parser};

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to initialize parser: {0}")]
    InitError(String),
}

/// An import declaration as read from the syntax tree, before classification.
#[derive(Debug, Clone)]
pub struct RawImport {
    pub specifier: String,
    /// 1-based first line of the declaration.
    pub start_line: usize,
    /// 1-based last line of the declaration, inclusive.
    pub end_line: usize,
    pub is_side_effect: bool,
    pub is_type_only: bool,
}

/// Tree-sitter wrapper that extracts the leading run of import declarations.
pub struct ImportParser {
    parser: Parser,
}

impl ImportParser {
    pub fn new(kind: SourceKind) -> Result<Self, ParserError> {
        let mut parser = Parser::new();

        let language: tree_sitter::Language = match kind {
            SourceKind::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            SourceKind::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceKind::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        };

        parser
            .set_language(&language)
            .map_err(|e| ParserError::InitError(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Collect the maximal prefix of top-level statements that are import
    /// declarations. Comments are skipped without terminating the scan; any
    /// other statement kind (including an ERROR node from a malformed
    /// region) ends it. A source the parser cannot process at all yields an
    /// empty sequence.
    pub fn leading_imports(&mut self, source: &str) -> Vec<RawImport> {
        let Some(tree) = self.parser.parse(source, None) else {
            return Vec::new();
        };

        let root = tree.root_node();
        let mut imports = Vec::new();
        let mut cursor = root.walk();

        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "comment" => continue,
                "import_statement" => match parse_import(&child, source) {
                    Some(import) => imports.push(import),
                    None => break,
                },
                _ => break,
            }
        }

        imports
    }
}

fn parse_import(node: &Node, source: &str) -> Option<RawImport> {
    let source_node = node.child_by_field_name("source")?;
    let specifier = string_value(&source_node, source);
    if specifier.is_empty() {
        return None;
    }

    let mut is_side_effect = true;
    let mut is_type_only = false;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "import_clause" => is_side_effect = false,
            // The `type` keyword of `import type { ... }` is a direct child
            // of the declaration in the TypeScript grammars.
            "type" => is_type_only = true,
            _ => {}
        }
    }

    Some(RawImport {
        specifier,
        start_line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
        is_side_effect,
        is_type_only,
    })
}

fn string_value(node: &Node, source: &str) -> String {
    source[node.byte_range()]
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}
