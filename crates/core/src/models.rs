use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Import category. The discriminant doubles as the output position, so the
/// tag and its ordering cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportGroup {
    Core = 0,
    ThirdParty = 1,
    Internal = 2,
    Components = 3,
    Utils = 4,
    ConstantsTypes = 5,
    AssetsStyles = 6,
    SideEffects = 7,
}

impl ImportGroup {
    /// Every group, in output order.
    pub const ALL: [ImportGroup; 8] = [
        ImportGroup::Core,
        ImportGroup::ThirdParty,
        ImportGroup::Internal,
        ImportGroup::Components,
        ImportGroup::Utils,
        ImportGroup::ConstantsTypes,
        ImportGroup::AssetsStyles,
        ImportGroup::SideEffects,
    ];

    /// Position of this group in the generated block.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label emitted as a comment above the group when more than one group
    /// is present.
    pub fn label(self) -> &'static str {
        match self {
            ImportGroup::Core => "Core",
            ImportGroup::ThirdParty => "Third-party libraries",
            ImportGroup::Internal => "Internal modules",
            ImportGroup::Components => "Components",
            ImportGroup::Utils => "Utils & Helpers",
            ImportGroup::ConstantsTypes => "Constants & Types",
            ImportGroup::AssetsStyles => "Assets & Styles",
            ImportGroup::SideEffects => "Side effects",
        }
    }
}

/// Framework detected from the workspace manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Next,
    Node,
    #[default]
    Unknown,
}

impl Framework {
    pub fn from_name(name: &str) -> Self {
        match name {
            "react" => Framework::React,
            "next" => Framework::Next,
            "node" => Framework::Node,
            _ => Framework::Unknown,
        }
    }
}

/// Grammar variant for a supported source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Plain JavaScript, including JSX.
    JavaScript,
    TypeScript,
    /// TypeScript with JSX.
    Tsx,
}

impl SourceKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(SourceKind::JavaScript),
            "ts" | "mts" | "cts" => Some(SourceKind::TypeScript),
            "tsx" => Some(SourceKind::Tsx),
            _ => None,
        }
    }

    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| Self::from_extension(&ext.to_string_lossy()))
    }
}

/// A single import declaration from the leading block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedImport {
    /// The module specifier string, unresolved.
    pub specifier: String,
    /// Verbatim source text covering the declaration's line span, including
    /// any trailing same-line comment.
    pub raw_text: String,
    /// 1-based first line of the declaration.
    pub start_line: usize,
    /// 1-based last line of the declaration, inclusive.
    pub end_line: usize,
    /// Category assigned by the classifier.
    pub group: ImportGroup,
    /// True when the declaration binds no local names.
    pub is_side_effect: bool,
    /// True for `import type` declarations.
    pub is_type_only: bool,
}

/// The leading import block of a file, including absorbed blank lines and
/// section comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBlock {
    /// Imports in original file order.
    pub imports: Vec<ParsedImport>,
    /// 1-based first line of the block.
    pub start_line: usize,
    /// 1-based last line of the block, inclusive.
    pub end_line: usize,
}

/// Read-only project facts used by the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectContext {
    pub framework: Framework,
    /// Alias pattern to first target, in declaration order.
    pub aliases: Vec<(String, String)>,
    pub workspace_root: PathBuf,
}

impl Default for ProjectContext {
    fn default() -> Self {
        Self {
            framework: Framework::Unknown,
            aliases: crate::detect::default_aliases(),
            workspace_root: PathBuf::from("."),
        }
    }
}

/// A single line-range edit replacing the located import block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// 1-based first replaced line.
    pub start_line: usize,
    /// One past the last replaced line, 1-based.
    pub end_line: usize,
    /// Replacement text, newline-terminated.
    pub text: String,
}

impl Replacement {
    /// Apply this edit to the source it was computed from.
    pub fn apply(&self, source: &str) -> String {
        let lines: Vec<&str> = source.split('\n').collect();
        let start = self.start_line.saturating_sub(1).min(lines.len());
        let end = self.end_line.saturating_sub(1).min(lines.len());

        let mut result = String::with_capacity(source.len() + self.text.len());
        for line in &lines[..start] {
            result.push_str(line);
            result.push('\n');
        }
        result.push_str(&self.text);
        result.push_str(&lines[end..].join("\n"));
        result
    }
}

/// Outcome of planning a rewrite for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum RewriteOutcome {
    /// No leading import block was found (includes unparseable sources).
    NoImports,
    /// The block is already in canonical form.
    Clean,
    /// The block differs; apply the contained replacement.
    Edit(Replacement),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_order_matches_indices() {
        for (position, group) in ImportGroup::ALL.iter().enumerate() {
            assert_eq!(group.index(), position);
        }
    }

    #[test]
    fn groups_are_ordered_by_output_position() {
        assert!(ImportGroup::Core < ImportGroup::ThirdParty);
        assert!(ImportGroup::ConstantsTypes < ImportGroup::AssetsStyles);
        assert!(ImportGroup::AssetsStyles < ImportGroup::SideEffects);
    }

    #[test]
    fn source_kind_from_extension() {
        assert_eq!(SourceKind::from_extension("js"), Some(SourceKind::JavaScript));
        assert_eq!(SourceKind::from_extension("jsx"), Some(SourceKind::JavaScript));
        assert_eq!(SourceKind::from_extension("mts"), Some(SourceKind::TypeScript));
        assert_eq!(SourceKind::from_extension("TSX"), Some(SourceKind::Tsx));
        assert_eq!(SourceKind::from_extension("py"), None);
        assert_eq!(SourceKind::from_extension("css"), None);
    }

    #[test]
    fn replacement_apply_swaps_line_range() {
        let source = "import b from 'b';\nimport a from 'a';\nconst x = 1;\n";
        let replacement = Replacement {
            start_line: 1,
            end_line: 3,
            text: "import a from 'a';\nimport b from 'b';\n".to_string(),
        };

        assert_eq!(
            replacement.apply(source),
            "import a from 'a';\nimport b from 'b';\nconst x = 1;\n"
        );
    }

    #[test]
    fn replacement_apply_preserves_preceding_lines() {
        let source = "#!/usr/bin/env node\nlet y;\nold\nrest\n";
        let replacement = Replacement {
            start_line: 3,
            end_line: 4,
            text: "new\n".to_string(),
        };

        assert_eq!(
            replacement.apply(source),
            "#!/usr/bin/env node\nlet y;\nnew\nrest\n"
        );
    }
}
