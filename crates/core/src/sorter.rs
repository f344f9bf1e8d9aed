use crate::models::{ImportGroup, ParsedImport};
use std::collections::HashSet;

/// Partition imports into their groups and alphabetize each group by the
/// normalized specifier. Partitioning is stable and the sort is stable, so
/// equal keys keep their relative file order.
pub fn sort_imports(imports: &[ParsedImport]) -> Vec<ParsedImport> {
    let mut buckets: Vec<Vec<ParsedImport>> = vec![Vec::new(); ImportGroup::ALL.len()];

    for import in imports {
        buckets[import.group.index()].push(import.clone());
    }

    for bucket in &mut buckets {
        bucket.sort_by(|a, b| normalize_key(&a.specifier).cmp(&normalize_key(&b.specifier)));
    }

    buckets.into_iter().flatten().collect()
}

/// Sort key: one leading `@` or `~` and one leading `./` or `../` stripped,
/// lowercased. Depends only on the specifier text, never on file position.
fn normalize_key(specifier: &str) -> String {
    let stripped = specifier
        .strip_prefix('@')
        .or_else(|| specifier.strip_prefix('~'))
        .unwrap_or(specifier);
    let stripped = stripped
        .strip_prefix("./")
        .or_else(|| stripped.strip_prefix("../"))
        .unwrap_or(stripped);
    stripped.to_lowercase()
}

/// Render the canonical text for a block's imports: groups in fixed order,
/// one blank line between non-empty groups, a label comment per group when
/// more than one group is present, and each import's original text verbatim.
pub fn generate_import_text(imports: &[ParsedImport]) -> String {
    if imports.is_empty() {
        return String::new();
    }

    let sorted = sort_imports(imports);
    let used_groups: HashSet<ImportGroup> = sorted.iter().map(|import| import.group).collect();
    let labeled = used_groups.len() > 1;

    let mut lines: Vec<String> = Vec::new();
    let mut current: Option<ImportGroup> = None;

    for import in &sorted {
        if current != Some(import.group) {
            if current.is_some() {
                lines.push(String::new());
            }
            if labeled {
                lines.push(format!("// {}", import.group.label()));
            }
            current = Some(import.group);
        }
        lines.push(import.raw_text.clone());
    }

    lines.join("\n")
}
