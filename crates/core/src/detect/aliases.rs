use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config files probed at the workspace root, in priority order.
const CONFIG_FILENAMES: &[&str] = &["tsconfig.json", "jsconfig.json"];

#[derive(Error, Debug)]
enum AliasConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: json5::Error },
    #[error("circular extends chain at {}", path.display())]
    CircularExtends { path: PathBuf },
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CompilerOptions {
    /// Path patterns in declaration order; serde_json's preserve_order map
    /// keeps the file's ordering so prefix matching stays deterministic.
    #[serde(default)]
    paths: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ModuleConfig {
    extends: Option<String>,
    #[serde(default, rename = "compilerOptions")]
    compiler_options: CompilerOptions,
}

/// The fixed mapping used whenever no usable alias config is found.
pub fn default_aliases() -> Vec<(String, String)> {
    vec![
        ("@/*".to_string(), "./src/*".to_string()),
        ("~/*".to_string(), "./src/*".to_string()),
    ]
}

/// Read path aliases from `tsconfig.json`/`jsconfig.json` at the workspace
/// root, resolving the `extends` chain. Only the first target of each alias
/// is kept. Any failure along the way, or an empty result, falls back to
/// the default mapping.
pub fn detect_aliases(workspace_root: &Path) -> Vec<(String, String)> {
    let Some(config_path) = find_config(workspace_root) else {
        return default_aliases();
    };

    let mut visited = HashSet::new();
    let config = match resolve_config(&config_path, workspace_root, &mut visited) {
        Ok(config) => config,
        Err(_) => return default_aliases(),
    };

    let mut aliases = Vec::new();
    for (pattern, targets) in &config.compiler_options.paths {
        let first_target = targets
            .as_array()
            .and_then(|targets| targets.first())
            .and_then(|target| target.as_str());
        if let Some(target) = first_target {
            aliases.push((pattern.clone(), target.to_string()));
        }
    }

    if aliases.is_empty() {
        return default_aliases();
    }
    aliases
}

fn find_config(workspace_root: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| workspace_root.join(name))
        .find(|path| path.is_file())
}

/// Parse a config and merge its `extends` ancestors, child over base. The
/// visited set guards against circular chains, which would otherwise walk
/// forever.
fn resolve_config(
    path: &Path,
    workspace_root: &Path,
    visited: &mut HashSet<PathBuf>,
) -> Result<ModuleConfig, AliasConfigError> {
    let canonical = path.canonicalize().map_err(|source| AliasConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if !visited.insert(canonical.clone()) {
        return Err(AliasConfigError::CircularExtends { path: canonical });
    }

    let content = fs::read_to_string(&canonical).map_err(|source| AliasConfigError::Read {
        path: canonical.clone(),
        source,
    })?;

    // json5 tolerates the JSONC dialect these configs are written in:
    // comments and trailing commas included.
    let mut config: ModuleConfig =
        json5::from_str(&content).map_err(|source| AliasConfigError::Parse {
            path: canonical.clone(),
            source,
        })?;

    if let Some(extends) = config.extends.clone() {
        if let Some(parent_path) = resolve_extends_target(&extends, &canonical, workspace_root) {
            let base = resolve_config(&parent_path, workspace_root, visited)?;
            config = merge_configs(base, config);
        }
    }

    Ok(config)
}

/// Resolve an `extends` value to a config path: relative values against the
/// extending config's directory, bare names under `node_modules`, with
/// `.json` appended when the plain form does not exist. `None` when nothing
/// usable is found; the child config then stands alone.
fn resolve_extends_target(
    extends: &str,
    current_config: &Path,
    workspace_root: &Path,
) -> Option<PathBuf> {
    let base = if extends.starts_with('.') {
        current_config.parent()?.join(extends)
    } else {
        workspace_root.join("node_modules").join(extends)
    };

    if base.exists() {
        return Some(base);
    }

    if !extends.ends_with(".json") {
        let mut with_json = base.into_os_string();
        with_json.push(".json");
        let with_json = PathBuf::from(with_json);
        if with_json.exists() {
            return Some(with_json);
        }
    }

    None
}

fn merge_configs(base: ModuleConfig, child: ModuleConfig) -> ModuleConfig {
    let mut paths = base.compiler_options.paths;
    for (pattern, targets) in child.compiler_options.paths {
        paths.insert(pattern, targets);
    }

    ModuleConfig {
        extends: child.extends,
        compiler_options: CompilerOptions { paths },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, name: &str, contents: &str) {
        fs::write(temp.path().join(name), contents).unwrap();
    }

    #[test]
    fn reads_paths_in_declaration_order() {
        let temp = TempDir::new().unwrap();
        write_config(
            &temp,
            "tsconfig.json",
            r#"{
                "compilerOptions": {
                    "paths": {
                        "@app/*": ["./src/app/*"],
                        "@shared/*": ["./src/shared/*", "./src/fallback/*"]
                    }
                }
            }"#,
        );

        let aliases = detect_aliases(temp.path());

        assert_eq!(
            aliases,
            vec![
                ("@app/*".to_string(), "./src/app/*".to_string()),
                ("@shared/*".to_string(), "./src/shared/*".to_string()),
            ]
        );
    }

    #[test]
    fn tolerates_comments_and_trailing_commas() {
        let temp = TempDir::new().unwrap();
        write_config(
            &temp,
            "tsconfig.json",
            r#"{
                // path mappings
                "compilerOptions": {
                    "paths": {
                        /* main alias */
                        "@/*": ["./app/*"],
                    },
                },
            }"#,
        );

        let aliases = detect_aliases(temp.path());

        assert_eq!(aliases, vec![("@/*".to_string(), "./app/*".to_string())]);
    }

    #[test]
    fn jsconfig_is_probed_after_tsconfig() {
        let temp = TempDir::new().unwrap();
        write_config(
            &temp,
            "jsconfig.json",
            r#"{"compilerOptions": {"paths": {"~/*": ["./lib/*"]}}}"#,
        );

        let aliases = detect_aliases(temp.path());

        assert_eq!(aliases, vec![("~/*".to_string(), "./lib/*".to_string())]);
    }

    #[test]
    fn extends_chain_merges_child_over_base() {
        let temp = TempDir::new().unwrap();
        write_config(
            &temp,
            "tsconfig.base.json",
            r#"{"compilerOptions": {"paths": {
                "@common/*": ["./base/common/*"],
                "@base/*": ["./base/*"]
            }}}"#,
        );
        write_config(
            &temp,
            "tsconfig.json",
            r#"{
                "extends": "./tsconfig.base.json",
                "compilerOptions": {"paths": {"@common/*": ["./src/common/*"]}}
            }"#,
        );

        let aliases = detect_aliases(temp.path());

        assert!(aliases.contains(&("@common/*".to_string(), "./src/common/*".to_string())));
        assert!(aliases.contains(&("@base/*".to_string(), "./base/*".to_string())));
    }

    #[test]
    fn extends_without_json_suffix_resolves() {
        let temp = TempDir::new().unwrap();
        write_config(
            &temp,
            "tsconfig.base.json",
            r#"{"compilerOptions": {"paths": {"@x/*": ["./x/*"]}}}"#,
        );
        write_config(&temp, "tsconfig.json", r#"{"extends": "./tsconfig.base"}"#);

        let aliases = detect_aliases(temp.path());

        assert_eq!(aliases, vec![("@x/*".to_string(), "./x/*".to_string())]);
    }

    #[test]
    fn missing_extends_target_keeps_child_config() {
        let temp = TempDir::new().unwrap();
        write_config(
            &temp,
            "tsconfig.json",
            r#"{
                "extends": "some-preset/tsconfig",
                "compilerOptions": {"paths": {"@/*": ["./src/*"]}}
            }"#,
        );

        let aliases = detect_aliases(temp.path());

        assert_eq!(aliases, vec![("@/*".to_string(), "./src/*".to_string())]);
    }

    #[test]
    fn circular_extends_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        write_config(&temp, "tsconfig.json", r#"{"extends": "./other.json"}"#);
        write_config(&temp, "other.json", r#"{"extends": "./tsconfig.json"}"#);

        assert_eq!(detect_aliases(temp.path()), default_aliases());
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();

        assert_eq!(detect_aliases(temp.path()), default_aliases());
    }

    #[test]
    fn unparseable_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        write_config(&temp, "tsconfig.json", "{ not json at all");

        assert_eq!(detect_aliases(temp.path()), default_aliases());
    }

    #[test]
    fn config_without_paths_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        write_config(&temp, "tsconfig.json", r#"{"compilerOptions": {"strict": true}}"#);

        assert_eq!(detect_aliases(temp.path()), default_aliases());
    }
}
