use crate::models::Framework;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    dependencies: serde_json::Map<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: serde_json::Map<String, serde_json::Value>,
}

impl PackageManifest {
    fn declares(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

/// Identify the project's framework from `package.json` at the workspace
/// root. A missing or unreadable manifest means `Unknown`; a manifest that
/// names no known framework means a plain `Node` project.
pub fn detect_framework(workspace_root: &Path) -> Framework {
    let manifest_path = workspace_root.join("package.json");

    let Ok(content) = fs::read_to_string(&manifest_path) else {
        return Framework::Unknown;
    };
    let Ok(manifest) = serde_json::from_str::<PackageManifest>(&content) else {
        return Framework::Unknown;
    };

    if manifest.declares("next") {
        Framework::Next
    } else if manifest.declares("react") || manifest.declares("react-dom") {
        Framework::React
    } else {
        Framework::Node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_manifest(contents: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), contents).unwrap();
        temp
    }

    #[test]
    fn next_wins_over_react() {
        let temp = write_manifest(
            r#"{"dependencies": {"next": "14.0.0", "react": "18.2.0", "react-dom": "18.2.0"}}"#,
        );

        assert_eq!(detect_framework(temp.path()), Framework::Next);
    }

    #[test]
    fn react_project() {
        let temp = write_manifest(r#"{"dependencies": {"react": "18.2.0"}}"#);

        assert_eq!(detect_framework(temp.path()), Framework::React);
    }

    #[test]
    fn dev_dependencies_count() {
        let temp = write_manifest(r#"{"devDependencies": {"react-dom": "18.2.0"}}"#);

        assert_eq!(detect_framework(temp.path()), Framework::React);
    }

    #[test]
    fn plain_node_project() {
        let temp = write_manifest(r#"{"dependencies": {"express": "4.18.0"}}"#);

        assert_eq!(detect_framework(temp.path()), Framework::Node);
    }

    #[test]
    fn manifest_without_dependencies_is_node() {
        let temp = write_manifest(r#"{"name": "bare"}"#);

        assert_eq!(detect_framework(temp.path()), Framework::Node);
    }

    #[test]
    fn missing_manifest_is_unknown() {
        let temp = TempDir::new().unwrap();

        assert_eq!(detect_framework(temp.path()), Framework::Unknown);
    }

    #[test]
    fn invalid_manifest_is_unknown() {
        let temp = write_manifest("{ this is not json");

        assert_eq!(detect_framework(temp.path()), Framework::Unknown);
    }
}
