use crate::models::{Framework, ImportGroup, ProjectContext};

/// Specifiers that always belong to the core group.
const CORE_MODULES: &[&str] = &[
    "react",
    "react-dom",
    "react-dom/client",
    "react-dom/server",
    "next",
    "next/head",
    "next/link",
    "next/image",
    "next/router",
    "next/navigation",
    "next/script",
    "next/dynamic",
    "next/font",
    "next/font/google",
    "next/font/local",
];

/// Node.js builtin module names importable without the `node:` scheme.
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Extensions that mark an import as an asset or stylesheet.
const ASSET_EXTENSIONS: &[&str] = &[
    ".css",
    ".scss",
    ".sass",
    ".less",
    ".styl",
    ".module.css",
    ".module.scss",
    ".svg",
    ".png",
    ".jpg",
    ".jpeg",
    ".gif",
    ".webp",
    ".ico",
    ".woff",
    ".woff2",
    ".ttf",
    ".eot",
    ".otf",
    ".mp3",
    ".mp4",
    ".wav",
    ".ogg",
    ".webm",
];

const COMPONENT_SEGMENTS: &[&str] = &["components", "pages", "views", "layouts", "screens"];
const CONSTANT_SEGMENTS: &[&str] = &["constants", "types", "enums", "interfaces", "models"];
const CONSTANT_SUFFIXES: &[&str] = &[".types", ".d.ts", ".enum"];
const UTILITY_SEGMENTS: &[&str] = &["utils", "helpers", "hooks", "lib"];

/// Assign a group to one import. Pure in `(specifier, is_side_effect,
/// context)`; rules are tried top to bottom and the first match wins.
pub fn classify(specifier: &str, is_side_effect: bool, context: &ProjectContext) -> ImportGroup {
    // Asset check outranks the side-effect check, so a bare stylesheet
    // import lands with the other styles.
    if is_side_effect && !has_asset_extension(specifier) {
        return ImportGroup::SideEffects;
    }

    if has_asset_extension(specifier) {
        return ImportGroup::AssetsStyles;
    }

    if is_framework_core(specifier, context.framework) {
        return ImportGroup::Core;
    }

    if is_node_builtin(specifier) {
        return ImportGroup::Core;
    }

    // Scoped packages resolve before alias handling, unless the scope is
    // itself a configured alias prefix.
    if is_scoped_package(specifier) && !matches_alias(specifier, context) {
        return ImportGroup::ThirdParty;
    }

    if is_relative(specifier) {
        return classify_path(specifier);
    }

    if matches_alias(specifier, context) {
        return classify_path(specifier);
    }

    ImportGroup::ThirdParty
}

fn has_asset_extension(specifier: &str) -> bool {
    let lower = specifier.to_lowercase();
    ASSET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn is_framework_core(specifier: &str, framework: Framework) -> bool {
    if CORE_MODULES.contains(&specifier) || specifier.starts_with("next/") {
        return true;
    }

    matches!(framework, Framework::React | Framework::Next)
        && (specifier.starts_with("react/") || specifier.starts_with("react-dom/"))
}

fn is_node_builtin(specifier: &str) -> bool {
    specifier.starts_with("node:") || NODE_BUILTINS.contains(&specifier)
}

fn is_relative(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}

fn is_scoped_package(specifier: &str) -> bool {
    specifier.starts_with('@') && !specifier.starts_with("@/") && specifier[1..].contains('/')
}

/// True when the specifier equals a configured alias (pattern minus its
/// trailing `/*`) or begins with that alias plus `/`. The reserved `@/` and
/// `~/` prefixes always count.
fn matches_alias(specifier: &str, context: &ProjectContext) -> bool {
    if specifier.starts_with("@/") || specifier.starts_with("~/") {
        return true;
    }

    context.aliases.iter().any(|(pattern, _)| {
        let normalized = pattern.strip_suffix("/*").unwrap_or(pattern);
        specifier == normalized || specifier.starts_with(&format!("{normalized}/"))
    })
}

/// Shared bucket selection for relative and aliased paths. Matching is
/// permissive, case-insensitive substring containment.
fn classify_path(specifier: &str) -> ImportGroup {
    let lower = specifier.to_lowercase();

    if contains_any(&lower, COMPONENT_SEGMENTS) {
        return ImportGroup::Components;
    }

    if contains_any(&lower, CONSTANT_SEGMENTS) || contains_any(&lower, CONSTANT_SUFFIXES) {
        return ImportGroup::ConstantsTypes;
    }

    if contains_any(&lower, UTILITY_SEGMENTS) {
        return ImportGroup::Utils;
    }

    // Services, api clients, stores and config paths all land here.
    ImportGroup::Internal
}

fn contains_any(lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| lower.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Framework;

    fn context() -> ProjectContext {
        ProjectContext::default()
    }

    fn context_with(framework: Framework, aliases: &[(&str, &str)]) -> ProjectContext {
        ProjectContext {
            framework,
            aliases: aliases
                .iter()
                .map(|(pattern, target)| (pattern.to_string(), target.to_string()))
                .collect(),
            workspace_root: std::path::PathBuf::from("."),
        }
    }

    #[test]
    fn side_effect_import_without_asset_extension() {
        assert_eq!(
            classify("./polyfills", true, &context()),
            ImportGroup::SideEffects
        );
    }

    #[test]
    fn side_effect_stylesheet_is_an_asset() {
        assert_eq!(
            classify("./globals.css", true, &context()),
            ImportGroup::AssetsStyles
        );
    }

    #[test]
    fn asset_extensions_match_case_insensitively() {
        assert_eq!(
            classify("./Logo.SVG", false, &context()),
            ImportGroup::AssetsStyles
        );
        assert_eq!(
            classify("./theme.module.scss", false, &context()),
            ImportGroup::AssetsStyles
        );
    }

    #[test]
    fn framework_core_modules() {
        assert_eq!(classify("react", false, &context()), ImportGroup::Core);
        assert_eq!(
            classify("react-dom/client", false, &context()),
            ImportGroup::Core
        );
        assert_eq!(
            classify("next/navigation", false, &context()),
            ImportGroup::Core
        );
    }

    #[test]
    fn react_subpaths_need_a_react_framework() {
        let react = context_with(Framework::React, &[]);
        let node = context_with(Framework::Node, &[]);

        assert_eq!(
            classify("react/jsx-runtime", false, &react),
            ImportGroup::Core
        );
        assert_eq!(
            classify("react/jsx-runtime", false, &node),
            ImportGroup::ThirdParty
        );
    }

    #[test]
    fn node_builtins_are_core() {
        assert_eq!(classify("fs", false, &context()), ImportGroup::Core);
        assert_eq!(classify("node:path", false, &context()), ImportGroup::Core);
    }

    #[test]
    fn scoped_package_beats_loose_alias_prefix() {
        let ctx = context_with(Framework::Unknown, &[("@/*", "./src/*")]);

        assert_eq!(
            classify("@testing-library/react", false, &ctx),
            ImportGroup::ThirdParty
        );
    }

    #[test]
    fn configured_scoped_alias_uses_path_semantics() {
        let ctx = context_with(Framework::Unknown, &[("@app/*", "./src/app/*")]);

        assert_eq!(
            classify("@app/components/Button", false, &ctx),
            ImportGroup::Components
        );
    }

    #[test]
    fn relative_paths_pick_their_bucket() {
        assert_eq!(
            classify("./components/Button", false, &context()),
            ImportGroup::Components
        );
        assert_eq!(
            classify("./utils/format", false, &context()),
            ImportGroup::Utils
        );
        assert_eq!(
            classify("../types/user", false, &context()),
            ImportGroup::ConstantsTypes
        );
        assert_eq!(
            classify("./services/api", false, &context()),
            ImportGroup::Internal
        );
    }

    #[test]
    fn reserved_alias_prefixes_use_path_semantics() {
        assert_eq!(
            classify("@/hooks/useAuth", false, &context()),
            ImportGroup::Utils
        );
        assert_eq!(
            classify("~/constants/routes", false, &context()),
            ImportGroup::ConstantsTypes
        );
        assert_eq!(classify("@/store", false, &context()), ImportGroup::Internal);
    }

    #[test]
    fn type_suffixes_win_over_utility_segments() {
        assert_eq!(
            classify("./utils/user.types", false, &context()),
            ImportGroup::ConstantsTypes
        );
        assert_eq!(
            classify("./api.d.ts", false, &context()),
            ImportGroup::ConstantsTypes
        );
    }

    #[test]
    fn component_segments_outrank_the_rest() {
        assert_eq!(
            classify("./components/helpers", false, &context()),
            ImportGroup::Components
        );
        assert_eq!(
            classify("@/pages/types", false, &context()),
            ImportGroup::Components
        );
    }

    #[test]
    fn bare_packages_default_to_third_party() {
        assert_eq!(classify("lodash", false, &context()), ImportGroup::ThirdParty);
        assert_eq!(classify("axios", false, &context()), ImportGroup::ThirdParty);
    }

    #[test]
    fn every_specifier_maps_to_exactly_one_group() {
        let ctx = context_with(Framework::Next, &[("@app/*", "./src/app/*")]);
        let specifiers = [
            "react",
            "node:fs",
            "lodash",
            "@scope/pkg",
            "@/components/Nav",
            "~/lib/db",
            "./relative",
            "../up/one",
            "./style.css",
            "@app/models/user",
        ];

        for specifier in specifiers {
            for side_effect in [false, true] {
                // classify is total; this must never panic.
                let _ = classify(specifier, side_effect, &ctx);
            }
        }
    }
}
