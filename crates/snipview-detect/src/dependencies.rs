//! Runtime scripts and editor modes per compilation type.

use crate::classification::CompilationType;

/// Styling helper every preview envelope loads, independent of compilation type.
pub const BASELINE_STYLESHEET: &str = "https://cdn.tailwindcss.com";

pub const BABEL_STANDALONE: &str = "https://unpkg.com/@babel/standalone/babel.min.js";
pub const REACT_RUNTIME: &str = "https://unpkg.com/react@18/umd/react.development.js";
pub const REACT_DOM_RUNTIME: &str = "https://unpkg.com/react-dom@18/umd/react-dom.development.js";
pub const VUE_RUNTIME: &str = "https://unpkg.com/vue@3/dist/vue.global.js";
pub const TYPESCRIPT_COMPILER: &str = "https://unpkg.com/typescript@latest/lib/typescript.js";
pub const ANGULAR_CORE: &str = "https://unpkg.com/@angular/core@latest/bundles/core.umd.js";
pub const SVELTE_COMPILER: &str = "https://unpkg.com/svelte@3/compiler.js";
pub const SASS_COMPILER: &str = "https://unpkg.com/sass@latest/sass.js";
pub const LESS_COMPILER: &str = "https://unpkg.com/less@latest/dist/less.min.js";

/// External scripts a preview of the given type needs, in load order.
pub fn resolve_dependencies(compilation_type: CompilationType) -> &'static [&'static str] {
    match compilation_type {
        CompilationType::BabelReact => &[BABEL_STANDALONE, REACT_RUNTIME, REACT_DOM_RUNTIME],
        CompilationType::VueCompiler => &[VUE_RUNTIME],
        CompilationType::TypeScriptAngular => &[TYPESCRIPT_COMPILER, ANGULAR_CORE],
        CompilationType::SvelteCompiler => &[SVELTE_COMPILER],
        CompilationType::TypeScript => &[TYPESCRIPT_COMPILER],
        CompilationType::Scss => &[SASS_COMPILER],
        CompilationType::Less => &[LESS_COMPILER],
        CompilationType::JavaScript | CompilationType::Html | CompilationType::Css => &[],
    }
}

/// Syntax mode an editor should use for snippets of the given type.
pub fn editor_language(compilation_type: CompilationType) -> &'static str {
    match compilation_type {
        CompilationType::BabelReact | CompilationType::JavaScript => "javascript",
        CompilationType::VueCompiler | CompilationType::SvelteCompiler | CompilationType::Html => {
            "html"
        }
        CompilationType::TypeScriptAngular | CompilationType::TypeScript => "typescript",
        CompilationType::Css => "css",
        CompilationType::Scss => "scss",
        CompilationType::Less => "less",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_types_need_no_runtime() {
        assert!(resolve_dependencies(CompilationType::JavaScript).is_empty());
        assert!(resolve_dependencies(CompilationType::Html).is_empty());
        assert!(resolve_dependencies(CompilationType::Css).is_empty());
    }

    #[test]
    fn react_needs_transpiler_and_both_runtimes() {
        let deps = resolve_dependencies(CompilationType::BabelReact);

        assert_eq!(deps.len(), 3);
        assert!(deps.iter().any(|d| d.contains("babel")));
        assert!(deps.iter().any(|d| d.contains("/react@")));
        assert!(deps.iter().any(|d| d.contains("/react-dom@")));
    }

    #[test]
    fn typescript_types_load_the_compiler_first() {
        assert_eq!(
            resolve_dependencies(CompilationType::TypeScript),
            &[TYPESCRIPT_COMPILER]
        );
        assert_eq!(
            resolve_dependencies(CompilationType::TypeScriptAngular)[0],
            TYPESCRIPT_COMPILER
        );
    }

    #[test]
    fn baseline_stylesheet_is_not_a_dependency() {
        for ty in CompilationType::ALL {
            assert!(!resolve_dependencies(ty).contains(&BASELINE_STYLESHEET));
        }
    }

    #[test]
    fn maps_editor_languages() {
        assert_eq!(editor_language(CompilationType::BabelReact), "javascript");
        assert_eq!(editor_language(CompilationType::VueCompiler), "html");
        assert_eq!(editor_language(CompilationType::TypeScriptAngular), "typescript");
        assert_eq!(editor_language(CompilationType::Scss), "scss");
    }
}
