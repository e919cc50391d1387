//! Classification record produced by the detector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse source language of a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Html,
    Css,
}

/// UI framework detected in a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
    Angular,
    Svelte,
    Vanilla,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Html => "html",
            Self::Css => "css",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
            Self::Angular => "angular",
            Self::Svelte => "svelte",
            Self::Vanilla => "vanilla",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive dialect tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    Jsx,
    VueSfc,
    AngularComponent,
    SvelteComponent,
    #[serde(rename = "typescript")]
    TypeScript,
    Es6,
    Html5,
    Css,
    Scss,
    Less,
    CssCustomProperties,
}

impl Dialect {
    /// Kebab-case tag, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jsx => "jsx",
            Self::VueSfc => "vue-sfc",
            Self::AngularComponent => "angular-component",
            Self::SvelteComponent => "svelte-component",
            Self::TypeScript => "typescript",
            Self::Es6 => "es6",
            Self::Html5 => "html5",
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Less => "less",
            Self::CssCustomProperties => "css-custom-properties",
        }
    }

    /// The compilation strategy used for snippets of this dialect.
    pub const fn compilation_type(self) -> CompilationType {
        match self {
            Self::Jsx => CompilationType::BabelReact,
            Self::VueSfc => CompilationType::VueCompiler,
            Self::AngularComponent => CompilationType::TypeScriptAngular,
            Self::SvelteComponent => CompilationType::SvelteCompiler,
            Self::TypeScript => CompilationType::TypeScript,
            Self::Es6 => CompilationType::JavaScript,
            Self::Html5 => CompilationType::Html,
            Self::Css | Self::CssCustomProperties => CompilationType::Css,
            Self::Scss => CompilationType::Scss,
            Self::Less => CompilationType::Less,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch key for the preview compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompilationType {
    #[serde(rename = "babel-react")]
    BabelReact,
    #[serde(rename = "vue-compiler")]
    VueCompiler,
    #[serde(rename = "typescript-angular")]
    TypeScriptAngular,
    #[serde(rename = "svelte-compiler")]
    SvelteCompiler,
    #[serde(rename = "typescript")]
    TypeScript,
    #[serde(rename = "javascript")]
    JavaScript,
    #[serde(rename = "html")]
    Html,
    #[serde(rename = "css")]
    Css,
    #[serde(rename = "scss")]
    Scss,
    #[serde(rename = "less")]
    Less,
}

impl CompilationType {
    /// Every compilation type, in dispatch-table order.
    pub const ALL: [CompilationType; 10] = [
        Self::BabelReact,
        Self::VueCompiler,
        Self::TypeScriptAngular,
        Self::SvelteCompiler,
        Self::TypeScript,
        Self::JavaScript,
        Self::Html,
        Self::Css,
        Self::Scss,
        Self::Less,
    ];

    /// Kebab-case tag, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BabelReact => "babel-react",
            Self::VueCompiler => "vue-compiler",
            Self::TypeScriptAngular => "typescript-angular",
            Self::SvelteCompiler => "svelte-compiler",
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Html => "html",
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Less => "less",
        }
    }
}

impl fmt::Display for CompilationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown compilation type tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown compilation type: {0}")]
pub struct ParseTypeError(pub String);

impl FromStr for CompilationType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| ParseTypeError(s.to_string()))
    }
}

/// The detector's structured guess at a snippet's language, framework and dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub language: Language,
    pub framework: Framework,
    pub dialect: Dialect,
    pub compilation_type: CompilationType,
}

impl Classification {
    /// Build a classification. The compilation type is derived from the dialect.
    pub const fn new(language: Language, framework: Framework, dialect: Dialect) -> Self {
        Self {
            language,
            framework,
            dialect,
            compilation_type: dialect.compilation_type(),
        }
    }

    /// Outcome for input that no battery recognizes.
    pub const DEFAULT: Classification =
        Classification::new(Language::JavaScript, Framework::Vanilla, Dialect::Es6);

    pub const REACT: Classification =
        Classification::new(Language::JavaScript, Framework::React, Dialect::Jsx);

    pub const VUE: Classification =
        Classification::new(Language::JavaScript, Framework::Vue, Dialect::VueSfc);

    pub const ANGULAR: Classification = Classification::new(
        Language::TypeScript,
        Framework::Angular,
        Dialect::AngularComponent,
    );

    pub const SVELTE: Classification = Classification::new(
        Language::JavaScript,
        Framework::Svelte,
        Dialect::SvelteComponent,
    );

    pub const TYPESCRIPT: Classification =
        Classification::new(Language::TypeScript, Framework::Vanilla, Dialect::TypeScript);

    pub const HTML: Classification =
        Classification::new(Language::Html, Framework::Vanilla, Dialect::Html5);

    /// Classification for a stylesheet of the given dialect.
    pub const fn stylesheet(dialect: Dialect) -> Self {
        Classification::new(Language::Css, Framework::Vanilla, dialect)
    }

    /// The classification the detector would pick for a given compilation type.
    pub fn for_compilation_type(compilation_type: CompilationType) -> Self {
        match compilation_type {
            CompilationType::BabelReact => Self::REACT,
            CompilationType::VueCompiler => Self::VUE,
            CompilationType::TypeScriptAngular => Self::ANGULAR,
            CompilationType::SvelteCompiler => Self::SVELTE,
            CompilationType::TypeScript => Self::TYPESCRIPT,
            CompilationType::JavaScript => Self::DEFAULT,
            CompilationType::Html => Self::HTML,
            CompilationType::Css => Self::stylesheet(Dialect::Css),
            CompilationType::Scss => Self::stylesheet(Dialect::Scss),
            CompilationType::Less => Self::stylesheet(Dialect::Less),
        }
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::DEFAULT
    }
}
