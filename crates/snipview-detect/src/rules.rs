//! Ordered pattern batteries used by the detector.
//!
//! Each rule is a battery of patterns that matches when ANY of its patterns
//! occurs anywhere in the snippet. Rules are evaluated in table order and the
//! first match wins, so the order of [`RULES`] is the precedence order.

use regex::RegexSet;
use std::sync::LazyLock;

use crate::classification::{Classification, Dialect};

/// Identifies a battery in the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    React,
    Vue,
    Angular,
    Svelte,
    TypeScript,
    JavaScript,
    Html,
    Stylesheet,
}

/// What a matching rule classifies the snippet as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A fixed classification.
    Fixed(Classification),
    /// The CSS family; the dialect is decided by a second-level pass.
    Stylesheet,
}

/// A single battery of detection patterns.
#[derive(Debug)]
pub struct Rule {
    pub kind: RuleKind,
    pub patterns: &'static [&'static str],
    pub outcome: Outcome,
}

/// Detection rules in precedence order.
pub static RULES: &[Rule] = &[
    Rule {
        kind: RuleKind::React,
        patterns: &[
            r"(?i)import\s+React",
            r#"(?i)from\s+['"]react['"]"#,
            r"React\.(?:Component|createElement|Fragment|useState|useEffect)",
            r"\b(?:useState|useEffect|useContext|useReducer|useMemo|useCallback)\b",
            r"export\s+default\s+function\s+[A-Z]\w*\s*\([^)]*\)\s*\{[^}]*return\s*\(",
            r"function\s+[A-Z]\w*\s*\([^)]*\)\s*\{[^}]*return\s*\(",
            r"const\s+[A-Z]\w*\s*=\s*\([^)]*\)\s*=>\s*\{[^}]*return\s*\(",
            r"const\s+[A-Z]\w*\s*=\s*\([^)]*\)\s*=>\s*\(",
            // PascalCase tags; generic arguments such as `Array<Item>` follow an identifier
            r"(?:^|[^\w$])<[A-Z]\w*[^>]*>",
            r"</[A-Z]\w*>",
            r"<div[^>]*className",
            r"className\s*=",
            r"\bon(?:Click|Change|Submit)\s*=",
            r"jsx|JSX",
            r"return\s*\(\s*<[^>]*>",
        ],
        outcome: Outcome::Fixed(Classification::REACT),
    },
    Rule {
        kind: RuleKind::Vue,
        patterns: &[
            r"(?i)<template>",
            r"(?i)<script>",
            r"(?i)<style>",
            r"export\s+default\s*\{[^}]*data\s*\(",
            r"export\s+default\s*\{[^}]*methods\s*:",
            r"export\s+default\s*\{[^}]*computed\s*:",
            r"v-if|v-for|v-model|v-show|v-bind|v-on",
            r"@click|@input|@change",
            r"\{\{.*\}\}",
            r"Vue\.|createApp",
        ],
        outcome: Outcome::Fixed(Classification::VUE),
    },
    Rule {
        kind: RuleKind::Angular,
        patterns: &[
            r"@Component\s*\(",
            r"@Injectable\s*\(",
            r"@NgModule\s*\(",
            r"@Input\s*\(",
            r"@Output\s*\(",
            r#"from\s+['"]@angular/"#,
            r"templateUrl\s*:",
            r"styleUrls\s*:",
            r"\*ngFor|\*ngIf",
            r"\(click\)|\(input\)|\(change\)",
            r"\[\(ngModel\)\]",
        ],
        outcome: Outcome::Fixed(Classification::ANGULAR),
    },
    Rule {
        kind: RuleKind::Svelte,
        patterns: &[
            r"(?i)<script>",
            r"(?i)<style>",
            r"\{#if|\{#each|\{#await",
            r"\{/if\}|\{/each\}|\{/await\}",
            r"on:click|on:input|on:change",
            r"bind:value|bind:checked",
            r"\$:",
            r"export\s+let\s+\w+",
        ],
        outcome: Outcome::Fixed(Classification::SVELTE),
    },
    Rule {
        kind: RuleKind::TypeScript,
        patterns: &[
            r":\s*(?:string|number|boolean|object|any|void|never|unknown)\b",
            r"\binterface\s+\w+",
            r"\btype\s+\w+\s*=",
            r"\benum\s+\w+",
            r"\b(?:public|private|protected)\s+",
            r"\bimplements\s+\w+",
            r"<[A-Z]\w*>",
            r"\bas\s+\w+",
            r"\?\s*:",
        ],
        outcome: Outcome::Fixed(Classification::TYPESCRIPT),
    },
    Rule {
        kind: RuleKind::JavaScript,
        patterns: &[
            r"\bfunction\s+\w+",
            r"\bconst\s+\w+\s*=",
            r"\blet\s+\w+\s*=",
            r"\bvar\s+\w+\s*=",
            r"=>\s*\{",
            r"=>\s*\(",
            r"\bclass\s+\w+",
            r"\bimport\s+.*from",
            r"\bexport\s+",
            r"console\.(?:log|error|warn)",
            r"document\.|window\.",
        ],
        outcome: Outcome::Fixed(Classification::DEFAULT),
    },
    Rule {
        kind: RuleKind::Html,
        patterns: &[
            r"(?i)<!DOCTYPE\s+html>",
            r"(?i)<html[^>]*>",
            r"(?i)<head[^>]*>",
            r"(?i)<body[^>]*>",
            r"(?i)<div[^>]*>",
            r"(?i)<p[^>]*>",
            r"(?i)<h[1-6][^>]*>",
            r"(?i)<img[^>]*>",
            r"(?i)<a[^>]*>",
            r"(?i)<script[^>]*>",
            r"(?i)<style[^>]*>",
        ],
        outcome: Outcome::Fixed(Classification::HTML),
    },
    Rule {
        kind: RuleKind::Stylesheet,
        patterns: &[
            r"\.[a-zA-Z][\w-]*\s*\{",
            r"#[a-zA-Z][\w-]*\s*\{",
            r"[a-zA-Z][\w-]*\s*\{[^}]*\}",
            r"color\s*:",
            r"background\s*:",
            r"margin\s*:",
            r"padding\s*:",
            r"font-size\s*:",
            r"display\s*:",
            r"position\s*:",
            r"@media\s*\(",
            r"@import\s+",
        ],
        outcome: Outcome::Stylesheet,
    },
];

/// A rule with its patterns compiled into a single set.
pub(crate) struct CompiledRule {
    pub rule: &'static Rule,
    set: RegexSet,
}

impl CompiledRule {
    pub fn is_match(&self, code: &str) -> bool {
        self.set.is_match(code)
    }
}

pub(crate) static COMPILED_RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|rule| CompiledRule {
            rule,
            set: RegexSet::new(rule.patterns).expect("Invalid detection pattern"),
        })
        .collect()
});

/// Stylesheet dialect rules, checked in order after the CSS family matched.
static STYLESHEET_DIALECTS: LazyLock<Vec<(Dialect, RegexSet)>> = LazyLock::new(|| {
    [
        (Dialect::Scss, &[r"\$[\w-]+\s*:", r"@mixin|@include|@extend"][..]),
        (Dialect::Less, &[r"@[\w-]+\s*:", r"\.[\w-]+\(\)"][..]),
        (
            Dialect::CssCustomProperties,
            &[r":root\s*\{", r"var\(--[\w-]+\)"][..],
        ),
    ]
    .into_iter()
    .map(|(dialect, patterns)| {
        (
            dialect,
            RegexSet::new(patterns).expect("Invalid stylesheet dialect pattern"),
        )
    })
    .collect()
});

/// Decide the dialect of a snippet already known to be a stylesheet.
pub fn stylesheet_dialect(code: &str) -> Dialect {
    STYLESHEET_DIALECTS
        .iter()
        .find(|(_, set)| set.is_match(code))
        .map(|(dialect, _)| *dialect)
        .unwrap_or(Dialect::Css)
}
