//! Snippet classification.

use crate::classification::Classification;
use crate::rules::{stylesheet_dialect, Outcome, RuleKind, COMPILED_RULES};

/// Classify a snippet.
///
/// Total over all inputs: anything no rule recognizes, including the empty
/// string, classifies as plain ES6 JavaScript.
pub fn detect(code: &str) -> Classification {
    let code = code.trim();

    let Some(compiled) = COMPILED_RULES.iter().find(|r| r.is_match(code)) else {
        return Classification::DEFAULT;
    };

    match compiled.rule.outcome {
        Outcome::Fixed(classification) => classification,
        Outcome::Stylesheet => Classification::stylesheet(stylesheet_dialect(code)),
    }
}

/// The first rule in precedence order that matches the snippet, if any.
pub fn matching_rule(code: &str) -> Option<RuleKind> {
    let code = code.trim();

    COMPILED_RULES
        .iter()
        .find(|r| r.is_match(code))
        .map(|r| r.rule.kind)
}
