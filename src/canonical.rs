//! Canonical-form production for GML source text.
//!
//! A file's canonical text is the pretty-printer's output with a fixed,
//! ordered list of regex touch-ups applied, each collapsing an awkward
//! whitespace gap the generic pass leaves around GML sigil tokens: `$"`
//! template strings, `@"` verbatim strings, and the `[@`, `[|`, `[#`, `[?`,
//! `[$` accessors.
//!
//! Canonicalization is a pure function of (source text, options): it is
//! deterministic, idempotent, and independent of file path or run order.

use crate::beautify::{Beautifier, BeautifyError, GmlBeautifier};
use crate::config::BeautifyOptions;
use regex::{NoExpand, Regex};

/// Touch-up rules in application order. Each is applied exactly once over
/// the whole text.
const TOUCH_UP_RULES: [(&str, &str); 7] = [
    // no gap between a template sigil and its opening quote
    (r#"\$[\s\n]+""#, "$\""),
    // no gap between a verbatim sigil and its opening quote
    (r#"@[\s\n]+""#, "@\""),
    // accessor sigils sit flush against `[` with one trailing space
    (r"\[[\s\n]+@", "[@ "),
    (r"\[[\s\n]+\|", "[| "),
    (r"\[[\s\n]+#", "[# "),
    (r"\[[\s\n]+\?", "[? "),
    // The struct accessor is enforced even when `[` and `$` are already
    // adjacent. Whitespace following the sigil folds into the single
    // trailing space so a second application is a no-op.
    (r"\[[\s\n]*\$[\s\n]*", "[$ "),
];

pub struct Canonicalizer {
    options: BeautifyOptions,
    beautifier: Box<dyn Beautifier>,
    rules: Vec<(Regex, &'static str)>,
}

impl Canonicalizer {
    pub fn new(options: BeautifyOptions) -> Self {
        Self::with_beautifier(options, Box::new(GmlBeautifier))
    }

    /// Build a canonicalizer around any compliant pretty-printer.
    pub fn with_beautifier(options: BeautifyOptions, beautifier: Box<dyn Beautifier>) -> Self {
        let rules = TOUCH_UP_RULES
            .iter()
            .map(|&(pattern, replacement)| {
                (
                    Regex::new(pattern).expect("touch-up pattern is valid"),
                    replacement,
                )
            })
            .collect();
        Self {
            options,
            beautifier,
            rules,
        }
    }

    /// Produce the canonical text for `source`.
    ///
    /// A pretty-printer rejection propagates unchanged; no partial output is
    /// produced.
    pub fn canonicalize(&self, source: &str) -> Result<String, BeautifyError> {
        let mut text = self.beautifier.beautify(source, &self.options)?;
        for (rule, replacement) in &self.rules {
            text = rule.replace_all(&text, NoExpand(replacement)).into_owned();
        }
        Ok(text)
    }
}
