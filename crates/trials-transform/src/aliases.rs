//! Intervention alias canonicalization.
//!
//! Registries record the same compound under brand names, generic names,
//! and formulation suffixes. The ordered rule table here maps any name
//! containing one of a rule's patterns (case-insensitive substring match)
//! to that rule's canonical form; the first matching rule wins and a name
//! matching no rule passes through unchanged. New aliasings are added as
//! data, not as transform control flow.

use crate::text::find_ignore_ascii_case;

/// One aliasing rule: any name containing one of `patterns` canonicalizes
/// to `canonical`.
#[derive(Debug, Clone)]
struct AliasRule {
    patterns: Vec<String>,
    canonical: String,
}

/// Ordered alias rule table.
///
/// `Default` carries the built-in rules for the trial corpus this tool was
/// grown on; [`AliasTable::with_rule`] extends the table without touching
/// the pipeline.
#[derive(Debug, Clone)]
pub struct AliasTable {
    rules: Vec<AliasRule>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::empty()
            .with_rule(&["oxybat", "xyrem"], "Sodium Oxybate")
            .with_rule(&["modafinil", "provigil"], "Modafinil")
    }
}

impl AliasTable {
    /// A table with no rules; every name passes through.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule. Later rules only apply to names no earlier rule
    /// matched.
    #[must_use]
    pub fn with_rule(mut self, patterns: &[&str], canonical: &str) -> Self {
        self.rules.push(AliasRule {
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
            canonical: canonical.to_string(),
        });
        self
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Canonicalizes one intervention name.
    pub fn canonicalize(&self, name: &str) -> String {
        for rule in &self.rules {
            let matched = rule
                .patterns
                .iter()
                .any(|pattern| find_ignore_ascii_case(name, pattern).is_some());
            if matched {
                return rule.canonical.clone();
            }
        }
        name.to_string()
    }
}
