//! Core types for deviation records.

use serde::Deserialize;

/// Enforcement state a deviation assigns to a rule node.
///
/// Only the exact lowercase strings `"yes"` and `"no"` are recognized.
/// There is no trimming and no synonyms: anything else in the deviation
/// table is an input error, reported per row during apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforcement {
    /// Rule is enforced (`mapped="yes"`)
    Yes,
    /// Rule is not enforced (`mapped="no"`)
    No,
}

impl Enforcement {
    /// Parse an enforcement value, accepting only the exact strings
    /// `"yes"` and `"no"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "yes" => Some(Enforcement::Yes),
            "no" => Some(Enforcement::No),
            _ => None,
        }
    }

    /// The attribute value written into the RCF.
    pub fn as_str(&self) -> &'static str {
        match self {
            Enforcement::Yes => "yes",
            Enforcement::No => "no",
        }
    }
}

impl std::fmt::Display for Enforcement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the deviation table.
///
/// The `enforced` value is kept as the raw string from the table;
/// validation happens during apply so the diagnostic can name both the
/// locator and the literal offending value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Deviation {
    /// Path expression locating exactly one node in the RCF
    #[serde(rename = "Locator")]
    pub locator: String,
    /// Raw enforcement value, validated at apply time
    #[serde(rename = "Enforced")]
    pub enforced: String,
}

impl Deviation {
    /// Create a deviation record.
    pub fn new(locator: impl Into<String>, enforced: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            enforced: enforced.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enforcement_parse_exact() {
        assert_eq!(Enforcement::parse("yes"), Some(Enforcement::Yes));
        assert_eq!(Enforcement::parse("no"), Some(Enforcement::No));
    }

    #[test]
    fn test_enforcement_rejects_case_variants() {
        assert_eq!(Enforcement::parse("Yes"), None);
        assert_eq!(Enforcement::parse("NO"), None);
        assert_eq!(Enforcement::parse("true"), None);
        assert_eq!(Enforcement::parse(" yes"), None);
        assert_eq!(Enforcement::parse("yes "), None);
        assert_eq!(Enforcement::parse(""), None);
    }

    #[test]
    fn test_enforcement_as_str() {
        assert_eq!(Enforcement::Yes.as_str(), "yes");
        assert_eq!(Enforcement::No.as_str(), "no");
        assert_eq!(Enforcement::Yes.to_string(), "yes");
    }
}
