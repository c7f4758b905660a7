//! # rcfkit
//!
//! Pure Rust library for applying compliance deviations to Helix QAC
//! rule configuration files (RCF).
//!
//! This crate provides functionality for:
//! - Parsing an RCF into an order-preserving element tree
//! - Loading deviation tables (CSV with `Locator` and `Enforced` columns)
//! - Resolving locators to exactly one rule node each
//! - Writing the deviated RCF back out with format-compatible text
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let rcf = Path::new("/opt/Perforce/Helix-QAC-2020.1/config/rcf/crit_ascm.rcf");
//! let deviations = Path::new("rule_configuration_deviation.csv");
//!
//! let output = rcfkit::generate(rcf, deviations).expect("deviation failed");
//! print!("{output}");
//! ```
//!
//! The run is all-or-nothing: a malformed RCF, a locator matching zero
//! or several nodes, or an enforced value other than the exact strings
//! `"yes"`/`"no"` each abort with an error naming the offending row, and
//! no output text is produced.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod deviation;
pub mod document;
pub mod error;
pub mod query;
pub mod types;

pub use document::{Document, Element, NodeId};
pub use error::{Error, Result};
pub use types::{Deviation, Enforcement};

use std::path::Path;

/// Run the whole pipeline: parse the RCF, load the deviation table,
/// apply every deviation, and serialize the result.
///
/// Returns the full output text; nothing is written anywhere by this
/// crate. Fails without producing text if any step fails.
pub fn generate(rcf: &Path, deviations: &Path) -> Result<String> {
    let mut doc = document::parse_file(rcf)?;
    let deviations = deviation::load_file(deviations)?;
    deviation::apply(&mut doc, &deviations)?;
    Ok(document::write_string(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let rcf = dir.path().join("crit.rcf");
        let csv = dir.path().join("deviations.csv");
        std::fs::write(
            &rcf,
            "<rcf>\n  <rule id=\"R1\" active=\"yes\"/>\n  <rule id=\"R2\" active=\"no\"/>\n</rcf>\n",
        )
        .unwrap();
        std::fs::write(
            &csv,
            "Locator,Enforced\n//rule[@id='R1'],no\n//rule[@id='R2'],yes\n",
        )
        .unwrap();

        let output = generate(&rcf, &csv).unwrap();
        assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rcf>"));
        assert!(output.contains("<rule id=\"R1\" active=\"yes\" mapped=\"no\"/>"));
        assert!(output.contains("<rule id=\"R2\" active=\"no\" mapped=\"yes\"/>"));
    }

    #[test]
    fn test_generate_aborts_on_bad_row() {
        let dir = tempfile::tempdir().unwrap();
        let rcf = dir.path().join("crit.rcf");
        let csv = dir.path().join("deviations.csv");
        std::fs::write(&rcf, "<rcf><rule id=\"R1\"/></rcf>").unwrap();
        std::fs::write(&csv, "Locator,Enforced\n//rule[@id='R1'],Yes\n").unwrap();

        let err = generate(&rcf, &csv).unwrap_err();
        assert!(matches!(err, Error::InvalidEnforced { .. }));
    }

    #[test]
    fn test_generate_aborts_on_malformed_rcf() {
        let dir = tempfile::tempdir().unwrap();
        let rcf = dir.path().join("crit.rcf");
        let csv = dir.path().join("deviations.csv");
        std::fs::write(&rcf, "<rcf><rule></rcf>").unwrap();
        std::fs::write(&csv, "Locator,Enforced\n").unwrap();

        let err = generate(&rcf, &csv).unwrap_err();
        assert!(matches!(err, Error::Xml { .. }));
    }
}
