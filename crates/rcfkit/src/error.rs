//! Error types for RCF deviation processing.
//!
//! Every error is fatal: the generated configuration is only correct if
//! every deviation is applied exactly as written, so ambiguity or invalid
//! input stops the run instead of skipping or guessing. Errors carry the
//! offending locator (and value, where relevant) so the operator can fix
//! the deviation table and re-run.

use thiserror::Error;

/// Errors that can occur while generating a deviated RCF.
#[derive(Debug, Error)]
pub enum Error {
    /// The RCF input is not well-formed XML
    #[error("XML parsing error: {message}")]
    Xml {
        /// Detail from the underlying parser
        message: String,
    },

    /// A locator expression could not be parsed
    #[error("invalid locator \"{locator}\": {message}")]
    Locator {
        /// The locator as written in the deviation table
        locator: String,
        /// What was wrong with it
        message: String,
    },

    /// A locator matched no node in the document
    #[error("no matches identified for locator \"{locator}\"")]
    NoMatch {
        /// The locator as written in the deviation table
        locator: String,
    },

    /// A locator matched more than one node
    #[error("multiple matches identified for locator \"{locator}\"")]
    MultipleMatches {
        /// The locator as written in the deviation table
        locator: String,
    },

    /// The Enforced column held something other than "yes" or "no"
    #[error(
        "locator \"{locator}\" has unsupported enforced value \"{value}\" \
         (only \"yes\" and \"no\" are supported)"
    )]
    InvalidEnforced {
        /// The locator of the offending row
        locator: String,
        /// The literal value found in the row
        value: String,
    },

    /// The deviation table header is missing a required column
    #[error("deviation table is missing required column \"{name}\"")]
    MissingColumn {
        /// The column that was expected
        name: String,
    },

    /// CSV reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for RCF deviation operations.
pub type Result<T> = std::result::Result<T, Error>;
