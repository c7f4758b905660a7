//! Deviation table loading and application.
//!
//! The table is CSV with a header row; `Locator` and `Enforced` are the
//! required columns, anything else is ignored. Loading keeps values
//! raw — each row is validated during apply so the diagnostic can name
//! the exact row that is wrong.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::query;
use crate::types::{Deviation, Enforcement};
use std::path::Path;

/// Attribute written onto each located rule node.
pub const MAPPED_ATTR: &str = "mapped";

/// Load a deviation table from a file path.
pub fn load_file(path: &Path) -> Result<Vec<Deviation>> {
    let content = std::fs::read_to_string(path)?;
    load_string(&content)
}

/// Load a deviation table from CSV text.
pub fn load_string(content: &str) -> Result<Vec<Deviation>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    for required in ["Locator", "Enforced"] {
        if !headers.iter().any(|h| h == required) {
            return Err(Error::MissingColumn {
                name: required.to_string(),
            });
        }
    }

    let mut deviations = Vec::new();
    for record in reader.deserialize() {
        deviations.push(record?);
    }
    Ok(deviations)
}

/// Apply every deviation to the document, in input order.
///
/// Each locator must resolve to exactly one node and each enforced
/// value must be exactly `"yes"` or `"no"`; the first violation aborts
/// with no partial result being observable by the caller (the document
/// may hold attributes from earlier rows, but callers only serialize on
/// success). Rows targeting the same node are not rejected; the last
/// one wins.
pub fn apply(doc: &mut Document, deviations: &[Deviation]) -> Result<()> {
    for deviation in deviations {
        let matches = query::select(doc, &deviation.locator)?;
        let node = match matches.as_slice() {
            [] => {
                return Err(Error::NoMatch {
                    locator: deviation.locator.clone(),
                });
            }
            [node] => *node,
            _ => {
                return Err(Error::MultipleMatches {
                    locator: deviation.locator.clone(),
                });
            }
        };

        let enforcement = Enforcement::parse(&deviation.enforced).ok_or_else(|| {
            Error::InvalidEnforced {
                locator: deviation.locator.clone(),
                value: deviation.enforced.clone(),
            }
        })?;

        doc.get_mut(node).set_attr(MAPPED_ATTR, enforcement.as_str());
        log::debug!(
            "set {}=\"{}\" for locator {}",
            MAPPED_ATTR,
            enforcement,
            deviation.locator
        );
    }

    Ok(())
}
