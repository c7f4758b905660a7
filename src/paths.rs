//! Input path resolution for rcfgen
//!
//! Resolution priority for both inputs:
//! 1. Command-line flag
//! 2. Environment variable (`RCFGEN_RCF` / `RCFGEN_DEVIATIONS`)
//! 3. Documented default: the Helix QAC install location for the RCF,
//!    `rule_configuration_deviation.csv` next to the executable for
//!    the deviation table.
//!
//! Flag and environment values go through shell expansion, so `~` and
//! `$VAR` forms work from wrapper scripts.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable overriding the RCF location
pub const ENV_RCF: &str = "RCFGEN_RCF";

/// Environment variable overriding the deviation table location
pub const ENV_DEVIATIONS: &str = "RCFGEN_DEVIATIONS";

/// Where the Helix QAC installer places the ASCM rule configuration
pub const DEFAULT_RCF: &str = "/opt/Perforce/Helix-QAC-2020.1/config/rcf/crit_ascm.rcf";

/// Deviation table filename looked up next to the executable
pub const DEVIATIONS_FILE: &str = "rule_configuration_deviation.csv";

/// Resolve the RCF path from flag, environment, or install default.
pub fn rcf_path(flag: Option<&str>) -> PathBuf {
    if let Some(path) = flag {
        return expand(path);
    }

    if let Ok(path) = std::env::var(ENV_RCF) {
        let path = expand(&path);
        log::debug!("Using RCF from {}: {}", ENV_RCF, path.display());
        return path;
    }

    PathBuf::from(DEFAULT_RCF)
}

/// Resolve the deviation table path from flag, environment, or the
/// executable's directory.
pub fn deviations_path(flag: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(expand(path));
    }

    if let Ok(path) = std::env::var(ENV_DEVIATIONS) {
        let path = expand(&path);
        log::debug!(
            "Using deviation table from {}: {}",
            ENV_DEVIATIONS,
            path.display()
        );
        return Ok(path);
    }

    let exe = std::env::current_exe().context("Could not determine executable location")?;
    let dir = exe
        .parent()
        .context("Executable has no parent directory")?;
    Ok(dir.join(DEVIATIONS_FILE))
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}
