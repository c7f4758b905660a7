use anyhow::{Context as _, Result};
use std::fs;

use crate::Context;
use crate::cli::GenerateArgs;
use crate::paths;
use crate::ui;

/// Generate the deviated RCF and emit it.
///
/// Standard output carries only the document text; everything else
/// (logging, errors) goes to stderr so the output can be piped
/// straight into Helix QAC's import.
pub fn run(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let rcf = paths::rcf_path(args.rcf.as_deref());
    let deviations = paths::deviations_path(args.deviations.as_deref())?;

    log::info!("RCF: {}", rcf.display());
    log::info!("Deviation table: {}", deviations.display());

    let output = rcfkit::generate(&rcf, &deviations)
        .with_context(|| format!("failed to generate deviated RCF from {}", rcf.display()))?;

    match args.output {
        Some(path) => {
            fs::write(&path, format!("{output}\n"))
                .with_context(|| format!("Could not write {}", path.display()))?;
            if !ctx.quiet {
                ui::success(&format!("Wrote deviated RCF to {}", path.display()));
            }
        }
        None => println!("{output}"),
    }

    Ok(())
}
