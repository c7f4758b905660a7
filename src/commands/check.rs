use anyhow::Result;

use crate::Context;
use crate::cli::CheckArgs;
use crate::paths;
use crate::ui;

/// Validate the inputs without emitting the RCF.
///
/// Runs the full parse-and-apply pipeline and discards the result, so
/// a clean exit means a real generate run would succeed on the same
/// inputs.
pub fn run(_ctx: &Context, args: CheckArgs) -> Result<()> {
    let rcf = paths::rcf_path(args.rcf.as_deref());
    let deviations_path = paths::deviations_path(args.deviations.as_deref())?;

    let mut doc = rcfkit::document::parse_file(&rcf)?;
    let deviations = rcfkit::deviation::load_file(&deviations_path)?;
    rcfkit::deviation::apply(&mut doc, &deviations)?;

    ui::success(&format!(
        "{} deviation(s) apply cleanly to {}",
        deviations.len(),
        rcf.display()
    ));
    Ok(())
}
