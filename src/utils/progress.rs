//! Progress reporting through [indicatif]

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{prefix:>12.bold} [{elapsed_precise}] {wide_bar} {pos}/{len} ({eta})";

/// Returns a progress bar for `len` work items.
///
/// Falls back to indicatif's default style if the template fails to parse.
pub fn get_progressbar(len: u64) -> ProgressBar {
    let style = ProgressStyle::with_template(TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(len).with_style(style)
}
