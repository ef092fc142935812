//! Delimited export of suspicious findings for manual review.

use crate::error::Result;
use crate::result::SuspiciousEntry;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Write suspicious entries as CSV: a header row, then one row per entry
/// in insertion order.
pub fn write_suspicious_csv(entries: &[SuspiciousEntry], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(["origin", "raw_value", "reason"])?;
    for entry in entries {
        writer.write_record([
            entry.origin.as_str(),
            entry.raw_value.as_str(),
            entry.reason.as_str(),
        ])?;
    }
    writer.flush()?;

    info!("Exported {} suspicious entries to {}", entries.len(), path.display());
    Ok(())
}
