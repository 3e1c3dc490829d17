use crate::domain::scheduling_graph::migration::MigrationRecord;
use crate::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Target of the structured per-migration events.
pub const ANALYTICS_TARGET: &str = "analytics";

/// Column order of the migration history export.
pub const MIGRATION_HEADERS: [&str; 3] = ["Job", "Source", "Destination"];

/// Writes `history` as `;`-delimited CSV, header first.
pub fn write_migration_history_csv<W: Write>(history: &[MigrationRecord], writer: W) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    csv_wtr.write_record(MIGRATION_HEADERS)?;
    for record in history {
        csv_wtr.write_record([record.job.as_str(), record.source.as_str(), record.destination.as_str()])?;
    }

    csv_wtr.flush()?;
    Ok(())
}

pub fn export_migration_history(history: &[MigrationRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_migration_history_csv(history, file)?;

    log::info!("Exported {} migration(s) to '{}'", history.len(), path.display());
    Ok(())
}
