use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::batch::BatchSummary;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct OutcomeRow {
    id: u32,
    archive: String,
    status: &'static str,
    error_kind: &'static str,
    message: String,
}

pub fn write_report(summary: &BatchSummary, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_report_to(summary, file)
}

pub fn write_report_to<W: Write>(summary: &BatchSummary, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for outcome in &summary.outcomes {
        let row = match &outcome.result {
            Ok(_) => OutcomeRow {
                id: outcome.id.0,
                archive: outcome.id.archive_name(),
                status: "ok",
                error_kind: "",
                message: String::new(),
            },
            Err(e) => OutcomeRow {
                id: outcome.id.0,
                archive: outcome.id.archive_name(),
                status: "failed",
                error_kind: e.kind(),
                message: e.to_string(),
            },
        };
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;

    Ok(())
}
