//! Output formatting and persistence for dashboard views.
//!
//! The JSON view file feeds the (out-of-scope) chart/DOM layer; the CSV
//! append-log keeps a per-refresh metrics history.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::types::{DashboardView, MetricsRecord};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a view using Rust's debug pretty-print format.
pub fn print_pretty(view: &DashboardView) {
    debug!("{:#?}", view);
}

/// Logs a view as pretty-printed JSON.
pub fn print_json(view: &DashboardView) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

/// Writes the view as pretty JSON to `path`, replacing the previous render.
pub fn write_view(path: &str, view: &DashboardView) -> Result<()> {
    let body = serde_json::to_vec_pretty(view)?;
    std::fs::write(path, body)?;
    debug!(path, "Dashboard view written");
    Ok(())
}

/// Flattens a view into one metrics history row.
pub fn metrics_record(view: &DashboardView) -> MetricsRecord {
    MetricsRecord {
        timestamp: view.generated_at,
        turma: view.filters.turma.clone(),
        eixo: view.filters.eixo.clone(),
        month: view.filters.month.clone(),
        checkin_rows: view.respondents.checkin,
        checkout_rows: view.respondents.checkout,
        avaliacao_rows: view.respondents.avaliacao,
        nps: view.nps.as_ref().map(|n| n.nps),
        pct_promoters: view.nps.as_ref().map(|n| n.pct_promoters),
        pct_detractors: view.nps.as_ref().map(|n| n.pct_detractors),
        avg_self_assessment: view.averages.self_assessment,
        avg_instructor_1: view.averages.instructor_1,
        avg_instructor_2: view.averages.instructor_2,
    }
}

/// Appends a [`MetricsRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &MetricsRecord) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
