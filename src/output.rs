//! Export of processed and summary tables.
//!
//! Both tables are written as UTF-8 CSV with a header row, optionally
//! gzip-compressed. JSON and debug renderings go to the log.

use anyhow::Result;
use chrono::NaiveDateTime;
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::pipeline::types::{Mode, PipelineStats, ProcessedRecord, SummaryRecord};
use crate::schema::{derived, files, summary, ticket};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Logs run statistics using Rust's debug pretty-print format.
pub fn print_pretty(stats: &PipelineStats) {
    debug!("{:#?}", stats);
}

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fmt_float(value: f64) -> String {
    format!("{value:?}")
}

fn fmt_timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn processed_headers(mode: Mode) -> Vec<&'static str> {
    let mut headers: Vec<&str> = ticket::REQUIRED.to_vec();
    headers.push(derived::OLD_KPI);
    if mode == Mode::Multi {
        headers.push(derived::MONTH);
        headers.push(derived::YEAR);
    }
    headers.extend(derived::SCORING);
    headers
}

/// One processed record as CSV fields, aligned with [`processed_headers`].
///
/// The three parsed timestamp columns are written in canonical form; the
/// other ticket columns keep their original values.
pub fn processed_row(record: &ProcessedRecord, mode: Mode) -> Vec<String> {
    let mut row: Vec<String> = ticket::REQUIRED
        .iter()
        .zip(record.ticket.cells())
        .map(|(name, cell)| match *name {
            ticket::OCCURED_TIME => fmt_timestamp(record.occured_time),
            ticket::CLEARED_TIME => fmt_timestamp(record.cleared_time),
            ticket::SITE_CLEARED_ON => fmt_timestamp(record.site_cleared_on),
            _ => cell.render().unwrap_or_default(),
        })
        .collect();

    row.push(record.old_kpi.map(|k| k.to_string()).unwrap_or_default());
    if mode == Mode::Multi {
        row.push(record.month.map(|m| m.to_string()).unwrap_or_default());
        row.push(record.year.map(|y| y.to_string()).unwrap_or_default());
    }
    row.extend([
        fmt_float(record.mttr),
        record.sla_mttr.to_string(),
        fmt_float(record.score_mttr),
        record.handling.to_string(),
        fmt_float(record.score_to),
        record.visitation.to_string(),
        fmt_float(record.score_visit),
        fmt_float(record.score_rca),
        fmt_float(record.score_closed),
        fmt_float(record.score),
    ]);
    row
}

pub fn summary_headers(mode: Mode) -> Vec<&'static str> {
    let mut headers = Vec::new();
    if mode == Mode::Multi {
        headers.push(derived::MONTH);
        headers.push(derived::YEAR);
    }
    headers.extend([
        ticket::AREA,
        ticket::REGIONAL,
        ticket::NOP,
        derived::OLD_KPI,
        ticket::SEVERITY,
        summary::TICKET_COUNT,
        summary::AVG_SCORE,
        summary::SUM_SCORE,
    ]);
    headers
}

pub fn summary_row(record: &SummaryRecord, mode: Mode) -> Vec<String> {
    let key = &record.key;
    let mut row = Vec::new();
    if mode == Mode::Multi {
        row.push(key.month.map(|m| m.to_string()).unwrap_or_default());
        row.push(key.year.map(|y| y.to_string()).unwrap_or_default());
    }
    row.extend([
        key.area.clone().unwrap_or_default(),
        key.regional.clone().unwrap_or_default(),
        key.nop.clone().unwrap_or_default(),
        key.old_kpi.map(|k| k.to_string()).unwrap_or_default(),
        key.severity.clone().unwrap_or_default(),
        record.ticket_count.to_string(),
        fmt_float(record.avg_score),
        fmt_float(record.sum_score),
    ]);
    row
}

/// Writes a header row followed by `rows` and hands the writer back.
pub fn write_csv<W: Write>(
    writer: W,
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<W> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;

    Ok(wtr.into_inner().map_err(|e| e.into_error())?)
}

fn write_file(
    path: &Path,
    gzip: bool,
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<()> {
    let file = File::create(path)?;
    if gzip {
        let encoder = write_csv(GzEncoder::new(file, Compression::default()), headers, rows)?;
        encoder.finish()?;
    } else {
        write_csv(file, headers, rows)?;
    }
    Ok(())
}

/// Locations of the files produced by [`export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub processed: PathBuf,
    pub summary: PathBuf,
}

/// Writes `processed_kpi_data.csv` and `summary.csv` (or their `.gz`
/// variants) into `dir`, creating it if needed.
#[tracing::instrument(skip(dir, processed, summary), fields(dir = %dir.display(), processed = processed.len(), groups = summary.len()))]
pub fn export(
    dir: &Path,
    processed: &[ProcessedRecord],
    summary: &[SummaryRecord],
    mode: Mode,
    gzip: bool,
) -> Result<ExportPaths> {
    fs::create_dir_all(dir)?;

    let name = |file: &str| {
        if gzip {
            dir.join(format!("{file}.gz"))
        } else {
            dir.join(file)
        }
    };
    let paths = ExportPaths {
        processed: name(files::PROCESSED),
        summary: name(files::SUMMARY),
    };

    write_file(
        &paths.summary,
        gzip,
        &summary_headers(mode),
        summary.iter().map(|r| summary_row(r, mode)),
    )?;
    write_file(
        &paths.processed,
        gzip,
        &processed_headers(mode),
        processed.iter().map(|r| processed_row(r, mode)),
    )?;

    info!(
        summary = %paths.summary.display(),
        processed = %paths.processed.display(),
        "Exports written"
    );
    Ok(paths)
}
