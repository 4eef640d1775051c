//! Loading ticket exports into a [`RawTable`].
//!
//! Sources are local paths or `http(s)` URLs; the format is picked from the
//! file extension. Several sources can be loaded concurrently, but the
//! returned tables always follow the order the sources were given in.

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{Instrument, debug, info};

use crate::error::PipelineError;
use crate::fetch::{BasicClient, fetch_bytes};
use crate::pipeline::project::check_columns;
use crate::table::{Cell, RawTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Workbook,
}

impl InputFormat {
    /// Detects the format from the extension of a path or URL.
    pub fn from_source(source: &str) -> Result<Self, PipelineError> {
        let path = source.split(['?', '#']).next().unwrap_or(source);
        let extension = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(InputFormat::Workbook),
            _ => Err(PipelineError::UnsupportedFormat(source.to_string())),
        }
    }

    pub fn read(self, bytes: Vec<u8>) -> Result<RawTable, PipelineError> {
        match self {
            InputFormat::Csv => read_csv(&bytes),
            InputFormat::Workbook => read_workbook(bytes),
        }
    }
}

/// Parses CSV text with a header row. Every value is kept as text.
pub fn read_csv(bytes: &[u8]) -> Result<RawTable, PipelineError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    let mut table = RawTable::new(headers);

    for result in rdr.records() {
        let record = result?;
        table.push_row(record.iter().map(Cell::text).collect());
    }

    Ok(table)
}

/// Reads the first worksheet of a workbook; its first row is the header.
pub fn read_workbook(bytes: Vec<u8>) -> Result<RawTable, PipelineError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(PipelineError::EmptyWorkbook)?;
    let range = workbook.worksheet_range(&sheet)?;
    debug!(sheet = %sheet, size = ?range.get_size(), "Reading worksheet");

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();
    let mut table = RawTable::new(headers);

    for row in rows {
        table.push_row(row.iter().map(cell_from_data).collect());
    }

    Ok(table)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::text(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        // Honours the workbook's 1900 or 1904 date system.
        Data::DateTime(dt) => dt.as_datetime().map_or(Cell::Empty, Cell::DateTime),
    }
}

/// Loads one source from disk or over HTTP.
#[tracing::instrument(skip(source), fields(source = %source))]
pub async fn fetcher(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, source).await?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("failed to read {source}"))?
    };
    Ok(bytes)
}

/// Loads and parses a single source.
pub async fn load_source(source: &str) -> Result<RawTable> {
    let format = InputFormat::from_source(source)?;
    let bytes = fetcher(source).await?;
    let table = tokio::task::spawn_blocking(move || format.read(bytes)).await??;
    info!(source, rows = table.len(), columns = table.headers().len(), "Source loaded");
    Ok(table)
}

/// Loads several sources with at most `concurrency` in flight.
///
/// Tables are returned in the order of `sources`, regardless of which load
/// finishes first. Each table must carry every required column on its own;
/// the first source that does not fails the whole load.
#[tracing::instrument(skip(sources), fields(count = sources.len()))]
pub async fn load_sources(sources: &[String], concurrency: usize) -> Result<Vec<RawTable>> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = Vec::with_capacity(sources.len());

    for source in sources {
        let sem = semaphore.clone();
        let source = source.clone();
        let span = tracing::info_span!("load_source", source = %source);

        tasks.push(tokio::spawn(
            async move {
                let _permit = sem.acquire().await?;
                load_source(&source).await
            }
            .instrument(span),
        ));
    }

    let mut tables = Vec::with_capacity(tasks.len());
    for (task, source) in tasks.into_iter().zip(sources) {
        let table = task
            .await?
            .with_context(|| format!("failed to load {source}"))?;
        check_columns(&table).with_context(|| format!("{source} lacks required columns"))?;
        tables.push(table);
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::schema::ticket::{AREA, REQUIRED};
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use std::io::Write;
    use std::path::Path;

    /// Writes a CSV with the given headers and one row per Area value.
    fn write_export(path: &Path, headers: &[&str], areas: &[&str]) {
        let area_idx = headers.iter().position(|h| *h == AREA);
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(file, "{}", headers.join(",")).unwrap();
        for area in areas {
            let mut row = vec![""; headers.len()];
            if let Some(i) = area_idx {
                row[i] = *area;
            }
            writeln!(file, "{}", row.join(",")).unwrap();
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_source("a/b.csv").unwrap(), InputFormat::Csv);
        assert_eq!(InputFormat::from_source("T.XLSX").unwrap(), InputFormat::Workbook);
        assert_eq!(
            InputFormat::from_source("https://host/x.xlsx?token=1").unwrap(),
            InputFormat::Workbook
        );
        assert!(matches!(
            InputFormat::from_source("report.pdf"),
            Err(PipelineError::UnsupportedFormat(_))
        ));
        assert!(InputFormat::from_source("noextension").is_err());
    }

    #[test]
    fn test_read_csv_keeps_text_and_blanks() {
        let data = "\u{feff}Area,NOP,Check In At\nArea 1,,2024-01-01 00:00:00\nArea 2,Medan\n";

        let table = read_csv(data.as_bytes()).unwrap();

        assert_eq!(table.headers(), &["Area", "NOP", "Check In At"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][1], Cell::Empty);
        assert_eq!(table.rows()[0][2], Cell::text("2024-01-01 00:00:00"));
        assert_eq!(table.rows()[1][2], Cell::Empty);
    }

    #[test]
    fn test_workbook_dates_follow_date_system() {
        let serial = |is_1904| {
            Data::DateTime(ExcelDateTime::new(
                45292.5,
                ExcelDateTimeType::DateTime,
                is_1904,
            ))
        };

        let render = |data: &Data| cell_from_data(data).render();
        assert_eq!(render(&serial(false)).as_deref(), Some("2024-01-01 12:00:00"));
        assert_eq!(render(&serial(true)).as_deref(), Some("2028-01-02 12:00:00"));
    }

    #[test]
    fn test_cell_from_data() {
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(cell_from_data(&Data::String(String::new())), Cell::Empty);
        assert_eq!(cell_from_data(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(cell_from_data(&Data::Bool(true)), Cell::Bool(true));
    }

    #[tokio::test]
    async fn test_load_sources_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut sources = Vec::new();
        for (i, area) in ["first", "second", "third"].iter().enumerate() {
            let path = dir.path().join(format!("part{i}.csv"));
            write_export(&path, &REQUIRED, &[*area]);
            sources.push(path.to_string_lossy().to_string());
        }

        let tables = load_sources(&sources, 2).await.unwrap();
        let merged = RawTable::concat(tables);

        let area_idx = merged.column_index(AREA).unwrap();
        let areas: Vec<_> = merged.rows().iter().map(|r| r[area_idx].clone()).collect();
        assert_eq!(
            areas,
            vec![Cell::text("first"), Cell::text("second"), Cell::text("third")]
        );
    }

    #[tokio::test]
    async fn test_load_sources_rejects_source_missing_a_column() {
        let dir = tempfile::tempdir().unwrap();
        let complete = dir.path().join("complete.csv");
        let partial = dir.path().join("partial.csv");
        write_export(&complete, &REQUIRED, &["Area 1"]);
        let without_area: Vec<&str> = REQUIRED.iter().copied().filter(|h| *h != AREA).collect();
        write_export(&partial, &without_area, &["ignored"]);

        let sources = vec![
            complete.to_string_lossy().to_string(),
            partial.to_string_lossy().to_string(),
        ];
        let err = load_sources(&sources, 2).await.unwrap_err();

        assert!(format!("{err:#}").contains("partial.csv"));
        match err.downcast_ref::<PipelineError>() {
            Some(PipelineError::Schema(missing)) => assert_eq!(missing, &vec!["Area".to_string()]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        assert!(load_source("/definitely/not/here.csv").await.is_err());
    }
}
