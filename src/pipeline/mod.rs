//! Ticket scoring and aggregation.
//!
//! Raw export rows are projected to the ticket columns, stripped of
//! KPI-excluded tickets, enriched with classification, duration and scoring
//! fields, cleared of auto-cleared noise, and finally grouped into a summary.

pub mod aggregate;
pub mod classify;
pub mod filters;
pub mod handling;
pub mod project;
pub mod score;
pub mod sla;
pub mod temporal;
pub mod types;

use tracing::{debug, info};

use crate::error::Result;
use crate::table::RawTable;
use types::{Mode, PipelineOutput, PipelineStats, ProcessedRecord, TicketRecord};

/// Runs every stage over `table` and returns the processed and summary tables.
///
/// The run is a pure function of its input: the same table and mode always
/// give the same output.
///
/// # Errors
///
/// Fails only when required columns are missing; bad values inside rows fall
/// back to documented defaults.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn run(table: &RawTable, mode: Mode) -> Result<PipelineOutput> {
    let tickets = project::project(table)?;
    let input_rows = tickets.len();

    let kept: Vec<TicketRecord> = tickets
        .into_iter()
        .filter(|t| !filters::is_excluded(t))
        .collect();
    let excluded = input_rows - kept.len();
    debug!(excluded, remaining = kept.len(), "Applied KPI exclusion");

    let derived: Vec<ProcessedRecord> = kept.into_iter().map(|t| derive(t, mode)).collect();
    let before_noise = derived.len();

    let processed: Vec<ProcessedRecord> = derived
        .into_iter()
        .filter(|r| !filters::is_noise(r))
        .collect();
    let noise_dropped = before_noise - processed.len();
    debug!(noise_dropped, remaining = processed.len(), "Dropped auto-cleared noise");

    let summary = aggregate::summarize(&processed, mode);

    let stats = PipelineStats {
        input_rows,
        excluded,
        noise_dropped,
        processed: processed.len(),
        groups: summary.len(),
    };
    info!(
        input_rows,
        excluded,
        noise_dropped,
        processed = stats.processed,
        groups = stats.groups,
        "Pipeline complete"
    );

    Ok(PipelineOutput {
        mode,
        processed,
        summary,
        stats,
    })
}

/// Attaches every derived field to a single ticket.
pub fn derive(ticket: TicketRecord, mode: Mode) -> ProcessedRecord {
    let old_kpi = classify::old_kpi(&ticket);

    let occured_time = temporal::parse_timestamp(&ticket.occured_time);
    let cleared_time = temporal::parse_timestamp(&ticket.cleared_time);
    let site_cleared_on = temporal::parse_timestamp(&ticket.site_cleared_on);
    let (month, year) = match mode {
        Mode::Single => (None, None),
        Mode::Multi => temporal::period(occured_time),
    };

    let mttr = sla::mttr(occured_time, cleared_time, site_cleared_on);
    let sla_mttr = sla::sla_target(&ticket);
    let score_mttr = sla::score_mttr(mttr, sla_mttr);

    let handling = handling::handling(&ticket);
    let score_to = handling::score_to(handling);
    let visitation = handling::visitation(&ticket);
    let score_visit = handling::score_visit(visitation);
    let score_rca = handling::score_rca(&ticket);
    let score_closed = handling::score_closed(&ticket);

    let score = score::composite(score_to, score_visit, score_rca, score_closed, score_mttr);

    ProcessedRecord {
        ticket,
        old_kpi,
        occured_time,
        cleared_time,
        site_cleared_on,
        month,
        year,
        mttr,
        sla_mttr,
        score_mttr,
        handling,
        score_to,
        visitation,
        score_visit,
        score_rca,
        score_closed,
        score,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::schema::ticket::REQUIRED;
    use crate::table::{Cell, RawTable};

    /// Builds a table with every required column; unspecified cells are empty.
    pub fn table(rows: &[&[(&str, &str)]]) -> RawTable {
        let mut table = RawTable::new(REQUIRED.iter().map(|h| h.to_string()).collect());
        for values in rows {
            let mut row = vec![Cell::Empty; REQUIRED.len()];
            for (name, value) in values.iter() {
                let idx = table
                    .column_index(name)
                    .unwrap_or_else(|| panic!("unknown column {name}"));
                row[idx] = Cell::text(*value);
            }
            table.push_row(row);
        }
        table
    }
}
