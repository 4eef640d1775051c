use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::pipeline::types::TicketRecord;
use crate::schema::ticket::REQUIRED;
use crate::table::{Cell, RawTable};

/// Positions of the required columns in `table`, in [`REQUIRED`] order.
///
/// # Errors
///
/// Returns [`PipelineError::Schema`] listing every required column that is
/// absent from the table.
fn column_indices(table: &RawTable) -> Result<[usize; REQUIRED.len()]> {
    let mut indices = [0usize; REQUIRED.len()];
    let mut missing = Vec::new();

    for (slot, name) in indices.iter_mut().zip(REQUIRED) {
        match table.column_index(name) {
            Some(i) => *slot = i,
            None => missing.push(name.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(PipelineError::Schema(missing))
    }
}

/// Fails with [`PipelineError::Schema`] unless every required column is
/// present. Tables must pass this before being concatenated, since a merge
/// fills absent columns with empty cells.
pub fn check_columns(table: &RawTable) -> Result<()> {
    column_indices(table).map(|_| ())
}

/// Restricts `table` to the required ticket columns, preserving row order.
///
/// # Errors
///
/// Same as [`check_columns`].
pub fn project(table: &RawTable) -> Result<Vec<TicketRecord>> {
    let indices = column_indices(table)?;

    let dropped = table.headers().len().saturating_sub(REQUIRED.len());
    debug!(rows = table.len(), dropped_columns = dropped, "Projecting ticket columns");

    Ok(table
        .rows()
        .iter()
        .map(|row| {
            let mut cells = indices.iter().map(|&i| row[i].clone());
            let mut next = || cells.next().unwrap_or(Cell::Empty);
            TicketRecord {
                ticket_number_inap: next(),
                ticket_number_swfm: next(),
                severity: next(),
                type_ticket: next(),
                site_id: next(),
                site_name: next(),
                site_class: next(),
                cluster_to: next(),
                occured_time: next(),
                created_at: next(),
                ticket_inap_status: next(),
                ticket_swfm_status: next(),
                pic_take_over_ticket: next(),
                nop: next(),
                regional: next(),
                area: next(),
                cleared_time: next(),
                take_over_date: next(),
                check_in_at: next(),
                sla_status: next(),
                fault_level: next(),
                incident_priority: next(),
                hub: next(),
                is_excluded_in_kpi: next(),
                site_cleared_on: next(),
                rank: next(),
                rca_validated: next(),
            }
        })
        .collect())
}
