//! Row-removal rules: KPI exclusion and auto-cleared noise.

use crate::pipeline::types::{Handling, ProcessedRecord, TicketRecord};

/// Tickets auto-cleared faster than this many hours are dropped as noise.
pub const NOISE_MTTR_HOURS: f64 = 1.0;

/// True when the ticket is flagged "YES" (any case) in "Is Excluded In KPI".
/// Missing or non-text flags never exclude.
pub fn is_excluded(ticket: &TicketRecord) -> bool {
    ticket
        .is_excluded_in_kpi
        .as_text()
        .is_some_and(|flag| flag.to_uppercase() == "YES")
}

/// True for auto-cleared tickets that recovered in under an hour.
pub fn is_noise(record: &ProcessedRecord) -> bool {
    record.handling == Handling::Autoclear && record.mttr < NOISE_MTTR_HOURS
}
