//! Repair duration (MTTR), SLA targets and the SLA-compliance ratio.

use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::pipeline::types::TicketRecord;

/// SLA target in hours, keyed by (Type Ticket, Severity).
static SLA_TARGETS: &[((&str, &str), u32)] = &[
    (("Incident", "Critical"), 4),
    (("Incident", "Major"), 8),
    (("Incident", "Minor"), 10),
    (("Incident", "Low"), 13),
    (("Event", "Critical"), 2),
    (("Event", "Major"), 4),
    (("Event", "Minor"), 15),
    (("Event", "Low"), 48),
];

/// Type Ticket → Severity → target hours.
static SLA_MAP: LazyLock<HashMap<&'static str, HashMap<&'static str, u32>>> = LazyLock::new(|| {
    let mut map: HashMap<&str, HashMap<&str, u32>> = HashMap::new();
    for &((kind, severity), hours) in SLA_TARGETS {
        map.entry(kind).or_default().insert(severity, hours);
    }
    map
});

/// Upper bound on the MTTR/SLA ratio.
pub const SCORE_MTTR_CEILING: f64 = 1.5;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Hours from occurrence to clearance.
///
/// Site clearance wins over ticket clearance when both are known. A missing
/// endpoint yields 0.0, and so does a clearance recorded before occurrence.
pub fn mttr(
    occured: Option<NaiveDateTime>,
    cleared: Option<NaiveDateTime>,
    site_cleared: Option<NaiveDateTime>,
) -> f64 {
    let (Some(start), Some(end)) = (occured, site_cleared.or(cleared)) else {
        return 0.0;
    };

    let hours = (end - start).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_HOUR;
    if hours.is_finite() && hours > 0.0 {
        hours
    } else {
        0.0
    }
}

/// SLA target for the ticket, or 0 when its type/severity has none.
pub fn sla_target(ticket: &TicketRecord) -> u32 {
    match (ticket.type_ticket.as_text(), ticket.severity.as_text()) {
        (Some(kind), Some(severity)) => SLA_MAP
            .get(kind)
            .and_then(|by_severity| by_severity.get(severity))
            .copied()
            .unwrap_or(0),
        _ => 0,
    }
}

/// MTTR as a fraction of the SLA target, capped at [`SCORE_MTTR_CEILING`].
///
/// Without a target there is no credit, so a zero target scores 0.
pub fn score_mttr(mttr: f64, sla_target: u32) -> f64 {
    if sla_target == 0 {
        return 0.0;
    }

    let ratio = mttr / f64::from(sla_target);
    if ratio > 0.0 {
        ratio.min(SCORE_MTTR_CEILING)
    } else {
        0.0
    }
}
