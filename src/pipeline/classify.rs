use std::collections::HashMap;
use std::sync::LazyLock;

use crate::pipeline::types::{OldKpi, TicketRecord};

/// Fault Level → legacy KPI bucket.
static FAULT_LEVELS: &[(&str, OldKpi)] = &[
    ("Controller P2", OldKpi::B22),
    ("Controller P1", OldKpi::B22),
    ("Enva Controller", OldKpi::B21),
    ("Enva Site", OldKpi::B21),
    ("Enva Site GSB", OldKpi::B21),
    ("Enva Site Simpul", OldKpi::B21),
    ("Enva Site VIP", OldKpi::B21),
    ("L2 Configuration", OldKpi::B3),
    ("P1", OldKpi::B23),
    ("P1 VIP", OldKpi::B23),
    ("P2", OldKpi::B3),
    ("P2 VIP", OldKpi::B3),
    ("Vandalism", OldKpi::B3),
    ("L2 License", OldKpi::B3),
    ("P3", OldKpi::B3),
];

static FAULT_MAP: LazyLock<HashMap<&'static str, OldKpi>> =
    LazyLock::new(|| FAULT_LEVELS.iter().copied().collect());

pub const INCIDENT: &str = "Incident";

/// Derives the OldKPI bucket. Incidents are always B1; everything else is
/// looked up by Fault Level, and unknown levels stay unmapped.
pub fn old_kpi(ticket: &TicketRecord) -> Option<OldKpi> {
    if ticket.type_ticket.as_text() == Some(INCIDENT) {
        return Some(OldKpi::B1);
    }

    ticket
        .fault_level
        .as_text()
        .and_then(|level| FAULT_MAP.get(level).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn ticket(type_ticket: &str, fault_level: &str) -> TicketRecord {
        TicketRecord {
            type_ticket: Cell::text(type_ticket),
            fault_level: Cell::text(fault_level),
            ..Default::default()
        }
    }

    #[test]
    fn test_fault_level_lookup() {
        assert_eq!(old_kpi(&ticket("Event", "P2")), Some(OldKpi::B3));
        assert_eq!(old_kpi(&ticket("Event", "Controller P1")), Some(OldKpi::B22));
        assert_eq!(old_kpi(&ticket("Event", "Enva Site VIP")), Some(OldKpi::B21));
        assert_eq!(old_kpi(&ticket("Event", "P1 VIP")), Some(OldKpi::B23));
    }

    #[test]
    fn test_unmapped_fault_level_is_none() {
        assert_eq!(old_kpi(&ticket("Event", "P4")), None);
        assert_eq!(old_kpi(&ticket("Event", "p2")), None);
        assert_eq!(old_kpi(&ticket("Event", "")), None);
    }

    #[test]
    fn test_incident_overrides_fault_level() {
        assert_eq!(old_kpi(&ticket("Incident", "P2")), Some(OldKpi::B1));
        assert_eq!(old_kpi(&ticket("Incident", "Unknown")), Some(OldKpi::B1));
        assert_eq!(old_kpi(&ticket("Incident", "")), Some(OldKpi::B1));
    }
}
