//! Take-over handling, site visitation, RCA validation and closure scoring.

use crate::pipeline::types::{Handling, TicketRecord, Visitation};

pub const TAKEOVER_SCORE: f64 = 0.3;
pub const VISIT_SCORE: f64 = 0.5;
pub const RCA_SCORE: f64 = 0.1;
pub const CLOSED_SCORE: f64 = 0.1;

pub fn handling(ticket: &TicketRecord) -> Handling {
    if ticket.pic_take_over_ticket.is_present() {
        Handling::Takeover
    } else {
        Handling::Autoclear
    }
}

pub fn score_to(handling: Handling) -> f64 {
    match handling {
        Handling::Takeover => TAKEOVER_SCORE,
        Handling::Autoclear => 0.0,
    }
}

pub fn visitation(ticket: &TicketRecord) -> Visitation {
    if ticket.check_in_at.is_present() {
        Visitation::Visit
    } else {
        Visitation::NoVisit
    }
}

pub fn score_visit(visitation: Visitation) -> f64 {
    match visitation {
        Visitation::Visit => VISIT_SCORE,
        Visitation::NoVisit => 0.0,
    }
}

/// Credit for a validated root-cause analysis. Only an exact "Yes" counts.
pub fn score_rca(ticket: &TicketRecord) -> f64 {
    if ticket.rca_validated.as_text() == Some("Yes") {
        RCA_SCORE
    } else {
        0.0
    }
}

/// Credit for a ticket closed in SWFM.
pub fn score_closed(ticket: &TicketRecord) -> f64 {
    if ticket.ticket_swfm_status.as_text() == Some("Closed") {
        CLOSED_SCORE
    } else {
        0.0
    }
}
