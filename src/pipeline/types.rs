//! Data types flowing through the scoring pipeline.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::table::Cell;

/// Whether the run covers a single export or several concatenated ones.
///
/// Multi-file runs derive Month/Year and group the summary by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Single,
    Multi,
}

/// Legacy KPI bucket a ticket is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum OldKpi {
    B1,
    B21,
    B22,
    B23,
    B3,
}

impl OldKpi {
    pub fn as_str(&self) -> &'static str {
        match self {
            OldKpi::B1 => "B1",
            OldKpi::B21 => "B21",
            OldKpi::B22 => "B22",
            OldKpi::B23 => "B23",
            OldKpi::B3 => "B3",
        }
    }
}

impl fmt::Display for OldKpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Handling {
    Takeover,
    Autoclear,
}

impl fmt::Display for Handling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Handling::Takeover => "Takeover",
            Handling::Autoclear => "Autoclear",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visitation {
    Visit,
    NoVisit,
}

impl fmt::Display for Visitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visitation::Visit => "Visit",
            Visitation::NoVisit => "NoVisit",
        })
    }
}

/// Calendar month (1-12), ordered chronologically and displayed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(u32);

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Month {
    pub fn new(number: u32) -> Option<Self> {
        (1..=12).contains(&number).then_some(Month(number))
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.0 - 1) as usize]
    }

    /// Parses a month by its English name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        MONTH_NAMES
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name.trim()))
            .map(|i| Month(i as u32 + 1))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = String;

    /// Accepts an English month name or its number (1-12).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::from_name(s)
            .or_else(|| s.trim().parse().ok().and_then(Month::new))
            .ok_or_else(|| format!("unknown month '{s}'"))
    }
}

impl Serialize for Month {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One ticket restricted to the columns the pipeline keeps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketRecord {
    pub ticket_number_inap: Cell,
    pub ticket_number_swfm: Cell,
    pub severity: Cell,
    pub type_ticket: Cell,
    pub site_id: Cell,
    pub site_name: Cell,
    pub site_class: Cell,
    pub cluster_to: Cell,
    pub occured_time: Cell,
    pub created_at: Cell,
    pub ticket_inap_status: Cell,
    pub ticket_swfm_status: Cell,
    pub pic_take_over_ticket: Cell,
    pub nop: Cell,
    pub regional: Cell,
    pub area: Cell,
    pub cleared_time: Cell,
    pub take_over_date: Cell,
    pub check_in_at: Cell,
    pub sla_status: Cell,
    pub fault_level: Cell,
    pub incident_priority: Cell,
    pub hub: Cell,
    pub is_excluded_in_kpi: Cell,
    pub site_cleared_on: Cell,
    pub rank: Cell,
    pub rca_validated: Cell,
}

impl TicketRecord {
    /// Cells in the same order as [`crate::schema::ticket::REQUIRED`].
    pub fn cells(&self) -> [&Cell; 27] {
        [
            &self.ticket_number_inap,
            &self.ticket_number_swfm,
            &self.severity,
            &self.type_ticket,
            &self.site_id,
            &self.site_name,
            &self.site_class,
            &self.cluster_to,
            &self.occured_time,
            &self.created_at,
            &self.ticket_inap_status,
            &self.ticket_swfm_status,
            &self.pic_take_over_ticket,
            &self.nop,
            &self.regional,
            &self.area,
            &self.cleared_time,
            &self.take_over_date,
            &self.check_in_at,
            &self.sla_status,
            &self.fault_level,
            &self.incident_priority,
            &self.hub,
            &self.is_excluded_in_kpi,
            &self.site_cleared_on,
            &self.rank,
            &self.rca_validated,
        ]
    }
}

/// A ticket with every derived scoring field attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedRecord {
    pub ticket: TicketRecord,
    pub old_kpi: Option<OldKpi>,
    pub occured_time: Option<NaiveDateTime>,
    pub cleared_time: Option<NaiveDateTime>,
    pub site_cleared_on: Option<NaiveDateTime>,
    /// Only populated in [`Mode::Multi`].
    pub month: Option<Month>,
    /// Only populated in [`Mode::Multi`].
    pub year: Option<i32>,
    pub mttr: f64,
    pub sla_mttr: u32,
    pub score_mttr: f64,
    pub handling: Handling,
    pub score_to: f64,
    pub visitation: Visitation,
    pub score_visit: f64,
    pub score_rca: f64,
    pub score_closed: f64,
    pub score: f64,
}

/// Composite grouping key for the summary table.
///
/// Field order defines the sort order of summary rows; missing components
/// sort first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupKey {
    #[serde(rename = "Year", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(rename = "Month", skip_serializing_if = "Option::is_none")]
    pub month: Option<Month>,
    #[serde(rename = "Area")]
    pub area: Option<String>,
    #[serde(rename = "Regional")]
    pub regional: Option<String>,
    #[serde(rename = "NOP")]
    pub nop: Option<String>,
    #[serde(rename = "OldKPI")]
    pub old_kpi: Option<OldKpi>,
    #[serde(rename = "Severity")]
    pub severity: Option<String>,
}

/// One row of the grouped summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    #[serde(flatten)]
    pub key: GroupKey,
    #[serde(rename = "Ticket_Count")]
    pub ticket_count: usize,
    #[serde(rename = "Avg_SCORE")]
    pub avg_score: f64,
    #[serde(rename = "Sum_SCORE")]
    pub sum_score: f64,
}

/// Row counts observed during a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub input_rows: usize,
    pub excluded: usize,
    pub noise_dropped: usize,
    pub processed: usize,
    pub groups: usize,
}

/// Everything a pipeline run hands back to its caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub mode: Mode,
    pub processed: Vec<ProcessedRecord>,
    pub summary: Vec<SummaryRecord>,
    pub stats: PipelineStats,
}
