//! Column-name constants for ticket exports and the tables we produce.

// ── Ticket export columns ───────────────────────────────────────────────────
pub mod ticket {
    pub const TICKET_NUMBER_INAP: &str = "Ticket Number Inap";
    pub const TICKET_NUMBER_SWFM: &str = "Ticket Number SWFM";
    pub const SEVERITY: &str = "Severity";
    pub const TYPE_TICKET: &str = "Type Ticket";
    pub const SITE_ID: &str = "Site Id";
    pub const SITE_NAME: &str = "Site Name";
    pub const SITE_CLASS: &str = "Site Class";
    pub const CLUSTER_TO: &str = "Cluster TO";
    pub const OCCURED_TIME: &str = "Occured Time";
    pub const CREATED_AT: &str = "Created At";
    pub const TICKET_INAP_STATUS: &str = "Ticket Inap Status";
    pub const TICKET_SWFM_STATUS: &str = "Ticket SWFM Status";
    pub const PIC_TAKE_OVER_TICKET: &str = "PIC Take Over Ticket";
    pub const NOP: &str = "NOP";
    pub const REGIONAL: &str = "Regional";
    pub const AREA: &str = "Area";
    pub const CLEARED_TIME: &str = "Cleared Time";
    pub const TAKE_OVER_DATE: &str = "Take Over Date";
    pub const CHECK_IN_AT: &str = "Check In At";
    pub const SLA_STATUS: &str = "SLA Status";
    pub const FAULT_LEVEL: &str = "Fault Level";
    pub const INCIDENT_PRIORITY: &str = "Incident Priority";
    pub const HUB: &str = "Hub";
    pub const IS_EXCLUDED_IN_KPI: &str = "Is Excluded In KPI";
    pub const SITE_CLEARED_ON: &str = "Site Cleared On";
    pub const RANK: &str = "Rank";
    pub const RCA_VALIDATED: &str = "RCA Validated";

    /// Columns kept by the projector, in output order.
    pub const REQUIRED: [&str; 27] = [
        TICKET_NUMBER_INAP,
        TICKET_NUMBER_SWFM,
        SEVERITY,
        TYPE_TICKET,
        SITE_ID,
        SITE_NAME,
        SITE_CLASS,
        CLUSTER_TO,
        OCCURED_TIME,
        CREATED_AT,
        TICKET_INAP_STATUS,
        TICKET_SWFM_STATUS,
        PIC_TAKE_OVER_TICKET,
        NOP,
        REGIONAL,
        AREA,
        CLEARED_TIME,
        TAKE_OVER_DATE,
        CHECK_IN_AT,
        SLA_STATUS,
        FAULT_LEVEL,
        INCIDENT_PRIORITY,
        HUB,
        IS_EXCLUDED_IN_KPI,
        SITE_CLEARED_ON,
        RANK,
        RCA_VALIDATED,
    ];
}

// ── Derived columns ─────────────────────────────────────────────────────────
pub mod derived {
    pub const OLD_KPI: &str = "OldKPI";
    pub const MONTH: &str = "Month";
    pub const YEAR: &str = "Year";
    pub const MTTR: &str = "MTTR";
    pub const SLA_MTTR: &str = "SLAMTTR";
    pub const SCORE_MTTR: &str = "ScoreMTTR";
    pub const HANDLING: &str = "Handling";
    pub const SCORE_TO: &str = "ScoreTO";
    pub const VISITATION: &str = "Visitation";
    pub const SCORE_VISIT: &str = "ScoreVisit";
    pub const SCORE_RCA: &str = "ScoreRCA";
    pub const SCORE_CLOSED: &str = "ScoreClosed";
    pub const SCORE: &str = "SCORE";

    /// Derived columns that follow OldKPI (and Month/Year) in the processed export.
    pub const SCORING: [&str; 10] = [
        MTTR,
        SLA_MTTR,
        SCORE_MTTR,
        HANDLING,
        SCORE_TO,
        VISITATION,
        SCORE_VISIT,
        SCORE_RCA,
        SCORE_CLOSED,
        SCORE,
    ];
}

// ── Summary columns ─────────────────────────────────────────────────────────
pub mod summary {
    pub const TICKET_COUNT: &str = "Ticket_Count";
    pub const AVG_SCORE: &str = "Avg_SCORE";
    pub const SUM_SCORE: &str = "Sum_SCORE";
}

// ── Export file names ───────────────────────────────────────────────────────
pub mod files {
    pub const PROCESSED: &str = "processed_kpi_data.csv";
    pub const SUMMARY: &str = "summary.csv";
}
