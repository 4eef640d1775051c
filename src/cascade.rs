//! Dimension filters for multi-file summaries.
//!
//! Month, Year and Area are chosen independently. Regional options narrow to
//! the regions seen under the chosen Area, and NOP options narrow to the
//! NOPs seen under the chosen Regional. Options are always drawn from the
//! processed records, while the filter itself is applied to the summary.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::pipeline::types::{Month, ProcessedRecord, SummaryRecord};

/// Sentinel accepted on the command line for "no restriction".
pub const ALL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Missing values only match [`Selection::All`].
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted),
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            return Ok(Selection::All);
        }
        s.trim()
            .parse()
            .map(Selection::Only)
            .map_err(|_| format!("invalid selection '{s}'"))
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(v) => fmt::Display::fmt(v, f),
        }
    }
}

/// The user's current choice on every filterable dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub month: Selection<Month>,
    pub year: Selection<i32>,
    pub area: Selection<String>,
    pub regional: Selection<String>,
    pub nop: Selection<String>,
}

impl FilterSelection {
    pub fn accepts(&self, row: &SummaryRecord) -> bool {
        let key = &row.key;
        self.month.matches(key.month.as_ref())
            && self.year.matches(key.year.as_ref())
            && self.area.matches(key.area.as_ref())
            && self.regional.matches(key.regional.as_ref())
            && self.nop.matches(key.nop.as_ref())
    }

    /// Keeps the summary rows matching every selected dimension.
    pub fn apply(&self, summary: &[SummaryRecord]) -> Vec<SummaryRecord> {
        summary.iter().filter(|row| self.accepts(row)).cloned().collect()
    }
}

/// Values offered for each dimension, given the current parent selections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterOptions {
    pub months: Vec<Month>,
    pub years: Vec<i32>,
    pub areas: Vec<String>,
    pub regionals: Vec<String>,
    pub nops: Vec<String>,
}

impl FilterOptions {
    pub fn from_processed(records: &[ProcessedRecord], selection: &FilterSelection) -> Self {
        let mut months = BTreeSet::new();
        let mut years = BTreeSet::new();
        let mut areas = BTreeSet::new();
        let mut regionals = BTreeSet::new();
        let mut nops = BTreeSet::new();

        for record in records {
            let area = record.ticket.area.render();
            let regional = record.ticket.regional.render();

            months.extend(record.month);
            years.extend(record.year);
            areas.extend(area.clone());

            if selection.area.matches(area.as_ref()) {
                regionals.extend(regional.clone());
            }
            if selection.regional.matches(regional.as_ref()) {
                nops.extend(record.ticket.nop.render());
            }
        }

        Self {
            months: months.into_iter().collect(),
            years: years.into_iter().collect(),
            areas: areas.into_iter().collect(),
            regionals: regionals.into_iter().collect(),
            nops: nops.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fixtures::table;
    use crate::pipeline::run;
    use crate::pipeline::types::Mode;

    fn row<'a>(
        when: &'a str,
        area: &'a str,
        regional: &'a str,
        nop: &'a str,
    ) -> Vec<(&'a str, &'a str)> {
        vec![
            ("Type Ticket", "Incident"),
            ("Severity", "Major"),
            ("PIC Take Over Ticket", "pic"),
            ("Occured Time", when),
            ("Area", area),
            ("Regional", regional),
            ("NOP", nop),
        ]
    }

    fn sample() -> Vec<Vec<(&'static str, &'static str)>> {
        vec![
            row("2024-01-05 00:00:00", "Area 1", "Sumbagut", "Medan"),
            row("2024-01-06 00:00:00", "Area 1", "Sumbagsel", "Palembang"),
            row("2024-02-01 00:00:00", "Area 2", "Jabo", "Jakarta Timur"),
            row("2023-12-31 00:00:00", "Area 2", "Jabo", "Jakarta Barat"),
            row("2024-02-02 00:00:00", "Area 3", "Jateng", "Semarang"),
        ]
    }

    fn output() -> crate::pipeline::types::PipelineOutput {
        let rows = sample();
        let slices: Vec<&[(&str, &str)]> = rows.iter().map(|r| r.as_slice()).collect();
        run(&table(&slices), Mode::Multi).unwrap()
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("All".parse::<Selection<String>>(), Ok(Selection::All));
        assert_eq!("all".parse::<Selection<i32>>(), Ok(Selection::All));
        assert_eq!("2024".parse::<Selection<i32>>(), Ok(Selection::Only(2024)));
        assert!("twenty".parse::<Selection<i32>>().is_err());
        assert_eq!(
            "march".parse::<Selection<Month>>(),
            Ok(Selection::Only(Month::new(3).unwrap()))
        );
        assert_eq!("12".parse::<Month>(), Ok(Month::new(12).unwrap()));
    }

    #[test]
    fn test_all_options_without_selection() {
        let out = output();
        let options = FilterOptions::from_processed(&out.processed, &FilterSelection::default());

        assert_eq!(options.areas, vec!["Area 1", "Area 2", "Area 3"]);
        assert_eq!(
            options.regionals,
            vec!["Jabo", "Jateng", "Sumbagsel", "Sumbagut"]
        );
        assert_eq!(options.nops.len(), 5);
        assert_eq!(options.years, vec![2023, 2024]);
        let months: Vec<_> = options.months.iter().map(|m| m.name()).collect();
        assert_eq!(months, vec!["January", "February", "December"]);
    }

    #[test]
    fn test_area_narrows_regional_options() {
        let out = output();
        let selection = FilterSelection {
            area: Selection::Only("Area 1".to_string()),
            ..Default::default()
        };

        let options = FilterOptions::from_processed(&out.processed, &selection);

        assert_eq!(options.regionals, vec!["Sumbagsel", "Sumbagut"]);
        assert_eq!(options.areas.len(), 3);
    }

    #[test]
    fn test_regional_narrows_nop_options() {
        let out = output();
        let selection = FilterSelection {
            regional: Selection::Only("Jabo".to_string()),
            ..Default::default()
        };

        let options = FilterOptions::from_processed(&out.processed, &selection);

        assert_eq!(options.nops, vec!["Jakarta Barat", "Jakarta Timur"]);
    }

    #[test]
    fn test_all_restores_child_options() {
        let out = output();
        let narrowed = FilterOptions::from_processed(
            &out.processed,
            &FilterSelection {
                area: Selection::Only("Area 3".to_string()),
                ..Default::default()
            },
        );
        let restored = FilterOptions::from_processed(
            &out.processed,
            &FilterSelection {
                area: Selection::All,
                ..Default::default()
            },
        );

        assert_eq!(narrowed.regionals, vec!["Jateng"]);
        assert_eq!(restored.regionals.len(), 4);
    }

    #[test]
    fn test_apply_filters_summary() {
        let out = output();
        let selection = FilterSelection {
            year: Selection::Only(2024),
            area: Selection::Only("Area 2".to_string()),
            ..Default::default()
        };

        let filtered = selection.apply(&out.summary);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].key.nop.as_deref(), Some("Jakarta Timur"));
        assert_eq!(
            filtered[0].key.month.map(|m| m.name()),
            Some("February")
        );
    }

    #[test]
    fn test_apply_is_idempotent() {
        let out = output();
        let selection = FilterSelection {
            month: Selection::Only(Month::new(1).unwrap()),
            ..Default::default()
        };

        let once = selection.apply(&out.summary);
        let twice = selection.apply(&once);

        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_missing_values_only_match_all() {
        assert!(Selection::<String>::All.matches(None));
        assert!(!Selection::Only("x".to_string()).matches(None));
    }
}
