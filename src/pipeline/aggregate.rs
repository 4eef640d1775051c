use std::collections::BTreeMap;

use crate::pipeline::types::{GroupKey, Mode, ProcessedRecord, SummaryRecord};

#[derive(Default)]
struct Acc {
    count: usize,
    sum: f64,
}

/// Grouping key for one record. Month/Year only take part in multi-file mode.
pub fn group_key(record: &ProcessedRecord, mode: Mode) -> GroupKey {
    let (year, month) = match mode {
        Mode::Single => (None, None),
        Mode::Multi => (record.year, record.month),
    };

    GroupKey {
        year,
        month,
        area: record.ticket.area.render(),
        regional: record.ticket.regional.render(),
        nop: record.ticket.nop.render(),
        old_kpi: record.old_kpi,
        severity: record.ticket.severity.render(),
    }
}

/// Groups processed records and computes count, mean and sum of SCORE.
///
/// Rows come back sorted by [`GroupKey`]. Records with missing key
/// components are grouped together rather than dropped, so the ticket
/// counts always add up to the number of processed records.
pub fn summarize(records: &[ProcessedRecord], mode: Mode) -> Vec<SummaryRecord> {
    let mut groups: BTreeMap<GroupKey, Acc> = BTreeMap::new();

    for record in records {
        let acc = groups.entry(group_key(record, mode)).or_default();
        acc.count += 1;
        acc.sum += record.score;
    }

    groups
        .into_iter()
        .map(|(key, acc)| SummaryRecord {
            key,
            ticket_count: acc.count,
            avg_score: mean(acc.sum, acc.count),
            sum_score: acc.sum,
        })
        .collect()
}

/// Arithmetic mean from a running sum. Returns 0.0 for an empty group.
fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}
