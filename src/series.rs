//! Grouping of measurements by producer count.

use std::collections::BTreeMap;

use crate::record::Record;

/// All measurements sharing one producer count, ordered by consumer
/// count.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub producer_count: i64,
    pub records: Vec<Record>,
}

impl Series {
    /// Legend label, `P=<producer count>`.
    pub fn label(&self) -> String {
        format!("P={}", self.producer_count)
    }

    /// Consumer counts, the x coordinates.
    pub fn xs(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.consumer_count as f64).collect()
    }

    /// Waiting times, the y coordinates.
    pub fn ys(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.time).collect()
    }
}

/// Stable group-by on [`Record::producer_count`].
///
/// Groups come out in ascending key order.  Within a group, records
/// are sorted by consumer count; equal consumer counts keep their
/// input order.
pub fn group_by_producer(records: &[Record]) -> Vec<Series> {
    let mut groups: BTreeMap<i64, Vec<Record>> = BTreeMap::new();
    for r in records {
        groups.entry(r.producer_count).or_default().push(*r);
    }
    groups
        .into_iter()
        .map(|(producer_count, mut records)| {
            records.sort_by_key(|r| r.consumer_count);
            Series { producer_count, records }
        })
        .collect()
}
