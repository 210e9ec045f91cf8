//! Derived aggregation views over a record slice.
//!
//! Nothing here is persisted — statistics are recomputed from the current
//! record set on every request.

use crate::Record;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Aggregates over a set of records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statistics {
    /// Sum of amounts per category, sorted by category name.
    pub by_category: BTreeMap<String, f64>,
    /// Sum of amounts per payment method, sorted by method name.
    pub by_payment: BTreeMap<String, f64>,
    /// Total of all amounts.
    pub total: f64,
    /// Number of records aggregated.
    pub count: usize,
}

impl Statistics {
    pub fn compute(records: &[Record]) -> Self {
        let mut stats = Statistics {
            count: records.len(),
            ..Default::default()
        };
        for rec in records {
            *stats.by_category.entry(rec.category.clone()).or_insert(0.0) += rec.amount;
            *stats.by_payment.entry(rec.payment.clone()).or_insert(0.0) += rec.amount;
            stats.total += rec.amount;
        }
        stats
    }
}

/// Keeps records whose date falls within `[start, end]`, both inclusive.
pub fn filter_by_date_range(records: &[Record], start: NaiveDate, end: NaiveDate) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: i64, date: &str, category: &str, payment: &str, amount: f64) -> Record {
        Record {
            id,
            date: date.parse().unwrap(),
            category: category.into(),
            payment: payment.into(),
            amount,
            note: String::new(),
        }
    }

    #[test]
    fn compute_groups_by_category_and_payment() {
        let records = vec![
            rec(1, "2024-03-01", "food", "cash", 100.0),
            rec(2, "2024-03-02", "food", "card", 50.0),
            rec(3, "2024-03-03", "transport", "card", 30.0),
        ];
        let stats = Statistics::compute(&records);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total, 180.0);
        assert_eq!(stats.by_category["food"], 150.0);
        assert_eq!(stats.by_category["transport"], 30.0);
        assert_eq!(stats.by_payment["card"], 80.0);
        assert_eq!(stats.by_payment["cash"], 100.0);
    }

    #[test]
    fn compute_on_empty_is_zeroed() {
        let stats = Statistics::compute(&[]);
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn date_range_filter_is_inclusive() {
        let records = vec![
            rec(1, "2024-02-29", "food", "cash", 1.0),
            rec(2, "2024-03-01", "food", "cash", 2.0),
            rec(3, "2024-03-15", "food", "cash", 3.0),
            rec(4, "2024-03-16", "food", "cash", 4.0),
        ];
        let start = "2024-03-01".parse().unwrap();
        let end = "2024-03-15".parse().unwrap();
        let filtered = filter_by_date_range(&records, start, end);
        assert_eq!(filtered.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3]);
    }
}
