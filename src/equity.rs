use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::{seniority_rank, AwardRecord};
use crate::registry::PersonRegistry;
use crate::stats::{coefficient_of_variation, gini, round1, round3};

/// Awards at or above this value count as high-value in the equity tables.
pub const HIGH_VALUE_THRESHOLD: u64 = 500;

const FAIR_CV_LIMIT: f64 = 15.0;
const TOP_CONCENTRATION: usize = 10;

/// Per-seniority recognition equity row. Field names stay snake_case on
/// the wire.
#[derive(Debug, Clone, Serialize)]
pub struct EquityRow {
    pub recipient_seniority: String,
    pub count: usize,
    pub avg_value: u64,
    pub total_value: u64,
    pub high_value: usize,
    pub high_value_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquityMetric {
    Count,
    AvgValue,
    HighValueRate,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquityScore {
    /// Coefficient of variation across seniority levels, in percent.
    pub cv: f64,
    pub fair: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeptValue {
    pub dept: String,
    pub total: u64,
    pub avg: u64,
    pub per_person: u64,
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeniorityValue {
    pub level: String,
    pub total: u64,
    pub avg: u64,
    pub high_value_pct: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Concentration {
    pub top10_pct: f64,
    pub top10_value: u64,
    pub gini_coeff: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueEquity {
    pub by_dept: Vec<DeptValue>,
    pub by_seniority: Vec<SeniorityValue>,
    pub concentration: Concentration,
}

pub fn equity_rows(records: &[AwardRecord]) -> Vec<EquityRow> {
    let mut by_level: HashMap<&str, (usize, u64, usize)> = HashMap::new();
    for r in records {
        let entry = by_level.entry(&r.recipient_seniority).or_default();
        entry.0 += 1;
        entry.1 += r.value;
        if r.value >= HIGH_VALUE_THRESHOLD {
            entry.2 += 1;
        }
    }
    let mut rows: Vec<EquityRow> = by_level
        .into_iter()
        .map(|(level, (count, total_value, high_value))| EquityRow {
            recipient_seniority: level.to_string(),
            count,
            avg_value: (total_value as f64 / count.max(1) as f64).round() as u64,
            total_value,
            high_value,
            high_value_pct: round1(high_value as f64 / count.max(1) as f64 * 100.0),
        })
        .collect();
    rows.sort_by(|a, b| {
        seniority_rank(&a.recipient_seniority)
            .cmp(&seniority_rank(&b.recipient_seniority))
            .then(a.recipient_seniority.cmp(&b.recipient_seniority))
    });
    rows
}

/// Distributional fairness across seniority levels, on the caller's chosen
/// metric. CV below 15% reads as an equitable distribution.
pub fn seniority_equity_score(rows: &[EquityRow], metric: EquityMetric) -> EquityScore {
    let values: Vec<f64> = rows
        .iter()
        .map(|r| match metric {
            EquityMetric::Count => r.count as f64,
            EquityMetric::AvgValue => r.avg_value as f64,
            EquityMetric::HighValueRate => r.high_value_pct,
        })
        .collect();
    let cv = round1(coefficient_of_variation(&values));
    EquityScore {
        cv,
        fair: cv < FAIR_CV_LIMIT,
    }
}

/// Monetary-value distribution audit: who the money flows to, by
/// department and seniority, plus how concentrated per-person totals are.
pub fn value_equity(records: &[AwardRecord], registry: &PersonRegistry) -> ValueEquity {
    let total_value: u64 = records.iter().map(|r| r.value).sum();

    struct DeptAcc<'a> {
        total: u64,
        count: usize,
        people: HashSet<&'a str>,
    }
    let mut by_dept_map: HashMap<&str, DeptAcc> = HashMap::new();
    for r in records {
        let acc = by_dept_map.entry(&r.recipient_department).or_insert(DeptAcc {
            total: 0,
            count: 0,
            people: HashSet::new(),
        });
        acc.total += r.value;
        acc.count += 1;
        acc.people.insert(&r.recipient_id);
    }
    let mut by_dept: Vec<DeptValue> = by_dept_map
        .into_iter()
        .map(|(dept, acc)| DeptValue {
            dept: dept.to_string(),
            total: acc.total,
            avg: (acc.total as f64 / acc.count.max(1) as f64).round() as u64,
            per_person: (acc.total as f64 / acc.people.len().max(1) as f64).round() as u64,
            pct: round1(acc.total as f64 / total_value.max(1) as f64 * 100.0),
        })
        .collect();
    by_dept.sort_by(|a, b| b.total.cmp(&a.total).then(a.dept.cmp(&b.dept)));

    let by_seniority: Vec<SeniorityValue> = equity_rows(records)
        .into_iter()
        .map(|row| SeniorityValue {
            level: row.recipient_seniority,
            total: row.total_value,
            avg: row.avg_value,
            high_value_pct: row.high_value_pct,
        })
        .collect();

    // Concentration over per-person received totals.
    let mut person_totals: Vec<u64> = registry
        .iter()
        .filter(|p| p.received > 0)
        .map(|p| p.value_received)
        .collect();
    person_totals.sort_unstable();
    let sum: u64 = person_totals.iter().sum();
    let top10_value: u64 = person_totals
        .iter()
        .rev()
        .take(TOP_CONCENTRATION)
        .sum();
    let concentration = Concentration {
        top10_pct: round1(top10_value as f64 / sum.max(1) as f64 * 100.0),
        top10_value,
        gini_coeff: round3(gini(&person_totals)),
    };

    ValueEquity {
        by_dept,
        by_seniority,
        concentration,
    }
}
