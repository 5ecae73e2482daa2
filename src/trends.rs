use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use serde::Serialize;

use crate::models::{month_key, AwardRecord, MONTH_NAMES};
use crate::registry::PersonRegistry;
use crate::stats::{ols_slope, round3};

const MIN_MONTHS: usize = 3;
const MOMENTUM_LIMIT: usize = 15;
const DECLINE_THRESHOLD: f64 = -0.05;

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyPoint {
    pub period: String,
    pub awards: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumEntry {
    pub id: String,
    pub name: String,
    pub dept: String,
    pub seniority: String,
    pub slope: f64,
    pub total: usize,
    pub recent: usize,
    pub months: usize,
    pub monthly_data: Vec<MonthlyPoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSeason {
    pub month: u32,
    pub month_name: String,
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub dominant_category: String,
}

/// Per-person recognition trend. Every recipient with at least three
/// distinct monthly buckets gets an OLS slope fitted over bucket index
/// positions; months are treated as evenly spaced regardless of calendar
/// gaps.
pub fn momentum(records: &[AwardRecord], registry: &PersonRegistry) -> Vec<MomentumEntry> {
    let mut per_person: HashMap<&str, BTreeMap<String, usize>> = HashMap::new();
    for r in records {
        let Some(date) = r.date else { continue };
        *per_person
            .entry(&r.recipient_id)
            .or_default()
            .entry(month_key(date))
            .or_default() += 1;
    }

    let mut entries: Vec<MomentumEntry> = per_person
        .into_iter()
        .filter(|(_, series)| series.len() >= MIN_MONTHS)
        .map(|(id, series)| {
            let counts: Vec<usize> = series.values().copied().collect();
            let values: Vec<f64> = counts.iter().map(|c| *c as f64).collect();
            let total: usize = counts.iter().sum();
            let recent: usize = counts.iter().rev().take(3).sum();
            let monthly_data: Vec<MonthlyPoint> = series
                .into_iter()
                .map(|(period, awards)| MonthlyPoint { period, awards })
                .collect();
            let (name, dept, seniority) = registry
                .get(id)
                .map(|p| (p.name.clone(), p.dept.clone(), p.seniority.clone()))
                .unwrap_or_default();
            MomentumEntry {
                id: id.to_string(),
                name,
                dept,
                seniority,
                slope: round3(ols_slope(&values)),
                total,
                recent,
                months: monthly_data.len(),
                monthly_data,
            }
        })
        .collect();
    entries.sort_by(|a, b| a.id.cmp(&b.id));
    entries
}

/// Rising stars: positive slope, steepest first, top 15.
pub fn rising_stars(momentum: &[MomentumEntry]) -> Vec<MomentumEntry> {
    let mut rising: Vec<MomentumEntry> = momentum
        .iter()
        .filter(|m| m.slope > 0.0)
        .cloned()
        .collect();
    rising.sort_by(|a, b| {
        b.slope
            .partial_cmp(&a.slope)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    rising.truncate(MOMENTUM_LIMIT);
    rising
}

/// Declining recognition: slope below −0.05, steepest decline first, top
/// 15. The asymmetric threshold keeps flat-but-noisy series out of the
/// decline list.
pub fn declining(momentum: &[MomentumEntry]) -> Vec<MomentumEntry> {
    let mut falling: Vec<MomentumEntry> = momentum
        .iter()
        .filter(|m| m.slope < DECLINE_THRESHOLD)
        .cloned()
        .collect();
    falling.sort_by(|a, b| {
        a.slope
            .partial_cmp(&b.slope)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    falling.truncate(MOMENTUM_LIMIT);
    falling
}

/// Calendar-month seasonality, years collapsed into twelve buckets.
pub fn seasonality(records: &[AwardRecord]) -> Vec<MonthSeason> {
    let mut months: BTreeMap<u32, (usize, BTreeMap<String, usize>)> = BTreeMap::new();
    for r in records {
        let Some(date) = r.date else { continue };
        let entry = months.entry(date.month()).or_default();
        entry.0 += 1;
        *entry.1.entry(r.category_id.clone()).or_default() += 1;
    }
    months
        .into_iter()
        .map(|(month, (total, by_category))| {
            let dominant_category = by_category
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
                .map(|(id, _)| id.clone())
                .unwrap_or_default();
            MonthSeason {
                month,
                month_name: MONTH_NAMES[(month - 1) as usize].to_string(),
                total,
                by_category,
                dominant_category,
            }
        })
        .collect()
}
