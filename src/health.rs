use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::AwardRecord;

#[derive(Debug, Clone, Serialize)]
pub struct SubScores {
    pub diversity: i64,
    pub participation: i64,
    pub volume: i64,
    pub generosity: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpread {
    pub id: String,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentHealth {
    pub name: String,
    pub health: i64,
    pub total_awards: usize,
    pub total_value: u64,
    pub avg_value: u64,
    pub unique_recipients: usize,
    pub unique_nominators: usize,
    pub category_diversity: i64,
    pub cross_dept_pct: i64,
    pub participation: i64,
    pub scores: SubScores,
    pub category_spread: Vec<CategorySpread>,
}

/// Composite culture-health score per department, over awards received by
/// that department's members. Departments with zero received awards are
/// excluded, not zero-scored.
///
/// health = round(0.30·diversity + 0.25·participation + 0.25·volume
///                + 0.20·generosity)
///
/// The generosity sub-score is intentionally uncapped: an average award
/// value above $1000 pushes it past 100.
pub fn score(records: &[AwardRecord]) -> Vec<DepartmentHealth> {
    struct Acc<'a> {
        awards: usize,
        total_value: u64,
        recipients: HashSet<&'a str>,
        nominators: HashSet<&'a str>,
        cross_inbound: usize,
        categories: HashMap<&'a str, (usize, &'a str)>,
    }

    let taxonomy_size = records
        .iter()
        .map(|r| r.category_id.as_str())
        .collect::<HashSet<_>>()
        .len()
        .max(1);

    let mut by_dept: HashMap<&str, Acc> = HashMap::new();
    for r in records {
        let acc = by_dept.entry(&r.recipient_department).or_insert(Acc {
            awards: 0,
            total_value: 0,
            recipients: HashSet::new(),
            nominators: HashSet::new(),
            cross_inbound: 0,
            categories: HashMap::new(),
        });
        acc.awards += 1;
        acc.total_value += r.value;
        acc.recipients.insert(&r.recipient_id);
        acc.nominators.insert(&r.nominator_id);
        if r.nominator_department != r.recipient_department {
            acc.cross_inbound += 1;
        }
        let cat = acc
            .categories
            .entry(&r.category_id)
            .or_insert((0, r.category_name.as_str()));
        cat.0 += 1;
    }

    let max_dept_awards = by_dept.values().map(|a| a.awards).max().unwrap_or(1).max(1);

    let mut out: Vec<DepartmentHealth> = by_dept
        .into_iter()
        .map(|(name, acc)| {
            let n = acc.awards.max(1);
            let avg_value = (acc.total_value as f64 / n as f64).round() as u64;

            let diversity =
                (acc.categories.len() as f64 / taxonomy_size as f64 * 100.0).round() as i64;
            let participation = ((acc.nominators.len() as f64
                / acc.recipients.len().max(1) as f64
                * 100.0)
                .round() as i64)
                .min(100);
            let volume = (acc.awards as f64 / max_dept_awards as f64 * 100.0).round() as i64;
            let generosity = (avg_value as f64 / 1000.0 * 100.0).round() as i64;

            let health = (0.30 * diversity as f64
                + 0.25 * participation as f64
                + 0.25 * volume as f64
                + 0.20 * generosity as f64)
                .round() as i64;

            let mut category_spread: Vec<CategorySpread> = acc
                .categories
                .into_iter()
                .map(|(id, (count, cat_name))| CategorySpread {
                    id: id.to_string(),
                    name: cat_name.to_string(),
                    count,
                })
                .collect();
            category_spread.sort_by(|a, b| b.count.cmp(&a.count).then(a.id.cmp(&b.id)));

            DepartmentHealth {
                name: name.to_string(),
                health,
                total_awards: acc.awards,
                total_value: acc.total_value,
                avg_value,
                unique_recipients: acc.recipients.len(),
                unique_nominators: acc.nominators.len(),
                category_diversity: diversity,
                cross_dept_pct: (acc.cross_inbound as f64 / n as f64 * 100.0).round() as i64,
                participation,
                scores: SubScores {
                    diversity,
                    participation,
                    volume,
                    generosity,
                },
                category_spread,
            }
        })
        .collect();

    out.sort_by(|a, b| b.health.cmp(&a.health).then(a.name.cmp(&b.name)));
    out
}
