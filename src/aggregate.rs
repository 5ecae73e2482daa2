use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{peer_rank, seniority_rank, AwardRecord, MONTH_NAMES};
use crate::registry::PersonRegistry;
use crate::stats::{pct, round1};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub id: String,
    pub name: String,
    pub count: usize,
    pub pct: f64,
    pub total_value: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryBreakdown {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub category_name: String,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyActivity {
    /// Bucket key `YYYY-MM`; keys are unique and sorted ascending.
    pub month: String,
    /// Display label, e.g. `Jun '25`.
    pub label: String,
    pub awards: usize,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub name: String,
    pub awards: usize,
    pub total_value: u64,
    pub avg_value: u64,
    pub unique_recipients: usize,
    pub unique_nominators: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SenioritySlice {
    pub level: String,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopRecipient {
    pub id: String,
    pub name: String,
    pub dept: String,
    pub title: String,
    pub seniority: String,
    pub awards: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopNominator {
    pub id: String,
    pub name: String,
    pub dept: String,
    pub title: String,
    pub nominations: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValueBucket {
    pub value: u64,
    pub count: usize,
}

/// Top-level counters for the dashboard header.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub total_awards: usize,
    pub total_monetary: u64,
    pub avg_award_value: u64,
    pub unique_recipients: usize,
    pub unique_nominators: usize,
    pub unique_departments: usize,
    pub recognition_rate: i64,
    pub high_performers: usize,
    pub culture_carriers: usize,
    pub at_risk_count: usize,
    pub never_recognized_count: usize,
    pub cross_dept_pct: i64,
    pub peer_recognition_pct: i64,
    pub ic_ratio: i64,
    pub exec_ratio: i64,
    pub mom_trend: i64,
    pub avg_monthly_awards: usize,
}

pub fn categories(records: &[AwardRecord]) -> Vec<CategoryBreakdown> {
    let mut counts: HashMap<&str, (usize, u64, &str)> = HashMap::new();
    for r in records {
        let entry = counts
            .entry(&r.category_id)
            .or_insert((0, 0, r.category_name.as_str()));
        entry.0 += 1;
        entry.1 += r.value;
    }
    let total = records.len().max(1);
    let mut out: Vec<CategoryBreakdown> = counts
        .into_iter()
        .map(|(id, (count, total_value, name))| CategoryBreakdown {
            id: id.to_string(),
            name: name.to_string(),
            count,
            pct: round1(count as f64 / total as f64 * 100.0),
            total_value,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then(a.id.cmp(&b.id)));
    out
}

pub fn subcategories(records: &[AwardRecord]) -> Vec<SubcategoryBreakdown> {
    let mut counts: HashMap<&str, (usize, &AwardRecord)> = HashMap::new();
    for r in records {
        let entry = counts.entry(&r.subcategory_id).or_insert((0, r));
        entry.0 += 1;
    }
    let total = records.len().max(1);
    let mut out: Vec<SubcategoryBreakdown> = counts
        .into_iter()
        .map(|(id, (count, r))| SubcategoryBreakdown {
            id: id.to_string(),
            name: r.subcategory_name.clone(),
            category_id: r.category_id.clone(),
            category_name: r.category_name.clone(),
            count,
            pct: round1(count as f64 / total as f64 * 100.0),
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then(a.id.cmp(&b.id)));
    out
}

pub fn monthly(records: &[AwardRecord]) -> Vec<MonthlyActivity> {
    let mut buckets: BTreeMap<String, (usize, u64)> = BTreeMap::new();
    for r in records {
        let Some(date) = r.date else { continue };
        let entry = buckets.entry(crate::models::month_key(date)).or_default();
        entry.0 += 1;
        entry.1 += r.value;
    }
    buckets
        .into_iter()
        .map(|(key, (awards, value))| {
            let label = month_label(&key);
            MonthlyActivity {
                month: key,
                label,
                awards,
                value,
            }
        })
        .collect()
}

fn month_label(key: &str) -> String {
    let (year, month) = key.split_once('-').unwrap_or((key, "1"));
    let idx = month.parse::<usize>().unwrap_or(1).clamp(1, 12) - 1;
    let yy = if year.len() >= 4 { &year[2..4] } else { year };
    format!("{} '{}", MONTH_NAMES[idx], yy)
}

pub fn departments(records: &[AwardRecord]) -> Vec<DepartmentSummary> {
    struct Acc<'a> {
        awards: usize,
        total_value: u64,
        recipients: HashSet<&'a str>,
        nominators: HashSet<&'a str>,
    }
    let mut map: HashMap<&str, Acc> = HashMap::new();
    for r in records {
        let acc = map.entry(&r.recipient_department).or_insert(Acc {
            awards: 0,
            total_value: 0,
            recipients: HashSet::new(),
            nominators: HashSet::new(),
        });
        acc.awards += 1;
        acc.total_value += r.value;
        acc.recipients.insert(&r.recipient_id);
        acc.nominators.insert(&r.nominator_id);
    }
    let mut out: Vec<DepartmentSummary> = map
        .into_iter()
        .map(|(name, acc)| DepartmentSummary {
            name: name.to_string(),
            awards: acc.awards,
            total_value: acc.total_value,
            avg_value: (acc.total_value as f64 / acc.awards.max(1) as f64).round() as u64,
            unique_recipients: acc.recipients.len(),
            unique_nominators: acc.nominators.len(),
        })
        .collect();
    out.sort_by(|a, b| b.awards.cmp(&a.awards).then(a.name.cmp(&b.name)));
    out
}

/// Seniority mix over the recipient side of the record stream.
pub fn seniority_distribution(records: &[AwardRecord]) -> Vec<SenioritySlice> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in records {
        *counts.entry(&r.recipient_seniority).or_default() += 1;
    }
    let total = records.len().max(1);
    let mut out: Vec<SenioritySlice> = counts
        .into_iter()
        .map(|(level, count)| SenioritySlice {
            level: level.to_string(),
            count,
            pct: round1(count as f64 / total as f64 * 100.0),
        })
        .collect();
    out.sort_by(|a, b| {
        seniority_rank(&a.level)
            .cmp(&seniority_rank(&b.level))
            .then(a.level.cmp(&b.level))
    });
    out
}

pub fn top_recipients(registry: &PersonRegistry, limit: usize) -> Vec<TopRecipient> {
    registry
        .by_received()
        .into_iter()
        .filter(|p| p.received > 0)
        .take(limit)
        .map(|p| TopRecipient {
            id: p.id.clone(),
            name: p.name.clone(),
            dept: p.dept.clone(),
            title: p.title.clone(),
            seniority: p.seniority.clone(),
            awards: p.received,
        })
        .collect()
}

pub fn top_nominators(registry: &PersonRegistry, limit: usize) -> Vec<TopNominator> {
    let mut people: Vec<_> = registry.iter().filter(|p| p.given > 0).collect();
    people.sort_by(|a, b| b.given.cmp(&a.given).then(a.id.cmp(&b.id)));
    people
        .into_iter()
        .take(limit)
        .map(|p| TopNominator {
            id: p.id.clone(),
            name: p.name.clone(),
            dept: p.dept.clone(),
            title: p.title.clone(),
            nominations: p.given,
        })
        .collect()
}

pub fn value_distribution(records: &[AwardRecord]) -> Vec<ValueBucket> {
    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.value).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(value, count)| ValueBucket { value, count })
        .collect()
}

pub fn kpis(
    records: &[AwardRecord],
    registry: &PersonRegistry,
    monthly: &[MonthlyActivity],
    as_of: NaiveDate,
) -> Kpi {
    let total_awards = records.len();
    let total_monetary: u64 = records.iter().map(|r| r.value).sum();
    let unique_recipients: HashSet<&str> =
        records.iter().map(|r| r.recipient_id.as_str()).collect();
    let unique_nominators: HashSet<&str> =
        records.iter().map(|r| r.nominator_id.as_str()).collect();
    let unique_departments: HashSet<&str> = records
        .iter()
        .map(|r| r.recipient_department.as_str())
        .collect();

    let high_performers = registry.iter().filter(|p| p.received >= 5).count();
    let culture_carriers = registry.iter().filter(|p| p.given >= 5).count();
    let never_recognized_count = registry.iter().filter(|p| p.received == 0).count();

    // Latest parsed award date per recipient, for the at-risk counter.
    let mut last_award: HashMap<&str, NaiveDate> = HashMap::new();
    for r in records {
        let Some(date) = r.date else { continue };
        last_award
            .entry(&r.recipient_id)
            .and_modify(|d| *d = (*d).max(date))
            .or_insert(date);
    }
    let at_risk_count = last_award
        .values()
        .filter(|d| (as_of - **d).num_days() > 120)
        .count();

    let cross_dept = records
        .iter()
        .filter(|r| r.recipient_department != r.nominator_department)
        .count();
    let peer = records
        .iter()
        .filter(|r| {
            (peer_rank(&r.recipient_seniority) - peer_rank(&r.nominator_seniority)).abs() <= 1
        })
        .count();

    let total_people = registry.len();
    let ic_count = registry
        .iter()
        .filter(|p| matches!(p.seniority.as_str(), "IC" | "Senior IC"))
        .count();
    let exec_count = registry
        .iter()
        .filter(|p| matches!(p.seniority.as_str(), "Director" | "VP"))
        .count();

    // Months with a single award are treated as partial and excluded from
    // the month-over-month trend.
    let active: Vec<usize> = monthly
        .iter()
        .map(|m| m.awards)
        .filter(|a| *a > 1)
        .collect();
    let last3 = if active.len() >= 3 {
        active[active.len() - 3..].iter().sum::<usize>() as f64 / 3.0
    } else {
        0.0
    };
    let prev3 = if active.len() >= 6 {
        active[active.len() - 6..active.len() - 3].iter().sum::<usize>() as f64 / 3.0
    } else {
        last3
    };
    let mom_trend = if prev3 > 0.0 {
        ((last3 - prev3) / prev3 * 100.0).round() as i64
    } else {
        0
    };
    let avg_monthly_awards =
        (active.iter().sum::<usize>() as f64 / active.len().max(1) as f64).round() as usize;

    Kpi {
        total_awards,
        total_monetary,
        avg_award_value: (total_monetary as f64 / total_awards.max(1) as f64).round() as u64,
        unique_recipients: unique_recipients.len(),
        unique_nominators: unique_nominators.len(),
        unique_departments: unique_departments.len(),
        recognition_rate: pct(unique_nominators.len(), unique_recipients.len()),
        high_performers,
        culture_carriers,
        at_risk_count,
        never_recognized_count,
        cross_dept_pct: pct(cross_dept, total_awards),
        peer_recognition_pct: pct(peer, total_awards),
        ic_ratio: pct(ic_count, total_people),
        exec_ratio: pct(exec_count, total_people),
        mom_trend,
        avg_monthly_awards,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{award, award_on};

    #[test]
    fn category_counts_sum_to_total_and_pcts_to_100() {
        let records = vec![
            award("p1", "p2", 100).category("A", "Teamwork"),
            award("p1", "p2", 100).category("A", "Teamwork"),
            award("p3", "p2", 100).category("B", "Innovation"),
            award("p3", "p4", 100).category("C", "Delivery"),
        ];
        let cats = categories(&records);
        assert_eq!(cats.iter().map(|c| c.count).sum::<usize>(), records.len());
        let pct_sum: f64 = cats.iter().map(|c| c.pct).sum();
        assert!((pct_sum - 100.0).abs() < 0.5);
        assert_eq!(cats[0].id, "A");
        assert_eq!(cats[0].total_value, 200);
    }

    #[test]
    fn monthly_buckets_sort_chronologically_and_skip_bad_dates() {
        let mut records = vec![
            award_on("p1", "p2", 2025, 6, 1),
            award_on("p1", "p2", 2025, 4, 10),
            award_on("p1", "p2", 2025, 4, 20),
        ];
        records.push(award("p1", "p2", 100)); // no date
        let buckets = monthly(&records);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].month, "2025-04");
        assert_eq!(buckets[0].awards, 2);
        assert_eq!(buckets[0].label, "Apr '25");
        assert_eq!(buckets[1].month, "2025-06");
    }

    #[test]
    fn department_avg_value_is_rounded_ratio() {
        let records = vec![
            award("p1", "p2", 100).dept("Engineering"),
            award("p3", "p2", 100).dept("Engineering"),
            award("p3", "p2", 100).dept("Engineering"),
        ];
        let depts = departments(&records);
        assert_eq!(depts.len(), 1);
        assert_eq!(depts[0].avg_value, 100);
        assert_eq!(depts[0].unique_recipients, 2);
        assert_eq!(depts[0].unique_nominators, 1);
    }

    #[test]
    fn seniority_distribution_follows_scale_order() {
        let records = vec![
            award("p1", "p2", 0).recipient_level("VP"),
            award("p3", "p2", 0).recipient_level("IC"),
            award("p4", "p2", 0).recipient_level("Manager"),
        ];
        let slices = seniority_distribution(&records);
        let levels: Vec<&str> = slices.iter().map(|s| s.level.as_str()).collect();
        assert_eq!(levels, vec!["IC", "Manager", "VP"]);
    }

    #[test]
    fn kpi_scenario_single_pair() {
        // Scenario: 3 records, recipient p1, nominator p2, value 100 each.
        let records = vec![
            award("p1", "p2", 100),
            award("p1", "p2", 100),
            award("p1", "p2", 100),
        ];
        let registry = PersonRegistry::build(&records);
        let monthly = monthly(&records);
        let kpi = kpis(
            &records,
            &registry,
            &monthly,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        assert_eq!(kpi.total_awards, 3);
        assert_eq!(kpi.total_monetary, 300);
        assert_eq!(kpi.avg_award_value, 100);
        assert_eq!(kpi.unique_recipients, 1);
        assert_eq!(kpi.unique_nominators, 1);
        assert_eq!(kpi.recognition_rate, 100);
    }

    #[test]
    fn kpi_guards_on_empty_input() {
        let registry = PersonRegistry::build(&[]);
        let kpi = kpis(
            &[],
            &registry,
            &[],
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        assert_eq!(kpi.total_awards, 0);
        assert_eq!(kpi.avg_award_value, 0);
        assert_eq!(kpi.recognition_rate, 0);
        assert_eq!(kpi.mom_trend, 0);
    }

    #[test]
    fn at_risk_counts_stale_recipients() {
        let records = vec![
            award_on("p1", "p2", 2025, 6, 1),  // ~7 months before as-of
            award_on("p3", "p2", 2025, 12, 20), // recent
        ];
        let registry = PersonRegistry::build(&records);
        let monthly = monthly(&records);
        let kpi = kpis(
            &records,
            &registry,
            &monthly,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        assert_eq!(kpi.at_risk_count, 1);
    }
}
