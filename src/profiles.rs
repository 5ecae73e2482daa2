use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{seniority_rank, skill_tokens, AwardRecord};
use crate::registry::{Person, PersonRegistry};
use crate::stats::{pct, round1};

const RECENT_AWARDS: usize = 5;
const TITLE_MAX: usize = 60;
const MESSAGE_MAX: usize = 250;
/// Sentinel for people who have never received an award.
const NEVER_DAYS: i64 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementStatus {
    Thriving,
    Active,
    Passive,
    AtRisk,
    NeverRecognized,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkforceDept {
    pub dept: String,
    pub headcount: usize,
    pub recognized: usize,
    pub givers: usize,
    pub coverage_pct: i64,
    pub participation_pct: i64,
    pub avg_awards: f64,
    pub total_value: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkforceSeniority {
    pub level: String,
    pub headcount: usize,
    pub recognized: usize,
    pub avg_received: f64,
    pub avg_given: f64,
    pub coverage_pct: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workforce {
    pub total_people: usize,
    pub never_recognized: usize,
    pub never_given: usize,
    pub coverage_pct: i64,
    pub participation_pct: i64,
    pub by_dept: Vec<WorkforceDept>,
    pub by_seniority: Vec<WorkforceSeniority>,
    pub people: Vec<Person>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAward {
    pub date: Option<NaiveDate>,
    pub title: String,
    pub value: u64,
    pub category: String,
    pub category_id: String,
    pub subcategory: String,
    pub from_name: String,
    pub from_dept: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySlice {
    pub id: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub id: String,
    pub name: String,
    pub dept: String,
    pub title: String,
    pub seniority: String,
    pub skills: Vec<String>,
    pub received: usize,
    pub given: usize,
    pub value_received: u64,
    pub engagement_score: u64,
    pub status: EngagementStatus,
    pub days_since_last: i64,
    pub last_award_date: Option<NaiveDate>,
    pub category_breakdown: Vec<CategorySlice>,
    pub recent_awards: Vec<RecentAward>,
}

/// HR-centric people view: coverage and participation across the whole
/// known workforce, not just award recipients.
pub fn workforce(registry: &PersonRegistry) -> Workforce {
    let total_people = registry.len();
    let never_recognized = registry.iter().filter(|p| p.received == 0).count();
    let never_given = registry.iter().filter(|p| p.given == 0).count();

    struct DeptAcc {
        headcount: usize,
        recognized: usize,
        givers: usize,
        total_received: usize,
        total_value: u64,
    }
    let mut by_dept_map: HashMap<&str, DeptAcc> = HashMap::new();
    for p in registry.iter() {
        let acc = by_dept_map.entry(&p.dept).or_insert(DeptAcc {
            headcount: 0,
            recognized: 0,
            givers: 0,
            total_received: 0,
            total_value: 0,
        });
        acc.headcount += 1;
        if p.received > 0 {
            acc.recognized += 1;
        }
        if p.given > 0 {
            acc.givers += 1;
        }
        acc.total_received += p.received;
        acc.total_value += p.value_received;
    }
    let mut by_dept: Vec<WorkforceDept> = by_dept_map
        .into_iter()
        .map(|(dept, acc)| WorkforceDept {
            dept: dept.to_string(),
            headcount: acc.headcount,
            recognized: acc.recognized,
            givers: acc.givers,
            coverage_pct: pct(acc.recognized, acc.headcount),
            participation_pct: pct(acc.givers, acc.headcount),
            avg_awards: round1(acc.total_received as f64 / acc.headcount.max(1) as f64),
            total_value: acc.total_value,
        })
        .collect();
    by_dept.sort_by(|a, b| b.coverage_pct.cmp(&a.coverage_pct).then(a.dept.cmp(&b.dept)));

    struct SenAcc {
        headcount: usize,
        recognized: usize,
        total_received: usize,
        total_given: usize,
    }
    let mut by_sen_map: HashMap<&str, SenAcc> = HashMap::new();
    for p in registry.iter() {
        let acc = by_sen_map.entry(&p.seniority).or_insert(SenAcc {
            headcount: 0,
            recognized: 0,
            total_received: 0,
            total_given: 0,
        });
        acc.headcount += 1;
        if p.received > 0 {
            acc.recognized += 1;
        }
        acc.total_received += p.received;
        acc.total_given += p.given;
    }
    let mut by_seniority: Vec<WorkforceSeniority> = by_sen_map
        .into_iter()
        .map(|(level, acc)| WorkforceSeniority {
            level: level.to_string(),
            headcount: acc.headcount,
            recognized: acc.recognized,
            avg_received: round1(acc.total_received as f64 / acc.headcount.max(1) as f64),
            avg_given: round1(acc.total_given as f64 / acc.headcount.max(1) as f64),
            coverage_pct: pct(acc.recognized, acc.headcount),
        })
        .collect();
    by_seniority.sort_by(|a, b| {
        seniority_rank(&a.level)
            .cmp(&seniority_rank(&b.level))
            .then(a.level.cmp(&b.level))
    });

    Workforce {
        total_people,
        never_recognized,
        never_given,
        coverage_pct: pct(total_people - never_recognized, total_people),
        participation_pct: pct(total_people - never_given, total_people),
        by_dept,
        by_seniority,
        people: registry.by_received().into_iter().cloned().collect(),
    }
}

fn truncated(s: &str, max: usize) -> String {
    s.char_indices()
        .nth(max)
        .map_or_else(|| s.to_string(), |(idx, _)| s[..idx].to_string())
}

/// One profile per known person, recency judged against `as_of`.
pub fn employee_directory(
    records: &[AwardRecord],
    registry: &PersonRegistry,
    as_of: NaiveDate,
) -> Vec<EmployeeProfile> {
    // Skills come from the recipient side; a person first (or only) seen as
    // a nominator has none on record.
    let mut skills: HashMap<&str, Vec<String>> = HashMap::new();
    let mut received_awards: HashMap<&str, Vec<&AwardRecord>> = HashMap::new();
    let mut category_counts: HashMap<&str, HashMap<&str, usize>> = HashMap::new();
    for r in records {
        skills
            .entry(&r.recipient_id)
            .or_insert_with(|| skill_tokens(&r.recipient_skills));
        received_awards.entry(&r.recipient_id).or_default().push(r);
        *category_counts
            .entry(&r.recipient_id)
            .or_default()
            .entry(&r.category_id)
            .or_default() += 1;
    }

    let mut profiles: Vec<EmployeeProfile> = registry
        .iter()
        .map(|p| {
            let mut awards: Vec<&AwardRecord> = received_awards
                .get(p.id.as_str())
                .cloned()
                .unwrap_or_default();
            // Newest first; undated awards sort last.
            awards.sort_by(|a, b| b.date.cmp(&a.date).then(a.award_id.cmp(&b.award_id)));

            let last_award_date = awards.iter().filter_map(|r| r.date).max();
            let days_since_last = last_award_date
                .map(|d| (as_of - d).num_days())
                .unwrap_or(NEVER_DAYS);

            let recent_awards: Vec<RecentAward> = awards
                .iter()
                .take(RECENT_AWARDS)
                .map(|r| RecentAward {
                    date: r.date,
                    title: truncated(&r.title, TITLE_MAX),
                    value: r.value,
                    category: r.category_name.clone(),
                    category_id: r.category_id.clone(),
                    subcategory: r.subcategory_name.clone(),
                    from_name: r.nominator_name.clone(),
                    from_dept: r.nominator_department.clone(),
                    message: truncated(&r.message, MESSAGE_MAX),
                })
                .collect();

            let mut category_breakdown: Vec<CategorySlice> = category_counts
                .get(p.id.as_str())
                .map(|counts| {
                    counts
                        .iter()
                        .map(|(id, count)| CategorySlice {
                            id: id.to_string(),
                            count: *count,
                        })
                        .collect()
                })
                .unwrap_or_default();
            category_breakdown.sort_by(|a, b| b.count.cmp(&a.count).then(a.id.cmp(&b.id)));

            let engagement_score = engagement(p.received, p.given, category_breakdown.len());
            let status = classify(p, days_since_last);

            EmployeeProfile {
                id: p.id.clone(),
                name: p.name.clone(),
                dept: p.dept.clone(),
                title: p.title.clone(),
                seniority: p.seniority.clone(),
                skills: skills.get(p.id.as_str()).cloned().unwrap_or_default(),
                received: p.received,
                given: p.given,
                value_received: p.value_received,
                engagement_score,
                status,
                days_since_last,
                last_award_date,
                category_breakdown,
                recent_awards,
            }
        })
        .collect();
    profiles.sort_by(|a, b| b.received.cmp(&a.received).then(a.id.cmp(&b.id)));
    profiles
}

/// Recognition received (40 pts), giving (30 pts), category breadth (30 pts).
fn engagement(received: usize, given: usize, categories: usize) -> u64 {
    let rec = (received as f64 / 7.0 * 40.0).min(40.0);
    let give = (given as f64 / 5.0 * 30.0).min(30.0);
    let breadth = (categories as f64 / 6.0 * 30.0).min(30.0);
    (rec + give + breadth).round() as u64
}

/// First matching rule wins; the ordering is part of the contract (a stale
/// heavy receiver is at_risk, not thriving).
fn classify(person: &Person, days_since_last: i64) -> EngagementStatus {
    if person.received == 0 {
        EngagementStatus::NeverRecognized
    } else if days_since_last > 120 {
        EngagementStatus::AtRisk
    } else if days_since_last <= 60 && person.received >= 3 {
        EngagementStatus::Thriving
    } else if person.given == 0 {
        EngagementStatus::Passive
    } else {
        EngagementStatus::Active
    }
}
