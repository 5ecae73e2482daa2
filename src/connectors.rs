use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::models::{is_senior, AwardRecord};
use crate::registry::PersonRegistry;

const INVISIBLE_MIN_GIVEN: usize = 2;
const INVISIBLE_LIMIT: usize = 20;
const CONNECTOR_MIN_RECIPIENTS: usize = 3;
const CONNECTOR_LIMIT: usize = 25;
const MANAGER_MIN_GIVEN: usize = 3;
const MANAGER_LIMIT: usize = 20;

/// People who keep the program alive without ever being recognized
/// themselves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvisibleContributor {
    pub id: String,
    pub name: String,
    pub dept: String,
    pub title: String,
    pub seniority: String,
    pub given: usize,
    pub received: usize,
    pub risk_score: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
    pub value: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgConnector {
    pub id: String,
    pub name: String,
    pub dept: String,
    pub seniority: String,
    pub title: String,
    pub unique_people_recognized: usize,
    pub unique_depts_reached: usize,
    pub total_given: usize,
    pub collaboration_score: u64,
}

/// Manager-and-above nominators ranked by how many departments their
/// recognition reaches. Snake_case on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct ManagerReach {
    pub id: String,
    pub name: String,
    pub dept: String,
    pub seniority: String,
    pub total: usize,
    pub unique_depts: usize,
    pub avg_value: u64,
}

pub fn invisible_contributors(registry: &PersonRegistry) -> Vec<InvisibleContributor> {
    let mut out: Vec<InvisibleContributor> = registry
        .iter()
        .filter(|p| p.given >= INVISIBLE_MIN_GIVEN && p.received == 0)
        .map(|p| InvisibleContributor {
            id: p.id.clone(),
            name: p.name.clone(),
            dept: p.dept.clone(),
            title: p.title.clone(),
            seniority: p.seniority.clone(),
            given: p.given,
            received: 0,
            risk_score: (p.given as u64 * 15).min(100),
        })
        .collect();
    out.sort_by(|a, b| b.risk_score.cmp(&a.risk_score).then(a.id.cmp(&b.id)));
    out.truncate(INVISIBLE_LIMIT);
    out
}

/// Cross-department recognition flows, heaviest first, plus the sorted
/// department list for matrix axes.
pub fn cross_dept_flow(records: &[AwardRecord]) -> (Vec<FlowEdge>, Vec<String>) {
    let mut flows: HashMap<(&str, &str), usize> = HashMap::new();
    let mut depts: BTreeSet<&str> = BTreeSet::new();
    for r in records {
        depts.insert(&r.recipient_department);
        if r.nominator_department == r.recipient_department {
            continue;
        }
        *flows
            .entry((&r.nominator_department, &r.recipient_department))
            .or_default() += 1;
    }
    let mut edges: Vec<FlowEdge> = flows
        .into_iter()
        .map(|((from, to), value)| FlowEdge {
            from: from.to_string(),
            to: to.to_string(),
            value,
        })
        .collect();
    edges.sort_by(|a, b| {
        b.value
            .cmp(&a.value)
            .then(a.from.cmp(&b.from))
            .then(a.to.cmp(&b.to))
    });
    (edges, depts.into_iter().map(str::to_string).collect())
}

struct NominatorReach<'a> {
    recipients: HashSet<&'a str>,
    depts: HashSet<&'a str>,
    total: usize,
    total_value: u64,
}

fn nominator_reach(records: &[AwardRecord]) -> HashMap<&str, NominatorReach<'_>> {
    let mut map: HashMap<&str, NominatorReach> = HashMap::new();
    for r in records {
        let acc = map.entry(&r.nominator_id).or_insert(NominatorReach {
            recipients: HashSet::new(),
            depts: HashSet::new(),
            total: 0,
            total_value: 0,
        });
        acc.recipients.insert(&r.recipient_id);
        acc.depts.insert(&r.recipient_department);
        acc.total += 1;
        acc.total_value += r.value;
    }
    map
}

/// Breadth score over unique recipients (50 pts), departments reached
/// (30 pts) and volume (20 pts); nominators with fewer than 3 distinct
/// recipients don't qualify.
pub fn org_connectors(records: &[AwardRecord], registry: &PersonRegistry) -> Vec<OrgConnector> {
    let mut out: Vec<OrgConnector> = nominator_reach(records)
        .into_iter()
        .filter(|(_, acc)| acc.recipients.len() >= CONNECTOR_MIN_RECIPIENTS)
        .map(|(id, acc)| {
            let breadth = acc.recipients.len();
            let reach = acc.depts.len();
            let score = (breadth as f64 / 7.0 * 50.0).min(50.0)
                + (reach as f64 / 12.0 * 30.0).min(30.0)
                + (acc.total as f64 / 10.0 * 20.0).min(20.0);
            let (name, dept, title, seniority) = registry
                .get(id)
                .map(|p| {
                    (
                        p.name.clone(),
                        p.dept.clone(),
                        p.title.clone(),
                        p.seniority.clone(),
                    )
                })
                .unwrap_or_default();
            OrgConnector {
                id: id.to_string(),
                name,
                dept,
                seniority,
                title,
                unique_people_recognized: breadth,
                unique_depts_reached: reach,
                total_given: acc.total,
                collaboration_score: score.round() as u64,
            }
        })
        .collect();
    out.sort_by(|a, b| {
        b.collaboration_score
            .cmp(&a.collaboration_score)
            .then(a.id.cmp(&b.id))
    });
    out.truncate(CONNECTOR_LIMIT);
    out
}

pub fn manager_reach(records: &[AwardRecord], registry: &PersonRegistry) -> Vec<ManagerReach> {
    let senior_records: Vec<AwardRecord> = records
        .iter()
        .filter(|r| is_senior(&r.nominator_seniority))
        .cloned()
        .collect();
    let mut out: Vec<ManagerReach> = nominator_reach(&senior_records)
        .into_iter()
        .filter(|(_, acc)| acc.total >= MANAGER_MIN_GIVEN)
        .map(|(id, acc)| {
            let (name, dept, seniority) = registry
                .get(id)
                .map(|p| (p.name.clone(), p.dept.clone(), p.seniority.clone()))
                .unwrap_or_default();
            ManagerReach {
                id: id.to_string(),
                name,
                dept,
                seniority,
                total: acc.total,
                unique_depts: acc.depts.len(),
                avg_value: (acc.total_value as f64 / acc.total.max(1) as f64).round() as u64,
            }
        })
        .collect();
    out.sort_by(|a, b| b.unique_depts.cmp(&a.unique_depts).then(a.id.cmp(&b.id)));
    out.truncate(MANAGER_LIMIT);
    out
}
