use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::{department_color, AwardRecord};
use crate::registry::PersonRegistry;

const MAX_NODES: usize = 80;
const MAX_EDGES: usize = 200;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
    pub id: String,
    pub name: String,
    pub dept: String,
    pub title: String,
    pub seniority: String,
    pub received: usize,
    pub given: usize,
    pub total_value: u64,
    pub color: String,
    /// Rendering radius hint; layout itself is the caller's concern.
    pub size: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkEdge {
    pub source: String,
    pub target: String,
    pub weight: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkGraph {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

/// Recognition graph over the most active people: the 80 highest by
/// `received + given`, with the 200 heaviest nominator→recipient edges
/// among them. Ties break on id so identical input yields identical output.
pub fn build(records: &[AwardRecord], registry: &PersonRegistry) -> NetworkGraph {
    let mut people: Vec<_> = registry.iter().collect();
    people.sort_by(|a, b| {
        (b.received + b.given)
            .cmp(&(a.received + a.given))
            .then(a.id.cmp(&b.id))
    });
    people.truncate(MAX_NODES);

    let nodes: Vec<NetworkNode> = people
        .iter()
        .map(|p| NetworkNode {
            id: p.id.clone(),
            name: p.name.clone(),
            dept: p.dept.clone(),
            title: p.title.clone(),
            seniority: p.seniority.clone(),
            received: p.received,
            given: p.given,
            total_value: p.value_received,
            color: department_color(&p.dept).to_string(),
            size: node_size(p.received),
        })
        .collect();

    let node_ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

    let mut weights: HashMap<(&str, &str), usize> = HashMap::new();
    for r in records {
        if r.nominator_id == r.recipient_id {
            continue;
        }
        if !node_ids.contains(r.nominator_id.as_str())
            || !node_ids.contains(r.recipient_id.as_str())
        {
            continue;
        }
        *weights
            .entry((r.nominator_id.as_str(), r.recipient_id.as_str()))
            .or_default() += 1;
    }

    let mut edges: Vec<NetworkEdge> = weights
        .into_iter()
        .map(|((source, target), weight)| NetworkEdge {
            source: source.to_string(),
            target: target.to_string(),
            weight,
        })
        .collect();
    edges.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then(a.source.cmp(&b.source))
            .then(a.target.cmp(&b.target))
    });
    edges.truncate(MAX_EDGES);

    NetworkGraph { nodes, edges }
}

fn node_size(received: usize) -> f64 {
    (4.0 + received as f64 / 2.0).clamp(5.0, 14.0)
}
