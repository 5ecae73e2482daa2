use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::models::{skill_tokens, AwardRecord};

const TOP_SKILLS: usize = 20;
const DEPT_SKILLS: usize = 6;
const MATRIX_SKILLS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Rare,
    Moderate,
    Common,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSummary {
    pub name: String,
    pub count: usize,
    pub dominant_category: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSkill {
    pub skill: String,
    pub count: usize,
    pub dominant_category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillCategoryRow {
    pub skill: String,
    pub categories: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub skill: String,
    pub count: usize,
    pub dept_count: usize,
    pub depts: Vec<String>,
    pub rarity: Rarity,
    pub by_dept: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInsights {
    pub top_skills: Vec<TopSkill>,
    pub by_department: BTreeMap<String, Vec<SkillCount>>,
    pub skill_category_matrix: Vec<SkillCategoryRow>,
}

#[derive(Debug, Default)]
struct SkillStats {
    freq: HashMap<String, usize>,
    categories: HashMap<String, BTreeMap<String, usize>>,
    by_dept: HashMap<String, BTreeMap<String, usize>>,
    depts: HashMap<String, BTreeSet<String>>,
}

fn collect(records: &[AwardRecord]) -> SkillStats {
    let mut stats = SkillStats::default();
    for r in records {
        for skill in skill_tokens(&r.recipient_skills) {
            *stats.freq.entry(skill.clone()).or_default() += 1;
            *stats
                .categories
                .entry(skill.clone())
                .or_default()
                .entry(r.category_id.clone())
                .or_default() += 1;
            *stats
                .by_dept
                .entry(skill.clone())
                .or_default()
                .entry(r.recipient_department.clone())
                .or_default() += 1;
            stats
                .depts
                .entry(skill)
                .or_default()
                .insert(r.recipient_department.clone());
        }
    }
    stats
}

fn dominant_category(categories: Option<&BTreeMap<String, usize>>) -> String {
    categories
        .and_then(|cats| {
            cats.iter()
                .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
                .map(|(id, _)| id.clone())
        })
        .unwrap_or_default()
}

fn ranked_skills(stats: &SkillStats) -> Vec<(String, usize)> {
    let mut skills: Vec<(String, usize)> = stats
        .freq
        .iter()
        .map(|(skill, count)| (skill.clone(), *count))
        .collect();
    skills.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    skills
}

/// Top-20 skill leaderboard with the category each skill is most
/// associated with.
pub fn skill_summaries(records: &[AwardRecord]) -> Vec<SkillSummary> {
    let stats = collect(records);
    ranked_skills(&stats)
        .into_iter()
        .take(TOP_SKILLS)
        .map(|(name, count)| SkillSummary {
            dominant_category: dominant_category(stats.categories.get(&name)),
            name,
            count,
        })
        .collect()
}

pub fn insights(records: &[AwardRecord]) -> SkillInsights {
    let stats = collect(records);
    let ranked = ranked_skills(&stats);

    let top_skills: Vec<TopSkill> = ranked
        .iter()
        .take(TOP_SKILLS)
        .map(|(skill, count)| TopSkill {
            skill: skill.clone(),
            count: *count,
            dominant_category: dominant_category(stats.categories.get(skill)),
        })
        .collect();

    // Top 6 skills per department.
    let mut dept_skills: HashMap<&str, Vec<SkillCount>> = HashMap::new();
    for (skill, per_dept) in &stats.by_dept {
        for (dept, count) in per_dept {
            dept_skills.entry(dept).or_default().push(SkillCount {
                skill: skill.clone(),
                count: *count,
            });
        }
    }
    let by_department: BTreeMap<String, Vec<SkillCount>> = dept_skills
        .into_iter()
        .map(|(dept, mut skills)| {
            skills.sort_by(|a, b| b.count.cmp(&a.count).then(a.skill.cmp(&b.skill)));
            skills.truncate(DEPT_SKILLS);
            (dept.to_string(), skills)
        })
        .collect();

    let skill_category_matrix: Vec<SkillCategoryRow> = ranked
        .iter()
        .take(MATRIX_SKILLS)
        .map(|(skill, _)| SkillCategoryRow {
            skill: skill.clone(),
            categories: stats.categories.get(skill).cloned().unwrap_or_default(),
        })
        .collect();

    SkillInsights {
        top_skills,
        by_department,
        skill_category_matrix,
    }
}

/// Full skill table classified by rarity. Thresholds are taken at the 33rd
/// and 66th index positions of the ascending count distribution; this is
/// index-based bucketing, not true percentile rank, kept from the source
/// behavior.
pub fn skill_gaps(records: &[AwardRecord]) -> Vec<SkillGap> {
    let stats = collect(records);
    if stats.freq.is_empty() {
        return Vec::new();
    }

    let mut counts: Vec<usize> = stats.freq.values().copied().collect();
    counts.sort_unstable();
    let p33 = counts[(counts.len() as f64 * 0.33).floor() as usize];
    let p66 = counts[(counts.len() as f64 * 0.66).floor() as usize];

    let mut gaps: Vec<SkillGap> = stats
        .freq
        .iter()
        .map(|(skill, count)| {
            let rarity = if *count <= p33 {
                Rarity::Rare
            } else if *count <= p66 {
                Rarity::Moderate
            } else {
                Rarity::Common
            };
            let depts: Vec<String> = stats
                .depts
                .get(skill)
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default();
            SkillGap {
                skill: skill.clone(),
                count: *count,
                dept_count: depts.len(),
                depts,
                rarity,
                by_dept: stats.by_dept.get(skill).cloned().unwrap_or_default(),
            }
        })
        .collect();
    gaps.sort_by(|a, b| a.count.cmp(&b.count).then(a.skill.cmp(&b.skill)));
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::award;

    #[test]
    fn nan_tokens_never_become_skills() {
        let records = vec![award("p1", "p2", 0).skills("Rust,nan, ,NAN")];
        let gaps = skill_gaps(&records);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].skill, "Rust");
    }

    #[test]
    fn dominant_category_is_highest_count() {
        let records = vec![
            award("p1", "p2", 0).skills("Rust").category("A", "Teamwork"),
            award("p1", "p2", 0).skills("Rust").category("B", "Innovation"),
            award("p1", "p2", 0).skills("Rust").category("B", "Innovation"),
        ];
        let summaries = skill_summaries(&records);
        assert_eq!(summaries[0].dominant_category, "B");
    }

    #[test]
    fn rarity_buckets_split_the_distribution() {
        let mut records = Vec::new();
        // "Common" appears 6 times, "Middling" 3, "Scarce" once.
        for _ in 0..6 {
            records.push(award("p1", "p2", 0).skills("Common"));
        }
        for _ in 0..3 {
            records.push(award("p1", "p2", 0).skills("Middling"));
        }
        records.push(award("p1", "p2", 0).skills("Scarce"));

        let gaps = skill_gaps(&records);
        let rarity_of = |name: &str| gaps.iter().find(|g| g.skill == name).unwrap().rarity;
        assert_eq!(rarity_of("Scarce"), Rarity::Rare);
        assert_eq!(rarity_of("Middling"), Rarity::Moderate);
        assert_eq!(rarity_of("Common"), Rarity::Common);
        // Ascending by count
        assert_eq!(gaps[0].skill, "Scarce");
    }

    #[test]
    fn department_reach_is_tracked() {
        let records = vec![
            award("p1", "p2", 0).skills("Rust").dept("Engineering"),
            award("p3", "p2", 0).skills("Rust").dept("Data Science"),
        ];
        let gaps = skill_gaps(&records);
        assert_eq!(gaps[0].dept_count, 2);
        assert_eq!(gaps[0].depts, vec!["Data Science", "Engineering"]);
        assert_eq!(gaps[0].by_dept.get("Engineering"), Some(&1));
    }

    #[test]
    fn per_department_lists_cap_at_six() {
        let mut records = Vec::new();
        for i in 0..10 {
            records.push(award("p1", "p2", 0).skills(&format!("Skill{i}")));
        }
        let insights = insights(&records);
        assert_eq!(insights.by_department["Engineering"].len(), 6);
    }

    #[test]
    fn empty_input_produces_empty_tables() {
        assert!(skill_gaps(&[]).is_empty());
        assert!(skill_summaries(&[]).is_empty());
        let insights = insights(&[]);
        assert!(insights.top_skills.is_empty());
        assert!(insights.skill_category_matrix.is_empty());
    }
}
