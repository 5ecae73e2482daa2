use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{self, Kpi, MonthlyActivity};
use crate::connectors::{self, FlowEdge, InvisibleContributor, ManagerReach, OrgConnector};
use crate::equity::{self, EquityRow, ValueEquity};
use crate::health::{self, DepartmentHealth};
use crate::models::AwardRecord;
use crate::network::{self, NetworkGraph};
use crate::profiles::{self, EmployeeProfile, Workforce};
use crate::registry::PersonRegistry;
use crate::skills::{self, SkillGap, SkillInsights, SkillSummary};
use crate::themes::{self, CategoryTheme, WordCount};
use crate::trends::{self, MomentumEntry, MonthSeason};

const LEADERBOARD: usize = 10;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Intelligence {
    pub invisible_contributors: Vec<InvisibleContributor>,
    pub rising_stars: Vec<MomentumEntry>,
    pub declining_recognition: Vec<MomentumEntry>,
    pub cross_dept_flow: Vec<FlowEdge>,
    pub depts: Vec<String>,
    pub equity_data: Vec<EquityRow>,
    pub manager_reach: Vec<ManagerReach>,
    pub skill_gaps: Vec<SkillGap>,
    pub seasonality: Vec<MonthSeason>,
    pub org_connectors: Vec<OrgConnector>,
    pub value_equity: ValueEquity,
}

/// The full derived-analytics bundle. Built in one call; an empty record
/// stream yields this structure with zero counters and empty lists.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub kpi: Kpi,
    pub categories: Vec<aggregate::CategoryBreakdown>,
    pub subcategories: Vec<aggregate::SubcategoryBreakdown>,
    pub monthly: Vec<MonthlyActivity>,
    pub departments: Vec<aggregate::DepartmentSummary>,
    pub seniority: Vec<aggregate::SenioritySlice>,
    pub top_recipients: Vec<aggregate::TopRecipient>,
    pub top_nominators: Vec<aggregate::TopNominator>,
    pub skills: Vec<SkillSummary>,
    pub value_distribution: Vec<aggregate::ValueBucket>,
    pub network: NetworkGraph,
    pub culture_health: Vec<DepartmentHealth>,
    pub word_cloud: Vec<WordCount>,
    pub message_themes: Vec<CategoryTheme>,
    pub skill_insights: SkillInsights,
    pub workforce: Workforce,
    pub intelligence: Intelligence,
    pub employee_directory: Vec<EmployeeProfile>,
}

/// Run every analyzer over the record batch. Pure and deterministic: the
/// same records and the same `as_of` date always produce byte-identical
/// output.
pub fn analyze(records: &[AwardRecord], as_of: NaiveDate) -> Dashboard {
    let registry = PersonRegistry::build(records);
    log::debug!(
        "analyzing {} records across {} people",
        records.len(),
        registry.len()
    );

    let monthly = aggregate::monthly(records);
    let momentum = trends::momentum(records, &registry);
    let (cross_dept_flow, depts) = connectors::cross_dept_flow(records);

    let dashboard = Dashboard {
        kpi: aggregate::kpis(records, &registry, &monthly, as_of),
        categories: aggregate::categories(records),
        subcategories: aggregate::subcategories(records),
        departments: aggregate::departments(records),
        seniority: aggregate::seniority_distribution(records),
        top_recipients: aggregate::top_recipients(&registry, LEADERBOARD),
        top_nominators: aggregate::top_nominators(&registry, LEADERBOARD),
        skills: skills::skill_summaries(records),
        value_distribution: aggregate::value_distribution(records),
        network: network::build(records, &registry),
        culture_health: health::score(records),
        word_cloud: themes::word_cloud(records),
        message_themes: themes::message_themes(records),
        skill_insights: skills::insights(records),
        workforce: profiles::workforce(&registry),
        intelligence: Intelligence {
            invisible_contributors: connectors::invisible_contributors(&registry),
            rising_stars: trends::rising_stars(&momentum),
            declining_recognition: trends::declining(&momentum),
            cross_dept_flow,
            depts,
            equity_data: equity::equity_rows(records),
            manager_reach: connectors::manager_reach(records, &registry),
            skill_gaps: skills::skill_gaps(records),
            seasonality: trends::seasonality(records),
            org_connectors: connectors::org_connectors(records, &registry),
            value_equity: equity::value_equity(records, &registry),
        },
        employee_directory: profiles::employee_directory(records, &registry, as_of),
        monthly,
    };
    log::info!(
        "dashboard built: {} awards, {} people, {} departments",
        dashboard.kpi.total_awards,
        dashboard.workforce.total_people,
        dashboard.kpi.unique_departments
    );
    dashboard
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{award, award_on};
    use pretty_assertions::assert_eq;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn empty_input_yields_zero_state_without_failing() {
        let dashboard = analyze(&[], as_of());
        assert_eq!(dashboard.kpi.total_awards, 0);
        assert_eq!(dashboard.workforce.total_people, 0);
        assert!(dashboard.categories.is_empty());
        assert!(dashboard.monthly.is_empty());
        assert!(dashboard.network.nodes.is_empty());
        assert!(dashboard.employee_directory.is_empty());
        assert_eq!(dashboard.intelligence.value_equity.concentration.gini_coeff, 0.0);
        // And it still serializes cleanly.
        assert!(serde_json::to_string(&dashboard).is_ok());
    }

    #[test]
    fn identical_input_produces_byte_identical_output() {
        let mut records = Vec::new();
        for i in 0..30u32 {
            records.push(
                award_on(&format!("r{}", i % 7), &format!("n{}", i % 5), 2025, (i % 12) + 1, 5)
                    .category(if i % 2 == 0 { "A" } else { "B" }, "Cat")
                    .dept(if i % 3 == 0 { "Sales" } else { "Engineering" })
                    .skills("Rust,Analysis")
                    .message("outstanding delivery under pressure"),
            );
        }
        let a = serde_json::to_string(&analyze(&records, as_of())).unwrap();
        let b = serde_json::to_string(&analyze(&records, as_of())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn category_counts_cross_check_totals() {
        let records = vec![
            award("p1", "p2", 100).category("A", "Teamwork"),
            award("p3", "p4", 200).category("B", "Innovation"),
            award("p1", "p4", 300).category("A", "Teamwork"),
        ];
        let dashboard = analyze(&records, as_of());
        let category_total: usize = dashboard.categories.iter().map(|c| c.count).sum();
        assert_eq!(category_total, dashboard.kpi.total_awards);
        let value_total: u64 = dashboard.categories.iter().map(|c| c.total_value).sum();
        assert_eq!(value_total, dashboard.kpi.total_monetary);
    }

    #[test]
    fn single_pair_scenario_flows_through_every_view() {
        let records = vec![
            award("p1", "p2", 100),
            award("p1", "p2", 100),
            award("p1", "p2", 100),
        ];
        let dashboard = analyze(&records, as_of());
        assert_eq!(dashboard.workforce.people[0].id, "p1");
        assert_eq!(dashboard.workforce.people[0].received, 3);
        let p2 = dashboard
            .workforce
            .people
            .iter()
            .find(|p| p.id == "p2")
            .unwrap();
        assert_eq!(p2.given, 3);
        assert_eq!(dashboard.departments[0].avg_value, 100);
        // 1 of 2 known people has been recognized.
        assert_eq!(dashboard.workforce.coverage_pct, 50);
    }

    #[test]
    fn seasonality_spike_month_is_marked() {
        let mut records = Vec::new();
        for month in 1..=12 {
            records.push(award_on("p1", "p2", 2025, month, 5).category("A", "Teamwork"));
        }
        // July spike in category B.
        for _ in 0..5 {
            records.push(award_on("p3", "p2", 2025, 7, 10).category("B", "Innovation"));
        }
        let dashboard = analyze(&records, as_of());
        let seasons = &dashboard.intelligence.seasonality;
        assert_eq!(seasons.len(), 12);
        assert_eq!(seasons[0].month_name, "Jan");
        assert_eq!(seasons[11].month_name, "Dec");
        let july = seasons.iter().find(|s| s.month == 7).unwrap();
        assert_eq!(july.dominant_category, "B");
        assert_eq!(july.total, 6);
    }
}
