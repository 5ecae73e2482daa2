use std::fmt::Write;

use chrono::NaiveDate;

use crate::engine::Dashboard;
use crate::equity::{seniority_equity_score, EquityMetric};

pub fn build_report(dashboard: &Dashboard, as_of: NaiveDate) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Recognition Insights Report");
    let _ = writeln!(
        output,
        "As of {} — {} awards, {} people, {} departments",
        as_of,
        dashboard.kpi.total_awards,
        dashboard.workforce.total_people,
        dashboard.kpi.unique_departments
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "## Headline");
    let _ = writeln!(
        output,
        "- Total value awarded: ${}",
        dashboard.kpi.total_monetary
    );
    let _ = writeln!(output, "- Average award: ${}", dashboard.kpi.avg_award_value);
    let _ = writeln!(
        output,
        "- Workforce coverage: {}% recognized, {}% participating",
        dashboard.workforce.coverage_pct, dashboard.workforce.participation_pct
    );
    let _ = writeln!(
        output,
        "- Cross-department recognition: {}% of awards",
        dashboard.kpi.cross_dept_pct
    );
    let _ = writeln!(
        output,
        "- Month-over-month trend: {}%",
        dashboard.kpi.mom_trend
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Category Mix");
    if dashboard.categories.is_empty() {
        let _ = writeln!(output, "No awards recorded.");
    } else {
        for cat in &dashboard.categories {
            let _ = writeln!(
                output,
                "- {}: {} awards ({}%, ${})",
                cat.name, cat.count, cat.pct, cat.total_value
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Most Recognized");
    if dashboard.top_recipients.is_empty() {
        let _ = writeln!(output, "No recipients in this data set.");
    } else {
        for person in &dashboard.top_recipients {
            let _ = writeln!(
                output,
                "- {} ({}, {}) — {} awards",
                person.name, person.dept, person.seniority, person.awards
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Department Health");
    if dashboard.culture_health.is_empty() {
        let _ = writeln!(output, "No department activity.");
    } else {
        for dept in &dashboard.culture_health {
            let _ = writeln!(
                output,
                "- {}: health {} (diversity {}, participation {}, volume {}, generosity {})",
                dept.name,
                dept.health,
                dept.scores.diversity,
                dept.scores.participation,
                dept.scores.volume,
                dept.scores.generosity
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Value Equity");
    let concentration = &dashboard.intelligence.value_equity.concentration;
    let _ = writeln!(output, "- Gini coefficient: {}", concentration.gini_coeff);
    let _ = writeln!(
        output,
        "- Top-10 recipients hold {}% of value (${})",
        concentration.top10_pct, concentration.top10_value
    );
    let score = seniority_equity_score(&dashboard.intelligence.equity_data, EquityMetric::Count);
    let label = if score.fair { "fair" } else { "moderate" };
    let _ = writeln!(
        output,
        "- Seniority distribution: {} (CV {}%)",
        label, score.cv
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Momentum");
    if dashboard.intelligence.rising_stars.is_empty()
        && dashboard.intelligence.declining_recognition.is_empty()
    {
        let _ = writeln!(output, "Not enough monthly history for trend detection.");
    }
    for star in dashboard.intelligence.rising_stars.iter().take(5) {
        let _ = writeln!(
            output,
            "- Rising: {} ({}) slope {:+} over {} months",
            star.name, star.dept, star.slope, star.months
        );
    }
    for fading in dashboard.intelligence.declining_recognition.iter().take(5) {
        let _ = writeln!(
            output,
            "- Declining: {} ({}) slope {:+} over {} months",
            fading.name, fading.dept, fading.slope, fading.months
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Invisible Contributors");
    if dashboard.intelligence.invisible_contributors.is_empty() {
        let _ = writeln!(
            output,
            "Everyone who gives recognition has also received some."
        );
    } else {
        for person in &dashboard.intelligence.invisible_contributors {
            let _ = writeln!(
                output,
                "- {} ({}) gave {} awards, received none (risk {})",
                person.name, person.dept, person.given, person.risk_score
            );
        }
    }

    output
}
