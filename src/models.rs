use chrono::NaiveDate;

/// One peer-recognition event, already parsed at the ingest boundary.
/// `date` is `None` when the source date was missing or unparseable; such
/// records still count toward totals but are skipped by date-bucketed views.
#[derive(Debug, Clone)]
pub struct AwardRecord {
    pub award_id: String,
    pub date: Option<NaiveDate>,
    pub title: String,
    pub message: String,
    pub reasoning: String,
    pub value: u64,
    pub recipient_id: String,
    pub recipient_name: String,
    pub recipient_title: String,
    pub recipient_department: String,
    pub recipient_seniority: String,
    pub recipient_skills: String,
    pub nominator_id: String,
    pub nominator_name: String,
    pub nominator_title: String,
    pub nominator_department: String,
    pub nominator_seniority: String,
    pub category_id: String,
    pub category_name: String,
    pub subcategory_id: String,
    pub subcategory_name: String,
}

pub const SENIORITY_ORDER: [&str; 6] = [
    "IC",
    "Senior IC",
    "Manager",
    "Senior Manager",
    "Director",
    "VP",
];

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 1-based position on the seniority scale; unknown levels sort last.
pub fn seniority_rank(level: &str) -> usize {
    SENIORITY_ORDER
        .iter()
        .position(|s| *s == level)
        .map(|i| i + 1)
        .unwrap_or(99)
}

/// Rank used for peer-distance checks, where an unknown level counts as 0
/// rather than sorting last.
pub fn peer_rank(level: &str) -> i64 {
    SENIORITY_ORDER
        .iter()
        .position(|s| *s == level)
        .map(|i| i as i64 + 1)
        .unwrap_or(0)
}

pub fn is_senior(level: &str) -> bool {
    (3..=6).contains(&seniority_rank(level))
}

/// Department palette used for network-node rendering hints.
pub fn department_color(dept: &str) -> &'static str {
    match dept {
        "Marketing" => "#FD79A8",
        "Data Science" => "#4ECDC4",
        "Finance" => "#FFEAA7",
        "Customer Service" => "#FF6B6B",
        "Product" => "#00CEC9",
        "Design" => "#45B7D1",
        "Sales" => "#FDCB6E",
        "Legal" => "#A29BFE",
        "HR" => "#DDA15E",
        "IT" => "#6C5CE7",
        "Engineering" => "#96CEB4",
        "Operations" => "#74B9FF",
        _ => "#888",
    }
}

/// Monthly bucket key, `YYYY-MM`. Lexicographic order equals chronological
/// order for these keys.
pub fn month_key(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{}-{:02}", date.year(), date.month())
}

/// Skill tokens: comma-split, trimmed, empty and "nan" dropped.
pub fn skill_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("nan"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seniority_scale_is_ordered() {
        assert_eq!(seniority_rank("IC"), 1);
        assert_eq!(seniority_rank("VP"), 6);
        assert!(seniority_rank("Senior IC") < seniority_rank("Manager"));
        assert_eq!(seniority_rank("Contractor"), 99);
        assert_eq!(peer_rank("Contractor"), 0);
    }

    #[test]
    fn skill_tokens_drop_blanks_and_nan() {
        assert_eq!(
            skill_tokens("Leadership, Communication , ,nan,NaN"),
            vec!["Leadership".to_string(), "Communication".to_string()]
        );
        assert!(skill_tokens("").is_empty());
    }

    #[test]
    fn month_key_pads_month() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(month_key(d), "2025-03");
    }
}
