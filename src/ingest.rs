use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;

use crate::models::AwardRecord;

/// Raw row shape of an enriched awards export. Everything is a string at
/// this layer; normalization happens in [`load_awards`].
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    award_id: String,
    #[serde(default)]
    award_date: String,
    #[serde(default)]
    award_title: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    value: String,
    #[serde(default)]
    recipient_id: String,
    #[serde(default)]
    recipient_name: String,
    #[serde(default)]
    recipient_title: String,
    #[serde(default)]
    recipient_department: String,
    #[serde(default)]
    recipient_seniority: String,
    #[serde(default)]
    recipient_skills: String,
    #[serde(default)]
    nominator_id: String,
    #[serde(default)]
    nominator_name: String,
    #[serde(default)]
    nominator_title: String,
    #[serde(default)]
    nominator_department: String,
    #[serde(default)]
    nominator_seniority: String,
    #[serde(default)]
    category_id: String,
    #[serde(default)]
    category_name: String,
    #[serde(default)]
    subcategory_id: String,
    #[serde(default)]
    subcategory_name: String,
}

/// Lenient date parse. Unparseable dates are tolerated; the record is then
/// excluded from date-bucketed views only.
pub fn parse_award_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
}

fn parse_value(raw: &str) -> u64 {
    raw.trim().parse::<f64>().ok().map_or(0, |v| {
        if v.is_finite() && v > 0.0 {
            v as u64
        } else {
            0
        }
    })
}

/// Load award records from a CSV export. Rows missing a recipient or
/// nominator id are structurally invalid and skipped with a warning; all
/// other gaps are normalized (missing value becomes 0, bad dates become
/// `None`).
pub fn load_awards(csv_path: &Path) -> anyhow::Result<Vec<AwardRecord>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("malformed CSV row {}", line + 2))?;

        if row.recipient_id.trim().is_empty() || row.nominator_id.trim().is_empty() {
            skipped += 1;
            log::warn!("row {}: missing recipient/nominator id, skipped", line + 2);
            continue;
        }

        records.push(AwardRecord {
            award_id: row.award_id,
            date: parse_award_date(&row.award_date),
            title: row.award_title,
            message: row.message,
            reasoning: row.reasoning,
            value: parse_value(&row.value),
            recipient_id: row.recipient_id.trim().to_string(),
            recipient_name: row.recipient_name,
            recipient_title: row.recipient_title,
            recipient_department: row.recipient_department,
            recipient_seniority: row.recipient_seniority,
            recipient_skills: row.recipient_skills,
            nominator_id: row.nominator_id.trim().to_string(),
            nominator_name: row.nominator_name,
            nominator_title: row.nominator_title,
            nominator_department: row.nominator_department,
            nominator_seniority: row.nominator_seniority,
            category_id: row.category_id,
            category_name: row.category_name,
            subcategory_id: row.subcategory_id,
            subcategory_name: row.subcategory_name,
        });
    }

    log::info!(
        "loaded {} award records from {} ({} skipped)",
        records.len(),
        csv_path.display(),
        skipped
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "award_id,award_date,award_title,message,reasoning,value,\
recipient_id,recipient_name,recipient_title,recipient_department,recipient_seniority,recipient_skills,\
nominator_id,nominator_name,nominator_title,nominator_department,nominator_seniority,\
category_id,category_name,subcategory_id,subcategory_name";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn loads_well_formed_rows() {
        let file = write_csv(&[
            "a1,2025-06-15,Great quarter,thanks for the help,solid work,250,\
p1,Ana,Engineer,Engineering,IC,\"Rust,Mentoring\",\
p2,Ben,Manager,Engineering,Manager,A,Teamwork,A1,Collaboration",
        ]);
        let records = load_awards(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.value, 250);
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2025, 6, 15));
        assert_eq!(r.recipient_id, "p1");
    }

    #[test]
    fn bad_date_and_value_are_tolerated() {
        let file = write_csv(&[
            "a1,not-a-date,t,m,r,abc,p1,Ana,E,Eng,IC,,p2,Ben,M,Eng,Manager,A,Teamwork,A1,Collab",
        ]);
        let records = load_awards(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, None);
        assert_eq!(records[0].value, 0);
    }

    #[test]
    fn rows_without_ids_are_skipped() {
        let file = write_csv(&[
            "a1,2025-06-15,t,m,r,100,,Ana,E,Eng,IC,,p2,Ben,M,Eng,Manager,A,Teamwork,A1,Collab",
            "a2,2025-06-16,t,m,r,100,p1,Ana,E,Eng,IC,,p2,Ben,M,Eng,Manager,A,Teamwork,A1,Collab",
        ]);
        let records = load_awards(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].award_id, "a2");
    }

    #[test]
    fn accepts_slash_separated_dates() {
        assert_eq!(
            parse_award_date("2025/02/01"),
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
        assert_eq!(
            parse_award_date("02/01/2025"),
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
        assert_eq!(parse_award_date(""), None);
    }
}
