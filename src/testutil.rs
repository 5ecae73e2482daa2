//! Shared test fixtures: compact builders for award records.

use chrono::NaiveDate;

use crate::models::AwardRecord;

pub fn award(recipient: &str, nominator: &str, value: u64) -> AwardRecord {
    AwardRecord {
        award_id: format!("a-{recipient}-{nominator}-{value}"),
        date: None,
        title: "Great work".to_string(),
        message: String::new(),
        reasoning: String::new(),
        value,
        recipient_id: recipient.to_string(),
        recipient_name: format!("Person {recipient}"),
        recipient_title: "Engineer".to_string(),
        recipient_department: "Engineering".to_string(),
        recipient_seniority: "IC".to_string(),
        recipient_skills: String::new(),
        nominator_id: nominator.to_string(),
        nominator_name: format!("Person {nominator}"),
        nominator_title: "Manager".to_string(),
        nominator_department: "Engineering".to_string(),
        nominator_seniority: "Manager".to_string(),
        category_id: "A".to_string(),
        category_name: "Teamwork".to_string(),
        subcategory_id: "A1".to_string(),
        subcategory_name: "Collaboration".to_string(),
    }
}

pub fn award_on(recipient: &str, nominator: &str, year: i32, month: u32, day: u32) -> AwardRecord {
    award(recipient, nominator, 100).on(year, month, day)
}

impl AwardRecord {
    pub fn on(mut self, year: i32, month: u32, day: u32) -> Self {
        self.date = NaiveDate::from_ymd_opt(year, month, day);
        self
    }

    pub fn category(mut self, id: &str, name: &str) -> Self {
        self.category_id = id.to_string();
        self.category_name = name.to_string();
        self
    }

    pub fn dept(mut self, dept: &str) -> Self {
        self.recipient_department = dept.to_string();
        self
    }

    pub fn nominator_dept(mut self, dept: &str) -> Self {
        self.nominator_department = dept.to_string();
        self
    }

    pub fn recipient_level(mut self, level: &str) -> Self {
        self.recipient_seniority = level.to_string();
        self
    }

    pub fn nominator_level(mut self, level: &str) -> Self {
        self.nominator_seniority = level.to_string();
        self
    }

    pub fn skills(mut self, skills: &str) -> Self {
        self.recipient_skills = skills.to_string();
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }
}
