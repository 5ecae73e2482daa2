use std::collections::HashMap;

use serde::Serialize;

use crate::models::AwardRecord;

/// One deduplicated identity: every appearance of an id, whether as
/// recipient or nominator, folds into the same entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub dept: String,
    pub title: String,
    pub seniority: String,
    pub received: usize,
    pub given: usize,
    pub value_received: u64,
}

/// Person index built in a single pass over the record stream. People are
/// created on first sighting in either role; counters follow the role of
/// each appearance.
#[derive(Debug, Default)]
pub struct PersonRegistry {
    people: HashMap<String, Person>,
    insertion: Vec<String>,
}

impl PersonRegistry {
    pub fn build(records: &[AwardRecord]) -> Self {
        let mut registry = PersonRegistry::default();
        for record in records {
            let recipient = registry.sight(&record.recipient_id, || Person {
                id: record.recipient_id.clone(),
                name: record.recipient_name.clone(),
                dept: record.recipient_department.clone(),
                title: record.recipient_title.clone(),
                seniority: record.recipient_seniority.clone(),
                received: 0,
                given: 0,
                value_received: 0,
            });
            recipient.received += 1;
            recipient.value_received += record.value;

            let nominator = registry.sight(&record.nominator_id, || Person {
                id: record.nominator_id.clone(),
                name: record.nominator_name.clone(),
                dept: record.nominator_department.clone(),
                title: record.nominator_title.clone(),
                seniority: record.nominator_seniority.clone(),
                received: 0,
                given: 0,
                value_received: 0,
            });
            nominator.given += 1;
        }
        registry
    }

    fn sight(&mut self, id: &str, make: impl FnOnce() -> Person) -> &mut Person {
        if !self.people.contains_key(id) {
            self.insertion.push(id.to_string());
        }
        self.people.entry(id.to_string()).or_insert_with(make)
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.people.get(id)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// People in first-sighting order.
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.insertion.iter().filter_map(|id| self.people.get(id))
    }

    /// People sorted by received count descending, ties kept in
    /// first-sighting order.
    pub fn by_received(&self) -> Vec<&Person> {
        let mut people: Vec<&Person> = self.iter().collect();
        people.sort_by(|a, b| b.received.cmp(&a.received));
        people
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AwardRecord;

    fn award(recipient: &str, nominator: &str, value: u64) -> AwardRecord {
        AwardRecord {
            award_id: format!("a-{recipient}-{nominator}"),
            date: None,
            title: String::new(),
            message: String::new(),
            reasoning: String::new(),
            value,
            recipient_id: recipient.to_string(),
            recipient_name: recipient.to_uppercase(),
            recipient_title: "Engineer".to_string(),
            recipient_department: "Engineering".to_string(),
            recipient_seniority: "IC".to_string(),
            recipient_skills: String::new(),
            nominator_id: nominator.to_string(),
            nominator_name: nominator.to_uppercase(),
            nominator_title: "Manager".to_string(),
            nominator_department: "Product".to_string(),
            nominator_seniority: "Manager".to_string(),
            category_id: "A".to_string(),
            category_name: "Teamwork".to_string(),
            subcategory_id: "A1".to_string(),
            subcategory_name: "Collaboration".to_string(),
        }
    }

    #[test]
    fn merges_both_roles_into_one_identity() {
        // p1 receives once and gives once
        let records = vec![award("p1", "p2", 100), award("p2", "p1", 50)];
        let registry = PersonRegistry::build(&records);

        assert_eq!(registry.len(), 2);
        let p1 = registry.get("p1").unwrap();
        assert_eq!(p1.received, 1);
        assert_eq!(p1.given, 1);
        assert_eq!(p1.value_received, 100);
    }

    #[test]
    fn counters_match_record_stream() {
        let records = vec![
            award("p1", "p2", 100),
            award("p1", "p2", 100),
            award("p1", "p2", 100),
        ];
        let registry = PersonRegistry::build(&records);

        let p1 = registry.get("p1").unwrap();
        assert_eq!(p1.received, 3);
        assert_eq!(p1.value_received, 300);
        assert_eq!(p1.given, 0);

        let p2 = registry.get("p2").unwrap();
        assert_eq!(p2.given, 3);
        assert_eq!(p2.received, 0);
    }

    #[test]
    fn nominator_identity_keeps_nominator_side_metadata() {
        let records = vec![award("p1", "p2", 0)];
        let registry = PersonRegistry::build(&records);
        let p2 = registry.get("p2").unwrap();
        assert_eq!(p2.dept, "Product");
        assert_eq!(p2.seniority, "Manager");
    }

    #[test]
    fn by_received_sorts_desc_with_stable_ties() {
        let records = vec![
            award("p1", "p9", 0),
            award("p2", "p9", 0),
            award("p2", "p9", 0),
            award("p3", "p9", 0),
        ];
        let registry = PersonRegistry::build(&records);
        let order: Vec<&str> = registry.by_received().iter().map(|p| p.id.as_str()).collect();
        // p2 leads; p1 and p3 tie at 1 and keep sighting order; p9 last with 0
        assert_eq!(order, vec!["p2", "p1", "p3", "p9"]);
    }

    #[test]
    fn empty_input_builds_empty_registry() {
        let registry = PersonRegistry::build(&[]);
        assert!(registry.is_empty());
        assert!(registry.by_received().is_empty());
    }
}
