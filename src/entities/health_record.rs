// 🩺 Health Record - append-only medical history of one animal

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

/// One dated care event. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicalEntry {
    pub date: NaiveDate,
    pub description: String,
    pub veterinarian: String,
    pub treatment: String,
}

impl fmt::Display for MedicalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - Dr. {}: {}",
            self.date, self.description, self.veterinarian, self.treatment
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthRecord {
    animal_id: String,
    entries: Vec<MedicalEntry>,
}

impl HealthRecord {
    pub fn new(animal_id: &str) -> Self {
        HealthRecord {
            animal_id: animal_id.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn animal_id(&self) -> &str {
        &self.animal_id
    }

    pub fn entries(&self) -> &[MedicalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry dated today
    pub fn add_entry(&mut self, description: &str, veterinarian: &str, treatment: &str) {
        let today = Utc::now().date_naive();
        self.push_dated(today, description, veterinarian, treatment);
    }

    fn push_dated(&mut self, date: NaiveDate, description: &str, veterinarian: &str, treatment: &str) {
        self.entries.push(MedicalEntry {
            date,
            description: description.to_string(),
            veterinarian: veterinarian.to_string(),
            treatment: treatment.to_string(),
        });
    }

    /// Entries dated strictly after (today - days), in insertion order.
    /// The returned Vec is a copy; later appends do not show up in it.
    pub fn recent_entries(&self, days: i64) -> Vec<MedicalEntry> {
        self.recent_entries_as_of(Utc::now().date_naive(), days)
    }

    pub fn recent_entries_as_of(&self, today: NaiveDate, days: i64) -> Vec<MedicalEntry> {
        let cutoff = Duration::try_days(days).and_then(|span| today.checked_sub_signed(span));

        self.entries
            .iter()
            .filter(|entry| match cutoff {
                Some(cutoff) => entry.date > cutoff,
                None => true,
            })
            .cloned()
            .collect()
    }
}

impl fmt::Display for HealthRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HealthRecord{{animalId='{}', entries={}}}",
            self.animal_id,
            self.entries.len()
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
