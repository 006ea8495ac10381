// 🦓 Zoo Registry - the owning index of animals, enclosures and health records
//
// Identity: every key is `normalize_id(..)` (trim + uppercase).
// Invariants:
// - an id is in `animals` iff it is in `health_records`
// - enclosure members are always animals currently in `animals`
// - enclosures keep insertion order; auto-placement picks the first fit

use crate::entities::animal::{food_for_diet, normalize_id, Animal, HealthStatus};
use crate::entities::enclosure::Enclosure;
use crate::entities::health_record::HealthRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// STATISTICS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnclosureSummary {
    pub id: String,
    pub habitat_type: String,
    pub occupancy: usize,
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZooStatistics {
    pub total_animals: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_habitat: BTreeMap<String, usize>,
    pub enclosures: Vec<EnclosureSummary>,
    pub needing_attention: usize,
}

// ============================================================================
// ZOO
// ============================================================================

#[derive(Debug, Clone)]
pub struct Zoo {
    animals: HashMap<String, Animal>,
    enclosures: Vec<Enclosure>,
    health_records: HashMap<String, HealthRecord>,
}

impl Zoo {
    /// Create a zoo with the three default enclosures
    pub fn new() -> Self {
        let mut zoo = Zoo::empty();
        zoo.register_default_enclosures();
        zoo
    }

    /// Create a zoo with no enclosures at all
    pub fn empty() -> Self {
        Zoo {
            animals: HashMap::new(),
            enclosures: Vec::new(),
            health_records: HashMap::new(),
        }
    }

    fn register_default_enclosures(&mut self) {
        let defaults = [
            ("SAVANNA_1", "Savanna", 5),
            ("AQUATIC_1", "Aquatic", 10),
            ("TROPICAL_1", "Tropical Forest", 8),
        ];

        for (id, habitat, capacity) in defaults {
            if let Ok(enclosure) = Enclosure::new(id, habitat, capacity) {
                self.add_enclosure(enclosure);
            }
        }
    }

    // ========================================================================
    // ANIMALS
    // ========================================================================

    /// Add an animal and try to place it in an enclosure.
    ///
    /// Returns false (zoo untouched) when the normalized id is already taken.
    /// Placement is best-effort: an animal with no fitting enclosure is
    /// still added.
    pub fn add_animal(&mut self, animal: Animal) -> bool {
        let key = animal.key();
        if self.animals.contains_key(&key) {
            tracing::debug!(id = %key, "rejected duplicate animal id");
            return false;
        }

        self.health_records.insert(key.clone(), HealthRecord::new(&key));
        self.animals.insert(key.clone(), animal);

        match self.assign_to_enclosure(&key) {
            Some(enclosure_id) => {
                tracing::debug!(id = %key, enclosure = %enclosure_id, "animal placed")
            }
            None => tracing::debug!(id = %key, "no enclosure available, animal left unplaced"),
        }

        true
    }

    /// First enclosure (insertion order) with matching habitat and room wins
    fn assign_to_enclosure(&mut self, key: &str) -> Option<String> {
        let animal = self.animals.get(key)?;
        let enclosure = self
            .enclosures
            .iter_mut()
            .find(|e| e.accepts(animal) && !e.is_full())?;

        if enclosure.add(animal) {
            Some(enclosure.id().to_string())
        } else {
            None
        }
    }

    /// Remove an animal everywhere; None when the id is unknown
    pub fn remove_by_id(&mut self, id: &str) -> Option<Animal> {
        let key = normalize_id(id);
        let animal = self.animals.remove(&key)?;

        for enclosure in self.enclosures.iter_mut() {
            enclosure.remove_key(&key);
        }
        self.health_records.remove(&key);

        Some(animal)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Animal> {
        self.animals.get(&normalize_id(id))
    }

    /// All animals whose name matches case-insensitively (trimmed input).
    /// Order is unspecified.
    pub fn get_by_name(&self, name: &str) -> Vec<&Animal> {
        let wanted = name.trim().to_lowercase();
        self.animals
            .values()
            .filter(|a| a.name().to_lowercase() == wanted)
            .collect()
    }

    /// All animals ordered by type tag, ties by normalized id
    pub fn list_sorted_by_type(&self) -> Vec<&Animal> {
        let mut animals: Vec<(&String, &Animal)> = self.animals.iter().collect();
        animals.sort_by(|(ka, a), (kb, b)| a.type_tag().cmp(b.type_tag()).then_with(|| ka.cmp(kb)));
        animals.into_iter().map(|(_, a)| a).collect()
    }

    pub fn count_by_type(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for animal in self.animals.values() {
            *counts.entry(animal.type_tag().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn count_by_habitat(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for animal in self.animals.values() {
            *counts.entry(animal.habitat_type().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Animals that are SICK or CRITICAL
    pub fn animals_needing_attention(&self) -> Vec<&Animal> {
        self.animals
            .values()
            .filter(|a| a.needs_medical_attention())
            .collect()
    }

    /// The only way to change an animal after it has been added
    pub fn update_health_status(&mut self, id: &str, status: HealthStatus) -> bool {
        match self.animals.get_mut(&normalize_id(id)) {
            Some(animal) => {
                animal.set_health_status(status);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    // ========================================================================
    // ENCLOSURES
    // ========================================================================

    /// Add an enclosure; false when its normalized id is already taken.
    ///
    /// Members that are unknown to this zoo, or already housed elsewhere,
    /// are dropped from the incoming enclosure.
    pub fn add_enclosure(&mut self, mut enclosure: Enclosure) -> bool {
        let key = enclosure.key();
        if self.enclosures.iter().any(|e| e.key() == key) {
            tracing::debug!(id = %key, "rejected duplicate enclosure id");
            return false;
        }

        let foreign: Vec<String> = enclosure
            .animal_ids()
            .iter()
            .filter(|k| {
                !self.animals.contains_key(k.as_str())
                    || self.enclosures.iter().any(|e| e.contains_key(k))
            })
            .cloned()
            .collect();
        for member in foreign {
            enclosure.remove_key(&member);
        }

        self.enclosures.push(enclosure);
        true
    }

    pub fn get_enclosure(&self, id: &str) -> Option<&Enclosure> {
        let key = normalize_id(id);
        self.enclosures.iter().find(|e| e.key() == key)
    }

    /// Enclosures in insertion order
    pub fn enclosures(&self) -> &[Enclosure] {
        &self.enclosures
    }

    /// Where does this animal live?
    pub fn enclosure_of(&self, animal_id: &str) -> Option<&Enclosure> {
        let key = normalize_id(animal_id);
        self.enclosures.iter().find(|e| e.contains_key(&key))
    }

    /// Animals housed in an enclosure, in arrival order
    pub fn enclosure_members(&self, enclosure_id: &str) -> Vec<&Animal> {
        self.get_enclosure(enclosure_id)
            .map(|e| {
                e.animal_ids()
                    .iter()
                    .filter_map(|k| self.animals.get(k))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ========================================================================
    // HEALTH RECORDS
    // ========================================================================

    pub fn health_record(&self, animal_id: &str) -> Option<&HealthRecord> {
        self.health_records.get(&normalize_id(animal_id))
    }

    /// No-op when the animal is unknown
    pub fn add_health_entry(&mut self, animal_id: &str, description: &str, veterinarian: &str, treatment: &str) {
        if let Some(record) = self.health_records.get_mut(&normalize_id(animal_id)) {
            record.add_entry(description, veterinarian, treatment);
        }
    }

    // ========================================================================
    // REPORTS
    // ========================================================================

    pub fn statistics(&self) -> ZooStatistics {
        ZooStatistics {
            total_animals: self.animals.len(),
            by_type: self.count_by_type(),
            by_habitat: self.count_by_habitat(),
            enclosures: self
                .enclosures
                .iter()
                .map(|e| EnclosureSummary {
                    id: e.id().to_string(),
                    habitat_type: e.habitat_type().to_string(),
                    occupancy: e.occupancy(),
                    capacity: e.capacity(),
                })
                .collect(),
            needing_attention: self.animals.values().filter(|a| a.needs_medical_attention()).count(),
        }
    }

    /// One line per animal, sorted by type: "Leo the lion is eating meat."
    pub fn feeding_report(&self) -> Vec<String> {
        self.list_sorted_by_type()
            .into_iter()
            .map(|a| {
                format!(
                    "{} the {} is eating {}.",
                    a.name(),
                    a.animal_type().display_name().to_lowercase(),
                    food_for_diet(a.diet())
                )
            })
            .collect()
    }
}

impl Default for Zoo {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
