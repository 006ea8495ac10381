// 🏞️ Enclosure - capacity-bounded, single-habitat group of animals
//
// Members are held by identity key, never by ownership: the Zoo owns
// every Animal, an Enclosure only remembers which ones live in it.

use crate::entities::animal::{normalize_id, Animal};
use crate::error::{Result, ZooError};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enclosure {
    id: String,
    habitat_type: String,
    capacity: usize,

    /// Normalized animal ids, insertion order
    members: Vec<String>,
}

impl Enclosure {
    pub fn new(id: &str, habitat_type: &str, capacity: i64) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(ZooError::InvalidArgument("Enclosure ID cannot be blank".to_string()));
        }
        if habitat_type.trim().is_empty() {
            return Err(ZooError::InvalidArgument("Habitat type cannot be blank".to_string()));
        }
        if capacity <= 0 {
            return Err(ZooError::InvalidArgument("Capacity must be positive".to_string()));
        }
        let capacity = usize::try_from(capacity)
            .map_err(|_| ZooError::InvalidArgument(format!("Capacity out of range: {}", capacity)))?;

        Ok(Enclosure {
            id: id.to_string(),
            habitat_type: habitat_type.to_string(),
            capacity,
            members: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> String {
        normalize_id(&self.id)
    }

    pub fn habitat_type(&self) -> &str {
        &self.habitat_type
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn occupancy(&self) -> usize {
        self.members.len()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    /// Normalized ids of the animals living here, in arrival order
    pub fn animal_ids(&self) -> &[String] {
        &self.members
    }

    /// Does this enclosure accept animals of this habitat at all?
    pub fn accepts(&self, animal: &Animal) -> bool {
        animal.habitat_type() == self.habitat_type
    }

    /// Add an animal; false (and no change) on habitat mismatch or when full
    pub fn add(&mut self, animal: &Animal) -> bool {
        if !self.accepts(animal) || self.is_full() {
            return false;
        }
        self.members.push(animal.key());
        true
    }

    pub fn remove(&mut self, animal: &Animal) -> bool {
        self.remove_key(&animal.key())
    }

    pub(crate) fn remove_key(&mut self, key: &str) -> bool {
        match self.members.iter().position(|m| m == key) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, animal: &Animal) -> bool {
        self.contains_key(&animal.key())
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.members.iter().any(|m| m == key)
    }
}

impl fmt::Display for Enclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Enclosure{{id='{}', habitat='{}', occupancy={}/{}}}",
            self.id,
            self.habitat_type,
            self.occupancy(),
            self.capacity
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::animal::create_animal;

    fn lion(id: &str) -> Animal {
        create_animal("LION", id, "Leo", 4).unwrap()
    }

    #[test]
    fn test_enclosure_creation() {
        let enclosure = Enclosure::new("SAVANNA_2", "Savanna", 3).unwrap();

        assert_eq!(enclosure.id(), "SAVANNA_2");
        assert_eq!(enclosure.habitat_type(), "Savanna");
        assert_eq!(enclosure.capacity(), 3);
        assert_eq!(enclosure.occupancy(), 0);
        assert!(!enclosure.is_full());
    }

    #[test]
    fn test_enclosure_validation() {
        assert!(matches!(Enclosure::new(" ", "Savanna", 3), Err(ZooError::InvalidArgument(_))));
        assert!(matches!(Enclosure::new("E1", "", 3), Err(ZooError::InvalidArgument(_))));
        assert!(matches!(Enclosure::new("E1", "Savanna", 0), Err(ZooError::InvalidArgument(_))));
        assert!(matches!(Enclosure::new("E1", "Savanna", -4), Err(ZooError::InvalidArgument(_))));
    }

    #[test]
    fn test_add_rejects_habitat_mismatch() {
        let mut pool = Enclosure::new("POOL", "Aquatic", 2).unwrap();

        assert!(!pool.add(&lion("L1")));
        assert_eq!(pool.occupancy(), 0);

        let dolphin = create_animal("DOLPHIN", "D1", "Flipper", 8).unwrap();
        assert!(pool.add(&dolphin));
        assert!(pool.contains(&dolphin));
    }

    #[test]
    fn test_add_respects_capacity() {
        let mut enclosure = Enclosure::new("SMALL", "Savanna", 2).unwrap();

        assert!(enclosure.add(&lion("L1")));
        assert!(enclosure.add(&lion("L2")));
        assert!(enclosure.is_full());

        let third = lion("L3");
        assert!(!enclosure.add(&third));
        assert!(!enclosure.contains(&third));
        assert_eq!(enclosure.occupancy(), 2);
    }

    #[test]
    fn test_remove_by_identity() {
        let mut enclosure = Enclosure::new("SAVANNA_2", "Savanna", 5).unwrap();
        let first = lion("L1");
        let second = lion("L2"); // Same name, different identity

        enclosure.add(&first);
        enclosure.add(&second);

        assert!(enclosure.remove(&first));
        assert!(!enclosure.contains(&first));
        assert!(enclosure.contains(&second));

        // Second removal is a no-op
        assert!(!enclosure.remove(&first));
        assert_eq!(enclosure.animal_ids(), &["L2".to_string()]);
    }

    #[test]
    fn test_display() {
        let mut enclosure = Enclosure::new("SAVANNA_1", "Savanna", 5).unwrap();
        enclosure.add(&lion("L1"));
        assert_eq!(
            enclosure.to_string(),
            "Enclosure{id='SAVANNA_1', habitat='Savanna', occupancy=1/5}"
        );
    }
}
