// 🦁 Animal Entity - identity + fixed per-type attributes + mutable health
//
// One concrete representation for every kind of animal. The kind is a
// closed enumeration (AnimalType) and everything that used to differ per
// kind (species, diet, habitat, sound, locomotion) lives in a static
// profile table keyed by that enumeration.

use crate::error::{Result, ZooError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// IDENTITY NORMALIZATION
// ============================================================================

/// Identity key shared by animals, enclosures and health records.
///
/// Example: "  l-01 " → "L-01"
pub fn normalize_id(id: &str) -> String {
    id.trim().to_uppercase()
}

// ============================================================================
// ANIMAL TYPE + PROFILE TABLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnimalType {
    Lion,
    Dolphin,
    Elephant,
    Penguin,
    Monkey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Locomotion {
    Runs,
    Swims,
}

/// Fixed attributes of an animal type
#[derive(Debug, PartialEq, Eq)]
pub struct AnimalProfile {
    pub species: &'static str,
    pub diet: &'static str,
    pub habitat: &'static str,
    pub sound: &'static str,
    pub locomotion: Locomotion,
    /// Verb used when describing movement ("running", "swinging", ...)
    pub movement_verb: &'static str,
}

static LION: AnimalProfile = AnimalProfile {
    species: "Panthera leo",
    diet: "Carnivore",
    habitat: "Savanna",
    sound: "Roar",
    locomotion: Locomotion::Runs,
    movement_verb: "running",
};

static DOLPHIN: AnimalProfile = AnimalProfile {
    species: "Tursiops truncatus",
    diet: "Carnivore",
    habitat: "Aquatic",
    sound: "Click",
    locomotion: Locomotion::Swims,
    movement_verb: "swimming",
};

static ELEPHANT: AnimalProfile = AnimalProfile {
    species: "Loxodonta africana",
    diet: "Herbivore",
    habitat: "Savanna",
    sound: "Trumpet",
    locomotion: Locomotion::Runs,
    movement_verb: "walking",
};

static PENGUIN: AnimalProfile = AnimalProfile {
    species: "Spheniscus demersus",
    diet: "Carnivore",
    habitat: "Aquatic",
    sound: "Honk",
    locomotion: Locomotion::Swims,
    movement_verb: "swimming",
};

static MONKEY: AnimalProfile = AnimalProfile {
    species: "Macaca mulatta",
    diet: "Omnivore",
    habitat: "Tropical Forest",
    sound: "Chatter",
    locomotion: Locomotion::Runs,
    movement_verb: "swinging",
};

impl AnimalType {
    pub const ALL: [AnimalType; 5] = [
        AnimalType::Lion,
        AnimalType::Dolphin,
        AnimalType::Elephant,
        AnimalType::Penguin,
        AnimalType::Monkey,
    ];

    /// Type tag as persisted and counted ("LION")
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalType::Lion => "LION",
            AnimalType::Dolphin => "DOLPHIN",
            AnimalType::Elephant => "ELEPHANT",
            AnimalType::Penguin => "PENGUIN",
            AnimalType::Monkey => "MONKEY",
        }
    }

    /// Human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            AnimalType::Lion => "Lion",
            AnimalType::Dolphin => "Dolphin",
            AnimalType::Elephant => "Elephant",
            AnimalType::Penguin => "Penguin",
            AnimalType::Monkey => "Monkey",
        }
    }

    pub fn profile(&self) -> &'static AnimalProfile {
        match self {
            AnimalType::Lion => &LION,
            AnimalType::Dolphin => &DOLPHIN,
            AnimalType::Elephant => &ELEPHANT,
            AnimalType::Penguin => &PENGUIN,
            AnimalType::Monkey => &MONKEY,
        }
    }
}

impl FromStr for AnimalType {
    type Err = ZooError;

    /// Case-insensitive, whitespace-trimmed match on the type tag
    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_uppercase();
        AnimalType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| ZooError::InvalidType(s.to_string()))
    }
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// HEALTH STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Healthy,
    Sick,
    Critical,
    Recovering,
}

impl HealthStatus {
    pub const ALL: [HealthStatus; 4] = [
        HealthStatus::Healthy,
        HealthStatus::Sick,
        HealthStatus::Critical,
        HealthStatus::Recovering,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::Sick => "SICK",
            HealthStatus::Critical => "CRITICAL",
            HealthStatus::Recovering => "RECOVERING",
        }
    }

    pub fn needs_attention(&self) -> bool {
        matches!(self, HealthStatus::Sick | HealthStatus::Critical)
    }
}

impl FromStr for HealthStatus {
    type Err = ZooError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_uppercase();
        HealthStatus::ALL
            .iter()
            .copied()
            .find(|h| h.as_str() == token)
            .ok_or_else(|| ZooError::InvalidArgument(format!("Unknown health status: {}", s)))
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ANIMAL ENTITY
// ============================================================================

/// Animal - identity is the normalized `id`, everything but health is fixed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animal {
    id: String,
    name: String,
    age: u32,
    animal_type: AnimalType,
    species: String,
    diet: String,
    habitat_type: String,

    /// Set once at construction
    arrival: DateTime<Utc>,

    health_status: HealthStatus,
}

impl Animal {
    /// Create an animal of a known type with the type's fixed attributes
    pub fn new(animal_type: AnimalType, id: &str, name: &str, age: i64) -> Result<Self> {
        let profile = animal_type.profile();
        Self::with_attributes(
            animal_type,
            id,
            name,
            age,
            profile.species,
            profile.diet,
            profile.habitat,
        )
    }

    /// Fully explicit constructor; validates in field order
    pub fn with_attributes(
        animal_type: AnimalType,
        id: &str,
        name: &str,
        age: i64,
        species: &str,
        diet: &str,
        habitat_type: &str,
    ) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(ZooError::InvalidArgument("ID cannot be blank".to_string()));
        }
        if name.trim().is_empty() {
            return Err(ZooError::InvalidArgument("Name cannot be blank".to_string()));
        }
        if age < 0 {
            return Err(ZooError::InvalidArgument("Age cannot be negative".to_string()));
        }
        let age = u32::try_from(age)
            .map_err(|_| ZooError::InvalidArgument(format!("Age out of range: {}", age)))?;
        if species.trim().is_empty() {
            return Err(ZooError::InvalidArgument("Species cannot be blank".to_string()));
        }
        if diet.trim().is_empty() {
            return Err(ZooError::InvalidArgument("Diet cannot be blank".to_string()));
        }
        if habitat_type.trim().is_empty() {
            return Err(ZooError::InvalidArgument("Habitat type cannot be blank".to_string()));
        }

        Ok(Animal {
            id: id.to_string(),
            name: name.to_string(),
            age,
            animal_type,
            species: species.to_string(),
            diet: diet.to_string(),
            habitat_type: habitat_type.to_string(),
            arrival: Utc::now(),
            health_status: HealthStatus::Healthy,
        })
    }

    /// Builder pattern: start in a given health state (used when restoring)
    pub fn with_health_status(mut self, status: HealthStatus) -> Self {
        self.health_status = status;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Normalized identity key
    pub fn key(&self) -> String {
        normalize_id(&self.id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn animal_type(&self) -> AnimalType {
        self.animal_type
    }

    pub fn type_tag(&self) -> &'static str {
        self.animal_type.as_str()
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn diet(&self) -> &str {
        &self.diet
    }

    pub fn habitat_type(&self) -> &str {
        &self.habitat_type
    }

    pub fn arrival(&self) -> DateTime<Utc> {
        self.arrival
    }

    pub fn health_status(&self) -> HealthStatus {
        self.health_status
    }

    pub(crate) fn set_health_status(&mut self, status: HealthStatus) {
        self.health_status = status;
    }

    pub fn needs_medical_attention(&self) -> bool {
        self.health_status.needs_attention()
    }

    pub fn make_sound(&self) -> &'static str {
        self.animal_type.profile().sound
    }

    pub fn locomotion(&self) -> Locomotion {
        self.animal_type.profile().locomotion
    }

    /// "Leo the lion is running."
    pub fn describe_movement(&self) -> String {
        format!(
            "{} the {} is {}.",
            self.name,
            self.animal_type.display_name().to_lowercase(),
            self.animal_type.profile().movement_verb
        )
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ID: {} | Name: {} | Age: {} | Health: {}",
            self.animal_type, self.id, self.name, self.age, self.health_status
        )
    }
}

// ============================================================================
// FACTORY
// ============================================================================

/// Build an animal from a type tag ("lion", " LION ", ...)
///
/// Fails with `InvalidType` for unknown tags, then with `InvalidArgument`
/// for anything the constructor rejects.
pub fn create_animal(type_tag: &str, id: &str, name: &str, age: i64) -> Result<Animal> {
    let animal_type: AnimalType = type_tag.parse()?;
    Animal::new(animal_type, id, name, age)
}

/// What an animal with the given diet gets at feeding time
pub fn food_for_diet(diet: &str) -> &'static str {
    match diet.to_lowercase().as_str() {
        "carnivore" => "meat",
        "herbivore" => "plants",
        "omnivore" => "mixed food",
        _ => "food",
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("  l-01 "), "L-01");
        assert_eq!(normalize_id("abc"), "ABC");
        assert_eq!(normalize_id("   "), "");
    }

    #[test]
    fn test_create_animal_uses_profile() {
        let lion = create_animal("LION", "L1", "Leo", 5).unwrap();

        assert_eq!(lion.id(), "L1");
        assert_eq!(lion.name(), "Leo");
        assert_eq!(lion.age(), 5);
        assert_eq!(lion.animal_type(), AnimalType::Lion);
        assert_eq!(lion.species(), "Panthera leo");
        assert_eq!(lion.diet(), "Carnivore");
        assert_eq!(lion.habitat_type(), "Savanna");
        assert_eq!(lion.health_status(), HealthStatus::Healthy);
    }

    #[test]
    fn test_create_animal_type_is_case_insensitive_and_trimmed() {
        let monkey = create_animal("  monkey ", "M1", "George", 3).unwrap();
        assert_eq!(monkey.animal_type(), AnimalType::Monkey);
        assert_eq!(monkey.habitat_type(), "Tropical Forest");

        let penguin = create_animal("Penguin", "P1", "Pingu", 2).unwrap();
        assert_eq!(penguin.type_tag(), "PENGUIN");
    }

    #[test]
    fn test_create_animal_unknown_type() {
        let result = create_animal("TIGER", "T1", "Shere Khan", 7);
        assert_eq!(result.unwrap_err(), ZooError::InvalidType("TIGER".to_string()));

        // Type is checked before any attribute
        let result = create_animal("", "", "", -1);
        assert!(matches!(result, Err(ZooError::InvalidType(_))));
    }

    #[test]
    fn test_validation_order() {
        // Blank id is reported even when name and age are also bad
        let err = Animal::new(AnimalType::Lion, "  ", "", -1).unwrap_err();
        assert_eq!(err, ZooError::InvalidArgument("ID cannot be blank".to_string()));

        let err = Animal::new(AnimalType::Lion, "L1", " ", -1).unwrap_err();
        assert_eq!(err, ZooError::InvalidArgument("Name cannot be blank".to_string()));

        let err = Animal::new(AnimalType::Lion, "L1", "Leo", -1).unwrap_err();
        assert_eq!(err, ZooError::InvalidArgument("Age cannot be negative".to_string()));
    }

    #[test]
    fn test_zero_age_is_valid() {
        let cub = Animal::new(AnimalType::Lion, "L2", "Cub", 0).unwrap();
        assert_eq!(cub.age(), 0);
    }

    #[test]
    fn test_with_attributes_rejects_blank_fixed_attributes() {
        let err = Animal::with_attributes(AnimalType::Lion, "L1", "Leo", 4, "", "Carnivore", "Savanna")
            .unwrap_err();
        assert_eq!(err, ZooError::InvalidArgument("Species cannot be blank".to_string()));

        let err = Animal::with_attributes(AnimalType::Lion, "L1", "Leo", 4, "Panthera leo", " ", "Savanna")
            .unwrap_err();
        assert_eq!(err, ZooError::InvalidArgument("Diet cannot be blank".to_string()));

        let err = Animal::with_attributes(AnimalType::Lion, "L1", "Leo", 4, "Panthera leo", "Carnivore", "")
            .unwrap_err();
        assert_eq!(err, ZooError::InvalidArgument("Habitat type cannot be blank".to_string()));
    }

    #[test]
    fn test_arrival_is_set_at_construction() {
        let before = Utc::now();
        let dolphin = create_animal("DOLPHIN", "D1", "Flipper", 10).unwrap();
        let after = Utc::now();

        assert!(dolphin.arrival() >= before - Duration::seconds(1));
        assert!(dolphin.arrival() <= after);
    }

    #[test]
    fn test_health_status_parsing() {
        assert_eq!("SICK".parse::<HealthStatus>().unwrap(), HealthStatus::Sick);
        assert_eq!(" recovering ".parse::<HealthStatus>().unwrap(), HealthStatus::Recovering);
        assert!("DEAD".parse::<HealthStatus>().is_err());
    }

    #[test]
    fn test_needs_medical_attention() {
        let animal = create_animal("ELEPHANT", "E1", "Dumbo", 12).unwrap();
        assert!(!animal.needs_medical_attention());

        assert!(animal.clone().with_health_status(HealthStatus::Sick).needs_medical_attention());
        assert!(animal.clone().with_health_status(HealthStatus::Critical).needs_medical_attention());
        assert!(!animal.with_health_status(HealthStatus::Recovering).needs_medical_attention());
    }

    #[test]
    fn test_behaviour_table() {
        let elephant = create_animal("ELEPHANT", "E1", "Dumbo", 12).unwrap();
        assert_eq!(elephant.make_sound(), "Trumpet");
        assert_eq!(elephant.locomotion(), Locomotion::Runs);
        assert_eq!(elephant.describe_movement(), "Dumbo the elephant is walking.");

        let penguin = create_animal("PENGUIN", "P1", "Pingu", 2).unwrap();
        assert_eq!(penguin.make_sound(), "Honk");
        assert_eq!(penguin.locomotion(), Locomotion::Swims);
        assert_eq!(penguin.describe_movement(), "Pingu the penguin is swimming.");
    }

    #[test]
    fn test_every_type_round_trips_through_its_tag() {
        for animal_type in AnimalType::ALL {
            assert_eq!(animal_type.as_str().parse::<AnimalType>().unwrap(), animal_type);
            assert!(!animal_type.profile().species.is_empty());
        }
    }

    #[test]
    fn test_food_for_diet() {
        assert_eq!(food_for_diet("Carnivore"), "meat");
        assert_eq!(food_for_diet("HERBIVORE"), "plants");
        assert_eq!(food_for_diet("omnivore"), "mixed food");
        assert_eq!(food_for_diet("Insectivore"), "food");
    }

    #[test]
    fn test_display() {
        let lion = create_animal("LION", "L1", "Leo", 5).unwrap();
        assert_eq!(lion.to_string(), "[LION] ID: L1 | Name: Leo | Age: 5 | Health: HEALTHY");
    }
}
