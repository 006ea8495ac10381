// Entity Models
//
// Each entity has:
// - Identity keyed by `normalize_id` (trim + uppercase)
// - Values fixed at construction (health status being the one exception)
// - No ownership of other entities: enclosures and health records point
//   at animals by identity, the Zoo owns everything

pub mod animal;
pub mod enclosure;
pub mod health_record;

pub use animal::{
    create_animal, food_for_diet, normalize_id, Animal, AnimalProfile, AnimalType, HealthStatus,
    Locomotion,
};
pub use enclosure::Enclosure;
pub use health_record::{HealthRecord, MedicalEntry};
