// ⚠️ Error taxonomy for the zoo registry
//
// Construction failures are fatal to the attempted construction.
// "Not found" is never an error here: lookups return Option, duplicate
// inserts return false.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZooError {
    /// Blank identifier/name, negative age, blank fixed attribute, bad capacity
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Type tag not present in the closed animal type enumeration
    #[error("Unknown animal type: {0}")]
    InvalidType(String),
}

pub type Result<T> = std::result::Result<T, ZooError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ZooError::InvalidArgument("Age cannot be negative".to_string());
        assert_eq!(err.to_string(), "Invalid argument: Age cannot be negative");

        let err = ZooError::InvalidType("TIGER".to_string());
        assert_eq!(err.to_string(), "Unknown animal type: TIGER");
    }
}
