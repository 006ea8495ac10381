// 💾 Zoo Storage - flat-file persistence for the registry
//
// One record per line, comma separated, no header, no quoting:
//
//   TYPE,ID,NAME,AGE,SPECIES,DIET,HABITAT,HEALTHSTATUS   (current animal)
//   TYPE,ID,NAME,AGE                                     (legacy animal)
//   ENCLOSURE,ID,HABITATTYPE,CAPACITY                    (enclosure)
//
// Field count is the only format discriminator. Embedded commas are not
// escaped, so a name containing one will not survive a round trip.
//
// Loading never aborts on a bad line: the line is skipped, a warning is
// logged and the line is listed in the LoadReport.

use crate::entities::animal::{create_animal, Animal, HealthStatus};
use crate::entities::enclosure::Enclosure;
use crate::error::ZooError;
use crate::zoo::Zoo;
use anyhow::{Context, Result};
use csv::{ByteRecord, QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use thiserror::Error;

const DELIMITER: u8 = b',';
const ENCLOSURE_TAG: &str = "ENCLOSURE";

// ============================================================================
// RECORD PARSING
// ============================================================================

/// Why a persisted line could not be turned into a record
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("unexpected field count: {0}")]
    FieldCount(usize),

    #[error("{field} is not an integer: '{value}'")]
    BadInteger { field: &'static str, value: String },

    #[error("unknown health status: '{0}'")]
    UnknownHealthStatus(String),

    #[error(transparent)]
    Construction(#[from] ZooError),

    #[error("unreadable line: {0}")]
    Read(String),
}

/// A successfully parsed line
#[derive(Debug)]
pub enum Record {
    Animal(Animal),
    Enclosure(Enclosure),
}

fn parse_int(field: &'static str, value: &str) -> Result<i64, RecordError> {
    value.parse::<i64>().map_err(|_| RecordError::BadInteger {
        field,
        value: value.to_string(),
    })
}

/// Turn the fields of one line into a record.
///
/// Species/diet/habitat in the current format are informational: the
/// type's fixed profile is authoritative.
pub fn parse_record(fields: &[&str]) -> Result<Record, RecordError> {
    match fields {
        [tag, id, habitat, capacity] if *tag == ENCLOSURE_TAG => {
            let capacity = parse_int("capacity", capacity)?;
            Ok(Record::Enclosure(Enclosure::new(id, habitat, capacity)?))
        }
        [type_tag, id, name, age, _species, _diet, _habitat, health] => {
            let age = parse_int("age", age)?;
            let animal = create_animal(type_tag, id, name, age)?;
            let status: HealthStatus = health
                .parse()
                .map_err(|_| RecordError::UnknownHealthStatus(health.to_string()))?;
            Ok(Record::Animal(animal.with_health_status(status)))
        }
        [type_tag, id, name, age] => {
            // Legacy format: no health column, starts HEALTHY
            let age = parse_int("age", age)?;
            Ok(Record::Animal(create_animal(type_tag, id, name, age)?))
        }
        _ => Err(RecordError::FieldCount(fields.len())),
    }
}

fn animal_fields(animal: &Animal) -> [String; 8] {
    [
        animal.type_tag().to_string(),
        animal.id().to_string(),
        animal.name().to_string(),
        animal.age().to_string(),
        animal.species().to_string(),
        animal.diet().to_string(),
        animal.habitat_type().to_string(),
        animal.health_status().to_string(),
    ]
}

fn enclosure_fields(enclosure: &Enclosure) -> [String; 4] {
    [
        ENCLOSURE_TAG.to_string(),
        enclosure.id().to_string(),
        enclosure.habitat_type().to_string(),
        enclosure.capacity().to_string(),
    ]
}

// ============================================================================
// LOAD REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub line_number: u64,
    pub content: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub animals_loaded: usize,
    pub enclosures_loaded: usize,
    /// Well-formed records whose id was already taken
    pub duplicates_ignored: usize,
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    pub fn summary(&self) -> String {
        format!(
            "{} animals, {} enclosures loaded ({} duplicates ignored, {} lines skipped)",
            self.animals_loaded,
            self.enclosures_loaded,
            self.duplicates_ignored,
            self.skipped.len()
        )
    }

    fn skip(&mut self, line_number: u64, content: String, reason: String) {
        tracing::warn!(line = line_number, reason = %reason, "Skipping malformed entry: {}", content);
        self.skipped.push(SkippedLine {
            line_number,
            content,
            reason,
        });
    }
}

fn decode_fields(record: &ByteRecord) -> Result<Vec<&str>, RecordError> {
    record
        .iter()
        .map(|field| std::str::from_utf8(field).map_err(|err| RecordError::Read(err.to_string())))
        .collect()
}

fn lossy_line(record: &ByteRecord) -> String {
    record
        .iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// ZOO STORAGE
// ============================================================================

pub struct ZooStorage;

impl ZooStorage {
    pub fn new() -> Self {
        ZooStorage
    }

    /// Rewrite the whole file: animals (sorted by type) then enclosures
    pub fn save(&self, path: &Path, zoo: &Zoo) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        self.write_records(file, zoo)
            .with_context(|| format!("Failed to write zoo data to {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            animals = zoo.len(),
            enclosures = zoo.enclosures().len(),
            "zoo saved"
        );
        Ok(())
    }

    pub fn write_records<W: Write>(&self, writer: W, zoo: &Zoo) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(writer);

        for animal in zoo.list_sorted_by_type() {
            writer.write_record(animal_fields(animal))?;
        }
        for enclosure in zoo.enclosures() {
            writer.write_record(enclosure_fields(enclosure))?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Merge the file into `zoo`. A missing file is an empty load.
    pub fn load(&self, path: &Path, zoo: &mut Zoo) -> Result<LoadReport> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no data file, starting empty");
                return Ok(LoadReport::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to open file: {}", path.display()))
            }
        };

        let report = self
            .read_records(file, zoo)
            .with_context(|| format!("Failed to read zoo data from {}", path.display()))?;

        tracing::info!(path = %path.display(), "{}", report.summary());
        Ok(report)
    }

    /// Records are merged into a copy of `zoo`; the copy replaces `zoo`
    /// only when the whole input was read, so a read error changes nothing.
    pub fn read_records<R: Read>(&self, reader: R, zoo: &mut Zoo) -> Result<LoadReport> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(DELIMITER)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut staged = zoo.clone();
        let mut report = LoadReport::default();

        for result in reader.byte_records() {
            let record = match result {
                Ok(record) => record,
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => {
                    let line = err.position().map(|p| p.line()).unwrap_or(0);
                    report.skip(line, String::new(), RecordError::Read(err.to_string()).to_string());
                    continue;
                }
            };

            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let fields = match decode_fields(&record) {
                Ok(fields) => fields,
                Err(err) => {
                    report.skip(line, lossy_line(&record), err.to_string());
                    continue;
                }
            };

            match parse_record(&fields) {
                Ok(Record::Animal(animal)) => {
                    if staged.add_animal(animal) {
                        report.animals_loaded += 1;
                    } else {
                        report.duplicates_ignored += 1;
                    }
                }
                Ok(Record::Enclosure(enclosure)) => {
                    if staged.add_enclosure(enclosure) {
                        report.enclosures_loaded += 1;
                    } else {
                        report.duplicates_ignored += 1;
                    }
                }
                Err(err) => report.skip(line, fields.join(","), err.to_string()),
            }
        }

        *zoo = staged;
        Ok(report)
    }
}

impl Default for ZooStorage {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn populated_zoo() -> Zoo {
        let mut zoo = Zoo::new();
        zoo.add_animal(create_animal("PENGUIN", "P1", "Pingu", 2).unwrap());
        zoo.add_animal(create_animal("LION", "L1", "Leo", 5).unwrap());
        zoo.add_animal(create_animal("DOLPHIN", "D1", "Flipper", 10).unwrap());
        zoo.update_health_status("D1", HealthStatus::Sick);
        zoo.add_enclosure(Enclosure::new("REEF_2", "Aquatic", 3).unwrap());
        zoo
    }

    fn load_str(content: &str) -> (Zoo, LoadReport) {
        let mut zoo = Zoo::new();
        let report = ZooStorage::new().read_records(content.as_bytes(), &mut zoo).unwrap();
        (zoo, report)
    }

    #[test]
    fn test_write_order() {
        let mut buffer = Vec::new();
        ZooStorage::new().write_records(&mut buffer, &populated_zoo()).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(
            text,
            "DOLPHIN,D1,Flipper,10,Tursiops truncatus,Carnivore,Aquatic,SICK\n\
             LION,L1,Leo,5,Panthera leo,Carnivore,Savanna,HEALTHY\n\
             PENGUIN,P1,Pingu,2,Spheniscus demersus,Carnivore,Aquatic,HEALTHY\n\
             ENCLOSURE,SAVANNA_1,Savanna,5\n\
             ENCLOSURE,AQUATIC_1,Aquatic,10\n\
             ENCLOSURE,TROPICAL_1,Tropical Forest,8\n\
             ENCLOSURE,REEF_2,Aquatic,3\n"
        );
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zoo_data.csv");
        let storage = ZooStorage::new();
        let original = populated_zoo();

        storage.save(&path, &original).unwrap();

        let mut restored = Zoo::new();
        let report = storage.load(&path, &mut restored).unwrap();

        assert!(report.skipped.is_empty());
        assert_eq!(report.animals_loaded, 3);
        assert_eq!(report.enclosures_loaded, 1); // Defaults already exist
        assert_eq!(report.duplicates_ignored, 3);

        for animal in original.list_sorted_by_type() {
            let copy = restored.get_by_id(animal.id()).unwrap();
            assert_eq!(copy.animal_type(), animal.animal_type());
            assert_eq!(copy.name(), animal.name());
            assert_eq!(copy.age(), animal.age());
            assert_eq!(copy.health_status(), animal.health_status());
        }
        assert_eq!(restored.len(), original.len());

        let describe = |zoo: &Zoo| -> Vec<(String, String, usize)> {
            zoo.enclosures()
                .iter()
                .map(|e| (e.id().to_string(), e.habitat_type().to_string(), e.capacity()))
                .collect()
        };
        assert_eq!(describe(&restored), describe(&original));
    }

    #[test]
    fn test_save_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zoo_data.csv");
        let storage = ZooStorage::new();

        let mut zoo = populated_zoo();
        storage.save(&path, &zoo).unwrap();
        zoo.remove_by_id("L1");
        zoo.remove_by_id("P1");
        storage.save(&path, &zoo).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 5);
        assert!(!content.contains("Leo"));
    }

    #[test]
    fn test_save_to_unwritable_path_fails() {
        let dir = tempdir().unwrap();
        let result = ZooStorage::new().save(dir.path(), &Zoo::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_empty_load() {
        let dir = tempdir().unwrap();
        let mut zoo = Zoo::new();

        let report = ZooStorage::new()
            .load(&dir.path().join("does_not_exist.csv"), &mut zoo)
            .unwrap();

        assert_eq!(report, LoadReport::default());
        assert!(zoo.is_empty());
        assert_eq!(zoo.enclosures().len(), 3);
    }

    #[test]
    fn test_garbage_line_is_skipped() {
        let (zoo, report) = load_str(
            "LION,L1,Leo,5,Panthera leo,Carnivore,Savanna,HEALTHY\n\
             ENCLOSURE,SAVANNA_9,Savanna,4\n\
             LION,X\n",
        );

        assert_eq!(zoo.len(), 1);
        assert!(zoo.get_enclosure("SAVANNA_9").is_some());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].content, "LION,X");
        assert_eq!(report.skipped[0].line_number, 3);
        assert_eq!(report.skipped[0].reason, "unexpected field count: 2");
    }

    #[test]
    fn test_legacy_record_defaults() {
        let (zoo, report) = load_str("monkey,M1,George,3\n");

        assert_eq!(report.animals_loaded, 1);
        let george = zoo.get_by_id("M1").unwrap();
        assert_eq!(george.health_status(), HealthStatus::Healthy);
        assert_eq!(george.species(), "Macaca mulatta");
        assert_eq!(george.habitat_type(), "Tropical Forest");
        assert_eq!(zoo.enclosure_of("M1").unwrap().id(), "TROPICAL_1");
    }

    #[test]
    fn test_bad_fields_are_skipped_individually() {
        let (zoo, report) = load_str(
            "LION,L1,Leo,five\n\
             TIGER,T1,Shere Khan,7\n\
             LION,L2,Nala,4,Panthera leo,Carnivore,Savanna,ASLEEP\n\
             LION,L3,Simba,-2\n\
             ENCLOSURE,BAD,Savanna,0\n\
             ENCLOSURE,BAD2,Savanna,lots\n\
             ELEPHANT,E1,Dumbo,12\n",
        );

        assert_eq!(zoo.len(), 1);
        assert!(zoo.get_by_id("E1").is_some());

        let reasons: Vec<&str> = report.skipped.iter().map(|s| s.reason.as_str()).collect();
        assert_eq!(
            reasons,
            vec![
                "age is not an integer: 'five'",
                "Unknown animal type: TIGER",
                "unknown health status: 'ASLEEP'",
                "Invalid argument: Age cannot be negative",
                "Invalid argument: Capacity must be positive",
                "capacity is not an integer: 'lots'",
            ]
        );
    }

    #[test]
    fn test_health_token_is_trimmed_and_case_insensitive() {
        let (zoo, report) = load_str(
            "LION,L1,Leo,5,Panthera leo,Carnivore,Savanna, sick \n\
             PENGUIN,P1,Pingu,2,Spheniscus demersus,Carnivore,Aquatic,critical\n",
        );

        assert!(report.skipped.is_empty());
        assert_eq!(zoo.get_by_id("L1").unwrap().health_status(), HealthStatus::Sick);
        assert_eq!(zoo.get_by_id("P1").unwrap().health_status(), HealthStatus::Critical);
    }

    #[test]
    fn test_invalid_utf8_line_keeps_its_content() {
        let mut zoo = Zoo::new();
        let input: &[u8] = b"LION,L1,Leo,5\nLION,L2,\xff\xfe,5\nLION,L3,Nala,4\n";
        let report = ZooStorage::new().read_records(input, &mut zoo).unwrap();

        assert_eq!(zoo.len(), 2);
        assert!(zoo.get_by_id("L2").is_none());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_number, 2);
        assert_eq!(report.skipped[0].content, "LION,L2,\u{FFFD}\u{FFFD},5");
        assert!(report.skipped[0].reason.starts_with("unreadable line: invalid utf-8"));
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::Other, "device went away"))
        }
    }

    #[test]
    fn test_read_error_leaves_zoo_untouched() {
        let mut zoo = Zoo::new();
        zoo.add_animal(create_animal("MONKEY", "M1", "George", 3).unwrap());

        let input = b"LION,L1,Leo,5\nENCLOSURE,POND,Aquatic,2\n".as_slice().chain(BrokenReader);
        let result = ZooStorage::new().read_records(input, &mut zoo);

        assert!(result.is_err());
        assert_eq!(zoo.len(), 1);
        assert!(zoo.get_by_id("L1").is_none());
        assert!(zoo.get_enclosure("POND").is_none());
        assert_eq!(zoo.enclosures().len(), 3);
    }

    #[test]
    fn test_duplicates_in_file_are_dropped_silently() {
        let (zoo, report) = load_str(
            "ENCLOSURE,POND,Aquatic,2\n\
             ENCLOSURE,pond,Aquatic,7\n\
             DOLPHIN,D1,Flipper,10\n\
             DOLPHIN,d1,Flipper Two,3\n",
        );

        assert!(report.skipped.is_empty());
        assert_eq!(report.duplicates_ignored, 2);
        assert_eq!(zoo.get_enclosure("POND").unwrap().capacity(), 2);
        assert_eq!(zoo.get_by_id("D1").unwrap().name(), "Flipper");
    }

    #[test]
    fn test_embedded_delimiter_is_not_escaped() {
        let mut zoo = Zoo::empty();
        zoo.add_animal(create_animal("LION", "L1", "Leo, Jr", 1).unwrap());

        let mut buffer = Vec::new();
        ZooStorage::new().write_records(&mut buffer, &zoo).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "LION,L1,Leo, Jr,1,Panthera leo,Carnivore,Savanna,HEALTHY\n");

        // Nine fields on the way back: the line is skipped
        let (restored, report) = load_str(&text);
        assert!(restored.get_by_id("L1").is_none());
        assert_eq!(report.skipped[0].reason, "unexpected field count: 9");
    }

    #[test]
    fn test_enclosure_tag_with_wrong_arity() {
        // Eight fields starting with ENCLOSURE is read as an animal and fails on the type
        let result = parse_record(&["ENCLOSURE", "E", "x", "1", "a", "b", "c", "HEALTHY"]);
        assert!(matches!(result, Err(RecordError::Construction(ZooError::InvalidType(_)))));
    }

    #[test]
    fn test_load_report_summary() {
        let (_, report) = load_str("LION,L1,Leo,5\nnonsense\n");
        assert_eq!(
            report.summary(),
            "1 animals, 0 enclosures loaded (0 duplicates ignored, 1 lines skipped)"
        );
    }
}
