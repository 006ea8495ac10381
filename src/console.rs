// 🖥️ Console front end - numbered menu over the Zoo and its storage
//
// Thin wrapper: every command is one or two Zoo/ZooStorage calls plus
// text formatting. Generic over input/output so it can be scripted.

use crate::entities::animal::{create_animal, Animal, AnimalType, HealthStatus};
use crate::entities::enclosure::Enclosure;
use crate::storage::ZooStorage;
use crate::zoo::Zoo;
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const MENU: [&str; 3] = [
    "1. Add Animal | 2. List All Animals | 3. View Animal Details",
    "4. Remove Animal | 5. Statistics | 6. Manage Enclosures",
    "7. Health Records | 8. Feed Animals | 9. Exit",
];

/// Short upper-case id for a new animal, e.g. "3F2A9C1B"
pub fn generate_animal_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

/// Multi-line detail block for one animal
pub fn animal_details(zoo: &Zoo, animal: &Animal) -> Vec<String> {
    let enclosure = zoo
        .enclosure_of(animal.id())
        .map(|e| e.id().to_string())
        .unwrap_or_else(|| "Not assigned".to_string());

    vec![
        format!("ID: {}", animal.id()),
        format!("Name: {}", animal.name()),
        format!("Type: {}", animal.animal_type().display_name()),
        format!("Species: {}", animal.species()),
        format!("Age: {}", animal.age()),
        format!("Diet: {}", animal.diet()),
        format!("Habitat: {}", animal.habitat_type()),
        format!("Health Status: {}", animal.health_status()),
        format!("Arrival Date: {}", animal.arrival().date_naive()),
        format!("Sound: {}", animal.make_sound()),
        format!("Movement: {}", animal.describe_movement()),
        format!("Enclosure: {}", enclosure),
    ]
}

/// Statistics screen
pub fn statistics_lines(zoo: &Zoo) -> Vec<String> {
    let stats = zoo.statistics();
    let mut lines = vec![format!("Total Animals: {}", stats.total_animals), String::new()];

    lines.push("By Type:".to_string());
    for (animal_type, count) in &stats.by_type {
        lines.push(format!("  {}: {}", animal_type, count));
    }

    lines.push(String::new());
    lines.push("By Habitat:".to_string());
    for (habitat, count) in &stats.by_habitat {
        lines.push(format!("  {}: {}", habitat, count));
    }

    lines.push(String::new());
    lines.push("Enclosures:".to_string());
    for enclosure in zoo.enclosures() {
        lines.push(format!("  {}", enclosure));
    }

    if stats.needing_attention > 0 {
        lines.push(String::new());
        lines.push(format!("Animals needing medical attention: {}", stats.needing_attention));
    }

    lines
}

pub struct Console<R, W> {
    zoo: Zoo,
    storage: ZooStorage,
    data_file: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(zoo: Zoo, data_file: PathBuf, input: R, output: W) -> Self {
        Console {
            zoo,
            storage: ZooStorage::new(),
            data_file,
            input,
            output,
        }
    }

    pub fn zoo(&self) -> &Zoo {
        &self.zoo
    }

    pub fn into_parts(self) -> (Zoo, W) {
        (self.zoo, self.output)
    }

    /// Load the data file into the zoo; failures leave the zoo as it was
    pub fn load(&mut self) -> Result<()> {
        match self.storage.load(&self.data_file, &mut self.zoo) {
            Ok(report) => {
                writeln!(self.output, "Data loaded successfully.")?;
                for skipped in &report.skipped {
                    writeln!(self.output, "Skipping malformed entry: {}", skipped.content)?;
                }
            }
            Err(err) => {
                tracing::error!("load failed: {:#}", err);
                writeln!(self.output, "Starting with a fresh zoo.")?;
            }
        }
        Ok(())
    }

    /// Menu loop; returns after "9" or end of input (both save first)
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n=== ZOO MANAGEMENT SYSTEM ===")?;
            for line in MENU {
                writeln!(self.output, "{}", line)?;
            }

            let choice = match self.read_line()? {
                Some(choice) => choice,
                None => {
                    self.save_and_exit()?;
                    return Ok(());
                }
            };

            match choice.trim() {
                "1" => self.add_animal()?,
                "2" => self.list_animals()?,
                "3" => self.view_animal_details()?,
                "4" => self.remove_animal()?,
                "5" => self.show_statistics()?,
                "6" => self.manage_enclosures()?,
                "7" => self.manage_health_records()?,
                "8" => self.feed_animals()?,
                "9" => {
                    self.save_and_exit()?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid option.")?,
            }
        }
    }

    // ========================================================================
    // INPUT HELPERS
    // ========================================================================

    /// None on end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Prompt and read; end of input reads as an empty answer
    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    /// Pick one animal by name; returns its id
    fn select_animal_by_name(&mut self, text: &str) -> Result<Option<String>> {
        let name = self.prompt(text)?;

        let mut matches: Vec<(String, String, &'static str)> = self
            .zoo
            .get_by_name(&name)
            .iter()
            .map(|a| (a.id().to_string(), a.name().to_string(), a.animal_type().display_name()))
            .collect();
        matches.sort();

        match matches.len() {
            0 => {
                writeln!(self.output, "Animal not found.")?;
                Ok(None)
            }
            1 => Ok(matches.pop().map(|(id, _, _)| id)),
            _ => {
                writeln!(self.output, "Multiple animals found with that name:")?;
                for (i, (id, name, display)) in matches.iter().enumerate() {
                    writeln!(self.output, "{}. {} ({}) - ID: {}", i + 1, name, display, id)?;
                }

                let answer = self.prompt("Enter the number of the animal: ")?;
                match answer.trim().parse::<usize>() {
                    Ok(n) if n >= 1 && n <= matches.len() => Ok(Some(matches.swap_remove(n - 1).0)),
                    Ok(_) => {
                        writeln!(self.output, "Invalid choice.")?;
                        Ok(None)
                    }
                    Err(_) => {
                        writeln!(self.output, "Invalid input.")?;
                        Ok(None)
                    }
                }
            }
        }
    }

    // ========================================================================
    // COMMANDS
    // ========================================================================

    fn add_animal(&mut self) -> Result<()> {
        let names: Vec<&str> = AnimalType::ALL.iter().map(|t| t.display_name()).collect();
        writeln!(self.output, "Available animal types: {}", names.join(", "))?;

        let type_tag = self.prompt("Enter animal type: ")?;
        let name = self.prompt("Enter Name: ")?;
        let age_text = self.prompt("Enter Age: ")?;

        let age = match age_text.trim().parse::<i64>() {
            Ok(age) => age,
            Err(_) => {
                writeln!(self.output, "Invalid input: age must be a whole number")?;
                return Ok(());
            }
        };

        let id = generate_animal_id();
        match create_animal(&type_tag, &id, &name, age) {
            Ok(animal) => {
                let name = animal.name().to_string();
                if self.zoo.add_animal(animal) {
                    writeln!(self.output, "Success! {} added to the zoo with ID: {}", name, id)?;
                    match self.zoo.enclosure_of(&id) {
                        Some(enclosure) => writeln!(self.output, "Assigned to enclosure: {}", enclosure.id())?,
                        None => writeln!(self.output, "No enclosure with free space for this habitat.")?,
                    }
                } else {
                    writeln!(self.output, "Error: Failed to add animal.")?;
                }
            }
            Err(err) => writeln!(self.output, "Invalid input: {}", err)?,
        }
        Ok(())
    }

    fn list_animals(&mut self) -> Result<()> {
        let animals = self.zoo.list_sorted_by_type();
        if animals.is_empty() {
            writeln!(self.output, "No animals in the zoo.")?;
            return Ok(());
        }

        writeln!(self.output, "\n--- ANIMALS IN ZOO ---")?;
        for animal in animals {
            writeln!(self.output, "{}", animal)?;
        }
        Ok(())
    }

    fn view_animal_details(&mut self) -> Result<()> {
        let Some(id) = self.select_animal_by_name("Enter animal name: ")? else {
            return Ok(());
        };

        if let Some(animal) = self.zoo.get_by_id(&id) {
            writeln!(self.output, "\n--- ANIMAL DETAILS ---")?;
            for line in animal_details(&self.zoo, animal) {
                writeln!(self.output, "{}", line)?;
            }
        }
        Ok(())
    }

    fn remove_animal(&mut self) -> Result<()> {
        let Some(id) = self.select_animal_by_name("Enter name of animal to remove: ")? else {
            return Ok(());
        };

        match self.zoo.remove_by_id(&id) {
            Some(removed) => writeln!(self.output, "Removed: {}", removed.name())?,
            None => writeln!(self.output, "Failed to remove animal.")?,
        }
        Ok(())
    }

    fn show_statistics(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- ZOO STATISTICS ---")?;
        for line in statistics_lines(&self.zoo) {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn manage_enclosures(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- ENCLOSURE MANAGEMENT ---")?;
        writeln!(self.output, "1. List Enclosures | 2. View Enclosure Details | 3. Add Enclosure")?;
        let choice = self.prompt("")?;

        match choice.trim() {
            "1" => {
                for enclosure in self.zoo.enclosures() {
                    writeln!(self.output, "{}", enclosure)?;
                }
            }
            "2" => {
                let id = self.prompt("Enter enclosure ID: ")?;
                match self.zoo.get_enclosure(&id) {
                    Some(enclosure) => {
                        writeln!(self.output, "{}", enclosure)?;
                        writeln!(self.output, "Animals:")?;
                        for animal in self.zoo.enclosure_members(&id) {
                            writeln!(
                                self.output,
                                "  - {} ({})",
                                animal.name(),
                                animal.animal_type().display_name()
                            )?;
                        }
                    }
                    None => writeln!(self.output, "Enclosure not found.")?,
                }
            }
            "3" => self.add_enclosure()?,
            _ => writeln!(self.output, "Invalid option.")?,
        }
        Ok(())
    }

    fn add_enclosure(&mut self) -> Result<()> {
        let id = self.prompt("Enter enclosure ID: ")?;

        writeln!(self.output, "Available habitat types:")?;
        writeln!(self.output, "1. Savanna (for lions, elephants)")?;
        writeln!(self.output, "2. Aquatic (for dolphins, penguins)")?;
        writeln!(self.output, "3. Tropical Forest (for monkeys)")?;
        writeln!(self.output, "4. Custom habitat type")?;

        let habitat = match self.prompt("Choose habitat type (1-4): ")?.trim() {
            "1" => "Savanna".to_string(),
            "2" => "Aquatic".to_string(),
            "3" => "Tropical Forest".to_string(),
            "4" => self.prompt("Enter custom habitat type: ")?,
            _ => {
                writeln!(self.output, "Invalid choice.")?;
                return Ok(());
            }
        };

        let capacity = match self.prompt("Enter capacity: ")?.trim().parse::<i64>() {
            Ok(capacity) => capacity,
            Err(_) => {
                writeln!(self.output, "Invalid input: capacity must be a whole number")?;
                return Ok(());
            }
        };

        match Enclosure::new(&id, &habitat, capacity) {
            Ok(enclosure) => {
                if self.zoo.add_enclosure(enclosure) {
                    writeln!(self.output, "Enclosure added successfully.")?;
                } else {
                    writeln!(self.output, "Enclosure ID already exists.")?;
                }
            }
            Err(err) => writeln!(self.output, "Invalid input: {}", err)?,
        }
        Ok(())
    }

    fn manage_health_records(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- HEALTH RECORDS ---")?;
        writeln!(self.output, "1. View Health Record | 2. Add Health Entry | 3. Update Health Status")?;
        let choice = self.prompt("")?;

        match choice.trim() {
            "1" => {
                let Some(id) = self.select_animal_by_name("Enter animal name: ")? else {
                    return Ok(());
                };
                if let (Some(animal), Some(record)) = (self.zoo.get_by_id(&id), self.zoo.health_record(&id)) {
                    writeln!(self.output, "Health Record for {}:", animal.name())?;
                    if record.is_empty() {
                        writeln!(self.output, "No entries.")?;
                    }
                    for entry in record.entries() {
                        writeln!(self.output, "{}", entry)?;
                    }
                }
            }
            "2" => {
                let Some(id) = self.select_animal_by_name("Enter animal name: ")? else {
                    return Ok(());
                };
                let description = self.prompt("Description: ")?;
                let veterinarian = self.prompt("Veterinarian: ")?;
                let treatment = self.prompt("Treatment: ")?;

                self.zoo.add_health_entry(&id, &description, &veterinarian, &treatment);
                writeln!(self.output, "Health entry added.")?;
            }
            "3" => {
                let Some(id) = self.select_animal_by_name("Enter animal name: ")? else {
                    return Ok(());
                };
                if let Some(animal) = self.zoo.get_by_id(&id) {
                    writeln!(self.output, "Current health status: {}", animal.health_status())?;
                }
                let statuses: Vec<&str> = HealthStatus::ALL.iter().map(|h| h.as_str()).collect();
                writeln!(self.output, "Available statuses: {}", statuses.join(", "))?;

                let answer = self.prompt("New status: ")?;
                let updated = match answer.parse::<HealthStatus>() {
                    Ok(status) => self.zoo.update_health_status(&id, status),
                    Err(_) => false,
                };
                if updated {
                    writeln!(self.output, "Health status updated.")?;
                } else {
                    writeln!(self.output, "Invalid status.")?;
                }
            }
            _ => writeln!(self.output, "Invalid option.")?,
        }
        Ok(())
    }

    fn feed_animals(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- FEEDING TIME ---")?;
        let report = self.zoo.feeding_report();
        if report.is_empty() {
            writeln!(self.output, "No animals to feed.")?;
            return Ok(());
        }

        writeln!(self.output, "Feeding all animals...")?;
        for line in report {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output, "All animals have been fed!")?;
        Ok(())
    }

    fn save_and_exit(&mut self) -> Result<()> {
        match self.storage.save(&self.data_file, &self.zoo) {
            Ok(()) => writeln!(self.output, "Data saved. Goodbye!")?,
            Err(err) => {
                tracing::error!("save failed: {:#}", err);
                writeln!(self.output, "Error saving data: {:#}", err)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
