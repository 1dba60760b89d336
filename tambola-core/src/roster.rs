use crate::error::{Result, TambolaError};
use crate::ticket::{Grid, Ticket};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GAME_TITLE: &str = "Tambola Game";

/// One participant as it travels in a roster file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: u32,
    pub name: String,
    pub ticket: Ticket,
}

/// Roster file shape: `{ gameTitle, generatedAt, participants: [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterFile {
    pub game_title: String,
    pub generated_at: DateTime<Utc>,
    pub participants: Vec<RosterEntry>,
}

impl RosterFile {
    pub fn new(participants: Vec<RosterEntry>) -> Self {
        Self {
            game_title: DEFAULT_GAME_TITLE.to_string(),
            generated_at: Utc::now(),
            participants,
        }
    }

    /// Reads a roster from disk.
    ///
    /// Malformed JSON is a `Serialization` error; a well-formed ticket that
    /// breaks the layout rules is `InvalidTicketStructure`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw: RawRosterFile = serde_json::from_str(&content)?;
        let roster = raw.into_roster()?;
        tracing::info!(
            "Loaded {} participants from {}",
            roster.participants.len(),
            path.display()
        );
        Ok(roster)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Roster as written on disk, tickets not yet checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRosterFile {
    game_title: String,
    generated_at: DateTime<Utc>,
    participants: Vec<RawRosterEntry>,
}

#[derive(Deserialize)]
struct RawRosterEntry {
    id: u32,
    name: String,
    ticket: Grid,
}

impl RawRosterFile {
    fn into_roster(self) -> Result<RosterFile> {
        let participants = self
            .participants
            .into_iter()
            .map(|entry| {
                let ticket = Ticket::from_grid(entry.ticket).map_err(|e| match e {
                    TambolaError::InvalidTicketStructure(msg) => {
                        TambolaError::invalid_ticket(format!("participant {}: {}", entry.id, msg))
                    }
                    other => other,
                })?;
                Ok(RosterEntry {
                    id: entry.id,
                    name: entry.name,
                    ticket,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RosterFile {
            game_title: self.game_title,
            generated_at: self.generated_at,
            participants,
        })
    }
}

const FIRST_NAMES: [&str; 30] = [
    "Rahul", "Priya", "Amit", "Sneha", "Vikram", "Neha", "Arjun", "Kavita", "Raj", "Anita",
    "Suresh", "Meera", "Karan", "Pooja", "Sanjay", "Deepika", "Rohit", "Anjali", "Vivek",
    "Sunita", "Arun", "Ritu", "Manish", "Swati", "Ashok", "Nisha", "Gaurav", "Shweta", "Nitin",
    "Rekha",
];

const LAST_NAMES: [&str; 20] = [
    "Sharma", "Verma", "Gupta", "Singh", "Kumar", "Patel", "Mehta", "Joshi", "Shah", "Reddy",
    "Iyer", "Nair", "Rao", "Desai", "Chopra", "Malhotra", "Kapoor", "Bhatia", "Agarwal", "Jain",
];

/// Random "First Last" names for demo rosters; names may repeat
pub fn sample_names(count: usize, rng: &mut dyn RngCore) -> Vec<String> {
    (0..count)
        .map(|_| {
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Player");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or_default();
            format!("{} {}", first, last)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::tests::sample_grid;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn entry(id: u32, name: &str) -> RosterEntry {
        RosterEntry {
            id,
            name: name.to_string(),
            ticket: Ticket::from_grid(sample_grid()).unwrap(),
        }
    }

    #[test]
    fn test_roster_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("data").join("participants.json");

        let roster = RosterFile::new(vec![entry(1, "Asha"), entry(2, "Vikram")]);
        roster.save(&path).unwrap();

        let loaded = RosterFile::load(&path).unwrap();
        assert_eq!(loaded, roster);
    }

    #[test]
    fn test_roster_json_field_names() {
        let roster = RosterFile::new(vec![entry(7, "Meera")]);
        let json = serde_json::to_value(&roster).unwrap();

        assert_eq!(json["gameTitle"], "Tambola Game");
        assert!(json["generatedAt"].is_string());
        assert_eq!(json["participants"][0]["id"], 7);
        assert_eq!(json["participants"][0]["ticket"][2][8], 90);
    }

    #[test]
    fn test_load_rejects_invalid_ticket() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bad.json");

        let mut json = serde_json::to_value(RosterFile::new(vec![entry(1, "Raj")])).unwrap();
        json["participants"][0]["ticket"][0][0] = serde_json::json!(55);
        std::fs::write(&path, json.to_string()).unwrap();

        let err = RosterFile::load(&path).unwrap_err();
        assert!(matches!(err, TambolaError::InvalidTicketStructure(_)));
        assert!(err.to_string().contains("participant 1"));
    }

    #[test]
    fn test_load_reports_malformed_json() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "{\"gameTitle\": \"Tambola Game\"").unwrap();

        let err = RosterFile::load(&path).unwrap_err();
        assert!(matches!(err, TambolaError::Serialization(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();
        let err = RosterFile::load(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, TambolaError::Io(_)));
    }

    #[test]
    fn test_sample_names() {
        let mut rng = StdRng::seed_from_u64(9);
        let names = sample_names(25, &mut rng);
        assert_eq!(names.len(), 25);
        assert!(names.iter().all(|name| name.split(' ').count() == 2));
    }
}
