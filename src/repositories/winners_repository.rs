// src/repositories/winners_repository.rs

use serde::{Deserialize, Serialize};

use crate::domain::Winner;
use crate::error::AppResult;
use crate::infrastructure::json_file::{read_optional, remove_if_exists, write_json_atomic};
use crate::infrastructure::StorageLayout;

/// Outcome of reading the ledger store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerLoad {
    /// The store parsed; may be an empty history
    Loaded(Vec<Winner>),

    /// No store exists (never written, or cleared)
    Absent,

    /// The store exists but is not a ledger; treated as empty
    Recovered { reason: String },
}

impl LedgerLoad {
    /// Winners in insertion order; absent and recovered stores are empty
    pub fn into_winners(self) -> Vec<Winner> {
        match self {
            LedgerLoad::Loaded(winners) => winners,
            LedgerLoad::Absent | LedgerLoad::Recovered { .. } => Vec::new(),
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, LedgerLoad::Recovered { .. })
    }
}

/// `{"winners": [...]}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerDocument {
    winners: Option<Vec<Winner>>,
}

pub trait WinnersRepository: Send + Sync {
    fn load(&self) -> AppResult<LedgerLoad>;
    fn save(&self, winners: &[Winner]) -> AppResult<()>;
    /// Delete the store entirely
    fn clear(&self) -> AppResult<()>;
}

pub struct JsonWinnersRepository {
    layout: StorageLayout,
}

impl JsonWinnersRepository {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    fn parse(bytes: &[u8]) -> LedgerLoad {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return LedgerLoad::Loaded(Vec::new());
        }
        match serde_json::from_slice::<LedgerDocument>(bytes) {
            Ok(document) => LedgerLoad::Loaded(document.winners.unwrap_or_default()),
            Err(e) => LedgerLoad::Recovered {
                reason: e.to_string(),
            },
        }
    }
}

impl WinnersRepository for JsonWinnersRepository {
    fn load(&self) -> AppResult<LedgerLoad> {
        match read_optional(&self.layout.winners_path())? {
            Some(bytes) => Ok(Self::parse(&bytes)),
            None => Ok(LedgerLoad::Absent),
        }
    }

    fn save(&self, winners: &[Winner]) -> AppResult<()> {
        let document = LedgerDocument {
            winners: Some(winners.to_vec()),
        };
        write_json_atomic(&self.layout.winners_path(), &document)
    }

    fn clear(&self) -> AppResult<()> {
        remove_if_exists(&self.layout.winners_path())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(dir: &tempfile::TempDir) -> JsonWinnersRepository {
        JsonWinnersRepository::new(StorageLayout::new(dir.path()))
    }

    fn winner(name: &str) -> Winner {
        Winner {
            full_name: name.to_string(),
            date_time: "01/01/2024 10:00:00".to_string(),
        }
    }

    #[test]
    fn test_absent_store() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(repo(&dir).load().unwrap(), LedgerLoad::Absent);
    }

    #[test]
    fn test_empty_history_is_distinct_from_absent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(&dir);
        repo.save(&[]).unwrap();
        assert_eq!(repo.load().unwrap(), LedgerLoad::Loaded(Vec::new()));
    }

    #[test]
    fn test_save_and_load_keeps_order_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(&dir);
        let winners = vec![winner("Ada"), winner("Grace"), winner("Ada")];
        repo.save(&winners).unwrap();
        assert_eq!(repo.load().unwrap(), LedgerLoad::Loaded(winners));
    }

    #[test]
    fn test_document_shape() {
        let dir = tempfile::tempdir().unwrap();
        repo(&dir).save(&[winner("Ada")]).unwrap();
        let raw = std::fs::read_to_string(dir.path().join("winners.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["winners"][0]["fullName"], "Ada");
        assert_eq!(json["winners"][0]["dateTime"], "01/01/2024 10:00:00");
    }

    #[test]
    fn test_legacy_document_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("winners.json"),
            r#"{"winners":[{"FullName":"Ada","DateTime":"02/03/2024 11:12:13"}]}"#,
        )
        .unwrap();
        let winners = repo(&dir).load().unwrap().into_winners();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].full_name, "Ada");
    }

    #[test]
    fn test_corrupt_store_is_recovered_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("winners.json"), "garbage").unwrap();
        let load = repo(&dir).load().unwrap();
        assert!(load.is_recovered());
        assert!(load.into_winners().is_empty());
    }

    #[test]
    fn test_zero_length_store_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("winners.json"), "").unwrap();
        assert_eq!(repo(&dir).load().unwrap(), LedgerLoad::Loaded(Vec::new()));
    }

    #[test]
    fn test_clear_deletes_store() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(&dir);
        repo.save(&[winner("Ada")]).unwrap();
        repo.clear().unwrap();
        assert_eq!(repo.load().unwrap(), LedgerLoad::Absent);
        repo.clear().unwrap();
    }
}
