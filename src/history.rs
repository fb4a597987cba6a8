//! Past game configurations, kept in local storage under `matching-game`.
//! Not used by the game flow itself; exported to JS as `add_game`.

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

pub const STORAGE_KEY: &str = "matching-game";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "L1")]
    pub l1: String,
    #[serde(rename = "L2")]
    pub l2: String,
    pub n: String,
    pub reading_level: String,
}

/// Append `record` to the stored JSON array (if any) and return the new list
/// together with its encoding. Garbage in storage starts a fresh list.
pub fn append_record(
    existing: Option<&str>,
    record: GameRecord,
) -> Result<(Vec<GameRecord>, String), HistoryError> {
    let mut games: Vec<GameRecord> = match existing {
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
            log::warn!("discarding unreadable {STORAGE_KEY} entry: {e}");
            Vec::new()
        }),
        None => Vec::new(),
    };
    games.push(record);
    let encoded = serde_json::to_string(&games)?;
    Ok((games, encoded))
}

/// Append a configuration to the browser's local storage and return every
/// stored record.
pub fn add_game(
    l1: &str,
    l2: &str,
    n: &str,
    reading_level: &str,
) -> Result<Vec<GameRecord>, HistoryError> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(HistoryError::Unavailable)?;
    let existing = storage
        .get_item(STORAGE_KEY)
        .map_err(|e| HistoryError::Storage(format!("{e:?}")))?;
    let record = GameRecord {
        l1: l1.to_string(),
        l2: l2.to_string(),
        n: n.to_string(),
        reading_level: reading_level.to_string(),
    };
    let (games, encoded) = append_record(existing.as_deref(), record)?;
    storage
        .set_item(STORAGE_KEY, &encoded)
        .map_err(|e| HistoryError::Storage(format!("{e:?}")))?;
    Ok(games)
}
