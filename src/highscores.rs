//! High score leaderboard system
//!
//! Persisted under the `leaderboard` key as a JSON array of
//! `{name, score}` records, sorted descending and capped at 10 entries.

use serde::{Deserialize, Serialize};

use crate::consts::LEADERBOARD_KEY;
use crate::persistence::{KeyValueStore, StorageError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

/// Ranked leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert an entry in rank order and trim to the top 10.
    ///
    /// Returns the rank achieved (1-indexed) or None if the entry was trimmed.
    /// Ties keep earlier entries ahead of the new one.
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        let entry = LeaderboardEntry {
            name: name.to_string(),
            score,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard, treating absent or corrupt data as empty
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(LEADERBOARD_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Leaderboard>(&json) {
                Ok(mut board) => {
                    // Stored data may predate the ordering rules
                    board.entries.sort_by(|a, b| b.score.cmp(&a.score));
                    board.entries.truncate(MAX_HIGH_SCORES);
                    log::info!("Loaded {} high scores", board.entries.len());
                    return board;
                }
                Err(e) => log::warn!("Leaderboard corrupt, starting fresh: {}", e),
            },
            Ok(None) => log::info!("No high scores found, starting fresh"),
            Err(e) => log::warn!("Leaderboard unavailable: {}", e),
        }

        Self::new()
    }

    /// Load, add one entry and persist the result
    pub fn save(
        store: &mut dyn KeyValueStore,
        name: &str,
        score: u64,
    ) -> Result<Self, StorageError> {
        let mut board = Self::load(store);
        let rank = board.add_score(name, score);
        let json = serde_json::to_string(&board)?;
        store.set(LEADERBOARD_KEY, &json)?;
        match rank {
            Some(rank) => log::info!("High score saved: {} - {} (rank {})", name, score, rank),
            None => log::info!("Score {} for {} did not make the top {}", score, name, MAX_HIGH_SCORES),
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    fn names(board: &Leaderboard) -> Vec<(&str, u64)> {
        board
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.score))
            .collect()
    }

    #[test]
    fn test_save_orders_descending() {
        let mut store = MemoryStore::new();
        Leaderboard::save(&mut store, "A", 50).unwrap();
        Leaderboard::save(&mut store, "B", 100).unwrap();
        Leaderboard::save(&mut store, "C", 10).unwrap();

        let board = Leaderboard::load(&store);
        assert_eq!(names(&board), vec![("B", 100), ("A", 50), ("C", 10)]);
    }

    #[test]
    fn test_eleven_saves_keep_top_ten() {
        let mut store = MemoryStore::new();
        for i in 0..11u64 {
            Leaderboard::save(&mut store, &format!("P{}", i), i * 10).unwrap();
        }

        let board = Leaderboard::load(&store);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.top_score(), Some(100));
        assert!(board.entries.iter().all(|e| e.name != "P0"));
    }

    #[test]
    fn test_stored_format_is_plain_array() {
        let mut store = MemoryStore::new();
        Leaderboard::save(&mut store, "A", 50).unwrap();

        let json = store.get(LEADERBOARD_KEY).unwrap().unwrap();
        assert_eq!(json, r#"[{"name":"A","score":50}]"#);
    }

    #[test]
    fn test_corrupt_data_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(LEADERBOARD_KEY, "{oops").unwrap();
        assert!(Leaderboard::load(&store).is_empty());

        // Saving over corrupt data starts a fresh board
        let board = Leaderboard::save(&mut store, "A", 20).unwrap();
        assert_eq!(names(&board), vec![("A", 20)]);
    }

    #[test]
    fn test_add_score_rank() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_score("A", 50), Some(1));
        assert_eq!(board.add_score("B", 100), Some(1));
        assert_eq!(board.add_score("C", 50), Some(3)); // tie goes after A
        assert_eq!(names(&board), vec![("B", 100), ("A", 50), ("C", 50)]);
    }

    #[test]
    fn test_add_score_trimmed_returns_none() {
        let mut board = Leaderboard::new();
        for i in 0..MAX_HIGH_SCORES {
            board.add_score("X", 100 + i as u64);
        }
        assert_eq!(board.add_score("low", 1), None);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_tie_on_full_board_is_trimmed() {
        let mut board = Leaderboard::new();
        for i in 0..MAX_HIGH_SCORES {
            board.add_score(&format!("P{}", i), 50);
        }
        assert_eq!(board.add_score("late", 50), None);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert!(board.entries.iter().all(|e| e.name != "late"));
        assert_eq!(board.entries[0].name, "P0");
    }

    proptest! {
        #[test]
        fn prop_sorted_and_capped(scores in proptest::collection::vec(0u64..1000, 0..30)) {
            let mut store = MemoryStore::new();
            for (i, score) in scores.iter().enumerate() {
                Leaderboard::save(&mut store, &format!("P{}", i), *score).unwrap();
            }
            let board = Leaderboard::load(&store);
            prop_assert!(board.entries.len() <= MAX_HIGH_SCORES);
            prop_assert_eq!(board.entries.len(), scores.len().min(MAX_HIGH_SCORES));
            prop_assert!(board.entries.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
}
