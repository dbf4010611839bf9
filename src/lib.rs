pub mod models;
pub mod utils;

pub use models::*;
pub use utils::*;

use anyhow::Result;
use chrono::NaiveDate;
use models::Slate;
use std::path::PathBuf;
use utils::data::{load_slate, save_slate, slate_path};

/// Handle on a directory of per-day slate files
///
/// The date is always an explicit parameter; resolving "today" is left to
/// the caller so every operation here is reproducible.
pub struct SlateStore {
    dir: PathBuf,
}

impl SlateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File path for a given day's slate
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        slate_path(&self.dir, date)
    }

    /// Load the slate for a given day
    pub fn load(&self, date: NaiveDate) -> Result<Slate> {
        load_slate(&self.path_for(date))
    }

    /// Save the slate for a given day (whole-file rewrite, atomic rename)
    pub fn save(&self, date: NaiveDate, slate: &Slate) -> Result<()> {
        save_slate(&self.path_for(date), slate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Game, MarketLines};
    use serde_json::json;

    #[test]
    fn store_round_trips_a_slate_by_date() {
        let dir = tempfile::tempdir().unwrap();
        let store = SlateStore::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        let slate = Slate {
            games: vec![Game {
                id: "den-lal".to_string(),
                away: "DEN".to_string(),
                home: "LAL".to_string(),
                market: MarketLines {
                    spread: json!("LAL -3.5"),
                    total: json!(224.5),
                    extra: serde_json::Map::new(),
                },
                priority: "A".to_string(),
                result: None,
            }],
            bets: vec![],
        };

        store.save(date, &slate).unwrap();
        assert!(store.path_for(date).ends_with("2026-08-06.json"));
        assert_eq!(store.load(date).unwrap(), slate);
    }
}
