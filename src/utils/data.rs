use crate::models::{Slate, SlateError};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the slate file for a given day: `<dir>/YYYY-MM-DD.json`
pub fn slate_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.json", date.format("%Y-%m-%d")))
}

/// Load a slate from its JSON file
pub fn load_slate(path: &Path) -> Result<Slate> {
    if !path.exists() {
        return Err(SlateError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    let json = fs::read_to_string(path).context("Failed to read slate file")?;
    let slate: Slate = serde_json::from_str(&json).context("Failed to parse slate file")?;
    tracing::debug!(
        games = slate.games.len(),
        bets = slate.bets.len(),
        "loaded slate"
    );
    Ok(slate)
}

/// Save a slate to its JSON file
///
/// Writes a temp file next to the target and renames it into place, so an
/// interrupted save never leaves a truncated slate behind.
pub fn save_slate(path: &Path, slate: &Slate) -> Result<()> {
    let json = serde_json::to_string_pretty(slate).context("Failed to serialize slate")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).context("Failed to write slate temp file")?;
    fs::rename(&tmp, path).context("Failed to replace slate file")?;
    tracing::debug!(path = %path.display(), "saved slate");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // A document in the shape the settle action leaves behind: one graded
    // game with a graded bet, one untouched game, one open bet.
    const SLATE_DOC: &str = r#"{
      "games": [
        {
          "id": "den-lal",
          "away": "DEN",
          "home": "LAL",
          "market": { "spread": "LAL -3.5", "total": 224.5 },
          "priority": "A",
          "result": { "final_score_away": 108, "final_score_home": 115 }
        },
        {
          "id": "bos-mia",
          "away": "BOS",
          "home": "MIA",
          "market": { "spread": "BOS -6.0", "total": 210.0 },
          "priority": "B"
        }
      ],
      "bets": [
        {
          "game_id": "den-lal",
          "market": "spread",
          "selection": "LAL -3.5",
          "odds_decimal": 1.91,
          "stake_units": 1.0,
          "book": "primary",
          "notes": "",
          "result": "win",
          "pnl_units": 0.91,
          "placed_at": "2026-08-06T10:15:00-04:00"
        },
        {
          "game_id": "bos-mia",
          "market": "total",
          "selection": "over 210.0",
          "odds_decimal": 1.87,
          "stake_units": 0.5,
          "book": "secondary",
          "notes": "pace lean",
          "result": null,
          "pnl_units": 0,
          "placed_at": "2026-08-06T11:02:00-04:00"
        }
      ]
    }"#;

    #[test]
    fn slate_path_is_date_named_json() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let path = slate_path(Path::new("slates"), date);
        assert_eq!(path, PathBuf::from("slates/2026-08-06.json"));
    }

    #[test]
    fn load_save_round_trip_preserves_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2026-08-06.json");
        fs::write(&path, SLATE_DOC).unwrap();

        let slate = load_slate(&path).unwrap();
        save_slate(&path, &slate).unwrap();
        let reloaded = load_slate(&path).unwrap();

        assert_eq!(slate, reloaded);
        assert_eq!(reloaded.games.len(), 2);
        assert_eq!(reloaded.bets.len(), 2);
        assert_eq!(reloaded.games[0].result.unwrap().final_score_home, 115);
        assert!(reloaded.games[1].result.is_none());
        assert!(reloaded.bets[1].result.is_none());
    }

    #[test]
    fn missing_file_reports_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2026-08-06.json");
        let err = load_slate(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SlateError>(),
            Some(SlateError::FileNotFound { .. })
        ));
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2026-08-06.json");
        let slate: Slate = serde_json::from_str(SLATE_DOC).unwrap();

        save_slate(&path, &slate).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn slate_without_bets_key_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2026-08-06.json");
        fs::write(&path, r#"{ "games": [] }"#).unwrap();

        let slate = load_slate(&path).unwrap();
        assert!(slate.bets.is_empty());
    }

    #[test]
    fn extra_market_keys_survive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2026-08-06.json");
        let doc = r#"{
          "games": [{
            "id": "den-lal",
            "away": "DEN",
            "home": "LAL",
            "market": { "spread": -3.5, "total": 224.5, "ml_home": 1.65 },
            "priority": "A"
          }],
          "bets": []
        }"#;
        fs::write(&path, doc).unwrap();

        let slate = load_slate(&path).unwrap();
        save_slate(&path, &slate).unwrap();
        let reloaded = load_slate(&path).unwrap();

        assert_eq!(
            reloaded.games[0].market.extra.get("ml_home"),
            slate.games[0].market.extra.get("ml_home")
        );
        assert!(reloaded.games[0].market.extra.contains_key("ml_home"));
    }
}
