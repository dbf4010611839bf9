use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Failures the slate operations report to callers
#[derive(Debug, Error)]
pub enum SlateError {
    #[error("no slate file at {path}")]
    FileNotFound { path: PathBuf },

    #[error("game {game_id} not found in slate")]
    GameNotFound { game_id: String },

    #[error("no bets to settle")]
    NoUnsettledBets,

    #[error("unknown outcome '{0}' (expected win/loss/push)")]
    UnknownOutcome(String),

    #[error("unknown market '{0}' (expected spread/total/ml)")]
    UnknownMarket(String),
}

/// One day's slate of games and the bets placed on them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slate {
    pub games: Vec<Game>,
    #[serde(default)]
    pub bets: Vec<Bet>,
}

/// A single game on the slate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub away: String,
    pub home: String,
    pub market: MarketLines,
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<GameResult>,
}

/// Posted lines for a game, set when the slate is imported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketLines {
    pub spread: serde_json::Value,
    pub total: serde_json::Value,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MarketLines {
    fn render(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// The spread line as display text ("-5.5" whether stored as number or string)
    pub fn spread_line(&self) -> String {
        Self::render(&self.spread)
    }

    /// The total line as display text
    pub fn total_line(&self) -> String {
        Self::render(&self.total)
    }
}

/// Final score of a completed game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub final_score_away: i32,
    pub final_score_home: i32,
}

/// A placed bet, tied to a game on the same slate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub game_id: String,
    pub market: BetMarket,
    pub selection: String,
    pub odds_decimal: f64,
    pub stake_units: f64,
    #[serde(default = "default_book")]
    pub book: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub result: Option<Outcome>,
    #[serde(default)]
    pub pnl_units: f64,
    pub placed_at: DateTime<Local>,
}

fn default_book() -> String {
    "primary".to_string()
}

/// Which market a bet was placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetMarket {
    Spread,
    Total,
    Moneyline,
}

impl fmt::Display for BetMarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetMarket::Spread => write!(f, "spread"),
            BetMarket::Total => write!(f, "total"),
            BetMarket::Moneyline => write!(f, "moneyline"),
        }
    }
}

impl FromStr for BetMarket {
    type Err = SlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spread" => Ok(BetMarket::Spread),
            "total" => Ok(BetMarket::Total),
            "ml" | "moneyline" => Ok(BetMarket::Moneyline),
            other => Err(SlateError::UnknownMarket(other.to_string())),
        }
    }
}

/// Final grade of a settled bet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Loss => write!(f, "loss"),
            Outcome::Push => write!(f, "push"),
        }
    }
}

impl FromStr for Outcome {
    type Err = SlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(Outcome::Win),
            "loss" => Ok(Outcome::Loss),
            "push" => Ok(Outcome::Push),
            other => Err(SlateError::UnknownOutcome(other.to_string())),
        }
    }
}

impl Bet {
    /// Whether the bet still needs a grade
    pub fn is_unsettled(&self) -> bool {
        self.result.is_none()
    }
}

impl Slate {
    /// Find a game by id
    pub fn find_game(&self, game_id: &str) -> Result<&Game, SlateError> {
        self.games
            .iter()
            .find(|g| g.id == game_id)
            .ok_or_else(|| SlateError::GameNotFound {
                game_id: game_id.to_string(),
            })
    }

    /// Find a game by id, mutably (settlement attaches the final score through this)
    pub fn find_game_mut(&mut self, game_id: &str) -> Result<&mut Game, SlateError> {
        self.games
            .iter_mut()
            .find(|g| g.id == game_id)
            .ok_or_else(|| SlateError::GameNotFound {
                game_id: game_id.to_string(),
            })
    }

    /// Append a bet. The referenced game must exist; on failure nothing is mutated.
    /// Duplicate bets are allowed and recorded independently.
    pub fn add_bet(&mut self, bet: Bet) -> Result<(), SlateError> {
        self.find_game(&bet.game_id)?;
        self.bets.push(bet);
        Ok(())
    }

    /// Bets that have not been graded yet, in placement order
    pub fn unsettled_bets(&self) -> impl Iterator<Item = &Bet> {
        self.bets.iter().filter(|b| b.is_unsettled())
    }

    /// Bets that have been graded, in placement order
    pub fn settled_bets(&self) -> impl Iterator<Item = &Bet> {
        self.bets.iter().filter(|b| !b.is_unsettled())
    }

    /// Whether any bet references the given game
    pub fn has_bet_on(&self, game_id: &str) -> bool {
        self.bets.iter().any(|b| b.game_id == game_id)
    }
}
