use crate::models::{Bet, Game, GameResult, Outcome, Slate};

/// Profit or loss in units for a graded bet
///
/// A win pays `stake * (odds - 1)` and a loss costs the stake; a push is 0.
/// No positivity checks on odds or stake; whatever was recorded on the bet
/// flows straight through the arithmetic.
pub fn pnl_units(outcome: Outcome, odds_decimal: f64, stake_units: f64) -> f64 {
    match outcome {
        Outcome::Win => stake_units * (odds_decimal - 1.0),
        Outcome::Loss => -stake_units,
        Outcome::Push => 0.0,
    }
}

/// Grade a bet: result and pnl_units are assigned together.
/// Grading again overwrites the previous grade, it never accumulates.
pub fn settle_bet(bet: &mut Bet, outcome: Outcome) {
    bet.result = Some(outcome);
    bet.pnl_units = pnl_units(outcome, bet.odds_decimal, bet.stake_units);
}

/// Record final scores on a game, overwriting any previous result
pub fn record_game_result(game: &mut Game, final_score_away: i32, final_score_home: i32) {
    game.result = Some(GameResult {
        final_score_away,
        final_score_home,
    });
}

/// Running P&L across graded bets only; open bets are excluded by the
/// result filter, not by their stored zero
pub fn total_pnl(slate: &Slate) -> f64 {
    slate.settled_bets().map(|b| b.pnl_units).sum()
}
