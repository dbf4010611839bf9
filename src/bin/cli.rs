use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use nba_slate::models::{Bet, BetMarket, Outcome, SlateError};
use nba_slate::utils::settlement::{record_game_result, settle_bet, total_pnl};
use nba_slate::SlateStore;
use std::path::PathBuf;

/// Daily NBA slate bookkeeper
#[derive(Parser)]
#[command(name = "slate", about = "Track games and bets on the day's NBA slate")]
struct Cli {
    /// Slate date (YYYY-MM-DD); defaults to today
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Directory holding the per-day slate files; defaults to $SLATE_DIR or ./slates
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a bet on a game in the day's slate
    AddBet {
        /// Id of the game to bet on
        game_id: String,
    },
    /// Record final scores and grade all open bets
    Settle,
    /// Show game/bet counts, running P&L, and top-priority games
    Status,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Date and directory resolution happens here only; the library takes
    // both as explicit parameters.
    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let dir = cli.dir.unwrap_or_else(|| {
        std::env::var("SLATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("slates"))
    });
    let store = SlateStore::new(dir);

    match cli.command {
        Commands::AddBet { game_id } => add_bet(&store, date, &game_id),
        Commands::Settle => settle(&store, date),
        Commands::Status => status(&store, date),
    }
}

/// Prompt for the fields of a new bet and append it to the slate
fn add_bet(store: &SlateStore, date: NaiveDate, game_id: &str) -> Result<()> {
    let mut slate = store.load(date)?;

    {
        let game = slate.find_game(game_id)?;
        println!(
            "\n{} @ {} | {} | {}\n",
            game.away,
            game.home,
            game.market.spread_line(),
            game.market.total_line()
        );
    }

    let theme = ColorfulTheme::default();

    let market: BetMarket = Input::<String>::with_theme(&theme)
        .with_prompt("Market (spread/total/ml)")
        .interact_text()?
        .parse()?;
    let selection: String = Input::with_theme(&theme)
        .with_prompt("Selection")
        .interact_text()?;
    let odds_decimal: f64 = Input::with_theme(&theme)
        .with_prompt("Odds")
        .interact_text()?;
    let stake_units: f64 = Input::with_theme(&theme)
        .with_prompt("Units")
        .interact_text()?;
    let book: String = Input::with_theme(&theme)
        .with_prompt("Book")
        .default("primary".to_string())
        .interact_text()?;
    let notes: String = Input::with_theme(&theme)
        .with_prompt("Notes")
        .allow_empty(true)
        .interact_text()?;

    let bet = Bet {
        game_id: game_id.to_string(),
        market,
        selection,
        odds_decimal,
        stake_units,
        book,
        notes,
        result: None,
        pnl_units: 0.0,
        placed_at: Local::now(),
    };
    let summary = format!(
        "✓ {} @ {} for {}u",
        bet.selection, bet.odds_decimal, bet.stake_units
    );

    slate.add_bet(bet)?;
    store.save(date, &slate)?;

    println!("{summary}");
    Ok(())
}

/// Prompt for final scores per game, then grade each open bet
fn settle(store: &SlateStore, date: NaiveDate) -> Result<()> {
    let mut slate = store.load(date)?;

    // Games referenced by open bets, in first-reference order
    let mut game_ids: Vec<String> = Vec::new();
    for bet in slate.unsettled_bets() {
        if !game_ids.contains(&bet.game_id) {
            game_ids.push(bet.game_id.clone());
        }
    }
    if game_ids.is_empty() {
        return Err(SlateError::NoUnsettledBets.into());
    }

    let theme = ColorfulTheme::default();

    for game_id in &game_ids {
        let game = slate.find_game_mut(game_id)?;
        println!("\n{} @ {}", game.away, game.home);

        let away: i32 = Input::with_theme(&theme)
            .with_prompt(format!("{} score", game.away))
            .interact_text()?;
        let home: i32 = Input::with_theme(&theme)
            .with_prompt(format!("{} score", game.home))
            .interact_text()?;
        record_game_result(game, away, home);
    }

    println!("\n--- Settle Bets ---");
    const OUTCOMES: [Outcome; 3] = [Outcome::Win, Outcome::Loss, Outcome::Push];
    for bet in slate.bets.iter_mut().filter(|b| b.is_unsettled()) {
        println!(
            "\n{} @ {} for {}u",
            bet.selection, bet.odds_decimal, bet.stake_units
        );
        let choice = Select::with_theme(&theme)
            .with_prompt("win/loss/push")
            .items(&OUTCOMES)
            .default(0)
            .interact()?;
        settle_bet(bet, OUTCOMES[choice]);
    }

    // Single whole-file write after the full prompt sequence; aborting any
    // prompt above leaves the slate file untouched.
    store.save(date, &slate)?;

    println!("\n✓ P&L: {:+.2}u", total_pnl(&slate));
    Ok(())
}

/// Print the day's counts, P&L, and top-priority games with bet coverage
fn status(store: &SlateStore, date: NaiveDate) -> Result<()> {
    let slate = store.load(date)?;

    let settled = slate.settled_bets().count();
    println!(
        "\n{} games | {} bets | {} settled | P&L: {:+.2}u\n",
        slate.games.len(),
        slate.bets.len(),
        settled,
        total_pnl(&slate)
    );

    for game in slate.games.iter().filter(|g| g.priority == "A").take(5) {
        let marker = if slate.has_bet_on(&game.id) {
            "💰"
        } else {
            "⚪"
        };
        println!(
            "{} {} @ {} | {} | {}",
            marker,
            game.away,
            game.home,
            game.market.spread_line(),
            game.market.total_line()
        );
    }

    Ok(())
}
