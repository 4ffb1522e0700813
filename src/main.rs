//! Matrixle - terminal front end.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Cli, Command};
use matrixle::{
    DailyGame, MatrixleConfig, PlayStats, PuzzleTable, SessionRepository, render_session,
};
use matrixle_core::CandidateGuess;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MatrixleConfig::from_file(path)?,
        None => MatrixleConfig::default(),
    };
    let config = match cli.db.clone() {
        Some(db) => config.with_db_path(db),
        None => config,
    };

    initialize_tracing(config.log_filter());

    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    info!(%date, command = ?cli.command, "Starting matrixle");

    let repo = SessionRepository::open(config.db_path().clone())?;
    let table = config.puzzle_table()?;

    match cli.command {
        Command::Play => run_play(&repo, &table, date),
        Command::Show => run_show(&repo, &table, date),
        Command::Reset => run_reset(&repo, &table, date),
        Command::Stats => run_stats(&repo),
    }
}

/// Interactive loop over stdin until the game ends or the player quits.
#[instrument(skip(repo, table))]
fn run_play(repo: &SessionRepository, table: &PuzzleTable, date: NaiveDate) -> Result<()> {
    let mut game = DailyGame::start(repo, table, date)?;
    println!("{}", render_session(game.session()));

    if game.session().status().is_terminal() {
        return Ok(());
    }
    println!("Enter eight digits a b c d e f g h, or 'quit'.");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while !game.session().status().is_terminal() {
        print!("guess> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            debug!("Input closed");
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") {
            break;
        }

        let candidate = match input.parse::<CandidateGuess>() {
            Ok(candidate) => candidate,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        match game.submit(&candidate) {
            Ok(_) => println!("{}", render_session(game.session())),
            Err(err) => match err.rejection() {
                Some(rejection) => {
                    for defect in rejection.defects() {
                        println!("  - {}", defect);
                    }
                }
                None => return Err(err.into()),
            },
        }
    }

    Ok(())
}

#[instrument(skip(repo, table))]
fn run_show(repo: &SessionRepository, table: &PuzzleTable, date: NaiveDate) -> Result<()> {
    let game = DailyGame::start(repo, table, date)?;
    println!("{}", render_session(game.session()));
    Ok(())
}

#[instrument(skip(repo, table))]
fn run_reset(repo: &SessionRepository, table: &PuzzleTable, date: NaiveDate) -> Result<()> {
    let mut game = DailyGame::start(repo, table, date)?;
    game.reset()?;
    println!("Progress on {} discarded.", date);
    Ok(())
}

#[instrument(skip(repo))]
fn run_stats(repo: &SessionRepository) -> Result<()> {
    print_stats(&repo.stats()?);
    Ok(())
}

fn print_stats(stats: &PlayStats) {
    println!("Played:         {}", stats.played());
    println!("Win rate:       {:.1}%", stats.win_rate());
    println!("Current streak: {}", stats.current_streak());
    println!("Max streak:     {}", stats.max_streak());
    if *stats.in_progress() > 0 {
        println!("In progress:    {}", stats.in_progress());
    }
    println!("Guess distribution:");
    let widest = stats.distribution().iter().copied().max().unwrap_or(0).max(1);
    for (n, count) in stats.distribution().iter().enumerate() {
        let bar = "#".repeat((*count as usize * 20).div_ceil(widest as usize));
        println!("  {}: {:<20} {}", n + 1, bar, count);
    }
}

/// Logs go to stderr so the board on stdout stays readable.
fn initialize_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Tracing initialized");
}
