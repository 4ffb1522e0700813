//! Command-line interface for matrixle.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Matrixle - daily matrix-vector deduction puzzle
#[derive(Parser, Debug)]
#[command(name = "matrixle")]
#[command(about = "Deduce the day's [a b; c d] x [e; f] = [g; h] in six guesses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the config
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Day to play (YYYY-MM-DD), defaults to today
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play the day's puzzle interactively
    Play,

    /// Print the board for the day
    Show,

    /// Discard progress on the day's puzzle
    Reset,

    /// Print statistics over all saved days
    Stats,
}
