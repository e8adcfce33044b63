use std::collections::HashSet;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use klondike::{FoundationPolicy, Game};

#[derive(Parser)]
#[command(name = "xtask", about = "Dev tools for the Klondike engine")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
#[command(rename_all = "kebab-case")]
enum Cmd {
    /// Play seeded deals by always taking the first hint, drawing when there is none
    Simulate {
        /// Number of deals to play
        #[arg(long, default_value_t = 100)]
        games: u64,
        /// Seed of the first deal; later deals use consecutive seeds
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Give up on a deal after this many commands
        #[arg(long, default_value_t = 2000)]
        max_steps: u32,
        /// Let hints move foundation cards back to the tableau
        #[arg(long, default_value_t = false)]
        draggable_foundations: bool,
        /// Print the full report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Outcome {
    Won,
    /// Nothing left to play or draw.
    Stuck,
    /// Position repeated; greedy play would go round forever.
    Loop,
    StepCap,
}

#[derive(Serialize)]
struct GameReport {
    seed: u64,
    outcome: Outcome,
    steps: u32,
    moves: u32,
    foundation_cards: usize,
}

#[derive(Serialize)]
struct Report {
    games: u64,
    wins: u64,
    average_steps: f64,
    average_foundation_cards: f64,
    results: Vec<GameReport>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Simulate {
            games,
            seed,
            max_steps,
            draggable_foundations,
            json,
        } => {
            if games == 0 {
                bail!("--games must be at least 1");
            }
            let policy = if draggable_foundations {
                FoundationPolicy::TopCardDraggable
            } else {
                FoundationPolicy::Locked
            };
            let results = (0..games)
                .map(|i| simulate(seed.wrapping_add(i), max_steps, policy))
                .collect::<Result<Vec<_>>>()?;
            let report = summarize(results);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
    }
    Ok(())
}

fn simulate(seed: u64, max_steps: u32, policy: FoundationPolicy) -> Result<GameReport> {
    let mut game = Game::with_seed(policy, seed);
    let mut seen = HashSet::new();
    let mut steps = 0;
    let outcome = loop {
        if game.is_won() {
            break Outcome::Won;
        }
        if steps >= max_steps {
            break Outcome::StepCap;
        }
        if !seen.insert(game.state().clone()) {
            break Outcome::Loop;
        }
        match game.show_hint() {
            Some(hint) => {
                game.move_cards(hint.from, hint.to, true, true)?;
            }
            None => {
                if game.state().stock_count() + game.state().waste_count() == 0 {
                    break Outcome::Stuck;
                }
                game.draw();
            }
        }
        steps += 1;
    };
    Ok(GameReport {
        seed,
        outcome,
        steps,
        moves: game.moves(),
        foundation_cards: game.state().foundations.iter().map(|p| p.len()).sum(),
    })
}

fn summarize(results: Vec<GameReport>) -> Report {
    let games = results.len() as u64;
    let wins = results
        .iter()
        .filter(|r| r.outcome == Outcome::Won)
        .count() as u64;
    let total_steps: u64 = results.iter().map(|r| u64::from(r.steps)).sum();
    let total_foundation: usize = results.iter().map(|r| r.foundation_cards).sum();
    Report {
        games,
        wins,
        average_steps: total_steps as f64 / games as f64,
        average_foundation_cards: total_foundation as f64 / games as f64,
        results,
    }
}

fn print_report(report: &Report) {
    for r in &report.results {
        println!(
            "seed {:>6}: {:<9} steps {:>5}  moves {:>4}  foundations {:>2}/52",
            r.seed,
            format!("{:?}", r.outcome),
            r.steps,
            r.moves,
            r.foundation_cards
        );
    }
    println!(
        "{} / {} won ({:.1}%), {:.1} steps and {:.1} foundation cards on average",
        report.wins,
        report.games,
        100.0 * report.wins as f64 / report.games as f64,
        report.average_steps,
        report.average_foundation_cards
    );
}
