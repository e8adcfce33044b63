use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_appender::non_blocking::WorkerGuard;

use klondike::config::{project_paths, Paths};
use klondike::constants::LOG_FILE;
use klondike::display::{render_board, render_hint};
use klondike::drag::serialize_drag_payload;
use klondike::prefs::Preferences;
use klondike::results::{format_elapsed, Leaderboard};
use klondike::timer::GameTimer;
use klondike::{FoundationPolicy, Game, GameState, Selection};

const HELP: &str = "\
Commands:
  d              draw from the stock (recycles the waste when empty)
  m SRC DST      move by clicking (not counted)
  g SRC DST      move by dragging (counted when move tracking is on)
  u              undo
  h              hint
  n              new game
  q              quit
Piles: w (waste), f0-f3 (foundations), t0-t6 (tableau), t3:2 (card 2 of pile 3)";

#[derive(Parser)]
#[command(name = "klondike", about = "Klondike Solitaire in the terminal")]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand)]
#[command(rename_all = "kebab-case")]
enum Cmd {
    /// Play a game interactively
    Play {
        /// Seed for reproducible deals
        #[arg(long)]
        seed: Option<u64>,
        /// Allow the top foundation card to be moved back to the tableau
        #[arg(long, default_value_t = false)]
        draggable_foundations: bool,
    },
    /// Print completed games
    Scores {
        #[arg(long, value_enum, default_value_t = SortBy::Time)]
        by: SortBy,
    },
    /// Show or change preferences
    Prefs {
        #[arg(long, value_enum)]
        timer: Option<Toggle>,
        #[arg(long, value_enum)]
        moves: Option<Toggle>,
        #[arg(long, value_enum)]
        ask_again: Option<Toggle>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortBy {
    Time,
    Moves,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

impl Toggle {
    fn is_on(self) -> bool {
        matches!(self, Toggle::On)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = project_paths()?;
    // Keep the guard alive so buffered log lines are flushed on exit.
    let _guard = init_logging(&paths);
    tracing::info!("klondike starting");

    match cli.cmd.unwrap_or(Cmd::Play {
        seed: None,
        draggable_foundations: false,
    }) {
        Cmd::Play {
            seed,
            draggable_foundations,
        } => {
            let policy = if draggable_foundations {
                FoundationPolicy::TopCardDraggable
            } else {
                FoundationPolicy::Locked
            };
            play(&paths, seed, policy)
        }
        Cmd::Scores { by } => scores(&paths, by),
        Cmd::Prefs {
            timer,
            moves,
            ask_again,
        } => prefs(&paths, timer, moves, ask_again),
    }
}

// Logs go to a daily rolling file so stdout stays free for the table.
fn init_logging(paths: &Paths) -> Option<WorkerGuard> {
    std::fs::create_dir_all(&paths.log_dir).ok()?;
    let file_appender = tracing_appender::rolling::daily(&paths.log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    let env = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
        .ok()?;
    Some(guard)
}

fn play(paths: &Paths, seed: Option<u64>, policy: FoundationPolicy) -> Result<()> {
    let prefs = Preferences::load(&paths.prefs_file);
    let mut game = match seed {
        Some(seed) => Game::with_seed(policy, seed),
        None => Game::new(policy),
    };
    let mut timer = GameTimer::new(prefs.timer_enabled);
    let mut clock = Instant::now();
    let mut recorded = false;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}\n")?;
    print_table(&mut out, &game, &timer, &prefs)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read command")?;
        tick(&mut timer, &mut clock);

        let mut words = line.split_whitespace();
        match words.next() {
            None => continue,
            Some("q") => break,
            Some("d") => {
                game.draw();
            }
            Some("u") => {
                game.undo();
                resume_after_undo(&game, &mut timer, &mut recorded);
            }
            Some("h") => {
                writeln!(out, "{}", render_hint(game.show_hint().as_ref()))?;
                game.clear_hint();
                continue;
            }
            Some("n") => {
                if prefs.ask_again && !game.is_won() && !confirm(&mut out, &mut lines)? {
                    continue;
                }
                game.new_game();
                timer.reset();
                clock = Instant::now();
                recorded = false;
            }
            Some(cmd @ ("m" | "g")) => {
                let (from, to) = match parse_pair(words.next(), words.next()) {
                    Ok(pair) => pair,
                    Err(e) => {
                        writeln!(out, "{e:#}")?;
                        continue;
                    }
                };
                let result = if cmd == "g" {
                    let payload = serialize_drag_payload(&drag_source(game.state(), from));
                    game.drop_payload(&payload, to, prefs.move_tracking_enabled)
                        .map(|_| ())
                } else {
                    game.move_cards(from, to, false, prefs.move_tracking_enabled)
                        .map(|_| ())
                };
                if let Err(reason) = result {
                    writeln!(out, "Not allowed: {reason}")?;
                    continue;
                }
            }
            Some("?" | "help") => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Some(other) => {
                writeln!(out, "Unknown command '{other}'; type ? for help")?;
                continue;
            }
        }

        print_table(&mut out, &game, &timer, &prefs)?;
        if game.is_won() && !recorded {
            timer.set_active(false);
            record_win(paths, &timer, &game);
            writeln!(
                out,
                "You won in {} with {} moves!",
                timer.formatted(),
                game.moves()
            )?;
            recorded = true;
        }
    }
    Ok(())
}

// Undoing out of a won position puts the game back in play.
fn resume_after_undo(game: &Game, timer: &mut GameTimer, recorded: &mut bool) {
    if *recorded && !game.is_won() {
        timer.set_active(true);
        *recorded = false;
    }
}

/// A drag picks up a specific card, so a bare tableau pile means its top card.
fn drag_source(state: &GameState, from: Selection) -> Selection {
    match from {
        Selection::Tableau {
            index,
            card_index: None,
        } => state
            .tableau_column(index)
            .and_then(|cards| cards.len().checked_sub(1))
            .map_or(from, |top| Selection::tableau_card(index, top)),
        other => other,
    }
}

fn tick(timer: &mut GameTimer, clock: &mut Instant) {
    let whole = clock.elapsed().as_secs();
    if whole > 0 {
        timer.advance(whole);
        *clock += Duration::from_secs(whole);
    }
}

fn confirm<W: Write, I: Iterator<Item = io::Result<String>>>(
    out: &mut W,
    lines: &mut I,
) -> Result<bool> {
    write!(out, "Abandon this game and deal a new one? [y/N] ")?;
    out.flush()?;
    let answer = match lines.next() {
        Some(line) => line.context("read confirmation")?,
        None => return Ok(false),
    };
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn parse_pair(from: Option<&str>, to: Option<&str>) -> Result<(Selection, Selection)> {
    let from = from.ok_or_else(|| anyhow!("missing source pile"))?;
    let to = to.ok_or_else(|| anyhow!("missing destination pile"))?;
    let from: Selection = from.parse().with_context(|| format!("bad source '{from}'"))?;
    let to: Selection = to.parse().with_context(|| format!("bad destination '{to}'"))?;
    Ok((from, to))
}

fn print_table<W: Write>(
    out: &mut W,
    game: &Game,
    timer: &GameTimer,
    prefs: &Preferences,
) -> Result<()> {
    writeln!(out, "{}", render_board(game.state()))?;
    let mut status = Vec::new();
    if prefs.move_tracking_enabled {
        status.push(format!("Moves: {}", game.moves()));
    }
    if prefs.timer_enabled {
        status.push(format!("Time: {}", timer.formatted()));
    }
    if game.can_undo() {
        status.push("undo available".to_string());
    }
    if !status.is_empty() {
        writeln!(out, "{}", status.join("   "))?;
    }
    Ok(())
}

fn record_win(paths: &Paths, timer: &GameTimer, game: &Game) {
    let mut board = Leaderboard::load(&paths.results_file);
    let result = board.add_result(timer.elapsed_seconds(), game.moves());
    match board.save(&paths.results_file) {
        Ok(()) => tracing::info!(?result, "result recorded"),
        Err(e) => tracing::warn!(error = ?e, "failed to save result"),
    }
}

fn scores(paths: &Paths, by: SortBy) -> Result<()> {
    let board = Leaderboard::load(&paths.results_file);
    let sorted = match by {
        SortBy::Time => board.best_times(),
        SortBy::Moves => board.best_moves(),
    };
    if sorted.is_empty() {
        println!("No completed games yet.");
        return Ok(());
    }
    println!("{:>3}  {:>9}  {:>5}  {}", "#", "time", "moves", "finished (unix ms)");
    for (rank, result) in sorted.iter().enumerate() {
        println!(
            "{:>3}  {:>9}  {:>5}  {}",
            rank + 1,
            format_elapsed(result.elapsed_seconds),
            result.moves,
            result.timestamp
        );
    }
    Ok(())
}

fn prefs(
    paths: &Paths,
    timer: Option<Toggle>,
    moves: Option<Toggle>,
    ask_again: Option<Toggle>,
) -> Result<()> {
    let mut prefs = Preferences::load(&paths.prefs_file);
    let changed = timer.is_some() || moves.is_some() || ask_again.is_some();
    if let Some(t) = timer {
        prefs.timer_enabled = t.is_on();
    }
    if let Some(t) = moves {
        prefs.move_tracking_enabled = t.is_on();
    }
    if let Some(t) = ask_again {
        prefs.ask_again = t.is_on();
    }
    if changed {
        prefs
            .save(&paths.prefs_file)
            .context("save preferences")?;
    }
    println!("timer:      {}", on_off(prefs.timer_enabled));
    println!("moves:      {}", on_off(prefs.move_tracking_enabled));
    println!("ask again:  {}", on_off(prefs.ask_again));
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
