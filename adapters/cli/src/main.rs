#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Word Snake experience.

mod ascii;
mod level_transfer;

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use word_snake_core::{Command, Direction, Event, GridVector, RejectionReason, WELCOME_BANNER};
use word_snake_rendering::{scene_from_level, FrameGate, RenderingBackend};
use word_snake_world::{apply, query, Level, LevelCatalog, World};

use ascii::AsciiBackend;

#[derive(Parser)]
#[command(name = "word-snake", about = "Word Snake puzzle engine")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Play a level catalog on an ASCII board.
    Play {
        /// Level catalog JSON file; the built-in demo level when omitted.
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Scripted moves applied without prompting: l, r, u, d move the
        /// snake, z undoes. Omit to play from stdin.
        #[arg(long)]
        moves: Option<String>,
    },
    /// Validate a level catalog file without playing it.
    Validate {
        /// Level catalog JSON file to check.
        catalog: PathBuf,
    },
    /// Print a shareable single-line encoding of one level.
    Export {
        /// Level catalog JSON file; the built-in demo level when omitted.
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Zero-based index of the level to export.
        #[arg(long, default_value_t = 0)]
        level: usize,
        /// Cells to shift the level right before exporting.
        #[arg(long, default_value_t = 0)]
        shift_x: i32,
        /// Cells to shift the level down before exporting.
        #[arg(long, default_value_t = 0)]
        shift_y: i32,
    },
    /// Decode a shared level back into catalog JSON.
    Import {
        /// Shared level string produced by `export`.
        payload: String,
    },
}

/// Entry point for the Word Snake command-line interface.
fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        CliCommand::Play { catalog, moves } => play(catalog.as_deref(), moves.as_deref()),
        CliCommand::Validate { catalog } => validate(&catalog),
        CliCommand::Export {
            catalog,
            level,
            shift_x,
            shift_y,
        } => export(catalog.as_deref(), level, GridVector::new(shift_x, shift_y)),
        CliCommand::Import { payload } => import(&payload),
    }
}

fn play(catalog: Option<&Path>, moves: Option<&str>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog)?;
    let mut world = World::new(catalog).context("catalog failed to boot")?;

    let stdout = io::stdout();
    let mut backend = AsciiBackend::new(stdout.lock());
    let mut gate = FrameGate::new();

    println!("{WELCOME_BANNER}");
    present_if_changed(&mut gate, &mut backend, query::level(&world))?;

    match moves {
        Some(script) => {
            for command in parse_moves(script)? {
                drive(&mut world, command, &mut gate, &mut backend)?;
            }
        }
        None => {
            println!("moves: l, r, u, d; z undoes; q quits");
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("could not read stdin")?;
                let trimmed = line.trim();
                if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
                    break;
                }

                match parse_moves(trimmed) {
                    Ok(commands) => {
                        for command in commands {
                            drive(&mut world, command, &mut gate, &mut backend)?;
                        }
                    }
                    Err(error) => println!("{error}"),
                }
            }
        }
    }

    Ok(())
}

fn drive<W: Write>(
    world: &mut World,
    command: Command,
    gate: &mut FrameGate,
    backend: &mut AsciiBackend<W>,
) -> anyhow::Result<()> {
    let mut events = Vec::new();
    apply(world, command, &mut events);
    for event in &events {
        println!("{}", describe_event(event));
    }

    present_if_changed(gate, backend, query::level(world))
}

fn present_if_changed<W: Write>(
    gate: &mut FrameGate,
    backend: &mut AsciiBackend<W>,
    level: &Level,
) -> anyhow::Result<()> {
    if gate.should_present(level) {
        backend.present(&scene_from_level(level))?;
    }

    Ok(())
}

fn validate(catalog: &Path) -> anyhow::Result<()> {
    let catalog = load_catalog(Some(catalog))?;
    println!("catalog OK: {} level(s)", catalog.len());
    Ok(())
}

fn export(catalog: Option<&Path>, index: usize, shift: GridVector) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog)?;
    let data = catalog
        .get(index)
        .ok_or_else(|| anyhow!("catalog has no level {index}"))?;
    let level = Level::from_data(data, index as u32, None)
        .with_context(|| format!("level {index} is not exportable on its own"))?;

    let shifted = level.shifted(shift);
    println!("{}", level_transfer::encode(&shifted.to_data()));
    Ok(())
}

fn import(payload: &str) -> anyhow::Result<()> {
    let data = level_transfer::decode(payload)?;
    // Surface broken shares immediately instead of at play time.
    let _ = LevelCatalog::new(vec![data.clone()]).context("shared level failed validation")?;

    let json = serde_json::to_string_pretty(&data).context("could not format level JSON")?;
    println!("{json}");
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<LevelCatalog> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("could not read catalog file {}", path.display()))?;
            LevelCatalog::from_json(&json).context("catalog failed validation")
        }
        None => Ok(LevelCatalog::demo()),
    }
}

fn parse_moves(script: &str) -> anyhow::Result<Vec<Command>> {
    script
        .chars()
        .filter(|key| !key.is_whitespace() && *key != ',')
        .map(|key| {
            command_for_key(key)
                .ok_or_else(|| anyhow!("unknown move '{key}' (expected l, r, u, d or z)"))
        })
        .collect()
}

fn command_for_key(key: char) -> Option<Command> {
    match key.to_ascii_lowercase() {
        'l' => Some(Command::Move {
            direction: Direction::Left,
        }),
        'r' => Some(Command::Move {
            direction: Direction::Right,
        }),
        'u' => Some(Command::Move {
            direction: Direction::Up,
        }),
        'd' => Some(Command::Move {
            direction: Direction::Down,
        }),
        'z' => Some(Command::Undo),
        _ => None,
    }
}

fn describe_event(event: &Event) -> String {
    match event {
        Event::SnakeAdvanced { from, to } => format!(
            "moved ({}, {}) -> ({}, {})",
            from.x(),
            from.y(),
            to.x(),
            to.y()
        ),
        Event::MoveRejected { reason, .. } => {
            format!("move rejected: {}", describe_rejection(*reason))
        }
        Event::WordCompleted { color } => format!("completed the {} word", color.as_str()),
        Event::LevelAdvanced { num } => format!("level {num}"),
        Event::MoveUndone { remaining } => format!("undone ({remaining} left)"),
        Event::PuzzleSolved => "puzzle solved".to_owned(),
    }
}

fn describe_rejection(reason: RejectionReason) -> &'static str {
    match reason {
        RejectionReason::SelfCollision => "the snake blocks its own path",
        RejectionReason::LetterCollision => "a word letter is in the way",
        RejectionReason::BorderCrossing => "a border of another color is in the way",
    }
}
