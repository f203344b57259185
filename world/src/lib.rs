#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state management for Word Snake.
//!
//! The world owns the current [`Level`] value, the undo history and the
//! level catalog. Adapters drive it exclusively through [`apply`] with
//! [`Command`] values and observe it through broadcast [`Event`] values and
//! the read-only [`query`] functions. All rule evaluation happens in the
//! pure [`step`] function; `apply` adds only the stateful concerns around
//! it: history, victory detection and level advancement.

mod data;
mod level;

pub use data::{
    BorderData, CatalogError, LevelCatalog, LevelData, LevelDataError, SnakeData, WordData,
};
pub use level::{step, Level, StepOutcome};

use word_snake_core::{Command, Event};

/// Highest coordinate of the square play board; derived boundaries are
/// clamped to `0..=BOARD_EXTENT` on both axes.
pub const BOARD_EXTENT: i32 = 25;

/// Represents the authoritative Word Snake world state.
#[derive(Debug)]
pub struct World {
    catalog: LevelCatalog,
    level: Level,
    history: Vec<Level>,
}

impl World {
    /// Creates a new world with the catalog's first level loaded.
    pub fn new(catalog: LevelCatalog) -> Result<Self, CatalogError> {
        let first = catalog.get(0).ok_or(CatalogError::Empty)?;
        let level = Level::from_data(first, 0, None)
            .map_err(|source| CatalogError::Level { index: 0, source })?;

        Ok(Self {
            catalog,
            level,
            history: Vec::new(),
        })
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Move { direction } => match level::step(&world.level, direction) {
            StepOutcome::Rejected(reason) => {
                out_events.push(Event::MoveRejected { direction, reason });
            }
            StepOutcome::Advanced { level, completed } => {
                let from = world.level.snake().head().position();
                let to = from.offset_by(direction.offset());
                let was_escaped = world.level.snake_escaped();

                world.history.push(world.level.clone());
                world.level = level;
                out_events.push(Event::SnakeAdvanced { from, to });
                if let Some(color) = completed {
                    out_events.push(Event::WordCompleted { color });
                }

                if !was_escaped {
                    advance_level_on_escape(world, out_events);
                }
            }
        },
        Command::Undo => {
            if let Some(previous) = world.history.pop() {
                world.level = previous;
                out_events.push(Event::MoveUndone {
                    remaining: world.history.len(),
                });
            }
        }
    }
}

/// Loads the next catalog level once every snake block has left the
/// boundary, carrying the player's snake forward. Escaping past the final
/// level announces [`Event::PuzzleSolved`] instead.
fn advance_level_on_escape(world: &mut World, out_events: &mut Vec<Event>) {
    if !world.level.snake_escaped() {
        return;
    }

    let next = world.level.num().saturating_add(1);
    match world.catalog.get(next as usize) {
        Some(data) => {
            // Catalog templates are validated when the catalog is built.
            if let Ok(level) = Level::from_data(data, next, Some(world.level.snake().clone())) {
                world.level = level;
                out_events.push(Event::LevelAdvanced { num: next });
            }
        }
        None => out_events.push(Event::PuzzleSolved),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Level, World};

    /// Provides read-only access to the current level value.
    #[must_use]
    pub fn level(world: &World) -> &Level {
        &world.level
    }

    /// Zero-based index of the current level.
    #[must_use]
    pub fn level_number(world: &World) -> u32 {
        world.level.num()
    }

    /// Number of level values stored on the undo history.
    #[must_use]
    pub fn history_depth(world: &World) -> usize {
        world.history.len()
    }

    /// Number of level templates available in the catalog.
    #[must_use]
    pub fn catalog_len(world: &World) -> usize {
        world.catalog.len()
    }
}
