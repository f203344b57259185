#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Word Snake engine.
//!
//! This crate defines the value types and the message surface that connect
//! adapters, the authoritative world, and pure systems. Adapters and systems
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values describing what actually happened. Every type here is an immutable
//! value compared structurally; the rule engine never shares mutable state
//! with its callers.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Word Snake.";

/// Commands that express all permissible puzzle mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests that the snake advance a single step in the given direction.
    Move {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the most recent accepted transition be rolled back.
    Undo,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the snake's head advanced between two cells.
    SnakeAdvanced {
        /// Cell the head occupied before the move.
        from: GridVector,
        /// Cell the head occupies after the move.
        to: GridVector,
    },
    /// Reports that a move request was rejected by the rules.
    MoveRejected {
        /// Direction provided in the move request.
        direction: Direction,
        /// Specific rule that rejected the move.
        reason: RejectionReason,
    },
    /// Confirms that the snake completed a word and adopted its shape.
    WordCompleted {
        /// Color of the completed word, now worn by the snake.
        color: TileColor,
    },
    /// Announces that the snake escaped the level boundary.
    LevelAdvanced {
        /// Zero-based index of the freshly loaded level.
        num: u32,
    },
    /// Confirms that an undo request restored an earlier level state.
    MoveUndone {
        /// Number of history entries remaining after the restore.
        remaining: usize,
    },
    /// Announces that the final catalog level was escaped.
    PuzzleSolved,
}

/// Reasons the rule engine may reject a snake move.
///
/// A rejection is a normal outcome, not an error: the level is simply left
/// unchanged and input is cheap to re-attempt on the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// The candidate head cell is occupied by the snake itself.
    SelfCollision,
    /// The candidate head cell is occupied by a static word letter.
    LetterCollision,
    /// The candidate head cell lies on a border of a different color.
    BorderCrossing,
}

/// Four grid-aligned movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing x coordinates.
    Left,
    /// Movement toward increasing x coordinates.
    Right,
    /// Movement toward decreasing y coordinates.
    Up,
    /// Movement toward increasing y coordinates.
    Down,
}

impl Direction {
    /// Unit grid vector corresponding to the direction.
    #[must_use]
    pub const fn offset(self) -> GridVector {
        match self {
            Self::Left => GridVector::new(-1, 0),
            Self::Right => GridVector::new(1, 0),
            Self::Up => GridVector::new(0, -1),
            Self::Down => GridVector::new(0, 1),
        }
    }
}

/// Location of a single grid cell expressed as signed x and y coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridVector {
    x: i32,
    y: i32,
}

impl GridVector {
    /// Creates a new grid vector.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the vector.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component of the vector.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the vector translated by the provided offset.
    #[must_use]
    pub const fn offset_by(self, offset: GridVector) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }
}

/// CSS color string shared by snakes, words and borders.
///
/// Colors are compared by exact string match; the crossing rule and the
/// word-swap rule both rely on that equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileColor(String);

impl TileColor {
    /// Creates a new tile color from any CSS color string.
    #[must_use]
    pub fn new<T>(value: T) -> Self
    where
        T: Into<String>,
    {
        Self(value.into())
    }

    /// The underlying CSS color string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Single character carried by a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Letter(char);

impl Letter {
    /// Creates a new letter wrapper.
    #[must_use]
    pub const fn new(value: char) -> Self {
        Self(value)
    }

    /// Retrieves the underlying character.
    #[must_use]
    pub const fn get(&self) -> char {
        self.0
    }
}

/// A positioned single-letter tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    position: GridVector,
    letter: Letter,
}

impl Block {
    /// Creates a new block at the provided position.
    #[must_use]
    pub const fn new(position: GridVector, letter: Letter) -> Self {
        Self { position, letter }
    }

    /// Cell currently occupied by the block.
    #[must_use]
    pub const fn position(&self) -> GridVector {
        self.position
    }

    /// Letter carried by the block.
    #[must_use]
    pub const fn letter(&self) -> Letter {
        self.letter
    }

    /// Returns the block shifted by the provided offset, letter preserved.
    #[must_use]
    pub const fn moved_by(self, offset: GridVector) -> Self {
        Self {
            position: self.position.offset_by(offset),
            letter: self.letter,
        }
    }

    /// Returns the block jumped to the provided absolute position, letter
    /// preserved. Used when re-chaining a follower onto the cell its leader
    /// just vacated.
    #[must_use]
    pub const fn translated_to(self, position: GridVector) -> Self {
        Self {
            position,
            letter: self.letter,
        }
    }
}

/// Ordered chain of blocks driven by the player, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    blocks: Vec<Block>,
    color: TileColor,
}

impl Snake {
    /// Creates a new snake from the provided chain.
    ///
    /// Snakes hold at least one block; the world loader enforces this before
    /// any snake reaches the rule engine.
    #[must_use]
    pub fn new(blocks: Vec<Block>, color: TileColor) -> Self {
        Self { blocks, color }
    }

    /// Blocks composing the chain, head first.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Head block of the chain.
    #[must_use]
    pub fn head(&self) -> &Block {
        &self.blocks[0]
    }

    /// Display color of the chain.
    #[must_use]
    pub fn color(&self) -> &TileColor {
        &self.color
    }

    /// Attempts a single-step move, returning the advanced snake.
    ///
    /// The candidate head is the current head shifted one cell in
    /// `direction`. When the candidate cell is occupied by any current block
    /// of the chain (including the tail cell that is about to be vacated)
    /// the move is rejected and `None` is returned. Otherwise every trailing
    /// block jumps to the cell its leader previously occupied, letters
    /// preserved.
    #[must_use]
    pub fn advance(&self, direction: Direction) -> Option<Snake> {
        let candidate = self.blocks[0].moved_by(direction.offset());
        if self
            .blocks
            .iter()
            .any(|block| block.position() == candidate.position())
        {
            return None;
        }

        let mut blocks = Vec::with_capacity(self.blocks.len());
        blocks.push(candidate);
        for index in 1..self.blocks.len() {
            blocks.push(self.blocks[index].translated_to(self.blocks[index - 1].position()));
        }

        Some(Self {
            blocks,
            color: self.color.clone(),
        })
    }

    /// Finds the chain index of each sought block by value equality.
    ///
    /// Used to remap which chain positions become absent in the word left
    /// behind after a swap. Every sought block must be present in the chain;
    /// a miss indicates broken swap bookkeeping and panics rather than
    /// corrupting the absent set.
    #[must_use]
    pub fn block_indexes(&self, blocks_to_find: &[Block]) -> Vec<usize> {
        blocks_to_find
            .iter()
            .map(|sought| {
                self.blocks
                    .iter()
                    .position(|block| block == sought)
                    .unwrap_or_else(|| {
                        panic!("block {sought:?} is not part of the snake chain")
                    })
            })
            .collect()
    }
}

/// Fixed chain of blocks representing a hidden or revealed puzzle word.
///
/// Block order never changes. Indexes in `absent_indexes` mark the letters
/// the snake must currently cover to complete the word; all other letters
/// are static and block movement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    blocks: Vec<Block>,
    absent_indexes: BTreeSet<usize>,
    color: TileColor,
}

impl Word {
    /// Creates a new word.
    ///
    /// Absent indexes must address existing blocks; the world loader
    /// validates raw level data before constructing words.
    #[must_use]
    pub fn new(blocks: Vec<Block>, absent_indexes: BTreeSet<usize>, color: TileColor) -> Self {
        Self {
            blocks,
            absent_indexes,
            color,
        }
    }

    /// Blocks composing the word in fixed order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Indexes of the currently absent letters.
    #[must_use]
    pub fn absent_indexes(&self) -> &BTreeSet<usize> {
        &self.absent_indexes
    }

    /// Display color of the word.
    #[must_use]
    pub fn color(&self) -> &TileColor {
        &self.color
    }

    /// Blocks at absent indexes, the cells the snake must cover.
    #[must_use]
    pub fn absent_blocks(&self) -> Vec<Block> {
        self.absent_indexes
            .iter()
            .map(|&index| self.blocks[index])
            .collect()
    }

    /// Blocks at non-absent indexes, the static letters occupying the grid.
    #[must_use]
    pub fn existing_blocks(&self) -> Vec<Block> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.absent_indexes.contains(index))
            .map(|(_, block)| *block)
            .collect()
    }

    /// Reports whether the candidate blocks complete the word.
    ///
    /// A word with no absent letters can never complete; fully revealed
    /// words are permanently inert decorations.
    #[must_use]
    pub fn is_completed_by(&self, candidates: &[Block]) -> bool {
        if self.absent_indexes.is_empty() {
            return false;
        }

        self.absent_blocks()
            .iter()
            .all(|absent| candidates.contains(absent))
    }

    /// Reports whether the block's cell is occupied by a static letter.
    #[must_use]
    pub fn intersects(&self, block: &Block) -> bool {
        self.existing_blocks()
            .iter()
            .any(|existing| existing.position() == block.position())
    }

    /// Returns a word where absent letters matching the provided blocks have
    /// become static again.
    #[must_use]
    pub fn remove_from_absent(&self, blocks: &[Block]) -> Word {
        let absent_indexes = self
            .absent_indexes
            .iter()
            .copied()
            .filter(|&index| !blocks.contains(&self.blocks[index]))
            .collect();

        Self {
            blocks: self.blocks.clone(),
            absent_indexes,
            color: self.color.clone(),
        }
    }

    /// Returns a word where static letters matching the provided blocks have
    /// become absent, i.e. playable again.
    #[must_use]
    pub fn add_to_absent(&self, blocks_to_add: &[Block]) -> Word {
        let mut absent_indexes = self.absent_indexes.clone();
        for (index, block) in self.blocks.iter().enumerate() {
            if blocks_to_add.contains(block) {
                let _ = absent_indexes.insert(index);
            }
        }

        Self {
            blocks: self.blocks.clone(),
            absent_indexes,
            color: self.color.clone(),
        }
    }
}

/// Ordered polyline of grid vertices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<GridVector>,
}

impl Polyline {
    /// Creates a polyline from the provided vertices.
    #[must_use]
    pub fn new(points: Vec<GridVector>) -> Self {
        Self { points }
    }

    /// Vertices composing the polyline in drawing order.
    #[must_use]
    pub fn points(&self) -> &[GridVector] {
        &self.points
    }

    /// Rasterizes the polyline into the set of grid cells it passes through.
    ///
    /// Each segment is walked one `(signum(dx), signum(dy))` step at a time
    /// from the previous cell until the next vertex is reached, which leaves
    /// no gaps for the axis-aligned and 45-degree segments grid movement
    /// produces.
    #[must_use]
    pub fn trace_cells(&self) -> HashSet<GridVector> {
        let mut cells = HashSet::new();
        let Some(&first) = self.points.first() else {
            return cells;
        };

        let _ = cells.insert(first);
        let mut cursor = first;
        for &target in &self.points[1..] {
            while cursor != target {
                cursor = GridVector::new(
                    cursor.x() + (target.x() - cursor.x()).signum(),
                    cursor.y() + (target.y() - cursor.y()).signum(),
                );
                let _ = cells.insert(cursor);
            }
        }

        cells
    }

    /// Reports whether the position lies strictly inside the region bounded
    /// by the polyline.
    ///
    /// The cross product of each segment vector against the vector from the
    /// segment start to the position must carry one consistent strict sign
    /// across every segment. A zero cross product (the position sits exactly
    /// on a segment's line) counts as outside.
    #[must_use]
    pub fn contains(&self, position: GridVector) -> bool {
        if self.points.len() < 2 {
            return false;
        }

        let mut sign = 0i64;
        for pair in self.points.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let d = i64::from(end.x() - start.x()) * i64::from(position.y() - start.y())
                - i64::from(position.x() - start.x()) * i64::from(end.y() - start.y());
            if d == 0 {
                return false;
            }

            let segment_sign = d.signum();
            if sign == 0 {
                sign = segment_sign;
            } else if sign != segment_sign {
                return false;
            }
        }

        true
    }
}

/// Colored polyline that blocks snakes of every other color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Border {
    color: TileColor,
    line: Polyline,
}

impl Border {
    /// Creates a new border.
    #[must_use]
    pub fn new(color: TileColor, line: Polyline) -> Self {
        Self { color, line }
    }

    /// Display color of the border.
    #[must_use]
    pub fn color(&self) -> &TileColor {
        &self.color
    }

    /// Polyline traced by the border.
    #[must_use]
    pub fn line(&self) -> &Polyline {
        &self.line
    }

    /// Full set of grid cells the border passes through.
    #[must_use]
    pub fn occupied_cells(&self) -> HashSet<GridVector> {
        self.line.trace_cells()
    }

    /// Reports whether the position lies on one of the border's cells.
    #[must_use]
    pub fn crosses(&self, position: GridVector) -> bool {
        self.occupied_cells().contains(&position)
    }
}
