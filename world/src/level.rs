//! Immutable level values and the pure per-tick rule engine.

use std::collections::BTreeSet;

use word_snake_core::{
    Border, Direction, GridVector, Polyline, RejectionReason, Snake, TileColor, Word,
};

/// Complete state of a single puzzle level.
///
/// Levels are immutable values: every accepted transition produces a new
/// [`Level`], which is what makes the undo history and the renderer's
/// changed-since-last-frame check plain value comparisons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    snake: Snake,
    words: Vec<Word>,
    borders: Vec<Border>,
    boundary: Polyline,
    num: u32,
}

impl Level {
    /// Creates a new level from its parts.
    ///
    /// Callers are expected to hand in validated parts; raw level data goes
    /// through `Level::from_data` instead.
    #[must_use]
    pub fn new(
        snake: Snake,
        words: Vec<Word>,
        borders: Vec<Border>,
        boundary: Polyline,
        num: u32,
    ) -> Self {
        Self {
            snake,
            words,
            borders,
            boundary,
            num,
        }
    }

    /// The player's snake.
    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Words placed in the level.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Borders placed in the level.
    #[must_use]
    pub fn borders(&self) -> &[Border] {
        &self.borders
    }

    /// Boundary polyline used for victory detection.
    #[must_use]
    pub fn boundary(&self) -> &Polyline {
        &self.boundary
    }

    /// Zero-based index of the level within its catalog.
    #[must_use]
    pub const fn num(&self) -> u32 {
        self.num
    }

    /// Reports whether every snake block has left the boundary region.
    #[must_use]
    pub fn snake_escaped(&self) -> bool {
        self.snake
            .blocks()
            .iter()
            .all(|block| !self.boundary.contains(block.position()))
    }

    /// Returns the level translated by the provided offset.
    #[must_use]
    pub fn shifted(&self, offset: GridVector) -> Level {
        let snake = Snake::new(
            self.snake
                .blocks()
                .iter()
                .map(|block| block.moved_by(offset))
                .collect(),
            self.snake.color().clone(),
        );
        let words = self
            .words
            .iter()
            .map(|word| {
                Word::new(
                    word.blocks().iter().map(|block| block.moved_by(offset)).collect(),
                    word.absent_indexes().clone(),
                    word.color().clone(),
                )
            })
            .collect();
        let borders = self
            .borders
            .iter()
            .map(|border| {
                Border::new(
                    border.color().clone(),
                    shift_line(border.line(), offset),
                )
            })
            .collect();

        Self {
            snake,
            words,
            borders,
            boundary: shift_line(&self.boundary, offset),
            num: self.num,
        }
    }
}

fn shift_line(line: &Polyline, offset: GridVector) -> Polyline {
    Polyline::new(
        line.points()
            .iter()
            .map(|point| point.offset_by(offset))
            .collect(),
    )
}

/// Outcome of a single rule-engine tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The move broke a rule; the caller keeps its current level.
    Rejected(RejectionReason),
    /// The move was accepted and produced a new level value.
    Advanced {
        /// Level resulting from the accepted move.
        level: Level,
        /// Color of the word the snake completed, if the move swapped.
        completed: Option<TileColor>,
    },
}

/// Applies one move to a level, producing the next level value.
///
/// This is a pure function: it performs no I/O, touches no ambient state and
/// never panics on well-formed levels. Rules run in order (snake
/// self-collision, collision with a static word letter, crossing a border of
/// a different color) and the first violation rejects the move. An accepted
/// move then checks the words for completion: covering every absent letter
/// of a word makes the snake adopt that word's shape and color, while the
/// snake's former chain is left behind as the word to complete next.
#[must_use]
pub fn step(level: &Level, direction: Direction) -> StepOutcome {
    let Some(moved) = level.snake().advance(direction) else {
        return StepOutcome::Rejected(RejectionReason::SelfCollision);
    };

    let head = moved.head();
    if level.words().iter().any(|word| word.intersects(head)) {
        return StepOutcome::Rejected(RejectionReason::LetterCollision);
    }

    if level
        .borders()
        .iter()
        .any(|border| border.color() != moved.color() && border.crosses(head.position()))
    {
        return StepOutcome::Rejected(RejectionReason::BorderCrossing);
    }

    for (completed_index, word) in level.words().iter().enumerate() {
        if !word.is_completed_by(moved.blocks()) {
            continue;
        }

        let adopted = Snake::new(word.blocks().to_vec(), word.color().clone());
        let shed_indexes: BTreeSet<usize> = moved
            .block_indexes(&word.absent_blocks())
            .into_iter()
            .collect();
        let words = level
            .words()
            .iter()
            .enumerate()
            .map(|(index, other)| {
                if index == completed_index {
                    Word::new(moved.blocks().to_vec(), shed_indexes.clone(), moved.color().clone())
                } else {
                    other
                        .remove_from_absent(moved.blocks())
                        .add_to_absent(word.blocks())
                }
            })
            .collect();

        return StepOutcome::Advanced {
            level: Level {
                snake: adopted,
                words,
                borders: level.borders.clone(),
                boundary: level.boundary.clone(),
                num: level.num,
            },
            completed: Some(word.color().clone()),
        };
    }

    StepOutcome::Advanced {
        level: Level {
            snake: moved,
            words: level.words.clone(),
            borders: level.borders.clone(),
            boundary: level.boundary.clone(),
            num: level.num,
        },
        completed: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use word_snake_core::{Block, Letter};

    fn block(x: i32, y: i32, letter: char) -> Block {
        Block::new(GridVector::new(x, y), Letter::new(letter))
    }

    fn ring(min: i32, max: i32) -> Polyline {
        Polyline::new(vec![
            GridVector::new(min, min),
            GridVector::new(max, min),
            GridVector::new(max, max),
            GridVector::new(min, max),
            GridVector::new(min, min),
        ])
    }

    fn bare_level(snake: Snake, words: Vec<Word>, borders: Vec<Border>) -> Level {
        Level::new(snake, words, borders, ring(0, 24), 0)
    }

    fn two_block_snake() -> Snake {
        Snake::new(
            vec![block(5, 5, 'O'), block(6, 5, 'K')],
            TileColor::new("green"),
        )
    }

    #[test]
    fn step_rejects_reversal_as_self_collision() {
        let level = bare_level(two_block_snake(), Vec::new(), Vec::new());

        assert_eq!(
            step(&level, Direction::Right),
            StepOutcome::Rejected(RejectionReason::SelfCollision)
        );
    }

    #[test]
    fn step_rejects_landing_on_existing_word_letter() {
        let word = Word::new(
            vec![block(4, 5, 'A'), block(4, 6, 'B')],
            std::collections::BTreeSet::from([1]),
            TileColor::new("red"),
        );
        let level = bare_level(two_block_snake(), vec![word], Vec::new());

        assert_eq!(
            step(&level, Direction::Left),
            StepOutcome::Rejected(RejectionReason::LetterCollision)
        );
    }

    #[test]
    fn step_rejects_crossing_a_foreign_border() {
        let border = Border::new(
            TileColor::new("pink"),
            Polyline::new(vec![GridVector::new(0, 4), GridVector::new(10, 4)]),
        );
        let level = bare_level(two_block_snake(), Vec::new(), vec![border]);

        assert_eq!(
            step(&level, Direction::Up),
            StepOutcome::Rejected(RejectionReason::BorderCrossing)
        );
    }

    #[test]
    fn step_allows_crossing_a_border_of_own_color() {
        let border = Border::new(
            TileColor::new("green"),
            Polyline::new(vec![GridVector::new(0, 4), GridVector::new(10, 4)]),
        );
        let level = bare_level(two_block_snake(), Vec::new(), vec![border]);

        match step(&level, Direction::Up) {
            StepOutcome::Advanced { level, completed } => {
                assert_eq!(level.snake().head().position(), GridVector::new(5, 4));
                assert!(completed.is_none());
            }
            other => panic!("expected accepted move, got {other:?}"),
        }
    }

    #[test]
    fn accepted_step_replaces_only_the_snake() {
        let level = bare_level(two_block_snake(), Vec::new(), Vec::new());

        match step(&level, Direction::Down) {
            StepOutcome::Advanced { level: next, completed } => {
                assert!(completed.is_none());
                assert_eq!(next.snake().head().position(), GridVector::new(5, 6));
                assert_eq!(next.snake().blocks()[1].position(), GridVector::new(5, 5));
                assert_eq!(next.words(), level.words());
                assert_eq!(next.borders(), level.borders());
                assert_eq!(next.num(), level.num());
            }
            other => panic!("expected accepted move, got {other:?}"),
        }
    }

    #[test]
    fn completing_a_word_swaps_shapes_and_colors() {
        // Completion matches blocks by position AND letter, so the snake's
        // own 'O' must be the block that lands on the word's absent 'O'.
        let snake = Snake::new(
            vec![block(3, 7, 'O'), block(2, 7, 'K')],
            TileColor::new("green"),
        );
        let word = Word::new(
            vec![block(3, 8, 'O'), block(4, 8, 'B')],
            std::collections::BTreeSet::from([0]),
            TileColor::new("red"),
        );
        let level = bare_level(snake, vec![word.clone()], Vec::new());

        match step(&level, Direction::Down) {
            StepOutcome::Advanced { level: next, completed } => {
                assert_eq!(completed, Some(TileColor::new("red")));
                assert_eq!(next.snake().blocks(), word.blocks());
                assert_eq!(next.snake().color(), &TileColor::new("red"));

                let left_behind = &next.words()[0];
                assert_eq!(
                    left_behind.blocks(),
                    &[block(3, 8, 'O'), block(3, 7, 'K')]
                );
                assert_eq!(
                    left_behind.absent_indexes(),
                    &std::collections::BTreeSet::from([0])
                );
                assert_eq!(left_behind.color(), &TileColor::new("green"));
            }
            other => panic!("expected swap, got {other:?}"),
        }
    }

    #[test]
    fn snake_escapes_only_when_every_block_is_outside() {
        let straddling = Snake::new(
            vec![block(24, 5, 'G'), block(23, 5, 'O')],
            TileColor::new("green"),
        );
        let level = Level::new(straddling, Vec::new(), Vec::new(), ring(0, 24), 0);
        assert!(!level.snake_escaped());

        let outside = Snake::new(
            vec![block(26, 5, 'G'), block(25, 5, 'O')],
            TileColor::new("green"),
        );
        let level = Level::new(outside, Vec::new(), Vec::new(), ring(0, 24), 0);
        assert!(level.snake_escaped());
    }

    #[test]
    fn block_on_the_boundary_line_counts_as_escaped() {
        // The containment test is strict, so a block sitting exactly on the
        // ring is already outside.
        let on_line = Snake::new(vec![block(24, 5, 'G')], TileColor::new("green"));
        let level = Level::new(on_line, Vec::new(), Vec::new(), ring(0, 24), 0);

        assert!(level.snake_escaped());
    }

    #[test]
    fn shifting_translates_every_component() {
        let word = Word::new(
            vec![block(1, 2, 'A')],
            std::collections::BTreeSet::new(),
            TileColor::new("red"),
        );
        let border = Border::new(
            TileColor::new("pink"),
            Polyline::new(vec![GridVector::new(0, 0), GridVector::new(3, 0)]),
        );
        let level = bare_level(two_block_snake(), vec![word], vec![border]);

        let shifted = level.shifted(GridVector::new(2, -1));

        assert_eq!(shifted.snake().head().position(), GridVector::new(7, 4));
        assert_eq!(shifted.words()[0].blocks()[0].position(), GridVector::new(3, 1));
        assert_eq!(shifted.borders()[0].line().points()[1], GridVector::new(5, -1));
        assert_eq!(shifted.boundary().points()[0], GridVector::new(2, -1));
        assert_eq!(shifted.num(), level.num());
    }
}
