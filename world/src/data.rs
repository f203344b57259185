//! Serialized level shape, fail-fast hydration and the level catalog.
//!
//! The JSON shape is shared with the level editor; both sides agree on it by
//! construction because the editor emits [`LevelData`] values directly.
//! Hydration is explicit typed deserialization: malformed data is rejected
//! here with a descriptive error instead of leaking inconsistent words or
//! borders into the rule engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use word_snake_core::{Block, Border, GridVector, Polyline, Snake, TileColor, Word};

use crate::level::Level;
use crate::BOARD_EXTENT;

const BOUNDARY_MARGIN: i32 = 2;

/// Raw level template as stored in catalog JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    /// Snake template; `null` when the level expects the player's snake to
    /// be carried over from the previous level.
    pub snake: Option<SnakeData>,
    /// Word templates in display order.
    pub words: Vec<WordData>,
    /// Border templates in display order.
    pub borders: Vec<BorderData>,
    /// Boundary polyline used for victory detection; derived from the level
    /// content when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_border_line: Option<Vec<GridVector>>,
}

/// Snake template within a level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeData {
    /// Blocks composing the chain, head first.
    pub blocks: Vec<Block>,
    /// Display color of the chain.
    pub color: TileColor,
}

/// Word template within a level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordData {
    /// Blocks composing the word in fixed order.
    pub blocks: Vec<Block>,
    /// Indexes of the initially absent letters.
    pub absent_block_indexes: Vec<usize>,
    /// Display color of the word.
    pub color: TileColor,
}

/// Border template within a level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BorderData {
    /// Display color of the border.
    pub color: TileColor,
    /// Polyline vertices traced by the border.
    pub line: Vec<GridVector>,
}

/// Validation failures raised while hydrating raw level data.
#[derive(Debug, Error)]
pub enum LevelDataError {
    /// The template defines no snake and none was carried over.
    #[error("level defines no snake and none was carried over")]
    MissingSnake,
    /// The snake template holds no blocks.
    #[error("snake must hold at least one block")]
    EmptySnake,
    /// A word template holds no blocks.
    #[error("word {word} has no blocks")]
    EmptyWord {
        /// Index of the offending word within the template.
        word: usize,
    },
    /// An absent index does not address a block of its word.
    #[error("word {word} absent index {index} is out of range for {len} blocks")]
    AbsentIndexOutOfRange {
        /// Index of the offending word within the template.
        word: usize,
        /// Offending absent index.
        index: usize,
        /// Number of blocks the word holds.
        len: usize,
    },
    /// A border line holds fewer than two points.
    #[error("border {border} line holds {len} points but needs at least two")]
    ShortBorderLine {
        /// Index of the offending border within the template.
        border: usize,
        /// Number of points the line holds.
        len: usize,
    },
    /// A border line repeats a point consecutively.
    #[error("border {border} line repeats the point ({x}, {y}) consecutively")]
    RepeatedBorderPoint {
        /// Index of the offending border within the template.
        border: usize,
        /// Horizontal coordinate of the repeated point.
        x: i32,
        /// Vertical coordinate of the repeated point.
        y: i32,
    },
    /// The level border line holds fewer than two points.
    #[error("level border line holds {len} points but needs at least two")]
    ShortBoundaryLine {
        /// Number of points the line holds.
        len: usize,
    },
    /// The level border line repeats a point consecutively.
    #[error("level border line repeats the point ({x}, {y}) consecutively")]
    RepeatedBoundaryPoint {
        /// Horizontal coordinate of the repeated point.
        x: i32,
        /// Vertical coordinate of the repeated point.
        y: i32,
    },
}

impl Level {
    /// Hydrates a level from its raw template.
    ///
    /// A carried-over snake takes precedence over the template's own snake;
    /// this is how the player's snake persists across level advances. Every
    /// structural invariant is checked here so the rule engine never sees an
    /// inconsistent level.
    pub fn from_data(
        data: &LevelData,
        num: u32,
        carried: Option<Snake>,
    ) -> Result<Self, LevelDataError> {
        let snake = match carried {
            Some(snake) => snake,
            None => {
                let template = data.snake.as_ref().ok_or(LevelDataError::MissingSnake)?;
                Snake::new(template.blocks.clone(), template.color.clone())
            }
        };
        if snake.blocks().is_empty() {
            return Err(LevelDataError::EmptySnake);
        }

        let mut words = Vec::with_capacity(data.words.len());
        for (word_index, template) in data.words.iter().enumerate() {
            if template.blocks.is_empty() {
                return Err(LevelDataError::EmptyWord { word: word_index });
            }

            let mut absent_indexes = BTreeSet::new();
            for &index in &template.absent_block_indexes {
                if index >= template.blocks.len() {
                    return Err(LevelDataError::AbsentIndexOutOfRange {
                        word: word_index,
                        index,
                        len: template.blocks.len(),
                    });
                }
                let _ = absent_indexes.insert(index);
            }

            words.push(Word::new(
                template.blocks.clone(),
                absent_indexes,
                template.color.clone(),
            ));
        }

        let mut borders = Vec::with_capacity(data.borders.len());
        for (border_index, template) in data.borders.iter().enumerate() {
            if template.line.len() < 2 {
                return Err(LevelDataError::ShortBorderLine {
                    border: border_index,
                    len: template.line.len(),
                });
            }
            if let Some(point) = first_consecutive_repeat(&template.line) {
                return Err(LevelDataError::RepeatedBorderPoint {
                    border: border_index,
                    x: point.x(),
                    y: point.y(),
                });
            }

            borders.push(Border::new(
                template.color.clone(),
                Polyline::new(template.line.clone()),
            ));
        }

        let boundary = match &data.level_border_line {
            Some(line) => {
                if line.len() < 2 {
                    return Err(LevelDataError::ShortBoundaryLine { len: line.len() });
                }
                if let Some(point) = first_consecutive_repeat(line) {
                    return Err(LevelDataError::RepeatedBoundaryPoint {
                        x: point.x(),
                        y: point.y(),
                    });
                }
                Polyline::new(line.clone())
            }
            None => bounding_ring(&snake, &words),
        };

        Ok(Level::new(snake, words, borders, boundary, num))
    }

    /// Serializes the level back into its raw template shape.
    ///
    /// Hydrating the result reproduces the level, including a boundary that
    /// was derived at load time.
    #[must_use]
    pub fn to_data(&self) -> LevelData {
        LevelData {
            snake: Some(SnakeData {
                blocks: self.snake().blocks().to_vec(),
                color: self.snake().color().clone(),
            }),
            words: self
                .words()
                .iter()
                .map(|word| WordData {
                    blocks: word.blocks().to_vec(),
                    absent_block_indexes: word.absent_indexes().iter().copied().collect(),
                    color: word.color().clone(),
                })
                .collect(),
            borders: self
                .borders()
                .iter()
                .map(|border| BorderData {
                    color: border.color().clone(),
                    line: border.line().points().to_vec(),
                })
                .collect(),
            level_border_line: Some(self.boundary().points().to_vec()),
        }
    }
}

fn first_consecutive_repeat(line: &[GridVector]) -> Option<GridVector> {
    line.windows(2)
        .find(|pair| pair[0] == pair[1])
        .map(|pair| pair[0])
}

/// Derives the victory boundary for templates that omit one: the bounding
/// ring of all level content with a margin, clamped to the board.
fn bounding_ring(snake: &Snake, words: &[Word]) -> Polyline {
    let mut min = snake.head().position();
    let mut max = min;
    let positions = snake
        .blocks()
        .iter()
        .chain(words.iter().flat_map(|word| word.blocks().iter()))
        .map(Block::position);
    for position in positions {
        min = GridVector::new(min.x().min(position.x()), min.y().min(position.y()));
        max = GridVector::new(max.x().max(position.x()), max.y().max(position.y()));
    }

    let clamp = |value: i32| value.clamp(0, BOARD_EXTENT);
    let left = clamp(min.x() - BOUNDARY_MARGIN);
    let right = clamp(max.x() + BOUNDARY_MARGIN);
    let top = clamp(min.y() - BOUNDARY_MARGIN);
    let bottom = clamp(max.y() + BOUNDARY_MARGIN);

    Polyline::new(vec![
        GridVector::new(left, top),
        GridVector::new(right, top),
        GridVector::new(right, bottom),
        GridVector::new(left, bottom),
        GridVector::new(left, top),
    ])
}

/// Ordered collection of validated level templates.
///
/// The catalog replaces the ambient `levels` global of ad hoc sketches: the
/// loader receives it explicitly and never reaches into shared state.
#[derive(Clone, Debug)]
pub struct LevelCatalog {
    levels: Vec<LevelData>,
}

/// Failures raised while assembling a level catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog holds no levels.
    #[error("level catalog holds no levels")]
    Empty,
    /// The catalog JSON could not be parsed.
    #[error("catalog JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    /// A level template failed validation.
    #[error("catalog level {index} is invalid: {source}")]
    Level {
        /// Index of the offending level.
        index: usize,
        /// Underlying validation failure.
        source: LevelDataError,
    },
}

impl LevelCatalog {
    /// Assembles a catalog, validating every template eagerly.
    ///
    /// Templates without their own snake are probed with a placeholder
    /// carried-over snake, since they only ever load behind a level advance.
    pub fn new(levels: Vec<LevelData>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, data) in levels.iter().enumerate() {
            let carried = if data.snake.is_some() {
                None
            } else {
                Some(probe_snake())
            };
            let _ = Level::from_data(data, index as u32, carried)
                .map_err(|source| CatalogError::Level { index, source })?;
        }

        Ok(Self { levels })
    }

    /// Parses and validates a catalog from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let levels: Vec<LevelData> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// Number of levels in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Reports whether the catalog holds no levels. Never true for a
    /// constructed catalog; provided for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Retrieves the template at the provided index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LevelData> {
        self.levels.get(index)
    }

    /// Built-in demonstration level.
    #[must_use]
    pub fn demo() -> Self {
        // Known-good by construction; skips the probe pass.
        Self {
            levels: vec![demo_level()],
        }
    }
}

fn probe_snake() -> Snake {
    Snake::new(
        vec![Block::new(
            GridVector::new(0, 0),
            word_snake_core::Letter::new('?'),
        )],
        TileColor::new("probe"),
    )
}

fn demo_level() -> LevelData {
    fn blocks(cells: &[(i32, i32, char)]) -> Vec<Block> {
        cells
            .iter()
            .map(|&(x, y, letter)| {
                Block::new(GridVector::new(x, y), word_snake_core::Letter::new(letter))
            })
            .collect()
    }

    fn line(points: &[(i32, i32)]) -> Vec<GridVector> {
        points
            .iter()
            .map(|&(x, y)| GridVector::new(x, y))
            .collect()
    }

    LevelData {
        snake: Some(SnakeData {
            blocks: blocks(&[
                (1, 1, 'G'),
                (2, 1, 'R'),
                (3, 1, 'E'),
                (4, 1, 'E'),
                (5, 1, 'N'),
            ]),
            color: TileColor::new("green"),
        }),
        words: vec![
            WordData {
                blocks: blocks(&[(10, 15, 'R'), (11, 15, 'E'), (12, 15, 'D')]),
                absent_block_indexes: vec![1],
                color: TileColor::new("red"),
            },
            WordData {
                blocks: blocks(&[
                    (5, 10, 'Y'),
                    (6, 10, 'E'),
                    (7, 10, 'L'),
                    (7, 11, 'L'),
                    (7, 12, 'O'),
                    (6, 12, 'W'),
                ]),
                absent_block_indexes: vec![1],
                color: TileColor::new("yellow"),
            },
            WordData {
                blocks: blocks(&[(8, 9, 'N'), (8, 10, 'A'), (8, 11, 'V'), (8, 12, 'Y')]),
                absent_block_indexes: vec![3],
                color: TileColor::new("#001f3f"),
            },
            WordData {
                blocks: blocks(&[
                    (5, 11, 'B'),
                    (5, 12, 'L'),
                    (5, 13, 'A'),
                    (5, 14, 'C'),
                    (6, 14, 'K'),
                ]),
                absent_block_indexes: vec![1, 2],
                color: TileColor::new("black"),
            },
            WordData {
                blocks: blocks(&[(20, 2, 'B'), (21, 2, 'L'), (22, 2, 'U'), (23, 2, 'E')]),
                absent_block_indexes: vec![0],
                color: TileColor::new("blue"),
            },
            WordData {
                blocks: blocks(&[
                    (18, 6, 'U'),
                    (18, 5, 'L'),
                    (18, 4, 'T'),
                    (19, 4, 'R'),
                    (20, 4, 'A'),
                    (20, 5, 'V'),
                    (20, 6, 'I'),
                    (21, 6, 'O'),
                    (22, 6, 'L'),
                    (22, 5, 'E'),
                    (22, 4, 'T'),
                ]),
                absent_block_indexes: vec![0, 4],
                color: TileColor::new("#7f1ae5"),
            },
        ],
        borders: vec![
            BorderData {
                color: TileColor::new("#7f1ae5"),
                line: line(&[(0, 20), (24, 20)]),
            },
            BorderData {
                color: TileColor::new("pink"),
                line: line(&[(0, 0), (24, 0), (24, 24), (0, 24), (0, 0)]),
            },
        ],
        level_border_line: Some(line(&[(0, 0), (24, 0), (24, 24), (0, 24), (0, 0)])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_data() -> LevelData {
        demo_level()
    }

    #[test]
    fn demo_level_hydrates() {
        let level = Level::from_data(&demo_data(), 0, None).expect("demo level is valid");

        assert_eq!(level.snake().blocks().len(), 5);
        assert_eq!(level.words().len(), 6);
        assert_eq!(level.borders().len(), 2);
        assert_eq!(level.num(), 0);
    }

    #[test]
    fn carried_snake_takes_precedence_over_template() {
        let carried = Snake::new(
            vec![Block::new(
                GridVector::new(7, 7),
                word_snake_core::Letter::new('Z'),
            )],
            TileColor::new("blue"),
        );

        let level =
            Level::from_data(&demo_data(), 3, Some(carried.clone())).expect("valid level");
        assert_eq!(level.snake(), &carried);
        assert_eq!(level.num(), 3);
    }

    #[test]
    fn hydration_rejects_missing_snake() {
        let mut data = demo_data();
        data.snake = None;

        assert!(matches!(
            Level::from_data(&data, 0, None),
            Err(LevelDataError::MissingSnake)
        ));
    }

    #[test]
    fn hydration_rejects_out_of_range_absent_index() {
        let mut data = demo_data();
        data.words[0].absent_block_indexes = vec![3];

        assert!(matches!(
            Level::from_data(&data, 0, None),
            Err(LevelDataError::AbsentIndexOutOfRange {
                word: 0,
                index: 3,
                len: 3,
            })
        ));
    }

    #[test]
    fn hydration_rejects_empty_word() {
        let mut data = demo_data();
        data.words[2].blocks.clear();
        data.words[2].absent_block_indexes.clear();

        assert!(matches!(
            Level::from_data(&data, 0, None),
            Err(LevelDataError::EmptyWord { word: 2 })
        ));
    }

    #[test]
    fn hydration_rejects_single_point_border() {
        let mut data = demo_data();
        data.borders[0].line.truncate(1);

        assert!(matches!(
            Level::from_data(&data, 0, None),
            Err(LevelDataError::ShortBorderLine { border: 0, len: 1 })
        ));
    }

    #[test]
    fn hydration_rejects_repeated_border_point() {
        let mut data = demo_data();
        data.borders[1].line.insert(1, GridVector::new(0, 0));

        assert!(matches!(
            Level::from_data(&data, 0, None),
            Err(LevelDataError::RepeatedBorderPoint { border: 1, x: 0, y: 0 })
        ));
    }

    #[test]
    fn missing_boundary_is_derived_from_content() {
        let mut data = demo_data();
        data.level_border_line = None;

        let level = Level::from_data(&data, 0, None).expect("valid level");

        // Content spans x 1..=23, y 1..=15; the ring adds a two-cell margin
        // clamped to the board.
        assert_eq!(
            level.boundary().points(),
            &[
                GridVector::new(0, 0),
                GridVector::new(25, 0),
                GridVector::new(25, 17),
                GridVector::new(0, 17),
                GridVector::new(0, 0),
            ]
        );
    }

    #[test]
    fn level_round_trips_through_data() {
        let level = Level::from_data(&demo_data(), 0, None).expect("valid level");
        let data = level.to_data();
        let restored = Level::from_data(&data, 0, None).expect("serialized level is valid");

        assert_eq!(restored, level);
    }

    #[test]
    fn level_data_round_trips_through_json() {
        let data = demo_data();
        let json = serde_json::to_string(&data).expect("serialize");
        let restored: LevelData = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(restored, data);
    }

    #[test]
    fn level_data_uses_the_documented_field_names() {
        let json = serde_json::to_string(&demo_data()).expect("serialize");

        assert!(json.contains("\"absentBlockIndexes\""));
        assert!(json.contains("\"levelBorderLine\""));
        assert!(json.contains("\"position\""));
        assert!(json.contains("\"letter\""));
    }

    #[test]
    fn catalog_rejects_empty_level_list() {
        assert!(matches!(
            LevelCatalog::new(Vec::new()),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn catalog_reports_invalid_template_with_its_index() {
        let mut broken = demo_data();
        broken.words[0].absent_block_indexes = vec![99];

        let result = LevelCatalog::new(vec![demo_data(), broken]);
        assert!(matches!(
            result,
            Err(CatalogError::Level { index: 1, .. })
        ));
    }

    #[test]
    fn catalog_accepts_snakeless_followup_levels() {
        let mut followup = demo_data();
        followup.snake = None;

        let catalog =
            LevelCatalog::new(vec![demo_data(), followup]).expect("catalog validates");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn catalog_parses_from_json() {
        let json = serde_json::to_string(&vec![demo_data()]).expect("serialize");
        let catalog = LevelCatalog::from_json(&json).expect("catalog parses");

        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());
        assert!(catalog.get(0).is_some());
        assert!(catalog.get(1).is_none());
    }
}
