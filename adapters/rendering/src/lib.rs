#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Word Snake adapters.
//!
//! Backends never read the world directly: they receive a [`Scene`] built
//! from an immutable [`Level`] snapshot and draw that. The [`FrameGate`]
//! implements the redraw contract: a frame is presented only when the level
//! value actually changed since the last presented frame.

use anyhow::Result as AnyResult;
use glam::Vec2;
use word_snake_core::{GridVector, Letter, TileColor};
use word_snake_world::{Level, BOARD_EXTENT};

/// Single letter cell ready for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphPresentation {
    /// Grid cell the glyph occupies.
    pub cell: GridVector,
    /// Letter drawn in the cell.
    pub letter: Letter,
    /// CSS color the glyph is drawn with.
    pub color: TileColor,
    /// Absent word letters render dimmed as a hint of what is missing.
    pub dimmed: bool,
}

impl GlyphPresentation {
    /// Creates a new glyph descriptor.
    #[must_use]
    pub const fn new(cell: GridVector, letter: Letter, color: TileColor, dimmed: bool) -> Self {
        Self {
            cell,
            letter,
            color,
            dimmed,
        }
    }

    /// Top-left corner of the glyph's cell in world units.
    #[must_use]
    pub fn world_origin(&self, cell_length: f32) -> Vec2 {
        Vec2::new(
            self.cell.x() as f32 * cell_length,
            self.cell.y() as f32 * cell_length,
        )
    }
}

/// Polyline stroke ready for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrokePresentation {
    /// Vertices of the stroke in grid coordinates.
    pub points: Vec<GridVector>,
    /// CSS color the stroke is drawn with.
    pub color: TileColor,
}

impl StrokePresentation {
    /// Creates a new stroke descriptor.
    #[must_use]
    pub fn new(points: Vec<GridVector>, color: TileColor) -> Self {
        Self { points, color }
    }

    /// Vertices in world units, centered within their cells.
    #[must_use]
    pub fn world_points(&self, cell_length: f32) -> Vec<Vec2> {
        self.points
            .iter()
            .map(|point| {
                Vec2::new(
                    point.x() as f32 * cell_length + cell_length / 2.0,
                    point.y() as f32 * cell_length + cell_length / 2.0,
                )
            })
            .collect()
    }
}

/// Scene description combining the snake, the word letters and the borders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Snake glyphs, head first.
    pub snake: Vec<GlyphPresentation>,
    /// Word glyphs; absent letters are flagged dimmed.
    pub letters: Vec<GlyphPresentation>,
    /// Border strokes in display order.
    pub strokes: Vec<StrokePresentation>,
    /// Number of cells along each board axis.
    pub extent: i32,
}

impl Scene {
    /// Highest cell coordinate the scene spans on either axis.
    #[must_use]
    pub const fn extent(&self) -> i32 {
        self.extent
    }
}

/// Builds a scene snapshot from the provided level value.
#[must_use]
pub fn scene_from_level(level: &Level) -> Scene {
    let snake = level
        .snake()
        .blocks()
        .iter()
        .map(|block| {
            GlyphPresentation::new(
                block.position(),
                block.letter(),
                level.snake().color().clone(),
                false,
            )
        })
        .collect();

    let mut letters = Vec::new();
    for word in level.words() {
        for (index, block) in word.blocks().iter().enumerate() {
            letters.push(GlyphPresentation::new(
                block.position(),
                block.letter(),
                word.color().clone(),
                word.absent_indexes().contains(&index),
            ));
        }
    }

    let strokes = level
        .borders()
        .iter()
        .map(|border| {
            StrokePresentation::new(border.line().points().to_vec(), border.color().clone())
        })
        .collect();

    Scene {
        snake,
        letters,
        strokes,
        extent: BOARD_EXTENT,
    }
}

/// Dirty check deciding whether a frame needs to be presented.
///
/// Levels are immutable values, so a plain equality comparison against the
/// last presented level is all the renderer needs.
#[derive(Debug, Default)]
pub struct FrameGate {
    presented: Option<Level>,
}

impl FrameGate {
    /// Creates a gate that will present the first frame unconditionally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether the level changed since the last presented frame and
    /// records it as presented when it did.
    pub fn should_present(&mut self, level: &Level) -> bool {
        if self.presented.as_ref() == Some(level) {
            return false;
        }

        self.presented = Some(level.clone());
        true
    }
}

/// Rendering backend capable of presenting Word Snake scenes.
pub trait RenderingBackend {
    /// Presents a single scene frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}
