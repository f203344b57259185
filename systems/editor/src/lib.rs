#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure level-editing system that assembles words and borders into level
//! data.
//!
//! The editor is a UI-free state machine: an adapter feeds it cursor moves,
//! letters and mode switches, and reads back its drafts for presentation.
//! Finished content is exported as [`LevelData`], the same shape the world
//! loader hydrates, so the editor and the game agree on the level format by
//! construction.

use std::collections::BTreeSet;

use word_snake_core::{Block, Border, Direction, GridVector, Letter, Polyline, TileColor, Word};
use word_snake_world::{BorderData, LevelData, WordData};

const DEFAULT_COLOR: &str = "red";

/// Editing modes the editor cycles through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorMode {
    /// No entity is being edited; switching here saves pending drafts.
    Idle,
    /// A word draft is under construction.
    WordEdit,
    /// A border polyline draft is under construction.
    BorderEdit,
}

/// Mode-gated editing system that builds level content interactively.
#[derive(Clone, Debug)]
pub struct Editor {
    cursor: GridVector,
    words: Vec<Word>,
    borders: Vec<Border>,
    draft_blocks: Vec<Block>,
    draft_absent: BTreeSet<usize>,
    draft_line: Vec<GridVector>,
    active_color: TileColor,
    mode: EditorMode,
}

impl Editor {
    /// Creates an empty editor parked at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursor: GridVector::new(0, 0),
            words: Vec::new(),
            borders: Vec::new(),
            draft_blocks: Vec::new(),
            draft_absent: BTreeSet::new(),
            draft_line: Vec::new(),
            active_color: TileColor::new(DEFAULT_COLOR),
            mode: EditorMode::Idle,
        }
    }

    /// Current editing mode.
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Cell the cursor currently occupies.
    #[must_use]
    pub const fn cursor(&self) -> GridVector {
        self.cursor
    }

    /// Words saved so far.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Borders saved so far.
    #[must_use]
    pub fn borders(&self) -> &[Border] {
        &self.borders
    }

    /// Blocks of the word draft under construction.
    #[must_use]
    pub fn draft_blocks(&self) -> &[Block] {
        &self.draft_blocks
    }

    /// Absent indexes of the word draft under construction.
    #[must_use]
    pub fn draft_absent(&self) -> &BTreeSet<usize> {
        &self.draft_absent
    }

    /// Points of the border draft under construction.
    #[must_use]
    pub fn draft_line(&self) -> &[GridVector] {
        &self.draft_line
    }

    /// Color applied to newly created entities.
    #[must_use]
    pub fn active_color(&self) -> &TileColor {
        &self.active_color
    }

    /// Changes the color applied to newly created entities.
    pub fn set_active_color(&mut self, color: TileColor) {
        self.active_color = color;
    }

    /// Leaves the current mode, saving any pending draft.
    pub fn enter_idle(&mut self) {
        if self.mode == EditorMode::Idle {
            return;
        }

        self.save_draft();
        self.mode = EditorMode::Idle;
    }

    /// Switches into word editing, saving any pending draft first.
    ///
    /// When the cursor rests on a block of an already saved word, that word
    /// is lifted back into the draft for re-editing, and its color becomes
    /// the active color.
    pub fn enter_word_edit(&mut self) {
        if self.mode == EditorMode::WordEdit {
            return;
        }

        self.save_draft();
        self.mode = EditorMode::WordEdit;

        let picked = self.words.iter().position(|word| {
            word.blocks()
                .iter()
                .any(|block| block.position() == self.cursor)
        });
        if let Some(index) = picked {
            let word = self.words.remove(index);
            self.draft_blocks = word.blocks().to_vec();
            self.draft_absent = word.absent_indexes().clone();
            self.active_color = word.color().clone();
        }
    }

    /// Switches into border editing, saving any pending draft first.
    pub fn enter_border_edit(&mut self) {
        if self.mode == EditorMode::BorderEdit {
            return;
        }

        self.save_draft();
        self.mode = EditorMode::BorderEdit;
    }

    /// Moves the cursor one cell, subject to the active mode's guards.
    ///
    /// While drafting a word the cursor may only wander onto existing draft
    /// blocks, or anywhere when extending from the draft's tail (or when the
    /// draft is still empty). While drafting a border the cursor stays in
    /// the row or column of the last placed point, keeping segments
    /// axis-aligned.
    pub fn move_cursor(&mut self, direction: Direction) {
        let desired = self.cursor.offset_by(direction.offset());

        match self.mode {
            EditorMode::WordEdit => {
                let onto_draft_block = self
                    .draft_blocks
                    .iter()
                    .any(|block| block.position() == desired);
                let at_tail = self
                    .draft_blocks
                    .last()
                    .map_or(true, |tail| tail.position() == self.cursor);
                if onto_draft_block || at_tail {
                    self.cursor = desired;
                }
            }
            EditorMode::BorderEdit => {
                let aligned = self.draft_line.last().map_or(true, |last| {
                    last.x() == desired.x() || last.y() == desired.y()
                });
                if aligned {
                    self.cursor = desired;
                }
            }
            EditorMode::Idle => self.cursor = desired,
        }
    }

    /// Places a letter at the cursor, replacing an existing draft block on
    /// the same cell. Ignored outside word editing.
    pub fn place_letter(&mut self, letter: Letter) {
        if self.mode != EditorMode::WordEdit {
            return;
        }

        let block = Block::new(self.cursor, letter);
        match self
            .draft_blocks
            .iter()
            .position(|existing| existing.position() == self.cursor)
        {
            Some(index) => self.draft_blocks[index] = block,
            None => self.draft_blocks.push(block),
        }
    }

    /// Toggles the absent flag of the draft block under the cursor. Ignored
    /// outside word editing or off the draft.
    pub fn toggle_absent(&mut self) {
        if self.mode != EditorMode::WordEdit {
            return;
        }

        let Some(index) = self
            .draft_blocks
            .iter()
            .position(|block| block.position() == self.cursor)
        else {
            return;
        };

        if !self.draft_absent.remove(&index) {
            let _ = self.draft_absent.insert(index);
        }
    }

    /// Appends the cursor cell to the border draft. Ignored outside border
    /// editing. Re-adding an interior or trailing point is ignored, since
    /// the loader rejects zero-length segments; the first point stays
    /// addable so rings can close on it.
    pub fn push_line_point(&mut self) {
        if self.mode != EditorMode::BorderEdit {
            return;
        }

        let duplicate = self
            .draft_line
            .iter()
            .skip(1)
            .chain(self.draft_line.last())
            .any(|point| *point == self.cursor);
        if !duplicate {
            self.draft_line.push(self.cursor);
        }
    }

    /// Removes the most recently placed draft entity (word block or border
    /// point, depending on the mode); the cursor follows the new tail.
    pub fn undo_last(&mut self) {
        match self.mode {
            EditorMode::WordEdit => {
                if self.draft_blocks.pop().is_some() {
                    let removed_index = self.draft_blocks.len();
                    let _ = self.draft_absent.remove(&removed_index);
                    if let Some(tail) = self.draft_blocks.last() {
                        self.cursor = tail.position();
                    }
                }
            }
            EditorMode::BorderEdit => {
                if self.draft_line.pop().is_some() {
                    if let Some(last) = self.draft_line.last() {
                        self.cursor = *last;
                    }
                }
            }
            EditorMode::Idle => {}
        }
    }

    /// Promotes pending drafts into the saved word and border lists.
    pub fn save_draft(&mut self) {
        if !self.draft_blocks.is_empty() {
            let blocks = std::mem::take(&mut self.draft_blocks);
            let absent = std::mem::take(&mut self.draft_absent);
            self.words
                .push(Word::new(blocks, absent, self.active_color.clone()));
        }

        if !self.draft_line.is_empty() {
            let line = std::mem::take(&mut self.draft_line);
            self.borders
                .push(Border::new(self.active_color.clone(), Polyline::new(line)));
        }
    }

    /// Exports the saved content as raw level data.
    ///
    /// The snake and the boundary are left for the game to supply; the
    /// loader derives a boundary when the template omits one.
    #[must_use]
    pub fn level_data(&self) -> LevelData {
        LevelData {
            snake: None,
            words: self
                .words
                .iter()
                .map(|word| WordData {
                    blocks: word.blocks().to_vec(),
                    absent_block_indexes: word.absent_indexes().iter().copied().collect(),
                    color: word.color().clone(),
                })
                .collect(),
            borders: self
                .borders
                .iter()
                .map(|border| BorderData {
                    color: border.color().clone(),
                    line: border.line().points().to_vec(),
                })
                .collect(),
            level_border_line: None,
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
