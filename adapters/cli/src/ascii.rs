use std::io::Write;

use anyhow::Result as AnyResult;
use word_snake_core::Polyline;
use word_snake_rendering::{RenderingBackend, Scene};

const BORDER_GLYPH: char = '+';
const EMPTY_GLYPH: char = ' ';

/// Terminal backend that draws scenes as a plain character grid.
///
/// Border cells render as `+`, static word letters keep their case, absent
/// word letters render lowercase as a hint of what is missing, and the snake
/// is drawn on top of everything else.
pub(crate) struct AsciiBackend<W: Write> {
    out: W,
}

impl<W: Write> AsciiBackend<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderingBackend for AsciiBackend<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        writeln!(self.out, "{}", render_scene(scene))?;
        Ok(())
    }
}

pub(crate) fn render_scene(scene: &Scene) -> String {
    let size = (scene.extent() + 1).max(1) as usize;
    let mut grid = vec![vec![EMPTY_GLYPH; size]; size];

    let mut put = |x: i32, y: i32, glyph: char| {
        if x >= 0 && y >= 0 && (x as usize) < size && (y as usize) < size {
            grid[y as usize][x as usize] = glyph;
        }
    };

    for stroke in &scene.strokes {
        for cell in Polyline::new(stroke.points.clone()).trace_cells() {
            put(cell.x(), cell.y(), BORDER_GLYPH);
        }
    }

    for glyph in &scene.letters {
        let letter = if glyph.dimmed {
            glyph.letter.get().to_ascii_lowercase()
        } else {
            glyph.letter.get()
        };
        put(glyph.cell.x(), glyph.cell.y(), letter);
    }

    for glyph in &scene.snake {
        put(glyph.cell.x(), glyph.cell.y(), glyph.letter.get());
    }

    let mut lines: Vec<String> = grid.into_iter().map(|row| row.into_iter().collect()).collect();
    for line in &mut lines {
        while line.ends_with(EMPTY_GLYPH) {
            let _ = line.pop();
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use word_snake_rendering::scene_from_level;
    use word_snake_world::{query, LevelCatalog, World};

    fn demo_scene() -> Scene {
        let world = World::new(LevelCatalog::demo()).expect("demo catalog loads");
        scene_from_level(query::level(&world))
    }

    #[test]
    fn demo_board_draws_snake_words_and_borders() {
        let rendered = render_scene(&demo_scene());
        let lines: Vec<&str> = rendered.lines().collect();

        // Snake letters along row 1.
        assert_eq!(&lines[1][1..6], "GREEN");

        // "RED" with its hidden letter lowercased.
        assert_eq!(&lines[15][10..13], "ReD");

        // The ultraviolet border spans row 20.
        assert!(lines[20].chars().all(|glyph| glyph == '+'));
        assert_eq!(lines[20].len(), 25);

        // The pink ring covers the board edges.
        assert!(lines[0].chars().all(|glyph| glyph == '+'));
        assert!(lines[24].starts_with('+') && lines[24].ends_with('+'));
    }

    #[test]
    fn backend_writes_the_rendered_board() {
        let mut buffer = Vec::new();
        let mut backend = AsciiBackend::new(&mut buffer);
        backend.present(&demo_scene()).expect("present succeeds");

        let text = String::from_utf8(buffer).expect("ascii output");
        assert!(text.contains("GREEN"));
    }
}
