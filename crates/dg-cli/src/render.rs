//! ASCII rendering of a layout
//!
//! Higher `y` is drawn first, so "up" in the layout is up on screen.

use dg_core::{LevelLayout, Pos};

/// Glyph drawn for empty cells
pub const EMPTY: char = ' ';
pub const ENTRANCE: char = '<';
pub const EXIT: char = '>';

fn glyph_at(layout: &LevelLayout, pos: Pos) -> char {
    if layout.entrance().is_some_and(|r| r.center() == pos) {
        return ENTRANCE;
    }
    if layout.exit().is_some_and(|r| r.center() == pos) {
        return EXIT;
    }
    if let Some(tile) = layout.tile_at(pos) {
        return tile.symbol();
    }

    // Rooms without tiles are shown by their archetype
    layout
        .rooms()
        .iter()
        .find(|r| r.contains(pos))
        .and_then(|r| r.archetype)
        .map_or(EMPTY, |a| a.symbol())
}

/// Render a layout as lines of text, one per row
pub fn render_ascii(layout: &LevelLayout) -> String {
    let Some((min, max)) = layout.extent() else {
        return String::new();
    };

    let mut out = String::new();
    for y in (min.y..=max.y).rev() {
        let line: String = (min.x..=max.x).map(|x| glyph_at(layout, Pos::new(x, y))).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
