use crate::TifError;

/// The fixed pixel dimensions of every page in a run. Validated on
/// construction; a zero dimension is a configuration error, not something
/// the layout loop should have to defend against.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PageGeometry {
    pub width: u32,
    pub height: u32,
}

impl PageGeometry {
    pub fn new(width: u32, height: u32) -> Result<PageGeometry, TifError> {
        if width == 0 || height == 0 {
            return Err(TifError::InvalidPageGeometry { width, height });
        }
        Ok(PageGeometry { width, height })
    }
}

/// The current draw position within a page, in renderer coordinates
/// (origin at the top-left corner, y grows downward)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub x: u32,
    pub y: u32,
}

impl Cursor {
    pub fn new(x: u32, y: u32) -> Cursor {
        Cursor { x, y }
    }
}
