use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum TifError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [ab_glyph] failed to parse the font
    InvalidFont(#[from] ab_glyph::InvalidFont),

    #[error(transparent)]
    /// [image] failed to encode or decode a page image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// [tiff] failed while merging pages into the multi-page artifact
    Tiff(#[from] tiff::TiffError),

    /// Page dimensions must both be strictly positive
    #[error("page dimensions must be positive, got {width}x{height}")]
    InvalidPageGeometry { width: u32, height: u32 },

    /// A single word is too wide to ever fit a line starting at `start_x`.
    /// Left unchecked this word would trigger a page break on every
    /// iteration without ever being placed.
    #[error("word {word:?} is {width}px wide and can never fit a {page_width}px page starting at x={start_x}")]
    WordExceedsPageWidth {
        word: String,
        width: u32,
        page_width: u32,
        start_x: u32,
    },
}
