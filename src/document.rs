use crate::boxfile::{render_boxfile, CharacterBox};
use crate::font::Font;
use crate::geometry::{Cursor, PageGeometry};
use crate::layout::Paginator;
use crate::merge::{FileSystem, ImageMerger, LocalFileSystem, TiffMerger};
use crate::page::DirectoryPageStore;
use crate::TifError;
use std::path::PathBuf;

/// Filename prefix for the temporary per-page images, e.g. `page0.tif`
const INDIV_PAGE_PREFIX: &str = "page";

/// Everything needed for one generation run. Artifacts are named
/// `<dictionary_name>.<font_name>.exp<exp_number>` plus the `.tif`/`.box`
/// extension, and are written into `output_dir` along with the temporary
/// per-page images.
///
/// The start position must lie inside the page; it is not validated, an
/// outside start merely produces a cosmetically broken first line.
pub struct TifOptions {
    pub text: String,
    pub width: u32,
    pub height: u32,
    pub start_x: u32,
    pub start_y: u32,
    pub font_name: String,
    pub font_path: PathBuf,
    pub font_size: f32,
    pub exp_number: u32,
    pub dictionary_name: String,
    pub output_dir: PathBuf,
}

/// Generates a multi-page black-on-white tif from a block of text, along
/// with the box-file listing the bounding box and page of every rendered
/// character. One-shot batch pipeline: lay out and persist the pages,
/// merge them into the final artifact, delete the temporaries, then write
/// the box-file from the accumulated boxes.
pub struct MultiPageTif {
    text: String,
    geometry: PageGeometry,
    start: Cursor,
    font: Font,
    prefix: String,
    output_dir: PathBuf,
    boxes: Vec<CharacterBox>,
}

impl MultiPageTif {
    /// Validates the page geometry and loads the font, failing fast on a
    /// missing or unparseable font file or non-positive page dimensions
    pub fn new(options: TifOptions) -> Result<MultiPageTif, TifError> {
        let geometry = PageGeometry::new(options.width, options.height)?;
        let bytes = std::fs::read(&options.font_path)?;
        let font = Font::load(bytes, options.font_size)?;
        let prefix = format!(
            "{}.{}.exp{}",
            options.dictionary_name, options.font_name, options.exp_number
        );
        Ok(MultiPageTif {
            text: options.text,
            geometry,
            start: Cursor::new(options.start_x, options.start_y),
            font,
            prefix,
            output_dir: options.output_dir,
            boxes: Vec::new(),
        })
    }

    /// Lay out the text into individual page tifs, merge them into
    /// `<prefix>.tif`, and delete the individual pages. Returns the path
    /// of the merged artifact.
    pub fn generate_tif(&mut self) -> Result<PathBuf, TifError> {
        self.generate_tif_with(&TiffMerger, &LocalFileSystem)
    }

    /// [MultiPageTif::generate_tif] with caller-supplied merge and cleanup
    /// collaborators. Cleanup runs only after a successful merge; if the
    /// merge fails the individual pages are left in place for inspection.
    pub fn generate_tif_with(
        &mut self,
        merger: &dyn ImageMerger,
        filesystem: &dyn FileSystem,
    ) -> Result<PathBuf, TifError> {
        let mut paginator = Paginator::new(self.geometry, self.start);
        let mut store = DirectoryPageStore::new(&self.output_dir, INDIV_PAGE_PREFIX);
        let pages = paginator.layout(&self.text, &self.font, &mut store)?;
        self.boxes = paginator.into_boxes();

        let output = self.output_dir.join(format!("{}.tif", self.prefix));
        merger.merge(&pages, &output)?;
        filesystem.remove_pages(&pages)?;
        Ok(output)
    }

    /// Write `<prefix>.box` from the boxes recorded by the last
    /// [MultiPageTif::generate_tif] run, one record per line, in draw
    /// order. Returns the path of the box-file.
    pub fn generate_boxfile(&self) -> Result<PathBuf, TifError> {
        let path = self.output_dir.join(format!("{}.box", self.prefix));
        log::info!("generating boxfile {}", path.display());
        std::fs::write(&path, render_boxfile(&self.boxes))?;
        Ok(path)
    }

    /// The boxes recorded by the last generation run, in draw order
    pub fn boxes(&self) -> &[CharacterBox] {
        &self.boxes
    }
}
