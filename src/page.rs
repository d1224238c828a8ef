use crate::geometry::PageGeometry;
use crate::TifError;
use image::{Rgb, RgbImage};
use std::path::PathBuf;

/// A page being drawn on: a plain RGB raster surface
pub type PageSurface = RgbImage;

/// Creates blank pages and persists finished ones under their zero-based
/// page index. Layout persists a page exactly once, when it moves past it
/// or when the input is exhausted.
pub trait PageStore {
    fn new_blank_page(&self, geometry: PageGeometry) -> PageSurface;

    /// Write the page to a recoverable location keyed by `index`, returning
    /// the location so the merge step receives an explicit ordered list
    /// rather than globbing for it
    fn persist(&mut self, page: &PageSurface, index: usize) -> Result<PathBuf, TifError>;
}

/// A [PageStore] that writes each page as `<prefix><index>.tif` inside a
/// directory, with a white background for fresh pages
pub struct DirectoryPageStore {
    dir: PathBuf,
    prefix: String,
    background: Rgb<u8>,
}

impl DirectoryPageStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> DirectoryPageStore {
        DirectoryPageStore {
            dir: dir.into(),
            prefix: prefix.into(),
            background: Rgb([255, 255, 255]),
        }
    }

    fn page_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}{}.tif", self.prefix, index))
    }
}

impl PageStore for DirectoryPageStore {
    fn new_blank_page(&self, geometry: PageGeometry) -> PageSurface {
        RgbImage::from_pixel(geometry.width, geometry.height, self.background)
    }

    fn persist(&mut self, page: &PageSurface, index: usize) -> Result<PathBuf, TifError> {
        let path = self.page_path(index);
        log::info!("generating individual tif image {}", path.display());
        page.save_with_format(&path, image::ImageFormat::Tiff)?;
        Ok(path)
    }
}
