use crate::TifError;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tiff::encoder::{colortype, TiffEncoder};

/// Merges persisted page images into a single multi-page artifact. Pages
/// are appended in the order given; callers pass them in ascending page
/// index order.
pub trait ImageMerger {
    fn merge(&self, pages: &[PathBuf], output: &Path) -> Result<(), TifError>;
}

/// An [ImageMerger] that writes one TIFF directory per page, replacing the
/// external `tiffcp` invocation with an in-process encoder
pub struct TiffMerger;

impl ImageMerger for TiffMerger {
    fn merge(&self, pages: &[PathBuf], output: &Path) -> Result<(), TifError> {
        log::info!("generating multipage-tif {}", output.display());
        let file = BufWriter::new(File::create(output)?);
        let mut encoder = TiffEncoder::new(file)?;
        for page in pages {
            let image = image::open(page)?.into_rgb8();
            encoder.write_image::<colortype::RGB8>(
                image.width(),
                image.height(),
                image.as_raw(),
            )?;
        }
        Ok(())
    }
}

/// Removes the temporary per-page files once the merge has succeeded.
/// Never invoked on a failed merge, so the pages stay around for
/// inspection.
pub trait FileSystem {
    fn remove_pages(&self, pages: &[PathBuf]) -> Result<(), TifError>;
}

/// A [FileSystem] backed by [std::fs]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn remove_pages(&self, pages: &[PathBuf]) -> Result<(), TifError> {
        log::info!("removing {} individual tif images", pages.len());
        for page in pages {
            std::fs::remove_file(page)?;
        }
        Ok(())
    }
}
