use crate::page::PageSurface;
use crate::TifError;
use ab_glyph::{point, Font as _, FontArc, PxScale, ScaleFont as _};

/// The measuring and rasterizing collaborator used by the layout loop.
///
/// The layout loop trusts `measure` results as box geometry — it never
/// inspects rendered pixels — so implementations must keep per-character
/// advances consistent between [TextRenderer::measure] and
/// [TextRenderer::draw].
pub trait TextRenderer {
    /// The total advance width and the line height of `text`, in pixels
    fn measure(&self, text: &str) -> (u32, u32);

    /// Rasterize `text` onto `page`, starting at the top-left `position`
    /// and advancing internally between characters
    fn draw(&self, page: &mut PageSurface, position: (u32, u32), text: &str);
}

/// A parsed font at a fixed pixel size. Fonts can be TTF or OTF fonts;
/// glyphs are drawn black on the page background, anti-aliased by outline
/// coverage.
pub struct Font {
    face: FontArc,
    scale: PxScale,
}

impl Font {
    /// Load a font from raw bytes at the given pixel size, returning an
    /// error if the font could not be parsed
    pub fn load(bytes: Vec<u8>, size: f32) -> Result<Font, TifError> {
        let face = FontArc::try_from_vec(bytes)?;
        Ok(Font {
            face,
            scale: PxScale::from(size),
        })
    }
}

impl TextRenderer for Font {
    fn measure(&self, text: &str) -> (u32, u32) {
        let scaled = self.face.as_scaled(self.scale);
        // Round each advance on its own: a word's width must equal the sum
        // of the per-character advances the cursor is stepped by
        let width = text
            .chars()
            .map(|ch| scaled.h_advance(scaled.glyph_id(ch)).round() as u32)
            .sum();
        let height = (scaled.ascent() - scaled.descent()).round() as u32;
        (width, height)
    }

    fn draw(&self, page: &mut PageSurface, position: (u32, u32), text: &str) {
        let scaled = self.face.as_scaled(self.scale);
        let baseline = position.1 as f32 + scaled.ascent();
        let mut caret = position.0 as f32;
        for ch in text.chars() {
            let mut glyph = scaled.scaled_glyph(ch);
            glyph.position = point(caret, baseline);
            caret += scaled.h_advance(glyph.id).round();
            if let Some(outline) = self.face.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                outline.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i32 + gx as i32;
                    let py = bounds.min.y as i32 + gy as i32;
                    if px < 0
                        || py < 0
                        || px as u32 >= page.width()
                        || py as u32 >= page.height()
                    {
                        return;
                    }
                    let coverage = coverage.clamp(0.0, 1.0);
                    let pixel = page.get_pixel_mut(px as u32, py as u32);
                    for channel in pixel.0.iter_mut() {
                        *channel = (*channel as f32 * (1.0 - coverage)) as u8;
                    }
                });
            }
        }
    }
}
