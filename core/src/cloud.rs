//! Word-cloud rendering.
//!
//! The index only hands a frequency table across this boundary and gets an
//! encoded raster image back; `CloudRenderer` is the seam for swapping in
//! another rendering backend.

use font8x8::{UnicodeFonts, BASIC_FONTS, GREEK_FONTS, LATIN_FONTS};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

use crate::config::{CloudConfig, ImageKind};
use crate::error::{IndexError, Result};
use crate::index::FrequencyTable;
use crate::sink::BlobSink;

/// Glyph advance as a fraction of the font size. Bitmap cells are square.
const CHAR_WIDTH: f32 = 1.0;
const LINE_HEIGHT: f32 = 1.15;
const MARGIN: f32 = 8.0;
const GAP: f32 = 6.0;

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const PALETTE: [Rgb<u8>; 8] = [
    Rgb([0xf2, 0xc1, 0x4e]),
    Rgb([0x5f, 0xad, 0x56]),
    Rgb([0x4d, 0x9d, 0xe0]),
    Rgb([0xe1, 0x55, 0x54]),
    Rgb([0x77, 0x68, 0xae]),
    Rgb([0x3b, 0xb2, 0x73]),
    Rgb([0xe1, 0xbc, 0x29]),
    Rgb([0xf7, 0x81, 0x54]),
];

/// Hollow box for letters without a bitmap.
const MISSING_GLYPH: [u8; 8] = [0x00, 0x7e, 0x42, 0x42, 0x42, 0x42, 0x7e, 0x00];

pub trait CloudRenderer {
    /// Encoded image bytes for the given frequencies.
    fn render(&self, frequencies: &FrequencyTable) -> Result<Vec<u8>>;
    fn file_extension(&self) -> &'static str;
}

/// Lays terms out in centered rows, largest first, and rasterizes them with
/// 8x8 bitmap glyphs scaled to each term's font size.
pub struct RasterCloudRenderer {
    config: CloudConfig,
}

/// A term positioned on the canvas; `x`/`y` is the top-left of its first glyph cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord<'a> {
    pub term: &'a str,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
}

impl RasterCloudRenderer {
    pub fn new(config: CloudConfig) -> Self {
        Self { config }
    }

    /// Most frequent first, ties broken by term.
    fn ranked<'a>(&self, frequencies: &'a FrequencyTable) -> Vec<(&'a str, u64)> {
        let mut ranked: Vec<_> = frequencies.iter().map(|(t, &c)| (t.as_str(), c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.config.max_words);
        ranked
    }

    fn font_size(&self, count: u64, max_count: u64, chars: usize) -> f32 {
        let cfg = &self.config;
        let ratio = count as f32 / max_count.max(1) as f32;
        let size = cfg.min_font_size + (cfg.max_font_size - cfg.min_font_size) * ratio;
        // a single word never exceeds the canvas width
        let fit = (cfg.width as f32 - 2.0 * MARGIN) / (chars.max(1) as f32 * CHAR_WIDTH);
        size.min(fit).max(1.0)
    }

    /// Words that do not fit on the canvas are left out.
    pub fn layout<'a>(&self, frequencies: &'a FrequencyTable) -> Vec<PlacedWord<'a>> {
        let ranked = self.ranked(frequencies);
        let Some(&(_, max_count)) = ranked.first() else { return Vec::new() };
        let width = self.config.width as f32;
        let height = self.config.height as f32;

        let mut placed = Vec::new();
        let mut row: Vec<(&str, f32, f32)> = Vec::new();
        let mut row_width = 0.0f32;
        let mut row_height = 0.0f32;
        let mut top = MARGIN;

        for (term, count) in ranked {
            let chars = term.chars().count();
            let size = self.font_size(count, max_count, chars);
            let w = chars as f32 * size * CHAR_WIDTH;
            let h = size * LINE_HEIGHT;
            let needed = if row.is_empty() { w } else { row_width + GAP + w };

            if needed <= width - 2.0 * MARGIN && top + row_height.max(h) <= height - MARGIN {
                row_width = needed;
                row_height = row_height.max(h);
                row.push((term, size, w));
                continue;
            }
            if !row.is_empty() {
                flush_row(&mut placed, &mut row, row_width, row_height, top, width);
                top += row_height;
            }
            if top + h > height - MARGIN || w > width - 2.0 * MARGIN {
                row_width = 0.0;
                row_height = 0.0;
                continue;
            }
            row_width = w;
            row_height = h;
            row.push((term, size, w));
        }
        if !row.is_empty() {
            flush_row(&mut placed, &mut row, row_width, row_height, top, width);
        }
        placed
    }

    fn rasterize(&self, frequencies: &FrequencyTable) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.config.width, self.config.height, BACKGROUND);
        for (i, word) in self.layout(frequencies).iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            for (n, c) in word.term.chars().enumerate() {
                let cell_x = word.x + n as f32 * word.font_size * CHAR_WIDTH;
                draw_glyph(&mut img, glyph(c), cell_x, word.y, word.font_size, color);
            }
        }
        img
    }
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| GREEK_FONTS.get(c))
        .unwrap_or(MISSING_GLYPH)
}

/// Row `r` of the bitmap is one byte; bit `b` set means column `b` is inked.
fn draw_glyph(img: &mut RgbImage, bitmap: [u8; 8], x: f32, y: f32, size: f32, color: Rgb<u8>) {
    let scale = size / 8.0;
    let (w, h) = img.dimensions();
    for (r, bits) in bitmap.iter().enumerate() {
        let y0 = (y + r as f32 * scale).floor().max(0.0) as u32;
        let y1 = ((y + (r + 1) as f32 * scale).ceil() as u32).min(h);
        for b in 0..8 {
            if bits & (1 << b) == 0 {
                continue;
            }
            let x0 = (x + b as f32 * scale).floor().max(0.0) as u32;
            let x1 = ((x + (b + 1) as f32 * scale).ceil() as u32).min(w);
            for py in y0..y1 {
                for px in x0..x1 {
                    img.put_pixel(px, py, color);
                }
            }
        }
    }
}

fn flush_row<'a>(
    placed: &mut Vec<PlacedWord<'a>>,
    row: &mut Vec<(&'a str, f32, f32)>,
    row_width: f32,
    row_height: f32,
    top: f32,
    width: f32,
) {
    let mut x = (width - row_width) / 2.0;
    for (term, font_size, w) in row.drain(..) {
        // bottom-align glyph cells on the row
        placed.push(PlacedWord { term, font_size, x, y: top + row_height - font_size });
        x += w + GAP;
    }
}

impl CloudRenderer for RasterCloudRenderer {
    fn render(&self, frequencies: &FrequencyTable) -> Result<Vec<u8>> {
        let img = DynamicImage::ImageRgb8(self.rasterize(frequencies));
        let format = match self.config.format {
            ImageKind::Png => ImageFormat::Png,
            ImageKind::Jpeg => ImageFormat::Jpeg,
        };
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).map_err(|e| IndexError::RenderFailure {
            name: format!("word cloud ({})", self.file_extension()),
            reason: e.to_string(),
        })?;
        Ok(bytes)
    }

    fn file_extension(&self) -> &'static str {
        match self.config.format {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
        }
    }
}

/// Render the cloud and publish it as `<stem>.<extension>`. Returns the artifact name.
pub fn emit_cloud(
    renderer: &dyn CloudRenderer,
    frequencies: &FrequencyTable,
    sink: &mut dyn BlobSink,
    stem: &str,
) -> Result<String> {
    let name = format!("{stem}.{}", renderer.file_extension());
    let bytes = renderer.render(frequencies)?;
    sink.write_blob(&name, &bytes)?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn table(entries: &[(&str, u64)]) -> FrequencyTable {
        entries.iter().map(|(t, c)| (t.to_string(), *c)).collect()
    }

    fn decode_png(bytes: &[u8]) -> RgbImage {
        image::load_from_memory_with_format(bytes, ImageFormat::Png).unwrap().to_rgb8()
    }

    #[test]
    fn empty_table_renders_blank_canvas() {
        let r = RasterCloudRenderer::new(CloudConfig::default());
        let bytes = r.render(&FrequencyTable::new()).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
        let img = decode_png(&bytes);
        assert_eq!(img.dimensions(), (1000, 600));
        assert!(img.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn terms_are_drawn_on_the_canvas() {
        let r = RasterCloudRenderer::new(CloudConfig::default());
        let img = decode_png(&r.render(&table(&[("cat", 3), ("dog", 1)])).unwrap());
        let inked = img.pixels().filter(|p| **p != BACKGROUND).count();
        assert!(inked > 100, "only {inked} pixels drawn");
    }

    #[test]
    fn more_frequent_terms_are_larger() {
        let r = RasterCloudRenderer::new(CloudConfig::default());
        let freqs = table(&[("cat", 10), ("dog", 1)]);
        let placed = r.layout(&freqs);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].term, "cat");
        assert!(placed[0].font_size > placed[1].font_size);
    }

    #[test]
    fn max_words_limits_output() {
        let cfg = CloudConfig { max_words: 3, ..CloudConfig::default() };
        let r = RasterCloudRenderer::new(cfg);
        let freqs = table(&[("a", 5), ("b", 4), ("c", 3), ("d", 2), ("e", 1)]);
        let terms: Vec<_> = r.layout(&freqs).into_iter().map(|w| w.term).collect();
        assert_eq!(terms, vec!["a", "b", "c"]);
    }

    #[test]
    fn words_stay_inside_canvas() {
        let cfg = CloudConfig { width: 200, height: 120, ..CloudConfig::default() };
        let r = RasterCloudRenderer::new(cfg);
        let freqs: FrequencyTable = (0..100u64).map(|i| (format!("word{}", "x".repeat((i % 7) as usize)), i + 1)).collect();
        for word in r.layout(&freqs) {
            let w = word.term.chars().count() as f32 * word.font_size * CHAR_WIDTH;
            assert!(word.x >= 0.0 && word.x + w <= 200.0, "{word:?}");
            assert!(word.y >= 0.0 && word.y + word.font_size <= 120.0, "{word:?}");
        }
    }

    #[test]
    fn jpeg_format_uses_jpg_extension() {
        let cfg = CloudConfig { format: ImageKind::Jpeg, width: 100, height: 60, ..CloudConfig::default() };
        let r = RasterCloudRenderer::new(cfg);
        let mut sink = MemorySink::new();
        let name = emit_cloud(&r, &table(&[("cat", 1)]), &mut sink, "word_cloud").unwrap();
        assert_eq!(name, "word_cloud.jpg");
        assert!(sink.get("word_cloud.jpg").unwrap().starts_with(&[0xff, 0xd8]));
    }
}
