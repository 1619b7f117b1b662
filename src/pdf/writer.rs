use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::error::Error;
use crate::fonts::{FontEntry, register_font, to_winansi_bytes};
use crate::model::{Alignment, Baseline, LabelGeometry, TextOptions};

use super::LabelSink;

const POINTS_PER_INCH: f32 = 72.0;

/// [`LabelSink`] that paints into a multi-page PDF.
///
/// Incoming coordinates are sheet inches from the top-left; the PDF user
/// space is points from the bottom-left.
pub struct PdfSink {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    pages_id: Ref,
    font: FontEntry,
    font_size: f32,
    page_width: f32,
    page_height: f32,
    pages: Vec<Content>,
    dropped_chars: usize,
}

impl PdfSink {
    pub fn new(geometry: &LabelGeometry, font_size: f32) -> Self {
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let font = register_font(&mut pdf, "F1".to_string(), &mut alloc);

        Self {
            pdf,
            next_id,
            catalog_id,
            pages_id,
            font,
            font_size,
            page_width: geometry.page_width * POINTS_PER_INCH,
            page_height: geometry.page_height * POINTS_PER_INCH,
            pages: vec![Content::new()],
            dropped_chars: 0,
        }
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_id);
        self.next_id += 1;
        r
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_page(&mut self) -> &mut Content {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Writes the page tree and returns the serialized file.
    pub fn finish(mut self) -> Vec<u8> {
        if self.dropped_chars > 0 {
            log::warn!(
                "{} characters have no WinAnsi code and were left out",
                self.dropped_chars
            );
        }

        let contents = std::mem::take(&mut self.pages);
        let n = contents.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| self.alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| self.alloc()).collect();

        for (i, c) in contents.into_iter().enumerate() {
            let raw = c.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            self.pdf
                .stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
        }

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for i in 0..n {
            let mut page = self.pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height))
                .parent(self.pages_id)
                .contents(content_ids[i]);
            page.resources()
                .fonts()
                .pair(Name(self.font.pdf_name.as_bytes()), self.font.font_ref);
        }

        self.pdf.finish()
    }
}

impl LabelSink for PdfSink {
    fn draw_text(&mut self, lines: &[String], x: f32, y: f32, opts: &TextOptions) -> Result<(), Error> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::Render(format!("non-finite text anchor ({x}, {y})")));
        }
        // A quoted cell can carry its own line breaks; each becomes a printed line.
        let lines: Vec<&str> = lines.iter().flat_map(|line| line.split('\n')).collect();
        if lines.is_empty() {
            return Ok(());
        }

        let font_size = self.font_size;
        let pitch = font_size * opts.line_height_factor;
        let anchor_x = x * POINTS_PER_INCH;
        let anchor_top = self.page_height - y * POINTS_PER_INCH;
        let block_top = match opts.baseline {
            Baseline::Top => anchor_top,
            Baseline::Middle => anchor_top + lines.len() as f32 * pitch / 2.0,
        };
        let first_baseline = block_top - font_size * self.font.ascender_ratio;

        let mut runs: Vec<(f32, f32, Vec<u8>)> = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let bytes = to_winansi_bytes(line);
            self.dropped_chars += line.chars().count() - bytes.len();
            let width = self.font.text_width(line, font_size);
            let start_x = match opts.alignment {
                Alignment::Left => anchor_x,
                Alignment::Center => anchor_x - width / 2.0,
                Alignment::Right => anchor_x - width,
            };
            runs.push((start_x, first_baseline - i as f32 * pitch, bytes));
        }

        let pdf_font = self.font.pdf_name.clone();
        let content = self.current_page();
        for (start_x, baseline_y, bytes) in &runs {
            content
                .begin_text()
                .set_font(Name(pdf_font.as_bytes()), font_size)
                .next_line(*start_x, *baseline_y)
                .show(Str(bytes.as_slice()))
                .end_text();
        }
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), Error> {
        self.pages.push(Content::new());
        Ok(())
    }
}
