mod writer;

use std::borrow::Borrow;

pub use writer::PdfSink;

use crate::error::Error;
use crate::layout::{anchor, paginate, placement};
use crate::model::{LabelGeometry, LabelStyle, Record, TextOptions};
use crate::template::document_lines;

/// Destination for resolved label text.
///
/// `x`/`y` are sheet coordinates (inches, top-left origin) of the anchor
/// point; `lines` are painted downwards from it with a pitch of
/// `font size * opts.line_height_factor`.
pub trait LabelSink {
    fn draw_text(&mut self, lines: &[String], x: f32, y: f32, opts: &TextOptions) -> Result<(), Error>;

    /// Start a fresh page; subsequent text goes there.
    fn add_page(&mut self) -> Result<(), Error>;
}

/// Feed every record to `sink`, one cell each, breaking pages every
/// `geometry.capacity()` records. Returns the number of pages used.
pub fn render_labels<R, S>(
    records: &[R],
    template: &str,
    style: &LabelStyle,
    geometry: &LabelGeometry,
    sink: &mut S,
) -> Result<usize, Error>
where
    R: Borrow<Record>,
    S: LabelSink + ?Sized,
{
    let capacity = geometry.capacity();
    if capacity == 0 {
        return Err(Error::InvalidStyle("label grid has no rows or columns".into()));
    }
    let opts = style.text_options();
    let pages = paginate(records, capacity);

    for (page_idx, page) in pages.iter().enumerate() {
        if page_idx > 0 {
            sink.add_page()?;
        }
        for (pos, record) in page.iter().enumerate() {
            let cell = placement(page_idx * capacity + pos, geometry);
            let (x, y) = anchor(&cell, style.alignment(), geometry);
            let lines = document_lines(template, <R as Borrow<Record>>::borrow(record));
            sink.draw_text(&lines, x, y, &opts)?;
        }
        log::debug!("page {}: {} labels", page_idx + 1, page.len());
    }

    Ok(pages.len())
}

/// Render `records` into a complete PDF file in memory.
pub fn render<R: Borrow<Record>>(
    records: &[R],
    template: &str,
    style: &LabelStyle,
    geometry: &LabelGeometry,
) -> Result<Vec<u8>, Error> {
    if records.is_empty() {
        return Err(Error::NoLabels);
    }
    let t0 = std::time::Instant::now();

    let mut sink = PdfSink::new(geometry, style.font_size());
    let pages = render_labels(records, template, style, geometry, &mut sink)?;
    let t_layout = t0.elapsed();

    let bytes = sink.finish();
    let t_total = t0.elapsed();

    log::info!(
        "Render phases: layout={:.1}ms, assembly={:.1}ms ({} labels on {} pages)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        records.len(),
        pages,
    );

    Ok(bytes)
}
