//! On-screen preview model.
//!
//! Uses the same pages and grid slots as the PDF. Two visual differences:
//! lines that resolve to nothing are hidden, and the text block is centred
//! vertically inside the cell instead of hanging from the top padding.

use std::fmt;

use crate::model::{Alignment, LINE_HEIGHT_FACTOR, LabelStyle};
use crate::pipeline::Labels;
use crate::template::preview_lines;

const POINTS_PER_INCH: f32 = 72.0;

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewCell {
    pub record_index: usize,
    pub row: usize,
    pub col: usize,
    /// Cell rectangle, sheet inches from the page's top-left.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Top of the vertically centred text block.
    pub text_top: f32,
    pub alignment: Alignment,
    pub lines: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewPage {
    pub index: usize,
    pub cells: Vec<PreviewCell>,
}

pub fn build_preview(labels: &Labels, style: &LabelStyle) -> Vec<PreviewPage> {
    let geometry = &labels.geometry;
    let line_height = style.font_size() * LINE_HEIGHT_FACTOR / POINTS_PER_INCH;
    let inner_height = geometry.row_height - 2.0 * geometry.padding;

    labels
        .pages()
        .into_iter()
        .enumerate()
        .map(|(index, page)| {
            let cells = page
                .iter()
                .map(|label| {
                    let lines: Vec<String> = preview_lines(&labels.template, labels.record(label))
                        .iter()
                        .flat_map(|line| line.split('\n'))
                        .map(str::to_string)
                        .collect();
                    let block_height = lines.len() as f32 * line_height;
                    let p = label.placement;
                    PreviewCell {
                        record_index: label.record_index,
                        row: p.row,
                        col: p.col,
                        x: p.x,
                        y: p.y,
                        width: geometry.col_width,
                        height: geometry.row_height,
                        text_top: p.y + geometry.padding + (inner_height - block_height) / 2.0,
                        alignment: style.alignment(),
                        lines,
                    }
                })
                .collect();
            PreviewPage { index, cells }
        })
        .collect()
}

impl fmt::Display for PreviewPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page {} ({} labels)", self.index + 1, self.cells.len())?;
        for cell in &self.cells {
            writeln!(f, "  [r{} c{}] #{}", cell.row + 1, cell.col + 1, cell.record_index + 1)?;
            for line in &cell.lines {
                writeln!(f, "    {line}")?;
            }
        }
        Ok(())
    }
}
