//! Grid placement on the label sheet.
//!
//! Labels fill a page left to right, top to bottom. Coordinates are in sheet
//! units with the origin at the top-left corner of the page.

use crate::model::{Alignment, LabelGeometry, Placement};

pub fn placement(index: usize, geometry: &LabelGeometry) -> Placement {
    // An empty grid has no slots; treat it as one so nothing divides by zero.
    let columns = geometry.columns.max(1);
    let capacity = geometry.capacity().max(1);
    let page = index / capacity;
    let position = index % capacity;
    let col = position % columns;
    let row = position / columns;

    let x = geometry.margin_left + col as f32 * (geometry.col_width + geometry.horizontal_gap);
    let y = geometry.margin_top + row as f32 * (geometry.row_height + geometry.vertical_gap);

    Placement {
        page,
        position,
        row,
        col,
        x,
        y,
    }
}

/// Text start point inside a cell. Printed text is top-anchored one padding
/// below the cell edge; horizontally it follows the alignment.
pub fn anchor(cell: &Placement, alignment: Alignment, geometry: &LabelGeometry) -> (f32, f32) {
    let x = match alignment {
        Alignment::Left => cell.x + geometry.padding,
        Alignment::Center => cell.x + geometry.col_width / 2.0,
        Alignment::Right => cell.x + geometry.col_width - geometry.padding,
    };
    (x, cell.y + geometry.padding)
}

/// Consecutive page-sized chunks. The last may be short; no empty trailing page.
pub fn paginate<T>(items: &[T], capacity: usize) -> Vec<&[T]> {
    if capacity == 0 {
        return Vec::new();
    }
    items.chunks(capacity).collect()
}
