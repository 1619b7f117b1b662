use std::collections::HashMap;
use std::str::FromStr;

use crate::error::Error;

/// One label's worth of data: field name -> trimmed value.
///
/// Field order is not kept here; it lives in [`Dataset::fields`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    values: HashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later inserts for the same field overwrite earlier ones.
    pub(crate) fn insert(&mut self, field: String, value: String) {
        self.values.insert(field, value);
    }

    /// `None` when the record has no such field, which is not the same as an empty value.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k.into(), v.into());
        }
        record
    }
}

/// Field set plus records, as derived from one raw text blob.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Header names in header order; duplicates are kept.
    pub fields: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" | "centre" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(Error::InvalidStyle(format!(
                "unknown alignment '{other}' (expected left, center or right)"
            ))),
        }
    }
}

/// Where the `y` passed to a sink sits relative to the first line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Baseline {
    #[default]
    Top,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextOptions {
    pub alignment: Alignment,
    pub baseline: Baseline,
    pub line_height_factor: f32,
}

/// Physical sheet layout. All lengths are in inches, origin at the top-left of the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_left: f32,
    pub col_width: f32,
    pub row_height: f32,
    pub horizontal_gap: f32,
    pub vertical_gap: f32,
    pub padding: f32,
    pub columns: usize,
    pub rows: usize,
}

impl LabelGeometry {
    /// Avery 5160 / 8160 address labels on US Letter.
    pub const AVERY_5160: LabelGeometry = LabelGeometry {
        page_width: 8.5,
        page_height: 11.0,
        margin_top: 0.5,
        margin_left: 0.21975,
        col_width: 2.625,
        row_height: 1.0,
        horizontal_gap: 0.125,
        vertical_gap: 0.0,
        padding: 0.125,
        columns: 3,
        rows: 10,
    };

    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }
}

impl Default for LabelGeometry {
    fn default() -> Self {
        Self::AVERY_5160
    }
}

/// Grid slot and top-left corner of one label cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub page: usize,
    pub position: usize,
    pub row: usize,
    pub col: usize,
    pub x: f32,
    pub y: f32,
}

pub const FONT_FAMILY: &str = "Helvetica";
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;
pub const FONT_SIZE_MIN: f32 = 8.0;
pub const FONT_SIZE_MAX: f32 = 16.0;
pub const FONT_SIZE_STEP: f32 = 0.5;
pub const DEFAULT_FONT_SIZE: f32 = 11.0;

/// User-chosen appearance of the printed text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    font_size: f32,
    alignment: Alignment,
}

impl LabelStyle {
    pub fn new(font_size: f32, alignment: Alignment) -> Result<Self, Error> {
        if !(FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&font_size) {
            return Err(Error::InvalidStyle(format!(
                "font size {font_size} outside {FONT_SIZE_MIN}..={FONT_SIZE_MAX}"
            )));
        }
        let steps = font_size / FONT_SIZE_STEP;
        if (steps - steps.round()).abs() > 1e-4 {
            return Err(Error::InvalidStyle(format!(
                "font size {font_size} is not a multiple of {FONT_SIZE_STEP}"
            )));
        }
        Ok(Self {
            font_size,
            alignment,
        })
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            alignment: self.alignment,
            baseline: Baseline::Top,
            line_height_factor: LINE_HEIGHT_FACTOR,
        }
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            alignment: Alignment::Left,
        }
    }
}
