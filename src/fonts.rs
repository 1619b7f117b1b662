use pdf_writer::{Name, Pdf, Ref};

use crate::model::FONT_FAMILY;

/// Base-14 font registered in the output, with the metrics needed to align text.
pub(crate) struct FontEntry {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
    widths_1000: Vec<f32>,
    pub(crate) ascender_ratio: f32,
}

impl FontEntry {
    /// Width of a single character in 1000-units, via its WinAnsi code.
    pub(crate) fn char_width_1000(&self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    pub(crate) fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi bytes for a PDF string operand.
/// Characters outside the code page are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match char_to_winansi(c) {
            0 => None,
            b => Some(b),
        })
        .collect()
}

/// Helvetica advance widths at 1000 units/em for WinAnsi bytes 32..=255.
fn helvetica_widths() -> Vec<f32> {
    const ASCII: [f32; 95] = [
        278.0, 278.0, 355.0, 556.0, 556.0, 889.0, 667.0, 191.0, // space ! " # $ % & '
        333.0, 333.0, 389.0, 584.0, 278.0, 333.0, 278.0, 278.0, // ( ) * + , - . /
        556.0, 556.0, 556.0, 556.0, 556.0, 556.0, 556.0, 556.0, // 0-7
        556.0, 556.0, 278.0, 278.0, 584.0, 584.0, 584.0, 556.0, // 8 9 : ; < = > ?
        1015.0, 667.0, 667.0, 722.0, 722.0, 667.0, 611.0, 778.0, // @ A-G
        722.0, 278.0, 500.0, 667.0, 556.0, 833.0, 722.0, 778.0, // H-O
        667.0, 778.0, 722.0, 667.0, 611.0, 722.0, 667.0, 944.0, // P-W
        667.0, 667.0, 611.0, 278.0, 278.0, 278.0, 469.0, 556.0, // X Y Z [ \ ] ^ _
        333.0, 556.0, 556.0, 500.0, 556.0, 556.0, 278.0, 556.0, // ` a-g
        556.0, 222.0, 222.0, 500.0, 222.0, 833.0, 556.0, 556.0, // h-o
        556.0, 556.0, 333.0, 500.0, 278.0, 556.0, 500.0, 722.0, // p-w
        500.0, 500.0, 500.0, 334.0, 260.0, 334.0, 584.0, // x y z { | } ~
    ];
    (32u16..=255u16)
        .map(|b| match b {
            32..=126 => ASCII[(b - 32) as usize],
            0xA0 => 278.0, // nbsp
            0xC6 => 1000.0,
            0xE6 => 889.0,
            0x96 => 556.0,  // en dash
            0x97 => 1000.0, // em dash
            0x85 => 1000.0, // ellipsis
            0x91..=0x94 => 333.0,
            _ => 556.0,
        })
        .collect()
}

pub(crate) fn register_font(
    pdf: &mut Pdf,
    pdf_name: String,
    alloc: &mut impl FnMut() -> Ref,
) -> FontEntry {
    let font_ref = alloc();
    pdf.type1_font(font_ref)
        .base_font(Name(FONT_FAMILY.as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    log::debug!("register_font: {FONT_FAMILY} as /{pdf_name}");

    FontEntry {
        pdf_name,
        font_ref,
        widths_1000: helvetica_widths(),
        ascender_ratio: 0.718,
    }
}
