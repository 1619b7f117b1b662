//! `<Field>` substitution for label templates.
//!
//! A template is plain text split on `\n`. Every `<name>` whose name is a
//! field of the record is replaced by the record's value; anything else in
//! angle brackets is left untouched. There is no escape for a literal `<`.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::model::Record;

fn field_ref_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<([^>]+)>").expect("valid field reference pattern"))
}

pub fn resolve_line(line: &str, record: &Record) -> String {
    field_ref_regex()
        .replace_all(line, |caps: &Captures| match record.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// One resolved string per template line, blank lines included.
pub fn render(template: &str, record: &Record) -> Vec<String> {
    template
        .split('\n')
        .map(|line| resolve_line(line, record))
        .collect()
}

/// Lines as shown in the on-screen preview: a non-empty source line that
/// resolves to nothing but whitespace is hidden, so missing fields don't
/// leave gaps. Lines that were empty in the template stay as spacers.
pub fn preview_lines(template: &str, record: &Record) -> Vec<String> {
    template
        .split('\n')
        .filter_map(|line| {
            let resolved = resolve_line(line, record);
            if !line.is_empty() && resolved.trim().is_empty() {
                None
            } else {
                Some(resolved)
            }
        })
        .collect()
}

/// Lines as sent to the document sink. Nothing is dropped so every label on a
/// page keeps the same line pitch.
pub fn document_lines(template: &str, record: &Record) -> Vec<String> {
    render(template, record)
}

/// Field names referenced by the template, first occurrence order, no repeats.
pub fn referenced_fields(template: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for caps in field_ref_regex().captures_iter(template) {
        let name = &caps[1];
        if !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

/// References that no header provides. They will print verbatim.
pub fn unknown_fields(template: &str, fields: &[String]) -> Vec<String> {
    referenced_fields(template)
        .into_iter()
        .filter(|name| !fields.contains(name))
        .collect()
}

pub fn insert_tag(template: &mut String, field: &str) {
    template.push('<');
    template.push_str(field);
    template.push('>');
}

/// Starter template guessed from header names: a name line, an address line,
/// then `<City>, <State> <Zip>` from whichever of those columns exist.
pub fn default_template(fields: &[String]) -> String {
    let Some(first) = fields.first() else {
        return String::new();
    };
    let find = |term: &str| fields.iter().find(|h| h.to_lowercase().contains(term));

    let name = find("name").unwrap_or(first);
    let address = find("address").or_else(|| find("street"));
    let city = find("city");
    let state = find("state");
    let zip = find("zip")
        .or_else(|| find("postal"))
        .or_else(|| find("code"));

    let mut template = format!("<{name}>");
    if let Some(address) = address {
        template.push('\n');
        insert_tag(&mut template, address);
    }
    if city.is_some() || state.is_some() || zip.is_some() {
        template.push('\n');
        if let Some(city) = city {
            insert_tag(&mut template, city);
            if state.is_some() {
                template.push_str(", ");
            }
        }
        if let Some(state) = state {
            insert_tag(&mut template, state);
            template.push(' ');
        }
        if let Some(zip) = zip {
            insert_tag(&mut template, zip);
        }
    } else if let Some(second) = fields.get(1)
        && second != name
        && Some(second) != address
    {
        template.push('\n');
        insert_tag(&mut template, second);
    }
    template
}

pub struct Preset {
    pub name: &'static str,
    pub template: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "USA",
        template: "<Name>\n<Address>\n<City>, <State> <ZIP>",
    },
    Preset {
        name: "Europe",
        template: "<Name>\n<Address>\n<ZIP> <City>, <State>\n<Country>",
    },
    Preset {
        name: "Canada",
        template: "<Name>\n<Address>\n<City> <State>\n<ZIP>\n<Country>",
    },
];

pub fn preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
