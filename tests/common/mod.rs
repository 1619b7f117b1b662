#![allow(dead_code)]

use labelsheet_pdf::Record;

pub const SAMPLE_CSV: &str = "Name,Address,City,State,ZIP,Country
\"John Doe\",123 Maple St,Springfield,IL,62704,USA
\"Jane Smith\",456 Oak Ave,Metropolis,NY,10012,USA
\"Bob Johnson\",789 Pine Rd,Gotham,NJ,07001,USA
\"Alice Williams\",321 Elm St,Smallville,KS,66002,USA
\"Charlie Brown\",654 Cedar Ln,Peanuts,CA,90210,USA
";

/// `n` data rows under `Name,City,State`, states cycling through NY/CA/<blank>.
pub fn generated_csv(n: usize) -> String {
    let mut out = String::from("Name,City,State\n");
    for i in 0..n {
        let state = match i % 3 {
            0 => "NY",
            1 => "CA",
            _ => "",
        };
        out.push_str(&format!("Person {i},City {i},{state}\n"));
    }
    out
}

pub fn record(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Inflated content streams in file order (one per page for our output).
pub fn content_streams(pdf: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = pdf;
    while let Some(start) = find(rest, b"stream\n") {
        let data_start = start + b"stream\n".len();
        let Some(len) = find(&rest[data_start..], b"\nendstream") else {
            break;
        };
        let data = &rest[data_start..data_start + len];
        if let Ok(raw) = miniz_oxide::inflate::decompress_to_vec_zlib(data) {
            out.push(String::from_utf8_lossy(&raw).into_owned());
        }
        rest = &rest[data_start + len + b"\nendstream".len()..];
    }
    out
}

pub fn page_count(pdf: &[u8]) -> usize {
    let text = String::from_utf8_lossy(pdf);
    text.matches("/Type /Page").count() - text.matches("/Type /Pages").count()
}

/// `(x, y)` operands of every `Td` in a content stream.
pub fn text_positions(content: &str) -> Vec<(f32, f32)> {
    content
        .lines()
        .filter(|l| l.trim_end().ends_with(" Td"))
        .filter_map(|l| {
            let mut parts = l.split_whitespace();
            let x = parts.next()?.parse().ok()?;
            let y = parts.next()?.parse().ok()?;
            Some((x, y))
        })
        .collect()
}
