mod common;

use labelsheet_pdf::model::{Alignment, LabelGeometry, LabelStyle, Record, TextOptions};
use labelsheet_pdf::pdf::{LabelSink, render, render_labels};
use labelsheet_pdf::records::parse_dataset;
use labelsheet_pdf::{Error, FilterSelection, LabelSettings, convert_text_to_pdf};

/// Records every call so the driver can be checked without a PDF.
#[derive(Default)]
struct RecordingSink {
    pages: Vec<Vec<(Vec<String>, f32, f32)>>,
}

impl LabelSink for RecordingSink {
    fn draw_text(&mut self, lines: &[String], x: f32, y: f32, _opts: &TextOptions) -> Result<(), Error> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        self.pages.last_mut().unwrap().push((lines.to_vec(), x, y));
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), Error> {
        self.pages.push(Vec::new());
        Ok(())
    }
}

fn records(n: usize) -> Vec<Record> {
    parse_dataset(&common::generated_csv(n)).records
}

#[test]
fn driver_breaks_pages_every_thirty_labels() {
    let recs = records(61);
    let mut sink = RecordingSink::default();
    let pages = render_labels(
        &recs,
        "<Name>",
        &LabelStyle::default(),
        &LabelGeometry::AVERY_5160,
        &mut sink,
    )
    .unwrap();
    assert_eq!(pages, 3);
    let sizes: Vec<usize> = sink.pages.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![30, 30, 1]);
    assert_eq!(sink.pages[2][0].0, vec!["Person 60"]);
}

#[test]
fn driver_sends_blank_lines_and_top_left_anchor() {
    let recs = records(3);
    let mut sink = RecordingSink::default();
    render_labels(
        &recs,
        "<Name>\n<State>",
        &LabelStyle::default(),
        &LabelGeometry::AVERY_5160,
        &mut sink,
    )
    .unwrap();
    let (lines, x, y) = &sink.pages[0][2];
    assert_eq!(lines, &vec!["Person 2".to_string(), String::new()]);
    assert!((x - (0.21975 + 2.0 * 2.75 + 0.125)).abs() < 1e-4);
    assert!((y - 0.625).abs() < 1e-4);
}

#[test]
fn pdf_page_count_matches_pagination() {
    for (n, expected) in [(1usize, 1usize), (30, 1), (31, 2), (90, 3)] {
        let recs = records(n);
        let bytes = render(
            &recs,
            "<Name>\n<City>",
            &LabelStyle::default(),
            &LabelGeometry::AVERY_5160,
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(common::page_count(&bytes), expected, "{n} records");
        assert_eq!(common::content_streams(&bytes).len(), expected);
    }
}

#[test]
fn pdf_contains_resolved_text_per_page() {
    let recs = records(31);
    let bytes = render(&recs, "<Name>", &LabelStyle::default(), &LabelGeometry::AVERY_5160).unwrap();
    let streams = common::content_streams(&bytes);
    assert!(streams[0].contains("(Person 0) Tj"));
    assert!(streams[0].contains("(Person 29) Tj"));
    assert!(!streams[0].contains("(Person 30) Tj"));
    assert!(streams[1].contains("(Person 30) Tj"));
    assert_eq!(streams[0].matches(" Tj").count(), 30);
}

#[test]
fn blank_lines_keep_line_pitch() {
    let recs = vec![common::record(&[("A", "top"), ("B", ""), ("C", "bottom")])];
    let style = LabelStyle::new(10.0, Alignment::Left).unwrap();
    let bytes = render(&recs, "<A>\n<B>\n<C>", &style, &LabelGeometry::AVERY_5160).unwrap();
    let positions = common::text_positions(&common::content_streams(&bytes)[0]);
    assert_eq!(positions.len(), 2);
    // two line pitches (10pt * 1.15) between first and third line
    assert!(((positions[0].1 - positions[1].1) - 23.0).abs() < 1e-3);
    // first baseline sits one ascent below the top padding
    let top = 792.0 - 0.625 * 72.0;
    assert!((positions[0].1 - (top - 7.18)).abs() < 1e-3);
    assert!((positions[0].0 - 0.34475 * 72.0).abs() < 1e-3);
}

#[test]
fn right_alignment_ends_at_inner_edge() {
    let recs = vec![common::record(&[("Z", "10001")])];
    let style = LabelStyle::new(10.0, Alignment::Right).unwrap();
    let bytes = render(&recs, "<Z>", &style, &LabelGeometry::AVERY_5160).unwrap();
    let positions = common::text_positions(&common::content_streams(&bytes)[0]);
    let right_edge = (0.21975 + 2.625 - 0.125) * 72.0;
    // "10001" in Helvetica 10pt is 27.8pt wide
    assert!((positions[0].0 - (right_edge - 27.8)).abs() < 1e-2);
}

#[test]
fn center_alignment_straddles_cell_middle() {
    let recs = vec![common::record(&[("Z", "10001")])];
    let style = LabelStyle::new(10.0, Alignment::Center).unwrap();
    let bytes = render(&recs, "<Z>", &style, &LabelGeometry::AVERY_5160).unwrap();
    let positions = common::text_positions(&common::content_streams(&bytes)[0]);
    let middle = (0.21975 + 2.625 / 2.0) * 72.0;
    assert!((positions[0].0 - (middle - 13.9)).abs() < 1e-2);
}

#[test]
fn empty_selection_is_rejected() {
    let recs: Vec<Record> = Vec::new();
    let err = render(&recs, "<Name>", &LabelStyle::default(), &LabelGeometry::AVERY_5160).unwrap_err();
    assert!(matches!(err, Error::NoLabels));
}

#[test]
fn font_size_is_validated() {
    assert!(LabelStyle::new(8.0, Alignment::Left).is_ok());
    assert!(LabelStyle::new(16.0, Alignment::Left).is_ok());
    assert!(LabelStyle::new(12.5, Alignment::Left).is_ok());
    assert!(matches!(LabelStyle::new(7.5, Alignment::Left), Err(Error::InvalidStyle(_))));
    assert!(matches!(LabelStyle::new(16.5, Alignment::Left), Err(Error::InvalidStyle(_))));
    assert!(matches!(LabelStyle::new(11.25, Alignment::Left), Err(Error::InvalidStyle(_))));
    assert!("centre".parse::<Alignment>().is_ok());
    assert!("justify".parse::<Alignment>().is_err());
}

#[test]
fn convert_writes_file_and_reports_pages() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("labels.pdf");
    let settings = LabelSettings {
        template: Some("<Name>\n<City>".into()),
        ..LabelSettings::default()
    };
    let pages = convert_text_to_pdf(&common::generated_csv(45), &out, &settings).unwrap();
    assert_eq!(pages, 2);
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(common::page_count(&bytes), 2);
}

#[test]
fn convert_with_filter_leaving_nothing_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("labels.pdf");
    let settings = LabelSettings {
        filter: FilterSelection::with_values("State", ["TX"]),
        ..LabelSettings::default()
    };
    let err = convert_text_to_pdf(common::SAMPLE_CSV, &out, &settings).unwrap_err();
    assert!(matches!(err, Error::NoLabels));
    assert!(!out.exists());
}

#[test]
fn pdf_sink_middle_baseline_centres_block_on_anchor() {
    use labelsheet_pdf::model::Baseline;
    use labelsheet_pdf::pdf::PdfSink;

    let mut sink = PdfSink::new(&LabelGeometry::AVERY_5160, 10.0);
    let opts = TextOptions {
        alignment: Alignment::Left,
        baseline: Baseline::Middle,
        line_height_factor: 1.0,
    };
    let lines = vec!["one".to_string(), "two".to_string()];
    sink.draw_text(&lines, 1.0, 5.5, &opts).unwrap();
    sink.add_page().unwrap();
    sink.draw_text(&lines, 1.0, 1.0, &opts).unwrap();
    assert_eq!(sink.page_count(), 2);

    let bytes = sink.finish();
    let streams = common::content_streams(&bytes);
    assert_eq!(streams.len(), 2);
    let positions = common::text_positions(&streams[0]);
    // block of 20pt centred on y = 396pt: top at 406, first baseline one ascent lower
    assert!((positions[0].1 - (406.0 - 7.18)).abs() < 1e-3);
    assert!((positions[1].1 - (396.0 - 7.18)).abs() < 1e-3);
    assert!((positions[0].0 - 72.0).abs() < 1e-3);
}

#[test]
fn pdf_sink_rejects_non_finite_anchor() {
    use labelsheet_pdf::pdf::PdfSink;

    let mut sink = PdfSink::new(&LabelGeometry::AVERY_5160, 11.0);
    let opts = LabelStyle::default().text_options();
    let err = sink
        .draw_text(&["x".to_string()], f32::NAN, 1.0, &opts)
        .unwrap_err();
    assert!(matches!(err, Error::Render(_)));
}

#[test]
fn convert_reads_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("people.csv");
    let out = dir.path().join("labels.pdf");
    std::fs::write(&input, common::SAMPLE_CSV).unwrap();
    let pages =
        labelsheet_pdf::convert_csv_to_pdf(&input, &out, &LabelSettings::default()).unwrap();
    assert_eq!(pages, 1);
    let streams = common::content_streams(&std::fs::read(&out).unwrap());
    assert!(streams[0].contains("(Springfield, IL 62704) Tj"));

    let missing = dir.path().join("missing.csv");
    assert!(matches!(
        labelsheet_pdf::convert_csv_to_pdf(&missing, &out, &LabelSettings::default()),
        Err(Error::Io(_))
    ));
}

#[test]
fn line_break_inside_quoted_value_prints_as_two_lines() {
    let recs = parse_dataset("Name,Address\nBob,\"Apt 4\n12 Main St\"\n").records;
    let style = LabelStyle::new(10.0, Alignment::Left).unwrap();
    let bytes = render(&recs, "<Name>\n<Address>", &style, &LabelGeometry::AVERY_5160).unwrap();
    let stream = &common::content_streams(&bytes)[0];
    assert!(stream.contains("(Apt 4) Tj"));
    assert!(stream.contains("(12 Main St) Tj"));
    assert!(!stream.contains("Apt 412"));

    let positions = common::text_positions(stream);
    assert_eq!(positions.len(), 3);
    assert!(((positions[1].1 - positions[2].1) - 11.5).abs() < 1e-3);
    assert!(((positions[0].1 - positions[1].1) - 11.5).abs() < 1e-3);
}

#[test]
fn empty_grid_is_rejected_by_driver() {
    let grid = LabelGeometry {
        columns: 0,
        ..LabelGeometry::AVERY_5160
    };
    let mut sink = RecordingSink::default();
    let err = render_labels(&records(2), "<Name>", &LabelStyle::default(), &grid, &mut sink)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidStyle(_)));
    assert!(sink.pages.is_empty());
}
