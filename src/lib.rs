mod error;
mod fonts;
pub mod filter;
pub mod generator;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod pipeline;
pub mod preview;
pub mod records;
pub mod tabular;
pub mod template;

pub use error::Error;
pub use filter::FilterSelection;
pub use generator::{GenerationHandle, Generator, LabelJob};
pub use model::{Alignment, Dataset, LabelGeometry, LabelStyle, Record};
pub use pipeline::{Labels, PipelineInput};

use std::path::Path;
use std::time::Instant;

/// What to print and how, apart from the data itself.
#[derive(Clone, Debug, Default)]
pub struct LabelSettings {
    /// `None` falls back to a template guessed from the header row.
    pub template: Option<String>,
    pub style: LabelStyle,
    pub filter: FilterSelection,
}

pub fn convert_csv_to_pdf(input: &Path, output: &Path, settings: &LabelSettings) -> Result<usize, Error> {
    let raw = std::fs::read_to_string(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, input.display())),
        ),
        _ => Error::Io(e),
    })?;
    convert_text_to_pdf(&raw, output, settings)
}

/// Parse, filter and render `raw`, then write the PDF. Returns the page count.
pub fn convert_text_to_pdf(raw: &str, output: &Path, settings: &LabelSettings) -> Result<usize, Error> {
    let t0 = Instant::now();

    let labels = run_pipeline(raw, settings);
    let t_parse = t0.elapsed();

    let job = LabelJob::from_labels(&labels, settings.style);
    let bytes = Generator::new().generate(&job)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(labels.page_count())
}

/// Run the pipeline on the Avery 5160 sheet with `settings`.
pub fn run_pipeline(raw: &str, settings: &LabelSettings) -> Labels {
    let template = match &settings.template {
        Some(t) => t.clone(),
        None => template::default_template(&records::parse_dataset(raw).fields),
    };
    pipeline::run(&PipelineInput {
        raw_text: raw,
        filter: &settings.filter,
        template: &template,
        geometry: &LabelGeometry::AVERY_5160,
    })
}
