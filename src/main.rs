use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use labelsheet_pdf::filter::FilterSelection;
use labelsheet_pdf::preview::build_preview;
use labelsheet_pdf::tabular::detect_delimiter;
use labelsheet_pdf::template::{self, PRESETS};
use labelsheet_pdf::{Alignment, Error, LabelSettings, LabelStyle, records};

#[derive(Parser, Debug)]
#[command(
    name = "labelsheet-pdf",
    version,
    about = "Print CSV/TSV records onto Avery 5160 label sheets"
)]
struct Cli {
    /// CSV or TSV file with a header row; `-` or omitted reads stdin
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output PDF path
    #[arg(short, long, default_value = "labels.pdf")]
    output: PathBuf,

    /// Label template, e.g. "<Name>\n<City>, <State>"
    #[arg(short, long, conflicts_with_all = ["template_file", "preset"])]
    template: Option<String>,

    /// Read the label template from a file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    template_file: Option<PathBuf>,

    /// Built-in template: USA, Europe or Canada
    #[arg(long)]
    preset: Option<String>,

    /// Font size in points (8-16, steps of 0.5)
    #[arg(long, default_value_t = 11.0)]
    font_size: f32,

    /// Text alignment inside each label: left, center or right
    #[arg(long, default_value = "left")]
    align: String,

    /// Only print records whose value in this column is listed by --filter-value
    #[arg(long, value_name = "FIELD")]
    filter_field: Option<String>,

    /// Accepted value for --filter-field (repeatable); without any, all non-empty values pass
    #[arg(long = "filter-value", value_name = "VALUE", requires = "filter_field")]
    filter_values: Vec<String>,

    /// Print the label preview instead of writing a PDF
    #[arg(long)]
    preview: bool,
}

fn read_input(input: Option<&PathBuf>) -> Result<String, Error> {
    match input {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

fn resolve_template(cli: &Cli) -> Result<Option<String>, Error> {
    if let Some(t) = &cli.template {
        // Shells don't turn "\n" into a newline.
        return Ok(Some(t.replace("\\n", "\n")));
    }
    if let Some(path) = &cli.template_file {
        let text = std::fs::read_to_string(path)?;
        return Ok(Some(text.trim_end_matches(['\r', '\n']).to_string()));
    }
    if let Some(name) = &cli.preset {
        let preset = template::preset(name).ok_or_else(|| {
            let known: Vec<&str> = PRESETS.iter().map(|p| p.name).collect();
            Error::InvalidStyle(format!(
                "unknown preset '{name}' (expected one of {})",
                known.join(", ")
            ))
        })?;
        return Ok(Some(preset.template.to_string()));
    }
    Ok(None)
}

fn run(cli: Cli) -> Result<(), Error> {
    let raw = read_input(cli.input.as_ref())?;
    let alignment: Alignment = cli.align.parse()?;
    let style = LabelStyle::new(cli.font_size, alignment)?;

    let filter = match &cli.filter_field {
        Some(field) if cli.filter_values.is_empty() => {
            let mut selection = FilterSelection::none();
            selection.select_field(Some(field.as_str()), &records::parse_dataset(&raw).records);
            selection
        }
        Some(field) => FilterSelection::with_values(field, cli.filter_values.iter().cloned()),
        None => FilterSelection::none(),
    };

    let settings = LabelSettings {
        template: resolve_template(&cli)?,
        style,
        filter,
    };

    log::info!(
        "Input: {} bytes, delimiter {:?}",
        raw.len(),
        detect_delimiter(&raw).char()
    );

    if cli.preview {
        let labels = labelsheet_pdf::run_pipeline(&raw, &settings);
        println!(
            "{} of {} records, {} pages",
            labels.selected.len(),
            labels.record_count(),
            labels.page_count()
        );
        println!("Fields: {}", labels.fields().join(", "));
        println!(
            "Font: {} {}pt, aligned {}",
            labelsheet_pdf::model::FONT_FAMILY,
            style.font_size(),
            style.alignment().as_str()
        );
        println!("Template:\n{}\n", labels.template);
        for page in build_preview(&labels, &style) {
            print!("{page}");
        }
        return Ok(());
    }

    let pages = labelsheet_pdf::convert_text_to_pdf(&raw, &cli.output, &settings)?;
    println!("Wrote {} ({pages} pages)", cli.output.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
