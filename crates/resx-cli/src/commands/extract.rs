//! Extract command - pull reservation fields out of a single document.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use resx_core::error::{OcrError, ResxError};
use resx_core::models::config::ResxConfig;
use resx_core::{
    DocumentReader, DocumentText, ExtractionResult, ModelStatus, OcrEngine, ReservationExtractor,
    ReservationParser,
};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF, image, CSV, or text); prompted for when omitted
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Skip OCR entirely (PDF images are ignored, images fail)
    #[arg(long)]
    no_ocr: bool,

    /// Print the beginning of the extracted text
    #[arg(long)]
    preview: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text report
    Text,
}

/// JSON report: the extraction result plus where it came from.
#[derive(Serialize)]
struct Report<'a> {
    file: String,
    mime_type: &'a str,
    #[serde(flatten)]
    result: &'a ExtractionResult,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let input = match &args.input {
        Some(path) => path.clone(),
        None => prompt_for_path()?,
    };

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    info!("Extracting reservation from {}", input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading document...");
    let reader = build_reader(&args, &config);
    let document = match reader.read_path(&input) {
        Ok(document) => document,
        Err(ResxError::Ocr(OcrError::NotConfigured)) => {
            pb.finish_and_clear();
            anyhow::bail!(
                "{} needs OCR but no models were loaded.\n\n\
                 Place the model files in {} or pass --model-dir; see 'resx models status'.",
                input.display(),
                model_dir(&args, &config).display()
            );
        }
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    pb.set_message("Extracting reservation fields...");
    let result = ReservationParser::new().parse(&document.text);
    pb.finish_and_clear();

    if args.format == OutputFormat::Text && args.output.is_none() {
        println!("File type: {}", document.kind.mime_type());
    }

    if args.preview {
        print_preview(&document, config.document.preview_chars, args.format);
    }

    let output = match args.format {
        OutputFormat::Json => format_json(&input, &document, &result)?,
        OutputFormat::Csv => format_csv(&result)?,
        OutputFormat::Text => format_text(&result),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Ask for the input path on the terminal.
fn prompt_for_path() -> anyhow::Result<PathBuf> {
    print!("Enter path to the file: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    let path = line.trim().trim_matches(|c| c == '"' || c == '\'');
    if path.is_empty() {
        anyhow::bail!("No input file given");
    }

    Ok(PathBuf::from(path))
}

fn model_dir(args: &ExtractArgs, config: &ResxConfig) -> PathBuf {
    args.model_dir
        .clone()
        .unwrap_or_else(|| config.ocr.model_dir.clone())
}

/// Document reader with an OCR engine attached when models are available.
fn build_reader(args: &ExtractArgs, config: &ResxConfig) -> DocumentReader {
    let mut document_config = config.document.clone();
    if args.no_ocr {
        document_config.ocr_pdf_images = false;
    }

    let reader = DocumentReader::new(document_config);
    if args.no_ocr {
        debug!("OCR disabled by --no-ocr");
        return reader;
    }

    match load_engine(&model_dir(args, config), config) {
        Some(engine) => reader.with_ocr(engine),
        None => reader,
    }
}

fn load_engine(model_dir: &Path, config: &ResxConfig) -> Option<OcrEngine> {
    let status = ModelStatus::check(model_dir, &config.ocr);
    if !status.is_ready() {
        debug!(
            "OCR models missing in {}: {}",
            model_dir.display(),
            status.missing().join(", ")
        );
        return None;
    }

    match OcrEngine::from_dir(model_dir, config.ocr.clone()) {
        Ok(engine) => Some(engine),
        Err(e) => {
            warn!("Continuing without OCR: {}", e);
            None
        }
    }
}

fn print_preview(document: &DocumentText, chars: usize, format: OutputFormat) {
    let preview = document.preview(chars);

    // keep machine-readable stdout clean
    if format == OutputFormat::Text {
        println!();
        println!("{}", style("Extracted text preview:").bold());
        println!("{}", preview);
        println!();
    } else {
        eprintln!("Extracted text preview:");
        eprintln!("{}", preview);
    }
}

fn format_json(
    input: &Path,
    document: &DocumentText,
    result: &ExtractionResult,
) -> anyhow::Result<String> {
    let report = Report {
        file: input.display().to_string(),
        mime_type: document.kind.mime_type(),
        result,
    };

    Ok(serde_json::to_string_pretty(&report)? + "\n")
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "resort_name",
        "check_in",
        "check_out",
        "total_cost",
        "reservation_number",
        "email",
        "is_valid",
        "reasons",
    ])?;

    let fields = &result.fields;
    wtr.write_record([
        fields.resort_name.as_deref().unwrap_or_default(),
        fields.check_in.as_deref().unwrap_or_default(),
        fields.check_out.as_deref().unwrap_or_default(),
        fields.total_cost.as_deref().unwrap_or_default(),
        fields.reservation_number.as_deref().unwrap_or_default(),
        fields.email.as_deref().unwrap_or_default(),
        if result.verdict.is_valid { "true" } else { "false" },
        result.verdict.reasons.join("; ").as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str("\nExtracted Information:\n");
    for (label, value) in result.fields.labeled() {
        output.push_str(&format!("{}: {}\n", label, value.unwrap_or("Not found")));
    }

    output.push_str("\nValidity Check:\n");
    if result.verdict.is_valid {
        output.push_str(&format!("Status: {} Valid\n", style("✓").green()));
    } else {
        output.push_str(&format!("Status: {} Invalid\n", style("✗").red()));
        output.push_str("Reasons:\n");
        for reason in &result.verdict.reasons {
            output.push_str(&format!("  - {}\n", reason));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use resx_core::models::reservation::{ExtractedFields, ValidityVerdict};

    fn sample_result() -> ExtractionResult {
        ExtractionResult {
            fields: ExtractedFields {
                resort_name: Some("Sunset Lodge".to_string()),
                total_cost: Some("$1,050.00".to_string()),
                email: Some("desk@sunsetlodge.com".to_string()),
                ..ExtractedFields::default()
            },
            verdict: ValidityVerdict::from_reasons(vec![
                "Invalid or missing reservation number".to_string(),
            ]),
            text_length: 120,
            processing_time_ms: 1,
        }
    }

    #[test]
    fn test_format_text() {
        let text = format_text(&sample_result());

        assert!(text.contains("Resort Name: Sunset Lodge\n"));
        assert!(text.contains("Check-in Date: Not found\n"));
        assert!(text.contains("Total Cost: $1,050.00\n"));
        assert!(text.contains("Invalid\n"));
        assert!(text.contains("  - Invalid or missing reservation number\n"));
    }

    #[test]
    fn test_format_csv() {
        let csv = format_csv(&sample_result()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("resort_name,check_in,check_out,total_cost,reservation_number,email,is_valid,reasons")
        );
        assert_eq!(
            lines.next(),
            Some("Sunset Lodge,,,\"$1,050.00\",,desk@sunsetlodge.com,false,Invalid or missing reservation number")
        );
    }
}
