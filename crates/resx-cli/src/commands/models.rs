//! Models command - inspect the OCR model files.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use resx_core::ModelStatus;

use super::load_config;

/// Arguments for the models command.
#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    command: ModelsCommand,

    /// Model directory (default: from configuration)
    #[arg(short, long, global = true)]
    model_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ModelsCommand {
    /// Check which model files are present
    Status,

    /// Print the model directory
    Path,
}

pub async fn run(args: ModelsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let model_dir = args.model_dir.unwrap_or_else(|| config.ocr.model_dir.clone());

    match args.command {
        ModelsCommand::Status => {
            let status = ModelStatus::check(&model_dir, &config.ocr);
            print_status(&status);
        }
        ModelsCommand::Path => println!("{}", model_dir.display()),
    }

    Ok(())
}

fn print_status(status: &ModelStatus) {
    println!("{}", style("Model Status").bold());
    println!("Directory: {}", status.model_dir.display());
    println!();

    for (name, size) in &status.files {
        match size {
            Some(bytes) => println!(
                "  {} {:<20} {}",
                style("✓").green(),
                name,
                style(format_size(*bytes)).dim()
            ),
            None => println!("  {} {:<20} {}", style("✗").red(), name, style("missing").red()),
        }
    }

    println!();
    if status.is_ready() {
        println!("{} OCR models ready", style("✓").green().bold());
    } else {
        println!(
            "{} OCR unavailable: {} missing",
            style("⚠").yellow().bold(),
            status.missing().join(", ")
        );
        println!("Images and scanned PDF pages need these files; text and CSV inputs work without them.");
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(10 * 1024 * 1024), "10.0 MB");
    }
}
