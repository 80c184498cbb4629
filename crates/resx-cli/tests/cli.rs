use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIRMATION: &str = "\
Thank you for booking with us!
Grand Palm Resort & Spa
123 Ocean Drive, Key West

Confirmation Number:
GPR84213

Check-in: 03/14/2024
Check-out: 03/18/2024
Room total: $1,234.56
Questions? reservations@grandpalm.com
";

fn resx(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("resx").unwrap();
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    // keep the user's own config file out of the run
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}

fn write_file(dir: &Path, name: &str, content: &[u8]) -> String {
    fs::write(dir.join(name), content).unwrap();
    name.to_string()
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    let tmp = TempDir::new().unwrap();
    resx(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("resx"));
}

// --- Extract ---

#[test]
fn extract_text_report() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "booking.txt", CONFIRMATION.as_bytes());

    resx(tmp.path())
        .args(["extract", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("File type: text/plain"))
        .stdout(predicate::str::contains("Resort Name: Grand Palm Resort & Spa"))
        .stdout(predicate::str::contains("Check-in Date: 03/14/2024"))
        .stdout(predicate::str::contains("Check-out Date: 03/18/2024"))
        .stdout(predicate::str::contains("Total Cost: $1,234.56"))
        .stdout(predicate::str::contains("Reservation Number: GPR84213"))
        .stdout(predicate::str::contains("Email: reservations@grandpalm.com"))
        .stdout(predicate::str::contains("Valid"))
        .stdout(predicate::str::contains("Invalid").not());
}

#[test]
fn extract_json_report() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "booking.txt", CONFIRMATION.as_bytes());

    let output = resx(tmp.path())
        .args(["extract", &file, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mime_type"], "text/plain");
    assert_eq!(report["fields"]["reservation_number"], "GPR84213");
    assert_eq!(report["fields"]["total_cost"], "$1,234.56");
    assert_eq!(report["verdict"]["is_valid"], true);
    assert_eq!(report["verdict"]["reasons"], serde_json::json!([]));
}

#[test]
fn extract_csv_input() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(
        tmp.path(),
        "booking.csv",
        b"field,value\nHotel,Sunset Cove Hotel\nBooking Reference,SCH55120\nContact,front@sunsetcove.com\n",
    );

    resx(tmp.path())
        .args(["extract", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("File type: text/csv"))
        .stdout(predicate::str::contains("Reservation Number: SCH55120"))
        .stdout(predicate::str::contains("Email: front@sunsetcove.com"));
}

#[test]
fn extract_invalid_document_lists_reasons() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "note.txt", b"see you soon\n");

    resx(tmp.path())
        .args(["extract", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resort Name: Not found"))
        .stdout(predicate::str::contains("Invalid"))
        .stdout(predicate::str::contains("- Invalid or missing resort name"))
        .stdout(predicate::str::contains("- Invalid or missing reservation number"))
        .stdout(predicate::str::contains("- Invalid or missing email address"));
}

#[test]
fn extract_writes_output_file() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "booking.txt", CONFIRMATION.as_bytes());

    resx(tmp.path())
        .args(["extract", &file, "--format", "csv", "--output", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(tmp.path().join("out.csv")).unwrap();
    assert!(csv.starts_with("resort_name,check_in,check_out"));
    assert!(csv.contains("GPR84213"));
}

#[test]
fn extract_preview() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "booking.txt", CONFIRMATION.as_bytes());

    resx(tmp.path())
        .args(["extract", &file, "--preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted text preview:"))
        .stdout(predicate::str::contains("Thank you for booking with us!"));
}

#[test]
fn extract_missing_file_fails() {
    let tmp = TempDir::new().unwrap();

    resx(tmp.path())
        .args(["extract", "nope.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn extract_unsupported_binary_fails() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "blob.dat", &[0x00, 0x9F, 0x92, 0x96, 0xFF]);

    resx(tmp.path())
        .args(["extract", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported or unknown MIME type"));
}

#[test]
fn extract_image_without_models_fails() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(
        tmp.path(),
        "scan.png",
        &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
    );

    resx(tmp.path())
        .args(["extract", &file, "--model-dir", "no-models"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs OCR"));
}

#[test]
fn extract_prompts_for_path() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "booking.txt", CONFIRMATION.as_bytes());

    resx(tmp.path())
        .arg("extract")
        .write_stdin(format!("{}\n", file))
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter path to the file:"))
        .stdout(predicate::str::contains("Reservation Number: GPR84213"));
}

// --- Config ---

#[test]
fn config_init_get_set() {
    let tmp = TempDir::new().unwrap();

    resx(tmp.path())
        .args(["--config", "resx.json", "config", "init"])
        .assert()
        .success();
    assert!(tmp.path().join("resx.json").exists());

    resx(tmp.path())
        .args(["--config", "resx.json", "config", "set", "document.preview_chars", "500"])
        .assert()
        .success();

    resx(tmp.path())
        .args(["--config", "resx.json", "config", "get", "document.preview_chars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("500"));
}

#[test]
fn default_config_lives_under_home() {
    let tmp = TempDir::new().unwrap();
    let home = tmp.path().display().to_string();

    resx(tmp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(home.as_str()))
        .stdout(predicate::str::contains("not created"));
}

#[test]
fn default_config_is_read_by_extract() {
    let tmp = TempDir::new().unwrap();
    resx(tmp.path()).args(["config", "init"]).assert().success();
    resx(tmp.path())
        .args(["config", "set", "document.preview_chars", "9"])
        .assert()
        .success();

    let file = write_file(tmp.path(), "booking.txt", CONFIRMATION.as_bytes());
    resx(tmp.path())
        .args(["extract", &file, "--preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thank you\n"))
        .stdout(predicate::str::contains("Thank you for").not());
}

#[test]
fn config_set_unknown_key_fails() {
    let tmp = TempDir::new().unwrap();

    resx(tmp.path())
        .args(["--config", "resx.json", "config", "set", "document.colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn config_init_refuses_overwrite() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "resx.json", b"{}");

    resx(tmp.path())
        .args(["--config", "resx.json", "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// --- Models ---

#[test]
fn models_status_reports_missing_files() {
    let tmp = TempDir::new().unwrap();

    resx(tmp.path())
        .args(["models", "status", "--model-dir", "models"])
        .assert()
        .success()
        .stdout(predicate::str::contains("det.onnx"))
        .stdout(predicate::str::contains("missing"));
}

#[test]
fn models_path_uses_config() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "resx.json", br#"{"ocr": {"model_dir": "/opt/resx/models"}}"#);

    resx(tmp.path())
        .args(["--config", "resx.json", "models", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/opt/resx/models"));
}
