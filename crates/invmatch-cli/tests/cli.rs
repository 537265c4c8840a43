use assert_cmd::Command;
use predicates::prelude::*;

const INVOICE: &str = "\
Fresh Farms Ltd
Invoice Number: INV-2024-001

Tomatoes 5 kg $12.99
Olive Oil - $8.50
Subtotal: $21.49
";

const INVENTORY: &str = r#"[
  {"id": 1, "name": "Tomatoes", "quantity": 10.0, "unit": "kg"}
]"#;

#[test]
fn process_text_invoice_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let invoice = dir.path().join("invoice.txt");
    let inventory = dir.path().join("inventory.json");
    std::fs::write(&invoice, INVOICE).unwrap();
    std::fs::write(&inventory, INVENTORY).unwrap();

    Command::cargo_bin("invmatch")
        .unwrap()
        .arg("process")
        .arg(&invoice)
        .arg("--inventory")
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fresh Farms Ltd"))
        .stdout(predicate::str::contains("INV-2024-001"))
        .stdout(predicate::str::contains("Tomatoes"))
        .stdout(predicate::str::contains("update"));
}

#[test]
fn process_missing_input_fails() {
    Command::cargo_bin("invmatch")
        .unwrap()
        .arg("process")
        .arg("does-not-exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn process_writes_csv_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let invoice = dir.path().join("invoice.txt");
    let output = dir.path().join("report.csv");
    std::fs::write(&invoice, INVOICE).unwrap();

    Command::cargo_bin("invmatch")
        .unwrap()
        .arg("process")
        .arg(&invoice)
        .arg("--format")
        .arg("csv")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("name,quantity,unit,price,confidence,score"));
    assert!(csv.contains("Tomatoes"));
}

#[test]
fn config_show_prints_defaults() {
    Command::cargo_bin("invmatch")
        .unwrap()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"update_threshold\": 0.7"))
        .stdout(predicate::str::contains("\"backend\": \"fixture\""));
}

#[test]
fn batch_processes_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("reports");
    std::fs::write(dir.path().join("a.txt"), INVOICE).unwrap();
    std::fs::write(dir.path().join("b.txt"), "Rice 2 kg $4.00\n").unwrap();

    Command::cargo_bin("invmatch")
        .unwrap()
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("files processed: 2"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["processed"], 2);
    assert_eq!(summary["failed"], 0);
}
