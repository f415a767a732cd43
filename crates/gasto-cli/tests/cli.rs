use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from any config file in the user's home.
fn gasto(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gasto").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

#[test]
fn test_parse_json() {
    let home = TempDir::new().unwrap();

    gasto(home.path())
        .args(["parse", "--date", "2024-03-10", "Gasté", "15", "soles", "en", "un", "adobo"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status": "success""#))
        .stdout(predicate::str::contains(r#""category": "alimentacion""#))
        .stdout(predicate::str::contains(r#""direction": "expense""#))
        .stdout(predicate::str::contains(r#""date": "2024-03-10""#))
        .stdout(predicate::str::contains(r#""description": "Un adobo""#));
}

#[test]
fn test_parse_yesterday() {
    let home = TempDir::new().unwrap();

    gasto(home.path())
        .args(["parse", "--date", "2024-03-10", "Pagué 50 soles de gasolina ayer"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""category": "transporte""#))
        .stdout(predicate::str::contains(r#""date": "2024-03-09""#));
}

#[test]
fn test_parse_text_format() {
    let home = TempDir::new().unwrap();

    gasto(home.path())
        .args([
            "parse",
            "--date",
            "2024-03-10",
            "--format",
            "text",
            "Me pagaron 1500 soles de sueldo",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("S/ 1,500.00"))
        .stdout(predicate::str::contains("Ingreso"))
        .stdout(predicate::str::contains("10/03/2024"));
}

#[test]
fn test_parse_csv_format() {
    let home = TempDir::new().unwrap();

    gasto(home.path())
        .args(["parse", "--date", "2024-03-10", "-f", "csv", "Netflix 45 soles"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "amount,category,direction,date,description,original_text",
        ))
        .stdout(predicate::str::contains("45,entretenimiento,expense,2024-03-10"));
}

#[test]
fn test_parse_without_amount_fails() {
    let home = TempDir::new().unwrap();

    gasto(home.path())
        .args(["parse", "fui", "al", "cine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no amount detected"));
}

#[test]
fn test_parse_with_keyword() {
    let home = TempDir::new().unwrap();

    gasto(home.path())
        .args(["parse", "--date", "2024-03-10", "Compré 10 soles de anticucho"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""category": "otros""#));

    gasto(home.path())
        .args([
            "parse",
            "--date",
            "2024-03-10",
            "--keyword",
            "alimentacion=anticucho",
            "Compré 10 soles de anticucho",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""category": "alimentacion""#));
}

#[test]
fn test_parse_with_unknown_category() {
    let home = TempDir::new().unwrap();

    gasto(home.path())
        .args(["parse", "--keyword", "viajes=tren", "Pasaje 20 soles"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn test_batch() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("gastos.txt");
    fs::write(
        &input,
        "# marzo\n\nGasté 15 soles en un adobo\nPagué 50 soles de gasolina ayer\nMe pagaron 1500 soles de sueldo\n",
    )
    .unwrap();

    gasto(home.path())
        .args(["batch", "--date", "2024-03-10", "--summary"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""line": 3"#))
        .stdout(predicate::str::contains(r#""category": "transporte""#))
        .stdout(predicate::str::contains(r#""direction": "income""#))
        .stderr(predicate::str::contains("3 successful"))
        .stderr(predicate::str::contains("S/ 1,435.00"));
}

#[test]
fn test_batch_summary_overflow_is_reported() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("gastos.txt");
    fs::write(
        &input,
        "79228162514264337593543950335 soles taxi\n79228162514264337593543950335 soles taxi\n",
    )
    .unwrap();

    gasto(home.path())
        .args(["batch", "--date", "2024-03-10", "--summary"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("arithmetic overflow while computing expense total"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_batch_stops_on_failure() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("gastos.txt");
    fs::write(&input, "Gasté 15 soles en un adobo\nfui al cine\n").unwrap();

    gasto(home.path())
        .arg("batch")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains(":2: no amount detected"));
}

#[test]
fn test_batch_continue_on_error_csv() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("gastos.txt");
    let output = home.path().join("gastos.csv");
    fs::write(&input, "Gasté 15 soles en un adobo\nfui al cine\n").unwrap();

    gasto(home.path())
        .args(["batch", "--continue-on-error", "--format", "csv", "--output"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 successful, 1 failed"));

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("file,line,status,"));
    assert!(csv.contains(",1,success,15,alimentacion,"));
    assert!(csv.contains(",2,failure,"));
}

#[test]
fn test_batch_no_files() {
    let home = TempDir::new().unwrap();
    let pattern = home.path().join("*.txt");

    gasto(home.path())
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn test_categories() {
    let home = TempDir::new().unwrap();

    gasto(home.path())
        .args(["categories", "--keywords"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alimentacion"))
        .stdout(predicate::str::contains("otros"))
        .stdout(predicate::str::contains("gasolina"));
}

#[test]
fn test_config_init_and_keyword() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("gasto.json");

    gasto(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    gasto(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    gasto(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "add-keyword", "alimentacion", "Anticucho"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'anticucho'"));

    gasto(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "keywords.extra.alimentacion"])
        .assert()
        .success()
        .stdout(predicate::str::contains("anticucho"));

    gasto(home.path())
        .arg("-c")
        .arg(&config)
        .args(["parse", "--date", "2024-03-10", "Compré 10 soles de anticucho"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""category": "alimentacion""#));
}

#[test]
fn test_config_add_keyword_rejects_otros() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("gasto.json");

    gasto(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "add-keyword", "otros", "cosa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn test_config_set_currency() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("gasto.json");

    gasto(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "display.currency_symbol", "PEN"])
        .assert()
        .success();

    gasto(home.path())
        .arg("-c")
        .arg(&config)
        .args(["parse", "--date", "2024-03-10", "-f", "text", "Taxi 12.5 soles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PEN 12.50"));
}
