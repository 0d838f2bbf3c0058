use std::process::{Command, Output};

use serde_json::Value;

const BOX_5PLY: &[&str] = &[
    "--length",
    "40",
    "--breadth",
    "30",
    "--height",
    "35",
    "--plies",
    "5",
    "--top-gsm",
    "180",
    "--flute-gsm",
    "140",
    "--bottom-gsm",
    "150",
    "--quantity",
    "1000",
];

fn corrugate(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_corrugate"));
    cmd.args(args).env("RUST_LOG", "off");
    for var in [
        "CORRUGATE_PAPER_COST_PER_KG",
        "CORRUGATE_LABOR_FRACTION",
        "CORRUGATE_PROFIT_MARGIN",
        "CORRUGATE_FLUTE_TUF",
    ] {
        cmd.env_remove(var);
    }
    for (k, v) in env {
        cmd.env(k, v);
    }
    cmd.output().expect("failed to run corrugate")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn calculate_outputs_result_json() {
    let mut args = vec!["calculate"];
    args.extend_from_slice(BOX_5PLY);
    let json = stdout_json(&corrugate(&args, &[]));

    assert_eq!(json["flute"], "B");
    assert_eq!(json["paper"]["layers"].as_array().unwrap().len(), 3);
    assert_eq!(json["cost"]["quantity"], 1000);
}

#[test]
fn quote_reads_margin_from_env() {
    let mut args = vec!["quote"];
    args.extend_from_slice(BOX_5PLY);
    args.extend_from_slice(&["--order-number", "SO-12", "--customer", "Sharma Foods"]);
    let json = stdout_json(&corrugate(&args, &[("CORRUGATE_PROFIT_MARGIN", "20")]));

    assert_eq!(json["status"], "draft");
    assert_eq!(json["costing"]["manufacturing"]["profit_margin_pct"], 20.0);
    assert_eq!(json["costing"]["manufacturing"]["suggested_price"], 60_625.97);
}

#[test]
fn invalid_input_exits_non_zero() {
    let output = corrugate(
        &[
            "calculate",
            "--length",
            "0",
            "--breadth",
            "30",
            "--height",
            "35",
            "--top-gsm",
            "150",
            "--bottom-gsm",
            "150",
        ],
        &[],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn overflowing_box_exits_non_zero() {
    let output = corrugate(
        &[
            "calculate",
            "--length",
            "1e308",
            "--breadth",
            "20",
            "--height",
            "15",
            "--top-gsm",
            "150",
            "--bottom-gsm",
            "120",
        ],
        &[],
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of range"));
}
