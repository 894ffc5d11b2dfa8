use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "main.go",
        "package main\n\nimport (\n\t\"github.com/acme/shop/db\"\n\t\"github.com/acme/shop/server\"\n)\n",
    );
    write(
        root,
        "router/router.go",
        "package router\n\nfunc Initialize(r *gin.Engine) {\n\tapi := r.Group(\"/v1\")\n\t_ = api\n}\n",
    );
    write(
        root,
        "models/user.go",
        "package models\n\ntype User struct {\n\tID     uint     `json:\"id\"`\n\tName   string   `json:\"name\"`\n\tOrders []*Order `json:\"orders\"`\n}\n",
    );
    write(
        root,
        "models/order.go",
        "package models\n\ntype Order struct {\n\tID     uint `json:\"id\"`\n\tUserID uint `json:\"user_id\"`\n}\n",
    );
    dir
}

fn apigen() -> Command {
    let mut cmd = Command::cargo_bin("apigen").unwrap();
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

#[test]
fn gen_writes_files_and_reports() {
    let dir = project();

    apigen()
        .args(["gen", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("controllers/user.go"))
        .stdout(predicate::str::contains("2 models"));

    let router = fs::read_to_string(dir.path().join("router/router.go")).unwrap();
    assert!(router.contains("api := r.Group(\"/v1\")"));
    assert!(router.contains("controllers.GetOrders"));
    assert!(dir.path().join("docs/order.apib").is_file());
}

#[test]
fn gen_json_report() {
    let dir = project();

    let output = apigen()
        .args(["gen", "--json", "--dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["models"], serde_json::json!(["Order", "User"]));
    assert_eq!(report["handler_files"], 2);
    assert_eq!(report["aggregate_files"], 4);
}

#[test]
fn quiet_gen_prints_nothing() {
    let dir = project();

    apigen()
        .args(["--quiet", "gen", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    assert!(dir.path().join("controllers/user.go").is_file());
}

#[test]
fn json_check_keeps_stderr_clean() {
    let dir = project();

    let output = apigen()
        .args(["check", "--json", "--dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["project"]["database"], "sqlite");
}

#[test]
fn out_dir_from_environment() {
    let dir = project();

    apigen()
        .arg("check")
        .env("APIGEN_OUT_DIR", dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("github.com/acme/shop"))
        .stdout(predicate::str::contains("Orders has_many Order"));
}

#[test]
fn multi_name_field_fails_with_diagnostic() {
    let dir = project();
    write(
        dir.path(),
        "models/broken.go",
        "package models\n\ntype Broken struct {\n\tA, B string\n}\n",
    );

    apigen()
        .args(["gen", "--dir"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("apigen::parse::multiple_field_names"));

    assert!(!dir.path().join("controllers").exists());
}

#[test]
fn missing_model_directory_fails() {
    let dir = project();

    apigen()
        .args(["check", "--models", "schema", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("apigen::io::read_error"));
}
