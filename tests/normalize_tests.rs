//! Integration tests for `prodimg normalize`

mod common;

use assert_cmd::Command;
use common::{TestWorkspace, png};
use predicates::prelude::*;

#[allow(deprecated)]
fn prodimg_cmd() -> Command {
    Command::cargo_bin("prodimg").unwrap()
}

fn products_dir(workspace: &TestWorkspace) {
    workspace.write_file(
        "public/images/products/transparent.png",
        &png(8, 8, [255, 0, 0, 0]),
    );
    workspace.write_file("public/images/products/opaque.png", &png(8, 8, [0, 0, 255, 255]));
    workspace.write_file("public/images/products/broken.png", b"truncated");
    workspace.write_file("public/images/products/photo.jpg", b"jpeg bytes");
}

#[test]
fn test_normalize_configured_output_dir() {
    let workspace = TestWorkspace::new();
    products_dir(&workspace);

    prodimg_cmd()
        .arg("-C")
        .arg(&workspace.path)
        .arg("normalize")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 converted, 0 unchanged, 1 failed"))
        .stderr(predicate::str::contains("broken.png"));

    let flattened = image::open(workspace.path.join("public/images/products/transparent.png"))
        .unwrap();
    assert!(!flattened.color().has_alpha());
    assert_eq!(flattened.to_rgb8().get_pixel(3, 3).0, [255, 255, 255]);
    assert_eq!(
        workspace.read_file("public/images/products/broken.png"),
        b"truncated"
    );
    assert_eq!(
        workspace.read_file("public/images/products/photo.jpg"),
        b"jpeg bytes"
    );
}

#[test]
fn test_normalize_twice_is_unchanged() {
    let workspace = TestWorkspace::new();
    workspace.write_file("site/a.png", &png(3, 3, [10, 20, 30, 255]));
    workspace.write_file("site/b.png", &png(3, 3, [10, 20, 30, 100]));

    prodimg_cmd()
        .arg("-C")
        .arg(&workspace.path)
        .args(["normalize", "site"])
        .assert()
        .success();
    let first = workspace.read_file("site/b.png");

    prodimg_cmd()
        .arg("-C")
        .arg(&workspace.path)
        .args(["normalize", "site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 converted, 2 unchanged, 0 failed"));

    assert_eq!(workspace.read_file("site/b.png"), first);
}

#[test]
fn test_fail_on_error() {
    let workspace = TestWorkspace::new();
    products_dir(&workspace);

    prodimg_cmd()
        .arg("-C")
        .arg(&workspace.path)
        .args(["normalize", "--fail-on-error"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: 1 image(s) failed to normalize"));
}

#[test]
fn test_normalize_json() {
    let workspace = TestWorkspace::new();
    products_dir(&workspace);

    let output = prodimg_cmd()
        .arg("-C")
        .arg(&workspace.path)
        .args(["normalize", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = report["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files[0]["name"], "broken.png");
    assert_eq!(files[0]["outcome"]["status"], "failed");
    assert_eq!(files[2]["outcome"]["status"], "converted");
}

#[test]
fn test_normalize_missing_dir() {
    let workspace = TestWorkspace::new();

    prodimg_cmd()
        .arg("-C")
        .arg(&workspace.path)
        .args(["normalize", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}
