//! Integration tests for the scheme-preview binary

use assert_cmd::Command;
use tempfile::TempDir;

use std::fs;
use std::path::PathBuf;

const THEME: &str = "\
#define Ansi_0_Color #222222
#define Ansi_1_Color #ff0000
#define Ansi_2_Color #51ff0f
#define Ansi_3_Color #e7a800
#define Ansi_4_Color #3950d7
#define Background_Color #000000
#define Foreground_Color #eeeeee
#define Cursor_Color #eeeeee
";

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

/// A temp dir holding `moul.xrdb`, plus the path of a not yet existing `out.png`
fn workspace() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let theme = dir.path().join("moul.xrdb");
    fs::write(&theme, THEME).unwrap();
    let out = dir.path().join("out.png");
    (dir, theme, out)
}

fn bin() -> Command {
    Command::cargo_bin("scheme-preview").unwrap()
}

#[test]
fn renders_ansi_file() {
    let (dir, theme, out) = workspace();
    let input = dir.path().join("input.txt");
    fs::write(&input, "\x1b[31mRED\x1b[0m plain\n\x1b[1;34mbold blue\x1b[0m\n").unwrap();

    bin()
        .arg("render")
        .arg(&theme)
        .arg(&out)
        .arg("--input")
        .arg(&input)
        .assert()
        .success();

    assert!(fs::read(&out).unwrap().starts_with(PNG_MAGIC));
}

#[test]
fn renders_standard_input() {
    let (_dir, theme, out) = workspace();

    bin()
        .arg("render")
        .arg(&theme)
        .arg(&out)
        .args(&["--input", "-"])
        .write_stdin("\x1b[42m ok \x1b[0m\n")
        .assert()
        .success();

    assert!(fs::read(&out).unwrap().starts_with(PNG_MAGIC));
}

#[test]
fn reads_standard_input_without_input_flag() {
    let (_dir, theme, out) = workspace();

    bin()
        .arg("render")
        .arg(&theme)
        .arg(&out)
        .write_stdin("\x1b[31mhi\n")
        .assert()
        .success();

    assert!(fs::read(&out).unwrap().starts_with(PNG_MAGIC));
}

#[test]
fn renders_built_in_tables() {
    for table in &["16", "256"] {
        let (_dir, theme, out) = workspace();

        bin()
            .arg("render")
            .arg(&theme)
            .arg(&out)
            .args(&["--table", *table])
            .assert()
            .success();

        assert!(fs::read(&out).unwrap().starts_with(PNG_MAGIC));
    }
}

#[test]
fn renders_palette_preview() {
    let (_dir, theme, out) = workspace();

    bin()
        .arg("preview")
        .arg(&theme)
        .arg(&out)
        .args(&["--title", "moul"])
        .assert()
        .success();

    assert!(fs::read(&out).unwrap().starts_with(PNG_MAGIC));
}

#[test]
fn falls_back_when_font_is_missing() {
    let (_dir, theme, out) = workspace();

    bin()
        .arg("preview")
        .arg(&theme)
        .arg(&out)
        .args(&["--font", "/no/such/font.ttf"])
        .args(&["--title-font", "/no/such/bold.ttf"])
        .assert()
        .success();

    assert!(out.exists());
}

#[test]
fn missing_theme_is_fatal() {
    let (dir, _theme, out) = workspace();
    let missing = dir.path().join("nope.xrdb");

    let output = bin()
        .arg("preview")
        .arg(&missing)
        .arg(&out)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.xrdb"));
    assert!(!out.exists());
}

#[test]
fn missing_input_is_fatal() {
    let (dir, theme, out) = workspace();
    let missing = dir.path().join("missing.txt");

    let output = bin()
        .arg("render")
        .arg(&theme)
        .arg(&out)
        .arg("--input")
        .arg(&missing)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.txt"));
    assert!(!out.exists());
}

#[test]
fn refuses_to_overwrite_without_force() {
    let (_dir, theme, out) = workspace();
    fs::write(&out, b"keep me").unwrap();

    bin()
        .arg("preview")
        .arg(&theme)
        .arg(&out)
        .assert()
        .failure();
    assert_eq!(fs::read(&out).unwrap(), b"keep me");

    bin()
        .arg("preview")
        .arg(&theme)
        .arg(&out)
        .arg("--force")
        .assert()
        .success();
    assert!(fs::read(&out).unwrap().starts_with(PNG_MAGIC));
}

#[test]
fn same_input_renders_identical_files() {
    let (dir, theme, out) = workspace();
    let second = dir.path().join("second.png");

    for path in &[&out, &second] {
        bin()
            .arg("render")
            .arg(&theme)
            .arg(path)
            .args(&["--table", "16"])
            .assert()
            .success();
    }

    assert_eq!(fs::read(&out).unwrap(), fs::read(&second).unwrap());
}
