//! Cassette replay integration tests — zero network I/O.
//!
//! All tests set `RETOUCH_REPLAY` to a cassette file path so that the binary
//! never contacts a live pipeline backend.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use base64::Engine;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("retouch").unwrap();
    cmd.env("RETOUCH_CONFIG", "/nonexistent/retouch-config.toml");
    cmd.env_remove("HF_TOKEN");
    cmd.env_remove("RETOUCH_REC");
    cmd
}

/// Write a small RGB source image and return its path.
fn source_image(dir: &Path) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join("cat.png");
    image::RgbImage::new(4, 4).save(&path).unwrap();
    path
}

/// Write a cassette whose single `edit` interaction succeeds with a real
/// 1×1 JPEG payload.
fn ok_cassette(path: &Path) {
    let jpeg_bytes = {
        let img = image::DynamicImage::new_rgb8(1, 1);
        let mut buf = std::io::Cursor::new(Vec::<u8>::new());
        img.write_to(&mut buf, image::ImageFormat::Jpeg).unwrap();
        buf.into_inner()
    };
    let b64 = base64::engine::general_purpose::STANDARD.encode(&jpeg_bytes);

    let content = format!(
        "name: edit-test\nrecorded_at: \"2026-02-01T00:00:00Z\"\ncommit: test\ninteractions:\n  - seq: 0\n    port: image_editor\n    method: edit\n    input: {{}}\n    output:\n      Ok:\n        images:\n          - data: {b64}\n            mime_type: image/jpeg\n"
    );
    std::fs::write(path, content).unwrap();
}

/// Write a cassette whose single `edit` interaction fails with the given
/// diagnostic.
fn err_cassette(path: &Path, message: &str) {
    let content = format!(
        "name: edit-error-test\nrecorded_at: \"2026-02-01T00:00:00Z\"\ncommit: test\ninteractions:\n  - seq: 0\n    port: image_editor\n    method: edit\n    input: {{}}\n    output:\n      Err: \"{message}\"\n"
    );
    std::fs::write(path, content).unwrap();
}

/// Write a cassette with no interactions at all. Any pipeline call against
/// it would panic, so a clean typed failure proves no call was made.
fn empty_cassette(path: &Path) {
    std::fs::write(
        path,
        "name: empty\nrecorded_at: \"2026-02-01T00:00:00Z\"\ncommit: test\ninteractions: []\n",
    )
    .unwrap();
}

#[test]
fn happy_path_creates_output_file() {
    let dir = std::env::temp_dir().join("retouch_test_happy");
    let source = source_image(&dir);
    let cassette = dir.join("edit.cassette.yaml");
    ok_cassette(&cassette);

    let out = dir.join("edited.jpg");
    let _ = std::fs::remove_file(&out);

    cmd()
        .env("RETOUCH_REPLAY", cassette.to_str().unwrap())
        .args([
            "-i",
            source.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
            "turn the cat into a tiger",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved:"));

    let data = std::fs::read(&out).expect("output file should have been created");
    assert_eq!(&data[..3], &[0xFF, 0xD8, 0xFF], "output should be a JPEG file");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn default_output_is_edited_image_jpg_in_working_directory() {
    let dir = std::env::temp_dir().join("retouch_test_default_output");
    let source = source_image(&dir);
    let cassette = dir.join("edit.cassette.yaml");
    ok_cassette(&cassette);

    cmd()
        .env("RETOUCH_REPLAY", cassette.to_str().unwrap())
        .args(["-i", source.to_str().unwrap(), "make it night"])
        .current_dir(&dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved: edited_image.jpg"));

    assert!(dir.join("edited_image.jpg").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn default_output_overwrites_prior_file() {
    let dir = std::env::temp_dir().join("retouch_test_overwrite");
    let source = source_image(&dir);
    let cassette = dir.join("edit.cassette.yaml");
    ok_cassette(&cassette);

    let prior = dir.join("edited_image.jpg");
    std::fs::write(&prior, b"stale contents").unwrap();

    cmd()
        .env("RETOUCH_REPLAY", cassette.to_str().unwrap())
        .args(["-i", source.to_str().unwrap(), "make it night"])
        .current_dir(&dir)
        .assert()
        .success();

    let data = std::fs::read(&prior).unwrap();
    assert_ne!(data, b"stale contents");
    assert_eq!(&data[..3], &[0xFF, 0xD8, 0xFF]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn pipeline_failure_surfaces_diagnostic_text() {
    let dir = std::env::temp_dir().join("retouch_test_pipeline_err");
    let source = source_image(&dir);
    let cassette = dir.join("edit.cassette.yaml");
    err_cassette(&cassette, "CUDA out of memory");

    cmd()
        .env("RETOUCH_REPLAY", cassette.to_str().unwrap())
        .args(["-i", source.to_str().unwrap(), "make it night"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pipeline error"))
        .stderr(predicate::str::contains("CUDA out of memory"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_image_makes_no_pipeline_call() {
    let dir = std::env::temp_dir().join("retouch_test_missing_image");
    std::fs::create_dir_all(&dir).unwrap();
    let cassette = dir.join("empty.cassette.yaml");
    empty_cassette(&cassette);

    // No -i flag: the request must be rejected before the (empty) cassette
    // is consulted.
    cmd()
        .env("RETOUCH_REPLAY", cassette.to_str().unwrap())
        .args(["make it night"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No image selected"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn empty_instruction_makes_no_pipeline_call() {
    let dir = std::env::temp_dir().join("retouch_test_empty_instruction");
    let source = source_image(&dir);
    let cassette = dir.join("empty.cassette.yaml");
    empty_cassette(&cassette);

    cmd()
        .env("RETOUCH_REPLAY", cassette.to_str().unwrap())
        .args(["-i", source.to_str().unwrap(), "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Edit instruction is empty"));

    let _ = std::fs::remove_dir_all(&dir);
}
