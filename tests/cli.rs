//! Failure paths of the demo binaries. None of these reach a window, so they
//! run without a display.

use std::path::Path;
use std::process::{Command, Output};

fn run(bin: &str, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("binary should start")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn corrupt_png(dir: &Path) -> String {
    let path = dir.join("corrupt.png");
    std::fs::write(&path, b"\x89PNG but not really").unwrap();
    path.to_string_lossy().into_owned()
}

const SINGLE_IMAGE_BINS: [(&str, &str); 10] = [
    (env!("CARGO_BIN_EXE_cv_binarization"), "cv_binarization"),
    (env!("CARGO_BIN_EXE_cv_dilation"), "cv_dilation"),
    (env!("CARGO_BIN_EXE_cv_erosion"), "cv_erosion"),
    (env!("CARGO_BIN_EXE_cv_conversions"), "cv_conversions"),
    (env!("CARGO_BIN_EXE_cv_canny"), "cv_canny"),
    (env!("CARGO_BIN_EXE_cv_gradients"), "cv_gradients"),
    (env!("CARGO_BIN_EXE_cv_histograms"), "cv_histograms"),
    (env!("CARGO_BIN_EXE_cv_watershed"), "cv_watershed"),
    (env!("CARGO_BIN_EXE_cv_face_detection"), "cv_face_detection"),
    (env!("CARGO_BIN_EXE_cv_hsv_histogram"), "cv_hsv_histogram"),
];

const PAIR_BINS: [(&str, &str); 2] = [
    (env!("CARGO_BIN_EXE_cv_orb"), "cv_orb"),
    (env!("CARGO_BIN_EXE_cv_matching"), "cv_matching"),
];

#[test]
fn no_arguments_prints_usage() {
    for (bin, name) in SINGLE_IMAGE_BINS.iter().chain(PAIR_BINS.iter()) {
        let output = run(bin, &[]);
        assert!(!output.status.success(), "{name} should fail");
        let text = stdout(&output);
        assert!(text.contains("Error: Not enough parameters given."), "{name}: {text}");
        assert!(text.contains(&format!("Usage: {name} ")), "{name}: {text}");
        assert!(text.contains("Extensions supported: *.jpg, *.png"), "{name}: {text}");
    }
}

#[test]
fn unsupported_extension_prints_usage() {
    for (bin, name) in SINGLE_IMAGE_BINS.iter() {
        let output = run(bin, &["photo.bmp"]);
        assert!(!output.status.success(), "{name} should fail");
        let text = stdout(&output);
        assert!(text.contains("Error: No valid file format given"), "{name}: {text}");
        assert!(text.contains("Usage:"), "{name}: {text}");
    }
}

#[test]
fn pair_programs_name_the_bad_argument() {
    for (bin, name) in PAIR_BINS.iter() {
        let output = run(bin, &["scene.png", "patch.gif"]);
        assert!(!output.status.success());
        let text = stdout(&output);
        assert!(
            text.contains("No valid file format given for second argument."),
            "{name}: {text}"
        );
    }
}

#[test]
fn missing_or_corrupt_image_is_not_valid() {
    let dir = tempfile::tempdir().unwrap();
    let corrupt = corrupt_png(dir.path());
    let missing = dir.path().join("missing.jpg").to_string_lossy().into_owned();

    for (bin, name) in SINGLE_IMAGE_BINS.iter() {
        for path in [&missing, &corrupt] {
            let output = run(bin, &[path.as_str()]);
            assert!(!output.status.success(), "{name} should fail on {path}");
            let text = stdout(&output);
            assert!(text.contains("Error: Image not valid."), "{name}: {text}");
        }
    }
}

#[test]
fn pair_programs_report_which_image_failed() {
    let dir = tempfile::tempdir().unwrap();
    let corrupt = corrupt_png(dir.path());
    let good = dir.path().join("good.png");
    image::RgbImage::from_pixel(16, 16, image::Rgb([10, 200, 30]))
        .save(&good)
        .unwrap();
    let good = good.to_string_lossy().into_owned();

    for (bin, name) in PAIR_BINS.iter() {
        let output = run(bin, &[corrupt.as_str(), good.as_str()]);
        assert!(!output.status.success());
        assert!(stdout(&output).contains("Error: Full image not valid."), "{name}");

        let output = run(bin, &[good.as_str(), corrupt.as_str()]);
        assert!(!output.status.success());
        assert!(stdout(&output).contains("Error: Template image not valid."), "{name}");
    }
}

#[test]
fn help_exits_successfully() {
    let output = run(env!("CARGO_BIN_EXE_cv_canny"), &["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("cv_canny"));
}

#[test]
fn bad_caption_delay_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.png");
    image::RgbImage::from_pixel(8, 8, image::Rgb([0, 0, 0]))
        .save(&good)
        .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cv_conversions"))
        .arg(&good)
        .env("RUST_LOG", "off")
        .env("CV_SAMPLES_CAPTION_DELAY_MS", "later")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stdout(&output).contains("CV_SAMPLES_CAPTION_DELAY_MS"));
}
