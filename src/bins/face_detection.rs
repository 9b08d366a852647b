use std::process::ExitCode;

use cv_samples::{
    face::{self, FaceDetector},
    utils::{load_image, show_image},
    ImageRole, Result, Settings, SingleImage, Usage,
};
use log::info;
use opencv::highgui;

const WINDOW: &str = "Face detection";
const USAGE: Usage = Usage::single("cv_face_detection");

fn demo(input: SingleImage, settings: &Settings) -> Result<()> {
    let mut frame = load_image(&input.path, ImageRole::Image)?;
    let mut detector = FaceDetector::load(&face::locate_cascade(&settings.face_cascade))?;

    info!("Running the face detector...");
    let faces = detector.detect(&frame)?;
    face::annotate(&mut frame, &faces)?;

    highgui::named_window(WINDOW, highgui::WINDOW_AUTOSIZE)?;
    show_image(WINDOW, &frame)
}

fn main() -> ExitCode {
    cv_samples::run(&USAGE, demo)
}
