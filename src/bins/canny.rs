use std::process::ExitCode;

use cv_samples::{
    edges::{self, CannyParams, MAX_THRESHOLD},
    trackbar::{Controls, ExitKey, Trackbar},
    utils::load_image,
    ImageRole, Result, Settings, SingleImage, Usage,
};
use opencv::highgui;

const IMAGE_WINDOW: &str = "image";
const CANNY_WINDOW: &str = "canny";
const USAGE: Usage = Usage::single("cv_canny");

fn demo(input: SingleImage, _settings: &Settings) -> Result<()> {
    let image = load_image(&input.path, ImageRole::Image)?;

    highgui::named_window(IMAGE_WINDOW, highgui::WINDOW_AUTOSIZE)?;
    highgui::named_window(CANNY_WINDOW, highgui::WINDOW_AUTOSIZE)?;

    let defaults = CannyParams::default();
    let mut controls = Controls::new(CANNY_WINDOW);
    controls.add(Trackbar::new("min", MAX_THRESHOLD, defaults.min))?;
    controls.add(Trackbar::new("max", MAX_THRESHOLD, defaults.max))?;

    highgui::imshow(IMAGE_WINDOW, &image)?;
    controls.run(ExitKey::Any, |positions| {
        let params = CannyParams::from_positions(positions[0], positions[1]);
        let edges = edges::canny(&image, &params)?;
        highgui::imshow(CANNY_WINDOW, &edges)?;
        Ok(())
    })
}

fn main() -> ExitCode {
    cv_samples::run(&USAGE, demo)
}
