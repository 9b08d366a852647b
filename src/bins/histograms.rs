use std::process::ExitCode;

use cv_samples::{
    histogram::{self, BrightnessContrast, MAX_LEVEL, NEUTRAL_LEVEL},
    trackbar::{Controls, ExitKey, Trackbar},
    utils::load_image,
    ImageRole, Result, Settings, SingleImage, Usage,
};
use log::debug;
use opencv::highgui;

const IMAGE_WINDOW: &str = "image";
const HISTOGRAM_WINDOW: &str = "histogram";
const USAGE: Usage = Usage::single("cv_histograms");

fn demo(input: SingleImage, _settings: &Settings) -> Result<()> {
    let image = load_image(&input.path, ImageRole::Image)?;

    highgui::named_window(IMAGE_WINDOW, highgui::WINDOW_NORMAL)?;
    highgui::named_window(HISTOGRAM_WINDOW, highgui::WINDOW_NORMAL)?;

    let mut controls = Controls::new(IMAGE_WINDOW);
    controls.add(Trackbar::new("brightness", MAX_LEVEL, NEUTRAL_LEVEL))?;
    controls.add(Trackbar::new("contrast", MAX_LEVEL, NEUTRAL_LEVEL))?;

    controls.run(ExitKey::Any, |positions| {
        let params = BrightnessContrast::from_positions(positions[0], positions[1]);
        debug!("coefficients {:?}", params.coefficients());

        let adjusted = histogram::adjust(&image, &params)?;
        highgui::imshow(IMAGE_WINDOW, &adjusted)?;
        highgui::imshow(HISTOGRAM_WINDOW, &histogram::plot(&adjusted)?)?;
        Ok(())
    })
}

fn main() -> ExitCode {
    cv_samples::run(&USAGE, demo)
}
