use std::process::ExitCode;

use cv_samples::{
    utils::{load_image, Slideshow, Stage},
    watershed, ImageRole, Result, Settings, SingleImage, Usage,
};
use log::info;

const WINDOW: &str = "Watershed Demo";
const USAGE: Usage = Usage::single("cv_watershed");

fn demo(input: SingleImage, settings: &Settings) -> Result<()> {
    let src = load_image(&input.path, ImageRole::Image)?;
    let slideshow = Slideshow::new(WINDOW, &src, settings.caption_delay_ms)?;

    if slideshow.present(&Stage::new("Original Image", src.clone()))?.is_break() {
        return Ok(());
    }

    let segmentation = watershed::segment(&src, rand::random())?;
    info!("{} regions labelled", segmentation.regions);

    if slideshow.present_all(&segmentation.stages)?.is_break() {
        return Ok(());
    }
    if slideshow.caption("Watershed result")?.is_break() {
        return Ok(());
    }
    slideshow.show(&segmentation.painted, 0)?;
    Ok(())
}

fn main() -> ExitCode {
    cv_samples::run(&USAGE, demo)
}
