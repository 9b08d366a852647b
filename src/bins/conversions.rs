use std::process::ExitCode;

use cv_samples::{
    conversions,
    utils::{load_image, Slideshow},
    ImageRole, Result, Settings, SingleImage, Usage,
};

const WINDOW: &str = "Conversions Demo";
const USAGE: Usage = Usage::single("cv_conversions");

fn demo(input: SingleImage, settings: &Settings) -> Result<()> {
    let src = load_image(&input.path, ImageRole::Image)?;
    let slideshow = Slideshow::new(WINDOW, &src, settings.caption_delay_ms)?;

    let stages = conversions::stages(&src)?;
    if slideshow.present_all(&stages)?.is_break() {
        return Ok(());
    }
    slideshow.finish()
}

fn main() -> ExitCode {
    cv_samples::run(&USAGE, demo)
}
