use std::process::ExitCode;

use cv_samples::{
    gradients,
    utils::{load_image, to_gray, Slideshow, Stage},
    ImageRole, Result, Settings, SingleImage, Usage,
};

const WINDOW: &str = "Gradients Demo";
const USAGE: Usage = Usage::single("cv_gradients");

fn demo(input: SingleImage, settings: &Settings) -> Result<()> {
    let src = load_image(&input.path, ImageRole::Image)?;
    let slideshow = Slideshow::new(WINDOW, &src, settings.caption_delay_ms)?;

    if slideshow.present(&Stage::new("Original Image", src.clone()))?.is_break() {
        return Ok(());
    }

    let gray = to_gray(&src)?;
    if slideshow.present_all(&gradients::stages(&gray)?)?.is_break() {
        return Ok(());
    }
    slideshow.finish()
}

fn main() -> ExitCode {
    cv_samples::run(&USAGE, demo)
}
