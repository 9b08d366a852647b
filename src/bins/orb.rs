use std::process::ExitCode;

use cv_samples::{
    features,
    utils::{load_image, Slideshow, Stage},
    ImageRole, ImagePair, Result, Settings, Usage,
};

const WINDOW: &str = "ORB Demo";
const USAGE: Usage = Usage::pair("cv_orb");

fn demo(input: ImagePair, settings: &Settings) -> Result<()> {
    let full = load_image(&input.full, ImageRole::Full)?;
    let template = load_image(&input.template, ImageRole::Template)?;
    let slideshow = Slideshow::new(WINDOW, &full, settings.caption_delay_ms)?;

    let inputs = [
        Stage::new("Full Image", full.clone()),
        Stage::new("Template Image", template.clone()),
    ];
    if slideshow.present_all(&inputs)?.is_break() {
        return Ok(());
    }
    if slideshow.caption("Computing ORB Matches")?.is_break() {
        return Ok(());
    }

    let result = features::match_orb(&full, &template)?;
    let canvas = features::draw(&full, &template, &result)?;
    slideshow.show(&canvas, 0)?;

    slideshow.finish()
}

fn main() -> ExitCode {
    cv_samples::run(&USAGE, demo)
}
