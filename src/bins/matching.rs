use std::process::ExitCode;

use cv_samples::{
    matching::{self, MatchMethod},
    trackbar::{Controls, ExitKey, Trackbar},
    utils::load_image,
    ImageRole, ImagePair, Result, Settings, Usage,
};
use log::info;
use opencv::highgui;

const IMAGE_WINDOW: &str = "Source Image";
const TEMPLATE_WINDOW: &str = "Template Image";
const RESULT_WINDOW: &str = "Result";
const USAGE: Usage = Usage::pair("cv_matching");

fn demo(input: ImagePair, _settings: &Settings) -> Result<()> {
    let full = load_image(&input.full, ImageRole::Full)?;
    let template = load_image(&input.template, ImageRole::Template)?;

    for window in [IMAGE_WINDOW, TEMPLATE_WINDOW, RESULT_WINDOW] {
        highgui::named_window(window, highgui::WINDOW_AUTOSIZE)?;
    }

    let mut controls = Controls::new(IMAGE_WINDOW);
    controls.add(Trackbar::new("Method", MatchMethod::MAX_INDEX, 0))?;

    highgui::imshow(TEMPLATE_WINDOW, &template)?;
    controls.run(ExitKey::Any, |positions| {
        let method = MatchMethod::from_index(positions[0]);
        let mut found = matching::find_best(&full, &template, method)?;
        info!("{method}: best match at {:?}", found.location);

        let mut display = full.clone();
        matching::mark(&mut display, found.location, &template)?;
        matching::mark(&mut found.scores, found.location, &template)?;

        highgui::imshow(IMAGE_WINDOW, &display)?;
        highgui::imshow(RESULT_WINDOW, &found.scores)?;
        Ok(())
    })
}

fn main() -> ExitCode {
    cv_samples::run(&USAGE, demo)
}
