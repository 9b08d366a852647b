use std::process::ExitCode;

use cv_samples::{
    threshold::{self, ThresholdKind, ThresholdParams},
    trackbar::{Controls, ExitKey, Trackbar},
    utils::{load_image, to_gray},
    ImageRole, Result, Settings, SingleImage, Usage,
};
use log::info;
use opencv::highgui;

const WINDOW: &str = "Threshold Demo";
const USAGE: Usage = Usage::single("cv_binarization");

fn demo(input: SingleImage, _settings: &Settings) -> Result<()> {
    let src = load_image(&input.path, ImageRole::Image)?;
    let gray = to_gray(&src)?;

    highgui::named_window(WINDOW, highgui::WINDOW_AUTOSIZE)?;
    let mut controls = Controls::new(WINDOW);
    controls.add(Trackbar::new("Type", ThresholdKind::MAX_INDEX, 3))?;
    controls.add(Trackbar::new("Value", threshold::MAX_VALUE, 0))?;

    println!("{}", ThresholdKind::legend());

    controls.run(ExitKey::Escape, |positions| {
        let params = ThresholdParams::from_positions(positions[0], positions[1]);
        let dst = threshold::apply(&gray, &params)?;
        highgui::imshow(WINDOW, &dst)?;
        info!("Selected: {} at {}", params.kind, params.value);
        Ok(())
    })
}

fn main() -> ExitCode {
    cv_samples::run(&USAGE, demo)
}
