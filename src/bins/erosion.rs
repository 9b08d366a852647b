use std::process::ExitCode;

use cv_samples::{
    morphology::{self, MorphOp, MorphParams, MAX_ELEMENT, MAX_KERNEL_SIZE},
    trackbar::{Controls, ExitKey, Trackbar},
    utils::load_image,
    ImageRole, Result, Settings, SingleImage, Usage,
};
use opencv::highgui;

const WINDOW: &str = "Erosion Demo";
const USAGE: Usage = Usage::single("cv_erosion");

fn demo(input: SingleImage, _settings: &Settings) -> Result<()> {
    let src = load_image(&input.path, ImageRole::Image)?;

    highgui::named_window(WINDOW, highgui::WINDOW_AUTOSIZE)?;
    let mut controls = Controls::new(WINDOW);
    controls.add(Trackbar::new("Element: 0 Rect, 1 Cross, 2 Ellipse", MAX_ELEMENT, 0))?;
    controls.add(Trackbar::new("Kernel size: 2n+1", MAX_KERNEL_SIZE, 0))?;

    controls.run(ExitKey::Any, |positions| {
        let params = MorphParams::from_positions(positions[0], positions[1]);
        let dst = morphology::apply(&src, MorphOp::Erode, &params)?;
        highgui::imshow(WINDOW, &dst)?;
        Ok(())
    })
}

fn main() -> ExitCode {
    cv_samples::run(&USAGE, demo)
}
