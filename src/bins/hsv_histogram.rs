use std::process::ExitCode;

use cv_samples::{
    histogram,
    utils::{load_image, show_image},
    BinnedImage, ImageRole, Result, Settings, Usage,
};
use opencv::{highgui, prelude::*};

const WINDOW: &str = "src";
const USAGE: Usage = Usage {
    program: "cv_hsv_histogram",
    arguments: "/path/to/image [bins]",
};

fn demo(input: BinnedImage, _settings: &Settings) -> Result<()> {
    let src = load_image(&input.path, ImageRole::Image)?;
    let hsv = histogram::to_hsv(&src)?;

    println!("Size of image: {} {}\n", hsv.cols(), hsv.rows());

    let hist = histogram::hsv_histogram(&hsv, input.bins)?;
    println!("{}", hist.report());

    highgui::named_window(WINDOW, highgui::WINDOW_AUTOSIZE)?;
    show_image(WINDOW, &hsv)
}

fn main() -> ExitCode {
    cv_samples::run(&USAGE, demo)
}
