//! Small OpenCV demonstration programs sharing one command-line and display
//! template. Each binary under `src/bins` parses its image arguments, runs one
//! library operation and shows the result until a key is pressed.

pub mod cli;
pub mod config;
pub mod conversions;
pub mod edges;
pub mod error;
pub mod face;
pub mod features;
pub mod gradients;
pub mod histogram;
pub mod matching;
pub mod morphology;
pub mod threshold;
pub mod trackbar;
pub mod utils;
pub mod watershed;

use std::process::ExitCode;

use dotenv::dotenv;
use log::error;

pub use crate::cli::{BinnedImage, DemoArgs, ImagePair, SingleImage, Usage};
pub use crate::config::Settings;
pub use crate::error::{Error, ImageRole, Result};

fn init_logging() {
    dotenv().ok();
    // a second init (e.g. from tests) keeps the first logger
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Shared `main` body: logging, argument parsing, settings, then the demo.
pub fn run<A, F>(usage: &Usage, demo: F) -> ExitCode
where
    A: DemoArgs,
    F: FnOnce(A, &Settings) -> Result<()>,
{
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = A::parse(usage.program, &args)
        .and_then(|inputs| Settings::from_env().map(|settings| (inputs, settings)))
        .and_then(|(inputs, settings)| demo(inputs, &settings));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Help(text)) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) if err.shows_usage() => {
            usage.print_help(&err.to_string());
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{}: {err}", usage.program);
            println!("Got exception: {err}");
            ExitCode::FAILURE
        }
    }
}
