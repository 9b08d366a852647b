use std::path::{Path, PathBuf};

use argh::{EarlyExit, FromArgs};
use log::warn;

use crate::error::{Error, Result};

pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// How a program names itself in the usage text.
#[derive(Debug, Clone, Copy)]
pub struct Usage {
    pub program: &'static str,
    pub arguments: &'static str,
}

impl Usage {
    pub const fn single(program: &'static str) -> Self {
        Self {
            program,
            arguments: "/path/to/image",
        }
    }

    pub const fn pair(program: &'static str) -> Self {
        Self {
            program,
            arguments: "/path/to/full/image /path/to/template/image",
        }
    }

    pub fn help_text(&self, message: &str) -> String {
        format!(
            "Error: {message}\n\nUsage: {} {}\nExtensions supported: *.jpg, *.png",
            self.program, self.arguments
        )
    }

    pub fn print_help(&self, message: &str) {
        println!("{}", self.help_text(message));
    }
}

pub fn has_supported_extension(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Parsed command line of a demo program.
pub trait DemoArgs: Sized {
    fn parse(program: &str, args: &[String]) -> Result<Self>;
}

fn argh_parse<T: FromArgs>(program: &str, args: &[String], required: usize) -> Result<T> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    T::from_args(&[program], &args).map_err(|EarlyExit { output, status }| match status {
        Ok(()) => Error::Help(output),
        Err(()) if args.len() < required => Error::NotEnoughParameters,
        Err(()) => Error::Arguments(output.trim_end().to_string()),
    })
}

#[derive(FromArgs)]
/// Run an OpenCV demo on one image.
struct SingleImageArgs {
    /// image files; the last one ending in .jpg or .png is used
    #[argh(positional)]
    images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleImage {
    pub path: PathBuf,
}

impl DemoArgs for SingleImage {
    fn parse(program: &str, args: &[String]) -> Result<Self> {
        let raw: SingleImageArgs = argh_parse(program, args, 1)?;
        if raw.images.is_empty() {
            return Err(Error::NotEnoughParameters);
        }

        let mut chosen = None;
        for candidate in raw.images {
            if has_supported_extension(&candidate) {
                chosen = Some(candidate);
            } else {
                warn!("Ignoring {candidate:?}: unsupported file format");
            }
        }

        chosen
            .map(|path| SingleImage {
                path: PathBuf::from(path),
            })
            .ok_or(Error::NoValidFileFormat)
    }
}

#[derive(FromArgs)]
/// Run an OpenCV demo on a full image and a template image.
struct ImagePairArgs {
    /// image to search in
    #[argh(positional)]
    full: String,

    /// image to search for
    #[argh(positional)]
    template: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub full: PathBuf,
    pub template: PathBuf,
}

impl DemoArgs for ImagePair {
    fn parse(program: &str, args: &[String]) -> Result<Self> {
        let raw: ImagePairArgs = argh_parse(program, args, 2)?;

        if !has_supported_extension(&raw.full) {
            return Err(Error::InvalidArgumentFormat("first"));
        }
        if !has_supported_extension(&raw.template) {
            return Err(Error::InvalidArgumentFormat("second"));
        }

        Ok(ImagePair {
            full: PathBuf::from(raw.full),
            template: PathBuf::from(raw.template),
        })
    }
}

pub const DEFAULT_BINS: i32 = 16;
pub const MAX_BINS: i32 = 256;

#[derive(FromArgs)]
/// Print per-channel HSV histograms of an image.
struct BinnedImageArgs {
    /// image file (.jpg or .png)
    #[argh(positional)]
    image: String,

    /// number of histogram bins per channel
    #[argh(positional)]
    bins: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinnedImage {
    pub path: PathBuf,
    pub bins: i32,
}

impl DemoArgs for BinnedImage {
    fn parse(program: &str, args: &[String]) -> Result<Self> {
        let raw: BinnedImageArgs = argh_parse(program, args, 1)?;

        if !has_supported_extension(&raw.image) {
            return Err(Error::InvalidArgumentFormat("first"));
        }

        let bins = raw.bins.unwrap_or(DEFAULT_BINS);
        if !(1..=MAX_BINS).contains(&bins) {
            return Err(Error::InvalidBins(bins));
        }

        Ok(BinnedImage {
            path: PathBuf::from(raw.image),
            bins,
        })
    }
}
