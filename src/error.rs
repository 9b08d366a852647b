use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Which input an image plays in a demo, used to word load failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    Image,
    Full,
    Template,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRole::Image => f.write_str("Image"),
            ImageRole::Full => f.write_str("Full image"),
            ImageRole::Template => f.write_str("Template image"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not enough parameters given.")]
    NotEnoughParameters,

    #[error("No valid file format given.")]
    NoValidFileFormat,

    /// Carries the ordinal of the offending positional ("first", "second").
    #[error("No valid file format given for {0} argument.")]
    InvalidArgumentFormat(&'static str),

    #[error("{0}")]
    Arguments(String),

    #[error("Bin count must be between 1 and 256, got {0}.")]
    InvalidBins(i32),

    /// `--help` was requested; the text is printed and the program succeeds.
    #[error("{0}")]
    Help(String),

    #[error("{0} not valid.")]
    ImageNotValid(ImageRole, PathBuf),

    #[error("invalid value {value:?} for {var}")]
    Config { var: &'static str, value: String },

    #[error("Error loading face cascade {}", .0.display())]
    CascadeNotLoaded(PathBuf),

    #[error("No valid keypoints found for {0}. Aborting.")]
    NoKeypoints(ImageRole),

    #[error("template {template_cols}x{template_rows} does not fit in image {image_cols}x{image_rows}")]
    TemplateTooLarge {
        image_cols: i32,
        image_rows: i32,
        template_cols: i32,
        template_rows: i32,
    },

    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

impl Error {
    /// Errors that are reported together with the usage text.
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            Error::NotEnoughParameters
                | Error::NoValidFileFormat
                | Error::InvalidArgumentFormat(_)
                | Error::Arguments(_)
                | Error::InvalidBins(_)
                | Error::ImageNotValid(..)
        )
    }
}
