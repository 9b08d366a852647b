use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const FACE_CASCADE_VAR: &str = "CV_SAMPLES_FACE_CASCADE";
pub const CAPTION_DELAY_VAR: &str = "CV_SAMPLES_CAPTION_DELAY_MS";

const DEFAULT_FACE_CASCADE: &str = "test_data/haarcascade_frontalface_alt.xml";
const DEFAULT_CAPTION_DELAY_MS: i32 = 2000;

/// Runtime knobs shared by the demos, read from the environment after `.env` is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub face_cascade: PathBuf,
    pub caption_delay_ms: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            face_cascade: PathBuf::from(DEFAULT_FACE_CASCADE),
            caption_delay_ms: DEFAULT_CAPTION_DELAY_MS,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(path) = lookup(FACE_CASCADE_VAR).filter(|p| !p.trim().is_empty()) {
            settings.face_cascade = PathBuf::from(path);
        }

        if let Some(raw) = lookup(CAPTION_DELAY_VAR) {
            settings.caption_delay_ms = match raw.trim().parse::<i32>() {
                // wait_key(0) blocks until a key, and any key ends a slideshow
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(Error::Config {
                        var: CAPTION_DELAY_VAR,
                        value: raw,
                    })
                }
            };
        }

        Ok(settings)
    }
}
