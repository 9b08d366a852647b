use std::path::{Path, PathBuf};

use log::{debug, info};
use opencv::{
    core::{self, Mat, Point, Rect, Scalar, Size, Vector},
    imgproc::{self, LINE_8},
    objdetect::{CascadeClassifier, CASCADE_SCALE_IMAGE},
    prelude::*,
};

use crate::error::{Error, Result};
use crate::utils::to_gray;

const SCALE_FACTOR: f64 = 1.1;
const MIN_NEIGHBORS: i32 = 10;
const MIN_FACE: i32 = 30;
const OUTLINE_THICKNESS: i32 = 4;

/// Relative name of the frontal-face cascade inside OpenCV's data directories.
pub const INSTALLED_CASCADE: &str = "haarcascades/haarcascade_frontalface_alt.xml";

/// The configured cascade if it exists, otherwise OpenCV's installed copy.
/// Falls back to `configured` when neither is found, so the load error names it.
pub fn locate_cascade(configured: &Path) -> PathBuf {
    if configured.is_file() {
        return configured.to_path_buf();
    }
    match core::find_file(INSTALLED_CASCADE, false, true) {
        Ok(found) if !found.is_empty() => {
            debug!("{configured:?} missing, using {found}");
            PathBuf::from(found)
        }
        _ => configured.to_path_buf(),
    }
}

pub struct FaceDetector {
    classifier: CascadeClassifier,
}

impl FaceDetector {
    pub fn load(cascade: &Path) -> Result<Self> {
        let not_loaded = || Error::CascadeNotLoaded(cascade.to_path_buf());
        let classifier =
            CascadeClassifier::new(&cascade.to_string_lossy()).map_err(|_| not_loaded())?;
        if classifier.empty()? {
            return Err(not_loaded());
        }
        Ok(Self { classifier })
    }

    /// Runs on the histogram-equalized grayscale of `frame`.
    pub fn detect(&mut self, frame: &Mat) -> Result<Vector<Rect>> {
        let gray = to_gray(frame)?;
        let mut equalized = Mat::default();
        imgproc::equalize_hist(&gray, &mut equalized)?;

        info!("Detecting faces...");
        let mut faces = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            &equalized,
            &mut faces,
            SCALE_FACTOR,
            MIN_NEIGHBORS,
            CASCADE_SCALE_IMAGE,
            Size::new(MIN_FACE, MIN_FACE),
            Size::new(0, 0),
        )?;
        info!("Found {} face(s)", faces.len());
        Ok(faces)
    }
}

/// Outlines each face with a green ellipse inscribed in its box.
pub fn annotate(frame: &mut Mat, faces: &Vector<Rect>) -> Result<()> {
    for face in faces.iter() {
        let center = Point::new(face.x + face.width / 2, face.y + face.height / 2);
        imgproc::ellipse(
            frame,
            center,
            Size::new(face.width / 2, face.height / 2),
            0.0,
            0.0,
            360.0,
            Scalar::new(0.0, 255.0, 0.0, 0.0),
            OUTLINE_THICKNESS,
            LINE_8,
            0,
        )?;
    }
    Ok(())
}
