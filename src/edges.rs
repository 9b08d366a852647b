use opencv::{core::Mat, imgproc};

use crate::error::Result;

pub const MAX_THRESHOLD: i32 = 255;
const APERTURE_SIZE: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannyParams {
    pub min: i32,
    pub max: i32,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self { min: 100, max: 200 }
    }
}

impl CannyParams {
    pub fn from_positions(min: i32, max: i32) -> Self {
        Self {
            min: min.clamp(0, MAX_THRESHOLD),
            max: max.clamp(0, MAX_THRESHOLD),
        }
    }
}

pub fn canny(image: &Mat, params: &CannyParams) -> Result<Mat> {
    let mut edges = Mat::default();
    imgproc::canny(
        image,
        &mut edges,
        f64::from(params.min),
        f64::from(params.max),
        APERTURE_SIZE,
        false,
    )?;
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{self, Rect, Scalar, CV_8UC3};
    use opencv::prelude::*;

    fn square() -> Mat {
        let mut m = Mat::new_rows_cols_with_default(60, 60, CV_8UC3, Scalar::all(0.0)).unwrap();
        imgproc::rectangle(
            &mut m,
            Rect::new(20, 20, 20, 20),
            Scalar::all(255.0),
            -1,
            imgproc::LINE_8,
            0,
        )
        .unwrap();
        m
    }

    #[test]
    fn outlines_a_square() {
        let edges = canny(&square(), &CannyParams::default()).unwrap();
        assert_eq!(edges.channels(), 1);
        let count = core::count_non_zero(&edges).unwrap();
        // roughly the 80-pixel perimeter
        assert!(count >= 60 && count <= 120, "edge pixels: {count}");
        assert_eq!(*edges.at_2d::<u8>(5, 5).unwrap(), 0);
        assert_eq!(*edges.at_2d::<u8>(30, 30).unwrap(), 0);
    }

    #[test]
    fn flat_image_has_no_edges() {
        let flat = Mat::new_rows_cols_with_default(30, 30, CV_8UC3, Scalar::all(90.0)).unwrap();
        let edges = canny(&flat, &CannyParams::from_positions(0, 0)).unwrap();
        assert_eq!(core::count_non_zero(&edges).unwrap(), 0);
    }
}
