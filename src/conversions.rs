use opencv::{core::Mat, imgproc};

use crate::error::Result;
use crate::utils::Stage;

const CONVERSIONS: [(&str, i32); 5] = [
    ("Gray Scale Image", imgproc::COLOR_BGR2GRAY),
    ("HSV Image", imgproc::COLOR_BGR2HSV),
    ("HLS Image", imgproc::COLOR_BGR2HLS),
    ("Lab Image", imgproc::COLOR_BGR2Lab),
    ("YUV Image", imgproc::COLOR_BGR2YUV),
];

/// The original image followed by each color-space conversion of it.
pub fn stages(src: &Mat) -> Result<Vec<Stage>> {
    let mut stages = vec![Stage::new("Original Image", src.clone())];
    for (caption, code) in CONVERSIONS {
        let mut dst = Mat::default();
        imgproc::cvt_color_def(src, &mut dst, code)?;
        stages.push(Stage::new(caption, dst));
    }
    Ok(stages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, Vec3b, CV_8UC3};
    use opencv::prelude::*;

    #[test]
    fn produces_every_conversion_in_order() {
        // pure blue in BGR
        let src = Mat::new_rows_cols_with_default(4, 6, CV_8UC3, Scalar::new(255.0, 0.0, 0.0, 0.0))
            .unwrap();
        let stages = stages(&src).unwrap();

        let captions: Vec<_> = stages.iter().map(|s| s.caption).collect();
        assert_eq!(
            captions,
            [
                "Original Image",
                "Gray Scale Image",
                "HSV Image",
                "HLS Image",
                "Lab Image",
                "YUV Image"
            ]
        );

        assert_eq!(stages[1].image.channels(), 1);
        for stage in &stages[2..] {
            assert_eq!(stage.image.channels(), 3);
            assert_eq!(stage.image.rows(), 4);
        }

        // blue hue is 120 on OpenCV's 0..180 scale
        let hsv = stages[2].image.at_2d::<Vec3b>(0, 0).unwrap();
        assert_eq!(hsv[0], 120);
        assert_eq!(hsv[1], 255);
        assert_eq!(hsv[2], 255);
    }
}
