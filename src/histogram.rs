//! Brightness/contrast adjustment with a live histogram plot, and per-channel
//! HSV histograms.

use opencv::{
    core::{self, Mat, Point, Scalar, Vector, CV_32F, CV_8U, NORM_MINMAX},
    imgproc::{self, COLOR_BGR2HSV, LINE_8},
    prelude::*,
};

use crate::error::Result;
use crate::utils::to_gray;

pub const MAX_LEVEL: i32 = 200;
pub const NEUTRAL_LEVEL: i32 = 100;

pub const PLOT_BINS: i32 = 64;
const PLOT_ROWS: i32 = 200;
const PLOT_COLS: i32 = 320;

const HUE_RANGE: [f32; 2] = [0.0, 180.0];
const LEVEL_RANGE: [f32; 2] = [0.0, 256.0];

/// Trackbar positions; 100 is neutral for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessContrast {
    pub brightness: i32,
    pub contrast: i32,
}

impl Default for BrightnessContrast {
    fn default() -> Self {
        Self {
            brightness: NEUTRAL_LEVEL,
            contrast: NEUTRAL_LEVEL,
        }
    }
}

impl BrightnessContrast {
    pub fn from_positions(brightness: i32, contrast: i32) -> Self {
        Self {
            brightness: brightness.clamp(0, MAX_LEVEL),
            contrast: contrast.clamp(0, MAX_LEVEL),
        }
    }

    /// Linear transform `dst = a * src + b` (Werner D. Streidt's formula).
    pub fn coefficients(&self) -> (f64, f64) {
        let brightness = f64::from(self.brightness - NEUTRAL_LEVEL);
        let contrast = f64::from(self.contrast - NEUTRAL_LEVEL);

        if contrast > 0.0 {
            let delta = 127.0 * contrast / 100.0;
            let a = 255.0 / (255.0 - delta * 2.0);
            (a, a * (brightness - delta))
        } else {
            let delta = -128.0 * contrast / 100.0;
            let a = (256.0 - delta * 2.0) / 255.0;
            (a, a * brightness + delta)
        }
    }
}

pub fn adjust(image: &Mat, params: &BrightnessContrast) -> Result<Mat> {
    let (alpha, beta) = params.coefficients();
    let gray = to_gray(image)?;
    let mut dst = Mat::default();
    gray.convert_to(&mut dst, CV_8U, alpha, beta)?;
    Ok(dst)
}

fn channel_histogram(channel: &Mat, bins: i32, range: [f32; 2]) -> Result<Mat> {
    let images: Vector<Mat> = Vector::from_iter([channel.clone()]);
    let channels = Vector::<i32>::from_slice(&[0]);
    let hist_size = Vector::<i32>::from_slice(&[bins]);
    let ranges = Vector::<f32>::from_slice(&range);
    let mut hist = Mat::default();
    imgproc::calc_hist(
        &images,
        &channels,
        &Mat::default(),
        &mut hist,
        &hist_size,
        &ranges,
        false,
    )?;
    Ok(hist)
}

fn histogram_values(hist: &Mat) -> Result<Vec<f32>> {
    (0..hist.rows())
        .map(|i| Ok(*hist.at::<f32>(i)?))
        .collect()
}

/// Filled black bars on a white 200x320 canvas, tallest bin at full height.
pub fn plot(gray: &Mat) -> Result<Mat> {
    let hist = channel_histogram(gray, PLOT_BINS, LEVEL_RANGE)?;
    let mut canvas =
        Mat::new_rows_cols_with_default(PLOT_ROWS, PLOT_COLS, CV_8U, Scalar::all(255.0))?;

    let mut scaled = Mat::default();
    core::normalize(
        &hist,
        &mut scaled,
        0.0,
        f64::from(PLOT_ROWS),
        NORM_MINMAX,
        CV_32F,
        &Mat::default(),
    )?;

    let bin_width = (f64::from(PLOT_COLS) / f64::from(PLOT_BINS)).round() as i32;
    for i in 0..PLOT_BINS {
        let height = scaled.at::<f32>(i)?.round() as i32;
        imgproc::rectangle_points(
            &mut canvas,
            Point::new(i * bin_width, PLOT_ROWS),
            Point::new((i + 1) * bin_width, PLOT_ROWS - height),
            Scalar::all(0.0),
            -1,
            LINE_8,
            0,
        )?;
    }
    Ok(canvas)
}

#[derive(Debug, Clone, PartialEq)]
pub struct HsvHistogram {
    pub hue: Vec<f32>,
    pub saturation: Vec<f32>,
    pub value: Vec<f32>,
}

impl HsvHistogram {
    pub fn report(&self) -> String {
        let line = |name: &str, bins: &[f32]| {
            let values: Vec<String> = bins.iter().map(|v| v.to_string()).collect();
            format!(">>> Channel {name}: {}", values.join(" "))
        };
        [
            line("H", &self.hue),
            line("S", &self.saturation),
            line("V", &self.value),
        ]
        .join("\n")
    }
}

pub fn to_hsv(src: &Mat) -> Result<Mat> {
    let mut hsv = Mat::default();
    imgproc::cvt_color_def(src, &mut hsv, COLOR_BGR2HSV)?;
    Ok(hsv)
}

/// Histograms of an HSV image's planes; hue spans 0..180, the others 0..256.
pub fn hsv_histogram(hsv: &Mat, bins: i32) -> Result<HsvHistogram> {
    let mut planes: Vector<Mat> = Vector::new();
    core::split(hsv, &mut planes)?;

    Ok(HsvHistogram {
        hue: histogram_values(&channel_histogram(&planes.get(0)?, bins, HUE_RANGE)?)?,
        saturation: histogram_values(&channel_histogram(&planes.get(1)?, bins, LEVEL_RANGE)?)?,
        value: histogram_values(&channel_histogram(&planes.get(2)?, bins, LEVEL_RANGE)?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use opencv::core::{Rect, CV_8UC1, CV_8UC3};

    fn gray_histogram(gray: &Mat, bins: i32) -> Vec<f32> {
        histogram_values(&channel_histogram(gray, bins, LEVEL_RANGE).unwrap()).unwrap()
    }

    #[test]
    fn neutral_levels_are_identity() {
        let (a, b) = BrightnessContrast::default().coefficients();
        assert_relative_eq!(a, 256.0 / 255.0);
        assert_relative_eq!(b, 0.0);
    }

    #[test]
    fn contrast_and_brightness_coefficients() {
        let (a, b) = BrightnessContrast::from_positions(100, 150).coefficients();
        // delta = 63.5, a = 255 / 128
        assert_relative_eq!(a, 255.0 / 128.0);
        assert_relative_eq!(b, -a * 63.5);

        let (a, b) = BrightnessContrast::from_positions(150, 50).coefficients();
        // delta = 64, a = 128 / 255
        assert_relative_eq!(a, 128.0 / 255.0);
        assert_relative_eq!(b, a * 50.0 + 64.0);

        // full contrast stays finite
        let (a, _) = BrightnessContrast::from_positions(100, 200).coefficients();
        assert!(a.is_finite());
    }

    #[test]
    fn adjust_brightens_gray() {
        let src = Mat::new_rows_cols_with_default(3, 3, CV_8UC3, Scalar::all(100.0)).unwrap();
        let dst = adjust(&src, &BrightnessContrast::from_positions(150, 100)).unwrap();
        assert_eq!(dst.channels(), 1);
        assert!(*dst.at_2d::<u8>(1, 1).unwrap() > 140);
    }

    #[test]
    fn gray_histogram_counts_pixels() {
        let mut src = Mat::new_rows_cols_with_default(10, 10, CV_8UC1, Scalar::all(0.0)).unwrap();
        imgproc::rectangle(&mut src, Rect::new(0, 0, 10, 4), Scalar::all(255.0), -1, LINE_8, 0)
            .unwrap();
        let hist = gray_histogram(&src, 4);
        assert_eq!(hist, vec![60.0, 0.0, 0.0, 40.0]);
    }

    #[test]
    fn plot_draws_bars_on_white() {
        let src = Mat::new_rows_cols_with_default(8, 8, CV_8UC1, Scalar::all(130.0)).unwrap();
        let canvas = plot(&src).unwrap();
        assert_eq!(canvas.rows(), 200);
        assert_eq!(canvas.cols(), 320);
        // every pixel falls in bin 32, drawn full height at x = 160..165
        assert_eq!(*canvas.at_2d::<u8>(199, 162).unwrap(), 0);
        assert_eq!(*canvas.at_2d::<u8>(1, 162).unwrap(), 0);
        assert_eq!(*canvas.at_2d::<u8>(199, 10).unwrap(), 255);
    }

    #[test]
    fn hsv_histogram_sums_to_pixel_count() {
        // pure green in BGR: hue 60
        let src = Mat::new_rows_cols_with_default(5, 4, CV_8UC3, Scalar::new(0.0, 255.0, 0.0, 0.0))
            .unwrap();
        let hist = hsv_histogram(&to_hsv(&src).unwrap(), 6).unwrap();

        for channel in [&hist.hue, &hist.saturation, &hist.value] {
            assert_eq!(channel.len(), 6);
            assert_relative_eq!(channel.iter().sum::<f32>(), 20.0);
        }
        // 180 / 6 = 30 per hue bin, 60 lands in bin 2
        assert_relative_eq!(hist.hue[2], 20.0);
        assert_relative_eq!(hist.value[5], 20.0);
    }

    #[test]
    fn report_has_one_line_per_channel() {
        let hist = HsvHistogram {
            hue: vec![1.0, 2.0],
            saturation: vec![3.0, 0.0],
            value: vec![0.0, 3.0],
        };
        assert_eq!(
            hist.report(),
            ">>> Channel H: 1 2\n>>> Channel S: 3 0\n>>> Channel V: 0 3"
        );
    }
}
