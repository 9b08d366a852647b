use log::debug;
use opencv::{
    core::{
        self, Mat, Point, Scalar, Vec3b, VecN, BORDER_CONSTANT, CV_32F, CV_32S, CV_8U, CV_8UC1,
        CV_8UC3,
    },
    imgproc::{self, DIST_L2, MORPH_OPEN, THRESH_BINARY, THRESH_BINARY_INV, THRESH_OTSU},
    prelude::*,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::Result;
use crate::utils::{to_gray, Stage};

const OPEN_ITERATIONS: i32 = 2;
const BACKGROUND_ITERATIONS: i32 = 3;
const DIST_MASK_SIZE: i32 = 5;
const FOREGROUND_RATIO: f64 = 0.7;

const BOUNDARY: i32 = -1;
const BOUNDARY_COLOR: [u8; 3] = [255, 255, 255];

pub struct Segmentation {
    /// Intermediate images, in pipeline order.
    pub stages: Vec<Stage>,
    /// CV_32S labels after watershed; -1 on region boundaries.
    pub markers: Mat,
    /// Number of labelled regions, the sure background included.
    pub regions: i32,
    pub painted: Mat,
}

fn open_kernel() -> Result<Mat> {
    Ok(Mat::new_rows_cols_with_default(3, 3, CV_8UC1, Scalar::all(1.0))?)
}

fn normalized_for_display(dist: &Mat) -> Result<Mat> {
    let mut shown = Mat::default();
    core::normalize(dist, &mut shown, 0.0, 1.0, core::NORM_MINMAX, -1, &Mat::default())?;
    Ok(shown)
}

/// Separates touching dark objects on a light background.
pub fn segment(src: &Mat, seed: u64) -> Result<Segmentation> {
    let gray = to_gray(src)?;
    let kernel = open_kernel()?;
    let anchor = Point::new(-1, -1);
    let border_value = imgproc::morphology_default_border_value()?;

    let mut binary = Mat::default();
    imgproc::threshold(&gray, &mut binary, 0.0, 255.0, THRESH_BINARY_INV | THRESH_OTSU)?;

    let mut opened = Mat::default();
    imgproc::morphology_ex(
        &binary,
        &mut opened,
        MORPH_OPEN,
        &kernel,
        anchor,
        OPEN_ITERATIONS,
        BORDER_CONSTANT,
        border_value,
    )?;

    let mut background = Mat::default();
    imgproc::dilate(
        &opened,
        &mut background,
        &kernel,
        anchor,
        BACKGROUND_ITERATIONS,
        BORDER_CONSTANT,
        border_value,
    )?;

    let mut dist = Mat::default();
    imgproc::distance_transform(&opened, &mut dist, DIST_L2, DIST_MASK_SIZE, CV_32F)?;

    let mut max_dist = 0.0;
    core::min_max_loc(&dist, None, Some(&mut max_dist), None, None, &Mat::default())?;

    let mut sure_fg = Mat::default();
    imgproc::threshold(&dist, &mut sure_fg, FOREGROUND_RATIO * max_dist, 255.0, THRESH_BINARY)?;
    let mut foreground = Mat::default();
    sure_fg.convert_to(&mut foreground, CV_8U, 1.0, 0.0)?;

    let mut unknown = Mat::default();
    core::subtract(&background, &foreground, &mut unknown, &Mat::default(), -1)?;

    let mut labels = Mat::default();
    let regions = imgproc::connected_components(&foreground, &mut labels, 8, CV_32S)?;
    debug!("watershed: {regions} marker regions, max distance {max_dist:.2}");

    // shift so the sure background is 1, then leave the unknown band at 0
    let mut markers = Mat::default();
    labels.convert_to(&mut markers, CV_32S, 1.0, 1.0)?;
    markers.set_to(&Scalar::all(0.0), &unknown)?;

    imgproc::watershed(src, &mut markers)?;

    let painted = paint(&markers, regions, seed)?;

    let stages = vec![
        Stage::new("Open Morphology operator", opened),
        Stage::new("Background", background),
        Stage::new("Distance transform", normalized_for_display(&dist)?),
        Stage::new("Foreground", foreground),
        Stage::new("Unknown Region", unknown),
    ];

    Ok(Segmentation {
        stages,
        markers,
        regions,
        painted,
    })
}

/// Colors each label 1..=regions from a seeded palette; boundaries white, the rest black.
pub fn paint(markers: &Mat, regions: i32, seed: u64) -> Result<Mat> {
    let mut rng = StdRng::seed_from_u64(seed);
    let palette: Vec<Vec3b> = (0..regions)
        .map(|_| VecN([rng.random(), rng.random(), rng.random()]))
        .collect();

    let mut painted =
        Mat::new_rows_cols_with_default(markers.rows(), markers.cols(), CV_8UC3, Scalar::all(0.0))?;
    for row in 0..markers.rows() {
        for col in 0..markers.cols() {
            let label = *markers.at_2d::<i32>(row, col)?;
            let color = if label == BOUNDARY {
                Some(VecN(BOUNDARY_COLOR))
            } else if label > 0 && label <= regions {
                palette.get((label - 1) as usize).copied()
            } else {
                None
            };
            if let Some(color) = color {
                *painted.at_2d_mut::<Vec3b>(row, col)? = color;
            }
        }
    }
    Ok(painted)
}
