use opencv::{
    core::{self, Mat, BORDER_DEFAULT, CV_64F},
    imgproc,
};

use crate::error::Result;
use crate::utils::{to_displayable, Stage};

const SOBEL_KSIZE: i32 = 5;

fn sobel(gray: &Mat, dx: i32, dy: i32) -> Result<Mat> {
    let mut dst = Mat::default();
    imgproc::sobel(gray, &mut dst, CV_64F, dx, dy, SOBEL_KSIZE, 1.0, 0.0, BORDER_DEFAULT)?;
    Ok(dst)
}

fn scharr(gray: &Mat, dx: i32, dy: i32) -> Result<Mat> {
    let mut dst = Mat::default();
    imgproc::scharr(gray, &mut dst, CV_64F, dx, dy, 1.0, 0.0, BORDER_DEFAULT)?;
    Ok(dst)
}

fn laplacian(gray: &Mat) -> Result<Mat> {
    let mut dst = Mat::default();
    imgproc::laplacian_def(gray, &mut dst, CV_64F)?;
    Ok(dst)
}

/// Equal blend of the absolute X and Y Sobel responses.
fn sobel_xy(sobel_x: &Mat, sobel_y: &Mat) -> Result<Mat> {
    let abs_x = to_displayable(sobel_x)?;
    let abs_y = to_displayable(sobel_y)?;
    let mut dst = Mat::default();
    core::add_weighted(&abs_x, 0.5, &abs_y, 0.5, 0.0, &mut dst, -1)?;
    Ok(dst)
}

/// Gradient responses of a grayscale image, each scaled to 8 bits for display.
pub fn stages(gray: &Mat) -> Result<Vec<Stage>> {
    let sobel_x = sobel(gray, 1, 0)?;
    let sobel_y = sobel(gray, 0, 1)?;
    let combined = sobel_xy(&sobel_x, &sobel_y)?;

    Ok(vec![
        Stage::new("Sobel Gradient X", to_displayable(&sobel_x)?),
        Stage::new("Sobel Gradient Y", to_displayable(&sobel_y)?),
        Stage::new("Scharr Gradient X", to_displayable(&scharr(gray, 1, 0)?)?),
        Stage::new("Scharr Gradient Y", to_displayable(&scharr(gray, 0, 1)?)?),
        Stage::new("Laplacian Gradient", to_displayable(&laplacian(gray)?)?),
        Stage::new("Sobel X+Y", combined),
    ])
}
