use std::fmt;

use opencv::{core::Mat, imgproc};

use crate::error::Result;

pub const MAX_VALUE: i32 = 255;
const MAX_BINARY_VALUE: f64 = 255.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdKind {
    Binary,
    BinaryInverted,
    Truncate,
    ToZero,
    ToZeroInverted,
}

impl ThresholdKind {
    pub const ALL: [ThresholdKind; 5] = [
        ThresholdKind::Binary,
        ThresholdKind::BinaryInverted,
        ThresholdKind::Truncate,
        ThresholdKind::ToZero,
        ThresholdKind::ToZeroInverted,
    ];

    /// Highest trackbar position.
    pub const MAX_INDEX: i32 = 4;

    /// Out-of-range positions fall back to `Binary`.
    pub fn from_index(index: i32) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(ThresholdKind::Binary)
    }

    pub fn flag(self) -> i32 {
        match self {
            ThresholdKind::Binary => imgproc::THRESH_BINARY,
            ThresholdKind::BinaryInverted => imgproc::THRESH_BINARY_INV,
            ThresholdKind::Truncate => imgproc::THRESH_TRUNC,
            ThresholdKind::ToZero => imgproc::THRESH_TOZERO,
            ThresholdKind::ToZeroInverted => imgproc::THRESH_TOZERO_INV,
        }
    }

    pub fn legend() -> String {
        Self::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| format!(" {i}: {}", kind.short_name()))
            .fold(String::from("Type:"), |acc, line| acc + "\n" + &line)
    }

    fn short_name(self) -> &'static str {
        match self {
            ThresholdKind::Binary => "Binary",
            ThresholdKind::BinaryInverted => "Binary Inverted",
            ThresholdKind::Truncate => "Truncate",
            ThresholdKind::ToZero => "To Zero",
            ThresholdKind::ToZeroInverted => "To Zero Inverted",
        }
    }
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Threshold", self.short_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdParams {
    pub kind: ThresholdKind,
    pub value: i32,
}

impl ThresholdParams {
    pub fn from_positions(kind: i32, value: i32) -> Self {
        Self {
            kind: ThresholdKind::from_index(kind),
            value: value.clamp(0, MAX_VALUE),
        }
    }
}

pub fn apply(gray: &Mat, params: &ThresholdParams) -> Result<Mat> {
    let mut dst = Mat::default();
    imgproc::threshold(
        gray,
        &mut dst,
        f64::from(params.value),
        MAX_BINARY_VALUE,
        params.kind.flag(),
    )?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC1};
    use opencv::prelude::*;

    fn ramp() -> Mat {
        // one row: 0, 50, 100, 150, 200, 250
        let mut m = Mat::new_rows_cols_with_default(1, 6, CV_8UC1, Scalar::all(0.0)).unwrap();
        for col in 0..6 {
            *m.at_2d_mut::<u8>(0, col).unwrap() = (col * 50) as u8;
        }
        m
    }

    fn row(m: &Mat) -> Vec<u8> {
        (0..m.cols()).map(|c| *m.at_2d::<u8>(0, c).unwrap()).collect()
    }

    #[test]
    fn positions_map_to_kinds() {
        assert_eq!(ThresholdKind::from_index(3), ThresholdKind::ToZero);
        assert_eq!(ThresholdKind::from_index(9), ThresholdKind::Binary);
        let params = ThresholdParams::from_positions(1, 300);
        assert_eq!(params.kind, ThresholdKind::BinaryInverted);
        assert_eq!(params.value, 255);
    }

    #[test]
    fn binary_and_inverted() {
        let src = ramp();
        let params = ThresholdParams::from_positions(0, 120);
        assert_eq!(row(&apply(&src, &params).unwrap()), [0, 0, 0, 255, 255, 255]);

        let params = ThresholdParams::from_positions(1, 120);
        assert_eq!(row(&apply(&src, &params).unwrap()), [255, 255, 255, 0, 0, 0]);
    }

    #[test]
    fn truncate_and_to_zero() {
        let src = ramp();
        let params = ThresholdParams::from_positions(2, 120);
        assert_eq!(row(&apply(&src, &params).unwrap()), [0, 50, 100, 120, 120, 120]);

        let params = ThresholdParams::from_positions(3, 120);
        assert_eq!(row(&apply(&src, &params).unwrap()), [0, 0, 0, 150, 200, 250]);

        let params = ThresholdParams::from_positions(4, 120);
        assert_eq!(row(&apply(&src, &params).unwrap()), [0, 50, 100, 0, 0, 0]);
    }

    #[test]
    fn legend_lists_every_kind() {
        let legend = ThresholdKind::legend();
        assert!(legend.starts_with("Type:"));
        assert!(legend.contains(" 4: To Zero Inverted"));
        assert_eq!(ThresholdKind::ToZero.to_string(), "To Zero Threshold");
    }
}
