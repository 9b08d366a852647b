use std::fmt;

use opencv::{
    core::{self, Mat, Point, Rect, Scalar, NORM_MINMAX},
    imgproc::{self, LINE_8},
    prelude::*,
};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMethod {
    SqDiff,
    SqDiffNormed,
    CCorr,
    CCorrNormed,
    CCoeff,
    CCoeffNormed,
}

impl MatchMethod {
    pub const ALL: [MatchMethod; 6] = [
        MatchMethod::SqDiff,
        MatchMethod::SqDiffNormed,
        MatchMethod::CCorr,
        MatchMethod::CCorrNormed,
        MatchMethod::CCoeff,
        MatchMethod::CCoeffNormed,
    ];

    pub const MAX_INDEX: i32 = 5;

    pub fn from_index(index: i32) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(MatchMethod::SqDiff)
    }

    fn flag(self) -> i32 {
        match self {
            MatchMethod::SqDiff => imgproc::TM_SQDIFF,
            MatchMethod::SqDiffNormed => imgproc::TM_SQDIFF_NORMED,
            MatchMethod::CCorr => imgproc::TM_CCORR,
            MatchMethod::CCorrNormed => imgproc::TM_CCORR_NORMED,
            MatchMethod::CCoeff => imgproc::TM_CCOEFF,
            MatchMethod::CCoeffNormed => imgproc::TM_CCOEFF_NORMED,
        }
    }

    /// Squared-difference scores are best when lowest.
    pub fn lower_is_better(self) -> bool {
        matches!(self, MatchMethod::SqDiff | MatchMethod::SqDiffNormed)
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchMethod::SqDiff => "SQDIFF",
            MatchMethod::SqDiffNormed => "SQDIFF NORMED",
            MatchMethod::CCorr => "TM CCORR",
            MatchMethod::CCorrNormed => "TM CCORR NORMED",
            MatchMethod::CCoeff => "TM COEFF",
            MatchMethod::CCoeffNormed => "TM COEFF NORMED",
        };
        f.write_str(name)
    }
}

pub struct TemplateMatch {
    pub location: Point,
    /// Score map normalized to 0..1.
    pub scores: Mat,
}

pub fn find_best(image: &Mat, template: &Mat, method: MatchMethod) -> Result<TemplateMatch> {
    if template.cols() > image.cols() || template.rows() > image.rows() {
        return Err(Error::TemplateTooLarge {
            image_cols: image.cols(),
            image_rows: image.rows(),
            template_cols: template.cols(),
            template_rows: template.rows(),
        });
    }

    let mut raw = Mat::default();
    imgproc::match_template(image, template, &mut raw, method.flag(), &Mat::default())?;

    let mut scores = Mat::default();
    core::normalize(&raw, &mut scores, 0.0, 1.0, NORM_MINMAX, -1, &Mat::default())?;

    let mut min_loc = Point::default();
    let mut max_loc = Point::default();
    core::min_max_loc(
        &scores,
        None,
        None,
        Some(&mut min_loc),
        Some(&mut max_loc),
        &Mat::default(),
    )?;

    let location = if method.lower_is_better() {
        min_loc
    } else {
        max_loc
    };
    Ok(TemplateMatch { location, scores })
}

/// Green box of the template's size at the match location.
pub fn mark(canvas: &mut Mat, location: Point, template: &Mat) -> Result<()> {
    imgproc::rectangle(
        canvas,
        Rect::new(location.x, location.y, template.cols(), template.rows()),
        Scalar::new(0.0, 255.0, 0.0, 0.0),
        2,
        LINE_8,
        0,
    )?;
    Ok(())
}
