use opencv::{
    core::{Mat, Point, Size, BORDER_CONSTANT},
    imgproc,
};

use crate::error::Result;

pub const MAX_ELEMENT: i32 = 2;
pub const MAX_KERNEL_SIZE: i32 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOp {
    Dilate,
    Erode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    Rect,
    Cross,
    Ellipse,
}

impl ElementShape {
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => ElementShape::Cross,
            2 => ElementShape::Ellipse,
            _ => ElementShape::Rect,
        }
    }

    fn flag(self) -> i32 {
        match self {
            ElementShape::Rect => imgproc::MORPH_RECT,
            ElementShape::Cross => imgproc::MORPH_CROSS,
            ElementShape::Ellipse => imgproc::MORPH_ELLIPSE,
        }
    }
}

/// `size` is the half-width n; the kernel is (2n+1)x(2n+1) anchored at its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphParams {
    pub shape: ElementShape,
    pub size: i32,
}

impl MorphParams {
    pub fn from_positions(element: i32, size: i32) -> Self {
        Self {
            shape: ElementShape::from_index(element),
            size: size.clamp(0, MAX_KERNEL_SIZE),
        }
    }

    pub fn kernel_side(&self) -> i32 {
        2 * self.size + 1
    }
}

pub fn structuring_element(params: &MorphParams) -> Result<Mat> {
    let side = params.kernel_side();
    let element = imgproc::get_structuring_element(
        params.shape.flag(),
        Size::new(side, side),
        Point::new(params.size, params.size),
    )?;
    Ok(element)
}

pub fn apply(src: &Mat, op: MorphOp, params: &MorphParams) -> Result<Mat> {
    let element = structuring_element(params)?;
    let anchor = Point::new(-1, -1);
    let border_value = imgproc::morphology_default_border_value()?;
    let mut dst = Mat::default();
    match op {
        MorphOp::Dilate => {
            imgproc::dilate(src, &mut dst, &element, anchor, 1, BORDER_CONSTANT, border_value)?
        }
        MorphOp::Erode => {
            imgproc::erode(src, &mut dst, &element, anchor, 1, BORDER_CONSTANT, border_value)?
        }
    }
    Ok(dst)
}
