use std::ops::ControlFlow;
use std::path::Path;

use log::debug;
use opencv::{
    core::{self, Mat, Point, Scalar, Size},
    highgui, imgcodecs,
    imgproc::{self, COLOR_BGR2GRAY, FONT_HERSHEY_COMPLEX, LINE_8},
    prelude::*,
};

use crate::error::{Error, ImageRole, Result};

/// Reads a color image, treating an empty decode as an invalid image.
pub fn load_image(path: &Path, role: ImageRole) -> Result<Mat> {
    let image = imgcodecs::imread(&path.to_string_lossy(), imgcodecs::IMREAD_COLOR)?;
    if image.empty() {
        return Err(Error::ImageNotValid(role, path.to_path_buf()));
    }
    debug!(
        "Loaded {} {:?}: {}x{}",
        role,
        path,
        image.cols(),
        image.rows()
    );
    Ok(image)
}

pub fn show_image(title: &str, image: &Mat) -> Result<()> {
    highgui::imshow(title, image)?;
    highgui::wait_key(0)?;
    Ok(())
}

pub fn to_gray(src: &Mat) -> Result<Mat> {
    if src.channels() == 1 {
        return Ok(src.clone());
    }
    let mut gray = Mat::default();
    imgproc::cvt_color_def(src, &mut gray, COLOR_BGR2GRAY)?;
    Ok(gray)
}

/// Absolute value scaled to 8 bits, for showing signed or float responses.
pub fn to_displayable(src: &Mat) -> Result<Mat> {
    let mut dst = Mat::default();
    core::convert_scale_abs(src, &mut dst, 1.0, 0.0)?;
    Ok(dst)
}

/// One captioned step of a slideshow demo.
pub struct Stage {
    pub caption: &'static str,
    pub image: Mat,
}

impl Stage {
    pub fn new(caption: &'static str, image: Mat) -> Self {
        Self { caption, image }
    }
}

/// Black canvas of the given geometry with `text` written across the middle.
pub fn caption_frame(size: Size, typ: i32, text: &str) -> Result<Mat> {
    let mut frame = Mat::new_size_with_default(size, typ, Scalar::all(0.0))?;
    imgproc::put_text(
        &mut frame,
        text,
        Point::new(size.width / 4, size.height / 2),
        FONT_HERSHEY_COMPLEX,
        1.0,
        Scalar::new(255.0, 255.0, 255.0, 0.0),
        1,
        LINE_8,
        false,
    )?;
    Ok(frame)
}

/// Shows captions and images one after another in a single window.
/// Any key pressed while waiting breaks the sequence.
pub struct Slideshow<'a> {
    window: &'a str,
    delay_ms: i32,
    canvas_size: Size,
    canvas_type: i32,
}

impl<'a> Slideshow<'a> {
    pub fn new(window: &'a str, reference: &Mat, delay_ms: i32) -> Result<Self> {
        highgui::named_window(window, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            window,
            delay_ms,
            canvas_size: reference.size()?,
            canvas_type: reference.typ(),
        })
    }

    pub fn caption(&self, text: &str) -> Result<ControlFlow<()>> {
        let frame = caption_frame(self.canvas_size, self.canvas_type, text)?;
        self.show(&frame, self.delay_ms)
    }

    /// A delay of 0 waits for a key indefinitely.
    pub fn show(&self, image: &Mat, delay_ms: i32) -> Result<ControlFlow<()>> {
        highgui::imshow(self.window, image)?;
        let key = highgui::wait_key(delay_ms)?;
        Ok(if key >= 0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        })
    }

    pub fn present(&self, stage: &Stage) -> Result<ControlFlow<()>> {
        if self.caption(stage.caption)?.is_break() {
            return Ok(ControlFlow::Break(()));
        }
        self.show(&stage.image, self.delay_ms)
    }

    pub fn present_all(&self, stages: &[Stage]) -> Result<ControlFlow<()>> {
        for stage in stages {
            if self.present(stage)?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Final caption, then block until a key is pressed.
    pub fn finish(&self) -> Result<()> {
        let frame = caption_frame(self.canvas_size, self.canvas_type, "End: Press a key!")?;
        self.show(&frame, 0)?;
        Ok(())
    }
}
