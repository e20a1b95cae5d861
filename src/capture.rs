use image::RgbaImage;
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::{imgproc, videoio};

use crate::error::CaptureError;

/// Live camera source backed by OpenCV's videoio.
///
/// Frames arrive as BGR Mats and are converted to RGBA buffers for the
/// pipeline. Acquisition failure is terminal for the stream: the caller is
/// expected to stop, not retry. The device is released when the source is
/// dropped.
pub struct CameraSource {
    cap: videoio::VideoCapture,
    bgr: Mat,
    rgba: Mat,
}

impl CameraSource {
    /// Open the camera at `index`, requesting the given resolution. The
    /// device may deliver a different size; the pipeline handles any
    /// dimensions, but zone geometry is validated against the configured
    /// ones.
    pub fn open(index: i32, width: u32, height: u32) -> Result<Self, CaptureError> {
        let mut cap = videoio::VideoCapture::new(index, videoio::CAP_ANY).map_err(|e| {
            CaptureError::OpenFailed {
                index,
                source: Box::new(e),
            }
        })?;

        let opened = cap.is_opened().map_err(|e| CaptureError::OpenFailed {
            index,
            source: Box::new(e),
        })?;
        if !opened {
            return Err(CaptureError::CameraNotFound(index));
        }

        cap.set(videoio::CAP_PROP_FRAME_WIDTH, width as f64)
            .map_err(|e| CaptureError::OpenFailed {
                index,
                source: Box::new(e),
            })?;
        cap.set(videoio::CAP_PROP_FRAME_HEIGHT, height as f64)
            .map_err(|e| CaptureError::OpenFailed {
                index,
                source: Box::new(e),
            })?;

        tracing::info!(index, width, height, "camera opened");

        Ok(Self {
            cap,
            bgr: Mat::default(),
            rgba: Mat::default(),
        })
    }

    /// Grab the next frame as an RGBA buffer.
    pub fn next_frame(&mut self) -> Result<RgbaImage, CaptureError> {
        let ok = self
            .cap
            .read(&mut self.bgr)
            .map_err(|e| CaptureError::ReadFailed(Box::new(e)))?;
        if !ok || self.bgr.empty() {
            return Err(CaptureError::StreamEnded);
        }

        imgproc::cvt_color(&self.bgr, &mut self.rgba, imgproc::COLOR_BGR2RGBA, 0)
            .map_err(|e| CaptureError::ReadFailed(Box::new(e)))?;

        let width = self.rgba.cols() as u32;
        let height = self.rgba.rows() as u32;
        let data = self
            .rgba
            .data_bytes()
            .map_err(|e| CaptureError::ReadFailed(Box::new(e)))?
            .to_vec();

        RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| CaptureError::BadFrame(format!("{}x{} RGBA buffer", width, height)))
    }
}
