use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;
use thiserror::Error;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("failed to open camera {index}: {reason}")]
    Open { index: u32, reason: String },
    #[error("failed to start camera stream: {0}")]
    Stream(String),
    #[error("frame grab failed: {0}")]
    Grab(String),
}

/// Live camera adapter for [`FrameSource`].
///
/// The requested resolution is a hint; the camera's negotiated format is
/// what `resolution()` reports and what every grabbed frame matches.
pub struct CameraSource {
    camera: Camera,
    width: u32,
    height: u32,
}

impl CameraSource {
    pub fn open(index: u32, width: u32, height: u32) -> Result<Self, CameraError> {
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(Resolution::new(width, height), FrameFormat::MJPEG, 30),
        ));
        let mut camera =
            Camera::new(CameraIndex::Index(index), requested).map_err(|e| CameraError::Open {
                index,
                reason: e.to_string(),
            })?;
        camera
            .open_stream()
            .map_err(|e| CameraError::Stream(e.to_string()))?;

        let negotiated = camera.resolution();
        log::info!(
            "Camera {index} streaming at {}x{}",
            negotiated.width(),
            negotiated.height()
        );
        Ok(Self {
            width: negotiated.width(),
            height: negotiated.height(),
            camera,
        })
    }
}

impl FrameSource for CameraSource {
    fn grab(&mut self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CameraError::Grab(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CameraError::Grab(e.to_string()))?;
        let (width, height) = decoded.dimensions();
        Ok(Frame::new(decoded.into_raw(), width, height, 3))
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
