use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("expected a 3-channel RGB frame, got {0} channels")]
    UnsupportedChannels(u8),
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
}

/// Encodes a frame as a `data:image/jpeg;base64,...` URL at the given quality.
///
/// The encoded image is sized exactly to the frame; no resampling.
pub fn encode(frame: &Frame, quality: u8) -> Result<String, EncodeError> {
    if frame.channels() != 3 {
        return Err(EncodeError::UnsupportedChannels(frame.channels()));
    }

    let mut jpeg = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
    encoder.encode(
        frame.data(),
        frame.width(),
        frame.height(),
        image::ExtendedColorType::Rgb8,
    )?;

    Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(&jpeg)))
}
