use crate::shared::frame::Frame;

/// Produces still frames from a live video source.
///
/// Each `grab` is self-contained: it returns the most recent decoded frame
/// at the source's negotiated resolution, or an error when the source
/// cannot deliver one (not yet streaming, device lost). Failures are never
/// swallowed; callers decide how one missed frame affects their operation.
pub trait FrameSource: Send {
    /// Captures a single RGB frame.
    fn grab(&mut self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>>;

    /// The negotiated `(width, height)` every grabbed frame will have.
    fn resolution(&self) -> (u32, u32);
}
