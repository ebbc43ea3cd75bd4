use crate::recognition::domain::enrollment::EnrollmentOutcome;
use crate::recognition::domain::recognition_result::RecognitionResult;

/// Domain interface to the remote recognition/enrollment service.
///
/// Implementations are shared across the poller and enrollment threads,
/// hence `Send + Sync`. Both calls are fire-and-handle: no retry.
pub trait RecognitionClient: Send + Sync {
    /// Submits one encoded frame; returns the faces found, in display order.
    fn recognize(
        &self,
        image_data_url: &str,
    ) -> Result<Vec<RecognitionResult>, Box<dyn std::error::Error + Send + Sync>>;

    /// Registers `name` against one encoded frame.
    fn enroll(
        &self,
        name: &str,
        image_data_url: &str,
    ) -> Result<EnrollmentOutcome, Box<dyn std::error::Error + Send + Sync>>;
}
