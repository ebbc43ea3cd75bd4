use crate::shared::constants::UNKNOWN_NAME;
use crate::shared::face_box::FaceBox;

/// One identified-or-unknown face as returned by the recognition service.
///
/// `confidence` is in `[0, 1]`; the box is in frame pixel coordinates.
/// Result order is display order.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognitionResult {
    pub name: String,
    pub confidence: f64,
    pub face_box: FaceBox,
}

impl RecognitionResult {
    pub fn new(name: impl Into<String>, confidence: f64, face_box: FaceBox) -> Self {
        Self {
            name: name.into(),
            confidence,
            face_box,
        }
    }

    /// The service signals "no match above threshold" with a sentinel name;
    /// the client only branches presentation on it.
    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sentinel() {
        let unknown = RecognitionResult::new("Unknown", 0.3, FaceBox::new(0, 0, 10, 10));
        let known = RecognitionResult::new("Alice", 0.92, FaceBox::new(0, 0, 10, 10));
        assert!(unknown.is_unknown());
        assert!(!known.is_unknown());
    }

    #[test]
    fn test_sentinel_is_case_sensitive() {
        let r = RecognitionResult::new("unknown", 0.5, FaceBox::new(0, 0, 10, 10));
        assert!(!r.is_unknown());
    }
}
