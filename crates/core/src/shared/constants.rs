pub const RECOGNIZE_ENDPOINT: &str = "/recognize_base64";
pub const ENROLL_ENDPOINT: &str = "/enroll_base64";
pub const HEALTH_ENDPOINT: &str = "/health";

/// Sentinel name the service returns when no enrolled identity matches.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Requested capture resolution; the camera's negotiated resolution wins.
pub const CAPTURE_WIDTH: u32 = 640;
pub const CAPTURE_HEIGHT: u32 = 480;

pub const JPEG_QUALITY: u8 = 80;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

pub const KNOWN_COLOR: [u8; 3] = [72, 187, 120];
pub const UNKNOWN_COLOR: [u8; 3] = [245, 101, 101];
pub const LABEL_TEXT_COLOR: [u8; 3] = [255, 255, 255];

/// Bounding-box stroke width in pixels.
pub const BOX_STROKE: u32 = 3;

/// Label strip height; drawn directly above the box it annotates.
pub const LABEL_HEIGHT: u32 = 25;
pub const LABEL_PADDING_X: u32 = 5;
pub const LABEL_TEXT_SCALE: u32 = 2;

pub const NO_FACE_PLACEHOLDER: &str = "No face detected";

pub const STATUS_RECOGNIZING: &str = "Recognizing...";
pub const STATUS_STOPPED: &str = "Recognition stopped";
pub const STATUS_ENROLLING: &str = "Enrolling...";
