use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::capture::domain::frame_source::FrameSource;
use crate::capture::infrastructure::jpeg_data_url;
use crate::overlay::overlay_surface::OverlaySurface;
use crate::overlay::result_renderer;
use crate::overlay::summary::Summary;
use crate::recognition::domain::enrollment::{validate_name, EnrollmentError, EnrollmentOutcome};
use crate::recognition::domain::recognition_client::RecognitionClient;
use crate::session::poller::{self, PollerEvent, PollerParams};
use crate::session::recognition_state::RecognitionState;
use crate::session::status_reporter::StatusReporter;
use crate::shared::constants::{
    JPEG_QUALITY, STATUS_ENROLLING, STATUS_RECOGNIZING, STATUS_STOPPED,
};

/// The one coordinating context of the client.
///
/// Owns the overlay, summary, status and recognition state; everything
/// mutates through its methods, and only the thread that owns the session
/// touches them. Workers report back over the poller's event channel and
/// are applied by [`RecognitionSession::pump`], which gates on the current
/// state; that gate is the effective cancellation for in-flight responses.
pub struct RecognitionSession {
    source: Arc<Mutex<dyn FrameSource>>,
    client: Arc<dyn RecognitionClient>,
    interval: Duration,
    state: RecognitionState,
    overlay: OverlaySurface,
    summary: Summary,
    status: StatusReporter,
}

impl RecognitionSession {
    /// Sizes the overlay to the source's negotiated resolution.
    pub fn new(
        source: Arc<Mutex<dyn FrameSource>>,
        client: Arc<dyn RecognitionClient>,
        interval: Duration,
    ) -> Self {
        let (width, height) = match source.lock() {
            Ok(guard) => guard.resolution(),
            Err(poisoned) => poisoned.into_inner().resolution(),
        };
        Self {
            source,
            client,
            interval,
            state: RecognitionState::Idle,
            overlay: OverlaySurface::new(width, height),
            summary: Summary::default(),
            status: StatusReporter::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn status(&self) -> &str {
        self.status.message()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status.set(message);
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn overlay(&self) -> &OverlaySurface {
        &self.overlay
    }

    /// Flips the recognition state.
    ///
    /// Idle to Running starts the periodic poller. Running to Idle cancels
    /// it and clears the overlay immediately; the poller's event channel
    /// dies with its handle, so a response still in flight has nowhere
    /// left to land.
    pub fn toggle(&mut self) {
        match std::mem::replace(&mut self.state, RecognitionState::Idle) {
            RecognitionState::Running(handle) => {
                handle.cancel();
                self.overlay.clear();
                self.status.set(STATUS_STOPPED);
                log::info!("recognition stopped");
            }
            RecognitionState::Idle => {
                let handle = poller::spawn(PollerParams {
                    source: self.source.clone(),
                    client: self.client.clone(),
                    interval: self.interval,
                });
                self.state = RecognitionState::Running(handle);
                self.status.set(STATUS_RECOGNIZING);
                log::info!("recognition started, interval {:?}", self.interval);
            }
        }
    }

    /// Applies pending poller events; a no-op while Idle.
    ///
    /// Responses are applied in completion order, so the last completed
    /// one wins the overlay even if an older tick finishes late. Summary
    /// and overlay always come from the same response. Returns how many
    /// responses were applied.
    pub fn pump(&mut self) -> usize {
        let RecognitionState::Running(handle) = &self.state else {
            return 0;
        };
        let events: Vec<PollerEvent> = handle.events().try_iter().collect();

        let mut applied = 0;
        for event in events {
            match event {
                PollerEvent::Recognized(results) => {
                    self.summary = result_renderer::render(&results, &mut self.overlay);
                    applied += 1;
                }
                PollerEvent::TickFailed(message) => {
                    log::warn!("recognition tick failed: {message}");
                    self.status.set(format!("Recognition error: {message}"));
                }
            }
        }
        applied
    }

    /// One-shot enrollment of the current frame under `raw_name`.
    ///
    /// Independent of the recognition state. A blank name is rejected
    /// before any capture or network work, with status untouched. The
    /// returned outcome carries the server's verdict; `success: false`
    /// is not an `Err`; the caller decides how loudly to surface it.
    pub fn enroll(&mut self, raw_name: &str) -> Result<EnrollmentOutcome, EnrollmentError> {
        let name = validate_name(raw_name)?;

        self.status.set(STATUS_ENROLLING);

        let grabbed = {
            let mut source = match self.source.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            source.grab()
        };
        let frame = match grabbed {
            Ok(frame) => frame,
            Err(e) => {
                self.status.set(format!("Enrollment error: {e}"));
                return Err(EnrollmentError::Capture(e.to_string()));
            }
        };
        let data_url = match jpeg_data_url::encode(&frame, JPEG_QUALITY) {
            Ok(url) => url,
            Err(e) => {
                self.status.set(format!("Enrollment error: {e}"));
                return Err(EnrollmentError::Capture(e.to_string()));
            }
        };

        match self.client.enroll(name, &data_url) {
            Ok(outcome) => {
                self.status.set(outcome.message.clone());
                Ok(outcome)
            }
            Err(e) => {
                self.status.set(format!("Enrollment error: {e}"));
                Err(EnrollmentError::Request(e.to_string()))
            }
        }
    }
}
