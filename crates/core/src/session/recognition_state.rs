use crate::session::poller::PollerHandle;

/// The two-valued mode governing whether periodic polling is active.
///
/// The active poller's handle lives inside `Running`, so "at most one
/// active timer" holds by construction: entering either state consumes
/// the previous one, cancelling whatever handle it held.
pub enum RecognitionState {
    Idle,
    Running(PollerHandle),
}

impl RecognitionState {
    pub fn is_running(&self) -> bool {
        matches!(self, RecognitionState::Running(_))
    }
}
