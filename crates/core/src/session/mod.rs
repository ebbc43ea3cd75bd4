pub mod poller;
pub mod recognition_session;
pub mod recognition_state;
pub mod status_reporter;
