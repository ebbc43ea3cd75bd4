/// Single-slot status text shared by every operation.
///
/// No history, no queue: the last write wins and is what the UI shows.
#[derive(Debug, Default)]
pub struct StatusReporter {
    message: String,
}

impl StatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, message: impl Into<String>) {
        self.message = message.into();
        log::debug!("status: {}", self.message);
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
