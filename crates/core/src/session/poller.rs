use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};

use crate::capture::domain::frame_source::FrameSource;
use crate::capture::infrastructure::jpeg_data_url;
use crate::recognition::domain::recognition_client::RecognitionClient;
use crate::recognition::domain::recognition_result::RecognitionResult;
use crate::shared::constants::JPEG_QUALITY;

/// How often the tick sleep re-checks the cancellation flag.
const CANCEL_POLL_SLICE: Duration = Duration::from_millis(10);

pub enum PollerEvent {
    /// One tick failed to capture or submit; the loop keeps running.
    TickFailed(String),
    /// A recognition response completed. Responses may arrive out of tick
    /// order; the consumer applies them in completion order.
    Recognized(Vec<RecognitionResult>),
}

pub(crate) struct PollerParams {
    pub source: Arc<Mutex<dyn FrameSource>>,
    pub client: Arc<dyn RecognitionClient>,
    pub interval: Duration,
}

/// Cancellation handle plus event stream of one poller worker.
///
/// Dropping the handle cancels the worker and closes the event channel, so
/// responses in flight at that point can never be observed again.
pub struct PollerHandle {
    cancelled: Arc<AtomicBool>,
    events: Receiver<PollerEvent>,
}

impl PollerHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn events(&self) -> &Receiver<PollerEvent> {
        &self.events
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Starts the repeating capture-submit loop on a worker thread.
pub(crate) fn spawn(params: PollerParams) -> PollerHandle {
    let (tx, rx) = crossbeam_channel::unbounded::<PollerEvent>();
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();

    thread::spawn(move || run_loop(&params, &tx, &flag));

    PollerHandle {
        cancelled,
        events: rx,
    }
}

fn run_loop(params: &PollerParams, tx: &Sender<PollerEvent>, cancelled: &Arc<AtomicBool>) {
    // Ticks stay on a fixed wall-clock schedule: the deadline advances by
    // one interval per tick, never by "now", so request latency cannot
    // stretch the period.
    let mut next_tick = Instant::now() + params.interval;
    loop {
        sleep_until(next_tick, cancelled);
        if cancelled.load(Ordering::Relaxed) {
            return;
        }
        next_tick += params.interval;
        tick(params, tx, cancelled);
    }
}

fn tick(params: &PollerParams, tx: &Sender<PollerEvent>, cancelled: &Arc<AtomicBool>) {
    let grabbed = {
        let mut source = match params.source.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        source.grab()
    };

    let data_url = match grabbed.and_then(|frame| {
        jpeg_data_url::encode(&frame, JPEG_QUALITY).map_err(|e| e.into())
    }) {
        Ok(url) => url,
        Err(e) => {
            let _ = tx.send(PollerEvent::TickFailed(e.to_string()));
            return;
        }
    };

    // Submit on its own thread so a slow response never delays the next
    // tick. Overlapping requests are allowed; whichever completes last
    // wins the overlay.
    let client = params.client.clone();
    let tx = tx.clone();
    let cancelled = cancelled.clone();
    thread::spawn(move || {
        let event = match client.recognize(&data_url) {
            Ok(results) => PollerEvent::Recognized(results),
            Err(e) => PollerEvent::TickFailed(e.to_string()),
        };
        if !cancelled.load(Ordering::Relaxed) {
            let _ = tx.send(event);
        }
    });
}

fn sleep_until(deadline: Instant, cancelled: &AtomicBool) {
    loop {
        if cancelled.load(Ordering::Relaxed) {
            return;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return;
        }
        thread::sleep(remaining.min(CANCEL_POLL_SLICE));
    }
}
