use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::{Receiver, TryRecvError};

use facelens_core::capture::domain::frame_source::FrameSource;
use facelens_core::capture::infrastructure::camera_source::CameraSource;
use facelens_core::recognition::infrastructure::http_recognition_client::HttpRecognitionClient;
use facelens_core::session::recognition_session::RecognitionSession;
use facelens_core::shared::constants::{CAPTURE_HEIGHT, CAPTURE_WIDTH, DEFAULT_POLL_INTERVAL_MS};

/// Live face recognition against a remote service.
#[derive(Parser)]
#[command(name = "facelens")]
struct Cli {
    /// Base URL of the recognition service.
    #[arg(long, default_value = "http://localhost:8000")]
    server: String,

    /// Camera device index.
    #[arg(long, default_value_t = 0)]
    camera: u32,

    /// Polling interval in milliseconds.
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    interval_ms: u64,

    /// Save an annotated frame to this directory for each applied response.
    #[arg(long)]
    annotated_dir: Option<PathBuf>,

    /// Enroll the current camera frame under this name, then exit.
    #[arg(long)]
    enroll: Option<String>,

    /// Check service health, then exit.
    #[arg(long)]
    health: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let client = HttpRecognitionClient::new(cli.server.clone());

    if cli.health {
        let health = client.health()?;
        println!(
            "{} ({} enrolled faces)",
            health.status, health.enrolled_faces
        );
        return Ok(());
    }

    // Camera acquisition failure is fatal: there is nothing to poll.
    let camera = CameraSource::open(cli.camera, CAPTURE_WIDTH, CAPTURE_HEIGHT)?;
    let (width, height) = camera.resolution();
    let source: Arc<Mutex<dyn FrameSource>> = Arc::new(Mutex::new(camera));

    let mut session = RecognitionSession::new(
        source.clone(),
        Arc::new(client),
        Duration::from_millis(cli.interval_ms),
    );
    session.set_status(format!("Camera ready ({width}x{height})"));

    if let Some(name) = cli.enroll {
        return run_enroll(&mut session, &name);
    }

    run_interactive(&mut session, &source, cli.annotated_dir.as_deref())
}

fn run_enroll(
    session: &mut RecognitionSession,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = session.enroll(name)?;
    if !outcome.success {
        return Err(outcome.message.into());
    }
    println!("{}", outcome.message);
    Ok(())
}

fn run_interactive(
    session: &mut RecognitionSession,
    source: &Arc<Mutex<dyn FrameSource>>,
    annotated_dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("[{}]", session.status());
    println!("Commands: toggle | enroll <name> | status | quit");

    let commands = spawn_stdin_reader();
    let mut last_status = session.status().to_string();
    let mut saved = 0usize;

    loop {
        loop {
            match commands.try_recv() {
                Ok(line) => {
                    if !handle_command(session, line.trim()) {
                        return Ok(());
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        let applied = session.pump();
        if applied > 0 {
            for line in session.summary().lines() {
                println!("  {line}");
            }
            if let Some(dir) = annotated_dir {
                saved += save_annotated(session, source, dir, saved)?;
            }
        }

        if session.status() != last_status {
            last_status = session.status().to_string();
            println!("[{last_status}]");
        }

        thread::sleep(Duration::from_millis(50));
    }
}

/// Returns `false` when the loop should exit.
fn handle_command(session: &mut RecognitionSession, line: &str) -> bool {
    if line == "quit" {
        return false;
    }
    if line == "toggle" {
        session.toggle();
    } else if line == "status" {
        println!("[{}]", session.status());
    } else if let Some(name) = line.strip_prefix("enroll ") {
        match session.enroll(name) {
            Ok(outcome) if outcome.success => println!("{}", outcome.message),
            Ok(outcome) => eprintln!("Enrollment failed: {}", outcome.message),
            Err(e) => eprintln!("Enrollment failed: {e}"),
        }
    } else if !line.is_empty() {
        eprintln!("Unknown command: {line}");
    }
    true
}

fn save_annotated(
    session: &RecognitionSession,
    source: &Arc<Mutex<dyn FrameSource>>,
    dir: &Path,
    index: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let grabbed = {
        let mut guard = match source.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.grab()
    };
    let frame = match grabbed {
        Ok(frame) => frame,
        Err(e) => {
            log::warn!("skipping annotated frame: {e}");
            return Ok(0);
        }
    };

    let annotated = session.overlay().composite_onto(&frame);
    let img =
        image::RgbImage::from_raw(annotated.width(), annotated.height(), annotated.data().to_vec())
            .ok_or("failed to build image from frame data")?;
    let path = dir.join(format!("annotated_{index:05}.png"));
    img.save(&path)?;
    log::info!("saved {}", path.display());
    Ok(1)
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = crossbeam_channel::unbounded::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.interval_ms == 0 {
        return Err("Polling interval must be at least 1ms".into());
    }
    if cli.enroll.is_some() && cli.health {
        return Err("--enroll and --health are mutually exclusive".into());
    }
    if let Some(name) = &cli.enroll {
        if name.trim().is_empty() {
            return Err("Enrollment name must not be empty".into());
        }
    }
    if let Some(dir) = &cli.annotated_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Cannot create {}: {e}", dir.display()))?;
    }
    Ok(())
}
