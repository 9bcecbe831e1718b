mod watch;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};

use facewatch_core::backend::domain::recognition_backend::RecognitionBackend;
use facewatch_core::backend::infrastructure::http_backend::HttpBackend;
use facewatch_core::detection::domain::detection_list::{
    DetectionList, RowVariant, EMPTY_LIST_MESSAGE,
};
use facewatch_core::monitor::monitor_controller::CameraOutcome;
use facewatch_core::monitor::monitor_use_case::MonitorUseCase;
use facewatch_core::monitor::notification::{Notification, NotificationKind};
use facewatch_core::shared::constants::DEFAULT_BACKEND_URL;
use facewatch_core::shared::monitor_config::MonitorConfig;

/// Terminal client for a face recognition monitoring service.
#[derive(Parser)]
#[command(name = "facewatch")]
struct Cli {
    /// Base URL of the recognition service.
    #[arg(long, global = true, default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    /// Detection poll interval in milliseconds.
    #[arg(long, global = true, default_value = "2000")]
    poll_interval_ms: u64,

    /// Abort a request after this many seconds (default: wait forever).
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Turn the service's camera on.
    Start,
    /// Turn the service's camera off.
    Stop,
    /// Print the current detection list, most recent first.
    Detections,
    /// Print the names the service can recognize.
    People,
    /// Register a new known face.
    AddFace {
        /// Display name for the face.
        #[arg(long)]
        name: String,
        /// Photo of the face (any common image format).
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Start the camera and follow detections, prompting for unknown faces.
    Watch {
        /// Leave the camera running when the session ends.
        #[arg(long)]
        keep_camera: bool,
    },
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

    let config = MonitorConfig::default()
        .with_backend_url(&cli.backend_url)
        .with_poll_interval(Duration::from_millis(cli.poll_interval_ms))
        .with_request_timeout(cli.timeout_secs.map(Duration::from_secs));
    let backend = HttpBackend::new(&config)?;
    log::debug!("Using backend at {}", backend.base_url());

    match cli.command {
        Command::Detections => {
            let detections = backend.detections()?;
            println!("{}", format_list(&DetectionList::render(&detections)));
        }
        Command::People => {
            let people = backend.known_people()?;
            if people.is_empty() {
                println!("No known people");
            }
            for name in people {
                println!("{name}");
            }
        }
        Command::Start => {
            let mut uc = MonitorUseCase::new(Box::new(backend), &config);
            let outcome = uc.start_camera();
            report(&uc)?;
            check_camera(outcome)?;
        }
        Command::Stop => {
            let mut uc = MonitorUseCase::new(Box::new(backend), &config);
            let outcome = uc.stop_camera();
            report(&uc)?;
            check_camera(outcome)?;
        }
        Command::AddFace { name, image } => {
            let mut uc = MonitorUseCase::new(Box::new(backend), &config);
            uc.controller_mut().set_name_input(name);
            uc.save_face(image.as_deref());
            report(&uc)?;
        }
        Command::Watch { keep_camera } => {
            let mut uc = MonitorUseCase::new(Box::new(backend), &config);
            watch::run(&mut uc, &config, keep_camera)?;
        }
    }

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.poll_interval_ms == 0 {
        return Err("Poll interval must be greater than 0".into());
    }
    if cli.timeout_secs == Some(0) {
        return Err("Timeout must be greater than 0 seconds".into());
    }
    if let Command::AddFace {
        image: Some(ref path),
        ..
    } = cli.command
    {
        if !path.exists() {
            return Err(format!("Image file not found: {}", path.display()).into());
        }
    }
    Ok(())
}

/// Prints every notification of a one-shot command and fails if the last
/// one was an error.
fn report(uc: &MonitorUseCase) -> Result<(), Box<dyn std::error::Error>> {
    let mut last = None;
    for n in uc.controller().notifications().iter() {
        eprintln!("{}", format_notification(n));
        last = Some(n);
    }
    match last {
        Some(n) if n.kind == NotificationKind::Error => Err(n.message.clone().into()),
        _ => Ok(()),
    }
}

/// Fails a one-shot start/stop when the service answered with a status
/// other than the one it should have.
fn check_camera(outcome: CameraOutcome) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        CameraOutcome::Unexpected(status) => Err(unexpected_status(&status).into()),
        CameraOutcome::Changed | CameraOutcome::Failed => Ok(()),
    }
}

pub(crate) fn unexpected_status(status: &str) -> String {
    format!("Unexpected response from the service: '{status}'")
}

pub(crate) fn format_notification(n: &Notification) -> String {
    let tag = match n.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
        NotificationKind::Warning => "warn",
        NotificationKind::Info => "info",
    };
    format!("[{tag}] {}", n.message)
}

pub(crate) fn format_list(list: &DetectionList) -> String {
    if list.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }
    list.rows()
        .iter()
        .map(|row| {
            let marker = match row.variant {
                RowVariant::Unknown => "!",
                RowVariant::Known => " ",
            };
            format!("{marker} {:<28} {}", row.label, row.time)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use facewatch_core::detection::domain::detection::Detection;
    use rstest::rstest;
    use std::time::Instant;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("facewatch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["watch"]);
        assert_eq!(cli.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(cli.poll_interval_ms, 2000);
        assert!(cli.timeout_secs.is_none());
        assert!(matches!(cli.command, Command::Watch { keep_camera: false }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["start", "--backend-url", "http://cam:8000"]);
        assert_eq!(cli.backend_url, "http://cam:8000");
    }

    #[rstest]
    #[case::zero_interval(&["--poll-interval-ms", "0", "watch"])]
    #[case::zero_timeout(&["--timeout-secs", "0", "start"])]
    #[case::missing_image(&["add-face", "--name", "Al", "--image", "/nonexistent/al.jpg"])]
    fn test_validate_rejects(#[case] args: &[&str]) {
        assert!(validate(&parse(args)).is_err());
    }

    #[test]
    fn test_validate_accepts_plain_add_face() {
        assert!(validate(&parse(&["add-face", "--name", "Al"])).is_ok());
    }

    #[test]
    fn test_unexpected_camera_status_fails() {
        let err = check_camera(CameraOutcome::Unexpected("camera busy".into())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected response from the service: 'camera busy'"
        );
    }

    #[rstest]
    #[case::changed(CameraOutcome::Changed)]
    #[case::failed_already_reported(CameraOutcome::Failed)]
    fn test_camera_outcomes_that_pass(#[case] outcome: CameraOutcome) {
        assert!(check_camera(outcome).is_ok());
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_list(&DetectionList::Empty), "No detections yet");
    }

    #[test]
    fn test_format_list_marks_unknown_rows() {
        let list = DetectionList::render(&[
            Detection::new("Unknown", "2024-05-01 12:00:00"),
            Detection::new("Alice", "2024-05-01 12:00:03"),
        ]);
        let text = format_list(&list);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  \u{2705} Alice"));
        assert!(lines[1].starts_with("! \u{2753} Unknown Person"));
        assert!(lines[1].ends_with("2024-05-01 12:00:00"));
    }

    #[test]
    fn test_format_notification() {
        let n = Notification {
            id: 0,
            kind: NotificationKind::Warning,
            message: "Unknown face detected! Please add a name.".into(),
            created_at: Instant::now(),
        };
        assert_eq!(
            format_notification(&n),
            "[warn] Unknown face detected! Please add a name."
        );
    }
}
