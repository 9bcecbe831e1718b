use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{select, Receiver};

use facewatch_core::detection::domain::detection_list::DetectionList;
use facewatch_core::monitor::monitor_controller::CameraOutcome;
use facewatch_core::monitor::monitor_use_case::MonitorUseCase;
use facewatch_core::monitor::poller;
use facewatch_core::shared::monitor_config::MonitorConfig;

use crate::{format_list, format_notification, unexpected_status};

const HELP: &str = "Commands: start, stop, refresh, people, quit";
const NAME_PROMPT: &str = "Unknown face detected. Enter a name to save it (or 'quit'): ";

/// What the session loop should do after a line of input.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    /// A save attempt left the alert up; ask for the name again.
    AskName,
    Quit,
}

/// Output produced by one refresh of the terminal.
#[derive(Debug, Default)]
struct Frame {
    notifications: Vec<String>,
    list: Option<String>,
    prompt: bool,
}

impl Frame {
    fn print(&self) {
        for line in &self.notifications {
            eprintln!("{line}");
        }
        if let Some(list) = &self.list {
            println!("\n--- Detections ---\n{list}");
        }
        if self.prompt {
            print!("{NAME_PROMPT}");
            let _ = io::stdout().flush();
        }
    }
}

/// Terminal output state: what has already been printed.
#[derive(Default)]
struct Screen {
    last_notification: Option<u64>,
    last_list: Option<DetectionList>,
    prompting: bool,
}

impl Screen {
    /// Collects everything that changed since the previous call.
    fn render(&mut self, uc: &MonitorUseCase) -> Frame {
        let controller = uc.controller();
        let mut frame = Frame::default();

        for n in controller.notifications().since(self.last_notification) {
            frame.notifications.push(format_notification(n));
            self.last_notification = Some(n.id);
        }

        let page = controller.page();
        if self.last_list.as_ref() != Some(&page.detections) {
            frame.list = Some(format_list(&page.detections));
            self.last_list = Some(page.detections.clone());
        }

        frame.prompt = page.alert_visible && !self.prompting;
        self.prompting = page.alert_visible;
        frame
    }

    fn apply(&mut self, flow: &Flow) {
        if *flow == Flow::AskName {
            self.prompting = false;
        }
    }
}

/// Interactive session: starts the camera, polls until stdin closes or
/// `quit` is entered, then stops the camera unless `keep_camera` is set.
pub fn run(
    uc: &mut MonitorUseCase,
    config: &MonitorConfig,
    keep_camera: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut screen = Screen::default();

    let outcome = uc.start_camera();
    screen.render(uc).print();
    if let CameraOutcome::Unexpected(status) = outcome {
        return Err(unexpected_status(&status).into());
    }
    if !uc.controller().state().camera_on {
        return Err("Camera did not start".into());
    }
    println!("Live feed: {}", uc.video_feed_url());
    println!("{HELP}");

    let (ticks, mut poll_handle) = poller::spawn(config.poll_interval);
    let lines = spawn_stdin_reader();

    loop {
        select! {
            recv(ticks) -> tick => {
                let Ok(tick) = tick else { break };
                log::debug!("Poll tick {}", tick.sequence);
                uc.tick();
            }
            recv(lines) -> line => {
                let Ok(line) = line else { break };
                let flow = handle_line(uc, &line);
                if flow == Flow::Quit {
                    break;
                }
                screen.apply(&flow);
            }
        }
        uc.controller_mut().expire_notifications(Instant::now());
        screen.render(uc).print();
    }

    poll_handle.cancel();
    finish(uc, keep_camera);
    screen.render(uc).print();
    Ok(())
}

/// Stops the camera at the end of a session unless asked to leave it on.
fn finish(uc: &mut MonitorUseCase, keep_camera: bool) {
    if !keep_camera && uc.controller().state().camera_on {
        uc.stop_camera();
    }
}

fn handle_line(uc: &mut MonitorUseCase, line: &str) -> Flow {
    let command = line.trim();
    if matches!(command, "quit" | "exit") {
        return Flow::Quit;
    }

    if uc.controller().page().alert_visible {
        uc.controller_mut().set_name_input(line);
        uc.save_face(None);
        return if uc.controller().page().alert_visible {
            Flow::AskName
        } else {
            Flow::Continue
        };
    }

    match command {
        "" => {}
        "start" => report_camera(uc.start_camera()),
        "stop" => report_camera(uc.stop_camera()),
        "refresh" => uc.refresh_detections(),
        "people" => match uc.known_people() {
            Ok(people) if people.is_empty() => println!("No known people"),
            Ok(people) => println!("Known people: {}", people.join(", ")),
            Err(e) => eprintln!("[error] {e}"),
        },
        other => println!("Unknown command '{other}'. {HELP}"),
    }
    Flow::Continue
}

fn report_camera(outcome: CameraOutcome) {
    if let CameraOutcome::Unexpected(status) = outcome {
        eprintln!("[warn] {}", unexpected_status(&status));
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = crossbeam_channel::unbounded::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone};
    use facewatch_core::backend::domain::backend_error::BackendError;
    use facewatch_core::backend::domain::recognition_backend::{
        NewFace, RecognitionBackend, StatusResponse,
    };
    use facewatch_core::detection::domain::detection::Detection;
    use facewatch_core::shared::constants::DETECTION_TIME_FORMAT;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Start,
        Stop,
        Detections,
        AddFace(String),
        KnownPeople,
    }

    struct StubBackend {
        calls: Arc<Mutex<Vec<Call>>>,
        detections: Mutex<Vec<Detection>>,
    }

    impl RecognitionBackend for StubBackend {
        fn start_camera(&self) -> Result<StatusResponse, BackendError> {
            self.calls.lock().unwrap().push(Call::Start);
            Ok(StatusResponse {
                status: "camera started".into(),
            })
        }

        fn stop_camera(&self) -> Result<StatusResponse, BackendError> {
            self.calls.lock().unwrap().push(Call::Stop);
            Ok(StatusResponse {
                status: "camera stopped".into(),
            })
        }

        fn detections(&self) -> Result<Vec<Detection>, BackendError> {
            self.calls.lock().unwrap().push(Call::Detections);
            Ok(self.detections.lock().unwrap().clone())
        }

        fn add_face(&self, face: &NewFace) -> Result<(), BackendError> {
            self.calls.lock().unwrap().push(Call::AddFace(face.name.clone()));
            self.detections.lock().unwrap().clear();
            Ok(())
        }

        fn known_people(&self) -> Result<Vec<String>, BackendError> {
            self.calls.lock().unwrap().push(Call::KnownPeople);
            Ok(vec!["Alice".into()])
        }

        fn video_feed_url(&self) -> String {
            "http://stub/video_feed".into()
        }
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn session(detections: Vec<Detection>) -> (MonitorUseCase, Arc<Mutex<Vec<Call>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let backend = StubBackend {
            calls: calls.clone(),
            detections: Mutex::new(detections),
        };
        let uc = MonitorUseCase::new(Box::new(backend), &MonitorConfig::default())
            .with_clock(Box::new(now));
        (uc, calls)
    }

    fn unknown_just_now() -> Detection {
        let time = (now() - chrono::Duration::seconds(2))
            .format(DETECTION_TIME_FORMAT)
            .to_string();
        Detection::new("Unknown", time)
    }

    /// A running session with the unknown-face alert on screen.
    fn alerted_session() -> (MonitorUseCase, Arc<Mutex<Vec<Call>>>) {
        let (mut uc, calls) = session(vec![unknown_just_now()]);
        uc.start_camera();
        uc.tick();
        assert!(uc.controller().page().alert_visible);
        calls.lock().unwrap().clear();
        (uc, calls)
    }

    fn calls_of(calls: &Arc<Mutex<Vec<Call>>>) -> Vec<Call> {
        calls.lock().unwrap().clone()
    }

    #[rstest]
    #[case::start("start", vec![Call::Start])]
    #[case::stop("stop", vec![Call::Stop])]
    #[case::refresh("refresh", vec![Call::Detections])]
    #[case::people("people", vec![Call::KnownPeople])]
    #[case::blank("", vec![])]
    #[case::unknown_word("dance", vec![])]
    fn test_commands_dispatch(#[case] line: &str, #[case] expected: Vec<Call>) {
        let (mut uc, calls) = session(Vec::new());
        assert_eq!(handle_line(&mut uc, line), Flow::Continue);
        assert_eq!(calls_of(&calls), expected);
    }

    #[rstest]
    #[case::quit("quit")]
    #[case::exit("exit")]
    #[case::padded("  quit ")]
    fn test_quit_ends_session(#[case] line: &str) {
        let (mut uc, calls) = session(Vec::new());
        assert_eq!(handle_line(&mut uc, line), Flow::Quit);
        assert!(calls_of(&calls).is_empty());
    }

    #[test]
    fn test_quit_while_alert_up_does_not_save() {
        let (mut uc, calls) = alerted_session();
        assert_eq!(handle_line(&mut uc, "quit"), Flow::Quit);
        assert!(calls_of(&calls).is_empty());
    }

    #[test]
    fn test_blank_name_keeps_alert_and_asks_again() {
        let (mut uc, calls) = alerted_session();
        assert_eq!(handle_line(&mut uc, "   "), Flow::AskName);
        assert!(calls_of(&calls).is_empty());
        assert!(uc.controller().page().alert_visible);
        let last = uc.controller().notifications().iter().last().unwrap();
        assert_eq!(last.message, "Please enter a name for the face");
    }

    #[test]
    fn test_name_line_saves_face_and_refreshes() {
        let (mut uc, calls) = alerted_session();
        assert_eq!(handle_line(&mut uc, "  Dana "), Flow::Continue);
        assert_eq!(
            calls_of(&calls),
            [Call::AddFace("Dana".into()), Call::Detections]
        );
        assert!(!uc.controller().page().alert_visible);
    }

    #[test]
    fn test_screen_prompts_once_per_alert() {
        let (mut uc, _) = alerted_session();
        let mut screen = Screen::default();

        let first = screen.render(&uc);
        assert!(first.prompt);
        assert!(first.list.is_some());
        assert!(first
            .notifications
            .iter()
            .any(|n| n == "[warn] Unknown face detected! Please add a name."));

        let second = screen.render(&uc);
        assert!(!second.prompt);
        assert!(second.list.is_none());
        assert!(second.notifications.is_empty());
    }

    #[test]
    fn test_screen_prompts_again_after_rejected_name() {
        let (mut uc, _) = alerted_session();
        let mut screen = Screen::default();
        screen.render(&uc);

        let flow = handle_line(&mut uc, "");
        screen.apply(&flow);
        let frame = screen.render(&uc);
        assert!(frame.prompt);
        assert_eq!(
            frame.notifications,
            ["[error] Please enter a name for the face"]
        );
    }

    #[rstest]
    #[case::stops_camera(false, vec![Call::Stop])]
    #[case::keeps_camera(true, vec![])]
    fn test_finish(#[case] keep_camera: bool, #[case] expected: Vec<Call>) {
        let (mut uc, calls) = session(Vec::new());
        uc.start_camera();
        calls.lock().unwrap().clear();

        finish(&mut uc, keep_camera);
        assert_eq!(calls_of(&calls), expected);
        assert_eq!(uc.controller().state().camera_on, keep_camera);
    }

    #[test]
    fn test_finish_skips_stop_when_camera_already_off() {
        let (mut uc, calls) = session(Vec::new());
        finish(&mut uc, false);
        assert!(calls_of(&calls).is_empty());
    }
}
