use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Local;
use iced::widget::{button, column, container, stack, text};
use iced::{Element, Length, Subscription, Task, Theme};

use facewatch_core::backend::domain::recognition_backend::RecognitionBackend;
use facewatch_core::backend::infrastructure::http_backend::HttpBackend;
use facewatch_core::monitor::monitor_controller::MonitorController;
use facewatch_core::monitor::notification::NotificationKind;
use facewatch_core::shared::monitor_config::MonitorConfig;

use crate::settings::{Appearance, Settings};
use crate::tabs;
use crate::theme;
use crate::widgets::toast_stack;
use crate::workers::backend_worker::{BackendReply, BackendRequest, BackendWorker};

/// How often worker replies are collected and toasts expired while
/// anything is pending.
const PUMP_INTERVAL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// Tab enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Monitor,
    Settings,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Monitor, Tab::Settings];

    fn label(self) -> &'static str {
        match self {
            Tab::Monitor => "Monitor",
            Tab::Settings => "Settings",
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    StartCamera,
    StopCamera,
    PollTick,
    Pump,
    NameChanged(String),
    SaveFace,
    AttachPhoto,
    PhotoSelected(Option<PathBuf>),
    ClearPhoto,
    OpenLiveFeed,
    DismissNotification(u64),
    BackendUrlChanged(String),
    ApplyBackendUrl,
    AppearanceChanged(Appearance),
    FontScaleChanged(f32),
    RestoreDefaults,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    active_tab: Tab,
    settings: Settings,
    config: MonitorConfig,
    controller: MonitorController,
    worker: Option<BackendWorker>,
    video_feed_url: Option<String>,
    attachment: Option<PathBuf>,
    backend_url_draft: String,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let config = settings.monitor_config();
        let mut app = Self {
            active_tab: Tab::Monitor,
            backend_url_draft: settings.backend_url.clone(),
            settings,
            controller: MonitorController::new(&config),
            config,
            worker: None,
            video_feed_url: None,
            attachment: None,
        };
        app.connect();
        (app, Task::none())
    }

    /// (Re)creates the controller and worker for the configured backend.
    fn connect(&mut self) {
        self.controller = MonitorController::new(&self.config);
        match HttpBackend::new(&self.config) {
            Ok(backend) => {
                log::info!("Monitoring backend at {}", backend.base_url());
                self.video_feed_url = Some(backend.video_feed_url());
                self.worker = Some(BackendWorker::spawn(Box::new(backend)));
            }
            Err(e) => {
                log::error!("Backend unavailable: {e}");
                self.worker = None;
                self.video_feed_url = None;
                self.controller
                    .notify(NotificationKind::Error, format!("Backend unavailable: {e}"));
            }
        }
    }

    fn send(&mut self, request: BackendRequest) {
        match self.worker.as_mut() {
            Some(worker) => worker.send(request),
            None => self.controller.notify(
                NotificationKind::Error,
                "No backend configured. Check the URL in Settings.",
            ),
        }
    }

    fn apply_replies(&mut self) {
        if let Some(worker) = self.worker.as_mut() {
            pump_replies(&mut self.controller, &mut self.attachment, worker);
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
            }
            Message::StartCamera => self.send(BackendRequest::StartCamera),
            Message::StopCamera => self.send(BackendRequest::StopCamera),
            Message::PollTick => {
                if self.controller.poll_due() {
                    if let Some(worker) = self.worker.as_mut() {
                        worker.request_poll();
                    }
                }
            }
            Message::Pump => {
                self.apply_replies();
                self.controller.expire_notifications(Instant::now());
            }
            Message::NameChanged(value) => {
                self.controller.set_name_input(value);
            }
            Message::SaveFace => {
                if let Some(face) = self.controller.prepare_save() {
                    let image_path = self.attachment.clone();
                    self.send(BackendRequest::SaveFace { face, image_path });
                }
            }
            Message::AttachPhoto => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Choose a photo of this person")
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "webp"])
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::PhotoSelected,
                );
            }
            Message::PhotoSelected(Some(path)) => {
                self.attachment = Some(path);
            }
            Message::PhotoSelected(None) => {}
            Message::ClearPhoto => {
                self.attachment = None;
            }
            Message::OpenLiveFeed => {
                if let Some(url) = &self.video_feed_url {
                    if let Err(e) = open::that(url) {
                        self.controller
                            .notify(NotificationKind::Error, format!("Could not open {url}: {e}"));
                    }
                }
            }
            Message::DismissNotification(id) => {
                self.controller.dismiss_notification(id);
            }
            Message::BackendUrlChanged(value) => {
                self.backend_url_draft = value;
            }
            Message::ApplyBackendUrl => {
                let url = self.backend_url_draft.trim().to_string();
                let candidate = self.config.clone().with_backend_url(&url);
                match HttpBackend::new(&candidate) {
                    Ok(_) => {
                        self.settings.backend_url = url;
                        self.settings.save();
                        self.config = candidate;
                        self.connect();
                        self.controller
                            .notify(NotificationKind::Info, "Backend URL updated");
                    }
                    Err(e) => {
                        self.controller.notify(NotificationKind::Error, e.to_string());
                    }
                }
            }
            Message::AppearanceChanged(appearance) => {
                self.settings.appearance = appearance;
                self.settings.save();
            }
            Message::FontScaleChanged(scale) => {
                self.settings.font_scale = scale;
                self.settings.save();
            }
            Message::RestoreDefaults => {
                let defaults = Settings::default();
                self.settings.appearance = defaults.appearance;
                self.settings.font_scale = defaults.font_scale;
                self.settings.save();
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let fs = self.settings.font_scale;

        // Tab bar
        let tab_bar = iced::widget::row(
            Tab::ALL
                .iter()
                .map(|&tab| {
                    let label = text(tab.label()).size(scaled(13.0, fs));
                    let btn = button(label)
                        .on_press(Message::TabSelected(tab))
                        .padding([6, 14]);
                    if tab == self.active_tab {
                        btn.style(button::primary).into()
                    } else {
                        btn.style(button::text).into()
                    }
                })
                .collect::<Vec<_>>(),
        )
        .spacing(2);

        let content: Element<'_, Message> = match self.active_tab {
            Tab::Monitor => tabs::monitor_tab::view(
                fs,
                self.controller.page(),
                self.attachment.as_deref(),
                self.video_feed_url.is_some(),
            ),
            Tab::Settings => tabs::settings_tab::view(&self.settings, &self.backend_url_draft),
        };

        let page = column![
            tab_bar,
            container(content).padding(16).height(Length::Fill),
        ]
        .height(Length::Fill);

        stack![page, toast_stack::view(fs, self.controller.notifications())].into()
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        // The poll timer runs for the whole session; PollTick is a no-op
        // while the camera is off.
        let poll = iced::time::every(self.config.poll_interval).map(|_| Message::PollTick);

        let worker_busy = self.worker.as_ref().is_some_and(|w| w.is_busy());
        if worker_busy || !self.controller.notifications().is_empty() {
            let pump = iced::time::every(PUMP_INTERVAL).map(|_| Message::Pump);
            Subscription::batch([poll, pump])
        } else {
            poll
        }
    }
}

/// Feeds every reply the worker has produced into the controller. A
/// successful save clears the attached photo and queues one refresh fetch.
fn pump_replies(
    controller: &mut MonitorController,
    attachment: &mut Option<PathBuf>,
    worker: &mut BackendWorker,
) {
    for reply in worker.drain() {
        match reply {
            BackendReply::CameraStarted(result) => {
                controller.camera_start_finished(result);
            }
            BackendReply::CameraStopped(result) => {
                controller.camera_stop_finished(result);
            }
            BackendReply::Detections(result) => {
                controller.detections_fetched(result, Local::now());
            }
            BackendReply::FaceSaved { face, result } => {
                if controller.save_finished(&face, result) {
                    *attachment = None;
                    worker.send(BackendRequest::FetchDetections);
                }
            }
            BackendReply::FaceRejected(reason) => {
                controller.save_aborted(reason);
            }
        }
    }
}

/// Scale a base font size by the user's font_scale setting.
pub fn scaled(base: f32, font_scale: f32) -> f32 {
    (base * font_scale).round()
}
