use iced::widget::{button, column, pick_list, row, slider, text, text_input, Space};
use iced::Element;

use crate::app::{scaled, Message};
use crate::settings::{Appearance, Settings};

pub fn view<'a>(settings: &Settings, backend_url_draft: &str) -> Element<'a, Message> {
    let fs = settings.font_scale;

    column![
        text("Backend").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            text_input("http://127.0.0.1:5000", backend_url_draft)
                .on_input(Message::BackendUrlChanged)
                .on_submit(Message::ApplyBackendUrl)
                .size(scaled(13.0, fs))
                .padding(6),
            button(text("Apply").size(scaled(13.0, fs)))
                .on_press(Message::ApplyBackendUrl)
                .padding([6, 14]),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center),
        Space::new().height(20),
        text("Theme").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            text("Mode").size(scaled(13.0, fs)),
            pick_list(Appearance::ALL, Some(settings.appearance), |a| {
                Message::AppearanceChanged(a)
            })
            .text_size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(20),
        text("Font size").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            slider(0.8..=1.5, settings.font_scale, Message::FontScaleChanged).step(0.05),
            text(format!("{:.0}%", settings.font_scale * 100.0)).size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(20),
        button(text("Restore defaults").size(scaled(13.0, fs)))
            .on_press(Message::RestoreDefaults)
            .padding([6, 14])
            .style(button::text),
    ]
    .spacing(0)
    .into()
}
