use iced::border::Border;
use iced::widget::{column, container, mouse_area, text};
use iced::{Color, Element, Length, Shadow, Theme, Vector};

use facewatch_core::monitor::notification::NotificationQueue;

use crate::app::{scaled, Message};
use crate::theme::notification_color;

const TOAST_WIDTH: f32 = 300.0;
const CORNER_RADIUS: f32 = 8.0;

/// Transient banners pinned to the top-right corner. Clicking a banner
/// dismisses it early.
pub fn view<'a>(fs: f32, notifications: &'a NotificationQueue) -> Element<'a, Message> {
    let toasts = column(notifications.iter().map(|n| {
        let background = notification_color(n.kind);
        let banner = container(
            text(n.message.as_str())
                .size(scaled(13.0, fs))
                .color(Color::WHITE),
        )
        .padding([10, 14])
        .width(TOAST_WIDTH)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(background)),
            border: Border {
                radius: CORNER_RADIUS.into(),
                ..Border::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.25),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
            ..container::Style::default()
        });
        mouse_area(banner)
            .on_press(Message::DismissNotification(n.id))
            .into()
    }))
    .spacing(8);

    container(toasts)
        .padding(16)
        .width(Length::Fill)
        .align_right(Length::Fill)
        .into()
}
