use iced::border::Border;
use iced::widget::{container, row, text};
use iced::{Color, Element, Length, Theme};

use facewatch_core::detection::domain::detection_list::DetectionRow;

use crate::app::{scaled, Message};
use crate::theme::{muted_color, row_accent};

const CORNER_RADIUS: f32 = 8.0;

/// One entry of the detection list, tinted by whether the face is known.
pub fn detection_row<'a>(fs: f32, entry: &'a DetectionRow) -> Element<'a, Message> {
    let variant = entry.variant;

    let content = row![
        text(entry.label.as_str())
            .size(scaled(14.0, fs))
            .width(Length::Fill),
        text(entry.time.as_str())
            .size(scaled(12.0, fs))
            .style(|theme: &Theme| text::Style {
                color: Some(muted_color(theme)),
            }),
    ]
    .spacing(8)
    .align_y(iced::Alignment::Center);

    container(content)
        .padding([10, 14])
        .width(Length::Fill)
        .style(move |theme: &Theme| {
            let accent = row_accent(theme, variant);
            container::Style {
                background: Some(iced::Background::Color(Color { a: 0.10, ..accent })),
                border: Border {
                    color: accent,
                    width: 1.0,
                    radius: CORNER_RADIUS.into(),
                },
                ..container::Style::default()
            }
        })
        .into()
}
