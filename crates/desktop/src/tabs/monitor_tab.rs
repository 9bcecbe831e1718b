use std::path::Path;

use iced::border::Border;
use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{Color, Element, Length, Theme};

use facewatch_core::detection::domain::detection_list::{DetectionList, EMPTY_LIST_MESSAGE};
use facewatch_core::monitor::page_state::PageState;

use crate::app::{scaled, Message};
use crate::theme::{muted_color, surface_color};
use crate::widgets::detection_row::detection_row;

const CORNER_RADIUS: f32 = 12.0;
const FEED_HEIGHT: f32 = 180.0;

pub fn view<'a>(
    fs: f32,
    page: &'a PageState,
    attachment: Option<&'a Path>,
    feed_available: bool,
) -> Element<'a, Message> {
    let controls = row![
        button(text("Start Camera").size(scaled(14.0, fs)))
            .on_press_maybe(page.start_enabled.then_some(Message::StartCamera))
            .padding([8, 18])
            .style(button::primary),
        button(text("Stop Camera").size(scaled(14.0, fs)))
            .on_press_maybe(page.stop_enabled.then_some(Message::StopCamera))
            .padding([8, 18])
            .style(button::secondary),
    ]
    .spacing(10);

    let mut content = column![controls, camera_panel(fs, page, feed_available)].spacing(16);

    if page.alert_visible {
        content = content.push(alert_panel(fs, &page.name_input, attachment));
    }

    content = content
        .push(text("Recent Detections").size(scaled(16.0, fs)))
        .push(detection_list(fs, &page.detections));

    content.into()
}

fn camera_panel<'a>(fs: f32, page: &PageState, feed_available: bool) -> Element<'a, Message> {
    let body: Element<'a, Message> = if page.feed_visible {
        column![
            text("\u{1F534} Camera running").size(scaled(15.0, fs)),
            button(text("Open Live Feed").size(scaled(13.0, fs)))
                .on_press_maybe(feed_available.then_some(Message::OpenLiveFeed))
                .padding([6, 14])
                .style(button::secondary),
        ]
        .spacing(10)
        .align_x(iced::Alignment::Center)
        .into()
    } else {
        text("Camera is off")
            .size(scaled(15.0, fs))
            .style(|theme: &Theme| text::Style {
                color: Some(muted_color(theme)),
            })
            .into()
    };

    container(body)
        .width(Length::Fill)
        .height(FEED_HEIGHT)
        .center_x(Length::Fill)
        .center_y(FEED_HEIGHT)
        .style(panel_style)
        .into()
}

fn alert_panel<'a>(
    fs: f32,
    name_input: &str,
    attachment: Option<&'a Path>,
) -> Element<'a, Message> {
    let photo: Element<'a, Message> = match attachment.and_then(|p| p.file_name()) {
        Some(name) => row![
            text(name.to_string_lossy().to_string()).size(scaled(13.0, fs)),
            button(text("Remove").size(scaled(12.0, fs)))
                .on_press(Message::ClearPhoto)
                .padding([4, 10])
                .style(button::text),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center)
        .into(),
        None => button(text("Attach Photo").size(scaled(13.0, fs)))
            .on_press(Message::AttachPhoto)
            .padding([6, 14])
            .style(button::secondary)
            .into(),
    };

    let form = row![
        text_input("Enter name", name_input)
            .on_input(Message::NameChanged)
            .on_submit(Message::SaveFace)
            .size(scaled(14.0, fs))
            .padding(8),
        button(text("Save Face").size(scaled(14.0, fs)))
            .on_press(Message::SaveFace)
            .padding([8, 18])
            .style(button::primary),
    ]
    .spacing(10)
    .align_y(iced::Alignment::Center);

    let body = column![
        text("\u{26A0} Unknown face detected").size(scaled(15.0, fs)),
        text("Add a name so this person is recognized next time.")
            .size(scaled(13.0, fs))
            .style(|theme: &Theme| text::Style {
                color: Some(muted_color(theme)),
            }),
        Space::new().height(4),
        form,
        photo,
    ]
    .spacing(8);

    container(body)
        .padding([14, 16])
        .width(Length::Fill)
        .style(|theme: &Theme| {
            let warning = theme.palette().warning;
            container::Style {
                background: Some(iced::Background::Color(Color { a: 0.12, ..warning })),
                border: Border {
                    color: warning,
                    width: 1.0,
                    radius: CORNER_RADIUS.into(),
                },
                ..container::Style::default()
            }
        })
        .into()
}

fn detection_list<'a>(fs: f32, list: &'a DetectionList) -> Element<'a, Message> {
    if list.is_empty() {
        return text(EMPTY_LIST_MESSAGE)
            .size(scaled(14.0, fs))
            .style(|theme: &Theme| text::Style {
                color: Some(muted_color(theme)),
            })
            .into();
    }

    let rows = column(list.rows().iter().map(|r| detection_row(fs, r))).spacing(6);
    scrollable(rows).height(Length::Fill).into()
}

fn panel_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(surface_color(theme))),
        border: Border {
            color: Color {
                a: 0.10,
                ..theme.palette().text
            },
            width: 1.0,
            radius: CORNER_RADIUS.into(),
        },
        ..container::Style::default()
    }
}
