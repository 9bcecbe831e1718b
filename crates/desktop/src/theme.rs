use iced::color;
use iced::theme::Palette;
use iced::{Color, Theme};

use facewatch_core::detection::domain::detection_list::RowVariant;
use facewatch_core::monitor::notification::NotificationKind;

use crate::settings::Appearance;

pub fn resolve_theme(appearance: Appearance) -> Theme {
    let is_dark = match appearance {
        Appearance::Dark => true,
        Appearance::Light => false,
        Appearance::System => detect_system_dark_mode(),
    };

    let palette = if is_dark {
        dark_palette()
    } else {
        light_palette()
    };

    Theme::custom("FaceWatch", palette)
}

fn dark_palette() -> Palette {
    Palette {
        background: color!(0x1c, 0x1c, 0x1e),
        text: color!(0xcc, 0xcc, 0xcc),
        primary: color!(0x21, 0x96, 0xf3),
        success: color!(0x4c, 0xaf, 0x50),
        warning: color!(0xff, 0x98, 0x00),
        danger: color!(0xf4, 0x43, 0x36),
    }
}

fn light_palette() -> Palette {
    Palette {
        background: color!(0xf5, 0xf5, 0xf7),
        text: color!(0x1d, 0x1d, 0x1f),
        primary: color!(0x19, 0x76, 0xd2),
        success: color!(0x38, 0x8e, 0x3c),
        warning: color!(0xef, 0x6c, 0x00),
        danger: color!(0xd3, 0x2f, 0x2f),
    }
}

/// Banner background for each notification kind.
pub fn notification_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Success => color!(0x4c, 0xaf, 0x50),
        NotificationKind::Error => color!(0xf4, 0x43, 0x36),
        NotificationKind::Warning => color!(0xff, 0x98, 0x00),
        NotificationKind::Info => color!(0x21, 0x96, 0xf3),
    }
}

/// Accent used for the edge and tint of a detection row.
pub fn row_accent(theme: &Theme, variant: RowVariant) -> Color {
    let palette = theme.palette();
    match variant {
        RowVariant::Known => palette.success,
        RowVariant::Unknown => palette.danger,
    }
}

/// Secondary text, e.g. timestamps and placeholders.
pub fn muted_color(theme: &Theme) -> Color {
    Color {
        a: 0.6,
        ..theme.palette().text
    }
}

/// Slightly lifted background for panels.
pub fn surface_color(theme: &Theme) -> Color {
    let palette = theme.extended_palette();
    if palette.is_dark {
        Color {
            a: 0.06,
            ..Color::WHITE
        }
    } else {
        Color::WHITE
    }
}

fn detect_system_dark_mode() -> bool {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
            .map(|o| {
                String::from_utf8_lossy(&o.stdout)
                    .trim()
                    .eq_ignore_ascii_case("dark")
            })
            .unwrap_or(true)
    }
    #[cfg(not(target_os = "macos"))]
    {
        true
    }
}
