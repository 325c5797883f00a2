use iced::widget::{column, container, mouse_area, progress_bar, text};
use iced::{Alignment, Border, Element, Length, Theme};

use crate::state::upload::UploadQueue;
use crate::Message;

/// Drop zone plus the progress indicator of the running batch
pub fn upload_section<'a>(uploads: &'a UploadQueue, hovering: bool) -> Element<'a, Message> {
    let hint = if hovering {
        "Release to upload"
    } else {
        "Drop images or videos anywhere in this window, or click to choose files"
    };

    let zone = container(
        column![
            text("📁 Upload ads").size(20),
            text(hint).size(14),
            text("Images: PNG, JPG, GIF, BMP, WEBP • Videos: MP4, AVI, MOV, MKV, WEBM, FLV")
                .size(12),
        ]
        .spacing(6)
        .align_x(Alignment::Center),
    )
    .padding(24)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .style(move |theme: &Theme| drop_zone(theme, hovering));

    let mut section = column![mouse_area(zone).on_press(Message::PickFiles)].spacing(10);

    if let (true, Some(label)) = (uploads.is_active(), uploads.label()) {
        section = section.push(text(label).size(14)).push(
            progress_bar(0.0..=100.0, uploads.progress()).height(Length::Fixed(8.0)),
        );

        let selected = uploads.selection().len();
        section = section.push(text(format!("{selected} file(s) selected")).size(12));
    }

    section.into()
}

fn drop_zone(theme: &Theme, hovering: bool) -> container::Style {
    let palette = theme.extended_palette();
    let base = super::panel(theme);

    let border_color = if hovering {
        palette.primary.strong.color
    } else {
        palette.background.strong.color
    };

    container::Style {
        border: Border {
            color: border_color,
            width: 2.0,
            radius: 12.0.into(),
        },
        ..base
    }
}
