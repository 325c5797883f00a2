use iced::widget::{button, center, column, container, image, mouse_area, opaque, row, stack, text};
use iced::{Alignment, Color, ContentFit, Element, Length};

use crate::state::preview::{Preview, PreviewContent};
use crate::Message;

/// Lay the preview modal over `base` when it is open
pub fn with_preview<'a>(
    base: Element<'a, Message>,
    preview: &'a Preview,
) -> Element<'a, Message> {
    let (Some(filename), Some(content)) = (preview.filename(), preview.content()) else {
        return base;
    };

    let header = row![
        text(filename).size(18).width(Length::Fill),
        button(text("✕")).on_press(Message::CloseModal).style(button::text),
    ]
    .align_y(Alignment::Center);

    let body = container(column![header, body(content, preview)].spacing(12))
        .padding(16)
        .max_width(960)
        .style(super::panel);

    overlay(base, body, Message::CloseModal)
}

fn body<'a>(content: &'a PreviewContent, preview: &'a Preview) -> Element<'a, Message> {
    match content {
        PreviewContent::Image { .. } => match (preview.image(), preview.failure()) {
            (Some(handle), _) => image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fixed(600.0))
                .into(),
            (None, Some(reason)) => text(format!("⚠️ Could not load image: {reason}")).into(),
            (None, None) => text("Loading preview...").into(),
        },
        PreviewContent::Video {
            src,
            controls,
            autoplay,
            muted,
        } => {
            let flags: Vec<&str> = [
                (*controls, "controls"),
                (*autoplay, "autoplay"),
                (*muted, "muted"),
            ]
            .into_iter()
            .filter_map(|(on, flag)| on.then_some(flag))
            .collect();

            column![
                text("🎬 Video").size(40),
                text(src.as_str()).size(13),
                text(flags.join(" • ")).size(12),
            ]
            .spacing(8)
            .align_x(Alignment::Center)
            .into()
        }
        PreviewContent::Empty => column![].into(),
    }
}

/// Dim the screen under `content`; clicking the dimmed area emits `on_blur`
fn overlay<'a>(
    base: Element<'a, Message>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
