use iced::alignment::{Horizontal, Vertical};
use iced::widget::{column, container, stack, text};
use iced::{Border, Color, Element, Length};

use crate::state::toast::{ToastKind, Toasts};
use crate::Message;

/// Stack the toasts in the top-right corner over `base`, oldest on top
pub fn with_toasts<'a>(base: Element<'a, Message>, toasts: &'a Toasts) -> Element<'a, Message> {
    if toasts.is_empty() {
        return base;
    }

    let items = column(toasts.iter().map(|toast| {
        let accent = match toast.kind {
            ToastKind::Success => Color::from_rgb(0.18, 0.62, 0.35),
            ToastKind::Error => Color::from_rgb(0.80, 0.22, 0.22),
        };

        container(text(&toast.message).size(14))
            .padding([10, 14])
            .width(Length::Fixed(340.0))
            .style(move |_theme| container::Style {
                background: Some(accent.into()),
                text_color: Some(Color::WHITE),
                border: Border {
                    radius: 6.0.into(),
                    ..Border::default()
                },
                ..container::Style::default()
            })
            .into()
    }))
    .spacing(8);

    stack![
        base,
        container(items)
            .padding(20)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Right)
            .align_y(Vertical::Top),
    ]
    .into()
}
