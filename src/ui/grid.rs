use iced::widget::{button, column, container, image, mouse_area, row, text};
use iced::{Alignment, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;

use crate::state::data::Asset;
use crate::state::library::{Library, Thumbnail};
use crate::Message;

const CARD_WIDTH: f32 = 240.0;
const PREVIEW_HEIGHT: f32 = 150.0;

/// Loading indicator, empty state, or the card grid
pub fn ads_section(library: &Library) -> Element<'_, Message> {
    if library.is_loading() {
        return centered(text("Loading ads...").size(16));
    }

    if library.show_empty() {
        return centered(
            column![
                text("📭 No ads yet").size(20),
                text("Upload an image or video to get started").size(14),
            ]
            .spacing(6)
            .align_x(Alignment::Center),
        );
    }

    let cards: Vec<Element<'_, Message>> = library
        .ads()
        .iter()
        .map(|ad| card(ad, library))
        .collect();

    Wrap::with_elements(cards)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(40)
        .center_x(Length::Fill)
        .into()
}

/// One ad: clickable thumbnail, name, type, size, date and actions
fn card<'a>(ad: &'a Asset, library: &'a Library) -> Element<'a, Message> {
    let preview = Message::Preview(ad.filename.clone(), ad.kind);

    let thumbnail = mouse_area(
        container(thumbnail_view(ad, library))
            .width(Length::Fill)
            .height(Length::Fixed(PREVIEW_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(PREVIEW_HEIGHT)),
    )
    .on_press(preview.clone());

    let [name, kind, size, modified] = card_lines(ad);

    let info = column![
        text(name).size(15),
        row![text(kind).size(13), text(size).size(13)].spacing(12),
        text(modified)
            .size(12)
            .style(|theme: &Theme| text::Style {
                color: Some(super::muted(theme)),
            }),
        row![
            button(text("👁️ Preview").size(13))
                .on_press(preview)
                .style(button::secondary),
            button(text("🗑️ Delete").size(13))
                .on_press(Message::DeleteRequested(ad.filename.clone()))
                .style(button::danger),
        ]
        .spacing(8),
    ]
    .spacing(6);

    container(column![thumbnail, info].spacing(10))
        .padding(12)
        .width(Length::Fixed(CARD_WIDTH))
        .style(super::panel)
        .into()
}

/// Name, type, size and date lines of a card
fn card_lines(ad: &Asset) -> [String; 4] {
    [
        ad.filename.clone(),
        ad.kind_label(),
        ad.size_label(),
        format!("Modified: {}", ad.modified),
    ]
}

fn thumbnail_view<'a>(ad: &'a Asset, library: &'a Library) -> Element<'a, Message> {
    match Thumbnail::for_asset(ad) {
        Thumbnail::Image { .. } => match library.thumbnail(&ad.filename) {
            Some(handle) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .into(),
            None => text("🖼️").size(40).into(),
        },
        // No inline video element in a native window: a silent poster tile stands in
        Thumbnail::Video { muted, .. } => column![
            text("🎬").size(40),
            text(if muted { "video • muted" } else { "video" }).size(12),
        ]
        .spacing(4)
        .align_x(Alignment::Center)
        .into(),
        Thumbnail::Icon => text("📄").size(40).into(),
    }
}
