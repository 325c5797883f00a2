/// View builders
///
/// Pure functions from state to widgets; every interaction comes back
/// as a `Message` handled in `AdManager::update`.

pub mod grid;
pub mod modal;
pub mod toast;
pub mod upload;

use iced::widget::container;
use iced::{Border, Color, Theme};

/// Rounded panel on the theme's weak background, used by cards and the drop zone
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: Border {
            color: palette.background.strong.color,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}

/// Muted label color for secondary card text
pub fn muted(theme: &Theme) -> Color {
    theme.extended_palette().background.strong.text
}
