use iced::widget::image::Handle;
use std::collections::HashMap;

use super::data::{Asset, AssetKind, DeleteReceipt, StatusSummary};
use super::toast::Toasts;
use crate::error::ApiError;

/// What a card shows in its preview slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    /// Decoded from the image served at `url`
    Image { url: String },
    Video { muted: bool },
    /// Generic file icon
    Icon,
}

impl Thumbnail {
    pub fn for_asset(asset: &Asset) -> Self {
        match asset.kind {
            AssetKind::Image => Thumbnail::Image {
                url: asset.url.clone(),
            },
            AssetKind::Video => Thumbnail::Video { muted: true },
            AssetKind::Other => Thumbnail::Icon,
        }
    }
}

/// The Library mirrors the server's ad collection.
///
/// It never edits the collection locally: every upload or delete ends with a
/// full reload, and the grid only ever shows the last successful fetch.
#[derive(Debug, Default)]
pub struct Library {
    ads: Vec<Asset>,
    loading: bool,
    show_empty: bool,
    /// Decoded image thumbnails, keyed by filename
    thumbnails: HashMap<String, Handle>,
    status: Option<StatusSummary>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list fetch is about to start: show the spinner, drop the old cards
    pub fn begin_reload(&mut self) {
        self.loading = true;
        self.ads.clear();
        self.thumbnails.clear();
        self.show_empty = false;
    }

    /// Apply the result of `GET /api/ads`.
    ///
    /// Returns `(filename, url)` for every image thumbnail that should be fetched.
    pub fn ads_loaded(
        &mut self,
        result: Result<Vec<Asset>, ApiError>,
        toasts: &mut Toasts,
    ) -> Vec<(String, String)> {
        self.loading = false;

        match result {
            Ok(ads) if ads.is_empty() => {
                tracing::info!("📭 No ads on the server");
                self.ads.clear();
                self.thumbnails.clear();
                self.show_empty = true;
                Vec::new()
            }
            Ok(ads) => {
                tracing::info!("📊 Loaded {} ads", ads.len());
                self.show_empty = false;
                self.thumbnails.clear();
                self.ads = ads;
                self.ads
                    .iter()
                    .filter_map(|ad| match Thumbnail::for_asset(ad) {
                        Thumbnail::Image { url } => Some((ad.filename.clone(), url)),
                        _ => None,
                    })
                    .collect()
            }
            Err(error) if error.is_server() => {
                toasts.error(format!("❌ Failed to load ads: {error}"));
                Vec::new()
            }
            Err(error) => {
                toasts.error(format!("❌ {error}"));
                Vec::new()
            }
        }
    }

    /// Store a decoded thumbnail, unless the asset vanished in a reload meanwhile
    pub fn set_thumbnail(&mut self, filename: &str, handle: Handle) {
        if self.ads.iter().any(|ad| ad.filename == filename) {
            self.thumbnails.insert(filename.to_string(), handle);
        }
    }

    pub fn thumbnail(&self, filename: &str) -> Option<&Handle> {
        self.thumbnails.get(filename)
    }

    /// Apply the result of `GET /api/status`. Failures are cosmetic and only logged.
    pub fn status_loaded(&mut self, result: Result<StatusSummary, ApiError>) {
        match result {
            Ok(status) => self.status = Some(status),
            Err(error) => tracing::warn!("Failed to load status: {error}"),
        }
    }

    /// Answer from the delete confirmation: the filename to delete, if any
    pub fn confirm_delete(filename: String, confirmed: bool) -> Option<String> {
        if confirmed {
            Some(filename)
        } else {
            tracing::debug!("Delete of {filename} cancelled");
            None
        }
    }

    /// Toast the outcome of a delete. Returns true when the list must be reloaded.
    #[must_use]
    pub fn delete_finished(
        filename: &str,
        result: Result<DeleteReceipt, ApiError>,
        toasts: &mut Toasts,
    ) -> bool {
        match result {
            Ok(_) => {
                toasts.success(format!("✅ {filename} deleted successfully!"));
                true
            }
            Err(error) if error.is_server() => {
                toasts.error(format!("❌ Failed to delete {filename}: {error}"));
                false
            }
            Err(error) => {
                toasts.error(format!("❌ {error}"));
                false
            }
        }
    }

    pub fn ads(&self) -> &[Asset] {
        &self.ads
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn show_empty(&self) -> bool {
        self.show_empty
    }

    /// "3 ads • 12.5 MB", or a placeholder until the first status arrives
    pub fn status_line(&self) -> String {
        self.status
            .map(|status| status.line())
            .unwrap_or_else(|| "Loading status...".to_string())
    }
}
