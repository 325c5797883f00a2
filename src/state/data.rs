/// Shared data structures for the application state
///
/// These structs mirror the JSON the ad server sends and flow
/// from the API layer into the UI layer unchanged.
use serde::Deserialize;

/// Kind of media an asset holds, as classified by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
    /// Anything else (the server says "unknown")
    #[serde(other)]
    Other,
}

impl AssetKind {
    pub fn icon(self) -> &'static str {
        match self {
            AssetKind::Image => "🖼️",
            AssetKind::Video => "🎬",
            AssetKind::Other => "📄",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Video => "video",
            AssetKind::Other => "other",
        }
    }
}

/// Represents a single ad in the server's collection
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Asset {
    /// Filename, unique on the server (e.g., "summer_sale.mp4")
    pub filename: String,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    /// Size in bytes; older servers omit it
    #[serde(default)]
    pub size: Option<u64>,
    /// Size in megabytes, already rounded by the server
    pub size_mb: f64,
    /// Modification time, pre-formatted by the server ("2024-05-01 12:00:00")
    pub modified: String,
    /// Where the raw bytes are served, usually relative ("/api/ads/file/<name>")
    pub url: String,
}

impl Asset {
    /// "1.5 MB"
    pub fn size_label(&self) -> String {
        format!("{} MB", self.size_mb)
    }

    /// "🎬 video"
    pub fn kind_label(&self) -> String {
        format!("{} {}", self.kind.icon(), self.kind.label())
    }
}

/// Aggregate numbers for the header line
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StatusSummary {
    pub total_ads: u64,
    pub total_size_mb: f64,
}

impl StatusSummary {
    /// "3 ads • 12.5 MB"
    pub fn line(&self) -> String {
        format!("{} ads • {} MB", self.total_ads, self.total_size_mb)
    }
}

/// Payload of a successful `POST /api/upload`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of a successful `DELETE /api/ads/<filename>`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeleteReceipt {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_from_server_json() {
        let asset: Asset = serde_json::from_str(
            r#"{
                "filename": "promo.mp4",
                "type": "video",
                "size": 1572864,
                "size_mb": 1.5,
                "modified": "2024-05-01 12:00:00",
                "url": "/api/ads/file/promo.mp4"
            }"#,
        )
        .unwrap();

        assert_eq!(asset.kind, AssetKind::Video);
        assert_eq!(asset.size, Some(1_572_864));
        assert_eq!(asset.size_label(), "1.5 MB");
        assert_eq!(asset.kind_label(), "🎬 video");
    }

    #[test]
    fn test_unknown_kind_is_other() {
        let kind: AssetKind = serde_json::from_str(r#""unknown""#).unwrap();
        assert_eq!(kind, AssetKind::Other);
        assert_eq!(kind.icon(), "📄");
    }

    #[test]
    fn test_whole_numbers_print_without_fraction() {
        let status = StatusSummary {
            total_ads: 3,
            total_size_mb: 12.0,
        };
        assert_eq!(status.line(), "3 ads • 12 MB");
    }
}
