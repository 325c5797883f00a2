/// Preview modal state
///
/// The modal is either hidden or showing one asset. Closing it drops the
/// content and any decoded image, so nothing stays loaded in the background.
use iced::widget::image::Handle;

use super::data::AssetKind;

/// What the modal body renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    Image {
        src: String,
    },
    Video {
        src: String,
        controls: bool,
        autoplay: bool,
        muted: bool,
    },
    Empty,
}

impl PreviewContent {
    /// Build the modal body for an asset served at `src`
    pub fn new(kind: AssetKind, src: String) -> Self {
        match kind {
            AssetKind::Image => PreviewContent::Image { src },
            AssetKind::Video => PreviewContent::Video {
                src,
                controls: true,
                autoplay: true,
                muted: true,
            },
            AssetKind::Other => PreviewContent::Empty,
        }
    }
}

#[derive(Debug, Default)]
pub struct Preview {
    open: Option<OpenPreview>,
}

#[derive(Debug)]
struct OpenPreview {
    filename: String,
    content: PreviewContent,
    image: Option<Handle>,
    /// Why the image could not be shown
    failure: Option<String>,
}

impl Preview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the modal. Returns true when the image bytes should be fetched.
    pub fn open(&mut self, filename: String, kind: AssetKind, src: String) -> bool {
        let content = PreviewContent::new(kind, src);
        let fetch = matches!(content, PreviewContent::Image { .. });

        tracing::debug!("Previewing {filename} ({})", kind.label());
        self.open = Some(OpenPreview {
            filename,
            content,
            image: None,
            failure: None,
        });
        fetch
    }

    /// Hide the modal and release its content
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Attach fetched image bytes, unless the modal moved on meanwhile
    pub fn image_loaded(&mut self, filename: &str, handle: Handle) {
        if let Some(open) = self.open.as_mut() {
            if open.filename == filename {
                open.image = Some(handle);
            }
        }
    }

    /// The image fetch failed; same staleness rule as `image_loaded`
    pub fn image_failed(&mut self, filename: &str, reason: String) {
        if let Some(open) = self.open.as_mut() {
            if open.filename == filename {
                open.failure = Some(reason);
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn filename(&self) -> Option<&str> {
        self.open.as_ref().map(|open| open.filename.as_str())
    }

    pub fn content(&self) -> Option<&PreviewContent> {
        self.open.as_ref().map(|open| &open.content)
    }

    pub fn image(&self) -> Option<&Handle> {
        self.open.as_ref().and_then(|open| open.image.as_ref())
    }

    pub fn failure(&self) -> Option<&str> {
        self.open.as_ref().and_then(|open| open.failure.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> Handle {
        Handle::from_rgba(1, 1, vec![255u8, 255, 255, 255])
    }

    #[test]
    fn test_video_preview_is_muted_autoplay_with_controls() {
        let mut preview = Preview::new();
        let fetch = preview.open("b.mp4".into(), AssetKind::Video, "/api/ads/file/b.mp4".into());

        assert!(!fetch);
        assert_eq!(
            preview.content(),
            Some(&PreviewContent::Video {
                src: "/api/ads/file/b.mp4".into(),
                controls: true,
                autoplay: true,
                muted: true,
            })
        );
    }

    #[test]
    fn test_image_preview_fetches_bytes() {
        let mut preview = Preview::new();
        assert!(preview.open("a.png".into(), AssetKind::Image, "/api/ads/file/a.png".into()));
        assert!(matches!(preview.content(), Some(PreviewContent::Image { .. })));

        preview.image_loaded("a.png", pixel());
        assert!(preview.image().is_some());
    }

    #[test]
    fn test_other_kind_renders_nothing() {
        let mut preview = Preview::new();
        preview.open("c.bin".into(), AssetKind::Other, "/api/ads/file/c.bin".into());
        assert!(preview.is_open());
        assert_eq!(preview.content(), Some(&PreviewContent::Empty));
    }

    #[test]
    fn test_close_hides_and_clears() {
        let mut preview = Preview::new();
        preview.open("a.png".into(), AssetKind::Image, "/api/ads/file/a.png".into());
        preview.image_loaded("a.png", pixel());

        preview.close();
        assert!(!preview.is_open());
        assert!(preview.content().is_none());
        assert!(preview.image().is_none());

        // Closing twice is harmless
        preview.close();
        assert!(!preview.is_open());
    }

    #[test]
    fn test_late_image_for_other_asset_is_ignored() {
        let mut preview = Preview::new();
        preview.open("a.png".into(), AssetKind::Image, "/api/ads/file/a.png".into());
        preview.open("b.png".into(), AssetKind::Image, "/api/ads/file/b.png".into());

        preview.image_loaded("a.png", pixel());
        assert!(preview.image().is_none());
        assert_eq!(preview.filename(), Some("b.png"));

        preview.close();
        preview.image_loaded("b.png", pixel());
        assert!(preview.image().is_none());
    }

    #[test]
    fn test_failed_image_replaces_loading_state() {
        let mut preview = Preview::new();
        preview.open("a.png".into(), AssetKind::Image, "/api/ads/file/a.png".into());
        preview.image_failed("other.png", "HTTP 404 Not Found".into());
        assert!(preview.failure().is_none());

        preview.image_failed("a.png", "HTTP 404 Not Found".into());
        assert_eq!(preview.failure(), Some("HTTP 404 Not Found"));
        assert!(preview.image().is_none());

        // Reopening starts clean
        preview.open("a.png".into(), AssetKind::Image, "/api/ads/file/a.png".into());
        assert!(preview.failure().is_none());
    }
}
