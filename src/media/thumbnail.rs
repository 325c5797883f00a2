use image::imageops::FilterType;

/// Decoded, downscaled RGBA pixels ready for an iced image handle
#[derive(Debug, Clone)]
pub struct ThumbnailPixels {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ThumbnailPixels {
    pub fn into_handle(self) -> iced::widget::image::Handle {
        iced::widget::image::Handle::from_rgba(self.width, self.height, self.pixels)
    }
}

/// Generate a card thumbnail from the bytes the server served.
/// Decoding is CPU-bound, so it runs on a blocking thread.
pub async fn generate_thumbnail(bytes: Vec<u8>, size: u32) -> Result<ThumbnailPixels, String> {
    tokio::task::spawn_blocking(move || generate_thumbnail_blocking(&bytes, size))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Blocking version of thumbnail generation
fn generate_thumbnail_blocking(bytes: &[u8], size: u32) -> Result<ThumbnailPixels, String> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| format!("Failed to decode image: {}", e))?;

    // Keep small images as they are, shrink the rest to fit a size x size box
    let img = if img.width() > size || img.height() > size {
        img.resize(size, size, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok(ThumbnailPixels {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
