use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::state::data::AssetKind;

/// Image extensions the ad server accepts
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Video extensions the ad server accepts
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm", "flv"];

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Classify a local file by its extension
pub fn kind_of(path: &Path) -> AssetKind {
    match extension(path) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => AssetKind::Image,
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => AssetKind::Video,
        _ => AssetKind::Other,
    }
}

/// MIME type for the multipart part
pub fn content_type(path: &Path) -> &'static str {
    match extension(path).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("avi") => "video/x-msvideo",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        Some("flv") => "video/x-flv",
        _ => "application/octet-stream",
    }
}

/// Turn what the user dropped or picked into the list of files to upload.
///
/// Plain files are kept as given, in order; the server decides what it accepts.
/// Directories are walked recursively (sorted by name) and only their image
/// and video files are kept.
pub fn expand_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path);
            continue;
        }

        tracing::info!("🔍 Scanning dropped folder: {}", path.display());
        let before = files.len();

        // Walk the directory tree recursively
        for entry in WalkDir::new(&path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let entry_path = entry.path();
            if entry_path.is_file() && kind_of(entry_path) != AssetKind::Other {
                files.push(entry_path.to_path_buf());
            }
        }

        tracing::info!(
            "Found {} media files in {}",
            files.len() - before,
            path.display()
        );
    }

    files
}
