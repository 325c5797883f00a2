/// State management module
///
/// This module holds everything the window shows, including:
/// - Wire-level data structures (data.rs)
/// - The mirrored ad collection and status line (library.rs)
/// - The sequential upload queue (upload.rs)
/// - The preview modal (preview.rs)
/// - Toast notifications (toast.rs)

pub mod data;
pub mod library;
pub mod preview;
pub mod toast;
pub mod upload;
