/// Local media handling
///
/// This module handles:
/// - Recognising image and video files by extension
/// - Expanding dropped folders into the media files they contain
/// - Decoding fetched images into card thumbnails

pub mod scan;
pub mod thumbnail;
