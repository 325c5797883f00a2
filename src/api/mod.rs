/// REST client for the ad server
///
/// - `client.rs`: typed endpoints and the streamed upload
/// - `envelope.rs`: the `{success, error, ...}` response wrapper

pub mod client;
pub mod envelope;

pub use client::{ApiClient, UploadEvent};
