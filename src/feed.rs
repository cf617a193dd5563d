//! Client-side fetches of the two JSON feeds. One attempt each, no retry.

use std::time::Duration;

use crate::media::{GalleryListing, MediaItem};
use crate::models::project::ProjectStore;

fn client() -> Result<reqwest::blocking::Client, String> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| format!("HTTP client error: {}", e))
}

fn fetch_text(url: &str) -> Result<String, String> {
    let resp = client()?
        .get(url)
        .send()
        .map_err(|e| format!("Request to {} failed: {}", url, e))?;

    if !resp.status().is_success() {
        return Err(format!("{} returned {}", url, resp.status()));
    }
    resp.text()
        .map_err(|e| format!("Reading {} failed: {}", url, e))
}

/// Fetch the projects feed. Hand the result to `ProjectGallery::load`,
/// which degrades to an empty gallery on error.
pub fn fetch_projects(url: &str) -> Result<ProjectStore, String> {
    ProjectStore::from_json(&fetch_text(url)?)
}

/// Fetch the gallery listing for the hero banner.
pub fn fetch_gallery(url: &str) -> Result<Vec<MediaItem>, String> {
    let raw = fetch_text(url)?;
    let listing: GalleryListing =
        serde_json::from_str(&raw).map_err(|e| format!("Invalid gallery listing: {}", e))?;
    Ok(listing.items)
}

/// Like [`fetch_gallery`], but logs failures and yields an empty list.
pub fn fetch_gallery_or_empty(url: &str) -> Vec<MediaItem> {
    fetch_gallery(url).unwrap_or_else(|e| {
        log::error!("[gallery] {}", e);
        Vec::new()
    })
}
