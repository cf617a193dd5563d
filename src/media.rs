use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::render::Element;

/// Extensions the client treats as video. Anything else is shown as an image.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov"];

/// Extensions the gallery listing will publish.
pub const LISTING_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
pub const LISTING_VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One entry of the gallery listing feed: `{ "name": ..., "type": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GalleryListing {
    pub items: Vec<MediaItem>,
}

fn extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Lenient client-side classification. Unknown extensions are images.
pub fn classify(file_name: &str) -> MediaKind {
    let ext = extension(file_name);
    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}

/// Strict classification used by the listing. `None` means unsupported.
pub fn classify_strict(file_name: &str) -> Option<MediaKind> {
    let ext = extension(file_name);
    if LISTING_VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else if LISTING_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else {
        None
    }
}

/// Resolve a media file name against the media root.
pub fn media_url(root: &str, file_name: &str) -> String {
    format!("{}{}", root, urlencoding::encode(file_name))
}

/// List publishable media in `dir`, sorted by name.
/// Hidden entries, subdirectories and unsupported extensions are skipped.
pub fn list_gallery(dir: &Path) -> Result<Vec<MediaItem>, String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Cannot read gallery folder {}: {}", dir.display(), e))?;

    let mut items: Vec<MediaItem> = entries
        .flatten()
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                return None;
            }
            let kind = classify_strict(&name)?;
            Some(MediaItem { name, kind })
        })
        .collect();

    items.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(items)
}

/// Build the element that displays one media file.
/// Videos play muted and looped inline; images load lazily when `lazy` is set.
pub fn media_element(
    root: &str,
    file_name: &str,
    kind: MediaKind,
    label: &str,
    lazy: bool,
) -> Element {
    let src = media_url(root, file_name);
    match kind {
        MediaKind::Video => Element::new("video")
            .attr("src", &src)
            .attr("aria-label", label)
            .flag("muted")
            .flag("autoplay")
            .flag("loop")
            .flag("playsinline"),
        MediaKind::Image => {
            let img = Element::new("img").attr("src", &src).attr("alt", label);
            if lazy {
                img.attr("loading", "lazy")
            } else {
                img
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(classify("obra.mp4"), MediaKind::Video);
        assert_eq!(classify("obra.MOV"), MediaKind::Video);
        assert_eq!(classify("obra.ogg"), MediaKind::Video);
        assert_eq!(classify("obra.jpg"), MediaKind::Image);
        assert_eq!(classify("obra.xyz"), MediaKind::Image);
        assert_eq!(classify("no-extension"), MediaKind::Image);
    }

    #[test]
    fn test_strict_classification_drops_unknown() {
        assert_eq!(classify_strict("a.webp"), Some(MediaKind::Image));
        assert_eq!(classify_strict("a.webm"), Some(MediaKind::Video));
        assert_eq!(classify_strict("a.mov"), None);
        assert_eq!(classify_strict("a.txt"), None);
    }

    #[test]
    fn test_media_url_percent_encodes() {
        assert_eq!(
            media_url("assets/Imagenes galería/", "obra 1 ñ.jpg"),
            "assets/Imagenes galería/obra%201%20%C3%B1.jpg"
        );
    }

    #[test]
    fn test_list_gallery_filters_entries() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpg", "a.mp4", ".hidden.jpg", "notes.txt", "clip.mov", "c.PNG"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.jpg")).unwrap();

        let items = list_gallery(dir.path()).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.mp4", "b.jpg", "c.PNG"]);
        assert_eq!(items[0].kind, MediaKind::Video);
        assert_eq!(items[2].kind, MediaKind::Image);
    }

    #[test]
    fn test_list_gallery_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_gallery(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_listing_serializes_type_field() {
        let listing = GalleryListing {
            items: vec![MediaItem {
                name: "a.mp4".into(),
                kind: MediaKind::Video,
            }],
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["items"][0]["type"], "video");
        assert_eq!(json["items"][0]["name"], "a.mp4");
    }

    #[test]
    fn test_media_element_shapes() {
        let video = media_element("m/", "a.mp4", MediaKind::Video, "Casa", true);
        assert_eq!(video.tag, "video");
        assert!(video.has_flag("muted"));
        assert_eq!(video.get_attr("aria-label"), Some("Casa"));

        let img = media_element("m/", "a.jpg", MediaKind::Image, "Casa", true);
        assert_eq!(img.tag, "img");
        assert_eq!(img.get_attr("loading"), Some("lazy"));
        assert_eq!(img.get_attr("alt"), Some("Casa"));
        let eager = media_element("m/", "a.jpg", MediaKind::Image, "Casa", false);
        assert!(eager.get_attr("loading").is_none());
    }
}
