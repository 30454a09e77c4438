use crate::models::FeaturedImage;

/// Resolves an upstream featured image into a display url.
///
/// Root-relative paths are served from the image CDN; anything else is
/// already absolute and passes through. A missing image, or one with an
/// empty url, resolves to `None`.
pub fn resolve_image(featured: Option<&FeaturedImage>, cdn_origin: &str) -> Option<String> {
    let path = featured?.url.as_deref().filter(|url| !url.is_empty())?;

    if path.starts_with('/') {
        Some(format!("{}{}", cdn_origin, path))
    } else {
        Some(path.to_string())
    }
}
