//! Poster image URLs.

/// Image base for `w185` posters on the catalog's image CDN.
pub const DEFAULT_IMAGE_BASE_URL: &str = "http://image.tmdb.org/t/p/w185";

/// Shown for movies that have no poster.
pub const PLACEHOLDER_POSTER_URL: &str =
    "https://s3-ap-southeast-1.amazonaws.com/popcornsg/placeholder-movieimage.png";

/// Full poster URL for `poster_path`, or the placeholder when absent/blank.
///
/// ```
/// use cinemawala_core::poster::{poster_url, PLACEHOLDER_POSTER_URL};
/// assert_eq!(
///     poster_url("http://img/w185/", Some("/abc.jpg")),
///     "http://img/w185/abc.jpg"
/// );
/// assert_eq!(poster_url("http://img/w185", None), PLACEHOLDER_POSTER_URL);
/// ```
pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> String {
    match poster_path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => format!(
            "{}/{}",
            image_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
        None => PLACEHOLDER_POSTER_URL.to_string(),
    }
}
