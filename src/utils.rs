//! Utility functions

use crate::constants::{APP_NAME, ARTWORK_WEB_BASE_URL};
use std::path::PathBuf;

/// Get the app data directory path
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Public web page for an artwork
pub fn artwork_web_url(id: u64) -> String {
    format!("{}/{}", ARTWORK_WEB_BASE_URL, id)
}

/// Collapse multi-line API text into one line for a table cell
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Years in the API are plain integers, negative for BCE
pub fn format_year(year: Option<i32>) -> String {
    match year {
        Some(y) if y < 0 => format!("{} BCE", -y),
        Some(y) => y.to_string(),
        None => "N/A".to_string(),
    }
}

/// Numbered paginator links: a window of `links` pages centred on `current`
pub fn page_window(current: u32, total: u32, links: u32) -> std::ops::RangeInclusive<u32> {
    let total = total.max(1);
    let links = links.max(1).min(total);
    let current = current.clamp(1, total);
    let half = links / 2;
    let start = current.saturating_sub(half).max(1).min(total - links + 1);
    start..=start + links - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_render_with_era() {
        assert_eq!(format_year(Some(1884)), "1884");
        assert_eq!(format_year(Some(-500)), "500 BCE");
        assert_eq!(format_year(None), "N/A");
    }

    #[test]
    fn artist_display_is_flattened() {
        assert_eq!(single_line("Georges Seurat\nFrench, 1859-1891"), "Georges Seurat French, 1859-1891");
    }

    #[test]
    fn page_window_stays_in_bounds() {
        assert_eq!(page_window(1, 100, 5), 1..=5);
        assert_eq!(page_window(50, 100, 5), 48..=52);
        assert_eq!(page_window(100, 100, 5), 96..=100);
        assert_eq!(page_window(2, 3, 5), 1..=3);
        assert_eq!(page_window(1, 0, 5), 1..=1);
    }

    #[test]
    fn web_url_points_at_artwork() {
        assert_eq!(artwork_web_url(27992), "https://www.artic.edu/artworks/27992");
    }
}
