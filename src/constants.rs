//! Application constants and configuration

pub const DEFAULT_API_BASE_URL: &str = "https://api.artic.edu/api/v1";
pub const ARTWORK_WEB_BASE_URL: &str = "https://www.artic.edu/artworks";
pub const API_URL_ENV: &str = "ARTWORK_API_URL";
pub const APP_NAME: &str = "Artwork Browser";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fields requested from the artworks endpoint
pub const ARTWORK_FIELDS: &str =
    "id,title,place_of_origin,artist_display,inscriptions,date_start,date_end";

pub const DEFAULT_PAGE_SIZE: u32 = 12;
/// Upper bound the API accepts for `limit`
pub const MAX_PAGE_SIZE: u32 = 100;
pub const REQUEST_TIMEOUT_SECS: u64 = 20;

/// Toast timing (seconds)
pub const TOAST_VISIBLE_SECS: f32 = 3.0;
pub const TOAST_FADE_SECS: f32 = 0.5;

/// Numbered page buttons shown around the current page
pub const PAGINATOR_LINKS: u32 = 5;
