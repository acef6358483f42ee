//! User settings stored as settings.json in the app data directory

use crate::constants::{API_URL_ENV, DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::types::TableColumn;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Column visibility
    pub col_place_of_origin: bool,
    pub col_artist: bool,
    pub col_inscriptions: bool,
    pub col_date_start: bool,
    pub col_date_end: bool,

    // Listing
    pub rows_per_page: u32,
    pub last_page: u32,

    // API
    pub api_base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            col_place_of_origin: true,
            col_artist: true,
            col_inscriptions: true,
            col_date_start: true,
            col_date_end: true,
            rows_per_page: DEFAULT_PAGE_SIZE,
            last_page: 1,
            api_base_url: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Base URL precedence: environment, then settings, then the public API
    pub fn api_base_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.api_base_url.clone().filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn page_size(&self) -> u32 {
        self.rows_per_page.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn column_visible(&self, col: TableColumn) -> bool {
        match col {
            TableColumn::Title => true,
            TableColumn::PlaceOfOrigin => self.col_place_of_origin,
            TableColumn::Artist => self.col_artist,
            TableColumn::Inscriptions => self.col_inscriptions,
            TableColumn::DateStart => self.col_date_start,
            TableColumn::DateEnd => self.col_date_end,
        }
    }

    pub fn set_column_visible(&mut self, col: TableColumn, visible: bool) {
        match col {
            TableColumn::Title => {}
            TableColumn::PlaceOfOrigin => self.col_place_of_origin = visible,
            TableColumn::Artist => self.col_artist = visible,
            TableColumn::Inscriptions => self.col_inscriptions = visible,
            TableColumn::DateStart => self.col_date_start = visible,
            TableColumn::DateEnd => self.col_date_end = visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_restores_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.rows_per_page = 25;
        settings.last_page = 4;
        settings.set_column_visible(TableColumn::Inscriptions, false);
        settings.save(dir.path());

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded, settings);
        assert!(!loaded.column_visible(TableColumn::Inscriptions));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), r#"{"rows_per_page": 50}"#).unwrap();

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.rows_per_page, 50);
        assert_eq!(loaded.last_page, 1);
        assert!(loaded.col_artist);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn page_size_is_clamped() {
        let settings = Settings { rows_per_page: 0, ..Default::default() };
        assert_eq!(settings.page_size(), 1);
        let settings = Settings { rows_per_page: 1000, ..Default::default() };
        assert_eq!(settings.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn title_column_cannot_be_hidden() {
        let mut settings = Settings::default();
        settings.set_column_visible(TableColumn::Title, false);
        assert!(settings.column_visible(TableColumn::Title));
    }
}
