//! Common types and data structures

use serde::{Deserialize, Serialize};

/// Artwork record as returned by the artworks endpoint.
/// Everything except `id` is passed through untouched and may be null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i32>,
    #[serde(default)]
    pub date_end: Option<i32>,
}

/// Pagination block of a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub total: u64,
    pub limit: u32,
    pub offset: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            limit: 0,
            offset: 0,
            total_pages: 0,
            current_page: 1,
        }
    }
}

/// One page of the artworks listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArtworkPage {
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub data: Vec<Artwork>,
}

/// Selection state of the rows on the visible page (drives the header checkbox)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection {
    None,
    Partial,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// Transient notification shown over the table panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Error, message: message.into() }
    }
}

/// Optional table columns (title and the checkbox are always shown)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    Title,
    PlaceOfOrigin,
    Artist,
    Inscriptions,
    DateStart,
    DateEnd,
}

impl TableColumn {
    pub const ALL: [TableColumn; 6] = [
        TableColumn::Title,
        TableColumn::PlaceOfOrigin,
        TableColumn::Artist,
        TableColumn::Inscriptions,
        TableColumn::DateStart,
        TableColumn::DateEnd,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TableColumn::Title => "TITLE",
            TableColumn::PlaceOfOrigin => "PLACE OF ORIGIN",
            TableColumn::Artist => "ARTIST",
            TableColumn::Inscriptions => "INSCRIPTIONS",
            TableColumn::DateStart => "START DATE",
            TableColumn::DateEnd => "END DATE",
        }
    }

    /// Relative width share used when laying out the table
    pub fn width_parts(self) -> f32 {
        match self {
            TableColumn::Title => 3.0,
            TableColumn::PlaceOfOrigin => 1.5,
            TableColumn::Artist => 3.0,
            TableColumn::Inscriptions => 3.0,
            TableColumn::DateStart => 1.0,
            TableColumn::DateEnd => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_artworks_response_with_nulls() {
        let body = serde_json::json!({
            "pagination": {
                "total": 129884,
                "limit": 12,
                "offset": 0,
                "total_pages": 10824,
                "current_page": 1,
                "next_url": "https://api.artic.edu/api/v1/artworks?page=2"
            },
            "data": [
                {
                    "id": 27992,
                    "title": "A Sunday on La Grande Jatte, 1884",
                    "place_of_origin": "France",
                    "artist_display": "Georges Seurat\nFrench, 1859-1891",
                    "inscriptions": null,
                    "date_start": 1884,
                    "date_end": 1886
                },
                { "id": 4 }
            ],
            "config": { "iiif_url": "https://www.artic.edu/iiif/2" }
        });

        let page: ArtworkPage = serde_json::from_value(body).unwrap();
        assert_eq!(page.pagination.total, 129884);
        assert_eq!(page.pagination.total_pages, 10824);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].date_end, Some(1886));
        assert_eq!(page.data[0].inscriptions, None);
        assert_eq!(page.data[1].title, None);
    }

    #[test]
    fn missing_pagination_defaults_to_first_page() {
        let page: ArtworkPage = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.total, 0);
        assert!(page.data.is_empty());
    }
}
