//! Response schema for the catalog's list endpoints.
//!
//! The catalog returns loosely-typed JSON. Bodies are parsed into the
//! `Raw*` structs below and then validated; any mismatch rejects the
//! whole response so that no half-formed item reaches the paginator.

use cinemawala_core::movie::CatalogItem;
use serde::Deserialize;

/// Top-level body of `/search/movie` and `/movie/popular`.
#[derive(Debug, Deserialize)]
pub struct RawListResponse {
    pub results: Vec<RawMovie>,
}

/// One element of `results` as the catalog sends it.
#[derive(Debug, Deserialize)]
pub struct RawMovie {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

/// Why a response body was rejected.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("malformed body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("result {index} (id {id}) has no title")]
    MissingTitle { index: usize, id: i64 },

    #[error("result {index} has invalid id {id}")]
    InvalidId { index: usize, id: i64 },

    #[error("result {index} (id {id}) has invalid popularity")]
    InvalidPopularity { index: usize, id: i64 },
}

/// Parse and validate a list response body.
pub fn parse_list_response(body: &[u8]) -> Result<Vec<CatalogItem>, SchemaError> {
    let raw: RawListResponse = serde_json::from_slice(body)?;
    raw.results
        .into_iter()
        .enumerate()
        .map(|(index, movie)| validate_movie(index, movie))
        .collect()
}

/// Turn one raw result into a [`CatalogItem`], failing closed.
///
/// The display title prefers `original_title` and falls back to `title`.
/// Blank optional strings are normalized to `None`.
pub fn validate_movie(index: usize, raw: RawMovie) -> Result<CatalogItem, SchemaError> {
    if raw.id <= 0 {
        return Err(SchemaError::InvalidId { index, id: raw.id });
    }

    let title = non_blank(raw.original_title)
        .or_else(|| non_blank(raw.title))
        .ok_or(SchemaError::MissingTitle { index, id: raw.id })?;

    let popularity = raw.popularity.unwrap_or(0.0);
    if !popularity.is_finite() || popularity < 0.0 {
        return Err(SchemaError::InvalidPopularity { index, id: raw.id });
    }

    Ok(CatalogItem {
        id: raw.id,
        title,
        release_date: non_blank(raw.release_date),
        language: non_blank(raw.original_language),
        popularity,
        poster_path: non_blank(raw.poster_path),
        overview: non_blank(raw.overview),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_typical_search_body() {
        let body = br#"{
            "page": 1,
            "results": [
                {"id": 268, "original_title": "Batman", "title": "Batman",
                 "release_date": "1989-06-21", "original_language": "en",
                 "popularity": 41.2, "poster_path": "/cij4.jpg", "overview": "..."},
                {"id": 414906, "title": "The Batman", "release_date": "",
                 "popularity": 120.0, "poster_path": null}
            ],
            "total_pages": 1
        }"#;

        let items = parse_list_response(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Batman");
        assert_eq!(items[0].language.as_deref(), Some("en"));
        assert_eq!(items[1].title, "The Batman");
        assert_eq!(items[1].release_date, None);
        assert_eq!(items[1].poster_path, None);
    }

    #[test]
    fn missing_results_key_is_rejected() {
        assert_matches!(
            parse_list_response(br#"{"status_code": 7, "status_message": "Invalid API key"}"#),
            Err(SchemaError::Malformed(_))
        );
    }

    #[test]
    fn wrong_field_type_rejects_whole_response() {
        let body = br#"{"results": [
            {"id": 1, "title": "Fine"},
            {"id": "2", "title": "Bad id type"}
        ]}"#;
        assert_matches!(parse_list_response(body), Err(SchemaError::Malformed(_)));
    }

    #[test]
    fn untitled_result_is_rejected() {
        let body = br#"{"results": [{"id": 5, "title": "  "}]}"#;
        assert_matches!(
            parse_list_response(body),
            Err(SchemaError::MissingTitle { index: 0, id: 5 })
        );
    }

    #[test]
    fn negative_popularity_is_rejected() {
        let body = br#"{"results": [{"id": 5, "title": "X", "popularity": -1.0}]}"#;
        assert_matches!(
            parse_list_response(body),
            Err(SchemaError::InvalidPopularity { .. })
        );
    }

    #[test]
    fn empty_results_are_valid() {
        assert!(parse_list_response(br#"{"results": []}"#).unwrap().is_empty());
    }
}
