use jiff::civil::Date;
use serde::{Deserialize, Deserializer};

/// Rating bounds enforced at the validation boundary.
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 10.0;

/// One unpersisted search result from the external catalog, shown to the
/// user for selection before anything is written.
#[derive(Clone, Debug, Deserialize)]
pub struct CandidateMatch {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub release_date: String,
    #[serde(default, rename = "overview", deserialize_with = "null_to_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub poster_path: String,
}

// TMDB sends explicit nulls for absent posters and overviews.
fn null_to_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fields the select handler supplies at creation time. Rating, ranking and
/// review are defaulted by the store.
#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub img_url: String,
}

#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    pub rating: String,
    pub review: String,
}

/// Validated edit input: rating parsed and range-checked, review trimmed.
#[derive(Clone, Debug, PartialEq)]
pub struct EditInput {
    pub rating: f64,
    pub review: String,
}

pub fn validate_add(form: &AddForm) -> Result<String, String> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err("Movie title is required.".to_string());
    }
    Ok(title.to_string())
}

pub fn validate_edit(form: &EditForm) -> Result<EditInput, String> {
    let rating: f64 = form
        .rating
        .trim()
        .parse()
        .map_err(|_| "Rating must be a number.".to_string())?;
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(format!("Rating must be between {RATING_MIN} and {RATING_MAX}."));
    }

    let review = form.review.trim();
    if review.is_empty() {
        return Err("Review is required.".to_string());
    }

    Ok(EditInput { rating, review: review.to_string() })
}

/// Four-digit release year from an ISO date string like "1962-12-10".
pub fn extract_year(release_date: &str) -> Option<i32> {
    release_date.trim().parse::<Date>().ok().map(|d| i32::from(d.year()))
}

/// Full poster URL: fixed base + fixed "original" size segment + the
/// relative path fragment returned by the catalog.
pub fn compose_img_url(image_base_url: &str, poster_path: &str) -> String {
    format!("{image_base_url}original{poster_path}")
}
