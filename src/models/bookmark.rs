//! Represents a bookmark — a saved web reference — and its request payloads.

use crate::sanitize::Sanitizer;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use thiserror::Error;

/// A stored bookmark row.
#[derive(Serialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct Bookmark {
    /// Assigned by the storage backend on insert; never changes afterwards.
    pub id: i64,

    pub title: String,

    /// Only presence is enforced, not URL syntax.
    pub url: String,

    pub description: String,

    /// Decimal text such as `"4.25"`.
    pub rating: String,
}

impl Bookmark {
    /// Copy of this bookmark with its free-text fields passed through `sanitizer`.
    pub fn sanitized(&self, sanitizer: &dyn Sanitizer) -> Bookmark {
        Bookmark {
            id: self.id,
            title: sanitizer.sanitize(&self.title),
            url: sanitizer.sanitize(&self.url),
            description: sanitizer.sanitize(&self.description),
            rating: self.rating.clone(),
        }
    }
}

/// Fields of a bookmark about to be inserted. All four are required.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: String,
}

/// Partial update: `Some` overwrites the stored field, `None` leaves it untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<String>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.rating.is_none()
    }

    /// Merge this patch over `current`, keeping the id.
    pub fn apply_to(&self, current: &Bookmark) -> Bookmark {
        Bookmark {
            id: current.id,
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            url: self.url.clone().unwrap_or_else(|| current.url.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            rating: self.rating.clone().unwrap_or_else(|| current.rating.clone()),
        }
    }
}

/// Client-facing validation failures. The `Display` text is the response message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),
    #[error("Request body must contain either 'title', 'url', 'description' or 'rating'")]
    EmptyPatch,
    #[error("'{0}' must not be empty")]
    BlankField(&'static str),
    #[error("'rating' must be a number")]
    InvalidRating,
}

/// Raw `POST /api/bookmarks` body. `null` and absent are the same thing.
#[derive(Deserialize, Debug, Default)]
pub struct CreateBookmarkBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "rating_text")]
    pub rating: Option<String>,
}

impl CreateBookmarkBody {
    /// Checks fields in declaration order and reports the first one missing.
    pub fn validate(self) -> Result<NewBookmark, ValidationError> {
        let title = required("title", self.title)?;
        let url = required("url", self.url)?;
        let description = required("description", self.description)?;
        let rating = checked_rating(required("rating", self.rating)?)?;

        Ok(NewBookmark {
            title,
            url,
            description,
            rating,
        })
    }
}

/// Raw `PATCH /api/bookmarks/{id}` body.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateBookmarkBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "rating_text")]
    pub rating: Option<String>,
}

impl UpdateBookmarkBody {
    pub fn validate(self) -> Result<BookmarkPatch, ValidationError> {
        let patch = BookmarkPatch {
            title: supplied("title", self.title)?,
            url: supplied("url", self.url)?,
            description: supplied("description", self.description)?,
            rating: supplied("rating", self.rating)?
                .map(checked_rating)
                .transpose()?,
        };

        if patch.is_empty() {
            return Err(ValidationError::EmptyPatch);
        }
        Ok(patch)
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn supplied(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, ValidationError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ValidationError::BlankField(field)),
        other => Ok(other),
    }
}

/// Plain decimal text only: optional `-`, digits, optional fraction. No exponents.
fn checked_rating(rating: String) -> Result<String, ValidationError> {
    let trimmed = rating.trim();
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if digits(whole) && fraction.is_none_or(digits) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::InvalidRating)
    }
}

/// Accepts `"4.25"` or `4.25` and keeps the decimal text form.
fn rating_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "rating must be a string or number, got {}",
            other
        ))),
    }
}
