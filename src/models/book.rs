//! Book model and request payloads

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book record as stored in the `book` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publication_year: i64,
}

/// A book that has not been persisted yet (no id assigned)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publication_year: i64,
}

/// Wire representation of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publication_year: i64,
}

/// Create book request.
///
/// Fields are optional at decoding time so the creator can report every
/// missing one at once. `null` is treated as absent, and the year accepts
/// either a number or a numeric string.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(required(message = "Title is required"))]
    pub title: Option<String>,
    #[validate(required(message = "Author is required"))]
    pub author: Option<String>,
    #[validate(required(message = "Publication year is required"))]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i64>)]
    pub publication_year: Option<i64>,
}

/// Update book request: only the fields present are applied
#[serde_as]
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i64>)]
    pub publication_year: Option<i64>,
}

impl UpdateBook {
    /// Overwrite the fields of `book` that this request carries
    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(publication_year) = self.publication_year {
            book.publication_year = publication_year;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.publication_year.is_none()
    }
}
