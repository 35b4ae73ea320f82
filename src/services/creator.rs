//! Book creation with required-field validation

use std::sync::Arc;

use validator::{Validate, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, NewBook},
    repository::BookStore,
};

#[derive(Clone)]
pub struct BookCreator {
    store: Arc<dyn BookStore>,
}

impl BookCreator {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Validate `data` and persist a new book from it.
    ///
    /// Presence is the only check: empty strings and zero years are accepted.
    pub async fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        data.validate().map_err(invalid_book_data)?;

        let (Some(title), Some(author), Some(publication_year)) =
            (data.title, data.author, data.publication_year)
        else {
            return Err(AppError::Validation("Invalid book data".to_string()));
        };

        let book = self
            .store
            .insert(NewBook {
                title,
                author,
                publication_year,
            })
            .await?;

        tracing::info!(book_id = book.id, "Book created");
        Ok(book)
    }
}

/// Join every field message into one, in a stable order
fn invalid_book_data(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect();
    messages.sort();

    AppError::Validation(format!("Invalid book data: {}", messages.join(", ")))
}
