//! Book lookup, update and removal

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, UpdateBook},
    repository::BookStore,
};

fn not_found() -> AppError {
    AppError::NotFound("Book not found.".to_string())
}

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.store.list().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Book> {
        self.store.get(id).await?.ok_or_else(not_found)
    }

    /// Apply a partial update. No validation: any present field is written as is.
    pub async fn update(&self, id: i64, changes: UpdateBook) -> AppResult<Book> {
        let mut book = self.get(id).await?;
        if changes.is_empty() {
            return Ok(book);
        }

        changes.apply(&mut book);
        let book = self.store.save(book).await?;

        tracing::info!(book_id = id, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(not_found());
        }

        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    /// Check that the record store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
