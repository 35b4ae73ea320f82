//! Process-local book store, used by tests and `database.url = "memory"`

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Book>,
    /// Last id handed out; ids are never reused, like AUTOINCREMENT
    last_id: i64,
}

#[derive(Default)]
pub struct InMemoryBookStore {
    table: RwLock<Table>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn get(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn insert(&self, book: NewBook) -> AppResult<Book> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let book = Book {
            id: table.last_id,
            title: book.title,
            author: book.author,
            publication_year: book.publication_year,
        };
        table.rows.insert(book.id, book.clone());
        Ok(book)
    }

    async fn save(&self, book: Book) -> AppResult<Book> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&book.id) {
            Some(row) => {
                *row = book.clone();
                Ok(book)
            }
            None => Err(AppError::NotFound("Book not found.".to_string())),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
