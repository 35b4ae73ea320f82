//! Repository layer for book persistence

pub mod books;
pub mod memory;

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::book::{Book, NewBook},
};

pub use books::BooksRepository;
pub use memory::InMemoryBookStore;

/// Record store for books.
///
/// Handlers never talk to the database directly; they go through this trait
/// so the SQLite store can be swapped for the in-memory one (or a mock).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Find a book by id
    async fn get(&self, id: i64) -> AppResult<Option<Book>>;

    /// All books, ordered by id
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Persist a new book; the store assigns the id
    async fn insert(&self, book: NewBook) -> AppResult<Book>;

    /// Write back every field of an existing book
    async fn save(&self, book: Book) -> AppResult<Book>;

    /// Remove a book. Returns false when no row had that id.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Cheap liveness probe used by the readiness endpoint
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub books: BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            books: BooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Open the connection pool described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// Private in-memory SQLite database, migrated and ready to use.
    ///
    /// Every SQLite connection to `:memory:` gets its own database, so the
    /// pool is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    /// Apply the embedded migrations
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}
