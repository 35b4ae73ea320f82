//! Wire formatting for books

use crate::models::book::{Book, BookResponse};

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            publication_year: book.publication_year,
        }
    }
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            publication_year: book.publication_year,
        }
    }
}

pub fn format_book(book: &Book) -> BookResponse {
    BookResponse::from(book)
}

/// Format every book, keeping the input order
pub fn format_books(books: &[Book]) -> Vec<BookResponse> {
    books.iter().map(format_book).collect()
}
