//! Book endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppResult, ErrorResponse},
    models::book::{BookResponse, CreateBook, UpdateBook},
    services::formatter::{format_book, format_books},
};

use super::{AppJson, AppPath};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books, ordered by id", body = Vec<BookResponse>),
        (status = 500, description = "Record store failure", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookResponse>>> {
    let books = state
        .services
        .books
        .list()
        .await
        .map_err(|e| e.context("Failed to retrieve books."))?;
    Ok(Json(format_books(&books)))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 500, description = "Record store failure", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AppJson(data): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state
        .services
        .creator
        .create_book(data)
        .await
        .map_err(|e| e.context("Failed to create book."))?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<BookResponse>> {
    let book = state
        .services
        .books
        .get(id)
        .await
        .map_err(|e| e.context("Failed to retrieve book."))?;
    Ok(Json(format_book(&book)))
}

/// Update some fields of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(changes): AppJson<UpdateBook>,
) -> AppResult<Json<BookResponse>> {
    let book = state
        .services
        .books
        .update(id, changes)
        .await
        .map_err(|e| e.context("Failed to update book."))?;
    Ok(Json(format_book(&book)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    state
        .services
        .books
        .delete(id)
        .await
        .map_err(|e| e.context("Failed to delete book."))?;
    Ok(StatusCode::NO_CONTENT)
}
