use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::database::Database;
use crate::error::ApiError;
use crate::models::post::{CreatePostRequest, Post, PostWithAuthor, UpdatePostRequest};

// Get all bulletin posts with their author, newest first
pub async fn get_all_posts(
    State(db): State<Database>,
    _user: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let posts = sqlx::query_as::<_, PostWithAuthor>(
        "SELECT p.id, p.title, p.content, p.author_id, u.name AS author_name, \
                p.created_at, p.updated_at \
         FROM posts p \
         JOIN users u ON u.id = p.author_id \
         ORDER BY p.created_at DESC",
    )
    .fetch_all(&db)
    .await?;

    Ok(Json(json!({
        "status": "success",
        "data": posts
    })))
}

// Publish a bulletin post (managers only); the caller becomes the author
pub async fn create_post(
    State(db): State<Database>,
    user: CurrentUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    user.require_manager()?;

    if payload.title.trim().is_empty() || payload.content.trim().is_empty() {
        return Err(ApiError::Validation("Title and content are required.".to_string()));
    }

    let post = sqlx::query_as::<_, Post>(
        "INSERT INTO posts (title, content, author_id) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(payload.title.trim())
    .bind(payload.content.trim())
    .bind(user.id)
    .fetch_one(&db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Post published.",
            "data": post
        })),
    ))
}

// Get a single bulletin post with its author
pub async fn get_post_by_id(
    State(db): State<Database>,
    _user: CurrentUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let post = sqlx::query_as::<_, PostWithAuthor>(
        "SELECT p.id, p.title, p.content, p.author_id, u.name AS author_name, \
                p.created_at, p.updated_at \
         FROM posts p \
         JOIN users u ON u.id = p.author_id \
         WHERE p.id = $1",
    )
    .bind(post_id)
    .fetch_optional(&db)
    .await?
    .ok_or(ApiError::NotFound("Post not found."))?;

    Ok(Json(json!({
        "status": "success",
        "data": post
    })))
}

// Edit a bulletin post (managers only); authorship never changes
pub async fn update_post(
    State(db): State<Database>,
    user: CurrentUser,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<Value>, ApiError> {
    user.require_manager()?;

    if payload.title.trim().is_empty() || payload.content.trim().is_empty() {
        return Err(ApiError::Validation("Title and content are required.".to_string()));
    }

    let post = sqlx::query_as::<_, Post>(
        "UPDATE posts SET title = $1, content = $2, updated_at = NOW() \
         WHERE id = $3 RETURNING *",
    )
    .bind(payload.title.trim())
    .bind(payload.content.trim())
    .bind(post_id)
    .fetch_optional(&db)
    .await?
    .ok_or(ApiError::NotFound("Post not found."))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Post updated.",
        "data": post
    })))
}

// Delete a bulletin post (managers only)
pub async fn delete_post(
    State(db): State<Database>,
    user: CurrentUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    user.require_manager()?;

    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(&db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Post not found."));
    }

    Ok(Json(json!({
        "status": "success",
        "message": "Post deleted."
    })))
}
