//! Blog post handlers. Each one performs a single repository call.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, SecondsFormat, Utc};

use quill_core::domain::{BlogPost, BlogPostChanges, BlogPostContent, BlogPostId, NewBlogPost};
use quill_shared::MessageResponse;
use quill_shared::dto::{BlogPostRequest, BlogPostResponse};

use crate::middleware::error::{AppError, AppResult, BLOG_NOT_FOUND};
use crate::state::AppState;

fn timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn blog_response(post: BlogPost) -> BlogPostResponse {
    BlogPostResponse {
        id: post.id.to_string(),
        title: post.title,
        body: post.body,
        author: post.author,
        created_at: timestamp(post.created_at),
        updated_at: timestamp(post.updated_at),
    }
}

/// POST /blogs
pub async fn create_blog(
    state: web::Data<AppState>,
    body: web::Json<BlogPostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let content = BlogPostContent::new(req.title, req.body, req.author)?;

    let post = state
        .posts
        .insert(NewBlogPost::new(content))
        .await
        .map_err(AppError::repo("Error creating blog"))?;

    tracing::info!(blog_id = %post.id, "Blog created");
    Ok(HttpResponse::Created().json(blog_response(post)))
}

/// GET /blogs
pub async fn list_blogs(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .find_all()
        .await
        .map_err(AppError::repo("Error getting blogs"))?;

    let body: Vec<BlogPostResponse> = posts.into_iter().map(blog_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /blogs/{id}
pub async fn get_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = BlogPostId::from(path.into_inner());

    let post = state
        .posts
        .find_by_id(&id)
        .await
        .map_err(AppError::repo("Error getting blog by ID"))?
        .ok_or_else(|| AppError::NotFound(BLOG_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(blog_response(post)))
}

/// PUT /blogs/{id}
pub async fn update_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<BlogPostRequest>,
) -> AppResult<HttpResponse> {
    let id = BlogPostId::from(path.into_inner());
    let req = body.into_inner();
    let content = BlogPostContent::new(req.title, req.body, req.author)?;

    state
        .posts
        .update(&id, BlogPostChanges::new(content))
        .await
        .map_err(AppError::repo("Error updating blog"))?;

    tracing::info!(blog_id = %id, "Blog updated");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Blog updated successfully")))
}

/// DELETE /blogs/{id}
pub async fn delete_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = BlogPostId::from(path.into_inner());

    state
        .posts
        .delete(&id)
        .await
        .map_err(AppError::repo("Error deleting blog"))?;

    tracing::info!(blog_id = %id, "Blog deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Blog deleted successfully")))
}
