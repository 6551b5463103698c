/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Comment, Post};
use crate::error::{AppError, Result};
use crate::handlers::{PageQuery, PageResponse};
use crate::middleware::current_user;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 10000))]
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image_key: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 10000))]
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image_key: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// GET /api/v1/posts
///
/// The index listing, served through the page cache when one is
/// configured. Cache failures fall back to the database read.
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let page = query.page();

    if let Some(cache) = &state.page_cache {
        match cache.read_index_page(page).await {
            Ok(Some(body)) => {
                return Ok(HttpResponse::Ok()
                    .content_type("application/json")
                    .body(body));
            }
            Ok(None) => {}
            Err(e) => warn!("Page cache read failed, falling back to DB: {}", e),
        }
    }

    let (posts, total) = state.posts.index(query.limit(), query.offset()).await?;
    let body = serde_json::to_string(&PageResponse::new(posts, page, total))?;

    if let Some(cache) = &state.page_cache {
        if let Err(e) = cache.write_index_page(page, &body).await {
            warn!("Page cache write failed: {}", e);
        }
    }

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

/// POST /api/v1/posts
pub async fn create_post(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&http_req)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;
    req.validate()?;

    let post = state
        .posts
        .create(&user, &req.text, req.group_id, req.image_key.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// GET /api/v1/posts/{post_id}
pub async fn get_post(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post = state.posts.get(*post_id).await?;
    let comments = state.comments.for_post(post.id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse { post, comments }))
}

/// PUT /api/v1/posts/{post_id}
///
/// Author-only edit; authorship and creation timestamp never change.
pub async fn update_post(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    post_id: web::Path<Uuid>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&http_req)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;
    req.validate()?;

    let post = state
        .posts
        .edit(
            user.id,
            *post_id,
            &req.text,
            req.group_id,
            req.image_key.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/v1/posts/{post_id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    post_id: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&http_req)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;
    req.validate()?;

    let comment = state.comments.add(&user, *post_id, &req.text).await?;

    Ok(HttpResponse::Created().json(comment))
}
