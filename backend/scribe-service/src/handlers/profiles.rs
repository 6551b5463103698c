/// Profile handlers - user pages, their posts, follow/unfollow actions
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::domain::{Post, User};
use crate::error::{AppError, Result};
use crate::handlers::{PageQuery, PageResponse};
use crate::middleware::current_user;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
    pub post_count: i64,
    pub follower_count: i64,
    pub following_count: i64,
    /// Whether the authenticated viewer follows this user
    pub following: bool,
}

#[derive(Debug, Serialize)]
pub struct UserPostsResponse {
    pub user: User,
    pub posts: PageResponse<Post>,
}

/// GET /api/v1/users/{username}
pub async fn get_profile(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let viewer = current_user(&http_req).map(|u| u.id);
    let profile = state.users.profile(&username, viewer).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        user: profile.user,
        post_count: profile.post_count,
        follower_count: profile.follower_count,
        following_count: profile.following_count,
        following: profile.following,
    }))
}

/// GET /api/v1/users/{username}/posts
pub async fn get_user_posts(
    state: web::Data<AppState>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let (user, posts, total) = state
        .posts
        .by_author_username(&username, query.limit(), query.offset())
        .await?;

    Ok(HttpResponse::Ok().json(UserPostsResponse {
        user,
        posts: PageResponse::new(posts, query.page(), total),
    }))
}

fn profile_redirect(username: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/api/v1/users/{}", username)))
        .finish()
}

/// POST /api/v1/users/{username}/follow
///
/// Redirects back to the target's profile regardless of outcome. A
/// self-follow is a no-op; an unknown target is 404.
pub async fn follow_user(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let user = current_user(&http_req)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

    state.follows.follow(&user, &username).await?;

    Ok(profile_redirect(&username))
}

/// POST /api/v1/users/{username}/unfollow
///
/// Idempotent: removing an edge that does not exist still redirects.
pub async fn unfollow_user(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let user = current_user(&http_req)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

    state.follows.unfollow(&user, &username).await?;

    Ok(profile_redirect(&username))
}
