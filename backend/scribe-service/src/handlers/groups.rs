/// Group handlers - the group directory and per-group listings
use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::domain::{Group, Post};
use crate::error::Result;
use crate::handlers::{PageQuery, PageResponse};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct GroupPostsResponse {
    pub group: Group,
    pub posts: PageResponse<Post>,
}

/// GET /api/v1/groups
pub async fn list_groups(state: web::Data<AppState>) -> Result<HttpResponse> {
    let groups = state.groups.list().await?;
    Ok(HttpResponse::Ok().json(groups))
}

/// GET /api/v1/groups/{slug}/posts
pub async fn get_group_posts(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let (group, posts, total) = state
        .posts
        .by_group_slug(&slug, query.limit(), query.offset())
        .await?;

    Ok(HttpResponse::Ok().json(GroupPostsResponse {
        group,
        posts: PageResponse::new(posts, query.page(), total),
    }))
}
