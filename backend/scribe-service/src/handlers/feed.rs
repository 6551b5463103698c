/// Feed handler - the personalized followee feed
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::debug;

use crate::error::Result;
use crate::handlers::{PageQuery, PageResponse};
use crate::middleware::current_user;
use crate::AppState;

/// GET /api/v1/feed
///
/// Posts authored by the viewer's followees, newest first. Anonymous
/// viewers follow nobody and get an empty page.
pub async fn get_feed(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let viewer = current_user(&http_req).map(|u| u.id);

    debug!(
        "Feed request: viewer={:?} page={}",
        viewer,
        query.page()
    );

    let (posts, total) = state
        .feed
        .feed_for(viewer, query.limit(), query.offset())
        .await?;

    Ok(HttpResponse::Ok().json(PageResponse::new(posts, query.page(), total)))
}
